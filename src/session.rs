//! Typed access to the per-visitor state kept in the cookie session.
//!
//! Unreadable entries (e.g. written by an older release) are logged and
//! treated as absent.

use actix_session::{Session, SessionInsertError};
use chrono::NaiveDate;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::cart::Cart;
use crate::domain::preferences::DisplayPreferences;
use crate::domain::weather::Location;

const CASHIER_CART_KEY: &str = "cashier_cart";
const CUSTOMER_CART_KEY: &str = "customer_cart";
const PREFERENCES_KEY: &str = "display_preferences";
const LOCATION_KEY: &str = "weather_location";
const Z_REPORT_KEY: &str = "last_z_report_date";

/// Each ordering screen keeps its own cart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CartKind {
    Cashier,
    Customer,
}

impl CartKind {
    fn key(self) -> &'static str {
        match self {
            CartKind::Cashier => CASHIER_CART_KEY,
            CartKind::Customer => CUSTOMER_CART_KEY,
        }
    }
}

fn read<T: DeserializeOwned>(session: &Session, key: &str) -> Option<T> {
    match session.get::<T>(key) {
        Ok(value) => value,
        Err(err) => {
            log::warn!("Discarding unreadable session entry '{key}': {err}");
            session.remove(key);
            None
        }
    }
}

fn write<T: Serialize>(session: &Session, key: &str, value: &T) -> Result<(), SessionInsertError> {
    session.insert(key, value).map_err(|err| {
        log::error!("Failed to store session entry '{key}': {err}");
        err
    })
}

pub fn load_cart(session: &Session, kind: CartKind) -> Cart {
    read(session, kind.key()).unwrap_or_default()
}

pub fn store_cart(session: &Session, kind: CartKind, cart: &Cart) -> Result<(), SessionInsertError> {
    if cart.is_empty() {
        session.remove(kind.key());
        return Ok(());
    }
    write(session, kind.key(), cart)
}

pub fn load_preferences(session: &Session) -> DisplayPreferences {
    read(session, PREFERENCES_KEY).unwrap_or_default()
}

pub fn store_preferences(
    session: &Session,
    preferences: &DisplayPreferences,
) -> Result<(), SessionInsertError> {
    write(session, PREFERENCES_KEY, preferences)
}

pub fn load_location(session: &Session) -> Location {
    read(session, LOCATION_KEY).unwrap_or_default()
}

pub fn store_location(session: &Session, location: Location) -> Result<(), SessionInsertError> {
    write(session, LOCATION_KEY, &location)
}

/// Day on which this session last generated a Z report.
pub fn last_z_report_date(session: &Session) -> Option<NaiveDate> {
    read(session, Z_REPORT_KEY)
}

pub fn mark_z_report(session: &Session, date: NaiveDate) -> Result<(), SessionInsertError> {
    write(session, Z_REPORT_KEY, &date)
}
