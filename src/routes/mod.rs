//! HTTP handlers and the helpers they share.

use std::collections::HashMap;

use actix_session::Session;
use actix_web::HttpResponse;
use actix_web::http::header;
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages, Level};
use tera::{Context, Tera, Value};

use crate::domain::cart::Cart;
use crate::domain::types::format_price;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::session::{CartKind, store_cart};

pub mod cashier;
pub mod customer;
pub mod main;
pub mod manager;
pub mod menu_board;

/// Maps a flash message level to the bootstrap alert class.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Context shared by every page: alerts, the current user and the page key
/// used to highlight the navigation.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    user: Option<&AuthenticatedUser>,
    current_page: &str,
    server_config: &ServerConfig,
) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_user", &user);
    context.insert(
        "current_user_name",
        &user.map(AuthenticatedUser::display_name),
    );
    context.insert("current_page", current_page);
    context.insert("auth_service_url", &server_config.auth_service_url);
    context
}

/// Tera filter rendering a number as `$x.yy`.
pub fn price_filter(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    let amount = value
        .as_f64()
        .ok_or_else(|| tera::Error::msg(format!("price filter expects a number, got {value}")))?;
    Ok(Value::String(format_price(amount)))
}

/// Persists the cart, flashing an error when the session refused it.
pub(crate) fn save_cart(session: &Session, kind: CartKind, cart: &Cart) {
    if store_cart(session, kind, cart).is_err() {
        FlashMessage::error("Could not save your cart. Please try again.").send();
    }
}
