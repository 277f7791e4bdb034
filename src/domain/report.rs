//! Report rows returned by the `/api/reports/*` endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::types::{IngredientId, ProductId, TypeConstraintError};

/// Inclusive date range used by the sales and usage reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Builds a range, rejecting a start that falls after the end.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, TypeConstraintError> {
        if start > end {
            return Err(TypeConstraintError::InvalidValue(
                "start date must be before or equal to end date".to_string(),
            ));
        }
        Ok(Self { start, end })
    }

    /// The default sales window: the last thirty days up to `today`.
    pub fn last_thirty_days(today: NaiveDate) -> Self {
        Self {
            start: today - chrono::Days::new(30),
            end: today,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Query parameters in the `YYYY-MM-DD` form the backend expects.
    pub fn query(&self) -> [(&'static str, String); 2] {
        [
            ("start_date", self.start.format("%Y-%m-%d").to_string()),
            ("end_date", self.end.format("%Y-%m-%d").to_string()),
        ]
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SalesRow {
    pub product_id: ProductId,
    pub product_name: String,
    pub qty: f64,
    pub revenue: f64,
}

/// Hourly sales of the current day.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct XReportRow {
    pub hour: String,
    pub sales: f64,
}

impl XReportRow {
    /// `HH:00` part of the backend timestamp, or the raw value if it has no time.
    pub fn hour_label(&self) -> &str {
        self.hour
            .split_once('T')
            .map(|(_, time)| time.get(..5).unwrap_or(time))
            .unwrap_or(&self.hour)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ZReportItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub qty_sold: f64,
}

/// End-of-day summary.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ZReport {
    pub total_revenue: f64,
    #[serde(default)]
    pub items: Vec<ZReportItem>,
    pub date: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UsageRow {
    pub ingredient_id: IngredientId,
    pub ingredient_name: String,
    pub total_used: f64,
    pub current_stock: f64,
    pub orders_count: i64,
}

/// Σ revenue over sales rows.
pub fn total_revenue(rows: &[SalesRow]) -> f64 {
    rows.iter().map(|r| r.revenue).sum()
}
