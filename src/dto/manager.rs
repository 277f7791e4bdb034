//! DTOs used in the manager screens.

use serde::{Deserialize, Serialize};

use crate::domain::employee::Employee;
use crate::domain::inventory::InventoryItem;
use crate::domain::product::{Product, RecipeEntry};
use crate::domain::report::{DateRange, SalesRow, UsageRow, XReportRow};

pub struct EmployeesPageData {
    pub employees: Vec<Employee>,
    pub error: Option<String>,
}

pub struct InventoryPageData {
    pub items: Vec<InventoryItem>,
    pub low_stock_count: usize,
    pub error: Option<String>,
}

/// Query string of the menu management screen.
#[derive(Debug, Default, Deserialize)]
pub struct MenuQuery {
    #[serde(default)]
    pub product_id: Option<i32>,
}

/// Selected product with its recipe.
#[derive(Debug, Serialize)]
pub struct SelectedProduct {
    pub product: Product,
    pub recipe: Vec<RecipeEntry>,
}

pub struct MenuPageData {
    pub products: Vec<Product>,
    /// Ingredients offered in the recipe rows of the new product form.
    pub ingredients: Vec<InventoryItem>,
    pub selected: Option<SelectedProduct>,
    pub error: Option<String>,
}

/// One section of the reports screen; a failed fetch only blanks its section.
#[derive(Debug, Serialize)]
pub struct ReportSection<T> {
    pub rows: Vec<T>,
    pub error: Option<String>,
}

impl<T> ReportSection<T> {
    pub fn failed(error: String) -> Self {
        Self {
            rows: Vec::new(),
            error: Some(error),
        }
    }
}

impl<T> From<Vec<T>> for ReportSection<T> {
    fn from(rows: Vec<T>) -> Self {
        Self { rows, error: None }
    }
}

pub struct ReportsPageData {
    pub range: DateRange,
    pub sales: ReportSection<SalesRow>,
    pub sales_total: f64,
    pub x_report: ReportSection<XReportRow>,
    pub usage: ReportSection<UsageRow>,
    /// Whether the Z report was already generated today in this session.
    pub z_generated_today: bool,
}
