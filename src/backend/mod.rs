//! Seams to the store's REST backend.
//!
//! Services depend on these traits only; [`http::HttpBackend`] implements all
//! of them over reqwest and `mock::MockBackend` replaces it in tests.

use async_trait::async_trait;

use crate::backend::errors::BackendResult;
use crate::domain::employee::{Employee, NewEmployee};
use crate::domain::inventory::{InventoryItem, NewIngredient, Restock, RestockResult};
use crate::domain::order::{OrderPayload, OrderReceipt, PastOrder};
use crate::domain::product::{
    AddOn, CreatedProduct, NewProduct, PriceUpdate, Product, RecipeEntry, UpdatedPrice,
};
use crate::domain::report::{DateRange, SalesRow, UsageRow, XReportRow, ZReport};
use crate::domain::types::{EmployeeId, IngredientId, ProductId};
use crate::domain::weather::{Location, Weather};

pub mod errors;
pub mod http;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod weather;

#[async_trait]
pub trait CatalogReader {
    async fn list_products(&self) -> BackendResult<Vec<Product>>;
    async fn list_categories(&self) -> BackendResult<Vec<String>>;
    async fn list_add_ons(&self) -> BackendResult<Vec<AddOn>>;
    async fn get_recipe(&self, product_id: ProductId) -> BackendResult<Vec<RecipeEntry>>;
}

#[async_trait]
pub trait CatalogWriter {
    async fn update_price(
        &self,
        product_id: ProductId,
        update: &PriceUpdate,
    ) -> BackendResult<UpdatedPrice>;
    async fn create_product(&self, product: &NewProduct) -> BackendResult<CreatedProduct>;
}

#[async_trait]
pub trait OrderWriter {
    async fn post_order(&self, order: &OrderPayload) -> BackendResult<OrderReceipt>;
}

#[async_trait]
pub trait OrderHistoryReader {
    /// Most recent orders first, at most five.
    async fn list_user_orders(&self, clerk_user_id: &str) -> BackendResult<Vec<PastOrder>>;
}

#[async_trait]
pub trait EmployeeReader {
    async fn list_employees(&self) -> BackendResult<Vec<Employee>>;
}

#[async_trait]
pub trait EmployeeWriter {
    async fn create_employee(&self, employee: &NewEmployee) -> BackendResult<Employee>;
    async fn update_employee(
        &self,
        employee_id: EmployeeId,
        employee: &NewEmployee,
    ) -> BackendResult<()>;
    async fn delete_employee(&self, employee_id: EmployeeId) -> BackendResult<()>;
}

#[async_trait]
pub trait InventoryReader {
    async fn list_inventory(&self) -> BackendResult<Vec<InventoryItem>>;
}

#[async_trait]
pub trait InventoryWriter {
    async fn create_ingredient(&self, ingredient: &NewIngredient) -> BackendResult<InventoryItem>;
    async fn restock(
        &self,
        ingredient_id: IngredientId,
        restock: &Restock,
    ) -> BackendResult<RestockResult>;
}

#[async_trait]
pub trait ReportReader {
    async fn sales_report(&self, range: &DateRange) -> BackendResult<Vec<SalesRow>>;
    async fn x_report(&self) -> BackendResult<Vec<XReportRow>>;
    async fn z_report(&self) -> BackendResult<ZReport>;
    async fn usage_report(&self, range: &DateRange) -> BackendResult<Vec<UsageRow>>;
}

/// Current conditions lookup. Any failure is reported as `None`.
#[async_trait]
pub trait WeatherProvider {
    async fn current(&self, location: Location) -> Option<Weather>;
}
