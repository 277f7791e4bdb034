//! Mock gateway implementations for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::backend::errors::BackendResult;
use crate::backend::{
    CatalogReader, CatalogWriter, EmployeeReader, EmployeeWriter, InventoryReader,
    InventoryWriter, OrderHistoryReader, OrderWriter, ReportReader, WeatherProvider,
};
use crate::domain::employee::{Employee, NewEmployee};
use crate::domain::inventory::{InventoryItem, NewIngredient, Restock, RestockResult};
use crate::domain::order::{OrderPayload, OrderReceipt, PastOrder};
use crate::domain::product::{
    AddOn, CreatedProduct, NewProduct, PriceUpdate, Product, RecipeEntry, UpdatedPrice,
};
use crate::domain::report::{DateRange, SalesRow, UsageRow, XReportRow, ZReport};
use crate::domain::types::{EmployeeId, IngredientId, ProductId};
use crate::domain::weather::{Location, Weather};

mock! {
    pub Backend {}

    #[async_trait]
    impl CatalogReader for Backend {
        async fn list_products(&self) -> BackendResult<Vec<Product>>;
        async fn list_categories(&self) -> BackendResult<Vec<String>>;
        async fn list_add_ons(&self) -> BackendResult<Vec<AddOn>>;
        async fn get_recipe(&self, product_id: ProductId) -> BackendResult<Vec<RecipeEntry>>;
    }

    #[async_trait]
    impl CatalogWriter for Backend {
        async fn update_price(
            &self,
            product_id: ProductId,
            update: &PriceUpdate,
        ) -> BackendResult<UpdatedPrice>;
        async fn create_product(&self, product: &NewProduct) -> BackendResult<CreatedProduct>;
    }

    #[async_trait]
    impl OrderWriter for Backend {
        async fn post_order(&self, order: &OrderPayload) -> BackendResult<OrderReceipt>;
    }

    #[async_trait]
    impl OrderHistoryReader for Backend {
        async fn list_user_orders(&self, clerk_user_id: &str) -> BackendResult<Vec<PastOrder>>;
    }

    #[async_trait]
    impl EmployeeReader for Backend {
        async fn list_employees(&self) -> BackendResult<Vec<Employee>>;
    }

    #[async_trait]
    impl EmployeeWriter for Backend {
        async fn create_employee(&self, employee: &NewEmployee) -> BackendResult<Employee>;
        async fn update_employee(
            &self,
            employee_id: EmployeeId,
            employee: &NewEmployee,
        ) -> BackendResult<()>;
        async fn delete_employee(&self, employee_id: EmployeeId) -> BackendResult<()>;
    }

    #[async_trait]
    impl InventoryReader for Backend {
        async fn list_inventory(&self) -> BackendResult<Vec<InventoryItem>>;
    }

    #[async_trait]
    impl InventoryWriter for Backend {
        async fn create_ingredient(&self, ingredient: &NewIngredient) -> BackendResult<InventoryItem>;
        async fn restock(
            &self,
            ingredient_id: IngredientId,
            restock: &Restock,
        ) -> BackendResult<RestockResult>;
    }

    #[async_trait]
    impl ReportReader for Backend {
        async fn sales_report(&self, range: &DateRange) -> BackendResult<Vec<SalesRow>>;
        async fn x_report(&self) -> BackendResult<Vec<XReportRow>>;
        async fn z_report(&self) -> BackendResult<ZReport>;
        async fn usage_report(&self, range: &DateRange) -> BackendResult<Vec<UsageRow>>;
    }
}

mock! {
    pub WeatherService {}

    #[async_trait]
    impl WeatherProvider for WeatherService {
        async fn current(&self, location: Location) -> Option<Weather>;
    }
}
