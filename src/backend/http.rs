//! reqwest implementation of the backend gateway traits.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::backend::errors::{BackendError, BackendResult};
use crate::backend::{
    CatalogReader, CatalogWriter, EmployeeReader, EmployeeWriter, InventoryReader,
    InventoryWriter, OrderHistoryReader, OrderWriter, ReportReader,
};
use crate::domain::employee::{Employee, NewEmployee};
use crate::domain::inventory::{InventoryItem, NewIngredient, Restock, RestockResult};
use crate::domain::order::{OrderPayload, OrderReceipt, PastOrder, UserOrders};
use crate::domain::product::{
    AddOn, CreatedProduct, NewProduct, PriceUpdate, Product, RecipeEntry, UpdatedPrice,
};
use crate::domain::report::{DateRange, SalesRow, UsageRow, XReportRow, ZReport};
use crate::domain::types::{EmployeeId, IngredientId, ProductId};

/// Shared HTTP client bound to the backend base URL.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> BackendResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| BackendError::Config(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> BackendResult<T> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::warn!("Backend responded with {status}: {body}");
            return Err(BackendError::from_response(status.as_u16(), &body));
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| BackendError::InvalidResponse(e.to_string()))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> BackendResult<T> {
        Self::send(self.client.get(self.url(path))).await
    }

    async fn get_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> BackendResult<T> {
        Self::send(self.client.get(self.url(path)).query(query)).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> BackendResult<T> {
        Self::send(self.client.post(self.url(path)).json(body)).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> BackendResult<T> {
        Self::send(self.client.put(self.url(path)).json(body)).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> BackendResult<T> {
        Self::send(self.client.delete(self.url(path))).await
    }
}

#[async_trait]
impl CatalogReader for HttpBackend {
    async fn list_products(&self) -> BackendResult<Vec<Product>> {
        self.get("api/fetchProducts").await
    }

    async fn list_categories(&self) -> BackendResult<Vec<String>> {
        // uncategorised products show up as null
        let categories: Vec<Option<String>> = self.get("api/product_categories").await?;
        Ok(categories.into_iter().flatten().collect())
    }

    async fn list_add_ons(&self) -> BackendResult<Vec<AddOn>> {
        self.get("api/modifications").await
    }

    async fn get_recipe(&self, product_id: ProductId) -> BackendResult<Vec<RecipeEntry>> {
        self.get(&format!("api/products/{product_id}/recipe")).await
    }
}

#[async_trait]
impl CatalogWriter for HttpBackend {
    async fn update_price(
        &self,
        product_id: ProductId,
        update: &PriceUpdate,
    ) -> BackendResult<UpdatedPrice> {
        self.put(&format!("api/products/{product_id}/price"), update)
            .await
    }

    async fn create_product(&self, product: &NewProduct) -> BackendResult<CreatedProduct> {
        self.post("api/products", product).await
    }
}

#[async_trait]
impl OrderWriter for HttpBackend {
    async fn post_order(&self, order: &OrderPayload) -> BackendResult<OrderReceipt> {
        self.post("api/postOrder", order).await
    }
}

#[derive(Serialize)]
struct UserOrdersRequest<'a> {
    clerk_user_id: &'a str,
}

#[async_trait]
impl OrderHistoryReader for HttpBackend {
    async fn list_user_orders(&self, clerk_user_id: &str) -> BackendResult<Vec<PastOrder>> {
        let orders: UserOrders = self
            .post("api/getUserOrders", &UserOrdersRequest { clerk_user_id })
            .await?;
        Ok(orders.orders)
    }
}

#[async_trait]
impl EmployeeReader for HttpBackend {
    async fn list_employees(&self) -> BackendResult<Vec<Employee>> {
        let rows: Vec<Value> = self.get("api/employees").await?;
        Ok(decode_employees(rows))
    }
}

/// Keeps the rows that decode; a single malformed employee must not hide the
/// rest of the staff list.
fn decode_employees(rows: Vec<Value>) -> Vec<Employee> {
    rows.into_iter()
        .filter_map(|row| match serde_json::from_value::<Employee>(row.clone()) {
            Ok(employee) => Some(employee),
            Err(err) => {
                log::warn!("Skipping employee row {row}: {err}");
                None
            }
        })
        .collect()
}

#[async_trait]
impl EmployeeWriter for HttpBackend {
    async fn create_employee(&self, employee: &NewEmployee) -> BackendResult<Employee> {
        self.post("api/employees", employee).await
    }

    async fn update_employee(
        &self,
        employee_id: EmployeeId,
        employee: &NewEmployee,
    ) -> BackendResult<()> {
        let _: serde_json::Value = self
            .put(&format!("api/employees/{employee_id}"), employee)
            .await?;
        Ok(())
    }

    async fn delete_employee(&self, employee_id: EmployeeId) -> BackendResult<()> {
        let _: serde_json::Value = self
            .delete(&format!("api/employees/{employee_id}"))
            .await?;
        Ok(())
    }
}

#[async_trait]
impl InventoryReader for HttpBackend {
    async fn list_inventory(&self) -> BackendResult<Vec<InventoryItem>> {
        self.get("api/inventory").await
    }
}

#[async_trait]
impl InventoryWriter for HttpBackend {
    async fn create_ingredient(&self, ingredient: &NewIngredient) -> BackendResult<InventoryItem> {
        self.post("api/inventory", ingredient).await
    }

    async fn restock(
        &self,
        ingredient_id: IngredientId,
        restock: &Restock,
    ) -> BackendResult<RestockResult> {
        self.post(&format!("api/inventory/{ingredient_id}/restock"), restock)
            .await
    }
}

#[async_trait]
impl ReportReader for HttpBackend {
    async fn sales_report(&self, range: &DateRange) -> BackendResult<Vec<SalesRow>> {
        self.get_with_query("api/reports/sales", range.query().as_slice())
            .await
    }

    async fn x_report(&self) -> BackendResult<Vec<XReportRow>> {
        self.get("api/reports/x-report").await
    }

    async fn z_report(&self) -> BackendResult<ZReport> {
        self.get("api/reports/z-report").await
    }

    async fn usage_report(&self, range: &DateRange) -> BackendResult<Vec<UsageRow>> {
        self.get_with_query("api/reports/usage-chart", range.query().as_slice())
            .await
    }
}
