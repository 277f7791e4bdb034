use crate::domain::employee::Employee;
use crate::domain::product::{AddOn, Product, ProductFilter};
use crate::dto::cart::CartView;

/// Data required to render the cashier screen.
pub struct CashierPageData {
    /// Staff record of the signed-in cashier.
    pub employee: Employee,
    pub products: Vec<Product>,
    pub categories: Vec<String>,
    pub add_ons: Vec<AddOn>,
    pub filter: ProductFilter,
    pub cart: CartView,
    /// Inline error when the menu could not be loaded.
    pub error: Option<String>,
}
