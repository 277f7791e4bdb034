//! DTOs of the customer ordering screen and its cart.

use crate::domain::order::PastOrder;
use crate::domain::product::{AddOn, Product, ProductFilter};
use crate::domain::weather::{Location, Weather};
use crate::dto::cart::CartView;

pub struct CustomerPageData {
    pub products: Vec<Product>,
    pub categories: Vec<String>,
    pub add_ons: Vec<AddOn>,
    pub filter: ProductFilter,
    pub location: Location,
    pub weather: Option<Weather>,
    /// Five most recent orders of the signed-in customer.
    pub history: Vec<PastOrder>,
    pub cart_count: u32,
    pub error: Option<String>,
}

pub struct CartPageData {
    pub cart: CartView,
    pub signed_in: bool,
}
