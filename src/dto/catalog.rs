use serde::{Deserialize, Serialize};

use crate::domain::product::{Product, ProductFilter};

/// Filters of the product grid on the cashier and customer screens.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    #[serde(default)]
    pub category: Option<String>,
    /// Present when "Vegan Only" is ticked.
    #[serde(default)]
    pub vegan: Option<String>,
}

impl CatalogQuery {
    pub fn filter(&self) -> ProductFilter {
        ProductFilter {
            category: self
                .category
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty() && *c != "all")
                .map(str::to_string),
            vegan_only: self.vegan.is_some(),
        }
    }
}

/// Product tile of the ordering screens and the menu board.
#[derive(Debug, Serialize)]
pub struct ProductCard<'a> {
    #[serde(flatten)]
    pub product: &'a Product,
    pub image: Option<&'static str>,
}

impl<'a> ProductCard<'a> {
    pub fn list(products: &'a [Product]) -> Vec<Self> {
        products
            .iter()
            .map(|product| Self {
                product,
                image: product.image(),
            })
            .collect()
    }
}
