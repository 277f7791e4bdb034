use serde::{Deserialize, Serialize};

use crate::domain::order::ModificationType;
use crate::domain::types::{IngredientId, PositiveAmount, ProductId, ProductName};

/// Product row returned by `/api/fetchProducts`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub product_id: ProductId,
    pub product_name: String,
    pub unit_price: f64,
    #[serde(default)]
    pub vegan: bool,
    #[serde(default)]
    pub category: Option<String>,
}

impl Product {
    /// Image shown for this product on the customer screen and the menu board.
    pub fn image(&self) -> Option<&'static str> {
        product_image(&self.product_name)
    }
}

/// Add-on ingredient returned by `/api/modifications`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AddOn {
    pub ingredient_id: IngredientId,
    pub ingredient_name: String,
    #[serde(default)]
    pub price_per_unit: f64,
    #[serde(default = "default_possible_modification")]
    pub possible_modification: ModificationType,
}

fn default_possible_modification() -> ModificationType {
    ModificationType::Add
}

/// One row of a product recipe.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RecipeEntry {
    pub ingredient_id: IngredientId,
    pub ingredient_name: String,
    pub quantity_per_unit: f64,
}

/// Ingredient as offered in the cart editor, with the state chosen for the line.
///
/// `originally_in_recipe` only drives whether REMOVE is offered; nothing stops a
/// REMOVE from being stored for another ingredient.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ModificationOption {
    pub ingredient_id: IngredientId,
    pub ingredient_name: String,
    pub price_per_unit: f64,
    pub originally_in_recipe: bool,
    pub current: ModificationType,
}

impl ModificationOption {
    /// Whether the given action button should be rendered for this ingredient.
    pub fn should_display(&self, action: ModificationType) -> bool {
        match action {
            ModificationType::Add => !self.originally_in_recipe,
            ModificationType::Remove => self.originally_in_recipe,
            ModificationType::Less | ModificationType::Extra => true,
            ModificationType::None => false,
        }
    }
}

impl From<&ModificationOption> for AddOn {
    fn from(option: &ModificationOption) -> Self {
        Self {
            ingredient_id: option.ingredient_id,
            ingredient_name: option.ingredient_name.clone(),
            price_per_unit: option.price_per_unit,
            possible_modification: ModificationType::Add,
        }
    }
}

/// Recipe row of a product being created.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewRecipeEntry {
    pub ingredient_id: IngredientId,
    pub quantity_per_unit: PositiveAmount,
}

/// Product creation payload sent to `POST /api/products`.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewProduct {
    pub product_name: ProductName,
    pub unit_price: PositiveAmount,
    pub vegan: bool,
    pub category: String,
    pub recipe: Vec<NewRecipeEntry>,
}

/// Response of `POST /api/products`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct CreatedProduct {
    pub product_id: ProductId,
}

/// Response of `PUT /api/products/{id}/price`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct UpdatedPrice {
    pub product_id: ProductId,
    pub product_name: String,
    pub unit_price: f64,
}

/// Payload of `PUT /api/products/{id}/price`.
#[derive(Clone, Copy, Debug, Serialize, PartialEq)]
pub struct PriceUpdate {
    pub unit_price: PositiveAmount,
}

/// Filter applied to the product grid of the ordering screens.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub vegan_only: bool,
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        if self.vegan_only && !product.vegan {
            return false;
        }
        match &self.category {
            Some(category) => product.category.as_deref() == Some(category.as_str()),
            None => true,
        }
    }

    /// Keeps the products matching the filter, preserving backend order.
    pub fn apply(&self, products: Vec<Product>) -> Vec<Product> {
        products.into_iter().filter(|p| self.matches(p)).collect()
    }
}

/// Looks up the bundled drink picture for a product name (case-insensitive).
pub fn product_image(product_name: &str) -> Option<&'static str> {
    let image = match product_name.trim().to_lowercase().as_str() {
        "classic pearl milk tea" | "matcha pearl milk tea" => "MilkSeries_01.webp",
        "honey pearl milk tea" | "matcha fresh milk" => "MilkSeries_02.webp",
        "coffee creama" | "strawberry matcha fresh milk" | "wintermelon w/ fresh milk" => {
            "MilkSeries_03.webp"
        }
        "coffee milk tea w/ coffee jelly" | "mango matcha fresh milk" => "MilkSeries_04.webp",
        "hokkaido pearl milk tea" | "matcha ice blended" => "MilkSeries_05.webp",
        "thai pearl milk tea" | "oreo w/ pearl" => "MilkSeries_06.webp",
        "taro pearl milk tea" | "taro w/ pudding" => "MilkSeries_07.webp",
        "mango green milk tea" | "thai tea w/ pearl" => "MilkSeries_08.webp",
        "coconut pearl milk tea" | "coffee w/ ice cream" | "halo halo" => "MilkSeries_09.webp",
        "mango w/ ice cream" | "tiger boba" | "halo halo ice blended" => "MilkSeries_10.webp",
        "golden retriever" => "FreshBrew_11_green.webp",
        "classic tea" => "FreshBrew_11_black.webp",
        "honey tea" | "berry lychee burst" | "honey lemonade" | "lava flow"
        | "wintermelon lemonade" => "Fruity_14.webp",
        "mango green tea"
        | "peach tea w/ honey jelly"
        | "peach tea w/ lychee jelly"
        | "strawberry coconut"
        | "wintermelon lemonade ice blended" => "Fruity_15.webp",
        "passion chess"
        | "mango & passion fruit tea"
        | "strawberry w/ lychee jelly & ice cream"
        | "strawberry coconut ice blended" => "Fruity_18.webp",
        _ => return None,
    };
    Some(image)
}
