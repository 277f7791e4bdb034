//! Forms posted by the cashier and customer ordering screens.

use serde::Deserialize;

use crate::domain::cart::{Customization, LineId};
use crate::domain::order::{IceLevel, ModificationType, SizeLevel, SugarLevel};
use crate::domain::types::{IngredientId, OrderId, ProductId};
use crate::forms::FormError;

fn default_quantity() -> String {
    "1".to_string()
}

/// Drink composer submission. `add_on` repeats once per ticked checkbox, so
/// this form is decoded with `serde_html_form`.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: i32,
    #[serde(default = "default_quantity")]
    pub quantity: String,
    #[serde(default)]
    pub sugar_level: SugarLevel,
    #[serde(default)]
    pub size_level: SizeLevel,
    #[serde(default)]
    pub ice_level: IceLevel,
    #[serde(default)]
    pub add_on: Vec<i32>,
}

pub struct AddToCartPayload {
    pub product_id: ProductId,
    pub quantity: i64,
    pub customization: Customization,
    pub add_on_ids: Vec<IngredientId>,
}

impl TryFrom<AddToCartForm> for AddToCartPayload {
    type Error = FormError;

    fn try_from(form: AddToCartForm) -> Result<Self, Self::Error> {
        let product_id =
            ProductId::new(form.product_id).map_err(|_| FormError::InvalidProductId)?;
        let quantity = form
            .quantity
            .trim()
            .parse::<i64>()
            .map_err(|_| FormError::InvalidLineQuantity)?;
        let add_on_ids = form
            .add_on
            .into_iter()
            .map(|id| IngredientId::new(id).map_err(|_| FormError::InvalidIngredientId))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            product_id,
            quantity,
            customization: Customization {
                sugar_level: form.sugar_level,
                size_level: form.size_level,
                ice_level: form.ice_level,
            },
            add_on_ids,
        })
    }
}

fn parse_line_id(raw: &str) -> Result<LineId, FormError> {
    raw.trim().parse().map_err(|_| FormError::InvalidLineId)
}

/// Targets a single cart line (increment, decrement, remove).
#[derive(Debug, Deserialize)]
pub struct LineForm {
    pub line_id: String,
}

impl LineForm {
    pub fn line_id(&self) -> Result<LineId, FormError> {
        parse_line_id(&self.line_id)
    }
}

/// Direct quantity edit of the customer cart.
#[derive(Debug, Deserialize)]
pub struct QuantityForm {
    pub line_id: String,
    pub quantity: String,
}

impl QuantityForm {
    pub fn parse(&self) -> Result<(LineId, i64), FormError> {
        let line_id = parse_line_id(&self.line_id)?;
        let quantity = self
            .quantity
            .trim()
            .parse::<i64>()
            .map_err(|_| FormError::InvalidLineQuantity)?;
        Ok((line_id, quantity))
    }
}

/// Four-way ingredient state chosen in the cart editor.
#[derive(Debug, Deserialize)]
pub struct ModificationForm {
    pub line_id: String,
    pub ingredient_id: i32,
    pub modification_type: ModificationType,
}

impl ModificationForm {
    pub fn parse(&self) -> Result<(LineId, IngredientId, ModificationType), FormError> {
        let line_id = parse_line_id(&self.line_id)?;
        let ingredient_id =
            IngredientId::new(self.ingredient_id).map_err(|_| FormError::InvalidIngredientId)?;
        Ok((line_id, ingredient_id, self.modification_type))
    }
}

/// Add-on checkbox toggled on an existing line.
#[derive(Debug, Deserialize)]
pub struct ToggleAddOnForm {
    pub line_id: String,
    pub ingredient_id: i32,
}

impl ToggleAddOnForm {
    pub fn parse(&self) -> Result<(LineId, IngredientId), FormError> {
        let line_id = parse_line_id(&self.line_id)?;
        let ingredient_id =
            IngredientId::new(self.ingredient_id).map_err(|_| FormError::InvalidIngredientId)?;
        Ok((line_id, ingredient_id))
    }
}

/// Re-adds items of a past order. Without `item_index` the whole order is re-added.
#[derive(Debug, Deserialize)]
pub struct ReorderForm {
    pub order_id: i32,
    #[serde(default)]
    pub item_index: Option<usize>,
}

impl ReorderForm {
    pub fn order_id(&self) -> Result<OrderId, FormError> {
        OrderId::new(self.order_id).map_err(|_| FormError::InvalidOrderId)
    }
}
