//! Cart model shared by the cashier and customer ordering screens.
//!
//! A cart is an ordered collection of line items keyed by a synthetic
//! [`LineId`]. Every line snapshots the product's base price at the time it was
//! added; its unit price is that base plus the prices of the modifications it
//! carries. The cart total is recomputed from the lines on every read.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::order::{
    IceLevel, ModificationType, OrderItem, OrderModification, OrderPayload, PastOrderItem,
    Purchaser, SizeLevel, SugarLevel,
};
use crate::domain::product::{AddOn, ModificationOption, Product, RecipeEntry};
use crate::domain::types::{IngredientId, ProductId, round_cents};

/// Upper bound for the quantity of a single line on every screen.
pub const MAX_LINE_QUANTITY: u32 = 100;

/// Errors raised by cart mutations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    #[error("Quantity must be between 1 and {MAX_LINE_QUANTITY}")]
    QuantityOutOfRange(i64),
    #[error("This item is no longer in the cart")]
    LineNotFound,
    #[error("Your cart is empty")]
    Empty,
    #[error("Order total must be greater than zero")]
    ZeroTotal,
}

/// Synthetic identity of a cart line.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct LineId(Uuid);

impl LineId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LineId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for LineId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for LineId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Sugar, size and ice selection of a drink.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Customization {
    pub sugar_level: SugarLevel,
    pub size_level: SizeLevel,
    pub ice_level: IceLevel,
}

/// Ingredient change carried by a line item.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LineModification {
    pub ingredient_id: IngredientId,
    pub ingredient_name: String,
    pub modification_type: ModificationType,
    /// Price added to the unit price of the line.
    pub price: f64,
}

impl LineModification {
    fn from_add_on(add_on: &AddOn, modification_type: ModificationType) -> Self {
        Self {
            ingredient_id: add_on.ingredient_id,
            ingredient_name: add_on.ingredient_name.clone(),
            modification_type,
            price: charged_price(add_on.price_per_unit, modification_type),
        }
    }
}

fn charged_price(price_per_unit: f64, modification_type: ModificationType) -> f64 {
    if modification_type.is_charged() {
        price_per_unit
    } else {
        0.0
    }
}

fn check_quantity(quantity: i64) -> Result<u32, CartError> {
    if (1..=i64::from(MAX_LINE_QUANTITY)).contains(&quantity) {
        // the range check above guarantees the value fits
        Ok(quantity as u32)
    } else {
        Err(CartError::QuantityOutOfRange(quantity))
    }
}

/// One cart entry: a product plus its customizations and quantity.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    pub line_id: LineId,
    pub product_id: ProductId,
    pub product_name: String,
    pub base_unit_price: f64,
    pub quantity: u32,
    pub customization: Customization,
    pub modifications: Vec<LineModification>,
}

impl LineItem {
    /// Builds a line for `product` with the selected add-ons applied as `ADD`.
    ///
    /// Add-ons repeated in `add_ons` are only applied once.
    pub fn from_product(
        product: &Product,
        quantity: i64,
        customization: Customization,
        add_ons: &[AddOn],
    ) -> Result<Self, CartError> {
        let quantity = check_quantity(quantity)?;
        let mut line = Self {
            line_id: LineId::new(),
            product_id: product.product_id,
            product_name: product.product_name.clone(),
            base_unit_price: product.unit_price,
            quantity,
            customization,
            modifications: Vec::with_capacity(add_ons.len()),
        };
        for add_on in add_ons {
            if !line.has_modification(add_on.ingredient_id) {
                line.modifications
                    .push(LineModification::from_add_on(add_on, ModificationType::Add));
            }
        }
        Ok(line)
    }

    /// Rebuilds a line from an item of a past order, keeping its sale price.
    /// Quantities outside the editable range are clamped into it.
    pub fn from_past_item(item: &PastOrderItem) -> Result<Self, CartError> {
        let quantity = check_quantity(i64::from(item.quantity.clamp(1, MAX_LINE_QUANTITY)))?;
        let modifications: Vec<LineModification> = item
            .modifications
            .iter()
            .filter(|m| m.modification_type != ModificationType::None)
            .map(|m| LineModification {
                ingredient_id: m.ingredient_id,
                ingredient_name: m.ingredient_name.clone(),
                modification_type: m.modification_type,
                price: m.price_change.unwrap_or(0.0),
            })
            .collect();
        let modifications_price: f64 = modifications.iter().map(|m| m.price).sum();

        Ok(Self {
            line_id: LineId::new(),
            product_id: item.product_id,
            product_name: item.product_name.clone(),
            base_unit_price: round_cents(item.unit_price - modifications_price),
            quantity,
            customization: Customization {
                sugar_level: item.sugar_level,
                size_level: item.size_level,
                ice_level: item.ice_level,
            },
            modifications,
        })
    }

    /// Sum of the prices of the modifications on this line.
    pub fn modifications_price(&self) -> f64 {
        self.modifications.iter().map(|m| m.price).sum()
    }

    /// Base price plus modification prices.
    pub fn unit_price(&self) -> f64 {
        self.base_unit_price + self.modifications_price()
    }

    pub fn line_total(&self) -> f64 {
        self.unit_price() * f64::from(self.quantity)
    }

    pub fn has_modification(&self, ingredient_id: IngredientId) -> bool {
        self.modifications
            .iter()
            .any(|m| m.ingredient_id == ingredient_id)
    }

    /// State of an ingredient on this line; `NONE` when untouched.
    pub fn modification_state(&self, ingredient_id: IngredientId) -> ModificationType {
        self.modifications
            .iter()
            .find(|m| m.ingredient_id == ingredient_id)
            .map(|m| m.modification_type)
            .unwrap_or_default()
    }

    /// Ingredients offered by the cart editor for this line: recipe
    /// ingredients first, then add-ons that are not part of the recipe.
    pub fn modification_options(
        &self,
        recipe: &[RecipeEntry],
        add_ons: &[AddOn],
    ) -> Vec<ModificationOption> {
        let price_of = |ingredient_id: IngredientId| {
            add_ons
                .iter()
                .find(|a| a.ingredient_id == ingredient_id)
                .map(|a| a.price_per_unit)
                .unwrap_or(0.0)
        };

        let mut options: Vec<ModificationOption> = recipe
            .iter()
            .map(|entry| ModificationOption {
                ingredient_id: entry.ingredient_id,
                ingredient_name: entry.ingredient_name.clone(),
                price_per_unit: price_of(entry.ingredient_id),
                originally_in_recipe: true,
                current: self.modification_state(entry.ingredient_id),
            })
            .collect();

        options.extend(
            add_ons
                .iter()
                .filter(|a| !recipe.iter().any(|r| r.ingredient_id == a.ingredient_id))
                .map(|a| ModificationOption {
                    ingredient_id: a.ingredient_id,
                    ingredient_name: a.ingredient_name.clone(),
                    price_per_unit: a.price_per_unit,
                    originally_in_recipe: false,
                    current: self.modification_state(a.ingredient_id),
                }),
        );

        options
    }

    /// Swaps membership of the add-on in the modification set.
    pub fn toggle_add_on(&mut self, add_on: &AddOn) {
        if self.has_modification(add_on.ingredient_id) {
            self.modifications
                .retain(|m| m.ingredient_id != add_on.ingredient_id);
        } else {
            self.modifications
                .push(LineModification::from_add_on(add_on, ModificationType::Add));
        }
    }

    /// Puts the ingredient in the requested state; `NONE` drops it.
    pub fn set_modification(&mut self, add_on: &AddOn, modification_type: ModificationType) {
        if modification_type == ModificationType::None {
            self.modifications
                .retain(|m| m.ingredient_id != add_on.ingredient_id);
            return;
        }

        match self
            .modifications
            .iter_mut()
            .find(|m| m.ingredient_id == add_on.ingredient_id)
        {
            Some(existing) => {
                existing.modification_type = modification_type;
                existing.price = charged_price(add_on.price_per_unit, modification_type);
            }
            None => self
                .modifications
                .push(LineModification::from_add_on(add_on, modification_type)),
        }
    }

    fn to_order_item(&self) -> OrderItem {
        OrderItem {
            product_id: self.product_id,
            quantity: self.quantity,
            unit_price_at_sale: round_cents(self.unit_price()),
            sugar_level: self.customization.sugar_level,
            size_level: self.customization.size_level,
            ice_level: self.customization.ice_level,
            modifications: self
                .modifications
                .iter()
                .map(|m| OrderModification {
                    ingredient_id: m.ingredient_id,
                    modification_type: m.modification_type,
                    price_change: round_cents(m.price),
                })
                .collect(),
        }
    }
}

/// Ordered set of line items with a derived total.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    lines: Vec<LineItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Number of drinks in the cart, counting quantities.
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Σ unit price × quantity over all lines.
    pub fn total(&self) -> f64 {
        self.lines.iter().map(LineItem::line_total).sum()
    }

    pub fn get(&self, line_id: LineId) -> Option<&LineItem> {
        self.lines.iter().find(|l| l.line_id == line_id)
    }

    fn get_mut(&mut self, line_id: LineId) -> Result<&mut LineItem, CartError> {
        self.lines
            .iter_mut()
            .find(|l| l.line_id == line_id)
            .ok_or(CartError::LineNotFound)
    }

    pub fn add(&mut self, line: LineItem) -> LineId {
        let line_id = line.line_id;
        self.lines.push(line);
        line_id
    }

    /// Adds one unit; a no-op once the line reaches [`MAX_LINE_QUANTITY`].
    pub fn increment(&mut self, line_id: LineId) -> Result<(), CartError> {
        let line = self.get_mut(line_id)?;
        if line.quantity < MAX_LINE_QUANTITY {
            line.quantity += 1;
        }
        Ok(())
    }

    /// Removes one unit; a no-op when the line holds a single unit.
    pub fn decrement(&mut self, line_id: LineId) -> Result<(), CartError> {
        let line = self.get_mut(line_id)?;
        if line.quantity > 1 {
            line.quantity -= 1;
        }
        Ok(())
    }

    /// Sets the quantity directly. Zero or less removes the line.
    pub fn set_quantity(&mut self, line_id: LineId, quantity: i64) -> Result<(), CartError> {
        if quantity <= 0 {
            self.remove(line_id)?;
            return Ok(());
        }
        let quantity = check_quantity(quantity)?;
        self.get_mut(line_id)?.quantity = quantity;
        Ok(())
    }

    pub fn remove(&mut self, line_id: LineId) -> Result<LineItem, CartError> {
        let index = self
            .lines
            .iter()
            .position(|l| l.line_id == line_id)
            .ok_or(CartError::LineNotFound)?;
        Ok(self.lines.remove(index))
    }

    pub fn toggle_add_on(&mut self, line_id: LineId, add_on: &AddOn) -> Result<(), CartError> {
        self.get_mut(line_id)?.toggle_add_on(add_on);
        Ok(())
    }

    pub fn set_modification(
        &mut self,
        line_id: LineId,
        add_on: &AddOn,
        modification_type: ModificationType,
    ) -> Result<(), CartError> {
        self.get_mut(line_id)?
            .set_modification(add_on, modification_type);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Builds the `/api/postOrder` body for this cart.
    ///
    /// Fails when the cart is empty or its total is not positive.
    pub fn to_payload(&self, purchaser: Purchaser) -> Result<OrderPayload, CartError> {
        if self.is_empty() {
            return Err(CartError::Empty);
        }
        let total_amount = round_cents(self.total());
        if total_amount <= 0.0 {
            return Err(CartError::ZeroTotal);
        }
        Ok(OrderPayload {
            total_amount,
            purchaser,
            items: self.lines.iter().map(LineItem::to_order_item).collect(),
        })
    }
}
