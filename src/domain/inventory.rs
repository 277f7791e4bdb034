use serde::{Deserialize, Serialize};

use crate::domain::types::{IngredientId, IngredientName, NonNegativeAmount, PositiveAmount};

/// Stock below this quantity is highlighted on the inventory screen.
pub const LOW_STOCK_THRESHOLD: f64 = 10.0;

/// Inventory row returned by `/api/inventory`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct InventoryItem {
    pub ingredient_id: IngredientId,
    pub ingredient_name: String,
    pub on_hand_quantity: f64,
    #[serde(default)]
    pub is_add_on: bool,
    #[serde(default)]
    pub price_per_unit: Option<f64>,
}

impl InventoryItem {
    pub fn is_low(&self) -> bool {
        self.on_hand_quantity < LOW_STOCK_THRESHOLD
    }
}

/// Payload of `POST /api/inventory`.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewIngredient {
    pub ingredient_name: IngredientName,
    pub on_hand_quantity: NonNegativeAmount,
    pub is_add_on: bool,
    pub price_per_unit: NonNegativeAmount,
}

/// Payload of `POST /api/inventory/{id}/restock`.
#[derive(Clone, Copy, Debug, Serialize, PartialEq)]
pub struct Restock {
    pub delta: PositiveAmount,
}

/// Response of `POST /api/inventory/{id}/restock`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct RestockResult {
    pub ingredient_id: IngredientId,
    pub delta: f64,
    pub new_quantity: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nullable_price_and_flags_default() {
        let item: InventoryItem = serde_json::from_value(json!({
            "ingredient_id": 3,
            "ingredient_name": "Black Tea Leaves",
            "on_hand_quantity": 4.5,
            "price_per_unit": null
        }))
        .unwrap();

        assert!(!item.is_add_on);
        assert_eq!(item.price_per_unit, None);
        assert!(item.is_low());
    }
}
