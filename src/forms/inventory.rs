use serde::Deserialize;
use validator::Validate;

use crate::domain::inventory::{NewIngredient, Restock};
use crate::domain::types::{IngredientId, IngredientName, NonNegativeAmount, PositiveAmount};
use crate::forms::{FormError, parse_decimal, parse_id};

#[derive(Debug, Deserialize, Validate)]
/// New ingredient form of the inventory screen.
pub struct IngredientForm {
    #[validate(length(min = 1))]
    pub ingredient_name: String,
    #[serde(default)]
    pub on_hand_quantity: String,
    /// Present when the checkbox is ticked.
    #[serde(default)]
    pub is_add_on: Option<String>,
    #[serde(default)]
    pub price_per_unit: String,
}

impl TryFrom<IngredientForm> for NewIngredient {
    type Error = FormError;

    fn try_from(form: IngredientForm) -> Result<Self, Self::Error> {
        form.validate()
            .map_err(|_| FormError::InvalidIngredientName)?;
        let ingredient_name = IngredientName::new(form.ingredient_name)
            .map_err(|_| FormError::InvalidIngredientName)?;

        let on_hand_quantity = parse_decimal(&form.on_hand_quantity)
            .and_then(|v| NonNegativeAmount::new(v).ok())
            .ok_or(FormError::InvalidStockQuantity)?;

        // an empty price means the ingredient is not sold as an add-on
        let price_per_unit = if form.price_per_unit.trim().is_empty() {
            NonNegativeAmount::new(0.0).map_err(|_| FormError::InvalidUnitPrice)?
        } else {
            parse_decimal(&form.price_per_unit)
                .and_then(|v| NonNegativeAmount::new(v).ok())
                .ok_or(FormError::InvalidUnitPrice)?
        };

        Ok(NewIngredient {
            ingredient_name,
            on_hand_quantity,
            is_add_on: form.is_add_on.is_some(),
            price_per_unit,
        })
    }
}

#[derive(Debug, Deserialize)]
/// Restock form: selected ingredient plus the amount to add.
pub struct RestockForm {
    #[serde(default)]
    pub ingredient_id: String,
    #[serde(default)]
    pub delta: String,
}

pub struct RestockPayload {
    pub ingredient_id: IngredientId,
    pub restock: Restock,
}

impl TryFrom<RestockForm> for RestockPayload {
    type Error = FormError;

    fn try_from(form: RestockForm) -> Result<Self, Self::Error> {
        let ingredient_id = parse_id(&form.ingredient_id)
            .and_then(|id| IngredientId::new(id).ok())
            .ok_or(FormError::InvalidIngredientId)?;
        let delta = parse_decimal(&form.delta)
            .and_then(|v| PositiveAmount::new(v).ok())
            .ok_or(FormError::InvalidPositiveNumber)?;

        Ok(Self {
            ingredient_id,
            restock: Restock { delta },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ingredient(name: &str, qty: &str, price: &str) -> IngredientForm {
        IngredientForm {
            ingredient_name: name.to_string(),
            on_hand_quantity: qty.to_string(),
            is_add_on: Some("on".to_string()),
            price_per_unit: price.to_string(),
        }
    }

    #[test]
    fn ingredient_messages_follow_field_order() {
        assert_eq!(
            NewIngredient::try_from(ingredient("  ", "1", "1")).err(),
            Some(FormError::InvalidIngredientName)
        );
        assert_eq!(
            NewIngredient::try_from(ingredient("Boba", "-1", "1")).err(),
            Some(FormError::InvalidStockQuantity)
        );
        assert_eq!(
            NewIngredient::try_from(ingredient("Boba", "5", "-0.5")).err(),
            Some(FormError::InvalidUnitPrice)
        );
    }

    #[test]
    fn blank_price_defaults_to_zero() {
        let new = NewIngredient::try_from(ingredient("Boba", "0", "")).unwrap();

        assert_eq!(new.price_per_unit.get(), 0.0);
        assert_eq!(new.on_hand_quantity.get(), 0.0);
        assert!(new.is_add_on);
    }

    #[test]
    fn restock_requires_positive_delta() {
        let form = RestockForm {
            ingredient_id: "4".to_string(),
            delta: "0".to_string(),
        };
        assert_eq!(
            RestockPayload::try_from(form).err(),
            Some(FormError::InvalidPositiveNumber)
        );

        let form = RestockForm {
            ingredient_id: "".to_string(),
            delta: "5".to_string(),
        };
        assert_eq!(
            RestockPayload::try_from(form).err(),
            Some(FormError::InvalidIngredientId)
        );
    }
}
