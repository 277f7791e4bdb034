use serde::Deserialize;
use validator::Validate;

use crate::domain::product::{NewProduct, NewRecipeEntry, PriceUpdate};
use crate::domain::types::{IngredientId, PositiveAmount, ProductId, ProductName};
use crate::forms::{FormError, parse_decimal, parse_id};

/// Category used when the manager leaves the field blank.
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

#[derive(Debug, Deserialize)]
/// Price update form of the menu screen.
pub struct PriceForm {
    #[serde(default)]
    pub product_id: String,
    #[serde(default)]
    pub unit_price: String,
}

pub struct PricePayload {
    pub product_id: ProductId,
    pub update: PriceUpdate,
}

impl TryFrom<PriceForm> for PricePayload {
    type Error = FormError;

    fn try_from(form: PriceForm) -> Result<Self, Self::Error> {
        let product_id = parse_id(&form.product_id)
            .and_then(|id| ProductId::new(id).ok())
            .ok_or(FormError::InvalidProductId)?;
        let unit_price = parse_decimal(&form.unit_price)
            .and_then(|v| PositiveAmount::new(v).ok())
            .ok_or(FormError::InvalidPositiveNumber)?;

        Ok(Self {
            product_id,
            update: PriceUpdate { unit_price },
        })
    }
}

/// New product form. Recipe rows arrive as parallel repeated fields
/// (`ingredient_id`, `quantity_per_unit`) and are decoded with `serde_html_form`.
#[derive(Debug, Deserialize, Validate)]
pub struct ProductForm {
    #[validate(length(min = 1))]
    pub product_name: String,
    #[serde(default)]
    pub unit_price: String,
    #[serde(default)]
    pub vegan: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub ingredient_id: Vec<String>,
    #[serde(default)]
    pub quantity_per_unit: Vec<String>,
}

impl TryFrom<ProductForm> for NewProduct {
    type Error = FormError;

    fn try_from(form: ProductForm) -> Result<Self, Self::Error> {
        form.validate().map_err(|_| FormError::InvalidProductName)?;
        let product_name =
            ProductName::new(form.product_name).map_err(|_| FormError::InvalidProductName)?;

        let unit_price = parse_decimal(&form.unit_price)
            .and_then(|v| PositiveAmount::new(v).ok())
            .ok_or(FormError::InvalidPrice)?;

        // rows left completely blank are the editor's spare rows
        let rows: Vec<(&str, &str)> = form
            .ingredient_id
            .iter()
            .map(String::as_str)
            .zip(form.quantity_per_unit.iter().map(String::as_str))
            .filter(|(id, qty)| !(id.trim().is_empty() && qty.trim().is_empty()))
            .collect();
        if rows.is_empty() {
            return Err(FormError::EmptyRecipe);
        }

        let recipe = rows
            .into_iter()
            .map(|(id, qty)| {
                let ingredient_id = parse_id(id)
                    .and_then(|id| IngredientId::new(id).ok())
                    .ok_or(FormError::IncompleteRecipe)?;
                let quantity_per_unit = parse_decimal(qty)
                    .and_then(|v| PositiveAmount::new(v).ok())
                    .ok_or(FormError::IncompleteRecipe)?;
                Ok(NewRecipeEntry {
                    ingredient_id,
                    quantity_per_unit,
                })
            })
            .collect::<Result<Vec<_>, FormError>>()?;

        let category = match form.category.trim() {
            "" => DEFAULT_CATEGORY.to_string(),
            category => category.to_string(),
        };

        Ok(NewProduct {
            product_name,
            unit_price,
            vegan: form.vegan.is_some(),
            category,
            recipe,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Result<NewProduct, FormError> {
        let form: ProductForm = serde_html_form::from_str(body).unwrap();
        NewProduct::try_from(form)
    }

    #[test]
    fn recipe_rows_are_zipped() {
        let product = parse(
            "product_name=Brown+Sugar+Boba&unit_price=5.75&vegan=on&category=Milk+Tea\
             &ingredient_id=2&quantity_per_unit=1&ingredient_id=9&quantity_per_unit=0.5\
             &ingredient_id=&quantity_per_unit=",
        )
        .unwrap();

        assert_eq!(product.product_name.as_str(), "Brown Sugar Boba");
        assert!(product.vegan);
        assert_eq!(product.recipe.len(), 2);
        assert_eq!(product.recipe[1].quantity_per_unit.get(), 0.5);
    }

    #[test]
    fn validation_messages_follow_field_order() {
        assert_eq!(
            parse("product_name=&unit_price=5").err(),
            Some(FormError::InvalidProductName)
        );
        assert_eq!(
            parse("product_name=Tea&unit_price=0").err(),
            Some(FormError::InvalidPrice)
        );
        assert_eq!(
            parse("product_name=Tea&unit_price=4").err(),
            Some(FormError::EmptyRecipe)
        );
        assert_eq!(
            parse("product_name=Tea&unit_price=4&ingredient_id=2&quantity_per_unit=").err(),
            Some(FormError::IncompleteRecipe)
        );
    }

    #[test]
    fn blank_category_is_uncategorized() {
        let product =
            parse("product_name=Tea&unit_price=4&ingredient_id=2&quantity_per_unit=1").unwrap();
        assert_eq!(product.category, DEFAULT_CATEGORY);
        assert!(!product.vegan);
    }

    #[test]
    fn price_must_be_positive() {
        let form = PriceForm {
            product_id: "3".to_string(),
            unit_price: "-1".to_string(),
        };
        assert_eq!(
            PricePayload::try_from(form).err(),
            Some(FormError::InvalidPositiveNumber)
        );
    }
}
