//! Cart rendering shared by the cashier and customer screens.

use serde::Serialize;

use crate::domain::cart::{Cart, LineItem};
use crate::domain::order::ModificationType;
use crate::domain::product::ModificationOption;

/// Ingredient row of the cart editor with the buttons it should offer.
#[derive(Debug, Serialize)]
pub struct OptionView {
    #[serde(flatten)]
    pub option: ModificationOption,
    pub actions: Vec<ModificationType>,
}

impl From<ModificationOption> for OptionView {
    fn from(option: ModificationOption) -> Self {
        let actions = ModificationType::ACTIONS
            .into_iter()
            .filter(|action| option.should_display(*action))
            .collect();
        Self { option, actions }
    }
}

#[derive(Debug, Serialize)]
pub struct CartLineView {
    #[serde(flatten)]
    pub line: LineItem,
    pub unit_price: f64,
    pub line_total: f64,
    /// Empty on screens without the modification editor.
    pub options: Vec<OptionView>,
}

impl CartLineView {
    pub fn new(line: &LineItem, options: Vec<ModificationOption>) -> Self {
        Self {
            line: line.clone(),
            unit_price: line.unit_price(),
            line_total: line.line_total(),
            options: options.into_iter().map(OptionView::from).collect(),
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub total: f64,
    pub item_count: u32,
}

impl CartView {
    /// Renders the cart without editor options.
    pub fn plain(cart: &Cart) -> Self {
        Self {
            lines: cart
                .lines()
                .iter()
                .map(|line| CartLineView::new(line, Vec::new()))
                .collect(),
            total: cart.total(),
            item_count: cart.item_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::IngredientId;

    fn option(originally_in_recipe: bool) -> ModificationOption {
        ModificationOption {
            ingredient_id: IngredientId::new(3).unwrap(),
            ingredient_name: "Black Tea".to_string(),
            price_per_unit: 0.0,
            originally_in_recipe,
            current: ModificationType::None,
        }
    }

    #[test]
    fn recipe_ingredients_offer_remove_not_add() {
        let view = OptionView::from(option(true));
        assert_eq!(
            view.actions,
            vec![
                ModificationType::Remove,
                ModificationType::Less,
                ModificationType::Extra
            ]
        );
    }

    #[test]
    fn add_ons_offer_add_not_remove() {
        let view = OptionView::from(option(false));
        assert!(view.actions.contains(&ModificationType::Add));
        assert!(!view.actions.contains(&ModificationType::Remove));
    }
}
