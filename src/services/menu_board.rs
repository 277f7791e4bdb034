//! Menu board: the catalog grouped by category, no sign-in required.

use crate::backend::CatalogReader;
use crate::domain::product::Product;
use crate::dto::menu_board::{MenuBoardData, MenuSection};
use crate::forms::products::DEFAULT_CATEGORY;
use crate::services::ServiceResult;

/// Groups products by category in order of first appearance.
pub fn group_by_category(products: Vec<Product>) -> Vec<MenuSection> {
    let mut sections: Vec<MenuSection> = Vec::new();
    for product in products {
        let category = product
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CATEGORY)
            .to_string();
        match sections.iter_mut().find(|s| s.category == category) {
            Some(section) => section.products.push(product),
            None => sections.push(MenuSection {
                category,
                products: vec![product],
            }),
        }
    }
    sections
}

pub async fn load_menu_board<R>(repo: &R) -> ServiceResult<MenuBoardData>
where
    R: CatalogReader + ?Sized,
{
    match repo.list_products().await {
        Ok(products) => Ok(MenuBoardData {
            sections: group_by_category(products),
            error: None,
        }),
        Err(err) => {
            log::error!("Failed to load menu board products: {err}");
            Ok(MenuBoardData {
                sections: Vec::new(),
                error: Some(err.user_message()),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::ProductId;

    fn product(id: i32, category: Option<&str>) -> Product {
        Product {
            product_id: ProductId::new(id).unwrap(),
            product_name: format!("Drink {id}"),
            unit_price: 4.0,
            vegan: false,
            category: category.map(str::to_string),
        }
    }

    #[test]
    fn sections_keep_first_appearance_order() {
        let sections = group_by_category(vec![
            product(1, Some("Milk Tea")),
            product(2, Some("Fruit Tea")),
            product(3, Some("Milk Tea")),
            product(4, None),
        ]);

        let names: Vec<_> = sections.iter().map(|s| s.category.as_str()).collect();
        assert_eq!(names, vec!["Milk Tea", "Fruit Tea", DEFAULT_CATEGORY]);
        assert_eq!(sections[0].products.len(), 2);
    }
}
