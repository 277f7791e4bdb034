use serde::Serialize;

use crate::domain::product::Product;
use crate::dto::catalog::ProductCard;

/// Products of one category on the menu board.
#[derive(Debug)]
pub struct MenuSection {
    pub category: String,
    pub products: Vec<Product>,
}

/// Section as rendered by the menu board template.
#[derive(Debug, Serialize)]
pub struct MenuSectionView<'a> {
    pub category: &'a str,
    pub products: Vec<ProductCard<'a>>,
}

impl<'a> From<&'a MenuSection> for MenuSectionView<'a> {
    fn from(section: &'a MenuSection) -> Self {
        Self {
            category: &section.category,
            products: ProductCard::list(&section.products),
        }
    }
}

pub struct MenuBoardData {
    pub sections: Vec<MenuSection>,
    pub error: Option<String>,
}
