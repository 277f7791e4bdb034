//! Services of the menu management screen.

use crate::backend::{CatalogReader, CatalogWriter, EmployeeReader, InventoryReader};
use crate::domain::product::{CreatedProduct, NewProduct, UpdatedPrice};
use crate::domain::types::ProductId;
use crate::dto::manager::{MenuPageData, MenuQuery, SelectedProduct};
use crate::forms::products::{PriceForm, PricePayload, ProductForm};
use crate::models::auth::AuthenticatedUser;
use crate::services::ServiceResult;
use crate::services::access::{StaffScreen, ensure_staff_access};

/// Loads the product list, the ingredients for new recipes and, when a
/// product is selected, its recipe.
pub async fn load_menu<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: &MenuQuery,
) -> ServiceResult<MenuPageData>
where
    R: EmployeeReader + CatalogReader + InventoryReader + ?Sized,
{
    ensure_staff_access(repo, user, StaffScreen::Manager).await?;

    let (products, mut error) = match repo.list_products().await {
        Ok(products) => (products, None),
        Err(err) => {
            log::error!("Failed to load products: {err}");
            (Vec::new(), Some(err.user_message()))
        }
    };
    let ingredients = repo.list_inventory().await.unwrap_or_else(|err| {
        log::warn!("Failed to load ingredients: {err}");
        Vec::new()
    });

    let selected_id = query.product_id.and_then(|id| ProductId::new(id).ok());
    let selected_product = selected_id.and_then(|id| products.iter().find(|p| p.product_id == id));
    let selected = match selected_product {
        Some(product) => match repo.get_recipe(product.product_id).await {
            Ok(recipe) => Some(SelectedProduct {
                product: product.clone(),
                recipe,
            }),
            Err(err) => {
                log::error!("Failed to load recipe of product {}: {err}", product.product_id);
                error = Some(err.user_message());
                None
            }
        },
        None => None,
    };

    Ok(MenuPageData {
        products,
        ingredients,
        selected,
        error,
    })
}

pub async fn update_price<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: PriceForm,
) -> ServiceResult<UpdatedPrice>
where
    R: EmployeeReader + CatalogWriter + ?Sized,
{
    ensure_staff_access(repo, user, StaffScreen::Manager).await?;

    let PricePayload { product_id, update } = PricePayload::try_from(form)?;

    let updated = repo.update_price(product_id, &update).await.map_err(|err| {
        log::error!("Failed to update price of product {product_id}: {err}");
        err
    })?;

    log::info!(
        "Price of {} set to {} by {}",
        updated.product_name,
        updated.unit_price,
        user.email
    );
    Ok(updated)
}

/// Validates the new product with its recipe and creates it.
pub async fn create_product<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: ProductForm,
) -> ServiceResult<CreatedProduct>
where
    R: EmployeeReader + CatalogWriter + ?Sized,
{
    ensure_staff_access(repo, user, StaffScreen::Manager).await?;

    let new_product = NewProduct::try_from(form)?;

    let created = repo.create_product(&new_product).await.map_err(|err| {
        log::error!("Failed to create product {}: {err}", new_product.product_name);
        err
    })?;

    Ok(created)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::product::{PriceUpdate, RecipeEntry};
    use crate::domain::types::IngredientId;
    use crate::services::ServiceError;
    use crate::services::access::tests::{staffed_backend, user};
    use crate::services::cart::tests::products;

    #[actix_web::test]
    async fn selected_product_comes_with_recipe() {
        let mut backend = staffed_backend();
        backend.expect_list_products().returning(|| Ok(products()));
        backend.expect_list_inventory().returning(|| Ok(Vec::new()));
        backend
            .expect_get_recipe()
            .withf(|id| id.get() == 2)
            .times(1)
            .returning(|_| {
                Ok(vec![RecipeEntry {
                    ingredient_id: IngredientId::new(5).unwrap(),
                    ingredient_name: "Taro".to_string(),
                    quantity_per_unit: 2.0,
                }])
            });

        let data = load_menu(
            &backend,
            &user("morgan@teashop.com"),
            &MenuQuery {
                product_id: Some(2),
            },
        )
        .await
        .unwrap();

        let selected = data.selected.expect("product selected");
        assert_eq!(selected.product.product_name, "Taro Milk Tea");
        assert_eq!(selected.recipe.len(), 1);
    }

    #[actix_web::test]
    async fn unknown_selection_skips_recipe_fetch() {
        let mut backend = staffed_backend();
        backend.expect_list_products().returning(|| Ok(products()));
        backend.expect_list_inventory().returning(|| Ok(Vec::new()));
        backend.expect_get_recipe().times(0);

        let data = load_menu(
            &backend,
            &user("morgan@teashop.com"),
            &MenuQuery {
                product_id: Some(40),
            },
        )
        .await
        .unwrap();

        assert!(data.selected.is_none());
    }

    #[actix_web::test]
    async fn price_update_is_forwarded() {
        let mut backend = staffed_backend();
        backend
            .expect_update_price()
            .withf(|id, update: &PriceUpdate| id.get() == 1 && update.unit_price.get() == 4.0)
            .times(1)
            .returning(|id, update| {
                Ok(UpdatedPrice {
                    product_id: id,
                    product_name: "Classic Tea".to_string(),
                    unit_price: update.unit_price.get(),
                })
            });
        let form = PriceForm {
            product_id: "1".to_string(),
            unit_price: "4.00".to_string(),
        };

        let updated = update_price(&backend, &user("morgan@teashop.com"), form)
            .await
            .unwrap();

        assert_eq!(updated.unit_price, 4.0);
    }

    #[actix_web::test]
    async fn incomplete_recipe_is_rejected() {
        let mut backend = staffed_backend();
        backend.expect_create_product().times(0);
        let form: ProductForm = serde_html_form::from_str(
            "product_name=Lychee+Tea&unit_price=5&ingredient_id=3&quantity_per_unit=",
        )
        .unwrap();

        let result = create_product(&backend, &user("morgan@teashop.com"), form).await;

        assert!(
            matches!(result, Err(ServiceError::Form(ref msg)) if msg == "Complete all ingredient fields")
        );
    }
}
