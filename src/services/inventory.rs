//! Services of the inventory screen.

use crate::backend::{EmployeeReader, InventoryReader, InventoryWriter};
use crate::domain::inventory::{InventoryItem, NewIngredient, RestockResult};
use crate::dto::manager::InventoryPageData;
use crate::forms::inventory::{IngredientForm, RestockForm, RestockPayload};
use crate::models::auth::AuthenticatedUser;
use crate::services::ServiceResult;
use crate::services::access::{StaffScreen, ensure_staff_access};

pub async fn list_inventory<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<InventoryPageData>
where
    R: EmployeeReader + InventoryReader + ?Sized,
{
    ensure_staff_access(repo, user, StaffScreen::Manager).await?;

    let (items, error) = match repo.list_inventory().await {
        Ok(items) => (items, None),
        Err(err) => {
            log::error!("Failed to load inventory: {err}");
            (Vec::new(), Some(err.user_message()))
        }
    };
    let low_stock_count = items.iter().filter(|item| item.is_low()).count();

    Ok(InventoryPageData {
        items,
        low_stock_count,
        error,
    })
}

pub async fn add_ingredient<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: IngredientForm,
) -> ServiceResult<InventoryItem>
where
    R: EmployeeReader + InventoryWriter + ?Sized,
{
    ensure_staff_access(repo, user, StaffScreen::Manager).await?;

    let new_ingredient = NewIngredient::try_from(form)?;

    let item = repo
        .create_ingredient(&new_ingredient)
        .await
        .map_err(|err| {
            log::error!(
                "Failed to create ingredient {}: {err}",
                new_ingredient.ingredient_name
            );
            err
        })?;

    Ok(item)
}

/// Adds a positive amount to the stock of an ingredient.
pub async fn restock<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: RestockForm,
) -> ServiceResult<RestockResult>
where
    R: EmployeeReader + InventoryWriter + ?Sized,
{
    ensure_staff_access(repo, user, StaffScreen::Manager).await?;

    let RestockPayload {
        ingredient_id,
        restock,
    } = RestockPayload::try_from(form)?;

    let result = repo.restock(ingredient_id, &restock).await.map_err(|err| {
        log::error!("Failed to restock ingredient {ingredient_id}: {err}");
        err
    })?;

    log::info!(
        "Ingredient {} restocked by {}, now {}",
        result.ingredient_id,
        result.delta,
        result.new_quantity
    );
    Ok(result)
}
