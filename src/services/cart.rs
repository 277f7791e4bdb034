//! Cart operations shared by the cashier and customer screens.

use std::collections::HashMap;

use crate::backend::CatalogReader;
use crate::domain::cart::{Cart, CartError, LineId, LineItem};
use crate::domain::order::ModificationType;
use crate::domain::product::{AddOn, RecipeEntry};
use crate::domain::types::{IngredientId, ProductId};
use crate::dto::cart::{CartLineView, CartView};
use crate::forms::cart::AddToCartPayload;
use crate::services::{ServiceError, ServiceResult};

/// Quantity change requested on a single line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineAction {
    Increment,
    Decrement,
    Remove,
}

/// Resolves the product and the selected add-ons and appends a new line.
pub async fn add_to_cart<R>(
    repo: &R,
    cart: &mut Cart,
    payload: AddToCartPayload,
) -> ServiceResult<LineId>
where
    R: CatalogReader + ?Sized,
{
    let products = repo.list_products().await.map_err(|err| {
        log::error!("Failed to load products: {err}");
        err
    })?;
    let product = products
        .iter()
        .find(|p| p.product_id == payload.product_id)
        .ok_or(ServiceError::NotFound)?;

    let add_ons = if payload.add_on_ids.is_empty() {
        Vec::new()
    } else {
        let available = repo.list_add_ons().await.map_err(|err| {
            log::error!("Failed to load add-ons: {err}");
            err
        })?;
        payload
            .add_on_ids
            .iter()
            .map(|id| {
                available
                    .iter()
                    .find(|a| a.ingredient_id == *id)
                    .cloned()
                    .ok_or_else(|| ServiceError::Form("Unknown add-on".to_string()))
            })
            .collect::<ServiceResult<Vec<_>>>()?
    };

    let line = LineItem::from_product(product, payload.quantity, payload.customization, &add_ons)?;
    Ok(cart.add(line))
}

pub fn update_line(cart: &mut Cart, line_id: LineId, action: LineAction) -> ServiceResult<()> {
    match action {
        LineAction::Increment => cart.increment(line_id)?,
        LineAction::Decrement => cart.decrement(line_id)?,
        LineAction::Remove => {
            cart.remove(line_id)?;
        }
    }
    Ok(())
}

/// Recipes of every product in the cart, fetched once per product. A failed
/// fetch leaves that product without recipe ingredients.
async fn recipes_for<R>(repo: &R, cart: &Cart) -> HashMap<ProductId, Vec<RecipeEntry>>
where
    R: CatalogReader + ?Sized,
{
    let mut recipes = HashMap::new();
    for line in cart.lines() {
        if recipes.contains_key(&line.product_id) {
            continue;
        }
        let recipe = match repo.get_recipe(line.product_id).await {
            Ok(recipe) => recipe,
            Err(err) => {
                log::warn!("Failed to load recipe of product {}: {err}", line.product_id);
                Vec::new()
            }
        };
        recipes.insert(line.product_id, recipe);
    }
    recipes
}

/// Renders the cart with the modification editor of every line.
pub async fn editable_cart<R>(repo: &R, cart: &Cart) -> ServiceResult<CartView>
where
    R: CatalogReader + ?Sized,
{
    if cart.is_empty() {
        return Ok(CartView::default());
    }

    let add_ons = repo.list_add_ons().await.map_err(|err| {
        log::error!("Failed to load add-ons: {err}");
        err
    })?;
    let recipes = recipes_for(repo, cart).await;

    let lines = cart
        .lines()
        .iter()
        .map(|line| {
            let recipe = recipes
                .get(&line.product_id)
                .map(Vec::as_slice)
                .unwrap_or_default();
            CartLineView::new(line, line.modification_options(recipe, &add_ons))
        })
        .collect();

    Ok(CartView {
        lines,
        total: cart.total(),
        item_count: cart.item_count(),
    })
}

/// Finds the editor option of `ingredient_id` on the given line.
async fn option_for<R>(
    repo: &R,
    cart: &Cart,
    line_id: LineId,
    ingredient_id: IngredientId,
) -> ServiceResult<AddOn>
where
    R: CatalogReader + ?Sized,
{
    let line = cart.get(line_id).ok_or(CartError::LineNotFound)?;

    let add_ons = repo.list_add_ons().await.map_err(|err| {
        log::error!("Failed to load add-ons: {err}");
        err
    })?;
    let recipe = repo.get_recipe(line.product_id).await.map_err(|err| {
        log::error!("Failed to load recipe of product {}: {err}", line.product_id);
        err
    })?;

    line.modification_options(&recipe, &add_ons)
        .iter()
        .find(|option| option.ingredient_id == ingredient_id)
        .map(AddOn::from)
        .ok_or_else(|| ServiceError::Form("Unknown ingredient".to_string()))
}

/// Puts one ingredient of a line in the requested state.
pub async fn set_modification<R>(
    repo: &R,
    cart: &mut Cart,
    line_id: LineId,
    ingredient_id: IngredientId,
    modification_type: ModificationType,
) -> ServiceResult<()>
where
    R: CatalogReader + ?Sized,
{
    let add_on = option_for(repo, cart, line_id, ingredient_id).await?;
    cart.set_modification(line_id, &add_on, modification_type)?;
    Ok(())
}

/// Adds the ingredient to the line, or drops it if already present.
pub async fn toggle_add_on<R>(
    repo: &R,
    cart: &mut Cart,
    line_id: LineId,
    ingredient_id: IngredientId,
) -> ServiceResult<()>
where
    R: CatalogReader + ?Sized,
{
    let add_on = option_for(repo, cart, line_id, ingredient_id).await?;
    cart.toggle_add_on(line_id, &add_on)?;
    Ok(())
}
