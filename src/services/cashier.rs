//! Services of the cashier ordering screen.

use crate::backend::{CatalogReader, EmployeeReader, OrderWriter};
use crate::domain::cart::{Cart, LineId};
use crate::domain::order::{OrderReceipt, Purchaser};
use crate::dto::cart::CartView;
use crate::dto::catalog::CatalogQuery;
use crate::dto::cashier::CashierPageData;
use crate::forms::cart::AddToCartPayload;
use crate::models::auth::AuthenticatedUser;
use crate::services::access::{StaffScreen, ensure_staff_access};
use crate::services::cart::{self as cart_service, LineAction};
use crate::services::ServiceResult;

/// Loads the filtered product grid, the add-on checklist and the current
/// order.
pub async fn load_cashier_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: &CatalogQuery,
    cart: &Cart,
) -> ServiceResult<CashierPageData>
where
    R: CatalogReader + EmployeeReader + ?Sized,
{
    let employee = ensure_staff_access(repo, user, StaffScreen::Cashier).await?;
    let filter = query.filter();

    let (products, error) = match repo.list_products().await {
        Ok(products) => (filter.apply(products), None),
        Err(err) => {
            log::error!("Failed to load products: {err}");
            (Vec::new(), Some(err.user_message()))
        }
    };
    let categories = repo.list_categories().await.unwrap_or_else(|err| {
        log::warn!("Failed to load categories: {err}");
        Vec::new()
    });
    let add_ons = repo.list_add_ons().await.unwrap_or_else(|err| {
        log::warn!("Failed to load add-ons: {err}");
        Vec::new()
    });

    Ok(CashierPageData {
        employee,
        products,
        categories,
        add_ons,
        filter,
        cart: CartView::plain(cart),
        error,
    })
}

pub async fn add_to_order<R>(
    repo: &R,
    user: &AuthenticatedUser,
    cart: &mut Cart,
    payload: AddToCartPayload,
) -> ServiceResult<()>
where
    R: CatalogReader + EmployeeReader + ?Sized,
{
    ensure_staff_access(repo, user, StaffScreen::Cashier).await?;
    cart_service::add_to_cart(repo, cart, payload).await?;
    Ok(())
}

pub async fn update_order_line<R>(
    repo: &R,
    user: &AuthenticatedUser,
    cart: &mut Cart,
    line_id: LineId,
    action: LineAction,
) -> ServiceResult<()>
where
    R: EmployeeReader + ?Sized,
{
    ensure_staff_access(repo, user, StaffScreen::Cashier).await?;
    cart_service::update_line(cart, line_id, action)
}

pub async fn clear_order<R>(repo: &R, user: &AuthenticatedUser, cart: &mut Cart) -> ServiceResult<()>
where
    R: EmployeeReader + ?Sized,
{
    ensure_staff_access(repo, user, StaffScreen::Cashier).await?;
    cart.clear();
    Ok(())
}

/// Submits the order on behalf of the signed-in employee. The cart is only
/// cleared once the backend accepted the order.
pub async fn checkout<R>(
    repo: &R,
    user: &AuthenticatedUser,
    cart: &mut Cart,
) -> ServiceResult<OrderReceipt>
where
    R: EmployeeReader + OrderWriter + ?Sized,
{
    let employee = ensure_staff_access(repo, user, StaffScreen::Cashier).await?;

    let payload = cart.to_payload(Purchaser::Employee {
        employee_id: employee.employee_id,
    })?;

    let receipt = repo.post_order(&payload).await.map_err(|err| {
        log::error!("Failed to submit order of employee {}: {err}", employee.employee_id);
        err
    })?;

    log::info!(
        "Order {} submitted by employee {}",
        receipt.order_id,
        employee.employee_id
    );
    cart.clear();
    Ok(receipt)
}
