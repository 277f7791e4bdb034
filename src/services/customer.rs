//! Services of the customer self-service screen and its cart.

use crate::backend::{CatalogReader, OrderHistoryReader, OrderWriter, WeatherProvider};
use crate::domain::cart::{Cart, LineId, LineItem};
use crate::domain::order::{OrderReceipt, PastOrder, Purchaser};
use crate::domain::types::OrderId;
use crate::domain::weather::Location;
use crate::dto::catalog::CatalogQuery;
use crate::dto::customer::{CartPageData, CustomerPageData};
use crate::models::auth::AuthenticatedUser;
use crate::services::cart as cart_service;
use crate::services::{ServiceError, ServiceResult};

/// Number of past orders shown to a signed-in customer.
pub const HISTORY_LIMIT: usize = 5;

async fn recent_orders<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Vec<PastOrder>>
where
    R: OrderHistoryReader + ?Sized,
{
    let mut orders = repo.list_user_orders(&user.sub).await.map_err(|err| {
        log::error!("Failed to load order history of {}: {err}", user.sub);
        err
    })?;
    orders.truncate(HISTORY_LIMIT);
    Ok(orders)
}

/// Loads the product grid with the requested filters, the current weather and
/// the order history of a signed-in customer.
pub async fn load_customer_page<R, W>(
    repo: &R,
    weather: &W,
    user: Option<&AuthenticatedUser>,
    query: &CatalogQuery,
    location: Location,
    cart: &Cart,
) -> ServiceResult<CustomerPageData>
where
    R: CatalogReader + OrderHistoryReader + ?Sized,
    W: WeatherProvider + ?Sized,
{
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

    let history = match user {
        Some(user) => recent_orders(repo, user).await.unwrap_or_default(),
        None => Vec::new(),
    };

    Ok(CustomerPageData {
        products,
        categories,
        add_ons,
        filter,
        location,
        weather: weather.current(location).await,
        history,
        cart_count: cart.item_count(),
        error,
    })
}

pub async fn load_cart_page<R>(
    repo: &R,
    user: Option<&AuthenticatedUser>,
    cart: &Cart,
) -> ServiceResult<CartPageData>
where
    R: CatalogReader + ?Sized,
{
    let cart = cart_service::editable_cart(repo, cart).await?;
    Ok(CartPageData {
        cart,
        signed_in: user.is_some(),
    })
}

/// Places the order for the signed-in customer and empties the cart on success.
pub async fn checkout<R>(
    repo: &R,
    user: Option<&AuthenticatedUser>,
    cart: &mut Cart,
) -> ServiceResult<OrderReceipt>
where
    R: OrderWriter + ?Sized,
{
    if cart.is_empty() {
        return Err(ServiceError::Form("Your cart is empty".to_string()));
    }
    let user = user.ok_or_else(|| {
        ServiceError::Form("You must be signed in to place an order".to_string())
    })?;

    let payload = cart.to_payload(Purchaser::Customer {
        clerk_user_id: user.sub.clone(),
        user_email: user.email.clone(),
        user_name: user.display_name().to_string(),
    })?;

    let receipt = repo.post_order(&payload).await.map_err(|err| {
        log::error!("Failed to submit order of {}: {err}", user.sub);
        err
    })?;

    log::info!("Order {} placed by {}", receipt.order_id, user.sub);
    cart.clear();
    Ok(receipt)
}

/// Re-adds items of a past order: one item when `item_index` is given,
/// otherwise the whole order. Returns the number of lines added.
pub async fn reorder<R>(
    repo: &R,
    user: &AuthenticatedUser,
    cart: &mut Cart,
    order_id: OrderId,
    item_index: Option<usize>,
) -> ServiceResult<usize>
where
    R: OrderHistoryReader + ?Sized,
{
    let orders = recent_orders(repo, user).await?;
    let order = orders
        .iter()
        .find(|o| o.order_id == order_id)
        .ok_or(ServiceError::NotFound)?;

    let items = match item_index {
        Some(index) => vec![order.items.get(index).ok_or(ServiceError::NotFound)?],
        None => order.items.iter().collect(),
    };

    // build every line first so a bad item leaves the cart untouched
    let lines = items
        .into_iter()
        .map(LineItem::from_past_item)
        .collect::<Result<Vec<_>, _>>()?;
    let added = lines.len();
    for line in lines {
        cart.add(line);
    }
    Ok(added)
}

/// Sets the quantity of a line; zero or less removes it.
pub fn set_quantity(cart: &mut Cart, line_id: LineId, quantity: i64) -> ServiceResult<()> {
    cart.set_quantity(line_id, quantity)?;
    Ok(())
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::backend::errors::BackendError;
    use crate::backend::mock::{MockBackend, MockWeatherService};
    use crate::domain::order::{
        IceLevel, ModificationType, OrderPayload, PastModification, PastOrderItem, SizeLevel,
        SugarLevel,
    };
    use crate::domain::types::{IngredientId, ProductId};
    use crate::domain::weather::Weather;
    use crate::services::access::tests::user;
    use crate::services::cart::tests::{catalog_backend, payload, products};

    fn no_weather() -> MockWeatherService {
        let mut weather = MockWeatherService::new();
        weather.expect_current().returning(|_| None);
        weather
    }

    fn past_order(id: i32) -> PastOrder {
        PastOrder {
            order_id: OrderId::new(id).unwrap(),
            order_date: "2025-11-30T14:05:00".to_string(),
            total_amount: 9.75,
            items: vec![
                PastOrderItem {
                    product_id: ProductId::new(1).unwrap(),
                    product_name: "Classic Tea".to_string(),
                    quantity: 1,
                    unit_price: 4.25,
                    sugar_level: SugarLevel::default(),
                    size_level: SizeLevel::default(),
                    ice_level: IceLevel::default(),
                    modifications: vec![PastModification {
                        ingredient_id: IngredientId::new(9).unwrap(),
                        ingredient_name: "Boba".to_string(),
                        modification_type: ModificationType::Add,
                        price_change: Some(0.75),
                    }],
                },
                PastOrderItem {
                    product_id: ProductId::new(2).unwrap(),
                    product_name: "Taro Milk Tea".to_string(),
                    quantity: 1,
                    unit_price: 5.50,
                    sugar_level: SugarLevel::default(),
                    size_level: SizeLevel::default(),
                    ice_level: IceLevel::default(),
                    modifications: Vec::new(),
                },
            ],
        }
    }

    #[actix_web::test]
    async fn vegan_filter_keeps_only_vegan_products() {
        let mut backend = catalog_backend();
        backend
            .expect_list_categories()
            .returning(|| Ok(vec!["Brewed Tea".to_string(), "Milk Tea".to_string()]));
        let query = CatalogQuery {
            category: None,
            vegan: Some("on".to_string()),
        };

        let data = load_customer_page(
            &backend,
            &no_weather(),
            None,
            &query,
            Location::default(),
            &Cart::new(),
        )
        .await
        .unwrap();

        let expected: Vec<_> = products().into_iter().filter(|p| p.vegan).collect();
        assert_eq!(data.products, expected);
        assert!(data.history.is_empty());
    }

    #[actix_web::test]
    async fn signed_in_customer_sees_history_and_weather() {
        let mut backend = catalog_backend();
        backend.expect_list_categories().returning(|| Ok(Vec::new()));
        backend
            .expect_list_user_orders()
            .withf(|sub| sub == "user_1")
            .times(1)
            .returning(|_| Ok((1..=7).map(past_order).collect()));
        let mut weather = MockWeatherService::new();
        weather
            .expect_current()
            .withf(|location| *location == Location::Austin)
            .returning(|location| {
                Some(Weather {
                    location,
                    temperature: 88,
                    description: Some("clear sky".to_string()),
                })
            });
        let user = user("shopper@example.com");

        let data = load_customer_page(
            &backend,
            &weather,
            Some(&user),
            &CatalogQuery::default(),
            Location::Austin,
            &Cart::new(),
        )
        .await
        .unwrap();

        assert_eq!(data.history.len(), HISTORY_LIMIT);
        assert_eq!(data.weather.map(|w| w.temperature), Some(88));
    }

    #[actix_web::test]
    async fn failed_product_fetch_renders_inline_error() {
        let mut backend = MockBackend::new();
        backend
            .expect_list_products()
            .returning(|| Err(BackendError::Config("offline".to_string())));
        backend.expect_list_categories().returning(|| Ok(Vec::new()));
        backend.expect_list_add_ons().returning(|| Ok(Vec::new()));

        let data = load_customer_page(
            &backend,
            &no_weather(),
            None,
            &CatalogQuery::default(),
            Location::default(),
            &Cart::new(),
        )
        .await
        .unwrap();

        assert!(data.products.is_empty());
        assert!(data.error.is_some());
    }

    #[actix_web::test]
    async fn checkout_requires_items_then_sign_in() {
        let mut backend = catalog_backend();
        backend.expect_post_order().times(0);
        let mut cart = Cart::new();

        let err = checkout(&backend, None, &mut cart).await.unwrap_err();
        assert_eq!(err.user_message(), "Your cart is empty");

        cart_service::add_to_cart(&backend, &mut cart, payload(1, 1, &[]))
            .await
            .unwrap();
        let err = checkout(&backend, None, &mut cart).await.unwrap_err();
        assert_eq!(err.user_message(), "You must be signed in to place an order");
        assert_eq!(cart.len(), 1);
    }

    #[actix_web::test]
    async fn checkout_sends_customer_identity() {
        let mut backend = catalog_backend();
        backend
            .expect_post_order()
            .withf(|order: &OrderPayload| {
                matches!(
                    &order.purchaser,
                    Purchaser::Customer { clerk_user_id, user_email, user_name }
                        if clerk_user_id == "user_1"
                            && user_email == "shopper@example.com"
                            && user_name == "Test User"
                )
            })
            .times(1)
            .returning(|_| {
                Ok(OrderReceipt {
                    message: "Order placed".to_string(),
                    order_id: OrderId::new(12).unwrap(),
                    email_sent: true,
                })
            });
        let user = user("shopper@example.com");
        let mut cart = Cart::new();
        cart_service::add_to_cart(&backend, &mut cart, payload(2, 1, &[]))
            .await
            .unwrap();

        let receipt = checkout(&backend, Some(&user), &mut cart).await.unwrap();

        assert!(receipt.email_sent);
        assert!(cart.is_empty());
    }

    #[actix_web::test]
    async fn failed_post_keeps_the_cart_and_reports_backend_message() {
        let mut backend = catalog_backend();
        backend.expect_post_order().times(1).returning(|_| {
            Err(BackendError::Status {
                status: 500,
                message: "Database unavailable".to_string(),
            })
        });
        let user = user("shopper@example.com");
        let mut cart = Cart::new();
        cart_service::add_to_cart(&backend, &mut cart, payload(1, 2, &[9]))
            .await
            .unwrap();
        let before = cart.clone();

        let err = checkout(&backend, Some(&user), &mut cart).await.unwrap_err();

        assert_eq!(err.user_message(), "Database unavailable");
        assert_eq!(cart, before);
    }

    #[actix_web::test]
    async fn reorder_adds_one_item_or_the_whole_order() {
        let mut backend = MockBackend::new();
        backend
            .expect_list_user_orders()
            .returning(|_| Ok(vec![past_order(3)]));
        let user = user("shopper@example.com");
        let mut cart = Cart::new();
        let order_id = OrderId::new(3).unwrap();

        let added = reorder(&backend, &user, &mut cart, order_id, Some(0))
            .await
            .unwrap();
        assert_eq!(added, 1);
        assert_eq!(cart.total(), 4.25);

        let added = reorder(&backend, &user, &mut cart, order_id, None)
            .await
            .unwrap();
        assert_eq!(added, 2);
        assert_eq!(cart.len(), 3);
        assert_eq!(cart.total(), 14.0);

        let missing = reorder(&backend, &user, &mut cart, OrderId::new(99).unwrap(), None).await;
        assert!(matches!(missing, Err(ServiceError::NotFound)));
    }

    #[actix_web::test]
    async fn reorder_all_survives_a_bulk_line() {
        let mut order = past_order(5);
        order.items[1].quantity = 150;
        let mut backend = MockBackend::new();
        backend
            .expect_list_user_orders()
            .returning(move |_| Ok(vec![order.clone()]));
        let mut cart = Cart::new();

        let added = reorder(
            &backend,
            &user("shopper@example.com"),
            &mut cart,
            OrderId::new(5).unwrap(),
            None,
        )
        .await
        .unwrap();

        assert_eq!(added, 2);
        assert_eq!(cart.lines()[1].quantity, 100);
    }

    #[test]
    fn quantity_zero_removes_the_line() {
        let mut cart = Cart::new();
        let line = LineItem::from_past_item(&past_order(1).items[1]).unwrap();
        let line_id = cart.add(line);

        set_quantity(&mut cart, line_id, 0).unwrap();

        assert!(cart.is_empty());
    }
}
