use std::net::TcpListener;
use std::sync::{Arc, Mutex};

use actix_web::{App, HttpResponse, HttpServer, web};
use chrono::NaiveDate;
use serde_json::{Value, json};

use teashop_pos::backend::errors::BackendError;
use teashop_pos::backend::http::HttpBackend;
use teashop_pos::backend::{
    CatalogReader, EmployeeReader, InventoryWriter, OrderHistoryReader, OrderWriter,
    ReportReader,
};
use teashop_pos::domain::employee::{EmployeeRole, find_by_email};
use teashop_pos::domain::cart::{Cart, Customization, LineItem};
use teashop_pos::domain::inventory::Restock;
use teashop_pos::domain::order::Purchaser;
use teashop_pos::domain::product::Product;
use teashop_pos::domain::report::DateRange;
use teashop_pos::domain::types::{EmployeeId, IngredientId, PositiveAmount, ProductId};

type Captured = Arc<Mutex<Vec<Value>>>;

/// Starts a stand-in for the store backend on a free local port.
fn start_backend(captured: Captured) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(captured.clone()))
            .route(
                "/api/fetchProducts",
                web::get().to(|| async {
                    HttpResponse::Ok().json(json!([
                        {"product_id": 1, "product_name": "Classic Tea", "unit_price": 3.5, "vegan": true, "category": "Fresh Brew"},
                        {"product_id": 2, "product_name": "Taro Pearl Milk Tea", "unit_price": 5.25}
                    ]))
                }),
            )
            .route(
                "/api/product_categories",
                web::get().to(|| async { HttpResponse::Ok().json(json!(["Fresh Brew", null, "Milk Tea"])) }),
            )
            .route(
                "/api/postOrder",
                web::post().to(|body: web::Json<Value>, captured: web::Data<Captured>| async move {
                    let body = body.into_inner();
                    captured.lock().unwrap().push(body.clone());
                    if body["items"].as_array().is_some_and(|items| items.is_empty()) {
                        return HttpResponse::BadRequest().json(json!({"error": "Order must contain at least one item"}));
                    }
                    HttpResponse::Created().json(json!({"message": "Order created", "order_id": 77, "email_sent": false}))
                }),
            )
            .route(
                "/api/getUserOrders",
                web::post().to(|body: web::Json<Value>, captured: web::Data<Captured>| async move {
                    captured.lock().unwrap().push(body.into_inner());
                    HttpResponse::Ok().json(json!({"orders": [
                        {"order_id": 5, "order_date": "2025-12-01T10:00:00", "total_amount": 8.0,
                         "items": [{"product_id": 1, "product_name": "Classic Tea", "quantity": 2, "unit_price": 4.0,
                                    "sugar_level": "50%", "ice_level": "no_ice"}]}
                    ]}))
                }),
            )
            .route(
                "/api/inventory/{id}/restock",
                web::post().to(|path: web::Path<i32>, body: web::Json<Value>| async move {
                    let delta = body["delta"].as_f64().unwrap_or_default();
                    HttpResponse::Ok().json(json!({
                        "ingredient_id": path.into_inner(),
                        "delta": delta,
                        "new_quantity": 10.0 + delta
                    }))
                }),
            )
            .route(
                "/api/reports/sales",
                web::get().to(|query: web::Query<Value>, captured: web::Data<Captured>| async move {
                    captured.lock().unwrap().push(query.into_inner());
                    HttpResponse::Ok().json(json!([]))
                }),
            )
            .route(
                "/api/employees",
                web::get().to(|| async {
                    HttpResponse::Ok().json(json!([
                        {"employee_id": 1, "name": "Ana", "role": "Manager", "email": "ana@teashop.com"},
                        {"employee_id": 2, "name": "Sam", "role": "Shift Lead", "email": "sam@teashop.com"},
                        {"employee_id": 3, "name": "Lee", "role": "cashier", "email": "lee@teashop.com"}
                    ]))
                }),
            )
            .route(
                "/api/products/{id}/recipe",
                web::get().to(|| async { HttpResponse::NotFound().json(json!({"error": "Product not found"})) }),
            )
    })
    .workers(1)
    .listen(listener)
    .unwrap()
    .run();
    actix_web::rt::spawn(server);

    format!("http://127.0.0.1:{port}")
}

fn classic_tea() -> Product {
    Product {
        product_id: ProductId::new(1).unwrap(),
        product_name: "Classic Tea".to_string(),
        unit_price: 3.5,
        vegan: true,
        category: Some("Fresh Brew".to_string()),
    }
}

#[actix_web::test]
async fn products_and_categories_are_decoded() {
    let url = start_backend(Captured::default());
    let backend = HttpBackend::new(url, 5).unwrap();

    let products = backend.list_products().await.unwrap();
    assert_eq!(products.len(), 2);
    assert!(products[0].vegan);
    assert_eq!(products[1].category, None);

    let categories = backend.list_categories().await.unwrap();
    assert_eq!(categories, vec!["Fresh Brew", "Milk Tea"]);
}

#[actix_web::test]
async fn cashier_order_is_posted_with_employee_id() {
    let captured = Captured::default();
    let url = start_backend(captured.clone());
    let backend = HttpBackend::new(url, 5).unwrap();

    let mut cart = Cart::new();
    cart.add(LineItem::from_product(&classic_tea(), 2, Customization::default(), &[]).unwrap());
    let payload = cart
        .to_payload(Purchaser::Employee {
            employee_id: EmployeeId::new(3).unwrap(),
        })
        .unwrap();

    let receipt = backend.post_order(&payload).await.unwrap();

    assert_eq!(receipt.order_id.get(), 77);
    let body = captured.lock().unwrap()[0].clone();
    assert_eq!(body["employee_id"], 3);
    assert_eq!(body["total_amount"], 7.0);
    assert_eq!(body["items"][0]["quantity"], 2);
    assert_eq!(body["items"][0]["sugar_level"], "100%");
    assert!(body.get("clerk_user_id").is_none());
}

#[actix_web::test]
async fn backend_error_field_is_surfaced() {
    let url = start_backend(Captured::default());
    let backend = HttpBackend::new(url, 5).unwrap();

    let mut payload = {
        let mut cart = Cart::new();
        cart.add(LineItem::from_product(&classic_tea(), 1, Customization::default(), &[]).unwrap());
        cart.to_payload(Purchaser::Employee {
            employee_id: EmployeeId::new(3).unwrap(),
        })
        .unwrap()
    };
    payload.items.clear();

    let err = backend.post_order(&payload).await.unwrap_err();

    assert!(matches!(err, BackendError::Status { status: 400, .. }));
    assert_eq!(err.user_message(), "Order must contain at least one item");
}

#[actix_web::test]
async fn missing_recipe_is_not_found() {
    let url = start_backend(Captured::default());
    let backend = HttpBackend::new(url, 5).unwrap();

    let err = backend
        .get_recipe(ProductId::new(40).unwrap())
        .await
        .unwrap_err();

    assert!(matches!(err, BackendError::NotFound(_)));
}

#[actix_web::test]
async fn order_history_is_requested_by_user_id() {
    let captured = Captured::default();
    let url = start_backend(captured.clone());
    let backend = HttpBackend::new(url, 5).unwrap();

    let orders = backend.list_user_orders("user_42").await.unwrap();

    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].items[0].quantity, 2);
    assert_eq!(captured.lock().unwrap()[0], json!({"clerk_user_id": "user_42"}));
}

#[actix_web::test]
async fn restock_returns_new_quantity() {
    let url = start_backend(Captured::default());
    let backend = HttpBackend::new(url, 5).unwrap();

    let result = backend
        .restock(
            IngredientId::new(4).unwrap(),
            &Restock {
                delta: PositiveAmount::new(15.0).unwrap(),
            },
        )
        .await
        .unwrap();

    assert_eq!(result.ingredient_id.get(), 4);
    assert_eq!(result.new_quantity, 25.0);
}

#[actix_web::test]
async fn sales_report_sends_date_range() {
    let captured = Captured::default();
    let url = start_backend(captured.clone());
    let backend = HttpBackend::new(url, 5).unwrap();
    let range = DateRange::new(
        NaiveDate::from_ymd_opt(2025, 11, 1).unwrap(),
        NaiveDate::from_ymd_opt(2025, 11, 30).unwrap(),
    )
    .unwrap();

    let rows = backend.sales_report(&range).await.unwrap();

    assert!(rows.is_empty());
    assert_eq!(
        captured.lock().unwrap()[0],
        json!({"start_date": "2025-11-01", "end_date": "2025-11-30"})
    );
}

#[actix_web::test]
async fn unreachable_backend_is_a_transport_error() {
    // nothing listens on the discard port
    let backend = HttpBackend::new("http://127.0.0.1:9", 1).unwrap();

    let err = backend.list_products().await.unwrap_err();

    assert!(matches!(err, BackendError::Http(_)));
    assert_eq!(err.user_message(), "Could not reach the store server");
}

#[actix_web::test]
async fn odd_employee_rows_do_not_hide_the_rest_of_the_staff() {
    let url = start_backend(Captured::default());
    let backend = HttpBackend::new(url, 5).unwrap();

    let employees = backend.list_employees().await.unwrap();

    assert_eq!(employees.len(), 2);
    let manager = find_by_email(&employees, "ANA@teashop.com").unwrap();
    assert_eq!(manager.role, EmployeeRole::Manager);
    assert_eq!(
        find_by_email(&employees, "lee@teashop.com").map(|e| e.role),
        Some(EmployeeRole::Cashier)
    );
    assert!(find_by_email(&employees, "sam@teashop.com").is_none());
}
