use std::collections::HashMap;

use actix_web::http::{StatusCode, header};
use actix_web::test as actix_test;
use actix_web::{App, web};
use actix_web_flash_messages::Level;
use serde_json::json;

use teashop_pos::routes::main::{health, not_found};
use teashop_pos::routes::{alert_level_to_str, price_filter};

#[test]
fn test_alert_level_to_str_mappings() {
    assert_eq!(alert_level_to_str(&Level::Error), "danger");
    assert_eq!(alert_level_to_str(&Level::Warning), "warning");
    assert_eq!(alert_level_to_str(&Level::Success), "success");
    assert_eq!(alert_level_to_str(&Level::Info), "info");
    assert_eq!(alert_level_to_str(&Level::Debug), "info");
}

#[test]
fn price_filter_formats_two_decimals() {
    let args = HashMap::new();
    assert_eq!(price_filter(&json!(3.5), &args).unwrap(), json!("$3.50"));
    assert_eq!(price_filter(&json!(12), &args).unwrap(), json!("$12.00"));
    assert!(price_filter(&json!("3.50"), &args).is_err());
}

#[actix_web::test]
async fn health_reports_ok() {
    let app = actix_test::init_service(App::new().service(health)).await;

    let req = actix_test::TestRequest::get().uri("/health").to_request();
    let body: serde_json::Value = actix_test::call_and_read_body_json(&app, req).await;

    assert_eq!(body, json!({"status": "ok"}));
}

#[actix_web::test]
async fn unknown_paths_redirect_home() {
    let app = actix_test::init_service(App::new().default_service(web::to(not_found))).await;

    let req = actix_test::TestRequest::get().uri("/no/such/page").to_request();
    let resp = actix_test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/");
}
