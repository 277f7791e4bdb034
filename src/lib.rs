//! Point-of-sale web front end of a tea shop: cashier and customer ordering
//! screens, manager screens and a menu board over the store's REST backend.

use actix_cors::Cors;
use actix_files::Files;
use actix_identity::IdentityMiddleware;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::{App, HttpServer, middleware as actix_middleware, web};
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
use tera::Tera;

use crate::backend::http::HttpBackend;
use crate::backend::weather::OpenWeatherClient;
use crate::middleware::RedirectUnauthorized;
use crate::models::config::ServerConfig;
use crate::routes::{cashier, customer, main, manager, menu_board, price_filter};

pub mod backend;
pub mod domain;
pub mod dto;
pub mod error_conversions;
pub mod forms;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod session;

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    let backend = HttpBackend::new(&server_config.backend_url, server_config.backend_timeout_secs)
        .map_err(|e| std::io::Error::other(format!("Failed to build backend client: {e}")))?;

    let weather = OpenWeatherClient::new(
        &server_config.weather_api_url,
        server_config.weather_api_key.clone(),
        server_config.backend_timeout_secs,
    )
    .map_err(|e| std::io::Error::other(format!("Failed to build weather client: {e}")))?;

    // Keys and stores for identity, sessions, and flash messages.
    let secret_key = Key::from(server_config.secret.as_bytes());

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let mut tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;
    tera.register_filter("price", price_filter);

    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!(
        "Serving on {}:{} with backend {}",
        bind_address.0,
        bind_address.1,
        backend.base_url()
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(message_framework.clone())
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(Some(format!(".{}", server_config.domain)))
                    .build(),
            )
            .wrap(actix_middleware::Compress::default())
            .wrap(actix_middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .service(main::index)
            .service(main::health)
            .service(main::signin)
            .service(main::logout)
            .service(menu_board::show_menu_board)
            .service(
                web::scope("/customer")
                    .service(customer::show_customer)
                    .service(customer::add_item)
                    .service(customer::save_preferences)
                    .service(customer::save_location)
                    .service(customer::reorder)
                    .service(customer::show_cart)
                    .service(customer::set_quantity)
                    .service(customer::set_modification)
                    .service(customer::toggle_add_on)
                    .service(customer::remove_line)
                    .service(customer::clear_cart)
                    .service(customer::checkout),
            )
            .service(
                web::scope("/cashier")
                    .wrap(RedirectUnauthorized)
                    .service(cashier::show_cashier)
                    .service(cashier::add_item)
                    .service(cashier::increment_line)
                    .service(cashier::decrement_line)
                    .service(cashier::remove_line)
                    .service(cashier::clear_order)
                    .service(cashier::checkout),
            )
            .service(
                web::scope("/manager")
                    .wrap(RedirectUnauthorized)
                    .service(manager::show_manager)
                    .service(manager::show_employees)
                    .service(manager::add_employee)
                    .service(manager::update_employee)
                    .service(manager::delete_employee)
                    .service(manager::show_inventory)
                    .service(manager::add_ingredient)
                    .service(manager::restock)
                    .service(manager::show_menu)
                    .service(manager::update_price)
                    .service(manager::add_product)
                    .service(manager::show_reports)
                    .service(manager::generate_z_report),
            )
            .default_service(web::to(main::not_found))
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(backend.clone()))
            .app_data(web::Data::new(weather.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
