//! Cashier screen. Every handler requires an employee record.

use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::backend::http::HttpBackend;
use crate::domain::order::{IceLevel, SizeLevel, SugarLevel};
use crate::dto::catalog::{CatalogQuery, ProductCard};
use crate::forms::cart::{AddToCartForm, AddToCartPayload, LineForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::routes::{base_context, redirect, render_template, save_cart};
use crate::services::cart::LineAction;
use crate::services::{ServiceError, cashier as cashier_service};
use crate::session::{CartKind, load_cart};

const CASHIER_PATH: &str = "/cashier";

fn handle_error(err: ServiceError, action: &str) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => {
            FlashMessage::error(ServiceError::Unauthorized.user_message()).send();
            redirect("/")
        }
        ServiceError::Form(message) => {
            FlashMessage::error(message).send();
            redirect(CASHIER_PATH)
        }
        err => {
            log::error!("Cashier failed to {action}: {err}");
            FlashMessage::error(err.user_message()).send();
            redirect(CASHIER_PATH)
        }
    }
}

#[get("")]
pub async fn show_cashier(
    user: AuthenticatedUser,
    query: web::Query<CatalogQuery>,
    session: Session,
    backend: web::Data<HttpBackend>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let cart = load_cart(&session, CartKind::Cashier);

    match cashier_service::load_cashier_page(backend.get_ref(), &user, &query, &cart).await {
        Ok(data) => {
            let mut context = base_context(&flash_messages, Some(&user), "cashier", &server_config);
            context.insert("employee", &data.employee);
            context.insert("products", &ProductCard::list(&data.products));
            context.insert("categories", &data.categories);
            context.insert("selected_category", &data.filter.category);
            context.insert("add_ons", &data.add_ons);
            context.insert("cart", &data.cart);
            context.insert("error", &data.error);
            context.insert("sugar_levels", &SugarLevel::ALL);
            context.insert("size_levels", &SizeLevel::ALL);
            context.insert("ice_levels", &IceLevel::ALL);
            render_template(&tera, "cashier/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error(ServiceError::Unauthorized.user_message()).send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to load the cashier screen: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/add")]
pub async fn add_item(
    user: AuthenticatedUser,
    session: Session,
    backend: web::Data<HttpBackend>,
    body: web::Bytes,
) -> impl Responder {
    let payload = match serde_html_form::from_bytes::<AddToCartForm>(&body)
        .map_err(|err| {
            log::warn!("Malformed cashier add form: {err}");
            ServiceError::Form("Please choose a drink.".to_string())
        })
        .and_then(|form| AddToCartPayload::try_from(form).map_err(ServiceError::from))
    {
        Ok(payload) => payload,
        Err(err) => return handle_error(err, "read the drink"),
    };

    let mut cart = load_cart(&session, CartKind::Cashier);
    match cashier_service::add_to_order(backend.get_ref(), &user, &mut cart, payload).await {
        Ok(()) => {
            save_cart(&session, CartKind::Cashier, &cart);
            redirect(CASHIER_PATH)
        }
        Err(err) => handle_error(err, "add the drink"),
    }
}

async fn change_line(
    user: AuthenticatedUser,
    session: Session,
    backend: web::Data<HttpBackend>,
    form: LineForm,
    action: LineAction,
) -> HttpResponse {
    let line_id = match form.line_id() {
        Ok(line_id) => line_id,
        Err(err) => return handle_error(err.into(), "find the line"),
    };

    let mut cart = load_cart(&session, CartKind::Cashier);
    match cashier_service::update_order_line(backend.get_ref(), &user, &mut cart, line_id, action)
        .await
    {
        Ok(()) => {
            save_cart(&session, CartKind::Cashier, &cart);
            redirect(CASHIER_PATH)
        }
        Err(err) => handle_error(err, "update the line"),
    }
}

#[post("/increment")]
pub async fn increment_line(
    user: AuthenticatedUser,
    session: Session,
    backend: web::Data<HttpBackend>,
    web::Form(form): web::Form<LineForm>,
) -> impl Responder {
    change_line(user, session, backend, form, LineAction::Increment).await
}

#[post("/decrement")]
pub async fn decrement_line(
    user: AuthenticatedUser,
    session: Session,
    backend: web::Data<HttpBackend>,
    web::Form(form): web::Form<LineForm>,
) -> impl Responder {
    change_line(user, session, backend, form, LineAction::Decrement).await
}

#[post("/remove")]
pub async fn remove_line(
    user: AuthenticatedUser,
    session: Session,
    backend: web::Data<HttpBackend>,
    web::Form(form): web::Form<LineForm>,
) -> impl Responder {
    change_line(user, session, backend, form, LineAction::Remove).await
}

#[post("/clear")]
pub async fn clear_order(
    user: AuthenticatedUser,
    session: Session,
    backend: web::Data<HttpBackend>,
) -> impl Responder {
    let mut cart = load_cart(&session, CartKind::Cashier);
    match cashier_service::clear_order(backend.get_ref(), &user, &mut cart).await {
        Ok(()) => {
            save_cart(&session, CartKind::Cashier, &cart);
            redirect(CASHIER_PATH)
        }
        Err(err) => handle_error(err, "clear the order"),
    }
}

#[post("/checkout")]
pub async fn checkout(
    user: AuthenticatedUser,
    session: Session,
    backend: web::Data<HttpBackend>,
) -> impl Responder {
    let mut cart = load_cart(&session, CartKind::Cashier);
    match cashier_service::checkout(backend.get_ref(), &user, &mut cart).await {
        Ok(receipt) => {
            save_cart(&session, CartKind::Cashier, &cart);
            FlashMessage::success(format!("Order #{} placed.", receipt.order_id)).send();
            redirect(CASHIER_PATH)
        }
        Err(err) => handle_error(err, "submit the order"),
    }
}
