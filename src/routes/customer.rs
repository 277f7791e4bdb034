//! Customer self-service screen and cart. Browsing is public; placing an
//! order and reordering need a signed-in customer.

use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::{Context, Tera};

use crate::backend::http::HttpBackend;
use crate::backend::weather::OpenWeatherClient;
use crate::domain::order::{IceLevel, ModificationType, SizeLevel, SugarLevel};
use crate::domain::preferences::FontFamily;
use crate::domain::weather::Location;
use crate::dto::cart::CartView;
use crate::dto::catalog::{CatalogQuery, ProductCard};
use crate::forms::cart::{
    AddToCartForm, AddToCartPayload, LineForm, ModificationForm, QuantityForm, ReorderForm,
    ToggleAddOnForm,
};
use crate::forms::preferences::{LocationForm, PreferencesForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::routes::{base_context, redirect, render_template, save_cart};
use crate::services::cart::{self as cart_service, LineAction};
use crate::services::{ServiceError, ServiceResult, customer as customer_service};
use crate::session::{
    CartKind, load_cart, load_location, load_preferences, store_location, store_preferences,
};

const CUSTOMER_PATH: &str = "/customer";
const CART_PATH: &str = "/customer/cart";

/// Flashes the outcome of a cart action and sends the visitor back.
fn finish(result: ServiceResult<()>, back_to: &str, action: &str) -> HttpResponse {
    match result {
        Ok(()) => redirect(back_to),
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(back_to)
        }
        Err(err) => {
            log::error!("Customer failed to {action}: {err}");
            FlashMessage::error(err.user_message()).send();
            redirect(back_to)
        }
    }
}

/// Inserts the text settings every customer page needs.
fn insert_display_settings(context: &mut Context, session: &Session) {
    let preferences = load_preferences(session);
    context.insert("preferences", &preferences);
    context.insert("font_css", preferences.font_family.css());
    context.insert(
        "font_families",
        &FontFamily::ALL
            .iter()
            .map(|f| (f.as_str(), f.label()))
            .collect::<Vec<_>>(),
    );
}

#[get("")]
pub async fn show_customer(
    user: Option<AuthenticatedUser>,
    query: web::Query<CatalogQuery>,
    session: Session,
    backend: web::Data<HttpBackend>,
    weather: web::Data<OpenWeatherClient>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let cart = load_cart(&session, CartKind::Customer);
    let location = load_location(&session);

    match customer_service::load_customer_page(
        backend.get_ref(),
        weather.get_ref(),
        user.as_ref(),
        &query,
        location,
        &cart,
    )
    .await
    {
        Ok(data) => {
            let mut context =
                base_context(&flash_messages, user.as_ref(), "customer", &server_config);
            insert_display_settings(&mut context, &session);
            context.insert("products", &ProductCard::list(&data.products));
            context.insert("categories", &data.categories);
            context.insert("add_ons", &data.add_ons);
            context.insert("selected_category", &data.filter.category);
            context.insert("vegan_only", &data.filter.vegan_only);
            context.insert("location", &data.location);
            context.insert("location_label", data.location.label());
            context.insert(
                "locations",
                &Location::ALL
                    .iter()
                    .map(|l| (l.as_str(), l.label()))
                    .collect::<Vec<_>>(),
            );
            context.insert("weather", &data.weather);
            context.insert("history", &data.history);
            context.insert("cart_count", &data.cart_count);
            context.insert("error", &data.error);
            context.insert("sugar_levels", &SugarLevel::ALL);
            context.insert("size_levels", &SizeLevel::ALL);
            context.insert("ice_levels", &IceLevel::ALL);
            render_template(&tera, "customer/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to load the customer screen: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/add")]
pub async fn add_item(
    session: Session,
    backend: web::Data<HttpBackend>,
    body: web::Bytes,
) -> impl Responder {
    let payload = match serde_html_form::from_bytes::<AddToCartForm>(&body) {
        Ok(form) => AddToCartPayload::try_from(form).map_err(ServiceError::from),
        Err(err) => {
            log::warn!("Malformed customer add form: {err}");
            Err(ServiceError::Form("Please choose a drink.".to_string()))
        }
    };
    let payload = match payload {
        Ok(payload) => payload,
        Err(err) => return finish(Err(err), CUSTOMER_PATH, "read the drink"),
    };

    let mut cart = load_cart(&session, CartKind::Customer);
    let result = cart_service::add_to_cart(backend.get_ref(), &mut cart, payload).await;
    if result.is_ok() {
        save_cart(&session, CartKind::Customer, &cart);
        FlashMessage::success("Added to your cart.").send();
    }
    finish(result.map(|_| ()), CUSTOMER_PATH, "add the drink")
}

#[post("/preferences")]
pub async fn save_preferences(
    session: Session,
    web::Form(form): web::Form<PreferencesForm>,
) -> impl Responder {
    let preferences = form.apply(load_preferences(&session));
    if store_preferences(&session, &preferences).is_err() {
        FlashMessage::error("Could not save your display settings.").send();
    }
    redirect(form.return_path())
}

#[post("/location")]
pub async fn save_location(
    session: Session,
    web::Form(form): web::Form<LocationForm>,
) -> impl Responder {
    match form.location() {
        Some(location) => {
            if store_location(&session, location).is_err() {
                FlashMessage::error("Could not save the location.").send();
            }
        }
        None => FlashMessage::error("Unknown location.").send(),
    }
    redirect(CUSTOMER_PATH)
}

#[post("/reorder")]
pub async fn reorder(
    user: Option<AuthenticatedUser>,
    session: Session,
    backend: web::Data<HttpBackend>,
    web::Form(form): web::Form<ReorderForm>,
) -> impl Responder {
    let Some(user) = user else {
        FlashMessage::error("You must be signed in to place an order").send();
        return redirect(CUSTOMER_PATH);
    };
    let order_id = match form.order_id() {
        Ok(order_id) => order_id,
        Err(err) => return finish(Err(err.into()), CUSTOMER_PATH, "read the order"),
    };

    let mut cart = load_cart(&session, CartKind::Customer);
    match customer_service::reorder(backend.get_ref(), &user, &mut cart, order_id, form.item_index)
        .await
    {
        Ok(added) => {
            save_cart(&session, CartKind::Customer, &cart);
            FlashMessage::success(format!("Added {added} item(s) to your cart.")).send();
            redirect(CUSTOMER_PATH)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("That order is no longer available.").send();
            redirect(CUSTOMER_PATH)
        }
        Err(err) => finish(Err(err), CUSTOMER_PATH, "reorder"),
    }
}

#[get("/cart")]
pub async fn show_cart(
    user: Option<AuthenticatedUser>,
    session: Session,
    backend: web::Data<HttpBackend>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let cart = load_cart(&session, CartKind::Customer);

    let mut context = base_context(&flash_messages, user.as_ref(), "cart", &server_config);
    insert_display_settings(&mut context, &session);
    context.insert("actions", &ModificationType::ACTIONS);

    match customer_service::load_cart_page(backend.get_ref(), user.as_ref(), &cart).await {
        Ok(data) => {
            context.insert("cart", &data.cart);
            context.insert("signed_in", &data.signed_in);
            context.insert("error", &None::<String>);
        }
        Err(err) => {
            // the lines are still shown, only the editor is missing
            log::error!("Failed to load the cart editor: {err}");
            context.insert("cart", &CartView::plain(&cart));
            context.insert("signed_in", &user.is_some());
            context.insert("error", &Some(err.user_message()));
        }
    }
    render_template(&tera, "customer/cart.html", &context)
}

#[post("/cart/quantity")]
pub async fn set_quantity(session: Session, web::Form(form): web::Form<QuantityForm>) -> impl Responder {
    let result = form.parse().map_err(ServiceError::from).and_then(|(line_id, quantity)| {
        let mut cart = load_cart(&session, CartKind::Customer);
        customer_service::set_quantity(&mut cart, line_id, quantity)?;
        save_cart(&session, CartKind::Customer, &cart);
        Ok(())
    });
    finish(result, CART_PATH, "change the quantity")
}

#[post("/cart/modification")]
pub async fn set_modification(
    session: Session,
    backend: web::Data<HttpBackend>,
    web::Form(form): web::Form<ModificationForm>,
) -> impl Responder {
    let (line_id, ingredient_id, modification_type) = match form.parse() {
        Ok(parsed) => parsed,
        Err(err) => return finish(Err(err.into()), CART_PATH, "read the modification"),
    };

    let mut cart = load_cart(&session, CartKind::Customer);
    let result = cart_service::set_modification(
        backend.get_ref(),
        &mut cart,
        line_id,
        ingredient_id,
        modification_type,
    )
    .await;
    if result.is_ok() {
        save_cart(&session, CartKind::Customer, &cart);
    }
    finish(result, CART_PATH, "change the modification")
}

#[post("/cart/toggle")]
pub async fn toggle_add_on(
    session: Session,
    backend: web::Data<HttpBackend>,
    web::Form(form): web::Form<ToggleAddOnForm>,
) -> impl Responder {
    let (line_id, ingredient_id) = match form.parse() {
        Ok(parsed) => parsed,
        Err(err) => return finish(Err(err.into()), CART_PATH, "read the add-on"),
    };

    let mut cart = load_cart(&session, CartKind::Customer);
    let result =
        cart_service::toggle_add_on(backend.get_ref(), &mut cart, line_id, ingredient_id).await;
    if result.is_ok() {
        save_cart(&session, CartKind::Customer, &cart);
    }
    finish(result, CART_PATH, "toggle the add-on")
}

#[post("/cart/remove")]
pub async fn remove_line(session: Session, web::Form(form): web::Form<LineForm>) -> impl Responder {
    let result = form.line_id().map_err(ServiceError::from).and_then(|line_id| {
        let mut cart = load_cart(&session, CartKind::Customer);
        cart_service::update_line(&mut cart, line_id, LineAction::Remove)?;
        save_cart(&session, CartKind::Customer, &cart);
        Ok(())
    });
    finish(result, CART_PATH, "remove the line")
}

#[post("/cart/clear")]
pub async fn clear_cart(session: Session) -> impl Responder {
    let mut cart = load_cart(&session, CartKind::Customer);
    cart.clear();
    save_cart(&session, CartKind::Customer, &cart);
    redirect(CART_PATH)
}

#[post("/cart/checkout")]
pub async fn checkout(
    user: Option<AuthenticatedUser>,
    session: Session,
    backend: web::Data<HttpBackend>,
) -> impl Responder {
    let mut cart = load_cart(&session, CartKind::Customer);
    match customer_service::checkout(backend.get_ref(), user.as_ref(), &mut cart).await {
        Ok(receipt) => {
            save_cart(&session, CartKind::Customer, &cart);
            let mut message = format!("Order #{} placed. Thank you!", receipt.order_id);
            if receipt.email_sent {
                message.push_str(" A receipt was sent to your email.");
            }
            FlashMessage::success(message).send();
            redirect(CUSTOMER_PATH)
        }
        Err(err) => finish(Err(err), CART_PATH, "place the order"),
    }
}
