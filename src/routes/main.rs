use actix_identity::Identity;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use serde_json::json;
use tera::Tera;

use crate::backend::http::HttpBackend;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::routes::{base_context, redirect, render_template};
use crate::services::main as main_service;

#[get("/")]
pub async fn index(
    user: Option<AuthenticatedUser>,
    backend: web::Data<HttpBackend>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match main_service::load_landing_page(backend.get_ref(), user.as_ref()).await {
        Ok(data) => {
            let mut context =
                base_context(&flash_messages, user.as_ref(), "index", &server_config);
            context.insert("staff_role", &data.role);
            render_template(&tera, "main/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to load the landing page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

/// Hands the visitor over to the identity provider.
#[get("/auth/signin")]
pub async fn signin(server_config: web::Data<ServerConfig>) -> impl Responder {
    let url = format!(
        "{}/auth/signin",
        server_config.auth_service_url.trim_end_matches('/')
    );
    redirect(&url)
}

#[post("/logout")]
pub async fn logout(user: Option<Identity>) -> impl Responder {
    if let Some(user) = user {
        user.logout();
    }
    redirect("/")
}

/// Unknown paths land on the home page.
pub async fn not_found() -> HttpResponse {
    redirect("/")
}
