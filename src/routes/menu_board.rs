use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::backend::http::HttpBackend;
use crate::dto::menu_board::MenuSectionView;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::routes::{base_context, render_template};
use crate::services::menu_board as menu_board_service;

#[get("/menu")]
pub async fn show_menu_board(
    user: Option<AuthenticatedUser>,
    backend: web::Data<HttpBackend>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match menu_board_service::load_menu_board(backend.get_ref()).await {
        Ok(data) => {
            let mut context =
                base_context(&flash_messages, user.as_ref(), "menu", &server_config);
            let sections: Vec<MenuSectionView> =
                data.sections.iter().map(MenuSectionView::from).collect();
            context.insert("sections", &sections);
            context.insert("error", &data.error);
            render_template(&tera, "menu_board/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to load the menu board: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
