//! Manager screens: employees, inventory, menu and reports.

use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use chrono::Local;
use tera::Tera;

use crate::backend::http::HttpBackend;
use crate::domain::employee::EmployeeRole;
use crate::domain::inventory::LOW_STOCK_THRESHOLD;
use crate::dto::manager::MenuQuery;
use crate::forms::employees::{EmployeeForm, EmployeeIdForm};
use crate::forms::inventory::{IngredientForm, RestockForm};
use crate::forms::products::{PriceForm, ProductForm};
use crate::forms::reports::{DateRangeForm, ZReportForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::routes::{base_context, redirect, render_template};
use crate::services::access::{StaffScreen, ensure_staff_access};
use crate::services::reports::Z_REPORT_CONFIRMATION;
use crate::services::{
    ServiceError, employees as employees_service, inventory as inventory_service,
    products as products_service, reports as reports_service,
};
use crate::session::{last_z_report_date, mark_z_report};

/// Common error mapping of manager actions: access problems go home, form
/// problems go back to the screen they came from.
fn handle_error(err: ServiceError, back_to: &str, action: &str) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => {
            FlashMessage::error(ServiceError::Unauthorized.user_message()).send();
            redirect("/")
        }
        ServiceError::Form(message) => {
            FlashMessage::error(message).send();
            redirect(back_to)
        }
        err => {
            log::error!("Manager failed to {action}: {err}");
            FlashMessage::error(err.user_message()).send();
            redirect(back_to)
        }
    }
}

fn page_error(err: ServiceError, page: &str) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => {
            FlashMessage::error(ServiceError::Unauthorized.user_message()).send();
            redirect("/")
        }
        err => {
            log::error!("Failed to load the {page} screen: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("")]
pub async fn show_manager(
    user: AuthenticatedUser,
    backend: web::Data<HttpBackend>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match ensure_staff_access(backend.get_ref(), &user, StaffScreen::Manager).await {
        Ok(employee) => {
            let mut context = base_context(&flash_messages, Some(&user), "manager", &server_config);
            context.insert("employee", &employee);
            render_template(&tera, "manager/index.html", &context)
        }
        Err(err) => page_error(err, "manager"),
    }
}

#[get("/employees")]
pub async fn show_employees(
    user: AuthenticatedUser,
    backend: web::Data<HttpBackend>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match employees_service::list_employees(backend.get_ref(), &user).await {
        Ok(data) => {
            let mut context =
                base_context(&flash_messages, Some(&user), "employees", &server_config);
            context.insert("employees", &data.employees);
            context.insert("roles", &EmployeeRole::ALL);
            context.insert("error", &data.error);
            render_template(&tera, "manager/employees.html", &context)
        }
        Err(err) => page_error(err, "employees"),
    }
}

#[post("/employees/add")]
pub async fn add_employee(
    user: AuthenticatedUser,
    backend: web::Data<HttpBackend>,
    web::Form(form): web::Form<EmployeeForm>,
) -> impl Responder {
    match employees_service::hire_employee(backend.get_ref(), &user, form).await {
        Ok(employee) => {
            FlashMessage::success(format!("{} was hired.", employee.name)).send();
            redirect("/manager/employees")
        }
        Err(err) => handle_error(err, "/manager/employees", "hire the employee"),
    }
}

/// The update form carries the employee id next to the regular fields, so
/// the body is decoded twice.
#[post("/employees/update")]
pub async fn update_employee(
    user: AuthenticatedUser,
    backend: web::Data<HttpBackend>,
    body: web::Bytes,
) -> impl Responder {
    let forms = serde_html_form::from_bytes::<EmployeeIdForm>(&body).and_then(|id_form| {
        serde_html_form::from_bytes::<EmployeeForm>(&body).map(|form| (id_form, form))
    });
    let (id_form, form) = match forms {
        Ok(forms) => forms,
        Err(err) => {
            log::warn!("Malformed employee update form: {err}");
            FlashMessage::error("Please select an employee.").send();
            return redirect("/manager/employees");
        }
    };

    match employees_service::update_employee(backend.get_ref(), &user, id_form, form).await {
        Ok(()) => {
            FlashMessage::success("Employee updated.").send();
            redirect("/manager/employees")
        }
        Err(err) => handle_error(err, "/manager/employees", "update the employee"),
    }
}

#[post("/employees/delete")]
pub async fn delete_employee(
    user: AuthenticatedUser,
    backend: web::Data<HttpBackend>,
    web::Form(form): web::Form<EmployeeIdForm>,
) -> impl Responder {
    match employees_service::dismiss_employee(backend.get_ref(), &user, form).await {
        Ok(()) => {
            FlashMessage::success("Employee removed.").send();
            redirect("/manager/employees")
        }
        Err(err) => handle_error(err, "/manager/employees", "remove the employee"),
    }
}

#[get("/inventory")]
pub async fn show_inventory(
    user: AuthenticatedUser,
    backend: web::Data<HttpBackend>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match inventory_service::list_inventory(backend.get_ref(), &user).await {
        Ok(data) => {
            let mut context =
                base_context(&flash_messages, Some(&user), "inventory", &server_config);
            context.insert("items", &data.items);
            context.insert("low_stock_count", &data.low_stock_count);
            context.insert("low_stock_threshold", &LOW_STOCK_THRESHOLD);
            context.insert("error", &data.error);
            render_template(&tera, "manager/inventory.html", &context)
        }
        Err(err) => page_error(err, "inventory"),
    }
}

#[post("/inventory/add")]
pub async fn add_ingredient(
    user: AuthenticatedUser,
    backend: web::Data<HttpBackend>,
    web::Form(form): web::Form<IngredientForm>,
) -> impl Responder {
    match inventory_service::add_ingredient(backend.get_ref(), &user, form).await {
        Ok(item) => {
            FlashMessage::success(format!("{} added to inventory.", item.ingredient_name)).send();
            redirect("/manager/inventory")
        }
        Err(err) => handle_error(err, "/manager/inventory", "add the ingredient"),
    }
}

#[post("/inventory/restock")]
pub async fn restock(
    user: AuthenticatedUser,
    backend: web::Data<HttpBackend>,
    web::Form(form): web::Form<RestockForm>,
) -> impl Responder {
    match inventory_service::restock(backend.get_ref(), &user, form).await {
        Ok(result) => {
            FlashMessage::success(format!(
                "Restocked. New quantity: {}",
                result.new_quantity
            ))
            .send();
            redirect("/manager/inventory")
        }
        Err(err) => handle_error(err, "/manager/inventory", "restock"),
    }
}

#[get("/menu")]
pub async fn show_menu(
    user: AuthenticatedUser,
    query: web::Query<MenuQuery>,
    backend: web::Data<HttpBackend>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match products_service::load_menu(backend.get_ref(), &user, &query).await {
        Ok(data) => {
            let mut context =
                base_context(&flash_messages, Some(&user), "menu_admin", &server_config);
            context.insert("products", &data.products);
            context.insert("ingredients", &data.ingredients);
            context.insert("selected", &data.selected);
            context.insert("error", &data.error);
            render_template(&tera, "manager/menu.html", &context)
        }
        Err(err) => page_error(err, "menu"),
    }
}

#[post("/menu/price")]
pub async fn update_price(
    user: AuthenticatedUser,
    backend: web::Data<HttpBackend>,
    web::Form(form): web::Form<PriceForm>,
) -> impl Responder {
    match products_service::update_price(backend.get_ref(), &user, form).await {
        Ok(updated) => {
            FlashMessage::success(format!("Price of {} updated.", updated.product_name)).send();
            redirect(&format!("/manager/menu?product_id={}", updated.product_id))
        }
        Err(err) => handle_error(err, "/manager/menu", "update the price"),
    }
}

/// Recipe rows repeat `ingredient_id` and `quantity_per_unit`, so the body
/// is decoded with `serde_html_form`.
#[post("/menu/add")]
pub async fn add_product(
    user: AuthenticatedUser,
    backend: web::Data<HttpBackend>,
    body: web::Bytes,
) -> impl Responder {
    let form = match serde_html_form::from_bytes::<ProductForm>(&body) {
        Ok(form) => form,
        Err(err) => {
            log::warn!("Malformed product form: {err}");
            FlashMessage::error("Product name required").send();
            return redirect("/manager/menu");
        }
    };

    match products_service::create_product(backend.get_ref(), &user, form).await {
        Ok(created) => {
            FlashMessage::success("Product created.").send();
            redirect(&format!("/manager/menu?product_id={}", created.product_id))
        }
        Err(err) => handle_error(err, "/manager/menu", "create the product"),
    }
}

#[get("/reports")]
pub async fn show_reports(
    user: AuthenticatedUser,
    query: web::Query<DateRangeForm>,
    session: Session,
    backend: web::Data<HttpBackend>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let today = Local::now().date_naive();
    let last_z_report = last_z_report_date(&session);

    match reports_service::load_reports(backend.get_ref(), &user, &query, today, last_z_report)
        .await
    {
        Ok(data) => {
            let mut context =
                base_context(&flash_messages, Some(&user), "reports", &server_config);
            context.insert("start_date", &data.range.start().to_string());
            context.insert("end_date", &data.range.end().to_string());
            context.insert("sales", &data.sales);
            context.insert("sales_total", &data.sales_total);
            context.insert("x_report", &data.x_report);
            context.insert("usage", &data.usage);
            context.insert("z_generated_today", &data.z_generated_today);
            context.insert("z_confirmation", Z_REPORT_CONFIRMATION);
            render_template(&tera, "manager/reports.html", &context)
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/manager/reports")
        }
        Err(err) => page_error(err, "reports"),
    }
}

#[post("/reports/z")]
pub async fn generate_z_report(
    user: AuthenticatedUser,
    session: Session,
    backend: web::Data<HttpBackend>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<ZReportForm>,
) -> impl Responder {
    let today = Local::now().date_naive();
    let last_z_report = last_z_report_date(&session);

    match reports_service::generate_z_report(backend.get_ref(), &user, &form, today, last_z_report)
        .await
    {
        Ok(report) => {
            if mark_z_report(&session, today).is_err() {
                log::error!("Z report generated but the session could not record it");
            }
            let mut context =
                base_context(&flash_messages, Some(&user), "reports", &server_config);
            context.insert("report", &report);
            render_template(&tera, "manager/z_report.html", &context)
        }
        Err(err) => handle_error(err, "/manager/reports", "generate the Z report"),
    }
}
