use actix_web::http::StatusCode;
use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, web};
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use serde::Serialize;
use tera::{Context, Tera};

use crate::cache::{CacheTag, PageCache};
use crate::dto::api::ApiResponse;
use crate::dto::content::LayoutView;
use crate::services::ServiceError;

pub mod admin;
pub mod admin_brands;
pub mod admin_motors;
pub mod admin_slider;
pub mod api;
pub mod auth;
pub mod catalog;
pub mod main;
pub mod storage;

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    render_with_status(tera, template, context, StatusCode::OK)
}

pub fn render_with_status(
    tera: &Tera,
    template: &str,
    context: &Context,
    status: StatusCode,
) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::build(status)
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(e) => {
            log::error!("Failed to render template '{template}': {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

/// Context of back office pages: flash alerts and the active menu entry.
pub fn base_context(flash_messages: &IncomingFlashMessages, current_page: &str) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_page", current_page);
    context
}

/// Context of storefront pages: the shared header/footer data.
pub fn public_context(layout: &LayoutView, current_page: &str) -> Context {
    let mut context = Context::new();
    context.insert("layout", layout);
    context.insert("current_page", current_page);
    context
}

/// Storefront error page; falls back to a bare status when rendering fails.
pub fn error_page(tera: &Tera, layout: &LayoutView, status: StatusCode) -> HttpResponse {
    let template = if status == StatusCode::NOT_FOUND {
        "errors/404.html"
    } else {
        "errors/500.html"
    };
    render_with_status(tera, template, &public_context(layout, "error"), status)
}

/// Serves a public page from the page cache, rendering and storing it on a miss.
///
/// The cache key is the request path with its query string. Only successful
/// renders are stored.
pub fn serve_cached<F>(req: &HttpRequest, cache: &PageCache, render: F) -> HttpResponse
where
    F: FnOnce() -> Result<(String, Vec<CacheTag>), HttpResponse>,
{
    let key = req.uri().to_string();
    if let Some(body) = cache.get(&key) {
        return html(body);
    }
    match render() {
        Ok((body, tags)) => {
            cache.insert(key, body.clone(), tags);
            html(body)
        }
        Err(response) => response,
    }
}

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

/// Renders a template to a string for `serve_cached`.
pub fn render_body(tera: &Tera, template: &str, context: &Context) -> Result<String, HttpResponse> {
    tera.render(template, context).map_err(|e| {
        log::error!("Failed to render template '{template}': {e}");
        HttpResponse::InternalServerError().finish()
    })
}

/// Status code a JSON route answers a service failure with.
pub fn service_status(err: &ServiceError) -> StatusCode {
    match err {
        ServiceError::Unauthorized => StatusCode::UNAUTHORIZED,
        ServiceError::NotFound => StatusCode::NOT_FOUND,
        ServiceError::Conflict(_) => StatusCode::CONFLICT,
        ServiceError::Form(_) | ServiceError::TypeConstraint(_) => StatusCode::BAD_REQUEST,
        ServiceError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        ServiceError::Storage(_) | ServiceError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Message shown to the user for a service failure.
pub fn user_message(err: &ServiceError) -> String {
    match err {
        ServiceError::NotFound => "Kayıt bulunamadı".to_string(),
        ServiceError::Unauthorized => "Kimlik doğrulama gerekli".to_string(),
        ServiceError::Internal => "Sunucu hatası".to_string(),
        other => other.to_string(),
    }
}

/// `{success:false, error}` envelope for a service failure.
pub fn api_error(err: &ServiceError) -> HttpResponse {
    HttpResponse::build(service_status(err)).json(ApiResponse::error(user_message(err)))
}

pub fn api_bad_request(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error(message))
}

pub fn api_ok<T: Serialize>(data: T) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::ok(data))
}

/// Client identity used for rate limiting.
///
/// Keyed on the socket peer only; forwarding headers are client controlled.
pub fn client_key(req: &HttpRequest) -> String {
    req.peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Registers every route of the application.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(main::index)
        .service(main::about)
        .service(main::contact)
        .service(main::credit)
        .service(main::submit_credit)
        .service(main::promissory_sales)
        .service(main::service)
        .service(main::test_drive)
        .service(main::submit_test_drive)
        .service(catalog::list_models)
        .service(catalog::show_model)
        .service(storage::public_object)
        .service(storage::signed_object)
        .service(auth::login_page)
        .service(auth::login)
        .service(auth::logout)
        .service(admin::dashboard)
        .service(admin::credit_applications)
        .service(admin::test_drive_requests)
        .service(admin_motors::list_motors)
        .service(admin_motors::new_motor)
        .service(admin_motors::create_motor)
        .service(admin_motors::show_motor)
        .service(admin_motors::edit_motor)
        .service(admin_motors::update_motor)
        .service(admin_motors::delete_motor)
        .service(admin_motors::toggle_published)
        .service(admin_motors::toggle_featured)
        .service(admin_motors::upload_image)
        .service(admin_motors::reorder_images)
        .service(admin_motors::set_primary_image)
        .service(admin_motors::delete_image)
        .service(admin_motors::save_specs)
        .service(admin_motors::save_categories)
        .service(admin_brands::list_brands)
        .service(admin_brands::create_brand)
        .service(admin_brands::update_brand)
        .service(admin_brands::delete_brand)
        .service(admin_brands::create_category)
        .service(admin_brands::delete_category)
        .service(admin_slider::list_sliders)
        .service(admin_slider::create_slider)
        .service(admin_slider::add_images_page)
        .service(admin_slider::add_images)
        .service(admin_slider::show_slider)
        .service(admin_slider::save_settings)
        .service(admin_slider::reorder_slides)
        .service(admin_slider::new_slide)
        .service(admin_slider::create_slide)
        .service(admin_slider::edit_slide)
        .service(admin_slider::update_slide)
        .service(admin_slider::delete_slide)
        .service(
            web::scope("/api")
                .service(api::health)
                .service(api::admin_auth)
                .service(api::create_motor)
                .service(api::update_motor)
                .service(api::quick_add_slide)
                .service(api::slider_id)
                .service(api::get_contact_settings)
                .service(api::put_contact_settings)
                .service(api::get_faqs)
                .service(api::create_faq)
                .service(api::update_faq)
                .service(api::delete_faq)
                .service(api::get_footer_links)
                .service(api::put_footer_links)
                .service(api::get_prefooter_banner)
                .service(api::put_prefooter_banner)
                .service(api::create_credit_application)
                .service(api::list_credit_applications)
                .service(api::create_test_drive_request)
                .service(api::list_test_drive_requests),
        );
}
