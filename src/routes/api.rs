use actix_multipart::form::MultipartForm;
use actix_web::http::header::CACHE_CONTROL;
use actix_web::{HttpRequest, HttpResponse, Responder, delete, get, post, put, web};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::SERVICE_NAME;
use crate::cache::PageCache;
use crate::domain::content::{ContactSettings, FooterLinks, PrefooterBanner};
use crate::domain::lead::{NewCreditApplication, NewTestDriveRequest};
use crate::domain::types::FaqId;
use crate::dto::api::{ApiResponse, HealthStatus};
use crate::forms::auth::LoginForm;
use crate::forms::catalog::PageQuery;
use crate::forms::content::{
    ContactSettingsForm, FaqForm, FaqPayload, FooterLinksForm, IdQuery, PrefooterBannerForm,
};
use crate::forms::leads::{CreditApplicationForm, TestDriveRequestForm};
use crate::forms::motorcycles::{MotorcycleFormPayload, MotorcycleMultipartForm};
use crate::forms::slides::{QuickSlideMultipartForm, QuickSlidePayload};
use crate::models::auth::AdminUser;
use crate::models::config::ServerConfig;
use crate::rate_limit::RateLimiter;
use crate::repository::DieselRepository;
use crate::routes::auth::establish_session;
use crate::routes::{api_bad_request, api_error, api_ok, client_key};
use crate::services::ServiceError;
use crate::services::auth::verify_admin_password;
use crate::services::content::{
    delete_faq as delete_faq_service, get_contact, get_footer_links as get_footer_links_service,
    get_prefooter_banner as get_prefooter_banner_service, list_faqs, save_contact, save_faq,
    save_footer_links, save_prefooter_banner,
};
use crate::services::leads::{
    list_credit_applications as list_credit_applications_service,
    list_test_drive_requests as list_test_drive_requests_service, submit_credit_application,
    submit_test_drive_request,
};
use crate::services::motorcycles::{create_motorcycle, update_motorcycle};
use crate::services::slider::{quick_add_slide as quick_add_slide_service, slider_id_by_slug};
use crate::storage::LocalStorage;

const PUBLIC_CACHE: &str = "public, s-maxage=300, stale-while-revalidate=600";
const BANNER_CACHE: &str = "public, s-maxage=60, stale-while-revalidate=300";

fn cached_ok<T: Serialize>(data: T, cache_control: &'static str) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((CACHE_CONTROL, cache_control))
        .json(ApiResponse::ok(data))
}

fn created<T: Serialize>(data: T, message: &str) -> HttpResponse {
    HttpResponse::Created().json(ApiResponse::ok(data).with_message(message))
}

fn saved(message: &str) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::<()> {
        success: true,
        data: None,
        error: None,
        message: Some(message.to_string()),
        pagination: None,
    })
}

#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthStatus {
        ok: true,
        time: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[post("/admin/auth")]
pub async fn admin_auth(
    req: HttpRequest,
    form: web::Json<LoginForm>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    match verify_admin_password(&form, &server_config.admin_password, &server_config.secret) {
        Ok(()) if establish_session(&req) => saved("Giriş başarılı"),
        Ok(()) => api_error(&ServiceError::Internal),
        Err(_) => HttpResponse::Unauthorized().json(ApiResponse::error("Yanlış şifre")),
    }
}

#[post("/motors")]
pub async fn create_motor(
    _admin: AdminUser,
    MultipartForm(form): MultipartForm<MotorcycleMultipartForm>,
    repo: web::Data<DieselRepository>,
    storage: web::Data<LocalStorage>,
    cache: web::Data<PageCache>,
) -> impl Responder {
    let payload = match MotorcycleFormPayload::try_from(form) {
        Ok(payload) => payload,
        Err(e) => return api_bad_request(e.to_string()),
    };
    match create_motorcycle(payload, repo.get_ref(), storage.get_ref(), &cache) {
        Ok(motorcycle) => created(motorcycle, "Motor başarıyla oluşturuldu"),
        Err(err) => api_error(&err),
    }
}

#[put("/motors")]
pub async fn update_motor(
    _admin: AdminUser,
    MultipartForm(form): MultipartForm<MotorcycleMultipartForm>,
    repo: web::Data<DieselRepository>,
    storage: web::Data<LocalStorage>,
    cache: web::Data<PageCache>,
) -> impl Responder {
    let payload = match MotorcycleFormPayload::try_from(form) {
        Ok(payload) => payload,
        Err(e) => return api_bad_request(e.to_string()),
    };
    let Some(id) = payload.id else {
        return api_bad_request("Motor ID gerekli");
    };
    match update_motorcycle(id, payload, repo.get_ref(), storage.get_ref(), &cache) {
        Ok(motorcycle) => HttpResponse::Ok()
            .json(ApiResponse::ok(motorcycle).with_message("Motor başarıyla güncellendi")),
        Err(err) => api_error(&err),
    }
}

#[post("/slides")]
pub async fn quick_add_slide(
    _admin: AdminUser,
    MultipartForm(form): MultipartForm<QuickSlideMultipartForm>,
    repo: web::Data<DieselRepository>,
    storage: web::Data<LocalStorage>,
    cache: web::Data<PageCache>,
) -> impl Responder {
    let payload = match QuickSlidePayload::try_from(form) {
        Ok(payload) => payload,
        Err(e) => return api_bad_request(e.to_string()),
    };
    match quick_add_slide_service(payload, repo.get_ref(), storage.get_ref(), &cache) {
        Ok(slide) => created(slide, "Resim başarıyla eklendi"),
        Err(err) => api_error(&err),
    }
}

#[derive(Deserialize)]
struct SliderIdQuery {
    slug: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SliderIdResponse {
    success: bool,
    slider_id: i32,
}

#[get("/slider-id")]
pub async fn slider_id(
    query: web::Query<SliderIdQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let slug = query.slug.as_deref().unwrap_or(crate::HOME_HERO_SLIDER);
    match slider_id_by_slug(slug, repo.get_ref()) {
        Ok(id) => HttpResponse::Ok().json(SliderIdResponse {
            success: true,
            slider_id: id.get(),
        }),
        Err(ServiceError::NotFound) => {
            HttpResponse::NotFound().json(ApiResponse::error("Slider bulunamadı"))
        }
        Err(err) => api_error(&err),
    }
}

#[get("/contact-settings")]
pub async fn get_contact_settings(repo: web::Data<DieselRepository>) -> impl Responder {
    match get_contact(repo.get_ref()) {
        Ok(contact) => cached_ok(contact, PUBLIC_CACHE),
        Err(err) => api_error(&err),
    }
}

#[put("/contact-settings")]
pub async fn put_contact_settings(
    _admin: AdminUser,
    form: web::Json<ContactSettingsForm>,
    repo: web::Data<DieselRepository>,
    cache: web::Data<PageCache>,
) -> impl Responder {
    let settings = match ContactSettings::try_from(form.into_inner()) {
        Ok(settings) => settings,
        Err(e) => return api_bad_request(e.to_string()),
    };
    match save_contact(&settings, repo.get_ref(), &cache) {
        Ok(()) => saved("İletişim bilgileri güncellendi"),
        Err(err) => api_error(&err),
    }
}

#[get("/faq")]
pub async fn get_faqs(repo: web::Data<DieselRepository>) -> impl Responder {
    match list_faqs(true, repo.get_ref()) {
        Ok(faqs) => cached_ok(faqs, PUBLIC_CACHE),
        Err(err) => api_error(&err),
    }
}

#[post("/faq")]
pub async fn create_faq(
    _admin: AdminUser,
    form: web::Json<FaqForm>,
    repo: web::Data<DieselRepository>,
    cache: web::Data<PageCache>,
) -> impl Responder {
    let mut payload = match FaqPayload::try_from(form.into_inner()) {
        Ok(payload) => payload,
        Err(e) => return api_bad_request(e.to_string()),
    };
    payload.id = None;
    match save_faq(&payload, repo.get_ref(), &cache) {
        Ok(faq) => created(faq, "SSS oluşturuldu"),
        Err(err) => api_error(&err),
    }
}

#[put("/faq")]
pub async fn update_faq(
    _admin: AdminUser,
    form: web::Json<FaqForm>,
    repo: web::Data<DieselRepository>,
    cache: web::Data<PageCache>,
) -> impl Responder {
    let payload = match FaqPayload::try_from(form.into_inner()) {
        Ok(payload) => payload,
        Err(e) => return api_bad_request(e.to_string()),
    };
    if payload.id.is_none() {
        return api_bad_request("SSS ID gerekli");
    }
    match save_faq(&payload, repo.get_ref(), &cache) {
        Ok(faq) => api_ok(faq),
        Err(err) => api_error(&err),
    }
}

#[delete("/faq")]
pub async fn delete_faq(
    _admin: AdminUser,
    query: web::Query<IdQuery>,
    repo: web::Data<DieselRepository>,
    cache: web::Data<PageCache>,
) -> impl Responder {
    let Some(id) = query.id.and_then(|id| FaqId::new(id).ok()) else {
        return api_bad_request("SSS ID gerekli");
    };
    match delete_faq_service(id, repo.get_ref(), &cache) {
        Ok(()) => saved("SSS silindi"),
        Err(err) => api_error(&err),
    }
}

#[get("/footer-links")]
pub async fn get_footer_links(repo: web::Data<DieselRepository>) -> impl Responder {
    match get_footer_links_service(repo.get_ref()) {
        Ok(links) => cached_ok(links, PUBLIC_CACHE),
        Err(err) => api_error(&err),
    }
}

#[put("/footer-links")]
pub async fn put_footer_links(
    _admin: AdminUser,
    form: web::Json<FooterLinksForm>,
    repo: web::Data<DieselRepository>,
    cache: web::Data<PageCache>,
) -> impl Responder {
    let links = FooterLinks::from(form.into_inner());
    match save_footer_links(&links, repo.get_ref(), &cache) {
        Ok(()) => saved("Footer bağlantıları güncellendi"),
        Err(err) => api_error(&err),
    }
}

#[get("/prefooter-banner")]
pub async fn get_prefooter_banner(repo: web::Data<DieselRepository>) -> impl Responder {
    match get_prefooter_banner_service(repo.get_ref()) {
        Ok(banner) => cached_ok(banner, BANNER_CACHE),
        Err(err) => api_error(&err),
    }
}

#[put("/prefooter-banner")]
pub async fn put_prefooter_banner(
    _admin: AdminUser,
    form: web::Json<PrefooterBannerForm>,
    repo: web::Data<DieselRepository>,
    cache: web::Data<PageCache>,
) -> impl Responder {
    let banner = match PrefooterBanner::try_from(form.into_inner()) {
        Ok(banner) => banner,
        Err(e) => return api_bad_request(e.to_string()),
    };
    match save_prefooter_banner(&banner, repo.get_ref(), &cache) {
        Ok(()) => saved("Banner güncellendi"),
        Err(err) => api_error(&err),
    }
}

#[post("/credit-applications")]
pub async fn create_credit_application(
    req: HttpRequest,
    form: web::Json<CreditApplicationForm>,
    repo: web::Data<DieselRepository>,
    limiter: web::Data<RateLimiter>,
) -> impl Responder {
    let application = match NewCreditApplication::try_from(form.into_inner()) {
        Ok(application) => application,
        Err(e) => return api_bad_request(e.to_string()),
    };
    match submit_credit_application(&application, &client_key(&req), &limiter, repo.get_ref()) {
        Ok(created_application) => {
            created(created_application, "Kredi başvurunuz başarıyla alındı")
        }
        Err(err) => api_error(&err),
    }
}

#[get("/credit-applications")]
pub async fn list_credit_applications(
    _admin: AdminUser,
    query: web::Query<PageQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match list_credit_applications_service(&query, repo.get_ref()) {
        Ok((info, items)) => HttpResponse::Ok().json(ApiResponse::paginated(items, info)),
        Err(err) => api_error(&err),
    }
}

#[post("/test-drive-requests")]
pub async fn create_test_drive_request(
    req: HttpRequest,
    form: web::Json<TestDriveRequestForm>,
    repo: web::Data<DieselRepository>,
    limiter: web::Data<RateLimiter>,
) -> impl Responder {
    let request = match NewTestDriveRequest::try_from(form.into_inner()) {
        Ok(request) => request,
        Err(e) => return api_bad_request(e.to_string()),
    };
    match submit_test_drive_request(&request, &client_key(&req), &limiter, repo.get_ref()) {
        Ok(created_request) => created(created_request, "Test sürüşü talebiniz alındı"),
        Err(err) => api_error(&err),
    }
}

#[get("/test-drive-requests")]
pub async fn list_test_drive_requests(
    _admin: AdminUser,
    query: web::Query<PageQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match list_test_drive_requests_service(&query, repo.get_ref()) {
        Ok((info, items)) => HttpResponse::Ok().json(ApiResponse::paginated(items, info)),
        Err(err) => api_error(&err),
    }
}
