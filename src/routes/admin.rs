use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::forms::catalog::PageQuery;
use crate::models::auth::AdminUser;
use crate::pagination::{PageInfo, Pagination};
use crate::repository::DieselRepository;
use crate::routes::{base_context, render_template};
use crate::services::leads::{list_credit_applications, list_test_drive_requests};
use crate::services::motorcycles::list_motorcycles_admin;
use crate::services::slider::list_sliders;
use crate::storage::ImageUrlResolver;

const RECENT_LEADS: usize = 5;

#[get("/admin")]
pub async fn dashboard(
    _admin: AdminUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    urls: web::Data<ImageUrlResolver>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let recent = PageQuery {
        page: Some(1),
        limit: Some(RECENT_LEADS),
        search: None,
    };

    let sliders = match list_sliders(repo.get_ref()) {
        Ok(sliders) => sliders,
        Err(err) => {
            log::error!("Failed to load dashboard sliders: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };
    let motorcycle_total = list_motorcycles_admin(&recent, repo.get_ref(), &urls)
        .map(|(info, _)| info.total)
        .unwrap_or_else(|err| {
            log::warn!("Failed to count motorcycles for dashboard: {err}");
            0
        });
    let credit = list_credit_applications(&recent, repo.get_ref()).unwrap_or_else(|err| {
        log::warn!("Failed to load recent credit applications: {err}");
        (PageInfo::new(Pagination::default(), 0), Vec::new())
    });
    let test_drives = list_test_drive_requests(&recent, repo.get_ref()).unwrap_or_else(|err| {
        log::warn!("Failed to load recent test drive requests: {err}");
        (PageInfo::new(Pagination::default(), 0), Vec::new())
    });

    let mut context = base_context(&flash_messages, "dashboard");
    context.insert("sliders", &sliders);
    context.insert("motorcycle_total", &motorcycle_total);
    context.insert("credit_total", &credit.0.total);
    context.insert("credit_applications", &credit.1);
    context.insert("test_drive_total", &test_drives.0.total);
    context.insert("test_drive_requests", &test_drives.1);
    render_template(&tera, "admin/dashboard.html", &context)
}

#[get("/admin/leads/credit")]
pub async fn credit_applications(
    _admin: AdminUser,
    query: web::Query<PageQuery>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match list_credit_applications(&query, repo.get_ref()) {
        Ok((page, items)) => {
            let mut context = base_context(&flash_messages, "leads_credit");
            context.insert("page", &page);
            context.insert("leads", &items);
            render_template(&tera, "admin/leads/credit.html", &context)
        }
        Err(err) => {
            log::error!("Failed to render credit applications: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/admin/leads/test-drive")]
pub async fn test_drive_requests(
    _admin: AdminUser,
    query: web::Query<PageQuery>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match list_test_drive_requests(&query, repo.get_ref()) {
        Ok((page, items)) => {
            let mut context = base_context(&flash_messages, "leads_test_drive");
            context.insert("page", &page);
            context.insert("leads", &items);
            render_template(&tera, "admin/leads/test_drive.html", &context)
        }
        Err(err) => {
            log::error!("Failed to render test drive requests: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
