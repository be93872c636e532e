use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use chrono::Utc;
use tera::{Context, Tera};

use crate::HOME_HERO_SLIDER;
use crate::cache::{CacheTag, PageCache, layout_tags};
use crate::domain::lead::{NewCreditApplication, NewTestDriveRequest};
use crate::dto::catalog::MotorcycleCard;
use crate::dto::content::LayoutView;
use crate::forms::catalog::CatalogQuery;
use crate::forms::leads::{CreditApplicationForm, TestDriveRequestForm};
use crate::rate_limit::RateLimiter;
use crate::repository::DieselRepository;
use crate::routes::{
    alert_level_to_str, client_key, error_page, public_context, redirect, render_body,
    render_template, serve_cached, user_message,
};
use crate::services::catalog::{list_catalog, list_featured};
use crate::services::content::{layout, list_faqs};
use crate::services::leads::{submit_credit_application, submit_test_drive_request};
use crate::services::slider::home_hero;
use crate::storage::ImageUrlResolver;

#[get("/")]
pub async fn index(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    urls: web::Data<ImageUrlResolver>,
    cache: web::Data<PageCache>,
    tera: web::Data<Tera>,
) -> impl Responder {
    serve_cached(&req, &cache, || {
        let layout = layout(repo.get_ref());
        let now = Utc::now().naive_utc();

        let hero = home_hero(repo.get_ref(), &urls, now)
            .map_err(|_| error_page(&tera, &layout, StatusCode::INTERNAL_SERVER_ERROR))?;
        let featured = list_featured(repo.get_ref(), &urls)
            .map_err(|_| error_page(&tera, &layout, StatusCode::INTERNAL_SERVER_ERROR))?;
        let faqs = list_faqs(true, repo.get_ref()).unwrap_or_else(|e| {
            log::warn!("Failed to load faqs for home page: {e}");
            vec![]
        });

        let mut context = public_context(&layout, "index");
        context.insert("hero", &hero);
        context.insert("featured", &featured);
        context.insert("faqs", &faqs);
        let body = render_body(&tera, "main/index.html", &context)?;

        let mut tags = layout_tags();
        tags.extend([
            CacheTag::Slider(HOME_HERO_SLIDER.to_string()),
            CacheTag::HomeFeatured,
            CacheTag::MotorsList,
            CacheTag::Faq,
        ]);
        Ok((body, tags))
    })
}

fn static_page(
    req: &HttpRequest,
    repo: &DieselRepository,
    cache: &PageCache,
    tera: &Tera,
    template: &str,
    current_page: &str,
    with_faqs: bool,
) -> HttpResponse {
    serve_cached(req, cache, || {
        let layout = layout(repo);
        let mut context = public_context(&layout, current_page);
        let mut tags = layout_tags();
        if with_faqs {
            let faqs = list_faqs(true, repo).unwrap_or_else(|e| {
                log::warn!("Failed to load faqs for {current_page}: {e}");
                vec![]
            });
            context.insert("faqs", &faqs);
            tags.push(CacheTag::Faq);
        }
        let body = render_body(tera, template, &context)?;
        Ok((body, tags))
    })
}

#[get("/hakkimizda")]
pub async fn about(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    cache: web::Data<PageCache>,
    tera: web::Data<Tera>,
) -> impl Responder {
    static_page(&req, &repo, &cache, &tera, "main/about.html", "about", false)
}

#[get("/iletisim")]
pub async fn contact(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    cache: web::Data<PageCache>,
    tera: web::Data<Tera>,
) -> impl Responder {
    static_page(&req, &repo, &cache, &tera, "main/contact.html", "contact", true)
}

#[get("/senetli-satis")]
pub async fn promissory_sales(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    cache: web::Data<PageCache>,
    tera: web::Data<Tera>,
) -> impl Responder {
    static_page(
        &req,
        &repo,
        &cache,
        &tera,
        "main/promissory_sales.html",
        "promissory_sales",
        false,
    )
}

#[get("/servis")]
pub async fn service(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    cache: web::Data<PageCache>,
    tera: web::Data<Tera>,
) -> impl Responder {
    static_page(&req, &repo, &cache, &tera, "main/service.html", "service", false)
}

/// Lead form pages are not cached: they carry flash alerts.
fn lead_form_context(
    flash_messages: &IncomingFlashMessages,
    layout: &LayoutView,
    current_page: &str,
    models: &[MotorcycleCard],
) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();
    let mut context = public_context(layout, current_page);
    context.insert("alerts", &alerts);
    context.insert("models", models);
    context
}

fn published_models(repo: &DieselRepository, urls: &ImageUrlResolver) -> Vec<MotorcycleCard> {
    match list_catalog(&CatalogQuery::default(), repo, urls) {
        Ok(view) => view.motorcycles,
        Err(e) => {
            log::warn!("Failed to load models for lead form: {e}");
            vec![]
        }
    }
}

#[get("/kredi")]
pub async fn credit(
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    urls: web::Data<ImageUrlResolver>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let layout = layout(repo.get_ref());
    let models = published_models(&repo, &urls);
    let context = lead_form_context(&flash_messages, &layout, "credit", &models);
    render_template(&tera, "main/credit.html", &context)
}

#[post("/kredi")]
pub async fn submit_credit(
    req: HttpRequest,
    form: web::Form<CreditApplicationForm>,
    repo: web::Data<DieselRepository>,
    limiter: web::Data<RateLimiter>,
) -> impl Responder {
    let application = match NewCreditApplication::try_from(form.into_inner()) {
        Ok(application) => application,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect("/kredi");
        }
    };
    match submit_credit_application(&application, &client_key(&req), &limiter, repo.get_ref()) {
        Ok(_) => FlashMessage::success("Kredi başvurunuz başarıyla alındı").send(),
        Err(e) => FlashMessage::error(user_message(&e)).send(),
    }
    redirect("/kredi")
}

#[get("/test-surusu")]
pub async fn test_drive(
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    urls: web::Data<ImageUrlResolver>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let layout = layout(repo.get_ref());
    let models = published_models(&repo, &urls);
    let context = lead_form_context(&flash_messages, &layout, "test_drive", &models);
    render_template(&tera, "main/test_drive.html", &context)
}

#[post("/test-surusu")]
pub async fn submit_test_drive(
    req: HttpRequest,
    form: web::Form<TestDriveRequestForm>,
    repo: web::Data<DieselRepository>,
    limiter: web::Data<RateLimiter>,
) -> impl Responder {
    let request = match NewTestDriveRequest::try_from(form.into_inner()) {
        Ok(request) => request,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect("/test-surusu");
        }
    };
    match submit_test_drive_request(&request, &client_key(&req), &limiter, repo.get_ref()) {
        Ok(_) => FlashMessage::success("Test sürüşü talebiniz alındı").send(),
        Err(e) => FlashMessage::error(user_message(&e)).send(),
    }
    redirect("/test-surusu")
}
