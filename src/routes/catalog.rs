use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder, get, web};
use tera::Tera;

use crate::cache::{CacheTag, PageCache, layout_tags};
use crate::forms::catalog::CatalogQuery;
use crate::repository::DieselRepository;
use crate::routes::{error_page, public_context, render_body, render_template, serve_cached};
use crate::services::ServiceError;
use crate::services::catalog::{list_catalog, show_motorcycle};
use crate::services::content::layout;
use crate::storage::ImageUrlResolver;

#[get("/modeller")]
pub async fn list_models(
    req: HttpRequest,
    query: web::Query<CatalogQuery>,
    repo: web::Data<DieselRepository>,
    urls: web::Data<ImageUrlResolver>,
    cache: web::Data<PageCache>,
    tera: web::Data<Tera>,
) -> impl Responder {
    serve_cached(&req, &cache, || {
        let layout = layout(repo.get_ref());
        let catalog = list_catalog(&query, repo.get_ref(), &urls)
            .map_err(|_| error_page(&tera, &layout, StatusCode::INTERNAL_SERVER_ERROR))?;

        let mut context = public_context(&layout, "models");
        context.insert("catalog", &catalog);
        let body = render_body(&tera, "catalog/index.html", &context)?;

        let mut tags = layout_tags();
        tags.push(CacheTag::MotorsList);
        tags.extend(catalog.brands.iter().map(|b| CacheTag::Brand(b.id)));
        Ok((body, tags))
    })
}

#[get("/modeller/{slug}")]
pub async fn show_model(
    req: HttpRequest,
    slug: web::Path<String>,
    repo: web::Data<DieselRepository>,
    urls: web::Data<ImageUrlResolver>,
    cache: web::Data<PageCache>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let key = req.uri().to_string();
    if let Some(body) = cache.get(&key) {
        return HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body);
    }

    let layout = layout(repo.get_ref());
    let view = match show_motorcycle(&slug, repo.get_ref(), &urls) {
        Ok(view) => view,
        Err(ServiceError::NotFound) => {
            return error_page(&tera, &layout, StatusCode::NOT_FOUND);
        }
        Err(err) => {
            log::error!("Failed to render motorcycle page {slug}: {err}");
            return error_page(&tera, &layout, StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let mut context = public_context(&layout, "models");
    context.insert("detail", &view);

    // A page with missing sections is served but not cached.
    if !view.degraded_sections.is_empty() {
        return render_template(&tera, "catalog/show.html", &context);
    }

    match render_body(&tera, "catalog/show.html", &context) {
        Ok(body) => {
            let mut tags = layout_tags();
            tags.extend([
                CacheTag::Motor(view.motorcycle.slug.clone()),
                CacheTag::Brand(view.brand_id),
                CacheTag::MotorsList,
            ]);
            cache.insert(key, body.clone(), tags);
            HttpResponse::Ok()
                .content_type("text/html; charset=utf-8")
                .body(body)
        }
        Err(response) => response,
    }
}
