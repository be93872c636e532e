use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::cache::PageCache;
use crate::domain::category::NewCategory;
use crate::domain::types::{BrandId, CategoryId};
use crate::forms::brands::{BrandFormPayload, BrandMultipartForm, CategoryForm};
use crate::models::auth::AdminUser;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template, user_message};
use crate::services::ServiceError;
use crate::services::brands::{
    create_brand as create_brand_service, create_category as create_category_service,
    delete_brand as delete_brand_service, delete_category as delete_category_service,
    list_brands_admin, update_brand as update_brand_service,
};
use crate::storage::{ImageUrlResolver, LocalStorage};

const BRANDS_URL: &str = "/admin/brands";

fn flash_error(err: &ServiceError) {
    FlashMessage::error(user_message(err)).send();
}

#[get("/admin/brands")]
pub async fn list_brands(
    _admin: AdminUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    urls: web::Data<ImageUrlResolver>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match list_brands_admin(repo.get_ref(), &urls) {
        Ok(page) => {
            let mut context = base_context(&flash_messages, "brands");
            context.insert("brands", &page.brands);
            context.insert("categories", &page.categories);
            render_template(&tera, "admin/brands/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to render brands: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/admin/brands")]
pub async fn create_brand(
    _admin: AdminUser,
    MultipartForm(form): MultipartForm<BrandMultipartForm>,
    repo: web::Data<DieselRepository>,
    storage: web::Data<LocalStorage>,
    cache: web::Data<PageCache>,
) -> impl Responder {
    let payload = match BrandFormPayload::try_from(form) {
        Ok(payload) => payload,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect(BRANDS_URL);
        }
    };
    match create_brand_service(payload, repo.get_ref(), storage.get_ref(), &cache) {
        Ok(brand) => FlashMessage::success(format!("{} markası eklendi", brand.name)).send(),
        Err(err) => flash_error(&err),
    }
    redirect(BRANDS_URL)
}

#[post("/admin/brands/{id}")]
pub async fn update_brand(
    _admin: AdminUser,
    id: web::Path<i32>,
    MultipartForm(form): MultipartForm<BrandMultipartForm>,
    repo: web::Data<DieselRepository>,
    storage: web::Data<LocalStorage>,
    cache: web::Data<PageCache>,
) -> impl Responder {
    let Ok(id) = BrandId::new(id.into_inner()) else {
        return HttpResponse::NotFound().finish();
    };
    let payload = match BrandFormPayload::try_from(form) {
        Ok(payload) => payload,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect(BRANDS_URL);
        }
    };
    match update_brand_service(id, payload, repo.get_ref(), storage.get_ref(), &cache) {
        Ok(_) => FlashMessage::success("Marka güncellendi").send(),
        Err(err) => flash_error(&err),
    }
    redirect(BRANDS_URL)
}

#[post("/admin/brands/{id}/delete")]
pub async fn delete_brand(
    _admin: AdminUser,
    id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    storage: web::Data<LocalStorage>,
    cache: web::Data<PageCache>,
) -> impl Responder {
    let Ok(id) = BrandId::new(id.into_inner()) else {
        return HttpResponse::NotFound().finish();
    };
    match delete_brand_service(id, repo.get_ref(), storage.get_ref(), &cache) {
        Ok(()) => FlashMessage::success("Marka silindi").send(),
        Err(err) => flash_error(&err),
    }
    redirect(BRANDS_URL)
}

#[post("/admin/categories")]
pub async fn create_category(
    _admin: AdminUser,
    form: web::Form<CategoryForm>,
    repo: web::Data<DieselRepository>,
    cache: web::Data<PageCache>,
) -> impl Responder {
    let category = match NewCategory::try_from(form.into_inner()) {
        Ok(category) => category,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect(BRANDS_URL);
        }
    };
    match create_category_service(&category, repo.get_ref(), &cache) {
        Ok(created) => {
            FlashMessage::success(format!("{} kategorisi eklendi", created.name)).send()
        }
        Err(err) => flash_error(&err),
    }
    redirect(BRANDS_URL)
}

#[post("/admin/categories/{id}/delete")]
pub async fn delete_category(
    _admin: AdminUser,
    id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    cache: web::Data<PageCache>,
) -> impl Responder {
    let Ok(id) = CategoryId::new(id.into_inner()) else {
        return HttpResponse::NotFound().finish();
    };
    match delete_category_service(id, repo.get_ref(), &cache) {
        Ok(()) => FlashMessage::success("Kategori silindi").send(),
        Err(err) => flash_error(&err),
    }
    redirect(BRANDS_URL)
}
