use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::cache::PageCache;
use crate::domain::motorcycle::NewSpecItem;
use crate::domain::types::{CategoryId, MotorcycleId, MotorcycleImageId};
use crate::forms::catalog::PageQuery;
use crate::forms::motorcycles::{
    CategoriesMultipartForm, ImageUploadForm, ImageUploadPayload, MotorcycleFormPayload,
    MotorcycleMultipartForm, ReorderForm, SpecItemsForm, ToggleForm,
};
use crate::models::auth::AdminUser;
use crate::repository::DieselRepository;
use crate::routes::{api_bad_request, api_error, api_ok, base_context, redirect, render_template, user_message};
use crate::services::ServiceError;
use crate::services::motorcycles::{
    create_motorcycle, delete_image as delete_image_service,
    delete_motorcycle as delete_motorcycle_service, list_motorcycles_admin, load_editor,
    reorder_images as reorder_images_service, replace_spec_items, set_categories,
    set_featured, set_primary_image as set_primary_image_service, set_published,
    update_motorcycle, upload_image as upload_image_service,
};
use crate::storage::{ImageUrlResolver, LocalStorage};

const MOTORS_URL: &str = "/admin/motors";

fn motor_url(id: MotorcycleId) -> String {
    format!("{MOTORS_URL}/{id}")
}

/// Flashes a failed action and redirects to `back`.
fn flash_failure(err: ServiceError, action: &str, back: &str) -> HttpResponse {
    match err {
        ServiceError::Internal => {
            log::error!("Failed to {action}");
            FlashMessage::error("İşlem sırasında bir hata oluştu").send();
        }
        ServiceError::NotFound => {
            FlashMessage::error("Motosiklet bulunamadı").send();
            return redirect(MOTORS_URL);
        }
        other => FlashMessage::error(user_message(&other)).send(),
    }
    redirect(back)
}

#[get("/admin/motors")]
pub async fn list_motors(
    _admin: AdminUser,
    query: web::Query<PageQuery>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    urls: web::Data<ImageUrlResolver>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match list_motorcycles_admin(&query, repo.get_ref(), &urls) {
        Ok((page, motorcycles)) => {
            let mut context = base_context(&flash_messages, "motors");
            context.insert("page", &page);
            context.insert("motorcycles", &motorcycles);
            context.insert("search", &query.search);
            render_template(&tera, "admin/motors/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to render motorcycle list: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/admin/motors/new")]
pub async fn new_motor(
    _admin: AdminUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    urls: web::Data<ImageUrlResolver>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match load_editor(None, repo.get_ref(), &urls) {
        Ok(editor) => {
            let mut context = base_context(&flash_messages, "motors");
            context.insert("editor", &editor);
            render_template(&tera, "admin/motors/form.html", &context)
        }
        Err(err) => {
            log::error!("Failed to render motorcycle form: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/admin/motors")]
pub async fn create_motor(
    _admin: AdminUser,
    MultipartForm(form): MultipartForm<MotorcycleMultipartForm>,
    repo: web::Data<DieselRepository>,
    storage: web::Data<LocalStorage>,
    cache: web::Data<PageCache>,
) -> impl Responder {
    let back = format!("{MOTORS_URL}/new");
    let payload = match MotorcycleFormPayload::try_from(form) {
        Ok(payload) => payload,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect(&back);
        }
    };
    match create_motorcycle(payload, repo.get_ref(), storage.get_ref(), &cache) {
        Ok(motorcycle) => {
            FlashMessage::success("Motor başarıyla oluşturuldu").send();
            redirect(&motor_url(motorcycle.id))
        }
        Err(err) => flash_failure(err, "create motorcycle", &back),
    }
}

async fn render_editor(
    raw_id: i32,
    template: &str,
    flash_messages: &IncomingFlashMessages,
    repo: &DieselRepository,
    urls: &ImageUrlResolver,
    tera: &Tera,
) -> HttpResponse {
    let Ok(id) = MotorcycleId::new(raw_id) else {
        return HttpResponse::NotFound().finish();
    };
    match load_editor(Some(id), repo, urls) {
        Ok(editor) => {
            let mut context = base_context(flash_messages, "motors");
            context.insert("editor", &editor);
            render_template(tera, template, &context)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Motosiklet bulunamadı").send();
            redirect(MOTORS_URL)
        }
        Err(err) => {
            log::error!("Failed to render motorcycle {raw_id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/admin/motors/{id}")]
pub async fn show_motor(
    _admin: AdminUser,
    id: web::Path<i32>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    urls: web::Data<ImageUrlResolver>,
    tera: web::Data<Tera>,
) -> impl Responder {
    render_editor(
        id.into_inner(),
        "admin/motors/show.html",
        &flash_messages,
        &repo,
        &urls,
        &tera,
    )
    .await
}

#[get("/admin/motors/{id}/edit")]
pub async fn edit_motor(
    _admin: AdminUser,
    id: web::Path<i32>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    urls: web::Data<ImageUrlResolver>,
    tera: web::Data<Tera>,
) -> impl Responder {
    render_editor(
        id.into_inner(),
        "admin/motors/form.html",
        &flash_messages,
        &repo,
        &urls,
        &tera,
    )
    .await
}

#[post("/admin/motors/{id}")]
pub async fn update_motor(
    _admin: AdminUser,
    id: web::Path<i32>,
    MultipartForm(form): MultipartForm<MotorcycleMultipartForm>,
    repo: web::Data<DieselRepository>,
    storage: web::Data<LocalStorage>,
    cache: web::Data<PageCache>,
) -> impl Responder {
    let Ok(id) = MotorcycleId::new(id.into_inner()) else {
        return HttpResponse::NotFound().finish();
    };
    let back = format!("{}/edit", motor_url(id));
    let payload = match MotorcycleFormPayload::try_from(form) {
        Ok(payload) => payload,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect(&back);
        }
    };
    match update_motorcycle(id, payload, repo.get_ref(), storage.get_ref(), &cache) {
        Ok(_) => {
            FlashMessage::success("Motor başarıyla güncellendi").send();
            redirect(&motor_url(id))
        }
        Err(err) => flash_failure(err, "update motorcycle", &back),
    }
}

#[post("/admin/motors/{id}/delete")]
pub async fn delete_motor(
    _admin: AdminUser,
    id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    storage: web::Data<LocalStorage>,
    cache: web::Data<PageCache>,
) -> impl Responder {
    let Ok(id) = MotorcycleId::new(id.into_inner()) else {
        return HttpResponse::NotFound().finish();
    };
    match delete_motorcycle_service(id, repo.get_ref(), storage.get_ref(), &cache) {
        Ok(leftovers) if leftovers.is_empty() => {
            FlashMessage::success("Motor silindi").send();
            redirect(MOTORS_URL)
        }
        Ok(leftovers) => {
            FlashMessage::warning(format!(
                "Motor silindi, {} görsel depodan kaldırılamadı",
                leftovers.len()
            ))
            .send();
            redirect(MOTORS_URL)
        }
        Err(err) => flash_failure(err, "delete motorcycle", &motor_url(id)),
    }
}

#[post("/admin/motors/{id}/published")]
pub async fn toggle_published(
    _admin: AdminUser,
    id: web::Path<i32>,
    form: web::Form<ToggleForm>,
    repo: web::Data<DieselRepository>,
    cache: web::Data<PageCache>,
) -> impl Responder {
    let Ok(id) = MotorcycleId::new(id.into_inner()) else {
        return HttpResponse::NotFound().finish();
    };
    match set_published(id, form.enabled(), repo.get_ref(), &cache) {
        Ok(motorcycle) if motorcycle.is_published => {
            FlashMessage::success("Motor yayınlandı").send();
            redirect(MOTORS_URL)
        }
        Ok(_) => {
            FlashMessage::success("Motor yayından kaldırıldı").send();
            redirect(MOTORS_URL)
        }
        Err(err) => flash_failure(err, "toggle published", MOTORS_URL),
    }
}

#[post("/admin/motors/{id}/featured")]
pub async fn toggle_featured(
    _admin: AdminUser,
    id: web::Path<i32>,
    form: web::Form<ToggleForm>,
    repo: web::Data<DieselRepository>,
    cache: web::Data<PageCache>,
) -> impl Responder {
    let Ok(id) = MotorcycleId::new(id.into_inner()) else {
        return HttpResponse::NotFound().finish();
    };
    match set_featured(id, form.enabled(), repo.get_ref(), &cache) {
        Ok(motorcycle) if motorcycle.is_featured => {
            FlashMessage::success("Motor öne çıkarıldı").send();
            redirect(MOTORS_URL)
        }
        Ok(_) => {
            FlashMessage::success("Motor öne çıkanlardan kaldırıldı").send();
            redirect(MOTORS_URL)
        }
        Err(err) => flash_failure(err, "toggle featured", MOTORS_URL),
    }
}

#[post("/admin/motors/{id}/images")]
pub async fn upload_image(
    _admin: AdminUser,
    id: web::Path<i32>,
    MultipartForm(form): MultipartForm<ImageUploadForm>,
    repo: web::Data<DieselRepository>,
    storage: web::Data<LocalStorage>,
    cache: web::Data<PageCache>,
) -> impl Responder {
    let Ok(id) = MotorcycleId::new(id.into_inner()) else {
        return HttpResponse::NotFound().finish();
    };
    let back = motor_url(id);
    let payload = match ImageUploadPayload::try_from(form) {
        Ok(payload) => payload,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect(&back);
        }
    };
    match upload_image_service(id, payload, repo.get_ref(), storage.get_ref(), &cache) {
        Ok(_) => {
            FlashMessage::success("Görsel yüklendi").send();
            redirect(&back)
        }
        Err(err) => flash_failure(err, "upload motorcycle image", &back),
    }
}

/// Called by the drag-and-drop list; answers JSON.
#[post("/admin/motors/{id}/images/reorder")]
pub async fn reorder_images(
    _admin: AdminUser,
    id: web::Path<i32>,
    form: web::Form<ReorderForm>,
    repo: web::Data<DieselRepository>,
    cache: web::Data<PageCache>,
) -> impl Responder {
    let Ok(id) = MotorcycleId::new(id.into_inner()) else {
        return api_error(&ServiceError::NotFound);
    };
    let ids = match Vec::<MotorcycleImageId>::try_from(form.into_inner()) {
        Ok(ids) => ids,
        Err(e) => return api_bad_request(e.to_string()),
    };
    match reorder_images_service(id, &ids, repo.get_ref(), &cache) {
        Ok(()) => api_ok(ids.len()),
        Err(err) => api_error(&err),
    }
}

#[post("/admin/motors/{id}/images/{image_id}/primary")]
pub async fn set_primary_image(
    _admin: AdminUser,
    path: web::Path<(i32, i32)>,
    repo: web::Data<DieselRepository>,
    cache: web::Data<PageCache>,
) -> impl Responder {
    let (id, image_id) = path.into_inner();
    let (Ok(id), Ok(image_id)) = (MotorcycleId::new(id), MotorcycleImageId::new(image_id)) else {
        return HttpResponse::NotFound().finish();
    };
    let back = motor_url(id);
    match set_primary_image_service(id, image_id, repo.get_ref(), &cache) {
        Ok(()) => {
            FlashMessage::success("Ana görsel güncellendi").send();
            redirect(&back)
        }
        Err(err) => flash_failure(err, "set primary image", &back),
    }
}

#[post("/admin/motors/{id}/images/{image_id}/delete")]
pub async fn delete_image(
    _admin: AdminUser,
    path: web::Path<(i32, i32)>,
    repo: web::Data<DieselRepository>,
    storage: web::Data<LocalStorage>,
    cache: web::Data<PageCache>,
) -> impl Responder {
    let (id, image_id) = path.into_inner();
    let (Ok(id), Ok(image_id)) = (MotorcycleId::new(id), MotorcycleImageId::new(image_id)) else {
        return HttpResponse::NotFound().finish();
    };
    let back = motor_url(id);
    match delete_image_service(id, image_id, repo.get_ref(), storage.get_ref(), &cache) {
        Ok(leftovers) if leftovers.is_empty() => {
            FlashMessage::success("Görsel silindi").send();
            redirect(&back)
        }
        Ok(_) => {
            FlashMessage::warning("Görsel silindi, dosya depodan kaldırılamadı").send();
            redirect(&back)
        }
        Err(err) => flash_failure(err, "delete motorcycle image", &back),
    }
}

#[post("/admin/motors/{id}/specs")]
pub async fn save_specs(
    _admin: AdminUser,
    id: web::Path<i32>,
    form: web::Form<SpecItemsForm>,
    repo: web::Data<DieselRepository>,
    cache: web::Data<PageCache>,
) -> impl Responder {
    let Ok(id) = MotorcycleId::new(id.into_inner()) else {
        return HttpResponse::NotFound().finish();
    };
    let back = motor_url(id);
    let items = match Vec::<NewSpecItem>::try_from(form.into_inner()) {
        Ok(items) => items,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect(&back);
        }
    };
    match replace_spec_items(id, &items, repo.get_ref(), &cache) {
        Ok(count) => {
            FlashMessage::success(format!("{count} özellik kaydedildi")).send();
            redirect(&back)
        }
        Err(err) => flash_failure(err, "save spec items", &back),
    }
}

#[post("/admin/motors/{id}/categories")]
pub async fn save_categories(
    _admin: AdminUser,
    id: web::Path<i32>,
    MultipartForm(form): MultipartForm<CategoriesMultipartForm>,
    repo: web::Data<DieselRepository>,
    cache: web::Data<PageCache>,
) -> impl Responder {
    let Ok(id) = MotorcycleId::new(id.into_inner()) else {
        return HttpResponse::NotFound().finish();
    };
    let back = motor_url(id);
    let category_ids = match Vec::<CategoryId>::try_from(form) {
        Ok(ids) => ids,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect(&back);
        }
    };
    match set_categories(id, &category_ids, repo.get_ref(), &cache) {
        Ok(()) => {
            FlashMessage::success("Kategoriler güncellendi").send();
            redirect(&back)
        }
        Err(err) => flash_failure(err, "save categories", &back),
    }
}
