use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::{Context, Tera};

use crate::cache::PageCache;
use crate::domain::slider::{NewSlider, SliderSettings};
use crate::domain::types::{SlideId, SliderId};
use crate::forms::slides::{
    QuickSlideMultipartForm, QuickSlidePayload, SlideFormPayload, SlideMultipartForm,
    SlideReorderForm, SliderForm, SliderSettingsForm,
};
use crate::models::auth::AdminUser;
use crate::repository::DieselRepository;
use crate::routes::{
    api_bad_request, api_error, api_ok, base_context, redirect, render_template, user_message,
};
use crate::services::ServiceError;
use crate::services::slider::{
    create_slide as create_slide_service, create_slider as create_slider_service,
    delete_slide as delete_slide_service, list_sliders as list_sliders_service, load_slide,
    quick_add_slide, reorder_slides as reorder_slides_service, show_slider as show_slider_service,
    update_slide as update_slide_service, update_slider_settings,
};
use crate::storage::{ImageUrlResolver, LocalStorage};

const SLIDERS_URL: &str = "/admin/slider";

fn slider_url(id: SliderId) -> String {
    format!("{SLIDERS_URL}/{id}")
}

fn slider_context(
    flash_messages: &IncomingFlashMessages,
    id: SliderId,
    repo: &DieselRepository,
    urls: &ImageUrlResolver,
) -> Result<Context, HttpResponse> {
    match show_slider_service(id, repo, urls) {
        Ok(view) => {
            let mut context = base_context(flash_messages, "slider");
            context.insert("view", &view);
            Ok(context)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Slider bulunamadı").send();
            Err(redirect(SLIDERS_URL))
        }
        Err(err) => {
            log::error!("Failed to load slider {id}: {err}");
            Err(HttpResponse::InternalServerError().finish())
        }
    }
}

#[get("/admin/slider")]
pub async fn list_sliders(
    _admin: AdminUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match list_sliders_service(repo.get_ref()) {
        Ok(sliders) => {
            let mut context = base_context(&flash_messages, "slider");
            context.insert("sliders", &sliders);
            render_template(&tera, "admin/slider/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to render sliders: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/admin/slider")]
pub async fn create_slider(
    _admin: AdminUser,
    form: web::Form<SliderForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let slider = match NewSlider::try_from(form.into_inner()) {
        Ok(slider) => slider,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect(SLIDERS_URL);
        }
    };
    match create_slider_service(&slider, repo.get_ref()) {
        Ok(created) => {
            FlashMessage::success(format!("{} oluşturuldu", created.name)).send();
            redirect(&slider_url(created.id))
        }
        Err(err) => {
            FlashMessage::error(user_message(&err)).send();
            redirect(SLIDERS_URL)
        }
    }
}

#[get("/admin/slider/add-images")]
pub async fn add_images_page(
    _admin: AdminUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match list_sliders_service(repo.get_ref()) {
        Ok(sliders) => {
            let mut context = base_context(&flash_messages, "slider");
            context.insert("sliders", &sliders);
            render_template(&tera, "admin/slider/add_images.html", &context)
        }
        Err(err) => {
            log::error!("Failed to render quick slide form: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/admin/slider/add-images")]
pub async fn add_images(
    _admin: AdminUser,
    MultipartForm(form): MultipartForm<QuickSlideMultipartForm>,
    repo: web::Data<DieselRepository>,
    storage: web::Data<LocalStorage>,
    cache: web::Data<PageCache>,
) -> impl Responder {
    let back = format!("{SLIDERS_URL}/add-images");
    let payload = match QuickSlidePayload::try_from(form) {
        Ok(payload) => payload,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect(&back);
        }
    };
    match quick_add_slide(payload, repo.get_ref(), storage.get_ref(), &cache) {
        Ok(slide) => {
            FlashMessage::success("Resim slider'a eklendi").send();
            redirect(&slider_url(slide.slider_id))
        }
        Err(err) => {
            FlashMessage::error(user_message(&err)).send();
            redirect(&back)
        }
    }
}

#[get("/admin/slider/{id}")]
pub async fn show_slider(
    _admin: AdminUser,
    id: web::Path<i32>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    urls: web::Data<ImageUrlResolver>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let Ok(id) = SliderId::new(id.into_inner()) else {
        return HttpResponse::NotFound().finish();
    };
    match slider_context(&flash_messages, id, &repo, &urls) {
        Ok(context) => render_template(&tera, "admin/slider/show.html", &context),
        Err(response) => response,
    }
}

#[post("/admin/slider/{id}/settings")]
pub async fn save_settings(
    _admin: AdminUser,
    id: web::Path<i32>,
    form: web::Form<SliderSettingsForm>,
    repo: web::Data<DieselRepository>,
    cache: web::Data<PageCache>,
) -> impl Responder {
    let Ok(id) = SliderId::new(id.into_inner()) else {
        return HttpResponse::NotFound().finish();
    };
    let back = slider_url(id);
    let settings = match SliderSettings::try_from(form.into_inner()) {
        Ok(settings) => settings,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect(&back);
        }
    };
    match update_slider_settings(id, &settings, repo.get_ref(), &cache) {
        Ok(()) => FlashMessage::success("Slider ayarları kaydedildi").send(),
        Err(err) => FlashMessage::error(user_message(&err)).send(),
    }
    redirect(&back)
}

/// Drag-and-drop order of the slides; answers JSON.
#[post("/admin/slider/{id}/reorder")]
pub async fn reorder_slides(
    _admin: AdminUser,
    id: web::Path<i32>,
    form: web::Form<SlideReorderForm>,
    repo: web::Data<DieselRepository>,
    cache: web::Data<PageCache>,
) -> impl Responder {
    let Ok(id) = SliderId::new(id.into_inner()) else {
        return api_error(&ServiceError::NotFound);
    };
    let ids = match Vec::<SlideId>::try_from(form.into_inner()) {
        Ok(ids) => ids,
        Err(e) => return api_bad_request(e.to_string()),
    };
    match reorder_slides_service(id, &ids, repo.get_ref(), &cache) {
        Ok(()) => api_ok(ids.len()),
        Err(err) => api_error(&err),
    }
}

#[get("/admin/slider/{id}/slides/new")]
pub async fn new_slide(
    _admin: AdminUser,
    id: web::Path<i32>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    urls: web::Data<ImageUrlResolver>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let Ok(id) = SliderId::new(id.into_inner()) else {
        return HttpResponse::NotFound().finish();
    };
    match slider_context(&flash_messages, id, &repo, &urls) {
        Ok(context) => render_template(&tera, "admin/slider/slide_form.html", &context),
        Err(response) => response,
    }
}

#[post("/admin/slider/{id}/slides")]
pub async fn create_slide(
    _admin: AdminUser,
    id: web::Path<i32>,
    MultipartForm(form): MultipartForm<SlideMultipartForm>,
    repo: web::Data<DieselRepository>,
    storage: web::Data<LocalStorage>,
    cache: web::Data<PageCache>,
) -> impl Responder {
    let Ok(id) = SliderId::new(id.into_inner()) else {
        return HttpResponse::NotFound().finish();
    };
    let back = format!("{}/slides/new", slider_url(id));
    let payload = match SlideFormPayload::try_from(form) {
        Ok(payload) => payload,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect(&back);
        }
    };
    match create_slide_service(id, payload, repo.get_ref(), storage.get_ref(), &cache) {
        Ok(_) => {
            FlashMessage::success("Slayt eklendi").send();
            redirect(&slider_url(id))
        }
        Err(err) => {
            FlashMessage::error(user_message(&err)).send();
            redirect(&back)
        }
    }
}

#[get("/admin/slider/{id}/slides/{slide_id}/edit")]
pub async fn edit_slide(
    _admin: AdminUser,
    path: web::Path<(i32, i32)>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    urls: web::Data<ImageUrlResolver>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let (id, slide_id) = path.into_inner();
    let (Ok(id), Ok(slide_id)) = (SliderId::new(id), SlideId::new(slide_id)) else {
        return HttpResponse::NotFound().finish();
    };
    let mut context = match slider_context(&flash_messages, id, &repo, &urls) {
        Ok(context) => context,
        Err(response) => return response,
    };
    match load_slide(id, slide_id, repo.get_ref(), &urls) {
        Ok(slide) => {
            context.insert("slide", &slide);
            render_template(&tera, "admin/slider/slide_form.html", &context)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Slayt bulunamadı").send();
            redirect(&slider_url(id))
        }
        Err(err) => {
            log::error!("Failed to load slide {slide_id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/admin/slider/{id}/slides/{slide_id}")]
pub async fn update_slide(
    _admin: AdminUser,
    path: web::Path<(i32, i32)>,
    MultipartForm(form): MultipartForm<SlideMultipartForm>,
    repo: web::Data<DieselRepository>,
    storage: web::Data<LocalStorage>,
    cache: web::Data<PageCache>,
) -> impl Responder {
    let (id, slide_id) = path.into_inner();
    let (Ok(id), Ok(slide_id)) = (SliderId::new(id), SlideId::new(slide_id)) else {
        return HttpResponse::NotFound().finish();
    };
    let back = format!("{}/slides/{slide_id}/edit", slider_url(id));
    let payload = match SlideFormPayload::try_from(form) {
        Ok(payload) => payload,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect(&back);
        }
    };
    match update_slide_service(id, slide_id, payload, repo.get_ref(), storage.get_ref(), &cache) {
        Ok(_) => {
            FlashMessage::success("Slayt güncellendi").send();
            redirect(&slider_url(id))
        }
        Err(err) => {
            FlashMessage::error(user_message(&err)).send();
            redirect(&back)
        }
    }
}

#[post("/admin/slider/{id}/slides/{slide_id}/delete")]
pub async fn delete_slide(
    _admin: AdminUser,
    path: web::Path<(i32, i32)>,
    repo: web::Data<DieselRepository>,
    storage: web::Data<LocalStorage>,
    cache: web::Data<PageCache>,
) -> impl Responder {
    let (id, slide_id) = path.into_inner();
    let (Ok(id), Ok(slide_id)) = (SliderId::new(id), SlideId::new(slide_id)) else {
        return HttpResponse::NotFound().finish();
    };
    match delete_slide_service(id, slide_id, repo.get_ref(), storage.get_ref(), &cache) {
        Ok(leftovers) if leftovers.is_empty() => FlashMessage::success("Slayt silindi").send(),
        Ok(_) => FlashMessage::warning("Slayt silindi, görsel depodan kaldırılamadı").send(),
        Err(err) => FlashMessage::error(user_message(&err)).send(),
    }
    redirect(&slider_url(id))
}
