use actix_identity::Identity;
use actix_web::{HttpMessage, HttpRequest, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::Tera;

use crate::forms::auth::LoginForm;
use crate::models::auth::ADMIN_IDENTITY;
use crate::models::config::ServerConfig;
use crate::routes::{base_context, redirect, render_template};
use crate::services::auth::verify_admin_password;

#[derive(Deserialize)]
struct LoginPageQuery {
    next: Option<String>,
}

/// Attaches the admin identity to the session of `req`.
pub fn establish_session(req: &HttpRequest) -> bool {
    match Identity::login(&req.extensions(), ADMIN_IDENTITY.to_string()) {
        Ok(_) => true,
        Err(e) => {
            log::error!("Failed to attach admin identity: {e}");
            false
        }
    }
}

#[get("/admin-login")]
pub async fn login_page(
    query: web::Query<LoginPageQuery>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(&flash_messages, "login");
    context.insert("next", &query.next);
    render_template(&tera, "auth/login.html", &context)
}

#[post("/admin-login")]
pub async fn login(
    req: HttpRequest,
    form: web::Form<LoginForm>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let form = form.into_inner();
    match verify_admin_password(&form, &server_config.admin_password, &server_config.secret) {
        Ok(()) if establish_session(&req) => {
            log::info!("Admin signed in");
            redirect(form.redirect_target())
        }
        Ok(()) => {
            FlashMessage::error("Oturum açılamadı").send();
            redirect("/admin-login")
        }
        Err(_) => {
            FlashMessage::error("Yanlış şifre").send();
            redirect("/admin-login")
        }
    }
}

#[post("/admin/logout")]
pub async fn logout(identity: Option<Identity>) -> impl Responder {
    if let Some(identity) = identity {
        identity.logout();
    }
    redirect("/")
}
