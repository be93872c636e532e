//! Admin session extractor.

use std::future::{Ready, ready};

use actix_identity::IdentityExt;
use actix_web::http::StatusCode;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError, dev::Payload};
use serde::Serialize;

/// Identity stored in the session once the admin password has been verified.
pub const ADMIN_IDENTITY: &str = "admin";

/// Proof that the request carries an authenticated admin session.
#[derive(Debug, Clone, Serialize)]
pub struct AdminUser {
    pub id: String,
}

/// Rejection produced when no admin session is present.
///
/// Browser routes are redirected to the login page with the requested path
/// in `next`, `/api/` routes answer 401.
#[derive(Debug)]
pub struct AdminRequired {
    json: bool,
    next: String,
}

impl AdminRequired {
    /// Login page URL that returns to the originally requested page.
    pub fn login_location(&self) -> String {
        match serde_urlencoded::to_string([("next", self.next.as_str())]) {
            Ok(query) => format!("/admin-login?{query}"),
            Err(e) => {
                log::warn!("Failed to encode login redirect for {}: {e}", self.next);
                "/admin-login".to_string()
            }
        }
    }
}

impl std::fmt::Display for AdminRequired {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "admin session required")
    }
}

impl ResponseError for AdminRequired {
    fn status_code(&self) -> StatusCode {
        if self.json {
            StatusCode::UNAUTHORIZED
        } else {
            StatusCode::SEE_OTHER
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.json {
            HttpResponse::Unauthorized().json(serde_json::json!({
                "success": false,
                "error": "Kimlik doğrulama gerekli",
            }))
        } else {
            HttpResponse::SeeOther()
                .insert_header((header::LOCATION, self.login_location()))
                .finish()
        }
    }
}

impl FromRequest for AdminUser {
    type Error = AdminRequired;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let json = req.path().starts_with("/api/");
        let next = req
            .uri()
            .path_and_query()
            .map(|path| path.as_str().to_string())
            .unwrap_or_else(|| req.path().to_string());
        let id = req
            .get_identity()
            .ok()
            .and_then(|identity| identity.id().ok());
        match id {
            Some(id) if id == ADMIN_IDENTITY => ready(Ok(AdminUser { id })),
            _ => ready(Err(AdminRequired { json, next })),
        }
    }
}
