use serde::Deserialize;
use validator::Validate;

/// Admin login, posted as JSON to `/api/admin/auth` or from the login page.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(length(min = 1, max = 200))]
    pub password: String,
    /// Where to go after a browser login. Only site-relative paths are honoured.
    #[serde(default)]
    pub next: Option<String>,
}

impl LoginForm {
    pub fn redirect_target(&self) -> &str {
        self.next
            .as_deref()
            .filter(|next| next.starts_with("/admin") && !next.starts_with("//"))
            .unwrap_or("/admin")
    }
}
