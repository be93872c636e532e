//! Admin password check.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use validator::Validate;

use crate::forms::auth::LoginForm;

use super::{ServiceError, ServiceResult};

type HmacSha256 = Hmac<Sha256>;

fn digest(key: &[u8], value: &str) -> ServiceResult<HmacSha256> {
    let mut mac = HmacSha256::new_from_slice(key).map_err(|e| {
        log::error!("Failed to initialise password hmac: {e}");
        ServiceError::Internal
    })?;
    mac.update(value.as_bytes());
    Ok(mac)
}

/// Compares the submitted password with the configured one in constant time.
/// An empty configured password disables login entirely.
pub fn verify_admin_password(
    form: &LoginForm,
    admin_password: &str,
    secret: &str,
) -> ServiceResult<()> {
    if form.validate().is_err() || admin_password.is_empty() {
        return Err(ServiceError::Unauthorized);
    }
    let expected = digest(secret.as_bytes(), admin_password)?.finalize().into_bytes();
    match digest(secret.as_bytes(), &form.password)?.verify_slice(&expected) {
        Ok(()) => Ok(()),
        Err(_) => {
            log::warn!("Rejected admin login attempt");
            Err(ServiceError::Unauthorized)
        }
    }
}
