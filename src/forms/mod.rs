//! Request payload parsing: browser forms, multipart uploads and JSON bodies.

use actix_multipart::form::tempfile::TempFile;
use actix_multipart::form::text::Text;
use thiserror::Error;

use crate::storage::Upload;

pub mod auth;
pub mod brands;
pub mod catalog;
pub mod content;
pub mod leads;
pub mod motorcycles;
pub mod slides;

/// Largest accepted image upload.
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadError {
    #[error("Yalnızca görsel dosyaları yüklenebilir ({0})")]
    NotAnImage(String),
    #[error("Görsel 10 MB sınırını aşıyor")]
    TooLarge,
    #[error("Yüklenen dosya okunamadı: {0}")]
    Unreadable(String),
}

/// Reads a multipart file into memory. Empty file inputs yield `None`.
pub fn read_upload(file: Option<&TempFile>) -> Result<Option<Upload>, UploadError> {
    let Some(file) = file else {
        return Ok(None);
    };
    if file.size == 0 {
        return Ok(None);
    }
    if file.size > MAX_IMAGE_BYTES {
        return Err(UploadError::TooLarge);
    }
    let content_type = file.content_type.as_ref().map(|mime| mime.to_string());
    if let Some(content_type) = content_type.as_deref().filter(|ct| {
        !ct.starts_with("image/") && *ct != "application/octet-stream"
    }) {
        return Err(UploadError::NotAnImage(content_type.to_string()));
    }
    let bytes = std::fs::read(file.file.path()).map_err(|e| {
        log::error!("Failed to read uploaded file: {e}");
        UploadError::Unreadable(e.to_string())
    })?;
    Ok(Some(Upload {
        file_name: file
            .file_name
            .clone()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| "image".to_string()),
        content_type,
        bytes,
    }))
}

/// Trimmed text value; blank inputs are `None`.
pub fn text(value: &Option<Text<String>>) -> Option<String> {
    value
        .as_ref()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Checkbox and boolean string parsing: `true`, `on`, `1` and `yes` are set.
pub fn flag(value: &Option<Text<String>>) -> bool {
    value.as_ref().is_some_and(|v| is_truthy(v))
}

pub fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "on" | "1" | "yes"
    )
}

/// Parses `1,2,3` (whitespace tolerant) into positive ids.
pub fn parse_id_list(value: &str) -> Result<Vec<i32>, String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<i32>()
                .ok()
                .filter(|id| *id > 0)
                .ok_or_else(|| format!("Geçersiz kimlik: {part}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthy_values() {
        assert!(is_truthy("true"));
        assert!(is_truthy(" on "));
        assert!(is_truthy("1"));
        assert!(!is_truthy("false"));
        assert!(!is_truthy(""));
    }

    #[test]
    fn id_lists() {
        assert_eq!(parse_id_list("3, 1,2"), Ok(vec![3, 1, 2]));
        assert_eq!(parse_id_list(""), Ok(vec![]));
        assert!(parse_id_list("1,x").is_err());
        assert!(parse_id_list("0").is_err());
    }
}
