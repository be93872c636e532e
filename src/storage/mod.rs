//! Object storage for uploaded images.
//!
//! Objects live in named buckets and are addressed by a relative key such as
//! `motors/1735689600000-tracer-9.jpg`. The database only stores keys; public
//! URLs are derived by [`urls::ImageUrlResolver`].

use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::types::slugify;

pub mod local;
pub mod urls;

pub use local::LocalStorage;
pub use urls::ImageUrlResolver;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid object key: {0}")]
    InvalidKey(String),
    #[error("unknown bucket: {0}")]
    UnknownBucket(String),
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid signature")]
    InvalidSignature,
    #[error("signed url expired")]
    Expired,
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Buckets known to the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    /// Motorcycle hero, gallery and brand logo images.
    Motors,
    /// Hero carousel images.
    Sliders,
}

impl Bucket {
    pub const ALL: &'static [Bucket] = &[Bucket::Motors, Bucket::Sliders];

    pub const fn as_str(self) -> &'static str {
        match self {
            Bucket::Motors => "motors",
            Bucket::Sliders => "sliders",
        }
    }
}

impl Display for Bucket {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Bucket {
    type Error = StorageError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "motors" => Ok(Bucket::Motors),
            "sliders" => Ok(Bucket::Sliders),
            other => Err(StorageError::UnknownBucket(other.to_string())),
        }
    }
}

/// Relative, `/`-separated object key without empty, `.` or `..` segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ObjectKey(String);

impl ObjectKey {
    pub fn new<S: Into<String>>(value: S) -> StorageResult<Self> {
        let value = value.into();
        let valid = !value.is_empty()
            && !value.starts_with('/')
            && !value.contains('\\')
            && value
                .split('/')
                .all(|segment| !segment.is_empty() && segment != "." && segment != "..");
        if valid {
            Ok(Self(value))
        } else {
            Err(StorageError::InvalidKey(value))
        }
    }

    /// Builds a fresh key `{prefix}/{unix_millis}-{sanitised file name}`.
    ///
    /// The file extension is kept (lowercased); the stem is slugified so the
    /// key is URL safe. Empty stems become `image`.
    pub fn generate(prefix: &str, file_name: &str, now: DateTime<Utc>) -> StorageResult<Self> {
        let base = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
        let (stem, extension) = match base.rsplit_once('.') {
            Some((stem, ext))
                if !stem.is_empty()
                    && !ext.is_empty()
                    && ext.chars().all(|c| c.is_ascii_alphanumeric()) =>
            {
                (stem, Some(ext.to_ascii_lowercase()))
            }
            _ => (base, None),
        };
        let mut name = slugify(stem);
        if name.is_empty() {
            name = "image".to_string();
        }
        if let Some(extension) = extension {
            name = format!("{name}.{extension}");
        }
        let prefix = prefix.trim_matches('/');
        let key = if prefix.is_empty() {
            format!("{}-{name}", now.timestamp_millis())
        } else {
            format!("{prefix}/{}-{name}", now.timestamp_millis())
        };
        Self::new(key)
    }

    /// Key of a path stored in the database. External `http(s)` URLs are
    /// not storage objects and yield `None`.
    pub fn from_stored_path(path: &str) -> Option<Self> {
        let path = path.trim();
        if path.starts_with("http://") || path.starts_with("https://") {
            return None;
        }
        Self::new(path.trim_start_matches('/')).ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ObjectKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ObjectKey {
    type Error = StorageError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ObjectKey> for String {
    fn from(value: ObjectKey) -> Self {
        value.0
    }
}

/// An uploaded file held in memory until it is written to a bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct Upload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Backend able to store and remove objects.
pub trait ObjectStorage: Send + Sync {
    fn put(&self, bucket: Bucket, key: &ObjectKey, upload: &Upload) -> StorageResult<()>;

    /// Removes an object. Removing a missing object is not an error.
    fn delete(&self, bucket: Bucket, key: &ObjectKey) -> StorageResult<()>;

    /// Removes every key, returning the keys that could not be removed.
    fn delete_many(&self, bucket: Bucket, keys: &[ObjectKey]) -> Vec<ObjectKey> {
        keys.iter()
            .filter(|key| match self.delete(bucket, key) {
                Ok(()) => false,
                Err(e) => {
                    log::error!("Failed to delete {bucket}/{key}: {e}");
                    true
                }
            })
            .cloned()
            .collect()
    }

    /// Keys under `prefix`, sorted.
    fn list(&self, bucket: Bucket, prefix: &str) -> StorageResult<Vec<ObjectKey>>;

    fn exists(&self, bucket: Bucket, key: &ObjectKey) -> StorageResult<bool>;
}
