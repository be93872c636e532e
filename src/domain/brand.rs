use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{BrandId, BrandName, Slug};

/// Motorcycle manufacturer shown in the catalog filter bar.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Brand {
    pub id: BrandId,
    pub name: BrandName,
    pub slug: Slug,
    /// Storage key of the logo in the `motors` bucket.
    pub logo_path: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Data required to insert or overwrite a [`Brand`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewBrand {
    pub name: BrandName,
    pub slug: Slug,
    pub logo_path: Option<String>,
    pub is_active: bool,
}
