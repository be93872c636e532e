use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::brand::NewBrand;
use crate::domain::category::NewCategory;
use crate::domain::types::{BrandName, CategoryName, Slug, SortOrder, TypeConstraintError};
use crate::forms::{UploadError, flag, read_upload, text};
use crate::storage::Upload;

#[derive(Debug, Error, PartialEq)]
pub enum BrandFormError {
    #[error("Marka adı gerekli")]
    MissingName,
    #[error("Form geçersiz: {0}")]
    Validation(String),
    #[error("Form hatalı veri içeriyor: {0}")]
    TypeConstraint(String),
    #[error(transparent)]
    Upload(#[from] UploadError),
}

impl From<ValidationErrors> for BrandFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for BrandFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

/// Brand create/edit form with an optional logo.
#[derive(MultipartForm)]
pub struct BrandMultipartForm {
    pub name: Option<Text<String>>,
    pub slug: Option<Text<String>>,
    pub is_active: Option<Text<String>>,
    #[multipart(limit = "10MiB")]
    pub logo: Option<TempFile>,
    pub remove_logo: Option<Text<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BrandFormPayload {
    /// `logo_path` is left `None`; the service decides it.
    pub brand: NewBrand,
    pub logo: Option<Upload>,
    pub remove_logo: bool,
}

impl BrandFormPayload {
    /// Builds the payload from trimmed field values. A blank slug is derived
    /// from the name.
    pub fn from_fields(
        name: Option<String>,
        slug: Option<String>,
        is_active: bool,
        logo: Option<Upload>,
        remove_logo: bool,
    ) -> Result<Self, BrandFormError> {
        let name = name.ok_or(BrandFormError::MissingName)?;
        let slug = match slug {
            Some(slug) => Slug::new(slug)?,
            None => Slug::from_name(&name)?,
        };
        Ok(Self {
            brand: NewBrand {
                name: BrandName::new(name)?,
                slug,
                logo_path: None,
                is_active,
            },
            logo,
            remove_logo,
        })
    }
}

impl TryFrom<BrandMultipartForm> for BrandFormPayload {
    type Error = BrandFormError;

    fn try_from(form: BrandMultipartForm) -> Result<Self, Self::Error> {
        let logo = read_upload(form.logo.as_ref())?;
        // Unchecked checkboxes are absent, so "no field" means inactive.
        Self::from_fields(
            text(&form.name),
            text(&form.slug),
            flag(&form.is_active),
            logo,
            flag(&form.remove_logo),
        )
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CategoryForm {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub sort_order: Option<i32>,
}

impl TryFrom<CategoryForm> for NewCategory {
    type Error = BrandFormError;

    fn try_from(form: CategoryForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let name = form.name.trim().to_string();
        let slug = match form.slug.trim() {
            "" => Slug::from_name(&name)?,
            slug => Slug::new(slug)?,
        };
        Ok(NewCategory {
            name: CategoryName::new(name)?,
            slug,
            sort_order: SortOrder::new(form.sort_order.unwrap_or(0))?,
        })
    }
}
