//! JSON bodies of the content endpoints. Both snake_case and the camelCase
//! names used by the storefront scripts are accepted.

use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::content::{ContactSettings, FooterLinks, NewFaq, PrefooterBanner};
use crate::domain::types::{BannerHeight, FaqId, LinkTarget, SortOrder, TypeConstraintError};

#[derive(Debug, Error, PartialEq)]
pub enum ContentFormError {
    #[error("İçerik formu geçersiz: {0}")]
    Validation(String),
    #[error("İçerik formu hatalı veri içeriyor: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for ContentFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for ContentFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Debug, Deserialize, Validate)]
pub struct MapForm {
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: f64,
    #[validate(range(min = 1, max = 21))]
    pub zoom: Option<i32>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ContactSettingsForm {
    #[validate(length(min = 1, max = 300))]
    pub address: String,
    #[validate(length(min = 1, max = 40))]
    pub phone: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 200))]
    #[serde(default)]
    pub hours: String,
    #[validate(nested)]
    pub map: Option<MapForm>,
}

impl TryFrom<ContactSettingsForm> for ContactSettings {
    type Error = ContentFormError;

    fn try_from(form: ContactSettingsForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(ContactSettings {
            address: form.address.trim().to_string(),
            phone: form.phone.trim().to_string(),
            email: form.email.trim().to_string(),
            hours: form.hours.trim().to_string(),
            map_lat: form.map.as_ref().map(|m| m.lat),
            map_lng: form.map.as_ref().map(|m| m.lng),
            map_zoom: form.map.and_then(|m| m.zoom).unwrap_or(14),
        })
    }
}

fn default_true() -> bool {
    true
}

/// Create (`id` absent) or update of a FAQ entry.
#[derive(Debug, Deserialize, Validate)]
pub struct FaqForm {
    pub id: Option<i32>,
    #[validate(length(min = 1, max = 500))]
    pub question: String,
    #[validate(length(min = 1, max = 5000))]
    pub answer: String,
    #[serde(default, alias = "sortOrder")]
    pub sort_order: i32,
    #[serde(default = "default_true", alias = "isPublished")]
    pub is_published: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FaqPayload {
    pub id: Option<FaqId>,
    pub faq: NewFaq,
}

impl TryFrom<FaqForm> for FaqPayload {
    type Error = ContentFormError;

    fn try_from(form: FaqForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(Self {
            id: form.id.map(FaqId::new).transpose()?,
            faq: NewFaq {
                question: form.question.trim().to_string(),
                answer: form.answer.trim().to_string(),
                sort_order: SortOrder::new(form.sort_order)?,
                is_published: form.is_published,
            },
        })
    }
}

/// `?id=` of `DELETE /api/faq`.
#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: Option<i32>,
}

/// Footer links are taken as-is; link targets validate while deserializing.
#[derive(Debug, Deserialize)]
pub struct FooterLinksForm {
    #[serde(default)]
    pub columns: Vec<crate::domain::content::FooterColumn>,
    #[serde(default)]
    pub socials: Vec<crate::domain::content::SocialLink>,
}

impl From<FooterLinksForm> for FooterLinks {
    fn from(form: FooterLinksForm) -> Self {
        FooterLinks {
            columns: form.columns,
            socials: form.socials,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PrefooterBannerForm {
    #[serde(default, alias = "imageUrl")]
    pub image_url: Option<String>,
    #[serde(default, alias = "mobileImageUrl")]
    pub mobile_image_url: Option<String>,
    #[serde(default, alias = "imageAlt")]
    pub image_alt: Option<String>,
    #[serde(default)]
    pub height: Option<String>,
    #[serde(default, alias = "ctaText")]
    pub cta_text: Option<String>,
    #[serde(default, alias = "ctaHref")]
    pub cta_href: Option<String>,
    #[serde(default, alias = "isActive")]
    pub is_active: bool,
}

impl TryFrom<PrefooterBannerForm> for PrefooterBanner {
    type Error = ContentFormError;

    fn try_from(form: PrefooterBannerForm) -> Result<Self, Self::Error> {
        let image_url = blank_to_none(form.image_url)
            .map(LinkTarget::new)
            .transpose()?
            .map(String::from);
        let mobile_image_url = blank_to_none(form.mobile_image_url)
            .map(LinkTarget::new)
            .transpose()?
            .map(String::from);
        Ok(PrefooterBanner {
            image_url,
            mobile_image_url,
            image_alt: blank_to_none(form.image_alt),
            height: blank_to_none(form.height)
                .map(BannerHeight::try_from)
                .transpose()?
                .unwrap_or_default(),
            cta_text: blank_to_none(form.cta_text),
            cta_href: blank_to_none(form.cta_href)
                .map(LinkTarget::new)
                .transpose()?,
            is_active: form.is_active,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_settings_validate_email() {
        let form: ContactSettingsForm = serde_json::from_value(serde_json::json!({
            "address": "Turgutlu/Manisa",
            "phone": "+90 532 152 51 45",
            "email": "not-an-email",
        }))
        .unwrap();
        assert!(matches!(
            ContactSettings::try_from(form),
            Err(ContentFormError::Validation(_))
        ));
    }

    #[test]
    fn contact_settings_flatten_map() {
        let form: ContactSettingsForm = serde_json::from_value(serde_json::json!({
            "address": "Turgutlu/Manisa",
            "phone": "+90 532 152 51 45",
            "email": "info@trendmotor.com",
            "hours": "09:00 - 18:00",
            "map": {"lat": 38.49, "lng": 27.70},
        }))
        .unwrap();
        let settings = ContactSettings::try_from(form).unwrap();
        assert_eq!(settings.map_lat, Some(38.49));
        assert_eq!(settings.map_zoom, 14);
    }

    #[test]
    fn faq_accepts_camel_case() {
        let form: FaqForm = serde_json::from_value(serde_json::json!({
            "question": "Test sürüşü yapabilir miyim?",
            "answer": "Evet.",
            "sortOrder": 2,
        }))
        .unwrap();
        let payload = FaqPayload::try_from(form).unwrap();
        assert_eq!(payload.id, None);
        assert_eq!(payload.faq.sort_order.get(), 2);
        assert!(payload.faq.is_published);
    }

    #[test]
    fn banner_rejects_bad_links() {
        let form: PrefooterBannerForm = serde_json::from_value(serde_json::json!({
            "ctaHref": "javascript:void(0)",
            "isActive": true,
        }))
        .unwrap();
        assert!(PrefooterBanner::try_from(form).is_err());

        let form: PrefooterBannerForm = serde_json::from_value(serde_json::json!({
            "imageUrl": "/assets/placeholder.svg",
            "ctaText": "Tüm Modelleri Gör",
            "ctaHref": "/modeller",
            "height": "lg",
            "isActive": true,
        }))
        .unwrap();
        let banner = PrefooterBanner::try_from(form).unwrap();
        assert_eq!(banner.height, BannerHeight::Lg);
        assert_eq!(banner.image_url.as_deref(), Some("/assets/placeholder.svg"));
    }

    #[test]
    fn footer_links_validate_targets() {
        let bad = serde_json::from_value::<FooterLinksForm>(serde_json::json!({
            "columns": [{"title": "Kurumsal", "links": [{"label": "x", "href": "ftp://x"}]}],
        }));
        assert!(bad.is_err());
    }
}
