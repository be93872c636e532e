//! Site-wide content edited from the back office.

use serde::{Deserialize, Serialize};

use crate::domain::types::{BannerHeight, FaqId, LinkTarget, SortOrder};

/// Dealership contact block (singleton).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContactSettings {
    pub address: String,
    pub phone: String,
    pub email: String,
    pub hours: String,
    pub map_lat: Option<f64>,
    pub map_lng: Option<f64>,
    pub map_zoom: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Faq {
    pub id: FaqId,
    pub question: String,
    pub answer: String,
    pub sort_order: SortOrder,
    pub is_published: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewFaq {
    pub question: String,
    pub answer: String,
    pub sort_order: SortOrder,
    pub is_published: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FooterLink {
    pub label: String,
    pub href: LinkTarget,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FooterColumn {
    pub title: String,
    pub links: Vec<FooterLink>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SocialLink {
    pub platform: String,
    pub href: LinkTarget,
}

/// Footer navigation (singleton), persisted as JSON columns.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FooterLinks {
    pub columns: Vec<FooterColumn>,
    pub socials: Vec<SocialLink>,
}

/// Full-width banner above the footer (singleton).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PrefooterBanner {
    pub image_url: Option<String>,
    pub mobile_image_url: Option<String>,
    pub image_alt: Option<String>,
    pub height: BannerHeight,
    pub cta_text: Option<String>,
    pub cta_href: Option<LinkTarget>,
    pub is_active: bool,
}
