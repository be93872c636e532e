use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::content::{
    ContactSettings as DomainContactSettings, Faq as DomainFaq, FooterLinks,
    NewFaq as DomainNewFaq, PrefooterBanner as DomainPrefooterBanner,
};
use crate::domain::types::{BannerHeight, LinkTarget, SortOrder, TypeConstraintError};

/// Id of the single row kept in each singleton table.
pub const SINGLETON_ID: i32 = 1;

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::contact_settings)]
#[diesel(treat_none_as_null = true)]
pub struct ContactSettings {
    pub id: i32,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub hours: String,
    pub map_lat: Option<f64>,
    pub map_lng: Option<f64>,
    pub map_zoom: i32,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::faqs)]
pub struct Faq {
    pub id: i32,
    pub question: String,
    pub answer: String,
    pub sort_order: i32,
    pub is_published: bool,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::faqs)]
pub struct NewFaq {
    pub question: String,
    pub answer: String,
    pub sort_order: i32,
    pub is_published: bool,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::footer_links)]
pub struct FooterLinksRow {
    pub id: i32,
    pub column_groups: String,
    pub socials: String,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::prefooter_banner)]
#[diesel(treat_none_as_null = true)]
pub struct PrefooterBanner {
    pub id: i32,
    pub image_url: Option<String>,
    pub mobile_image_url: Option<String>,
    pub image_alt: Option<String>,
    pub height: String,
    pub cta_text: Option<String>,
    pub cta_href: Option<String>,
    pub is_active: bool,
    pub updated_at: NaiveDateTime,
}

impl From<ContactSettings> for DomainContactSettings {
    fn from(row: ContactSettings) -> Self {
        Self {
            address: row.address,
            phone: row.phone,
            email: row.email,
            hours: row.hours,
            map_lat: row.map_lat,
            map_lng: row.map_lng,
            map_zoom: row.map_zoom,
        }
    }
}

impl From<&DomainContactSettings> for ContactSettings {
    fn from(value: &DomainContactSettings) -> Self {
        Self {
            id: SINGLETON_ID,
            address: value.address.clone(),
            phone: value.phone.clone(),
            email: value.email.clone(),
            hours: value.hours.clone(),
            map_lat: value.map_lat,
            map_lng: value.map_lng,
            map_zoom: value.map_zoom,
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}

impl TryFrom<Faq> for DomainFaq {
    type Error = TypeConstraintError;

    fn try_from(row: Faq) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id.try_into()?,
            question: row.question,
            answer: row.answer,
            sort_order: SortOrder::new(row.sort_order)?,
            is_published: row.is_published,
        })
    }
}

impl From<&DomainNewFaq> for NewFaq {
    fn from(value: &DomainNewFaq) -> Self {
        Self {
            question: value.question.clone(),
            answer: value.answer.clone(),
            sort_order: value.sort_order.get(),
            is_published: value.is_published,
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}

impl TryFrom<FooterLinksRow> for FooterLinks {
    type Error = serde_json::Error;

    fn try_from(row: FooterLinksRow) -> Result<Self, Self::Error> {
        Ok(Self {
            columns: serde_json::from_str(&row.column_groups)?,
            socials: serde_json::from_str(&row.socials)?,
        })
    }
}

impl TryFrom<&FooterLinks> for FooterLinksRow {
    type Error = serde_json::Error;

    fn try_from(value: &FooterLinks) -> Result<Self, Self::Error> {
        Ok(Self {
            id: SINGLETON_ID,
            column_groups: serde_json::to_string(&value.columns)?,
            socials: serde_json::to_string(&value.socials)?,
            updated_at: chrono::Utc::now().naive_utc(),
        })
    }
}

impl TryFrom<PrefooterBanner> for DomainPrefooterBanner {
    type Error = TypeConstraintError;

    fn try_from(row: PrefooterBanner) -> Result<Self, Self::Error> {
        Ok(Self {
            image_url: row.image_url,
            mobile_image_url: row.mobile_image_url,
            image_alt: row.image_alt,
            height: BannerHeight::try_from(row.height)?,
            cta_text: row.cta_text,
            cta_href: row.cta_href.map(LinkTarget::new).transpose()?,
            is_active: row.is_active,
        })
    }
}

impl From<&DomainPrefooterBanner> for PrefooterBanner {
    fn from(value: &DomainPrefooterBanner) -> Self {
        Self {
            id: SINGLETON_ID,
            image_url: value.image_url.clone(),
            mobile_image_url: value.mobile_image_url.clone(),
            image_alt: value.image_alt.clone(),
            height: value.height.as_str().to_string(),
            cta_text: value.cta_text.clone(),
            cta_href: value.cta_href.as_ref().map(|href| href.as_str().to_string()),
            is_active: value.is_active,
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}
