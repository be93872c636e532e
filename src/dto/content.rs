use serde::Serialize;

use crate::domain::content::{ContactSettings, FooterLinks, PrefooterBanner};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MapView {
    pub lat: f64,
    pub lng: f64,
    pub zoom: i32,
    pub provider: &'static str,
}

/// Contact block as exposed by `/api/contact-settings` and the templates.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ContactView {
    pub address: String,
    pub phone: String,
    /// `tel:` target with spaces removed.
    pub phone_href: String,
    pub email: String,
    pub hours: String,
    pub map: Option<MapView>,
}

impl From<ContactSettings> for ContactView {
    fn from(value: ContactSettings) -> Self {
        let map = match (value.map_lat, value.map_lng) {
            (Some(lat), Some(lng)) => Some(MapView {
                lat,
                lng,
                zoom: value.map_zoom,
                provider: "google",
            }),
            _ => None,
        };
        Self {
            phone_href: value
                .phone
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '+')
                .collect(),
            address: value.address,
            phone: value.phone,
            email: value.email,
            hours: value.hours,
            map,
        }
    }
}

/// Data shared by every public page: header contact line, footer and banner.
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct LayoutView {
    pub contact: Option<ContactView>,
    pub footer: FooterLinks,
    pub banner: Option<PrefooterBanner>,
}
