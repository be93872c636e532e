use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    BrandId, BrandName, CurrencyCode, MotorcycleId, MotorcycleImageId, MotorcycleName, Price,
    Slug, SortOrder, SpecGroup, SpecItemId, SpecKey, StockStatus,
};

/// A motorcycle model as sold by the dealership.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Motorcycle {
    pub id: MotorcycleId,
    pub brand_id: BrandId,
    pub name: MotorcycleName,
    pub slug: Slug,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub base_price: Price,
    pub currency: CurrencyCode,
    pub stock_status: StockStatus,
    pub is_published: bool,
    pub is_featured: bool,
    pub is_new: bool,
    pub badges: Vec<String>,
    /// Storage key of the hero image in the `motors` bucket, or an absolute URL.
    pub hero_image_path: Option<String>,
    pub sort_order: SortOrder,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// A [`Motorcycle`] together with the brand columns the catalog shows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MotorcycleWithBrand {
    pub motorcycle: Motorcycle,
    pub brand_name: BrandName,
    pub brand_slug: Slug,
}

/// Editable columns of a motorcycle, used for both insert and update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewMotorcycle {
    pub brand_id: BrandId,
    pub name: MotorcycleName,
    pub slug: Slug,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub base_price: Price,
    pub currency: CurrencyCode,
    pub stock_status: StockStatus,
    pub is_published: bool,
    pub is_featured: bool,
    pub is_new: bool,
    pub badges: Vec<String>,
    pub hero_image_path: Option<String>,
    pub sort_order: SortOrder,
}

/// Gallery image of a motorcycle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MotorcycleImage {
    pub id: MotorcycleImageId,
    pub motorcycle_id: MotorcycleId,
    pub path: String,
    pub alt: Option<String>,
    pub sort_order: SortOrder,
    pub is_primary: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewMotorcycleImage {
    pub motorcycle_id: MotorcycleId,
    pub path: String,
    pub alt: Option<String>,
    pub is_primary: bool,
}

/// One row of the technical specification table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpecItem {
    pub id: SpecItemId,
    pub motorcycle_id: MotorcycleId,
    pub group: SpecGroup,
    pub key: SpecKey,
    pub value: String,
    pub sort_order: SortOrder,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewSpecItem {
    pub group: SpecGroup,
    pub key: SpecKey,
    pub value: String,
}

/// Ordering options of the public catalog.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum CatalogSort {
    /// Admin-defined order, then name.
    #[default]
    Name,
    PriceAsc,
    PriceDesc,
    Newest,
    /// Featured first, then admin order, then newest.
    Featured,
    /// Featured first, then newest; used for related models.
    FeaturedNewest,
}

impl CatalogSort {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
            Self::Newest => "newest",
            Self::Featured => "featured",
            Self::FeaturedNewest => "featured-newest",
        }
    }

    /// Parses the `sort` query value; unknown values fall back to [`CatalogSort::Name`].
    pub fn from_query(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("price-asc") => Self::PriceAsc,
            Some("price-desc") => Self::PriceDesc,
            Some("newest") => Self::Newest,
            Some("featured") => Self::Featured,
            _ => Self::Name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_sort_falls_back_to_name() {
        assert_eq!(CatalogSort::from_query(Some("cheap")), CatalogSort::Name);
        assert_eq!(CatalogSort::from_query(None), CatalogSort::Name);
        assert_eq!(
            CatalogSort::from_query(Some("price-desc")),
            CatalogSort::PriceDesc
        );
    }
}
