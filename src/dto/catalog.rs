use serde::Serialize;

use crate::domain::brand::Brand;
use crate::domain::category::Category;
use crate::domain::motorcycle::{Motorcycle, MotorcycleImage, MotorcycleWithBrand, SpecItem};
use crate::storage::{Bucket, ImageUrlResolver};

/// Formats a price the way the storefront prints it, e.g. `₺289.000`.
pub fn format_price(amount: f64, currency: &str) -> String {
    let rounded = amount.round().max(0.0) as u64;
    let digits = rounded.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    match currency {
        "TRY" => format!("₺{grouped}"),
        "EUR" => format!("€{grouped}"),
        "USD" => format!("${grouped}"),
        other => format!("{grouped} {other}"),
    }
}

/// Product card shown in the catalog grid and the featured carousel.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MotorcycleCard {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub subtitle: Option<String>,
    pub brand_name: String,
    pub brand_slug: String,
    pub price: f64,
    pub currency: String,
    pub price_label: String,
    pub stock_status: String,
    pub stock_label: String,
    pub is_published: bool,
    pub is_featured: bool,
    pub is_new: bool,
    pub badges: Vec<String>,
    pub image_url: Option<String>,
}

impl MotorcycleCard {
    pub fn new(item: &MotorcycleWithBrand, urls: &ImageUrlResolver) -> Self {
        let motorcycle = &item.motorcycle;
        Self {
            id: motorcycle.id.get(),
            name: motorcycle.name.as_str().to_string(),
            slug: motorcycle.slug.as_str().to_string(),
            subtitle: motorcycle.subtitle.clone(),
            brand_name: item.brand_name.as_str().to_string(),
            brand_slug: item.brand_slug.as_str().to_string(),
            price: motorcycle.base_price.get(),
            currency: motorcycle.currency.as_str().to_string(),
            price_label: format_price(motorcycle.base_price.get(), motorcycle.currency.as_str()),
            stock_status: motorcycle.stock_status.as_str().to_string(),
            stock_label: motorcycle.stock_status.label().to_string(),
            is_published: motorcycle.is_published,
            is_featured: motorcycle.is_featured,
            is_new: motorcycle.is_new,
            badges: motorcycle.badges.clone(),
            image_url: motorcycle
                .hero_image_path
                .as_deref()
                .and_then(|path| urls.resolve(Bucket::Motors, path)),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BrandOption {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub logo_url: Option<String>,
    pub is_active: bool,
}

impl BrandOption {
    pub fn new(brand: &Brand, urls: &ImageUrlResolver) -> Self {
        Self {
            id: brand.id.get(),
            name: brand.name.as_str().to_string(),
            slug: brand.slug.as_str().to_string(),
            logo_url: brand
                .logo_path
                .as_deref()
                .and_then(|path| urls.resolve(Bucket::Motors, path)),
            is_active: brand.is_active,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryOption {
    pub id: i32,
    pub name: String,
    pub slug: String,
}

impl From<&Category> for CategoryOption {
    fn from(value: &Category) -> Self {
        Self {
            id: value.id.get(),
            name: value.name.as_str().to_string(),
            slug: value.slug.as_str().to_string(),
        }
    }
}

/// Catalog page: cards plus the filter bar state.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CatalogView {
    pub motorcycles: Vec<MotorcycleCard>,
    pub brands: Vec<BrandOption>,
    pub categories: Vec<CategoryOption>,
    pub selected_brand: Option<String>,
    pub selected_category: Option<String>,
    pub sort: &'static str,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GalleryImage {
    pub id: i32,
    pub url: String,
    pub alt: String,
    pub is_primary: bool,
}

impl GalleryImage {
    pub fn new(image: &MotorcycleImage, fallback_alt: &str, urls: &ImageUrlResolver) -> Option<Self> {
        Some(Self {
            id: image.id.get(),
            url: urls.resolve(Bucket::Motors, &image.path)?,
            alt: image
                .alt
                .clone()
                .filter(|alt| !alt.trim().is_empty())
                .unwrap_or_else(|| fallback_alt.to_string()),
            is_primary: image.is_primary,
        })
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SpecRow {
    pub key: String,
    pub value: String,
}

/// Spec items sharing a group heading, in entry order.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SpecGroupView {
    pub name: String,
    pub items: Vec<SpecRow>,
}

/// Groups spec rows by heading; groups appear in order of first occurrence.
pub fn group_spec_items(items: &[SpecItem]) -> Vec<SpecGroupView> {
    let mut groups: Vec<SpecGroupView> = Vec::new();
    for item in items {
        let row = SpecRow {
            key: item.key.as_str().to_string(),
            value: item.value.clone(),
        };
        match groups.iter_mut().find(|g| g.name == item.group.as_str()) {
            Some(group) => group.items.push(row),
            None => groups.push(SpecGroupView {
                name: item.group.as_str().to_string(),
                items: vec![row],
            }),
        }
    }
    groups
}

/// Detail page model.
///
/// `degraded_sections` names the sections whose data could not be loaded,
/// so an empty gallery can be told apart from a failed one.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MotorcycleDetailView {
    pub motorcycle: MotorcycleCard,
    pub brand_id: i32,
    pub description: Option<String>,
    pub images: Vec<GalleryImage>,
    pub spec_groups: Vec<SpecGroupView>,
    pub related: Vec<MotorcycleCard>,
    pub degraded_sections: Vec<&'static str>,
}

/// Spec rows rendered back into the `Group | Key | Value` editor format.
pub fn spec_items_to_text(items: &[SpecItem]) -> String {
    items
        .iter()
        .map(|item| format!("{} | {} | {}", item.group, item.key, item.value))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Back office create/edit page of a motorcycle.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MotorcycleEditorView {
    /// `None` on the "new motorcycle" page.
    pub motorcycle: Option<Motorcycle>,
    pub hero_image_url: Option<String>,
    pub images: Vec<GalleryImage>,
    pub specs_text: String,
    pub brands: Vec<BrandOption>,
    pub categories: Vec<CategoryOption>,
    pub selected_category_ids: Vec<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{MotorcycleId, SortOrder, SpecGroup, SpecItemId, SpecKey};

    fn spec(id: i32, group: &str, key: &str) -> SpecItem {
        SpecItem {
            id: SpecItemId::new(id).unwrap(),
            motorcycle_id: MotorcycleId::new(1).unwrap(),
            group: SpecGroup::new(group).unwrap(),
            key: SpecKey::new(key).unwrap(),
            value: "x".into(),
            sort_order: SortOrder::new(id).unwrap(),
        }
    }

    #[test]
    fn prices_use_turkish_grouping() {
        assert_eq!(format_price(289000.0, "TRY"), "₺289.000");
        assert_eq!(format_price(1234567.4, "EUR"), "€1.234.567");
        assert_eq!(format_price(950.0, "GBP"), "950 GBP");
    }

    #[test]
    fn spec_groups_keep_first_occurrence_order() {
        let groups = group_spec_items(&[
            spec(1, "Motor", "Hacim"),
            spec(2, "Şasi", "Fren"),
            spec(3, "Motor", "Güç"),
        ]);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].name, "Motor");
        assert_eq!(groups[0].items.len(), 2);
        assert_eq!(groups[0].items[1].key, "Güç");
        assert_eq!(groups[1].name, "Şasi");
    }
}
