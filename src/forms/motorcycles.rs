use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::motorcycle::{NewMotorcycle, NewSpecItem};
use crate::domain::types::{
    BrandId, CategoryId, CurrencyCode, MotorcycleId, MotorcycleImageId, MotorcycleName, Price,
    Slug, SortOrder, SpecGroup, SpecKey, StockStatus, TypeConstraintError,
};
use crate::forms::{UploadError, flag, parse_id_list, read_upload, text};
use crate::storage::Upload;

/// Number of `additionalImageN` inputs accepted on create.
pub const MAX_GALLERY_UPLOADS: usize = 10;

#[derive(Debug, Error, PartialEq)]
pub enum MotorcycleFormError {
    #[error("Gerekli alanlar eksik")]
    MissingFields,
    #[error("Motosiklet formu geçersiz: {0}")]
    Validation(String),
    #[error("Motosiklet formu hatalı veri içeriyor: {0}")]
    TypeConstraint(String),
    #[error(transparent)]
    Upload(#[from] UploadError),
}

impl From<ValidationErrors> for MotorcycleFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for MotorcycleFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

/// Motorcycle create/edit form.
///
/// Field names are camelCase so the admin page and the `/api/motors`
/// endpoint share one parser.
#[derive(MultipartForm)]
pub struct MotorcycleMultipartForm {
    pub id: Option<Text<String>>,
    pub name: Option<Text<String>>,
    pub slug: Option<Text<String>>,
    pub subtitle: Option<Text<String>>,
    pub description: Option<Text<String>>,
    #[multipart(rename = "brandId")]
    pub brand_id: Option<Text<String>>,
    #[multipart(rename = "basePrice")]
    pub base_price: Option<Text<String>>,
    pub currency: Option<Text<String>>,
    #[multipart(rename = "stockStatus")]
    pub stock_status: Option<Text<String>>,
    #[multipart(rename = "isPublished")]
    pub is_published: Option<Text<String>>,
    #[multipart(rename = "isFeatured")]
    pub is_featured: Option<Text<String>>,
    #[multipart(rename = "isNew")]
    pub is_new: Option<Text<String>>,
    pub badges: Option<Text<String>>,
    #[multipart(rename = "sortOrder")]
    pub sort_order: Option<Text<String>>,
    #[multipart(rename = "categoryIds")]
    pub category_ids: Vec<Text<String>>,
    /// Hidden marker sent by the admin form so that unchecking every
    /// category clears them; without it an empty list leaves links as they are.
    #[multipart(rename = "categoryIdsSent")]
    pub category_ids_sent: Option<Text<String>>,
    #[multipart(rename = "heroImage", limit = "10MiB")]
    pub hero_image: Option<TempFile>,
    #[multipart(rename = "removeHeroImage")]
    pub remove_hero_image: Option<Text<String>>,
    #[multipart(rename = "additionalImage0", limit = "10MiB")]
    pub additional_image_0: Option<TempFile>,
    #[multipart(rename = "additionalImage1", limit = "10MiB")]
    pub additional_image_1: Option<TempFile>,
    #[multipart(rename = "additionalImage2", limit = "10MiB")]
    pub additional_image_2: Option<TempFile>,
    #[multipart(rename = "additionalImage3", limit = "10MiB")]
    pub additional_image_3: Option<TempFile>,
    #[multipart(rename = "additionalImage4", limit = "10MiB")]
    pub additional_image_4: Option<TempFile>,
    #[multipart(rename = "additionalImage5", limit = "10MiB")]
    pub additional_image_5: Option<TempFile>,
    #[multipart(rename = "additionalImage6", limit = "10MiB")]
    pub additional_image_6: Option<TempFile>,
    #[multipart(rename = "additionalImage7", limit = "10MiB")]
    pub additional_image_7: Option<TempFile>,
    #[multipart(rename = "additionalImage8", limit = "10MiB")]
    pub additional_image_8: Option<TempFile>,
    #[multipart(rename = "additionalImage9", limit = "10MiB")]
    pub additional_image_9: Option<TempFile>,
}

impl MotorcycleMultipartForm {
    fn gallery_files(&self) -> [Option<&TempFile>; MAX_GALLERY_UPLOADS] {
        [
            self.additional_image_0.as_ref(),
            self.additional_image_1.as_ref(),
            self.additional_image_2.as_ref(),
            self.additional_image_3.as_ref(),
            self.additional_image_4.as_ref(),
            self.additional_image_5.as_ref(),
            self.additional_image_6.as_ref(),
            self.additional_image_7.as_ref(),
            self.additional_image_8.as_ref(),
            self.additional_image_9.as_ref(),
        ]
    }
}

/// Raw, already-extracted motorcycle fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MotorcycleFields {
    pub id: Option<String>,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub brand_id: Option<String>,
    pub base_price: Option<String>,
    pub currency: Option<String>,
    pub stock_status: Option<String>,
    pub is_published: bool,
    pub is_featured: bool,
    pub is_new: bool,
    pub badges: Option<String>,
    pub sort_order: Option<String>,
    /// `None` keeps the current category links on update.
    pub category_ids: Option<Vec<String>>,
}

/// Validated motorcycle submission.
#[derive(Debug, Clone, PartialEq)]
pub struct MotorcycleFormPayload {
    /// Present on update requests sent to `PUT /api/motors`.
    pub id: Option<MotorcycleId>,
    /// `hero_image_path` is left `None`; the service decides it.
    pub motorcycle: NewMotorcycle,
    /// `None` keeps the current category links on update.
    pub category_ids: Option<Vec<CategoryId>>,
    /// `None` keeps the current position on update.
    pub sort_order: Option<SortOrder>,
    pub hero_image: Option<Upload>,
    pub remove_hero_image: bool,
    pub gallery: Vec<Upload>,
}

/// Accepts a JSON array (`["Yeni","Kampanya"]`) or a comma separated list.
pub fn parse_badges(value: Option<&str>) -> Result<Vec<String>, MotorcycleFormError> {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(Vec::new());
    };
    let raw: Vec<String> = if value.starts_with('[') {
        serde_json::from_str(value)
            .map_err(|e| MotorcycleFormError::Validation(format!("badges: {e}")))?
    } else {
        value.split(',').map(str::to_string).collect()
    };
    let mut badges: Vec<String> = Vec::new();
    for badge in raw.into_iter().map(|b| b.trim().to_string()) {
        if !badge.is_empty() && !badges.contains(&badge) {
            badges.push(badge);
        }
    }
    Ok(badges)
}

impl TryFrom<MotorcycleFields> for NewMotorcycle {
    type Error = MotorcycleFormError;

    fn try_from(fields: MotorcycleFields) -> Result<Self, Self::Error> {
        let (Some(name), Some(brand_id), Some(base_price)) =
            (fields.name, fields.brand_id, fields.base_price)
        else {
            return Err(MotorcycleFormError::MissingFields);
        };
        let base_price: f64 = base_price
            .replace(',', ".")
            .parse()
            .map_err(|_| MotorcycleFormError::Validation("basePrice: sayı olmalı".into()))?;
        if base_price == 0.0 {
            return Err(MotorcycleFormError::MissingFields);
        }
        let brand_id: i32 = brand_id
            .parse()
            .map_err(|_| MotorcycleFormError::Validation("brandId: sayı olmalı".into()))?;

        let slug = match fields.slug {
            Some(slug) => Slug::new(slug)?,
            None => Slug::from_name(&name)?,
        };

        Ok(NewMotorcycle {
            brand_id: BrandId::new(brand_id)?,
            name: MotorcycleName::new(name)?,
            slug,
            subtitle: fields.subtitle,
            description: fields.description,
            base_price: Price::new(base_price)?,
            currency: match fields.currency {
                Some(code) => CurrencyCode::new(code)?,
                None => CurrencyCode::default(),
            },
            stock_status: match fields.stock_status {
                Some(status) => StockStatus::try_from(status.as_str())?,
                None => StockStatus::default(),
            },
            is_published: fields.is_published,
            is_featured: fields.is_featured,
            is_new: fields.is_new,
            badges: parse_badges(fields.badges.as_deref())?,
            hero_image_path: None,
            sort_order: match fields.sort_order {
                Some(order) => SortOrder::new(order.parse().map_err(|_| {
                    MotorcycleFormError::Validation("sortOrder: sayı olmalı".into())
                })?)?,
                None => SortOrder::default(),
            },
        })
    }
}

impl TryFrom<MotorcycleMultipartForm> for MotorcycleFormPayload {
    type Error = MotorcycleFormError;

    fn try_from(form: MotorcycleMultipartForm) -> Result<Self, Self::Error> {
        let hero_image = read_upload(form.hero_image.as_ref())?;
        let mut gallery = Vec::new();
        for file in form.gallery_files() {
            if let Some(upload) = read_upload(file)? {
                gallery.push(upload);
            }
        }

        let fields = MotorcycleFields {
            id: text(&form.id),
            name: text(&form.name),
            slug: text(&form.slug),
            subtitle: text(&form.subtitle),
            description: text(&form.description),
            brand_id: text(&form.brand_id),
            base_price: text(&form.base_price),
            currency: text(&form.currency),
            stock_status: text(&form.stock_status),
            is_published: flag(&form.is_published),
            is_featured: flag(&form.is_featured),
            is_new: flag(&form.is_new),
            badges: text(&form.badges),
            sort_order: text(&form.sort_order),
            category_ids: (!form.category_ids.is_empty() || form.category_ids_sent.is_some())
                .then(|| {
                    form.category_ids
                        .iter()
                        .map(|id| id.trim().to_string())
                        .collect()
                }),
        };

        Self::from_fields(fields, hero_image, flag(&form.remove_hero_image), gallery)
    }
}

impl MotorcycleFormPayload {
    pub fn from_fields(
        fields: MotorcycleFields,
        hero_image: Option<Upload>,
        remove_hero_image: bool,
        gallery: Vec<Upload>,
    ) -> Result<Self, MotorcycleFormError> {
        let id = match fields.id.as_deref() {
            Some(id) => Some(MotorcycleId::new(id.parse().map_err(|_| {
                MotorcycleFormError::Validation("id: sayı olmalı".into())
            })?)?),
            None => None,
        };
        let category_ids = match fields.category_ids.as_ref() {
            Some(ids) => Some(
                parse_id_list(&ids.join(","))
                    .map_err(MotorcycleFormError::Validation)?
                    .into_iter()
                    .map(CategoryId::new)
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            None => None,
        };
        let sort_order_sent = fields.sort_order.is_some();
        let motorcycle: NewMotorcycle = fields.try_into()?;

        Ok(Self {
            id,
            sort_order: sort_order_sent.then_some(motorcycle.sort_order),
            motorcycle,
            category_ids,
            hero_image,
            remove_hero_image,
            gallery,
        })
    }
}

/// Spec sheet editor: one row per line, `Group | Key | Value`.
#[derive(Deserialize, Validate)]
pub struct SpecItemsForm {
    #[validate(length(max = 20000))]
    pub specs: String,
}

pub fn parse_spec_lines(value: &str) -> Result<Vec<NewSpecItem>, MotorcycleFormError> {
    value
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            let parts: Vec<&str> = line.splitn(3, '|').map(str::trim).collect();
            match parts.as_slice() {
                [group, key, value] if !value.is_empty() => Ok(NewSpecItem {
                    group: SpecGroup::new(*group)?,
                    key: SpecKey::new(*key)?,
                    value: value.to_string(),
                }),
                _ => Err(MotorcycleFormError::Validation(format!(
                    "{}. satır `Grup | Özellik | Değer` biçiminde olmalı",
                    index + 1
                ))),
            }
        })
        .collect()
}

impl TryFrom<SpecItemsForm> for Vec<NewSpecItem> {
    type Error = MotorcycleFormError;

    fn try_from(value: SpecItemsForm) -> Result<Self, Self::Error> {
        value.validate()?;
        parse_spec_lines(&value.specs)
    }
}

/// Single gallery upload from the motorcycle page.
#[derive(MultipartForm)]
pub struct ImageUploadForm {
    #[multipart(limit = "10MiB")]
    pub image: Option<TempFile>,
    pub alt: Option<Text<String>>,
    pub is_primary: Option<Text<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageUploadPayload {
    pub upload: Upload,
    pub alt: Option<String>,
    pub is_primary: bool,
}

impl TryFrom<ImageUploadForm> for ImageUploadPayload {
    type Error = MotorcycleFormError;

    fn try_from(form: ImageUploadForm) -> Result<Self, Self::Error> {
        let upload = read_upload(form.image.as_ref())?.ok_or_else(|| {
            MotorcycleFormError::Validation("Görsel seçilmedi".to_string())
        })?;
        Ok(Self {
            upload,
            alt: text(&form.alt),
            is_primary: flag(&form.is_primary),
        })
    }
}

/// New order posted by the drag-and-drop list: `ids=3,1,2`.
#[derive(Deserialize, Validate)]
pub struct ReorderForm {
    #[validate(length(min = 1))]
    pub ids: String,
}

impl TryFrom<ReorderForm> for Vec<MotorcycleImageId> {
    type Error = MotorcycleFormError;

    fn try_from(value: ReorderForm) -> Result<Self, Self::Error> {
        value.validate()?;
        parse_id_list(&value.ids)
            .map_err(MotorcycleFormError::Validation)?
            .into_iter()
            .map(|id| MotorcycleImageId::new(id).map_err(Into::into))
            .collect()
    }
}

/// Category checkboxes of the motorcycle page.
#[derive(MultipartForm)]
pub struct CategoriesMultipartForm {
    #[multipart(rename = "categoryIds")]
    pub category_ids: Vec<Text<String>>,
}

impl TryFrom<CategoriesMultipartForm> for Vec<CategoryId> {
    type Error = MotorcycleFormError;

    fn try_from(form: CategoriesMultipartForm) -> Result<Self, Self::Error> {
        let joined = form
            .category_ids
            .iter()
            .map(|id| id.trim().to_string())
            .collect::<Vec<_>>()
            .join(",");
        parse_id_list(&joined)
            .map_err(MotorcycleFormError::Validation)?
            .into_iter()
            .map(|id| CategoryId::new(id).map_err(Into::into))
            .collect()
    }
}

/// Publish / feature toggles: `value=true|false`.
#[derive(Deserialize)]
pub struct ToggleForm {
    pub value: String,
}

impl ToggleForm {
    pub fn enabled(&self) -> bool {
        crate::forms::is_truthy(&self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> MotorcycleFields {
        MotorcycleFields {
            name: Some("Tracer 9 GT".into()),
            brand_id: Some("1".into()),
            base_price: Some("689000".into()),
            ..MotorcycleFields::default()
        }
    }

    #[test]
    fn missing_required_fields_are_rejected() {
        let mut f = fields();
        f.base_price = None;
        assert_eq!(
            NewMotorcycle::try_from(f).unwrap_err(),
            MotorcycleFormError::MissingFields
        );
        let mut f = fields();
        f.base_price = Some("0".into());
        assert_eq!(
            NewMotorcycle::try_from(f).unwrap_err(),
            MotorcycleFormError::MissingFields
        );
    }

    #[test]
    fn defaults_and_derived_slug() {
        let motorcycle = NewMotorcycle::try_from(fields()).unwrap();
        assert_eq!(motorcycle.slug.as_str(), "tracer-9-gt");
        assert_eq!(motorcycle.currency.as_str(), "TRY");
        assert_eq!(motorcycle.stock_status, StockStatus::InStock);
        assert!(!motorcycle.is_published);
    }

    #[test]
    fn invalid_stock_status_is_a_type_error() {
        let mut f = fields();
        f.stock_status = Some("sold".into());
        assert!(matches!(
            NewMotorcycle::try_from(f),
            Err(MotorcycleFormError::TypeConstraint(_))
        ));
    }

    #[test]
    fn badges_accept_json_or_commas() {
        assert_eq!(
            parse_badges(Some(r#"["Yeni", "Kampanya", "Yeni"]"#)).unwrap(),
            vec!["Yeni", "Kampanya"]
        );
        assert_eq!(parse_badges(Some("A, ,B")).unwrap(), vec!["A", "B"]);
        assert!(parse_badges(Some("[1,")).is_err());
    }

    #[test]
    fn spec_lines_parse_and_report_line_numbers() {
        let items = parse_spec_lines("Motor | Hacim | 890 cc\n\nŞasi | Fren | ABS").unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].group.as_str(), "Şasi");

        let err = parse_spec_lines("Motor | Hacim").unwrap_err();
        assert!(err.to_string().contains("1. satır"));
    }

    #[test]
    fn category_ids_are_parsed() {
        let mut f = fields();
        f.category_ids = Some(vec!["2".into(), "5".into()]);
        let payload = MotorcycleFormPayload::from_fields(f, None, false, vec![]).unwrap();
        assert_eq!(payload.category_ids.map(|ids| ids.len()), Some(2));
        assert_eq!(payload.id, None);
    }

    #[test]
    fn absent_categories_and_sort_order_stay_unset() {
        let payload = MotorcycleFormPayload::from_fields(fields(), None, false, vec![]).unwrap();
        assert_eq!(payload.category_ids, None);
        assert_eq!(payload.sort_order, None);

        let mut f = fields();
        f.category_ids = Some(vec![]);
        f.sort_order = Some("7".into());
        let payload = MotorcycleFormPayload::from_fields(f, None, false, vec![]).unwrap();
        assert_eq!(payload.category_ids, Some(vec![]));
        assert_eq!(payload.sort_order, Some(SortOrder::new(7).unwrap()));
    }
}
