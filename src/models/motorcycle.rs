use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::motorcycle::{
    Motorcycle as DomainMotorcycle, NewMotorcycle as DomainNewMotorcycle,
};
use crate::domain::types::{
    CurrencyCode, MotorcycleName, Price, Slug, SortOrder, StockStatus, TypeConstraintError,
};

/// Diesel model representing the `motorcycles` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::motorcycles)]
pub struct Motorcycle {
    pub id: i32,
    pub brand_id: i32,
    pub name: String,
    pub slug: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub base_price: f64,
    pub currency: String,
    pub stock_status: String,
    pub is_published: bool,
    pub is_featured: bool,
    pub is_new: bool,
    pub badges: String,
    pub hero_image_path: Option<String>,
    pub sort_order: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable/patchable form of [`Motorcycle`].
#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::motorcycles)]
#[diesel(treat_none_as_null = true)]
pub struct NewMotorcycle {
    pub brand_id: i32,
    pub name: String,
    pub slug: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub base_price: f64,
    pub currency: String,
    pub stock_status: String,
    pub is_published: bool,
    pub is_featured: bool,
    pub is_new: bool,
    pub badges: String,
    pub hero_image_path: Option<String>,
    pub sort_order: i32,
    pub updated_at: NaiveDateTime,
}

fn parse_badges(raw: &str) -> Result<Vec<String>, TypeConstraintError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw)
        .map_err(|e| TypeConstraintError::InvalidValue(format!("badges: {e}")))
}

impl TryFrom<Motorcycle> for DomainMotorcycle {
    type Error = TypeConstraintError;

    fn try_from(row: Motorcycle) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id.try_into()?,
            brand_id: row.brand_id.try_into()?,
            name: MotorcycleName::new(row.name)?,
            slug: Slug::new(row.slug)?,
            subtitle: row.subtitle,
            description: row.description,
            base_price: Price::new(row.base_price)?,
            currency: CurrencyCode::new(row.currency)?,
            stock_status: StockStatus::try_from(row.stock_status)?,
            is_published: row.is_published,
            is_featured: row.is_featured,
            is_new: row.is_new,
            badges: parse_badges(&row.badges)?,
            hero_image_path: row.hero_image_path,
            sort_order: SortOrder::new(row.sort_order)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl TryFrom<&DomainNewMotorcycle> for NewMotorcycle {
    type Error = TypeConstraintError;

    fn try_from(value: &DomainNewMotorcycle) -> Result<Self, Self::Error> {
        let badges = serde_json::to_string(&value.badges)
            .map_err(|e| TypeConstraintError::InvalidValue(format!("badges: {e}")))?;
        Ok(Self {
            brand_id: value.brand_id.get(),
            name: value.name.as_str().to_string(),
            slug: value.slug.as_str().to_string(),
            subtitle: value.subtitle.clone(),
            description: value.description.clone(),
            base_price: value.base_price.get(),
            currency: value.currency.as_str().to_string(),
            stock_status: value.stock_status.as_str().to_string(),
            is_published: value.is_published,
            is_featured: value.is_featured,
            is_new: value.is_new,
            badges,
            hero_image_path: value.hero_image_path.clone(),
            sort_order: value.sort_order.get(),
            updated_at: chrono::Utc::now().naive_utc(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_badge_column_is_an_empty_list() {
        assert!(parse_badges("").unwrap().is_empty());
        assert_eq!(
            parse_badges(r#"["Yeni","Kampanya"]"#).unwrap(),
            vec!["Yeni".to_string(), "Kampanya".to_string()]
        );
        assert!(parse_badges("{").is_err());
    }
}
