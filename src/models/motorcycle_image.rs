use diesel::prelude::*;

use crate::domain::motorcycle::MotorcycleImage as DomainMotorcycleImage;
use crate::domain::types::{SortOrder, TypeConstraintError};

/// Diesel model representing the `motorcycle_images` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::motorcycle_images)]
pub struct MotorcycleImage {
    pub id: i32,
    pub motorcycle_id: i32,
    pub path: String,
    pub alt: Option<String>,
    pub sort_order: i32,
    pub is_primary: bool,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::motorcycle_images)]
pub struct NewMotorcycleImage {
    pub motorcycle_id: i32,
    pub path: String,
    pub alt: Option<String>,
    pub sort_order: i32,
    pub is_primary: bool,
}

impl TryFrom<MotorcycleImage> for DomainMotorcycleImage {
    type Error = TypeConstraintError;

    fn try_from(row: MotorcycleImage) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id.try_into()?,
            motorcycle_id: row.motorcycle_id.try_into()?,
            path: row.path,
            alt: row.alt,
            sort_order: SortOrder::new(row.sort_order)?,
            is_primary: row.is_primary,
        })
    }
}
