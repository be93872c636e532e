use diesel::prelude::*;

use crate::domain::motorcycle::SpecItem as DomainSpecItem;
use crate::domain::types::{SortOrder, SpecGroup, SpecKey, TypeConstraintError};

/// Diesel model representing the `motorcycle_spec_items` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::motorcycle_spec_items)]
pub struct SpecItem {
    pub id: i32,
    pub motorcycle_id: i32,
    pub group_name: String,
    pub key_name: String,
    pub value_text: String,
    pub sort_order: i32,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::motorcycle_spec_items)]
pub struct NewSpecItem {
    pub motorcycle_id: i32,
    pub group_name: String,
    pub key_name: String,
    pub value_text: String,
    pub sort_order: i32,
}

impl TryFrom<SpecItem> for DomainSpecItem {
    type Error = TypeConstraintError;

    fn try_from(row: SpecItem) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id.try_into()?,
            motorcycle_id: row.motorcycle_id.try_into()?,
            group: SpecGroup::new(row.group_name)?,
            key: SpecKey::new(row.key_name)?,
            value: row.value_text,
            sort_order: SortOrder::new(row.sort_order)?,
        })
    }
}
