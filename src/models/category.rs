use diesel::prelude::*;

use crate::domain::category::{Category as DomainCategory, NewCategory as DomainNewCategory};
use crate::domain::types::{CategoryName, Slug, SortOrder, TypeConstraintError};

/// Diesel model representing the `categories` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::categories)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub sort_order: i32,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::categories)]
pub struct NewCategory {
    pub name: String,
    pub slug: String,
    pub sort_order: i32,
}

/// Row of the `motorcycle_categories` join table.
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::motorcycle_categories)]
pub struct NewMotorcycleCategory {
    pub motorcycle_id: i32,
    pub category_id: i32,
}

impl TryFrom<Category> for DomainCategory {
    type Error = TypeConstraintError;

    fn try_from(category: Category) -> Result<Self, Self::Error> {
        Ok(Self {
            id: category.id.try_into()?,
            name: CategoryName::new(category.name)?,
            slug: Slug::new(category.slug)?,
            sort_order: SortOrder::new(category.sort_order)?,
        })
    }
}

impl From<&DomainNewCategory> for NewCategory {
    fn from(category: &DomainNewCategory) -> Self {
        Self {
            name: category.name.as_str().to_string(),
            slug: category.slug.as_str().to_string(),
            sort_order: category.sort_order.get(),
        }
    }
}
