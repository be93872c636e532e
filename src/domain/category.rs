use serde::{Deserialize, Serialize};

use crate::domain::types::{CategoryId, CategoryName, Slug, SortOrder};

/// Catalog grouping such as "Scooter" or "Naked".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: CategoryId,
    pub name: CategoryName,
    pub slug: Slug,
    pub sort_order: SortOrder,
}

/// Data required to insert a new [`Category`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewCategory {
    pub name: CategoryName,
    pub slug: Slug,
    pub sort_order: SortOrder,
}
