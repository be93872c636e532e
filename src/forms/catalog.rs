use serde::Deserialize;

/// Query string of `/modeller`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogQuery {
    pub brand: Option<String>,
    pub category: Option<String>,
    pub sort: Option<String>,
}

/// `?page=&limit=` of paginated admin and API lists.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<usize>,
    pub limit: Option<usize>,
    pub search: Option<String>,
}
