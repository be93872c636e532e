//! Public catalog reads: listing, featured carousel and the detail page.

use crate::domain::motorcycle::CatalogSort;
use crate::domain::types::Slug;
use crate::dto::catalog::{
    BrandOption, CatalogView, CategoryOption, GalleryImage, MotorcycleCard,
    MotorcycleDetailView, group_spec_items,
};
use crate::forms::catalog::CatalogQuery;
use crate::repository::{
    BrandReader, CategoryReader, MotorcycleImageReader, MotorcycleListQuery, MotorcycleReader,
    SpecItemReader,
};
use crate::storage::ImageUrlResolver;

use super::{ServiceError, ServiceResult};

/// Cards shown in the home page carousel.
pub const FEATURED_LIMIT: usize = 12;
/// Cards shown under "related models" on the detail page.
pub const RELATED_LIMIT: usize = 4;

fn parse_filter_slug(value: Option<&str>) -> Option<Result<Slug, ()>> {
    let value = value.map(str::trim).filter(|v| !v.is_empty())?;
    Some(Slug::new(value).map_err(|_| ()))
}

/// Catalog grid with its filter bar.
///
/// A brand or category slug that does not match any row yields an empty
/// grid rather than an unfiltered one.
pub fn list_catalog<R>(
    query: &CatalogQuery,
    repo: &R,
    urls: &ImageUrlResolver,
) -> ServiceResult<CatalogView>
where
    R: MotorcycleReader + BrandReader + CategoryReader,
{
    let brands = repo.list_brands(true).map_err(|e| {
        log::error!("Failed to list brands: {e}");
        ServiceError::Internal
    })?;
    let categories = repo.list_categories().map_err(|e| {
        log::error!("Failed to list categories: {e}");
        ServiceError::Internal
    })?;

    let sort = CatalogSort::from_query(query.sort.as_deref());
    let mut list_query = MotorcycleListQuery::published().sort(sort);
    let mut unmatched = false;

    match parse_filter_slug(query.brand.as_deref()) {
        Some(Ok(slug)) => match brands.iter().find(|b| b.slug == slug) {
            Some(brand) => list_query = list_query.brand(brand.id),
            None => unmatched = true,
        },
        Some(Err(())) => unmatched = true,
        None => {}
    }

    match parse_filter_slug(query.category.as_deref()) {
        Some(Ok(slug)) => match categories.iter().find(|c| c.slug == slug) {
            Some(category) => list_query = list_query.category(category.id),
            None => unmatched = true,
        },
        Some(Err(())) => unmatched = true,
        None => {}
    }

    let motorcycles = if unmatched {
        Vec::new()
    } else {
        match repo.list_motorcycles(list_query) {
            Ok((_total, items)) => items
                .iter()
                .map(|item| MotorcycleCard::new(item, urls))
                .collect(),
            Err(e) => {
                log::error!("Failed to list motorcycles: {e}");
                return Err(ServiceError::Internal);
            }
        }
    };

    Ok(CatalogView {
        motorcycles,
        brands: brands.iter().map(|b| BrandOption::new(b, urls)).collect(),
        categories: categories.iter().map(CategoryOption::from).collect(),
        selected_brand: query.brand.clone().filter(|b| !b.trim().is_empty()),
        selected_category: query.category.clone().filter(|c| !c.trim().is_empty()),
        sort: sort.as_str(),
    })
}

/// Featured first, then admin order, then newest.
pub fn list_featured<R>(repo: &R, urls: &ImageUrlResolver) -> ServiceResult<Vec<MotorcycleCard>>
where
    R: MotorcycleReader,
{
    let query = MotorcycleListQuery::published()
        .sort(CatalogSort::Featured)
        .limit(FEATURED_LIMIT);

    match repo.list_motorcycles(query) {
        Ok((_total, items)) => Ok(items
            .iter()
            .map(|item| MotorcycleCard::new(item, urls))
            .collect()),
        Err(e) => {
            log::error!("Failed to list featured motorcycles: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Detail page of a published motorcycle.
///
/// The motorcycle row is required. Gallery, spec sheet and related models
/// are loaded independently; a failing section is logged, left empty and
/// named in `degraded_sections`.
pub fn show_motorcycle<R>(
    slug: &str,
    repo: &R,
    urls: &ImageUrlResolver,
) -> ServiceResult<MotorcycleDetailView>
where
    R: MotorcycleReader + MotorcycleImageReader + SpecItemReader,
{
    let slug = Slug::new(slug).map_err(|_| ServiceError::NotFound)?;

    let item = match repo.get_motorcycle_by_slug(&slug) {
        Ok(Some(item)) if item.motorcycle.is_published => item,
        Ok(_) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get motorcycle by slug: {e}");
            return Err(ServiceError::Internal);
        }
    };
    let motorcycle = &item.motorcycle;
    let mut degraded_sections = Vec::new();

    let images = match repo.list_motorcycle_images(motorcycle.id) {
        Ok(images) => images
            .iter()
            .filter_map(|image| GalleryImage::new(image, motorcycle.name.as_str(), urls))
            .collect(),
        Err(e) => {
            log::warn!("Failed to list images of {}: {e}", motorcycle.slug);
            degraded_sections.push("images");
            Vec::new()
        }
    };

    let spec_groups = match repo.list_spec_items(motorcycle.id) {
        Ok(items) => group_spec_items(&items),
        Err(e) => {
            log::warn!("Failed to list spec items of {}: {e}", motorcycle.slug);
            degraded_sections.push("specs");
            Vec::new()
        }
    };

    let related_query = MotorcycleListQuery::published()
        .brand(motorcycle.brand_id)
        .exclude(motorcycle.id)
        .sort(CatalogSort::FeaturedNewest)
        .limit(RELATED_LIMIT);
    let related = match repo.list_motorcycles(related_query) {
        Ok((_total, items)) => items
            .iter()
            .map(|related| MotorcycleCard::new(related, urls))
            .collect(),
        Err(e) => {
            log::warn!("Failed to list related motorcycles of {}: {e}", motorcycle.slug);
            degraded_sections.push("related");
            Vec::new()
        }
    };

    Ok(MotorcycleDetailView {
        motorcycle: MotorcycleCard::new(&item, urls),
        brand_id: motorcycle.brand_id.get(),
        description: motorcycle.description.clone(),
        images,
        spec_groups,
        related,
        degraded_sections,
    })
}
