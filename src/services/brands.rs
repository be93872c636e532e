//! Brand and category administration.

use chrono::Utc;
use serde::Serialize;

use crate::cache::{CacheTag, PageCache};
use crate::domain::brand::Brand;
use crate::domain::category::{Category, NewCategory};
use crate::domain::types::{BrandId, CategoryId};
use crate::dto::catalog::{BrandOption, CategoryOption};
use crate::forms::brands::BrandFormPayload;
use crate::repository::{
    BrandReader, BrandWriter, CategoryReader, CategoryWriter, RepositoryError,
};
use crate::storage::{Bucket, ImageUrlResolver, ObjectKey, ObjectStorage};

use super::{ServiceError, ServiceResult};

pub const LOGO_PREFIX: &str = "brand-logos";
pub const BRAND_SLUG_TAKEN: &str = "Bu marka slug'ı zaten kullanılıyor";
pub const BRAND_IN_USE: &str = "Bu markaya bağlı motosikletler varken marka silinemez";

/// Row of the back office brand table.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BrandRow {
    #[serde(flatten)]
    pub brand: BrandOption,
    pub motorcycle_count: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BrandsPage {
    pub brands: Vec<BrandRow>,
    pub categories: Vec<CategoryOption>,
}

fn brand_tags(id: BrandId) -> [CacheTag; 3] {
    [
        CacheTag::MotorsList,
        CacheTag::HomeFeatured,
        CacheTag::Brand(id.get()),
    ]
}

pub fn list_brands_admin<R>(repo: &R, urls: &ImageUrlResolver) -> ServiceResult<BrandsPage>
where
    R: BrandReader + CategoryReader,
{
    let brands = match repo.list_brands(false) {
        Ok(brands) => brands,
        Err(e) => {
            log::error!("Failed to list brands: {e}");
            return Err(ServiceError::Internal);
        }
    };
    let categories = match repo.list_categories() {
        Ok(categories) => categories,
        Err(e) => {
            log::error!("Failed to list categories: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let mut rows = Vec::with_capacity(brands.len());
    for brand in &brands {
        let motorcycle_count = repo.count_brand_motorcycles(brand.id).unwrap_or_else(|e| {
            log::warn!("Failed to count motorcycles of brand {}: {e}", brand.id);
            0
        });
        rows.push(BrandRow {
            brand: BrandOption::new(brand, urls),
            motorcycle_count,
        });
    }

    Ok(BrandsPage {
        brands: rows,
        categories: categories.iter().map(CategoryOption::from).collect(),
    })
}

fn map_brand_write(e: RepositoryError) -> ServiceError {
    match e {
        RepositoryError::Conflict(_) => ServiceError::Conflict(BRAND_SLUG_TAKEN.to_string()),
        RepositoryError::NotFound => ServiceError::NotFound,
        other => {
            log::error!("Failed to save brand: {other}");
            ServiceError::Internal
        }
    }
}

pub fn create_brand<R, S>(
    payload: BrandFormPayload,
    repo: &R,
    storage: &S,
    cache: &PageCache,
) -> ServiceResult<Brand>
where
    R: BrandWriter,
    S: ObjectStorage,
{
    let BrandFormPayload { mut brand, logo, .. } = payload;

    let logo_key = match logo.as_ref() {
        Some(upload) => {
            let key = ObjectKey::generate(LOGO_PREFIX, &upload.file_name, Utc::now())?;
            storage.put(Bucket::Motors, &key, upload)?;
            Some(key)
        }
        None => None,
    };
    brand.logo_path = logo_key.as_ref().map(|key| key.as_str().to_string());

    match repo.create_brand(&brand) {
        Ok(created) => {
            cache.invalidate(&brand_tags(created.id));
            log::info!("Created brand {}", created.slug);
            Ok(created)
        }
        Err(e) => {
            if let Some(key) = logo_key {
                storage.delete_many(Bucket::Motors, &[key]);
            }
            Err(map_brand_write(e))
        }
    }
}

pub fn update_brand<R, S>(
    id: BrandId,
    payload: BrandFormPayload,
    repo: &R,
    storage: &S,
    cache: &PageCache,
) -> ServiceResult<Brand>
where
    R: BrandReader + BrandWriter,
    S: ObjectStorage,
{
    let BrandFormPayload {
        mut brand,
        logo,
        remove_logo,
    } = payload;

    let existing = match repo.get_brand_by_id(id) {
        Ok(Some(existing)) => existing,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get brand: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let new_logo = match logo.as_ref() {
        Some(upload) => {
            let key = ObjectKey::generate(LOGO_PREFIX, &upload.file_name, Utc::now())?;
            storage.put(Bucket::Motors, &key, upload)?;
            Some(key)
        }
        None => None,
    };
    brand.logo_path = match (&new_logo, remove_logo) {
        (Some(key), _) => Some(key.as_str().to_string()),
        (None, true) => None,
        (None, false) => existing.logo_path.clone(),
    };

    let updated = match repo.update_brand(id, &brand) {
        Ok(updated) => updated,
        Err(e) => {
            if let Some(key) = new_logo {
                storage.delete_many(Bucket::Motors, &[key]);
            }
            return Err(map_brand_write(e));
        }
    };

    if let Some(old) = existing
        .logo_path
        .as_deref()
        .filter(|old| updated.logo_path.as_deref() != Some(*old))
        .and_then(ObjectKey::from_stored_path)
    {
        storage.delete_many(Bucket::Motors, &[old]);
    }

    cache.invalidate(&brand_tags(id));
    Ok(updated)
}

pub fn delete_brand<R, S>(
    id: BrandId,
    repo: &R,
    storage: &S,
    cache: &PageCache,
) -> ServiceResult<()>
where
    R: BrandReader + BrandWriter,
    S: ObjectStorage,
{
    let existing = match repo.get_brand_by_id(id) {
        Ok(Some(existing)) => existing,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get brand: {e}");
            return Err(ServiceError::Internal);
        }
    };

    match repo.delete_brand(id) {
        Ok(0) => return Err(ServiceError::NotFound),
        Ok(_) => {}
        Err(RepositoryError::ForeignKey(_)) => {
            return Err(ServiceError::Conflict(BRAND_IN_USE.to_string()));
        }
        Err(e) => {
            log::error!("Failed to delete brand: {e}");
            return Err(ServiceError::Internal);
        }
    }

    if let Some(key) = existing
        .logo_path
        .as_deref()
        .and_then(ObjectKey::from_stored_path)
    {
        storage.delete_many(Bucket::Motors, &[key]);
    }
    cache.invalidate(&brand_tags(id));
    log::info!("Deleted brand {}", existing.slug);
    Ok(())
}

pub fn create_category<R>(
    category: &NewCategory,
    repo: &R,
    cache: &PageCache,
) -> ServiceResult<Category>
where
    R: CategoryWriter,
{
    match repo.create_category(category) {
        Ok(created) => {
            cache.invalidate(&[CacheTag::MotorsList]);
            Ok(created)
        }
        Err(RepositoryError::Conflict(_)) => Err(ServiceError::Conflict(
            "Bu kategori slug'ı zaten kullanılıyor".to_string(),
        )),
        Err(e) => {
            log::error!("Failed to create category: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Removes a category; links to motorcycles go with it.
pub fn delete_category<R>(id: CategoryId, repo: &R, cache: &PageCache) -> ServiceResult<()>
where
    R: CategoryWriter,
{
    match repo.delete_category(id) {
        Ok(0) => Err(ServiceError::NotFound),
        Ok(_) => {
            cache.invalidate(&[CacheTag::MotorsList]);
            Ok(())
        }
        Err(e) => {
            log::error!("Failed to delete category: {e}");
            Err(ServiceError::Internal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{CategoryName, Slug, SortOrder};
    use crate::repository::test::TestRepository;
    use crate::storage::Upload;
    use crate::storage::test::TestStorage;
    use std::time::Duration;

    fn cache() -> PageCache {
        PageCache::new(Duration::from_secs(60), crate::cache::DEFAULT_MAX_ENTRIES)
    }

    fn logo() -> Option<Upload> {
        Some(Upload {
            file_name: "logo.png".into(),
            content_type: Some("image/png".into()),
            bytes: vec![1, 2, 3],
        })
    }

    fn payload(name: &str, logo: Option<Upload>) -> BrandFormPayload {
        BrandFormPayload::from_fields(Some(name.into()), None, true, logo, false).unwrap()
    }

    fn urls() -> ImageUrlResolver {
        ImageUrlResolver::new("", [Bucket::Motors], b"secret", 60)
    }

    #[test]
    fn brand_lifecycle_with_logo() {
        let repo = TestRepository::new();
        let storage = TestStorage::new();
        let cache = cache();

        let brand = create_brand(payload("Kawasaki", logo()), &repo, &storage, &cache).unwrap();
        let first_logo = brand.logo_path.clone().unwrap();
        assert!(first_logo.starts_with("brand-logos/"));

        let updated =
            update_brand(brand.id, payload("Kawasaki", logo()), &repo, &storage, &cache).unwrap();
        let keys = storage.keys(Bucket::Motors);
        assert_eq!(keys.len(), 1);
        assert_eq!(updated.logo_path.as_deref(), Some(keys[0].as_str()));

        delete_brand(brand.id, &repo, &storage, &cache).unwrap();
        assert!(storage.keys(Bucket::Motors).is_empty());
        assert_eq!(
            delete_brand(brand.id, &repo, &storage, &cache),
            Err(ServiceError::NotFound)
        );
    }

    #[test]
    fn duplicate_slug_keeps_storage_clean() {
        let repo = TestRepository::new();
        let storage = TestStorage::new();
        create_brand(payload("Honda", None), &repo, &storage, &cache()).unwrap();

        assert_eq!(
            create_brand(payload("Honda", logo()), &repo, &storage, &cache()),
            Err(ServiceError::Conflict(BRAND_SLUG_TAKEN.to_string()))
        );
        assert!(storage.keys(Bucket::Motors).is_empty());
    }

    #[test]
    fn referenced_brand_cannot_be_deleted() {
        let repo = TestRepository::new();
        let storage = TestStorage::new();
        let brand = repo.add_brand("Yamaha", "yamaha");
        repo.add_motorcycle(&brand, "MT-07", "mt-07", 100.0);

        assert_eq!(
            delete_brand(brand.id, &repo, &storage, &cache()),
            Err(ServiceError::Conflict(BRAND_IN_USE.to_string()))
        );
        let page = list_brands_admin(&repo, &urls()).unwrap();
        assert_eq!(page.brands.len(), 1);
        assert_eq!(page.brands[0].motorcycle_count, 1);
    }

    #[test]
    fn categories_create_and_delete() {
        let repo = TestRepository::new();
        let new = NewCategory {
            name: CategoryName::new("Naked").unwrap(),
            slug: Slug::new("naked").unwrap(),
            sort_order: SortOrder::default(),
        };
        let created = create_category(&new, &repo, &cache()).unwrap();
        assert!(matches!(
            create_category(&new, &repo, &cache()),
            Err(ServiceError::Conflict(_))
        ));
        delete_category(created.id, &repo, &cache()).unwrap();
        assert_eq!(
            delete_category(created.id, &repo, &cache()),
            Err(ServiceError::NotFound)
        );
    }
}
