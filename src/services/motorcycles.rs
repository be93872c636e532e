//! Back office operations on motorcycles, their gallery and spec sheet.
//!
//! Uploads happen before the database write that references them. When the
//! write fails the fresh objects are removed again; replaced objects are only
//! removed once the row no longer points at them.

use chrono::{Duration, Utc};

use crate::cache::{CacheTag, PageCache};
use crate::domain::motorcycle::{
    CatalogSort, Motorcycle, MotorcycleImage, NewMotorcycleImage, NewSpecItem,
};
use crate::domain::types::{CategoryId, MotorcycleId, MotorcycleImageId, Slug};
use crate::dto::catalog::{
    BrandOption, CategoryOption, GalleryImage, MotorcycleCard, MotorcycleEditorView,
    spec_items_to_text,
};
use crate::forms::catalog::PageQuery;
use crate::forms::motorcycles::{ImageUploadPayload, MotorcycleFormPayload};
use crate::pagination::{PageInfo, Pagination};
use crate::repository::{
    BrandReader, CategoryReader, CategoryWriter, MotorcycleImageReader, MotorcycleImageWriter,
    MotorcycleListQuery, MotorcycleReader, MotorcycleWriter, RepositoryError, SpecItemReader,
    SpecItemWriter,
};
use crate::storage::{Bucket, ImageUrlResolver, ObjectKey, ObjectStorage, Upload};

use super::{ServiceError, ServiceResult};

pub const SLUG_TAKEN: &str = "Bu URL slug zaten kullanılıyor";
pub const HERO_PREFIX: &str = "hero-images";

fn gallery_prefix(id: MotorcycleId) -> String {
    format!("motorcycles/{}", id.get())
}

/// Tags touched by any change to a motorcycle.
pub fn motorcycle_tags<'a>(slugs: impl IntoIterator<Item = &'a Slug>) -> Vec<CacheTag> {
    let mut tags = vec![CacheTag::MotorsList, CacheTag::HomeFeatured];
    for slug in slugs {
        let tag = CacheTag::Motor(slug.as_str().to_string());
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}

fn map_write_error(e: RepositoryError) -> ServiceError {
    match e {
        RepositoryError::Conflict(_) => ServiceError::Conflict(SLUG_TAKEN.to_string()),
        RepositoryError::ForeignKey(_) => ServiceError::Form("Marka bulunamadı".to_string()),
        RepositoryError::NotFound => ServiceError::NotFound,
        RepositoryError::ValidationError(message) => ServiceError::Form(message),
        other => {
            log::error!("Failed to save motorcycle: {other}");
            ServiceError::Internal
        }
    }
}

fn store<S: ObjectStorage>(
    storage: &S,
    prefix: &str,
    upload: &Upload,
    offset_ms: i64,
) -> ServiceResult<ObjectKey> {
    let key = ObjectKey::generate(
        prefix,
        &upload.file_name,
        Utc::now() + Duration::milliseconds(offset_ms),
    )?;
    storage.put(Bucket::Motors, &key, upload)?;
    Ok(key)
}

/// Best-effort removal of objects that are no longer referenced.
fn discard<S: ObjectStorage>(storage: &S, paths: &[String]) -> Vec<ObjectKey> {
    let keys: Vec<ObjectKey> = paths
        .iter()
        .filter_map(|path| ObjectKey::from_stored_path(path))
        .collect();
    if keys.is_empty() {
        return keys;
    }
    storage.delete_many(Bucket::Motors, &keys)
}

fn get_existing<R: MotorcycleReader>(repo: &R, id: MotorcycleId) -> ServiceResult<Motorcycle> {
    match repo.get_motorcycle_by_id(id) {
        Ok(Some(motorcycle)) => Ok(motorcycle),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get motorcycle: {e}");
            Err(ServiceError::Internal)
        }
    }
}

fn ensure_slug_free<R: MotorcycleReader>(
    repo: &R,
    slug: &Slug,
    exclude: Option<MotorcycleId>,
) -> ServiceResult<()> {
    match repo.motorcycle_slug_taken(slug, exclude) {
        Ok(false) => Ok(()),
        Ok(true) => Err(ServiceError::Conflict(SLUG_TAKEN.to_string())),
        Err(e) => {
            log::error!("Failed to check motorcycle slug: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Paginated back office list, optionally filtered by name.
pub fn list_motorcycles_admin<R>(
    query: &PageQuery,
    repo: &R,
    urls: &ImageUrlResolver,
) -> ServiceResult<(PageInfo, Vec<MotorcycleCard>)>
where
    R: MotorcycleReader,
{
    let pagination = Pagination::clamped(query.page, query.limit.or(Some(20)));
    let mut list_query = MotorcycleListQuery::default()
        .sort(CatalogSort::Name)
        .paginate(pagination.page, pagination.per_page);
    if let Some(search) = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        list_query = list_query.search(search);
    }

    match repo.list_motorcycles(list_query) {
        Ok((total, items)) => Ok((
            PageInfo::new(pagination, total),
            items
                .iter()
                .map(|item| MotorcycleCard::new(item, urls))
                .collect(),
        )),
        Err(e) => {
            log::error!("Failed to list motorcycles: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Data for the create (`id = None`) or edit page.
pub fn load_editor<R>(
    id: Option<MotorcycleId>,
    repo: &R,
    urls: &ImageUrlResolver,
) -> ServiceResult<MotorcycleEditorView>
where
    R: MotorcycleReader + MotorcycleImageReader + SpecItemReader + BrandReader + CategoryReader,
{
    let brands = repo.list_brands(false).map_err(|e| {
        log::error!("Failed to list brands: {e}");
        ServiceError::Internal
    })?;
    let categories = repo.list_categories().map_err(|e| {
        log::error!("Failed to list categories: {e}");
        ServiceError::Internal
    })?;

    let mut view = MotorcycleEditorView {
        motorcycle: None,
        hero_image_url: None,
        images: Vec::new(),
        specs_text: String::new(),
        brands: brands.iter().map(|b| BrandOption::new(b, urls)).collect(),
        categories: categories.iter().map(CategoryOption::from).collect(),
        selected_category_ids: Vec::new(),
    };

    let Some(id) = id else {
        return Ok(view);
    };

    let motorcycle = get_existing(repo, id)?;
    let images = repo.list_motorcycle_images(id).map_err(|e| {
        log::error!("Failed to list motorcycle images: {e}");
        ServiceError::Internal
    })?;
    let specs = repo.list_spec_items(id).map_err(|e| {
        log::error!("Failed to list spec items: {e}");
        ServiceError::Internal
    })?;
    let selected = repo.list_motorcycle_categories(id).map_err(|e| {
        log::error!("Failed to list motorcycle categories: {e}");
        ServiceError::Internal
    })?;

    view.hero_image_url = motorcycle
        .hero_image_path
        .as_deref()
        .and_then(|path| urls.resolve(Bucket::Motors, path));
    view.images = images
        .iter()
        .filter_map(|image| GalleryImage::new(image, motorcycle.name.as_str(), urls))
        .collect();
    view.specs_text = spec_items_to_text(&specs);
    view.selected_category_ids = selected.iter().map(|c| c.id.get()).collect();
    view.motorcycle = Some(motorcycle);
    Ok(view)
}

fn assign_categories<R: CategoryWriter>(repo: &R, id: MotorcycleId, ids: &[CategoryId]) {
    if let Err(e) = repo.set_motorcycle_categories(id, ids) {
        log::error!("Failed to set motorcycle categories: {e}");
    }
}

/// Adds gallery uploads to a motorcycle. Individual failures are logged and
/// skipped; returns the stored images.
fn attach_gallery<R, S>(
    repo: &R,
    storage: &S,
    id: MotorcycleId,
    uploads: &[Upload],
    first_is_primary: bool,
) -> Vec<MotorcycleImage>
where
    R: MotorcycleImageWriter,
    S: ObjectStorage,
{
    let prefix = gallery_prefix(id);
    let mut stored = Vec::new();
    for (index, upload) in uploads.iter().enumerate() {
        let key = match store(storage, &prefix, upload, index as i64) {
            Ok(key) => key,
            Err(e) => {
                log::error!("Failed to upload gallery image {index}: {e}");
                continue;
            }
        };
        let image = NewMotorcycleImage {
            motorcycle_id: id,
            path: key.as_str().to_string(),
            alt: None,
            is_primary: first_is_primary && index == 0,
        };
        match repo.add_motorcycle_image(&image) {
            Ok(image) => stored.push(image),
            Err(e) => {
                log::error!("Failed to add motorcycle image: {e}");
                storage.delete_many(Bucket::Motors, &[key]);
            }
        }
    }
    stored
}

pub fn create_motorcycle<R, S>(
    payload: MotorcycleFormPayload,
    repo: &R,
    storage: &S,
    cache: &PageCache,
) -> ServiceResult<Motorcycle>
where
    R: MotorcycleReader + MotorcycleWriter + MotorcycleImageWriter + BrandReader + CategoryWriter,
    S: ObjectStorage,
{
    let MotorcycleFormPayload {
        mut motorcycle,
        category_ids,
        hero_image,
        gallery,
        ..
    } = payload;

    ensure_slug_free(repo, &motorcycle.slug, None)?;
    match repo.get_brand_by_id(motorcycle.brand_id) {
        Ok(Some(_)) => {}
        Ok(None) => return Err(ServiceError::Form("Marka bulunamadı".to_string())),
        Err(e) => {
            log::error!("Failed to get brand: {e}");
            return Err(ServiceError::Internal);
        }
    }

    let hero_key = match hero_image.as_ref() {
        Some(upload) => Some(store(storage, HERO_PREFIX, upload, 0)?),
        None => None,
    };
    motorcycle.hero_image_path = hero_key.as_ref().map(|key| key.as_str().to_string());

    let created = match repo.create_motorcycle(&motorcycle) {
        Ok(created) => created,
        Err(e) => {
            if let Some(key) = hero_key {
                storage.delete_many(Bucket::Motors, &[key]);
            }
            return Err(map_write_error(e));
        }
    };

    if let Some(ids) = category_ids.filter(|ids| !ids.is_empty()) {
        assign_categories(repo, created.id, &ids);
    }
    attach_gallery(repo, storage, created.id, &gallery, true);

    cache.invalidate(&motorcycle_tags([&created.slug]));
    log::info!("Created motorcycle {} ({})", created.slug, created.id);
    Ok(created)
}

pub fn update_motorcycle<R, S>(
    id: MotorcycleId,
    payload: MotorcycleFormPayload,
    repo: &R,
    storage: &S,
    cache: &PageCache,
) -> ServiceResult<Motorcycle>
where
    R: MotorcycleReader
        + MotorcycleWriter
        + MotorcycleImageReader
        + MotorcycleImageWriter
        + CategoryWriter,
    S: ObjectStorage,
{
    let MotorcycleFormPayload {
        mut motorcycle,
        category_ids,
        sort_order,
        hero_image,
        remove_hero_image,
        gallery,
        ..
    } = payload;

    let existing = get_existing(repo, id)?;
    motorcycle.sort_order = sort_order.unwrap_or(existing.sort_order);
    ensure_slug_free(repo, &motorcycle.slug, Some(id))?;

    let new_hero = match hero_image.as_ref() {
        Some(upload) => Some(store(storage, HERO_PREFIX, upload, 0)?),
        None => None,
    };
    motorcycle.hero_image_path = match (&new_hero, remove_hero_image) {
        (Some(key), _) => Some(key.as_str().to_string()),
        (None, true) => None,
        (None, false) => existing.hero_image_path.clone(),
    };

    let updated = match repo.update_motorcycle(id, &motorcycle) {
        Ok(updated) => updated,
        Err(e) => {
            if let Some(key) = new_hero {
                storage.delete_many(Bucket::Motors, &[key]);
            }
            return Err(map_write_error(e));
        }
    };

    if let Some(old) = existing.hero_image_path.as_ref() {
        if updated.hero_image_path.as_ref() != Some(old) {
            discard(storage, std::slice::from_ref(old));
        }
    }

    if let Some(ids) = category_ids {
        assign_categories(repo, id, &ids);
    }

    if !gallery.is_empty() {
        let has_images = repo
            .list_motorcycle_images(id)
            .map(|images| !images.is_empty())
            .unwrap_or(true);
        attach_gallery(repo, storage, id, &gallery, !has_images);
    }

    cache.invalidate(&motorcycle_tags([&existing.slug, &updated.slug]));
    Ok(updated)
}

/// Deletes the row (gallery, specs and category links cascade), then the
/// stored images. Returns the keys that could not be removed from storage.
pub fn delete_motorcycle<R, S>(
    id: MotorcycleId,
    repo: &R,
    storage: &S,
    cache: &PageCache,
) -> ServiceResult<Vec<ObjectKey>>
where
    R: MotorcycleReader + MotorcycleWriter + MotorcycleImageReader,
    S: ObjectStorage,
{
    let existing = get_existing(repo, id)?;
    let images = repo.list_motorcycle_images(id).map_err(|e| {
        log::error!("Failed to list motorcycle images: {e}");
        ServiceError::Internal
    })?;

    let mut paths: Vec<String> = images.into_iter().map(|image| image.path).collect();
    if let Some(hero) = existing.hero_image_path.clone() {
        paths.push(hero);
    }

    match repo.delete_motorcycle(id) {
        Ok(_) => {}
        Err(RepositoryError::NotFound) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to delete motorcycle: {e}");
            return Err(ServiceError::Internal);
        }
    }

    let leftover = discard(storage, &paths);
    cache.invalidate(&motorcycle_tags([&existing.slug]));
    log::info!("Deleted motorcycle {} ({})", existing.slug, id);
    Ok(leftover)
}

fn toggle<R, F>(
    id: MotorcycleId,
    repo: &R,
    cache: &PageCache,
    write: F,
) -> ServiceResult<Motorcycle>
where
    R: MotorcycleReader,
    F: FnOnce() -> Result<usize, RepositoryError>,
{
    let existing = get_existing(repo, id)?;
    match write() {
        Ok(_) => {}
        Err(e) => {
            log::error!("Failed to update motorcycle flag: {e}");
            return Err(ServiceError::Internal);
        }
    }
    cache.invalidate(&motorcycle_tags([&existing.slug]));
    get_existing(repo, id)
}

pub fn set_published<R>(
    id: MotorcycleId,
    value: bool,
    repo: &R,
    cache: &PageCache,
) -> ServiceResult<Motorcycle>
where
    R: MotorcycleReader + MotorcycleWriter,
{
    toggle(id, repo, cache, || repo.set_motorcycle_published(id, value))
}

pub fn set_featured<R>(
    id: MotorcycleId,
    value: bool,
    repo: &R,
    cache: &PageCache,
) -> ServiceResult<Motorcycle>
where
    R: MotorcycleReader + MotorcycleWriter,
{
    toggle(id, repo, cache, || repo.set_motorcycle_featured(id, value))
}

pub fn upload_image<R, S>(
    id: MotorcycleId,
    payload: ImageUploadPayload,
    repo: &R,
    storage: &S,
    cache: &PageCache,
) -> ServiceResult<MotorcycleImage>
where
    R: MotorcycleReader + MotorcycleImageWriter,
    S: ObjectStorage,
{
    let existing = get_existing(repo, id)?;
    let key = store(storage, &gallery_prefix(id), &payload.upload, 0)?;

    let image = NewMotorcycleImage {
        motorcycle_id: id,
        path: key.as_str().to_string(),
        alt: payload.alt,
        is_primary: payload.is_primary,
    };
    match repo.add_motorcycle_image(&image) {
        Ok(image) => {
            cache.invalidate(&motorcycle_tags([&existing.slug]));
            Ok(image)
        }
        Err(e) => {
            log::error!("Failed to add motorcycle image: {e}");
            storage.delete_many(Bucket::Motors, &[key]);
            Err(ServiceError::Internal)
        }
    }
}

fn get_owned_image<R: MotorcycleImageReader>(
    repo: &R,
    id: MotorcycleId,
    image_id: MotorcycleImageId,
) -> ServiceResult<MotorcycleImage> {
    match repo.get_motorcycle_image(image_id) {
        Ok(Some(image)) if image.motorcycle_id == id => Ok(image),
        Ok(_) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get motorcycle image: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn set_primary_image<R>(
    id: MotorcycleId,
    image_id: MotorcycleImageId,
    repo: &R,
    cache: &PageCache,
) -> ServiceResult<()>
where
    R: MotorcycleReader + MotorcycleImageReader + MotorcycleImageWriter,
{
    let existing = get_existing(repo, id)?;
    get_owned_image(repo, id, image_id)?;
    match repo.set_primary_image(id, image_id) {
        Ok(_) => {
            cache.invalidate(&motorcycle_tags([&existing.slug]));
            Ok(())
        }
        Err(RepositoryError::NotFound) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to set primary image: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn reorder_images<R>(
    id: MotorcycleId,
    ids: &[MotorcycleImageId],
    repo: &R,
    cache: &PageCache,
) -> ServiceResult<()>
where
    R: MotorcycleReader + MotorcycleImageWriter,
{
    let existing = get_existing(repo, id)?;
    match repo.reorder_motorcycle_images(id, ids) {
        Ok(_) => {
            cache.invalidate(&motorcycle_tags([&existing.slug]));
            Ok(())
        }
        Err(RepositoryError::ValidationError(_)) => Err(ServiceError::Form(
            "Sıralama motosikletin tüm görsellerini içermeli".to_string(),
        )),
        Err(e) => {
            log::error!("Failed to reorder motorcycle images: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Removes a gallery image row, then its object. Returns keys left in storage.
pub fn delete_image<R, S>(
    id: MotorcycleId,
    image_id: MotorcycleImageId,
    repo: &R,
    storage: &S,
    cache: &PageCache,
) -> ServiceResult<Vec<ObjectKey>>
where
    R: MotorcycleReader + MotorcycleImageReader + MotorcycleImageWriter,
    S: ObjectStorage,
{
    let existing = get_existing(repo, id)?;
    let image = get_owned_image(repo, id, image_id)?;
    match repo.delete_motorcycle_image(image_id) {
        Ok(_) => {}
        Err(e) => {
            log::error!("Failed to delete motorcycle image: {e}");
            return Err(ServiceError::Internal);
        }
    }
    let leftover = discard(storage, &[image.path]);
    cache.invalidate(&motorcycle_tags([&existing.slug]));
    Ok(leftover)
}

pub fn replace_spec_items<R>(
    id: MotorcycleId,
    items: &[NewSpecItem],
    repo: &R,
    cache: &PageCache,
) -> ServiceResult<usize>
where
    R: MotorcycleReader + SpecItemWriter,
{
    let existing = get_existing(repo, id)?;
    match repo.replace_spec_items(id, items) {
        Ok(count) => {
            cache.invalidate(&motorcycle_tags([&existing.slug]));
            Ok(count)
        }
        Err(e) => {
            log::error!("Failed to replace spec items: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn set_categories<R>(
    id: MotorcycleId,
    category_ids: &[CategoryId],
    repo: &R,
    cache: &PageCache,
) -> ServiceResult<()>
where
    R: MotorcycleReader + CategoryWriter,
{
    let existing = get_existing(repo, id)?;
    match repo.set_motorcycle_categories(id, category_ids) {
        Ok(_) => {
            cache.invalidate(&motorcycle_tags([&existing.slug]));
            Ok(())
        }
        Err(RepositoryError::ForeignKey(_)) => {
            Err(ServiceError::Form("Kategori bulunamadı".to_string()))
        }
        Err(e) => {
            log::error!("Failed to set motorcycle categories: {e}");
            Err(ServiceError::Internal)
        }
    }
}
