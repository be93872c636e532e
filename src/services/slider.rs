//! Hero carousel: storefront read path and back office management.

use chrono::{NaiveDateTime, Utc};

use crate::HOME_HERO_SLIDER;
use crate::cache::{CacheTag, PageCache};
use crate::domain::slider::{NewSlider, Slide, Slider, SliderSettings};
use crate::domain::types::{SlideId, SliderId, Slug};
use crate::dto::slider::{HeroView, SlideView, SliderAdminView};
use crate::forms::slides::{DesktopImage, QuickSlidePayload, SlideFormPayload};
use crate::repository::{RepositoryError, SliderReader, SliderWriter};
use crate::storage::{Bucket, ImageUrlResolver, ObjectKey, ObjectStorage, Upload};

use super::{ServiceError, ServiceResult};

pub const SLIDE_PREFIX: &str = "slides";
pub const SLIDER_NOT_FOUND: &str = "Slider bulunamadı";
pub const DESKTOP_IMAGE_REQUIRED: &str = "Desktop görsel gerekli";

fn get_slider<R: SliderReader>(repo: &R, id: SliderId) -> ServiceResult<Slider> {
    match repo.get_slider_by_id(id) {
        Ok(Some(slider)) => Ok(slider),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get slider: {e}");
            Err(ServiceError::Internal)
        }
    }
}

fn get_slide<R: SliderReader>(repo: &R, id: SlideId) -> ServiceResult<Slide> {
    match repo.get_slide_by_id(id) {
        Ok(Some(slide)) => Ok(slide),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get slide: {e}");
            Err(ServiceError::Internal)
        }
    }
}

fn slider_tag(slider: &Slider) -> [CacheTag; 1] {
    [CacheTag::Slider(slider.slug.as_str().to_string())]
}

fn store<S: ObjectStorage>(storage: &S, upload: &Upload) -> ServiceResult<ObjectKey> {
    let key = ObjectKey::generate(SLIDE_PREFIX, &upload.file_name, Utc::now())?;
    storage.put(Bucket::Sliders, &key, upload)?;
    Ok(key)
}

/// Drops objects created for a write that did not go through.
fn rollback<S: ObjectStorage>(storage: &S, keys: Vec<ObjectKey>) {
    if !keys.is_empty() {
        storage.delete_many(Bucket::Sliders, &keys);
    }
}

/// Removes stored images no longer referenced. External URLs are skipped.
fn discard<S: ObjectStorage>(storage: &S, paths: &[&str]) -> Vec<ObjectKey> {
    let keys: Vec<ObjectKey> = paths
        .iter()
        .filter_map(|path| ObjectKey::from_stored_path(path))
        .collect();
    if keys.is_empty() {
        return keys;
    }
    storage.delete_many(Bucket::Sliders, &keys)
}

/// Resolves the desktop image of a submission into a stored path, uploading
/// it when needed. Newly created keys are pushed onto `created`.
fn desktop_path<S: ObjectStorage>(
    storage: &S,
    desktop: Option<&DesktopImage>,
    created: &mut Vec<ObjectKey>,
) -> ServiceResult<Option<String>> {
    match desktop {
        Some(DesktopImage::External(url)) => Ok(Some(url.clone())),
        Some(DesktopImage::Upload(upload)) => {
            let key = store(storage, upload)?;
            let path = key.as_str().to_string();
            created.push(key);
            Ok(Some(path))
        }
        None => Ok(None),
    }
}

/// Visible slides of the `home-hero` slider.
///
/// Returns `None` when the slider is missing or inactive, or when no slide is
/// inside its publish window at `now`.
pub fn home_hero<R>(
    repo: &R,
    urls: &ImageUrlResolver,
    now: NaiveDateTime,
) -> ServiceResult<Option<HeroView>>
where
    R: SliderReader,
{
    let slug = Slug::new(HOME_HERO_SLIDER)?;
    let slider = match repo.get_slider_by_slug(&slug) {
        Ok(Some(slider)) if slider.is_active => slider,
        Ok(_) => return Ok(None),
        Err(e) => {
            log::error!("Failed to get home hero slider: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let slides = repo.list_slides(slider.id).map_err(|e| {
        log::error!("Failed to list slides: {e}");
        ServiceError::Internal
    })?;
    let slides: Vec<SlideView> = slides
        .iter()
        .filter(|slide| slide.is_visible_at(now))
        .filter_map(|slide| SlideView::new(slide, urls))
        .collect();
    if slides.is_empty() {
        return Ok(None);
    }

    let settings = match repo.get_slider_settings(slider.id) {
        Ok(settings) => settings.unwrap_or_else(SliderSettings::fallback),
        Err(e) => {
            log::warn!("Failed to get slider settings, using fallback: {e}");
            SliderSettings::fallback()
        }
    };

    Ok(Some(HeroView { slides, settings }))
}

pub fn list_sliders<R: SliderReader>(repo: &R) -> ServiceResult<Vec<Slider>> {
    repo.list_sliders().map_err(|e| {
        log::error!("Failed to list sliders: {e}");
        ServiceError::Internal
    })
}

pub fn create_slider<R: SliderWriter>(slider: &NewSlider, repo: &R) -> ServiceResult<Slider> {
    match repo.create_slider(slider) {
        Ok(created) => Ok(created),
        Err(RepositoryError::Conflict(_)) => Err(ServiceError::Conflict(
            "Bu slider slug'ı zaten kullanılıyor".to_string(),
        )),
        Err(e) => {
            log::error!("Failed to create slider: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Id of the slider with the given slug, for `GET /api/slider-id`.
pub fn slider_id_by_slug<R: SliderReader>(slug: &str, repo: &R) -> ServiceResult<SliderId> {
    let slug = Slug::new(slug).map_err(|_| ServiceError::NotFound)?;
    match repo.get_slider_by_slug(&slug) {
        Ok(Some(slider)) => Ok(slider.id),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get slider: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn show_slider<R>(
    id: SliderId,
    repo: &R,
    urls: &ImageUrlResolver,
) -> ServiceResult<SliderAdminView>
where
    R: SliderReader,
{
    let slider = get_slider(repo, id)?;
    let slides = repo.list_slides(id).map_err(|e| {
        log::error!("Failed to list slides: {e}");
        ServiceError::Internal
    })?;
    let stored = repo.get_slider_settings(id).map_err(|e| {
        log::error!("Failed to get slider settings: {e}");
        ServiceError::Internal
    })?;

    Ok(SliderAdminView {
        slides: slides
            .iter()
            .filter_map(|slide| SlideView::new(slide, urls))
            .collect(),
        has_settings: stored.is_some(),
        settings: stored.unwrap_or_default(),
        slider,
    })
}

/// A slide of `slider_id` for the edit form.
pub fn load_slide<R>(
    slider_id: SliderId,
    slide_id: SlideId,
    repo: &R,
    urls: &ImageUrlResolver,
) -> ServiceResult<SlideView>
where
    R: SliderReader,
{
    let slide = get_slide(repo, slide_id)?;
    if slide.slider_id != slider_id {
        return Err(ServiceError::NotFound);
    }
    SlideView::new(&slide, urls).ok_or(ServiceError::Internal)
}

pub fn create_slide<R, S>(
    slider_id: SliderId,
    payload: SlideFormPayload,
    repo: &R,
    storage: &S,
    cache: &PageCache,
) -> ServiceResult<Slide>
where
    R: SliderReader + SliderWriter,
    S: ObjectStorage,
{
    let slider = get_slider(repo, slider_id)?;
    if payload.desktop.is_none() {
        return Err(ServiceError::Form(DESKTOP_IMAGE_REQUIRED.to_string()));
    }

    let mut created = Vec::new();
    let desktop = desktop_path(storage, payload.desktop.as_ref(), &mut created)?
        .ok_or_else(|| ServiceError::Form(DESKTOP_IMAGE_REQUIRED.to_string()))?;
    let mobile = match payload.mobile.as_ref() {
        Some(upload) => match store(storage, upload) {
            Ok(key) => {
                let path = key.as_str().to_string();
                created.push(key);
                Some(path)
            }
            Err(e) => {
                rollback(storage, created);
                return Err(e);
            }
        },
        None => None,
    };

    let content = payload.details.into_content(desktop, mobile);
    match repo.create_slide(slider_id, &content) {
        Ok(slide) => {
            cache.invalidate(&slider_tag(&slider));
            log::info!("Created slide {} in slider {}", slide.id, slider.slug);
            Ok(slide)
        }
        Err(e) => {
            log::error!("Failed to create slide: {e}");
            rollback(storage, created);
            Err(ServiceError::Internal)
        }
    }
}

pub fn update_slide<R, S>(
    slider_id: SliderId,
    slide_id: SlideId,
    payload: SlideFormPayload,
    repo: &R,
    storage: &S,
    cache: &PageCache,
) -> ServiceResult<Slide>
where
    R: SliderReader + SliderWriter,
    S: ObjectStorage,
{
    let slider = get_slider(repo, slider_id)?;
    let existing = get_slide(repo, slide_id)?;
    if existing.slider_id != slider_id {
        return Err(ServiceError::NotFound);
    }

    let mut created = Vec::new();
    let desktop = desktop_path(storage, payload.desktop.as_ref(), &mut created)?
        .unwrap_or_else(|| existing.content.desktop_image_path.clone());
    let mobile = match (payload.mobile.as_ref(), payload.remove_mobile) {
        (Some(upload), _) => match store(storage, upload) {
            Ok(key) => {
                let path = key.as_str().to_string();
                created.push(key);
                Some(path)
            }
            Err(e) => {
                rollback(storage, created);
                return Err(e);
            }
        },
        (None, true) => None,
        (None, false) => existing.content.mobile_image_path.clone(),
    };

    let content = payload.details.into_content(desktop, mobile);
    let updated = match repo.update_slide(slide_id, &content) {
        Ok(updated) => updated,
        Err(e) => {
            log::error!("Failed to update slide: {e}");
            rollback(storage, created);
            return Err(ServiceError::Internal);
        }
    };

    let old = &existing.content;
    let new = &updated.content;
    let mut replaced = Vec::new();
    if old.desktop_image_path != new.desktop_image_path {
        replaced.push(old.desktop_image_path.as_str());
    }
    if let Some(path) = old
        .mobile_image_path
        .as_deref()
        .filter(|path| new.mobile_image_path.as_deref() != Some(*path))
        .filter(|path| *path != new.desktop_image_path)
    {
        replaced.push(path);
    }
    discard(storage, &replaced);

    cache.invalidate(&slider_tag(&slider));
    Ok(updated)
}

/// Deletes the row, then its stored images. Returns keys left in storage.
pub fn delete_slide<R, S>(
    slider_id: SliderId,
    slide_id: SlideId,
    repo: &R,
    storage: &S,
    cache: &PageCache,
) -> ServiceResult<Vec<ObjectKey>>
where
    R: SliderReader + SliderWriter,
    S: ObjectStorage,
{
    let slider = get_slider(repo, slider_id)?;
    let existing = get_slide(repo, slide_id)?;
    if existing.slider_id != slider_id {
        return Err(ServiceError::NotFound);
    }

    if let Err(e) = repo.delete_slide(slide_id) {
        log::error!("Failed to delete slide: {e}");
        return Err(ServiceError::Internal);
    }

    let content = &existing.content;
    let mut paths = vec![content.desktop_image_path.as_str()];
    if let Some(mobile) = content
        .mobile_image_path
        .as_deref()
        .filter(|mobile| *mobile != content.desktop_image_path)
    {
        paths.push(mobile);
    }
    let leftover = discard(storage, &paths);

    cache.invalidate(&slider_tag(&slider));
    Ok(leftover)
}

pub fn reorder_slides<R>(
    slider_id: SliderId,
    ids: &[SlideId],
    repo: &R,
    cache: &PageCache,
) -> ServiceResult<()>
where
    R: SliderReader + SliderWriter,
{
    let slider = get_slider(repo, slider_id)?;
    match repo.reorder_slides(slider_id, ids) {
        Ok(_) => {
            cache.invalidate(&slider_tag(&slider));
            Ok(())
        }
        Err(RepositoryError::ValidationError(_)) => Err(ServiceError::Form(
            "Sıralama slider'ın tüm slaytlarını içermeli".to_string(),
        )),
        Err(e) => {
            log::error!("Failed to reorder slides: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn update_slider_settings<R>(
    slider_id: SliderId,
    settings: &SliderSettings,
    repo: &R,
    cache: &PageCache,
) -> ServiceResult<()>
where
    R: SliderReader + SliderWriter,
{
    let slider = get_slider(repo, slider_id)?;
    match repo.upsert_slider_settings(slider_id, settings) {
        Ok(_) => {
            cache.invalidate(&slider_tag(&slider));
            Ok(())
        }
        Err(e) => {
            log::error!("Failed to update slider settings: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Image-only slide from `POST /api/slides`.
pub fn quick_add_slide<R, S>(
    payload: QuickSlidePayload,
    repo: &R,
    storage: &S,
    cache: &PageCache,
) -> ServiceResult<Slide>
where
    R: SliderReader + SliderWriter,
    S: ObjectStorage,
{
    let slider = match repo.get_slider_by_id(payload.slider_id) {
        Ok(Some(slider)) => slider,
        Ok(None) => return Err(ServiceError::Form(SLIDER_NOT_FOUND.to_string())),
        Err(e) => {
            log::error!("Failed to get slider: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let mut created = Vec::new();
    let desktop = desktop_path(storage, payload.desktop.as_ref(), &mut created)?
        .ok_or_else(|| ServiceError::Form("Resim gerekli".to_string()))?;

    let content = payload.into_content(desktop);
    match repo.create_slide(slider.id, &content) {
        Ok(slide) => {
            cache.invalidate(&slider_tag(&slider));
            Ok(slide)
        }
        Err(e) => {
            log::error!("Failed to create slide: {e}");
            rollback(storage, created);
            Err(ServiceError::Internal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::slides::{SlideDetails, SlideFields};
    use crate::repository::test::TestRepository;
    use crate::storage::test::TestStorage;
    use chrono::Duration;
    use std::time::Duration as StdDuration;

    fn cache() -> PageCache {
        PageCache::new(StdDuration::from_secs(60), crate::cache::DEFAULT_MAX_ENTRIES)
    }

    fn urls() -> ImageUrlResolver {
        ImageUrlResolver::new("", [Bucket::Sliders], b"secret", 60)
    }

    fn upload(name: &str) -> Upload {
        Upload {
            file_name: name.into(),
            content_type: Some("image/jpeg".into()),
            bytes: vec![1],
        }
    }

    fn payload(published: bool, desktop: Option<DesktopImage>) -> SlideFormPayload {
        SlideFormPayload {
            details: SlideDetails::try_from(SlideFields {
                title: Some("Yaz".into()),
                is_published: published,
                ..SlideFields::default()
            })
            .unwrap(),
            desktop,
            mobile: None,
            remove_mobile: false,
        }
    }

    fn now() -> NaiveDateTime {
        Utc::now().naive_utc()
    }

    #[test]
    fn create_requires_desktop_image() {
        let repo = TestRepository::new();
        let storage = TestStorage::new();
        let slider = repo.add_slider("Anasayfa", HOME_HERO_SLIDER);

        assert_eq!(
            create_slide(slider.id, payload(true, None), &repo, &storage, &cache()),
            Err(ServiceError::Form(DESKTOP_IMAGE_REQUIRED.to_string()))
        );
        assert_eq!(repo.slide_count(), 0);
    }

    #[test]
    fn slides_get_increasing_positions() {
        let repo = TestRepository::new();
        let storage = TestStorage::new();
        let slider = repo.add_slider("Anasayfa", HOME_HERO_SLIDER);

        let first = create_slide(
            slider.id,
            payload(true, Some(DesktopImage::Upload(upload("a.jpg")))),
            &repo,
            &storage,
            &cache(),
        )
        .unwrap();
        let second = create_slide(
            slider.id,
            payload(true, Some(DesktopImage::External("https://cdn.example.com/b.jpg".into()))),
            &repo,
            &storage,
            &cache(),
        )
        .unwrap();
        assert_eq!(first.sort_order.get(), 1);
        assert_eq!(second.sort_order.get(), 2);
        assert!(first.content.desktop_image_path.starts_with("slides/"));
        assert_eq!(storage.keys(Bucket::Sliders).len(), 1);
    }

    #[test]
    fn failed_insert_removes_uploads() {
        let repo = TestRepository::new();
        let storage = TestStorage::new();
        let slider = repo.add_slider("Anasayfa", HOME_HERO_SLIDER);
        repo.fail("create_slide");

        let mut p = payload(true, Some(DesktopImage::Upload(upload("a.jpg"))));
        p.mobile = Some(upload("m.jpg"));
        assert_eq!(
            create_slide(slider.id, p, &repo, &storage, &cache()),
            Err(ServiceError::Internal)
        );
        assert!(storage.keys(Bucket::Sliders).is_empty());
    }

    #[test]
    fn update_swaps_images_after_row_update() {
        let repo = TestRepository::new();
        let storage = TestStorage::new();
        let slider = repo.add_slider("Anasayfa", HOME_HERO_SLIDER);
        let slide = create_slide(
            slider.id,
            payload(true, Some(DesktopImage::Upload(upload("old.jpg")))),
            &repo,
            &storage,
            &cache(),
        )
        .unwrap();

        let updated = update_slide(
            slider.id,
            slide.id,
            payload(true, Some(DesktopImage::Upload(upload("new.jpg")))),
            &repo,
            &storage,
            &cache(),
        )
        .unwrap();
        assert_eq!(
            storage.keys(Bucket::Sliders),
            vec![updated.content.desktop_image_path.clone()]
        );

        // keeping the image leaves storage untouched
        let kept =
            update_slide(slider.id, slide.id, payload(false, None), &repo, &storage, &cache())
                .unwrap();
        assert_eq!(
            kept.content.desktop_image_path,
            updated.content.desktop_image_path
        );
        assert_eq!(storage.keys(Bucket::Sliders).len(), 1);
    }

    #[test]
    fn failed_update_keeps_old_objects() {
        let repo = TestRepository::new();
        let storage = TestStorage::new();
        let slider = repo.add_slider("Anasayfa", HOME_HERO_SLIDER);
        let slide = create_slide(
            slider.id,
            payload(true, Some(DesktopImage::Upload(upload("old.jpg")))),
            &repo,
            &storage,
            &cache(),
        )
        .unwrap();
        repo.fail("update_slide");

        assert!(
            update_slide(
                slider.id,
                slide.id,
                payload(true, Some(DesktopImage::Upload(upload("new.jpg")))),
                &repo,
                &storage,
                &cache(),
            )
            .is_err()
        );
        assert_eq!(
            storage.keys(Bucket::Sliders),
            vec![slide.content.desktop_image_path]
        );
    }

    #[test]
    fn delete_skips_external_urls() {
        let repo = TestRepository::new();
        let storage = TestStorage::new();
        let slider = repo.add_slider("Anasayfa", HOME_HERO_SLIDER);
        let external = create_slide(
            slider.id,
            payload(true, Some(DesktopImage::External("https://cdn.example.com/b.jpg".into()))),
            &repo,
            &storage,
            &cache(),
        )
        .unwrap();
        let stored = create_slide(
            slider.id,
            payload(true, Some(DesktopImage::Upload(upload("a.jpg")))),
            &repo,
            &storage,
            &cache(),
        )
        .unwrap();

        let leftover = delete_slide(slider.id, external.id, &repo, &storage, &cache()).unwrap();
        assert!(leftover.is_empty());
        assert_eq!(storage.keys(Bucket::Sliders).len(), 1);

        delete_slide(slider.id, stored.id, &repo, &storage, &cache()).unwrap();
        assert!(storage.keys(Bucket::Sliders).is_empty());
        assert_eq!(repo.slide_count(), 0);
    }

    #[test]
    fn reorder_is_dense_and_rejects_foreign_ids() {
        let repo = TestRepository::new();
        let storage = TestStorage::new();
        let slider = repo.add_slider("Anasayfa", HOME_HERO_SLIDER);
        let other = repo.add_slider("Kampanya", "kampanya");
        let mut ids = Vec::new();
        for _ in 0..3 {
            let slide = create_slide(
                slider.id,
                payload(true, Some(DesktopImage::External("https://cdn.example.com/a.jpg".into()))),
                &repo,
                &storage,
                &cache(),
            )
            .unwrap();
            ids.push(slide.id);
        }
        let foreign = create_slide(
            other.id,
            payload(true, Some(DesktopImage::External("https://cdn.example.com/a.jpg".into()))),
            &repo,
            &storage,
            &cache(),
        )
        .unwrap();

        reorder_slides(slider.id, &[ids[2], ids[0], ids[1]], &repo, &cache()).unwrap();
        let order: Vec<(SlideId, i32)> = repo
            .list_slides(slider.id)
            .unwrap()
            .iter()
            .map(|s| (s.id, s.sort_order.get()))
            .collect();
        assert_eq!(order, vec![(ids[2], 1), (ids[0], 2), (ids[1], 3)]);

        assert!(matches!(
            reorder_slides(slider.id, &[ids[0], ids[1], foreign.id], &repo, &cache()),
            Err(ServiceError::Form(_))
        ));
    }

    #[test]
    fn home_hero_shows_only_visible_slides_with_fallback_settings() {
        let repo = TestRepository::new();
        let storage = TestStorage::new();
        assert_eq!(home_hero(&repo, &urls(), now()), Ok(None));

        let slider = repo.add_slider("Anasayfa", HOME_HERO_SLIDER);
        create_slide(
            slider.id,
            payload(false, Some(DesktopImage::External("https://cdn.example.com/a.jpg".into()))),
            &repo,
            &storage,
            &cache(),
        )
        .unwrap();
        assert_eq!(home_hero(&repo, &urls(), now()), Ok(None));

        let mut scheduled = payload(
            true,
            Some(DesktopImage::External("https://cdn.example.com/b.jpg".into())),
        );
        scheduled.details.publish_at = Some(now() + Duration::days(1));
        create_slide(slider.id, scheduled, &repo, &storage, &cache()).unwrap();
        create_slide(
            slider.id,
            payload(true, Some(DesktopImage::Upload(upload("c.jpg")))),
            &repo,
            &storage,
            &cache(),
        )
        .unwrap();

        let hero = home_hero(&repo, &urls(), now()).unwrap().unwrap();
        assert_eq!(hero.slides.len(), 1);
        assert!(hero.slides[0].desktop_image_url.starts_with("/storage/public/sliders/slides/"));
        assert_eq!(hero.settings, SliderSettings::fallback());

        let custom = SliderSettings::default();
        update_slider_settings(slider.id, &custom, &repo, &cache()).unwrap();
        let hero = home_hero(&repo, &urls(), now()).unwrap().unwrap();
        assert_eq!(hero.settings, custom);
    }

    #[test]
    fn slider_lookup_by_slug() {
        let repo = TestRepository::new();
        assert_eq!(
            slider_id_by_slug(HOME_HERO_SLIDER, &repo),
            Err(ServiceError::NotFound)
        );
        let slider = repo.add_slider("Anasayfa", HOME_HERO_SLIDER);
        assert_eq!(slider_id_by_slug(HOME_HERO_SLIDER, &repo), Ok(slider.id));
    }

    #[test]
    fn quick_add_uses_defaults() {
        let repo = TestRepository::new();
        let storage = TestStorage::new();
        let slider = repo.add_slider("Anasayfa", HOME_HERO_SLIDER);
        let slide = quick_add_slide(
            QuickSlidePayload {
                slider_id: slider.id,
                title: "Resim".into(),
                alt: "Slider resmi".into(),
                desktop: Some(DesktopImage::Upload(upload("q.jpg"))),
                is_published: true,
            },
            &repo,
            &storage,
            &cache(),
        )
        .unwrap();
        assert_eq!(
            slide.content.mobile_image_path.as_deref(),
            Some(slide.content.desktop_image_path.as_str())
        );

        assert_eq!(
            quick_add_slide(
                QuickSlidePayload {
                    slider_id: slider.id,
                    title: "Resim".into(),
                    alt: "Slider resmi".into(),
                    desktop: None,
                    is_published: true,
                },
                &repo,
                &storage,
                &cache(),
            ),
            Err(ServiceError::Form("Resim gerekli".to_string()))
        );
    }
}
