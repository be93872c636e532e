//! Site content singletons (contact, footer, prefooter banner) and FAQ.

use crate::cache::{CacheTag, PageCache};
use crate::domain::content::{ContactSettings, Faq, FooterLinks, PrefooterBanner};
use crate::domain::types::FaqId;
use crate::dto::content::{ContactView, LayoutView};
use crate::forms::content::FaqPayload;
use crate::repository::{ContentReader, ContentWriter, RepositoryError};

use super::{ServiceError, ServiceResult};

/// Shared layout data. Failures degrade to empty sections so one broken
/// singleton does not take every page down.
pub fn layout<R: ContentReader>(repo: &R) -> LayoutView {
    let contact = repo.get_contact_settings().unwrap_or_else(|e| {
        log::warn!("Failed to get contact settings: {e}");
        None
    });
    let footer = repo.get_footer_links().unwrap_or_else(|e| {
        log::warn!("Failed to get footer links: {e}");
        None
    });
    let banner = repo.get_prefooter_banner().unwrap_or_else(|e| {
        log::warn!("Failed to get prefooter banner: {e}");
        None
    });
    LayoutView {
        contact: contact.map(ContactView::from),
        footer: footer.unwrap_or_default(),
        banner: banner.filter(|b| b.is_active),
    }
}

pub fn get_contact<R: ContentReader>(repo: &R) -> ServiceResult<Option<ContactView>> {
    match repo.get_contact_settings() {
        Ok(settings) => Ok(settings.map(ContactView::from)),
        Err(e) => {
            log::error!("Failed to get contact settings: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn save_contact<R: ContentWriter>(
    settings: &ContactSettings,
    repo: &R,
    cache: &PageCache,
) -> ServiceResult<()> {
    match repo.save_contact_settings(settings) {
        Ok(_) => {
            cache.invalidate(&[CacheTag::Contact]);
            Ok(())
        }
        Err(e) => {
            log::error!("Failed to save contact settings: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn list_faqs<R: ContentReader>(published_only: bool, repo: &R) -> ServiceResult<Vec<Faq>> {
    repo.list_faqs(published_only).map_err(|e| {
        log::error!("Failed to list faqs: {e}");
        ServiceError::Internal
    })
}

/// Creates the entry, or updates it when the payload carries an id.
pub fn save_faq<R: ContentWriter>(
    payload: &FaqPayload,
    repo: &R,
    cache: &PageCache,
) -> ServiceResult<Faq> {
    let result = match payload.id {
        Some(id) => repo.update_faq(id, &payload.faq),
        None => repo.create_faq(&payload.faq),
    };
    match result {
        Ok(faq) => {
            cache.invalidate(&[CacheTag::Faq]);
            Ok(faq)
        }
        Err(RepositoryError::NotFound) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to save faq: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn delete_faq<R: ContentWriter>(id: FaqId, repo: &R, cache: &PageCache) -> ServiceResult<()> {
    match repo.delete_faq(id) {
        Ok(0) => Err(ServiceError::NotFound),
        Ok(_) => {
            cache.invalidate(&[CacheTag::Faq]);
            Ok(())
        }
        Err(e) => {
            log::error!("Failed to delete faq: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn get_footer_links<R: ContentReader>(repo: &R) -> ServiceResult<FooterLinks> {
    match repo.get_footer_links() {
        Ok(links) => Ok(links.unwrap_or_default()),
        Err(e) => {
            log::error!("Failed to get footer links: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn save_footer_links<R: ContentWriter>(
    links: &FooterLinks,
    repo: &R,
    cache: &PageCache,
) -> ServiceResult<()> {
    match repo.save_footer_links(links) {
        Ok(_) => {
            cache.invalidate(&[CacheTag::Footer]);
            Ok(())
        }
        Err(e) => {
            log::error!("Failed to save footer links: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// The banner, or `None` when it is switched off.
pub fn get_prefooter_banner<R: ContentReader>(repo: &R) -> ServiceResult<Option<PrefooterBanner>> {
    match repo.get_prefooter_banner() {
        Ok(banner) => Ok(banner.filter(|b| b.is_active)),
        Err(e) => {
            log::error!("Failed to get prefooter banner: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn save_prefooter_banner<R: ContentWriter>(
    banner: &PrefooterBanner,
    repo: &R,
    cache: &PageCache,
) -> ServiceResult<()> {
    match repo.save_prefooter_banner(banner) {
        Ok(_) => {
            cache.invalidate(&[CacheTag::Prefooter]);
            Ok(())
        }
        Err(e) => {
            log::error!("Failed to save prefooter banner: {e}");
            Err(ServiceError::Internal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::content::NewFaq;
    use crate::domain::types::{BannerHeight, SortOrder};
    use crate::repository::test::TestRepository;
    use std::time::Duration;

    fn cache() -> PageCache {
        PageCache::new(Duration::from_secs(60), crate::cache::DEFAULT_MAX_ENTRIES)
    }

    fn faq(question: &str, order: i32, published: bool) -> FaqPayload {
        FaqPayload {
            id: None,
            faq: NewFaq {
                question: question.into(),
                answer: "Evet.".into(),
                sort_order: SortOrder::new(order).unwrap(),
                is_published: published,
            },
        }
    }

    #[test]
    fn public_faq_list_is_sorted_and_published_only() {
        let repo = TestRepository::new();
        save_faq(&faq("B", 2, true), &repo, &cache()).unwrap();
        save_faq(&faq("A", 1, true), &repo, &cache()).unwrap();
        save_faq(&faq("Gizli", 0, false), &repo, &cache()).unwrap();

        let questions: Vec<String> = list_faqs(true, &repo)
            .unwrap()
            .into_iter()
            .map(|f| f.question)
            .collect();
        assert_eq!(questions, vec!["A", "B"]);
        assert_eq!(list_faqs(false, &repo).unwrap().len(), 3);
    }

    #[test]
    fn faq_update_and_delete() {
        let repo = TestRepository::new();
        let cache = cache();
        let created = save_faq(&faq("Soru", 1, true), &repo, &cache).unwrap();

        let mut update = faq("Yeni soru", 1, true);
        update.id = Some(created.id);
        assert_eq!(save_faq(&update, &repo, &cache).unwrap().question, "Yeni soru");

        delete_faq(created.id, &repo, &cache).unwrap();
        assert_eq!(delete_faq(created.id, &repo, &cache), Err(ServiceError::NotFound));
        assert_eq!(save_faq(&update, &repo, &cache), Err(ServiceError::NotFound));
    }

    #[test]
    fn inactive_banner_is_hidden() {
        let repo = TestRepository::new();
        let mut banner = PrefooterBanner {
            image_url: None,
            mobile_image_url: None,
            image_alt: None,
            height: BannerHeight::Md,
            cta_text: Some("Tüm Modelleri Gör".into()),
            cta_href: None,
            is_active: false,
        };
        save_prefooter_banner(&banner, &repo, &cache()).unwrap();
        assert_eq!(get_prefooter_banner(&repo), Ok(None));
        assert_eq!(layout(&repo).banner, None);

        banner.is_active = true;
        save_prefooter_banner(&banner, &repo, &cache()).unwrap();
        assert_eq!(get_prefooter_banner(&repo), Ok(Some(banner)));
    }

    #[test]
    fn contact_writes_invalidate_cached_pages() {
        let repo = TestRepository::new();
        let cache = cache();
        cache.insert("/iletisim", "page".into(), vec![CacheTag::Contact]);
        save_contact(
            &ContactSettings {
                address: "Turgutlu".into(),
                phone: "+90 532 152 51 45".into(),
                email: "info@trendmotor.com".into(),
                hours: String::new(),
                map_lat: None,
                map_lng: None,
                map_zoom: 14,
            },
            &repo,
            &cache,
        )
        .unwrap();
        assert!(cache.is_empty());
        assert_eq!(get_contact(&repo).unwrap().unwrap().address, "Turgutlu");
    }
}
