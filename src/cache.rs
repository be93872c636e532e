//! Rendered page cache with tag based invalidation.
//!
//! Public pages are stored under their request path and query string. Each
//! entry carries the tags of the entities it was rendered from, and admin
//! mutations drop every entry sharing one of the mutated entity's tags.
//! The number of entries is bounded; when full, the oldest page is evicted.

use std::collections::{HashMap, HashSet};
use std::fmt::{Display, Formatter};
use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Invalidation tag derived from entity identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheTag {
    MotorsList,
    HomeFeatured,
    Motor(String),
    Brand(i32),
    Slider(String),
    Contact,
    Faq,
    Footer,
    Prefooter,
}

impl Display for CacheTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheTag::MotorsList => f.write_str("motors:list"),
            CacheTag::HomeFeatured => f.write_str("home:featured"),
            CacheTag::Motor(slug) => write!(f, "motor:{slug}"),
            CacheTag::Brand(id) => write!(f, "brand:{id}"),
            CacheTag::Slider(slug) => write!(f, "slider:{slug}"),
            CacheTag::Contact => f.write_str("contact"),
            CacheTag::Faq => f.write_str("faq"),
            CacheTag::Footer => f.write_str("footer"),
            CacheTag::Prefooter => f.write_str("prefooter"),
        }
    }
}

/// Tags every layout-wide page depends on (header, footer, contact block).
pub fn layout_tags() -> Vec<CacheTag> {
    vec![
        CacheTag::Contact,
        CacheTag::Footer,
        CacheTag::Prefooter,
    ]
}

struct CachedPage {
    body: String,
    tags: HashSet<CacheTag>,
    stored_at: Instant,
    /// Insertion order; the lowest is evicted first.
    seq: u64,
}

/// Entry cap used when the configuration does not set one.
pub const DEFAULT_MAX_ENTRIES: usize = 512;

pub struct PageCache {
    ttl: Duration,
    max_entries: usize,
    next_seq: AtomicU64,
    entries: RwLock<HashMap<String, CachedPage>>,
}

impl PageCache {
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            ttl,
            max_entries,
            next_seq: AtomicU64::new(0),
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Fresh body stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<String> {
        let entries = self
            .entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        entries
            .get(key)
            .filter(|page| page.stored_at.elapsed() < self.ttl)
            .map(|page| page.body.clone())
    }

    pub fn insert(&self, key: impl Into<String>, body: String, tags: Vec<CacheTag>) {
        if self.ttl.is_zero() || self.max_entries == 0 {
            return;
        }
        let key = key.into();
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.retain(|_, page| page.stored_at.elapsed() < self.ttl);
        if entries.len() >= self.max_entries && !entries.contains_key(&key) {
            if let Some(oldest) = entries
                .iter()
                .min_by_key(|(_, page)| page.seq)
                .map(|(key, _)| key.clone())
            {
                log::debug!("Page cache full, evicting {oldest}");
                entries.remove(&oldest);
            }
        }
        entries.insert(
            key,
            CachedPage {
                body,
                tags: tags.into_iter().collect(),
                stored_at: Instant::now(),
                seq: self.next_seq.fetch_add(1, Ordering::Relaxed),
            },
        );
    }

    /// Drops every entry carrying any of `tags`. Returns how many were dropped.
    pub fn invalidate(&self, tags: &[CacheTag]) -> usize {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let before = entries.len();
        entries.retain(|_, page| !tags.iter().any(|tag| page.tags.contains(tag)));
        let dropped = before - entries.len();
        if dropped > 0 {
            let names: Vec<String> = tags.iter().map(ToString::to_string).collect();
            log::debug!("Invalidated {dropped} cached pages for [{}]", names.join(", "));
        }
        dropped
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
