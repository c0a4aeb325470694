//! Process-lifetime cache of merged canonical records
//!
//! One instance is created at service start and owned by `AppState`;
//! it is never torn down. Entries are keyed by canonical slug and
//! overwritten on every successful resolution. No eviction and no TTL:
//! the catalog is only ever queried for the small, bounded set of series
//! the user actively tracks, so the map stays tiny.
//!
//! Access goes through an async `RwLock` so two resolutions racing on
//! the same slug serialize instead of losing an update.

use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::models::CanonicalComic;

/// Shared store of the last merged record per canonical slug
#[derive(Default)]
pub struct ResolutionCache {
    entries: RwLock<HashMap<String, CanonicalComic>>,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last merged record for this slug, if any
    pub async fn get(&self, slug: &str) -> Option<CanonicalComic> {
        self.entries.read().await.get(slug).cloned()
    }

    /// Store (or overwrite) the merged record, keyed by its slug
    pub async fn put(&self, record: CanonicalComic) {
        let slug = record.slug.clone();
        let previous = self.entries.write().await.insert(slug.clone(), record);

        if previous.is_some() {
            tracing::debug!(slug = %slug, "Replaced cached canonical record");
        } else {
            tracing::debug!(slug = %slug, "Cached canonical record");
        }
    }

    /// Number of cached records (diagnostics only)
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canonical(slug: &str, last_chapter: Option<f64>) -> CanonicalComic {
        CanonicalComic {
            slug: slug.into(),
            title: None,
            description: None,
            user_follow_count: None,
            last_chapter,
            chapter_count: None,
            has_anime: None,
            translation_completed: None,
            alternative_titles: Vec::new(),
            genres: Vec::new(),
            recommendations: Vec::new(),
        }
    }

    #[tokio::test]
    async fn get_returns_none_for_unknown_slug() {
        let cache = ResolutionCache::new();
        assert!(cache.get("nothing").await.is_none());
    }

    #[tokio::test]
    async fn put_then_get_round_trips() {
        let cache = ResolutionCache::new();
        cache.put(canonical("berserk", Some(374.0))).await;

        let cached = cache.get("berserk").await.unwrap();
        assert_eq!(cached.last_chapter, Some(374.0));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn put_overwrites_previous_entry() {
        let cache = ResolutionCache::new();
        cache.put(canonical("berserk", Some(10.0))).await;
        cache.put(canonical("berserk", Some(11.0))).await;

        assert_eq!(cache.len().await, 1);
        assert_eq!(cache.get("berserk").await.unwrap().last_chapter, Some(11.0));
    }
}
