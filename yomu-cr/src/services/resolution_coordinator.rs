//! Resolution pipeline
//!
//! Drives one full resolution of a series against the catalog:
//!
//! 1. fetch and validate the pre-linked slugs, in order;
//! 2. rescue near-misses that share a MangaUpdates id with a validated
//!    record (single pass);
//! 3. search each candidate title in caller order, validating hits
//!    against the series ids and against a group-id snapshot frozen
//!    before the title loop;
//! 4. merge the validated set, cache the result, return the canonical
//!    slug.
//!
//! Every individual catalog failure is absorbed as "no data for this
//! candidate" and logged; the pipeline only fails by running out of
//! candidates. The cache write is the final step of a completed call, so
//! an abandoned (dropped) resolution never publishes partial state.

use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::models::{
    CanonicalComic, ComicRecord, DetailPayload, FirstChapter, SeriesIdentity, ValidatedRecord,
};
use crate::services::catalog_client::CatalogSource;
use crate::services::resolution_cache::ResolutionCache;
use crate::services::{group_expander, record_merger, record_validator};

/// Orchestrates catalog lookups, validation, merge, and caching
pub struct ResolutionCoordinator {
    catalog: Arc<dyn CatalogSource>,
    cache: Arc<ResolutionCache>,
}

/// Confirmed records accumulated during one resolution call
#[derive(Default)]
struct ValidatedSet {
    records: Vec<ValidatedRecord>,
    seen_slugs: HashSet<String>,
    group_ids: HashSet<String>,
}

impl ValidatedSet {
    /// Admit a confirmed record: slugless records are unusable, duplicate
    /// slugs are skipped, MangaUpdates ids are collected for rescue.
    fn admit(&mut self, record: ComicRecord) {
        let Some(validated) = ValidatedRecord::new(record) else {
            warn!("Discarding confirmed record without slug");
            return;
        };

        if !self.seen_slugs.insert(validated.slug.clone()) {
            debug!(slug = %validated.slug, "Skipping duplicate validated record");
            return;
        }

        if let Some(group_id) = validated.record.links.mu.clone() {
            self.group_ids.insert(group_id);
        }

        self.records.push(validated);
    }

    fn contains(&self, slug: &str) -> bool {
        self.seen_slugs.contains(slug)
    }
}

impl ResolutionCoordinator {
    pub fn new(catalog: Arc<dyn CatalogSource>, cache: Arc<ResolutionCache>) -> Self {
        Self { catalog, cache }
    }

    /// Resolve a series to its canonical catalog slug.
    ///
    /// `None` means nothing in the catalog could be confirmed; the cache
    /// is left untouched in that case.
    pub async fn resolve(&self, identity: &SeriesIdentity) -> Option<String> {
        info!(
            anilist_id = identity.anilist_id,
            mal_id = ?identity.mal_id,
            linked_slugs = identity.linked_slugs.len(),
            titles = identity.title_candidates.len(),
            "Resolving series against catalog"
        );

        let mut set = ValidatedSet::default();

        // Pre-linked slugs first: the linking service's guesses are the
        // cheapest candidates and seed the group ids for rescue.
        let mut potential: Vec<(ComicRecord, Option<String>)> = Vec::new();
        for slug in &identity.linked_slugs {
            let Some(payload) = self.detail_absorbed(slug).await else {
                continue;
            };

            let record = payload.comic;
            if record_validator::is_direct_match(&record, identity) {
                set.admit(record);
            } else {
                let group_id = record.links.mu.clone();
                potential.push((record, group_id));
            }
        }

        for record in group_expander::rescue(potential, &set.group_ids) {
            set.admit(record);
        }

        // Title search phase. The group-id set is frozen here: ids
        // discovered under one title do not rescue records under a later
        // title in the same call.
        let snapshot = set.group_ids.clone();
        for title in &identity.title_candidates {
            if title.trim().is_empty() {
                continue;
            }

            let hits = match self.catalog.search(title).await {
                Ok(hits) => hits,
                Err(e) => {
                    warn!(title = %title, error = %e, "Catalog search failed; skipping title");
                    continue;
                }
            };

            let mut batch: Vec<(ComicRecord, Option<String>)> = Vec::new();
            for hit in hits {
                let Some(slug) = hit.slug else { continue };
                if set.contains(&slug) {
                    continue;
                }

                let Some(payload) = self.detail_absorbed(&slug).await else {
                    continue;
                };

                let record = payload.comic;
                if record_validator::is_direct_match(&record, identity) {
                    set.admit(record);
                } else {
                    let group_id = record.links.mu.clone();
                    batch.push((record, group_id));
                }
            }

            for record in group_expander::rescue(batch, &snapshot) {
                set.admit(record);
            }
        }

        if set.records.is_empty() {
            info!(
                anilist_id = identity.anilist_id,
                "No catalog record validated; series unresolved"
            );
            return None;
        }

        let primary_idx = select_primary(&set.records);
        let primary = &set.records[primary_idx];
        let others: Vec<&ValidatedRecord> = set
            .records
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != primary_idx)
            .map(|(_, validated)| validated)
            .collect();

        let canonical = record_merger::merge(primary, &others);
        let slug = canonical.slug.clone();

        info!(
            anilist_id = identity.anilist_id,
            slug = %slug,
            validated = set.records.len(),
            "Series resolved"
        );

        self.cache.put(canonical).await;
        Some(slug)
    }

    /// Merged record plus the live first-chapter pointer.
    ///
    /// The cache only covers merge-relevant fields; `first_chapter` is
    /// always taken from a fresh detail fetch, even on a cache hit. On a
    /// cache miss the live record itself is returned (when it has a
    /// slug) without writing the cache; only resolution writes it.
    pub async fn detail_with_cache(
        &self,
        slug: &str,
        use_cache: bool,
    ) -> (Option<CanonicalComic>, Option<FirstChapter>) {
        let live = self.detail_absorbed(slug).await;
        let first_chapter = live.as_ref().and_then(|p| p.first_chapter.clone());

        if use_cache {
            if let Some(cached) = self.cache.get(slug).await {
                debug!(slug = %slug, "Serving merged record from cache");
                return (Some(cached), first_chapter);
            }
        }

        let canonical = live
            .and_then(|payload| ValidatedRecord::new(payload.comic))
            .map(|validated| record_merger::merge(&validated, &[]));

        (canonical, first_chapter)
    }

    /// Detail fetch with all failure modes folded into absence
    async fn detail_absorbed(&self, slug: &str) -> Option<DetailPayload> {
        match self.catalog.detail(slug).await {
            Ok(Some(payload)) => Some(payload),
            Ok(None) => {
                debug!(slug = %slug, "Catalog has no record for slug");
                None
            }
            Err(e) => {
                warn!(slug = %slug, error = %e, "Catalog detail fetch failed; treating as absent");
                None
            }
        }
    }
}

/// Index of the primary record: maximum follow count, first wins on ties
fn select_primary(records: &[ValidatedRecord]) -> usize {
    let mut best = 0;
    for (idx, record) in records.iter().enumerate().skip(1) {
        if record.follow_count() > records[best].follow_count() {
            best = idx;
        }
    }
    best
}
