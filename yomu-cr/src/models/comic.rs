//! Catalog record types
//!
//! Upstream catalog data is partial and noisy: every field that the
//! catalog has ever omitted, nulled, or mistyped is modeled as an
//! explicit `Option` rather than assumed present.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Cross-reference links carried by a catalog record.
///
/// `al` and `mal` are the strong identity signals (AniList and
/// MyAnimeList ids, string-encoded by the catalog). `mu` is the
/// loosely-curated MangaUpdates series id, used only to rescue
/// otherwise-unconfirmed records, never as primary confirmation.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ComicLinks {
    pub al: Option<String>,
    pub mal: Option<String>,
    pub mu: Option<String>,
    /// Whatever other link keys the catalog carries (raw, unused here)
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// One raw entry fetched from the external catalog.
///
/// Identity within the catalog is the slug; two fetches of the same slug
/// are not guaranteed byte-identical since upstream data changes.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ComicRecord {
    /// Catalog primary key; absent on malformed payloads
    pub slug: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub user_follow_count: Option<u64>,
    /// Latest chapter number known to the catalog (fractional chapters exist)
    pub last_chapter: Option<f64>,
    pub chapter_count: Option<u32>,
    pub has_anime: Option<bool>,
    pub translation_completed: Option<bool>,
    pub alternative_titles: Vec<String>,
    pub genres: Vec<String>,
    pub recommendations: Vec<String>,
    pub links: ComicLinks,
}

/// Lightweight search result; only the slug matters downstream
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchHit {
    pub slug: Option<String>,
    pub title: Option<String>,
}

/// First-chapter pointer returned alongside a detail fetch.
///
/// Never cached: callers use it to deep-link into the newest data, so it
/// is always taken from a live fetch.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct FirstChapter {
    pub chapter: Option<String>,
    /// Catalog-internal chapter handle
    pub hid: Option<String>,
    pub lang: Option<String>,
    pub volume: Option<String>,
}

/// Full body of a detail fetch: the record plus the live-only supplement
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DetailPayload {
    pub comic: ComicRecord,
    pub first_chapter: Option<FirstChapter>,
}

/// A catalog record confirmed to represent the series being resolved,
/// with its slug made non-optional.
///
/// Constructed only through [`ValidatedRecord::new`], which refuses
/// slugless records, so everything downstream (primary selection, merge,
/// cache keying) can rely on the slug being present.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRecord {
    pub slug: String,
    pub record: ComicRecord,
}

impl ValidatedRecord {
    /// Wrap a record, or `None` if it carries no slug
    pub fn new(record: ComicRecord) -> Option<Self> {
        let slug = record.slug.clone()?;
        Some(Self { slug, record })
    }

    /// Popularity signal used for primary selection; absent counts as zero
    pub fn follow_count(&self) -> u64 {
        self.record.user_follow_count.unwrap_or(0)
    }
}

/// The merged canonical record for one resolved series.
///
/// Same shape as [`ComicRecord`] except the slug is guaranteed present.
/// Owned by the resolution cache after creation; read-only to callers.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct CanonicalComic {
    pub slug: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub user_follow_count: Option<u64>,
    pub last_chapter: Option<f64>,
    pub chapter_count: Option<u32>,
    pub has_anime: Option<bool>,
    pub translation_completed: Option<bool>,
    pub alternative_titles: Vec<String>,
    pub genres: Vec<String>,
    pub recommendations: Vec<String>,
}
