//! Canonical series identity

use serde::{Deserialize, Serialize};

/// The stable identity of the series being resolved against the catalog.
///
/// Built once per resolution call from the tracker's own database plus
/// whatever the linking service and title scraper already discovered.
/// The AniList id is the anchor; everything else is optional help.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SeriesIdentity {
    /// AniList id of the series (required anchor)
    pub anilist_id: i64,
    /// MyAnimeList id, when the tracker knows it
    #[serde(default)]
    pub mal_id: Option<i64>,
    /// Human-readable titles to try against catalog search, in preference order
    #[serde(default)]
    pub title_candidates: Vec<String>,
    /// Catalog slugs supplied by the external linking service, believed
    /// (but not confirmed) to correspond to this series
    #[serde(default)]
    pub linked_slugs: Vec<String>,
}

impl SeriesIdentity {
    /// Identity with only the required AniList anchor set
    pub fn new(anilist_id: i64) -> Self {
        Self {
            anilist_id,
            mal_id: None,
            title_candidates: Vec::new(),
            linked_slugs: Vec::new(),
        }
    }
}
