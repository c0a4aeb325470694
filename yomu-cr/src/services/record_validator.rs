//! Direct-match validation of catalog records
//!
//! A record is a confirmed match when its cross-reference links point
//! back at the series' own ids. Either the AniList link or the
//! MyAnimeList link alone is sufficient; the links are string-encoded by
//! the catalog and compared numerically after parsing.

use crate::models::{ComicRecord, SeriesIdentity};

/// True iff the record's `al` link equals the series' AniList id, or the
/// series has a MAL id and the record's `mal` link equals it.
///
/// Pure; only logs.
pub fn is_direct_match(record: &ComicRecord, identity: &SeriesIdentity) -> bool {
    if link_matches(record.links.al.as_deref(), identity.anilist_id) {
        tracing::debug!(
            slug = record.slug.as_deref().unwrap_or("<none>"),
            anilist_id = identity.anilist_id,
            "Record confirmed via AniList link"
        );
        return true;
    }

    if let Some(mal_id) = identity.mal_id {
        if link_matches(record.links.mal.as_deref(), mal_id) {
            tracing::debug!(
                slug = record.slug.as_deref().unwrap_or("<none>"),
                mal_id,
                "Record confirmed via MyAnimeList link"
            );
            return true;
        }
    }

    false
}

/// Normalized comparison of a string-encoded link id against a numeric id
fn link_matches(link: Option<&str>, id: i64) -> bool {
    match link {
        Some(value) => value.trim().parse::<i64>() == Ok(id),
        None => false,
    }
}
