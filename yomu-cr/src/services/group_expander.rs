//! Transitive rescue through shared MangaUpdates ids
//!
//! Records that fail direct link validation can still be legitimate
//! editions of the series (colored versions, official vs. scanlation
//! entries) that simply lack the AniList/MAL links. When such a record
//! shares a MangaUpdates id with a record that *did* validate, it is
//! promoted into the validated set.
//!
//! This is a single pass, not a fixed-point closure: a record rescued
//! here does not cause further rescues through its own group id within
//! the same call. Deeper chains have never been observed to add genuine
//! matches, only noise from MangaUpdates' loose curation.

use std::collections::HashSet;

use crate::models::ComicRecord;

/// Promote every potential record whose MangaUpdates id is already known
/// from a validated record. Rescued records without a slug are unusable
/// downstream and dropped.
pub fn rescue(
    potential: Vec<(ComicRecord, Option<String>)>,
    known_group_ids: &HashSet<String>,
) -> Vec<ComicRecord> {
    let mut rescued = Vec::new();

    for (record, group_id) in potential {
        let Some(group_id) = group_id else { continue };

        if !known_group_ids.contains(&group_id) {
            continue;
        }

        if record.slug.is_none() {
            tracing::debug!(group_id = %group_id, "Dropping slugless record from group rescue");
            continue;
        }

        tracing::debug!(
            slug = record.slug.as_deref().unwrap_or("<none>"),
            group_id = %group_id,
            "Rescued record via shared MangaUpdates id"
        );
        rescued.push(record);
    }

    rescued
}
