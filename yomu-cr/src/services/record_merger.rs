//! Field-wise merge of validated records into one canonical record
//!
//! Different catalog entries for the same series are partial in different
//! ways: the popular entry has the follow count but no description, the
//! official entry has the description but lags chapters. The merge takes
//! the primary record (highest follow count, chosen by the coordinator)
//! as the base and fills gaps from the remaining validated records.
//!
//! Policies:
//! - scalar fields: first non-null, primary first, then `others` in the
//!   order supplied (insertion order of the validated set, so results are
//!   deterministic for identical upstream data);
//! - `last_chapter`: maximum across all records, nulls ignored; any
//!   edition may be ahead of the primary one;
//! - list fields: first non-empty list wins whole, no element union;
//! - `slug`: the primary's, verbatim.

use crate::models::{CanonicalComic, ComicRecord, ValidatedRecord};

/// Merge `primary` with `others` into the canonical record.
///
/// Merging with an empty `others` is the identity lift of the primary
/// record into [`CanonicalComic`].
pub fn merge(primary: &ValidatedRecord, others: &[&ValidatedRecord]) -> CanonicalComic {
    let p = &primary.record;

    tracing::debug!(
        slug = %primary.slug,
        sources = others.len() + 1,
        "Merging validated records"
    );

    CanonicalComic {
        slug: primary.slug.clone(),
        title: first_value(p.title.clone(), others, |r| r.title.clone()),
        description: first_value(p.description.clone(), others, |r| r.description.clone()),
        user_follow_count: first_value(p.user_follow_count, others, |r| r.user_follow_count),
        last_chapter: max_last_chapter(p, others),
        chapter_count: first_value(p.chapter_count, others, |r| r.chapter_count),
        has_anime: first_value(p.has_anime, others, |r| r.has_anime),
        translation_completed: first_value(p.translation_completed, others, |r| {
            r.translation_completed
        }),
        alternative_titles: first_filled(&p.alternative_titles, others, |r| &r.alternative_titles),
        genres: first_filled(&p.genres, others, |r| &r.genres),
        recommendations: first_filled(&p.recommendations, others, |r| &r.recommendations),
    }
}

/// First non-null scalar, scanning primary then `others` in order
fn first_value<T, F>(primary: Option<T>, others: &[&ValidatedRecord], get: F) -> Option<T>
where
    F: Fn(&ComicRecord) -> Option<T>,
{
    primary.or_else(|| others.iter().find_map(|v| get(&v.record)))
}

/// First non-empty list, scanning primary then `others` in order
fn first_filled<'a, F>(
    primary: &'a Vec<String>,
    others: &'a [&'a ValidatedRecord],
    get: F,
) -> Vec<String>
where
    F: Fn(&'a ComicRecord) -> &'a Vec<String>,
{
    std::iter::once(primary)
        .chain(others.iter().map(|v| get(&v.record)))
        .find(|list| !list.is_empty())
        .cloned()
        .unwrap_or_default()
}

/// Maximum `last_chapter` across all records; null only when all are null
fn max_last_chapter(primary: &ComicRecord, others: &[&ValidatedRecord]) -> Option<f64> {
    std::iter::once(primary.last_chapter)
        .chain(others.iter().map(|v| v.record.last_chapter))
        .flatten()
        .reduce(f64::max)
}
