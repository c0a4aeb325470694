//! Data models for the catalog resolver

pub mod comic;
pub mod identity;

pub use comic::{
    CanonicalComic, ComicLinks, ComicRecord, DetailPayload, FirstChapter, SearchHit,
    ValidatedRecord,
};
pub use identity::SeriesIdentity;
