//! Shared test helpers: scripted in-memory catalog and record builders
#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use yomu_cr::models::{ComicRecord, DetailPayload, FirstChapter, SearchHit};
use yomu_cr::services::{CatalogError, CatalogSource};

/// One scripted outcome for a detail fetch
#[derive(Clone)]
pub enum DetailOutcome {
    Payload(DetailPayload),
    Missing,
    NetworkFailure,
}

/// In-memory catalog with scripted responses.
///
/// Detail outcomes are per-slug sequences: each fetch consumes the next
/// entry, and the last entry repeats once the script runs out (so
/// "unchanged upstream" is the default after the scripted changes).
#[derive(Default)]
pub struct ScriptedCatalog {
    searches: HashMap<String, Vec<SearchHit>>,
    failing_searches: HashSet<String>,
    details: HashMap<String, Vec<DetailOutcome>>,
    cursors: Mutex<HashMap<String, usize>>,
    detail_calls: Mutex<Vec<String>>,
}

impl ScriptedCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script search hits (slugs in relevance order) for a title
    pub fn with_search(mut self, title: &str, slugs: &[&str]) -> Self {
        let hits = slugs
            .iter()
            .map(|slug| SearchHit {
                slug: Some(slug.to_string()),
                title: None,
            })
            .collect();
        self.searches.insert(title.to_string(), hits);
        self
    }

    /// Script a search that fails at the network level
    pub fn with_search_failure(mut self, title: &str) -> Self {
        self.failing_searches.insert(title.to_string());
        self
    }

    /// Append one detail outcome to a slug's script
    pub fn with_detail(mut self, slug: &str, outcome: DetailOutcome) -> Self {
        self.details.entry(slug.to_string()).or_default().push(outcome);
        self
    }

    /// Shorthand for the common single-payload case
    pub fn with_record(self, slug: &str, record: ComicRecord) -> Self {
        self.with_detail(
            slug,
            DetailOutcome::Payload(DetailPayload {
                comic: record,
                first_chapter: None,
            }),
        )
    }

    /// How many detail fetches this slug has received
    pub fn detail_call_count(&self, slug: &str) -> usize {
        self.detail_calls
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.as_str() == slug)
            .count()
    }
}

#[async_trait]
impl CatalogSource for ScriptedCatalog {
    async fn search(&self, title: &str) -> Result<Vec<SearchHit>, CatalogError> {
        if self.failing_searches.contains(title) {
            return Err(CatalogError::Network("search timed out".into()));
        }
        Ok(self.searches.get(title).cloned().unwrap_or_default())
    }

    async fn detail(&self, slug: &str) -> Result<Option<DetailPayload>, CatalogError> {
        self.detail_calls.lock().unwrap().push(slug.to_string());

        let Some(script) = self.details.get(slug) else {
            return Ok(None);
        };

        let index = {
            let mut cursors = self.cursors.lock().unwrap();
            let cursor = cursors.entry(slug.to_string()).or_insert(0);
            let index = (*cursor).min(script.len() - 1);
            *cursor += 1;
            index
        };

        match &script[index] {
            DetailOutcome::Payload(payload) => Ok(Some(payload.clone())),
            DetailOutcome::Missing => Ok(None),
            DetailOutcome::NetworkFailure => {
                Err(CatalogError::Network("connection reset by peer".into()))
            }
        }
    }
}

/// Fluent builder for catalog records in tests
pub struct RecordBuilder {
    record: ComicRecord,
    first_chapter: Option<FirstChapter>,
}

impl RecordBuilder {
    pub fn new(slug: &str) -> Self {
        Self {
            record: ComicRecord {
                slug: Some(slug.to_string()),
                ..Default::default()
            },
            first_chapter: None,
        }
    }

    /// A record the catalog returned without a slug (malformed upstream data)
    pub fn slugless() -> Self {
        Self {
            record: ComicRecord::default(),
            first_chapter: None,
        }
    }

    pub fn al(mut self, id: i64) -> Self {
        self.record.links.al = Some(id.to_string());
        self
    }

    pub fn mal(mut self, id: i64) -> Self {
        self.record.links.mal = Some(id.to_string());
        self
    }

    pub fn mu(mut self, group_id: &str) -> Self {
        self.record.links.mu = Some(group_id.to_string());
        self
    }

    pub fn follows(mut self, count: u64) -> Self {
        self.record.user_follow_count = Some(count);
        self
    }

    pub fn title(mut self, title: &str) -> Self {
        self.record.title = Some(title.to_string());
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.record.description = Some(description.to_string());
        self
    }

    pub fn last_chapter(mut self, chapter: f64) -> Self {
        self.record.last_chapter = Some(chapter);
        self
    }

    pub fn genres(mut self, genres: &[&str]) -> Self {
        self.record.genres = genres.iter().map(|g| g.to_string()).collect();
        self
    }

    pub fn first_chapter(mut self, hid: &str, chapter: &str) -> Self {
        self.first_chapter = Some(FirstChapter {
            chapter: Some(chapter.to_string()),
            hid: Some(hid.to_string()),
            lang: Some("en".to_string()),
            volume: None,
        });
        self
    }

    pub fn build(self) -> ComicRecord {
        self.record
    }

    pub fn payload(self) -> DetailPayload {
        DetailPayload {
            comic: self.record,
            first_chapter: self.first_chapter,
        }
    }
}
