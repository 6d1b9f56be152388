//! Image records and the deck that owns them.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::ids::DeckId;

/// One card: a cat image and its descriptive labels.
///
/// `id` is the slot position the record was loaded into. Records are
/// immutable once built and shared by `Arc` between the deck and the liked
/// collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub id: usize,
    pub url: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ImageRecord {
    pub fn new(id: usize, url: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            id,
            url: url.into(),
            tags,
        }
    }
}

/// What an image source hands back before normalization and dedup.
///
/// `url` may be relative to the source's origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawImage {
    pub url: String,
    pub tags: Vec<String>,
}

impl RawImage {
    pub fn new(url: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            url: url.into(),
            tags,
        }
    }
}

/// Ordered batch of records for one session.
///
/// Uniqueness of urls is established while the deck is loaded
/// (see `loader::ClaimedUrls`); the fallback url is the only one that may
/// repeat.
#[derive(Debug, Clone)]
pub struct Deck {
    id: DeckId,
    records: Vec<Arc<ImageRecord>>,
}

impl Deck {
    pub fn new(id: DeckId, records: Vec<Arc<ImageRecord>>) -> Self {
        Self { id, records }
    }

    pub fn id(&self) -> DeckId {
        self.id
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Arc<ImageRecord>> {
        self.records.get(index)
    }

    pub fn records(&self) -> &[Arc<ImageRecord>] {
        &self.records
    }

    /// True when no two records share a url, ignoring `exempt`.
    pub fn has_unique_urls(&self, exempt: &str) -> bool {
        let mut seen = std::collections::HashSet::new();
        self.records
            .iter()
            .filter(|r| r.url != exempt)
            .all(|r| seen.insert(r.url.as_str()))
    }
}
