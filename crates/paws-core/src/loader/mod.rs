//! Deck loader: fills every slot of a deck concurrently.
//!
//! # フロー（slot ごと）
//! 1. ImageSource::fetch() で 1 件取得
//! 2. url を正規化して ClaimedUrls に claim（重複ならリトライ）
//! 3. 失敗はログに残してリトライ、予算切れなら fallback
//!
//! `load` は失敗しません。常に `size` 件の deck を返します。

mod claimed;
mod retry;
mod url;

pub use claimed::ClaimedUrls;
pub use retry::RetryPolicy;
pub use url::normalize_url;

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::config::{DeckConfig, FALLBACK_TAG, FALLBACK_URL};
use crate::domain::{Deck, FetchError, ImageRecord};
use crate::ports::{IdGenerator, ImageSource};

/// Substitute used when a slot runs out of attempts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackImage {
    pub url: String,
    pub tags: Vec<String>,
}

impl FallbackImage {
    pub fn new(url: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            url: url.into(),
            tags,
        }
    }

    fn record(&self, slot: usize) -> ImageRecord {
        ImageRecord::new(slot, self.url.clone(), self.tags.clone())
    }
}

impl Default for FallbackImage {
    fn default() -> Self {
        Self::new(FALLBACK_URL, vec![FALLBACK_TAG.to_string()])
    }
}

/// Counters for one load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadStats {
    /// Slots filled from the source.
    pub fetched: usize,
    /// Attempts rejected because another slot already had the url.
    pub duplicates: usize,
    /// Attempts that failed in transport, status or decoding.
    pub failures: usize,
    /// Slots that got the fallback record.
    pub fallbacks: usize,
}

impl LoadStats {
    fn absorb(&mut self, outcome: &SlotOutcome) {
        self.duplicates += outcome.duplicates;
        self.failures += outcome.failures;
        if outcome.fell_back {
            self.fallbacks += 1;
        } else {
            self.fetched += 1;
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadReport {
    pub deck: Deck,
    pub stats: LoadStats,
}

/// Loads decks through an `ImageSource`.
///
/// No state is kept between loads; every call starts with an empty
/// claimed-url set.
pub struct DeckLoader {
    source: Arc<dyn ImageSource>,
    ids: Arc<dyn IdGenerator>,
    policy: RetryPolicy,
    fallback: FallbackImage,
}

impl DeckLoader {
    pub fn new(
        source: Arc<dyn ImageSource>,
        ids: Arc<dyn IdGenerator>,
        policy: RetryPolicy,
        fallback: FallbackImage,
    ) -> Self {
        Self {
            source,
            ids,
            policy,
            fallback,
        }
    }

    pub fn from_config(
        source: Arc<dyn ImageSource>,
        ids: Arc<dyn IdGenerator>,
        config: &DeckConfig,
    ) -> Self {
        Self::new(
            source,
            ids,
            config.retry_policy(),
            FallbackImage::new(config.fallback_url.clone(), config.fallback_tags.clone()),
        )
    }

    pub fn fallback(&self) -> &FallbackImage {
        &self.fallback
    }

    pub async fn load_deck(&self, size: usize) -> Deck {
        self.load(size).await.deck
    }

    /// Fills `size` slots concurrently and joins them in slot order.
    pub async fn load(&self, size: usize) -> LoadReport {
        let deck_id = self.ids.generate_deck_id();
        let claimed = Arc::new(ClaimedUrls::new());
        debug!(%deck_id, size, "loading deck");

        // slot index is fixed before dispatch, so arrival order doesn't matter
        let joins: Vec<_> = (0..size)
            .map(|slot| {
                let filler = SlotFiller {
                    slot,
                    source: Arc::clone(&self.source),
                    claimed: Arc::clone(&claimed),
                    policy: self.policy.clone(),
                    fallback: self.fallback.clone(),
                };
                tokio::spawn(filler.run())
            })
            .collect();

        let mut records = Vec::with_capacity(size);
        let mut stats = LoadStats::default();
        for (slot, join) in joins.into_iter().enumerate() {
            let outcome = match join.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!(%deck_id, slot, error = %e, "slot task aborted; using fallback");
                    SlotOutcome::fallback(self.fallback.record(slot))
                }
            };
            stats.absorb(&outcome);
            records.push(Arc::new(outcome.record));
        }

        info!(
            %deck_id,
            size,
            fetched = stats.fetched,
            duplicates = stats.duplicates,
            failures = stats.failures,
            fallbacks = stats.fallbacks,
            "deck loaded"
        );

        LoadReport {
            deck: Deck::new(deck_id, records),
            stats,
        }
    }
}

#[derive(Debug)]
struct SlotOutcome {
    record: ImageRecord,
    duplicates: usize,
    failures: usize,
    fell_back: bool,
}

impl SlotOutcome {
    fn fallback(record: ImageRecord) -> Self {
        Self {
            record,
            duplicates: 0,
            failures: 0,
            fell_back: true,
        }
    }
}

/// One slot's fetch-and-retry sequence. Owns everything it needs so it can
/// run as its own task.
struct SlotFiller {
    slot: usize,
    source: Arc<dyn ImageSource>,
    claimed: Arc<ClaimedUrls>,
    policy: RetryPolicy,
    fallback: FallbackImage,
}

impl SlotFiller {
    async fn run(self) -> SlotOutcome {
        let mut duplicates = 0;
        let mut failures = 0;

        for attempt in 1..=self.policy.max_attempts {
            match self.attempt().await {
                Ok(record) => {
                    return SlotOutcome {
                        record,
                        duplicates,
                        failures,
                        fell_back: false,
                    };
                }
                Err(FetchError::Duplicate(url)) => {
                    debug!(slot = self.slot, attempt, %url, "duplicate image url");
                    duplicates += 1;
                }
                Err(e) => {
                    error!(slot = self.slot, attempt, error = %e, "error fetching image");
                    failures += 1;
                }
            }

            if self.policy.has_attempts_left(attempt) {
                let delay = self.policy.next_delay(attempt);
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
            }
        }

        warn!(
            slot = self.slot,
            attempts = self.policy.max_attempts,
            fallback = %self.fallback.url,
            "could not fetch a unique image; using fallback"
        );
        SlotOutcome {
            record: self.fallback.record(self.slot),
            duplicates,
            failures,
            fell_back: true,
        }
    }

    async fn attempt(&self) -> Result<ImageRecord, FetchError> {
        let raw = self.source.fetch().await?;
        let url = normalize_url(self.source.base_origin(), &raw.url);
        if !self.claimed.claim(&url).await {
            return Err(FetchError::Duplicate(url));
        }
        Ok(ImageRecord::new(self.slot, url, raw.tags))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RawImage;
    use crate::impls::{RepeatingImageSource, ScriptedImageSource};
    use crate::ports::{SystemClock, UlidGenerator};

    const ORIGIN: &str = "https://cataas.com";

    fn loader_for(source: Arc<dyn ImageSource>) -> DeckLoader {
        DeckLoader::new(
            source,
            Arc::new(UlidGenerator::new(SystemClock)),
            RetryPolicy::default(),
            FallbackImage::default(),
        )
    }

    fn unique_images(n: usize) -> Vec<Result<RawImage, FetchError>> {
        (0..n)
            .map(|i| Ok(RawImage::new(format!("/cat/{i}"), vec![format!("tag{i}")])))
            .collect()
    }

    #[tokio::test]
    async fn loads_requested_size_in_slot_order() {
        let source = Arc::new(ScriptedImageSource::new(ORIGIN, unique_images(10)));
        let report = loader_for(source.clone()).load(10).await;

        assert_eq!(report.deck.len(), 10);
        for (i, record) in report.deck.records().iter().enumerate() {
            assert_eq!(record.id, i);
            assert!(record.url.starts_with("https://cataas.com/cat/"));
        }
        assert!(report.deck.has_unique_urls(FALLBACK_URL));
        assert_eq!(
            report.stats,
            LoadStats {
                fetched: 10,
                ..LoadStats::default()
            }
        );
        assert_eq!(source.calls(), 10);
    }

    #[tokio::test]
    async fn every_attempt_failing_gives_fallback_records() {
        let source = Arc::new(ScriptedImageSource::failing(ORIGIN));
        let report = loader_for(source.clone()).load(10).await;

        assert_eq!(report.deck.len(), 10);
        for record in report.deck.records() {
            assert_eq!(record.url, FALLBACK_URL);
            assert_eq!(record.tags, vec!["cute".to_string()]);
        }
        assert_eq!(report.stats.fallbacks, 10);
        assert_eq!(report.stats.failures, 30);
        assert_eq!(source.calls(), 30);
    }

    #[tokio::test]
    async fn duplicate_urls_are_claimed_once() {
        let source = Arc::new(RepeatingImageSource::new(
            ORIGIN,
            RawImage::new("cat/same", vec!["orange".to_string()]),
        ));
        let report = loader_for(source).load(10).await;

        let winners: Vec<_> = report
            .deck
            .records()
            .iter()
            .filter(|r| r.url != FALLBACK_URL)
            .collect();
        assert_eq!(winners.len(), 1);
        assert_eq!(winners[0].url, "https://cataas.com/cat/same");
        assert_eq!(winners[0].tags, vec!["orange".to_string()]);

        assert_eq!(report.deck.len(), 10);
        assert!(report.deck.has_unique_urls(FALLBACK_URL));
        assert_eq!(report.stats.fallbacks, 9);
        assert_eq!(report.stats.duplicates, 27);
    }

    #[tokio::test]
    async fn transient_failures_are_retried() {
        let mut script = vec![Err(FetchError::Status(500))];
        script.extend(unique_images(10));
        let source = Arc::new(ScriptedImageSource::new(ORIGIN, script));
        let report = loader_for(source.clone()).load(10).await;

        assert_eq!(report.stats.fetched, 10);
        assert_eq!(report.stats.failures, 1);
        assert_eq!(report.stats.fallbacks, 0);
        assert_eq!(source.calls(), 11);
    }

    #[tokio::test]
    async fn custom_fallback_from_config() {
        let config = DeckConfig {
            fallback_url: "https://cataas.com/cat/sleepy".to_string(),
            fallback_tags: vec!["sleepy".to_string()],
            max_attempts: 1,
            ..DeckConfig::default()
        };
        let source = Arc::new(ScriptedImageSource::failing(ORIGIN));
        let loader = DeckLoader::from_config(
            source.clone(),
            Arc::new(UlidGenerator::new(SystemClock)),
            &config,
        );

        let deck = loader.load_deck(3).await;
        assert_eq!(deck.len(), 3);
        assert!(deck.records().iter().all(|r| r.tags == vec!["sleepy".to_string()]));
        assert_eq!(source.calls(), 3);
    }

    #[tokio::test]
    async fn large_attempt_budget_runs_to_completion() {
        let source = Arc::new(ScriptedImageSource::failing(ORIGIN));
        let loader = DeckLoader::new(
            source.clone(),
            Arc::new(UlidGenerator::new(SystemClock)),
            RetryPolicy {
                max_attempts: 1_100,
                ..RetryPolicy::default()
            },
            FallbackImage::default(),
        );

        let report = loader.load(1).await;
        // an aborted slot would report zero failures
        assert_eq!(report.stats.failures, 1_100);
        assert_eq!(report.stats.fallbacks, 1);
        assert_eq!(source.calls(), 1_100);
    }

    #[tokio::test]
    async fn separate_loads_do_not_share_claims() {
        let source = Arc::new(RepeatingImageSource::new(
            ORIGIN,
            RawImage::new("/cat/same", vec![]),
        ));
        let loader = loader_for(source);

        let first = loader.load(1).await;
        let second = loader.load(1).await;
        assert_eq!(first.stats.fetched, 1);
        assert_eq!(second.stats.fetched, 1);
        assert_ne!(first.deck.id(), second.deck.id());
    }
}
