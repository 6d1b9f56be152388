//! AppBuilder - アプリケーションの構築とワイヤリング
//!
//! # Fail-fast 設計
//! - build() 時に設定を検証
//! - ImageSource が未設定なら BuildError を返す

use std::sync::Arc;

use crate::config::{ConfigError, PawsConfig};
use crate::engine::DecisionEngine;
use crate::impls::HttpImageSource;
use crate::loader::DeckLoader;
use crate::ports::{Clock, EventSink, IdGenerator, ImageSource, NoopEventSink, SystemClock, UlidGenerator};

use super::PawsApp;

/// AppBuilder は PawsApp を構築
///
/// # 使用例
/// ```ignore
/// let app = AppBuilder::new(PawsConfig::load()?)
///     .http_source()?
///     .event_sink(Arc::new(sink))
///     .build()?;
/// ```
pub struct AppBuilder {
    config: PawsConfig,
    source: Option<Arc<dyn ImageSource>>,
    clock: Arc<dyn Clock>,
    ids: Option<Arc<dyn IdGenerator>>,
    events: Arc<dyn EventSink>,
}

/// BuildError はアプリケーション構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("no image source configured")]
    MissingImageSource,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("could not create http image source: {0}")]
    HttpSource(String),
}

impl AppBuilder {
    pub fn new(config: PawsConfig) -> Self {
        Self {
            config,
            source: None,
            clock: Arc::new(SystemClock),
            ids: None,
            events: Arc::new(NoopEventSink),
        }
    }

    pub fn image_source(mut self, source: Arc<dyn ImageSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Uses the configured cataas endpoint.
    pub fn http_source(self) -> Result<Self, BuildError> {
        let source = HttpImageSource::new(&self.config.source)
            .map_err(|e| BuildError::HttpSource(e.to_string()))?;
        Ok(self.image_source(Arc::new(source)))
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = Some(ids);
        self
    }

    pub fn event_sink(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    pub fn build(self) -> Result<PawsApp, BuildError> {
        self.config.validate()?;
        let source = self.source.ok_or(BuildError::MissingImageSource)?;
        let ids = match self.ids {
            Some(ids) => ids,
            None => Arc::new(UlidGenerator::new(ClockRef(Arc::clone(&self.clock)))),
        };

        let loader = DeckLoader::from_config(source, Arc::clone(&ids), &self.config.deck);
        let engine = DecisionEngine::new(self.config.deck.size, self.clock, ids, self.events);
        Ok(PawsApp::new(loader, engine))
    }
}

/// Lets a shared clock drive a `UlidGenerator`.
struct ClockRef(Arc<dyn Clock>);

impl Clock for ClockRef {
    fn now(&self) -> chrono::DateTime<chrono::Utc> {
        self.0.now()
    }
}
