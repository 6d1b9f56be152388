//! App - アプリケーション層
//!
//! Deck Loader（async）と Decision Engine（sync）をつなぎます。
//!
//! # 主要コンポーネント
//! - **AppBuilder**: 設定と ports からの構築
//! - **PawsApp**: begin 時に deck を 1 回だけ読み込む
//! - **Status**: Presentation 向けのスナップショット

pub mod builder;
pub mod status;

pub use self::builder::{AppBuilder, BuildError};
pub use self::status::Status;

use tracing::debug;

use crate::domain::{CardBounds, Decision, Screen};
use crate::engine::{BeginOutcome, DecisionEngine};
use crate::loader::{DeckLoader, LoadStats};

/// PawsApp は 1 人分のプレイを駆動する
///
/// Pointer 入力はそのまま engine に渡します。`begin` だけが await します。
pub struct PawsApp {
    loader: DeckLoader,
    engine: DecisionEngine,
    last_load: Option<LoadStats>,
}

impl PawsApp {
    pub fn new(loader: DeckLoader, engine: DecisionEngine) -> Self {
        Self {
            loader,
            engine,
            last_load: None,
        }
    }

    /// Start → Cards, loading a deck when the engine asks for one.
    ///
    /// Returns the screen afterwards. Calling it anywhere but the start
    /// screen does nothing.
    pub async fn begin(&mut self) -> Screen {
        if let BeginOutcome::NeedsDeck(size) = self.engine.on_begin() {
            let report = self.loader.load(size).await;
            self.last_load = Some(report.stats);
            if !self.engine.install_deck(report.deck) {
                debug!("loaded deck was not installed");
            }
        }
        self.engine.screen()
    }

    pub fn on_gesture_start(&mut self, pos: f64) {
        self.engine.on_gesture_start(pos);
    }

    pub fn on_gesture_move(&mut self, pos: f64) {
        self.engine.on_gesture_move(pos);
    }

    pub fn on_gesture_end(&mut self) -> Option<Decision> {
        self.engine.on_gesture_end()
    }

    pub fn on_point_select(&mut self, x: f64, bounds: CardBounds) -> Option<Decision> {
        self.engine.on_point_select(x, bounds)
    }

    pub fn on_reset(&mut self) {
        self.engine.on_reset();
        self.last_load = None;
    }

    pub fn engine(&self) -> &DecisionEngine {
        &self.engine
    }

    pub fn loader(&self) -> &DeckLoader {
        &self.loader
    }

    pub fn last_load(&self) -> Option<LoadStats> {
        self.last_load
    }

    pub fn status(&self) -> Status {
        Status::capture(&self.engine, self.last_load)
    }
}
