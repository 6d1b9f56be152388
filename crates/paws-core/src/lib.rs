//! paws-core
//!
//! Core of the "Paws & Preferences" swipe game.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, image, decision, state, summary, events, errors）
//! - **ports**: 抽象化レイヤー（ImageSource, Clock, IdGenerator, EventSink）
//! - **impls**: ports の実装（HttpImageSource, ScriptedImageSource）
//! - **loader**: Deck Loader（並行取得・重複排除・リトライ・fallback）
//! - **engine**: Decision Engine（Start → Cards → Summary）
//! - **app**: ワイヤリング（AppBuilder, PawsApp, Status）
//! - **config**: figment による設定
//! - **observability**: tracing の初期化

pub mod app;
pub mod config;
pub mod domain;
pub mod engine;
pub mod impls;
pub mod loader;
pub mod observability;
pub mod ports;

pub use app::{AppBuilder, BuildError, PawsApp, Status};
pub use config::{ConfigError, PawsConfig};
pub use domain::{CardBounds, Decision, ImageRecord, Screen, SessionEvent};
pub use engine::{BeginOutcome, DecisionEngine};
pub use loader::{DeckLoader, LoadReport, LoadStats};
