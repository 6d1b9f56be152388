//! Events - セッションで発生したイベント
//!
//! Presentation 側はこれを購読してアニメーションや画面遷移を行います。
//! Core はタイマーを持たず、イベントを発行するだけです。

use serde::Serialize;

use super::decision::Decision;
use super::ids::{DeckId, SessionId};

/// SessionEvent は Decision Engine の状態遷移を表す
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    /// Start → Cards. `deck_size` is the number of records being loaded.
    Began {
        session_id: SessionId,
        deck_size: usize,
    },

    DeckInstalled {
        deck_id: DeckId,
        len: usize,
    },

    /// A card left the screen. `cursor` is the position after advancing.
    Decided {
        record_id: usize,
        decision: Decision,
        cursor: usize,
    },

    /// A drag ended inside the threshold; the card stays.
    Cancelled { record_id: usize },

    SummaryReady { liked: usize, total: usize },

    Reset,
}
