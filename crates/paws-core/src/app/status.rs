//! Status - Presentation 向けのスナップショット
//!
//! 1 フレーム分の状態（画面、現在のカード、liked）をまとめて返します。
//! Presentation はこれをポーリングして描画できます。

use serde::Serialize;

use crate::domain::{Feedback, ImageRecord, Screen, SessionId, Summary};
use crate::engine::DecisionEngine;
use crate::loader::LoadStats;

/// Status は現在のセッションの読み取り専用ビュー
#[derive(Debug, Clone, Serialize)]
pub struct Status {
    pub session_id: Option<SessionId>,
    pub screen: Screen,
    pub loading: bool,
    pub cursor: usize,
    pub deck_len: usize,
    pub current: Option<ImageRecord>,
    pub liked: Vec<ImageRecord>,
    pub feedback: Feedback,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Summary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_load: Option<LoadStats>,
}

impl Status {
    pub fn capture(engine: &DecisionEngine, last_load: Option<LoadStats>) -> Self {
        let session = engine.session();
        let screen = session.screen();
        Self {
            session_id: session.id(),
            screen,
            loading: session.is_loading(),
            cursor: session.cursor(),
            deck_len: session.deck_len(),
            current: session.current_record().map(|r| r.as_ref().clone()),
            liked: session.liked().iter().map(|r| r.as_ref().clone()).collect(),
            feedback: engine.feedback(),
            summary: (screen == Screen::Summary).then(|| engine.summary()),
            last_load,
        }
    }
}
