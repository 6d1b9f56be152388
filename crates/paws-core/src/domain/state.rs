//! State - 画面の状態
//!
//! # 状態遷移
//! - start: 開始画面
//! - cards: スワイプ中（deck 読み込み中を含む）
//! - summary: 結果表示（reset まで終端）

use serde::{Deserialize, Serialize};

/// Screen は Decision Engine の状態を表現
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    #[default]
    Start,
    Cards,
    Summary,
}

impl Screen {
    pub fn as_str(&self) -> &'static str {
        match self {
            Screen::Start => "start",
            Screen::Cards => "cards",
            Screen::Summary => "summary",
        }
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
