//! Errors - 取得エラーの分類
//!
//! 画像取得の失敗はすべて一時的（Transient）として扱い、
//! Deck Loader の中でリトライまたは fallback に吸収されます。

use thiserror::Error;

/// One failed attempt to fetch an image record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("could not decode body: {0}")]
    Decode(String),

    #[error("malformed record: {0}")]
    Malformed(String),

    #[error("duplicate url {0}")]
    Duplicate(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            FetchError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            FetchError::Status(status.as_u16())
        } else {
            FetchError::Transport(e.to_string())
        }
    }
}
