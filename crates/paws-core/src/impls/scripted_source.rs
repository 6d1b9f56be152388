//! ScriptedImageSource - 決められた応答を順番に返す ImageSource
//!
//! テストとオフラインのデモ用です。script が尽きたら `Transport` エラーを返します。

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{FetchError, RawImage};
use crate::ports::ImageSource;

pub struct ScriptedImageSource {
    script: Mutex<VecDeque<Result<RawImage, FetchError>>>,
    base_origin: String,
    calls: AtomicUsize,
}

impl ScriptedImageSource {
    pub fn new(
        base_origin: impl Into<String>,
        script: impl IntoIterator<Item = Result<RawImage, FetchError>>,
    ) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            base_origin: base_origin.into(),
            calls: AtomicUsize::new(0),
        }
    }

    /// A source whose every call fails.
    pub fn failing(base_origin: impl Into<String>) -> Self {
        Self::new(base_origin, [])
    }

    /// Number of `fetch` calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl ImageSource for ScriptedImageSource {
    async fn fetch(&self) -> Result<RawImage, FetchError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        let next = self.script.lock().await.pop_front();
        next.unwrap_or_else(|| Err(FetchError::Transport("script exhausted".to_string())))
    }

    fn base_origin(&self) -> &str {
        &self.base_origin
    }
}

/// Always answers with the same image. Handy for exercising dedup.
pub struct RepeatingImageSource {
    image: RawImage,
    base_origin: String,
}

impl RepeatingImageSource {
    pub fn new(base_origin: impl Into<String>, image: RawImage) -> Self {
        Self {
            image,
            base_origin: base_origin.into(),
        }
    }
}

#[async_trait]
impl ImageSource for RepeatingImageSource {
    async fn fetch(&self) -> Result<RawImage, FetchError> {
        Ok(self.image.clone())
    }

    fn base_origin(&self) -> &str {
        &self.base_origin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replays_script_then_fails() {
        let source = ScriptedImageSource::new(
            "https://cataas.com",
            [
                Ok(RawImage::new("/cat/1", vec![])),
                Err(FetchError::Status(500)),
            ],
        );

        assert_eq!(source.fetch().await.unwrap().url, "/cat/1");
        assert_eq!(source.fetch().await.unwrap_err(), FetchError::Status(500));
        assert!(matches!(source.fetch().await, Err(FetchError::Transport(_))));
        assert_eq!(source.calls(), 3);
    }
}
