//! EventSink port - セッションイベントの通知
//!
//! Presentation 側への completion callback です。
//! Engine は同期的に emit するだけで、配送のタイミングは実装側が決めます。

use std::sync::Mutex;

use tokio::sync::mpsc;

use crate::domain::SessionEvent;

/// EventSink は SessionEvent を受け取る
pub trait EventSink: Send + Sync {
    fn emit(&self, event: &SessionEvent);
}

/// 何もしない sink（購読者がいないとき）
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn emit(&self, _event: &SessionEvent) {}
}

/// tokio の unbounded channel に転送する sink
///
/// 受信側が drop されていたらイベントは捨てられます。
#[derive(Debug, Clone)]
pub struct ChannelEventSink {
    tx: mpsc::UnboundedSender<SessionEvent>,
}

impl ChannelEventSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<SessionEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: &SessionEvent) {
        // ignore send error: the subscriber may already be gone
        let _ = self.tx.send(event.clone());
    }
}

/// イベントをメモリに溜める sink（テスト・デバッグ用）
#[derive(Debug, Default)]
pub struct RecordingEventSink {
    events: Mutex<Vec<SessionEvent>>,
}

impl RecordingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<SessionEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl EventSink for RecordingEventSink {
    fn emit(&self, event: &SessionEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}
