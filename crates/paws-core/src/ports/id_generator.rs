//! IdGenerator port - ID 生成の抽象化
//!
//! # 実装
//! - **UlidGenerator**: ULID ベース

use crate::domain::{DeckId, SessionId};
use crate::ports::Clock;
use ulid::Ulid;

/// IdGenerator はセッションと deck の ID を生成
///
/// # Thread Safety
/// - `Send + Sync` を要求（slot タスクと共有できる）
pub trait IdGenerator: Send + Sync {
    fn generate_session_id(&self) -> SessionId;

    fn generate_deck_id(&self) -> DeckId;
}

/// UlidGenerator は ULID ベースの ID 生成器
///
/// Clock を使うので、FixedClock で timestamp 部分を固定できます。
pub struct UlidGenerator<C> {
    clock: C,
}

impl<C: Clock> UlidGenerator<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    fn next_ulid(&self) -> Ulid {
        let timestamp_ms = self.clock.now().timestamp_millis() as u64;
        Ulid::from_parts(timestamp_ms, rand::random())
    }
}

impl<C: Clock> IdGenerator for UlidGenerator<C> {
    fn generate_session_id(&self) -> SessionId {
        SessionId::from(self.next_ulid())
    }

    fn generate_deck_id(&self) -> DeckId {
        DeckId::from(self.next_ulid())
    }
}
