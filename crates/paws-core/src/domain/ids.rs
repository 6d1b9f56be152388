//! Domain identifiers (strongly-typed IDs).
//!
//! ULID ベースの ID を Phantom type パターンで型付けします。
//! `SessionId` と `DeckId` は同じ表現ですが、コンパイル時に混同できません。
//!
//! - **時刻でソート可能**: セッションの開始順に並ぶ
//! - **調整なしで生成可能**: グローバルなカウンタを持たない

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use ulid::Ulid;

/// IdMarker は各 ID 型のマーカー trait
///
/// Display で使うプレフィックス（"session-", "deck-"）を提供します。
pub trait IdMarker: Send + Sync + 'static {
    fn prefix() -> &'static str;
}

/// ジェネリック ID 型
///
/// `T` は PhantomData で、実行時にはメモリを消費しません。
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Id<T: IdMarker> {
    ulid: Ulid,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

impl<T: IdMarker> Id<T> {
    pub fn from_ulid(ulid: Ulid) -> Self {
        Self {
            ulid,
            _marker: PhantomData,
        }
    }

    pub fn as_ulid(&self) -> Ulid {
        self.ulid
    }
}

impl<T: IdMarker> From<Ulid> for Id<T> {
    fn from(ulid: Ulid) -> Self {
        Self::from_ulid(ulid)
    }
}

impl<T: IdMarker> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", T::prefix(), self.ulid)
    }
}

// ========================================
// マーカー型の定義
// ========================================

/// Session のマーカー型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SessionKind {}

impl IdMarker for SessionKind {
    fn prefix() -> &'static str {
        "session-"
    }
}

/// Deck のマーカー型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DeckKind {}

impl IdMarker for DeckKind {
    fn prefix() -> &'static str {
        "deck-"
    }
}

/// Identifier of one play-through (created on entering the card screen).
pub type SessionId = Id<SessionKind>;

/// Identifier of one loaded batch of image records.
pub type DeckId = Id<DeckKind>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_display_with_prefix() {
        let ulid = Ulid::new();
        let session = SessionId::from_ulid(ulid);
        let deck = DeckId::from_ulid(ulid);

        assert_eq!(session.as_ulid(), deck.as_ulid());
        assert!(session.to_string().starts_with("session-"));
        assert!(deck.to_string().starts_with("deck-"));

        // let _: SessionId = deck; // <- does not compile
    }

    #[test]
    fn ids_can_be_serialized() {
        let session = SessionId::from_ulid(Ulid::new());

        let serialized = serde_json::to_string(&session).unwrap();
        let deserialized: SessionId = serde_json::from_str(&serialized).unwrap();

        assert_eq!(session, deserialized);
    }

    #[test]
    fn phantom_data_does_not_consume_memory() {
        use std::mem::size_of;

        assert_eq!(size_of::<SessionId>(), size_of::<Ulid>());
        assert_eq!(size_of::<DeckId>(), size_of::<Ulid>());
    }
}
