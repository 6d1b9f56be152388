//! Session: the mutable state of one play-through.

use std::sync::Arc;

use crate::domain::{Deck, DecisionRecord, ImageRecord, Screen, SessionId};

/// State of one play-through.
///
/// Invariants (kept by `DecisionEngine`):
/// - `cursor` only grows and never exceeds the deck length
/// - `cursor == deck.len()` implies `screen == Summary`
/// - `liked` is a subsequence of the deck in decision order
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub(crate) id: Option<SessionId>,
    pub(crate) screen: Screen,
    pub(crate) deck: Option<Deck>,
    pub(crate) cursor: usize,
    pub(crate) liked: Vec<Arc<ImageRecord>>,
    pub(crate) history: Vec<DecisionRecord>,
}

impl Session {
    pub fn id(&self) -> Option<SessionId> {
        self.id
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn deck(&self) -> Option<&Deck> {
        self.deck.as_ref()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn liked(&self) -> &[Arc<ImageRecord>] {
        &self.liked
    }

    pub fn history(&self) -> &[DecisionRecord] {
        &self.history
    }

    pub fn deck_len(&self) -> usize {
        self.deck.as_ref().map_or(0, Deck::len)
    }

    /// The card on screen, if any.
    pub fn current_record(&self) -> Option<&Arc<ImageRecord>> {
        if self.screen != Screen::Cards {
            return None;
        }
        self.deck.as_ref()?.get(self.cursor)
    }

    /// In the card screen and still waiting for the deck.
    pub fn is_loading(&self) -> bool {
        self.screen == Screen::Cards && self.deck.is_none()
    }
}
