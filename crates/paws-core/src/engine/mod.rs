//! Decision engine: the `Start → Cards → Summary` state machine.
//!
//! Every entry point is synchronous and infallible. Loading the deck is the
//! caller's job: `on_begin` says whether a deck is needed and
//! `install_deck` hands it over (see `app::PawsApp` for the async glue).
//! Animation and delays belong to the presentation side, which learns about
//! transitions through the `EventSink` port.

mod gesture;
mod session;

pub use gesture::GestureTracker;
pub use session::Session;

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::{
    CardBounds, Decider, Decision, DecisionRecord, Deck, Feedback, Gesture, ImageRecord, Screen,
    SessionEvent, SessionId, Summary, ThresholdDecider,
};
use crate::ports::{Clock, EventSink, IdGenerator};

/// Result of the "begin" trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeginOutcome {
    /// Entered the card screen; the caller must load a deck of this size.
    NeedsDeck(usize),
    /// Not on the start screen; nothing happened.
    Ignored,
}

pub struct DecisionEngine {
    session: Session,
    gesture: GestureTracker,
    deck_size: usize,
    decider: Box<dyn Decider>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
    events: Arc<dyn EventSink>,
}

impl DecisionEngine {
    pub fn new(
        deck_size: usize,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            session: Session::default(),
            gesture: GestureTracker::default(),
            deck_size,
            decider: Box::new(ThresholdDecider::default()),
            clock,
            ids,
            events,
        }
    }

    pub fn with_decider(mut self, decider: Box<dyn Decider>) -> Self {
        self.decider = decider;
        self
    }

    // ========================================
    // Triggers
    // ========================================

    pub fn on_begin(&mut self) -> BeginOutcome {
        if self.session.screen != Screen::Start {
            debug!(screen = %self.session.screen, "begin ignored");
            return BeginOutcome::Ignored;
        }

        let session_id = self.ids.generate_session_id();
        self.session = Session {
            id: Some(session_id),
            screen: Screen::Cards,
            ..Session::default()
        };
        self.gesture.cancel();
        info!(%session_id, deck_size = self.deck_size, "session started");
        self.events.emit(&SessionEvent::Began {
            session_id,
            deck_size: self.deck_size,
        });
        BeginOutcome::NeedsDeck(self.deck_size)
    }

    /// Hands over the deck requested by `on_begin`.
    ///
    /// Returns false (and drops the deck) unless the engine is on the card
    /// screen and still waiting for one.
    pub fn install_deck(&mut self, deck: Deck) -> bool {
        if !self.session.is_loading() {
            debug!(deck_id = %deck.id(), screen = %self.session.screen, "deck rejected");
            return false;
        }

        let deck_id = deck.id();
        let len = deck.len();
        self.session.deck = Some(deck);
        self.events.emit(&SessionEvent::DeckInstalled { deck_id, len });
        if len == 0 {
            self.enter_summary();
        }
        true
    }

    /// Back to the start screen with nothing carried over. Idempotent.
    pub fn on_reset(&mut self) {
        if let Some(session_id) = self.session.id {
            info!(%session_id, "session reset");
        }
        self.session = Session::default();
        self.gesture.cancel();
        self.events.emit(&SessionEvent::Reset);
    }

    // ========================================
    // Pointer input
    // ========================================

    /// Ignored unless a card is on screen.
    pub fn on_gesture_start(&mut self, pos: f64) {
        if self.session.current_record().is_some() {
            self.gesture.start(pos);
        }
    }

    pub fn on_gesture_move(&mut self, pos: f64) {
        self.gesture.move_to(pos);
    }

    /// Resolves the drag in progress. `None` means nothing was in progress
    /// or no card was on screen.
    pub fn on_gesture_end(&mut self) -> Option<Decision> {
        let gesture = self.gesture.finish()?;
        self.resolve(gesture)
    }

    /// Treats a click as a full-length drag from the card's midpoint.
    ///
    /// Ignored while a drag is in progress and for clicks outside the
    /// card's width.
    pub fn on_point_select(&mut self, x: f64, bounds: CardBounds) -> Option<Decision> {
        if self.gesture.is_active() {
            return None;
        }
        let gesture = bounds.synthesize(x)?;
        self.resolve(gesture)
    }

    fn resolve(&mut self, gesture: Gesture) -> Option<Decision> {
        let record = Arc::clone(self.session.current_record()?);
        let decision = self.decider.decide(&gesture);

        match decision {
            Decision::Cancel => {
                debug!(record_id = record.id, delta = gesture.delta(), "gesture cancelled");
                self.events
                    .emit(&SessionEvent::Cancelled { record_id: record.id });
                return Some(decision);
            }
            Decision::Like => self.session.liked.push(Arc::clone(&record)),
            Decision::Dislike => {}
        }

        self.session.history.push(DecisionRecord {
            session_id: self.session.id,
            record_id: record.id,
            decision,
            delta: gesture.delta(),
            decided_at: self.clock.now(),
        });
        self.session.cursor += 1;
        debug!(
            record_id = record.id,
            ?decision,
            cursor = self.session.cursor,
            "card decided"
        );
        self.events.emit(&SessionEvent::Decided {
            record_id: record.id,
            decision,
            cursor: self.session.cursor,
        });

        if self.session.cursor >= self.session.deck_len() {
            self.enter_summary();
        }
        Some(decision)
    }

    fn enter_summary(&mut self) {
        self.session.screen = Screen::Summary;
        let liked = self.session.liked.len();
        let total = self.session.deck_len();
        info!(liked, total, "session finished");
        self.events.emit(&SessionEvent::SummaryReady { liked, total });
    }

    // ========================================
    // Read-only accessors
    // ========================================

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_id(&self) -> Option<SessionId> {
        self.session.id()
    }

    pub fn screen(&self) -> Screen {
        self.session.screen()
    }

    pub fn current_record(&self) -> Option<&Arc<ImageRecord>> {
        self.session.current_record()
    }

    pub fn liked(&self) -> &[Arc<ImageRecord>] {
        self.session.liked()
    }

    pub fn cursor(&self) -> usize {
        self.session.cursor()
    }

    pub fn deck(&self) -> Option<&Deck> {
        self.session.deck()
    }

    pub fn history(&self) -> &[DecisionRecord] {
        self.session.history()
    }

    pub fn is_loading(&self) -> bool {
        self.session.is_loading()
    }

    pub fn deck_size(&self) -> usize {
        self.deck_size
    }

    /// Like/dislike hint for the drag in progress.
    pub fn feedback(&self) -> Feedback {
        self.gesture.feedback()
    }

    pub fn summary(&self) -> Summary {
        Summary::build(self.session.liked(), self.session.deck_len())
    }

    pub fn summary_text(&self) -> String {
        self.summary().message
    }
}
