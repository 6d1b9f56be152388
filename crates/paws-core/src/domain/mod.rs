//! Domain model (ids, image records, decisions, screens, summary, events).
//!
//! I/O を持たない純粋な型だけを置きます。

pub mod decision;
pub mod errors;
pub mod events;
pub mod ids;
pub mod image;
pub mod state;
pub mod summary;

pub use decision::{
    CardBounds, DECISION_THRESHOLD, Decider, Decision, DecisionRecord, FEEDBACK_THRESHOLD,
    Feedback, Gesture, POINT_SELECT_DELTA, ThresholdDecider,
};
pub use errors::FetchError;
pub use events::SessionEvent;
pub use ids::{DeckId, SessionId};
pub use image::{Deck, ImageRecord, RawImage};
pub use state::Screen;
pub use summary::{NO_LIKES_MESSAGE, NO_TAGS_MESSAGE, Summary, TagFrequency};
