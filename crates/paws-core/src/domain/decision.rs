//! Decision model: turning a horizontal drag into like / dislike / cancel.
//!
//! This module defines the Decision type (what the user meant) and the
//! Decider trait (how a drag distance maps to it). Deciders are pure: the
//! engine owns every state mutation that follows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::SessionId;

/// Minimum |delta| (exclusive) for a drag to count as a decision.
pub const DECISION_THRESHOLD: f64 = 100.0;

/// Minimum |delta| (exclusive) for the in-progress like/dislike hint.
pub const FEEDBACK_THRESHOLD: f64 = 50.0;

/// Synthetic drag length used for point selections. Always beyond
/// `DECISION_THRESHOLD`, so a click never cancels.
pub const POINT_SELECT_DELTA: f64 = 150.0;

/// Outcome of one resolved gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Like,
    Dislike,
    /// Drag too short; the card snaps back.
    Cancel,
}

impl Decision {
    /// True for like/dislike, the two outcomes that advance the cursor.
    pub fn is_decisive(self) -> bool {
        !matches!(self, Decision::Cancel)
    }
}

/// A start/end pair along the horizontal axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gesture {
    pub start: f64,
    pub end: f64,
}

impl Gesture {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn delta(&self) -> f64 {
        self.end - self.start
    }
}

/// Horizontal extent of the card on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardBounds {
    pub left: f64,
    pub width: f64,
}

impl CardBounds {
    pub fn new(left: f64, width: f64) -> Self {
        Self { left, width }
    }

    /// Converts a click into the equivalent drag from the card's midpoint.
    ///
    /// Returns `None` when `x` falls outside the card's width (NaN included).
    /// A click exactly on the midpoint counts as the left half.
    pub fn synthesize(&self, x: f64) -> Option<Gesture> {
        let relative = x - self.left;
        if !(0.0..=self.width).contains(&relative) {
            return None;
        }
        let midpoint = self.width / 2.0;
        let start = self.left + midpoint;
        let end = if relative > midpoint {
            start + POINT_SELECT_DELTA
        } else {
            start - POINT_SELECT_DELTA
        };
        Some(Gesture::new(start, end))
    }
}

/// Stamp the presentation layer may show while a drag is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feedback {
    Like,
    Dislike,
    Neutral,
}

impl Feedback {
    pub fn for_delta(delta: f64) -> Self {
        if delta > FEEDBACK_THRESHOLD {
            Feedback::Like
        } else if delta < -FEEDBACK_THRESHOLD {
            Feedback::Dislike
        } else {
            Feedback::Neutral
        }
    }
}

/// Trait for mapping a finished gesture to a decision.
///
/// Deciders are pure functions: given the gesture they return the decision
/// without side effects. The engine applies it.
pub trait Decider: Send + Sync {
    fn decide(&self, gesture: &Gesture) -> Decision;
}

/// Default decider: a symmetric distance threshold.
#[derive(Debug, Clone)]
pub struct ThresholdDecider {
    threshold: f64,
}

impl ThresholdDecider {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }
}

impl Default for ThresholdDecider {
    fn default() -> Self {
        Self::new(DECISION_THRESHOLD)
    }
}

impl Decider for ThresholdDecider {
    fn decide(&self, gesture: &Gesture) -> Decision {
        let delta = gesture.delta();
        if delta > self.threshold {
            Decision::Like
        } else if delta < -self.threshold {
            Decision::Dislike
        } else {
            Decision::Cancel
        }
    }
}

/// A decision applied to a card, kept so a session can explain itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub session_id: Option<SessionId>,

    /// `ImageRecord::id` of the card that was decided.
    pub record_id: usize,

    pub decision: Decision,

    /// Drag distance that produced the decision (synthetic for clicks).
    pub delta: f64,

    pub decided_at: DateTime<Utc>,
}
