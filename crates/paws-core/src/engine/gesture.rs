//! In-progress drag tracking.

use crate::domain::{Feedback, Gesture};

/// Start/last-position pair of the drag currently under the pointer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GestureTracker {
    active: Option<Gesture>,
}

impl GestureTracker {
    pub fn start(&mut self, pos: f64) {
        self.active = Some(Gesture::new(pos, pos));
    }

    /// Ignored when no drag is in progress.
    pub fn move_to(&mut self, pos: f64) {
        if let Some(gesture) = self.active.as_mut() {
            gesture.end = pos;
        }
    }

    /// Ends the drag. A drag that never moved ends where it started.
    pub fn finish(&mut self) -> Option<Gesture> {
        self.active.take()
    }

    pub fn cancel(&mut self) {
        self.active = None;
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn feedback(&self) -> Feedback {
        self.active
            .map_or(Feedback::Neutral, |g| Feedback::for_delta(g.delta()))
    }
}
