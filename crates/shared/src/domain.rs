use serde::{Deserialize, Serialize};

/// Which way the slide track moves for a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Forward,
    Backward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationCause {
    Next,
    Previous,
    GoTo,
    AutoAdvance,
}

impl NavigationCause {
    /// True for navigation triggered by a user action rather than the timer.
    pub fn is_user_driven(self) -> bool {
        !matches!(self, Self::AutoAdvance)
    }
}

/// Emitted whenever the current index actually changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexChange {
    pub previous: usize,
    pub current: usize,
    pub slide_count: usize,
    pub direction: Direction,
    pub cause: NavigationCause,
    /// Position of this change in the controller's history, starting at 1.
    /// Delivery order across threads may differ; order by this instead.
    #[serde(default)]
    pub sequence: u64,
}

impl IndexChange {
    pub fn new(
        previous: usize,
        current: usize,
        slide_count: usize,
        cause: NavigationCause,
    ) -> Self {
        let direction = match cause {
            NavigationCause::Next | NavigationCause::AutoAdvance => Direction::Forward,
            NavigationCause::Previous => Direction::Backward,
            NavigationCause::GoTo if current > previous => Direction::Forward,
            NavigationCause::GoTo => Direction::Backward,
        };
        Self {
            previous,
            current,
            slide_count,
            direction,
            cause,
            sequence: 0,
        }
    }

    pub fn with_sequence(mut self, sequence: u64) -> Self {
        self.sequence = sequence;
        self
    }

    /// True when `self` happened after `other` on the same controller.
    pub fn supersedes(&self, other: &IndexChange) -> bool {
        self.sequence > other.sequence
    }

    /// Whether a single step crossed the end of the ring.
    pub fn wrapped(&self) -> bool {
        match (self.direction, self.cause) {
            (_, NavigationCause::GoTo) => false,
            (Direction::Forward, _) => self.current < self.previous,
            (Direction::Backward, _) => self.current > self.previous,
        }
    }

    /// Horizontal offset of the slide track, in percent of one slide width.
    pub fn track_offset_percent(&self) -> i64 {
        track_offset_percent(self.current)
    }
}

pub fn track_offset_percent(index: usize) -> i64 {
    -100 * index as i64
}
