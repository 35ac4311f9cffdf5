use crate::Card;
use serde::{Deserialize, Serialize};

/// Hi-Lo running count over the cards revealed since the last reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningCount {
    value: i32,
    seen: u32,
}

impl RunningCount {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a revealed card. The sentinel is not a card and is not counted.
    pub fn observe(&mut self, card: &Card) {
        if !card.is_valid() {
            return;
        }
        self.value += i32::from(card.count_value());
        self.seen += 1;
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn seen(&self) -> u32 {
        self.seen
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
