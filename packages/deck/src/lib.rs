mod card;
mod count;
mod deck;

pub use card::{Card, Rank, Suit};
pub use count::RunningCount;
pub use deck::{Deck, DECK_SIZE};
