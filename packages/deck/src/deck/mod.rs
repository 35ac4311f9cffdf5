use crate::Card;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Number of cards in a single standard deck.
pub const DECK_SIZE: usize = 52;

/// A single deck split into the drawable shoe and the discard pile.
///
/// Every card lives in exactly one of the shoe, the discard pile, or the hand
/// of whoever drew it and has not discarded it yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    shoe: Vec<Card>,
    discard: Vec<Card>,
}

impl Deck {
    /// Builds all 52 cards in enumeration order and shuffles them.
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::unshuffled();
        deck.shuffle(rng);
        deck
    }

    /// All 52 cards in the shoe, in enumeration order.
    pub fn unshuffled() -> Self {
        Self {
            shoe: (0..DECK_SIZE).map(Card::from_index).collect(),
            discard: Vec::with_capacity(DECK_SIZE),
        }
    }

    /// Reclaims the discard pile and randomly permutes the whole shoe.
    ///
    /// Cards are moved one at a time by picking a uniformly random index from
    /// the ones left, so every ordering is equally likely.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut pool = std::mem::take(&mut self.shoe);
        pool.append(&mut self.discard);

        self.shoe.reserve(pool.len());
        while !pool.is_empty() {
            let index = rng.gen_range(0..pool.len());
            self.shoe.push(pool.remove(index));
        }
    }

    /// Takes the top card of the shoe. An empty shoe yields the invalid
    /// sentinel card, so callers check `is_valid` before using it.
    pub fn draw(&mut self) -> Card {
        self.shoe.pop().unwrap_or_default()
    }

    /// Sets a card aside until the next shuffle. The sentinel is dropped.
    pub fn discard(&mut self, card: Card) {
        if card.is_valid() {
            self.discard.push(card);
        }
    }

    pub fn shoe_count(&self) -> usize {
        self.shoe.len()
    }

    pub fn discard_count(&self) -> usize {
        self.discard.len()
    }

    pub fn shoe(&self) -> &[Card] {
        &self.shoe
    }

    pub fn discards(&self) -> &[Card] {
        &self.discard
    }
}
