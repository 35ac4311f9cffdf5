use serde::{Deserialize, Serialize};
use std::fmt;

/// Card rank. Discriminants start at two so number cards convert directly to their face value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    Two = 2,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Blackjack value: aces are 11, face cards 10.
    pub fn value(&self) -> u8 {
        match self {
            Rank::Ace => 11,
            Rank::Jack | Rank::Queen | Rank::King => 10,
            number => *number as u8,
        }
    }

    /// Hi-Lo contribution.
    pub fn count_value(&self) -> i8 {
        match self {
            Rank::Two | Rank::Three | Rank::Four | Rank::Five | Rank::Six => 1,
            Rank::Seven | Rank::Eight | Rank::Nine => 0,
            Rank::Ten | Rank::Jack | Rank::Queen | Rank::King | Rank::Ace => -1,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    Club,
    Diamond,
    Heart,
    Spade,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Club, Suit::Diamond, Suit::Heart, Suit::Spade];

    pub fn symbol(&self) -> &'static str {
        match self {
            Suit::Club => "C",
            Suit::Diamond => "D",
            Suit::Heart => "H",
            Suit::Spade => "S",
        }
    }

    pub fn pip(&self) -> char {
        match self {
            Suit::Club => '♣',
            Suit::Diamond => '♦',
            Suit::Heart => '♥',
            Suit::Spade => '♠',
        }
    }
}

/// A playing card from a standard 52 card deck.
///
/// `Card::default()` is the sentinel "no card" value handed out by an empty
/// shoe. It has no rank or suit, counts as zero, and labels itself as an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    face: Option<(Rank, Suit)>,
}

impl Card {
    pub const ERROR_TAG: &'static str = "ERROR";

    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self {
            face: Some((rank, suit)),
        }
    }

    /// Card at `index` in enumeration order (suits outer, ranks inner).
    /// Anything past the end of the deck yields the sentinel.
    pub fn from_index(index: usize) -> Self {
        match (Suit::ALL.get(index / 13), Rank::ALL.get(index % 13)) {
            (Some(suit), Some(rank)) => Card::new(*rank, *suit),
            _ => Card::default(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.face.is_some()
    }

    pub fn rank(&self) -> Option<Rank> {
        self.face.map(|(rank, _)| rank)
    }

    pub fn suit(&self) -> Option<Suit> {
        self.face.map(|(_, suit)| suit)
    }

    pub fn numeric_value(&self) -> u8 {
        self.rank().map_or(0, |rank| rank.value())
    }

    pub fn count_value(&self) -> i8 {
        self.rank().map_or(0, |rank| rank.count_value())
    }

    /// Short tag such as `"5C"` or `"10S"`. Also used as the asset key for card faces.
    pub fn label(&self) -> String {
        let rank = self.rank().map_or(Self::ERROR_TAG, |rank| rank.symbol());
        let suit = self.suit().map_or(Self::ERROR_TAG, |suit| suit.symbol());
        format!("{rank}{suit}")
    }

    pub fn to_display(&self) -> String {
        match self.face {
            Some((rank, suit)) => format!("{}{}", rank.symbol(), suit.pip()),
            None => "??".to_string(),
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn all_cards() -> Vec<Card> {
        (0..52).map(Card::from_index).collect()
    }

    #[test]
    fn test_value_table() {
        let expected = [
            (Rank::Two, 2, 1),
            (Rank::Three, 3, 1),
            (Rank::Four, 4, 1),
            (Rank::Five, 5, 1),
            (Rank::Six, 6, 1),
            (Rank::Seven, 7, 0),
            (Rank::Eight, 8, 0),
            (Rank::Nine, 9, 0),
            (Rank::Ten, 10, -1),
            (Rank::Jack, 10, -1),
            (Rank::Queen, 10, -1),
            (Rank::King, 10, -1),
            (Rank::Ace, 11, -1),
        ];
        for suit in Suit::ALL {
            for (rank, numeric, count) in expected {
                let card = Card::new(rank, suit);
                assert_eq!(card.numeric_value(), numeric, "{card}");
                assert_eq!(card.count_value(), count, "{card}");
            }
        }
    }

    #[test]
    fn test_default_is_sentinel() {
        let card = Card::default();
        assert!(!card.is_valid());
        assert_eq!(card.rank(), None);
        assert_eq!(card.suit(), None);
        assert_eq!(card.numeric_value(), 0);
        assert_eq!(card.count_value(), 0);
    }

    #[test]
    fn test_sentinel_label_is_error_tag() {
        assert_eq!(Card::default().label(), "ERRORERROR");
        assert_eq!(Card::default().to_display(), "??");
    }

    #[test]
    fn test_labels() {
        assert_eq!(Card::new(Rank::Five, Suit::Club).label(), "5C");
        assert_eq!(Card::new(Rank::Ten, Suit::Spade).label(), "10S");
        assert_eq!(Card::new(Rank::Ace, Suit::Heart).label(), "AH");
        assert_eq!(Card::new(Rank::Queen, Suit::Diamond).to_string(), "QD");
        assert_eq!(Card::new(Rank::King, Suit::Spade).to_display(), "K♠");
    }

    #[test]
    fn test_labels_are_unique() {
        let labels: HashSet<String> = all_cards().iter().map(Card::label).collect();
        assert_eq!(labels.len(), 52);
    }

    #[test]
    fn test_label_is_stable() {
        for card in all_cards() {
            let again = Card::new(card.rank().unwrap(), card.suit().unwrap());
            assert_eq!(card.label(), again.label());
        }
    }

    #[test]
    fn test_from_index_order() {
        assert_eq!(Card::from_index(0), Card::new(Rank::Two, Suit::Club));
        assert_eq!(Card::from_index(12), Card::new(Rank::Ace, Suit::Club));
        assert_eq!(Card::from_index(13), Card::new(Rank::Two, Suit::Diamond));
        assert_eq!(Card::from_index(51), Card::new(Rank::Ace, Suit::Spade));
        assert!(!Card::from_index(52).is_valid());
    }
}
