//! Card faces for the terminal front end, looked up by card label.

use crate::error::TrainerError;
use deck::{Card, Rank, Suit, DECK_SIZE};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

pub const FACE_WIDTH: usize = 11;

/// On-disk art pack: `{ "name": "...", "faces": { "AH": ["line", ...], ... } }`.
#[derive(Debug, Deserialize)]
struct ArtPack {
    #[serde(default)]
    name: Option<String>,
    faces: HashMap<String, Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct CardFaces {
    faces: HashMap<String, Vec<String>>,
}

impl CardFaces {
    /// Faces drawn with box characters, one per card.
    pub fn built_in() -> Self {
        let faces = all_cards()
            .filter_map(|card| Some((card.label(), built_in_face(card.rank()?, card.suit()?))))
            .collect();
        Self { faces }
    }

    /// Loads an art pack from disk. Every one of the 52 labels must be present.
    pub fn load(path: &Path) -> Result<Self, TrainerError> {
        let json = fs::read_to_string(path).map_err(|e| TrainerError::CardArt {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_json(&json, path)
    }

    pub fn from_json(json: &str, origin: &Path) -> Result<Self, TrainerError> {
        let art_error = |reason: String| TrainerError::CardArt {
            path: origin.to_path_buf(),
            reason,
        };
        let mut pack: ArtPack = serde_json::from_str(json).map_err(|e| art_error(e.to_string()))?;

        let mut faces = HashMap::with_capacity(DECK_SIZE);
        let mut missing = Vec::new();
        for label in all_cards().map(|card| card.label()) {
            match pack.faces.remove(&label) {
                Some(face) => {
                    faces.insert(label, face);
                }
                None => missing.push(label),
            }
        }
        if !missing.is_empty() {
            return Err(art_error(format!("missing faces for {}", missing.join(", "))));
        }
        if !pack.faces.is_empty() {
            log::warn!("Ignoring {} unknown faces in art pack", pack.faces.len());
        }
        log::info!(
            "Loaded card art pack {}",
            pack.name.as_deref().unwrap_or("(unnamed)")
        );
        Ok(Self { faces })
    }

    pub fn get(&self, card: &Card) -> Option<&[String]> {
        self.faces.get(&card.label()).map(Vec::as_slice)
    }

    pub fn is_complete(&self) -> bool {
        all_cards().all(|card| self.faces.contains_key(&card.label()))
    }
}

fn all_cards() -> impl Iterator<Item = Card> {
    (0..DECK_SIZE).map(Card::from_index)
}

fn built_in_face(rank: Rank, suit: Suit) -> Vec<String> {
    const INNER: usize = FACE_WIDTH - 2;
    let rank = rank.symbol();
    let pip = suit.pip();
    let blank = " ".repeat(INNER);
    let border = "─".repeat(INNER);
    vec![
        format!("┌{border}┐"),
        format!("│{rank:<INNER$}│"),
        format!("│{pip:<INNER$}│"),
        format!("│{blank}│"),
        format!("│{pip:^INNER$}│"),
        format!("│{blank}│"),
        format!("│{pip:>INNER$}│"),
        format!("│{rank:>INNER$}│"),
        format!("└{border}┘"),
    ]
}
