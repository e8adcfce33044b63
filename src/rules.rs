//! Placement predicates for tableau and foundation piles.
//!
//! These only look at the card offered and the destination pile. Whether the
//! card may leave its source at all is decided by the move executor.

use crate::engine::{Card, Rank};

/// Whether foundation piles may act as a move source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FoundationPolicy {
    /// Cards on a foundation stay there.
    #[default]
    Locked,
    /// The top foundation card may be moved back onto the tableau.
    TopCardDraggable,
}

impl FoundationPolicy {
    pub fn allows_foundation_source(self) -> bool {
        matches!(self, FoundationPolicy::TopCardDraggable)
    }
}

pub fn can_place_on_tableau(card: &Card, pile: &[Card]) -> bool {
    match pile.last() {
        Some(top) => {
            top.face_up && card.color() != top.color() && top.rank.is_one_above(card.rank)
        }
        None => card.rank == Rank::King,
    }
}

pub fn can_place_on_foundation(card: &Card, pile: &[Card]) -> bool {
    match pile.last() {
        Some(top) => card.suit == top.suit && card.rank.is_one_above(top.rank),
        None => card.rank == Rank::Ace,
    }
}

/// A face-up run that alternates colour and descends one rank at a time.
pub fn is_valid_tableau_run(cards: &[Card]) -> bool {
    if cards.is_empty() || cards.iter().any(|card| !card.face_up) {
        return false;
    }
    cards.windows(2).all(|pair| {
        let (upper, lower) = (pair[0], pair[1]);
        upper.color() != lower.color() && upper.rank.is_one_above(lower.rank)
    })
}
