//! Greedy single-step hint search.

use serde::{Deserialize, Serialize};

use crate::constants::{FOUNDATION_PILES, TABLEAU_PILES};
use crate::engine::GameState;
use crate::moves::can_move;
use crate::rules::FoundationPolicy;
use crate::selection::Selection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hint {
    pub from: Selection,
    pub to: Selection,
}

/// Returns the first legal move in a fixed priority order:
///
/// 1. waste top to a foundation
/// 2. a tableau top card to a foundation
/// 3. a foundation top card to the tableau (only when the policy lets foundations be a source)
/// 4. waste top to the tableau
/// 5. any face-up tableau card, with everything above it, to another tableau pile
///
/// Within each step piles are tried in ascending index order. Moves that would
/// need a draw first are not considered.
pub fn find_hint(state: &GameState, policy: FoundationPolicy) -> Option<Hint> {
    let legal = |from: Selection, to: Selection| {
        can_move(state, &from, &to, policy).then_some(Hint { from, to })
    };

    if !state.waste.is_empty() {
        if let Some(hint) =
            (0..FOUNDATION_PILES).find_map(|f| legal(Selection::Waste, Selection::foundation(f)))
        {
            return Some(hint);
        }
    }

    for (column, pile) in state.tableau.iter().enumerate() {
        let Some(top) = pile.len().checked_sub(1) else {
            continue;
        };
        let from = Selection::tableau_card(column, top);
        let to_foundation =
            (0..FOUNDATION_PILES).find_map(|f| legal(from, Selection::foundation(f)));
        if let Some(hint) = to_foundation {
            return Some(hint);
        }
    }

    if policy.allows_foundation_source() {
        for (index, pile) in state.foundations.iter().enumerate() {
            let Some(top) = pile.len().checked_sub(1) else {
                continue;
            };
            let from = Selection::Foundation {
                index,
                card_index: Some(top),
            };
            let to_tableau = (0..TABLEAU_PILES).find_map(|t| legal(from, Selection::tableau(t)));
            if let Some(hint) = to_tableau {
                return Some(hint);
            }
        }
    }

    if !state.waste.is_empty() {
        if let Some(hint) =
            (0..TABLEAU_PILES).find_map(|t| legal(Selection::Waste, Selection::tableau(t)))
        {
            return Some(hint);
        }
    }

    for (column, pile) in state.tableau.iter().enumerate() {
        for (card_index, card) in pile.cards.iter().enumerate() {
            if !card.face_up {
                continue;
            }
            let from = Selection::tableau_card(column, card_index);
            let found = (0..TABLEAU_PILES)
                .filter(|&target| target != column)
                .find_map(|target| legal(from, Selection::tableau(target)));
            if found.is_some() {
                return found;
            }
        }
    }

    None
}
