//! Drag-and-drop transport: a [`Selection`] carried across a drag gesture as JSON.

use crate::constants::{FOUNDATION_PILES, TABLEAU_PILES};
use crate::engine::GameState;
use crate::selection::Selection;

pub use crate::constants::DRAG_DATA_TYPE;

pub fn serialize_drag_payload(payload: &Selection) -> String {
    // A plain enum of integers always serializes.
    serde_json::to_string(payload).unwrap_or_default()
}

/// Anything that does not decode to a well-formed selection is treated as no selection.
pub fn deserialize_drag_payload(data: &str) -> Option<Selection> {
    match serde_json::from_str(data) {
        Ok(selection) => Some(selection),
        Err(e) => {
            tracing::debug!(error = %e, "drag: ignoring malformed payload");
            None
        }
    }
}

/// Whether the dragged selection still names something that can be picked up.
pub fn validate_drag_source(payload: &Selection, state: &GameState) -> bool {
    match *payload {
        Selection::Waste => !state.waste.is_empty(),
        Selection::Foundation { index, .. } => {
            index < FOUNDATION_PILES && !state.foundations[index].is_empty()
        }
        Selection::Tableau { index, card_index } => {
            index < TABLEAU_PILES
                && card_index.is_some_and(|card| card < state.tableau[index].len())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{deal_with_seed, Card, Rank, Suit};

    #[test]
    fn payload_uses_camel_case_card_index() {
        let json = serialize_drag_payload(&Selection::tableau_card(3, 2));
        assert_eq!(json, r#"{"type":"tableau","index":3,"cardIndex":2}"#);
        assert_eq!(serialize_drag_payload(&Selection::Waste), r#"{"type":"waste"}"#);
        assert_eq!(
            deserialize_drag_payload(&json),
            Some(Selection::tableau_card(3, 2))
        );
    }

    #[test]
    fn malformed_payloads_are_no_selection() {
        for bad in [
            "",
            "not json",
            "42",
            "null",
            r#"{"type":"stock"}"#,
            r#"{"type":"tableau"}"#,
            r#"{"type":"foundation","index":-1}"#,
        ] {
            assert_eq!(deserialize_drag_payload(bad), None, "{bad}");
        }
    }

    #[test]
    fn optional_card_index_may_be_absent() {
        assert_eq!(
            deserialize_drag_payload(r#"{"type":"foundation","index":1}"#),
            Some(Selection::foundation(1))
        );
    }

    #[test]
    fn source_validation() {
        let mut state = deal_with_seed(5);
        assert!(!validate_drag_source(&Selection::Waste, &state));
        state.waste.cards.push(Card::new(Suit::Clubs, Rank::Two).turned(true));
        assert!(validate_drag_source(&Selection::Waste, &state));

        assert!(!validate_drag_source(&Selection::foundation(0), &state));
        assert!(!validate_drag_source(&Selection::foundation(7), &state));

        assert!(validate_drag_source(&Selection::tableau_card(6, 6), &state));
        assert!(!validate_drag_source(&Selection::tableau_card(6, 7), &state));
        assert!(!validate_drag_source(&Selection::tableau(6), &state));
        assert!(!validate_drag_source(&Selection::tableau_card(7, 0), &state));
    }
}
