//! Move executor: resolves a source selection into a run of cards, validates the
//! destination, and produces the next snapshot.

use thiserror::Error;

use crate::engine::{Card, GameState};
use crate::rules::{
    can_place_on_foundation, can_place_on_tableau, is_valid_tableau_run, FoundationPolicy,
};
use crate::selection::Selection;

/// Why a move was refused. Refusal is an ordinary outcome; the table is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveRejected {
    #[error("there is no pile at {0}")]
    NoSuchPile(Selection),
    #[error("{0} is empty")]
    EmptySource(Selection),
    #[error("{0} points past the end of the pile")]
    CardOutOfRange(Selection),
    #[error("{0} includes face-down cards")]
    FaceDown(Selection),
    #[error("{0} is not an alternating descending run")]
    BrokenRun(Selection),
    #[error("foundation cards are locked")]
    FoundationLocked,
    #[error("only the top card of {0} can be moved")]
    NotTopCard(Selection),
    #[error("a foundation only takes one card at a time")]
    RunToFoundation,
    #[error("cards cannot be moved onto {0}")]
    InvalidDestination(Selection),
    #[error("source and destination are the same pile")]
    SamePile,
    #[error("{card} cannot go on {to}")]
    Illegal { card: Card, to: Selection },
}

/// The cards picked up by a source selection, starting at `start` in their pile.
#[derive(Debug, Clone, Copy)]
struct Run<'a> {
    cards: &'a [Card],
    start: usize,
}

fn resolve_source<'a>(
    state: &'a GameState,
    from: &Selection,
    policy: FoundationPolicy,
) -> Result<Run<'a>, MoveRejected> {
    match *from {
        Selection::Waste => {
            let len = state.waste.len();
            if len == 0 {
                return Err(MoveRejected::EmptySource(*from));
            }
            Ok(Run {
                cards: &state.waste.cards[len - 1..],
                start: len - 1,
            })
        }
        Selection::Foundation { index, card_index } => {
            if !policy.allows_foundation_source() {
                return Err(MoveRejected::FoundationLocked);
            }
            let pile = state
                .foundations
                .get(index)
                .ok_or(MoveRejected::NoSuchPile(*from))?;
            let top = pile
                .len()
                .checked_sub(1)
                .ok_or(MoveRejected::EmptySource(*from))?;
            if card_index.is_some_and(|idx| idx != top) {
                return Err(MoveRejected::NotTopCard(*from));
            }
            Ok(Run {
                cards: &pile.cards[top..],
                start: top,
            })
        }
        Selection::Tableau { index, card_index } => {
            let pile = state
                .tableau
                .get(index)
                .ok_or(MoveRejected::NoSuchPile(*from))?;
            if pile.is_empty() {
                return Err(MoveRejected::EmptySource(*from));
            }
            let start = card_index.unwrap_or(pile.len() - 1);
            if start >= pile.len() {
                return Err(MoveRejected::CardOutOfRange(*from));
            }
            let cards = &pile.cards[start..];
            if cards.iter().any(|card| !card.face_up) {
                return Err(MoveRejected::FaceDown(*from));
            }
            if !is_valid_tableau_run(cards) {
                return Err(MoveRejected::BrokenRun(*from));
            }
            Ok(Run { cards, start })
        }
    }
}

fn check_destination(state: &GameState, run: &[Card], to: &Selection) -> Result<(), MoveRejected> {
    let (legal, card) = match *to {
        Selection::Waste => return Err(MoveRejected::InvalidDestination(*to)),
        Selection::Foundation { index, .. } => {
            let pile = state
                .foundations
                .get(index)
                .ok_or(MoveRejected::NoSuchPile(*to))?;
            if run.len() != 1 {
                return Err(MoveRejected::RunToFoundation);
            }
            (can_place_on_foundation(&run[0], pile.as_slice()), run[0])
        }
        Selection::Tableau { index, .. } => {
            let pile = state
                .tableau
                .get(index)
                .ok_or(MoveRejected::NoSuchPile(*to))?;
            (can_place_on_tableau(&run[0], pile.as_slice()), run[0])
        }
    };
    if legal {
        Ok(())
    } else {
        Err(MoveRejected::Illegal { card, to: *to })
    }
}

fn plan<'a>(
    state: &'a GameState,
    from: &Selection,
    to: &Selection,
    policy: FoundationPolicy,
) -> Result<Run<'a>, MoveRejected> {
    if from.same_pile(to) {
        return Err(MoveRejected::SamePile);
    }
    let run = resolve_source(state, from, policy)?;
    check_destination(state, run.cards, to)?;
    Ok(run)
}

/// Checks a move without building the next state.
pub fn validate_move(
    state: &GameState,
    from: &Selection,
    to: &Selection,
    policy: FoundationPolicy,
) -> Result<(), MoveRejected> {
    plan(state, from, to, policy).map(|_| ())
}

pub fn can_move(
    state: &GameState,
    from: &Selection,
    to: &Selection,
    policy: FoundationPolicy,
) -> bool {
    validate_move(state, from, to, policy).is_ok()
}

/// Transfers the selected run and returns the resulting snapshot.
///
/// A tableau source whose new top card is face-down gets that card turned up.
/// `state` itself is never modified.
pub fn attempt_move(
    state: &GameState,
    from: &Selection,
    to: &Selection,
    policy: FoundationPolicy,
) -> Result<GameState, MoveRejected> {
    let run = plan(state, from, to, policy)?;
    let moved = run.cards.to_vec();
    let start = run.start;

    let mut next = state.clone();
    match *from {
        Selection::Waste => next.waste.cards.truncate(start),
        Selection::Foundation { index, .. } => next.foundations[index].cards.truncate(start),
        Selection::Tableau { index, .. } => {
            next.tableau[index].cards.truncate(start);
            next.reveal_tableau_top(index);
        }
    }
    match *to {
        Selection::Foundation { index, .. } => next.foundations[index].cards.extend(moved),
        Selection::Tableau { index, .. } => next.tableau[index].cards.extend(moved),
        Selection::Waste => return Err(MoveRejected::InvalidDestination(*to)),
    }
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Rank, Suit};

    fn up(suit: Suit, rank: Rank) -> Card {
        Card::new(suit, rank).turned(true)
    }

    fn down(suit: Suit, rank: Rank) -> Card {
        Card::new(suit, rank)
    }

    const LOCKED: FoundationPolicy = FoundationPolicy::Locked;

    #[test]
    fn run_moves_as_a_unit_and_flips_exposed_card() {
        let mut state = GameState::new();
        state.tableau[0].cards = vec![
            down(Suit::Clubs, Rank::Two),
            up(Suit::Spades, Rank::Nine),
            up(Suit::Hearts, Rank::Eight),
        ];
        state.tableau[1].cards = vec![up(Suit::Diamonds, Rank::Ten)];

        let next = attempt_move(
            &state,
            &Selection::tableau_card(0, 1),
            &Selection::tableau(1),
            LOCKED,
        )
        .unwrap();

        assert_eq!(next.tableau[0].cards, vec![up(Suit::Clubs, Rank::Two)]);
        assert_eq!(
            next.tableau[1].cards,
            vec![
                up(Suit::Diamonds, Rank::Ten),
                up(Suit::Spades, Rank::Nine),
                up(Suit::Hearts, Rank::Eight),
            ]
        );
        // The old snapshot keeps its face-down card.
        assert!(!state.tableau[0].cards[0].face_up);
        assert_eq!(state.tableau[0].len(), 3);
    }

    #[test]
    fn default_tableau_source_is_the_top_card() {
        let mut state = GameState::new();
        state.tableau[0].cards = vec![up(Suit::Spades, Rank::Nine), up(Suit::Hearts, Rank::Eight)];
        state.tableau[1].cards = vec![up(Suit::Clubs, Rank::Nine)];
        let next =
            attempt_move(&state, &Selection::tableau(0), &Selection::tableau(1), LOCKED).unwrap();
        assert_eq!(next.tableau[0].cards, vec![up(Suit::Spades, Rank::Nine)]);
        assert_eq!(next.tableau[1].len(), 2);
    }

    #[test]
    fn face_down_cards_are_not_a_source() {
        let mut state = GameState::new();
        state.tableau[0].cards = vec![
            down(Suit::Spades, Rank::King),
            up(Suit::Hearts, Rank::Queen),
        ];
        assert_eq!(
            attempt_move(
                &state,
                &Selection::tableau_card(0, 0),
                &Selection::tableau(1),
                LOCKED
            ),
            Err(MoveRejected::FaceDown(Selection::tableau_card(0, 0)))
        );
    }

    #[test]
    fn empty_and_missing_sources_are_rejected() {
        let state = GameState::new();
        assert_eq!(
            attempt_move(&state, &Selection::Waste, &Selection::foundation(0), LOCKED),
            Err(MoveRejected::EmptySource(Selection::Waste))
        );
        assert_eq!(
            attempt_move(&state, &Selection::tableau(9), &Selection::tableau(0), LOCKED),
            Err(MoveRejected::NoSuchPile(Selection::tableau(9)))
        );
    }

    #[test]
    fn runs_cannot_go_to_a_foundation() {
        let mut state = GameState::new();
        state.tableau[0].cards = vec![up(Suit::Clubs, Rank::Two), up(Suit::Spades, Rank::Ace)];
        state.foundations[0].cards = vec![up(Suit::Clubs, Rank::Ace)];
        assert_eq!(
            attempt_move(
                &state,
                &Selection::tableau_card(0, 0),
                &Selection::foundation(0),
                LOCKED
            ),
            Err(MoveRejected::BrokenRun(Selection::tableau_card(0, 0)))
        );
        state.tableau[0].cards = vec![up(Suit::Diamonds, Rank::Two), up(Suit::Clubs, Rank::Ace)];
        state.foundations[0].cards.clear();
        assert_eq!(
            attempt_move(
                &state,
                &Selection::tableau_card(0, 0),
                &Selection::foundation(0),
                LOCKED
            ),
            Err(MoveRejected::RunToFoundation)
        );
    }

    #[test]
    fn waste_and_same_pile_destinations_are_rejected() {
        let mut state = GameState::new();
        state.waste.cards = vec![up(Suit::Spades, Rank::King)];
        state.tableau[0].cards = vec![up(Suit::Hearts, Rank::Queen)];
        assert_eq!(
            attempt_move(&state, &Selection::tableau(0), &Selection::Waste, LOCKED),
            Err(MoveRejected::InvalidDestination(Selection::Waste))
        );
        assert_eq!(
            attempt_move(&state, &Selection::tableau(0), &Selection::tableau(0), LOCKED),
            Err(MoveRejected::SamePile)
        );
    }

    #[test]
    fn foundation_source_follows_policy() {
        let mut state = GameState::new();
        state.foundations[1].cards = vec![up(Suit::Hearts, Rank::Ace), up(Suit::Hearts, Rank::Two)];
        state.tableau[3].cards = vec![up(Suit::Spades, Rank::Three)];

        assert_eq!(
            attempt_move(&state, &Selection::foundation(1), &Selection::tableau(3), LOCKED),
            Err(MoveRejected::FoundationLocked)
        );

        let draggable = FoundationPolicy::TopCardDraggable;
        let next =
            attempt_move(&state, &Selection::foundation(1), &Selection::tableau(3), draggable)
                .unwrap();
        assert_eq!(next.foundations[1].cards, vec![up(Suit::Hearts, Rank::Ace)]);
        assert_eq!(next.tableau[3].top(), Some(&up(Suit::Hearts, Rank::Two)));

        let below_top = Selection::Foundation {
            index: 1,
            card_index: Some(0),
        };
        assert_eq!(
            attempt_move(&state, &below_top, &Selection::tableau(3), draggable),
            Err(MoveRejected::NotTopCard(below_top))
        );
    }

    #[test]
    fn validate_matches_attempt() {
        let mut state = GameState::new();
        state.waste.cards = vec![up(Suit::Clubs, Rank::Ace)];
        assert!(can_move(&state, &Selection::Waste, &Selection::foundation(3), LOCKED));
        assert!(!can_move(&state, &Selection::Waste, &Selection::tableau(3), LOCKED));
        assert!(attempt_move(&state, &Selection::Waste, &Selection::foundation(3), LOCKED).is_ok());
    }
}
