//! Plain-text rendering of the table for the terminal front end.
//!
//! Face-down cards are shown as `XX`. The left margin numbers tableau rows so a
//! player can name a card position (`t3:2`).

use std::fmt::Write;

use crate::constants::{FOUNDATION_PILES, TABLEAU_PILES};
use crate::engine::{Card, GameState};
use crate::hint::Hint;

const CELL: usize = 5;

pub fn format_card_visible(card: &Card) -> String {
    if card.face_up {
        card.to_string()
    } else {
        "XX".to_string()
    }
}

pub fn render_stock_and_waste(state: &GameState) -> String {
    let stock = match state.stock_count() {
        0 => "Stock: [empty]".to_string(),
        n => format!("Stock: [{n} cards]"),
    };
    let waste = match state.waste_top() {
        None => "Waste: [empty]".to_string(),
        Some(top) => format!("Waste: [{top}] ({} cards)", state.waste_count()),
    };
    format!("{stock}    {waste}")
}

pub fn render_foundations(state: &GameState) -> String {
    let mut s = String::from("Foundations:");
    for idx in 0..FOUNDATION_PILES {
        match state.foundation(idx).and_then(|cards| cards.last()) {
            Some(top) => {
                let _ = write!(s, " f{idx}[{top}]");
            }
            None => {
                let _ = write!(s, " f{idx}[  ]");
            }
        }
    }
    s
}

pub fn render_tableau(state: &GameState) -> String {
    let mut s = String::from("   ");
    for column in 0..TABLEAU_PILES {
        let _ = write!(s, "{:<CELL$}", format!("t{column}"));
    }
    s.push('\n');

    let height = state.tableau.iter().map(|pile| pile.len()).max().unwrap_or(0);
    for row in 0..height {
        let _ = write!(s, "{row:>2} ");
        for column in 0..TABLEAU_PILES {
            let cell = state
                .tableau_column(column)
                .and_then(|cards| cards.get(row))
                .map(format_card_visible)
                .unwrap_or_default();
            let _ = write!(s, "{cell:<CELL$}");
        }
        s.truncate(s.trim_end().len());
        s.push('\n');
    }
    s
}

pub fn render_board(state: &GameState) -> String {
    format!(
        "{}\n{}\n\n{}",
        render_stock_and_waste(state),
        render_foundations(state),
        render_tableau(state)
    )
}

pub fn render_hint(hint: Option<&Hint>) -> String {
    match hint {
        Some(hint) => format!("Hint: {} -> {}", hint.from, hint.to),
        None => "No moves available; try drawing.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Rank, Suit};
    use crate::selection::Selection;

    #[test]
    fn hides_face_down_cards() {
        let card = Card::new(Suit::Diamonds, Rank::Ten);
        assert_eq!(format_card_visible(&card), "XX");
        assert_eq!(format_card_visible(&card.turned(true)), "10♦");
    }

    #[test]
    fn renders_piles_and_counts() {
        let mut state = GameState::new();
        state.stock.cards = vec![Card::new(Suit::Clubs, Rank::Two)];
        state.foundations[2].cards = vec![Card::new(Suit::Hearts, Rank::Ace).turned(true)];
        state.tableau[0].cards = vec![
            Card::new(Suit::Spades, Rank::Four),
            Card::new(Suit::Spades, Rank::Seven).turned(true),
        ];

        assert_eq!(
            render_stock_and_waste(&state),
            "Stock: [1 cards]    Waste: [empty]"
        );
        assert_eq!(
            render_foundations(&state),
            "Foundations: f0[  ] f1[  ] f2[A♥] f3[  ]"
        );
        let tableau = render_tableau(&state);
        let lines: Vec<&str> = tableau.lines().collect();
        assert_eq!(lines[1], " 0 XX");
        assert_eq!(lines[2], " 1 7♠");
    }

    #[test]
    fn hint_text() {
        let hint = Hint {
            from: Selection::Waste,
            to: Selection::foundation(1),
        };
        assert_eq!(render_hint(Some(&hint)), "Hint: w -> f1");
    }
}
