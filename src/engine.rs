//! Core Solitaire game engine.
//! Card and deck model, the triangular deal, the stock/waste cycler and win detection.
//!
//! Every operation that changes the table takes `&self` and hands back a fresh
//! [`GameState`]; a snapshot that has been handed out is never written to again.

use std::fmt;

use anyhow::{bail, Result};
use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::constants::{DECK_SIZE, FOUNDATION_PILES, SUIT_SIZE, TABLEAU_DEAL, TABLEAU_PILES};

pub const SUITS: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];
pub const RANKS: [Rank; 13] = [
    Rank::Ace,
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
];

static CANONICAL_DECK: Lazy<Vec<Card>> = Lazy::new(|| {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for suit in SUITS {
        for rank in RANKS {
            deck.push(Card::new(suit, rank));
        }
    }
    deck
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardColor {
    Red,
    Black,
}

impl Suit {
    pub const fn index(self) -> u8 {
        match self {
            Suit::Hearts => 0,
            Suit::Diamonds => 1,
            Suit::Clubs => 2,
            Suit::Spades => 3,
        }
    }

    pub const fn color(self) -> CardColor {
        match self {
            Suit::Hearts | Suit::Diamonds => CardColor::Red,
            Suit::Spades | Suit::Clubs => CardColor::Black,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Suit::Hearts => "hearts",
            Suit::Diamonds => "diamonds",
            Suit::Clubs => "clubs",
            Suit::Spades => "spades",
        }
    }

    pub const fn symbol(self) -> char {
        match self {
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
            Suit::Spades => '♠',
        }
    }
}

/// Ace is always low; there is no wraparound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    Ace = 1,
    Two,
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
}

impl Rank {
    pub const fn value(self) -> u8 {
        self as u8
    }

    pub const fn column(self) -> u8 {
        (self as u8) - 1
    }

    pub const fn label(self) -> &'static str {
        match self {
            Rank::Ace => "A",
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
        }
    }

    /// True when `self` sits exactly one step above `other`.
    pub const fn is_one_above(self, other: Rank) -> bool {
        self.value() == other.value() + 1
    }
}

/// Stable identity of a card within a deck, derived from suit and rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CardId(u8);

impl CardId {
    pub const fn of(suit: Suit, rank: Rank) -> Self {
        Self(suit.index() * SUIT_SIZE as u8 + rank.column())
    }

    pub const fn index(self) -> u8 {
        self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suit = SUITS[(self.0 as usize) / SUIT_SIZE];
        let rank = RANKS[(self.0 as usize) % SUIT_SIZE];
        write!(f, "{}-{}", suit.name(), rank.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
    pub face_up: bool,
    pub id: CardId,
}

impl Card {
    pub fn new(suit: Suit, rank: Rank) -> Self {
        Self {
            suit,
            rank,
            face_up: false,
            id: CardId::of(suit, rank),
        }
    }

    /// Same card, turned to the requested side.
    pub fn turned(self, face_up: bool) -> Self {
        Self { face_up, ..self }
    }

    pub fn color(self) -> CardColor {
        self.suit.color()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.label(), self.suit.symbol())
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct Pile {
    pub cards: Vec<Card>,
}

impl Pile {
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn top(&self) -> Option<&Card> {
        self.cards.last()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    /// Index of the first card of the face-up suffix, or `len()` when none is face-up.
    pub fn face_up_from(&self) -> usize {
        self.cards
            .iter()
            .rposition(|card| !card.face_up)
            .map_or(0, |idx| idx + 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockAction {
    Drawn(usize),
    Recycled(usize),
    NoOp,
}

/// One snapshot of the table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct GameState {
    /// Face-down draw pile; the end of the vector is the top.
    pub stock: Pile,
    pub waste: Pile,
    pub foundations: [Pile; FOUNDATION_PILES],
    pub tableau: [Pile; TABLEAU_PILES],
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw one card from stock to waste, or recycle the waste when the stock runs out.
    pub fn draw(&self) -> (GameState, StockAction) {
        let mut next = self.clone();
        let action = next.stock_click();
        (next, action)
    }

    fn stock_click(&mut self) -> StockAction {
        if self.stock.is_empty() {
            let recycled = self.recycle_stock();
            if recycled > 0 {
                StockAction::Recycled(recycled)
            } else {
                StockAction::NoOp
            }
        } else if self.draw_from_stock() {
            StockAction::Drawn(1)
        } else {
            StockAction::NoOp
        }
    }

    fn draw_from_stock(&mut self) -> bool {
        match self.stock.cards.pop() {
            Some(card) => {
                self.waste.cards.push(card.turned(true));
                true
            }
            None => false,
        }
    }

    // Popping the waste reverses it, so its old top lands at the bottom of the new stock.
    fn recycle_stock(&mut self) -> usize {
        let mut moved = 0;
        while let Some(card) = self.waste.cards.pop() {
            self.stock.cards.push(card.turned(false));
            moved += 1;
        }
        moved
    }

    pub(crate) fn reveal_tableau_top(&mut self, column: usize) -> bool {
        if let Some(card) = self
            .tableau
            .get_mut(column)
            .and_then(|pile| pile.cards.last_mut())
        {
            if !card.face_up {
                card.face_up = true;
                return true;
            }
        }
        false
    }

    pub fn is_won(&self) -> bool {
        self.foundations.iter().all(|pile| pile.len() == SUIT_SIZE)
    }

    pub fn waste_top(&self) -> Option<&Card> {
        self.waste.top()
    }

    pub fn stock_count(&self) -> usize {
        self.stock.len()
    }

    pub fn waste_count(&self) -> usize {
        self.waste.len()
    }

    pub fn tableau_column(&self, column: usize) -> Option<&[Card]> {
        self.tableau.get(column).map(Pile::as_slice)
    }

    pub fn foundation(&self, index: usize) -> Option<&[Card]> {
        self.foundations.get(index).map(Pile::as_slice)
    }

    /// Every card on the table: stock, waste, foundations, then tableau.
    pub fn cards(&self) -> impl Iterator<Item = &Card> + '_ {
        self.stock
            .cards
            .iter()
            .chain(self.waste.cards.iter())
            .chain(self.foundations.iter().flat_map(|pile| pile.cards.iter()))
            .chain(self.tableau.iter().flat_map(|pile| pile.cards.iter()))
    }
}

/// Win detector: every foundation holds a full suit.
pub fn check_win(state: &GameState) -> bool {
    state.is_won()
}

/// The 52 canonical cards, face-down, suit-major and rank-minor.
pub fn create_deck() -> Vec<Card> {
    CANONICAL_DECK.clone()
}

/// Fisher–Yates over a copy of `deck`; the input is left as it was.
pub fn shuffle_deck<R: Rng>(deck: &[Card], rng: &mut R) -> Vec<Card> {
    let mut shuffled = deck.to_vec();
    for i in (1..shuffled.len()).rev() {
        let j = rng.random_range(0..=i);
        shuffled.swap(i, j);
    }
    shuffled
}

pub fn deal_initial_game<R: Rng>(rng: &mut R) -> GameState {
    deal_ordered(shuffle_deck(&create_deck(), rng))
}

pub fn deal_with_seed(seed: u64) -> GameState {
    let mut rng = StdRng::seed_from_u64(seed);
    deal_initial_game(&mut rng)
}

/// Deals a caller-ordered deck. The first card of `deck` is dealt first.
pub fn deal_from_deck(deck: Vec<Card>) -> Result<GameState> {
    if deck.len() != DECK_SIZE {
        bail!("Expected {DECK_SIZE} cards to deal, got {}", deck.len());
    }
    let mut seen = [false; DECK_SIZE];
    for card in &deck {
        let slot = &mut seen[card.id.index() as usize];
        if *slot {
            bail!("Duplicate card {} in deck", card.id);
        }
        *slot = true;
    }
    Ok(deal_ordered(deck))
}

fn deal_ordered(deck: Vec<Card>) -> GameState {
    let mut state = GameState::new();
    let mut cards = deck.into_iter();

    // Round-robin: round i puts one card on each pile j >= i; the round's first card lands face up.
    'deal: for round in 0..TABLEAU_PILES {
        for column in round..TABLEAU_PILES {
            let Some(card) = cards.next() else {
                break 'deal;
            };
            state.tableau[column].cards.push(card.turned(column == round));
        }
    }
    debug_assert!(state.tableau.iter().map(Pile::len).sum::<usize>() <= TABLEAU_DEAL);

    // Remaining cards become the stock (all face down).
    state.stock.cards = cards.map(|card| card.turned(false)).collect();
    state
}
