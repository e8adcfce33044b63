pub mod config;
pub mod constants;
pub mod display;
pub mod drag;
pub mod engine;
pub mod game;
pub mod hint;
pub mod history;
pub mod moves;
pub mod prefs;
pub mod results;
pub mod rules;
pub mod selection;
pub mod timer;

pub use engine::{Card, CardId, GameState, Rank, Suit};
pub use game::Game;
pub use hint::Hint;
pub use moves::MoveRejected;
pub use rules::FoundationPolicy;
pub use selection::Selection;
