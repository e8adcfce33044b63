//! Linear undo history with a move counter scoped to each snapshot.

use crate::engine::GameState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub state: GameState,
    pub moves: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    past: Vec<Snapshot>,
    present: GameState,
    moves: u32,
}

impl History {
    pub fn new(initial: GameState) -> Self {
        Self {
            past: Vec::new(),
            present: initial,
            moves: 0,
        }
    }

    /// Forget everything and start over from `initial` with a zero move count.
    pub fn reset(&mut self, initial: GameState) {
        *self = Self::new(initial);
    }

    /// Archive the current snapshot and make `next` current.
    ///
    /// The counter only advances when `counts_as_move` is set.
    pub fn push(&mut self, next: GameState, counts_as_move: bool) {
        let previous = std::mem::replace(&mut self.present, next);
        self.past.push(Snapshot {
            state: previous,
            moves: self.moves,
        });
        if counts_as_move {
            self.moves = self.moves.saturating_add(1);
        }
    }

    /// Restore the most recent archived snapshot, along with its move count.
    /// Returns `false` when there is nothing to undo.
    pub fn pop(&mut self) -> bool {
        match self.past.pop() {
            Some(snapshot) => {
                self.present = snapshot.state;
                self.moves = snapshot.moves;
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn present(&self) -> &GameState {
        &self.present
    }

    pub fn past(&self) -> &[Snapshot] {
        &self.past
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }
}
