//! The state-owning coordinator behind the command surface a front end drives.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::drag::{deserialize_drag_payload, validate_drag_source};
use crate::engine::{deal_initial_game, GameState, StockAction};
use crate::hint::{find_hint, Hint};
use crate::history::History;
use crate::moves::{attempt_move, MoveRejected};
use crate::rules::FoundationPolicy;
use crate::selection::Selection;

pub struct Game {
    history: History,
    selection: Option<Selection>,
    hint: Option<Hint>,
    policy: FoundationPolicy,
    rng: StdRng,
}

impl Game {
    /// A freshly dealt game shuffled from OS entropy.
    pub fn new(policy: FoundationPolicy) -> Self {
        Self::with_rng(policy, StdRng::from_os_rng())
    }

    /// A freshly dealt game whose deals are reproducible from `seed`.
    pub fn with_seed(policy: FoundationPolicy, seed: u64) -> Self {
        Self::with_rng(policy, StdRng::seed_from_u64(seed))
    }

    fn with_rng(policy: FoundationPolicy, mut rng: StdRng) -> Self {
        let state = deal_initial_game(&mut rng);
        Self {
            history: History::new(state),
            selection: None,
            hint: None,
            policy,
            rng,
        }
    }

    /// Continue from an arbitrary position, e.g. a prepared test layout.
    pub fn from_state(policy: FoundationPolicy, state: GameState) -> Self {
        Self {
            history: History::new(state),
            selection: None,
            hint: None,
            policy,
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn new_game(&mut self) -> &GameState {
        let deal_seed: u64 = self.rng.random();
        let mut deal_rng = StdRng::seed_from_u64(deal_seed);
        self.history.reset(deal_initial_game(&mut deal_rng));
        self.clear_ui_state();
        info!(deal_seed, "new game dealt");
        self.history.present()
    }

    /// Draws never count toward the move counter.
    /// Nothing is recorded when there is nothing to draw.
    pub fn draw(&mut self) -> &GameState {
        self.clear_ui_state();
        let (next, action) = self.history.present().draw();
        debug!(?action, "draw");
        if action != StockAction::NoOp {
            self.history.push(next, false);
        }
        self.history.present()
    }

    pub fn select(&mut self, selection: Option<Selection>) {
        self.selection = selection;
        self.hint = None;
    }

    /// Applies a move and records it.
    ///
    /// Only drag moves count, and only while move counting is on; click moves never do.
    pub fn move_cards(
        &mut self,
        from: Selection,
        to: Selection,
        is_drag_move: bool,
        move_counting_enabled: bool,
    ) -> Result<&GameState, MoveRejected> {
        self.clear_ui_state();
        match attempt_move(self.history.present(), &from, &to, self.policy) {
            Ok(next) => {
                let counts = is_drag_move && move_counting_enabled;
                self.history.push(next, counts);
                let moves = self.history.moves();
                debug!(%from, %to, counts, moves, "move applied");
                if self.history.present().is_won() {
                    info!(moves, "game won");
                }
                Ok(self.history.present())
            }
            Err(reason) => {
                debug!(%from, %to, %reason, "move rejected");
                Err(reason)
            }
        }
    }

    /// Completes a drag gesture.
    ///
    /// A payload that does not decode, or that names nothing which can be picked up, is
    /// treated as no selection: the table is left as it was and nothing is recorded.
    pub fn drop_payload(
        &mut self,
        payload: &str,
        to: Selection,
        move_counting_enabled: bool,
    ) -> Result<&GameState, MoveRejected> {
        let source = deserialize_drag_payload(payload)
            .filter(|from| validate_drag_source(from, self.history.present()));
        match source {
            Some(from) => self.move_cards(from, to, true, move_counting_enabled),
            None => {
                debug!(payload, "drop ignored");
                self.clear_ui_state();
                Ok(self.history.present())
            }
        }
    }

    pub fn undo(&mut self) -> &GameState {
        self.clear_ui_state();
        if self.history.pop() {
            debug!(moves = self.history.moves(), "undo");
        }
        self.history.present()
    }

    pub fn show_hint(&mut self) -> Option<Hint> {
        self.selection = None;
        self.hint = find_hint(self.history.present(), self.policy);
        if let Some(hint) = &self.hint {
            debug!(from = %hint.from, to = %hint.to, "hint");
        }
        self.hint
    }

    pub fn clear_hint(&mut self) {
        self.hint = None;
    }

    pub fn clear_ui_state(&mut self) {
        self.selection = None;
        self.hint = None;
    }

    pub fn state(&self) -> &GameState {
        self.history.present()
    }

    pub fn moves(&self) -> u32 {
        self.history.moves()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn is_won(&self) -> bool {
        self.history.present().is_won()
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn hint(&self) -> Option<Hint> {
        self.hint
    }

    pub fn policy(&self) -> FoundationPolicy {
        self.policy
    }

    pub fn history(&self) -> &History {
        &self.history
    }
}
