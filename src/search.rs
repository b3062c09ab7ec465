// Adversarial search over hypothetical futures
//
// Red is the maximizing side, Blue the minimizing side. Every speculative
// move is wrapped in snapshot/apply/recurse/restore, so the state handed in
// is exactly as it was when the call returns.

use crate::board::GameState;
use crate::eval::{evaluate, terminal_score};
use crate::types::Player;

/// Alpha bound for a fresh alpha-beta search
pub const NEG_INFINITY: i32 = i32::MIN;
/// Beta bound for a fresh alpha-beta search
pub const POS_INFINITY: i32 = i32::MAX;

/// Depth-first searcher that counts the nodes it visits
#[derive(Debug, Default, Clone)]
pub struct Searcher {
    nodes: u64,
    cutoffs: u64,
}

impl Searcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nodes visited since construction or the last `reset`
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Alpha-beta cutoffs taken since construction or the last `reset`
    pub fn cutoffs(&self) -> u64 {
        self.cutoffs
    }

    pub fn reset(&mut self) {
        self.nodes = 0;
        self.cutoffs = 0;
    }

    /// Plain minimax to `depth` plies.
    ///
    /// Terminal checks come before the depth check, so a blocked side scores
    /// ±1000 even at depth 0.
    pub fn minimax(&mut self, state: &mut GameState, depth: u8, maximizing: bool) -> i32 {
        self.nodes += 1;

        if let Some(score) = terminal_score(state) {
            return score;
        }
        if depth == 0 {
            return evaluate(state);
        }

        let (mover, mut best) = if maximizing {
            (Player::Red, i32::MIN)
        } else {
            (Player::Blue, i32::MAX)
        };

        for mv in state.legal_moves(mover) {
            let saved = state.snapshot();
            state.apply_move(mover, mv);

            let score = self.minimax(state, depth - 1, !maximizing);

            state.restore(saved);

            best = if maximizing {
                best.max(score)
            } else {
                best.min(score)
            };
        }

        best
    }

    /// Minimax with alpha-beta pruning. Returns the same value as
    /// `minimax` for the same depth and side; only the visited node
    /// count differs.
    pub fn alpha_beta(
        &mut self,
        state: &mut GameState,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> i32 {
        self.nodes += 1;

        if let Some(score) = terminal_score(state) {
            return score;
        }
        if depth == 0 {
            return evaluate(state);
        }

        if maximizing {
            let mut max_eval = i32::MIN;

            for mv in state.legal_moves(Player::Red) {
                let saved = state.snapshot();
                state.apply_move(Player::Red, mv);

                let score = self.alpha_beta(state, depth - 1, alpha, beta, false);

                state.restore(saved);

                max_eval = max_eval.max(score);
                alpha = alpha.max(score);
                if beta <= alpha {
                    self.cutoffs += 1;
                    break;
                }
            }

            max_eval
        } else {
            let mut min_eval = i32::MAX;

            for mv in state.legal_moves(Player::Blue) {
                let saved = state.snapshot();
                state.apply_move(Player::Blue, mv);

                let score = self.alpha_beta(state, depth - 1, alpha, beta, true);

                state.restore(saved);

                min_eval = min_eval.min(score);
                beta = beta.min(score);
                if beta <= alpha {
                    self.cutoffs += 1;
                    break;
                }
            }

            min_eval
        }
    }
}
