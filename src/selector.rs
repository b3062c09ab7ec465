// Difficulty policy: picks Red's move for the configured tier

use log::debug;
use rand::Rng;
use rayon::prelude::*;

use crate::board::GameState;
use crate::config::AiConfig;
use crate::search::{Searcher, NEG_INFINITY, POS_INFINITY};
use crate::types::{Coord, Difficulty, Player};

/// Lookahead behind a searched difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchTier {
    Minimax,
    AlphaBeta,
}

impl SearchTier {
    /// Search used by a difficulty; None for the random tier
    pub fn for_difficulty(difficulty: Difficulty) -> Option<SearchTier> {
        match difficulty {
            Difficulty::Easy => None,
            Difficulty::Medium => Some(SearchTier::Minimax),
            Difficulty::Hard => Some(SearchTier::AlphaBeta),
        }
    }
}

/// Chooses Red's move. Stateless apart from its configuration.
#[derive(Debug, Clone)]
pub struct MoveSelector {
    config: AiConfig,
}

impl MoveSelector {
    pub fn new(config: AiConfig) -> Self {
        MoveSelector { config }
    }

    /// Returns Red's chosen destination, or None when Red is blocked
    /// (Blue has won and no search is performed).
    ///
    /// # Arguments
    /// * `state` - Current position; never modified
    /// * `difficulty` - Tier selected at game start
    /// * `rng` - Random source for the easy tier
    pub fn choose_move<R: Rng>(
        &self,
        state: &GameState,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> Option<Coord> {
        match SearchTier::for_difficulty(difficulty) {
            Some(tier) => self.choose_searched(state, tier),
            None => self.choose_random(state, rng),
        }
    }

    /// Uniformly random legal Red move
    pub fn choose_random<R: Rng>(&self, state: &GameState, rng: &mut R) -> Option<Coord> {
        let moves = state.legal_moves(Player::Red);
        if moves.is_empty() {
            return None;
        }
        Some(moves[rng.random_range(0..moves.len())])
    }

    /// Best-scoring legal Red move under `tier`; ties keep the earlier move
    pub fn choose_searched(&self, state: &GameState, tier: SearchTier) -> Option<Coord> {
        pick_best(&self.score_candidates(state, tier))
    }

    /// Scores every legal Red move by simulating it and searching Blue's
    /// replies. Results follow move-generation order.
    pub fn score_candidates(&self, state: &GameState, tier: SearchTier) -> Vec<(Coord, i32)> {
        let moves = state.legal_moves(Player::Red);

        let scored: Vec<(Coord, i32)> = if self.config.parallel_root {
            // Each candidate owns its own copy; collect keeps input order.
            moves
                .par_iter()
                .map(|&mv| {
                    let mut scratch = state.clone();
                    let mut searcher = Searcher::new();
                    (mv, self.score_move(&mut scratch, mv, tier, &mut searcher))
                })
                .collect()
        } else {
            let mut scratch = state.clone();
            let mut searcher = Searcher::new();
            moves
                .iter()
                .map(|&mv| (mv, self.score_move(&mut scratch, mv, tier, &mut searcher)))
                .collect()
        };

        for (mv, score) in &scored {
            debug!("{:?} candidate {} scored {}", tier, mv, score);
        }
        scored
    }

    fn score_move(
        &self,
        state: &mut GameState,
        mv: Coord,
        tier: SearchTier,
        searcher: &mut Searcher,
    ) -> i32 {
        searcher.reset();
        let saved = state.snapshot();
        state.apply_move(Player::Red, mv);

        // Blue replies next, so the subtree starts at a minimizing node
        let score = match tier {
            SearchTier::Minimax => searcher.minimax(state, self.config.medium_depth, false),
            SearchTier::AlphaBeta => searcher.alpha_beta(
                state,
                self.config.hard_depth,
                NEG_INFINITY,
                POS_INFINITY,
                false,
            ),
        };

        state.restore(saved);
        debug!("candidate {} searched {} nodes", mv, searcher.nodes());
        score
    }
}

/// First candidate with the strictly greatest score; ties keep the earlier move.
pub fn pick_best(scored: &[(Coord, i32)]) -> Option<Coord> {
    let mut best: Option<(Coord, i32)> = None;
    for &(mv, score) in scored {
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((mv, score)),
        }
    }
    best.map(|(mv, _)| mv)
}
