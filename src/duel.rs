// Match controller: the surface the presentation layer talks to
//
// Owns the live GameState, enforces turn order and runs the AI reply after
// the pacing delay. The search itself runs on a blocking worker over a copy
// of the state; only the chosen move touches the live state.

use log::{debug, info};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::board::GameState;
use crate::config::Config;
use crate::debug_logger::DebugLogger;
use crate::selector::{MoveSelector, SearchTier};
use crate::types::{Coord, Difficulty, Player};

/// Where the match currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No game started yet
    Idle,
    BlueToMove,
    RedToMove,
    Over { winner: Player },
}

/// Result of a human move attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HumanMove {
    /// Illegal destination or not Blue's turn; nothing changed
    Rejected,
    /// Move applied. `winner` is set when Red is left without a move.
    Accepted { winner: Option<Player> },
}

/// Result of an AI turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiTurn {
    /// Red moved. `winner` is set when Blue is left without a move.
    Moved {
        destination: Coord,
        winner: Option<Player>,
    },
    /// Red had no legal move; Blue wins
    Forfeited,
    /// A new game started or the turn was cancelled while it was pending
    Cancelled,
    /// Called outside Red's turn
    NotRedsTurn,
}

#[derive(Debug)]
struct Match {
    state: GameState,
    difficulty: Difficulty,
    phase: Phase,
    turn: u32,
}

/// A human-versus-AI duel
pub struct Duel {
    config: Config,
    selector: MoveSelector,
    current: Mutex<Match>,
    /// Bumped on every new game and cancellation; stale AI turns compare against it
    generation: AtomicU64,
    rng: Arc<Mutex<StdRng>>,
    logger: DebugLogger,
}

impl Duel {
    /// Creates a duel with debug tracing disabled
    pub fn new(config: Config) -> Self {
        Self::with_logger(config, DebugLogger::disabled())
    }

    pub fn with_logger(config: Config, logger: DebugLogger) -> Self {
        let rng = match config.ai.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Duel {
            selector: MoveSelector::new(config.ai.clone()),
            config,
            current: Mutex::new(Match {
                state: GameState::new(),
                difficulty: Difficulty::default(),
                phase: Phase::Idle,
                turn: 0,
            }),
            generation: AtomicU64::new(0),
            rng: Arc::new(Mutex::new(rng)),
            logger,
        }
    }

    /// Starts a fresh game at the given difficulty. Blue moves first.
    /// Any AI turn still pending from the previous game is discarded.
    pub fn start(&self, difficulty: Difficulty) -> GameState {
        let mut current = self.current.lock();
        // Generation only changes while the match is locked
        self.generation.fetch_add(1, Ordering::AcqRel);
        *current = Match {
            state: GameState::new(),
            difficulty,
            phase: Phase::BlueToMove,
            turn: 0,
        };

        info!("GAME START ({})", difficulty);
        current.state.clone()
    }

    /// Discards a pending AI turn without touching the game
    pub fn cancel_pending(&self) {
        let _current = self.current.lock();
        self.generation.fetch_add(1, Ordering::AcqRel);
    }

    /// Copy of the live state
    pub fn state(&self) -> GameState {
        self.current.lock().state.clone()
    }

    pub fn phase(&self) -> Phase {
        self.current.lock().phase
    }

    pub fn difficulty(&self) -> Difficulty {
        self.current.lock().difficulty
    }

    /// Confirmed moves so far in this game
    pub fn turn(&self) -> u32 {
        self.current.lock().turn
    }

    /// True iff the player has no legal move in the live state
    pub fn is_game_over(&self, player: Player) -> bool {
        self.current.lock().state.is_game_over(player)
    }

    /// Applies Blue's move if it is Blue's turn and the move is legal
    pub fn human_move(&self, destination: Coord) -> HumanMove {
        let mut current = self.current.lock();

        if current.phase != Phase::BlueToMove {
            debug!("Rejected {}: phase is {:?}", destination, current.phase);
            return HumanMove::Rejected;
        }
        if !current.state.try_move(Player::Blue, destination) {
            debug!("Rejected illegal move {}", destination);
            return HumanMove::Rejected;
        }

        current.turn += 1;
        info!("Turn {}: blue -> {}", current.turn, destination);
        self.logger.log_move(
            current.turn,
            Player::Blue,
            destination,
            current.state.rows(),
        );

        if current.state.is_game_over(Player::Red) {
            current.phase = Phase::Over { winner: Player::Blue };
            info!("GAME OVER: blue wins after {} turns", current.turn);
            return HumanMove::Accepted {
                winner: Some(Player::Blue),
            };
        }

        current.phase = Phase::RedToMove;
        HumanMove::Accepted { winner: None }
    }

    /// Chooses Red's move for the live state without applying it
    pub fn request_ai_move(&self) -> Option<Coord> {
        let (state, difficulty) = {
            let current = self.current.lock();
            (current.state.clone(), current.difficulty)
        };
        choose_red_move(&self.selector, &self.rng, &state, difficulty)
    }

    /// Plays Red's turn: waits the pacing delay, searches on a blocking
    /// worker, then applies the chosen move to the live state.
    ///
    /// # Returns
    /// * `Err` only if the search task panicked
    pub async fn ai_turn(&self) -> Result<AiTurn, String> {
        let (generation, state, difficulty) = {
            let current = self.current.lock();
            if current.phase != Phase::RedToMove {
                return Ok(AiTurn::NotRedsTurn);
            }
            (
                self.generation.load(Ordering::Acquire),
                current.state.clone(),
                current.difficulty,
            )
        };

        tokio::time::sleep(Duration::from_millis(self.config.timing.ai_delay_ms)).await;
        if self.generation.load(Ordering::Acquire) != generation {
            info!("AI turn cancelled before search");
            return Ok(AiTurn::Cancelled);
        }

        let start_time = Instant::now();
        let selector = self.selector.clone();
        let rng = self.rng.clone();
        let chosen = tokio::task::spawn_blocking(move || {
            choose_red_move(&selector, &rng, &state, difficulty)
        })
        .await
        .map_err(|e| format!("AI search task failed: {}", e))?;

        let mut current = self.current.lock();
        if self.generation.load(Ordering::Acquire) != generation
            || current.phase != Phase::RedToMove
        {
            info!("AI turn cancelled after search");
            return Ok(AiTurn::Cancelled);
        }

        let destination = match chosen {
            Some(destination) => destination,
            None => {
                current.phase = Phase::Over { winner: Player::Blue };
                info!("GAME OVER: red has no move, blue wins");
                return Ok(AiTurn::Forfeited);
            }
        };

        if !current.state.try_move(Player::Red, destination) {
            return Err(format!("AI chose illegal move {}", destination));
        }

        current.turn += 1;
        info!(
            "Turn {}: red -> {} ({}, {}ms)",
            current.turn,
            destination,
            difficulty,
            start_time.elapsed().as_millis()
        );
        self.logger.log_move(
            current.turn,
            Player::Red,
            destination,
            current.state.rows(),
        );

        if current.state.is_game_over(Player::Blue) {
            current.phase = Phase::Over { winner: Player::Red };
            info!("GAME OVER: red wins after {} turns", current.turn);
            return Ok(AiTurn::Moved {
                destination,
                winner: Some(Player::Red),
            });
        }

        current.phase = Phase::BlueToMove;
        Ok(AiTurn::Moved {
            destination,
            winner: None,
        })
    }
}

/// Runs the selector, holding the RNG lock only for the random tier
fn choose_red_move(
    selector: &MoveSelector,
    rng: &Mutex<StdRng>,
    state: &GameState,
    difficulty: Difficulty,
) -> Option<Coord> {
    match SearchTier::for_difficulty(difficulty) {
        Some(tier) => selector.choose_searched(state, tier),
        None => selector.choose_random(state, &mut *rng.lock()),
    }
}
