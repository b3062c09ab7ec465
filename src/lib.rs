// Library exports for the trail duel engine
// The terminal binary and the integration tests drive the game through these modules.

pub mod board;
pub mod config;
pub mod debug_logger;
pub mod duel;
pub mod eval;
pub mod search;
pub mod selector;
pub mod territory;
pub mod types;
