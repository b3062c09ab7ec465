// Static evaluation of a position, from Red's point of view

use crate::board::GameState;
use crate::territory::reachable_count;
use crate::types::Player;

/// Score when Blue has no legal move
pub const WIN_SCORE: i32 = 1000;
/// Score when Red has no legal move
pub const LOSS_SCORE: i32 = -1000;
/// Weight of the legal-move difference
pub const MOBILITY_WEIGHT: i32 = 10;
/// Weight of the reachable-territory difference
pub const TERRITORY_WEIGHT: i32 = 5;

/// Terminal score if one side is blocked, Red checked first.
pub fn terminal_score(state: &GameState) -> Option<i32> {
    if state.is_game_over(Player::Red) {
        Some(LOSS_SCORE)
    } else if state.is_game_over(Player::Blue) {
        Some(WIN_SCORE)
    } else {
        None
    }
}

/// Heuristic score: positive favours Red, negative favours Blue.
///
/// Terminal positions score exactly `LOSS_SCORE` / `WIN_SCORE`. Otherwise the
/// score combines the mobility difference and the flood-fill territory
/// difference.
pub fn evaluate(state: &GameState) -> i32 {
    let red_moves = state.mobility(Player::Red) as i32;
    let blue_moves = state.mobility(Player::Blue) as i32;

    if red_moves == 0 {
        return LOSS_SCORE;
    }
    if blue_moves == 0 {
        return WIN_SCORE;
    }

    let mobility_score = (red_moves - blue_moves) * MOBILITY_WEIGHT;

    let red_territory = reachable_count(state, Player::Red) as i32;
    let blue_territory = reachable_count(state, Player::Blue) as i32;
    let territory_score = (red_territory - blue_territory) * TERRITORY_WEIGHT;

    mobility_score + territory_score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Coord;

    fn c(row: i32, col: i32) -> Coord {
        Coord::new(row, col)
    }

    #[test]
    fn test_symmetric_start_is_balanced() {
        assert_eq!(evaluate(&GameState::new()), 0);
        assert_eq!(terminal_score(&GameState::new()), None);
    }

    #[test]
    fn test_blocked_red_loses_even_if_blue_is_blocked() {
        // Red spirals around and seals both heads in the top-left corner
        let state = GameState::from_trails(
            vec![c(0, 0)],
            vec![c(1, 1), c(1, 0), c(2, 0), c(2, 1), c(2, 2), c(1, 2), c(0, 2), c(0, 1)],
        )
        .unwrap();
        assert!(state.is_game_over(Player::Red));
        assert!(state.is_game_over(Player::Blue));
        assert_eq!(evaluate(&state), LOSS_SCORE);
        assert_eq!(terminal_score(&state), Some(LOSS_SCORE));
    }

    #[test]
    fn test_blocked_blue_scores_win() {
        let state =
            GameState::from_trails(vec![c(0, 0)], vec![c(2, 0), c(1, 0), c(1, 1), c(0, 1)])
                .unwrap();
        assert!(state.is_game_over(Player::Blue));
        assert!(!state.is_game_over(Player::Red));
        assert_eq!(evaluate(&state), WIN_SCORE);
        assert_eq!(terminal_score(&state), Some(WIN_SCORE));
    }

    #[test]
    fn test_mobility_and_territory_terms() {
        // Blue walls off column 2 and ends at the bottom edge
        let state = GameState::from_trails(
            vec![c(0, 2), c(1, 2), c(2, 2), c(3, 2), c(4, 2)],
            vec![c(2, 4)],
        )
        .unwrap();

        assert_eq!(state.mobility(Player::Blue), 2);
        assert_eq!(state.mobility(Player::Red), 3);
        assert_eq!(reachable_count(&state, Player::Blue), 20);
        assert_eq!(reachable_count(&state, Player::Red), 10);

        // (3 - 2) * 10 + (10 - 20) * 5
        assert_eq!(evaluate(&state), -40);
    }
}
