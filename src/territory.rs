// Territory analysis: how much room a player still has to live in

use std::collections::VecDeque;

use crate::board::GameState;
use crate::types::{Direction, Player, BOARD_SIZE};

/// Counts the cells reachable from the player's head by orthogonal steps
/// through empty cells. The head itself is counted, so the result is at
/// least 1 and equals 1 when the head is fully enclosed.
pub fn reachable_count(state: &GameState, player: Player) -> usize {
    let board = state.board();
    let head = state.head(player);

    let mut visited = [[false; BOARD_SIZE]; BOARD_SIZE];
    let mut queue = VecDeque::with_capacity(BOARD_SIZE * BOARD_SIZE);
    visited[head.row as usize][head.col as usize] = true;
    queue.push_back(head);

    let mut count = 0;
    while let Some(current) = queue.pop_front() {
        count += 1;

        for dir in Direction::all() {
            let next = dir.apply(&current);
            if board.is_empty(next) && !visited[next.row as usize][next.col as usize] {
                visited[next.row as usize][next.col as usize] = true;
                queue.push_back(next);
            }
        }
    }

    count
}
