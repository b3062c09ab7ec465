//! Match controller tests: turn order, AI replies, game over and cancellation

use trail_duel::config::Config;
use trail_duel::duel::{AiTurn, Duel, HumanMove, Phase};
use trail_duel::types::{Coord, Difficulty, Player};

fn instant_config(seed: u64) -> Config {
    let mut config = Config::default_hardcoded();
    config.timing.ai_delay_ms = 0;
    config.ai.seed = Some(seed);
    config
}

/// Plays Blue's first legal move each turn until the game ends
async fn play_out(duel: &Duel) -> Player {
    loop {
        match duel.phase() {
            Phase::Over { winner } => return winner,
            Phase::BlueToMove => {
                let mv = duel.state().legal_moves(Player::Blue)[0];
                assert_ne!(duel.human_move(mv), HumanMove::Rejected);
            }
            Phase::RedToMove => {
                let turn = duel.ai_turn().await.unwrap();
                assert!(matches!(turn, AiTurn::Moved { .. } | AiTurn::Forfeited));
            }
            Phase::Idle => panic!("game never started"),
        }
    }
}

#[tokio::test]
async fn test_turn_order_is_enforced() {
    let duel = Duel::new(instant_config(1));
    duel.start(Difficulty::Easy);

    assert_eq!(duel.ai_turn().await.unwrap(), AiTurn::NotRedsTurn);

    assert_eq!(
        duel.human_move(Coord::new(1, 2)),
        HumanMove::Accepted { winner: None }
    );
    assert_eq!(duel.phase(), Phase::RedToMove);

    // Blue cannot move twice in a row
    assert_eq!(duel.human_move(Coord::new(1, 3)), HumanMove::Rejected);

    let turn = duel.ai_turn().await.unwrap();
    match turn {
        AiTurn::Moved { destination, winner } => {
            assert_eq!(winner, None);
            assert_eq!(duel.state().head(Player::Red), destination);
        }
        other => panic!("unexpected AI turn {:?}", other),
    }
    assert_eq!(duel.phase(), Phase::BlueToMove);
    assert_eq!(duel.turn(), 2);
}

#[tokio::test]
async fn test_illegal_human_move_leaves_state_unchanged() {
    let duel = Duel::new(instant_config(1));
    duel.start(Difficulty::Easy);
    let before = duel.state();

    assert_eq!(duel.human_move(Coord::new(3, 3)), HumanMove::Rejected);
    assert_eq!(duel.human_move(Coord::new(2, 2)), HumanMove::Rejected);
    assert_eq!(duel.human_move(Coord::new(1, 1)), HumanMove::Rejected);

    assert_eq!(duel.state(), before);
    assert_eq!(duel.phase(), Phase::BlueToMove);
    assert_eq!(duel.turn(), 0);
}

#[tokio::test]
async fn test_games_run_to_completion_on_every_level() {
    for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
        let duel = Duel::new(instant_config(11));
        duel.start(difficulty);
        let winner = play_out(&duel).await;

        let state = duel.state();
        match winner {
            Player::Red => assert!(state.is_game_over(Player::Blue)),
            Player::Blue => assert!(state.is_game_over(Player::Red)),
        }
        assert!(duel.is_game_over(winner.opponent()));
        assert_eq!(duel.human_move(Coord::new(0, 0)), HumanMove::Rejected);
    }
}

#[tokio::test]
async fn test_seeded_easy_games_replay_identically() {
    let first = Duel::new(instant_config(77));
    let second = Duel::new(instant_config(77));
    first.start(Difficulty::Easy);
    second.start(Difficulty::Easy);

    let a = play_out(&first).await;
    let b = play_out(&second).await;
    assert_eq!(a, b);
    assert_eq!(first.state(), second.state());
}

#[tokio::test]
async fn test_new_game_cancels_pending_ai_turn() {
    let mut config = instant_config(3);
    config.timing.ai_delay_ms = 200;
    let duel = Duel::new(config);

    duel.start(Difficulty::Medium);
    duel.human_move(Coord::new(1, 2));

    let (turn, _) = tokio::join!(duel.ai_turn(), async {
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        duel.start(Difficulty::Easy);
    });

    assert_eq!(turn.unwrap(), AiTurn::Cancelled);
    assert_eq!(duel.state().trail(Player::Red).len(), 1);
    assert_eq!(duel.phase(), Phase::BlueToMove);
}

#[tokio::test]
async fn test_cancel_pending_keeps_red_to_move() {
    let mut config = instant_config(3);
    config.timing.ai_delay_ms = 200;
    let duel = Duel::new(config);

    duel.start(Difficulty::Easy);
    duel.human_move(Coord::new(0, 1));

    let (turn, _) = tokio::join!(duel.ai_turn(), async {
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        duel.cancel_pending();
    });
    assert_eq!(turn.unwrap(), AiTurn::Cancelled);
    assert_eq!(duel.phase(), Phase::RedToMove);

    // A fresh request goes through
    assert!(matches!(duel.ai_turn().await.unwrap(), AiTurn::Moved { .. }));
}

#[tokio::test]
async fn test_turn_counter_matches_trail_lengths() {
    let duel = Duel::new(instant_config(5));
    duel.start(Difficulty::Hard);
    let winner = play_out(&duel).await;
    let state = duel.state();

    assert_eq!(
        duel.turn() as usize,
        state.trail(Player::Blue).len() + state.trail(Player::Red).len() - 2
    );
    assert!(state.is_game_over(winner.opponent()));
}
