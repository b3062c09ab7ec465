// Terminal front end for the trail duel
//
// Usage:
//   cargo run -- [--level easy|medium|hard] [--config <path>]
//
// You play Blue. Enter a destination as `row col` (e.g. `1 2`) or as a
// direction relative to your head (`up`, `down`, `left`, `right`).

use log::{error, info};
use std::env;
use std::process;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use trail_duel::config::Config;
use trail_duel::debug_logger::DebugLogger;
use trail_duel::duel::{AiTurn, Duel, HumanMove};
use trail_duel::types::{Coord, Difficulty, Direction, Player};

fn print_usage() {
    eprintln!("Trail Duel");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("  trail-duel [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("  --level <easy|medium|hard>  AI difficulty (default: easy)");
    eprintln!("  --config <path>             Path to Duel.toml (default: Duel.toml)");
    eprintln!("  --help                      Show this help message");
}

struct Args {
    difficulty: Difficulty,
    config_path: Option<String>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        difficulty: Difficulty::Easy,
        config_path: None,
    };

    let mut iter = env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--level" => {
                let value = iter.next().ok_or("--level requires a value")?;
                args.difficulty = value.parse()?;
            }
            "--config" => {
                args.config_path = Some(iter.next().ok_or("--config requires a path")?);
            }
            "--help" | "-h" => {
                print_usage();
                process::exit(0);
            }
            other => return Err(format!("Unknown argument: {}", other)),
        }
    }

    Ok(args)
}

/// Parses `row col` or a direction word relative to `head`
fn parse_destination(input: &str, head: Coord) -> Result<Coord, String> {
    if let Ok(dir) = input.parse::<Direction>() {
        return Ok(dir.apply(&head));
    }

    let parts: Vec<&str> = input.split_whitespace().collect();
    if parts.len() != 2 {
        return Err(format!("Expected 'row col' or a direction, got '{}'", input));
    }

    let row = parts[0]
        .parse::<i32>()
        .map_err(|e| format!("Invalid row '{}': {}", parts[0], e))?;
    let col = parts[1]
        .parse::<i32>()
        .map_err(|e| format!("Invalid column '{}': {}", parts[1], e))?;

    Ok(Coord::new(row, col))
}

async fn read_line(lines: &mut Lines<BufReader<Stdin>>) -> Option<String> {
    match lines.next_line().await {
        Ok(Some(line)) => Some(line.trim().to_string()),
        Ok(None) => None,
        Err(e) => {
            error!("Failed to read input: {}", e);
            None
        }
    }
}

fn announce(winner: Player) {
    match winner {
        Player::Blue => println!("\nYou Won!\n"),
        Player::Red => println!("\nYou Lost!\n"),
    }
}

/// Plays one game to completion. Returns false if input ran out.
async fn play_game(duel: &Duel, lines: &mut Lines<BufReader<Stdin>>) -> bool {
    loop {
        let state = duel.state();
        println!("{}", state);
        println!("Your move (row col, or up/down/left/right):");

        let input = match read_line(lines).await {
            Some(input) => input,
            None => return false,
        };
        if input.is_empty() {
            continue;
        }

        let destination = match parse_destination(&input, state.head(Player::Blue)) {
            Ok(destination) => destination,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match duel.human_move(destination) {
            HumanMove::Rejected => {
                println!("Illegal move {}", destination);
                continue;
            }
            HumanMove::Accepted { winner: Some(winner) } => {
                println!("{}", duel.state());
                announce(winner);
                return true;
            }
            HumanMove::Accepted { winner: None } => {}
        }

        println!("{}", duel.state());
        println!("Red is thinking...");

        match duel.ai_turn().await {
            Ok(AiTurn::Moved { destination, winner }) => {
                println!("Red moves to {}", destination);
                if let Some(winner) = winner {
                    println!("{}", duel.state());
                    announce(winner);
                    return true;
                }
            }
            Ok(AiTurn::Forfeited) => {
                announce(Player::Blue);
                return true;
            }
            Ok(AiTurn::Cancelled) | Ok(AiTurn::NotRedsTurn) => {}
            Err(e) => {
                error!("{}", e);
                return false;
            }
        }
    }
}

#[tokio::main]
async fn main() {
    // Default to 'info' unless RUST_LOG says otherwise.
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            print_usage();
            process::exit(1);
        }
    };

    let config = match &args.config_path {
        Some(path) => match Config::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        None => Config::load_or_default(),
    };

    let logger = DebugLogger::new(config.debug.enabled, &config.debug.log_file_path).await;
    let duel = Duel::with_logger(config, logger);

    let stdin = tokio::io::stdin();
    let mut lines = BufReader::new(stdin).lines();

    loop {
        duel.start(args.difficulty);
        if !play_game(&duel, &mut lines).await {
            break;
        }

        println!("Play again? (y/n)");
        match read_line(&mut lines).await {
            Some(answer) if answer.eq_ignore_ascii_case("y") => continue,
            _ => break,
        }
    }

    info!("Goodbye");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_destination() {
        let head = Coord::new(1, 1);
        assert_eq!(parse_destination("up", head).unwrap(), Coord::new(0, 1));
        assert_eq!(parse_destination("Right", head).unwrap(), Coord::new(1, 2));
        assert_eq!(parse_destination("2 1", head).unwrap(), Coord::new(2, 1));
        assert_eq!(parse_destination(" 0   4 ", head).unwrap(), Coord::new(0, 4));
        assert!(parse_destination("2", head).is_err());
        assert!(parse_destination("a b", head).is_err());
    }
}
