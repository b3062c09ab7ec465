// Debug logging module for asynchronous move tracing
//
// Fire-and-forget: each confirmed move is written as one JSON line on a
// tokio task so the turn itself never waits on disk.

use log::{error, warn};
use serde::Serialize;
use std::sync::Arc;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::runtime::Handle;
use tokio::sync::Mutex;

use crate::types::{Coord, Player};

/// Represents a single debug log entry
#[derive(Debug, Serialize)]
struct DebugLogEntry {
    turn: u32,
    player: Player,
    destination: Coord,
    board: Vec<String>,
    timestamp: String,
}

/// Shared debug logger state
/// Uses Arc<Mutex<File>> to allow concurrent async writes from multiple tasks
#[derive(Clone)]
pub struct DebugLogger {
    file: Arc<Mutex<Option<File>>>,
    enabled: bool,
}

impl DebugLogger {
    /// Creates a new debug logger
    /// If enabled is true, initializes the log file (truncating if it exists)
    pub async fn new(enabled: bool, log_file_path: &str) -> Self {
        if !enabled {
            return Self::disabled();
        }

        match OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_file_path)
            .await
        {
            Ok(file) => {
                log::info!("Debug logging enabled: {}", log_file_path);
                DebugLogger {
                    file: Arc::new(Mutex::new(Some(file))),
                    enabled: true,
                }
            }
            Err(e) => {
                error!("Failed to create debug log file '{}': {}", log_file_path, e);
                Self::disabled()
            }
        }
    }

    /// Creates a disabled debug logger (no-op)
    pub fn disabled() -> Self {
        DebugLogger {
            file: Arc::new(Mutex::new(None)),
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Logs a confirmed move asynchronously (fire-and-forget)
    pub fn log_move(&self, turn: u32, player: Player, destination: Coord, board: Vec<String>) {
        if !self.enabled {
            return;
        }

        let handle = match Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                warn!("Debug log entry for turn {} dropped: no tokio runtime", turn);
                return;
            }
        };

        let file_handle = self.file.clone();
        let entry = DebugLogEntry {
            turn,
            player,
            destination,
            board,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        handle.spawn(async move {
            Self::log_move_internal(file_handle, entry).await;
        });
    }

    /// Internal async function that performs the actual file write
    async fn log_move_internal(file_handle: Arc<Mutex<Option<File>>>, entry: DebugLogEntry) {
        let mut file_guard = file_handle.lock().await;

        if let Some(file) = file_guard.as_mut() {
            match serde_json::to_string(&entry) {
                Ok(json_line) => {
                    let line_with_newline = format!("{}\n", json_line);
                    if let Err(e) = file.write_all(line_with_newline.as_bytes()).await {
                        error!("Failed to write debug log entry: {}", e);
                    } else if let Err(e) = file.flush().await {
                        error!("Failed to flush debug log: {}", e);
                    }
                }
                Err(e) => {
                    error!("Failed to serialize debug log entry: {}", e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::GameState;

    #[tokio::test]
    async fn test_disabled_logger_is_a_no_op() {
        let logger = DebugLogger::new(false, "unused.jsonl").await;
        assert!(!logger.is_enabled());
        logger.log_move(1, Player::Blue, Coord::new(0, 1), GameState::new().rows());
    }

    #[tokio::test]
    async fn test_enabled_logger_writes_json_lines() {
        let path = std::env::temp_dir().join(format!(
            "trail_duel_debug_test_{}.jsonl",
            std::process::id()
        ));
        let path_str = path.to_string_lossy().to_string();

        let logger = DebugLogger::new(true, &path_str).await;
        assert!(logger.is_enabled());

        // Write directly to avoid racing the spawned task
        let entry = DebugLogEntry {
            turn: 3,
            player: Player::Red,
            destination: Coord::new(4, 3),
            board: GameState::new().rows(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };
        DebugLogger::log_move_internal(logger.file.clone(), entry).await;

        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        let line: serde_json::Value = serde_json::from_str(contents.trim()).unwrap();
        assert_eq!(line["turn"], 3);
        assert_eq!(line["player"], "red");
        assert_eq!(line["destination"]["row"], 4);
        assert_eq!(line["board"][1], ".B...");

        let _ = tokio::fs::remove_file(&path).await;
    }
}
