// Configuration module for reading Duel.toml
// Board size, start cells and evaluation weights are compile-time constants;
// only the AI search budget, pacing and debug tracing are configurable.

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    pub ai: AiConfig,
    pub timing: TimingConfig,
    pub debug: DebugConfig,
}

/// Move selection parameters
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AiConfig {
    /// Minimax depth searched below each candidate on medium
    pub medium_depth: u8,
    /// Alpha-beta depth searched below each candidate on hard
    pub hard_depth: u8,
    /// Evaluate root candidates on the rayon pool
    pub parallel_root: bool,
    /// Seed for the easy-tier random source; entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Turn pacing
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TimingConfig {
    /// Pause between an accepted human move and the AI reply
    pub ai_delay_ms: u64,
}

/// Debug configuration
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Duel.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        Self::from_toml_str(&contents)
    }

    /// Parses configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, String> {
        toml::from_str(contents).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Loads default configuration from Duel.toml in the working directory
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Duel.toml")
    }

    /// Hardcoded defaults, matching the shipped Duel.toml
    pub fn default_hardcoded() -> Self {
        Config {
            ai: AiConfig {
                medium_depth: 5,
                hard_depth: 8,
                parallel_root: false,
                seed: None,
            },
            timing: TimingConfig { ai_delay_ms: 500 },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "trail_duel_debug.jsonl".to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            eprintln!("Warning: Could not load Duel.toml ({}), using hardcoded defaults", e);
            Self::default_hardcoded()
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_hardcoded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duel_toml_can_be_parsed() {
        let result = Config::from_file("Duel.toml");
        assert!(result.is_ok(), "Failed to parse Duel.toml: {:?}", result.err());
    }

    #[test]
    fn test_duel_toml_matches_hardcoded_defaults() {
        let file_config = Config::from_file("Duel.toml").expect("Duel.toml should be parseable");
        assert_eq!(file_config, Config::default_hardcoded());
    }

    #[test]
    fn test_default_depths() {
        let config = Config::default_hardcoded();
        assert_eq!(config.ai.medium_depth, 5);
        assert_eq!(config.ai.hard_depth, 8);
        assert_eq!(config.timing.ai_delay_ms, 500);
    }

    #[test]
    fn test_seed_is_optional() {
        let config = Config::from_toml_str(
            r#"
            [ai]
            medium_depth = 3
            hard_depth = 4
            parallel_root = true
            seed = 42

            [timing]
            ai_delay_ms = 0

            [debug]
            enabled = false
            log_file_path = "x.jsonl"
            "#,
        )
        .unwrap();
        assert_eq!(config.ai.seed, Some(42));
        assert!(config.ai.parallel_root);
    }

    #[test]
    fn test_missing_section_is_an_error() {
        let result = Config::from_toml_str("[ai]\nmedium_depth = 5\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_path_returns_error() {
        let result = Config::from_file("nonexistent.toml");
        assert!(result.is_err());
    }
}
