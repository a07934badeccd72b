use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::deck::Symbol;

const CONFIG_FILE_NAME: &str = "config.json";
const CONFIG_PATH_ENV: &str = "PAIRS_CONFIG";

const DEFAULT_SYMBOLS: [&str; 6] = ["🐶", "🦊", "🐼", "🐸", "🦄", "🐙"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("the symbol set is empty")]
    EmptySymbols,
    #[error("symbol {0} appears more than once")]
    DuplicateSymbol(String),
    #[error("the board needs at least one column")]
    ZeroColumns,
    #[error("the countdown needs at least one second")]
    ZeroSeconds,
}

/// Waits of the reveal, shuffle and hide sequence played before each game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntroTimings {
    pub start_delay_ms: u64,
    pub reveal_delay_ms: u64,
    pub shuffle_lead_ms: u64,
    pub shuffle_interval_ms: u64,
    pub shuffle_count: u32,
    pub memorize_ms: u64,
}

impl Default for IntroTimings {
    fn default() -> Self {
        IntroTimings {
            start_delay_ms: 1000,
            reveal_delay_ms: 400,
            shuffle_lead_ms: 400,
            shuffle_interval_ms: 400,
            shuffle_count: 10,
            memorize_ms: 4000,
        }
    }
}

impl IntroTimings {
    pub fn start_delay(&self) -> Duration {
        Duration::from_millis(self.start_delay_ms)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub seconds: u32,
    pub columns: u32,
    pub symbols: Vec<String>,
    pub settle_delay_ms: u64,
    pub intro: IntroTimings,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            seconds: 59,
            columns: 3,
            symbols: DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect(),
            settle_delay_ms: 500,
            intro: IntroTimings::default(),
        }
    }
}

impl GameConfig {
    pub fn countdown(&self) -> Duration {
        Duration::from_secs(u64::from(self.seconds))
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn symbol_set(&self) -> Vec<Symbol> {
        self.symbols.iter().map(|s| Symbol::new(s.as_str())).collect()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.symbols.is_empty() {
            return Err(ConfigError::EmptySymbols);
        }
        let mut seen = HashSet::with_capacity(self.symbols.len());
        for symbol in &self.symbols {
            if !seen.insert(symbol.as_str()) {
                return Err(ConfigError::DuplicateSymbol(symbol.clone()));
            }
        }
        if self.columns == 0 {
            return Err(ConfigError::ZeroColumns);
        }
        if self.seconds == 0 {
            return Err(ConfigError::ZeroSeconds);
        }
        Ok(())
    }

    /// `$PAIRS_CONFIG`, else `~/.config/pairs/config.json`.
    pub fn default_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV)
            && !path.trim().is_empty()
        {
            return Some(PathBuf::from(path));
        }
        let home = std::env::var("HOME").ok()?;
        Some(
            PathBuf::from(home)
                .join(".config/pairs")
                .join(CONFIG_FILE_NAME),
        )
    }

    pub fn load() -> Result<GameConfig, ConfigError> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(GameConfig::default()),
        }
    }

    /// A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<GameConfig, ConfigError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(GameConfig::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let config: GameConfig =
            serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("pairs-config-{}-{name}", std::process::id()))
    }

    #[test]
    fn defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.symbols.len(), 6);
        assert_eq!(config.countdown(), Duration::from_secs(59));
        assert_eq!(config.settle_delay(), Duration::from_millis(500));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let path = temp_path("partial.json");
        fs::write(&path, r#"{ "seconds": 30, "intro": { "shuffle_count": 2 } }"#).unwrap();
        let config = GameConfig::load_from(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(config.seconds, 30);
        assert_eq!(config.intro.shuffle_count, 2);
        assert_eq!(config.intro.memorize_ms, 4000);
        assert_eq!(config.columns, 3);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = GameConfig::load_from(&temp_path("does-not-exist.json")).unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn malformed_file_is_reported() {
        let path = temp_path("broken.json");
        fs::write(&path, "{ seconds: ").unwrap();
        let err = GameConfig::load_from(&path).unwrap_err();
        fs::remove_file(&path).ok();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn rejects_bad_symbol_sets() {
        let mut config = GameConfig {
            symbols: Vec::new(),
            ..GameConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::EmptySymbols)));

        config.symbols = vec!["A".into(), "B".into(), "A".into()];
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DuplicateSymbol(s)) if s == "A"
        ));
    }

    #[test]
    fn rejects_zero_columns_and_seconds() {
        let config = GameConfig {
            columns: 0,
            ..GameConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroColumns)));

        let config = GameConfig {
            seconds: 0,
            ..GameConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroSeconds)));
    }
}
