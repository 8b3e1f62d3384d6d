//! Client configuration from the environment.
use std::env;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// Settings the binary needs before any level is loaded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub levels_dir: PathBuf,
    /// Optional TOML file overriding [`game_core::GameConfig`] defaults.
    pub config_path: Option<PathBuf>,
    pub seed: Option<u64>,
    pub log_dir: Option<PathBuf>,
    /// Write defeated enemies back to the level file.
    pub persist_roster: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            levels_dir: PathBuf::from("levels"),
            config_path: None,
            seed: None,
            log_dir: None,
            persist_roster: false,
        }
    }
}

impl ClientConfig {
    /// Construct client configuration from environment variables.
    ///
    /// Environment variables:
    /// - `QQUEST_LEVELS_DIR` - Directory scanned for levels (default: `levels`)
    /// - `QQUEST_CONFIG` - Game configuration TOML file
    /// - `QQUEST_SEED` - Dice seed (default: derived from the clock)
    /// - `QQUEST_LOG_DIR` - Log directory (default: platform cache dir)
    /// - `QQUEST_PERSIST_ROSTER` - `1`/`true` to save defeated enemies
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(dir) = lookup("QQUEST_LEVELS_DIR") {
            config.levels_dir = PathBuf::from(dir);
        }
        config.config_path = lookup("QQUEST_CONFIG").map(PathBuf::from);
        config.seed = read_value(&lookup, "QQUEST_SEED");
        config.log_dir = lookup("QQUEST_LOG_DIR").map(PathBuf::from);
        config.persist_roster = lookup("QQUEST_PERSIST_ROSTER")
            .is_some_and(|value| matches!(value.trim(), "1" | "true" | "TRUE" | "yes"));

        config
    }
}

fn read_value<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    lookup(key)?.trim().parse().ok()
}

/// Seed used when `QQUEST_SEED` is unset.
pub fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> ClientConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        ClientConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_uses_defaults() {
        assert_eq!(config_from(&[]), ClientConfig::default());
    }

    #[test]
    fn reads_every_variable() {
        let config = config_from(&[
            ("QQUEST_LEVELS_DIR", "/srv/levels"),
            ("QQUEST_CONFIG", "game.toml"),
            ("QQUEST_SEED", " 42 "),
            ("QQUEST_PERSIST_ROSTER", "1"),
        ]);
        assert_eq!(config.levels_dir, PathBuf::from("/srv/levels"));
        assert_eq!(config.config_path, Some(PathBuf::from("game.toml")));
        assert_eq!(config.seed, Some(42));
        assert!(config.persist_roster);
    }

    #[test]
    fn unparsable_seed_is_ignored() {
        assert_eq!(config_from(&[("QQUEST_SEED", "forty")]).seed, None);
    }
}
