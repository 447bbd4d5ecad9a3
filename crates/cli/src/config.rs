//! Inspector configuration loaded from environment variables.

use std::path::PathBuf;

use common::StorageKey;

/// Inspector configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `STORAGE_FILE` — JSON document to inspect (default: built-in demo data)
/// - `INSPECT_KEYS` — comma-separated keys shown as single-value rows (default: none)
/// - `COPY_KEY` — key whose row is copied to the clipboard after loading (default: none)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub storage_file: Option<PathBuf>,
    pub inspect_keys: Vec<StorageKey>,
    pub copy_key: Option<StorageKey>,
    pub log_level: String,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        Self {
            storage_file: non_empty("STORAGE_FILE").map(PathBuf::from),
            inspect_keys: non_empty("INSPECT_KEYS")
                .map(|keys| parse_keys(&keys))
                .unwrap_or_default(),
            copy_key: non_empty("COPY_KEY").map(|k| StorageKey::new(k.trim())),
            log_level: non_empty("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_file: None,
            inspect_keys: Vec::new(),
            copy_key: None,
            log_level: "info".to_string(),
        }
    }
}

fn parse_keys(raw: &str) -> Vec<StorageKey> {
    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(StorageKey::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_in(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert!(config.storage_file.is_none());
        assert!(config.inspect_keys.is_empty());
        assert!(config.copy_key.is_none());
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_empty_environment_matches_default() {
        assert_eq!(Config::from_lookup(lookup_in(&[])), Config::default());
    }

    #[test]
    fn test_reads_all_variables() {
        let config = Config::from_lookup(lookup_in(&[
            ("STORAGE_FILE", "/tmp/storage.json"),
            ("INSPECT_KEYS", "first, second,,third "),
            ("COPY_KEY", " first "),
            ("RUST_LOG", "debug"),
        ]));

        assert_eq!(config.storage_file, Some(PathBuf::from("/tmp/storage.json")));
        assert_eq!(
            config.inspect_keys,
            vec![
                StorageKey::new("first"),
                StorageKey::new("second"),
                StorageKey::new("third")
            ]
        );
        assert_eq!(config.copy_key, Some(StorageKey::new("first")));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let config = Config::from_lookup(lookup_in(&[("STORAGE_FILE", "  "), ("COPY_KEY", "")]));
        assert!(config.storage_file.is_none());
        assert!(config.copy_key.is_none());
    }
}
