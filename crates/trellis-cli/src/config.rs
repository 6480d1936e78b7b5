//! CLI configuration

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use trellis_core::CyclePolicy;

use crate::output::OutputFormat;

/// Get default config file path
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("trellis")
        .join("config.toml")
}

/// Configuration for the CLI
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output format used when `--format` is not given
    pub format: OutputFormat,
    /// How `order` treats cycles when `--permissive` is not given
    pub cycle_policy: CyclePolicy,
    /// Fail `floyd` on negative cycles
    pub check_negative_cycles: bool,
    /// Time limit for `dijkstra` and `floyd`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_limit_ms: Option<u64>,
}

impl Config {
    /// Load the config file, or defaults when it does not exist
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::debug!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let text = toml::to_string_pretty(self)?;
        std::fs::write(path, text)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    pub fn keys() -> &'static [&'static str] {
        &[
            "format",
            "cycle_policy",
            "check_negative_cycles",
            "time_limit_ms",
        ]
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "format" => Some(self.format.to_string()),
            "cycle_policy" => Some(self.cycle_policy.to_string()),
            "check_negative_cycles" => Some(self.check_negative_cycles.to_string()),
            "time_limit_ms" => Some(
                self.time_limit_ms
                    .map_or_else(|| "(not set)".to_string(), |ms| ms.to_string()),
            ),
            _ => None,
        }
    }

    /// Set a key from its string form; `none` clears `time_limit_ms`
    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "format" => self.format = value.parse()?,
            "cycle_policy" => {
                self.cycle_policy = value.parse().map_err(anyhow::Error::msg)?;
            }
            "check_negative_cycles" => {
                self.check_negative_cycles = value
                    .parse()
                    .with_context(|| format!("Expected 'true' or 'false', found '{}'", value))?;
            }
            "time_limit_ms" => {
                self.time_limit_ms = if value.eq_ignore_ascii_case("none") {
                    None
                } else {
                    Some(value.parse().with_context(|| {
                        format!("Expected milliseconds or 'none', found '{}'", value)
                    })?)
                };
            }
            _ => anyhow::bail!(
                "Unknown config key: {}. Available keys: {}",
                key,
                Self::keys().join(", ")
            ),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.set("format", "json").unwrap();
        config.set("cycle_policy", "permissive").unwrap();
        config.set("time_limit_ms", "250").unwrap();
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.format, OutputFormat::Json);
        assert_eq!(loaded.cycle_policy, CyclePolicy::Permissive);
        assert_eq!(loaded.time_limit_ms, Some(250));
        assert!(!loaded.check_negative_cycles);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "check_negative_cycles = true\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert!(config.check_negative_cycles);
        assert_eq!(config.format, OutputFormat::Table);
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(config.set("format", "xml").is_err());
        assert!(config.set("check_negative_cycles", "yes").is_err());
        assert!(config.set("color", "red").is_err());

        config.set("time_limit_ms", "10").unwrap();
        config.set("time_limit_ms", "none").unwrap();
        assert_eq!(config.time_limit_ms, None);
    }

    #[test]
    fn test_every_key_readable() {
        let config = Config::default();
        for key in Config::keys() {
            assert!(config.get(key).is_some(), "key {}", key);
        }
    }
}
