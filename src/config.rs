//! Configuration loading and management
//!
//! Handles parsing of `.chime.toml` configuration files. Configuration only
//! shapes how a board session starts and renders; task data itself never
//! touches the disk.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::countdown::DEFAULT_CRITICAL_THRESHOLD;
use crate::role::Role;

pub const CONFIG_FILE: &str = ".chime.toml";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Role the board starts in when no `--role` flag is given
    #[serde(default)]
    pub default_role: Role,

    /// Board presentation
    #[serde(default)]
    pub board: BoardConfig,

    /// Countdown warning behavior
    #[serde(default)]
    pub alerts: AlertsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_role: Role::default(),
            board: BoardConfig::default(),
            alerts: AlertsConfig::default(),
        }
    }
}

/// Board presentation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Keep completed tasks visible on the board
    #[serde(default = "default_show_completed")]
    pub show_completed: bool,
}

fn default_show_completed() -> bool {
    true
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            show_completed: default_show_completed(),
        }
    }
}

/// Countdown warning configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertsConfig {
    /// Fraction of the total duration at or below which a countdown turns
    /// critical
    #[serde(default = "default_critical_threshold")]
    pub critical_threshold: f64,
}

fn default_critical_threshold() -> f64 {
    DEFAULT_CRITICAL_THRESHOLD
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            critical_threshold: default_critical_threshold(),
        }
    }
}

impl Config {
    /// Load configuration from a `.chime.toml` file
    pub fn load(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the working directory, falling back to the
    /// user config dir, then defaults
    pub fn discover(cwd: &Path) -> Self {
        let local = cwd.join(CONFIG_FILE);
        if local.exists() {
            return Self::load(&local).unwrap_or_default();
        }
        if let Some(user) = user_config_path() {
            if user.exists() {
                return Self::load(&user).unwrap_or_default();
            }
        }
        Self::default()
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> crate::error::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|err| crate::error::Error::InvalidConfig(err.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> crate::error::Result<()> {
        let threshold = self.alerts.critical_threshold;
        if !threshold.is_finite() || threshold <= 0.0 || threshold >= 1.0 {
            return Err(crate::error::Error::InvalidConfig(format!(
                "alerts.critical_threshold must be between 0 and 1, got {threshold}"
            )));
        }
        Ok(())
    }
}

fn user_config_path() -> Option<PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", "chime")?;
    Some(dirs.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn defaults_are_expected() {
        let cfg = Config::default();
        assert_eq!(cfg.default_role, Role::Child);
        assert!(cfg.board.show_completed);
        assert_eq!(cfg.alerts.critical_threshold, 0.10);
        cfg.validate().expect("defaults valid");
    }

    #[test]
    fn load_parses_overrides() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE);
        let content = r#"
default_role = "parent"

[board]
show_completed = false

[alerts]
critical_threshold = 0.25
"#;
        fs::write(&path, content.trim()).expect("write config");

        let cfg = Config::load(&path).expect("load config");
        assert_eq!(cfg.default_role, Role::Parent);
        assert!(!cfg.board.show_completed);
        assert_eq!(cfg.alerts.critical_threshold, 0.25);
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "default_role = \"parent\"").expect("write config");

        let cfg = Config::load(&path).expect("load config");
        assert_eq!(cfg.default_role, Role::Parent);
        assert!(cfg.board.show_completed);
        assert_eq!(cfg.alerts.critical_threshold, 0.10);
    }

    #[test]
    fn out_of_range_threshold_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE);
        for bad in ["0.0", "1.0", "-0.5", "2.5"] {
            fs::write(&path, format!("[alerts]\ncritical_threshold = {bad}"))
                .expect("write config");
            let err = Config::load(&path).expect_err("invalid config");
            assert!(matches!(err, crate::error::Error::InvalidConfig(_)));
        }
    }

    #[test]
    fn unknown_role_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "default_role = \"grandparent\"").expect("write config");

        let err = Config::load(&path).expect_err("invalid config");
        assert!(matches!(err, crate::error::Error::TomlParse(_)));
    }

    #[test]
    fn discover_defaults_when_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = Config::discover(dir.path());
        assert_eq!(cfg.default_role, Role::Child);
    }

    #[test]
    fn discover_reads_local_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join(CONFIG_FILE), "default_role = \"parent\"")
            .expect("write config");

        let cfg = Config::discover(dir.path());
        assert_eq!(cfg.default_role, Role::Parent);
    }

    #[test]
    fn save_writes_toml() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.toml");
        let cfg = Config::default();
        cfg.save(&path).expect("save config");

        let written = fs::read_to_string(&path).expect("read config");
        assert!(written.contains("default_role = \"child\""));
    }
}
