//! Viewer configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ViewerError};
use crate::mode::{ModePolicy, ViewModeRegistry};

/// Settings that shape viewer sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Auto-advance period in milliseconds.
    pub tick_period_ms: u64,

    /// Mode used when the caller does not ask for one.
    pub default_mode: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            tick_period_ms: 2_000,
            default_mode: "single-view".to_string(),
        }
    }
}

impl ViewerConfig {
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }

    /// Policy for `default_mode`.
    pub fn default_policy(&self) -> ModePolicy {
        ViewModeRegistry::resolve(&self.default_mode)
    }

    pub fn validate(&self) -> Result<()> {
        if self.tick_period_ms == 0 {
            return Err(ViewerError::InvalidConfig(
                "tick_period_ms must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// Load from `path`; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no viewer config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(ViewerError::ConfigIo {
                    operation: "read",
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };
        let config: Self = toml::from_str(&content).map_err(|e| ViewerError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the platform config directory.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Write to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let io_err = |source| ViewerError::ConfigIo {
            operation: "write",
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| ViewerError::InvalidConfig(format!("failed to serialize config: {e}")))?;
        std::fs::write(path, content).map_err(io_err)
    }

    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("io", "ComicViewer", "comic-viewer")
            .map(|dirs| dirs.config_dir().join("viewer.toml"))
            .unwrap_or_else(|| PathBuf::from("viewer.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::ViewMode;

    #[test]
    fn defaults() {
        let config = ViewerConfig::default();
        assert_eq!(config.tick_period(), Duration::from_millis(2_000));
        assert_eq!(config.default_policy().mode, ViewMode::SingleView);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ViewerConfig::load_from(&dir.path().join("viewer.toml")).unwrap();
        assert_eq!(config, ViewerConfig::default());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("viewer.toml");
        std::fs::write(&path, "default_mode = \"stall\"\n").unwrap();
        let config = ViewerConfig::load_from(&path).unwrap();
        assert_eq!(config.tick_period_ms, 2_000);
        assert_eq!(config.default_policy().mode, ViewMode::Paged);
    }

    #[test]
    fn zero_period_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("viewer.toml");
        std::fs::write(&path, "tick_period_ms = 0\n").unwrap();
        assert!(matches!(
            ViewerConfig::load_from(&path),
            Err(ViewerError::InvalidConfig(_))
        ));
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("viewer.toml");
        std::fs::write(&path, "tick_period_ms = \"fast\"\n").unwrap();
        assert!(matches!(
            ViewerConfig::load_from(&path),
            Err(ViewerError::ConfigParse { .. })
        ));
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("viewer.toml");
        let config = ViewerConfig {
            tick_period_ms: 750,
            default_mode: "auto-play".into(),
        };
        config.save_to(&path).unwrap();
        assert_eq!(ViewerConfig::load_from(&path).unwrap(), config);
    }
}
