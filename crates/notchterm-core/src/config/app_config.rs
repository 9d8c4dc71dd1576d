use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

/// User preferences that are not part of the workspace or theme documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Shell executable to spawn; `None` means `$SHELL`, then `/bin/zsh`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_shell: Option<String>,
    /// Whether the first-run hotkey setup flow has been completed.
    pub has_completed_hotkey_setup: bool,
    /// Drop the panel immediately on launch instead of waiting for the hotkey.
    pub show_panel_on_launch: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_shell: None,
            has_completed_hotkey_setup: false,
            show_panel_on_launch: false,
        }
    }
}

impl AppConfig {
    /// Get the config file path.
    pub fn config_path() -> PathBuf {
        super::paths::support_dir().join("config.toml")
    }

    /// Load config from disk, or create and save defaults.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let config: Self = toml::from_str(&content).map_err(|e| {
                CoreError::Config(format!(
                    "Failed to parse config at {}: {}",
                    path.display(),
                    e
                ))
            })?;
            info!("Loaded config from {}", path.display());
            Ok(config)
        } else {
            let config = Self::default();
            config.save()?;
            info!("Created default config at {}", path.display());
            Ok(config)
        }
    }

    /// Save config to disk.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        let dir = super::paths::support_dir();

        if !dir.exists() {
            std::fs::create_dir_all(&dir)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            CoreError::Serialization(format!("Failed to serialize config: {}", e))
        })?;
        std::fs::write(&path, content)?;
        info!("Saved config to {}", path.display());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_round_trips_through_toml() {
        let config = AppConfig::default();
        let content = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&content).unwrap();
        assert_eq!(parsed.default_shell, None);
        assert!(!parsed.has_completed_hotkey_setup);
        assert!(!parsed.show_panel_on_launch);
    }
}
