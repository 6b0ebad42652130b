//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/orgtree/orgtree.toml`
//! 3. Explicit config file passed by the caller
//! 4. Environment variables: `ORGTREE_*` prefix, `__` between nested keys

use std::path::{Path, PathBuf};

use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::HistoryPolicy;
use crate::errors::{OrgTreeError, OrgTreeResult};

/// Unified configuration for orgtree.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Undo/redo behaviour of moves
    pub history: HistoryPolicy,
}

/// Get the XDG config directory for orgtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "orgtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("orgtree.toml"))
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional config file; must exist when given
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/orgtree/orgtree.toml`, if present
    /// 3. `config_file`
    /// 4. Environment variables, e.g. `ORGTREE_HISTORY__CLEAR_REDO_ON_MOVE=false`
    #[instrument(level = "debug")]
    pub fn load(config_file: Option<&Path>) -> OrgTreeResult<Self> {
        let mut builder = Self::defaults_builder()?;

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("using global config {}", global_path.display());
                builder = builder.add_source(File::from(global_path).required(false));
            }
        }

        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("ORGTREE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        Self::finish(builder)
    }

    /// Load defaults overlaid with a single config file.
    ///
    /// Ignores the global config and environment variables.
    #[instrument(level = "debug")]
    pub fn from_file(config_file: &Path) -> OrgTreeResult<Self> {
        let builder = Self::defaults_builder()?
            .add_source(File::from(config_file).required(true));
        Self::finish(builder)
    }

    fn defaults_builder() -> OrgTreeResult<ConfigBuilder<DefaultState>> {
        let defaults = HistoryPolicy::default();
        Config::builder()
            .set_default(
                "history.allow_redundant_moves",
                defaults.allow_redundant_moves,
            )
            .map_err(config_err)?
            .set_default("history.clear_redo_on_move", defaults.clear_redo_on_move)
            .map_err(config_err)
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> OrgTreeResult<Self> {
        let config = builder.build().map_err(config_err)?;
        config.try_deserialize().map_err(config_err)
    }
}

fn config_err(e: ConfigError) -> OrgTreeError {
    OrgTreeError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert!(settings.history.allow_redundant_moves);
        assert!(settings.history.clear_redo_on_move);
    }

    #[test]
    fn test_global_config_path_ends_with_file_name() {
        if let Some(path) = global_config_path() {
            assert!(path.ends_with("orgtree.toml"));
        }
    }
}
