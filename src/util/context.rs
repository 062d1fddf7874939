//! Global context for redbuild operations.
//!
//! Provides centralized access to the working directory, the user's home
//! directory (used for `~` expansion in dependency paths) and the
//! configuration files.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::BaseDirs;

use crate::util::config::{load_config, project_config_path, Config};

/// Directory under the user's home holding the global configuration.
pub const REDBUILD_DIR: &str = ".redbuild";

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory (the project root)
    cwd: PathBuf,

    /// The user's home directory
    user_home: PathBuf,

    /// Global redbuild data (~/.redbuild/)
    home: PathBuf,
}

impl GlobalContext {
    /// Create a new GlobalContext for the current directory.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        Ok(GlobalContext::from_parts(cwd, user_home()))
    }

    /// Create a GlobalContext from explicit directories.
    pub fn from_parts(cwd: PathBuf, user_home: PathBuf) -> Self {
        let home = user_home.join(REDBUILD_DIR);
        GlobalContext {
            cwd,
            user_home,
            home,
        }
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get the user's home directory.
    pub fn user_home(&self) -> &Path {
        &self.user_home
    }

    /// Get the redbuild home directory (~/.redbuild/).
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Get the global configuration file path.
    pub fn config_path(&self) -> PathBuf {
        self.home.join("config.toml")
    }

    /// Get the project configuration file path.
    pub fn project_config_path(&self) -> PathBuf {
        project_config_path(&self.cwd)
    }

    /// Load the merged global and project configuration.
    pub fn load_config(&self) -> Config {
        load_config(&self.config_path(), &self.project_config_path())
    }
}

fn user_home() -> PathBuf {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .or_else(|| std::env::var_os("HOME").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."))
}
