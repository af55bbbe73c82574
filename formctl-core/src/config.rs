//! File configuration: `~/.formctl/config.toml`
//!
//! Every key is optional. Command-line flags and environment variables
//! override whatever is found here.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FormError, Result};

/// Database used when nothing else is configured
pub const DEFAULT_DATABASE_URL: &str = "sqlite://formctl.db";

/// Bind address used when nothing else is configured
pub const DEFAULT_BIND: &str = "127.0.0.1:5080";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormctlConfig {
    pub database_url: Option<String>,
    pub bind: Option<String>,
    pub cors_permissive: Option<bool>,
}

impl FormctlConfig {
    /// Load from the default location, falling back to an empty config when
    /// the file does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load from an explicit path. A missing file is not an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| FormError::io(path, e))?;
        toml::from_str(&content).map_err(|e| {
            FormError::config(format!("invalid TOML in {}: {}", path.display(), e))
        })
    }

    /// Config directory: ~/.formctl
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".formctl")
    }

    /// Config file path: ~/.formctl/config.toml
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    pub fn database_url(&self) -> &str {
        self.database_url.as_deref().unwrap_or(DEFAULT_DATABASE_URL)
    }

    pub fn bind(&self) -> &str {
        self.bind.as_deref().unwrap_or(DEFAULT_BIND)
    }

    pub fn cors_permissive(&self) -> bool {
        self.cors_permissive.unwrap_or(false)
    }
}
