//! Command implementations for formctl CLI

pub mod forms;
pub mod serve;

pub use forms::run_forms;
pub use serve::run_serve;

use anyhow::{Context, Result};
use formctl_core::FormctlConfig;

/// Load `~/.formctl/config.toml`, or an empty config if there is none.
pub(crate) fn load_config() -> Result<FormctlConfig> {
    FormctlConfig::load().context("Failed to load ~/.formctl/config.toml")
}

/// Database URL from the flag/env value, else the config file, else the default.
pub(crate) fn resolve_database_url(
    flag: Option<String>,
    config: &FormctlConfig,
) -> String {
    flag.unwrap_or_else(|| config.database_url().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_beats_config_file() {
        let config = FormctlConfig {
            database_url: Some("sqlite://from-file.db".into()),
            ..Default::default()
        };
        assert_eq!(
            resolve_database_url(Some("sqlite://flag.db".into()), &config),
            "sqlite://flag.db"
        );
        assert_eq!(resolve_database_url(None, &config), "sqlite://from-file.db");
    }

    #[test]
    fn falls_back_to_default_url() {
        assert_eq!(
            resolve_database_url(None, &FormctlConfig::default()),
            formctl_core::config::DEFAULT_DATABASE_URL
        );
    }
}
