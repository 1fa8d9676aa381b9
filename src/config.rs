use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::types::SpecialLabels;

pub const DEFAULT_BASE_URL: &str = "https://todoist.com/API/v6/";
pub const TOKEN_ENV_VAR: &str = "TODOIST_TOKEN";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("API token is required. Set it in the config file or the TODOIST_TOKEN env var")]
    MissingToken,
}

/// Client settings, usually loaded from a YAML file
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Label ids that are never written back to the server
    #[serde(default)]
    pub special_labels: Vec<i64>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl ClientConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            base_url: default_base_url(),
            special_labels: Vec::new(),
        }
    }

    /// Parse YAML, falling back to the environment for the token.
    /// Fails with `MissingToken` when neither supplies one.
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        Self::from_yaml_with_env(content, std::env::var(TOKEN_ENV_VAR).ok())
    }

    fn from_yaml_with_env(content: &str, env_token: Option<String>) -> Result<Self, ConfigError> {
        let mut config: ClientConfig = serde_yaml::from_str(content)?;
        config.token = resolve_token(config.token, env_token);
        if config.token.is_none() {
            return Err(ConfigError::MissingToken);
        }
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    pub fn token(&self) -> Result<&str, ConfigError> {
        self.token.as_deref().ok_or(ConfigError::MissingToken)
    }

    pub fn special_labels(&self) -> SpecialLabels {
        SpecialLabels::new(self.special_labels.iter().copied())
    }
}

/// The configured token wins; blank values count as unset.
fn resolve_token(configured: Option<String>, env: Option<String>) -> Option<String> {
    configured
        .filter(|t| !t.trim().is_empty())
        .or_else(|| env.filter(|t| !t.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::from_yaml_str("token: abc\n").unwrap();
        assert_eq!(config.token().unwrap(), "abc");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.special_labels().is_empty());
    }

    #[test]
    fn test_resolve_token_prefers_config() {
        assert_eq!(
            resolve_token(Some("file".into()), Some("env".into())),
            Some("file".to_string())
        );
        assert_eq!(
            resolve_token(Some("  ".into()), Some("env".into())),
            Some("env".to_string())
        );
        assert_eq!(resolve_token(None, Some(String::new())), None);
    }

    #[test]
    fn test_missing_token() {
        let config = ClientConfig {
            token: None,
            base_url: default_base_url(),
            special_labels: vec![],
        };
        assert!(matches!(config.token(), Err(ConfigError::MissingToken)));
    }

    #[test]
    fn test_token_from_env_when_file_has_none() {
        let config =
            ClientConfig::from_yaml_with_env("special_labels: [1]\n", Some("env-token".into()))
                .unwrap();
        assert_eq!(config.token().unwrap(), "env-token");
        assert!(config.special_labels().contains(1));
    }

    #[test]
    fn test_load_without_any_token_fails() {
        let err = ClientConfig::from_yaml_with_env("special_labels: [1]\n", None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingToken));

        let err = ClientConfig::from_yaml_with_env("token: \"\"\n", Some("  ".into())).unwrap_err();
        assert!(matches!(err, ConfigError::MissingToken));
    }

    // Only test in this crate that touches TODOIST_TOKEN.
    #[test]
    fn test_env_fallback_through_from_yaml_str() {
        std::env::set_var(TOKEN_ENV_VAR, "from-env");
        let with_env = ClientConfig::from_yaml_str("special_labels: [1]\n");
        std::env::remove_var(TOKEN_ENV_VAR);
        let without_env = ClientConfig::from_yaml_str("special_labels: [1]\n");

        assert_eq!(with_env.unwrap().token().unwrap(), "from-env");
        assert!(matches!(without_env, Err(ConfigError::MissingToken)));
    }

    #[test]
    fn test_invalid_yaml() {
        let err = ClientConfig::from_yaml_str("special_labels: [1, two").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
