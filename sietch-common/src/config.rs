//! Configuration loading and config file resolution
//!
//! Every tool reads a small JSON file (`config.dat`) holding the inventory
//! service base URL and the credential object posted at login:
//!
//! ```json
//! { "url": "https://inventory.example.org", "auth": { "user": "qc", "key": "..." } }
//! ```
//!
//! Optional keys: `componentTypes` (`{"batch": ..., "board": ...}`) and
//! `timeoutSeconds`.

use crate::{Error, Result};
use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default config file name, looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "config.dat";

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "SIETCH_CONFIG";

/// Component type holding batch records
pub const DEFAULT_BATCH_COMPONENT: &str = "UK Batch";

/// Component type holding board records
pub const DEFAULT_BOARD_COMPONENT: &str = "UK Board";

const DEFAULT_TIMEOUT_SECONDS: u64 = 60;

/// Connection settings for the inventory service
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    /// Service base URL (records are linked as `<url>/<record id>`)
    pub url: String,
    /// Credential object posted verbatim to `/machineAuthenticate`
    pub auth: Value,
    #[serde(default)]
    pub component_types: ComponentTypes,
    /// Per-request timeout
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

/// Collection names used in search and create calls
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ComponentTypes {
    pub batch: String,
    pub board: String,
}

impl Default for ComponentTypes {
    fn default() -> Self {
        Self {
            batch: DEFAULT_BATCH_COMPONENT.to_string(),
            board: DEFAULT_BOARD_COMPONENT.to_string(),
        }
    }
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

impl ClientConfig {
    /// Read and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        debug!("Loaded config file: {}", path.display());
        Self::from_json_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Parse and validate config JSON
    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: ClientConfig = serde_json::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid config JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        self.base_url()?;
        if self.auth.is_null() {
            return Err(Error::Config("'auth' must not be null".to_string()));
        }
        if self.component_types.batch.trim().is_empty()
            || self.component_types.board.trim().is_empty()
        {
            return Err(Error::Config(
                "component type names must not be empty".to_string(),
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(Error::Config(
                "'timeoutSeconds' must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Parsed base URL
    pub fn base_url(&self) -> Result<Url> {
        let url = Url::parse(&self.url)
            .map_err(|e| Error::Config(format!("Invalid service url '{}': {}", self.url, e)))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(Error::Config(format!(
                "Unsupported url scheme '{}' in '{}'",
                other, self.url
            ))),
        }
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_seconds)
    }
}

/// Config file resolution in priority order:
/// 1. Command-line argument (highest priority)
/// 2. `SIETCH_CONFIG` environment variable
/// 3. `config.dat` in the working directory
/// 4. `<user config dir>/sietch/config.dat` (fallback)
pub fn resolve_config_path(cli_arg: Option<&Path>) -> Result<PathBuf> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return Ok(path.to_path_buf());
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.is_empty() {
            return Ok(PathBuf::from(path));
        }
    }

    // Priority 3: Working directory
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return Ok(local);
    }

    // Priority 4: Per-user config directory
    if let Some(user_config) = user_config_path() {
        if user_config.exists() {
            return Ok(user_config);
        }
    }

    Err(Error::Config(format!(
        "No {} found (pass --config or set {})",
        CONFIG_FILE_NAME, CONFIG_ENV_VAR
    )))
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("sietch").join(CONFIG_FILE_NAME))
}

/// Resolve and load in one step
pub fn load_config(cli_arg: Option<&Path>) -> Result<ClientConfig> {
    let path = resolve_config_path(cli_arg)?;
    ClientConfig::load(&path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config =
            ClientConfig::from_json_str(r#"{"url": "http://localhost:8080", "auth": {"user": "qc"}}"#)
                .unwrap();

        assert_eq!(config.url, "http://localhost:8080");
        assert_eq!(config.auth, json!({"user": "qc"}));
        assert_eq!(config.component_types, ComponentTypes::default());
        assert_eq!(config.timeout_seconds, 60);
    }

    #[test]
    fn test_component_types_partial_override() {
        let config = ClientConfig::from_json_str(
            r#"{"url": "http://x", "auth": {}, "componentTypes": {"board": "Test Board"}}"#,
        )
        .unwrap();

        assert_eq!(config.component_types.batch, "UK Batch");
        assert_eq!(config.component_types.board, "Test Board");
    }

    #[test]
    fn test_missing_auth_rejected() {
        let err = ClientConfig::from_json_str(r#"{"url": "http://x"}"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_null_auth_rejected() {
        let err = ClientConfig::from_json_str(r#"{"url": "http://x", "auth": null}"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_bad_url_rejected() {
        let err = ClientConfig::from_json_str(r#"{"url": "not a url", "auth": {}}"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err =
            ClientConfig::from_json_str(r#"{"url": "ftp://host", "auth": {}}"#).unwrap_err();
        assert!(err.to_string().contains("Unsupported url scheme"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = ClientConfig::from_json_str(
            r#"{"url": "http://x", "auth": {}, "timeoutSeconds": 0}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("timeoutSeconds"));

        let config = ClientConfig::from_json_str(
            r#"{"url": "http://x", "auth": {}, "timeoutSeconds": 5}"#,
        )
        .unwrap();
        assert_eq!(config.timeout(), std::time::Duration::from_secs(5));
    }
}
