//! config
//!
//! Service configuration schema and loading.
//!
//! # Overview
//!
//! Configuration is resolved once at process start and passed into the
//! handler explicitly; nothing below the binary reads the process
//! environment. Values are resolved in this order (later overrides earlier):
//!
//! 1. Built-in defaults
//! 2. TOML config file (optional, `--config <path>`)
//! 3. Environment variables (`GITHUB_TOKEN`, `GITHUB_REPO_OWNER`,
//!    `GITHUB_REPO_NAME`)
//!
//! # Secrets
//!
//! The hosting token comes from `GITHUB_TOKEN` only and is never part of
//! the file schema. A missing token is not a startup error: the service
//! boots and reports the fault per request, so a misconfigured deployment
//! is observable rather than crash-looping.
//!
//! # Example
//!
//! ```toml
//! repo_owner = "Windsurf-Samples"
//! repo_name = "cascade-customizations-catalog"
//! branch = "main"
//! listen = "127.0.0.1:8080"
//! ```

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default repository owner (organization).
pub const DEFAULT_REPO_OWNER: &str = "Windsurf-Samples";

/// Default repository name (the catalog).
pub const DEFAULT_REPO_NAME: &str = "cascade-customizations-catalog";

/// Default branch targeted by commits.
pub const DEFAULT_BRANCH: &str = "main";

/// Default listen address.
pub const DEFAULT_LISTEN: &str = "127.0.0.1:8080";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// TOML file schema.
///
/// All fields optional; unset fields fall back to defaults. The token is
/// deliberately absent from this schema.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Repository owner (user or organization)
    pub repo_owner: Option<String>,

    /// Repository name
    pub repo_name: Option<String>,

    /// Branch targeted by commits
    pub branch: Option<String>,

    /// API base URL override (GitHub Enterprise)
    pub api_base: Option<String>,

    /// Listen address, e.g. "127.0.0.1:8080"
    pub listen: Option<String>,
}

/// Fully resolved service configuration.
///
/// Constructed once at startup; handlers receive it by reference and never
/// consult the environment themselves.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Hosting token; `None` is a per-request configuration fault.
    pub github_token: Option<String>,
    /// Repository owner.
    pub repo_owner: String,
    /// Repository name.
    pub repo_name: String,
    /// Branch targeted by commits.
    pub branch: String,
    /// API base URL override (GitHub Enterprise); `None` means api.github.com.
    pub api_base: Option<String>,
    /// Listen address for the HTTP server.
    pub listen: SocketAddr,
}

impl ServiceConfig {
    /// Load configuration from an optional TOML file plus the environment.
    ///
    /// A missing file path means file values are skipped entirely; a path
    /// that exists but cannot be read or parsed is an error.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file is unreadable/unparseable or a
    /// resolved value fails validation.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match config_path {
            Some(path) => Self::load_file(path)?,
            None => ConfigFile::default(),
        };
        Self::resolve(file, EnvOverrides::from_process_env())
    }

    /// Read and parse a TOML config file.
    fn load_file(path: &Path) -> Result<ConfigFile, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Merge file values with env overrides and defaults, then validate.
    ///
    /// Split out from [`load`](Self::load) so tests can supply overrides
    /// without mutating the process environment.
    pub fn resolve(file: ConfigFile, env: EnvOverrides) -> Result<Self, ConfigError> {
        let repo_owner = env
            .repo_owner
            .or(file.repo_owner)
            .unwrap_or_else(|| DEFAULT_REPO_OWNER.to_string());
        let repo_name = env
            .repo_name
            .or(file.repo_name)
            .unwrap_or_else(|| DEFAULT_REPO_NAME.to_string());
        let branch = file.branch.unwrap_or_else(|| DEFAULT_BRANCH.to_string());

        let listen_raw = file.listen.unwrap_or_else(|| DEFAULT_LISTEN.to_string());
        let listen: SocketAddr = listen_raw
            .parse()
            .map_err(|_| ConfigError::InvalidValue(format!("invalid listen address '{}'", listen_raw)))?;

        let config = Self {
            github_token: env.github_token,
            repo_owner,
            repo_name,
            branch,
            api_base: file.api_base,
            listen,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate resolved values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.repo_owner.is_empty() {
            return Err(ConfigError::InvalidValue(
                "repo_owner cannot be empty".to_string(),
            ));
        }
        if self.repo_name.is_empty() {
            return Err(ConfigError::InvalidValue(
                "repo_name cannot be empty".to_string(),
            ));
        }
        if self.branch.is_empty() {
            return Err(ConfigError::InvalidValue(
                "branch cannot be empty".to_string(),
            ));
        }
        if let Some(api_base) = &self.api_base {
            if !api_base.starts_with("http://") && !api_base.starts_with("https://") {
                return Err(ConfigError::InvalidValue(format!(
                    "api_base must be an http(s) URL, got '{}'",
                    api_base
                )));
            }
        }
        Ok(())
    }
}

/// Environment-sourced overrides.
///
/// Captured as a plain struct so tests can construct them directly.
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub github_token: Option<String>,
    pub repo_owner: Option<String>,
    pub repo_name: Option<String>,
}

impl EnvOverrides {
    /// Capture overrides from the process environment.
    ///
    /// Empty variables are treated as unset.
    pub fn from_process_env() -> Self {
        fn non_empty(var: &str) -> Option<String> {
            std::env::var(var).ok().filter(|v| !v.is_empty())
        }

        Self {
            github_token: non_empty("GITHUB_TOKEN"),
            repo_owner: non_empty("GITHUB_REPO_OWNER"),
            repo_name: non_empty("GITHUB_REPO_NAME"),
        }
    }
}
