//! Verifier configuration.
//!
//! Defaults suit a RESTCONF server verifying payloads against compiled
//! YANG modules. Override from a JSON/YAML file, or from environment
//! variables:
//!
//! - `YANGV_MAX_RESOLUTION_DEPTH` (default: 32)
//! - `YANGV_STRICT_JSON` (`true`/`false`, `1`/`0`; default: false)

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default bound on typedef chain length.
pub const DEFAULT_MAX_RESOLUTION_DEPTH: usize = 32;

const ENV_MAX_DEPTH: &str = "YANGV_MAX_RESOLUTION_DEPTH";
const ENV_STRICT_JSON: &str = "YANGV_STRICT_JSON";

/// Tunables for a [`Verifier`](crate::Verifier).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct VerifierConfig {
    /// Longest typedef chain followed before the schema is declared
    /// malformed. Zero disables typedef resolution entirely.
    pub max_resolution_depth: usize,
    /// Also require the RFC 7951 JSON encoding of built-in types (e.g. a
    /// JSON number for `int8`) at the leaf and leaf-list entry points.
    pub strict_json_encoding: bool,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            max_resolution_depth: DEFAULT_MAX_RESOLUTION_DEPTH,
            strict_json_encoding: false,
        }
    }
}

impl VerifierConfig {
    /// Load from a file; `.yaml`/`.yml` parse as YAML, anything else as JSON.
    ///
    /// # Errors
    ///
    /// `ConfigError::Io` if unreadable, `ConfigError::Parse` if the content
    /// does not describe a configuration.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let parse_err = |reason: String| ConfigError::Parse {
            path: path.to_path_buf(),
            reason,
        };

        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => {
                serde_yaml::from_str(&content).map_err(|e| parse_err(e.to_string()))
            }
            _ => serde_json::from_str(&content).map_err(|e| parse_err(e.to_string())),
        }
    }

    /// Defaults with environment overrides applied.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_overrides()
    }

    /// Apply environment overrides on top of `self`.
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidEnv` if a set variable does not parse.
    pub fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Ok(raw) = std::env::var(ENV_MAX_DEPTH) {
            self.max_resolution_depth = raw.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: ENV_MAX_DEPTH.to_string(),
                value: raw.clone(),
            })?;
        }
        if let Ok(raw) = std::env::var(ENV_STRICT_JSON) {
            self.strict_json_encoding = parse_flag(&raw).ok_or_else(|| ConfigError::InvalidEnv {
                var: ENV_STRICT_JSON.to_string(),
                value: raw.clone(),
            })?;
        }
        Ok(self)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}
