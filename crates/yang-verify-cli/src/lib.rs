//! # yang-verify-cli: Command-Line Front End
//!
//! Provides the `yangv` command for checking JSON values against YANG
//! schema nodes outside a running RESTCONF server: useful when authoring
//! typedef files or reproducing a rejected payload.
//!
//! ## Subcommands
//!
//! - `yangv leaf`: verify one scalar value against a leaf node.
//! - `yangv leaf-list`: verify an array against a leaf-list node.
//! - `yangv mandatory`: report whether `mandatory` applies to a node.
//! - `yangv classify`: print the built-in category of a type name.
//!
//! ```bash
//! yangv --typedefs typedefs/ leaf --schema node.json --value '"eth0"'
//! yangv leaf-list --schema vlans.json --value-file payload.json
//! yangv classify int64
//! ```
//!
//! ## Crate Policy
//!
//! - Argument parsing lives here; verification lives in `yang-verify`.
//! - Exit codes: 0 accepted, 2 rejected, 1 operational failure.

pub mod check;
pub mod classify;

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;
use yang_verify::{NoImports, Outcome, TypeLookup, TypeRegistry, Verifier, VerifierConfig};

/// Exit code for a value that verified.
pub const EXIT_ACCEPTED: u8 = 0;
/// Exit code for a value the engine rejected.
pub const EXIT_REJECTED: u8 = 2;

/// Configuration and typedefs shared by every subcommand.
#[derive(Debug)]
pub struct Session {
    config: VerifierConfig,
    registry: Option<TypeRegistry>,
}

impl Session {
    /// Build a session from the global flags.
    ///
    /// The config file, when given, replaces the defaults; environment
    /// overrides apply on top either way.
    pub fn load(config: Option<&Path>, typedefs: Option<&Path>) -> Result<Self> {
        let base = match config {
            Some(path) => VerifierConfig::from_file(path)?,
            None => VerifierConfig::default(),
        };
        let config = base.with_env_overrides()?;
        tracing::debug!(?config, "verifier configuration");

        let registry = match typedefs {
            Some(dir) => {
                let registry = TypeRegistry::from_dir(dir)
                    .with_context(|| format!("loading typedefs from {}", dir.display()))?;
                tracing::info!(count = registry.len(), dir = %dir.display(), "typedefs loaded");
                Some(registry)
            }
            None => None,
        };

        Ok(Self { config, registry })
    }

    /// A session with default configuration and no typedefs.
    pub fn empty() -> Self {
        Self {
            config: VerifierConfig::default(),
            registry: None,
        }
    }

    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    /// Run `f` with a verifier over the loaded typedefs.
    pub fn with_verifier<T>(&self, f: impl FnOnce(&Verifier<'_, dyn TypeLookup + '_>) -> T) -> T {
        let lookup: &dyn TypeLookup = match &self.registry {
            Some(registry) => registry,
            None => &NoImports,
        };
        f(&Verifier::with_config(lookup, self.config.clone()))
    }
}

/// Read and parse a JSON file.
pub fn read_json_file(path: &Path) -> Result<Value> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing JSON in {}", path.display()))
}

/// One-line rendering of an outcome.
pub fn render(outcome: &Outcome) -> String {
    match outcome {
        Ok(()) => "ok".to_string(),
        Err(e) => e.to_string(),
    }
}

/// Print the outcome and map it to an exit code.
pub fn report(outcome: &Outcome) -> u8 {
    println!("{}", render(outcome));
    match outcome {
        Ok(()) => EXIT_ACCEPTED,
        Err(_) => EXIT_REJECTED,
    }
}
