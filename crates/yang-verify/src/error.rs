//! # Error Types: Verification Outcomes
//!
//! Every verification call returns an [`Outcome`]: `Ok(())` or exactly one
//! [`VerifyError`]. All three failure kinds are terminal. The engine never
//! retries and never coerces an invalid value into a valid one.
//!
//! ## Design
//!
//! - Value failures (shape, range, pattern) are `TypeMismatch`.
//! - Schema failures (missing `leaf-type`, unresolvable typedef, broken
//!   refinement) are `SchemaMalformed`.
//! - Leaf-list uniqueness failures are `IdenticalKeys` and carry both indices.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Result of a single verification call.
pub type Outcome = Result<(), VerifyError>;

/// A verification failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerifyError {
    /// The value's shape, range, or pattern does not satisfy the declared type.
    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    /// The schema node is missing required fields, or an imported type
    /// cannot be found or parsed.
    #[error("malformed schema: {0}")]
    SchemaMalformed(String),

    /// Two leaf-list entries share the same string form.
    #[error("identical keys: {value:?} at index {duplicate} repeats index {first}")]
    IdenticalKeys {
        /// The repeated string form.
        value: String,
        /// Index of the earlier occurrence.
        first: usize,
        /// Index of the offending later occurrence.
        duplicate: usize,
    },
}

impl VerifyError {
    pub(crate) fn mismatch(detail: impl Into<String>) -> Self {
        Self::TypeMismatch(detail.into())
    }

    pub(crate) fn malformed(detail: impl Into<String>) -> Self {
        Self::SchemaMalformed(detail.into())
    }

    /// The failure kind, without its detail.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::TypeMismatch(_) => FailureKind::TypeMismatch,
            Self::SchemaMalformed(_) => FailureKind::SchemaMalformed,
            Self::IdenticalKeys { .. } => FailureKind::IdenticalKeys,
        }
    }
}

/// Detail-free classification of a [`VerifyError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    TypeMismatch,
    SchemaMalformed,
    IdenticalKeys,
}

impl FailureKind {
    /// Stable kebab-case name, suitable for mapping onto RESTCONF error tags.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TypeMismatch => "type-mismatch",
            Self::SchemaMalformed => "schema-malformed",
            Self::IdenticalKeys => "identical-keys",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error while loading type definitions into a [`TypeRegistry`](crate::TypeRegistry).
#[derive(Error, Debug)]
pub enum RegistryError {
    /// A typedef file or directory could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A typedef file is not valid JSON.
    #[error("invalid JSON in {path}: {source}")]
    Json {
        /// Offending file.
        path: PathBuf,
        /// Parser error.
        #[source]
        source: serde_json::Error,
    },

    /// A typedef file is not valid YAML, or uses YAML outside the JSON subset.
    #[error("invalid YAML in {path}: {reason}")]
    Yaml {
        /// Offending file.
        path: PathBuf,
        /// Reason the document was rejected.
        reason: String,
    },

    /// A typedef file's top level is not an object of name → definition.
    #[error("{path}: top level must map type names to definitions")]
    NotAMapping {
        /// Offending file.
        path: PathBuf,
    },

    /// The same type name is defined twice.
    #[error("type '{name}' defined more than once (again in {path})")]
    DuplicateType {
        /// The type name.
        name: String,
        /// File holding the second definition.
        path: PathBuf,
    },
}

/// Error while loading a [`VerifierConfig`](crate::VerifierConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file could not be parsed.
    #[error("invalid config {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    /// An environment override holds an unusable value.
    #[error("invalid value for {var}: {value:?}")]
    InvalidEnv { var: String, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        assert_eq!(
            VerifyError::mismatch("x").kind(),
            FailureKind::TypeMismatch
        );
        assert_eq!(
            VerifyError::malformed("x").kind(),
            FailureKind::SchemaMalformed
        );
        let dup = VerifyError::IdenticalKeys {
            value: "a".into(),
            first: 0,
            duplicate: 2,
        };
        assert_eq!(dup.kind(), FailureKind::IdenticalKeys);
        assert_eq!(dup.kind().as_str(), "identical-keys");
    }

    #[test]
    fn identical_keys_display_names_both_indices() {
        let dup = VerifyError::IdenticalKeys {
            value: "eth0".into(),
            first: 1,
            duplicate: 4,
        };
        let msg = dup.to_string();
        assert!(msg.contains("\"eth0\""));
        assert!(msg.contains("index 4"));
        assert!(msg.contains("index 1"));
    }
}
