//! # Check Subcommands
//!
//! `leaf`, `leaf-list` and `mandatory`: load a schema node from a JSON
//! file and run the matching engine entry point against it.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;

use crate::{read_json_file, report, Session};

/// Where the value under test comes from.
#[derive(Args, Debug)]
pub struct ValueSource {
    /// The value as inline JSON (e.g. `42`, `'"eth0"'`, `'["a","b"]'`).
    #[arg(long, required_unless_present = "value_file", conflicts_with = "value_file")]
    pub value: Option<String>,

    /// Read the value from a JSON file.
    #[arg(long)]
    pub value_file: Option<PathBuf>,
}

impl ValueSource {
    /// Parse the value from whichever source was given.
    pub fn load(&self) -> Result<Value> {
        match (&self.value, &self.value_file) {
            (Some(inline), _) => {
                serde_json::from_str(inline).context("parsing --value as JSON")
            }
            (None, Some(path)) => read_json_file(path),
            (None, None) => anyhow::bail!("one of --value or --value-file is required"),
        }
    }
}

/// Arguments for `leaf` and `leaf-list`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// JSON file holding the schema node.
    #[arg(long)]
    pub schema: PathBuf,

    #[command(flatten)]
    pub source: ValueSource,
}

/// Arguments for `mandatory`.
#[derive(Args, Debug)]
pub struct MandatoryArgs {
    /// JSON file holding the schema node.
    #[arg(long)]
    pub schema: PathBuf,
}

/// Execute `leaf`.
pub fn run_leaf(args: &CheckArgs, session: &Session) -> Result<u8> {
    let node = read_json_file(&args.schema)?;
    let value = args.source.load()?;
    let outcome = session.with_verifier(|v| v.verify_leaf(&value, &node));
    tracing::debug!(schema = %args.schema.display(), ok = outcome.is_ok(), "leaf verified");
    Ok(report(&outcome))
}

/// Execute `leaf-list`.
pub fn run_leaf_list(args: &CheckArgs, session: &Session) -> Result<u8> {
    let node = read_json_file(&args.schema)?;
    let value = args.source.load()?;
    let outcome = session.with_verifier(|v| v.verify_leaf_list(&value, &node));
    tracing::debug!(schema = %args.schema.display(), ok = outcome.is_ok(), "leaf-list verified");
    Ok(report(&outcome))
}

/// Execute `mandatory`. Always exits 0; the answer is printed.
pub fn run_mandatory(args: &MandatoryArgs) -> Result<u8> {
    let node = read_json_file(&args.schema)?;
    println!("{}", yang_verify::is_mandatory(&node));
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EXIT_ACCEPTED, EXIT_REJECTED};

    fn schema_file(dir: &std::path::Path, node: &str) -> PathBuf {
        let path = dir.join("node.json");
        std::fs::write(&path, node).unwrap();
        path
    }

    fn inline(value: &str) -> ValueSource {
        ValueSource {
            value: Some(value.to_string()),
            value_file: None,
        }
    }

    #[test]
    fn leaf_accepted_and_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let schema = schema_file(dir.path(), r#"{"type": "leaf", "leaf-type": "int8"}"#);
        let session = Session::empty();

        let args = CheckArgs { schema: schema.clone(), source: inline("127") };
        assert_eq!(run_leaf(&args, &session).unwrap(), EXIT_ACCEPTED);

        let args = CheckArgs { schema, source: inline("128") };
        assert_eq!(run_leaf(&args, &session).unwrap(), EXIT_REJECTED);
    }

    #[test]
    fn leaf_list_from_value_file() {
        let dir = tempfile::tempdir().unwrap();
        let schema = schema_file(dir.path(), r#"{"type": "leaf-list", "leaf-type": "string"}"#);
        let value_file = dir.path().join("value.json");
        std::fs::write(&value_file, r#"["a", "b", "a"]"#).unwrap();

        let args = CheckArgs {
            schema,
            source: ValueSource { value: None, value_file: Some(value_file) },
        };
        assert_eq!(run_leaf_list(&args, &Session::empty()).unwrap(), EXIT_REJECTED);
    }

    #[test]
    fn unparsable_inline_value_is_operational_error() {
        let dir = tempfile::tempdir().unwrap();
        let schema = schema_file(dir.path(), r#"{"leaf-type": "string"}"#);
        let args = CheckArgs { schema, source: inline("not json") };
        assert!(run_leaf(&args, &Session::empty()).is_err());
    }

    #[test]
    fn missing_schema_is_operational_error() {
        let dir = tempfile::tempdir().unwrap();
        let args = CheckArgs { schema: dir.path().join("absent.json"), source: inline("1") };
        assert!(run_leaf(&args, &Session::empty()).is_err());
    }

    #[test]
    fn mandatory_runs() {
        let dir = tempfile::tempdir().unwrap();
        let schema = schema_file(dir.path(), r#"{"type": "leaf", "mandatory": true}"#);
        assert_eq!(run_mandatory(&MandatoryArgs { schema }).unwrap(), 0);
    }
}
