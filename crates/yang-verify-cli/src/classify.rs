//! # Classify Subcommand
//!
//! Prints the built-in category of a type name, or `unrecognized` for a
//! typedef reference.

use anyhow::Result;
use clap::Args;
use yang_verify::YangType;

/// Arguments for `classify`.
#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// The type name as written in the schema (e.g. `uint16`, `inet:port-number`).
    pub type_name: String,
}

/// One output line: `<category> builtin|typedef`.
pub fn describe(type_name: &str) -> String {
    let category = YangType::classify(type_name);
    let origin = if category.is_builtin() { "builtin" } else { "typedef" };
    format!("{category} {origin}")
}

/// Execute `classify`.
pub fn run_classify(args: &ClassifyArgs) -> Result<u8> {
    println!("{}", describe(&args.type_name));
    Ok(0)
}
