//! # yangv CLI entry point
//!
//! Parses command-line arguments, installs logging, loads configuration
//! and typedefs, and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use yang_verify_cli::check::{run_leaf, run_leaf_list, run_mandatory, CheckArgs, MandatoryArgs};
use yang_verify_cli::classify::{run_classify, ClassifyArgs};
use yang_verify_cli::Session;

/// Verify JSON values against YANG schema nodes.
#[derive(Parser, Debug)]
#[command(name = "yangv", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a verifier configuration file (JSON or YAML).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory of typedef files (JSON or YAML) for resolving non-built-in types.
    #[arg(long, global = true)]
    typedefs: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Verify a scalar value against a leaf node.
    Leaf(CheckArgs),

    /// Verify an array value against a leaf-list node.
    LeafList(CheckArgs),

    /// Report whether the mandatory constraint applies to a node.
    Mandatory(MandatoryArgs),

    /// Print the built-in category of a type name.
    Classify(ClassifyArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "yangv starting");

    let result = match &cli.command {
        Commands::Classify(args) => run_classify(args),
        Commands::Mandatory(args) => run_mandatory(args),
        Commands::Leaf(args) => {
            Session::load(cli.config.as_deref(), cli.typedefs.as_deref())
                .and_then(|session| run_leaf(args, &session))
        }
        Commands::LeafList(args) => {
            Session::load(cli.config.as_deref(), cli.typedefs.as_deref())
                .and_then(|session| run_leaf_list(args, &session))
        }
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
