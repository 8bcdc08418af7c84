//! cli
//!
//! Command-line interface layer for dot.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Install the diagnostic log subscriber
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap, builds a
//! [`Context`] from the global flags and dispatches to the handlers in
//! [`commands`]. Metadata handling lives in [`crate::metadata`],
//! [`crate::resolve`] and [`crate::cache`].

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use anyhow::{Context as _, Result};
use tracing_subscriber::EnvFilter;

use crate::cache::{FileMetadataStore, MetadataGate};
use crate::core::config::Config;
use crate::core::paths::DotPaths;
use crate::core::types::RpcEndpoint;
use crate::ui::output::{OutputFormat, Verbosity};

/// Settings shared by every command, derived from the global flags.
#[derive(Debug, Clone)]
pub struct Context {
    /// `--chain`
    pub chain: Option<String>,
    /// `--rpc`
    pub rpc: Option<RpcEndpoint>,
    pub output: OutputFormat,
    pub verbosity: Verbosity,
    /// Storage root for cached metadata
    pub paths: DotPaths,
}

impl Context {
    /// Load the chain configuration.
    pub fn load_config(&self) -> Result<Config> {
        Ok(Config::load()?)
    }

    /// Cache gate over the on-disk metadata store.
    pub fn gate(&self) -> MetadataGate<FileMetadataStore> {
        MetadataGate::new(FileMetadataStore::new(self.paths.clone()))
    }

    /// Whether `--output json` was requested.
    pub fn json(&self) -> bool {
        self.output == OutputFormat::Json
    }
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    let verbosity = Verbosity::from_flags(cli.quiet, cli.debug);
    init_tracing(verbosity);

    let rpc = cli
        .rpc
        .as_deref()
        .map(RpcEndpoint::new)
        .transpose()?;
    let paths = DotPaths::from_env().context("Could not determine the home directory")?;

    let ctx = Context {
        chain: cli.chain.clone(),
        rpc,
        output: cli.output,
        verbosity,
        paths,
    };

    commands::dispatch(cli.command, &ctx)
}

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over the level implied by the flags.
fn init_tracing(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.filter_directive()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
