//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Resolves the target chain from the config and global flags
//! 2. Loads metadata through the cache gate
//! 3. Resolves names and formats the result
//!
//! # Async Commands
//!
//! Commands that may fetch metadata are async because they involve network
//! I/O. Each one builds its own tokio runtime and blocks on its async body.

mod chain;
mod completion;
mod const_cmd;
mod inspect;
mod query;

// Re-export command functions for testing and direct invocation
pub use chain::{add as chain_add, default as chain_default, info as chain_info};
pub use chain::{list as chain_list, remove as chain_remove, update as chain_update};
pub use completion::completion;
pub use const_cmd::constant;
pub use inspect::inspect;
pub use query::query;

use anyhow::Result;

use crate::cache::GateError;
use crate::cli::args::{ChainAction, Command};
use crate::cli::Context;
use crate::core::config::ChainConfig;
use crate::core::types::ChainName;
use crate::metadata::MetadataBundle;
use crate::transport;
use crate::ui::output;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Chain { action } => match action {
            ChainAction::Add { name, light_client } => chain::add(ctx, &name, light_client),
            ChainAction::Remove { name } => chain::remove(ctx, &name),
            ChainAction::List => chain::list(ctx),
            ChainAction::Default { name } => chain::default(ctx, &name),
            ChainAction::Update { name } => chain::update(ctx, name.as_deref()),
            ChainAction::Info { name } => chain::info(ctx, name.as_deref()),
        },
        Command::Inspect { target } => inspect::inspect(ctx, target.as_deref()),
        Command::Query { target } => query::query(ctx, &target),
        Command::Const { target } => const_cmd::constant(ctx, &target),
        Command::Completion { shell } => completion::completion(shell),
    }
}

/// Cached metadata for `chain`, connecting only when nothing is cached.
async fn load_metadata(
    ctx: &Context,
    chain: &ChainName,
    chain_config: &ChainConfig,
) -> Result<MetadataBundle> {
    let gate = ctx.gate();
    match gate.get_or_fetch(chain, None).await {
        Err(GateError::NoCachedMetadata { .. }) => {
            output::progress(
                format!("Fetching metadata from {}...", chain),
                ctx.verbosity,
            );
            let fetcher = transport::fetcher_for(chain, chain_config, ctx.rpc.as_ref())?;
            Ok(gate.get_or_fetch(chain, Some(&fetcher)).await?)
        }
        other => Ok(other?),
    }
}
