//! chain command - Manage configured chains and their cached metadata
//!
//! # Actions
//!
//! - `add` saves the chain, then fetches and caches fresh metadata
//! - `remove` drops the chain and its cached data
//! - `list` shows configured chains, default marked
//! - `default` sets the default chain
//! - `update` re-fetches metadata, replacing the cache
//! - `info` summarizes cached metadata without connecting

use anyhow::{bail, Result};
use serde::Serialize;
use tracing::debug;

use super::load_metadata;
use crate::cache::MetadataStore;
use crate::cli::Context;
use crate::core::config::ChainConfig;
use crate::core::types::ChainName;
use crate::transport;
use crate::ui::output;

const ADD_USAGE: &str = "Usage: dot chain add <name> --rpc <url>\n       dot chain add <name> --light-client";

#[derive(Debug, Serialize)]
struct ChainSummary<'a> {
    name: &'a str,
    rpc: Option<&'a str>,
    light_client: bool,
    default: bool,
}

#[derive(Debug, Serialize)]
struct MetadataSummary<'a> {
    chain: &'a str,
    version: u32,
    size: usize,
    fingerprint: &'a str,
    pallets: usize,
}

/// Add a chain and fetch its metadata.
pub fn add(ctx: &Context, name: &str, light_client: bool) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(add_async(ctx, name, light_client))
}

async fn add_async(ctx: &Context, name: &str, light_client: bool) -> Result<()> {
    let name = ChainName::new(name)?;
    if ctx.rpc.is_none() && !light_client {
        bail!("Must provide either --rpc <url> or --light-client.\n\n{}", ADD_USAGE);
    }

    let chain_config = ChainConfig {
        rpc: ctx.rpc.clone(),
        light_client,
    };
    let mut config = ctx.load_config()?;
    config.upsert_chain(&name, chain_config.clone())?;
    let path = config.save()?;
    debug!(chain = %name, path = %path.display(), "chain saved");

    output::progress(format!("Connecting to {}...", name), ctx.verbosity);
    let fetcher = transport::fetcher_for(&name, &chain_config, ctx.rpc.as_ref())?;

    output::progress("Fetching metadata...", ctx.verbosity);
    ctx.gate().refresh(&name, &fetcher).await?;

    output::success(
        format!("Chain \"{}\" added successfully.", name),
        ctx.verbosity,
    );
    Ok(())
}

/// Remove a chain and its cached data.
pub fn remove(ctx: &Context, name: &str) -> Result<()> {
    let name = ChainName::new(name)?;
    let mut config = ctx.load_config()?;

    let reset = config.remove_chain(&name)?;
    if reset {
        output::print(
            format!("Default chain reset to \"{}\".", config.default_chain()),
            ctx.verbosity,
        );
    }

    config.save()?;
    ctx.gate().store().remove(&name)?;
    output::success(format!("Chain \"{}\" removed.", name), ctx.verbosity);
    Ok(())
}

/// List configured chains.
pub fn list(ctx: &Context) -> Result<()> {
    let config = ctx.load_config()?;
    let default = config.default_chain();

    let chains: Vec<ChainSummary<'_>> = config
        .file
        .chains
        .iter()
        .map(|(name, chain)| ChainSummary {
            name,
            rpc: chain.rpc.as_ref().map(|r| r.as_str()),
            light_client: chain.light_client,
            default: name == default,
        })
        .collect();

    if ctx.json() {
        output::print_json(&chains)?;
        return Ok(());
    }

    output::heading("Configured Chains");
    for chain in &chains {
        let marker = if chain.default { " (default)" } else { "" };
        let provider = match chain.rpc {
            Some(rpc) if !chain.light_client => rpc,
            _ => "light-client",
        };
        println!("  {}{}  {}", chain.name, marker, provider);
    }
    println!();
    Ok(())
}

/// Set the default chain.
pub fn default(ctx: &Context, name: &str) -> Result<()> {
    let name = ChainName::new(name)?;
    let mut config = ctx.load_config()?;
    config.set_default(&name)?;
    config.save()?;
    output::success(
        format!("Default chain set to \"{}\".", name),
        ctx.verbosity,
    );
    Ok(())
}

/// Re-fetch metadata for a chain, replacing the cache.
pub fn update(ctx: &Context, name: Option<&str>) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(update_async(ctx, name))
}

async fn update_async(ctx: &Context, name: Option<&str>) -> Result<()> {
    let config = ctx.load_config()?;
    let (chain, chain_config) = config.resolve_chain(name.or(ctx.chain.as_deref()))?;
    let fetcher = transport::fetcher_for(&chain, &chain_config, ctx.rpc.as_ref())?;

    output::progress(
        format!("Fetching metadata from {}...", chain),
        ctx.verbosity,
    );
    let bundle = ctx.gate().refresh(&chain, &fetcher).await?;

    output::success(
        format!(
            "Metadata for \"{}\" updated (v{}, {} pallets).",
            chain,
            bundle.version(),
            bundle.pallets().len()
        ),
        ctx.verbosity,
    );
    Ok(())
}

/// Summarize the metadata cached for a chain.
///
/// Connects only if nothing is cached yet.
pub fn info(ctx: &Context, name: Option<&str>) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(info_async(ctx, name))
}

async fn info_async(ctx: &Context, name: Option<&str>) -> Result<()> {
    let config = ctx.load_config()?;
    let (chain, chain_config) = config.resolve_chain(name.or(ctx.chain.as_deref()))?;
    let bundle = load_metadata(ctx, &chain, &chain_config).await?;

    let summary = MetadataSummary {
        chain: chain.as_str(),
        version: bundle.version(),
        size: bundle.size(),
        fingerprint: bundle.fingerprint(),
        pallets: bundle.pallets().len(),
    };

    if ctx.json() {
        output::print_json(&summary)?;
        return Ok(());
    }

    output::heading(format!("{} Metadata", chain));
    let provider = match (&chain_config.rpc, chain_config.light_client) {
        (Some(rpc), false) => rpc.to_string(),
        _ => "light-client".to_string(),
    };
    output::field("Endpoint", provider);
    output::field("Version", format!("v{}", summary.version));
    output::field("Size", format!("{} bytes", summary.size));
    output::field("Fingerprint", summary.fingerprint);
    output::field("Pallets", summary.pallets);
    println!();
    Ok(())
}
