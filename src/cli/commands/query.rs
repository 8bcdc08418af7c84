//! query command - Resolve a storage item and show its shape
//!
//! Storage values are not fetched or decoded; the command reports what a
//! read of the item would return.

use anyhow::Result;
use serde::Serialize;

use super::load_metadata;
use crate::cli::Context;
use crate::metadata::pallets::{StorageHasher, StorageKind, StorageModifier};
use crate::resolve;
use crate::ui::output;

#[derive(Debug, Serialize)]
struct StorageShape<'a> {
    pallet: &'a str,
    item: &'a str,
    kind: StorageKind,
    key_type: Option<String>,
    value_type: String,
    modifier: StorageModifier,
    hashers: &'a [StorageHasher],
}

/// Resolve `Pallet.Item` to a storage item and print its shape.
pub fn query(ctx: &Context, target: &str) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(query_async(ctx, target))
}

async fn query_async(ctx: &Context, target: &str) -> Result<()> {
    let config = ctx.load_config()?;
    let (chain, chain_config) = config.resolve_chain(ctx.chain.as_deref())?;
    let target = resolve::parse_target(target)?;

    let bundle = load_metadata(ctx, &chain, &chain_config).await?;
    let pallet = resolve::resolve_pallet(bundle.pallets(), &target.pallet)?;
    let item = resolve::resolve_storage_item(pallet, &target.item)?;

    let shape = StorageShape {
        pallet: &pallet.name,
        item: &item.name,
        kind: item.kind,
        key_type: item.key_type_id.map(|id| bundle.describe_type(id)),
        value_type: bundle.describe_type(item.value_type_id),
        modifier: item.modifier,
        hashers: &item.hashers,
    };

    if ctx.json() {
        output::print_json(&shape)?;
        return Ok(());
    }

    output::heading(format!("{}.{} (Storage)", shape.pallet, shape.item));
    output::field("Type", shape.kind);
    if let Some(key_type) = &shape.key_type {
        output::field("Key", key_type);
    }
    output::field("Value", &shape.value_type);
    output::field("Modifier", shape.modifier);
    println!();
    Ok(())
}
