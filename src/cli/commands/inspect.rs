//! inspect command - Browse pallets, storage items and constants
//!
//! # Targets
//!
//! - none: every pallet with its storage and constant counts
//! - `Pallet`: the pallet's docs, storage items and constants
//! - `Pallet.Item`: one storage item (checked first) or constant

use anyhow::Result;
use serde_json::json;

use super::load_metadata;
use crate::cli::Context;
use crate::core::types::ChainName;
use crate::metadata::{ConstantItem, MetadataBundle, Pallet, StorageItem};
use crate::resolve::{self, ResolvedItem};
use crate::ui::output;

/// Inspect chain metadata.
pub fn inspect(ctx: &Context, target: Option<&str>) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(inspect_async(ctx, target))
}

async fn inspect_async(ctx: &Context, target: Option<&str>) -> Result<()> {
    let config = ctx.load_config()?;
    let (chain, chain_config) = config.resolve_chain(ctx.chain.as_deref())?;
    let bundle = load_metadata(ctx, &chain, &chain_config).await?;

    match target {
        None => show_pallets(ctx, &chain, &bundle),
        Some(target) if !target.contains('.') => {
            let pallet = resolve::resolve_pallet(bundle.pallets(), target)?;
            show_pallet(ctx, pallet)
        }
        Some(target) => {
            let target = resolve::parse_target(target)?;
            let pallet = resolve::resolve_pallet(bundle.pallets(), &target.pallet)?;
            match resolve::resolve_item(pallet, &target.item)? {
                ResolvedItem::Storage(item) => show_storage(ctx, &bundle, pallet, item),
                ResolvedItem::Constant(item) => show_constant(ctx, &bundle, pallet, item),
            }
        }
    }
}

fn show_pallets(ctx: &Context, chain: &ChainName, bundle: &MetadataBundle) -> Result<()> {
    let pallets = bundle.list_pallets();

    if ctx.json() {
        let listing: Vec<_> = pallets
            .iter()
            .map(|p| {
                json!({
                    "name": p.name,
                    "index": p.index,
                    "storage": p.storage.len(),
                    "constants": p.constants.len(),
                })
            })
            .collect();
        output::print_json(&listing)?;
        return Ok(());
    }

    output::heading(format!("Pallets on {} ({})", chain, pallets.len()));
    for pallet in pallets {
        let mut counts = Vec::new();
        if !pallet.storage.is_empty() {
            counts.push(format!("{} storage", pallet.storage.len()));
        }
        if !pallet.constants.is_empty() {
            counts.push(format!("{} constants", pallet.constants.len()));
        }
        output::item(&pallet.name, Some(&counts.join(", ")));
    }
    println!();
    Ok(())
}

fn show_pallet(ctx: &Context, pallet: &Pallet) -> Result<()> {
    if ctx.json() {
        output::print_json(pallet)?;
        return Ok(());
    }

    output::heading(format!("{} Pallet", pallet.name));

    if !pallet.docs.is_empty() {
        output::docs(&pallet.docs);
        println!();
    }

    if !pallet.storage.is_empty() {
        println!("  Storage Items:");
        for item in &pallet.storage {
            print_listing_line(&item.name, &item.docs);
        }
        println!();
    }

    if !pallet.constants.is_empty() {
        println!("  Constants:");
        for item in &pallet.constants {
            print_listing_line(&item.name, &item.docs);
        }
        println!();
    }
    Ok(())
}

fn print_listing_line(name: &str, docs: &[String]) {
    match output::doc_excerpt(docs) {
        Some(doc) => println!("    {} - {}", name, doc),
        None => println!("    {}", name),
    }
}

fn show_storage(
    ctx: &Context,
    bundle: &MetadataBundle,
    pallet: &Pallet,
    item: &StorageItem,
) -> Result<()> {
    let value_type = bundle.describe_type(item.value_type_id);
    let key_type = item.key_type_id.map(|id| bundle.describe_type(id));

    if ctx.json() {
        output::print_json(&json!({
            "pallet": pallet.name,
            "name": item.name,
            "category": "storage",
            "kind": item.kind,
            "key_type": key_type,
            "value_type": value_type,
            "modifier": item.modifier,
            "hashers": item.hashers,
            "docs": item.docs,
        }))?;
        return Ok(());
    }

    output::heading(format!("{}.{} (Storage)", pallet.name, item.name));
    output::field("Type", item.kind);
    output::field("Value", &value_type);
    if let Some(key_type) = &key_type {
        output::field("Key", key_type);
    }
    output::field("Modifier", item.modifier);
    if !item.hashers.is_empty() {
        let hashers: Vec<String> = item.hashers.iter().map(ToString::to_string).collect();
        output::field("Hashers", hashers.join(", "));
    }
    if !item.docs.is_empty() {
        println!();
        output::docs(&item.docs);
    }
    println!();
    Ok(())
}

fn show_constant(
    ctx: &Context,
    bundle: &MetadataBundle,
    pallet: &Pallet,
    item: &ConstantItem,
) -> Result<()> {
    let type_desc = bundle.describe_type(item.type_id);
    let value = output::format_hex(&item.value);

    if ctx.json() {
        output::print_json(&json!({
            "pallet": pallet.name,
            "name": item.name,
            "category": "constant",
            "type": type_desc,
            "value": value,
            "docs": item.docs,
        }))?;
        return Ok(());
    }

    output::heading(format!("{}.{} (Constant)", pallet.name, item.name));
    output::field("Type", &type_desc);
    output::field("Value", &value);
    if !item.docs.is_empty() {
        println!();
        output::docs(&item.docs);
    }
    println!();
    Ok(())
}
