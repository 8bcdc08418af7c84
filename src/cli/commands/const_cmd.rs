//! const command - Look up a pallet constant
//!
//! Prints the constant's type and its SCALE-encoded value as hex.

use anyhow::Result;
use serde::Serialize;

use super::load_metadata;
use crate::cli::Context;
use crate::resolve;
use crate::ui::output;

#[derive(Debug, Serialize)]
struct ConstantValue<'a> {
    pallet: &'a str,
    constant: &'a str,
    #[serde(rename = "type")]
    type_desc: String,
    value: String,
}

/// Resolve `Pallet.Constant` and print its type and encoded value.
pub fn constant(ctx: &Context, target: &str) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(constant_async(ctx, target))
}

async fn constant_async(ctx: &Context, target: &str) -> Result<()> {
    let config = ctx.load_config()?;
    let (chain, chain_config) = config.resolve_chain(ctx.chain.as_deref())?;
    let target = resolve::parse_target(target)?;

    let bundle = load_metadata(ctx, &chain, &chain_config).await?;
    let pallet = resolve::resolve_pallet(bundle.pallets(), &target.pallet)?;
    let item = resolve::resolve_constant(pallet, &target.item)?;

    let result = ConstantValue {
        pallet: &pallet.name,
        constant: &item.name,
        type_desc: bundle.describe_type(item.type_id),
        value: output::format_hex(&item.value),
    };

    if ctx.json() {
        output::print_json(&result)?;
        return Ok(());
    }

    output::heading(format!("{}.{} (Constant)", result.pallet, result.constant));
    output::field("Type", &result.type_desc);
    output::field("Value", &result.value);
    println!();
    Ok(())
}
