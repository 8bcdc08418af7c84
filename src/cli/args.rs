//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--chain <name>`: Target chain (default from config)
//! - `--rpc <url>`: Override the RPC endpoint for this call
//! - `--output pretty|json`: Output format
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand};

use crate::ui::output::OutputFormat;

/// dot - inspect Substrate runtime metadata from the command line
#[derive(Parser, Debug)]
#[command(name = "dot")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Target chain (default from config)
    #[arg(long, global = true, value_name = "NAME")]
    pub chain: Option<String>,

    /// Override the RPC endpoint for this call
    #[arg(long, global = true, value_name = "URL")]
    pub rpc: Option<String>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Pretty)]
    pub output: OutputFormat,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage chains (add, remove, list, default, update, info)
    #[command(
        name = "chain",
        long_about = "Manage configured chains and their cached metadata.\n\n\
            Each chain has a name and either an RPC endpoint or a light-client flag. \
            Metadata is fetched when a chain is added and cached until it is \
            refreshed with `dot chain update`.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Add a chain via RPC
    dot chain add kusama --rpc wss://kusama-rpc.polkadot.io

    # Make it the default
    dot chain default kusama

    # Refresh cached metadata after a runtime upgrade
    dot chain update kusama

    # See what is configured
    dot chain list"
    )]
    Chain {
        #[command(subcommand)]
        action: ChainAction,
    },

    /// Inspect chain metadata (pallets, storage, constants)
    #[command(
        name = "inspect",
        long_about = "Inspect the runtime metadata of a chain.\n\n\
            Without a target, lists every pallet. With a pallet name, lists its storage \
            items and constants. With `Pallet.Item`, shows the item's types and docs. \
            Names are matched case-insensitively and typos get suggestions.",
        after_help = "\
WORKFLOW EXAMPLES:
    # List pallets
    dot inspect

    # List items of one pallet
    dot inspect System

    # Show one item
    dot inspect System.Account

    # Same, as JSON
    dot inspect System.Account --output json"
    )]
    Inspect {
        /// `Pallet` or `Pallet.Item`
        target: Option<String>,
    },

    /// Show the shape of a storage item (e.g. System.Account)
    #[command(
        name = "query",
        long_about = "Resolve a storage item and show its shape.\n\n\
            Prints the storage kind, key and value types, modifier and hashers. \
            Storage values are not fetched.",
        after_help = "\
WORKFLOW EXAMPLES:
    dot query System.Number
    dot query System.Account --chain kusama"
    )]
    Query {
        /// `Pallet.Item`
        target: String,
    },

    /// Look up a pallet constant (e.g. Balances.ExistentialDeposit)
    #[command(
        name = "const",
        long_about = "Resolve a pallet constant and show its type and encoded value.\n\n\
            The value is printed as SCALE-encoded hex.",
        after_help = "\
WORKFLOW EXAMPLES:
    dot const Balances.ExistentialDeposit
    dot const System.SS58Prefix --chain kusama"
    )]
    Const {
        /// `Pallet.Constant`
        target: String,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        long_about = "Generate shell completion scripts for tab-completion.\n\n\
            Outputs a completion script for the specified shell. Add the output \
            to your shell's configuration to enable tab-completion for dot commands.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Bash (add to ~/.bashrc)
    dot completion bash >> ~/.bashrc

    # Zsh (add to ~/.zshrc)
    dot completion zsh >> ~/.zshrc

    # Fish
    dot completion fish > ~/.config/fish/completions/dot.fish

    # PowerShell
    dot completion powershell >> $PROFILE"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Chain management actions.
#[derive(Subcommand, Debug)]
pub enum ChainAction {
    /// Add a chain and fetch its metadata (requires --rpc or --light-client)
    Add {
        /// Chain name
        name: String,

        /// Connect through a light client instead of RPC
        #[arg(long)]
        light_client: bool,
    },
    /// Remove a chain and its cached metadata
    Remove {
        /// Chain name
        name: String,
    },
    /// List configured chains
    List,
    /// Set the default chain
    Default {
        /// Chain name
        name: String,
    },
    /// Re-fetch and cache metadata
    Update {
        /// Chain name (default: --chain or the default chain)
        name: Option<String>,
    },
    /// Show a summary of cached metadata
    Info {
        /// Chain name (default: --chain or the default chain)
        name: Option<String>,
    },
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
