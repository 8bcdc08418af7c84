//! dotinspect - a command-line client for Substrate runtime metadata
//!
//! dotinspect decodes a chain's runtime metadata, indexes its pallets,
//! storage items and constants, resolves dotted `Pallet.Item` names with
//! typo suggestions, and renders type descriptors as compact strings.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, dispatches commands)
//! - [`core`] - Strong types, configuration and storage paths
//! - [`metadata`] - Metadata decoding, type lookup, type description, pallet index
//! - [`resolve`] - Target parsing and name resolution with suggestions
//! - [`cache`] - Persisted metadata and the cache gate
//! - [`transport`] - Metadata fetch capability (JSON-RPC, mock)
//! - [`ui`] - Output formatting
//!
//! # Data Flow
//!
//! ```text
//! bytes -> metadata::decode -> TypeTable + PalletIndex -> resolve -> describe
//! ```

pub mod cache;
pub mod cli;
pub mod core;
pub mod metadata;
pub mod resolve;
pub mod transport;
pub mod ui;
