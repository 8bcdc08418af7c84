//! core
//!
//! Core domain types, configuration and storage layout.
//!
//! # Modules
//!
//! - [`types`] - Strong types: ChainName, RpcEndpoint, Target
//! - [`config`] - Configuration schema and loading
//! - [`paths`] - Centralized path routing for dot storage

pub mod config;
pub mod paths;
pub mod types;
