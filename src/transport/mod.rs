//! transport
//!
//! Fetch capabilities that produce raw metadata bytes.
//!
//! # Modules
//!
//! - [`traits`] - `MetadataFetcher` trait and error types
//! - [`rpc`] - HTTP JSON-RPC implementation
//! - [`mock`] - In-memory implementation for tests

pub mod mock;
pub mod rpc;
pub mod traits;

pub use mock::MockFetcher;
pub use rpc::RpcFetcher;
pub use traits::{ConnectionError, FetchError, MetadataFetcher, CONNECTION_HINT};

use crate::core::config::ChainConfig;
use crate::core::types::{ChainName, RpcEndpoint};

/// Pick the fetcher for a chain.
///
/// An `--rpc` override wins over the configured transport.
///
/// # Errors
///
/// Returns `FetchError::Unsupported` for light-client chains (no embedded
/// light client is available) and for chains without any endpoint.
pub fn fetcher_for(
    chain: &ChainName,
    config: &ChainConfig,
    rpc_override: Option<&RpcEndpoint>,
) -> Result<RpcFetcher, FetchError> {
    if let Some(endpoint) = rpc_override {
        return Ok(RpcFetcher::new(endpoint.clone()));
    }
    if config.light_client {
        return Err(FetchError::Unsupported(format!(
            "Light client connections are not supported. Use --rpc to connect to \"{}\" instead.",
            chain
        )));
    }
    match &config.rpc {
        Some(endpoint) => Ok(RpcFetcher::new(endpoint.clone())),
        None => Err(FetchError::Unsupported(format!(
            "No RPC endpoint configured for chain \"{0}\". Use --rpc or configure one with: \
             dot chain add {0} --rpc <url>",
            chain
        ))),
    }
}
