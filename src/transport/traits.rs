//! transport::traits
//!
//! The fetch capability: anything that can produce raw metadata bytes for a
//! chain.
//!
//! # Design
//!
//! The trait is async because fetching involves network I/O. It knows
//! nothing about caching or timeouts; the cache gate owns both.
//!
//! # Example
//!
//! ```
//! use dotinspect::core::types::ChainName;
//! use dotinspect::transport::{FetchError, MetadataFetcher};
//!
//! async fn fetch_len(fetcher: &dyn MetadataFetcher) -> Result<usize, FetchError> {
//!     let chain = ChainName::new("polkadot").unwrap();
//!     Ok(fetcher.fetch_metadata_bytes(&chain).await?.len())
//! }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::core::types::ChainName;

/// Remediation shown with every connection failure.
pub const CONNECTION_HINT: &str = "Check that the RPC endpoint is correct and reachable.";

/// Errors from a fetch capability.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// Network or HTTP failure.
    #[error("{0}")]
    Network(String),

    /// The node answered with a JSON-RPC error object.
    #[error("RPC error {code}: {message}")]
    Rpc {
        /// JSON-RPC error code
        code: i64,
        /// Error message from the node
        message: String,
    },

    /// The response could not be understood.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The configured transport is not available in this build.
    #[error("{0}")]
    Unsupported(String),
}

/// Failure to obtain metadata from a chain.
///
/// Timeouts are kept apart from transport failures so users can tell a
/// slow endpoint from a broken one.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConnectionError {
    #[error("Timed out fetching metadata for \"{chain}\" after {}s. {hint}", .after.as_secs_f64(), hint = CONNECTION_HINT)]
    Timeout { chain: ChainName, after: Duration },

    #[error("Failed to fetch metadata for \"{chain}\": {message}. {hint}", hint = CONNECTION_HINT)]
    Transport { chain: ChainName, message: String },
}

/// Source of raw metadata bytes.
#[async_trait]
pub trait MetadataFetcher: Send + Sync {
    /// Fetch the chain's current runtime metadata.
    async fn fetch_metadata_bytes(&self, chain: &ChainName) -> Result<Vec<u8>, FetchError>;
}
