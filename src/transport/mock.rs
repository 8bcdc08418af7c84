//! transport::mock
//!
//! Mock fetcher for deterministic testing.
//!
//! # Design
//!
//! The mock answers from memory and records how often it was called, so
//! tests can assert that a cached path never reached the network. It can
//! also fail, or hang forever to exercise timeouts.
//!
//! # Example
//!
//! ```
//! use dotinspect::core::types::ChainName;
//! use dotinspect::transport::{MetadataFetcher, MockFetcher};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let fetcher = MockFetcher::with_bytes(vec![1, 2, 3]);
//! let chain = ChainName::new("local").unwrap();
//!
//! assert_eq!(fetcher.fetch_metadata_bytes(&chain).await.unwrap(), vec![1, 2, 3]);
//! assert_eq!(fetcher.call_count(), 1);
//! # });
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::traits::{FetchError, MetadataFetcher};
use crate::core::types::ChainName;

/// Mock fetcher for testing.
///
/// Clones share state, so a test can keep a handle while the gate owns
/// another.
#[derive(Debug, Clone)]
pub struct MockFetcher {
    inner: Arc<Mutex<MockFetcherInner>>,
}

#[derive(Debug)]
struct MockFetcherInner {
    behavior: Behavior,
    /// Chains requested, in call order.
    calls: Vec<ChainName>,
}

/// What the mock does when called.
#[derive(Debug, Clone)]
enum Behavior {
    Respond(Vec<u8>),
    Fail(FetchError),
    Hang,
}

impl MockFetcher {
    /// A fetcher that returns `bytes`.
    pub fn with_bytes(bytes: Vec<u8>) -> Self {
        Self::with_behavior(Behavior::Respond(bytes))
    }

    /// A fetcher that fails with `error`.
    pub fn failing(error: FetchError) -> Self {
        Self::with_behavior(Behavior::Fail(error))
    }

    /// A fetcher whose future never completes.
    pub fn never_resolves() -> Self {
        Self::with_behavior(Behavior::Hang)
    }

    fn with_behavior(behavior: Behavior) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockFetcherInner {
                behavior,
                calls: Vec::new(),
            })),
        }
    }

    /// Number of fetches so far.
    pub fn call_count(&self) -> usize {
        self.inner.lock().map(|i| i.calls.len()).unwrap_or(0)
    }

    /// Chains requested, in call order.
    pub fn calls(&self) -> Vec<ChainName> {
        self.inner
            .lock()
            .map(|i| i.calls.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl MetadataFetcher for MockFetcher {
    async fn fetch_metadata_bytes(&self, chain: &ChainName) -> Result<Vec<u8>, FetchError> {
        let behavior = {
            let mut inner = self
                .inner
                .lock()
                .map_err(|_| FetchError::Network("mock state poisoned".into()))?;
            inner.calls.push(chain.clone());
            inner.behavior.clone()
        };

        match behavior {
            Behavior::Respond(bytes) => Ok(bytes),
            Behavior::Fail(err) => Err(err),
            Behavior::Hang => std::future::pending().await,
        }
    }
}
