//! cache::gate
//!
//! Metadata Cache Gate: stored bytes first, fetch only when nothing is
//! stored.
//!
//! # Behavior
//!
//! | Stored bytes | Fetcher | Result                                   |
//! |--------------|---------|------------------------------------------|
//! | yes          | any     | decode stored bytes, fetcher not called  |
//! | no           | none    | `NoCachedMetadata`                       |
//! | no           | some    | fetch (with timeout), decode, store      |
//!
//! Stored bytes are never checked against the live chain. Staleness is
//! resolved only by an explicit [`MetadataGate::refresh`].
//!
//! Fetched bytes are decoded before they are stored, so a bad response
//! never replaces or creates a cache entry.

use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use super::store::{MetadataStore, StoreError};
use crate::core::types::ChainName;
use crate::metadata::{DecodeError, MetadataBundle};
use crate::transport::{ConnectionError, MetadataFetcher};

/// Upper bound on a single metadata fetch.
pub const METADATA_TIMEOUT: Duration = Duration::from_secs(15);

/// Errors from the cache gate.
#[derive(Debug, Error)]
pub enum GateError {
    #[error(
        "No cached metadata for chain \"{chain}\". Run a command that connects to the chain \
         first, e.g.: dot chain add {chain} --rpc <url>"
    )]
    NoCachedMetadata { chain: ChainName },

    #[error(transparent)]
    Connection(#[from] ConnectionError),

    #[error("Invalid metadata for \"{chain}\": {source}. Refresh it with: dot chain update {chain}")]
    Decode {
        chain: ChainName,
        #[source]
        source: DecodeError,
    },

    #[error("Metadata storage failed for \"{chain}\": {source}")]
    Store {
        chain: ChainName,
        #[source]
        source: StoreError,
    },
}

/// Decides between stored and freshly fetched metadata.
#[derive(Debug)]
pub struct MetadataGate<S> {
    store: S,
    timeout: Duration,
}

impl<S: MetadataStore> MetadataGate<S> {
    /// A gate over `store` with the standard fetch timeout.
    pub fn new(store: S) -> Self {
        Self {
            store,
            timeout: METADATA_TIMEOUT,
        }
    }

    /// Override the fetch timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The underlying byte store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Stored metadata for `chain`, fetching it if nothing is stored.
    ///
    /// # Errors
    ///
    /// - `NoCachedMetadata` if nothing is stored and no fetcher was given
    /// - `Connection` if the fetch fails or times out
    /// - `Decode` if the bytes are not valid metadata
    /// - `Store` if reading or writing the store fails
    pub async fn get_or_fetch(
        &self,
        chain: &ChainName,
        fetcher: Option<&dyn MetadataFetcher>,
    ) -> Result<MetadataBundle, GateError> {
        if let Some(bytes) = self.store.load(chain).map_err(|e| store_err(chain, e))? {
            debug!(chain = %chain, bytes = bytes.len(), "using cached metadata");
            return decode(chain, &bytes);
        }

        match fetcher {
            Some(fetcher) => self.refresh(chain, fetcher).await,
            None => Err(GateError::NoCachedMetadata {
                chain: chain.clone(),
            }),
        }
    }

    /// Fetch, decode and store metadata regardless of what is stored.
    pub async fn refresh(
        &self,
        chain: &ChainName,
        fetcher: &dyn MetadataFetcher,
    ) -> Result<MetadataBundle, GateError> {
        let bytes = self.fetch(chain, fetcher).await?;
        let bundle = decode(chain, &bytes)?;
        self.store
            .save(chain, &bytes)
            .map_err(|e| store_err(chain, e))?;
        debug!(chain = %chain, version = bundle.version(), "metadata cached");
        Ok(bundle)
    }

    async fn fetch(
        &self,
        chain: &ChainName,
        fetcher: &dyn MetadataFetcher,
    ) -> Result<Vec<u8>, ConnectionError> {
        debug!(chain = %chain, timeout = ?self.timeout, "fetching metadata");
        match tokio::time::timeout(self.timeout, fetcher.fetch_metadata_bytes(chain)).await {
            Ok(Ok(bytes)) => Ok(bytes),
            Ok(Err(e)) => Err(ConnectionError::Transport {
                chain: chain.clone(),
                message: e.to_string(),
            }),
            Err(_) => Err(ConnectionError::Timeout {
                chain: chain.clone(),
                after: self.timeout,
            }),
        }
    }
}

fn decode(chain: &ChainName, bytes: &[u8]) -> Result<MetadataBundle, GateError> {
    MetadataBundle::from_bytes(bytes).map_err(|source| GateError::Decode {
        chain: chain.clone(),
        source,
    })
}

fn store_err(chain: &ChainName, source: StoreError) -> GateError {
    GateError::Store {
        chain: chain.clone(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::store::MemoryMetadataStore;
    use crate::metadata::fixture;
    use crate::transport::{FetchError, MockFetcher};

    fn chain() -> ChainName {
        ChainName::new("kusama").unwrap()
    }

    fn gate() -> MetadataGate<MemoryMetadataStore> {
        MetadataGate::new(MemoryMetadataStore::new())
    }

    #[tokio::test]
    async fn missing_without_fetcher_fails() {
        let err = gate().get_or_fetch(&chain(), None).await.unwrap_err();
        assert!(matches!(err, GateError::NoCachedMetadata { .. }));
        assert_eq!(
            err.to_string(),
            "No cached metadata for chain \"kusama\". Run a command that connects to the chain \
             first, e.g.: dot chain add kusama --rpc <url>"
        );
    }

    #[tokio::test]
    async fn cached_bytes_skip_fetcher() {
        let gate = gate();
        gate.store().save(&chain(), &fixture::encoded()).unwrap();
        let fetcher = MockFetcher::failing(FetchError::Network("unreachable".into()));

        let bundle = gate.get_or_fetch(&chain(), Some(&fetcher)).await.unwrap();
        assert_eq!(bundle.pallet_names().len(), 3);
        assert_eq!(fetcher.call_count(), 0);
    }

    #[tokio::test]
    async fn cached_bytes_without_fetcher() {
        let gate = gate();
        gate.store().save(&chain(), &fixture::encoded()).unwrap();
        assert!(gate.get_or_fetch(&chain(), None).await.is_ok());
    }

    #[tokio::test]
    async fn fetches_and_persists_when_missing() {
        let gate = gate();
        let fetcher = MockFetcher::with_bytes(fixture::encoded());

        gate.get_or_fetch(&chain(), Some(&fetcher)).await.unwrap();
        assert_eq!(fetcher.call_count(), 1);
        assert_eq!(
            gate.store().load(&chain()).unwrap(),
            Some(fixture::encoded())
        );

        // Second call is served from the store.
        gate.get_or_fetch(&chain(), Some(&fetcher)).await.unwrap();
        assert_eq!(fetcher.call_count(), 1);
    }

    #[tokio::test]
    async fn transport_failure_is_connection_error() {
        let fetcher = MockFetcher::failing(FetchError::Network("connection refused".into()));
        let err = gate()
            .get_or_fetch(&chain(), Some(&fetcher))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            GateError::Connection(ConnectionError::Transport { .. })
        ));
        assert!(err.to_string().contains("connection refused"));
    }

    #[tokio::test(start_paused = true)]
    async fn hanging_fetch_times_out_after_limit() {
        let gate = gate();
        let fetcher = MockFetcher::never_resolves();
        let start = tokio::time::Instant::now();

        let err = gate
            .get_or_fetch(&chain(), Some(&fetcher))
            .await
            .unwrap_err();

        assert!(start.elapsed() >= METADATA_TIMEOUT);
        match err {
            GateError::Connection(ConnectionError::Timeout { chain: c, after }) => {
                assert_eq!(c, chain());
                assert_eq!(after, METADATA_TIMEOUT);
            }
            other => panic!("expected timeout, got {:?}", other),
        }
        assert_eq!(gate.store().load(&chain()).unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn custom_timeout() {
        let gate = gate().with_timeout(Duration::from_secs(2));
        let fetcher = MockFetcher::never_resolves();
        let err = gate
            .get_or_fetch(&chain(), Some(&fetcher))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("after 2s"));
    }

    #[tokio::test(start_paused = true)]
    async fn sub_second_timeout_keeps_fraction() {
        let gate = gate().with_timeout(Duration::from_millis(500));
        let fetcher = MockFetcher::never_resolves();
        let err = gate
            .get_or_fetch(&chain(), Some(&fetcher))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("after 0.5s"), "{}", err);
    }

    #[tokio::test]
    async fn bad_fetched_bytes_not_persisted() {
        let gate = gate();
        let fetcher = MockFetcher::with_bytes(b"garbage".to_vec());
        let err = gate
            .get_or_fetch(&chain(), Some(&fetcher))
            .await
            .unwrap_err();
        assert!(matches!(err, GateError::Decode { .. }));
        assert_eq!(gate.store().load(&chain()).unwrap(), None);
    }

    #[tokio::test]
    async fn corrupt_cache_reported() {
        let gate = gate();
        gate.store().save(&chain(), b"garbage").unwrap();
        let err = gate.get_or_fetch(&chain(), None).await.unwrap_err();
        assert!(err.to_string().contains("dot chain update kusama"));
    }

    #[tokio::test]
    async fn refresh_always_fetches() {
        let gate = gate();
        gate.store().save(&chain(), b"stale").unwrap();
        let fetcher = MockFetcher::with_bytes(fixture::encoded());

        gate.refresh(&chain(), &fetcher).await.unwrap();
        assert_eq!(fetcher.call_count(), 1);
        assert_eq!(
            gate.store().load(&chain()).unwrap(),
            Some(fixture::encoded())
        );
    }
}
