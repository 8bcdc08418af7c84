//! cache
//!
//! Persisted metadata and the gate that decides when to fetch.
//!
//! # Modules
//!
//! - [`store`] - Persisted-bytes store trait and implementations
//! - [`gate`] - Metadata Cache Gate

pub mod gate;
pub mod store;

pub use gate::{GateError, MetadataGate, METADATA_TIMEOUT};
pub use store::{FileMetadataStore, MemoryMetadataStore, MetadataStore, StoreError};
