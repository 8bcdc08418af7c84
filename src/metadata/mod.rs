//! metadata
//!
//! Runtime metadata model: decoding, type lookup, type description and the
//! pallet index.
//!
//! # Modules
//!
//! - [`decode`] - Raw bytes to a version-unified document
//! - [`types`] - Type Lookup Table
//! - [`describe`] - Human-readable type rendering
//! - [`pallets`] - Pallet Index
//! - [`fixture`] - Sample runtime for tests and examples
//!
//! # Example
//!
//! ```
//! use dotinspect::metadata::{fixture, MetadataBundle};
//!
//! let bundle = MetadataBundle::from_bytes(fixture::encoded()).unwrap();
//! let locks = bundle.find_pallet("balances").unwrap().find_storage("Locks").unwrap();
//! assert_eq!(
//!     bundle.describe_type(locks.value_type_id),
//!     "Vec<{ id: [u8; 8], amount: u128, reasons: enum(5 variants) }>"
//! );
//! ```

pub mod decode;
pub mod describe;
pub mod fixture;
pub mod pallets;
pub mod types;

pub use decode::DecodeError;
pub use pallets::{ConstantItem, Pallet, PalletIndex, StorageItem, StorageKind};
pub use types::{TypeId, TypeTable};

use sha2::{Digest, Sha256};

/// Decoded metadata of one chain: type table plus pallet index.
///
/// Built once from bytes and immutable afterwards. Each command invocation
/// owns its own bundle.
#[derive(Debug, Clone)]
pub struct MetadataBundle {
    version: u32,
    size: usize,
    fingerprint: String,
    types: TypeTable,
    pallets: PalletIndex,
}

impl MetadataBundle {
    /// Decode and index metadata bytes.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError` if the bytes are not supported runtime metadata.
    pub fn from_bytes(bytes: impl AsRef<[u8]>) -> Result<Self, DecodeError> {
        let bytes = bytes.as_ref();
        let decoded = decode::decode(bytes)?;
        Ok(Self {
            version: decoded.version,
            size: bytes.len(),
            fingerprint: hex::encode(Sha256::digest(bytes)),
            types: TypeTable::from_registry(&decoded.registry),
            pallets: PalletIndex::new(decoded.pallets),
        })
    }

    /// Metadata version (14, 15 or 16).
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Size of the raw bytes.
    pub fn size(&self) -> usize {
        self.size
    }

    /// SHA-256 of the raw bytes, hex encoded.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// Type Lookup Table built from the registry.
    pub fn types(&self) -> &TypeTable {
        &self.types
    }

    /// Pallet Index, for the resolver.
    pub fn pallets(&self) -> &PalletIndex {
        &self.pallets
    }

    /// All pallets in document order.
    pub fn list_pallets(&self) -> &[Pallet] {
        self.pallets.list()
    }

    /// Find a pallet by name, ignoring case.
    pub fn find_pallet(&self, name: &str) -> Option<&Pallet> {
        self.pallets.find(name)
    }

    /// Pallet names in document order.
    pub fn pallet_names(&self) -> Vec<&str> {
        self.pallets.names()
    }

    /// Render a type for display. Never fails.
    pub fn describe_type(&self, id: TypeId) -> String {
        describe::describe(&self.types, id)
    }
}
