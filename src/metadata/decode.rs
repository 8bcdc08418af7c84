//! metadata::decode
//!
//! Metadata Decoder: raw bytes to a version-unified document.
//!
//! # Input
//!
//! Two encodings are accepted:
//! - prefixed metadata starting with the `meta` magic (what
//!   `state_getMetadata` returns)
//! - the same bytes wrapped in a SCALE `Vec<u8>` (what the
//!   `Metadata_metadata` runtime call returns)
//!
//! # Versions
//!
//! V14, V15 and V16 are supported. They differ in many places, but the
//! parts used here (type registry, pallet storage, pallet constants) have
//! the same shape, so each is flattened into [`DecodedMetadata`].

use codec::Decode;
use frame_metadata::{RuntimeMetadata, RuntimeMetadataPrefixed};
use scale_info::PortableRegistry;
use thiserror::Error;

use super::pallets::{ConstantItem, Pallet, StorageHasher, StorageItem, StorageKind, StorageModifier};

/// Magic prefix of encoded runtime metadata.
const MAGIC: &[u8; 4] = b"meta";

/// Errors from decoding metadata bytes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("failed to decode metadata: {0}")]
    Decode(String),

    #[error("unsupported metadata version V{0} (supported: V14, V15, V16)")]
    UnsupportedVersion(u32),
}

/// Version-independent metadata document.
#[derive(Debug, Clone)]
pub struct DecodedMetadata {
    /// Metadata version the bytes were encoded with.
    pub version: u32,
    /// Type registry.
    pub registry: PortableRegistry,
    /// Pallets in declaration order.
    pub pallets: Vec<Pallet>,
}

/// Flatten one version's pallets into [`Pallet`]s.
///
/// The storage types are re-exported between versions, but going through
/// each version's own paths keeps this independent of that.
macro_rules! unify_pallets {
    ($v:ident, $pallets:expr, |$p:ident| $docs:expr) => {{
        use frame_metadata::$v as m;

        $pallets
            .into_iter()
            .map(|p| {
                let storage = p
                    .storage
                    .as_ref()
                    .map(|s| {
                        s.entries
                            .iter()
                            .map(|e| {
                                let modifier = match e.modifier {
                                    m::StorageEntryModifier::Optional => StorageModifier::Optional,
                                    m::StorageEntryModifier::Default => StorageModifier::Default,
                                };
                                let (kind, key_type_id, value_type_id, hashers) = match &e.ty {
                                    m::StorageEntryType::Plain(ty) => {
                                        (StorageKind::Plain, None, ty.id, Vec::new())
                                    }
                                    m::StorageEntryType::Map {
                                        hashers,
                                        key,
                                        value,
                                    } => (
                                        StorageKind::Map,
                                        Some(key.id),
                                        value.id,
                                        hashers
                                            .iter()
                                            .map(|h| match h {
                                                m::StorageHasher::Blake2_128 => StorageHasher::Blake2_128,
                                                m::StorageHasher::Blake2_256 => StorageHasher::Blake2_256,
                                                m::StorageHasher::Blake2_128Concat => {
                                                    StorageHasher::Blake2_128Concat
                                                }
                                                m::StorageHasher::Twox128 => StorageHasher::Twox128,
                                                m::StorageHasher::Twox256 => StorageHasher::Twox256,
                                                m::StorageHasher::Twox64Concat => StorageHasher::Twox64Concat,
                                                m::StorageHasher::Identity => StorageHasher::Identity,
                                            })
                                            .collect(),
                                    ),
                                };
                                StorageItem {
                                    name: e.name.clone(),
                                    docs: e.docs.clone(),
                                    kind,
                                    key_type_id,
                                    value_type_id,
                                    modifier,
                                    hashers,
                                }
                            })
                            .collect()
                    })
                    .unwrap_or_default();

                let constants = p
                    .constants
                    .iter()
                    .map(|c| ConstantItem {
                        name: c.name.clone(),
                        docs: c.docs.clone(),
                        type_id: c.ty.id,
                        value: c.value.clone(),
                    })
                    .collect();

                Pallet {
                    name: p.name.clone(),
                    index: p.index,
                    storage,
                    constants,
                    docs: {
                        let $p = &p;
                        $docs
                    },
                }
            })
            .collect::<Vec<Pallet>>()
    }};
}

/// Decode metadata bytes.
///
/// # Errors
///
/// - `Decode` if the bytes are not encoded runtime metadata
/// - `UnsupportedVersion` for anything other than V14-V16
pub fn decode(bytes: &[u8]) -> Result<DecodedMetadata, DecodeError> {
    let prefixed = decode_prefixed(bytes)?;
    let metadata = prefixed.1;
    let version = metadata.version();

    let (registry, pallets) = match metadata {
        RuntimeMetadata::V14(m) => (m.types, unify_pallets!(v14, m.pallets, |_p| Vec::new())),
        RuntimeMetadata::V15(m) => (m.types, unify_pallets!(v15, m.pallets, |p| p.docs.clone())),
        RuntimeMetadata::V16(m) => (m.types, unify_pallets!(v16, m.pallets, |p| p.docs.clone())),
        _ => return Err(DecodeError::UnsupportedVersion(version)),
    };

    Ok(DecodedMetadata {
        version,
        registry,
        pallets,
    })
}

fn decode_prefixed(bytes: &[u8]) -> Result<RuntimeMetadataPrefixed, DecodeError> {
    let unwrapped;
    let raw = if bytes.starts_with(MAGIC) {
        bytes
    } else {
        unwrapped = Vec::<u8>::decode(&mut &bytes[..])
            .map_err(|e| DecodeError::Decode(e.to_string()))?;
        if !unwrapped.starts_with(MAGIC) {
            return Err(DecodeError::Decode("missing metadata magic prefix".into()));
        }
        &unwrapped[..]
    };

    let mut input = raw;
    let prefixed = RuntimeMetadataPrefixed::decode(&mut input)
        .map_err(|e| DecodeError::Decode(e.to_string()))?;
    if !input.is_empty() {
        return Err(DecodeError::Decode(format!(
            "{} trailing bytes after metadata",
            input.len()
        )));
    }
    Ok(prefixed)
}
