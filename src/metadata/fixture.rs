//! metadata::fixture
//!
//! A small but realistic runtime (System, Balances, Staking) built from
//! derived `scale-info` types. Used by unit tests, integration tests and
//! doc examples in place of a multi-megabyte snapshot of a live chain.
//!
//! The same pallets are available encoded as V14, V15 and V16. Only V15 and
//! V16 carry the pallet docs from [`pallet_docs`].
//!
//! | Pallet   | Index | Storage                                   | Constants                     |
//! |----------|-------|-------------------------------------------|-------------------------------|
//! | System   | 0     | Account (map), Number, ExecutionPhase     | BlockWeights, SS58Prefix      |
//! | Balances | 5     | TotalIssuance, Locks (map)                | ExistentialDeposit, MaxLocks  |
//! | Staking  | 7     | Bonded (map), Ledger (map), ActiveEra, LastOutcome | HistoryDepth         |

use std::collections::BTreeMap;

use codec::{Compact, Encode};
use frame_metadata::v14::{
    ExtrinsicMetadata, PalletConstantMetadata, PalletMetadata, PalletStorageMetadata,
    RuntimeMetadataV14, StorageEntryMetadata, StorageEntryModifier, StorageEntryType,
    StorageHasher,
};
use frame_metadata::{v15, v16, RuntimeMetadataPrefixed};
use scale_info::{meta_type, TypeInfo};

#[derive(TypeInfo)]
pub struct AccountId32(pub [u8; 32]);

#[derive(TypeInfo)]
pub struct AccountData {
    pub free: u128,
    pub reserved: u128,
    pub frozen: u128,
}

#[derive(TypeInfo)]
pub struct AccountInfo {
    pub nonce: u32,
    pub providers: u32,
    pub data: AccountData,
}

#[derive(TypeInfo)]
pub enum Phase {
    ApplyExtrinsic(u32),
    Finalization,
    Initialization,
}

#[derive(TypeInfo)]
pub struct BlockWeights {
    pub base_block: u64,
    pub max_block: u64,
}

#[derive(TypeInfo)]
pub enum Reasons {
    Fee,
    Misc,
    All,
    Transfer,
    Reserve,
}

#[derive(TypeInfo)]
pub struct BalanceLock {
    pub id: [u8; 8],
    pub amount: u128,
    pub reasons: Reasons,
}

#[derive(TypeInfo)]
pub struct StakingLedger {
    pub stash: AccountId32,
    pub total: Compact<u128>,
    pub active: Compact<u128>,
}

#[derive(TypeInfo)]
pub struct ActiveEraInfo {
    pub index: u32,
    pub start: Option<u64>,
}

/// Existential deposit declared by the Balances pallet.
pub const EXISTENTIAL_DEPOSIT: u128 = 10_000_000_000;

/// Pallet docs declared by the V15 and V16 documents.
pub fn pallet_docs(pallet: &str) -> Vec<&'static str> {
    match pallet {
        "System" => vec![" The System pallet provides low-level access to core types."],
        "Balances" => vec![
            " The Balances pallet handles fungible balances.",
            " It keeps track of free and reserved funds.",
        ],
        "Staking" => vec![" The Staking pallet is used to manage funds at stake."],
        _ => vec![],
    }
}

fn pallets() -> Vec<PalletMetadata> {
    vec![system(), balances(), staking()]
}

/// The fixture as a structured V14 document.
pub fn runtime_metadata() -> RuntimeMetadataPrefixed {
    let extrinsic = ExtrinsicMetadata {
        ty: meta_type::<()>(),
        version: 4,
        signed_extensions: vec![],
    };
    RuntimeMetadataV14::new(pallets(), extrinsic, meta_type::<()>()).into()
}

/// The fixture encoded exactly as `state_getMetadata` returns it.
pub fn encoded() -> Vec<u8> {
    runtime_metadata().encode()
}

/// The same pallets as a V15 document.
pub fn runtime_metadata_v15() -> RuntimeMetadataPrefixed {
    let pallets = pallets()
        .into_iter()
        .map(|p| v15::PalletMetadata {
            docs: pallet_docs(p.name),
            name: p.name,
            storage: p.storage,
            calls: None,
            event: None,
            constants: p.constants,
            error: None,
            index: p.index,
        })
        .collect();
    let extrinsic = v15::ExtrinsicMetadata {
        version: 4,
        address_ty: meta_type::<AccountId32>(),
        call_ty: meta_type::<()>(),
        signature_ty: meta_type::<()>(),
        extra_ty: meta_type::<()>(),
        signed_extensions: vec![],
    };
    v15::RuntimeMetadataV15::new(
        pallets,
        extrinsic,
        meta_type::<()>(),
        vec![],
        outer_enums(),
        v15::CustomMetadata {
            map: BTreeMap::new(),
        },
    )
    .into()
}

/// [`runtime_metadata_v15`], encoded.
pub fn encoded_v15() -> Vec<u8> {
    runtime_metadata_v15().encode()
}

/// The same pallets as a V16 document.
pub fn runtime_metadata_v16() -> RuntimeMetadataPrefixed {
    let pallets = pallets().into_iter().map(pallet_v16).collect();
    let extrinsic = v16::ExtrinsicMetadata {
        versions: vec![4, 5],
        address_ty: meta_type::<AccountId32>(),
        call_ty: meta_type::<()>(),
        signature_ty: meta_type::<()>(),
        transaction_extensions_by_version: BTreeMap::new(),
        transaction_extensions: vec![],
    };
    v16::RuntimeMetadataV16::new(
        pallets,
        extrinsic,
        vec![],
        outer_enums(),
        v16::CustomMetadata {
            map: BTreeMap::new(),
        },
    )
    .into()
}

/// [`runtime_metadata_v16`], encoded.
pub fn encoded_v16() -> Vec<u8> {
    runtime_metadata_v16().encode()
}

fn outer_enums() -> v15::OuterEnums {
    v15::OuterEnums {
        call_enum_ty: meta_type::<()>(),
        event_enum_ty: meta_type::<()>(),
        error_enum_ty: meta_type::<()>(),
    }
}

fn pallet_v16(p: PalletMetadata) -> v16::PalletMetadata {
    v16::PalletMetadata {
        docs: pallet_docs(p.name),
        name: p.name,
        storage: p.storage.map(|storage| v16::PalletStorageMetadata {
            prefix: storage.prefix,
            entries: storage
                .entries
                .into_iter()
                .map(|e| v16::StorageEntryMetadata {
                    name: e.name,
                    modifier: e.modifier,
                    ty: e.ty,
                    default: e.default,
                    docs: e.docs,
                    deprecation_info: v16::ItemDeprecationInfo::NotDeprecated,
                })
                .collect(),
        }),
        calls: None,
        event: None,
        constants: p
            .constants
            .into_iter()
            .map(|c| v16::PalletConstantMetadata {
                name: c.name,
                ty: c.ty,
                value: c.value,
                docs: c.docs,
                deprecation_info: v16::ItemDeprecationInfo::NotDeprecated,
            })
            .collect(),
        error: None,
        associated_types: vec![],
        view_functions: vec![],
        index: p.index,
        deprecation_info: v16::ItemDeprecationInfo::NotDeprecated,
    }
}

fn system() -> PalletMetadata {
    PalletMetadata {
        name: "System",
        storage: Some(PalletStorageMetadata {
            prefix: "System",
            entries: vec![
                map::<AccountId32, AccountInfo>(
                    "Account",
                    StorageHasher::Blake2_128Concat,
                    vec![" The full account information for a particular account ID."],
                ),
                plain::<u32>("Number", vec![" The current block number being processed."]),
                StorageEntryMetadata {
                    modifier: StorageEntryModifier::Optional,
                    ..plain::<Phase>("ExecutionPhase", vec![" The execution phase of the block."])
                },
            ],
        }),
        calls: None,
        event: None,
        constants: vec![
            constant::<BlockWeights>(
                "BlockWeights",
                (5_000_000u64, 2_000_000_000_000u64).encode(),
                vec![" Block & extrinsics weights: base values and limits."],
            ),
            constant::<u16>(
                "SS58Prefix",
                0u16.encode(),
                vec![" The designated SS58 prefix of this chain."],
            ),
        ],
        error: None,
        index: 0,
    }
}

fn balances() -> PalletMetadata {
    PalletMetadata {
        name: "Balances",
        storage: Some(PalletStorageMetadata {
            prefix: "Balances",
            entries: vec![
                plain::<u128>("TotalIssuance", vec![" The total units issued in the system."]),
                map::<AccountId32, Vec<BalanceLock>>(
                    "Locks",
                    StorageHasher::Twox64Concat,
                    vec![
                        " Any liquidity locks on some account balances.",
                        " NOTE: Should only be accessed when setting, changing and freeing a lock.",
                    ],
                ),
            ],
        }),
        calls: None,
        event: None,
        constants: vec![
            constant::<u128>(
                "ExistentialDeposit",
                EXISTENTIAL_DEPOSIT.encode(),
                vec![" The minimum amount required to keep an account open."],
            ),
            constant::<u32>(
                "MaxLocks",
                50u32.encode(),
                vec![" The maximum number of locks that should exist on an account."],
            ),
        ],
        error: None,
        index: 5,
    }
}

fn staking() -> PalletMetadata {
    PalletMetadata {
        name: "Staking",
        storage: Some(PalletStorageMetadata {
            prefix: "Staking",
            entries: vec![
                map::<AccountId32, AccountId32>(
                    "Bonded",
                    StorageHasher::Twox64Concat,
                    vec![" Map from all locked \"stash\" accounts to the controller account."],
                ),
                map::<AccountId32, StakingLedger>(
                    "Ledger",
                    StorageHasher::Blake2_128Concat,
                    vec![" Map from all (unlocked) \"controller\" accounts to the info regarding the staking."],
                ),
                StorageEntryMetadata {
                    modifier: StorageEntryModifier::Optional,
                    ..plain::<ActiveEraInfo>("ActiveEra", vec![" The active era information."])
                },
                plain::<Result<(), Phase>>("LastOutcome", vec![]),
            ],
        }),
        calls: None,
        event: None,
        constants: vec![constant::<u32>(
            "HistoryDepth",
            84u32.encode(),
            vec![" Number of eras to keep in history."],
        )],
        error: None,
        index: 7,
    }
}

fn plain<V: TypeInfo + 'static>(
    name: &'static str,
    docs: Vec<&'static str>,
) -> StorageEntryMetadata {
    StorageEntryMetadata {
        name,
        modifier: StorageEntryModifier::Default,
        ty: StorageEntryType::Plain(meta_type::<V>()),
        default: vec![],
        docs,
    }
}

fn map<K: TypeInfo + 'static, V: TypeInfo + 'static>(
    name: &'static str,
    hasher: StorageHasher,
    docs: Vec<&'static str>,
) -> StorageEntryMetadata {
    StorageEntryMetadata {
        name,
        modifier: StorageEntryModifier::Default,
        ty: StorageEntryType::Map {
            hashers: vec![hasher],
            key: meta_type::<K>(),
            value: meta_type::<V>(),
        },
        default: vec![],
        docs,
    }
}

fn constant<T: TypeInfo + 'static>(
    name: &'static str,
    value: Vec<u8>,
    docs: Vec<&'static str>,
) -> PalletConstantMetadata {
    PalletConstantMetadata {
        name,
        ty: meta_type::<T>(),
        value,
        docs,
    }
}

