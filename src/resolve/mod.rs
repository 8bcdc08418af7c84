//! resolve
//!
//! Target Resolver: maps user-typed names onto the pallet index.
//!
//! # Lookup
//!
//! Every lookup is case-insensitive and exact. Only a true miss produces a
//! [`ResolveError`], and its message already carries the ranked
//! suggestions from [`fuzzy::suggest_message`], so callers can surface it
//! verbatim.
//!
//! # Example
//!
//! ```
//! use dotinspect::metadata::{fixture, MetadataBundle};
//! use dotinspect::resolve::{parse_target, resolve_pallet, resolve_storage_item};
//!
//! let bundle = MetadataBundle::from_bytes(fixture::encoded()).unwrap();
//! let target = parse_target("system.account").unwrap();
//! let pallet = resolve_pallet(bundle.pallets(), &target.pallet).unwrap();
//! let item = resolve_storage_item(pallet, &target.item).unwrap();
//! assert_eq!(item.name, "Account");
//!
//! let err = resolve_pallet(bundle.pallets(), "Systme").unwrap_err();
//! assert_eq!(err.to_string(), "Unknown pallet \"Systme\". Did you mean: System?");
//! ```

pub mod fuzzy;

use thiserror::Error;

use crate::core::types::Target;
use crate::metadata::pallets::{ConstantItem, Pallet, PalletIndex, StorageItem};

/// Name-resolution failures. Each message is final and user-facing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("{0}")]
    InvalidTarget(String),

    #[error("{0}")]
    UnknownPallet(String),

    #[error("{0}")]
    UnknownStorageItem(String),

    #[error("{0}")]
    UnknownConstant(String),

    /// Neither a storage item nor a constant matched.
    #[error("{0}")]
    UnknownItem(String),
}

/// An item found by [`resolve_item`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedItem<'a> {
    Storage(&'a StorageItem),
    Constant(&'a ConstantItem),
}

/// Parse a `Pallet.Item` reference.
///
/// # Errors
///
/// Returns `ResolveError::InvalidTarget` unless the input has exactly two
/// non-empty dot-separated segments.
pub fn parse_target(input: &str) -> Result<Target, ResolveError> {
    Target::parse(input).map_err(|e| ResolveError::InvalidTarget(e.to_string()))
}

/// Find a pallet, suggesting near matches on a miss.
pub fn resolve_pallet<'a>(index: &'a PalletIndex, name: &str) -> Result<&'a Pallet, ResolveError> {
    index.find(name).ok_or_else(|| {
        ResolveError::UnknownPallet(fuzzy::suggest_message("pallet", name, &index.names()))
    })
}

/// Find a storage item within a pallet, suggesting near matches on a miss.
pub fn resolve_storage_item<'a>(
    pallet: &'a Pallet,
    name: &str,
) -> Result<&'a StorageItem, ResolveError> {
    pallet.find_storage(name).ok_or_else(|| {
        ResolveError::UnknownStorageItem(fuzzy::suggest_message(
            &format!("storage item in {}", pallet.name),
            name,
            &pallet.storage_names(),
        ))
    })
}

/// Find a constant within a pallet, suggesting near matches on a miss.
pub fn resolve_constant<'a>(
    pallet: &'a Pallet,
    name: &str,
) -> Result<&'a ConstantItem, ResolveError> {
    pallet.find_constant(name).ok_or_else(|| {
        ResolveError::UnknownConstant(fuzzy::suggest_message(
            &format!("constant in {}", pallet.name),
            name,
            &pallet.constant_names(),
        ))
    })
}

/// Find a storage item or, failing that, a constant.
///
/// Storage wins when both share a name. A miss suggests over storage and
/// constant names together.
pub fn resolve_item<'a>(pallet: &'a Pallet, name: &str) -> Result<ResolvedItem<'a>, ResolveError> {
    if let Some(storage) = pallet.find_storage(name) {
        return Ok(ResolvedItem::Storage(storage));
    }
    if let Some(constant) = pallet.find_constant(name) {
        return Ok(ResolvedItem::Constant(constant));
    }

    let mut candidates = pallet.storage_names();
    candidates.extend(pallet.constant_names());
    Err(ResolveError::UnknownItem(fuzzy::suggest_message(
        &format!("item in {}", pallet.name),
        name,
        &candidates,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{fixture, MetadataBundle};

    fn bundle() -> MetadataBundle {
        MetadataBundle::from_bytes(fixture::encoded()).unwrap()
    }

    #[test]
    fn parse_target_ok() {
        let target = parse_target("System.Account").unwrap();
        assert_eq!(target.pallet, "System");
        assert_eq!(target.item, "Account");
    }

    #[test]
    fn parse_target_invalid() {
        for input in ["System", "A.B.C", ""] {
            assert!(matches!(
                parse_target(input),
                Err(ResolveError::InvalidTarget(_))
            ));
        }
    }

    #[test]
    fn pallet_hit_ignores_case() {
        let bundle = bundle();
        assert_eq!(resolve_pallet(bundle.pallets(), "STAKING").unwrap().index, 7);
    }

    #[test]
    fn non_ascii_case_mismatch_resolves() {
        use crate::metadata::pallets::{Pallet, PalletIndex};

        let index = PalletIndex::new(vec![Pallet {
            name: "Ärzte".into(),
            index: 3,
            docs: vec![],
            storage: vec![],
            constants: vec![],
        }]);
        assert_eq!(resolve_pallet(&index, "ärzte").unwrap().name, "Ärzte");
    }

    #[test]
    fn pallet_miss_suggests() {
        let bundle = bundle();
        let err = resolve_pallet(bundle.pallets(), "Balance").unwrap_err();
        assert_eq!(
            err,
            ResolveError::UnknownPallet(
                "Unknown pallet \"Balance\". Did you mean: Balances?".into()
            )
        );
    }

    #[test]
    fn pallet_miss_without_suggestions() {
        let bundle = bundle();
        let err = resolve_pallet(bundle.pallets(), "Zzzzzzz").unwrap_err();
        assert_eq!(err.to_string(), "Unknown pallet \"Zzzzzzz\".");
    }

    #[test]
    fn storage_miss_names_pallet() {
        let bundle = bundle();
        let system = resolve_pallet(bundle.pallets(), "system").unwrap();
        let err = resolve_storage_item(system, "Acount").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unknown storage item in System \"Acount\". Did you mean: Account?"
        );
    }

    #[test]
    fn constants_are_not_storage() {
        let bundle = bundle();
        let balances = resolve_pallet(bundle.pallets(), "Balances").unwrap();
        assert!(matches!(
            resolve_storage_item(balances, "MaxLocks"),
            Err(ResolveError::UnknownStorageItem(_))
        ));
        assert_eq!(resolve_constant(balances, "maxlocks").unwrap().name, "MaxLocks");
    }

    #[test]
    fn constant_miss_names_pallet() {
        let bundle = bundle();
        let balances = resolve_pallet(bundle.pallets(), "Balances").unwrap();
        let err = resolve_constant(balances, "MaxLock").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unknown constant in Balances \"MaxLock\". Did you mean: MaxLocks?"
        );
    }

    #[test]
    fn item_prefers_storage_then_constant() {
        let bundle = bundle();
        let balances = resolve_pallet(bundle.pallets(), "Balances").unwrap();
        assert!(matches!(
            resolve_item(balances, "locks").unwrap(),
            ResolvedItem::Storage(s) if s.name == "Locks"
        ));
        assert!(matches!(
            resolve_item(balances, "ExistentialDeposit").unwrap(),
            ResolvedItem::Constant(c) if c.name == "ExistentialDeposit"
        ));
    }

    #[test]
    fn item_miss_searches_both_pools() {
        let bundle = bundle();
        let balances = resolve_pallet(bundle.pallets(), "Balances").unwrap();
        let err = resolve_item(balances, "MaxLock").unwrap_err();
        assert_eq!(
            err,
            ResolveError::UnknownItem(
                "Unknown item in Balances \"MaxLock\". Did you mean: MaxLocks?".into()
            )
        );
    }
}
