//! metadata::pallets
//!
//! Pallet Index: a uniform per-pallet view of storage items and constants.
//!
//! # Ordering
//!
//! Pallets keep the order in which the metadata document declares them.
//! Storage items and constants keep their declaration order within a pallet.
//!
//! # Lookup
//!
//! All name lookups here are exact but case-insensitive. Near-miss
//! suggestions live in [`crate::resolve`].

use serde::Serialize;

use super::types::TypeId;

/// Whether a storage entry holds one value or a keyed collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    Plain,
    Map,
}

impl std::fmt::Display for StorageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageKind::Plain => write!(f, "plain"),
            StorageKind::Map => write!(f, "map"),
        }
    }
}

/// What a storage read returns when the key has no value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageModifier {
    /// `None` is returned for a missing value.
    Optional,
    /// The declared default is returned for a missing value.
    Default,
}

impl std::fmt::Display for StorageModifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageModifier::Optional => write!(f, "optional"),
            StorageModifier::Default => write!(f, "default"),
        }
    }
}

/// Hasher applied to one component of a map key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StorageHasher {
    Blake2_128,
    Blake2_256,
    Blake2_128Concat,
    Twox128,
    Twox256,
    Twox64Concat,
    Identity,
}

impl std::fmt::Display for StorageHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StorageHasher::Blake2_128 => "Blake2_128",
            StorageHasher::Blake2_256 => "Blake2_256",
            StorageHasher::Blake2_128Concat => "Blake2_128Concat",
            StorageHasher::Twox128 => "Twox128",
            StorageHasher::Twox256 => "Twox256",
            StorageHasher::Twox64Concat => "Twox64Concat",
            StorageHasher::Identity => "Identity",
        };
        f.write_str(name)
    }
}

/// A storage entry of a pallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorageItem {
    pub name: String,
    pub docs: Vec<String>,
    pub kind: StorageKind,
    /// Present iff `kind` is `Map`.
    pub key_type_id: Option<TypeId>,
    pub value_type_id: TypeId,
    pub modifier: StorageModifier,
    /// Empty for plain entries.
    pub hashers: Vec<StorageHasher>,
}

/// A constant exposed by a pallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstantItem {
    pub name: String,
    pub docs: Vec<String>,
    pub type_id: TypeId,
    /// SCALE-encoded value.
    #[serde(serialize_with = "serialize_hex")]
    pub value: Vec<u8>,
}

/// One pallet of the runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pallet {
    pub name: String,
    pub index: u8,
    pub docs: Vec<String>,
    pub storage: Vec<StorageItem>,
    pub constants: Vec<ConstantItem>,
}

impl Pallet {
    /// Find a storage item by name, ignoring case.
    pub fn find_storage(&self, name: &str) -> Option<&StorageItem> {
        self.storage
            .iter()
            .find(|s| same_name(&s.name, name))
    }

    /// Find a constant by name, ignoring case.
    pub fn find_constant(&self, name: &str) -> Option<&ConstantItem> {
        self.constants
            .iter()
            .find(|c| same_name(&c.name, name))
    }

    /// Storage item names in declaration order.
    pub fn storage_names(&self) -> Vec<&str> {
        self.storage.iter().map(|s| s.name.as_str()).collect()
    }

    /// Constant names in declaration order.
    pub fn constant_names(&self) -> Vec<&str> {
        self.constants.iter().map(|c| c.name.as_str()).collect()
    }
}

/// Ordered, immutable collection of pallets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PalletIndex {
    pallets: Vec<Pallet>,
}

impl PalletIndex {
    /// Build an index from pallets in document order.
    pub fn new(pallets: Vec<Pallet>) -> Self {
        Self { pallets }
    }

    /// All pallets in document order.
    pub fn list(&self) -> &[Pallet] {
        &self.pallets
    }

    /// Find a pallet by name, ignoring case.
    ///
    /// # Example
    ///
    /// ```
    /// use dotinspect::metadata::pallets::{Pallet, PalletIndex};
    ///
    /// let index = PalletIndex::new(vec![Pallet {
    ///     name: "Balances".into(),
    ///     index: 5,
    ///     docs: vec![],
    ///     storage: vec![],
    ///     constants: vec![],
    /// }]);
    /// assert_eq!(index.find("balances").map(|p| p.index), Some(5));
    /// assert!(index.find("Balance").is_none());
    /// ```
    pub fn find(&self, name: &str) -> Option<&Pallet> {
        self.pallets
            .iter()
            .find(|p| same_name(&p.name, name))
    }

    /// Pallet names in document order.
    pub fn names(&self) -> Vec<&str> {
        self.pallets.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.pallets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pallets.is_empty()
    }
}

/// Unicode case-insensitive name comparison, matching the suggestion pool.
fn same_name(declared: &str, requested: &str) -> bool {
    declared == requested || declared.to_lowercase() == requested.to_lowercase()
}

fn serialize_hex<S: serde::Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("0x{}", hex::encode(bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage(name: &str) -> StorageItem {
        StorageItem {
            name: name.into(),
            docs: vec![],
            kind: StorageKind::Plain,
            key_type_id: None,
            value_type_id: 0,
            modifier: StorageModifier::Default,
            hashers: vec![],
        }
    }

    fn pallet(name: &str, index: u8) -> Pallet {
        Pallet {
            name: name.into(),
            index,
            docs: vec![],
            storage: vec![storage("Account"), storage("Number")],
            constants: vec![ConstantItem {
                name: "SS58Prefix".into(),
                docs: vec![],
                type_id: 1,
                value: vec![0, 0],
            }],
        }
    }

    fn index() -> PalletIndex {
        // Deliberately not sorted by index or name.
        PalletIndex::new(vec![
            pallet("Timestamp", 3),
            pallet("System", 0),
            pallet("Balances", 5),
        ])
    }

    #[test]
    fn keeps_document_order() {
        assert_eq!(index().names(), vec!["Timestamp", "System", "Balances"]);
    }

    #[test]
    fn find_is_case_insensitive() {
        let index = index();
        let exact = index.find("Balances").unwrap();
        let lower = index.find("balances").unwrap();
        assert!(std::ptr::eq(exact, lower));
        assert!(index.find("BALANCES").is_some());
    }

    #[test]
    fn find_is_exact() {
        assert!(index().find("Balance").is_none());
        assert!(index().find("").is_none());
    }

    #[test]
    fn item_lookup_is_case_insensitive() {
        let p = pallet("System", 0);
        assert_eq!(p.find_storage("account").unwrap().name, "Account");
        assert_eq!(p.find_constant("ss58prefix").unwrap().name, "SS58Prefix");
        assert!(p.find_storage("SS58Prefix").is_none());
        assert_eq!(p.storage_names(), vec!["Account", "Number"]);
    }

    #[test]
    fn lookup_folds_non_ascii_case() {
        let index = PalletIndex::new(vec![pallet("Ärzte", 9)]);
        assert_eq!(index.find("ärzte").map(|p| p.index), Some(9));
        assert_eq!(index.find("ÄRZTE").map(|p| p.index), Some(9));

        let mut p = pallet("System", 0);
        p.storage.push(storage("Größe"));
        assert_eq!(p.find_storage("GRÖßE").unwrap().name, "Größe");
    }

    #[test]
    fn constant_value_serializes_as_hex() {
        let p = pallet("System", 0);
        let json = serde_json::to_value(&p.constants[0]).unwrap();
        assert_eq!(json["value"], "0x0000");
    }

    #[test]
    fn hasher_display() {
        assert_eq!(StorageHasher::Blake2_128Concat.to_string(), "Blake2_128Concat");
        assert_eq!(StorageModifier::Optional.to_string(), "optional");
        assert_eq!(StorageKind::Map.to_string(), "map");
    }
}
