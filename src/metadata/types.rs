//! metadata::types
//!
//! Type Lookup Table: an arena of type descriptors indexed by type id.
//!
//! # Design
//!
//! The table is built once from the metadata's `scale-info` registry and is
//! read-only afterwards. Registry shapes that carry no display information
//! of their own (single-field tuple structs such as `Perbill(u32)`) are kept
//! as transparent aliases so they resolve to the descriptor of the wrapped
//! type.
//!
//! The graph may contain cycles (recursive types). [`TypeTable::resolve`]
//! only follows aliases, and bounds that walk; recursion through descriptor
//! children is the caller's concern (see [`super::describe`]).

use std::collections::HashMap;

use scale_info::{form::PortableForm, PortableRegistry, Type, TypeDef, TypeDefPrimitive};
use thiserror::Error;

/// Integer handle into the type graph of one metadata document.
pub type TypeId = u32;

/// Errors from type table lookups.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LookupError {
    /// No entry exists for the id.
    #[error("unknown type id {0}")]
    UnknownTypeId(TypeId),

    /// A chain of transparent aliases loops back on itself.
    #[error("type id {0} aliases itself")]
    AliasCycle(TypeId),
}

/// Structural descriptor of one type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDescriptor {
    /// Built-in scalar (`u32`, `bool`, `str`, ...).
    Primitive(String),
    /// SCALE compact integer; `is_big` when the inner integer is wider than 32 bits.
    Compact { is_big: bool },
    /// 32-byte account identifier.
    AccountId32,
    /// Bit vector.
    BitSequence,
    /// Variable-length sequence.
    Sequence(TypeId),
    /// Fixed-length array.
    Array { element: TypeId, len: u32 },
    /// Ordered tuple (the unit type is the empty tuple).
    Tuple(Vec<TypeId>),
    /// Named fields in declaration order.
    Struct(Vec<(String, TypeId)>),
    /// `Option<T>`.
    Option(TypeId),
    /// `Result<T, E>`.
    Result { ok: TypeId, err: TypeId },
    /// Variants in declaration order.
    Enum(Vec<EnumVariant>),
}

/// One variant of an enum descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumVariant {
    /// Variant name.
    pub name: String,
    /// Payload fields (name is `None` for tuple-like variants).
    pub fields: Vec<(Option<String>, TypeId)>,
}

impl EnumVariant {
    /// A variant without payload.
    pub fn unit(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }
}

/// A slot in the arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeEntry {
    /// A concrete descriptor.
    Descriptor(TypeDescriptor),
    /// Transparent wrapper that resolves to another id.
    Alias(TypeId),
}

/// Arena of type entries keyed by id.
///
/// Ids come straight from the encoded registry, so they are not assumed
/// to be dense.
#[derive(Debug, Clone, Default)]
pub struct TypeTable {
    entries: HashMap<TypeId, TypeEntry>,
}

impl TypeTable {
    /// Build a table from explicit entries.
    ///
    /// Later entries for the same id replace earlier ones.
    ///
    /// # Example
    ///
    /// ```
    /// use dotinspect::metadata::types::{TypeDescriptor, TypeEntry, TypeTable};
    ///
    /// let table = TypeTable::from_entries([
    ///     (0, TypeEntry::Descriptor(TypeDescriptor::Primitive("u8".into()))),
    ///     (1, TypeEntry::Descriptor(TypeDescriptor::Sequence(0))),
    /// ]);
    /// assert_eq!(table.resolve(1).unwrap(), &TypeDescriptor::Sequence(0));
    /// assert!(table.resolve(7).is_err());
    /// ```
    pub fn from_entries(entries: impl IntoIterator<Item = (TypeId, TypeEntry)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Build a table from descriptors only (no aliases).
    pub fn from_descriptors(
        descriptors: impl IntoIterator<Item = (TypeId, TypeDescriptor)>,
    ) -> Self {
        Self::from_entries(
            descriptors
                .into_iter()
                .map(|(id, d)| (id, TypeEntry::Descriptor(d))),
        )
    }

    /// Build a table from a `scale-info` portable registry.
    pub fn from_registry(registry: &PortableRegistry) -> Self {
        Self::from_entries(
            registry
                .types
                .iter()
                .map(|ty| (ty.id, convert_type(registry, &ty.ty))),
        )
    }

    /// Number of entries in the arena.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolve an id to its descriptor, following aliases.
    ///
    /// # Errors
    ///
    /// - `UnknownTypeId` if the id (or an alias target) has no entry
    /// - `AliasCycle` if aliases loop
    pub fn resolve(&self, id: TypeId) -> Result<&TypeDescriptor, LookupError> {
        let mut current = id;
        // Any chain longer than the arena must revisit an id.
        for _ in 0..=self.entries.len() {
            match self.entry(current)? {
                TypeEntry::Descriptor(descriptor) => return Ok(descriptor),
                TypeEntry::Alias(target) => current = *target,
            }
        }
        Err(LookupError::AliasCycle(id))
    }

    fn entry(&self, id: TypeId) -> Result<&TypeEntry, LookupError> {
        self.entries
            .get(&id)
            .ok_or(LookupError::UnknownTypeId(id))
    }
}

fn convert_type(registry: &PortableRegistry, ty: &Type<PortableForm>) -> TypeEntry {
    use TypeDescriptor as D;

    let descriptor = match &ty.type_def {
        TypeDef::Primitive(p) => D::Primitive(primitive_name(p).to_string()),
        TypeDef::Compact(c) => D::Compact {
            is_big: integer_bits(registry, c.type_param.id).map_or(true, |bits| bits > 32),
        },
        TypeDef::BitSequence(_) => D::BitSequence,
        TypeDef::Sequence(s) => D::Sequence(s.type_param.id),
        TypeDef::Array(a) => D::Array {
            element: a.type_param.id,
            len: a.len,
        },
        TypeDef::Tuple(t) => D::Tuple(t.fields.iter().map(|f| f.id).collect()),
        TypeDef::Composite(c) => {
            if ty.path.segments.last().map(String::as_str) == Some("AccountId32") {
                D::AccountId32
            } else if c.fields.iter().all(|f| f.name.is_none()) {
                match c.fields.as_slice() {
                    [single] => return TypeEntry::Alias(single.ty.id),
                    fields => D::Tuple(fields.iter().map(|f| f.ty.id).collect()),
                }
            } else {
                D::Struct(
                    c.fields
                        .iter()
                        .map(|f| (f.name.clone().unwrap_or_default(), f.ty.id))
                        .collect(),
                )
            }
        }
        TypeDef::Variant(v) => {
            let variants: Vec<EnumVariant> = v
                .variants
                .iter()
                .map(|variant| EnumVariant {
                    name: variant.name.clone(),
                    fields: variant
                        .fields
                        .iter()
                        .map(|f| (f.name.clone(), f.ty.id))
                        .collect(),
                })
                .collect();
            option_or_result(ty, &variants).unwrap_or(D::Enum(variants))
        }
    };

    TypeEntry::Descriptor(descriptor)
}

/// Recognize the std `Option`/`Result` shapes.
fn option_or_result(ty: &Type<PortableForm>, variants: &[EnumVariant]) -> Option<TypeDescriptor> {
    let single = |v: &EnumVariant| match v.fields.as_slice() {
        [(_, id)] => Some(*id),
        _ => None,
    };

    match (ty.path.segments.last().map(String::as_str), variants) {
        (Some("Option"), [none, some])
            if none.name == "None" && none.fields.is_empty() && some.name == "Some" =>
        {
            single(some).map(TypeDescriptor::Option)
        }
        (Some("Result"), [ok, err]) if ok.name == "Ok" && err.name == "Err" => {
            Some(TypeDescriptor::Result {
                ok: single(ok)?,
                err: single(err)?,
            })
        }
        _ => None,
    }
}

/// Bit width of the integer behind `id`, looking through newtype wrappers.
fn integer_bits(registry: &PortableRegistry, id: TypeId) -> Option<u32> {
    let mut current = id;
    for _ in 0..=registry.types.len() {
        let ty = registry.resolve(current)?;
        match &ty.type_def {
            TypeDef::Primitive(p) => return primitive_bits(p),
            TypeDef::Composite(c) if c.fields.len() == 1 => current = c.fields[0].ty.id,
            _ => return None,
        }
    }
    None
}

fn primitive_name(p: &TypeDefPrimitive) -> &'static str {
    match p {
        TypeDefPrimitive::Bool => "bool",
        TypeDefPrimitive::Char => "char",
        TypeDefPrimitive::Str => "str",
        TypeDefPrimitive::U8 => "u8",
        TypeDefPrimitive::U16 => "u16",
        TypeDefPrimitive::U32 => "u32",
        TypeDefPrimitive::U64 => "u64",
        TypeDefPrimitive::U128 => "u128",
        TypeDefPrimitive::U256 => "u256",
        TypeDefPrimitive::I8 => "i8",
        TypeDefPrimitive::I16 => "i16",
        TypeDefPrimitive::I32 => "i32",
        TypeDefPrimitive::I64 => "i64",
        TypeDefPrimitive::I128 => "i128",
        TypeDefPrimitive::I256 => "i256",
    }
}

fn primitive_bits(p: &TypeDefPrimitive) -> Option<u32> {
    match p {
        TypeDefPrimitive::U8 | TypeDefPrimitive::I8 => Some(8),
        TypeDefPrimitive::U16 | TypeDefPrimitive::I16 => Some(16),
        TypeDefPrimitive::U32 | TypeDefPrimitive::I32 => Some(32),
        TypeDefPrimitive::U64 | TypeDefPrimitive::I64 => Some(64),
        TypeDefPrimitive::U128 | TypeDefPrimitive::I128 => Some(128),
        TypeDefPrimitive::U256 | TypeDefPrimitive::I256 => Some(256),
        TypeDefPrimitive::Bool | TypeDefPrimitive::Char | TypeDefPrimitive::Str => None,
    }
}
