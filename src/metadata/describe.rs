//! metadata::describe
//!
//! Renders type descriptors as compact, human-readable strings.
//!
//! # Rendering
//!
//! | Descriptor            | Output                         |
//! |-----------------------|--------------------------------|
//! | `Primitive(u32)`      | `u32`                          |
//! | `Compact`             | `Compact<u64>` / `Compact<u128>` |
//! | `Sequence(e)`         | `Vec<e>`                       |
//! | `Array(e, n)`         | `[e; n]`                       |
//! | `Tuple(a, b)`         | `(a, b)`                       |
//! | `Struct`              | `{ a: A, b: B }`               |
//! | `Option(e)`           | `Option<e>`                    |
//! | `Result(o, e)`        | `Result<o, e>`                 |
//! | `Enum` (≤ 4 variants) | `A \| B \| C`                  |
//! | `Enum` (> 4 variants) | `enum(N variants)`             |
//!
//! Describing never fails: if anything goes wrong the whole result becomes
//! `type(<id>)`. A type that refers back to itself renders the inner
//! occurrence as `type(<id>)` too, so cyclic graphs terminate.

use std::collections::HashSet;

use super::types::{LookupError, TypeDescriptor, TypeId, TypeTable};

/// Enums with more variants than this are summarized by count.
const MAX_LISTED_VARIANTS: usize = 4;

/// Describe a type id.
///
/// # Example
///
/// ```
/// use dotinspect::metadata::describe::describe;
/// use dotinspect::metadata::types::{TypeDescriptor, TypeTable};
///
/// let table = TypeTable::from_descriptors([
///     (0, TypeDescriptor::Primitive("u8".into())),
///     (1, TypeDescriptor::Array { element: 0, len: 32 }),
/// ]);
/// assert_eq!(describe(&table, 1), "[u8; 32]");
/// assert_eq!(describe(&table, 9), "type(9)");
/// ```
pub fn describe(table: &TypeTable, id: TypeId) -> String {
    Describer::new(table)
        .render(id)
        .unwrap_or_else(|_| placeholder(id))
}

fn placeholder(id: TypeId) -> String {
    format!("type({})", id)
}

struct Describer<'a> {
    table: &'a TypeTable,
    in_progress: HashSet<TypeId>,
}

impl<'a> Describer<'a> {
    fn new(table: &'a TypeTable) -> Self {
        Self {
            table,
            in_progress: HashSet::new(),
        }
    }

    fn render(&mut self, id: TypeId) -> Result<String, LookupError> {
        if !self.in_progress.insert(id) {
            return Ok(placeholder(id));
        }
        let descriptor = self.table.resolve(id);
        let rendered = descriptor.and_then(|d| self.render_descriptor(d));
        self.in_progress.remove(&id);
        rendered
    }

    fn render_descriptor(&mut self, descriptor: &TypeDescriptor) -> Result<String, LookupError> {
        Ok(match descriptor {
            TypeDescriptor::Primitive(name) => name.clone(),
            TypeDescriptor::Compact { is_big: true } => "Compact<u128>".to_string(),
            TypeDescriptor::Compact { is_big: false } => "Compact<u64>".to_string(),
            TypeDescriptor::AccountId32 => "AccountId32".to_string(),
            TypeDescriptor::BitSequence => "BitSequence".to_string(),
            TypeDescriptor::Sequence(element) => format!("Vec<{}>", self.render(*element)?),
            TypeDescriptor::Array { element, len } => {
                format!("[{}; {}]", self.render(*element)?, len)
            }
            TypeDescriptor::Tuple(elements) => format!("({})", self.render_all(elements)?),
            TypeDescriptor::Struct(fields) => {
                let parts = fields
                    .iter()
                    .map(|(name, id)| Ok(format!("{}: {}", name, self.render(*id)?)))
                    .collect::<Result<Vec<_>, LookupError>>()?;
                format!("{{ {} }}", parts.join(", "))
            }
            TypeDescriptor::Option(inner) => format!("Option<{}>", self.render(*inner)?),
            TypeDescriptor::Result { ok, err } => {
                format!("Result<{}, {}>", self.render(*ok)?, self.render(*err)?)
            }
            TypeDescriptor::Enum(variants) if variants.len() <= MAX_LISTED_VARIANTS => variants
                .iter()
                .map(|v| v.name.as_str())
                .collect::<Vec<_>>()
                .join(" | "),
            TypeDescriptor::Enum(variants) => format!("enum({} variants)", variants.len()),
        })
    }

    fn render_all(&mut self, ids: &[TypeId]) -> Result<String, LookupError> {
        let parts = ids
            .iter()
            .map(|id| self.render(*id))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(parts.join(", "))
    }
}
