//! Descriptive metadata attached to a fixed set of symbolic values.
//!
//! Metadata lives in an explicit [`MetadataTable`] built once, typically in
//! a `static`, and is looked up by value identity.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// Lookup table from symbolic values to their metadata records.
///
/// # Examples
///
/// ```
/// use pasdecote_common::{description_or_name, Description, MetadataTable};
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum Plan { Free, Pro }
///
/// impl std::fmt::Display for Plan {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         write!(f, "{:?}", self)
///     }
/// }
///
/// let table = MetadataTable::new().with(Plan::Pro, Description("Paid plan"));
/// assert_eq!(description_or_name(&Plan::Pro, &table), "Paid plan");
/// assert_eq!(description_or_name(&Plan::Free, &table), "Free");
/// ```
#[derive(Debug, Clone)]
pub struct MetadataTable<V, M> {
    entries: HashMap<V, M>,
}

impl<V, M> Default for MetadataTable<V, M> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<V: Eq + Hash, M> MetadataTable<V, M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches `metadata` to `value`, replacing any earlier entry.
    pub fn with(mut self, value: V, metadata: M) -> Self {
        self.entries.insert(value, metadata);
        self
    }

    pub fn get(&self, value: &V) -> Option<&M> {
        self.entries.get(value)
    }

    /// Extracts an attribute from the value's metadata, or returns `default`
    /// when the value carries none.
    pub fn attribute<A>(&self, value: &V, getter: impl FnOnce(&M) -> A, default: A) -> A {
        match self.entries.get(value) {
            Some(metadata) => getter(metadata),
            None => default,
        }
    }

    /// Like [`Self::attribute`], with `A::default()` as the fallback.
    pub fn attribute_or_default<A: Default>(&self, value: &V, getter: impl FnOnce(&M) -> A) -> A {
        self.entries.get(value).map(getter).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V: Eq + Hash, M> FromIterator<(V, M)> for MetadataTable<V, M> {
    fn from_iter<I: IntoIterator<Item = (V, M)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Human-readable description of a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Description(pub &'static str);

impl Description {
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Returns the registered description of `value`, or its display text.
pub fn description_or_name<V>(value: &V, table: &MetadataTable<V, Description>) -> String
where
    V: Eq + Hash + fmt::Display,
{
    match table.get(value) {
        Some(description) => description.0.to_string(),
        None => value.to_string(),
    }
}

/// Enumerations that carry their own metadata table.
pub trait EnumMetadata: Eq + Hash + Sized + 'static {
    type Metadata: 'static;

    fn metadata_table() -> &'static MetadataTable<Self, Self::Metadata>;

    fn metadata(&self) -> Option<&'static Self::Metadata> {
        Self::metadata_table().get(self)
    }

    /// See [`MetadataTable::attribute`].
    fn enum_attribute<A>(&self, getter: impl FnOnce(&Self::Metadata) -> A, default: A) -> A {
        Self::metadata_table().attribute(self, getter, default)
    }
}
