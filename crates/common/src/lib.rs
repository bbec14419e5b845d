//! Stateless helpers layered over sequences, mappings and date/times.
//!
//! Every function here is a leaf: it works only on its arguments, keeps no
//! state between calls and never spawns work.
//!
//! # Contents
//!
//! - **Left outer join** - [`left_join`] pairs each left element with every
//!   matching right element, keeping unmatched left elements
//! - **Null-safe chaining** - [`maybe`] / [`maybe_do`] short-circuit on `None`
//! - **Copy-avoiding lists** - [`as_list`] views contiguous storage in place
//!   and only collects sequences that need it
//! - **Kind-aware comparison** - [`compare_instants`] orders local and UTC
//!   readings by the moment they name
//! - **Lookups** - default-valued map access, value metadata tables, member
//!   names and display labels
//! - **Line reading** - [`read_all_lines`]
//!
//! # Design Principles
//!
//! - **Pure functions** - the line reader is the only one that performs I/O
//! - **No hidden allocation** - borrowed inputs stay borrowed where possible
//! - **Absence is not an error** - only invalid comparisons, read-only view
//!   mutation, unknown members, I/O and bad settings fail

pub mod datetime;
pub mod error;
pub mod join;
pub mod lines;
pub mod list;
pub mod lookup;
pub mod maybe;
pub mod member;
pub mod metadata;
pub mod settings;
pub mod zone;

// Re-export commonly used functions at crate root for convenience
pub use datetime::{compare_instants, compare_instants_in, Operand, TaggedInstant, ZoneKind};
pub use error::CommonError;
pub use join::{left_join, LeftJoin, LeftJoinExt};
pub use lines::read_all_lines;
pub use list::{as_list, AsList, IntoAsList, Materialize, MaterializeExt};
pub use lookup::{get_or, get_or_default, get_or_in, MapLookup};
pub use maybe::{maybe, maybe_do, maybe_or_default, MaybeExt};
pub use member::{display_name, member_name, MemberInfo, Members};
pub use metadata::{description_or_name, Description, EnumMetadata, MetadataTable};
pub use settings::CommonSettings;
pub use zone::{AmbiguousTimePolicy, FixedZone, SystemZone, TzZone, ZoneResolver};
