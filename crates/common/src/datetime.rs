//! Date/time values tagged with how their wall-clock reading is meant.
//!
//! A [`TaggedInstant`] pairs a wall-clock reading with a [`ZoneKind`].
//! Comparing two instants is only meaningful once both readings are in the
//! same frame, so [`compare_instants`] converts the second operand into the
//! first operand's kind and refuses `Unspecified` readings outright.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CommonError;
use crate::zone::{SystemZone, ZoneResolver};

/// How a wall-clock reading should be interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ZoneKind {
    /// No zone information; rejected by the kind-aware comparator
    #[default]
    Unspecified,
    /// Reading in the local zone
    Local,
    /// Reading in UTC
    Utc,
}

impl ZoneKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            ZoneKind::Unspecified => "unspecified",
            ZoneKind::Local => "local",
            ZoneKind::Utc => "utc",
        }
    }
}

impl fmt::Display for ZoneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for ZoneKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "unspecified" => Ok(ZoneKind::Unspecified),
            "local" => Ok(ZoneKind::Local),
            "utc" | "universal" => Ok(ZoneKind::Utc),
            _ => Err(format!("Unknown zone kind: {}", s)),
        }
    }
}

/// Names an argument of [`compare_instants`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    First,
    Second,
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::First => write!(f, "first"),
            Operand::Second => write!(f, "second"),
        }
    }
}

/// A wall-clock reading tagged with its [`ZoneKind`].
///
/// Equality is structural: the same instant read in two kinds is not `==`.
/// There is deliberately no `PartialOrd`; use [`compare_instants`] to order
/// instants by the moment they name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaggedInstant {
    value: NaiveDateTime,
    kind: ZoneKind,
}

impl TaggedInstant {
    pub fn new(value: NaiveDateTime, kind: ZoneKind) -> Self {
        Self { value, kind }
    }

    pub fn utc(value: NaiveDateTime) -> Self {
        Self::new(value, ZoneKind::Utc)
    }

    pub fn local(value: NaiveDateTime) -> Self {
        Self::new(value, ZoneKind::Local)
    }

    pub fn unspecified(value: NaiveDateTime) -> Self {
        Self::new(value, ZoneKind::Unspecified)
    }

    /// The wall-clock reading, interpreted according to [`Self::kind`]
    pub fn value(&self) -> NaiveDateTime {
        self.value
    }

    pub fn kind(&self) -> ZoneKind {
        self.kind
    }

    pub fn is_unspecified(&self) -> bool {
        self.kind == ZoneKind::Unspecified
    }

    /// Re-tags the same reading with another kind, without converting it.
    pub fn specify_kind(self, kind: ZoneKind) -> Self {
        Self::new(self.value, kind)
    }

    /// The moment this instant names, or `None` for an unspecified reading.
    pub fn to_utc<Z>(&self, zone: &Z) -> Option<DateTime<Utc>>
    where
        Z: ZoneResolver + ?Sized,
    {
        let utc = match self.kind {
            ZoneKind::Unspecified => return None,
            ZoneKind::Local => zone.to_utc(self.value),
            ZoneKind::Utc => self.value,
        };
        Some(utc.and_utc())
    }

    /// Kind-aware comparison against the host's local zone.
    ///
    /// See [`compare_instants`].
    pub fn compare(&self, other: &Self) -> Result<Ordering, CommonError> {
        compare_instants(*self, *other)
    }
}

impl From<DateTime<Utc>> for TaggedInstant {
    fn from(value: DateTime<Utc>) -> Self {
        Self::utc(value.naive_utc())
    }
}

impl From<DateTime<Local>> for TaggedInstant {
    fn from(value: DateTime<Local>) -> Self {
        Self::local(value.naive_local())
    }
}

/// A fixed-offset date/time carries its own offset, so it is stored as UTC.
impl From<DateTime<FixedOffset>> for TaggedInstant {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Self::utc(value.naive_utc())
    }
}

/// Compares two instants by the moment they name, using the host's zone.
///
/// Swapping the operands reverses the result under a [`FixedZone`]. Under
/// the host zone that can fail for readings inside a DST fall-back hour:
/// both UTC occurrences map to the same local reading, while a local reading
/// maps back to only one of them, chosen by [`AmbiguousTimePolicy`].
///
/// [`FixedZone`]: crate::zone::FixedZone
/// [`AmbiguousTimePolicy`]: crate::zone::AmbiguousTimePolicy
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use chrono::{Local, TimeZone, Utc};
/// use pasdecote_common::{compare_instants, TaggedInstant};
///
/// let noon = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
/// let same_moment_locally = noon.with_timezone(&Local);
///
/// let ordering = compare_instants(noon.into(), same_moment_locally.into()).unwrap();
/// assert_eq!(ordering, Ordering::Equal);
/// ```
///
/// # Errors
///
/// Returns [`CommonError::InvalidComparison`] when either operand is
/// [`ZoneKind::Unspecified`].
pub fn compare_instants(
    first: TaggedInstant,
    second: TaggedInstant,
) -> Result<Ordering, CommonError> {
    compare_instants_in(first, second, &SystemZone::new())
}

/// Compares two instants by the moment they name.
///
/// The first operand is the reference frame: when kinds differ, the second
/// operand is converted into the first operand's kind through `zone` and the
/// readings are then compared directly. The first operand is never
/// converted.
///
/// Readings at the ends of the [`NaiveDateTime`] range saturate when
/// converted, so they may compare equal to a reading of the other kind.
///
/// # Errors
///
/// Returns [`CommonError::InvalidComparison`] naming the first operand that
/// is [`ZoneKind::Unspecified`]; `first` is checked before `second`.
pub fn compare_instants_in<Z>(
    first: TaggedInstant,
    second: TaggedInstant,
    zone: &Z,
) -> Result<Ordering, CommonError>
where
    Z: ZoneResolver + ?Sized,
{
    if first.is_unspecified() {
        return Err(CommonError::invalid_comparison(Operand::First));
    }
    if second.is_unspecified() {
        return Err(CommonError::invalid_comparison(Operand::Second));
    }

    let second_value = match (first.kind, second.kind) {
        (ZoneKind::Local, ZoneKind::Utc) => zone.to_local(second.value),
        (ZoneKind::Utc, ZoneKind::Local) => zone.to_utc(second.value),
        _ => second.value,
    };

    if first.kind != second.kind {
        tracing::trace!(
            from = %second.kind,
            to = %first.kind,
            original = %second.value,
            converted = %second_value,
            "Converted second operand for comparison"
        );
    }

    Ok(first.value.cmp(&second_value))
}
