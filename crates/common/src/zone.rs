//! Conversion between local and universal wall-clock readings.
//!
//! A local reading does not always name exactly one instant. Around a DST
//! fall-back a reading occurs twice and [`AmbiguousTimePolicy`] picks one.
//! Inside a spring-forward gap a reading never occurs; it is resolved with
//! the offset in effect at the instant the reading names when read as UTC.
//! Conversions that would leave the range of [`NaiveDateTime`] saturate at
//! its ends instead of failing.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, FixedOffset, Local, LocalResult, NaiveDateTime, Offset, TimeZone};
use serde::{Deserialize, Serialize};

/// Converts wall-clock readings between the local zone and UTC.
pub trait ZoneResolver: Send + Sync {
    /// Universal reading for a local wall-clock reading
    fn to_utc(&self, local: NaiveDateTime) -> NaiveDateTime;

    /// Local wall-clock reading for a universal reading
    fn to_local(&self, utc: NaiveDateTime) -> NaiveDateTime;
}

/// Which occurrence wins when a local reading happens twice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AmbiguousTimePolicy {
    /// The first occurrence, before clocks were turned back
    #[default]
    Earliest,
    /// The second occurrence, after clocks were turned back
    Latest,
}

impl fmt::Display for AmbiguousTimePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmbiguousTimePolicy::Earliest => write!(f, "earliest"),
            AmbiguousTimePolicy::Latest => write!(f, "latest"),
        }
    }
}

impl FromStr for AmbiguousTimePolicy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "earliest" | "first" => Ok(AmbiguousTimePolicy::Earliest),
            "latest" | "last" => Ok(AmbiguousTimePolicy::Latest),
            _ => Err(()),
        }
    }
}

/// Moves `reading` by `seconds`, clamping at the ends of the representable range.
fn shift(reading: NaiveDateTime, seconds: i32) -> NaiveDateTime {
    reading
        .checked_add_signed(Duration::seconds(i64::from(seconds)))
        .unwrap_or(if seconds < 0 {
            NaiveDateTime::MIN
        } else {
            NaiveDateTime::MAX
        })
}

/// Resolves a local reading in `tz` to a universal reading.
fn resolve_local<Tz: TimeZone>(
    tz: &Tz,
    local: NaiveDateTime,
    policy: AmbiguousTimePolicy,
) -> NaiveDateTime {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => dt.naive_utc(),
        LocalResult::Ambiguous(earliest, latest) => {
            tracing::debug!(%local, %policy, "Resolving ambiguous local time");
            match policy {
                AmbiguousTimePolicy::Earliest => earliest.naive_utc(),
                AmbiguousTimePolicy::Latest => latest.naive_utc(),
            }
        }
        // Also reached when the offset pushes the reading out of range
        LocalResult::None => {
            let offset = tz.offset_from_utc_datetime(&local).fix();
            tracing::debug!(%local, %offset, "Resolving nonexistent local time");
            shift(local, -offset.local_minus_utc())
        }
    }
}

fn utc_to_local<Tz: TimeZone>(tz: &Tz, utc: NaiveDateTime) -> NaiveDateTime {
    shift(utc, tz.offset_from_utc_datetime(&utc).fix().local_minus_utc())
}

/// Any chrono [`TimeZone`] used as a resolver.
///
/// Readings whose conversion would leave the range of [`NaiveDateTime`] are
/// clamped to [`NaiveDateTime::MIN`] or [`NaiveDateTime::MAX`].
#[derive(Debug, Clone, Copy)]
pub struct TzZone<Tz> {
    tz: Tz,
    ambiguous: AmbiguousTimePolicy,
}

impl<Tz: TimeZone> TzZone<Tz> {
    pub fn new(tz: Tz) -> Self {
        Self::with_policy(tz, AmbiguousTimePolicy::default())
    }

    pub fn with_policy(tz: Tz, ambiguous: AmbiguousTimePolicy) -> Self {
        Self { tz, ambiguous }
    }

    pub fn policy(&self) -> AmbiguousTimePolicy {
        self.ambiguous
    }
}

impl<Tz> ZoneResolver for TzZone<Tz>
where
    Tz: TimeZone + Send + Sync,
{
    fn to_utc(&self, local: NaiveDateTime) -> NaiveDateTime {
        resolve_local(&self.tz, local, self.ambiguous)
    }

    fn to_local(&self, utc: NaiveDateTime) -> NaiveDateTime {
        utc_to_local(&self.tz, utc)
    }
}

/// The host's local timezone.
#[derive(Debug, Clone, Copy)]
pub struct SystemZone(TzZone<Local>);

impl Default for SystemZone {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemZone {
    pub fn new() -> Self {
        Self::with_policy(AmbiguousTimePolicy::default())
    }

    pub fn with_policy(ambiguous: AmbiguousTimePolicy) -> Self {
        Self(TzZone::with_policy(Local, ambiguous))
    }

    pub fn policy(&self) -> AmbiguousTimePolicy {
        self.0.policy()
    }
}

impl ZoneResolver for SystemZone {
    fn to_utc(&self, local: NaiveDateTime) -> NaiveDateTime {
        self.0.to_utc(local)
    }

    fn to_local(&self, utc: NaiveDateTime) -> NaiveDateTime {
        self.0.to_local(utc)
    }
}

/// A zone with a constant offset from UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedZone(pub FixedOffset);

impl FixedZone {
    pub fn new(offset: FixedOffset) -> Self {
        Self(offset)
    }

    /// Offset of `hours` east of UTC, or `None` when out of range
    pub fn hours_east(hours: i32) -> Option<Self> {
        FixedOffset::east_opt(hours.checked_mul(3600)?).map(Self)
    }
}

impl ZoneResolver for FixedZone {
    fn to_utc(&self, local: NaiveDateTime) -> NaiveDateTime {
        resolve_local(&self.0, local, AmbiguousTimePolicy::Earliest)
    }

    fn to_local(&self, utc: NaiveDateTime) -> NaiveDateTime {
        utc_to_local(&self.0, utc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    /// Central-European-style zone: +01:00, with +02:00 between the spring
    /// and autumn transitions of 2024 (both at 01:00 UTC).
    #[derive(Debug, Clone, Copy)]
    struct SummerTimeZone;

    impl SummerTimeZone {
        fn standard() -> FixedOffset {
            FixedOffset::east_opt(3600).unwrap()
        }

        fn summer() -> FixedOffset {
            FixedOffset::east_opt(7200).unwrap()
        }

        fn transitions() -> (NaiveDateTime, NaiveDateTime) {
            (utc_at(3, 31, 1, 0), utc_at(10, 27, 1, 0))
        }
    }

    impl TimeZone for SummerTimeZone {
        type Offset = FixedOffset;

        fn from_offset(_offset: &FixedOffset) -> Self {
            SummerTimeZone
        }

        fn offset_from_local_date(&self, local: &NaiveDate) -> LocalResult<FixedOffset> {
            self.offset_from_local_datetime(&local.and_time(NaiveTime::MIN))
        }

        fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
            let fits = |offset: FixedOffset| {
                local
                    .checked_sub_offset(offset)
                    .is_some_and(|utc| self.offset_from_utc_datetime(&utc) == offset)
            };
            match (fits(Self::summer()), fits(Self::standard())) {
                (true, true) => LocalResult::Ambiguous(Self::summer(), Self::standard()),
                (true, false) => LocalResult::Single(Self::summer()),
                (false, true) => LocalResult::Single(Self::standard()),
                (false, false) => LocalResult::None,
            }
        }

        fn offset_from_utc_date(&self, utc: &NaiveDate) -> FixedOffset {
            self.offset_from_utc_datetime(&utc.and_time(NaiveTime::MIN))
        }

        fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> FixedOffset {
            let (spring, autumn) = Self::transitions();
            if (spring..autumn).contains(utc) {
                Self::summer()
            } else {
                Self::standard()
            }
        }
    }

    fn utc_at(month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, month, day)
            .and_then(|d| d.and_hms_opt(hour, minute, 0))
            .unwrap()
    }

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 10)
            .and_then(|d| d.and_hms_opt(hour, minute, 0))
            .unwrap()
    }

    #[test]
    fn test_fixed_zone_round_trip() {
        let zone = FixedZone::hours_east(3).unwrap();
        assert_eq!(zone.to_utc(at(12, 0)), at(9, 0));
        assert_eq!(zone.to_local(at(9, 0)), at(12, 0));
    }

    #[test]
    fn test_fixed_zone_west_of_utc() {
        let zone = FixedZone::hours_east(-5).unwrap();
        assert_eq!(zone.to_utc(at(7, 30)), at(12, 30));
    }

    #[test]
    fn test_fixed_zone_out_of_range() {
        assert!(FixedZone::hours_east(24).is_none());
        assert!(FixedZone::hours_east(i32::MAX).is_none());
    }

    #[test]
    fn test_repeated_local_reading_follows_policy() {
        // 02:30 on the autumn transition day happens at 00:30 and 01:30 UTC
        let local = utc_at(10, 27, 2, 30);

        let earliest = TzZone::new(SummerTimeZone);
        assert_eq!(earliest.to_utc(local), utc_at(10, 27, 0, 30));

        let latest = TzZone::with_policy(SummerTimeZone, AmbiguousTimePolicy::Latest);
        assert_eq!(latest.to_utc(local), utc_at(10, 27, 1, 30));
    }

    #[test]
    fn test_skipped_local_reading_uses_offset_at_reading_as_utc() {
        // Clocks jump from 02:00 to 03:00, so 02:30 never happens locally.
        // Read as UTC, 02:30 falls in summer time (+02:00).
        let zone = TzZone::new(SummerTimeZone);
        assert_eq!(zone.to_utc(utc_at(3, 31, 2, 30)), utc_at(3, 31, 0, 30));
    }

    #[test]
    fn test_unambiguous_local_reading_ignores_policy() {
        let local = utc_at(7, 1, 12, 0);
        for policy in [AmbiguousTimePolicy::Earliest, AmbiguousTimePolicy::Latest] {
            let zone = TzZone::with_policy(SummerTimeZone, policy);
            assert_eq!(zone.to_utc(local), utc_at(7, 1, 10, 0));
        }
        let winter = TzZone::new(SummerTimeZone).to_utc(utc_at(1, 5, 9, 0));
        assert_eq!(winter, utc_at(1, 5, 8, 0));
    }

    #[test]
    fn test_repeated_hour_maps_back_to_one_local_reading() {
        let zone = TzZone::new(SummerTimeZone);
        assert_eq!(zone.to_local(utc_at(10, 27, 0, 30)), utc_at(10, 27, 2, 30));
        assert_eq!(zone.to_local(utc_at(10, 27, 1, 30)), utc_at(10, 27, 2, 30));
    }

    #[test]
    fn test_system_zone_policy() {
        assert_eq!(SystemZone::new().policy(), AmbiguousTimePolicy::Earliest);
        assert_eq!(SystemZone::default().policy(), AmbiguousTimePolicy::Earliest);
        assert_eq!(
            SystemZone::with_policy(AmbiguousTimePolicy::Latest).policy(),
            AmbiguousTimePolicy::Latest
        );
    }

    #[test]
    fn test_conversion_saturates_at_range_ends() {
        let east = FixedZone::hours_east(2).unwrap();
        assert_eq!(east.to_utc(NaiveDateTime::MIN), NaiveDateTime::MIN);
        assert_eq!(east.to_local(NaiveDateTime::MAX), NaiveDateTime::MAX);
        assert_eq!(
            east.to_utc(NaiveDateTime::MAX),
            NaiveDateTime::MAX - Duration::hours(2)
        );

        let west = FixedZone::hours_east(-2).unwrap();
        assert_eq!(west.to_utc(NaiveDateTime::MAX), NaiveDateTime::MAX);
        assert_eq!(west.to_local(NaiveDateTime::MIN), NaiveDateTime::MIN);
    }

    #[test]
    fn test_system_zone_round_trip_outside_transitions() {
        let zone = SystemZone::new();
        let utc = NaiveDate::from_ymd_opt(2024, 1, 15)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .unwrap();
        assert_eq!(zone.to_utc(zone.to_local(utc)), utc);
    }

    #[test]
    fn test_ambiguous_policy_from_str() {
        assert_eq!(
            "earliest".parse::<AmbiguousTimePolicy>(),
            Ok(AmbiguousTimePolicy::Earliest)
        );
        assert_eq!(
            " LATEST ".parse::<AmbiguousTimePolicy>(),
            Ok(AmbiguousTimePolicy::Latest)
        );
        assert_eq!("middle".parse::<AmbiguousTimePolicy>(), Err(()));
    }

    #[test]
    fn test_ambiguous_policy_serde() {
        let json = serde_json::to_string(&AmbiguousTimePolicy::Latest).unwrap();
        assert_eq!(json, "\"latest\"");
    }
}
