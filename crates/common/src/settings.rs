//! Settings for the zone conversion used by the instant comparator
//!
//! Hosts can embed [`CommonSettings`] in their own serialized configuration
//! or read it from the environment:
//!
//! - `PASDECOTE_LOCAL_OFFSET` - fixed local offset such as `+03:00`; when
//!   unset, the host's timezone is used
//! - `PASDECOTE_AMBIGUOUS_TIME` - `earliest` (default) or `latest`

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use crate::error::CommonError;
use crate::zone::{AmbiguousTimePolicy, FixedZone, SystemZone, ZoneResolver};

pub const LOCAL_OFFSET_ENV: &str = "PASDECOTE_LOCAL_OFFSET";
pub const AMBIGUOUS_TIME_ENV: &str = "PASDECOTE_AMBIGUOUS_TIME";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CommonSettings {
    /// Seconds east of UTC to treat as local time instead of the host zone
    #[serde(default)]
    pub local_offset_seconds: Option<i32>,
    #[serde(default)]
    pub ambiguous_time: AmbiguousTimePolicy,
}

impl CommonSettings {
    /// Reads settings from process environment variables.
    pub fn from_env() -> Result<Self, CommonError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, treating `None` as unset.
    ///
    /// # Errors
    ///
    /// Returns [`CommonError::InvalidSetting`] for a value that does not parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CommonError> {
        let local_offset_seconds = match lookup(LOCAL_OFFSET_ENV) {
            Some(raw) => Some(parse_offset(&raw)?.local_minus_utc()),
            None => None,
        };

        let ambiguous_time = match lookup(AMBIGUOUS_TIME_ENV) {
            Some(raw) => raw
                .parse()
                .map_err(|_| CommonError::invalid_setting(AMBIGUOUS_TIME_ENV, raw.as_str()))?,
            None => AmbiguousTimePolicy::default(),
        };

        let settings = Self {
            local_offset_seconds,
            ambiguous_time,
        };
        tracing::debug!(?settings, "Loaded common settings");
        Ok(settings)
    }

    /// The configured fixed offset, if any and in range
    pub fn local_offset(&self) -> Option<FixedOffset> {
        let seconds = self.local_offset_seconds?;
        let offset = FixedOffset::east_opt(seconds);
        if offset.is_none() {
            tracing::warn!(
                seconds,
                "Local offset out of range, falling back to host timezone"
            );
        }
        offset
    }

    /// Builds the zone resolver these settings describe.
    pub fn zone_resolver(&self) -> Box<dyn ZoneResolver> {
        match self.local_offset() {
            Some(offset) => Box::new(FixedZone::new(offset)),
            None => Box::new(SystemZone::with_policy(self.ambiguous_time)),
        }
    }
}

fn parse_offset(raw: &str) -> Result<FixedOffset, CommonError> {
    raw.trim()
        .parse::<FixedOffset>()
        .map_err(|_| CommonError::invalid_setting(LOCAL_OFFSET_ENV, raw))
}
