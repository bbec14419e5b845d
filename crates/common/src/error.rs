//! Unified error type for the common helpers
//!
//! Absence of a value is never reported through this type; the `maybe`
//! combinators and the default-valued lookups handle it as ordinary input.

use thiserror::Error;

use crate::datetime::Operand;

/// Unified error type for common helper operations
#[derive(Debug, Error)]
pub enum CommonError {
    /// An instant tagged `Unspecified` was passed to the kind-aware comparator
    #[error("Invalid comparison: {operand} operand has unspecified zone kind")]
    InvalidComparison { operand: Operand },

    /// Mutation attempted through a zero-copy list view
    #[error("List is a read-only view over borrowed storage")]
    ReadOnlyView,

    /// Member name is not declared on the type
    #[error("Unknown member: {type_name} has no member named '{member}'")]
    UnknownMember {
        type_name: &'static str,
        member: String,
    },

    /// Reading from a text source failed
    #[error("Failed to read line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: std::io::Error,
    },

    /// A configuration value could not be parsed
    #[error("Invalid setting {key}: '{value}'")]
    InvalidSetting { key: &'static str, value: String },
}

impl CommonError {
    /// Create an invalid comparison error naming the rejected operand
    pub fn invalid_comparison(operand: Operand) -> Self {
        Self::InvalidComparison { operand }
    }

    /// Creates an unknown member error.
    ///
    /// # Example
    /// ```ignore
    /// if !T::MEMBERS.iter().any(|m| m.name == name) {
    ///     return Err(CommonError::unknown_member(std::any::type_name::<T>(), name));
    /// }
    /// ```
    pub fn unknown_member(type_name: &'static str, member: impl Into<String>) -> Self {
        Self::UnknownMember {
            type_name,
            member: member.into(),
        }
    }

    /// Create a read error for the (1-based) line that failed
    pub fn read(line: usize, source: std::io::Error) -> Self {
        Self::Read { line, source }
    }

    /// Create an invalid setting error
    pub fn invalid_setting(key: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidSetting {
            key,
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_invalid_comparison_error() {
        let err = CommonError::invalid_comparison(Operand::Second);
        assert!(matches!(
            err,
            CommonError::InvalidComparison {
                operand: Operand::Second
            }
        ));
        assert_eq!(
            err.to_string(),
            "Invalid comparison: second operand has unspecified zone kind"
        );
    }

    #[test]
    fn test_unknown_member_error() {
        let err = CommonError::unknown_member("Order", "totl");
        assert!(err.to_string().contains("Order"));
        assert!(err.to_string().contains("'totl'"));
    }

    #[test]
    fn test_read_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::InvalidData, "bad utf-8");
        let err = CommonError::read(3, io);
        assert_eq!(err.to_string(), "Failed to read line 3: bad utf-8");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_invalid_setting_error() {
        let err = CommonError::invalid_setting("PASDECOTE_LOCAL_OFFSET", "+99");
        assert_eq!(
            err.to_string(),
            "Invalid setting PASDECOTE_LOCAL_OFFSET: '+99'"
        );
    }
}
