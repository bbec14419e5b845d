//! Stable names and display labels for data members.
//!
//! A type lists its members once through [`Members`]. Callers refer to a
//! member with [`member_name!`](crate::member_name), which fails to compile
//! if the field does not exist, and look its label up with [`display_name`].

use crate::error::CommonError;

/// Declared data member of a type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberInfo {
    pub name: &'static str,
    pub display_name: Option<&'static str>,
}

impl MemberInfo {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            display_name: None,
        }
    }

    pub const fn with_display_name(self, display_name: &'static str) -> Self {
        Self {
            name: self.name,
            display_name: Some(display_name),
        }
    }
}

/// Types that declare their data members.
///
/// # Examples
///
/// ```
/// use pasdecote_common::{display_name, member_name, MemberInfo, Members};
///
/// struct Invoice {
///     number: u32,
///     total_cents: i64,
/// }
///
/// impl Members for Invoice {
///     const MEMBERS: &'static [MemberInfo] = &[
///         MemberInfo::new("number").with_display_name("Invoice #"),
///         MemberInfo::new("total_cents"),
///     ];
/// }
///
/// let field = member_name!(Invoice, number);
/// assert_eq!(field, "number");
/// assert_eq!(display_name::<Invoice>(field).unwrap(), "Invoice #");
/// assert_eq!(display_name::<Invoice>(member_name!(Invoice, total_cents)).unwrap(), "");
/// ```
pub trait Members {
    const MEMBERS: &'static [MemberInfo];
}

fn find<T: Members + ?Sized>(name: &str) -> Result<&'static MemberInfo, CommonError> {
    T::MEMBERS
        .iter()
        .find(|member| member.name == name)
        .ok_or_else(|| CommonError::unknown_member(std::any::type_name::<T>(), name))
}

/// Returns the declared name matching `name`.
///
/// # Errors
///
/// Returns [`CommonError::UnknownMember`] when `T` declares no such member.
pub fn member_name<T: Members + ?Sized>(name: &str) -> Result<&'static str, CommonError> {
    find::<T>(name).map(|member| member.name)
}

/// Returns the display label of member `name`, or `""` when it has none.
///
/// # Errors
///
/// Returns [`CommonError::UnknownMember`] when `T` declares no such member.
pub fn display_name<T: Members + ?Sized>(name: &str) -> Result<&'static str, CommonError> {
    find::<T>(name).map(|member| member.display_name.unwrap_or(""))
}

/// Name of a field as a `&'static str`, checked against the type at compile
/// time.
#[macro_export]
macro_rules! member_name {
    ($ty:ty, $field:ident) => {{
        let _ = |value: &$ty| {
            let _ = &value.$field;
        };
        stringify!($field)
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    struct Order {
        id: u64,
        customer_name: String,
        total: f64,
    }

    impl Members for Order {
        const MEMBERS: &'static [MemberInfo] = &[
            MemberInfo::new("id"),
            MemberInfo::new("customer_name").with_display_name("Customer"),
            MemberInfo::new("total").with_display_name("Order total"),
        ];
    }

    #[test]
    fn test_member_name_macro() {
        assert_eq!(member_name!(Order, customer_name), "customer_name");
        assert_eq!(member_name!(Order, id), "id");
    }

    #[test]
    fn test_member_name_validates() {
        assert_eq!(member_name::<Order>("total").unwrap(), "total");

        let err = member_name::<Order>("totl").unwrap_err();
        assert!(matches!(err, CommonError::UnknownMember { .. }));
        assert!(err.to_string().contains("Order"));
    }

    #[test]
    fn test_display_name() {
        assert_eq!(
            display_name::<Order>(member_name!(Order, total)).unwrap(),
            "Order total"
        );
        assert_eq!(display_name::<Order>("id").unwrap(), "");
        assert!(display_name::<Order>("missing").is_err());
    }
}
