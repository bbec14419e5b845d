//! Null-safe chaining over optional values.
//!
//! Absence short-circuits: the projection or action runs at most once, and
//! only when a value is present.

/// Applies `project` to a present subject, or returns `default` when absent.
///
/// # Examples
///
/// ```
/// use pasdecote_common::maybe;
///
/// let name: Option<&str> = Some("ada");
/// assert_eq!(maybe(name, |n| n.len(), 0), 3);
/// assert_eq!(maybe(None::<&str>, |n| n.len(), 0), 0);
/// ```
pub fn maybe<T, U>(subject: Option<T>, project: impl FnOnce(T) -> U, default: U) -> U {
    match subject {
        Some(value) => project(value),
        None => default,
    }
}

/// Like [`maybe`], with `U::default()` as the fallback.
pub fn maybe_or_default<T, U: Default>(subject: Option<T>, project: impl FnOnce(T) -> U) -> U {
    match subject {
        Some(value) => project(value),
        None => U::default(),
    }
}

/// Runs `action` on a present subject; does nothing when absent.
///
/// # Examples
///
/// ```
/// use pasdecote_common::maybe_do;
///
/// let mut seen = Vec::new();
/// maybe_do(Some(4), |n| seen.push(n));
/// maybe_do(None, |n| seen.push(n));
/// assert_eq!(seen, vec![4]);
/// ```
pub fn maybe_do<T>(subject: Option<T>, action: impl FnOnce(T)) {
    if let Some(value) = subject {
        action(value);
    }
}

/// Extension trait exposing the `maybe` combinators as `Option` methods.
///
/// # Examples
///
/// ```
/// use pasdecote_common::MaybeExt;
///
/// let user: Option<(u32, &str)> = Some((7, "grace"));
/// assert_eq!(user.as_ref().maybe(|u| u.1, "anonymous"), "grace");
/// assert_eq!(None::<(u32, &str)>.maybe_or_default(|u| u.0), 0);
/// ```
pub trait MaybeExt<T> {
    /// See [`maybe`].
    fn maybe<U>(self, project: impl FnOnce(T) -> U, default: U) -> U;

    /// See [`maybe_or_default`].
    fn maybe_or_default<U: Default>(self, project: impl FnOnce(T) -> U) -> U;

    /// See [`maybe_do`].
    fn maybe_do(self, action: impl FnOnce(T));
}

impl<T> MaybeExt<T> for Option<T> {
    fn maybe<U>(self, project: impl FnOnce(T) -> U, default: U) -> U {
        maybe(self, project, default)
    }

    fn maybe_or_default<U: Default>(self, project: impl FnOnce(T) -> U) -> U {
        maybe_or_default(self, project)
    }

    fn maybe_do(self, action: impl FnOnce(T)) {
        maybe_do(self, action)
    }
}
