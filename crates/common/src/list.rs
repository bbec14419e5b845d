//! Indexable list conversion that avoids copying when it can.
//!
//! A caller that already holds contiguous storage gets a read-only view over
//! that same storage. Anything else is collected once into a fresh vector.
//!
//! # Aliasing
//!
//! A view shares storage with its owner. While the view is alive the owner
//! cannot mutate the storage; once it is dropped, new views observe whatever
//! the owner wrote. Readers of a view always see the owner's current data,
//! never a snapshot.

use std::ops::Deref;

use crate::error::CommonError;

/// Ordered, indexable list that is either a borrowed view or owned storage.
///
/// Read access goes through `Deref<Target = [T]>`, so slice methods such as
/// `len`, `get`, `iter`, `first` and indexing all work directly. Mutation is
/// only possible through the `try_*` methods, which reject views.
#[derive(Debug, Clone)]
pub enum AsList<'a, T> {
    /// Zero-copy, read-only view over the caller's storage
    View(&'a [T]),
    /// Freshly materialized storage with no other owner
    Owned(Vec<T>),
}

impl<'a, T> AsList<'a, T> {
    pub fn as_slice(&self) -> &[T] {
        match self {
            Self::View(slice) => slice,
            Self::Owned(vec) => vec.as_slice(),
        }
    }

    /// Check if this list borrows its storage
    pub fn is_view(&self) -> bool {
        matches!(self, Self::View(_))
    }

    /// Check if this list owns its storage
    pub fn is_owned(&self) -> bool {
        matches!(self, Self::Owned(_))
    }

    /// Mutable access to owned storage.
    ///
    /// # Errors
    ///
    /// Returns [`CommonError::ReadOnlyView`] for a view, leaving the
    /// borrowed storage untouched.
    pub fn try_as_mut_vec(&mut self) -> Result<&mut Vec<T>, CommonError> {
        match self {
            Self::View(_) => Err(CommonError::ReadOnlyView),
            Self::Owned(vec) => Ok(vec),
        }
    }

    /// Appends to owned storage; fails on a view.
    pub fn try_push(&mut self, value: T) -> Result<(), CommonError> {
        self.try_as_mut_vec()?.push(value);
        Ok(())
    }

    /// Converts into an owned vector, copying only when this is a view.
    pub fn into_vec(self) -> Vec<T>
    where
        T: Clone,
    {
        match self {
            Self::View(slice) => slice.to_vec(),
            Self::Owned(vec) => vec,
        }
    }
}

impl<T> Deref for AsList<'_, T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T: PartialEq> PartialEq for AsList<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for AsList<'_, T> {}

impl<T: PartialEq> PartialEq<Vec<T>> for AsList<'_, T> {
    fn eq(&self, other: &Vec<T>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: PartialEq, const N: usize> PartialEq<[T; N]> for AsList<'_, T> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<'s, T> IntoIterator for &'s AsList<'_, T> {
    type Item = &'s T;
    type IntoIter = std::slice::Iter<'s, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<T> FromIterator<T> for AsList<'_, T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::Owned(iter.into_iter().collect())
    }
}

/// Sources that [`as_list`] knows how to present as an [`AsList`].
///
/// Borrowed contiguous containers become views; owned vectors are moved in;
/// [`Materialize`] wraps any other sequence to be collected.
pub trait IntoAsList<'a, T: 'a> {
    fn into_as_list(self) -> AsList<'a, T>;
}

impl<'a, T: 'a> IntoAsList<'a, T> for &'a [T] {
    fn into_as_list(self) -> AsList<'a, T> {
        tracing::trace!(len = self.len(), "Viewing slice without copy");
        AsList::View(self)
    }
}

impl<'a, T: 'a> IntoAsList<'a, T> for &'a Vec<T> {
    fn into_as_list(self) -> AsList<'a, T> {
        self.as_slice().into_as_list()
    }
}

impl<'a, T: 'a, const N: usize> IntoAsList<'a, T> for &'a [T; N] {
    fn into_as_list(self) -> AsList<'a, T> {
        self.as_slice().into_as_list()
    }
}

impl<'a, 'b: 'a, T: 'a> IntoAsList<'a, T> for &'a AsList<'b, T> {
    fn into_as_list(self) -> AsList<'a, T> {
        self.as_slice().into_as_list()
    }
}

impl<'a, T: 'a> IntoAsList<'a, T> for Vec<T> {
    fn into_as_list(self) -> AsList<'a, T> {
        tracing::trace!(len = self.len(), "Taking ownership of vector without copy");
        AsList::Owned(self)
    }
}

/// Marks a sequence that must be collected into fresh storage.
#[derive(Debug, Clone)]
pub struct Materialize<I>(pub I);

impl<'a, I> IntoAsList<'a, I::Item> for Materialize<I>
where
    I: IntoIterator,
    I::Item: 'a,
{
    fn into_as_list(self) -> AsList<'a, I::Item> {
        let vec: Vec<I::Item> = self.0.into_iter().collect();
        tracing::trace!(len = vec.len(), "Materialized sequence into owned list");
        AsList::Owned(vec)
    }
}

/// Presents `source` as an indexable list, avoiding a copy where possible.
///
/// # Examples
///
/// ```
/// use pasdecote_common::{as_list, Materialize};
///
/// let scores = vec![3, 1, 4];
/// let view = as_list(&scores);
/// assert!(view.is_view());
/// assert_eq!(view[2], 4);
///
/// let evens = as_list(Materialize((1..=6).filter(|n| n % 2 == 0)));
/// assert!(evens.is_owned());
/// assert_eq!(evens, [2, 4, 6]);
/// ```
pub fn as_list<'a, T: 'a>(source: impl IntoAsList<'a, T>) -> AsList<'a, T> {
    source.into_as_list()
}

/// Extension trait to materialize any iterator into an owned [`AsList`].
pub trait MaterializeExt: Iterator + Sized {
    fn materialize<'a>(self) -> AsList<'a, Self::Item>
    where
        Self::Item: 'a,
    {
        Materialize(self).into_as_list()
    }
}

impl<I: Iterator> MaterializeExt for I {}
