//! Left-outer-join over two sequences.
//!
//! Every left element produces one output per matching right element, or a
//! single output with `None` on the right when nothing matches. Output
//! follows left order; matches for one left element are emitted together,
//! in right order.

use std::collections::HashMap;
use std::hash::Hash;
use std::iter::{Fuse, FusedIterator};

/// Joins `left` against `right` on equal keys, keeping unmatched left elements.
///
/// Neither input is touched until the returned iterator is first advanced.
/// At that point the whole right side is grouped by key; the left side is
/// then pulled one element at a time as output is requested.
///
/// Right elements are cloned into each output because a single right element
/// may match any number of left elements.
///
/// # Examples
///
/// ```
/// use pasdecote_common::left_join;
///
/// let orders = vec![(1, "ann"), (2, "bob"), (3, "cy")];
/// let lines = vec![(1, "pen"), (1, "ink"), (3, "pad")];
///
/// let joined: Vec<_> = left_join(
///     orders,
///     lines,
///     |order| order.0,
///     |line| line.0,
///     |order, line| (order.1, line.map(|l| l.1)),
/// )
/// .collect();
///
/// assert_eq!(
///     joined,
///     vec![("ann", Some("pen")), ("ann", Some("ink")), ("bob", None), ("cy", Some("pad"))]
/// );
/// ```
pub fn left_join<LI, RI, K, LK, RK, F, O>(
    left: LI,
    right: RI,
    left_key: LK,
    right_key: RK,
    combine: F,
) -> LeftJoin<LI::IntoIter, RI::IntoIter, K, LK, RK, F>
where
    LI: IntoIterator,
    RI: IntoIterator,
    RI::Item: Clone,
    K: Eq + Hash,
    LK: FnMut(&LI::Item) -> K,
    RK: FnMut(&RI::Item) -> K,
    F: FnMut(&LI::Item, Option<RI::Item>) -> O,
{
    LeftJoin {
        left: left.into_iter().fuse(),
        right: Some((right.into_iter(), right_key)),
        groups: HashMap::new(),
        left_key,
        combine,
        current: None,
    }
}

/// Left element whose matches are still being emitted
struct Pending<L, K> {
    item: L,
    key: K,
    next_match: usize,
}

/// Iterator returned by [`left_join`] and [`LeftJoinExt::left_join`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct LeftJoin<LI, RI, K, LK, RK, F>
where
    LI: Iterator,
    RI: Iterator,
{
    left: Fuse<LI>,
    /// Right input and its key function, taken when grouping happens
    right: Option<(RI, RK)>,
    groups: HashMap<K, Vec<RI::Item>>,
    left_key: LK,
    combine: F,
    current: Option<Pending<LI::Item, K>>,
}

impl<LI, RI, K, LK, RK, F> LeftJoin<LI, RI, K, LK, RK, F>
where
    LI: Iterator,
    RI: Iterator,
    K: Eq + Hash,
    RK: FnMut(&RI::Item) -> K,
{
    fn group_right(&mut self) {
        let Some((right, mut right_key)) = self.right.take() else {
            return;
        };

        let mut total = 0usize;
        for item in right {
            total += 1;
            self.groups.entry(right_key(&item)).or_default().push(item);
        }

        tracing::trace!(
            right_len = total,
            distinct_keys = self.groups.len(),
            "Grouped right side of left join"
        );
    }

    fn pending_matches(&self) -> usize {
        self.current.as_ref().map_or(0, |pending| {
            self.groups
                .get(&pending.key)
                .map_or(0, |group| group.len().saturating_sub(pending.next_match))
        })
    }
}

impl<LI, RI, K, LK, RK, F, O> Iterator for LeftJoin<LI, RI, K, LK, RK, F>
where
    LI: Iterator,
    RI: Iterator,
    RI::Item: Clone,
    K: Eq + Hash,
    LK: FnMut(&LI::Item) -> K,
    RK: FnMut(&RI::Item) -> K,
    F: FnMut(&LI::Item, Option<RI::Item>) -> O,
{
    type Item = O;

    fn next(&mut self) -> Option<O> {
        self.group_right();

        loop {
            if let Some(pending) = self.current.as_mut() {
                let matched = self
                    .groups
                    .get(&pending.key)
                    .and_then(|group| group.get(pending.next_match));
                if let Some(matched) = matched {
                    pending.next_match += 1;
                    return Some((self.combine)(&pending.item, Some(matched.clone())));
                }
                self.current = None;
            }

            let item = self.left.next()?;
            let key = (self.left_key)(&item);

            // Groups are never empty, so presence means at least one match
            if self.groups.contains_key(&key) {
                self.current = Some(Pending {
                    item,
                    key,
                    next_match: 0,
                });
            } else {
                return Some((self.combine)(&item, None));
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (left_lower, left_upper) = self.left.size_hint();
        let pending = self.pending_matches();
        let lower = left_lower.saturating_add(pending);

        // Each left element yields exactly one output once the right side
        // is known to be empty.
        let upper = if self.right.is_none() && self.groups.is_empty() {
            left_upper.and_then(|upper| upper.checked_add(pending))
        } else {
            None
        };
        (lower, upper)
    }
}

impl<LI, RI, K, LK, RK, F, O> FusedIterator for LeftJoin<LI, RI, K, LK, RK, F>
where
    LI: Iterator,
    RI: Iterator,
    RI::Item: Clone,
    K: Eq + Hash,
    LK: FnMut(&LI::Item) -> K,
    RK: FnMut(&RI::Item) -> K,
    F: FnMut(&LI::Item, Option<RI::Item>) -> O,
{
}

/// Extension trait exposing [`left_join`] as an iterator method.
///
/// # Examples
///
/// ```
/// use pasdecote_common::LeftJoinExt;
///
/// let names: Vec<String> = [1, 2]
///     .into_iter()
///     .left_join([(1, "one")], |n| *n, |pair| pair.0, |n, hit| {
///         format!("{n}:{}", hit.map_or("-", |pair| pair.1))
///     })
///     .collect();
///
/// assert_eq!(names, vec!["1:one", "2:-"]);
/// ```
pub trait LeftJoinExt: Iterator + Sized {
    fn left_join<RI, K, LK, RK, F, O>(
        self,
        right: RI,
        left_key: LK,
        right_key: RK,
        combine: F,
    ) -> LeftJoin<Self, RI::IntoIter, K, LK, RK, F>
    where
        RI: IntoIterator,
        RI::Item: Clone,
        K: Eq + Hash,
        LK: FnMut(&Self::Item) -> K,
        RK: FnMut(&RI::Item) -> K,
        F: FnMut(&Self::Item, Option<RI::Item>) -> O,
    {
        left_join(self, right, left_key, right_key, combine)
    }
}

impl<I: Iterator> LeftJoinExt for I {}
