//! Mapping lookups that fall back to a default instead of failing.

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

/// Read-only keyed access shared by the standard map types.
pub trait MapLookup<Q: ?Sized> {
    type Value;

    fn lookup(&self, key: &Q) -> Option<&Self::Value>;
}

impl<K, V, Q, S> MapLookup<Q> for HashMap<K, V, S>
where
    K: Eq + Hash + Borrow<Q>,
    Q: Eq + Hash + ?Sized,
    S: BuildHasher,
{
    type Value = V;

    fn lookup(&self, key: &Q) -> Option<&V> {
        self.get(key)
    }
}

impl<K, V, Q> MapLookup<Q> for BTreeMap<K, V>
where
    K: Ord + Borrow<Q>,
    Q: Ord + ?Sized,
{
    type Value = V;

    fn lookup(&self, key: &Q) -> Option<&V> {
        self.get(key)
    }
}

/// Returns the value stored under `key`, or `default` when the key is absent.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use pasdecote_common::get_or;
///
/// let limits = HashMap::from([("free", 10), ("pro", 100)]);
/// assert_eq!(get_or(&limits, "pro", 0), 100);
/// assert_eq!(get_or(&limits, "enterprise", 0), 0);
/// ```
pub fn get_or<M, Q>(map: &M, key: &Q, default: M::Value) -> M::Value
where
    M: MapLookup<Q> + ?Sized,
    M::Value: Clone,
    Q: ?Sized,
{
    map.lookup(key).cloned().unwrap_or(default)
}

/// Like [`get_or`], with `Default::default()` as the fallback.
pub fn get_or_default<M, Q>(map: &M, key: &Q) -> M::Value
where
    M: MapLookup<Q> + ?Sized,
    M::Value: Clone + Default,
    Q: ?Sized,
{
    map.lookup(key).cloned().unwrap_or_default()
}

/// Like [`get_or`] for a map that may itself be absent.
///
/// An absent map behaves as an empty one and yields `default`.
pub fn get_or_in<M, Q>(map: Option<&M>, key: &Q, default: M::Value) -> M::Value
where
    M: MapLookup<Q> + ?Sized,
    M::Value: Clone,
    Q: ?Sized,
{
    match map.and_then(|map| map.lookup(key)) {
        Some(value) => value.clone(),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_or_present_and_absent() {
        let map = HashMap::from([(1, "one".to_string())]);
        assert_eq!(get_or(&map, &1, "none".into()), "one");
        assert_eq!(get_or(&map, &2, "none".into()), "none");
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_get_or_borrowed_key() {
        let map: HashMap<String, u32> = HashMap::from([("a".to_string(), 1)]);
        assert_eq!(get_or(&map, "a", 0), 1);
        assert_eq!(get_or(&map, "b", 7), 7);
    }

    #[test]
    fn test_get_or_default_on_btree_map() {
        let map = BTreeMap::from([("x", vec![1, 2])]);
        assert_eq!(get_or_default(&map, "x"), vec![1, 2]);
        assert_eq!(get_or_default(&map, "y"), Vec::<i32>::new());
    }

    #[test]
    fn test_get_or_in_absent_map() {
        let map = HashMap::from([("k", 5)]);
        assert_eq!(get_or_in(Some(&map), "k", -1), 5);
        assert_eq!(get_or_in(Some(&map), "z", -1), -1);
        assert_eq!(get_or_in(None::<&HashMap<&str, i32>>, "k", -1), -1);
    }
}
