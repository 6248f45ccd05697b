pub use crate::bst::Iter;
use crate::bst::Tree;
use std::{
    borrow::Borrow,
    cmp::{Eq, Ord, PartialEq},
    default::Default,
    fmt::{self, Debug, Formatter},
    hash::{Hash, Hasher},
    iter::FromIterator,
    ops::Index,
};

/// An ordered map stored in a plain, unbalanced binary search tree.
///
/// Bindings are kept in one heap node each, owned by its parent, and
/// nothing ever rotates. Inserting keys in random order gives a tree
/// of expected depth O(log(N)), inserting them sorted gives a list,
/// and every operation then costs O(N). If you need guaranteed
/// bounds use `std::collections::BTreeMap`.
///
/// `insert` never replaces an existing binding. Inserting a key that
/// is already present adds a second node for it to the right of the
/// first one, `len` counts both, and iteration yields both in the
/// order they were inserted. `upsert` is the replace in place
/// variant.
///
/// # Examples
/// ```
/// use ordered_bst::map::Map;
///
/// let mut m = Map::new();
/// for k in [10, 5, 15, 2, 4, 12, 14] {
///     m.insert(k, k * 10);
/// }
/// assert_eq!(m.len(), 7);
/// assert!(m.contains_key(&4));
/// assert!(!m.contains_key(&3));
///
/// let mut keys = Vec::new();
/// m.for_each(|k, _| keys.push(*k));
/// assert_eq!(keys, vec![2, 4, 5, 10, 12, 14, 15]);
///
/// assert_eq!(m.remove(&15), Some(150));
/// assert_eq!(m.remove(&3), None);
/// assert_eq!(m.len(), 6);
/// ```
pub struct Map<K, V> {
    len: usize,
    root: Tree<K, V>,
}

impl<K, V> Drop for Map<K, V> {
    fn drop(&mut self) {
        self.root.clear()
    }
}

impl<K, V> Clone for Map<K, V>
where
    K: Clone,
    V: Clone,
{
    fn clone(&self) -> Self {
        Map {
            len: self.len,
            root: self.root.clone(),
        }
    }
}

impl<K, V> Hash for Map<K, V>
where
    K: Hash,
    V: Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len);
        for elt in self {
            elt.hash(state)
        }
    }
}

impl<K, V> Default for Map<K, V> {
    fn default() -> Map<K, V> {
        Map::new()
    }
}

/// Two maps are equal when they yield the same bindings in the same
/// order, the shape of the trees doesn't matter.
impl<K, V> PartialEq for Map<K, V>
where
    K: PartialEq,
    V: PartialEq,
{
    fn eq(&self, other: &Map<K, V>) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<K, V> Eq for Map<K, V>
where
    K: Eq,
    V: Eq,
{
}

impl<K, V> Debug for Map<K, V>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, Q, K, V> Index<&'a Q> for Map<K, V>
where
    Q: ?Sized + Ord,
    K: Ord + Borrow<Q>,
{
    type Output = V;
    fn index(&self, k: &Q) -> &V {
        self.get(k).expect("element not found for key")
    }
}

impl<K, V> FromIterator<(K, V)> for Map<K, V>
where
    K: Ord,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut m = Map::new();
        m.extend(iter);
        m
    }
}

impl<K, V> Extend<(K, V)> for Map<K, V>
where
    K: Ord,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v)
        }
    }
}

impl<'a, K, V> IntoIterator for &'a Map<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V> Map<K, V> {
    /// Create a new empty map
    pub fn new() -> Self {
        Map {
            len: 0,
            root: Tree::new(),
        }
    }

    /// get the number of nodes in the map, in O(1). Bindings added
    /// by inserting an already present key are counted.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// remove every binding from the map
    pub fn clear(&mut self) {
        self.root.clear();
        self.len = 0;
    }

    /// the number of nodes on the longest path from the root, 0 for
    /// an empty map. Runs in O(N).
    pub fn height(&self) -> usize {
        self.root.height()
    }

    /// return an iterator over the bindings in ascending key order.
    /// The iterator keeps a stack of at most `height` nodes.
    pub fn iter<'a>(&'a self) -> Iter<'a, K, V> {
        self.root.iter(self.len)
    }

    /// call `f` once for every binding, in ascending key order.
    ///
    /// # Examples
    /// ```
    /// use ordered_bst::map::Map;
    ///
    /// let m: Map<i32, i32> = vec![(3, 30), (1, 10), (2, 20)].into_iter().collect();
    /// let mut sum = 0;
    /// m.for_each(|k, v| sum += k * v);
    /// assert_eq!(sum, 140);
    /// ```
    pub fn for_each<F>(&self, f: F)
    where
        F: FnMut(&K, &V),
    {
        self.root.for_each(f)
    }

    /// the binding with the smallest key
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.root.first()
    }

    /// the binding with the largest key. When the largest key was
    /// inserted more than once this is the latest binding.
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.root.last()
    }
}

impl<K, V> Map<K, V>
where
    K: Ord,
{
    /// add a binding from k to v. This always adds a node, if k is
    /// already present the new binding is placed after the existing
    /// one, and both remain in the map.
    ///
    /// # Examples
    /// ```
    /// use ordered_bst::map::Map;
    ///
    /// let mut m = Map::new();
    /// m.insert(1, "a");
    /// m.insert(1, "b");
    /// assert_eq!(m.len(), 2);
    /// assert_eq!(m.get(&1), Some(&"a"));
    /// assert_eq!(m.iter().map(|(_, v)| *v).collect::<Vec<_>>(), vec!["a", "b"]);
    /// ```
    pub fn insert(&mut self, k: K, v: V) {
        self.root.insert(k, v);
        self.len += 1;
    }

    /// bind k to v, replacing the value of the first binding of k if
    /// there is one and returning it.
    ///
    /// # Examples
    /// ```
    /// use ordered_bst::map::Map;
    ///
    /// let mut m = Map::new();
    /// assert_eq!(m.upsert(1, "a"), None);
    /// assert_eq!(m.upsert(1, "b"), Some("a"));
    /// assert_eq!(m.len(), 1);
    /// assert_eq!(m[&1], "b");
    /// ```
    pub fn upsert(&mut self, k: K, v: V) -> Option<V> {
        let prev = self.root.upsert(k, v);
        if prev.is_none() {
            self.len += 1
        }
        prev
    }

    /// lookup the mapping for k. If k was inserted more than once this
    /// is the earliest binding still in the map. Runs in O(height)
    /// time and constant space.
    pub fn get<'a, Q>(&'a self, k: &Q) -> Option<&'a V>
    where
        Q: ?Sized + Ord,
        K: Borrow<Q>,
    {
        self.root.get(k)
    }

    /// lookup the mapping for k, returning both the stored key and
    /// the value.
    pub fn get_key_value<'a, Q>(&'a self, k: &Q) -> Option<(&'a K, &'a V)>
    where
        Q: ?Sized + Ord,
        K: Borrow<Q>,
    {
        self.root.get_full(k)
    }

    pub fn get_mut<'a, Q>(&'a mut self, k: &Q) -> Option<&'a mut V>
    where
        Q: ?Sized + Ord,
        K: Borrow<Q>,
    {
        self.root.get_mut(k)
    }

    pub fn contains_key<Q>(&self, k: &Q) -> bool
    where
        Q: ?Sized + Ord,
        K: Borrow<Q>,
    {
        self.root.get(k).is_some()
    }

    /// remove one binding of k from the map and return its value. If
    /// k isn't in the map nothing changes and None is returned. If k
    /// was inserted more than once the other bindings stay.
    pub fn remove<Q>(&mut self, k: &Q) -> Option<V>
    where
        Q: ?Sized + Ord,
        K: Borrow<Q>,
    {
        self.remove_entry(k).map(|(_, v)| v)
    }

    /// like remove, but also return the stored key
    pub fn remove_entry<Q>(&mut self, k: &Q) -> Option<(K, V)>
    where
        Q: ?Sized + Ord,
        K: Borrow<Q>,
    {
        let removed = self.root.remove(k);
        if removed.is_some() {
            self.len -= 1
        }
        removed
    }
}

impl<K, V> Map<K, V>
where
    K: Ord + Debug,
    V: Debug,
{
    #[allow(dead_code)]
    pub(crate) fn invariant(&self) {
        self.root.invariant(self.len)
    }

    #[cfg(test)]
    pub(crate) fn root_key(&self) -> Option<&K> {
        self.root.root_key()
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::Map;
    use serde::{
        de::{MapAccess, Visitor},
        ser::SerializeMap,
        Deserialize, Deserializer, Serialize, Serializer,
    };
    use std::{fmt, marker::PhantomData};

    impl<K, V> Serialize for Map<K, V>
    where
        K: Serialize,
        V: Serialize,
    {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            let mut map = serializer.serialize_map(Some(self.len()))?;
            for (k, v) in self {
                map.serialize_entry(k, v)?;
            }
            map.end()
        }
    }

    struct MapVisitor<K, V>(PhantomData<(K, V)>);

    impl<'de, K, V> Visitor<'de> for MapVisitor<K, V>
    where
        K: Deserialize<'de> + Ord,
        V: Deserialize<'de>,
    {
        type Value = Map<K, V>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map")
        }

        // repeated keys are kept, as with insert
        fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut m = Map::new();
            while let Some((k, v)) = access.next_entry()? {
                m.insert(k, v);
            }
            Ok(m)
        }
    }

    impl<'de, K, V> Deserialize<'de> for Map<K, V>
    where
        K: Deserialize<'de> + Ord,
        V: Deserialize<'de>,
    {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_map(MapVisitor(PhantomData))
        }
    }
}
