use crate::bst::{self, Tree};
use std::{
    borrow::Borrow,
    cmp::{Eq, Ord, PartialEq},
    default::Default,
    fmt::{self, Debug, Formatter},
    hash::{Hash, Hasher},
    iter::{FromIterator, FusedIterator},
};

/// An ordered set stored in an unbalanced binary search tree. Unlike
/// `Map::insert`, inserting an element that is already present leaves
/// the set unchanged.
/// # Examples
/// ```
/// use std::string::String;
/// use ordered_bst::set::Set;
///
/// let mut s = Set::new();
/// assert!(s.insert(String::from("1")));
/// assert!(s.insert(String::from("2")));
/// assert!(!s.insert(String::from("1")));
///
/// assert_eq!(s.len(), 2);
/// assert_eq!(s.contains("1"), true);
/// assert_eq!(s.contains("3"), false);
///
/// for k in &s { println!("{}", k) }
/// ```
pub struct Set<K> {
    len: usize,
    root: Tree<K, ()>,
}

impl<K> Drop for Set<K> {
    fn drop(&mut self) {
        self.root.clear()
    }
}

impl<K> Clone for Set<K>
where
    K: Clone,
{
    fn clone(&self) -> Self {
        Set {
            len: self.len,
            root: self.root.clone(),
        }
    }
}

impl<K> Hash for Set<K>
where
    K: Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len);
        for k in self {
            k.hash(state)
        }
    }
}

impl<K> Default for Set<K> {
    fn default() -> Set<K> {
        Set::new()
    }
}

impl<K> PartialEq for Set<K>
where
    K: PartialEq,
{
    fn eq(&self, other: &Set<K>) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<K> Eq for Set<K> where K: Eq {}

impl<K> Debug for Set<K>
where
    K: Debug,
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K> FromIterator<K> for Set<K>
where
    K: Ord,
{
    fn from_iter<T: IntoIterator<Item = K>>(iter: T) -> Self {
        let mut s = Set::new();
        s.extend(iter);
        s
    }
}

impl<K> Extend<K> for Set<K>
where
    K: Ord,
{
    fn extend<T: IntoIterator<Item = K>>(&mut self, iter: T) {
        for k in iter {
            self.insert(k);
        }
    }
}

pub struct SetIter<'a, K>(bst::Iter<'a, K, ()>);

impl<'a, K> Iterator for SetIter<'a, K> {
    type Item = &'a K;
    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(k, ())| k)
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<'a, K> ExactSizeIterator for SetIter<'a, K> {}

impl<'a, K> FusedIterator for SetIter<'a, K> {}

impl<'a, K> IntoIterator for &'a Set<K> {
    type Item = &'a K;
    type IntoIter = SetIter<'a, K>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K> Set<K> {
    /// Create a new empty set
    pub fn new() -> Self {
        Set {
            len: 0,
            root: Tree::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.root.clear();
        self.len = 0;
    }

    /// iterate over the elements in ascending order
    pub fn iter<'a>(&'a self) -> SetIter<'a, K> {
        SetIter(self.root.iter(self.len))
    }

    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&K),
    {
        self.root.for_each(|k, ()| f(k))
    }

    pub fn first(&self) -> Option<&K> {
        self.root.first().map(|(k, ())| k)
    }

    pub fn last(&self) -> Option<&K> {
        self.root.last().map(|(k, ())| k)
    }
}

impl<K> Set<K>
where
    K: Ord,
{
    /// add k to the set, return true if it wasn't already present
    pub fn insert(&mut self, k: K) -> bool {
        let added = self.root.upsert(k, ()).is_none();
        if added {
            self.len += 1
        }
        added
    }

    /// remove k from the set, return true if it was present
    pub fn remove<Q>(&mut self, k: &Q) -> bool
    where
        Q: ?Sized + Ord,
        K: Borrow<Q>,
    {
        let removed = self.root.remove(k).is_some();
        if removed {
            self.len -= 1
        }
        removed
    }

    pub fn contains<Q>(&self, k: &Q) -> bool
    where
        Q: ?Sized + Ord,
        K: Borrow<Q>,
    {
        self.root.get(k).is_some()
    }

    /// return the stored element equal to k, if any
    pub fn get<'a, Q>(&'a self, k: &Q) -> Option<&'a K>
    where
        Q: ?Sized + Ord,
        K: Borrow<Q>,
    {
        self.root.get_full(k).map(|(k, ())| k)
    }
}

impl<K> Set<K>
where
    K: Ord + Debug,
{
    #[allow(dead_code)]
    pub(crate) fn invariant(&self) {
        self.root.invariant(self.len)
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::Set;
    use serde::{
        de::{SeqAccess, Visitor},
        ser::SerializeSeq,
        Deserialize, Deserializer, Serialize, Serializer,
    };
    use std::{fmt, marker::PhantomData};

    impl<K> Serialize for Set<K>
    where
        K: Serialize,
    {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            let mut seq = serializer.serialize_seq(Some(self.len()))?;
            for k in self {
                seq.serialize_element(k)?;
            }
            seq.end()
        }
    }

    struct SetVisitor<K>(PhantomData<K>);

    impl<'de, K> Visitor<'de> for SetVisitor<K>
    where
        K: Deserialize<'de> + Ord,
    {
        type Value = Set<K>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a sequence")
        }

        fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let mut s = Set::new();
            while let Some(k) = access.next_element()? {
                s.insert(k);
            }
            Ok(s)
        }
    }

    impl<'de, K> Deserialize<'de> for Set<K>
    where
        K: Deserialize<'de> + Ord,
    {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_seq(SetVisitor(PhantomData))
        }
    }
}
