use std::{
    borrow::Borrow,
    cmp::{max, Ord, Ordering},
    default::Default,
    fmt::Debug,
    iter::FusedIterator,
    mem,
};

pub(crate) struct Node<K, V> {
    key: K,
    val: V,
    left: Tree<K, V>,
    right: Tree<K, V>,
}

/// An unbalanced binary search tree. Keys in the left subtree of a
/// node are strictly less than the node's key, keys in the right
/// subtree are greater or equal. Equal keys only appear when the same
/// key is inserted more than once, the later binding lands in the
/// right subtree of the earlier one.
///
/// Every walk over the tree is iterative, the depth of a degenerate
/// tree is the number of elements in it.
pub(crate) enum Tree<K, V> {
    Empty,
    Node(Box<Node<K, V>>),
}

impl<K, V> Default for Tree<K, V> {
    fn default() -> Tree<K, V> {
        Tree::Empty
    }
}

impl<K, V> Clone for Tree<K, V>
where
    K: Clone,
    V: Clone,
{
    // post order, children are built before their parent
    fn clone(&self) -> Self {
        let mut work: Vec<(&Tree<K, V>, bool)> = vec![(self, false)];
        let mut built: Vec<Tree<K, V>> = Vec::new();
        while let Some((t, expanded)) = work.pop() {
            match t {
                Tree::Empty => built.push(Tree::Empty),
                Tree::Node(n) if !expanded => {
                    work.push((t, true));
                    work.push((&n.right, false));
                    work.push((&n.left, false));
                }
                Tree::Node(n) => {
                    let right = built.pop().unwrap_or_default();
                    let left = built.pop().unwrap_or_default();
                    built.push(Tree::Node(Box::new(Node {
                        key: n.key.clone(),
                        val: n.val.clone(),
                        left,
                        right,
                    })))
                }
            }
        }
        built.pop().unwrap_or_default()
    }
}

/// An in order iterator over the bindings of a tree
pub struct Iter<'a, K, V> {
    stack: Vec<&'a Node<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    fn push_left(&mut self, mut t: &'a Tree<K, V>) {
        while let Tree::Node(n) = t {
            self.stack.push(n);
            t = &n.left;
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let n = self.stack.pop()?;
        self.push_left(&n.right);
        self.remaining = self.remaining.saturating_sub(1);
        Some((&n.key, &n.val))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}

impl<'a, K, V> FusedIterator for Iter<'a, K, V> {}

impl<'a, K, V> Clone for Iter<'a, K, V> {
    fn clone(&self) -> Self {
        Iter {
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<K, V> Tree<K, V> {
    pub(crate) fn new() -> Self {
        Tree::Empty
    }

    pub(crate) fn is_empty(&self) -> bool {
        match self {
            Tree::Empty => true,
            Tree::Node(..) => false,
        }
    }

    /// `len` must be the number of nodes in the tree, it is only used
    /// to report an exact size hint.
    pub(crate) fn iter<'a>(&'a self, len: usize) -> Iter<'a, K, V> {
        let mut iter = Iter {
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_left(self);
        iter
    }

    pub(crate) fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&K, &V),
    {
        let mut stack: Vec<&Node<K, V>> = Vec::new();
        let mut t = self;
        loop {
            while let Tree::Node(n) = t {
                stack.push(n);
                t = &n.left;
            }
            match stack.pop() {
                None => break,
                Some(n) => {
                    f(&n.key, &n.val);
                    t = &n.right;
                }
            }
        }
    }

    pub(crate) fn height(&self) -> usize {
        let mut stack = vec![(self, 0usize)];
        let mut height = 0;
        while let Some((t, depth)) = stack.pop() {
            if let Tree::Node(n) = t {
                height = max(height, depth + 1);
                stack.push((&n.left, depth + 1));
                stack.push((&n.right, depth + 1));
            }
        }
        height
    }

    pub(crate) fn first(&self) -> Option<(&K, &V)> {
        let mut n = match self {
            Tree::Empty => return None,
            Tree::Node(n) => n,
        };
        while let Tree::Node(l) = &n.left {
            n = l;
        }
        Some((&n.key, &n.val))
    }

    pub(crate) fn last(&self) -> Option<(&K, &V)> {
        let mut n = match self {
            Tree::Empty => return None,
            Tree::Node(n) => n,
        };
        while let Tree::Node(r) = &n.right {
            n = r;
        }
        Some((&n.key, &n.val))
    }

    /// release every node without recursing once per level
    pub(crate) fn clear(&mut self) {
        let mut stack = vec![mem::take(self)];
        while let Some(t) = stack.pop() {
            if let Tree::Node(mut n) = t {
                stack.push(mem::take(&mut n.left));
                stack.push(mem::take(&mut n.right));
            }
        }
    }

    // detach the leftmost node, its right subtree takes its place
    fn pop_min(&mut self) -> Option<Box<Node<K, V>>> {
        let mut cur = self;
        while matches!(*cur, Tree::Node(ref n) if !n.left.is_empty()) {
            cur = match cur {
                Tree::Empty => return None,
                Tree::Node(n) => &mut n.left,
            };
        }
        match mem::take(cur) {
            Tree::Empty => None,
            Tree::Node(mut n) => {
                *cur = mem::take(&mut n.right);
                Some(n)
            }
        }
    }
}

impl<K, V> Tree<K, V>
where
    K: Ord,
{
    /// Add a node for (k, v). Equal keys descend right, so inserting a
    /// key that is already present adds a second binding for it. One
    /// node is created on every call.
    pub(crate) fn insert(&mut self, k: K, v: V) {
        let mut cur = self;
        while let Tree::Node(n) = cur {
            cur = if n.key > k { &mut n.left } else { &mut n.right };
        }
        *cur = Tree::Node(Box::new(Node {
            key: k,
            val: v,
            left: Tree::Empty,
            right: Tree::Empty,
        }));
    }

    /// Replace the value of the first binding of k on the search path,
    /// or add a new node if k isn't present. Returns the previous
    /// value, a node was created iff it returns None.
    pub(crate) fn upsert(&mut self, k: K, v: V) -> Option<V> {
        let mut cur = self;
        while let Tree::Node(n) = cur {
            match k.cmp(&n.key) {
                Ordering::Less => cur = &mut n.left,
                Ordering::Greater => cur = &mut n.right,
                Ordering::Equal => return Some(mem::replace(&mut n.val, v)),
            }
        }
        *cur = Tree::Node(Box::new(Node {
            key: k,
            val: v,
            left: Tree::Empty,
            right: Tree::Empty,
        }));
        None
    }

    fn get_gen<'a, Q, F, R>(&'a self, k: &Q, f: F) -> Option<R>
    where
        Q: ?Sized + Ord,
        K: Borrow<Q>,
        F: FnOnce(&'a Node<K, V>) -> R,
        R: 'a,
    {
        let mut t = self;
        loop {
            match t {
                Tree::Empty => break None,
                Tree::Node(n) => match k.cmp(n.key.borrow()) {
                    Ordering::Less => t = &n.left,
                    Ordering::Greater => t = &n.right,
                    Ordering::Equal => break Some(f(n)),
                },
            }
        }
    }

    pub(crate) fn get<'a, Q>(&'a self, k: &Q) -> Option<&'a V>
    where
        Q: ?Sized + Ord,
        K: Borrow<Q>,
    {
        self.get_gen(k, |n| &n.val)
    }

    pub(crate) fn get_full<'a, Q>(&'a self, k: &Q) -> Option<(&'a K, &'a V)>
    where
        Q: ?Sized + Ord,
        K: Borrow<Q>,
    {
        self.get_gen(k, |n| (&n.key, &n.val))
    }

    pub(crate) fn get_mut<'a, Q>(&'a mut self, k: &Q) -> Option<&'a mut V>
    where
        Q: ?Sized + Ord,
        K: Borrow<Q>,
    {
        let mut cur = self;
        loop {
            let n = match cur {
                Tree::Empty => return None,
                Tree::Node(n) => n,
            };
            match k.cmp(n.key.borrow()) {
                Ordering::Less => cur = &mut n.left,
                Ordering::Greater => cur = &mut n.right,
                Ordering::Equal => return Some(&mut n.val),
            }
        }
    }

    /// Remove the first node on the search path for k and return its
    /// binding. A node with two children is replaced by its in order
    /// successor, which is unlinked from the right subtree and takes
    /// over both children. Exactly one node leaves the tree iff this
    /// returns Some.
    pub(crate) fn remove<Q>(&mut self, k: &Q) -> Option<(K, V)>
    where
        Q: ?Sized + Ord,
        K: Borrow<Q>,
    {
        let mut cur = self;
        let slot = loop {
            let dir = match &*cur {
                Tree::Empty => return None,
                Tree::Node(n) => k.cmp(n.key.borrow()),
            };
            if dir == Ordering::Equal {
                break cur;
            }
            cur = match cur {
                Tree::Empty => return None,
                Tree::Node(n) => {
                    if dir == Ordering::Less {
                        &mut n.left
                    } else {
                        &mut n.right
                    }
                }
            };
        };
        let mut node = match mem::take(slot) {
            Tree::Empty => return None,
            Tree::Node(n) => n,
        };
        *slot = match (node.left.is_empty(), node.right.is_empty()) {
            (true, _) => mem::take(&mut node.right),
            (_, true) => mem::take(&mut node.left),
            (false, false) => match node.right.pop_min() {
                None => mem::take(&mut node.left),
                Some(mut succ) => {
                    succ.left = mem::take(&mut node.left);
                    succ.right = mem::take(&mut node.right);
                    Tree::Node(succ)
                }
            },
        };
        let Node { key, val, .. } = *node;
        Some((key, val))
    }
}

impl<K, V> Tree<K, V>
where
    K: Ord + Debug,
    V: Debug,
{
    #[cfg(test)]
    pub(crate) fn root_key(&self) -> Option<&K> {
        match self {
            Tree::Empty => None,
            Tree::Node(n) => Some(&n.key),
        }
    }

    /// Check the ordering invariant of every node and that the tree
    /// holds exactly len nodes. Panics with a description of the first
    /// violation found.
    #[allow(dead_code)]
    pub(crate) fn invariant(&self, len: usize) {
        // lower bounds are inclusive, upper bounds exclusive
        let mut stack: Vec<(&Tree<K, V>, Option<&K>, Option<&K>)> = vec![(self, None, None)];
        let mut count = 0;
        while let Some((t, lower, upper)) = stack.pop() {
            if let Tree::Node(n) = t {
                if let Some(lower) = lower {
                    if n.key < *lower {
                        panic!(
                            "tree invariant violated, key {:?} is below lower bound {:?}",
                            n.key, lower
                        )
                    }
                }
                if let Some(upper) = upper {
                    if n.key >= *upper {
                        panic!(
                            "tree invariant violated, key {:?} is not below upper bound {:?}",
                            n.key, upper
                        )
                    }
                }
                count += 1;
                stack.push((&n.left, lower, Some(&n.key)));
                stack.push((&n.right, Some(&n.key), upper));
            }
        }
        if len != count {
            panic!("len is wrong {} vs {}", len, count)
        }
        if (len == 0) != self.is_empty() {
            panic!("root presence disagrees with len {}", len)
        }
    }
}
