use crate::arena::Entry;
use crate::compare::{Compare, NaturalOrder};
use crate::red_black_tree::tree::Tree;
use serde::de::{Deserializer, SeqAccess, Visitor};
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;

/// An ordered set implemented using a red black tree.
///
/// A red black tree is a self-balancing binary search tree that colors every node red or black
/// and maintains two invariants: a red node never has a red child, and every path from the root
/// to a leaf crosses the same number of black nodes. Together they keep the height of the tree
/// logarithmic in the number of items. The ordering of the set is decided by a comparator, which
/// defaults to the natural order of the items.
///
/// # Examples
///
/// ```
/// use ordered_collections::red_black_tree::RedBlackSet;
///
/// let mut set = RedBlackSet::new();
/// set.insert(0);
/// set.insert(3);
///
/// assert_eq!(set.len(), 2);
///
/// assert!(set.contains(&0));
/// assert_eq!(set.min(), Some(&0));
/// assert_eq!(set.ceil(&2), Some(&3));
///
/// assert!(set.remove(&0));
/// assert!(!set.remove(&1));
/// ```
pub struct RedBlackSet<T, C = NaturalOrder> {
    tree: Tree<T>,
    cmp: C,
    len: usize,
}

impl<T> RedBlackSet<T>
where
    T: Ord,
{
    /// Constructs a new, empty `RedBlackSet<T>` ordered by the natural order of its items.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = RedBlackSet::new();
    /// ```
    pub fn new() -> Self {
        RedBlackSet::with_comparator(NaturalOrder)
    }
}

impl<T, C> RedBlackSet<T, C> {
    /// Constructs a new, empty `RedBlackSet<T, C>` ordered by `cmp`. Every ordering decision the
    /// set makes goes through the comparator, so two items are duplicates exactly when the
    /// comparator says they are equal.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::with_comparator(|lhs: &u32, rhs: &u32| rhs.cmp(lhs));
    /// set.insert(1);
    /// set.insert(3);
    ///
    /// assert_eq!(set.min(), Some(&3));
    /// assert_eq!(set.iter().collect::<Vec<&u32>>(), vec![&3, &1]);
    /// ```
    pub fn with_comparator(cmp: C) -> Self
    where
        C: Compare<T>,
    {
        RedBlackSet {
            tree: Tree::new(),
            cmp,
            len: 0,
        }
    }

    /// Inserts an item into the set. Returns `true` if the item was not already present, and
    /// `false` if it was, in which case the set is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// assert!(set.insert(1));
    /// assert!(set.contains(&1));
    /// assert!(!set.insert(1));
    /// ```
    pub fn insert(&mut self, item: T) -> bool
    where
        C: Compare<T>,
    {
        if self.tree.insert(item, &self.cmp) {
            self.len += 1;
            true
        } else {
            false
        }
    }

    /// Removes an item from the set. Returns `true` if the item was present and removed, and
    /// `false` otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert!(set.remove(&1));
    /// assert!(!set.remove(&1));
    /// ```
    pub fn remove(&mut self, item: &T) -> bool
    where
        C: Compare<T>,
    {
        self.take(item).is_some()
    }

    /// Removes an item from the set and returns it. Returns `None` if the item does not exist in
    /// the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert_eq!(set.take(&1), Some(1));
    /// assert_eq!(set.take(&1), None);
    /// ```
    pub fn take(&mut self, item: &T) -> Option<T>
    where
        C: Compare<T>,
    {
        let removed = self.tree.remove(item, &self.cmp);
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    /// Checks if an item exists in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert!(!set.contains(&0));
    /// assert!(set.contains(&1));
    /// ```
    pub fn contains(&self, item: &T) -> bool
    where
        C: Compare<T>,
    {
        self.tree.find(item, &self.cmp).is_some()
    }

    /// Returns the number of items in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = RedBlackSet::new();
    /// assert!(set.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Clears the set, removing all items.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// set.insert(2);
    /// set.clear();
    /// assert_eq!(set.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        self.tree.clear();
        self.len = 0;
    }

    /// Returns the greatest item in the set that is less than or equal to a particular item.
    /// Returns `None` if such an item does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert_eq!(set.floor(&0), None);
    /// assert_eq!(set.floor(&2), Some(&1));
    /// ```
    pub fn floor(&self, item: &T) -> Option<&T>
    where
        C: Compare<T>,
    {
        self.tree
            .floor(item, &self.cmp)
            .map(|node| self.tree.item(node))
    }

    /// Returns the least item in the set that is greater than or equal to a particular item.
    /// Returns `None` if such an item does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert_eq!(set.ceil(&0), Some(&1));
    /// assert_eq!(set.ceil(&2), None);
    /// ```
    pub fn ceil(&self, item: &T) -> Option<&T>
    where
        C: Compare<T>,
    {
        self.tree
            .ceil(item, &self.cmp)
            .map(|node| self.tree.item(node))
    }

    /// Returns the minimum item of the set under its comparator. Returns `None` if the set is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// set.insert(3);
    /// assert_eq!(set.min(), Some(&1));
    /// ```
    pub fn min(&self) -> Option<&T> {
        self.tree
            .root()
            .map(|root| self.tree.item(self.tree.leftmost(root)))
    }

    /// Returns the maximum item of the set under its comparator. Returns `None` if the set is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// set.insert(3);
    /// assert_eq!(set.max(), Some(&3));
    /// ```
    pub fn max(&self) -> Option<&T> {
        self.tree
            .root()
            .map(|root| self.tree.item(self.tree.rightmost(root)))
    }

    /// Returns an iterator over the set. The iterator will yield items using in-order traversal,
    /// so they arrive in ascending order under the comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// set.insert(3);
    ///
    /// let mut iterator = set.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&3));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> RedBlackSetIter<'_, T> {
        RedBlackSetIter {
            tree: &self.tree,
            current: self.tree.root(),
            stack: Vec::new(),
        }
    }

    /// Renders the tree structure of the set with one line per node, deepest and rightmost node
    /// first, indented four spaces per level of depth. Each line shows an item and the color of
    /// its node. The output is deterministic for a given tree shape and is meant for debugging
    /// and tests, not for serialization.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(2);
    /// set.insert(1);
    /// set.insert(3);
    ///
    /// assert_eq!(set.dump(), "    |3,Red|\n|2,Black|\n    |1,Red|\n");
    /// ```
    pub fn dump(&self) -> String
    where
        T: fmt::Debug,
    {
        self.tree.dump()
    }
}

impl<T, C> IntoIterator for RedBlackSet<T, C> {
    type IntoIter = RedBlackSetIntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        Self::IntoIter {
            current: self.tree.root(),
            tree: self.tree,
            stack: Vec::new(),
        }
    }
}

impl<'a, T, C> IntoIterator for &'a RedBlackSet<T, C>
where
    T: 'a,
{
    type IntoIter = RedBlackSetIter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `RedBlackSet<T, C>`.
///
/// This iterator traverses the elements of the set in-order and yields owned items.
pub struct RedBlackSetIntoIter<T> {
    tree: Tree<T>,
    current: Option<Entry>,
    stack: Vec<Entry>,
}

impl<T> Iterator for RedBlackSetIntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.current {
            self.stack.push(node);
            self.current = self.tree.left(node);
        }
        self.stack.pop().map(|node| {
            let node = self.tree.release(node);
            self.current = node.right;
            node.item
        })
    }
}

/// An iterator for `RedBlackSet<T, C>`.
///
/// This iterator traverses the elements of the set in-order and yields immutable references.
pub struct RedBlackSetIter<'a, T> {
    tree: &'a Tree<T>,
    current: Option<Entry>,
    stack: Vec<Entry>,
}

impl<'a, T> Iterator for RedBlackSetIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.current {
            self.stack.push(node);
            self.current = self.tree.left(node);
        }
        self.stack.pop().map(|node| {
            self.current = self.tree.right(node);
            self.tree.item(node)
        })
    }
}

impl<T> Default for RedBlackSet<T>
where
    T: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> fmt::Debug for RedBlackSet<T, C>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, C> PartialEq for RedBlackSet<T, C>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T, C> Eq for RedBlackSet<T, C> where T: Eq {}

impl<T, C> Serialize for RedBlackSet<T, C>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for item in self {
            seq.serialize_element(item)?;
        }
        seq.end()
    }
}

struct RedBlackSetVisitor<T, C> {
    marker: PhantomData<(T, C)>,
}

impl<'de, T, C> Visitor<'de> for RedBlackSetVisitor<T, C>
where
    T: Deserialize<'de>,
    C: Compare<T> + Default,
{
    type Value = RedBlackSet<T, C>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut set = RedBlackSet::with_comparator(C::default());
        while let Some(item) = seq.next_element()? {
            set.insert(item);
        }
        Ok(set)
    }
}

impl<'de, T, C> Deserialize<'de> for RedBlackSet<T, C>
where
    T: Deserialize<'de>,
    C: Compare<T> + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(RedBlackSetVisitor {
            marker: PhantomData,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::RedBlackSet;
    use serde_test::{assert_tokens, Token};

    #[test]
    fn test_len_empty() {
        let set: RedBlackSet<u32> = RedBlackSet::new();
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn test_is_empty() {
        let set: RedBlackSet<u32> = RedBlackSet::new();
        assert!(set.is_empty());
    }

    #[test]
    fn test_min_max_empty() {
        let set: RedBlackSet<u32> = RedBlackSet::new();
        assert_eq!(set.min(), None);
        assert_eq!(set.max(), None);
    }

    #[test]
    fn test_basic_operations() {
        let mut set = RedBlackSet::new();
        for item in [5, 2, 8, 1, 3].iter() {
            assert!(set.insert(*item));
        }

        assert!(set.contains(&3));
        assert!(!set.contains(&9));
        assert_eq!(set.len(), 5);
        assert_eq!(set.iter().collect::<Vec<&i32>>(), vec![&1, &2, &3, &5, &8]);
    }

    #[test]
    fn test_insert() {
        let mut set = RedBlackSet::new();
        assert!(set.insert(1));
        assert!(set.contains(&1));
    }

    #[test]
    fn test_insert_duplicate() {
        let mut set = RedBlackSet::new();
        for item in [5, 2, 8, 1, 3].iter() {
            assert!(set.insert(*item));
        }
        let before = set.dump();

        assert!(!set.insert(3));
        assert_eq!(set.len(), 5);
        assert_eq!(set.dump(), before);
    }

    #[test]
    fn test_remove() {
        let mut set = RedBlackSet::new();
        set.insert(1);
        assert!(set.remove(&1));
        assert!(!set.contains(&1));
        assert!(!set.remove(&1));
    }

    #[test]
    fn test_remove_empty() {
        let mut set: RedBlackSet<u32> = RedBlackSet::new();
        assert!(!set.remove(&5));
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn test_take() {
        let mut set = RedBlackSet::new();
        set.insert(1);
        assert_eq!(set.take(&1), Some(1));
        assert_eq!(set.take(&1), None);
        assert!(set.is_empty());
    }

    #[test]
    fn test_len_tracks_operations() {
        let mut set = RedBlackSet::new();
        assert!(set.insert(1));
        assert!(set.insert(2));
        assert!(!set.insert(2));
        assert_eq!(set.len(), 2);

        assert!(set.remove(&1));
        assert!(!set.remove(&1));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_min_max() {
        let mut set = RedBlackSet::new();
        set.insert(1);
        set.insert(3);
        set.insert(5);

        assert_eq!(set.min(), Some(&1));
        assert_eq!(set.max(), Some(&5));
    }

    #[test]
    fn test_floor_ceil() {
        let mut set = RedBlackSet::new();
        set.insert(1);
        set.insert(3);
        set.insert(5);

        assert_eq!(set.floor(&0), None);
        assert_eq!(set.floor(&2), Some(&1));
        assert_eq!(set.floor(&4), Some(&3));
        assert_eq!(set.floor(&6), Some(&5));

        assert_eq!(set.ceil(&0), Some(&1));
        assert_eq!(set.ceil(&2), Some(&3));
        assert_eq!(set.ceil(&4), Some(&5));
        assert_eq!(set.ceil(&6), None);
    }

    #[test]
    fn test_clear() {
        let mut set = RedBlackSet::new();
        set.insert(1);
        set.insert(2);
        set.clear();
        assert!(set.is_empty());

        assert!(set.insert(1));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_into_iter() {
        let mut set = RedBlackSet::new();
        set.insert(1);
        set.insert(5);
        set.insert(3);

        assert_eq!(set.into_iter().collect::<Vec<u32>>(), vec![1, 3, 5]);
    }

    #[test]
    fn test_into_iter_empty() {
        let set: RedBlackSet<u32> = RedBlackSet::new();
        assert_eq!(set.into_iter().next(), None);
    }

    #[test]
    fn test_iter() {
        let mut set = RedBlackSet::new();
        set.insert(1);
        set.insert(5);
        set.insert(3);

        assert_eq!(set.iter().collect::<Vec<&u32>>(), vec![&1, &3, &5]);
    }

    #[test]
    fn test_iter_restartable() {
        let mut set = RedBlackSet::new();
        for item in [4, 2, 6, 1, 3].iter() {
            set.insert(*item);
        }

        let first = set.iter().collect::<Vec<&i32>>();
        let second = set.iter().collect::<Vec<&i32>>();
        assert_eq!(first, second);
    }

    #[test]
    fn test_reverse_comparator() {
        let mut set = RedBlackSet::with_comparator(|lhs: &i32, rhs: &i32| rhs.cmp(lhs));
        for item in [1, 5, 3].iter() {
            assert!(set.insert(*item));
        }

        assert_eq!(set.iter().collect::<Vec<&i32>>(), vec![&5, &3, &1]);
        assert_eq!(set.min(), Some(&5));
        assert_eq!(set.max(), Some(&1));

        assert!(set.remove(&3));
        assert_eq!(set.into_iter().collect::<Vec<i32>>(), vec![5, 1]);
    }

    #[test]
    fn test_dump() {
        let mut set = RedBlackSet::new();
        assert_eq!(set.dump(), "");

        set.insert(2);
        set.insert(1);
        set.insert(3);
        assert_eq!(set.dump(), "    |3,Red|\n|2,Black|\n    |1,Red|\n");
    }

    #[test]
    fn test_debug() {
        let mut set = RedBlackSet::new();
        for item in [2, 1, 3].iter() {
            set.insert(*item);
        }
        assert_eq!(format!("{:?}", set), "{1, 2, 3}");
    }

    #[test]
    fn test_eq() {
        let mut a = RedBlackSet::new();
        let mut b = RedBlackSet::new();
        for item in [1, 2, 3].iter() {
            a.insert(*item);
        }
        for item in [3, 1, 2].iter() {
            b.insert(*item);
        }

        assert_eq!(a, b);
        assert!(b.remove(&2));
        assert_ne!(a, b);
    }

    #[test]
    fn test_serde() {
        let mut set = RedBlackSet::new();
        set.insert(1);
        set.insert(3);
        set.insert(2);

        assert_tokens(
            &set,
            &[
                Token::Seq { len: Some(3) },
                Token::I32(1),
                Token::I32(2),
                Token::I32(3),
                Token::SeqEnd,
            ],
        );
    }
}
