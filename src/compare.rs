//! Total-order comparators that ordered collections are parameterized over.

use std::cmp::Ordering;

/// A trait for types that define a strict total order over values of type `T`.
///
/// Ordered collections in this crate consult a comparator for every ordering decision instead of
/// calling `Ord` directly, so the same element type can live in differently ordered collections.
/// Two values are treated as equal exactly when the comparator returns `Ordering::Equal` for
/// them, even if their `Eq` implementation disagrees.
///
/// The trait is implemented for every `Fn(&T, &T) -> Ordering`, so a closure works as a
/// comparator without further ceremony.
///
/// # Examples
///
/// ```
/// use ordered_collections::compare::Compare;
/// use std::cmp::Ordering;
///
/// let by_length = |lhs: &&str, rhs: &&str| lhs.len().cmp(&rhs.len());
/// assert_eq!(by_length.compare(&"aa", &"b"), Ordering::Greater);
/// ```
pub trait Compare<T> {
    /// Returns the ordering of `lhs` relative to `rhs`.
    fn compare(&self, lhs: &T, rhs: &T) -> Ordering;
}

impl<T, F> Compare<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, lhs: &T, rhs: &T) -> Ordering {
        self(lhs, rhs)
    }
}

/// A comparator that orders values by their `Ord` implementation.
///
/// # Examples
///
/// ```
/// use ordered_collections::compare::{Compare, NaturalOrder};
/// use std::cmp::Ordering;
///
/// assert_eq!(NaturalOrder.compare(&1, &2), Ordering::Less);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct NaturalOrder;

impl<T> Compare<T> for NaturalOrder
where
    T: Ord,
{
    fn compare(&self, lhs: &T, rhs: &T) -> Ordering {
        lhs.cmp(rhs)
    }
}
