//! Key ordering predicates.
//!
//! A map is ordered by a strict weak ordering supplied at construction.
//! Two keys are *equivalent* when neither is less than the other, and a map
//! never stores two equivalent keys.
//!
//! # Examples
//!
//! ```rust
//! use rbmap::{Compare, NaturalOrder, ReverseOrder};
//!
//! assert!(NaturalOrder.less(&1, &2));
//! assert!(ReverseOrder.less(&2, &1));
//!
//! let by_last_digit = |left: &u32, right: &u32| left % 10 < right % 10;
//! assert!(by_last_digit.equivalent(&13, &3));
//! ```

/// A strict weak ordering over keys of type `K`.
///
/// The predicate must stay consistent for the lifetime of the map that
/// holds it; a comparator whose answers change breaks the tree's ordering
/// invariant.
pub trait Compare<K: ?Sized> {
    /// Returns `true` if `left` is ordered strictly before `right`.
    fn less(&self, left: &K, right: &K) -> bool;

    /// Returns `true` if neither key is ordered before the other.
    fn equivalent(&self, left: &K, right: &K) -> bool {
        !self.less(left, right) && !self.less(right, left)
    }
}

/// Orders keys by their [`Ord`] implementation. The default comparator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NaturalOrder;

impl<K: Ord + ?Sized> Compare<K> for NaturalOrder {
    #[inline]
    fn less(&self, left: &K, right: &K) -> bool {
        left < right
    }
}

/// Orders keys by the reverse of their [`Ord`] implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ReverseOrder;

impl<K: Ord + ?Sized> Compare<K> for ReverseOrder {
    #[inline]
    fn less(&self, left: &K, right: &K) -> bool {
        right < left
    }
}

impl<K: ?Sized, F> Compare<K> for F
where
    F: Fn(&K, &K) -> bool,
{
    #[inline]
    fn less(&self, left: &K, right: &K) -> bool {
        self(left, right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, 2, true)]
    #[case(2, 1, false)]
    #[case(2, 2, false)]
    fn test_natural_order_less(#[case] left: i32, #[case] right: i32, #[case] expected: bool) {
        assert_eq!(NaturalOrder.less(&left, &right), expected);
    }

    #[rstest]
    fn test_reverse_order_less() {
        assert!(ReverseOrder.less(&5, &3));
        assert!(!ReverseOrder.less(&3, &5));
    }

    #[rstest]
    fn test_equivalent_uses_both_directions() {
        assert!(NaturalOrder.equivalent(&7, &7));
        assert!(!NaturalOrder.equivalent(&7, &8));
    }

    #[rstest]
    fn test_closure_comparator() {
        let case_insensitive =
            |left: &String, right: &String| left.to_lowercase() < right.to_lowercase();
        assert!(case_insensitive.equivalent(&"Key".to_string(), &"kEY".to_string()));
        assert!(case_insensitive.less(&"apple".to_string(), &"Banana".to_string()));
    }

    #[rstest]
    fn test_unsized_keys() {
        assert!(NaturalOrder.less("a", "b"));
    }
}
