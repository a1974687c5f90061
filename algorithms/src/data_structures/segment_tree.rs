//! Segment tree over a fixed-length array, answering inclusive range sums.
//!
//! Variables:
//!   n              : usize  — number of leaves, fixed at build time
//!   [start, end]   : usize  — inclusive index span covered by a node
//!   total          : T      — sum of values[start ..= end]
//!
//! Equations:
//!   mid            = start + (end - start) / 2
//!   children       = [start, mid] , [mid + 1, end]
//!   total(node)    = total(left) + total(right)           (internal nodes)
//!
//!   build(values):    2n - 1 nodes, totals bottom-up        O(n)
//!   update(i, v):     leaf i := v, ancestors recomputed     O(log n)
//!   range_sum(s, e):  exact match  -> total
//!                     e <= mid     -> left(s, e)
//!                     s >  mid     -> right(s, e)
//!                     otherwise    -> left(s, mid) + right(mid + 1, e)   O(log n)

use std::ops::Add;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{AlgorithmError, Result};

#[inline]
fn midpoint(start: usize, end: usize) -> usize {
    start + (end - start) / 2
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
struct Node<T> {
    start: usize,
    end: usize,
    total: T,
    left: Option<Box<Node<T>>>,
    right: Option<Box<Node<T>>>,
}

impl<T: Copy + Add<Output = T>> Node<T> {
    fn build(values: &[T], start: usize, end: usize) -> Box<Self> {
        if start == end {
            return Box::new(Node {
                start,
                end,
                total: values[start],
                left: None,
                right: None,
            });
        }
        let mid = midpoint(start, end);
        let left = Self::build(values, start, mid);
        let right = Self::build(values, mid + 1, end);
        Box::new(Node {
            start,
            end,
            total: left.total + right.total,
            left: Some(left),
            right: Some(right),
        })
    }

    // Callers have already checked that `index` lies inside this node's span.
    fn update(&mut self, index: usize, value: T) {
        match (self.left.as_deref_mut(), self.right.as_deref_mut()) {
            (Some(left), Some(right)) => {
                if index <= midpoint(self.start, self.end) {
                    left.update(index, value);
                } else {
                    right.update(index, value);
                }
                self.total = left.total + right.total;
            }
            _ => self.total = value,
        }
    }

    fn range_sum(&self, start: usize, end: usize) -> T {
        if self.start == start && self.end == end {
            return self.total;
        }
        let mid = midpoint(self.start, self.end);
        match (self.left.as_deref(), self.right.as_deref()) {
            (Some(left), Some(right)) => {
                if end <= mid {
                    left.range_sum(start, end)
                } else if start > mid {
                    right.range_sum(start, end)
                } else {
                    left.range_sum(start, mid) + right.range_sum(mid + 1, end)
                }
            }
            _ => self.total,
        }
    }

    fn count(&self) -> usize {
        let below = |child: &Option<Box<Node<T>>>| {
            child.as_ref().map_or(0, |n| n.count())
        };
        1 + below(&self.left) + below(&self.right)
    }

    /// Check that every node splits its span at the midpoint and recompute
    /// internal totals from the leaves.
    #[cfg(feature = "serde")]
    fn restore(&mut self) -> Result<()> {
        if self.start > self.end {
            return Err(AlgorithmError::invalid_input(format!(
                "node spans [{}, {}]",
                self.start, self.end
            )));
        }
        let (start, end) = (self.start, self.end);
        let mid = midpoint(start, end);
        match (self.left.as_deref_mut(), self.right.as_deref_mut()) {
            (None, None) if start == end => Ok(()),
            (Some(left), Some(right))
                if start < end
                    && (left.start, left.end) == (start, mid)
                    && (right.start, right.end) == (mid + 1, end) =>
            {
                left.restore()?;
                right.restore()?;
                self.total = left.total + right.total;
                Ok(())
            }
            _ => Err(AlgorithmError::invalid_input(format!(
                "node [{start}, {end}] does not split at {mid}"
            ))),
        }
    }
}

/// Serialized form of [`SegmentTree`], validated before it becomes a tree.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct SegmentTreeParts<T> {
    root: Box<Node<T>>,
    len: usize,
}

#[cfg(feature = "serde")]
impl<T: Copy + Add<Output = T>> TryFrom<SegmentTreeParts<T>> for SegmentTree<T> {
    type Error = AlgorithmError;

    fn try_from(parts: SegmentTreeParts<T>) -> Result<Self> {
        let SegmentTreeParts { mut root, len } = parts;
        if root.start != 0 || root.end.checked_add(1) != Some(len) {
            return Err(AlgorithmError::invalid_input(format!(
                "root spans [{}, {}] but the tree claims {len} values",
                root.start, root.end
            )));
        }
        root.restore()?;
        Ok(Self { root, len })
    }
}

/// Range-sum segment tree with eager (non-lazy) point updates.
///
/// The shape is fixed at construction; only node totals change afterwards.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "SegmentTreeParts<T>",
        bound(deserialize = "T: Deserialize<'de> + Copy + Add<Output = T>")
    )
)]
pub struct SegmentTree<T> {
    root: Box<Node<T>>,
    len: usize,
}

impl<T: Copy + Add<Output = T>> SegmentTree<T> {
    /// Build a tree over `values`.
    ///
    /// An empty slice is rejected with [`AlgorithmError::InvalidInput`]; there
    /// is no empty tree.
    pub fn build(values: &[T]) -> Result<Self> {
        if values.is_empty() {
            tracing::debug!("segment tree build rejected: empty input");
            return Err(AlgorithmError::invalid_input(
                "segment tree needs at least one value",
            ));
        }
        let len = values.len();
        let root = Node::build(values, 0, len - 1);
        tracing::debug!(len, "segment tree built");
        Ok(Self { root, len })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false: construction rejects empty input.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Overwrite the value at `index` and refresh every ancestor total.
    pub fn update(&mut self, index: usize, value: T) -> Result<()> {
        if index >= self.len {
            tracing::debug!(index, len = self.len, "segment tree update rejected");
            return Err(AlgorithmError::IndexOutOfRange { index, len: self.len });
        }
        tracing::trace!(index, "segment tree update");
        self.root.update(index, value);
        Ok(())
    }

    /// Sum of the values in the inclusive range `[start, end]`.
    pub fn range_sum(&self, start: usize, end: usize) -> Result<T> {
        if start > end || end >= self.len {
            tracing::debug!(start, end, len = self.len, "segment tree query rejected");
            return Err(AlgorithmError::RangeOutOfBounds { start, end, len: self.len });
        }
        Ok(self.root.range_sum(start, end))
    }

    /// Current value stored at `index`.
    pub fn get(&self, index: usize) -> Result<T> {
        if index >= self.len {
            return Err(AlgorithmError::IndexOutOfRange { index, len: self.len });
        }
        Ok(self.root.range_sum(index, index))
    }

    /// Sum of every value; the root's total.
    pub fn total(&self) -> T {
        self.root.total
    }

    pub fn node_count(&self) -> usize {
        self.root.count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sums_then_updates_small_array() {
        let mut tree = SegmentTree::build(&[1, 3, 5]).unwrap();
        assert_eq!(tree.range_sum(0, 2), Ok(9));
        tree.update(1, 2).unwrap();
        assert_eq!(tree.range_sum(0, 2), Ok(8));
        assert_eq!(tree.range_sum(1, 2), Ok(7));
        assert_eq!(tree.get(1), Ok(2));
    }

    #[test]
    fn empty_input_is_rejected() {
        let err = SegmentTree::<i64>::build(&[]).unwrap_err();
        assert!(matches!(err, AlgorithmError::InvalidInput(_)));
    }

    #[test]
    fn single_value_tree_is_a_leaf() {
        let mut tree = SegmentTree::build(&[42u32]).unwrap();
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.range_sum(0, 0), Ok(42));
        tree.update(0, 7).unwrap();
        assert_eq!(tree.total(), 7);
    }

    #[test]
    fn node_count_is_two_n_minus_one() {
        for n in 1..40usize {
            let values: Vec<i32> = (0..n as i32).collect();
            let tree = SegmentTree::build(&values).unwrap();
            assert_eq!(tree.node_count(), 2 * n - 1, "n = {n}");
        }
    }

    #[test]
    fn bad_ranges_are_rejected_without_mutation() {
        let mut tree = SegmentTree::build(&[2, 4, 6, 8]).unwrap();
        assert_eq!(
            tree.range_sum(3, 1),
            Err(AlgorithmError::RangeOutOfBounds { start: 3, end: 1, len: 4 })
        );
        assert!(tree.range_sum(0, 4).unwrap_err().is_out_of_range());
        assert_eq!(
            tree.update(4, 100),
            Err(AlgorithmError::IndexOutOfRange { index: 4, len: 4 })
        );
        assert!(tree.get(10).is_err());
        assert_eq!(tree.total(), 20);
    }

    #[test]
    fn every_range_matches_brute_force_after_updates() {
        let mut values = vec![5i64, -3, 7, 0, 12, -8, 4, 9, 1];
        let mut tree = SegmentTree::build(&values).unwrap();
        for (i, v) in [(0, 10), (8, -2), (4, 4), (5, 5), (4, 0)] {
            let before = tree.total();
            let old = values[i];
            tree.update(i, v).unwrap();
            values[i] = v;
            assert_eq!(tree.total() - before, v - old);
            for s in 0..values.len() {
                for e in s..values.len() {
                    let expected: i64 = values[s..=e].iter().sum();
                    assert_eq!(tree.range_sum(s, e), Ok(expected), "range [{s}, {e}]");
                }
            }
        }
    }

    #[test]
    fn works_with_floats() {
        let tree = SegmentTree::build(&[0.5f64, 0.25, 0.125]).unwrap();
        assert_eq!(tree.range_sum(1, 2), Ok(0.375));
    }
}
