//! Lower-bound searches over coordinate-sorted slices.
//!
//! The search is the hot path of [`Canvas::draw`](crate::canvas::Canvas::draw):
//! it runs once per repaint to locate the first block that could be visible
//! at the viewport's left edge. It is branch-light on purpose — one key
//! comparison per iteration, no early "found" exit.

use crate::block::Block;
use crate::rect::Rect;

/// A shape ordered by the x-coordinate of its left edge.
///
/// This is the only capability the searches in this module require of their
/// elements.
pub trait LeftEdge {
    /// Returns the leftmost x-coordinate of this shape.
    fn left_edge(&self) -> i64;
}

impl LeftEdge for i64 {
    #[inline]
    fn left_edge(&self) -> i64 {
        *self
    }
}

impl LeftEdge for Rect {
    #[inline]
    fn left_edge(&self) -> i64 {
        self.left()
    }
}

impl LeftEdge for Block {
    #[inline]
    fn left_edge(&self) -> i64 {
        self.rect.left()
    }
}

impl<T> LeftEdge for &T
where
    T: LeftEdge,
{
    #[inline]
    fn left_edge(&self) -> i64 {
        T::left_edge(*self)
    }
}

/// Returns the first index in `items` whose left edge is not less than `x`.
///
/// `items` must be sorted ascending by left edge. This precondition is not
/// checked; if it does not hold, the search still terminates and returns an
/// index in `[0, items.len()]`, but that index is meaningless.
///
/// Equal left edges resolve to the leftmost match, so the returned index is
/// always a valid insertion point for a shape starting at `x`.
///
/// # Example
///
/// ```
/// # use blockview::prelude::*;
/// let rects: Vec<Rect> = [1, 3, 3, 5, 8]
///     .into_iter()
///     .map(|x| Rect::from_sides(x, 0, x + 2, 16))
///     .collect();
/// assert_eq!(lower_bound(&rects, 3), 1);
/// assert_eq!(lower_bound(&rects, 4), 3);
/// assert_eq!(lower_bound(&rects, 9), 5);
/// ```
pub fn lower_bound<T: LeftEdge>(items: &[T], x: i64) -> usize {
    lower_bound_by_key(items, &x, T::left_edge)
}

/// Returns the first index in `items` whose key is not less than `key`.
///
/// `items` must be sorted ascending by `f`; see [`lower_bound`].
///
/// Instead of the usual low/high pointer pair, the search tracks the
/// remaining span and an accumulated left boundary, halving the span by a
/// shift each iteration and recomputing the probe from the boundary. At the
/// top of every iteration the true boundary lies in `[left, left + span]`,
/// so a span of zero pins `left` to the answer. A probe past the end of the
/// slice (reachable when `key` exceeds every element) reads as "not less",
/// which leaves the boundary in place and keeps the invariant intact.
pub fn lower_bound_by_key<T, K, F>(items: &[T], key: &K, f: F) -> usize
where
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut span = items.len();
    let mut left = 0;
    let mut probe = span >> 1;

    while span > 0 {
        span >>= 1;
        if let Some(item) = items.get(probe) {
            if f(item) < *key {
                left = probe + 1;
            }
        }
        probe = left + (span >> 1);
    }

    left
}
