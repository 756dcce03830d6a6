//! Axis-aligned rectangles.

use serde::{Deserialize, Serialize};

use crate::point::Point;

/// An axis-aligned rectangle, specified by lower-left and upper-right corners.
#[derive(Debug, Default, Copy, Clone, Hash, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rect {
    /// The lower-left corner.
    p0: Point,
    /// The upper-right corner.
    p1: Point,
}

impl Rect {
    /// Creates a new rectangle.
    ///
    /// The corners are sorted, so the resulting rectangle is
    /// well-formed for any pair of input points.
    pub fn new(p0: Point, p1: Point) -> Self {
        Self {
            p0: Point::new(p0.x.min(p1.x), p0.y.min(p1.y)),
            p1: Point::new(p0.x.max(p1.x), p0.y.max(p1.y)),
        }
    }

    /// Creates a rectangle from all 4 sides (left, bottom, right, top).
    ///
    /// # Example
    ///
    /// ```
    /// # use blockview::prelude::*;
    /// let rect = Rect::from_sides(10, 20, 30, 40);
    /// assert_eq!(rect.width(), 20);
    /// assert_eq!(rect.height(), 20);
    /// ```
    pub fn from_sides(left: i64, bot: i64, right: i64, top: i64) -> Self {
        Self::new(Point::new(left, bot), Point::new(right, top))
    }

    /// Creates a zero-area rectangle containing the given point.
    pub fn from_point(p: Point) -> Self {
        Self { p0: p, p1: p }
    }

    /// Creates a zero-area rectangle containing the given `(x, y)` coordinates.
    pub fn from_xy(x: i64, y: i64) -> Self {
        Self::from_point(Point::new(x, y))
    }

    /// Returns the left x-coordinate of the rectangle.
    #[inline]
    pub fn left(&self) -> i64 {
        self.p0.x
    }

    /// Returns the right x-coordinate of the rectangle.
    #[inline]
    pub fn right(&self) -> i64 {
        self.p1.x
    }

    /// Returns the bottom y-coordinate of the rectangle.
    #[inline]
    pub fn bot(&self) -> i64 {
        self.p0.y
    }

    /// Returns the top y-coordinate of the rectangle.
    #[inline]
    pub fn top(&self) -> i64 {
        self.p1.y
    }

    /// Returns the horizontal width of the rectangle.
    #[inline]
    pub fn width(&self) -> i64 {
        self.p1.x - self.p0.x
    }

    /// Returns the vertical height of the rectangle.
    #[inline]
    pub fn height(&self) -> i64 {
        self.p1.y - self.p0.y
    }

    /// Returns the area of the rectangle.
    #[inline]
    pub fn area(&self) -> i64 {
        self.width() * self.height()
    }

    /// Returns the center point of the rectangle.
    pub fn center(&self) -> Point {
        Point::new((self.p0.x + self.p1.x) / 2, (self.p0.y + self.p1.y) / 2)
    }

    /// Computes the smallest rectangle containing this rectangle and `other`.
    pub fn union(self, other: Self) -> Self {
        Self {
            p0: Point::new(self.p0.x.min(other.p0.x), self.p0.y.min(other.p0.y)),
            p1: Point::new(self.p1.x.max(other.p1.x), self.p1.y.max(other.p1.y)),
        }
    }

    /// Computes the intersection of this rectangle with `other`.
    ///
    /// Returns [`None`] if the rectangles do not overlap.
    pub fn intersection(self, other: Self) -> Option<Self> {
        let pmin = Point::new(self.p0.x.max(other.p0.x), self.p0.y.max(other.p0.y));
        let pmax = Point::new(self.p1.x.min(other.p1.x), self.p1.y.min(other.p1.y));

        if pmin.x > pmax.x || pmin.y > pmax.y {
            return None;
        }

        Some(Self { p0: pmin, p1: pmax })
    }

    /// Expands the rectangle by `amount` on all sides.
    #[inline]
    pub fn expand(&self, amount: i64) -> Self {
        Self::new(
            Point::new(self.p0.x - amount, self.p0.y - amount),
            Point::new(self.p1.x + amount, self.p1.y + amount),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_are_normalized() {
        let r = Rect::new(Point::new(30, 40), Point::new(10, 20));
        assert_eq!(r, Rect::from_sides(10, 20, 30, 40));
        assert_eq!(r.left(), 10);
        assert_eq!(r.bot(), 20);
        assert_eq!(r.right(), 30);
        assert_eq!(r.top(), 40);
        assert_eq!(r.area(), 400);
        assert_eq!(r.center(), Point::new(20, 30));
    }

    #[test]
    fn union_and_intersection() {
        let r1 = Rect::from_sides(0, 0, 100, 200);
        let r2 = Rect::from_sides(-50, 20, 90, 250);
        assert_eq!(r1.union(r2), Rect::from_sides(-50, 0, 100, 250));
        assert_eq!(r1.intersection(r2), Some(Rect::from_sides(0, 20, 90, 200)));

        let r3 = Rect::from_sides(500, 500, 600, 600);
        assert_eq!(r1.intersection(r3), None);
    }

    #[test]
    fn expand_grows_all_sides() {
        let r = Rect::from_sides(10, 10, 20, 20);
        assert_eq!(r.expand(5), Rect::from_sides(5, 5, 25, 25));
    }
}
