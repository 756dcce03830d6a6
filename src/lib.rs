//! Visibility queries over timeline scenes of x-sorted blocks.
//!
//! A scene is a [`Canvas`](canvas::Canvas): levels of rectangular
//! [`Block`](block::Block)s, roots at level 0, children of each block in
//! the next level down. Because every level ascends by left edge, finding
//! the first block visible at a horizontal offset is a
//! [lower-bound search](bisect::lower_bound), and a repaint touches only
//! the blocks inside the viewport.
//!
//! # Examples
//!
//! Find where a rectangle starting at `x = 4` would slot into a sorted row:
//!
//! ```
//! # use blockview::prelude::*;
//! let row: Vec<Rect> = [1, 3, 3, 5, 8]
//!     .into_iter()
//!     .map(|x| Rect::from_sides(x, 0, x + 1, 16))
//!     .collect();
//! assert_eq!(lower_bound(&row, 4), 3);
//! ```
#![warn(missing_docs)]

pub mod bisect;
pub mod block;
pub mod canvas;
pub mod error;
pub mod point;
pub mod prelude;
pub mod rect;
