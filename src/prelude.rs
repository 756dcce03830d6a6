//! An import prelude that re-exports commonly used items.

pub use crate::bisect::{lower_bound, lower_bound_by_key, LeftEdge};
pub use crate::block::{rgb, Block, Visibility};
pub use crate::canvas::{Canvas, FillRect};
pub use crate::error::Error;
pub use crate::point::Point;
pub use crate::rect::Rect;
