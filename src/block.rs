//! Rectangular timeline blocks.

use serde::{Deserialize, Serialize};

use crate::rect::Rect;

/// The fill color assigned to blocks whose color channels are all zero.
pub const DEFAULT_COLOR: u32 = 0x00F0_E094;

/// Packs color channels into a `0x00RRGGBB` word.
///
/// Pure black is reserved as a "no color" marker and maps to
/// [`DEFAULT_COLOR`].
pub fn rgb(red: u8, green: u8, blue: u8) -> u32 {
    if red == 0 && green == 0 && blue == 0 {
        return DEFAULT_COLOR;
    }
    ((red as u32) << 16) + ((green as u32) << 8) + blue as u32
}

/// A visibility override written by the paint pass.
///
/// Within a level, overrides act as markers: a block carrying [`Draw`] or
/// [`Hidden`] sets the state for itself and every following block up to the
/// next marker, while [`Inherit`] blocks take whatever state is in effect.
/// Parents mark their first child to show or hide the whole child run.
///
/// [`Draw`]: Visibility::Draw
/// [`Hidden`]: Visibility::Hidden
/// [`Inherit`]: Visibility::Inherit
#[derive(Debug, Default, Copy, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Visibility {
    /// Take the state of the nearest preceding marker.
    #[default]
    Inherit,
    /// Start a run of drawable blocks.
    Draw,
    /// Start a run of hidden blocks.
    Hidden,
}

/// A single rectangular block within a canvas level.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Block {
    /// The block's rectangle, in scene coordinates.
    pub rect: Rect,
    /// Fill color, `0x00RRGGBB`.
    pub color: u32,
    /// Height of this block's row plus all descendant rows.
    pub total_height: i64,
    /// Index of this block's first child in the next level, if any.
    pub children_begin: Option<usize>,
    /// Visibility override for the paint pass.
    pub visibility: Visibility,
}

impl Block {
    /// Creates a childless block with the given rectangle and fill color.
    pub fn new(rect: Rect, color: u32) -> Self {
        Self {
            rect,
            color,
            total_height: rect.height(),
            children_begin: None,
            visibility: Visibility::Inherit,
        }
    }

    /// Sets the index of this block's first child in the next level.
    pub fn with_children_begin(mut self, children_begin: usize) -> Self {
        self.children_begin = Some(children_begin);
        self
    }

    /// Sets the combined height of this block's subtree.
    pub fn with_total_height(mut self, total_height: i64) -> Self {
        self.total_height = total_height;
        self
    }
}
