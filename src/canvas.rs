//! Timeline canvases: levels of x-sorted blocks and the paint pass over them.
//!
//! A [`Canvas`] holds a hierarchy of [`Block`]s flattened into levels:
//! level 0 holds the root blocks, level 1 their children, and so on. Within
//! a level, blocks ascend by left edge, which lets [`Canvas::draw`] locate
//! the first potentially visible root with a single lower-bound search and
//! then walk rightward until it leaves the viewport.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::bisect;
use crate::block::{rgb, Block, Visibility};
use crate::error::{Error, Result};
use crate::rect::Rect;

/// Height of one block row, in scene units.
pub const ROW_HEIGHT: i64 = 16;

/// Vertical gap between a block's row and its children's row.
pub const ROW_GAP: i64 = 2;

/// Scaled width below which a block is drawn as one solid rectangle
/// covering its entire subtree.
pub const MIN_DRAW_WIDTH: f64 = 20.0;

/// Horizontal gap between consecutive synthetic root blocks.
const FRAME_GAP: i64 = 500;

const X_BEGIN: i64 = 100;
const Y_BEGIN: i64 = 50;

/// A rectangle to be filled on screen.
///
/// `x` and `w` are in scaled (screen) units; `y` and `h` are unscaled scene
/// units. The origin is the rectangle's minimum-coordinate corner.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq)]
pub struct FillRect {
    /// The scaled left coordinate.
    pub x: f64,
    /// The top of the block's row (y grows downward on screen).
    pub y: f64,
    /// The scaled width, clamped to at least 1.
    pub w: f64,
    /// The height of the filled region.
    pub h: f64,
    /// Fill color, `0x00RRGGBB`.
    pub color: u32,
}

/// A multi-level scene of x-sorted blocks.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Canvas {
    levels: Vec<Vec<Block>>,
    /// Per-level index of the first block worth visiting, advanced as the
    /// paint pass skips blocks left of the viewport. `None` means the level
    /// has no visible blocks.
    draw_indexes: Vec<Option<usize>>,
}

impl Canvas {
    /// Creates an empty canvas with no levels.
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes all levels and blocks.
    pub fn clear(&mut self) {
        self.levels.clear();
        self.draw_indexes.clear();
    }

    /// Resizes the canvas to hold `n` levels, keeping existing blocks in
    /// levels that survive.
    pub fn set_levels(&mut self, n: usize) {
        self.levels.resize_with(n, Vec::new);
        self.draw_indexes.resize_with(n, || None);
    }

    /// Returns the number of levels.
    pub fn levels(&self) -> usize {
        self.levels.len()
    }

    /// Returns the total number of blocks across all levels.
    pub fn block_count(&self) -> usize {
        self.levels.iter().map(Vec::len).sum()
    }

    /// Reserves capacity for `n` additional blocks in the given level.
    pub fn reserve(&mut self, level: usize, n: usize) -> Result<()> {
        self.levels
            .get_mut(level)
            .ok_or(Error::InvalidLevel(level))?
            .reserve(n);
        Ok(())
    }

    /// Appends a block to the given level, returning its index.
    ///
    /// The block must not start left of the level's current tail; within a
    /// level, left edges are ascending. The search in [`Canvas::draw`] relies
    /// on this order and never re-checks it, so this is the one place the
    /// invariant is enforced.
    pub fn add_block(&mut self, level: usize, block: Block) -> Result<usize> {
        let blocks = self
            .levels
            .get_mut(level)
            .ok_or(Error::InvalidLevel(level))?;
        if let Some(last) = blocks.last() {
            if block.rect.left() < last.rect.left() {
                return Err(Error::UnsortedInsert {
                    level,
                    x: block.rect.left(),
                });
            }
        }
        blocks.push(block);
        Ok(blocks.len() - 1)
    }

    /// Returns the blocks of the given level, if it exists.
    pub fn level(&self, level: usize) -> Option<&[Block]> {
        self.levels.get(level).map(Vec::as_slice)
    }

    /// Returns the block at the given level and index, if it exists.
    pub fn block(&self, level: usize, index: usize) -> Option<&Block> {
        self.levels.get(level)?.get(index)
    }

    /// Returns the bounding box of the scene.
    ///
    /// Root rectangles are extended to their `total_height`, so the result
    /// covers every descendant row. Returns [`None`] for an empty scene.
    pub fn extents(&self) -> Option<Rect> {
        let roots = self.levels.first()?;
        roots.iter().fold(None, |acc, b| {
            let r = Rect::from_sides(
                b.rect.left(),
                b.rect.bot(),
                b.rect.right(),
                b.rect.bot() + b.total_height,
            );
            Some(match acc {
                Some(acc) => acc.union(r),
                None => r,
            })
        })
    }

    /// Computes the fill commands for the part of the scene inside `region`.
    ///
    /// Only the horizontal extent of `region` is considered. `scale` is the
    /// current view zoom; it applies to x-coordinates and widths only.
    ///
    /// The first candidate root is found by a lower-bound search on the
    /// region's left edge, stepped back by one so a block straddling the
    /// edge is still drawn. Each level is then walked from its cursor:
    /// blocks ending left of the region (or marked hidden) are skipped and
    /// the cursor advances past them; the walk stops at the first block
    /// starting right of the region. Blocks narrower than
    /// [`MIN_DRAW_WIDTH`] scaled units are drawn as one solid rectangle of
    /// `total_height`, hiding their children; wider blocks seed the next
    /// level's cursor at their first child instead.
    pub fn draw(&mut self, region: Rect, scale: f64) -> Vec<FillRect> {
        let mut out = Vec::new();
        if self.levels.first().map_or(true, Vec::is_empty) {
            return out;
        }

        let scene_left = region.left();
        let scene_right = region.right();
        tracing::trace!(scene_left, scene_right, scale, "drawing viewport");

        // Levels below the roots are seeded by their visible parents.
        for index in self.draw_indexes.iter_mut().skip(1) {
            *index = None;
        }

        let roots = &self.levels[0];
        let first = bisect::lower_bound(roots, scene_left);
        self.draw_indexes[0] = Some(if first < roots.len() {
            first.saturating_sub(1)
        } else {
            roots.len() - 1
        });

        for l in 0..self.levels.len() {
            let (head, tail) = self.levels.split_at_mut(l + 1);
            let level = head[l].as_slice();
            let mut children = tail.first_mut().map(Vec::as_mut_slice);

            let Some(mut i) = self.draw_indexes[l] else {
                continue;
            };
            let mut state = Visibility::Draw;

            while i < level.len() {
                let item = level[i];
                if item.visibility != Visibility::Inherit {
                    state = item.visibility;
                }

                if item.rect.right() < scene_left || state == Visibility::Hidden {
                    i += 1;
                    self.draw_indexes[l] = Some(i);
                    continue;
                }

                let w = (item.rect.width() as f64 * scale).max(1.0);
                if w < MIN_DRAW_WIDTH {
                    // Too small to see detail: one solid rectangle covers
                    // the block and everything beneath it.
                    if item.rect.left() > scene_right {
                        break;
                    }
                    out.push(FillRect {
                        x: item.rect.left() as f64 * scale,
                        y: item.rect.bot() as f64,
                        w,
                        h: item.total_height as f64,
                        color: item.color,
                    });
                    if let (Some(children), Some(begin)) =
                        (children.as_deref_mut(), item.children_begin)
                    {
                        if let Some(child) = children.get_mut(begin) {
                            child.visibility = Visibility::Hidden;
                        }
                    }
                    i += 1;
                    continue;
                }

                if let (Some(children), Some(begin)) = (children.as_deref_mut(), item.children_begin)
                {
                    if self.draw_indexes[l + 1].is_none() {
                        self.draw_indexes[l + 1] = Some(begin);
                    }
                    if let Some(child) = children.get_mut(begin) {
                        child.visibility = Visibility::Draw;
                    }
                }

                if item.rect.left() > scene_right {
                    break;
                }
                out.push(FillRect {
                    x: item.rect.left() as f64 * scale,
                    y: item.rect.bot() as f64,
                    w,
                    h: item.rect.height() as f64,
                    color: item.color,
                });
                i += 1;
            }
        }

        tracing::trace!(fills = out.len(), "viewport drawn");
        out
    }

    /// Generates a synthetic scene for stress testing views.
    ///
    /// Builds `frames` root blocks spaced 500 units apart, each fanning
    /// out into `depth` levels of children with the fan-out
    /// halving per level, sized so the whole scene holds roughly
    /// `total_items_estimate` blocks. Colors and leaf widths are random.
    pub fn synthetic<R: Rng>(
        rng: &mut R,
        frames: usize,
        total_items_estimate: usize,
        depth: usize,
    ) -> Self {
        let mut canvas = Self::new();
        canvas.set_levels(depth + 1);
        if frames == 0 {
            return canvas;
        }

        let children_per_frame = total_items_estimate / frames;
        let fanout = if depth == 0 {
            0
        } else {
            let f = 2f64.powi(depth as i32 - 1).sqrt()
                * (children_per_frame as f64).powf(1.0 / depth as f64)
                + 0.5;
            (f as usize).max(1)
        };

        canvas.levels[0].reserve(frames);
        let mut level_fanout = fanout;
        let mut per_frame = fanout;
        for level in 1..=depth {
            canvas.levels[level].reserve(per_frame.saturating_mul(frames));
            level_fanout >>= 1;
            per_frame = per_frame.saturating_mul(level_fanout);
        }

        let mut total_items = 0;
        let mut x = X_BEGIN;
        for _ in 0..frames {
            let color = random_color(rng);
            let frame = if fanout > 0 {
                let children_begin = canvas.levels[1].len();
                let last = canvas.fill_children(
                    rng,
                    1,
                    x,
                    Y_BEGIN + ROW_HEIGHT + ROW_GAP,
                    fanout,
                    &mut total_items,
                );
                match last {
                    Some(last) => {
                        Block::new(Rect::from_sides(x, Y_BEGIN, last.rect.right(), Y_BEGIN + ROW_HEIGHT), color)
                            .with_children_begin(children_begin)
                            .with_total_height(ROW_HEIGHT + last.total_height + ROW_GAP)
                    }
                    None => random_leaf(rng, x, Y_BEGIN, color),
                }
            } else {
                random_leaf(rng, x, Y_BEGIN, color)
            };
            x = frame.rect.right() + FRAME_GAP;
            canvas.levels[0].push(frame);
            total_items += 1;
        }

        tracing::debug!(frames, depth, total_items, "generated synthetic scene");
        canvas
    }

    /// Appends `count` sibling blocks to `level` starting at `x`, recursing
    /// into the next level with half the fan-out. Returns the last sibling.
    fn fill_children<R: Rng>(
        &mut self,
        rng: &mut R,
        level: usize,
        mut x: i64,
        y: i64,
        count: usize,
        total_items: &mut usize,
    ) -> Option<Block> {
        let fanout = count >> 1;
        for _ in 0..count {
            let color = random_color(rng);
            let block = if fanout > 0 && level + 1 < self.levels.len() {
                let children_begin = self.levels[level + 1].len();
                let last = self.fill_children(
                    rng,
                    level + 1,
                    x,
                    y + ROW_HEIGHT + ROW_GAP,
                    fanout,
                    total_items,
                );
                match last {
                    Some(last) => {
                        Block::new(Rect::from_sides(x, y, last.rect.right(), y + ROW_HEIGHT), color)
                            .with_children_begin(children_begin)
                            .with_total_height(ROW_HEIGHT + last.total_height + ROW_GAP)
                    }
                    None => random_leaf(rng, x, y, color),
                }
            } else {
                random_leaf(rng, x, y, color)
            };
            x = block.rect.right();
            self.levels[level].push(block);
            *total_items += 1;
        }
        self.levels[level].last().copied()
    }
}

fn random_color<R: Rng>(rng: &mut R) -> u32 {
    rgb(
        rng.gen_range(30..255),
        rng.gen_range(30..255),
        rng.gen_range(30..255),
    )
}

fn random_leaf<R: Rng>(rng: &mut R, x: i64, y: i64, color: u32) -> Block {
    let w = rng.gen_range(10..50);
    Block::new(Rect::from_sides(x, y, x + w, y + ROW_HEIGHT), color)
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use test_log::test;

    use super::*;

    /// Two roots, each with two children:
    ///
    /// ```text
    /// level 0:  [0..100]            [200..260]
    /// level 1:  [0..40] [50..100]   [200..230] [240..260]
    /// ```
    fn scene() -> Canvas {
        let mut canvas = Canvas::new();
        canvas.set_levels(2);
        canvas
            .add_block(
                0,
                Block::new(Rect::from_sides(0, 0, 100, 16), rgb(10, 20, 30))
                    .with_children_begin(0)
                    .with_total_height(34),
            )
            .unwrap();
        canvas
            .add_block(
                0,
                Block::new(Rect::from_sides(200, 0, 260, 16), rgb(40, 50, 60))
                    .with_children_begin(2)
                    .with_total_height(34),
            )
            .unwrap();
        for (x0, x1) in [(0, 40), (50, 100), (200, 230), (240, 260)] {
            canvas
                .add_block(1, Block::new(Rect::from_sides(x0, 18, x1, 34), rgb(1, 2, 3)))
                .unwrap();
        }
        canvas
    }

    #[test]
    fn empty_canvas_draws_nothing() {
        let mut canvas = Canvas::new();
        assert!(canvas.draw(Rect::from_sides(0, 0, 100, 100), 1.0).is_empty());
        canvas.set_levels(3);
        assert!(canvas.draw(Rect::from_sides(0, 0, 100, 100), 1.0).is_empty());
    }

    #[test]
    fn full_viewport_draws_every_block() {
        let mut canvas = scene();
        let fills = canvas.draw(Rect::from_sides(-10, 0, 300, 100), 1.0);
        assert_eq!(fills.len(), 6);
        assert_eq!(fills[0].x, 0.0);
        assert_eq!(fills[0].w, 100.0);
        assert_eq!(fills[0].h, 16.0);
        assert_eq!(fills[0].color, rgb(10, 20, 30));
        // Children rows come after the root pass.
        assert_eq!(fills[2].y, 18.0);
    }

    #[test]
    fn blocks_left_of_the_viewport_are_skipped() {
        let mut canvas = scene();
        let fills = canvas.draw(Rect::from_sides(150, 0, 300, 100), 1.0);
        // Second root and its two children; the first root ends at 100.
        assert_eq!(fills.len(), 3);
        assert_eq!(fills[0].color, rgb(40, 50, 60));
        assert!(fills.iter().all(|f| f.x + f.w >= 150.0));
    }

    #[test]
    fn walk_stops_past_the_right_edge() {
        let mut canvas = scene();
        let fills = canvas.draw(Rect::from_sides(0, 0, 150, 100), 1.0);
        // First root and its children; the second root starts at 200.
        assert_eq!(fills.len(), 3);
        assert!(fills.iter().all(|f| f.x <= 150.0));
    }

    #[test]
    fn straddling_root_is_still_drawn() {
        let mut canvas = scene();
        // Left edge inside the first root: the lower bound lands on the
        // second root and the walk steps back one.
        let fills = canvas.draw(Rect::from_sides(60, 0, 300, 100), 1.0);
        assert!(fills.iter().any(|f| f.color == rgb(10, 20, 30)));
    }

    #[test]
    fn narrow_blocks_hide_their_children() {
        let mut canvas = scene();
        // At 10% zoom both roots are 10 and 6 units wide.
        let fills = canvas.draw(Rect::from_sides(0, 0, 300, 100), 0.1);
        assert_eq!(fills.len(), 2);
        assert_eq!(fills[0].h, 34.0);
        assert_eq!(fills[1].h, 34.0);
        assert_eq!(canvas.block(1, 0).unwrap().visibility, Visibility::Hidden);

        // Zooming back in re-marks the children and draws everything.
        let fills = canvas.draw(Rect::from_sides(-10, 0, 300, 100), 1.0);
        assert_eq!(fills.len(), 6);
        assert_eq!(canvas.block(1, 0).unwrap().visibility, Visibility::Draw);
    }

    #[test]
    fn narrow_width_is_clamped() {
        let mut canvas = scene();
        let fills = canvas.draw(Rect::from_sides(0, 0, 300, 100), 0.001);
        assert!(fills.iter().all(|f| f.w >= 1.0));
    }

    #[test]
    fn add_block_rejects_out_of_order_inserts() {
        let mut canvas = Canvas::new();
        canvas.set_levels(1);
        canvas
            .add_block(0, Block::new(Rect::from_sides(50, 0, 60, 16), 0))
            .unwrap();
        let err = canvas
            .add_block(0, Block::new(Rect::from_sides(10, 0, 20, 16), 0))
            .unwrap_err();
        assert_eq!(err, Error::UnsortedInsert { level: 0, x: 10 });

        let err = canvas
            .add_block(3, Block::new(Rect::from_sides(70, 0, 80, 16), 0))
            .unwrap_err();
        assert_eq!(err, Error::InvalidLevel(3));
    }

    #[test]
    fn extents_cover_descendant_rows() {
        let canvas = scene();
        assert_eq!(canvas.extents(), Some(Rect::from_sides(0, 0, 260, 34)));
        assert_eq!(Canvas::new().extents(), None);
    }

    #[test]
    fn synthetic_scene_is_sorted_and_drawable() {
        let mut rng = StdRng::seed_from_u64(0x600D_5EED);
        let mut canvas = Canvas::synthetic(&mut rng, 4, 100, 3);
        assert_eq!(canvas.levels(), 4);
        assert_eq!(canvas.level(0).unwrap().len(), 4);
        assert!(canvas.block_count() > 4);

        for level in 0..canvas.levels() {
            let blocks = canvas.level(level).unwrap();
            assert!(
                blocks.windows(2).all(|w| w[0].rect.left() <= w[1].rect.left()),
                "level {level} out of order"
            );
        }

        let extents = canvas.extents().unwrap();
        let fills = canvas.draw(extents.expand(10), 1.0);
        assert!(!fills.is_empty());
    }
}
