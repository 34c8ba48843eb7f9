// Block geometry.
//
// A `Block` is an axis-aligned box of integer cells between two corners
// `lo` and `hi` (inclusive). Input blocks are unit-cross-section line
// segments, but nothing below depends on that: every algorithm works on the
// full `lo..=hi` box.
//
// Blocks are immutable except for their vertical position, which only the
// settler (`settle.rs`) changes via `drop_by()`. The x/y extents are fixed
// for the lifetime of the block.
//
// `cells()` and `footprint()` are lazy and `Clone`, so callers can iterate
// them as often as they like without allocating.

use crate::error::{AnalysisError, AnalysisResult};
use crate::types::{BlockId, Point};
use serde::Serialize;

/// An axis-aligned block of integer cells.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Block {
    id: BlockId,
    lo: Point,
    hi: Point,
}

impl Block {
    /// Build a block from its two corners.
    ///
    /// Fails with `MalformedGeometry` when `lo` is not component-wise `<=`
    /// `hi`, and with `BelowGround` when the block reaches below `z = 1`.
    pub fn new(id: BlockId, lo: Point, hi: Point) -> AnalysisResult<Self> {
        if !lo.all_le(hi) {
            return Err(AnalysisError::MalformedGeometry { id, lo, hi });
        }
        if lo.z < 1 {
            return Err(AnalysisError::BelowGround { id, z: lo.z });
        }
        Ok(Self { id, lo, hi })
    }

    pub fn id(&self) -> BlockId {
        self.id
    }

    pub fn lo(&self) -> Point {
        self.lo
    }

    pub fn hi(&self) -> Point {
        self.hi
    }

    /// Lowest occupied layer.
    pub fn bottom(&self) -> i32 {
        self.lo.z
    }

    /// Highest occupied layer.
    pub fn top(&self) -> i32 {
        self.hi.z
    }

    /// Resting directly on the ground.
    pub fn is_grounded(&self) -> bool {
        self.lo.z == 1
    }

    /// Number of cells the block occupies.
    pub fn volume(&self) -> u64 {
        let span = |a: i32, b: i32| (i64::from(b) - i64::from(a) + 1) as u64;
        span(self.lo.x, self.hi.x) * span(self.lo.y, self.hi.y) * span(self.lo.z, self.hi.z)
    }

    /// True when the block varies along at most one axis.
    pub fn is_line_segment(&self) -> bool {
        let varying = [
            self.lo.x != self.hi.x,
            self.lo.y != self.hi.y,
            self.lo.z != self.hi.z,
        ];
        varying.iter().filter(|&&v| v).count() <= 1
    }

    /// Every cell in the block, x outermost and z innermost.
    pub fn cells(&self) -> Cells {
        Cells {
            lo: self.lo,
            hi: self.hi,
            next: Some(self.lo),
        }
    }

    /// The `(x, y)` columns the block covers.
    pub fn footprint(&self) -> impl Iterator<Item = (i32, i32)> + Clone + use<> {
        let (lo, hi) = (self.lo, self.hi);
        (lo.x..=hi.x).flat_map(move |x| (lo.y..=hi.y).map(move |y| (x, y)))
    }

    /// Move the block `dz` layers down. Only the settler calls this, and only
    /// after lifting the block out of the occupancy index.
    pub(crate) fn drop_by(&mut self, dz: i32) {
        debug_assert!(dz >= 0, "blocks only fall");
        debug_assert!(
            self.lo.z - dz >= 1,
            "block {} dropped below ground",
            self.id
        );
        self.lo = self.lo.lowered(dz);
        self.hi = self.hi.lowered(dz);
    }
}

/// Lazy iterator over a block's cells. Cheap to clone; each clone restarts
/// from wherever the original was.
#[derive(Clone, Debug)]
pub struct Cells {
    lo: Point,
    hi: Point,
    next: Option<Point>,
}

impl Iterator for Cells {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        let current = self.next?;
        let mut n = current;
        if n.z < self.hi.z {
            n.z += 1;
        } else if n.y < self.hi.y {
            n.z = self.lo.z;
            n.y += 1;
        } else if n.x < self.hi.x {
            n.z = self.lo.z;
            n.y = self.lo.y;
            n.x += 1;
        } else {
            self.next = None;
            return Some(current);
        }
        self.next = Some(n);
        Some(current)
    }
}

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

/// Axis-aligned bounding box over a set of blocks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Bounds {
    pub lo: Point,
    pub hi: Point,
}

impl Bounds {
    /// Bounding box of all the given blocks, or `None` for an empty slice.
    pub fn of(blocks: &[Block]) -> Option<Self> {
        let first = blocks.first()?;
        let init = Self {
            lo: first.lo,
            hi: first.hi,
        };
        Some(blocks[1..].iter().fold(init, |b, block| Self {
            lo: b.lo.min(block.lo),
            hi: b.hi.max(block.hi),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(id: u32, lo: (i32, i32, i32), hi: (i32, i32, i32)) -> Block {
        Block::new(
            BlockId(id),
            Point::new(lo.0, lo.1, lo.2),
            Point::new(hi.0, hi.1, hi.2),
        )
        .unwrap()
    }

    #[test]
    fn rejects_inverted_corners() {
        let err = Block::new(BlockId(1), Point::new(2, 0, 1), Point::new(0, 0, 1)).unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedGeometry { .. }));
    }

    #[test]
    fn rejects_block_below_ground() {
        let err = Block::new(BlockId(3), Point::new(0, 0, 0), Point::new(0, 0, 2)).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::BelowGround {
                id: BlockId(3),
                z: 0
            }
        );
    }

    #[test]
    fn cells_of_horizontal_line() {
        let b = block(1, (0, 0, 2), (2, 0, 2));
        let cells: Vec<Point> = b.cells().collect();
        assert_eq!(
            cells,
            vec![
                Point::new(0, 0, 2),
                Point::new(1, 0, 2),
                Point::new(2, 0, 2)
            ]
        );
    }

    #[test]
    fn cells_of_vertical_line() {
        let b = block(1, (1, 1, 8), (1, 1, 9));
        let cells: Vec<Point> = b.cells().collect();
        assert_eq!(cells, vec![Point::new(1, 1, 8), Point::new(1, 1, 9)]);
    }

    #[test]
    fn cells_of_single_cube() {
        let b = block(1, (5, 5, 5), (5, 5, 5));
        assert_eq!(b.cells().count(), 1);
        assert_eq!(b.volume(), 1);
    }

    #[test]
    fn cells_cover_full_box_and_match_volume() {
        let b = block(1, (0, 0, 1), (2, 1, 3));
        let cells: Vec<Point> = b.cells().collect();
        assert_eq!(cells.len() as u64, b.volume());
        assert_eq!(b.volume(), 18);
        // No duplicates.
        let mut sorted = cells.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), cells.len());
        assert!(cells.iter().all(|c| b.lo().all_le(*c) && c.all_le(b.hi())));
    }

    #[test]
    fn cells_iterator_is_restartable() {
        let b = block(1, (0, 0, 1), (0, 3, 1));
        let cells = b.cells();
        let first: Vec<Point> = cells.clone().collect();
        let second: Vec<Point> = cells.collect();
        assert_eq!(first, second);
        assert_eq!(b.cells().collect::<Vec<_>>(), first);
    }

    #[test]
    fn footprint_ignores_height() {
        let tall = block(1, (1, 1, 1), (1, 1, 9));
        assert_eq!(tall.footprint().collect::<Vec<_>>(), vec![(1, 1)]);

        let wide = block(2, (0, 2, 3), (2, 2, 3));
        assert_eq!(
            wide.footprint().collect::<Vec<_>>(),
            vec![(0, 2), (1, 2), (2, 2)]
        );
    }

    #[test]
    fn line_segment_detection() {
        assert!(block(1, (0, 0, 1), (0, 0, 1)).is_line_segment());
        assert!(block(1, (0, 0, 1), (4, 0, 1)).is_line_segment());
        assert!(block(1, (0, 0, 1), (0, 0, 4)).is_line_segment());
        assert!(!block(1, (0, 0, 1), (1, 1, 1)).is_line_segment());
    }

    #[test]
    fn drop_moves_both_corners() {
        let mut b = block(1, (0, 0, 5), (0, 0, 7));
        b.drop_by(4);
        assert_eq!(b.lo(), Point::new(0, 0, 1));
        assert_eq!(b.hi(), Point::new(0, 0, 3));
        assert!(b.is_grounded());
    }

    #[test]
    fn bounds_of_blocks() {
        assert_eq!(Bounds::of(&[]), None);
        let blocks = vec![
            block(1, (1, 0, 1), (1, 2, 1)),
            block(2, (0, 0, 2), (2, 0, 2)),
        ];
        let bounds = Bounds::of(&blocks).unwrap();
        assert_eq!(bounds.lo, Point::new(0, 0, 1));
        assert_eq!(bounds.hi, Point::new(2, 2, 2));
    }
}
