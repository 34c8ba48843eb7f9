// Sparse occupancy index: which block holds which cell.
//
// The index maps every occupied `Point` to the `BlockId` sitting there.
// Unlike a dense voxel grid it has no fixed extent, so blocks can be
// anywhere in `i32` space; unoccupied cells simply have no entry.
//
// Backed by an `FxHashMap`. The index is only ever probed point-by-point,
// never iterated, so hash order cannot leak into results.
//
// Invariant: two blocks never share a cell. `try_put()` reports a conflict
// as an input error (used while loading blocks); `put()` treats a conflict
// as a bug and panics (used while settling, when the pile is already known
// to be valid).
//
// See also: `pile.rs`, which owns the index alongside the blocks, and
// `settle.rs` / `support.rs`, which read and mutate it.

use crate::block::Block;
use crate::error::{AnalysisError, AnalysisResult};
use crate::types::{BlockId, Point};
use rustc_hash::FxHashMap;

/// Sparse `Point -> BlockId` map.
#[derive(Clone, Debug, Default)]
pub struct OccupancyIndex {
    cells: FxHashMap<Point, BlockId>,
}

impl OccupancyIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Block occupying `point`, if any.
    pub fn get(&self, point: Point) -> Option<BlockId> {
        self.cells.get(&point).copied()
    }

    /// Is `point` occupied by some block other than `me`?
    pub fn occupied_by_other(&self, point: Point, me: BlockId) -> bool {
        self.get(point).is_some_and(|id| id != me)
    }

    /// Record `id` at `point`. Re-putting the same id is a no-op.
    ///
    /// # Panics
    ///
    /// If `point` is already held by a different block.
    pub fn put(&mut self, point: Point, id: BlockId) {
        if let Some(previous) = self.cells.insert(point, id) {
            assert_eq!(
                previous, id,
                "occupancy invariant violated: {point} held by {previous}, overwritten by {id}"
            );
        }
    }

    /// Like `put()`, but reports a conflict instead of panicking. The index
    /// is left unchanged on error.
    pub fn try_put(&mut self, point: Point, id: BlockId) -> AnalysisResult<()> {
        match self.cells.get(&point) {
            Some(&first) if first != id => Err(AnalysisError::Overlap {
                cell: point,
                first,
                second: id,
            }),
            _ => {
                self.cells.insert(point, id);
                Ok(())
            }
        }
    }

    /// Clear `point`, returning whoever held it.
    pub fn remove(&mut self, point: Point) -> Option<BlockId> {
        self.cells.remove(&point)
    }

    /// Record every cell of `block`. Panics on overlap, see `put()`.
    pub fn insert_block(&mut self, block: &Block) {
        for cell in block.cells() {
            self.put(cell, block.id());
        }
    }

    /// Clear every cell of `block`.
    ///
    /// # Panics
    ///
    /// If any of the block's cells is not recorded as belonging to it: the
    /// index and the block's position have drifted apart.
    pub fn remove_block(&mut self, block: &Block) {
        for cell in block.cells() {
            let removed = self.remove(cell);
            assert_eq!(
                removed,
                Some(block.id()),
                "occupancy invariant violated: {cell} expected to hold {}",
                block.id()
            );
        }
    }

    /// Number of occupied cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
