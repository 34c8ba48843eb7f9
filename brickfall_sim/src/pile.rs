// A pile of blocks together with its occupancy index.
//
// `Pile` is the single owner of the mutable state the pipeline works on:
// the block list and the `OccupancyIndex` describing where those blocks are.
// The two always change together (only `settle()` moves blocks, and it keeps
// the index in step), and later stages borrow the index from here instead
// of building their own copy.
//
// Construction validates the input against the index invariants: block ids
// must be unique and no two blocks may share a cell. After that, everything
// the pile does is total.
//
// `verify()` / `verify_settled()` re-derive the invariants from scratch and
// panic on any disagreement. They are for tests and for the
// `verify_invariants` config switch, not for normal control flow.

use crate::block::{Block, Bounds};
use crate::config::SettleStrategy;
use crate::error::{AnalysisError, AnalysisResult};
use crate::occupancy::OccupancyIndex;
use crate::settle::{self, SettleStats};
use crate::support::SupportGraph;
use std::collections::BTreeSet;

#[derive(Clone, Debug)]
pub struct Pile {
    blocks: Vec<Block>,
    index: OccupancyIndex,
}

impl Pile {
    /// Index `blocks`, rejecting duplicate ids and overlapping cells.
    pub fn new(blocks: Vec<Block>) -> AnalysisResult<Self> {
        let mut seen = BTreeSet::new();
        for block in &blocks {
            if !seen.insert(block.id()) {
                return Err(AnalysisError::DuplicateId { id: block.id() });
            }
        }

        let mut index = OccupancyIndex::new();
        for block in &blocks {
            for cell in block.cells() {
                index.try_put(cell, block.id())?;
            }
        }
        log::debug!("indexed {} blocks, {} cells", blocks.len(), index.len());

        Ok(Self { blocks, index })
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn index(&self) -> &OccupancyIndex {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::of(&self.blocks)
    }

    /// Let every block fall as far as it can.
    pub fn settle(&mut self, strategy: SettleStrategy) -> SettleStats {
        settle::settle(&mut self.blocks, &mut self.index, strategy)
    }

    /// Support graph of the current (settled) positions.
    pub fn support_graph(&self) -> SupportGraph {
        SupportGraph::build(&self.blocks, &self.index)
    }

    /// Give up the index and hand back the blocks at their current positions.
    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }

    /// Check that the index holds exactly the blocks' cells and nothing
    /// else, and that nothing is below ground.
    ///
    /// # Panics
    ///
    /// On any inconsistency.
    pub fn verify(&self) {
        let mut expected_cells = 0usize;
        for block in &self.blocks {
            assert!(block.bottom() >= 1, "block {} is below ground", block.id());
            for cell in block.cells() {
                assert_eq!(
                    self.index.get(cell),
                    Some(block.id()),
                    "index disagrees with block {} at {cell}",
                    block.id()
                );
                expected_cells += 1;
            }
        }
        // Blocks' cells all map back to their own block, so if the counts
        // agree there are no stray or shared entries.
        assert_eq!(
            self.index.len(),
            expected_cells,
            "index holds cells that belong to no block"
        );
    }

    /// `verify()`, plus: no block can fall any further, and a non-empty
    /// pile has at least one block on the ground.
    pub fn verify_settled(&self) {
        self.verify();
        for block in &self.blocks {
            assert_eq!(
                settle::rest_layer(block, &self.index),
                block.bottom(),
                "block {} can still fall",
                block.id()
            );
        }
        assert!(
            self.blocks.is_empty() || self.blocks.iter().any(Block::is_grounded),
            "settled pile has nothing on the ground"
        );
    }
}
