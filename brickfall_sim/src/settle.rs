// Gravity settling.
//
// Lowers every block until it rests on the ground (`z = 1`) or on another
// block, mutating block positions and the occupancy index together.
//
// ## Per-block drop rule
//
// For a block whose bottom is at layer `b`, scan layers `b - 1, b - 2, ..., 1`.
// The first layer where any cell under the block's footprint is held by a
// different block is the layer it lands on, so its new bottom is one above
// that. If every layer down to 1 is clear, the new bottom is 1. A block that
// moves is lifted out of the index, shifted, and reinserted.
//
// ## Strategies
//
// - `settle_relaxation()`: full sweeps over all blocks in input order, until a
//   sweep moves nothing (`relax::until_stable`). A block only sees blocks at
//   their *current* positions, some of which may still fall later in the same
//   sweep, so several sweeps are normally needed. Order inside a sweep does
//   not change the final positions.
// - `settle_sorted()`: one pass in ascending order of bottom layer. Every block
//   below a given block in the same column has a lower bottom and has already
//   reached its final position when that block is dropped, so one pass
//   suffices. Property tests (`tests/prop_settle.rs`) check that both
//   strategies agree.
//
// Both are idempotent: settling a settled pile moves nothing.

use crate::block::Block;
use crate::config::SettleStrategy;
use crate::occupancy::OccupancyIndex;
use crate::relax;
use crate::types::Point;
use smallvec::SmallVec;

/// What a settle run did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct SettleStats {
    /// Full passes over the block list (including the final quiet one for
    /// relaxation).
    pub sweeps: usize,
    /// Individual block moves.
    pub moves: usize,
}

/// Settle with the chosen strategy.
pub fn settle(
    blocks: &mut [Block],
    index: &mut OccupancyIndex,
    strategy: SettleStrategy,
) -> SettleStats {
    let stats = match strategy {
        SettleStrategy::Relaxation => settle_relaxation(blocks, index),
        SettleStrategy::SortedPass => settle_sorted(blocks, index),
    };
    log::debug!(
        "settled {} blocks with {:?}: {} sweeps, {} moves",
        blocks.len(),
        strategy,
        stats.sweeps,
        stats.moves
    );
    stats
}

/// Sweep-until-stable settling.
pub fn settle_relaxation(blocks: &mut [Block], index: &mut OccupancyIndex) -> SettleStats {
    let outcome = relax::until_stable(|| {
        blocks
            .iter_mut()
            .map(|block| drop_block(block, index))
            .filter(|&moved| moved)
            .count()
    });
    SettleStats {
        sweeps: outcome.sweeps,
        moves: outcome.changes,
    }
}

/// Single pass, lowest blocks first (ties broken by id).
pub fn settle_sorted(blocks: &mut [Block], index: &mut OccupancyIndex) -> SettleStats {
    let mut order: Vec<usize> = (0..blocks.len()).collect();
    order.sort_by_key(|&i| (blocks[i].bottom(), blocks[i].id()));

    let moves = order
        .into_iter()
        .filter(|&i| drop_block(&mut blocks[i], index))
        .count();
    SettleStats { sweeps: 1, moves }
}

/// Bottom layer `block` would come to rest on, given the current index.
pub fn rest_layer(block: &Block, index: &OccupancyIndex) -> i32 {
    let footprint: SmallVec<[(i32, i32); 8]> = block.footprint().collect();
    for z in (1..block.bottom()).rev() {
        let blocked = footprint
            .iter()
            .any(|&(x, y)| index.occupied_by_other(Point::new(x, y, z), block.id()));
        if blocked {
            return z + 1;
        }
    }
    1
}

/// Apply the drop rule to one block. Returns whether it moved.
fn drop_block(block: &mut Block, index: &mut OccupancyIndex) -> bool {
    // Grounded blocks can't go anywhere; skip the scan.
    if block.is_grounded() {
        return false;
    }
    let rest = rest_layer(block, index);
    let dz = block.bottom() - rest;
    assert!(
        dz >= 0,
        "block {} would rise from z={} to z={rest}",
        block.id(),
        block.bottom()
    );
    if dz == 0 {
        return false;
    }

    index.remove_block(block);
    block.drop_by(dz);
    index.insert_block(block);
    log::trace!("block {} fell {dz} to z={}", block.id(), block.bottom());
    true
}
