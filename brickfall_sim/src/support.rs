// Support graph: who rests on whom.
//
// Built once from a settled pile. For each block, its *supporters* are the
// distinct blocks occupying the layer directly under its bottom, restricted
// to the columns of its footprint. Grounded blocks have no supporters. The
// reverse adjacency (*dependents*: blocks resting on a given block) is
// recorded at the same time.
//
// The relation is acyclic: a supporter's top is exactly one below its
// dependent's bottom, so heights strictly decrease along supporter edges.
//
// Supporter and dependent lists are sorted and deduplicated. Most blocks
// rest on one to three others, hence `SmallVec`.
//
// See also: `cascade.rs`, the only consumer.

use crate::block::Block;
use crate::occupancy::OccupancyIndex;
use crate::types::{BlockId, Point};
use smallvec::SmallVec;
use std::collections::BTreeMap;

/// A sorted, duplicate-free list of block ids.
pub type IdSet = SmallVec<[BlockId; 4]>;

/// Supporters and dependents for every block in a settled pile.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SupportGraph {
    supporters: BTreeMap<BlockId, IdSet>,
    dependents: BTreeMap<BlockId, IdSet>,
}

impl SupportGraph {
    /// Build the graph from settled blocks and their occupancy index.
    ///
    /// # Panics
    ///
    /// If a block above the ground has nothing under it, i.e. the pile was
    /// not settled.
    pub fn build(blocks: &[Block], index: &OccupancyIndex) -> Self {
        let graph = Self::from_supporters(blocks.iter().map(|block| {
            let below = supporters_below(block, index);
            assert!(
                block.is_grounded() || !below.is_empty(),
                "block {} floats at z={} in a settled pile",
                block.id(),
                block.bottom()
            );
            (block.id(), below)
        }));
        log::debug!(
            "support graph: {} blocks, {} support edges",
            graph.len(),
            graph.edge_count()
        );
        graph
    }

    /// Assemble a graph from explicit supporter lists. Every id mentioned as
    /// a supporter should also appear as a key.
    pub fn from_supporters<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (BlockId, S)>,
        S: IntoIterator<Item = BlockId>,
    {
        let mut supporters: BTreeMap<BlockId, IdSet> = BTreeMap::new();
        let mut dependents: BTreeMap<BlockId, IdSet> = BTreeMap::new();

        for (id, below) in entries {
            let mut set: IdSet = below.into_iter().collect();
            set.sort_unstable();
            set.dedup();
            for &s in &set {
                dependents.entry(s).or_default().push(id);
            }
            dependents.entry(id).or_default();
            supporters.insert(id, set);
        }
        for list in dependents.values_mut() {
            list.sort_unstable();
            list.dedup();
        }

        Self {
            supporters,
            dependents,
        }
    }

    /// Blocks directly under `id`. Empty for grounded or unknown blocks.
    pub fn supporters_of(&self, id: BlockId) -> &[BlockId] {
        self.supporters.get(&id).map(|s| s.as_slice()).unwrap_or(&[])
    }

    /// Blocks resting directly on `id`.
    pub fn dependents_of(&self, id: BlockId) -> &[BlockId] {
        self.dependents.get(&id).map(|s| s.as_slice()).unwrap_or(&[])
    }

    /// All block ids, ascending.
    pub fn ids(&self) -> impl Iterator<Item = BlockId> + '_ {
        self.supporters.keys().copied()
    }

    /// `(block, supporters)` pairs in ascending block order.
    pub fn iter(&self) -> impl Iterator<Item = (BlockId, &[BlockId])> + '_ {
        self.supporters.iter().map(|(&id, s)| (id, s.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.supporters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.supporters.is_empty()
    }

    /// Total number of supporter -> dependent edges.
    pub fn edge_count(&self) -> usize {
        self.supporters.values().map(|s| s.len()).sum()
    }
}

/// Distinct blocks in the layer just under `block`'s bottom.
fn supporters_below(block: &Block, index: &OccupancyIndex) -> IdSet {
    if block.is_grounded() {
        return IdSet::new();
    }
    let z = block.bottom() - 1;
    let mut found: IdSet = block
        .footprint()
        .filter_map(|(x, y)| index.get(Point::new(x, y, z)))
        .filter(|&id| id != block.id())
        .collect();
    found.sort_unstable();
    found.dedup();
    found
}
