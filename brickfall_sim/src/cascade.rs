// Chain-reaction analysis over the support graph.
//
// A block is *critical* if it is the only supporter of at least one other
// block; removing it would make that block fall. Every other block is safe
// to remove.
//
// For each critical block we simulate its removal: the fallen set starts as
// `{root}`, and each sweep adds every block whose supporters are all in the
// fallen set (grounded blocks, with no supporters, never fall). Sweeps repeat
// until one adds nothing (`relax::until_stable`). The cascade size is
// `|fallen| - 1`.
//
// Removals are hypothetical and independent: each simulation starts from the
// intact graph. That makes them embarrassingly parallel, so
// `analyze_cascades()` can fan them out over rayon. Results are collected in
// ascending block order either way.
//
// See also: `support.rs` for the graph, `analysis.rs` for the pipeline.

use crate::relax;
use crate::support::SupportGraph;
use crate::types::BlockId;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeSet;

/// Outcome of removing one block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cascade {
    /// The removed block.
    pub root: BlockId,
    /// Everything that ends up falling, including `root`.
    pub fallen: BTreeSet<BlockId>,
    /// Relaxation sweeps run, including the final quiet one.
    pub sweeps: usize,
}

impl Cascade {
    /// Blocks that fall in addition to the root.
    pub fn size(&self) -> u64 {
        (self.fallen.len() - 1) as u64
    }
}

/// Per-block cascade size, as reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct BlockCascade {
    pub block: BlockId,
    pub falls: u64,
}

/// Everything the cascade analysis produces.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CascadeSummary {
    /// Blocks whose removal makes nothing else fall.
    pub safe_removal_count: u64,
    /// Sum of cascade sizes over all critical blocks.
    pub total_cascade_size: u64,
    /// Number of critical blocks.
    pub critical_count: u64,
    /// Cascade size of each critical block, ascending by id.
    pub per_block: Vec<BlockCascade>,
}

/// Blocks that are the sole supporter of some other block.
pub fn critical_blocks(graph: &SupportGraph) -> BTreeSet<BlockId> {
    graph
        .iter()
        .filter_map(|(_, below)| match below {
            [only] => Some(*only),
            _ => None,
        })
        .collect()
}

/// Blocks that can be removed without anything else falling.
pub fn safe_removal_count(graph: &SupportGraph) -> u64 {
    (graph.len() - critical_blocks(graph).len()) as u64
}

/// Simulate removing `root` from an otherwise intact pile.
pub fn cascade_from(graph: &SupportGraph, root: BlockId) -> Cascade {
    let mut fallen = BTreeSet::from([root]);
    let outcome = relax::until_stable(|| {
        let mut added = 0;
        for (id, below) in graph.iter() {
            if below.is_empty() || fallen.contains(&id) {
                continue;
            }
            if below.iter().all(|s| fallen.contains(s)) {
                fallen.insert(id);
                added += 1;
            }
        }
        added
    });
    Cascade {
        root,
        fallen,
        sweeps: outcome.sweeps,
    }
}

/// Run the full cascade analysis.
pub fn analyze_cascades(graph: &SupportGraph, parallel: bool) -> CascadeSummary {
    let critical: Vec<BlockId> = critical_blocks(graph).into_iter().collect();

    let measure = |&block: &BlockId| BlockCascade {
        block,
        falls: cascade_from(graph, block).size(),
    };
    let per_block: Vec<BlockCascade> = if parallel {
        critical.par_iter().map(measure).collect()
    } else {
        critical.iter().map(measure).collect()
    };

    let total_cascade_size = per_block.iter().map(|c| c.falls).sum();
    let critical_count = critical.len() as u64;
    let summary = CascadeSummary {
        safe_removal_count: graph.len() as u64 - critical_count,
        total_cascade_size,
        critical_count,
        per_block,
    };
    log::debug!(
        "cascades: {} critical of {} blocks, total {} falls",
        summary.critical_count,
        graph.len(),
        summary.total_cascade_size
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(entries: &[(u32, &[u32])]) -> SupportGraph {
        SupportGraph::from_supporters(
            entries
                .iter()
                .map(|&(id, below)| (BlockId(id), below.iter().map(|&s| BlockId(s)))),
        )
    }

    fn ids(raw: &[u32]) -> BTreeSet<BlockId> {
        raw.iter().map(|&n| BlockId(n)).collect()
    }

    /// Supports of the settled seven-block sample pile.
    fn sample() -> SupportGraph {
        graph(&[
            (1, &[]),
            (2, &[1]),
            (3, &[1]),
            (4, &[2, 3]),
            (5, &[2, 3]),
            (6, &[4, 5]),
            (7, &[6]),
        ])
    }

    #[test]
    fn three_stack() {
        let g = graph(&[(1, &[]), (2, &[1]), (3, &[2])]);
        assert_eq!(critical_blocks(&g), ids(&[1, 2]));
        assert_eq!(safe_removal_count(&g), 1);
        assert_eq!(cascade_from(&g, BlockId(1)).size(), 2);
        assert_eq!(cascade_from(&g, BlockId(2)).size(), 1);

        let summary = analyze_cascades(&g, false);
        assert_eq!(summary.safe_removal_count, 1);
        assert_eq!(summary.total_cascade_size, 3);
    }

    #[test]
    fn independent_grounded_blocks() {
        let g = graph(&[(1, &[]), (2, &[])]);
        let summary = analyze_cascades(&g, false);
        assert_eq!(summary.critical_count, 0);
        assert_eq!(summary.safe_removal_count, 2);
        assert_eq!(summary.total_cascade_size, 0);
        assert!(summary.per_block.is_empty());
    }

    #[test]
    fn doubly_supported_block_has_no_critical_supporter() {
        let g = graph(&[(1, &[]), (2, &[]), (3, &[1, 2])]);
        assert!(critical_blocks(&g).is_empty());
        assert_eq!(safe_removal_count(&g), 3);
        // Removing one supporter alone brings nothing down.
        assert_eq!(cascade_from(&g, BlockId(1)).size(), 0);
    }

    #[test]
    fn sample_answers() {
        let g = sample();
        assert_eq!(critical_blocks(&g), ids(&[1, 6]));
        let summary = analyze_cascades(&g, false);
        assert_eq!(summary.safe_removal_count, 5);
        assert_eq!(summary.total_cascade_size, 7);
        assert_eq!(
            summary.per_block,
            vec![
                BlockCascade {
                    block: BlockId(1),
                    falls: 6
                },
                BlockCascade {
                    block: BlockId(6),
                    falls: 1
                },
            ]
        );
    }

    #[test]
    fn parallel_matches_sequential() {
        let g = sample();
        assert_eq!(analyze_cascades(&g, true), analyze_cascades(&g, false));
    }

    #[test]
    fn safe_plus_critical_is_total() {
        let g = sample();
        let summary = analyze_cascades(&g, true);
        assert_eq!(
            summary.safe_removal_count + summary.critical_count,
            g.len() as u64
        );
    }

    #[test]
    fn cascade_reaches_fixed_point() {
        let g = sample();
        let cascade = cascade_from(&g, BlockId(1));
        assert!(cascade.fallen.contains(&BlockId(1)));
        // Nothing outside the fallen set has all its supporters inside it.
        for (id, below) in g.iter() {
            if cascade.fallen.contains(&id) || below.is_empty() {
                continue;
            }
            assert!(!below.iter().all(|s| cascade.fallen.contains(s)));
        }
        // Everything falls in the first sweep (ids ascend with height), and
        // the second is quiet.
        assert_eq!(cascade.fallen.len(), 7);
        assert_eq!(cascade.sweeps, 2);
    }

    #[test]
    fn grounded_blocks_never_fall() {
        // 3 rests on grounded 1 and 2; removing 1 leaves 2 standing.
        let g = graph(&[(1, &[]), (2, &[]), (3, &[1])]);
        let cascade = cascade_from(&g, BlockId(1));
        assert_eq!(cascade.fallen, ids(&[1, 3]));
    }

    #[test]
    fn partial_support_loss_does_not_topple() {
        // 4 rests on 2 and 3; 2 and 3 both rest on 1 alone. Removing 2 is
        // harmless, removing 1 takes everything.
        let g = graph(&[(1, &[]), (2, &[1]), (3, &[1]), (4, &[2, 3])]);
        assert_eq!(cascade_from(&g, BlockId(2)).size(), 0);
        assert_eq!(cascade_from(&g, BlockId(1)).fallen, ids(&[1, 2, 3, 4]));
    }
}
