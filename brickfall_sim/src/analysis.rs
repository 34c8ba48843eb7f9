// The end-to-end stability pipeline.
//
// validate -> index (`Pile::new`) -> settle -> support graph -> cascades.
//
// `solve()` is the bare contract: blocks in, `(safe_removal_count,
// total_cascade_size)` out, with default settings. `analyze()` runs the same
// pipeline under an explicit `AnalysisConfig` and returns a serializable
// `StabilityReport` carrying the two answers plus the intermediate numbers
// worth looking at (settle statistics, bounds, per-block cascade sizes).
//
// `settle_checked()` is the first half on its own: every config-driven input
// check, then settling. Anything that only needs settled positions goes
// through it so it rejects exactly what `analyze()` rejects.
//
// Input errors surface before any simulation runs. Once the pile is built
// the pipeline cannot fail.

use crate::block::{Block, Bounds};
use crate::cascade::{self, BlockCascade};
use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, AnalysisResult};
use crate::pile::Pile;
use crate::settle::SettleStats;
use serde::Serialize;
use std::time::{Duration, Instant};

/// Everything `analyze()` found out about a pile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StabilityReport {
    pub block_count: u64,
    /// Blocks that can be removed without anything else falling.
    pub safe_removal_count: u64,
    /// Blocks that are some other block's only support.
    pub critical_count: u64,
    /// Sum over critical blocks of how many others fall when it is removed.
    pub total_cascade_size: u64,
    /// Bounding box before settling.
    pub initial_bounds: Option<Bounds>,
    /// Bounding box after settling.
    pub settled_bounds: Option<Bounds>,
    pub settle: SettleStats,
    /// Cascade size per critical block, ascending by id.
    pub cascades: Vec<BlockCascade>,
    /// Wall-clock time per phase. Not serialized, so JSON output stays
    /// reproducible.
    #[serde(skip)]
    pub timings: PhaseTimings,
}

/// How long each pipeline phase took.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PhaseTimings {
    /// Validation, indexing and settling.
    pub settle: Duration,
    pub support_graph: Duration,
    pub cascades: Duration,
}

impl PhaseTimings {
    pub fn total(&self) -> Duration {
        self.settle + self.support_graph + self.cascades
    }
}

impl StabilityReport {
    /// The two headline numbers, in output order.
    pub fn answers(&self) -> (u64, u64) {
        (self.safe_removal_count, self.total_cascade_size)
    }

    /// The `n` critical blocks with the largest cascades, largest first
    /// (ties by ascending id).
    pub fn most_dangerous(&self, n: usize) -> Vec<BlockCascade> {
        let mut ranked = self.cascades.clone();
        ranked.sort_by(|a, b| b.falls.cmp(&a.falls).then(a.block.cmp(&b.block)));
        ranked.truncate(n);
        ranked
    }
}

/// Safe-removal count and total cascade size, with default settings.
pub fn solve(blocks: Vec<Block>) -> AnalysisResult<(u64, u64)> {
    analyze(blocks, &AnalysisConfig::default()).map(|report| report.answers())
}

/// Validate `blocks` against `config`, index them, and settle.
///
/// Rejects non-line blocks when `require_line_segments` is set, and runs
/// `Pile::verify_settled()` when `verify_invariants` is set.
pub fn settle_checked(
    blocks: Vec<Block>,
    config: &AnalysisConfig,
) -> AnalysisResult<(Pile, SettleStats)> {
    let misshapen = blocks
        .iter()
        .find(|b| config.require_line_segments && !b.is_line_segment());
    if let Some(bad) = misshapen {
        return Err(AnalysisError::NotALineSegment { id: bad.id() });
    }

    let mut pile = Pile::new(blocks)?;
    let stats = pile.settle(config.settle_strategy);
    if config.verify_invariants {
        pile.verify_settled();
    }
    Ok((pile, stats))
}

/// Run the full pipeline.
pub fn analyze(blocks: Vec<Block>, config: &AnalysisConfig) -> AnalysisResult<StabilityReport> {
    let initial_bounds = Bounds::of(&blocks);

    let t0 = Instant::now();
    let (pile, settle) = settle_checked(blocks, config)?;
    let t1 = Instant::now();
    let graph = pile.support_graph();
    let t2 = Instant::now();
    let summary = cascade::analyze_cascades(&graph, config.parallel_cascades);
    let t3 = Instant::now();

    let report = StabilityReport {
        block_count: pile.len() as u64,
        safe_removal_count: summary.safe_removal_count,
        critical_count: summary.critical_count,
        total_cascade_size: summary.total_cascade_size,
        initial_bounds,
        settled_bounds: pile.bounds(),
        settle,
        cascades: summary.per_block,
        timings: PhaseTimings {
            settle: t1 - t0,
            support_graph: t2 - t1,
            cascades: t3 - t2,
        },
    };
    log::info!(
        "{} blocks: {} safe to remove, {} critical, {} total cascade falls",
        report.block_count,
        report.safe_removal_count,
        report.critical_count,
        report.total_cascade_size
    );
    Ok(report)
}
