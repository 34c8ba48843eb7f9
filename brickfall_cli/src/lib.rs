// brickfall_cli: text front end for the brickfall stability analysis.
//
// Everything outside `brickfall_sim` lives here: reading the
// snapshot text format, rendering reports, and the `brickfall` binary
// (`main.rs`). The binary is a thin argument shim over this library, so
// parsing and rendering are tested without spawning processes.
//
// Module overview:
// - `snapshot.rs`: `x,y,z~x,y,z` line format <-> `Vec<Block>`.
// - `report.rs`:   Plain-text and JSON rendering of a `StabilityReport`.
//
// Dependencies: `brickfall_sim` for the analysis itself.

pub mod report;
pub mod snapshot;

use brickfall_sim::{AnalysisConfig, AnalysisError, StabilityReport, analyze, settle_checked};
use snapshot::{SnapshotError, format_snapshot, parse_snapshot};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunError {
    #[error("could not parse snapshot: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("analysis failed: {0}")]
    Analysis(#[from] AnalysisError),
}

/// Parse `text` and run the analysis on it.
pub fn run(text: &str, config: &AnalysisConfig) -> Result<StabilityReport, RunError> {
    let blocks = parse_snapshot(text)?;
    log::debug!("parsed {} blocks", blocks.len());
    Ok(analyze(blocks, config)?)
}

/// Parse `text`, settle it, and render the settled positions back into
/// snapshot format. Applies the same input checks as `run()`.
pub fn settled_snapshot(text: &str, config: &AnalysisConfig) -> Result<String, RunError> {
    let (pile, stats) = settle_checked(parse_snapshot(text)?, config)?;
    log::debug!("settled snapshot: {} moves", stats.moves);
    Ok(format_snapshot(&pile.into_blocks()))
}
