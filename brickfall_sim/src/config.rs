// Analysis configuration.
//
// All tunable behavior of the pipeline lives in `AnalysisConfig`, loadable
// from JSON. Every field has a default and the struct is `#[serde(default)]`,
// so a config file only needs to mention what it changes.
//
// None of these settings change the answer for a valid pile. They choose
// between equivalent algorithms (`settle_strategy`, `parallel_cascades`),
// tighten input validation (`require_line_segments`), or add self-checks
// (`verify_invariants`).
//
// See also: `analysis.rs`, which reads the config, and the `brickfall`
// binary, which loads it from `--config` and lets flags override it.

use serde::{Deserialize, Serialize};

/// How the settler reaches the fixed point. See `settle.rs`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettleStrategy {
    /// Repeated full sweeps until nothing moves.
    #[default]
    Relaxation,
    /// One pass in ascending bottom-layer order.
    SortedPass,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Settling algorithm.
    pub settle_strategy: SettleStrategy,

    /// Run the per-block cascade simulations on the rayon pool. They are
    /// independent of each other, so results are identical either way.
    pub parallel_cascades: bool,

    /// Reject blocks that extend along more than one axis.
    pub require_line_segments: bool,

    /// After settling, cross-check the occupancy index against block
    /// positions and the ground invariant. Panics on mismatch.
    pub verify_invariants: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            settle_strategy: SettleStrategy::Relaxation,
            parallel_cascades: true,
            require_line_segments: true,
            verify_invariants: false,
        }
    }
}

impl AnalysisConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
