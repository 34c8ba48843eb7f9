// brickfall_sim: structural stability analysis for piles of blocks.
//
// Given axis-aligned integer blocks floating in space, this crate lets them
// fall under gravity until everything rests on the ground or on something
// else, works out which block rests on which, and then asks, for every
// block: can it be removed safely, and if not, how many others come down
// with it?
//
// The crate is a pure library: no I/O, no printing, no parsing. Text input
// and the command-line front end live in `brickfall_cli`.
//
// Module overview:
// - `types.rs`:     Point, BlockId.
// - `block.rs`:     Block (corners, cell/footprint iteration) and Bounds.
// - `error.rs`:     AnalysisError, for invalid input detected before simulating.
// - `occupancy.rs`: Sparse Point -> BlockId index.
// - `relax.rs`:     Sweep-until-no-change combinator shared by settling and
//                   cascade simulation.
// - `settle.rs`:    Gravity settling (relaxation, and a sorted single pass).
// - `support.rs`:   SupportGraph: supporters / dependents of each block.
// - `cascade.rs`:   Critical blocks and chain-reaction sizes.
// - `pile.rs`:      Pile, which owns the blocks and their index through the pipeline.
// - `config.rs`:    AnalysisConfig, loadable from JSON.
// - `analysis.rs`:  `solve()` / `analyze()` and the StabilityReport.
//
// **Determinism.** Anything that is iterated is kept in input order or in a
// `BTreeMap`/`BTreeSet`. The only hash map is the occupancy index, which is
// probed point by point and never iterated. Parallel cascade simulation
// collects results in block order, so output never depends on scheduling.

pub mod analysis;
pub mod block;
pub mod cascade;
pub mod config;
pub mod error;
pub mod occupancy;
pub mod pile;
pub mod relax;
pub mod settle;
pub mod support;
pub mod types;

pub use analysis::{PhaseTimings, StabilityReport, analyze, settle_checked, solve};
pub use block::{Block, Bounds};
pub use config::{AnalysisConfig, SettleStrategy};
pub use error::{AnalysisError, AnalysisResult};
pub use types::{BlockId, Point};
