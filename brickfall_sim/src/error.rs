// Input errors for the stability analysis.
//
// Everything here is detected before any simulation starts: block
// construction rejects bad corners, and building the initial occupancy index
// rejects overlapping or duplicated blocks. Once a `Pile` exists the
// analysis is total; internal consistency failures after that point are bugs
// and panic instead of appearing here.

use crate::types::{BlockId, Point};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("block {id} has malformed corners: {lo} is not component-wise <= {hi}")]
    MalformedGeometry { id: BlockId, lo: Point, hi: Point },

    #[error("block {id} starts at z={z}, below the lowest layer (z=1)")]
    BelowGround { id: BlockId, z: i32 },

    #[error("block {id} extends along more than one axis")]
    NotALineSegment { id: BlockId },

    #[error("block id {id} appears more than once")]
    DuplicateId { id: BlockId },

    #[error("blocks {first} and {second} both occupy {cell}")]
    Overlap {
        cell: Point,
        first: BlockId,
        second: BlockId,
    },
}

pub type AnalysisResult<T> = std::result::Result<T, AnalysisError>;
