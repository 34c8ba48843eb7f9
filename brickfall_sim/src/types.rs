// Core types shared across the analysis.
//
// Defines spatial coordinates (`Point`) and block identifiers (`BlockId`).
// Both are small `Copy` values with a total order so they can key `BTreeMap`s
// and `BTreeSet`s, and both derive `Serialize` / `Deserialize` so reports and
// configs can round-trip through JSON.
//
// See also: `block.rs` for the `Block` shape built from two `Point`s,
// `occupancy.rs` for the `Point -> BlockId` index.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Spatial types
// ---------------------------------------------------------------------------

/// A cell position in the integer 3D grid.
///
/// `z` is the vertical axis: gravity pulls towards smaller `z`, and the
/// ground is the plane `z = 0`, so the lowest layer a block can occupy is
/// `z = 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The same column, `dz` layers lower.
    pub const fn lowered(self, dz: i32) -> Self {
        Self::new(self.x, self.y, self.z - dz)
    }

    /// Component-wise `<=`.
    pub fn all_le(self, other: Self) -> bool {
        self.x <= other.x && self.y <= other.y && self.z <= other.z
    }

    /// Component-wise minimum.
    pub fn min(self, other: Self) -> Self {
        Self::new(
            self.x.min(other.x),
            self.y.min(other.y),
            self.z.min(other.z),
        )
    }

    /// Component-wise maximum.
    pub fn max(self, other: Self) -> Self {
        Self::new(
            self.x.max(other.x),
            self.y.max(other.y),
            self.z.max(other.z),
        )
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

// ---------------------------------------------------------------------------
// Block IDs
// ---------------------------------------------------------------------------

/// Identifier for a block. Assigned 1-based in input order by whoever builds
/// the block list; the analysis only requires uniqueness.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockId(pub u32);

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
