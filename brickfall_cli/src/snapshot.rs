// Snapshot text format.
//
// One block per line, as its two corners separated by `~`:
//
//     1,0,1~1,2,1
//     0,0,2~2,0,2
//
// Blocks get ids 1, 2, 3, ... in line order. Blank lines are skipped and do
// not consume an id; whitespace around a line or a coordinate is ignored.
// Every error carries the 1-based line number it came from.

use brickfall_sim::{AnalysisError, Block, BlockId, Point};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("line {line}: expected `x,y,z~x,y,z`, found no `~`")]
    MissingSeparator { line: usize },

    #[error("line {line}: expected 3 coordinates, found {found}")]
    WrongArity { line: usize, found: usize },

    #[error("line {line}: invalid coordinate {text:?}")]
    BadCoordinate { line: usize, text: String },

    #[error("line {line}: {source}")]
    Block {
        line: usize,
        #[source]
        source: AnalysisError,
    },
}

/// Parse a whole snapshot.
pub fn parse_snapshot(text: &str) -> Result<Vec<Block>, SnapshotError> {
    let mut blocks = Vec::new();
    for (i, raw) in text.lines().enumerate() {
        let line = i + 1;
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }
        let id = BlockId(blocks.len() as u32 + 1);
        blocks.push(parse_block(id, raw, line)?);
    }
    Ok(blocks)
}

/// Parse one `x,y,z~x,y,z` line into a block with the given id.
pub fn parse_block(id: BlockId, text: &str, line: usize) -> Result<Block, SnapshotError> {
    let (lo, hi) = text
        .split_once('~')
        .ok_or(SnapshotError::MissingSeparator { line })?;
    let lo = parse_point(lo, line)?;
    let hi = parse_point(hi, line)?;
    Block::new(id, lo, hi).map_err(|source| SnapshotError::Block { line, source })
}

fn parse_point(text: &str, line: usize) -> Result<Point, SnapshotError> {
    let parts: Vec<&str> = text.split(',').map(str::trim).collect();
    let [x, y, z] = parts[..] else {
        return Err(SnapshotError::WrongArity {
            line,
            found: parts.len(),
        });
    };
    let coord = |s: &str| {
        s.parse::<i32>().map_err(|_| SnapshotError::BadCoordinate {
            line,
            text: s.to_string(),
        })
    };
    Ok(Point::new(coord(x)?, coord(y)?, coord(z)?))
}

/// Render blocks back into snapshot text, one line each.
pub fn format_snapshot(blocks: &[Block]) -> String {
    blocks
        .iter()
        .map(|b| {
            let (lo, hi) = (b.lo(), b.hi());
            format!("{},{},{}~{},{},{}\n", lo.x, lo.y, lo.z, hi.x, hi.y, hi.z)
        })
        .collect()
}
