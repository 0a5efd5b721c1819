//! Region extraction and import in packed form.
//!
//! This is where cells cross into the 8-bit encoding, for renderers and
//! the C ABI.

use super::grid::{Coord, Grid};
use crate::cell::Cell;
use crate::error::{EngineError, Result};

/// Half-open box `[min, max)` clamped to the grid, or `None` if empty.
fn clamp_box(grid: &Grid, min: [i64; 3], max: [i64; 3]) -> Option<(Coord, Coord)> {
    let dims = grid.dimensions();
    let limits = [dims.x as i64, dims.y as i64, dims.z as i64];
    let lo: Vec<usize> = (0..3).map(|a| min[a].clamp(0, limits[a]) as usize).collect();
    let hi: Vec<usize> = (0..3).map(|a| max[a].clamp(0, limits[a]) as usize).collect();

    if lo[0] >= hi[0] || lo[1] >= hi[1] || lo[2] >= hi[2] {
        return None;
    }
    Some((Coord::new(lo[0], lo[1], lo[2]), Coord::new(hi[0], hi[1], hi[2])))
}

/// Bytes needed for the clamped region.
pub fn region_len(grid: &Grid, min: [i64; 3], max: [i64; 3]) -> usize {
    match clamp_box(grid, min, max) {
        Some((lo, hi)) => (hi.x - lo.x) * (hi.y - lo.y) * (hi.z - lo.z),
        None => 0,
    }
}

/// Copy published cells in `[min, max)` into `out` as packed bytes.
///
/// # Layout
/// z,y,x order (z changes slowest, x fastest), matching [`import_region`].
///
/// # Returns
/// Number of bytes written.
pub fn extract_region(grid: &Grid, out: &mut [u8], min: [i64; 3], max: [i64; 3]) -> Result<usize> {
    let Some((lo, hi)) = clamp_box(grid, min, max) else {
        return Ok(0);
    };
    let needed = region_len(grid, min, max);
    if out.len() < needed {
        return Err(EngineError::BufferTooSmall {
            needed,
            got: out.len(),
        });
    }

    let mut offset = 0;
    for z in lo.z..hi.z {
        for y in lo.y..hi.y {
            for x in lo.x..hi.x {
                out[offset] = grid.read_at(x, y, z).to_bits();
                offset += 1;
            }
        }
    }
    Ok(offset)
}

/// Stage packed bytes from `input` into the pending cells of `[min, max)`.
///
/// The whole buffer is decoded before anything is written, so a bad byte
/// leaves the grid untouched.
///
/// # Returns
/// Number of bytes read.
pub fn import_region(grid: &mut Grid, input: &[u8], min: [i64; 3], max: [i64; 3]) -> Result<usize> {
    let Some((lo, hi)) = clamp_box(grid, min, max) else {
        return Ok(0);
    };
    let needed = region_len(grid, min, max);
    if input.len() < needed {
        return Err(EngineError::BufferTooSmall {
            needed,
            got: input.len(),
        });
    }

    let cells = input[..needed]
        .iter()
        .map(|&bits| Cell::from_bits(bits))
        .collect::<Result<Vec<Cell>>>()?;

    let mut offset = 0;
    for z in lo.z..hi.z {
        for y in lo.y..hi.y {
            for x in lo.x..hi.x {
                *grid.mutable_at(x, y, z) = cells[offset];
                offset += 1;
            }
        }
    }
    Ok(offset)
}
