//! Region extraction and import FFI functions.

use tracing::warn;

use crate::automaton;
use crate::session::Simulation;

/// Extracts a box of published cells into a flat output buffer.
///
/// # Layout
/// The buffer is filled in z,y,x order (z changes slowest, x changes fastest)
/// with packed cell bytes. This matches the layout expected by
/// `ca_import_region`. Bounds are half-open and clamped to the grid.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Simulation, or null
/// - `out_buf` must point to at least `out_len` writable bytes
///
/// # Returns
/// Number of bytes written, or 0 on error.
#[no_mangle]
pub unsafe extern "C" fn ca_extract_region(
    ptr: *const Simulation,
    out_buf: *mut u8,
    out_len: usize,
    min_x: i16,
    min_y: i16,
    min_z: i16,
    max_x: i16,
    max_y: i16,
    max_z: i16,
) -> u64 {
    if ptr.is_null() || out_buf.is_null() {
        return 0;
    }

    let grid = (*ptr).grid();
    let out = std::slice::from_raw_parts_mut(out_buf, out_len);
    let min = [min_x as i64, min_y as i64, min_z as i64];
    let max = [max_x as i64, max_y as i64, max_z as i64];

    match automaton::extract_region(grid, out, min, max) {
        Ok(written) => written as u64,
        Err(err) => {
            warn!(%err, "ca_extract_region rejected");
            0
        }
    }
}

/// Stages a box of packed cells from a flat buffer. Call `ca_commit` to
/// publish them.
///
/// # Layout
/// The buffer is expected in z,y,x order (matching `ca_extract_region`).
/// Every byte must decode to a cell; one bad byte rejects the whole import.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Simulation, or null
/// - `in_buf` must point to at least `in_len` readable bytes
///
/// # Returns
/// Number of bytes read, or 0 on error.
#[no_mangle]
pub unsafe extern "C" fn ca_import_region(
    ptr: *mut Simulation,
    in_buf: *const u8,
    in_len: usize,
    min_x: i16,
    min_y: i16,
    min_z: i16,
    max_x: i16,
    max_y: i16,
    max_z: i16,
) -> u64 {
    if ptr.is_null() || in_buf.is_null() {
        return 0;
    }

    let grid = (*ptr).grid_mut();
    let input = std::slice::from_raw_parts(in_buf, in_len);
    let min = [min_x as i64, min_y as i64, min_z as i64];
    let max = [max_x as i64, max_y as i64, max_z as i64];

    match automaton::import_region(grid, input, min, max) {
        Ok(read) => read as u64,
        Err(err) => {
            warn!(%err, "ca_import_region rejected");
            0
        }
    }
}
