//! Cell access, painting, and frame driving.

use tracing::warn;

use crate::automaton::grid::{Coord, Grid};
use crate::cell::Paint;
use crate::session::Simulation;

/// In-bounds lattice coordinate, or `None`.
pub(crate) fn lattice_coord(grid: &Grid, x: i16, y: i16, z: i16) -> Option<Coord> {
    if x < 0 || y < 0 || z < 0 {
        return None;
    }
    let (x, y, z) = (x as usize, y as usize, z as usize);
    grid.dimensions()
        .contains(x, y, z)
        .then(|| Coord::new(x, y, z))
}

/// Writes the grid size into the three out-pointers.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Simulation, or null
/// - each out-pointer must be valid for a `u32` write, or null
///
/// # Returns
/// 0 on success, 1 on failure (null pointer)
#[no_mangle]
pub unsafe extern "C" fn ca_dimensions(
    ptr: *const Simulation,
    out_x: *mut u32,
    out_y: *mut u32,
    out_z: *mut u32,
) -> i32 {
    if ptr.is_null() || out_x.is_null() || out_y.is_null() || out_z.is_null() {
        return 1;
    }

    let dims = (*ptr).grid().dimensions();
    *out_x = dims.x as u32;
    *out_y = dims.y as u32;
    *out_z = dims.z as u32;
    0
}

/// Gets the packed value of a published cell.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Simulation, or null
///
/// # Returns
/// The packed cell byte, or 0 if out of bounds or null.
#[no_mangle]
pub unsafe extern "C" fn ca_read_cell(ptr: *const Simulation, x: i16, y: i16, z: i16) -> u8 {
    if ptr.is_null() {
        return 0;
    }

    let grid = (*ptr).grid();
    match lattice_coord(grid, x, y, z) {
        Some(c) => grid.read_at(c.x, c.y, c.z).to_bits(),
        None => 0,
    }
}

/// Stages a paint at (x, y, z). Nothing is visible until `ca_commit`.
///
/// `paint` is a palette code: 0 erase, 1 conway, 2 blocker, 3 trail,
/// 4 ant, 5 mold, 6 anti-conway, 7 crystal. Trail and ant toggle.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Simulation, or null
///
/// # Returns
/// 0 on success, 1 on failure (null pointer, out of bounds, unknown paint)
#[no_mangle]
pub unsafe extern "C" fn ca_paint(ptr: *mut Simulation, x: i16, y: i16, z: i16, paint: u8) -> i32 {
    if ptr.is_null() {
        return 1;
    }

    let paint = match Paint::from_code(paint) {
        Ok(paint) => paint,
        Err(err) => {
            warn!(%err, "ca_paint rejected");
            return 1;
        }
    };

    let (grid, rng) = (*ptr).parts_mut();
    let Some(c) = lattice_coord(grid, x, y, z) else {
        warn!(x, y, z, "ca_paint outside grid");
        return 1;
    };
    grid.paint(c.x, c.y, c.z, paint, rng);
    0
}

/// Publishes staged writes.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Simulation, or null
#[no_mangle]
pub unsafe extern "C" fn ca_commit(ptr: *mut Simulation) {
    if ptr.is_null() {
        return;
    }
    (*ptr).grid_mut().commit();
}

/// Runs one full generation regardless of the pause flag.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Simulation, or null
#[no_mangle]
pub unsafe extern "C" fn ca_tick(ptr: *mut Simulation) {
    if ptr.is_null() {
        return;
    }
    (*ptr).tick();
}

/// Advances one render frame.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Simulation, or null
///
/// # Returns
/// 1 if a generation ran this frame, otherwise 0.
#[no_mangle]
pub unsafe extern "C" fn ca_advance_frame(ptr: *mut Simulation) -> u8 {
    if ptr.is_null() {
        return 0;
    }
    u8::from((*ptr).advance_frame())
}

/// Pauses (non-zero) or resumes (zero) frame-driven ticking.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Simulation, or null
#[no_mangle]
pub unsafe extern "C" fn ca_set_paused(ptr: *mut Simulation, paused: u8) {
    if ptr.is_null() {
        return;
    }
    (*ptr).set_paused(paused != 0);
}

/// Gets the alpha renderers should apply to every cube.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Simulation, or null
///
/// # Returns
/// The grid alpha, or 0 if ptr is null.
#[no_mangle]
pub unsafe extern "C" fn ca_grid_alpha(ptr: *const Simulation) -> u8 {
    if ptr.is_null() {
        return 0;
    }
    (*ptr).grid().grid_alpha()
}

/// Clears every cell and the generation counter.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Simulation, or null
#[no_mangle]
pub unsafe extern "C" fn ca_reset(ptr: *mut Simulation) {
    if ptr.is_null() {
        return;
    }
    (*ptr).reset();
}
