//! Random scatter helpers used by the placement controller.
//!
//! All of these write pending cells; the caller commits.

use rand::Rng;
use tracing::debug;

use super::grid::{Coord, Grid};
use crate::cell::{Cell, Facing, Ground};

/// Cells scattered by one [`random_conway`] call from the controller.
pub const RANDOM_CONWAY_COUNT: usize = 200;
/// Cells marked by one [`random_ant_paths`] call from the controller.
pub const RANDOM_TRAIL_COUNT: usize = 10;

/// Uniform over every lattice coordinate.
pub fn random_coord<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Coord {
    let dims = grid.dimensions();
    Coord::new(
        rng.random_range(0..dims.x),
        rng.random_range(0..dims.y),
        rng.random_range(0..dims.z),
    )
}

/// Overwrite `count` random cells with `cell`.
pub fn random_conway<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R, count: usize, cell: Cell) {
    for _ in 0..count {
        let c = random_coord(grid, rng);
        *grid.mutable_at(c.x, c.y, c.z) = cell;
    }
    debug!(count, ?cell, "scattered cells");
}

/// Lay a trail on `count` random cells. Ants keep walking, now on a trail.
pub fn random_ant_paths<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R, count: usize) {
    for _ in 0..count {
        let c = random_coord(grid, rng);
        let target = grid.mutable_at(c.x, c.y, c.z);
        *target = match *target {
            Cell::Ant { facing, .. } => Cell::Ant {
                facing,
                ground: Ground::Trail,
            },
            _ => Cell::Trail,
        };
    }
    debug!(count, "scattered trails");
}

/// Drop one ant with a random facing on a random cell.
pub fn random_ant<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) -> Coord {
    let c = random_coord(grid, rng);
    let facing = Facing::random(rng);
    *grid.mutable_at(c.x, c.y, c.z) = Cell::Ant {
        facing,
        ground: Ground::Bare,
    };
    debug!(x = c.x, y = c.y, z = c.z, ?facing, "spawned ant");
    c
}
