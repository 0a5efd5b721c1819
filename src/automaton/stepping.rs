//! Density rules: Conway life and the passes layered on top of it.
//!
//! Every rule reads the published snapshot and writes pending cells, so
//! rules run back to back within one tick all see the same state. None of
//! them overwrite a pending ant.

use super::grid::Grid;
use crate::cell::Cell;

/// Live neighbours at or above which a live cell freezes.
pub const CRYSTAL_DENSITY: u32 = 6;
/// Crystal neighbours that make a live cell freeze.
pub const CRYSTAL_SEED: u32 = 2;
/// Mold neighbours a mold cell needs to survive without a trail nearby.
pub const MOLD_SURVIVAL: u32 = 2;

#[inline]
fn settle(out: &mut Cell, next: Cell) {
    if !out.is_ant() {
        *out = next;
    }
}

/// Conway life (B3/S23) over the Moore neighbourhood.
///
/// Only empty and live cells take part; blockers and flagged cells are
/// left alone.
pub fn conway(grid: &mut Grid) {
    grid.par_loop3d(|view, cell, out, coord| {
        if !matches!(cell, Cell::Empty | Cell::Alive) {
            return;
        }

        let next = match (cell, view.neighbors(coord, Cell::Alive)) {
            (_, 3) => Cell::Alive,
            (Cell::Alive, 2) => Cell::Alive,
            _ => Cell::Empty,
        };
        settle(out, next);
    });
}

/// Anti-life: annihilates on contact with life, otherwise B3/S23 on its own.
///
/// Births only land on cells that are still empty after earlier passes,
/// so Conway wins a contested birth.
pub fn anti_conway(grid: &mut Grid) {
    grid.par_loop3d(|view, cell, out, coord| match cell {
        Cell::Alive => {
            if view.neighbors(coord, Cell::AntiLife) > 0 {
                settle(out, Cell::Empty);
            }
        }
        Cell::AntiLife => {
            let annihilated = view.neighbors(coord, Cell::Alive) > 0;
            let n = view.neighbors(coord, Cell::AntiLife);
            if annihilated || !(2..=3).contains(&n) {
                settle(out, Cell::Empty);
            }
        }
        Cell::Empty => {
            if *out == Cell::Empty
                && view.neighbors(coord, Cell::AntiLife) == 3
                && view.neighbors(coord, Cell::Alive) == 0
            {
                *out = Cell::AntiLife;
            }
        }
        _ => {}
    });
}

/// Freeze crowded or crystal-adjacent life into crystal.
///
/// Life touching anti-life is skipped; annihilation takes precedence.
pub fn conway_crystalizer(grid: &mut Grid) {
    grid.par_loop3d(|view, cell, out, coord| {
        if cell != Cell::Alive || view.neighbors(coord, Cell::AntiLife) > 0 {
            return;
        }

        if view.neighbors(coord, Cell::Alive) >= CRYSTAL_DENSITY
            || view.neighbors(coord, Cell::Crystal) >= CRYSTAL_SEED
        {
            settle(out, Cell::Crystal);
        }
    });
}

/// Mold spreads along trails and starves away from them.
pub fn grow_mold(grid: &mut Grid) {
    grid.par_loop3d(|view, cell, out, coord| match cell {
        Cell::Trail => {
            if view.neighbors(coord, Cell::Mold) > 0 {
                settle(out, Cell::Mold);
            }
        }
        Cell::Mold => {
            if view.neighbors(coord, Cell::Trail) == 0
                && view.neighbors(coord, Cell::Mold) < MOLD_SURVIVAL
            {
                settle(out, Cell::Empty);
            }
        }
        _ => {}
    });
}
