//! Langton's ant on a 3D lattice.
//!
//! Each ant turns according to what it stands on, leaves a cell behind and
//! steps once. A step is staged as a change-set: every departure lands in
//! the pending buffer first, then every arrival, so no ant is moved twice
//! and no ant is lost to a write made by another.
//!
//! | ground | turn              | leaves | step       |
//! |--------|-------------------|--------|------------|
//! | Bare   | counter-clockwise | Trail  | in plane   |
//! | Trail  | clockwise         | Empty  | in plane   |
//! | Conway | clockwise         | Alive  | along z    |

use std::collections::HashSet;

use tracing::debug;

use super::grid::{Axis, Coord, Grid, GridView};
use crate::cell::{Cell, Facing, Ground};

/// One ant's staged step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AntMove {
    pub from: Coord,
    pub to: Coord,
    pub facing: Facing,
    pub leaves: Cell,
}

/// Neighbour in the ant's plane.
pub fn planar_step(view: &GridView<'_>, at: Coord, facing: Facing) -> Coord {
    match facing {
        Facing::Left => Coord::new(view.minus(Axis::X, at.x), at.y, at.z),
        Facing::Right => Coord::new(view.add(Axis::X, at.x), at.y, at.z),
        Facing::Forward => Coord::new(at.x, view.add(Axis::Y, at.y), at.z),
        Facing::Backward => Coord::new(at.x, view.minus(Axis::Y, at.y), at.z),
    }
}

/// Neighbour above or below, used when the ant stands on live cells.
pub fn lateral_step(view: &GridView<'_>, at: Coord, facing: Facing) -> Coord {
    match facing {
        Facing::Left | Facing::Forward => Coord::new(at.x, at.y, view.add(Axis::Z, at.z)),
        Facing::Right | Facing::Backward => Coord::new(at.x, at.y, view.minus(Axis::Z, at.z)),
    }
}

/// Work out where one ant goes next.
pub fn plan_move(view: &GridView<'_>, from: Coord, facing: Facing, ground: Ground) -> AntMove {
    let (facing, leaves) = match ground {
        Ground::Bare => (facing.counter_clockwise(), Cell::Trail),
        Ground::Trail => (facing.clockwise(), Cell::Empty),
        Ground::Conway => (facing.clockwise(), Cell::Alive),
    };
    let to = match ground {
        Ground::Conway => lateral_step(view, from, facing),
        Ground::Bare | Ground::Trail => planar_step(view, from, facing),
    };
    AntMove {
        from,
        to,
        facing,
        leaves,
    }
}

/// Advance every published ant by one step.
///
/// An ant whose destination is solid, holds a staged ant, or is already
/// claimed by an ant earlier in index order, stays on its own cell with its
/// new facing.
pub fn langton(grid: &mut Grid) {
    let view = grid.view();
    let moves: Vec<AntMove> = grid
        .ants()
        .into_iter()
        .filter_map(|(at, cell)| match cell {
            Cell::Ant { facing, ground } => Some(plan_move(&view, at, facing, ground)),
            _ => None,
        })
        .collect();

    if moves.is_empty() {
        return;
    }

    // Departures
    for m in &moves {
        *grid.mutable_at(m.from.x, m.from.y, m.from.z) = m.leaves;
    }

    let blocked = resolve_blocked(grid, &moves);
    if blocked.iter().any(|&b| b) {
        debug!(
            blocked = blocked.iter().filter(|&&b| b).count(),
            ants = moves.len(),
            "ants blocked"
        );
    }

    // Arrivals
    for (m, &stay) in moves.iter().zip(&blocked) {
        let at = if stay { m.from } else { m.to };
        let ground = Ground::beneath(grid.pending_at(at.x, at.y, at.z));
        *grid.mutable_at(at.x, at.y, at.z) = Cell::Ant {
            facing: m.facing,
            ground,
        };
    }
}

/// Mark moves that cannot complete. Runs to a fixpoint because a blocked
/// ant keeps its own cell, which may in turn block another.
fn resolve_blocked(grid: &Grid, moves: &[AntMove]) -> Vec<bool> {
    let mut blocked = vec![false; moves.len()];

    loop {
        let mut occupied: HashSet<Coord> = moves
            .iter()
            .zip(&blocked)
            .filter(|(_, b)| **b)
            .map(|(m, _)| m.from)
            .collect();
        let mut changed = false;

        for (i, m) in moves.iter().enumerate() {
            if blocked[i] {
                continue;
            }
            // After departures, any ant left in the pending buffer was staged
            // by a caller and has not moved this step.
            let target = grid.pending_at(m.to.x, m.to.y, m.to.z);
            if target.is_solid() || target.is_ant() || !occupied.insert(m.to) {
                blocked[i] = true;
                occupied.insert(m.from);
                changed = true;
            }
        }

        if !changed {
            return blocked;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::grid::{Boundary, Dimensions};
    use crate::palette::Palette;

    fn grid(x: usize, y: usize, z: usize, boundary: Boundary) -> Grid {
        Grid::new(Dimensions::new(x, y, z), boundary, Palette::default()).unwrap()
    }

    fn place_ant(grid: &mut Grid, at: Coord, facing: Facing, ground: Ground) {
        *grid.mutable_at(at.x, at.y, at.z) = Cell::Ant { facing, ground };
        grid.commit();
    }

    fn step(grid: &mut Grid) {
        langton(grid);
        grid.commit();
    }

    #[test]
    fn test_bare_ground_turns_counter_clockwise() {
        let mut grid = grid(11, 11, 5, Boundary::Clamp);
        place_ant(&mut grid, Coord::new(5, 5, 2), Facing::Left, Ground::Bare);

        step(&mut grid);

        assert_eq!(grid.read_at(5, 5, 2), Cell::Trail);
        assert_eq!(
            grid.read_at(5, 4, 2),
            Cell::Ant {
                facing: Facing::Backward,
                ground: Ground::Bare
            }
        );
    }

    #[test]
    fn test_trail_ground_turns_clockwise_and_clears() {
        let mut grid = grid(11, 11, 5, Boundary::Clamp);
        place_ant(&mut grid, Coord::new(5, 5, 2), Facing::Left, Ground::Trail);

        step(&mut grid);

        assert_eq!(grid.read_at(5, 5, 2), Cell::Empty);
        assert_eq!(
            grid.read_at(5, 6, 2),
            Cell::Ant {
                facing: Facing::Forward,
                ground: Ground::Bare
            }
        );
    }

    #[test]
    fn test_conway_ground_steps_along_z() {
        let mut grid = grid(5, 5, 5, Boundary::Clamp);
        place_ant(&mut grid, Coord::new(2, 2, 2), Facing::Right, Ground::Conway);

        step(&mut grid);

        // Right turns clockwise to Backward, which climbs down
        assert_eq!(grid.read_at(2, 2, 2), Cell::Alive);
        assert_eq!(
            grid.read_at(2, 2, 1),
            Cell::Ant {
                facing: Facing::Backward,
                ground: Ground::Bare
            }
        );
    }

    #[test]
    fn test_arrival_keeps_trail_under_ant() {
        let mut grid = grid(7, 7, 3, Boundary::Clamp);
        *grid.mutable_at(3, 2, 1) = Cell::Trail;
        grid.commit();
        place_ant(&mut grid, Coord::new(3, 3, 1), Facing::Left, Ground::Bare);

        step(&mut grid);

        assert_eq!(
            grid.read_at(3, 2, 1),
            Cell::Ant {
                facing: Facing::Backward,
                ground: Ground::Trail
            }
        );
    }

    #[test]
    fn test_square_walk_returns_to_start() {
        let mut grid = grid(11, 11, 5, Boundary::Clamp);
        place_ant(&mut grid, Coord::new(5, 5, 2), Facing::Left, Ground::Bare);

        let path = [(5, 4), (6, 4), (6, 5), (5, 5), (5, 6)];
        for (i, &(x, y)) in path.iter().enumerate() {
            step(&mut grid);
            let ants = grid.ants();
            assert_eq!(ants.len(), 1, "step {}", i + 1);
            assert_eq!(ants[0].0, Coord::new(x, y, 2), "step {}", i + 1);
        }

        // The fifth step erased the start cell again
        assert_eq!(grid.read_at(5, 5, 2), Cell::Empty);
        assert_eq!(grid.count(Cell::Trail), 3);
    }

    #[test]
    fn test_clamped_edge_keeps_ant_in_place() {
        let mut grid = grid(4, 4, 2, Boundary::Clamp);
        // Bare ground, facing Forward turns to Left: x - 1 saturates at 0
        place_ant(&mut grid, Coord::new(0, 1, 0), Facing::Forward, Ground::Bare);

        step(&mut grid);

        assert_eq!(
            grid.read_at(0, 1, 0),
            Cell::Ant {
                facing: Facing::Left,
                ground: Ground::Trail
            }
        );
        assert_eq!(grid.ants().len(), 1);
    }

    #[test]
    fn test_wrapped_edge_reenters_opposite_side() {
        let mut grid = grid(4, 4, 2, Boundary::Wrap);
        place_ant(&mut grid, Coord::new(0, 1, 0), Facing::Forward, Ground::Bare);

        step(&mut grid);

        assert_eq!(grid.read_at(0, 1, 0), Cell::Trail);
        assert!(grid.read_at(3, 1, 0).is_ant());
    }

    #[test]
    fn test_blocker_stops_ant() {
        let mut grid = grid(7, 7, 3, Boundary::Clamp);
        *grid.mutable_at(3, 2, 1) = Cell::Blocker;
        grid.commit();
        place_ant(&mut grid, Coord::new(3, 3, 1), Facing::Left, Ground::Bare);

        step(&mut grid);

        assert_eq!(grid.read_at(3, 2, 1), Cell::Blocker);
        assert_eq!(
            grid.read_at(3, 3, 1),
            Cell::Ant {
                facing: Facing::Backward,
                ground: Ground::Trail
            }
        );
    }

    #[test]
    fn test_colliding_ants_are_conserved() {
        let mut grid = grid(9, 9, 3, Boundary::Clamp);
        // Both turn toward (4, 4, 1): Left->Backward from (4, 5), Right->Forward from (4, 3)
        place_ant(&mut grid, Coord::new(4, 5, 1), Facing::Left, Ground::Bare);
        place_ant(&mut grid, Coord::new(4, 3, 1), Facing::Right, Ground::Bare);

        step(&mut grid);

        let ants = grid.ants();
        assert_eq!(ants.len(), 2);
        // The earlier ant in index order claims the cell; the other stays put
        assert!(grid.read_at(4, 4, 1).is_ant());
        assert!(grid.read_at(4, 5, 1).is_ant());
        assert_eq!(grid.read_at(4, 3, 1), Cell::Trail);
    }

    #[test]
    fn test_staged_ant_is_not_overwritten() {
        let mut grid = grid(20, 20, 1, Boundary::Clamp);
        // Left on bare ground turns to Backward, heading for (10, 9, 0)
        place_ant(&mut grid, Coord::new(10, 10, 0), Facing::Left, Ground::Bare);
        *grid.mutable_at(10, 9, 0) = Cell::Ant {
            facing: Facing::Right,
            ground: Ground::Trail,
        };

        step(&mut grid);

        assert_eq!(grid.ants().len(), 2);
        assert_eq!(
            grid.read_at(10, 9, 0),
            Cell::Ant {
                facing: Facing::Right,
                ground: Ground::Trail
            }
        );
        assert_eq!(
            grid.read_at(10, 10, 0),
            Cell::Ant {
                facing: Facing::Backward,
                ground: Ground::Trail
            }
        );
    }

    #[test]
    fn test_ant_moving_in_scan_direction_steps_once() {
        let mut grid = grid(9, 9, 1, Boundary::Clamp);
        // Backward turns counter-clockwise to Right: moves +x, the scan direction
        place_ant(&mut grid, Coord::new(2, 4, 0), Facing::Backward, Ground::Bare);

        step(&mut grid);

        let ants = grid.ants();
        assert_eq!(ants.len(), 1);
        assert_eq!(ants[0].0, Coord::new(3, 4, 0));
    }
}
