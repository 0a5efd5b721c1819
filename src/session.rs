//! Frame-driven simulation and the placement controller.
//!
//! [`Simulation`] owns the grid and decides when a tick happens.
//! [`Placer`] turns cursor input into staged paints.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, trace};

use crate::automaton::grid::{Boundary, Coord, Grid};
use crate::automaton::seeding::{
    random_ant, random_ant_paths, random_conway, RANDOM_CONWAY_COUNT, RANDOM_TRAIL_COUNT,
};
use crate::automaton::{anti_conway, conway, conway_crystalizer, grow_mold, langton};
use crate::cell::Paint;
use crate::config::SimulationConfig;
use crate::error::Result;
use crate::palette::Palette;
use crate::profile::GridProfile;

/// Grid alpha while paused.
pub const PAUSED_ALPHA: u8 = 128;
/// Grid alpha while running.
pub const RUNNING_ALPHA: u8 = 255;

pub struct Simulation {
    grid: Grid,
    rng: StdRng,
    profile: GridProfile,
    update_period: u32,
    frame: u32,
    paused: bool,
    generation: u64,
}

impl Simulation {
    /// Default settings on the given profile and boundary.
    pub fn new(profile: GridProfile, boundary: Boundary) -> Result<Simulation> {
        Simulation::from_config(&SimulationConfig {
            profile,
            boundary,
            ..SimulationConfig::default()
        })
    }

    pub fn from_config(config: &SimulationConfig) -> Result<Simulation> {
        config.validate()?;
        let grid = Grid::new(config.profile.dimensions(), config.boundary, Palette::default())?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        debug!(
            profile = ?config.profile,
            period = config.update_period,
            paused = config.paused,
            "simulation created"
        );
        let mut sim = Simulation {
            grid,
            rng,
            profile: config.profile,
            update_period: config.update_period,
            frame: 0,
            paused: config.paused,
            generation: 0,
        };
        sim.sync_alpha();
        Ok(sim)
    }

    /// Run every rule once and publish the result.
    pub fn tick(&mut self) {
        let grid = &mut self.grid;
        conway(grid);
        langton(grid);
        anti_conway(grid);
        conway_crystalizer(grid);
        grow_mold(grid);
        grid.commit();

        self.generation += 1;
        trace!(generation = self.generation, "tick");
    }

    /// Advance one render frame. Returns whether a tick ran.
    pub fn advance_frame(&mut self) -> bool {
        self.sync_alpha();
        if self.paused {
            return false;
        }

        self.frame += 1;
        if self.frame % self.update_period == 0 {
            self.frame = 0;
            self.tick();
            return true;
        }
        false
    }

    fn sync_alpha(&mut self) {
        let alpha = if self.paused {
            PAUSED_ALPHA
        } else {
            RUNNING_ALPHA
        };
        self.grid.set_grid_alpha(alpha);
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
        self.sync_alpha();
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn toggle_paused(&mut self) -> bool {
        self.set_paused(!self.paused);
        self.paused
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn update_period(&self) -> u32 {
        self.update_period
    }

    pub fn profile(&self) -> GridProfile {
        self.profile
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Grid and RNG borrowed together, for seeding and painting.
    pub fn parts_mut(&mut self) -> (&mut Grid, &mut StdRng) {
        (&mut self.grid, &mut self.rng)
    }

    /// Clear the grid and the counters.
    pub fn reset(&mut self) {
        self.grid.reset();
        self.frame = 0;
        self.generation = 0;
    }

    /// Replace the grid with one of the next (or previous) profile.
    pub fn cycle_profile(&mut self, delta: isize) -> Result<GridProfile> {
        let profile = self.profile.cycle(delta);
        let mut grid = Grid::new(
            profile.dimensions(),
            self.grid.boundary(),
            self.grid.palette().clone(),
        )?;
        grid.set_grid_alpha(self.grid.grid_alpha());

        debug!(from = ?self.profile, to = ?profile, "switching profile");
        self.grid = grid;
        self.profile = profile;
        self.frame = 0;
        self.generation = 0;
        Ok(profile)
    }
}

/// Cursor and selected paint.
///
/// The cursor is wrapped against the simulation's current grid on every
/// use, so it stays valid when the grid is rebuilt at another size.
#[derive(Clone, Debug)]
pub struct Placer {
    cursor: Coord,
    selected: usize,
}

fn wrap_axis(at: usize, delta: isize, len: usize) -> usize {
    (at as isize + delta).rem_euclid(len as isize) as usize
}

impl Placer {
    /// Cursor at the centre of `grid`, Conway selected.
    pub fn new(grid: &Grid) -> Placer {
        let dims = grid.dimensions();
        Placer {
            cursor: Coord::new(dims.x / 2, dims.y / 2, dims.z / 2),
            selected: Paint::Conway.code() as usize,
        }
    }

    pub fn cursor(&self) -> Coord {
        self.cursor
    }

    /// Move the cursor, wrapping on every axis of `grid`.
    pub fn move_by(&mut self, grid: &Grid, dx: isize, dy: isize, dz: isize) {
        let dims = grid.dimensions();
        self.cursor = Coord::new(
            wrap_axis(self.cursor.x, dx, dims.x),
            wrap_axis(self.cursor.y, dy, dims.y),
            wrap_axis(self.cursor.z, dz, dims.z),
        );
    }

    fn cycle(&mut self, delta: isize) {
        let len = Paint::ALL.len() as isize;
        self.selected = (self.selected as isize + delta).rem_euclid(len) as usize;
    }

    pub fn select_next(&mut self) {
        self.cycle(1);
    }

    pub fn select_prev(&mut self) {
        self.cycle(-1);
    }

    pub fn select(&mut self, paint: Paint) {
        self.selected = paint.code() as usize;
    }

    pub fn selected(&self) -> Paint {
        Paint::ALL[self.selected]
    }

    pub fn label(&self) -> &'static str {
        self.selected().label()
    }

    /// Paint the selected kind at the cursor and publish it.
    pub fn place(&mut self, sim: &mut Simulation) {
        let (grid, rng) = sim.parts_mut();
        self.move_by(grid, 0, 0, 0);
        let Coord { x, y, z } = self.cursor;
        grid.paint(x, y, z, self.selected(), rng);
        grid.commit();
    }

    /// Scatter the selected kind across the grid and publish it.
    pub fn randomize(&self, sim: &mut Simulation) {
        let (grid, rng) = sim.parts_mut();
        let paint = self.selected();
        match paint.plain_cell() {
            Some(cell) => random_conway(grid, rng, RANDOM_CONWAY_COUNT, cell),
            None if paint == Paint::Trail => random_ant_paths(grid, rng, RANDOM_TRAIL_COUNT),
            None => {
                random_ant(grid, rng);
            }
        }
        grid.commit();
    }

    /// Clear the grid. The cursor stays where it is.
    pub fn reset(&self, sim: &mut Simulation) {
        sim.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::grid::Dimensions;
    use crate::cell::{Cell, Facing, Ground};

    fn seeded(profile: GridProfile) -> Simulation {
        Simulation::from_config(&SimulationConfig {
            profile,
            seed: Some(1),
            ..SimulationConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_new_simulation_is_paused_and_empty() {
        let sim = seeded(GridProfile::Standard);
        assert!(sim.is_paused());
        assert_eq!(sim.generation(), 0);
        assert_eq!(sim.grid().grid_alpha(), PAUSED_ALPHA);
        assert_eq!(sim.grid().count(Cell::Empty), 48 * 48 * 16);
    }

    #[test]
    fn test_paused_frames_never_tick() {
        let mut sim = seeded(GridProfile::SmallFlat);
        for _ in 0..20 {
            assert!(!sim.advance_frame());
        }
        assert_eq!(sim.generation(), 0);
    }

    #[test]
    fn test_running_ticks_every_period() {
        let mut sim = seeded(GridProfile::SmallFlat);
        sim.set_paused(false);
        assert_eq!(sim.grid().grid_alpha(), RUNNING_ALPHA);

        let ticks = (0..18).filter(|_| sim.advance_frame()).count();
        assert_eq!(ticks, 3);
        assert_eq!(sim.generation(), 3);
    }

    #[test]
    fn test_toggle_updates_alpha() {
        let mut sim = seeded(GridProfile::SmallFlat);
        assert!(!sim.toggle_paused());
        sim.advance_frame();
        assert_eq!(sim.grid().grid_alpha(), RUNNING_ALPHA);
        assert!(sim.toggle_paused());
        sim.advance_frame();
        assert_eq!(sim.grid().grid_alpha(), PAUSED_ALPHA);
    }

    #[test]
    fn test_tick_kills_isolated_cell() {
        let mut sim = seeded(GridProfile::Standard);
        *sim.grid_mut().mutable_at(24, 24, 8) = Cell::Alive;
        sim.grid_mut().commit();

        sim.tick();
        assert_eq!(sim.grid().read_at(24, 24, 8), Cell::Empty);
        assert_eq!(sim.generation(), 1);
    }

    #[test]
    fn test_tick_moves_ant() {
        let mut sim = seeded(GridProfile::SmallFlat);
        *sim.grid_mut().mutable_at(10, 10, 0) = Cell::Ant {
            facing: Facing::Left,
            ground: Ground::Bare,
        };
        sim.grid_mut().commit();

        sim.tick();
        let ants = sim.grid().ants();
        assert_eq!(ants.len(), 1);
        assert_eq!(ants[0].0, Coord::new(10, 9, 0));
        assert_eq!(sim.grid().read_at(10, 10, 0), Cell::Trail);
    }

    #[test]
    fn test_tick_keeps_staged_ant() {
        let mut sim = seeded(GridProfile::SmallFlat);
        let grid = sim.grid_mut();
        *grid.mutable_at(10, 10, 0) = Cell::Ant {
            facing: Facing::Left,
            ground: Ground::Bare,
        };
        grid.commit();
        // Staged in the ant's path and not yet committed
        *grid.mutable_at(10, 9, 0) = Cell::Ant {
            facing: Facing::Forward,
            ground: Ground::Bare,
        };

        sim.tick();
        assert_eq!(sim.grid().ants().len(), 2);
    }

    #[test]
    fn test_reset_clears_counters() {
        let mut sim = seeded(GridProfile::SmallFlat);
        sim.tick();
        *sim.grid_mut().mutable_at(1, 1, 0) = Cell::Blocker;
        sim.grid_mut().commit();

        sim.reset();
        assert_eq!(sim.generation(), 0);
        assert_eq!(sim.grid().count(Cell::Blocker), 0);
    }

    #[test]
    fn test_cycle_profile_rebuilds_grid() {
        let mut sim = seeded(GridProfile::Tall);
        let next = sim.cycle_profile(1).unwrap();
        assert_eq!(next, GridProfile::Standard);
        assert_eq!(sim.grid().dimensions(), Dimensions::new(48, 48, 16));
        assert_eq!(sim.grid().grid_alpha(), PAUSED_ALPHA);
    }

    #[test]
    fn test_placer_starts_centred_and_wraps() {
        let sim = seeded(GridProfile::Standard);
        let mut placer = Placer::new(sim.grid());
        assert_eq!(placer.cursor(), Coord::new(24, 24, 8));

        placer.move_by(sim.grid(), -25, 24, 8);
        assert_eq!(placer.cursor(), Coord::new(47, 0, 0));
    }

    #[test]
    fn test_place_after_profile_change() {
        let mut sim = seeded(GridProfile::Standard);
        let mut placer = Placer::new(sim.grid());
        placer.select(Paint::Blocker);

        // 48x48x16 to 256x256x1: z = 8 no longer exists
        sim.cycle_profile(1).unwrap();
        placer.place(&mut sim);
        assert_eq!(placer.cursor(), Coord::new(24, 24, 0));
        assert_eq!(sim.grid().read_at(24, 24, 0), Cell::Blocker);

        // 256x256x1 to 64x64x1 with the cursor past the new edge
        placer.move_by(sim.grid(), 200, 100, 0);
        assert_eq!(placer.cursor(), Coord::new(224, 124, 0));
        sim.cycle_profile(1).unwrap();
        placer.place(&mut sim);
        assert_eq!(placer.cursor(), Coord::new(224 % 64, 124 % 64, 0));
        assert_eq!(sim.grid().count(Cell::Blocker), 1);
    }

    #[test]
    fn test_placer_cycles_paints() {
        let sim = seeded(GridProfile::SmallFlat);
        let mut placer = Placer::new(sim.grid());
        assert_eq!(placer.selected(), Paint::Conway);
        placer.select_prev();
        placer.select_prev();
        assert_eq!(placer.selected(), Paint::Crystal);
        assert_eq!(placer.label(), "Crystal");
        placer.select_next();
        assert_eq!(placer.selected(), Paint::Erase);
    }

    #[test]
    fn test_place_commits_immediately() {
        let mut sim = seeded(GridProfile::SmallFlat);
        let mut placer = Placer::new(sim.grid());
        placer.select(Paint::Trail);

        placer.place(&mut sim);
        assert_eq!(sim.grid().read_at(32, 32, 0), Cell::Trail);

        // Trail toggles back off
        placer.place(&mut sim);
        assert_eq!(sim.grid().read_at(32, 32, 0), Cell::Empty);
    }

    #[test]
    fn test_randomize_dispatches_on_paint() {
        let mut sim = seeded(GridProfile::Standard);
        let mut placer = Placer::new(sim.grid());

        placer.select(Paint::Blocker);
        placer.randomize(&mut sim);
        let blockers = sim.grid().count(Cell::Blocker);
        assert!(blockers > 0 && blockers <= RANDOM_CONWAY_COUNT);

        placer.select(Paint::Ant);
        placer.randomize(&mut sim);
        assert_eq!(sim.grid().ants().len(), 1);

        placer.select(Paint::Trail);
        placer.randomize(&mut sim);
        assert!(sim.grid().count(Cell::Trail) > 0);
    }
}
