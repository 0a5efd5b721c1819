//! Benchmarks for whole-grid passes.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use voxel_life::automaton::{conway, random_ant, random_conway};
use voxel_life::{Boundary, Cell, GridProfile, SimulationConfig, Simulation};

fn seeded_simulation(profile: GridProfile) -> Simulation {
    let mut sim = Simulation::from_config(&SimulationConfig {
        profile,
        boundary: Boundary::Wrap,
        seed: Some(11),
        ..SimulationConfig::default()
    })
    .expect("preset profiles are valid");

    let mut rng = StdRng::seed_from_u64(11);
    let grid = sim.grid_mut();
    random_conway(grid, &mut rng, 2000, Cell::Alive);
    for _ in 0..20 {
        random_ant(grid, &mut rng);
    }
    grid.commit();
    sim
}

fn bench_tick(c: &mut Criterion) {
    let mut sim = seeded_simulation(GridProfile::Standard);
    c.bench_function("tick_standard", |b| b.iter(|| black_box(&mut sim).tick()));

    let mut sim = seeded_simulation(GridProfile::WideFlat);
    c.bench_function("tick_wide_flat", |b| b.iter(|| black_box(&mut sim).tick()));
}

fn bench_conway(c: &mut Criterion) {
    let mut sim = seeded_simulation(GridProfile::Tall);
    c.bench_function("conway_tall", |b| {
        b.iter(|| {
            let grid = sim.grid_mut();
            conway(grid);
            grid.commit();
        })
    });
}

criterion_group!(benches, bench_tick, bench_conway);
criterion_main!(benches);
