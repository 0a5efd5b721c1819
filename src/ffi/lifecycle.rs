//! Simulation creation, destruction, and generation queries.

use tracing::warn;

use crate::automaton::grid::Boundary;
use crate::config::SimulationConfig;
use crate::profile::GridProfile;
use crate::session::Simulation;

/// Creates a paused simulation and returns an opaque pointer.
///
/// `profile` indexes the presets (0 standard, 1 wide flat, 2 small flat,
/// 3 tall) and wraps past the end. A non-zero `wrap` selects toroidal
/// boundaries. `seed` 0 seeds the RNG from the OS.
///
/// # Returns
/// A pointer to a new Simulation, or null if the grid cannot be built.
///
/// # Safety
/// The returned pointer must eventually be freed with `ca_destroy()`.
#[no_mangle]
pub extern "C" fn ca_create(profile: u8, wrap: u8, seed: u64) -> *mut Simulation {
    let config = SimulationConfig {
        profile: GridProfile::from_index(profile as usize),
        boundary: if wrap != 0 {
            Boundary::Wrap
        } else {
            Boundary::Clamp
        },
        seed: (seed != 0).then_some(seed),
        ..SimulationConfig::default()
    };

    match Simulation::from_config(&config) {
        Ok(sim) => Box::into_raw(Box::new(sim)),
        Err(err) => {
            warn!(%err, "ca_create failed");
            std::ptr::null_mut()
        }
    }
}

/// Destroys a simulation and frees its memory.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by `ca_create()`, or null
/// - `ptr` must not be used after this call
#[no_mangle]
pub unsafe extern "C" fn ca_destroy(ptr: *mut Simulation) {
    if !ptr.is_null() {
        drop(Box::from_raw(ptr));
    }
}

/// Gets the generation counter.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Simulation, or null
///
/// # Returns
/// The generation counter, or 0 if ptr is null.
#[no_mangle]
pub unsafe extern "C" fn ca_generation(ptr: *const Simulation) -> u64 {
    if ptr.is_null() {
        return 0;
    }
    (*ptr).generation()
}
