//! Core automaton logic and grid operations.
//!
//! This module contains the double-buffered grid, the rule passes that step
//! it, random seeding, and packed region transfer. The session and the FFI
//! layer in `ffi/` drive these functions.

pub mod grid;
pub mod langton;
pub mod region;
pub mod seeding;
pub mod stepping;

pub use grid::{Axis, Boundary, Coord, Dimensions, Grid, GridView};
pub use langton::langton;
pub use region::{extract_region, import_region, region_len};
pub use seeding::{random_ant, random_ant_paths, random_conway};
pub use stepping::{anti_conway, conway, conway_crystalizer, grow_mold};
