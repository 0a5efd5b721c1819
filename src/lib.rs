//! Voxel Life - 3D Cellular Automata Engine
//!
//! A fixed-size, double-buffered 3D lattice stepped by Conway life,
//! Langton's ant and a few layered rules. Hosts drive it through
//! [`session::Simulation`] or the C ABI in [`ffi`].
//!
//! The library logs through `tracing` and installs no subscriber.

pub mod automaton;
pub mod cell;
pub mod config;
pub mod error;
pub mod ffi;
pub mod palette;
pub mod profile;
pub mod session;

pub use automaton::grid::{Axis, Boundary, Coord, Dimensions, Grid, GridView};
pub use cell::{cell_type_name, mod_cell, Cell, Facing, Ground, Paint};
pub use config::SimulationConfig;
pub use error::{EngineError, Result};
pub use palette::{CubeInstance, Palette, Rgba};
pub use profile::GridProfile;
pub use session::{Placer, Simulation};
