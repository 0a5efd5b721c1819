//! C FFI layer for embedding hosts.
//!
//! This module exports C ABI functions over an opaque `Simulation` handle.
//! All functions are marked with `#[no_mangle]` and use `extern "C"`.
//!
//! The actual logic is in `automaton` and `session`. These functions are thin
//! wrappers that handle null checks, bounds, and C-to-Rust conversions.

pub mod grid;
pub mod lifecycle;
pub mod region;

pub use grid::{
    ca_advance_frame, ca_commit, ca_dimensions, ca_grid_alpha, ca_paint, ca_read_cell, ca_reset,
    ca_set_paused, ca_tick,
};
pub use lifecycle::{ca_create, ca_destroy, ca_generation};
pub use region::{ca_extract_region, ca_import_region};
