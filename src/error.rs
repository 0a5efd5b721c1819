//! Error types for the engine.
//!
//! Only construction, decoding and configuration can fail. Rule passes are
//! infallible; out-of-range coordinates are programmer errors and panic.

use thiserror::Error;

/// Errors returned by fallible engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// One of the grid axes has zero length.
    #[error("grid dimensions must be non-zero, got {x}x{y}x{z}")]
    EmptyDimension {
        /// Cells along x.
        x: usize,
        /// Cells along y.
        y: usize,
        /// Cells along z.
        z: usize,
    },

    /// The cell count does not fit in `usize`.
    #[error("grid {x}x{y}x{z} has too many cells")]
    TooLarge {
        /// Cells along x.
        x: usize,
        /// Cells along y.
        y: usize,
        /// Cells along z.
        z: usize,
    },

    /// A packed byte does not decode to any cell state.
    #[error("invalid packed cell value {0:#010b}")]
    InvalidCell(u8),

    /// A paint code outside the palette range.
    #[error("unknown paint code {0}")]
    UnknownPaint(u8),

    /// The simulation update period must be at least one frame.
    #[error("update period must be at least 1 frame")]
    InvalidPeriod,

    /// A caller-supplied buffer cannot hold the requested region.
    #[error("buffer holds {got} bytes, region needs {needed}")]
    BufferTooSmall {
        /// Bytes required by the region.
        needed: usize,
        /// Bytes provided.
        got: usize,
    },

    /// Configuration could not be parsed.
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EngineError>;
