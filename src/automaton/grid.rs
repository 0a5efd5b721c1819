//! Double-buffered 3D grid storage, boundary policy and whole-grid passes.

use std::fmt;

use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::cell::{mod_cell, Cell, Paint};
use crate::error::{EngineError, Result};
use crate::palette::Palette;

/// Lattice size along each axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

impl Dimensions {
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Dimensions { x, y, z }
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.x * self.y * self.z
    }

    /// Total number of cells, or `None` if the product overflows.
    pub fn checked_len(&self) -> Option<usize> {
        self.x.checked_mul(self.y)?.checked_mul(self.z)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn contains(&self, x: usize, y: usize, z: usize) -> bool {
        x < self.x && y < self.y && z < self.z
    }

    /// Flat index `z*Nx*Ny + y*Nx + x`. Panics outside the lattice.
    #[inline]
    pub fn index_of(&self, x: usize, y: usize, z: usize) -> usize {
        assert!(
            self.contains(x, y, z),
            "cell ({}, {}, {}) outside grid {}",
            x,
            y,
            z,
            self
        );
        z * self.x * self.y + y * self.x + x
    }

    /// Inverse of [`Dimensions::index_of`].
    #[inline]
    pub fn coord_of(&self, index: usize) -> Coord {
        let plane = self.x * self.y;
        Coord {
            x: index % self.x,
            y: (index % plane) / self.x,
            z: index / plane,
        }
    }

    pub fn extent(&self, axis: Axis) -> usize {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.x, self.y, self.z)
    }
}

/// A lattice coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

impl Coord {
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Coord { x, y, z }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// What happens when a step leaves the lattice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Boundary {
    /// Toroidal: stepping off one edge re-enters at the opposite edge.
    Wrap,
    /// Saturate at the first/last valid index.
    #[default]
    Clamp,
}

/// Read-only view of the published snapshot.
///
/// Rules receive one of these during a pass; it never sees pending writes.
#[derive(Clone, Copy)]
pub struct GridView<'a> {
    dims: Dimensions,
    boundary: Boundary,
    cells: &'a [Cell],
}

impl<'a> GridView<'a> {
    #[inline]
    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    #[inline]
    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    #[inline]
    pub fn read_at(&self, x: usize, y: usize, z: usize) -> Cell {
        self.cells[self.dims.index_of(x, y, z)]
    }

    #[inline]
    pub fn read(&self, coord: Coord) -> Cell {
        self.read_at(coord.x, coord.y, coord.z)
    }

    /// Map a possibly out-of-range position onto the axis.
    pub fn offset(&self, axis: Axis, i: isize) -> usize {
        let n = self.dims.extent(axis) as isize;
        match self.boundary {
            Boundary::Wrap => i.rem_euclid(n) as usize,
            Boundary::Clamp => i.clamp(0, n - 1) as usize,
        }
    }

    #[inline]
    pub fn minus(&self, axis: Axis, i: usize) -> usize {
        self.offset(axis, i as isize - 1)
    }

    #[inline]
    pub fn add(&self, axis: Axis, i: usize) -> usize {
        self.offset(axis, i as isize + 1)
    }

    pub fn minus_x(&self, x: usize) -> usize {
        self.minus(Axis::X, x)
    }

    pub fn minus_y(&self, y: usize) -> usize {
        self.minus(Axis::Y, y)
    }

    pub fn minus_z(&self, z: usize) -> usize {
        self.minus(Axis::Z, z)
    }

    pub fn add_x(&self, x: usize) -> usize {
        self.add(Axis::X, x)
    }

    pub fn add_y(&self, y: usize) -> usize {
        self.add(Axis::Y, y)
    }

    pub fn add_z(&self, z: usize) -> usize {
        self.add(Axis::Z, z)
    }

    pub fn offset_x(&self, x: isize) -> usize {
        self.offset(Axis::X, x)
    }

    pub fn offset_y(&self, y: isize) -> usize {
        self.offset(Axis::Y, y)
    }

    pub fn offset_z(&self, z: isize) -> usize {
        self.offset(Axis::Z, z)
    }

    /// Distinct positions in `{i-1, i, i+1}` after the boundary policy.
    fn span(&self, axis: Axis, i: usize) -> ([usize; 3], usize) {
        let mut out = [i; 3];
        let mut len = 0;
        for candidate in [self.minus(axis, i), i, self.add(axis, i)] {
            if !out[..len].contains(&candidate) {
                out[len] = candidate;
                len += 1;
            }
        }
        (out, len)
    }

    /// Count cells equal to `matching` in the 3x3x3 block around (x, y, z).
    ///
    /// The centre is included; callers subtract it when it matches.
    /// Each distinct cell is counted once even where the block folds over
    /// a clamped edge or a short wrapped axis.
    pub fn neighbor_sum(&self, x: usize, y: usize, z: usize, matching: Cell) -> u32 {
        let (xs, nx) = self.span(Axis::X, x);
        let (ys, ny) = self.span(Axis::Y, y);
        let (zs, nz) = self.span(Axis::Z, z);

        let mut total = 0;
        for &iz in &zs[..nz] {
            for &iy in &ys[..ny] {
                for &ix in &xs[..nx] {
                    if self.read_at(ix, iy, iz) == matching {
                        total += 1;
                    }
                }
            }
        }
        total
    }

    /// Neighbours equal to `matching`, excluding the centre.
    pub fn neighbors(&self, coord: Coord, matching: Cell) -> u32 {
        let total = self.neighbor_sum(coord.x, coord.y, coord.z, matching);
        total - u32::from(self.read(coord) == matching)
    }
}

/// Fixed-size double-buffered lattice.
///
/// `read` indexes the published snapshot in `buffers`; the other buffer
/// collects pending writes until [`Grid::commit`].
pub struct Grid {
    dims: Dimensions,
    boundary: Boundary,
    buffers: [Vec<Cell>; 2],
    read: usize,
    palette: Palette,
    alpha: u8,
}

impl Grid {
    /// Create a zeroed grid. Every axis must be non-empty.
    pub fn new(dims: Dimensions, boundary: Boundary, palette: Palette) -> Result<Grid> {
        if dims.x == 0 || dims.y == 0 || dims.z == 0 {
            return Err(EngineError::EmptyDimension {
                x: dims.x,
                y: dims.y,
                z: dims.z,
            });
        }

        let size = dims
            .checked_len()
            .filter(|&n| {
                n.checked_mul(std::mem::size_of::<Cell>())
                    .is_some_and(|bytes| bytes <= isize::MAX as usize)
            })
            .ok_or(EngineError::TooLarge {
                x: dims.x,
                y: dims.y,
                z: dims.z,
            })?;

        debug!(%dims, ?boundary, "allocating grid");
        let mut grid = Grid {
            dims,
            boundary,
            buffers: [vec![Cell::Empty; size], vec![Cell::Empty; size]],
            read: 0,
            palette,
            alpha: u8::MAX,
        };
        grid.reset();
        Ok(grid)
    }

    #[inline]
    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    #[inline]
    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Snapshot view for neighbour queries and boundary math.
    #[inline]
    pub fn view(&self) -> GridView<'_> {
        GridView {
            dims: self.dims,
            boundary: self.boundary,
            cells: &self.buffers[self.read],
        }
    }

    /// Published value. Panics outside the lattice.
    #[inline]
    pub fn read_at(&self, x: usize, y: usize, z: usize) -> Cell {
        self.view().read_at(x, y, z)
    }

    /// Pending value, including writes not yet committed.
    #[inline]
    pub fn pending_at(&self, x: usize, y: usize, z: usize) -> Cell {
        self.buffers[self.read ^ 1][self.dims.index_of(x, y, z)]
    }

    /// Write handle into the pending buffer. Panics outside the lattice.
    #[inline]
    pub fn mutable_at(&mut self, x: usize, y: usize, z: usize) -> &mut Cell {
        let index = self.dims.index_of(x, y, z);
        &mut self.buffers[self.read ^ 1][index]
    }

    /// Stage `paint` at (x, y, z) on top of the published value.
    pub fn paint<R: Rng + ?Sized>(&mut self, x: usize, y: usize, z: usize, paint: Paint, rng: &mut R) {
        let next = mod_cell(self.read_at(x, y, z), paint, rng);
        *self.mutable_at(x, y, z) = next;
    }

    /// Publish pending writes by exchanging the buffer roles.
    ///
    /// The new pending buffer starts as a copy of what was just published,
    /// so cells untouched by the next pass carry forward.
    pub fn commit(&mut self) {
        self.read ^= 1;
        let (view, pending) = self.split();
        pending.copy_from_slice(view.cells);
        trace!(read = self.read, "commit");
    }

    /// Clear both buffers.
    pub fn reset(&mut self) {
        for buffer in &mut self.buffers {
            buffer.fill(Cell::Empty);
        }
        debug!(dims = %self.dims, "grid reset");
    }

    pub fn neighbor_sum(&self, x: usize, y: usize, z: usize, matching: Cell) -> u32 {
        self.view().neighbor_sum(x, y, z, matching)
    }

    pub fn minus_x(&self, x: usize) -> usize {
        self.view().minus_x(x)
    }

    pub fn minus_y(&self, y: usize) -> usize {
        self.view().minus_y(y)
    }

    pub fn minus_z(&self, z: usize) -> usize {
        self.view().minus_z(z)
    }

    pub fn add_x(&self, x: usize) -> usize {
        self.view().add_x(x)
    }

    pub fn add_y(&self, y: usize) -> usize {
        self.view().add_y(y)
    }

    pub fn add_z(&self, z: usize) -> usize {
        self.view().add_z(z)
    }

    pub fn offset_x(&self, x: isize) -> usize {
        self.view().offset_x(x)
    }

    pub fn offset_y(&self, y: isize) -> usize {
        self.view().offset_y(y)
    }

    pub fn offset_z(&self, z: isize) -> usize {
        self.view().offset_z(z)
    }

    pub fn grid_alpha(&self) -> u8 {
        self.alpha
    }

    pub fn set_grid_alpha(&mut self, alpha: u8) {
        self.alpha = alpha;
    }

    /// Number of published cells equal to `cell`.
    pub fn count(&self, cell: Cell) -> usize {
        self.buffers[self.read].iter().filter(|&&c| c == cell).count()
    }

    /// Published ants in index order.
    pub fn ants(&self) -> Vec<(Coord, Cell)> {
        self.buffers[self.read]
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_ant())
            .map(|(i, &cell)| (self.dims.coord_of(i), cell))
            .collect()
    }

    /// Sequential whole-grid pass in index order.
    ///
    /// The visitor sees the snapshot, the cell's published value, a handle
    /// to its pending value and its coordinate.
    pub fn loop3d<F>(&mut self, mut visitor: F)
    where
        F: FnMut(&GridView<'_>, Cell, &mut Cell, Coord),
    {
        let (view, pending) = self.split();
        for (i, out) in pending.iter_mut().enumerate() {
            visitor(&view, view.cells[i], out, view.dims.coord_of(i));
        }
    }

    /// Same as [`Grid::loop3d`] on the rayon pool. Each call writes only its own cell.
    pub fn par_loop3d<F>(&mut self, visitor: F)
    where
        F: Fn(&GridView<'_>, Cell, &mut Cell, Coord) + Sync + Send,
    {
        let (view, pending) = self.split();
        pending.par_iter_mut().enumerate().for_each(|(i, out)| {
            visitor(&view, view.cells[i], out, view.dims.coord_of(i));
        });
    }

    /// Visit every published cell once. Never mutates.
    pub fn loop3d_read<F>(&self, mut visitor: F)
    where
        F: FnMut(Cell, Coord),
    {
        for (i, &cell) in self.buffers[self.read].iter().enumerate() {
            visitor(cell, self.dims.coord_of(i));
        }
    }

    fn split(&mut self) -> (GridView<'_>, &mut [Cell]) {
        let [first, second] = &mut self.buffers;
        let (read, pending) = if self.read == 0 {
            (first, second)
        } else {
            (second, first)
        };
        let view = GridView {
            dims: self.dims,
            boundary: self.boundary,
            cells: read.as_slice(),
        };
        (view, pending.as_mut_slice())
    }
}
