//! Cell colours and the render-side view of a grid.
//!
//! The engine never interprets colours. Renderers call
//! [`Grid::render_cubes`] once per frame and draw what it returns.

use crate::automaton::grid::{Coord, Grid};
use crate::cell::Cell;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Rgba { r, g, b, a }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Rgba { a, ..self }
    }
}

pub const RAYWHITE: Rgba = Rgba::new(245, 245, 245, 255);
pub const BLUE: Rgba = Rgba::new(0, 121, 241, 255);
pub const RED: Rgba = Rgba::new(230, 41, 55, 255);
pub const GREEN: Rgba = Rgba::new(0, 228, 48, 255);
pub const PURPLE: Rgba = Rgba::new(200, 122, 255, 255);
pub const ORANGE: Rgba = Rgba::new(255, 161, 0, 255);
pub const DARKBLUE: Rgba = Rgba::new(0, 82, 172, 255);
pub const SKYBLUE: Rgba = Rgba::new(102, 191, 255, 255);

/// Colours indexed by [`Cell::palette_index`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgba>,
}

impl Palette {
    pub fn new(colors: Vec<Rgba>) -> Self {
        Palette { colors }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Colour for `cell`.
    ///
    /// # Panics
    /// If the palette has no entry for the cell's kind. A missing entry
    /// means the palette and the cell encoding disagree.
    pub fn color_of(&self, cell: Cell) -> Rgba {
        match self.colors.get(cell.palette_index()) {
            Some(&color) => color,
            None => panic!(
                "palette has {} entries, no colour for {:?}",
                self.colors.len(),
                cell
            ),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette::new(vec![
            RAYWHITE, BLUE, RED, GREEN, PURPLE, ORANGE, DARKBLUE, SKYBLUE,
        ])
    }
}

/// One cube to draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubeInstance {
    /// World position, y up.
    pub position: [f32; 3],
    pub color: Rgba,
    pub coord: Coord,
}

impl Grid {
    /// Cubes for every non-empty published cell, centred on `center`.
    ///
    /// Lattice z maps to world y. Colours carry the grid alpha.
    pub fn render_cubes(&self, center: [f32; 3]) -> Vec<CubeInstance> {
        let dims = self.dimensions();
        let (half_x, half_y, half_z) = ((dims.x / 2) as f32, (dims.y / 2) as f32, (dims.z / 2) as f32);
        let alpha = self.grid_alpha();
        let palette = self.palette();

        let mut cubes = Vec::new();
        self.loop3d_read(|cell, coord| {
            if cell == Cell::Empty {
                return;
            }
            cubes.push(CubeInstance {
                position: [
                    coord.x as f32 - half_x + center[0],
                    coord.z as f32 - half_z + center[2],
                    coord.y as f32 - half_y + center[1],
                ],
                color: palette.color_of(cell).with_alpha(alpha),
                coord,
            });
        });
        cubes
    }

    /// Min/max corners of the grid's draw box, in world space.
    pub fn bounding_box(&self, center: [f32; 3]) -> ([f32; 3], [f32; 3]) {
        let dims = self.dimensions();
        let (half_x, half_y, half_z) = ((dims.x / 2) as f32, (dims.y / 2) as f32, (dims.z / 2) as f32);
        (
            [center[0] - half_x, center[2] - half_z, center[1] - half_y],
            [center[0] + half_x, center[2] + half_z, center[1] + half_y],
        )
    }
}
