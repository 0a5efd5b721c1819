//! Cell states and their packed 8-bit encoding.
//!
//! The grid stores [`Cell`] values. The packed form only exists at the
//! edges: region transfer, the C ABI and [`cell_type_name`].

use rand::Rng;

use crate::error::{EngineError, Result};

/// Both low bits set marks a trail.
pub const TRAIL: u8 = 0b0000_0011;
/// Set on every ant.
pub const ANT: u8 = 0b0010_0000;
/// Two-bit ant facing, shifted by [`DIRECTION_SHIFT`].
pub const DIRECTION_MASK: u8 = 0b0001_1000;
pub const DIRECTION_SHIFT: u8 = 3;

pub const EMPTY_BITS: u8 = 0;
pub const ALIVE_BITS: u8 = 1;
pub const BLOCKER_BITS: u8 = 2;
pub const MOLD_BITS: u8 = 5;
pub const ANTI_LIFE_BITS: u8 = 6;
pub const CRYSTAL_BITS: u8 = 0b0100_0000;

/// Facing of an ant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Facing {
    Left = 0,
    Right = 1,
    Forward = 2,
    Backward = 3,
}

impl Facing {
    pub const ALL: [Facing; 4] = [Facing::Left, Facing::Right, Facing::Forward, Facing::Backward];

    /// Decode the low two bits.
    #[inline]
    pub fn from_bits(bits: u8) -> Facing {
        Facing::ALL[(bits & 0b11) as usize]
    }

    #[inline]
    pub fn bits(self) -> u8 {
        self as u8
    }

    /// Turn used when the ant stands on a trail.
    pub fn clockwise(self) -> Facing {
        match self {
            Facing::Forward => Facing::Right,
            Facing::Backward => Facing::Left,
            Facing::Right => Facing::Backward,
            Facing::Left => Facing::Forward,
        }
    }

    /// Turn used when the ant stands on bare ground.
    pub fn counter_clockwise(self) -> Facing {
        match self {
            Facing::Forward => Facing::Left,
            Facing::Backward => Facing::Right,
            Facing::Right => Facing::Forward,
            Facing::Left => Facing::Backward,
        }
    }

    /// Uniform over the four facings.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Facing {
        Facing::from_bits(rng.random_range(0..4u8))
    }
}

/// What an ant is standing on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Ground {
    #[default]
    Bare,
    Trail,
    Conway,
}

impl Ground {
    /// Ground an ant gets when it lands on `cell`.
    pub fn beneath(cell: Cell) -> Ground {
        match cell {
            Cell::Trail => Ground::Trail,
            Cell::Alive => Ground::Conway,
            Cell::Ant { ground, .. } => ground,
            _ => Ground::Bare,
        }
    }

    /// The cell that remains if the ant is lifted off.
    pub fn uncovered(self) -> Cell {
        match self {
            Ground::Bare => Cell::Empty,
            Ground::Trail => Cell::Trail,
            Ground::Conway => Cell::Alive,
        }
    }

    fn bits(self) -> u8 {
        match self {
            Ground::Bare => 0,
            Ground::Trail => TRAIL,
            Ground::Conway => ALIVE_BITS,
        }
    }
}

/// State of one lattice site.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    /// Conway life.
    Alive,
    /// Immovable; ignored by Conway and impassable for ants.
    Blocker,
    Trail,
    Mold,
    AntiLife,
    Crystal,
    Ant { facing: Facing, ground: Ground },
}

impl Cell {
    /// Packed 8-bit form.
    pub fn to_bits(self) -> u8 {
        match self {
            Cell::Empty => EMPTY_BITS,
            Cell::Alive => ALIVE_BITS,
            Cell::Blocker => BLOCKER_BITS,
            Cell::Trail => TRAIL,
            Cell::Mold => MOLD_BITS,
            Cell::AntiLife => ANTI_LIFE_BITS,
            Cell::Crystal => CRYSTAL_BITS,
            Cell::Ant { facing, ground } => {
                ANT | (facing.bits() << DIRECTION_SHIFT) | ground.bits()
            }
        }
    }

    /// Decode a packed byte, checking flags before raw values.
    pub fn from_bits(bits: u8) -> Result<Cell> {
        if bits & ANT == ANT {
            let facing = Facing::from_bits((bits & DIRECTION_MASK) >> DIRECTION_SHIFT);
            let ground = match bits & !(ANT | DIRECTION_MASK) {
                0 => Ground::Bare,
                TRAIL => Ground::Trail,
                ALIVE_BITS => Ground::Conway,
                _ => return Err(EngineError::InvalidCell(bits)),
            };
            return Ok(Cell::Ant { facing, ground });
        }
        if bits & TRAIL == TRAIL {
            return if bits == TRAIL {
                Ok(Cell::Trail)
            } else {
                Err(EngineError::InvalidCell(bits))
            };
        }
        if bits & DIRECTION_MASK != 0 {
            return Err(EngineError::InvalidCell(bits));
        }
        match bits {
            EMPTY_BITS => Ok(Cell::Empty),
            ALIVE_BITS => Ok(Cell::Alive),
            BLOCKER_BITS => Ok(Cell::Blocker),
            MOLD_BITS => Ok(Cell::Mold),
            ANTI_LIFE_BITS => Ok(Cell::AntiLife),
            CRYSTAL_BITS => Ok(Cell::Crystal),
            _ => Err(EngineError::InvalidCell(bits)),
        }
    }

    #[inline]
    pub fn is_ant(self) -> bool {
        matches!(self, Cell::Ant { .. })
    }

    /// Cells ants cannot walk into.
    #[inline]
    pub fn is_solid(self) -> bool {
        matches!(self, Cell::Blocker | Cell::Crystal)
    }

    /// Palette slot used to colour this cell.
    pub fn palette_index(self) -> usize {
        match self {
            Cell::Empty => 0,
            Cell::Alive => 1,
            Cell::Blocker => 2,
            Cell::Trail => 3,
            Cell::Ant { .. } => 4,
            Cell::Mold => 5,
            Cell::AntiLife => 6,
            Cell::Crystal => 7,
        }
    }
}

/// A placement request, numbered by palette slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Paint {
    Erase = 0,
    Conway = 1,
    Blocker = 2,
    Trail = 3,
    Ant = 4,
    Mold = 5,
    AntiConway = 6,
    Crystal = 7,
}

impl Paint {
    pub const ALL: [Paint; 8] = [
        Paint::Erase,
        Paint::Conway,
        Paint::Blocker,
        Paint::Trail,
        Paint::Ant,
        Paint::Mold,
        Paint::AntiConway,
        Paint::Crystal,
    ];

    pub fn from_code(code: u8) -> Result<Paint> {
        Paint::ALL
            .get(code as usize)
            .copied()
            .ok_or(EngineError::UnknownPaint(code))
    }

    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Plain cell written by this paint, or `None` for the toggling paints.
    pub fn plain_cell(self) -> Option<Cell> {
        match self {
            Paint::Erase => Some(Cell::Empty),
            Paint::Conway => Some(Cell::Alive),
            Paint::Blocker => Some(Cell::Blocker),
            Paint::Mold => Some(Cell::Mold),
            Paint::AntiConway => Some(Cell::AntiLife),
            Paint::Crystal => Some(Cell::Crystal),
            Paint::Trail | Paint::Ant => None,
        }
    }

    /// Label shown by the placement controller.
    pub fn label(self) -> &'static str {
        match self {
            Paint::Erase => "Erase",
            Paint::Mold => "Mold",
            Paint::AntiConway => "Anti-Conway",
            Paint::Crystal => "Crystal",
            other => cell_type_name(other.code()),
        }
    }
}

/// Apply a paint request to the current cell value.
///
/// Trail and ant paints toggle; everything else overwrites.
pub fn mod_cell<R: Rng + ?Sized>(from: Cell, to: Paint, rng: &mut R) -> Cell {
    match to {
        Paint::Trail => match from {
            Cell::Trail => Cell::Empty,
            Cell::Ant {
                facing,
                ground: Ground::Trail,
            } => Cell::Ant {
                facing,
                ground: Ground::Bare,
            },
            Cell::Ant { facing, .. } => Cell::Ant {
                facing,
                ground: Ground::Trail,
            },
            _ => Cell::Trail,
        },
        Paint::Ant => match from {
            Cell::Ant { ground, .. } => ground.uncovered(),
            other => Cell::Ant {
                facing: Facing::random(rng),
                ground: Ground::beneath(other),
            },
        },
        plain => plain.plain_cell().unwrap_or(from),
    }
}

/// Human label for a packed value.
///
/// Exact matches on 1 and 2 win over the flag tests, and the trail test
/// runs before the ant test, so an ant on a trail reads as "Ant Trail".
pub fn cell_type_name(bits: u8) -> &'static str {
    if bits == ALIVE_BITS {
        "Conway"
    } else if bits == BLOCKER_BITS {
        "Conway Blocker"
    } else if bits == 3 || bits & TRAIL == TRAIL {
        "Ant Trail"
    } else if bits == 4 || bits & ANT == ANT {
        "Ant"
    } else if bits == MOLD_BITS {
        "Mold"
    } else if bits == ANTI_LIFE_BITS {
        "Anti-Conway"
    } else if bits == CRYSTAL_BITS {
        "Crystal"
    } else {
        "Unknown"
    }
}
