//! Preset grid sizes.

use serde::{Deserialize, Serialize};

use crate::automaton::grid::Dimensions;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridProfile {
    /// 48×48×16
    #[default]
    Standard,
    /// 256×256×1
    WideFlat,
    /// 64×64×1
    SmallFlat,
    /// 48×48×32
    Tall,
}

impl GridProfile {
    pub const ALL: [GridProfile; 4] = [
        GridProfile::Standard,
        GridProfile::WideFlat,
        GridProfile::SmallFlat,
        GridProfile::Tall,
    ];

    pub fn dimensions(self) -> Dimensions {
        match self {
            GridProfile::Standard => Dimensions::new(48, 48, 16),
            GridProfile::WideFlat => Dimensions::new(256, 256, 1),
            GridProfile::SmallFlat => Dimensions::new(64, 64, 1),
            GridProfile::Tall => Dimensions::new(48, 48, 32),
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Profile at `index`, wrapping past the end.
    pub fn from_index(index: usize) -> GridProfile {
        GridProfile::ALL[index % GridProfile::ALL.len()]
    }

    /// Step `delta` profiles forward (or back), wrapping either way.
    pub fn cycle(self, delta: isize) -> GridProfile {
        let len = GridProfile::ALL.len() as isize;
        let next = (self.index() as isize + delta).rem_euclid(len);
        GridProfile::ALL[next as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_dimensions() {
        assert_eq!(GridProfile::Standard.dimensions(), Dimensions::new(48, 48, 16));
        assert_eq!(GridProfile::WideFlat.dimensions().len(), 256 * 256);
        assert_eq!(GridProfile::SmallFlat.dimensions().z, 1);
        assert_eq!(GridProfile::Tall.dimensions().z, 32);
    }

    #[test]
    fn test_cycle_wraps_both_ways() {
        assert_eq!(GridProfile::Standard.cycle(1), GridProfile::WideFlat);
        assert_eq!(GridProfile::Tall.cycle(1), GridProfile::Standard);
        // Negative steps stay in range
        assert_eq!(GridProfile::Standard.cycle(-1), GridProfile::Tall);
        assert_eq!(GridProfile::WideFlat.cycle(-6), GridProfile::Tall);
    }

    #[test]
    fn test_from_index() {
        for profile in GridProfile::ALL {
            assert_eq!(GridProfile::from_index(profile.index()), profile);
        }
        assert_eq!(GridProfile::from_index(5), GridProfile::WideFlat);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&GridProfile::WideFlat).unwrap();
        assert_eq!(json, "\"wide_flat\"");
        let back: GridProfile = serde_json::from_str("\"small_flat\"").unwrap();
        assert_eq!(back, GridProfile::SmallFlat);
    }
}
