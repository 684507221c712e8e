use serde::{Deserialize, Serialize};

use crate::game_trait::PlayerId;

/// A player taking part in a Lightgrid session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub display_name: String,
    pub color: PlayerColor,
}

/// Trail and cursor color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Default for PlayerColor {
    fn default() -> Self {
        Self::PALETTE[0]
    }
}

impl PlayerColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Neon trail colors, assigned in roster order and spread so that
    /// neighbours in the roster stay easy to tell apart.
    pub const PALETTE: &[PlayerColor] = &[
        Self::rgb(0, 224, 255),   // cyan
        Self::rgb(255, 140, 0),   // amber
        Self::rgb(190, 60, 255),  // violet
        Self::rgb(120, 255, 40),  // lime
        Self::rgb(255, 40, 110),  // magenta
        Self::rgb(255, 245, 90),  // lemon
        Self::rgb(40, 110, 255),  // cobalt
        Self::rgb(230, 230, 240), // white
    ];

    /// Palette color for the `index`-th player, wrapping around.
    pub fn for_index(index: usize) -> Self {
        Self::PALETTE[index % Self::PALETTE.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_wraps() {
        let n = PlayerColor::PALETTE.len();
        assert_eq!(PlayerColor::for_index(0), PlayerColor::for_index(n));
        assert_ne!(PlayerColor::for_index(0), PlayerColor::for_index(1));
    }

    #[test]
    fn palette_has_no_repeats() {
        let n = PlayerColor::PALETTE.len();
        let colors: std::collections::HashSet<_> = (0..n)
            .map(PlayerColor::for_index)
            .map(|c| (c.r, c.g, c.b))
            .collect();
        assert_eq!(colors.len(), n);
        assert_eq!(n, 8, "one color per supported player");
    }
}
