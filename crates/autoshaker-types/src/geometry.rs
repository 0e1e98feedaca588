//! Grid coordinates and distance math.
//!
//! The world is a grid of square tiles addressed by signed integer
//! coordinates. All proximity checks use Chebyshev distance
//! (`max(|dx|, |dy|)`), which makes the interaction region a square centered
//! on the agent.

use serde::{Deserialize, Serialize};

/// Width of one tile in pixels. Magnetic radii reported by the host are in
/// pixels and are divided by this value to obtain a tile radius.
pub const TILE_SIZE: u32 = 64;

/// A tile coordinate on the world grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TilePoint {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl TilePoint {
    /// Create a tile coordinate.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chebyshev distance between two tiles.
    ///
    /// Computed in `i64` so that points at opposite ends of the `i32` range
    /// cannot overflow.
    pub fn chebyshev_distance(self, other: Self) -> u64 {
        let dx = i64::from(self.x).abs_diff(i64::from(other.x));
        let dy = i64::from(self.y).abs_diff(i64::from(other.y));
        dx.max(dy)
    }

    /// Whether `other` lies inside the square of the given radius around
    /// this tile. A negative radius contains nothing.
    pub fn within_radius(self, other: Self, radius: i32) -> bool {
        u64::try_from(radius).is_ok_and(|r| self.chebyshev_distance(other) <= r)
    }
}

impl core::fmt::Display for TilePoint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Convert a magnetic radius in pixels to a tile radius.
///
/// Integer division truncates, so any magnetism below one tile width yields
/// a radius of 0 (only the agent's own tile).
pub fn tile_radius_from_magnetism(magnetic_radius: u32) -> i32 {
    let tiles = magnetic_radius.checked_div(TILE_SIZE).unwrap_or(0);
    i32::try_from(tiles).unwrap_or(i32::MAX)
}
