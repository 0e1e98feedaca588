//! Square-radius tile enumeration.
//!
//! Produces every tile within Chebyshev distance `radius` of a center,
//! column by column (x outer, y inner). The order is fixed so scans are
//! reproducible; correctness does not depend on it.

use autoshaker_types::TilePoint;

/// Iterate the `(2r + 1)^2` tiles of the square around `center`.
///
/// `radius == 0` yields only `center`; a negative radius yields nothing.
/// Bounds saturate at the `i32` limits instead of wrapping.
pub fn tiles_in_radius(center: TilePoint, radius: i32) -> impl Iterator<Item = TilePoint> {
    // An inverted range (lo > hi) is empty, which covers negative radii.
    let (x_lo, x_hi) = (center.x.saturating_sub(radius), center.x.saturating_add(radius));
    let (y_lo, y_hi) = (center.y.saturating_sub(radius), center.y.saturating_add(radius));

    (x_lo..=x_hi).flat_map(move |x| (y_lo..=y_hi).map(move |y| TilePoint::new(x, y)))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn count_is_square_of_diameter() {
        let center = TilePoint::new(5, -3);
        for r in 0..6_i32 {
            let tiles: Vec<_> = tiles_in_radius(center, r).collect();
            let side = usize::try_from(r * 2 + 1).unwrap_or(0);
            assert_eq!(tiles.len(), side * side, "radius {r}");

            let distinct: BTreeSet<_> = tiles.iter().copied().collect();
            assert_eq!(distinct.len(), tiles.len());
            assert!(tiles.iter().all(|t| center.within_radius(*t, r)));
        }
    }

    #[test]
    fn zero_radius_is_only_center() {
        let center = TilePoint::new(1, 1);
        let tiles: Vec<_> = tiles_in_radius(center, 0).collect();
        assert_eq!(tiles, vec![center]);
    }

    #[test]
    fn negative_radius_is_empty() {
        assert_eq!(tiles_in_radius(TilePoint::new(0, 0), -1).count(), 0);
        assert_eq!(tiles_in_radius(TilePoint::new(0, 0), i32::MIN).count(), 0);
    }

    #[test]
    fn order_is_column_major() {
        let tiles: Vec<_> = tiles_in_radius(TilePoint::new(0, 0), 1).collect();
        assert_eq!(tiles.first(), Some(&TilePoint::new(-1, -1)));
        assert_eq!(tiles.get(1), Some(&TilePoint::new(-1, 0)));
        assert_eq!(tiles.get(3), Some(&TilePoint::new(0, -1)));
        assert_eq!(tiles.last(), Some(&TilePoint::new(1, 1)));
    }

    #[test]
    fn restarts_fresh_each_call() {
        let center = TilePoint::new(0, 0);
        let first: Vec<_> = tiles_in_radius(center, 2).collect();
        let second: Vec<_> = tiles_in_radius(center, 2).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn saturates_at_grid_edge() {
        let corner = TilePoint::new(i32::MAX, i32::MAX);
        let tiles: Vec<_> = tiles_in_radius(corner, 1).collect();
        // Only the in-range half of each axis exists.
        assert_eq!(tiles.len(), 4);
    }
}
