//! Projection of sample points along the sun-approach line
//!
//! The sun's apparent motion is treated as purely east/west, so sample points
//! share the observer's latitude and differ only in longitude.

use crate::models::{Coordinate, Direction, Zone};

/// Statute miles per degree of longitude at the equator
pub const MILES_PER_DEGREE_AT_EQUATOR: f64 = 69.172;

/// Move `base` by `distance_miles` due east or west.
#[must_use]
pub fn project(base: Coordinate, distance_miles: f64, direction: Direction) -> Coordinate {
    if distance_miles == 0.0 {
        return base;
    }

    let miles_per_degree = base.latitude.to_radians().cos() * MILES_PER_DEGREE_AT_EQUATOR;
    let offset = distance_miles / miles_per_degree;

    let longitude = match direction {
        Direction::East => base.longitude + offset,
        Direction::West => base.longitude - offset,
    };

    Coordinate::new(base.latitude, longitude)
}

/// One sample coordinate per zone, in zone order
#[must_use]
pub fn sampling_line(base: Coordinate, direction: Direction) -> [Coordinate; Zone::COUNT] {
    Zone::ALL.map(|zone| project(base, zone.distance_miles(), direction))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(40.7128, -74.0060)]
    #[case(-33.8688, 151.2093)]
    #[case(64.1466, -21.9426)]
    fn test_zero_distance_is_identity(#[case] lat: f64, #[case] lon: f64) {
        let base = Coordinate::new(lat, lon);
        assert_eq!(project(base, 0.0, Direction::East), base);
        assert_eq!(project(base, 0.0, Direction::West), base);
    }

    #[rstest]
    #[case(20.0)]
    #[case(60.0)]
    #[case(100.0)]
    fn test_east_and_west_mirror(#[case] distance: f64) {
        let base = Coordinate::new(47.6062, -122.3321);
        let east = project(base, distance, Direction::East);
        let west = project(base, distance, Direction::West);

        assert_eq!(east.latitude, base.latitude);
        assert_eq!(west.latitude, base.latitude);
        let east_offset = east.longitude - base.longitude;
        let west_offset = base.longitude - west.longitude;
        assert!(east_offset > 0.0);
        assert!((east_offset - west_offset).abs() < 1e-12);
    }

    #[test]
    fn test_equator_offset_matches_constant() {
        let base = Coordinate::new(0.0, 10.0);
        let east = project(base, MILES_PER_DEGREE_AT_EQUATOR, Direction::East);
        assert!((east.longitude - 11.0).abs() < 1e-12);
    }

    #[test]
    fn test_projected_distance_is_close_to_requested() {
        let base = Coordinate::new(45.0, 7.0);
        let point = project(base, 100.0, Direction::West);
        let measured = base.distance_miles(&point);
        // Spherical approximation, not geodesic
        assert!((measured - 100.0).abs() < 1.5, "measured {measured}");
    }

    #[test]
    fn test_sampling_line_covers_every_zone() {
        let base = Coordinate::new(51.5, -0.12);
        let line = sampling_line(base, Direction::East);
        assert_eq!(line[0], base);
        for pair in line.windows(2) {
            assert!(pair[1].longitude > pair[0].longitude);
            assert_eq!(pair[1].latitude, base.latitude);
        }
    }
}
