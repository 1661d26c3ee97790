//! Buffering a region boundary by a real-world distance
//!
//! The buffered shape is a cover of rings: the original exterior rings, a
//! strip on both sides of every edge, and a disc around every vertex. Together
//! they enclose every point within the distance of the boundary, and their
//! bounding box matches the true buffer's bounding box. Offsets are computed
//! on a sphere with great-circle destination math.

use super::types::{BoundingBox, Coord, Region, Ring};
use serde::{Deserialize, Serialize};

/// Mean earth radius in meters
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Vertices per disc around each boundary vertex
const CIRCLE_STEPS: usize = 32;

/// Real-world distance units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    #[serde(alias = "mi", alias = "mile")]
    Miles,
    #[serde(alias = "km", alias = "kilometer")]
    Kilometers,
    #[serde(alias = "m", alias = "meter")]
    Meters,
    #[serde(alias = "ft", alias = "foot")]
    Feet,
    #[serde(alias = "nauticalmiles", alias = "nmi")]
    NauticalMiles,
    Degrees,
    Radians,
}

impl Units {
    /// Convert a distance in these units to an angular distance in radians
    pub fn to_radians(self, distance: f64) -> f64 {
        let meters = match self {
            Units::Miles => distance * 1609.344,
            Units::Kilometers => distance * 1000.0,
            Units::Meters => distance,
            Units::Feet => distance * 0.3048,
            Units::NauticalMiles => distance * 1852.0,
            Units::Degrees => return distance.to_radians(),
            Units::Radians => return distance,
        };
        meters / EARTH_RADIUS_M
    }
}

/// Result of buffering a region
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BufferedGeometry {
    pub parts: Vec<Ring>,
}

impl BufferedGeometry {
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_coords(self.parts.iter().flatten())
    }
}

/// Point reached by travelling `distance_rad` along a great circle at `bearing_deg`
pub fn destination(origin: Coord, distance_rad: f64, bearing_deg: f64) -> Coord {
    let lat1 = origin.lat.to_radians();
    let lon1 = origin.lon.to_radians();
    let bearing = bearing_deg.to_radians();

    let lat2 = (lat1.sin() * distance_rad.cos()
        + lat1.cos() * distance_rad.sin() * bearing.cos())
    .asin();
    let lon2 = lon1
        + (bearing.sin() * distance_rad.sin() * lat1.cos())
            .atan2(distance_rad.cos() - lat1.sin() * lat2.sin());

    Coord::new(lon2.to_degrees(), lat2.to_degrees())
}

/// Initial great-circle bearing from `from` to `to`, degrees clockwise from north
pub fn bearing(from: Coord, to: Coord) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let dlon = (to.lon - from.lon).to_radians();

    let y = dlon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();
    y.atan2(x).to_degrees()
}

fn circle(center: Coord, radius_rad: f64) -> Ring {
    let step = 360.0 / CIRCLE_STEPS as f64;
    let mut ring: Ring = (0..CIRCLE_STEPS)
        .map(|i| destination(center, radius_rad, i as f64 * step))
        .collect();
    ring.push(ring[0]);
    ring
}

fn edge_strip(a: Coord, b: Coord, radius_rad: f64) -> Ring {
    let heading = bearing(a, b);
    let left = heading - 90.0;
    let right = heading + 90.0;
    let first = destination(a, radius_rad, left);
    vec![
        first,
        destination(b, radius_rad, left),
        destination(b, radius_rad, right),
        destination(a, radius_rad, right),
        first,
    ]
}

/// Expand the region outward by `distance`. Non-positive or non-finite
/// distances return the exterior rings unchanged.
pub fn buffer(region: &Region, distance: f64, units: Units) -> BufferedGeometry {
    let mut parts: Vec<Ring> = region.boundary().exteriors().cloned().collect();

    let radius = units.to_radians(distance);
    if !(radius.is_finite() && radius > 0.0) {
        return BufferedGeometry { parts };
    }

    for ring in region.boundary().exteriors() {
        for pair in ring.windows(2) {
            parts.push(edge_strip(pair[0], pair[1], radius));
        }
        for &vertex in ring {
            parts.push(circle(vertex, radius));
        }
    }

    BufferedGeometry { parts }
}

/// Minimal box containing the buffered geometry, `None` when it has no points
pub fn bounding_box_of(geometry: &BufferedGeometry) -> Option<BoundingBox> {
    geometry.bounding_box()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::types::{Attributes, Boundary};

    fn unit_square_region(x: f64, y: f64) -> Region {
        let ring = vec![
            Coord::new(x, y),
            Coord::new(x + 1.0, y),
            Coord::new(x + 1.0, y + 1.0),
            Coord::new(x, y + 1.0),
            Coord::new(x, y),
        ];
        Region::new("R", Boundary::from_exterior(ring), Attributes::new())
    }

    #[test]
    fn test_miles_to_radians() {
        let rad = Units::Miles.to_radians(2.0);
        assert!((rad - 3218.688 / EARTH_RADIUS_M).abs() < 1e-12);
        assert!((Units::Degrees.to_radians(180.0) - std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn test_destination_due_north_on_meridian() {
        let p = destination(Coord::new(10.0, 0.0), 1.0f64.to_radians(), 0.0);
        assert!((p.lat - 1.0).abs() < 1e-9);
        assert!((p.lon - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_bearing_cardinal_directions() {
        let origin = Coord::new(0.0, 0.0);
        assert!((bearing(origin, Coord::new(0.0, 1.0)) - 0.0).abs() < 1e-9);
        assert!((bearing(origin, Coord::new(1.0, 0.0)) - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_buffer_expands_bbox_on_every_side() {
        let region = unit_square_region(0.0, 0.0);
        let buffered = buffer(&region, 1.0, Units::Degrees);
        let bbox = bounding_box_of(&buffered).unwrap();

        assert!((bbox.min_y + 1.0).abs() < 1e-2, "min_y = {}", bbox.min_y);
        assert!((bbox.max_y - 2.0).abs() < 1e-2, "max_y = {}", bbox.max_y);
        assert!((bbox.min_x + 1.0).abs() < 1e-2, "min_x = {}", bbox.min_x);
        assert!((bbox.max_x - 2.0).abs() < 1e-2, "max_x = {}", bbox.max_x);
    }

    #[test]
    fn test_two_mile_buffer_latitude_margin() {
        let region = unit_square_region(-98.0, 39.0);
        let bbox = bounding_box_of(&buffer(&region, 2.0, Units::Miles)).unwrap();
        let expected = Units::Miles.to_radians(2.0).to_degrees();
        assert!((39.0 - bbox.min_y - expected).abs() < 1e-6);
        assert!((bbox.max_y - 40.0 - expected).abs() < 1e-6);
        // Longitude degrees shrink with latitude, so the east/west margin is wider
        assert!(-98.0 - bbox.min_x > expected);
    }

    #[test]
    fn test_zero_distance_keeps_original_extent() {
        let region = unit_square_region(3.0, 4.0);
        let buffered = buffer(&region, 0.0, Units::Miles);
        assert_eq!(buffered.parts.len(), 1);
        assert_eq!(bounding_box_of(&buffered), region.boundary().bounding_box());
    }

    #[test]
    fn test_buffer_of_empty_region_has_no_bbox() {
        let region = Region::new("E", Boundary::default(), Attributes::new());
        assert!(bounding_box_of(&buffer(&region, 2.0, Units::Miles)).is_none());
    }
}
