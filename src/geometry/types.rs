//! Core geographic types: coordinates, boundaries, bounding boxes and regions
//!
//! Coordinates are longitude/latitude degrees. No reprojection happens anywhere
//! in the engine.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Passthrough properties of a region (`GEO_ID`, `NAME`, `LSAD`, ...), in source order
pub type Attributes = IndexMap<String, serde_json::Value>;

/// A longitude/latitude position in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub lon: f64,
    pub lat: f64,
}

impl Coord {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

/// A closed ring of coordinates
pub type Ring = Vec<Coord>;

/// A polygon with an exterior ring and optional holes
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    pub exterior: Ring,
    pub holes: Vec<Ring>,
}

impl Polygon {
    pub fn new(exterior: Ring, holes: Vec<Ring>) -> Self {
        Self { exterior, holes }
    }
}

/// A possibly multi-part region boundary
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Boundary {
    pub polygons: Vec<Polygon>,
}

impl Boundary {
    pub fn new(polygons: Vec<Polygon>) -> Self {
        Self { polygons }
    }

    /// Single-part boundary from an exterior ring
    pub fn from_exterior(exterior: Ring) -> Self {
        Self {
            polygons: vec![Polygon::new(exterior, Vec::new())],
        }
    }

    /// Exterior rings of every part
    pub fn exteriors(&self) -> impl Iterator<Item = &Ring> {
        self.polygons.iter().map(|p| &p.exterior)
    }

    /// Every coordinate of every ring, holes included
    pub fn coords(&self) -> impl Iterator<Item = &Coord> {
        self.polygons
            .iter()
            .flat_map(|p| std::iter::once(&p.exterior).chain(p.holes.iter()))
            .flat_map(|ring| ring.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.coords().next().is_none()
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_coords(self.coords())
    }
}

/// Axis-aligned rectangle in degrees. `min_x <= max_x` and `min_y <= max_y` always hold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Box spanning two corners given in any order
    pub fn from_corners(a: Coord, b: Coord) -> Self {
        Self {
            min_x: a.lon.min(b.lon),
            min_y: a.lat.min(b.lat),
            max_x: a.lon.max(b.lon),
            max_y: a.lat.max(b.lat),
        }
    }

    /// Minimal box containing every coordinate, `None` for an empty iterator
    pub fn from_coords<'a>(coords: impl IntoIterator<Item = &'a Coord>) -> Option<Self> {
        let mut iter = coords.into_iter();
        let first = iter.next()?;
        let mut bbox = Self::from_corners(*first, *first);
        for c in iter {
            bbox.include(*c);
        }
        Some(bbox)
    }

    /// Grow the box to contain `c`
    pub fn include(&mut self, c: Coord) {
        self.min_x = self.min_x.min(c.lon);
        self.min_y = self.min_y.min(c.lat);
        self.max_x = self.max_x.max(c.lon);
        self.max_y = self.max_y.max(c.lat);
    }

    /// Boundary-inclusive containment
    pub fn contains(&self, other: &BoundingBox) -> bool {
        self.min_x <= other.min_x
            && self.min_y <= other.min_y
            && self.max_x >= other.max_x
            && self.max_y >= other.max_y
    }

    /// True when all four values are finite and ordered
    pub fn is_valid(&self) -> bool {
        [self.min_x, self.min_y, self.max_x, self.max_y]
            .iter()
            .all(|v| v.is_finite())
            && self.min_x <= self.max_x
            && self.min_y <= self.max_y
    }
}

/// A county-level region. Immutable once loaded; selection lives elsewhere.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    id: String,
    boundary: Boundary,
    attributes: Attributes,
}

impl Region {
    pub fn new(id: impl Into<String>, boundary: Boundary, attributes: Attributes) -> Self {
        Self {
            id: id.into(),
            boundary,
            attributes,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn boundary(&self) -> &Boundary {
        &self.boundary
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Display label: `NAME`, or `Unnamed <LSAD>` for regions without a name
    pub fn label(&self) -> String {
        match self.attributes.get("NAME").and_then(|v| v.as_str()) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => match self.attributes.get("LSAD") {
                Some(serde_json::Value::String(lsad)) => format!("Unnamed {}", lsad),
                Some(serde_json::Value::Null) | None => "Unnamed".to_string(),
                Some(other) => format!("Unnamed {}", other),
            },
        }
    }
}
