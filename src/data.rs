//! Loading regions and the spatial index snapshot from files
//!
//! Regions come from a GeoJSON FeatureCollection with Polygon or MultiPolygon
//! geometry. The index snapshot is JSON, or MessagePack for `.msgpack`/`.mp`
//! files.

use crate::error::{DataLoadError, IndexLoadError};
use crate::geometry::{Attributes, Boundary, Coord, Polygon, Region, Ring};
use crate::index::SpatialIndex;
use geojson::{GeoJson, Value};
use indexmap::IndexMap;
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// Regions in load order with lookup by id
#[derive(Debug, Default)]
pub struct RegionCatalog {
    regions: IndexMap<String, Region>,
}

impl RegionCatalog {
    /// Later regions with a duplicate id replace earlier ones
    pub fn new(regions: impl IntoIterator<Item = Region>) -> Self {
        Self {
            regions: regions
                .into_iter()
                .map(|r| (r.id().to_string(), r))
                .collect(),
        }
    }

    pub fn get(&self, region_id: &str) -> Option<&Region> {
        self.regions.get(region_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.values()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

fn to_ring(positions: &[Vec<f64>]) -> Ring {
    positions
        .iter()
        .filter(|p| p.len() >= 2)
        .map(|p| Coord::new(p[0], p[1]))
        .collect()
}

fn to_polygon(rings: &[Vec<Vec<f64>>]) -> Polygon {
    let mut rings = rings.iter().map(|r| to_ring(r));
    let exterior = rings.next().unwrap_or_default();
    Polygon::new(exterior, rings.collect())
}

fn geometry_kind(value: &Value) -> &'static str {
    match value {
        Value::Point(_) => "Point",
        Value::MultiPoint(_) => "MultiPoint",
        Value::LineString(_) => "LineString",
        Value::MultiLineString(_) => "MultiLineString",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        Value::GeometryCollection(_) => "GeometryCollection",
    }
}

fn feature_id(feature: &geojson::Feature, id_property: &str) -> Option<String> {
    let from_properties = feature
        .properties
        .as_ref()
        .and_then(|p| p.get(id_property))
        .and_then(|v| match v {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        });
    from_properties.or_else(|| match &feature.id {
        Some(geojson::feature::Id::String(s)) => Some(s.clone()),
        Some(geojson::feature::Id::Number(n)) => Some(n.to_string()),
        None => None,
    })
}

/// Parse a GeoJSON FeatureCollection into regions
pub fn regions_from_geojson_str(
    json: &str,
    id_property: &str,
) -> Result<Vec<Region>, DataLoadError> {
    let geojson: GeoJson = json.parse()?;
    let GeoJson::FeatureCollection(collection) = geojson else {
        return Err(DataLoadError::NotACollection);
    };

    let mut regions = Vec::with_capacity(collection.features.len());
    for (i, feature) in collection.features.iter().enumerate() {
        let id = feature_id(feature, id_property).ok_or_else(|| DataLoadError::MissingIdentifier {
            feature: i,
            property: id_property.to_string(),
        })?;

        let boundary = match feature.geometry.as_ref().map(|g| &g.value) {
            None => Boundary::default(),
            Some(Value::Polygon(rings)) => Boundary::new(vec![to_polygon(rings)]),
            Some(Value::MultiPolygon(polygons)) => {
                Boundary::new(polygons.iter().map(|p| to_polygon(p)).collect())
            }
            Some(other) => {
                return Err(DataLoadError::UnsupportedGeometry {
                    id,
                    kind: geometry_kind(other).to_string(),
                });
            }
        };

        let attributes: Attributes = feature
            .properties
            .clone()
            .map(|p| p.into_iter().collect())
            .unwrap_or_default();

        regions.push(Region::new(id, boundary, attributes));
    }
    Ok(regions)
}

/// Read and parse a region GeoJSON file
pub fn load_regions<P: AsRef<Path>>(
    path: P,
    id_property: &str,
) -> Result<Vec<Region>, DataLoadError> {
    let path = path.as_ref();
    let start = Instant::now();
    let content = fs::read_to_string(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let regions = regions_from_geojson_str(&content, id_property)?;
    info!(
        path = %path.display(),
        regions = regions.len(),
        elapsed = ?start.elapsed(),
        "Loaded regions"
    );
    Ok(regions)
}

/// Read a snapshot file and build the spatial index from it
pub fn load_index<P: AsRef<Path>>(
    path: P,
    id_property: &str,
) -> Result<SpatialIndex, IndexLoadError> {
    let path = path.as_ref();
    let start = Instant::now();
    let is_msgpack = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("msgpack") | Some("mp")
    );
    let index = if is_msgpack {
        SpatialIndex::from_msgpack(&fs::read(path)?, id_property)?
    } else {
        SpatialIndex::from_json_str(&fs::read_to_string(path)?, id_property)?
    };
    info!(
        path = %path.display(),
        entries = index.len(),
        elapsed = ?start.elapsed(),
        "Loaded spatial index"
    );
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    const COUNTIES: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature",
             "properties": {"GEO_ID": "0500000US01001", "NAME": "Autauga", "LSAD": "County"},
             "geometry": {"type": "Polygon", "coordinates": [[[-86.9, 32.3], [-86.4, 32.3], [-86.4, 32.7], [-86.9, 32.3]]]}},
            {"type": "Feature",
             "properties": {"GEO_ID": "0500000US02016", "NAME": "Aleutians West", "LSAD": "CA"},
             "geometry": {"type": "MultiPolygon", "coordinates": [
                [[[178.0, 51.0], [179.0, 51.0], [179.0, 52.0], [178.0, 51.0]]],
                [[[-177.0, 51.5], [-176.0, 51.5], [-176.0, 52.0], [-177.0, 51.5]]]
             ]}}
        ]
    }"#;

    #[test]
    fn test_polygon_and_multipolygon_regions() {
        let regions = regions_from_geojson_str(COUNTIES, "GEO_ID").unwrap();
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].id(), "0500000US01001");
        assert_eq!(regions[0].boundary().polygons.len(), 1);
        assert_eq!(regions[1].boundary().polygons.len(), 2);
        assert_eq!(regions[1].attributes()["NAME"], "Aleutians West");
    }

    #[test]
    fn test_attribute_order_is_preserved() {
        let regions = regions_from_geojson_str(COUNTIES, "GEO_ID").unwrap();
        let keys: Vec<&str> = regions[0].attributes().keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["GEO_ID", "NAME", "LSAD"]);
    }

    #[test]
    fn test_missing_identifier() {
        let json = r#"{"type": "FeatureCollection", "features": [
            {"type": "Feature", "properties": {"NAME": "X"}, "geometry": null}
        ]}"#;
        let err = regions_from_geojson_str(json, "GEO_ID").unwrap_err();
        assert!(matches!(err, DataLoadError::MissingIdentifier { feature: 0, .. }));
    }

    #[test]
    fn test_point_geometry_is_unsupported() {
        let json = r#"{"type": "FeatureCollection", "features": [
            {"type": "Feature", "properties": {"GEO_ID": "P"},
             "geometry": {"type": "Point", "coordinates": [1.0, 2.0]}}
        ]}"#;
        let err = regions_from_geojson_str(json, "GEO_ID").unwrap_err();
        assert!(matches!(
            err,
            DataLoadError::UnsupportedGeometry { ref kind, .. } if kind == "Point"
        ));
    }

    #[test]
    fn test_single_feature_is_not_a_collection() {
        let json = r#"{"type": "Feature", "properties": {"GEO_ID": "P"}, "geometry": null}"#;
        assert!(matches!(
            regions_from_geojson_str(json, "GEO_ID"),
            Err(DataLoadError::NotACollection)
        ));
    }

    #[test]
    fn test_catalog_lookup() {
        let catalog = RegionCatalog::new(regions_from_geojson_str(COUNTIES, "GEO_ID").unwrap());
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("0500000US01001").map(|r| r.label()), Some("Autauga".to_string()));
        assert!(catalog.get("missing").is_none());
    }

    #[test]
    fn test_missing_region_file() {
        let err = load_regions("does/not/exist.json", "GEO_ID").unwrap_err();
        assert!(matches!(err, DataLoadError::Io { .. }));
    }
}
