//! County selection and proximity engine
//!
//! Keeps the set of selected county regions, finds regions within a buffer
//! distance of a selection through a prebuilt bounding-box index, and derives
//! border and fill styles from zoom level and selection state.
//!
//! # Example
//! ```ignore
//! let settings = Settings::default();
//! let index = SpatialIndex::from_load_result(load_index("county-spatial-index.json", &settings.id_property));
//! let catalog = RegionCatalog::new(load_regions("us-counties.json", &settings.id_property)?);
//! let mut controller = SelectionController::new();
//!
//! let region = catalog.get("0500000US01001").unwrap();
//! let record = controller.toggle(region, settings.neighbors_enabled, &index, &settings);
//! println!("{:?} with {:?} neighbors", record.kind, record.detail.neighbors.map(|n| n.len()));
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod geometry;
pub mod host;
pub mod index;
pub mod neighbors;
pub mod selection;
pub mod style;

pub use config::{Settings, DEFAULT_ID_PROPERTY};
pub use data::{load_index, load_regions, regions_from_geojson_str, RegionCatalog};
pub use error::{ConfigError, ConfigValueError, DataLoadError, IndexLoadError};
pub use geometry::{
    bounding_box_of, buffer, Attributes, Boundary, BoundingBox, BufferedGeometry, Coord,
    IndexEntry, Polygon, Region, Units,
};
pub use index::{IndexSnapshot, SpatialIndex};
pub use neighbors::{find_neighbors, NeighborFinder};
pub use selection::{
    NotificationKind, NotificationRecord, SelectionController, SelectionDetail, SelectionStore,
};
pub use style::{county_style, hover_style, state_style, StyleSpec};
