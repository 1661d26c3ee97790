// Selection, neighbor discovery and styling against the fixture counties
use county_select::{
    county_style, find_neighbors, load_index, load_regions, Attributes, IndexLoadError,
    NotificationKind, RegionCatalog, SelectionController, Settings, SpatialIndex,
};

const REGIONS: &str = "tests/data/counties.json";
const INDEX: &str = "tests/data/county-spatial-index.json";

fn catalog() -> RegionCatalog {
    RegionCatalog::new(load_regions(REGIONS, "GEO_ID").expect("Failed to load fixture regions"))
}

fn index() -> SpatialIndex {
    load_index(INDEX, "GEO_ID").expect("Failed to load fixture index")
}

fn neighbor_ids(neighbors: &[Attributes]) -> Vec<String> {
    let mut ids: Vec<String> = neighbors
        .iter()
        .filter_map(|a| a.get("GEO_ID").and_then(|v| v.as_str()).map(String::from))
        .collect();
    ids.sort();
    ids
}

#[test]
fn test_width_at_initial_zoom() {
    let settings = Settings { initial_zoom: 4.0, county_border_width: 1.0, ..Settings::default() };
    let style = county_style(4.0, false, &settings);
    assert!((style.stroke_width - 1.0).abs() < 1e-9);
}

#[test]
fn test_width_three_levels_above_initial_zoom() {
    let settings = Settings { initial_zoom: 4.0, county_border_width: 1.0, ..Settings::default() };
    let style = county_style(7.0, false, &settings);
    assert!((style.stroke_width - 1.3).abs() < 1e-9);
}

#[test]
fn test_border_opacity_halved_at_low_zoom() {
    let settings = Settings {
        initial_zoom: 4.0,
        county_border_opacity: 1.0,
        ..Settings::default()
    };
    assert_eq!(county_style(3.0, false, &settings).stroke_opacity, 0.5);
    assert_eq!(county_style(5.0, false, &settings).stroke_opacity, 1.0);
}

#[test]
fn test_width_never_below_floor() {
    let settings = Settings::default();
    for zoom in -30..30 {
        for selected in [false, true] {
            assert!(county_style(zoom as f64, selected, &settings).stroke_width >= 0.5);
        }
    }
}

#[test]
fn test_toggle_without_neighbors() {
    let catalog = catalog();
    let index = index();
    let settings = Settings::default();
    let mut controller = SelectionController::new();
    let region = catalog.get("G001").expect("G001 missing");

    let on = controller.toggle(region, false, &index, &settings);
    assert_eq!(on.kind, NotificationKind::Selected);
    let stored = controller.store().get("G001").expect("G001 should be selected");
    assert!(stored.neighbors.is_none());
    assert_eq!(stored.attributes["NAME"], "Adams");

    let off = controller.toggle(region, false, &index, &settings);
    assert_eq!(off.kind, NotificationKind::Deselected);
    assert!(controller.store().get("G001").is_none());
}

#[test]
fn test_toggle_with_neighbors_finds_adjacent_county() {
    let catalog = catalog();
    let index = index();
    let settings = Settings::default();
    let mut controller = SelectionController::new();

    let record = controller.toggle(catalog.get("G002").unwrap(), true, &index, &settings);
    let neighbors = record.detail.neighbors.expect("neighbors enabled");
    let ids = neighbor_ids(&neighbors);
    assert!(ids.contains(&"G003".to_string()));
    // The selected county is indexed too and is reported as its own neighbor
    assert!(ids.contains(&"G002".to_string()));
    assert!(!ids.contains(&"G004".to_string()));

    let stored = controller.store().get("G002").unwrap();
    assert_eq!(stored.neighbors.as_ref().map(|n| n.len()), Some(neighbors.len()));
}

#[test]
fn test_toggle_pairs_restore_prior_state() {
    let catalog = catalog();
    let index = index();
    let settings = Settings::default();
    let mut controller = SelectionController::new();

    controller.toggle(catalog.get("G003").unwrap(), true, &index, &settings);
    let before = controller.selected();

    for region in catalog.iter() {
        controller.toggle(region, true, &index, &settings);
        controller.toggle(region, true, &index, &settings);
        assert_eq!(controller.selected(), before, "pair on {} changed the store", region.id());
    }
}

#[test]
fn test_store_matches_last_toggle() {
    let catalog = catalog();
    let index = SpatialIndex::unavailable();
    let settings = Settings::default();
    let mut controller = SelectionController::new();
    let sequence = ["G001", "G002", "G001", "G004", "G002", "G002"];

    for id in sequence {
        controller.toggle(catalog.get(id).unwrap(), false, &index, &settings);
    }

    // G001 toggled twice, G002 three times, G004 once
    assert!(!controller.is_selected("G001"));
    assert!(controller.is_selected("G002"));
    assert!(controller.is_selected("G004"));
    assert!(!controller.is_selected("G003"));
    let order: Vec<String> = controller.selected().keys().cloned().collect();
    assert_eq!(order, vec!["G004", "G002"]);
}

#[test]
fn test_failed_index_degrades_every_lookup() {
    let result = load_index("tests/data/malformed-index.json", "GEO_ID");
    assert!(matches!(result, Err(IndexLoadError::Malformed { .. })));

    let index = SpatialIndex::from_load_result(result);
    for region in catalog().iter() {
        assert!(find_neighbors(region, &index).is_empty());
    }
}

#[test]
fn test_missing_index_file_is_an_io_error() {
    let result = load_index("tests/data/no-such-index.json", "GEO_ID");
    assert!(matches!(result, Err(IndexLoadError::Io(_))));
}

#[test]
fn test_msgpack_index_answers_like_json() {
    let json = std::fs::read_to_string(INDEX).unwrap();
    let bytes = county_select::IndexSnapshot::from_json_str(&json).unwrap().to_msgpack().unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("county-spatial-index.msgpack");
    std::fs::write(&path, bytes).unwrap();

    let from_msgpack = load_index(&path, "GEO_ID").unwrap();
    let from_json = index();
    let region = catalog().get("G002").unwrap().clone();
    assert_eq!(
        neighbor_ids(&find_neighbors(&region, &from_msgpack)),
        neighbor_ids(&find_neighbors(&region, &from_json))
    );
}
