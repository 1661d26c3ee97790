//! Serialized R-tree snapshot format
//!
//! The snapshot is the JSON dump of a bulk-loaded bounding-box tree:
//! nodes are `{children, height, leaf, minX, minY, maxX, maxY}` and leaf
//! children are items `{minX, minY, maxX, maxY, properties}`. Extra item
//! fields such as a GeoJSON `geometry` are ignored. The same structure can be
//! carried as MessagePack.

use crate::error::IndexLoadError;
use crate::geometry::{Attributes, BoundingBox, IndexEntry};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Tree node. Bounds are `null` on an empty root.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotNode {
    pub children: Vec<SnapshotChild>,
    pub height: u32,
    pub leaf: bool,
    pub min_x: Option<f64>,
    pub min_y: Option<f64>,
    pub max_x: Option<f64>,
    pub max_y: Option<f64>,
}

/// Leaf payload: a region's box plus its attributes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotItem {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
    #[serde(default)]
    pub properties: Attributes,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SnapshotChild {
    Node(SnapshotNode),
    Item(SnapshotItem),
}

/// A whole serialized tree, rooted at one node
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndexSnapshot {
    pub root: SnapshotNode,
}

impl IndexSnapshot {
    pub fn from_json_str(json: &str) -> Result<Self, IndexLoadError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_msgpack(bytes: &[u8]) -> Result<Self, IndexLoadError> {
        Ok(rmp_serde::from_slice(bytes)?)
    }

    /// Encode as MessagePack with named fields
    pub fn to_msgpack(&self) -> Result<Vec<u8>, rmp_serde::encode::Error> {
        rmp_serde::to_vec_named(self)
    }

    /// Validate the tree structure and flatten its leaf items into entries
    pub fn into_entries(self, id_property: &str) -> Result<Vec<IndexEntry>, IndexLoadError> {
        let mut entries = Vec::new();
        if self.root.children.is_empty() {
            if !self.root.leaf || self.root.height != 1 {
                return Err(IndexLoadError::malformed("empty root must be a leaf of height 1"));
            }
            return Ok(entries);
        }
        collect_entries(self.root, id_property, "root", &mut entries)?;
        Ok(entries)
    }
}

fn node_bbox(node: &SnapshotNode, path: &str) -> Result<BoundingBox, IndexLoadError> {
    match (node.min_x, node.min_y, node.max_x, node.max_y) {
        (Some(min_x), Some(min_y), Some(max_x), Some(max_y)) => {
            let bbox = BoundingBox { min_x, min_y, max_x, max_y };
            if bbox.is_valid() {
                Ok(bbox)
            } else {
                Err(IndexLoadError::malformed(format!("{}: invalid bounds {:?}", path, bbox)))
            }
        }
        _ => Err(IndexLoadError::malformed(format!("{}: missing bounds", path))),
    }
}

fn item_id(item: &SnapshotItem, id_property: &str, path: &str) -> Result<String, IndexLoadError> {
    match item.properties.get(id_property) {
        Some(serde_json::Value::String(s)) => Ok(s.clone()),
        Some(serde_json::Value::Number(n)) => Ok(n.to_string()),
        _ => {
            warn!(item = path, id_property, "Index item has no identifier, rejecting snapshot");
            Err(IndexLoadError::malformed(format!(
                "{}: item has no '{}' identifier",
                path, id_property
            )))
        }
    }
}

fn collect_entries(
    node: SnapshotNode,
    id_property: &str,
    path: &str,
    out: &mut Vec<IndexEntry>,
) -> Result<(), IndexLoadError> {
    if node.height == 0 {
        return Err(IndexLoadError::malformed(format!("{}: height must be at least 1", path)));
    }
    if node.leaf != (node.height == 1) {
        return Err(IndexLoadError::malformed(format!(
            "{}: leaf flag {} does not match height {}",
            path, node.leaf, node.height
        )));
    }
    if node.children.is_empty() {
        return Err(IndexLoadError::malformed(format!("{}: node has no children", path)));
    }

    let bounds = node_bbox(&node, path)?;
    let height = node.height;

    for (i, child) in node.children.into_iter().enumerate() {
        let child_path = format!("{}/{}", path, i);
        match (node.leaf, child) {
            (true, SnapshotChild::Item(item)) => {
                let bbox = BoundingBox {
                    min_x: item.min_x,
                    min_y: item.min_y,
                    max_x: item.max_x,
                    max_y: item.max_y,
                };
                if !bbox.is_valid() {
                    return Err(IndexLoadError::malformed(format!(
                        "{}: invalid item bounds {:?}",
                        child_path, bbox
                    )));
                }
                if !bounds.contains(&bbox) {
                    return Err(IndexLoadError::malformed(format!(
                        "{}: item lies outside its node",
                        child_path
                    )));
                }
                let id = item_id(&item, id_property, &child_path)?;
                out.push(IndexEntry::new(id, bbox, item.properties));
            }
            (false, SnapshotChild::Node(child)) => {
                if child.height + 1 != height {
                    return Err(IndexLoadError::malformed(format!(
                        "{}: child height {} under parent height {}",
                        child_path, child.height, height
                    )));
                }
                let child_bounds = node_bbox(&child, &child_path)?;
                if !bounds.contains(&child_bounds) {
                    return Err(IndexLoadError::malformed(format!(
                        "{}: node lies outside its parent",
                        child_path
                    )));
                }
                collect_entries(child, id_property, &child_path, out)?;
            }
            (true, SnapshotChild::Node(_)) => {
                return Err(IndexLoadError::malformed(format!(
                    "{}: leaf node contains a subtree",
                    child_path
                )));
            }
            (false, SnapshotChild::Item(_)) => {
                return Err(IndexLoadError::malformed(format!(
                    "{}: internal node contains an item",
                    child_path
                )));
            }
        }
    }
    Ok(())
}
