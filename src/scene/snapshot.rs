//! Scene serialization and deserialization
//!
//! Supports saving and loading scene snapshots in RON (Rusty Object
//! Notation) and JSON formats. A snapshot flattens the tree into a vector
//! of nodes linked by indices; node zero is always the root.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::physics::{Collider, Rigidbody};
use crate::transform::Transform;

use super::SceneTree;

/// A serializable node with its components
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotNode {
    /// Node name
    pub name: String,
    /// Local transform
    pub transform: Option<Transform>,
    /// Collider component
    pub collider: Option<Collider>,
    /// Rigidbody component
    pub rigidbody: Option<Rigidbody>,
    /// Whether the node's own active flag is set
    #[serde(default = "default_active")]
    pub active: bool,
    /// Parent node index (if any)
    pub parent_index: Option<usize>,
    /// Child node indices
    pub children_indices: Vec<usize>,
}

fn default_active() -> bool {
    true
}

/// A serializable scene containing multiple nodes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneSnapshot {
    /// Snapshot name
    pub name: String,
    /// Snapshot version for compatibility
    pub version: u32,
    /// All nodes, in preorder; index zero is the root
    pub nodes: Vec<SnapshotNode>,
}

impl SceneSnapshot {
    /// Capture a snapshot of a live scene tree
    #[must_use]
    pub fn capture(name: impl Into<String>, tree: &SceneTree) -> Self {
        let order = tree.descendants(tree.root());
        let index_of = |id| order.iter().position(|o| *o == id);

        let mut nodes = Vec::with_capacity(order.len());
        for id in &order {
            let Some(n) = tree.node(*id) else {
                continue;
            };
            nodes.push(SnapshotNode {
                name: n.name.clone(),
                transform: n.transform,
                collider: n.collider,
                rigidbody: n.rigidbody,
                active: n.is_self_active(),
                parent_index: tree.parent(*id).and_then(index_of),
                children_indices: tree
                    .children(*id)
                    .into_iter()
                    .filter_map(index_of)
                    .collect(),
            });
        }
        Self {
            name: name.into(),
            version: 1,
            nodes,
        }
    }

    /// Rebuild a live scene tree from this snapshot.
    ///
    /// Nodes whose parent index is missing or out of range land under the
    /// root.
    #[must_use]
    pub fn instantiate(&self) -> SceneTree {
        let mut tree = SceneTree::new();
        let mut handles = Vec::with_capacity(self.nodes.len());
        for (i, node) in self.nodes.iter().enumerate() {
            if i == 0 {
                handles.push(tree.root());
                continue;
            }
            // Parents precede children in preorder
            let parent = node
                .parent_index
                .and_then(|p| handles.get(p).copied())
                .unwrap_or_else(|| tree.root());
            let id = tree.spawn_child(parent, node.name.clone());
            if let Some(live) = tree.node_mut(id) {
                live.transform = node.transform;
                live.collider = node.collider;
                live.rigidbody = node.rigidbody;
            }
            tree.set_active(id, node.active);
            handles.push(id);
        }
        tree
    }

    /// Save the snapshot to a RON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or serialization fails
    pub fn save_ron(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        let ron_string = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| SnapshotError::SerializeError(e.to_string()))?;
        fs::write(path, ron_string).map_err(|e| SnapshotError::IoError(e.to_string()))?;
        Ok(())
    }

    /// Load a snapshot from a RON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or deserialization fails
    pub fn load_ron(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let content =
            fs::read_to_string(path).map_err(|e| SnapshotError::IoError(e.to_string()))?;
        let snapshot: SceneSnapshot =
            ron::from_str(&content).map_err(|e| SnapshotError::DeserializeError(e.to_string()))?;
        Ok(snapshot)
    }

    /// Save the snapshot to a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or serialization fails
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        let json_string = serde_json::to_string_pretty(self)
            .map_err(|e| SnapshotError::SerializeError(e.to_string()))?;
        fs::write(path, json_string).map_err(|e| SnapshotError::IoError(e.to_string()))?;
        Ok(())
    }

    /// Load a snapshot from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or deserialization fails
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let content =
            fs::read_to_string(path).map_err(|e| SnapshotError::IoError(e.to_string()))?;
        let snapshot: SceneSnapshot = serde_json::from_str(&content)
            .map_err(|e| SnapshotError::DeserializeError(e.to_string()))?;
        Ok(snapshot)
    }

    /// Get the number of nodes
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

/// Errors that can occur during snapshot operations
#[derive(Debug, Clone)]
pub enum SnapshotError {
    /// IO error
    IoError(String),
    /// Serialization error
    SerializeError(String),
    /// Deserialization error
    DeserializeError(String),
}

impl std::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IoError(e) => write!(f, "IO error: {e}"),
            Self::SerializeError(e) => write!(f, "Serialization error: {e}"),
            Self::DeserializeError(e) => write!(f, "Deserialization error: {e}"),
        }
    }
}

impl std::error::Error for SnapshotError {}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn sample_tree() -> SceneTree {
        let mut tree = SceneTree::new();
        let player = tree.spawn("Player");
        let weapon = tree.spawn_child(player, "Weapon");
        tree.node_mut(player).unwrap().transform =
            Some(Transform::from_position(Vec2::new(1.0, 2.0)));
        tree.node_mut(weapon).unwrap().collider = Some(Collider::circle(0.5));
        tree.set_active(weapon, false);
        tree
    }

    #[test]
    fn test_capture_then_instantiate() {
        let snapshot = SceneSnapshot::capture("Level 1", &sample_tree());
        assert_eq!(snapshot.node_count(), 3);
        assert_eq!(snapshot.nodes[0].name, "Root");

        let rebuilt = snapshot.instantiate();
        let player = rebuilt.find_by_name("Player").unwrap();
        let weapon = rebuilt.find_by_name("Weapon").unwrap();
        assert_eq!(rebuilt.parent(weapon), Some(player));
        assert_eq!(
            rebuilt.node(player).unwrap().transform.unwrap().position,
            Vec2::new(1.0, 2.0)
        );
        assert!(rebuilt.node(weapon).unwrap().collider.is_some());
        assert!(!rebuilt.is_active(weapon));
    }

    #[test]
    fn test_snapshot_serialization_ron() {
        let snapshot = SceneSnapshot::capture("Test Scene", &sample_tree());

        let ron_str =
            ron::ser::to_string_pretty(&snapshot, ron::ser::PrettyConfig::default()).unwrap();
        assert!(ron_str.contains("Player"));

        let loaded: SceneSnapshot = ron::from_str(&ron_str).unwrap();
        assert_eq!(loaded.name, "Test Scene");
        assert_eq!(loaded.nodes.len(), 3);
    }

    #[test]
    fn test_snapshot_serialization_json() {
        let snapshot = SceneSnapshot::capture("JSON Test", &sample_tree());

        let json_str = serde_json::to_string(&snapshot).unwrap();
        let loaded: SceneSnapshot = serde_json::from_str(&json_str).unwrap();
        assert_eq!(loaded.name, "JSON Test");
        assert!(loaded.nodes.iter().any(|n| n.collider.is_some()));
    }
}
