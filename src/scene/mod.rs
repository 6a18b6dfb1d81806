//! Scene tree
//!
//! Game objects live in a generational arena and form a tree rooted at a
//! single root node. Nodes carry an optional transform, collider, and
//! rigidbody; world-space transforms accumulate down the ancestor chain.

mod snapshot;

pub use snapshot::{SceneSnapshot, SnapshotError, SnapshotNode};

use smallvec::SmallVec;
use thunderdome::{Arena, Index};

use crate::physics::{Collider, Rigidbody};
use crate::transform::Transform;

/// Handle to a node in a [`SceneTree`].
///
/// Handles are generational: once a node is reaped, its handle stays dead
/// even if the slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(Index);

/// A single object in the scene tree.
#[derive(Debug, Clone)]
pub struct Node {
    /// Display name, used for lookup and tree dumps
    pub name: String,
    parent: Option<Index>,
    children: SmallVec<[Index; 8]>,
    valid: bool,
    active: bool,
    started: bool,
    /// Local transform relative to the parent
    pub transform: Option<Transform>,
    /// Collision shape
    pub collider: Option<Collider>,
    /// Kinematic state
    pub rigidbody: Option<Rigidbody>,
}

impl Node {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            children: SmallVec::new(),
            valid: true,
            active: true,
            started: false,
            transform: Some(Transform::default()),
            collider: None,
            rigidbody: None,
        }
    }

    /// Whether the node is still part of the tree.
    ///
    /// Ended nodes stay in the arena until the next reap but report invalid.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// The node's own active flag, ignoring ancestors
    #[must_use]
    pub fn is_self_active(&self) -> bool {
        self.active
    }

    /// Whether the node has been seen by at least one update
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.started
    }
}

/// Tree of game objects backed by a generational arena.
#[derive(Debug)]
pub struct SceneTree {
    arena: Arena<Node>,
    root: Index,
}

impl SceneTree {
    /// Create a tree containing only the root node
    #[must_use]
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(Node::new("Root"));
        Self { arena, root }
    }

    /// Handle of the root node
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId(self.root)
    }

    /// Borrow a node
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.arena.get(id.0)
    }

    /// Mutably borrow a node
    #[must_use]
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.arena.get_mut(id.0)
    }

    /// Whether the handle points at a live, valid node
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.arena.get(id.0).is_some_and(Node::is_valid)
    }

    /// Number of live nodes, root included
    #[must_use]
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Whether only the root remains
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.arena.len() <= 1
    }

    /// Create a new node under `parent`.
    ///
    /// Falls back to the root when the parent handle is dead.
    pub fn spawn_child(&mut self, parent: NodeId, name: impl Into<String>) -> NodeId {
        let parent_index = if self.arena.contains(parent.0) {
            parent.0
        } else {
            self.root
        };
        let child = self.arena.insert(Node::new(name));
        self.arena[child].parent = Some(parent_index);
        self.arena[parent_index].children.push(child);
        NodeId(child)
    }

    /// Convenience for spawning directly under the root
    pub fn spawn(&mut self, name: impl Into<String>) -> NodeId {
        self.spawn_child(self.root(), name)
    }

    /// Reparent `child` under `parent`.
    ///
    /// Does nothing if the two are the same node, the child is already
    /// under this parent, or the move would create a cycle.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) {
        if parent == child
            || !self.arena.contains(parent.0)
            || !self.arena.contains(child.0)
            || self.has_ancestor(parent, child)
        {
            return;
        }
        if self.arena[child.0].parent == Some(parent.0) {
            return;
        }
        if let Some(old_parent) = self.arena[child.0].parent {
            let siblings = &mut self.arena[old_parent].children;
            siblings.retain(|c| *c != child.0);
        }
        self.arena[child.0].parent = Some(parent.0);
        self.arena[parent.0].children.push(child.0);
    }

    /// Detach `child` from `parent` and hang it under the root
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        if self.arena.get(child.0).and_then(|n| n.parent) != Some(parent.0) {
            return;
        }
        self.arena[parent.0].children.retain(|c| *c != child.0);
        self.arena[child.0].parent = Some(self.root);
        let root = self.root;
        self.arena[root].children.push(child.0);
    }

    /// Parent handle, `None` for the root
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.arena.get(id.0)?.parent.map(NodeId)
    }

    /// Handles of the node's direct children
    #[must_use]
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        match self.arena.get(id.0) {
            Some(node) => node.children.iter().map(|c| NodeId(*c)).collect(),
            None => Vec::new(),
        }
    }

    /// Whether `ancestor` appears on the path from `id` to the root
    #[must_use]
    pub fn has_ancestor(&self, id: NodeId, ancestor: NodeId) -> bool {
        let mut current = self.arena.get(id.0).and_then(|n| n.parent);
        while let Some(index) = current {
            if index == ancestor.0 {
                return true;
            }
            current = self.arena.get(index).and_then(|n| n.parent);
        }
        false
    }

    /// Number of direct children
    #[must_use]
    pub fn child_count(&self, id: NodeId) -> usize {
        self.arena.get(id.0).map_or(0, |n| n.children.len())
    }

    /// Number of ancestors between the node and the root.
    ///
    /// The root has depth zero, as do dead handles.
    #[must_use]
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.arena.get(id.0).and_then(|n| n.parent);
        while let Some(index) = current {
            depth += 1;
            current = self.arena.get(index).and_then(|n| n.parent);
        }
        depth
    }

    /// First node matching a predicate, in preorder
    #[must_use]
    pub fn find(&self, mut pred: impl FnMut(&Node) -> bool) -> Option<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .find(|id| pred(&self.arena[id.0]))
    }

    /// Every node matching a predicate, in preorder
    #[must_use]
    pub fn find_all(&self, mut pred: impl FnMut(&Node) -> bool) -> Vec<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .filter(|id| pred(&self.arena[id.0]))
            .collect()
    }

    /// First node with the given name, in preorder
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.find(|node| node.name == name)
    }

    /// All nodes under `id` in preorder, `id` included
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id.0];
        while let Some(index) = stack.pop() {
            let Some(node) = self.arena.get(index) else {
                continue;
            };
            out.push(NodeId(index));
            for child in node.children.iter().rev() {
                stack.push(*child);
            }
        }
        out
    }

    /// Whether the node and every ancestor is active
    #[must_use]
    pub fn is_active(&self, id: NodeId) -> bool {
        let Some(node) = self.arena.get(id.0) else {
            return false;
        };
        if !node.active || !node.valid {
            return false;
        }
        let mut current = node.parent;
        while let Some(index) = current {
            let parent = &self.arena[index];
            if !parent.active || !parent.valid {
                return false;
            }
            current = parent.parent;
        }
        true
    }

    /// Set a node's own active flag
    pub fn set_active(&mut self, id: NodeId, active: bool) {
        if let Some(node) = self.arena.get_mut(id.0) {
            node.active = active;
        }
    }

    /// Mark a node as having started
    pub fn mark_started(&mut self, id: NodeId) {
        if let Some(node) = self.arena.get_mut(id.0) {
            node.started = true;
        }
    }

    /// Invalidate a node and its whole subtree.
    ///
    /// The nodes remain in the arena until [`reap`](Self::reap) runs, but
    /// report invalid and are skipped by activity checks. Ending the root
    /// is ignored.
    pub fn end(&mut self, id: NodeId) {
        if id.0 == self.root {
            log::warn!("Ignoring request to end the scene root");
            return;
        }
        for node_id in self.descendants(id) {
            if let Some(node) = self.arena.get_mut(node_id.0) {
                node.valid = false;
            }
        }
    }

    /// Remove every invalid node from the arena.
    ///
    /// Returns the number of nodes removed.
    pub fn reap(&mut self) -> usize {
        let dead: Vec<Index> = self
            .arena
            .iter()
            .filter(|(_, node)| !node.valid)
            .map(|(index, _)| index)
            .collect();
        for index in &dead {
            if let Some(node) = self.arena.remove(*index)
                && let Some(parent) = node.parent
                && let Some(parent_node) = self.arena.get_mut(parent)
            {
                parent_node.children.retain(|c| c != index);
            }
        }
        dead.len()
    }

    /// World-space transform of a node.
    ///
    /// Local transforms compose from the root down: positions and rotations
    /// add, scales multiply. Nodes without a transform contribute identity.
    #[must_use]
    pub fn world_transform(&self, id: NodeId) -> Transform {
        let mut chain: SmallVec<[Index; 8]> = SmallVec::new();
        let mut current = Some(id.0);
        while let Some(index) = current {
            chain.push(index);
            current = self.arena.get(index).and_then(|n| n.parent);
        }
        let mut world = Transform::default();
        for index in chain.iter().rev() {
            if let Some(local) = self.arena.get(*index).and_then(|n| n.transform) {
                world = world.compose(&local);
            }
        }
        world
    }

    /// Render the tree as an indented ASCII dump and log it at info level
    pub fn print_tree(&self) {
        log::info!("Scene tree:\n{}", self.format_tree());
    }

    /// The tree rendered as an indented ASCII dump.
    ///
    /// Children connect with `+---`, the last child of a node with `\...`.
    #[must_use]
    pub fn format_tree(&self) -> String {
        let mut out = String::new();
        self.format_node(self.root, 0, false, &mut out);
        out
    }

    fn format_node(&self, index: Index, depth: usize, last: bool, out: &mut String) {
        let Some(node) = self.arena.get(index) else {
            return;
        };
        for _ in 0..depth {
            out.push_str("    ");
        }
        if depth > 0 {
            out.push_str(if last { "\\..." } else { "+---" });
        }
        out.push_str(&node.name);
        if !node.valid {
            out.push_str(" (ending)");
        } else if !node.active {
            out.push_str(" (inactive)");
        }
        out.push('\n');
        for (i, child) in node.children.iter().enumerate() {
            self.format_node(*child, depth + 1, i + 1 == node.children.len(), out);
        }
    }
}

impl Default for SceneTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_spawn_and_find() {
        let mut tree = SceneTree::new();
        let player = tree.spawn("Player");
        let weapon = tree.spawn_child(player, "Weapon");

        assert_eq!(tree.find_by_name("Weapon"), Some(weapon));
        assert_eq!(tree.parent(weapon), Some(player));
        assert_eq!(tree.children(player), vec![weapon]);
    }

    #[test]
    fn test_depth_and_child_count() {
        let mut tree = SceneTree::new();
        let a = tree.spawn("A");
        let b = tree.spawn_child(a, "B");
        let c = tree.spawn_child(b, "C");
        tree.spawn_child(b, "D");

        assert_eq!(tree.depth(tree.root()), 0);
        assert_eq!(tree.depth(a), 1);
        assert_eq!(tree.depth(c), 3);
        assert_eq!(tree.child_count(b), 2);
        assert_eq!(tree.child_count(c), 0);
    }

    #[test]
    fn test_find_with_predicate() {
        let mut tree = SceneTree::new();
        tree.spawn("Enemy");
        let armed = tree.spawn("Enemy");
        tree.node_mut(armed).unwrap().collider = Some(Collider::circle(1.0));
        tree.spawn("Pickup");

        let found = tree.find(|n| n.collider.is_some());
        assert_eq!(found, Some(armed));
        assert_eq!(tree.find(|n| n.name == "Boss"), None);

        let enemies = tree.find_all(|n| n.name == "Enemy");
        assert_eq!(enemies.len(), 2);
        assert!(enemies.contains(&armed));
    }

    #[test]
    fn test_add_child_reparents() {
        let mut tree = SceneTree::new();
        let a = tree.spawn("A");
        let b = tree.spawn("B");
        let c = tree.spawn_child(a, "C");

        tree.add_child(b, c);
        assert_eq!(tree.parent(c), Some(b));
        assert!(tree.children(a).is_empty());

        // A cycle must be refused
        tree.add_child(c, b);
        assert_eq!(tree.parent(b), Some(tree.root()));
    }

    #[test]
    fn test_end_invalidates_subtree_and_reap_removes() {
        let mut tree = SceneTree::new();
        let a = tree.spawn("A");
        let b = tree.spawn_child(a, "B");
        let c = tree.spawn_child(b, "C");
        let other = tree.spawn("Other");

        tree.end(a);
        assert!(!tree.contains(a));
        assert!(!tree.contains(b));
        assert!(!tree.contains(c));
        assert!(tree.contains(other));

        let removed = tree.reap();
        assert_eq!(removed, 3);
        assert!(tree.node(a).is_none());
        assert!(tree.node(other).is_some());
    }

    #[test]
    fn test_end_root_is_ignored() {
        let mut tree = SceneTree::new();
        tree.end(tree.root());
        assert!(tree.contains(tree.root()));
    }

    #[test]
    fn test_activity_walks_ancestors() {
        let mut tree = SceneTree::new();
        let a = tree.spawn("A");
        let b = tree.spawn_child(a, "B");

        assert!(tree.is_active(b));
        tree.set_active(a, false);
        assert!(!tree.is_active(b));
        assert!(tree.node(b).unwrap().is_self_active());
    }

    #[test]
    fn test_world_transform_accumulates() {
        let mut tree = SceneTree::new();
        let a = tree.spawn("A");
        let b = tree.spawn_child(a, "B");

        let mut ta = Transform::from_position(Vec2::new(10.0, 0.0));
        ta.set_rotation(90.0);
        ta.set_scale(2.0, 2.0);
        tree.node_mut(a).unwrap().transform = Some(ta);

        let mut tb = Transform::from_position(Vec2::new(5.0, 5.0));
        tb.set_rotation(300.0);
        tree.node_mut(b).unwrap().transform = Some(tb);

        let world = tree.world_transform(b);
        assert_eq!(world.position, Vec2::new(15.0, 5.0));
        assert_eq!(world.scale, Vec2::new(2.0, 2.0));
        assert!((world.rotation() - 30.0).abs() < 1e-3);
    }

    #[test]
    fn test_format_tree_marks_state_and_last_children() {
        let mut tree = SceneTree::new();
        let a = tree.spawn("Enemy");
        tree.spawn_child(a, "Sword");
        tree.spawn("Exit");
        tree.set_active(a, false);

        let dump = tree.format_tree();
        assert!(dump.starts_with("Root\n"));
        assert!(dump.contains("+---Enemy (inactive)"));
        assert!(dump.contains("    \\...Sword"));
        assert!(dump.contains("\\...Exit"));
    }

    #[test]
    fn test_dead_handle_stays_dead() {
        let mut tree = SceneTree::new();
        let a = tree.spawn("A");
        tree.end(a);
        tree.reap();
        let b = tree.spawn("B");
        assert!(tree.node(a).is_none());
        assert_ne!(a, b);
    }
}
