//! Node store
//!
//! Live nodes of the selected process, kept in z-order (the last node is
//! drawn on top) with an id index for constant-time lookup.

use std::collections::{HashMap, HashSet};
use tracing::{debug, trace};

use crate::core::{EditorError, EditorResult, EntityId, Identified, Node, SelectMode, Store};

/// Node store implementation
///
/// Holds every node of one process. Variant-specific operations live next
/// to their concern: activities in `activity`, comments and markers in
/// `extend`, derived join/split flags in `topology`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeStore {
    /// Nodes in z-order
    nodes: Vec<Node>,
    /// Node id to position in `nodes`
    index: HashMap<EntityId, usize>,
}

impl NodeStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the nodes in z-order, e.g. for the entity factory
    pub fn as_slice(&self) -> &[Node] {
        &self.nodes
    }

    /// Get a mutable node by id
    pub fn get_mut(&mut self, id: EntityId) -> EditorResult<&mut Node> {
        match self.index.get(&id) {
            Some(&pos) => Ok(&mut self.nodes[pos]),
            None => Err(EditorError::not_found("node", id)),
        }
    }

    /// Append a node on top of the z-order
    pub fn insert(&mut self, node: Node) {
        trace!(node_id = node.id(), node_kind = node.kind(), "Adding node to store");
        self.index.insert(node.id(), self.nodes.len());
        self.nodes.push(node);
        debug!(node_count = self.nodes.len(), "Node added");
    }

    /// Remove the given nodes, returning the ones that existed
    pub fn remove(&mut self, ids: &HashSet<EntityId>) -> Vec<Node> {
        let (removed, kept): (Vec<Node>, Vec<Node>) = std::mem::take(&mut self.nodes)
            .into_iter()
            .partition(|node| ids.contains(&node.id()));
        self.nodes = kept;
        self.reindex();
        debug!(
            removed = removed.len(),
            node_count = self.nodes.len(),
            "Nodes removed"
        );
        removed
    }

    /// Move a node to the top of the z-order
    pub fn layer_top(&mut self, id: EntityId) -> EditorResult<()> {
        let pos = *self
            .index
            .get(&id)
            .ok_or_else(|| EditorError::not_found("node", id))?;
        let node = self.nodes.remove(pos);
        self.nodes.push(node);
        self.reindex();
        trace!(node_id = id, "Node raised to top");
        Ok(())
    }

    /// Change node selection for a set of ids
    pub fn change_select(&mut self, mode: SelectMode, ids: &[EntityId]) {
        let targets: HashSet<EntityId> = ids.iter().copied().collect();
        for node in &mut self.nodes {
            let selected = mode.apply(node.is_selected(), targets.contains(&node.id()));
            node.set_selected(selected);
        }
        trace!(mode = %mode, target_count = targets.len(), "Node selection changed");
    }

    /// Select every node
    pub fn select_all(&mut self) {
        self.nodes.iter_mut().for_each(|node| node.set_selected(true));
    }

    /// Ids of the selected nodes in z-order
    pub fn selected_ids(&self) -> Vec<EntityId> {
        self.nodes
            .iter()
            .filter(|node| node.is_selected())
            .map(Identified::id)
            .collect()
    }

    /// Move every selected node by a drag delta
    ///
    /// The delta is clamped so no selected node leaves the non-negative
    /// quadrant. Returns the delta actually applied.
    pub fn move_selected(&mut self, dx: f64, dy: f64) -> (f64, f64) {
        let selected = || self.nodes.iter().filter(|node| node.is_selected());
        let min_x = selected().map(|node| node.rect().x).fold(f64::INFINITY, f64::min);
        let min_y = selected().map(|node| node.rect().y).fold(f64::INFINITY, f64::min);
        if !min_x.is_finite() {
            return (0.0, 0.0);
        }

        let dx = dx.max(-min_x);
        let dy = dy.max(-min_y);
        self.update_where(Node::is_selected, |node| {
            let rect = node.rect_mut();
            rect.x += dx;
            rect.y += dy;
        });
        trace!(dx, dy, "Selected nodes moved");
        (dx, dy)
    }

    fn reindex(&mut self) {
        self.index = self
            .nodes
            .iter()
            .enumerate()
            .map(|(pos, node)| (node.id(), pos))
            .collect();
    }
}

impl Store for NodeStore {
    type Item = Node;

    fn load(&mut self, items: &[Node]) {
        self.nodes = items.to_vec();
        self.reindex();
        debug!(node_count = self.nodes.len(), "Nodes loaded");
    }

    fn save(&self) -> Vec<Node> {
        self.nodes.clone()
    }

    fn get(&self, id: EntityId) -> EditorResult<&Node> {
        self.index
            .get(&id)
            .map(|&pos| &self.nodes[pos])
            .ok_or_else(|| EditorError::not_found("node", id))
    }

    fn update_where<P, U>(&mut self, mut predicate: P, mut update: U) -> usize
    where
        P: FnMut(&Node) -> bool,
        U: FnMut(&mut Node),
    {
        let mut count = 0;
        let mut renumbered = false;
        for node in self.nodes.iter_mut().filter(|node| predicate(node)) {
            let id = node.id();
            update(node);
            renumbered |= node.id() != id;
            count += 1;
        }
        if renumbered {
            self.reindex();
        }
        count
    }

    fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CommentNode, Rect, StartNode};

    fn start(id: EntityId, x: f64, y: f64) -> Node {
        Node::StartNode(StartNode {
            id,
            rect: Rect::new(x, y, 40.0, 40.0),
            selected: false,
        })
    }

    fn comment(id: EntityId) -> Node {
        Node::CommentNode(CommentNode {
            id,
            comment: "note".to_string(),
            rect: Rect::default(),
            selected: true,
        })
    }

    #[test]
    fn test_store_basic_operations() {
        let mut store = NodeStore::new();
        store.insert(start(1, 0.0, 0.0));
        store.insert(comment(2));

        assert_eq!(store.len(), 2);
        assert!(store.contains(1));
        assert!(!store.contains(9));
        assert_eq!(store.get(2).unwrap().kind(), "commentNode");
        assert_eq!(
            store.get(9).unwrap_err(),
            EditorError::not_found("node", 9)
        );
    }

    #[test]
    fn test_load_keeps_incoming_selection() {
        let mut store = NodeStore::new();
        store.insert(start(7, 0.0, 0.0));
        store.change_select(SelectMode::Select, &[7]);

        store.load(&[start(1, 0.0, 0.0), comment(2)]);
        assert!(!store.contains(7));
        assert_eq!(store.selected_ids(), vec![2]);
    }

    #[test]
    fn test_save_is_detached() {
        let mut store = NodeStore::new();
        store.insert(start(1, 5.0, 5.0));
        let saved = store.save();
        store.get_mut(1).unwrap().rect_mut().x = 100.0;
        assert_eq!(saved[0].rect().x, 5.0);
    }

    #[test]
    fn test_change_select_modes() {
        let mut store = NodeStore::new();
        store.load(&[start(1, 0.0, 0.0), start(2, 0.0, 0.0), start(3, 0.0, 0.0)]);

        store.change_select(SelectMode::Select, &[1, 2]);
        assert_eq!(store.selected_ids(), vec![1, 2]);

        store.change_select(SelectMode::Toggle, &[2, 3]);
        assert_eq!(store.selected_ids(), vec![1, 3]);

        store.change_select(SelectMode::ClearAll, &[]);
        assert!(store.selected_ids().is_empty());

        store.select_all();
        assert_eq!(store.selected_ids(), vec![1, 2, 3]);
    }

    #[test]
    fn test_layer_top_reorders() {
        let mut store = NodeStore::new();
        store.load(&[start(1, 0.0, 0.0), start(2, 0.0, 0.0), start(3, 0.0, 0.0)]);
        store.layer_top(1).unwrap();

        let ids: Vec<_> = store.iter().map(Identified::id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
        assert_eq!(store.get(1).unwrap().id(), 1);
        assert!(store.layer_top(42).is_err());
    }

    #[test]
    fn test_move_selected_clamps_at_origin() {
        let mut store = NodeStore::new();
        store.load(&[start(1, 10.0, 30.0), start(2, 50.0, 5.0), start(3, 0.0, 0.0)]);
        store.change_select(SelectMode::Select, &[1, 2]);

        let applied = store.move_selected(-20.0, -20.0);
        assert_eq!(applied, (-10.0, -5.0));
        assert_eq!(store.get(1).unwrap().rect().x, 0.0);
        assert_eq!(store.get(2).unwrap().rect().y, 0.0);
        // unselected node untouched
        assert_eq!(store.get(3).unwrap().rect(), &Rect::new(0.0, 0.0, 40.0, 40.0));
    }

    #[test]
    fn test_move_without_selection_is_noop() {
        let mut store = NodeStore::new();
        store.load(&[start(1, 10.0, 10.0)]);
        assert_eq!(store.move_selected(5.0, 5.0), (0.0, 0.0));
        assert_eq!(store.get(1).unwrap().rect().x, 10.0);
    }

    #[test]
    fn test_remove_reindexes() {
        let mut store = NodeStore::new();
        store.load(&[start(1, 0.0, 0.0), start(2, 0.0, 0.0), start(3, 0.0, 0.0)]);
        let removed = store.remove(&HashSet::from([1, 9]));
        assert_eq!(removed.len(), 1);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(3).unwrap().id(), 3);
    }

    #[test]
    fn test_update_where_follows_changed_ids() {
        let mut store = NodeStore::new();
        store.load(&[start(1, 0.0, 0.0), start(2, 7.0, 0.0)]);
        let updated = store.update_where(
            |node| node.id() == 1,
            |node| {
                if let Node::StartNode(marker) = node {
                    marker.id = 5;
                }
            },
        );
        assert_eq!(updated, 1);
        assert!(!store.contains(1));
        assert_eq!(store.get(5).unwrap().id(), 5);
        assert_eq!(store.get(2).unwrap().rect().x, 7.0);
    }
}
