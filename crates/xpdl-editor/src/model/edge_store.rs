//! Edge store
//!
//! Live edges of the selected process in insertion order. Edges refer to
//! nodes by id; the operations that create edges validate those ids against
//! the node store before inserting.

use std::collections::{HashMap, HashSet};
use tracing::{debug, trace};

use crate::core::{Edge, EditorError, EditorResult, EntityId, Identified, SelectMode, Store};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeStore {
    edges: Vec<Edge>,
    index: HashMap<EntityId, usize>,
}

impl EdgeStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the edges in order, e.g. for the entity factory
    pub fn as_slice(&self) -> &[Edge] {
        &self.edges
    }

    /// Append an edge
    pub fn insert(&mut self, edge: Edge) {
        trace!(
            edge_id = edge.id(),
            edge_kind = edge.kind(),
            edge_from = edge.from_node_id(),
            edge_to = edge.to_node_id(),
            "Adding edge to store"
        );
        self.index.insert(edge.id(), self.edges.len());
        self.edges.push(edge);
        debug!(edge_count = self.edges.len(), "Edge added");
    }

    /// Remove edges matching `predicate`, returning them
    pub fn remove_where<P>(&mut self, mut predicate: P) -> Vec<Edge>
    where
        P: FnMut(&Edge) -> bool,
    {
        let (removed, kept): (Vec<Edge>, Vec<Edge>) = std::mem::take(&mut self.edges)
            .into_iter()
            .partition(|edge| predicate(edge));
        self.edges = kept;
        self.reindex();
        debug!(
            removed = removed.len(),
            edge_count = self.edges.len(),
            "Edges removed"
        );
        removed
    }

    /// Remove every edge touching one of the given nodes
    pub fn remove_touching(&mut self, node_ids: &HashSet<EntityId>) -> Vec<Edge> {
        self.remove_where(|edge| {
            node_ids.contains(&edge.from_node_id()) || node_ids.contains(&edge.to_node_id())
        })
    }

    /// Change edge selection for a set of ids
    pub fn change_select(&mut self, mode: SelectMode, ids: &[EntityId]) {
        let targets: HashSet<EntityId> = ids.iter().copied().collect();
        for edge in &mut self.edges {
            let selected = mode.apply(edge.is_selected(), targets.contains(&edge.id()));
            edge.set_selected(selected);
        }
        trace!(mode = %mode, target_count = targets.len(), "Edge selection changed");
    }

    /// Ids of the selected edges in order
    pub fn selected_ids(&self) -> Vec<EntityId> {
        self.edges
            .iter()
            .filter(|edge| edge.is_selected())
            .map(Identified::id)
            .collect()
    }

    /// Number of transitions ending at `node_id`
    pub fn incoming_transition_count(&self, node_id: EntityId) -> usize {
        self.edges
            .iter()
            .filter(|edge| edge.is_transition() && edge.to_node_id() == node_id)
            .count()
    }

    /// Number of transitions starting at `node_id`
    pub fn outgoing_transition_count(&self, node_id: EntityId) -> usize {
        self.edges
            .iter()
            .filter(|edge| edge.is_transition() && edge.from_node_id() == node_id)
            .count()
    }

    /// Get edges of the given kind between two specific nodes
    pub fn edges_between(&self, from: EntityId, to: EntityId) -> Vec<&Edge> {
        self.edges
            .iter()
            .filter(|edge| edge.from_node_id() == from && edge.to_node_id() == to)
            .collect()
    }

    fn reindex(&mut self) {
        self.index = self
            .edges
            .iter()
            .enumerate()
            .map(|(pos, edge)| (edge.id(), pos))
            .collect();
    }
}

impl Store for EdgeStore {
    type Item = Edge;

    fn load(&mut self, items: &[Edge]) {
        self.edges = items.to_vec();
        self.reindex();
        debug!(edge_count = self.edges.len(), "Edges loaded");
    }

    fn save(&self) -> Vec<Edge> {
        self.edges.clone()
    }

    fn get(&self, id: EntityId) -> EditorResult<&Edge> {
        self.index
            .get(&id)
            .map(|&pos| &self.edges[pos])
            .ok_or_else(|| EditorError::not_found("edge", id))
    }

    fn update_where<P, U>(&mut self, mut predicate: P, mut update: U) -> usize
    where
        P: FnMut(&Edge) -> bool,
        U: FnMut(&mut Edge),
    {
        let mut count = 0;
        let mut renumbered = false;
        for edge in self.edges.iter_mut().filter(|edge| predicate(edge)) {
            let id = edge.id();
            update(edge);
            renumbered |= edge.id() != id;
            count += 1;
        }
        if renumbered {
            self.reindex();
        }
        count
    }

    fn iter(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    fn len(&self) -> usize {
        self.edges.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CommentEdge, TransitionEdge};

    fn transition(id: EntityId, from: EntityId, to: EntityId) -> Edge {
        Edge::TransitionEdge(TransitionEdge {
            id,
            xpdl_id: format!("transition-{id}"),
            from_node_id: from,
            to_node_id: to,
            selected: false,
        })
    }

    fn comment_edge(id: EntityId, from: EntityId, to: EntityId) -> Edge {
        Edge::CommentEdge(CommentEdge {
            id,
            from_node_id: from,
            to_node_id: to,
            selected: false,
        })
    }

    #[test]
    fn test_transition_counts_ignore_other_edges() {
        let mut store = EdgeStore::new();
        store.load(&[
            transition(1, 1, 3),
            transition(2, 2, 3),
            comment_edge(3, 4, 3),
            transition(4, 3, 5),
        ]);

        assert_eq!(store.incoming_transition_count(3), 2);
        assert_eq!(store.outgoing_transition_count(3), 1);
        assert_eq!(store.incoming_transition_count(1), 0);
    }

    #[test]
    fn test_remove_touching() {
        let mut store = EdgeStore::new();
        store.load(&[transition(1, 1, 2), transition(2, 2, 3), transition(3, 3, 4)]);

        let removed = store.remove_touching(&HashSet::from([2]));
        assert_eq!(removed.len(), 2);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(3).unwrap().from_node_id(), 3);
        assert!(store.get(1).is_err());
    }

    #[test]
    fn test_selection_and_update_where() {
        let mut store = EdgeStore::new();
        store.load(&[transition(1, 1, 2), comment_edge(2, 3, 1)]);

        store.change_select(SelectMode::Select, &[2]);
        assert_eq!(store.selected_ids(), vec![2]);

        let updated = store.update_where(|edge| edge.is_transition(), |edge| edge.set_selected(true));
        assert_eq!(updated, 1);
        assert_eq!(store.selected_ids(), vec![1, 2]);
    }

    #[test]
    fn test_edges_between() {
        let mut store = EdgeStore::new();
        store.load(&[transition(1, 1, 2), transition(2, 2, 1)]);
        assert_eq!(store.edges_between(1, 2).len(), 1);
        assert!(store.edges_between(1, 3).is_empty());
    }

    #[test]
    fn test_update_where_follows_changed_ids() {
        let mut store = EdgeStore::new();
        store.load(&[transition(1, 1, 2), comment_edge(2, 3, 1)]);
        store.update_where(
            |edge| edge.is_transition(),
            |edge| {
                if let Edge::TransitionEdge(transition) = edge {
                    transition.id = 8;
                }
            },
        );
        assert!(store.get(1).is_err());
        assert_eq!(store.get(8).unwrap().from_node_id(), 1);
        assert_eq!(store.get(2).unwrap().from_node_id(), 3);
    }
}
