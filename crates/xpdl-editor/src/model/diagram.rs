//! Live diagram of the selected process
//!
//! Bundles the actor directory and the node and edge stores so operations
//! that cross them (edge endpoint checks, cascading removal, join/split
//! recomputation) have one place to live.

use std::collections::HashSet;
use tracing::debug;

use crate::core::{EntityId, Identified, Process, SelectMode, Store};
use crate::model::{ActorDirectory, EdgeStore, NodeStore};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagram {
    actors: ActorDirectory,
    nodes: NodeStore,
    edges: EdgeStore,
}

impl Diagram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the live state with a process record
    pub fn load(&mut self, process: &Process) {
        self.actors.load(&process.actors);
        self.nodes.load(&process.nodes);
        self.edges.load(&process.edges);
    }

    /// Write the live state back into a process record
    pub fn save_into(&self, process: &mut Process) {
        process.actors = self.actors.save();
        process.nodes = self.nodes.save();
        process.edges = self.edges.save();
    }

    pub fn actors(&self) -> &ActorDirectory {
        &self.actors
    }

    pub fn actors_mut(&mut self) -> &mut ActorDirectory {
        &mut self.actors
    }

    pub fn nodes(&self) -> &NodeStore {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut NodeStore {
        &mut self.nodes
    }

    pub fn edges(&self) -> &EdgeStore {
        &self.edges
    }

    pub(crate) fn edges_mut(&mut self) -> &mut EdgeStore {
        &mut self.edges
    }

    /// Remove an actor unless an activity still refers to it
    pub fn remove_actor(&mut self, id: EntityId) -> crate::core::EditorResult<()> {
        self.actors.remove_actor(id, &self.nodes).map(|_| ())
    }

    pub fn change_select_nodes(&mut self, mode: SelectMode, ids: &[EntityId]) {
        self.nodes.change_select(mode, ids);
    }

    pub fn change_select_edges(&mut self, mode: SelectMode, ids: &[EntityId]) {
        self.edges.change_select(mode, ids);
    }

    /// Select every node and edge
    pub fn select_all(&mut self) {
        self.nodes.select_all();
        self.edges.update_where(|_| true, |edge| edge.set_selected(true));
    }

    /// Deselect every node and edge
    pub fn clear_selection(&mut self) {
        self.nodes.change_select(SelectMode::ClearAll, &[]);
        self.edges.change_select(SelectMode::ClearAll, &[]);
    }

    /// Drag every selected node, returning the delta actually applied
    pub fn move_selected_nodes(&mut self, dx: f64, dy: f64) -> (f64, f64) {
        self.nodes.move_selected(dx, dy)
    }

    /// Remove edges by id and re-derive join/split flags
    pub fn remove_edges(&mut self, ids: &[EntityId]) -> usize {
        let targets: HashSet<EntityId> = ids.iter().copied().collect();
        let removed = self.edges.remove_where(|edge| targets.contains(&edge.id()));
        self.nodes.update_all_join_split_type(self.edges.as_slice());
        removed.len()
    }

    /// Remove nodes by id together with every edge touching them
    pub fn remove_nodes(&mut self, ids: &[EntityId]) -> usize {
        let targets: HashSet<EntityId> = ids.iter().copied().collect();
        let removed = self.nodes.remove(&targets);
        self.edges.remove_touching(&targets);
        self.nodes.update_all_join_split_type(self.edges.as_slice());
        removed.len()
    }

    /// Remove the selected edges and nodes
    ///
    /// Removing a node also removes every edge touching it. Returns the
    /// number of nodes and edges removed.
    pub fn remove_selected(&mut self) -> (usize, usize) {
        let node_ids: HashSet<EntityId> = self.nodes.selected_ids().into_iter().collect();
        let removed_nodes = self.nodes.remove(&node_ids).len();
        let removed_edges = self
            .edges
            .remove_where(|edge| {
                edge.is_selected()
                    || node_ids.contains(&edge.from_node_id())
                    || node_ids.contains(&edge.to_node_id())
            })
            .len();
        self.nodes.update_all_join_split_type(self.edges.as_slice());
        debug!(removed_nodes, removed_edges, "Selection removed");
        (removed_nodes, removed_edges)
    }
}
