//! Transitions between activities
//!
//! Adding a transition changes the in/out counts of its two endpoints, so
//! their join/split flags are recomputed in the same call.

use tracing::{debug, trace};

use crate::core::factory::create_transition_edge;
use crate::core::{Edge, EditorResult, EntityId, Node};
use crate::model::Diagram;

impl Diagram {
    /// Connect two activities
    ///
    /// Returns `Ok(None)` without creating anything for a self loop or when
    /// the same ordered pair is already connected.
    pub fn add_transition(&mut self, from: EntityId, to: EntityId) -> EditorResult<Option<EntityId>> {
        self.expect_kind(from, "transition", "activity", Node::is_activity)?;
        self.expect_kind(to, "transition", "activity", Node::is_activity)?;

        if from == to {
            trace!(node_id = from, "Self transition dropped");
            return Ok(None);
        }
        if self
            .edges()
            .edges_between(from, to)
            .iter()
            .any(|edge| edge.is_transition())
        {
            trace!(from, to, "Duplicate transition dropped");
            return Ok(None);
        }

        let edge = create_transition_edge(self.edges().as_slice(), from, to)?;
        let id = edge.id;
        self.edges_mut().insert(Edge::TransitionEdge(edge));

        let outgoing = self.edges().outgoing_transition_count(from);
        let incoming = self.edges().incoming_transition_count(to);
        self.nodes_mut().update_split_type(from, outgoing)?;
        self.nodes_mut().update_join_type(to, incoming)?;
        debug!(edge_id = id, from, to, "Transition added");
        Ok(Some(id))
    }

    /// Every transition in order
    pub fn transitions(&self) -> impl Iterator<Item = &Edge> {
        self.edges().as_slice().iter().filter(|edge| edge.is_transition())
    }
}
