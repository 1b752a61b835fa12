//! Comments and start/end markers
//!
//! Annotation nodes and the edges that attach them to the flow. These take
//! no part in join/split derivation.

use tracing::trace;

use crate::core::factory::{
    create_comment_edge, create_comment_node, create_end_edge, create_end_node, create_start_edge,
    create_start_node,
};
use crate::core::{
    CommentNode, Edge, EditorConfig, EditorError, EditorResult, EntityId, Node, Store,
};
use crate::model::{Diagram, NodeStore};

impl NodeStore {
    /// Place a comment at `(x, y)`; the renderer fits its size later
    pub fn add_comment_node(&mut self, x: f64, y: f64) -> EditorResult<EntityId> {
        let node = create_comment_node(self.as_slice(), x.max(0.0), y.max(0.0))?;
        let id = node.id;
        self.insert(Node::CommentNode(node));
        Ok(id)
    }

    /// Place a start marker at `(x, y)`
    pub fn add_start_node(
        &mut self,
        x: f64,
        y: f64,
        config: &EditorConfig,
    ) -> EditorResult<EntityId> {
        let node = create_start_node(self.as_slice(), x.max(0.0), y.max(0.0), config)?;
        let id = node.id;
        self.insert(Node::StartNode(node));
        Ok(id)
    }

    /// Place an end marker at `(x, y)`
    pub fn add_end_node(
        &mut self,
        x: f64,
        y: f64,
        config: &EditorConfig,
    ) -> EditorResult<EntityId> {
        let node = create_end_node(self.as_slice(), x.max(0.0), y.max(0.0), config)?;
        let id = node.id;
        self.insert(Node::EndNode(node));
        Ok(id)
    }

    /// Replace the text of a comment node
    pub fn update_comment(&mut self, patch: &CommentNode) -> EditorResult<()> {
        match self.get_mut(patch.id)? {
            Node::CommentNode(comment) => {
                comment.comment = patch.comment.clone();
                trace!(node_id = patch.id, "Comment updated");
                Ok(())
            }
            _ => Err(EditorError::not_found("comment", patch.id)),
        }
    }

    /// Size a comment to fit its rendered text
    pub fn resize_comment(&mut self, id: EntityId, width: f64, height: f64) -> EditorResult<()> {
        match self.get_mut(id)? {
            Node::CommentNode(comment) => {
                comment.rect.width = width.max(0.0);
                comment.rect.height = height.max(0.0);
                Ok(())
            }
            _ => Err(EditorError::not_found("comment", id)),
        }
    }
}

impl Diagram {
    /// Attach a comment to any node
    pub fn add_comment_edge(&mut self, comment_id: EntityId, to_node_id: EntityId) -> EditorResult<EntityId> {
        self.expect_kind(comment_id, "commentEdge", "commentNode", |node| {
            matches!(node, Node::CommentNode(_))
        })?;
        self.expect_kind(to_node_id, "commentEdge", "node", |_| true)?;

        let edge = create_comment_edge(self.edges().as_slice(), comment_id, to_node_id)?;
        let id = edge.id;
        self.edges_mut().insert(Edge::CommentEdge(edge));
        Ok(id)
    }

    /// Connect a start marker to the activity it starts
    pub fn add_start_edge(&mut self, start_id: EntityId, activity_id: EntityId) -> EditorResult<EntityId> {
        self.expect_kind(start_id, "startEdge", "startNode", |node| {
            matches!(node, Node::StartNode(_))
        })?;
        self.expect_kind(activity_id, "startEdge", "activity", Node::is_activity)?;

        let edge = create_start_edge(self.edges().as_slice(), start_id, activity_id)?;
        let id = edge.id;
        self.edges_mut().insert(Edge::StartEdge(edge));
        Ok(id)
    }

    /// Connect a final activity to an end marker
    pub fn add_end_edge(&mut self, activity_id: EntityId, end_id: EntityId) -> EditorResult<EntityId> {
        self.expect_kind(activity_id, "endEdge", "activity", Node::is_activity)?;
        self.expect_kind(end_id, "endEdge", "endNode", |node| {
            matches!(node, Node::EndNode(_))
        })?;

        let edge = create_end_edge(self.edges().as_slice(), activity_id, end_id)?;
        let id = edge.id;
        self.edges_mut().insert(Edge::EndEdge(edge));
        Ok(id)
    }

    /// Check that `id` names a node accepted by `accepts`
    pub(crate) fn expect_kind<P>(
        &self,
        id: EntityId,
        entity: &'static str,
        target: &'static str,
        accepts: P,
    ) -> EditorResult<()>
    where
        P: Fn(&Node) -> bool,
    {
        match self.nodes().get(id) {
            Ok(node) if accepts(node) => Ok(()),
            _ => {
                trace!(node_id = id, entity, target, "Edge endpoint rejected");
                Err(EditorError::dangling(entity, target, id))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ErrorKind;

    #[test]
    fn test_marker_nodes_are_icon_sized() {
        let config = EditorConfig::default();
        let mut store = NodeStore::new();
        let start = store.add_start_node(10.0, 20.0, &config).unwrap();
        let end = store.add_end_node(-5.0, 20.0, &config).unwrap();
        assert_eq!(store.get(start).unwrap().rect().width, config.icon_size);
        assert_eq!(store.get(end).unwrap().rect().x, 0.0);
        assert_ne!(start, end);
    }

    #[test]
    fn test_update_comment() {
        let mut store = NodeStore::new();
        let id = store.add_comment_node(0.0, 0.0).unwrap();
        let mut patch = store.get(id).unwrap().as_comment().unwrap().clone();
        patch.comment = "check invoice".to_string();
        store.update_comment(&patch).unwrap();
        assert_eq!(store.get(id).unwrap().as_comment().unwrap().comment, "check invoice");

        patch.id = 42;
        assert_eq!(store.update_comment(&patch).unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_update_comment_rejects_other_kinds() {
        let config = EditorConfig::default();
        let mut store = NodeStore::new();
        let start = store.add_start_node(0.0, 0.0, &config).unwrap();
        let comment = store.add_comment_node(0.0, 0.0).unwrap();
        let mut patch = store.get(comment).unwrap().as_comment().unwrap().clone();
        patch.id = start;
        assert!(store.update_comment(&patch).is_err());
    }
}
