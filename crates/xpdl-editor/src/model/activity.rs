//! Activity operations
//!
//! Placement, resizing, and form commits for activity nodes. Geometry changes
//! that would break the minimum-size floor are dropped per node rather than
//! reported, so a drag can keep going after one activity hits the floor.

use std::collections::HashSet;
use tracing::trace;

use crate::core::factory::create_activity_node;
use crate::core::{
    ActivityNode, ActivityType, Application, EditorConfig, EditorError, EditorResult, EntityId,
    Identified, Node, Store,
};
use crate::model::{derive_join_type, derive_split_type, Diagram, NodeStore};

impl NodeStore {
    /// Create an activity centered on `(cx, cy)` and put it on top
    pub fn add_activity(
        &mut self,
        activity_type: ActivityType,
        actor_id: EntityId,
        cx: f64,
        cy: f64,
        config: &EditorConfig,
    ) -> EditorResult<ActivityNode> {
        let mut activity = create_activity_node(self.as_slice(), actor_id, activity_type, config)?;
        activity.rect.x = (cx - activity.rect.width / 2.0).max(0.0);
        activity.rect.y = (cy - activity.rect.height / 2.0).max(0.0);
        self.insert(Node::ActivityNode(activity.clone()));
        Ok(activity)
    }

    /// Get an activity by id
    ///
    /// Fails with `NotFound` when the id is absent or names another kind.
    pub fn get_activity_node(&self, id: EntityId) -> EditorResult<&ActivityNode> {
        self.get(id)?
            .as_activity()
            .ok_or_else(|| EditorError::not_found("activity", id))
    }

    /// Every activity in z-order
    pub fn activity_nodes(&self) -> impl Iterator<Item = &ActivityNode> {
        self.iter().filter_map(Node::as_activity)
    }

    /// Fit an activity's height while keeping its vertical center
    ///
    /// Returns false, leaving the node untouched, when `height` is below the
    /// configured minimum.
    pub fn resize_activity_height(
        &mut self,
        id: EntityId,
        height: f64,
        config: &EditorConfig,
    ) -> EditorResult<bool> {
        let activity = self
            .get_mut(id)?
            .as_activity_mut()
            .ok_or_else(|| EditorError::not_found("activity", id))?;
        if height < config.activity_min_height {
            trace!(node_id = id, height, "Height below minimum, resize dropped");
            return Ok(false);
        }

        let rect = &mut activity.rect;
        rect.y -= (height - rect.height) / 2.0;
        rect.height = height;
        trace!(node_id = id, y = rect.y, height, "Activity height fitted");
        Ok(true)
    }

    /// Drag the left edge of every selected activity by `dx`
    ///
    /// Returns how many activities were resized.
    pub fn resize_left(&mut self, dx: f64, config: &EditorConfig) -> usize {
        let min_width = config.activity_min_width;
        let mut resized = 0;
        self.update_where(
            |node| node.is_selected() && node.is_activity(),
            |node| {
                let id = node.id();
                let rect = node.rect_mut();
                if min_width <= rect.width - dx && rect.x + dx >= 0.0 {
                    rect.x += dx;
                    rect.width -= dx;
                    resized += 1;
                } else {
                    trace!(node_id = id, dx, "Left resize dropped");
                }
            },
        );
        resized
    }

    /// Drag the right edge of every selected activity by `dx`
    ///
    /// Returns how many activities were resized.
    pub fn resize_right(&mut self, dx: f64, config: &EditorConfig) -> usize {
        let min_width = config.activity_min_width;
        let mut resized = 0;
        self.update_where(
            |node| node.is_selected() && node.is_activity(),
            |node| {
                let id = node.id();
                let rect = node.rect_mut();
                if min_width <= rect.width + dx {
                    rect.width += dx;
                    resized += 1;
                } else {
                    trace!(node_id = id, dx, "Right resize dropped");
                }
            },
        );
        resized
    }

    /// Replace an activity wholesale with an already validated record
    pub(crate) fn replace_activity(&mut self, activity: ActivityNode) -> EditorResult<()> {
        let id = activity.id;
        let slot = self
            .get_mut(id)?
            .as_activity_mut()
            .ok_or_else(|| EditorError::not_found("activity", id))?;
        *slot = activity;
        trace!(node_id = id, "Activity replaced");
        Ok(())
    }
}

impl Diagram {
    /// Create an activity performed by `actor_id`, centered on `(cx, cy)`
    pub fn add_activity(
        &mut self,
        activity_type: ActivityType,
        actor_id: EntityId,
        cx: f64,
        cy: f64,
        config: &EditorConfig,
    ) -> EditorResult<ActivityNode> {
        if !self.actors().contains(actor_id) {
            return Err(EditorError::dangling("activity", "actor", actor_id));
        }
        self.nodes_mut()
            .add_activity(activity_type, actor_id, cx, cy, config)
    }

    /// Commit an activity edited in a form
    ///
    /// Validates everything before touching the store, so a failed commit
    /// leaves the diagram as it was. Fields the form does not own (geometry,
    /// selection, forced join/split values) are taken from the live node.
    pub fn update_activity(
        &mut self,
        patch: &ActivityNode,
        applications: &[Application],
    ) -> EditorResult<()> {
        let live = self.nodes().get_activity_node(patch.id)?;

        if self
            .nodes()
            .activity_nodes()
            .any(|it| it.id != patch.id && it.xpdl_id == patch.xpdl_id)
        {
            return Err(EditorError::duplicate("activities", patch.xpdl_id.clone()));
        }
        if !self.actors().contains(patch.actor_id) {
            return Err(EditorError::dangling("activity", "actor", patch.actor_id));
        }

        let kept_applications: Vec<_> = if patch.activity_type.uses_applications() {
            patch
                .applications
                .iter()
                .filter(|app| !app.ognl.is_empty())
                .cloned()
                .collect()
        } else {
            Vec::new()
        };
        let known: HashSet<EntityId> = applications.iter().map(Identified::id).collect();
        if let Some(missing) = kept_applications.iter().find(|app| !known.contains(&app.id)) {
            return Err(EditorError::dangling("activity", "application", missing.id));
        }

        let incoming = self.edges().incoming_transition_count(patch.id);
        let outgoing = self.edges().outgoing_transition_count(patch.id);
        let join_type = if incoming >= 2 && patch.join_type.is_branching() {
            patch.join_type
        } else {
            derive_join_type(incoming, live.join_type)
        };
        let split_type = if outgoing >= 2 && patch.split_type.is_branching() {
            patch.split_type
        } else {
            derive_split_type(outgoing, live.split_type)
        };

        let updated = ActivityNode {
            id: patch.id,
            xpdl_id: patch.xpdl_id.clone(),
            activity_type: patch.activity_type,
            name: patch.name.clone(),
            actor_id: patch.actor_id,
            applications: kept_applications,
            ognl: if patch.activity_type.is_timer() {
                patch.ognl.clone()
            } else {
                String::new()
            },
            join_type,
            split_type,
            rect: live.rect,
            selected: live.selected,
        };
        self.nodes_mut().replace_activity(updated)
    }
}
