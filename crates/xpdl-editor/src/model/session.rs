//! Editor session
//!
//! The top-level handle a front end drives. Every command that changes the
//! model bumps [`EditorSession::revision`] once, so views can tell when to
//! redraw. Commands validate before mutating; [`EditorSession::transaction`]
//! groups several commands into one all-or-nothing step.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::core::{
    ActivityNode, ActivityType, Actor, Application, CommentNode, EditorConfig, EditorResult,
    EntityId, Environment, ProcessDetail, Project, ProjectDetail, SelectMode,
};
use crate::model::{Diagram, ProcessRegistry, ProjectAggregate};

#[derive(Debug, Clone, PartialEq)]
pub struct EditorSession {
    project: ProjectAggregate,
    config: EditorConfig,
    revision: u64,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorSession {
    /// A session over a fresh project created now
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            project: ProjectAggregate::fresh(Utc::now()),
            config,
            revision: 0,
        }
    }

    /// A session over an existing project snapshot
    pub fn open(project: &Project, config: EditorConfig) -> EditorResult<Self> {
        Ok(Self {
            project: ProjectAggregate::new(project)?,
            config,
            revision: 0,
        })
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Number of committed changes since the session was opened
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn project(&self) -> &ProjectAggregate {
        &self.project
    }

    pub fn registry(&self) -> &ProcessRegistry {
        self.project.registry()
    }

    /// Live diagram of the selected process
    pub fn diagram(&self) -> &Diagram {
        self.project.registry().diagram()
    }

    fn registry_mut(&mut self) -> &mut ProcessRegistry {
        self.project.registry_mut()
    }

    fn diagram_mut(&mut self) -> &mut Diagram {
        self.project.registry_mut().diagram_mut()
    }

    fn commit<T>(&mut self, result: EditorResult<T>) -> EditorResult<T> {
        if result.is_ok() {
            self.revision += 1;
        }
        result
    }

    fn bump(&mut self) {
        self.revision += 1;
    }

    /// Run several commands as one step
    ///
    /// `f` runs against a staged copy of the session. The copy replaces the
    /// session only when `f` returns `Ok`, and the revision then advances by
    /// exactly one.
    pub fn transaction<T, F>(&mut self, f: F) -> EditorResult<T>
    where
        F: FnOnce(&mut EditorSession) -> EditorResult<T>,
    {
        let mut staged = self.clone();
        let value = f(&mut staged)?;
        let revision = self.revision + 1;
        *self = staged;
        self.revision = revision;
        debug!(revision, "Transaction committed");
        Ok(value)
    }

    // Project

    pub fn load_project(&mut self, project: &Project) -> EditorResult<()> {
        let result = self.project.load_project(project);
        self.commit(result)
    }

    pub fn save_project(&mut self) -> Project {
        self.project.save_project()
    }

    pub fn init_all(&mut self, created: DateTime<Utc>) {
        self.project.init_all(created);
        self.bump();
    }

    pub fn update_project_detail(&mut self, detail: &ProjectDetail) {
        self.project.update_project_detail(detail);
        self.bump();
    }

    // Processes

    pub fn change_process(&mut self, id: EntityId) -> EditorResult<()> {
        let result = self.registry_mut().change_process(id);
        self.commit(result)
    }

    pub fn add_process(&mut self, created: DateTime<Utc>) -> EditorResult<EntityId> {
        let result = self.registry_mut().add_process(created);
        self.commit(result)
    }

    pub fn remove_process(&mut self, id: EntityId) -> EditorResult<bool> {
        let result = self.registry_mut().remove_process(id);
        self.commit(result)
    }

    pub fn update_process_detail(&mut self, id: EntityId, detail: &ProcessDetail) -> EditorResult<()> {
        let result = self.registry_mut().update_process_detail(id, detail);
        self.commit(result)
    }

    pub fn add_application(&mut self) -> EditorResult<Application> {
        let result = self.registry_mut().add_application();
        self.commit(result)
    }

    pub fn remove_application(&mut self, id: EntityId) -> EditorResult<()> {
        let result = self.registry_mut().remove_application(id);
        self.commit(result)
    }

    pub fn add_environment(&mut self) -> EditorResult<Environment> {
        let result = self.registry_mut().add_environment();
        self.commit(result)
    }

    pub fn remove_environment(&mut self, id: EntityId) -> EditorResult<()> {
        let result = self.registry_mut().remove_environment(id);
        self.commit(result)
    }

    // Actors

    pub fn add_actor(&mut self) -> EditorResult<Actor> {
        let result = self.diagram_mut().actors_mut().add_actor();
        self.commit(result)
    }

    pub fn select_actor(&mut self, id: EntityId) -> EditorResult<()> {
        let result = self.diagram_mut().actors_mut().select_actor(id);
        self.commit(result)
    }

    pub fn update_actor(&mut self, patch: &Actor) -> EditorResult<()> {
        let result = self.diagram_mut().actors_mut().update_actor(patch);
        self.commit(result)
    }

    pub fn remove_actor(&mut self, id: EntityId) -> EditorResult<()> {
        let result = self.diagram_mut().remove_actor(id);
        self.commit(result)
    }

    // Nodes

    /// Create an activity for the picked actor centered on `(cx, cy)`
    pub fn add_activity(&mut self, activity_type: ActivityType, cx: f64, cy: f64) -> EditorResult<ActivityNode> {
        let actor_id = self
            .diagram()
            .actors()
            .selected_actor()
            .map(|actor| actor.id)
            .unwrap_or_default();
        let config = self.config;
        let result = self
            .diagram_mut()
            .add_activity(activity_type, actor_id, cx, cy, &config);
        self.commit(result)
    }

    pub fn add_comment_node(&mut self, x: f64, y: f64) -> EditorResult<EntityId> {
        let result = self.diagram_mut().nodes_mut().add_comment_node(x, y);
        self.commit(result)
    }

    pub fn add_start_node(&mut self, x: f64, y: f64) -> EditorResult<EntityId> {
        let config = self.config;
        let result = self.diagram_mut().nodes_mut().add_start_node(x, y, &config);
        self.commit(result)
    }

    pub fn add_end_node(&mut self, x: f64, y: f64) -> EditorResult<EntityId> {
        let config = self.config;
        let result = self.diagram_mut().nodes_mut().add_end_node(x, y, &config);
        self.commit(result)
    }

    pub fn update_activity(&mut self, patch: &ActivityNode) -> EditorResult<()> {
        let result = self.registry_mut().update_activity(patch);
        self.commit(result)
    }

    pub fn update_comment(&mut self, patch: &CommentNode) -> EditorResult<()> {
        let result = self.diagram_mut().nodes_mut().update_comment(patch);
        self.commit(result)
    }

    pub fn resize_comment(&mut self, id: EntityId, width: f64, height: f64) -> EditorResult<()> {
        let result = self.diagram_mut().nodes_mut().resize_comment(id, width, height);
        self.commit(result)
    }

    pub fn resize_activity_height(&mut self, id: EntityId, height: f64) -> EditorResult<bool> {
        let config = self.config;
        let result = self
            .diagram_mut()
            .nodes_mut()
            .resize_activity_height(id, height, &config);
        self.commit(result)
    }

    pub fn resize_left(&mut self, dx: f64) -> usize {
        let config = self.config;
        let resized = self.diagram_mut().nodes_mut().resize_left(dx, &config);
        self.bump();
        resized
    }

    pub fn resize_right(&mut self, dx: f64) -> usize {
        let config = self.config;
        let resized = self.diagram_mut().nodes_mut().resize_right(dx, &config);
        self.bump();
        resized
    }

    pub fn layer_top(&mut self, id: EntityId) -> EditorResult<()> {
        let result = self.diagram_mut().nodes_mut().layer_top(id);
        self.commit(result)
    }

    pub fn move_selected_nodes(&mut self, dx: f64, dy: f64) -> (f64, f64) {
        let moved = self.diagram_mut().move_selected_nodes(dx, dy);
        self.bump();
        moved
    }

    // Edges

    /// Connect two activities; a dropped self loop or duplicate is not a change
    pub fn add_transition(&mut self, from: EntityId, to: EntityId) -> EditorResult<Option<EntityId>> {
        let result = self.diagram_mut().add_transition(from, to);
        if let Ok(Some(_)) = result {
            self.bump();
        }
        result
    }

    pub fn add_comment_edge(&mut self, comment_id: EntityId, to: EntityId) -> EditorResult<EntityId> {
        let result = self.diagram_mut().add_comment_edge(comment_id, to);
        self.commit(result)
    }

    pub fn add_start_edge(&mut self, start_id: EntityId, activity_id: EntityId) -> EditorResult<EntityId> {
        let result = self.diagram_mut().add_start_edge(start_id, activity_id);
        self.commit(result)
    }

    pub fn add_end_edge(&mut self, activity_id: EntityId, end_id: EntityId) -> EditorResult<EntityId> {
        let result = self.diagram_mut().add_end_edge(activity_id, end_id);
        self.commit(result)
    }

    pub fn remove_edges(&mut self, ids: &[EntityId]) -> usize {
        let removed = self.diagram_mut().remove_edges(ids);
        self.bump();
        removed
    }

    pub fn remove_nodes(&mut self, ids: &[EntityId]) -> usize {
        let removed = self.diagram_mut().remove_nodes(ids);
        self.bump();
        removed
    }

    pub fn remove_selected(&mut self) -> (usize, usize) {
        let removed = self.diagram_mut().remove_selected();
        self.bump();
        removed
    }

    // Selection

    pub fn change_select_nodes(&mut self, mode: SelectMode, ids: &[EntityId]) {
        self.diagram_mut().change_select_nodes(mode, ids);
        self.bump();
    }

    pub fn change_select_edges(&mut self, mode: SelectMode, ids: &[EntityId]) {
        self.diagram_mut().change_select_edges(mode, ids);
        self.bump();
    }

    pub fn select_all(&mut self) {
        self.diagram_mut().select_all();
        self.bump();
    }

    pub fn clear_selection(&mut self) {
        self.diagram_mut().clear_selection();
        self.bump();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EditorError, JoinType, Store};

    #[test]
    fn test_commands_bump_revision() {
        let mut session = EditorSession::new();
        assert_eq!(session.revision(), 0);
        session.add_activity(ActivityType::ManualActivity, 100.0, 100.0).unwrap();
        assert_eq!(session.revision(), 1);
        assert!(session.change_process(99).is_err());
        assert_eq!(session.revision(), 1);
    }

    #[test]
    fn test_transaction_commits_once() {
        let mut session = EditorSession::new();
        let (a, b) = session
            .transaction(|s| {
                let a = s.add_activity(ActivityType::ManualActivity, 100.0, 100.0)?.id;
                let b = s.add_activity(ActivityType::ManualActivity, 300.0, 100.0)?.id;
                s.add_transition(a, b)?;
                Ok((a, b))
            })
            .unwrap();
        assert_eq!(session.revision(), 1);
        assert_eq!(session.diagram().edges().len(), 1);
        assert_ne!(a, b);
    }

    #[test]
    fn test_transaction_rolls_back() {
        let mut session = EditorSession::new();
        let before = session.clone();
        let result: EditorResult<()> = session.transaction(|s| {
            s.add_activity(ActivityType::ManualActivity, 100.0, 100.0)?;
            s.remove_actor(1)?;
            Ok(())
        });
        assert_eq!(result.unwrap_err().kind(), crate::core::ErrorKind::ActorInUse);
        assert_eq!(session, before);
    }

    #[test]
    fn test_activity_uses_picked_actor() {
        let mut session = EditorSession::new();
        let actor = session.add_actor().unwrap();
        let activity = session.add_activity(ActivityType::AutoActivity, 0.0, 0.0).unwrap();
        assert_eq!(activity.actor_id, actor.id);
    }

    #[test]
    fn test_update_activity_normalizes() {
        let mut session = EditorSession::new();
        let a = session.add_activity(ActivityType::ManualActivity, 0.0, 0.0).unwrap();
        let b = session.add_activity(ActivityType::ManualActivity, 0.0, 0.0).unwrap();
        let c = session.add_activity(ActivityType::ManualActivity, 0.0, 0.0).unwrap();
        session.add_transition(a.id, c.id).unwrap();

        let mut patch = session.diagram().nodes().get_activity_node(c.id).unwrap().clone();
        patch.name = "Approve".to_string();
        patch.ognl = "dropped".to_string();
        patch.join_type = JoinType::AndJoin;
        patch.rect.x = 999.0;
        session.update_activity(&patch).unwrap();

        let live = session.diagram().nodes().get_activity_node(c.id).unwrap().clone();
        assert_eq!(live.name, "Approve");
        assert!(live.ognl.is_empty());
        assert_eq!(live.join_type, JoinType::OneJoin);
        assert_eq!(live.rect.x, 0.0);

        session.add_transition(b.id, c.id).unwrap();
        session.update_activity(&patch).unwrap();
        let live = session.diagram().nodes().get_activity_node(c.id).unwrap();
        assert_eq!(live.join_type, JoinType::AndJoin);
    }

    #[test]
    fn test_update_activity_rejects_duplicate_xpdl_id() {
        let mut session = EditorSession::new();
        let a = session.add_activity(ActivityType::ManualActivity, 0.0, 0.0).unwrap();
        let mut b = session.add_activity(ActivityType::ManualActivity, 0.0, 0.0).unwrap();
        b.xpdl_id = a.xpdl_id.clone();
        b.name = "changed".to_string();
        let err = session.update_activity(&b).unwrap_err();
        assert_eq!(err, EditorError::duplicate("activities", a.xpdl_id));
        assert!(session.diagram().nodes().get_activity_node(b.id).unwrap().name.is_empty());
    }
}
