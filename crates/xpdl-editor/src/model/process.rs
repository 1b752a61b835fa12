//! Process registry
//!
//! Owns the process list and the live diagram of the selected process.
//! Exactly one process is live at a time. Its record in the list goes stale
//! while the user edits and is refreshed by [`ProcessRegistry::save`], which
//! every process switch runs first.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::{debug, info, trace};

use crate::core::factory::{create_application, create_environment, create_process};
use crate::core::{
    ActivityNode, Application, EditorError, EditorResult, EntityId, Environment, Node, Process,
    ProcessDetail,
};
use crate::model::Diagram;

#[derive(Debug, Clone, PartialEq)]
pub struct ProcessRegistry {
    processes: Vec<Process>,
    selected: usize,
    diagram: Diagram,
}

impl ProcessRegistry {
    /// Build a registry over `processes`, selecting the first
    pub fn new(processes: &[Process]) -> EditorResult<Self> {
        let mut registry = Self {
            processes: Vec::new(),
            selected: 0,
            diagram: Diagram::new(),
        };
        registry.load(processes)?;
        Ok(registry)
    }

    /// Build a registry over a list known to be non-empty
    pub(crate) fn from_fresh(processes: Vec<Process>) -> Self {
        let mut diagram = Diagram::new();
        if let Some(first) = processes.first() {
            diagram.load(first);
        }
        Self {
            processes,
            selected: 0,
            diagram,
        }
    }

    /// Install a process list and make its first process live
    pub fn load(&mut self, processes: &[Process]) -> EditorResult<()> {
        let first = processes.first().ok_or(EditorError::EmptyProject)?;
        self.diagram.load(first);
        self.processes = processes.to_vec();
        self.selected = 0;
        debug!(process_count = self.processes.len(), "Processes loaded");
        Ok(())
    }

    /// Flush the live diagram into its record and return a copy of the list
    pub fn save(&mut self) -> Vec<Process> {
        self.flush();
        self.processes.clone()
    }

    fn flush(&mut self) {
        let record = &mut self.processes[self.selected];
        self.diagram.save_into(record);
        trace!(process_id = record.id, "Live diagram flushed");
    }

    fn position(&self, id: EntityId) -> EditorResult<usize> {
        self.processes
            .iter()
            .position(|process| process.id == id)
            .ok_or_else(|| EditorError::not_found("process", id))
    }

    fn select_index(&mut self, index: usize) {
        self.selected = index;
        self.diagram.load(&self.processes[index]);
        info!(
            process_id = self.processes[index].id,
            xpdl_id = %self.processes[index].detail.xpdl_id,
            "Process selected"
        );
    }

    /// Process records in list order
    ///
    /// The selected record may lag behind the live diagram until the next
    /// [`save`](Self::save).
    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// Record of the live process
    pub fn selected_process(&self) -> &Process {
        &self.processes[self.selected]
    }

    pub fn selected_id(&self) -> EntityId {
        self.processes[self.selected].id
    }

    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    pub fn diagram_mut(&mut self) -> &mut Diagram {
        &mut self.diagram
    }

    /// Save the live process, then make `id` live
    pub fn change_process(&mut self, id: EntityId) -> EditorResult<()> {
        let index = self.position(id)?;
        self.flush();
        self.select_index(index);
        Ok(())
    }

    /// Append a default process and make it live
    pub fn add_process(&mut self, created: DateTime<Utc>) -> EditorResult<EntityId> {
        let process = create_process(&self.processes, created)?;
        let id = process.id;
        self.flush();
        info!(process_id = id, xpdl_id = %process.detail.xpdl_id, "Process added");
        self.processes.push(process);
        self.select_index(self.processes.len() - 1);
        Ok(id)
    }

    /// Replace a process detail after checking identifier uniqueness
    ///
    /// Applications dropped from the list must not be used by any activity
    /// of the process. On success the process becomes the live one. On
    /// failure nothing changes.
    pub fn update_process_detail(&mut self, id: EntityId, detail: &ProcessDetail) -> EditorResult<()> {
        let index = self.position(id)?;
        if self
            .processes
            .iter()
            .any(|process| process.id != id && process.detail.xpdl_id == detail.xpdl_id)
        {
            return Err(EditorError::duplicate("processes", detail.xpdl_id.clone()));
        }
        let mut seen = HashSet::new();
        if let Some(app) = detail
            .applications
            .iter()
            .find(|app| !seen.insert(app.xpdl_id.as_str()))
        {
            return Err(EditorError::DuplicateApplicationIdentifier {
                xpdl_id: app.xpdl_id.clone(),
            });
        }
        let kept: HashSet<EntityId> = detail.applications.iter().map(|app| app.id).collect();
        for app in &self.processes[index].detail.applications {
            if kept.contains(&app.id) {
                continue;
            }
            let referrers = self.application_referrers(index, app.id);
            if referrers > 0 {
                return Err(EditorError::in_use("application", app.id, referrers));
            }
        }

        self.processes[index].detail = detail.clone();
        trace!(process_id = id, "Process detail updated");
        if index != self.selected {
            self.change_process(id)?;
        }
        Ok(())
    }

    /// Remove a process, keeping at least one
    ///
    /// The process at position `min(removed index, old len - 2)` of the
    /// shortened list becomes live. Edits to a removed live process are
    /// discarded. Returns false when `id` is the only process.
    pub fn remove_process(&mut self, id: EntityId) -> EditorResult<bool> {
        let index = self.position(id)?;
        if self.processes.len() <= 1 {
            trace!(process_id = id, "Last process kept");
            return Ok(false);
        }

        let next = index.min(self.processes.len() - 2);
        if index != self.selected {
            self.flush();
        }
        self.processes.remove(index);
        info!(process_id = id, process_count = self.processes.len(), "Process removed");
        self.select_index(next);
        Ok(true)
    }

    /// Activities of the process at `index` that use application `id`
    ///
    /// The live diagram is consulted for the selected process since its
    /// record may be stale.
    fn application_referrers(&self, index: usize, id: EntityId) -> usize {
        let uses = |activity: &ActivityNode| activity.applications.iter().any(|app| app.id == id);
        if index == self.selected {
            self.diagram.nodes().activity_nodes().filter(|a| uses(*a)).count()
        } else {
            self.processes[index]
                .nodes
                .iter()
                .filter_map(Node::as_activity)
                .filter(|a| uses(*a))
                .count()
        }
    }

    fn selected_detail_mut(&mut self) -> &mut ProcessDetail {
        &mut self.processes[self.selected].detail
    }

    /// Applications of the live process
    pub fn applications(&self) -> &[Application] {
        &self.selected_process().detail.applications
    }

    /// Append a default application to the live process
    pub fn add_application(&mut self) -> EditorResult<Application> {
        let detail = self.selected_detail_mut();
        let app = create_application(&detail.applications)?;
        detail.applications.push(app.clone());
        trace!(application_id = app.id, "Application added");
        Ok(app)
    }

    /// Remove an application no activity refers to
    pub fn remove_application(&mut self, id: EntityId) -> EditorResult<()> {
        if !self.applications().iter().any(|app| app.id == id) {
            return Err(EditorError::not_found("application", id));
        }
        let referrers = self.application_referrers(self.selected, id);
        if referrers > 0 {
            return Err(EditorError::in_use("application", id, referrers));
        }
        self.selected_detail_mut().applications.retain(|app| app.id != id);
        trace!(application_id = id, "Application removed");
        Ok(())
    }

    /// Append a default environment to the live process
    pub fn add_environment(&mut self) -> EditorResult<Environment> {
        let detail = self.selected_detail_mut();
        let environment = create_environment(&detail.environments)?;
        detail.environments.push(environment.clone());
        Ok(environment)
    }

    pub fn remove_environment(&mut self, id: EntityId) -> EditorResult<()> {
        let environments = &mut self.selected_detail_mut().environments;
        let before = environments.len();
        environments.retain(|environment| environment.id != id);
        if environments.len() == before {
            return Err(EditorError::not_found("environment", id));
        }
        Ok(())
    }

    /// Commit an activity form against the live process's applications
    pub fn update_activity(&mut self, patch: &ActivityNode) -> EditorResult<()> {
        let applications = &self.processes[self.selected].detail.applications;
        self.diagram.update_activity(patch, applications)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ActivityApplication, ActivityType, EditorConfig, ErrorKind, Store};

    fn created() -> DateTime<Utc> {
        "2024-01-01T00:00:00Z".parse().unwrap()
    }

    fn registry() -> ProcessRegistry {
        ProcessRegistry::new(&[create_process(&[], created()).unwrap()]).unwrap()
    }

    #[test]
    fn test_empty_list_rejected() {
        assert_eq!(ProcessRegistry::new(&[]).unwrap_err(), EditorError::EmptyProject);
    }

    #[test]
    fn test_add_process_selects_new() {
        let mut registry = registry();
        let id = registry.add_process(created()).unwrap();
        assert_eq!(id, 2);
        assert_eq!(registry.selected_id(), 2);
        assert_eq!(registry.selected_process().detail.xpdl_id, "process-2");
    }

    #[test]
    fn test_change_process_flushes_live_edits() {
        let mut registry = registry();
        registry
            .diagram_mut()
            .add_activity(ActivityType::ManualActivity, 1, 0.0, 0.0, &EditorConfig::default())
            .unwrap();
        registry.add_process(created()).unwrap();
        assert!(registry.diagram().nodes().is_empty());
        assert_eq!(registry.processes()[0].nodes.len(), 1);

        registry.change_process(1).unwrap();
        assert_eq!(registry.diagram().nodes().len(), 1);
    }

    #[test]
    fn test_remove_live_process_discards_edits() {
        let mut registry = registry();
        registry.add_process(created()).unwrap();
        registry
            .diagram_mut()
            .add_activity(ActivityType::ManualActivity, 1, 0.0, 0.0, &EditorConfig::default())
            .unwrap();

        assert!(registry.remove_process(2).unwrap());
        assert_eq!(registry.selected_id(), 1);
        assert!(registry.diagram().nodes().is_empty());
        assert!(registry.save().iter().all(|process| process.nodes.is_empty()));
    }

    #[test]
    fn test_remove_last_process_is_noop() {
        let mut registry = registry();
        assert!(!registry.remove_process(1).unwrap());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_update_process_detail_validates() {
        let mut registry = registry();
        registry.add_process(created()).unwrap();

        let mut detail = registry.processes()[1].detail.clone();
        detail.xpdl_id = "process-1".to_string();
        let before = registry.processes().to_vec();
        let err = registry.update_process_detail(2, &detail).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateIdentifier);
        assert_eq!(registry.processes(), before.as_slice());

        detail.xpdl_id = "billing".to_string();
        let app = create_application(&[]).unwrap();
        detail.applications = vec![app.clone(), Application { id: 2, ..app }];
        let err = registry.update_process_detail(2, &detail).unwrap_err();
        assert_eq!(err.kind().message_key(), "duplicateApplicationId");
        assert_eq!(registry.processes(), before.as_slice());
    }

    #[test]
    fn test_update_process_detail_selects_target() {
        let mut registry = registry();
        registry.add_process(created()).unwrap();

        let mut detail = registry.processes()[0].detail.clone();
        detail.name = "Billing".to_string();
        registry.update_process_detail(1, &detail).unwrap();
        assert_eq!(registry.selected_id(), 1);
        assert_eq!(registry.selected_process().detail.name, "Billing");
    }

    #[test]
    fn test_application_guard() {
        let mut registry = registry();
        let app = registry.add_application().unwrap();
        let activity = registry
            .diagram_mut()
            .add_activity(ActivityType::AutoActivity, 1, 0.0, 0.0, &EditorConfig::default())
            .unwrap();

        let mut patch = activity.clone();
        patch.applications = vec![ActivityApplication {
            id: app.id,
            ognl: "invoice.send()".to_string(),
        }];
        registry.update_activity(&patch).unwrap();

        let err = registry.remove_application(app.id).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ApplicationInUse);
        assert_eq!(registry.applications().len(), 1);

        registry.update_activity(&activity).unwrap();
        registry.remove_application(app.id).unwrap();
        assert!(registry.applications().is_empty());
    }

    #[test]
    fn test_detail_update_cannot_drop_used_application() {
        let mut registry = registry();
        let app = registry.add_application().unwrap();
        let spare = registry.add_application().unwrap();
        let mut activity = registry
            .diagram_mut()
            .add_activity(ActivityType::AutoActivity, 1, 0.0, 0.0, &EditorConfig::default())
            .unwrap();
        activity.applications = vec![ActivityApplication {
            id: app.id,
            ognl: "invoice.send()".to_string(),
        }];
        registry.update_activity(&activity).unwrap();

        let before = registry.processes().to_vec();
        let mut detail = before[0].detail.clone();
        detail.applications.clear();
        let err = registry.update_process_detail(1, &detail).unwrap_err();
        assert_eq!(err, EditorError::in_use("application", app.id, 1));
        assert_eq!(registry.processes(), before.as_slice());

        detail.applications = vec![app.clone()];
        registry.update_process_detail(1, &detail).unwrap();
        assert_eq!(registry.applications(), &[app]);
        assert!(registry.applications().iter().all(|it| it.id != spare.id));
    }

    #[test]
    fn test_detail_update_checks_stored_activities_of_other_process() {
        let mut registry = registry();
        let app = registry.add_application().unwrap();
        let mut activity = registry
            .diagram_mut()
            .add_activity(ActivityType::AutoActivity, 1, 0.0, 0.0, &EditorConfig::default())
            .unwrap();
        activity.applications = vec![ActivityApplication {
            id: app.id,
            ognl: "invoice.send()".to_string(),
        }];
        registry.update_activity(&activity).unwrap();
        registry.add_process(created()).unwrap();

        let mut detail = registry.processes()[0].detail.clone();
        detail.applications.clear();
        let err = registry.update_process_detail(1, &detail).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ApplicationInUse);
        assert_eq!(registry.selected_id(), 2);
    }

    #[test]
    fn test_add_process_after_max_id_fails() {
        let mut process = create_process(&[], created()).unwrap();
        process.id = EntityId::MAX;
        let mut registry = ProcessRegistry::new(&[process]).unwrap();
        let before = registry.clone();

        let err = registry.add_process(created()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IdentifiersExhausted);
        assert_eq!(registry, before);
    }

    #[test]
    fn test_environments() {
        let mut registry = registry();
        let env = registry.add_environment().unwrap();
        assert_eq!(env.name, "name1");
        registry.remove_environment(env.id).unwrap();
        assert!(registry.remove_environment(env.id).is_err());
    }
}
