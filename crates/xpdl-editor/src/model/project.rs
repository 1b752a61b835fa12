//! Project aggregate
//!
//! The project header plus the process registry. Loading a project cascades
//! into the registry; saving flushes the live process first.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::core::factory::create_project;
use crate::core::{EditorResult, Project, ProjectDetail};
use crate::model::ProcessRegistry;

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectAggregate {
    created: DateTime<Utc>,
    detail: ProjectDetail,
    registry: ProcessRegistry,
}

impl ProjectAggregate {
    /// Open a project snapshot
    pub fn new(project: &Project) -> EditorResult<Self> {
        Ok(Self {
            created: project.created,
            detail: project.detail.clone(),
            registry: ProcessRegistry::new(&project.processes)?,
        })
    }

    /// A fresh project with one default process
    pub fn fresh(created: DateTime<Utc>) -> Self {
        let project = create_project(created);
        Self {
            created,
            detail: project.detail,
            registry: ProcessRegistry::from_fresh(project.processes),
        }
    }

    /// Replace everything with a project snapshot
    ///
    /// Nothing changes when the snapshot has no processes.
    pub fn load_project(&mut self, project: &Project) -> EditorResult<()> {
        self.registry.load(&project.processes)?;
        self.created = project.created;
        self.detail = project.detail.clone();
        info!(
            xpdl_id = %self.detail.xpdl_id,
            process_count = project.processes.len(),
            "Project loaded"
        );
        Ok(())
    }

    /// Snapshot of the whole project including unsaved live edits
    pub fn save_project(&mut self) -> Project {
        Project {
            created: self.created,
            detail: self.detail.clone(),
            processes: self.registry.save(),
        }
    }

    /// Discard everything and start over with a fresh project
    pub fn init_all(&mut self, created: DateTime<Utc>) {
        *self = Self::fresh(created);
        info!("Project initialized");
    }

    pub fn update_project_detail(&mut self, detail: &ProjectDetail) {
        self.detail = detail.clone();
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    pub fn detail(&self) -> &ProjectDetail {
        &self.detail
    }

    pub fn registry(&self) -> &ProcessRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ProcessRegistry {
        &mut self.registry
    }
}
