//! XPDL Editor - editing engine for XPDL business-process diagrams
//!
//! A library holding the data model and consistency rules behind a
//! process-diagram editor: activities, transitions, actors, comments, and
//! start/end markers, with join/split flags, geometry, and identifiers kept
//! consistent as the user edits. Rendering and dialogs belong to the front
//! end; this crate only owns the state.
//!
//! # Quick Start
//!
//! ```rust
//! use xpdl_editor::prelude::*;
//!
//! let mut session = EditorSession::new();
//! let review = session.add_activity(ActivityType::ManualActivity, 100.0, 100.0).unwrap();
//! let approve = session.add_activity(ActivityType::ManualActivity, 300.0, 100.0).unwrap();
//! session.add_transition(review.id, approve.id).unwrap();
//!
//! let node = session.diagram().nodes().get_activity_node(approve.id).unwrap();
//! assert_eq!(node.join_type, JoinType::OneJoin);
//! ```
//!
//! # Snapshots
//!
//! Projects travel as JSON with camelCase fields and a `type` tag on every
//! node and edge:
//!
//! ```rust
//! use xpdl_editor::{project_from_json, project_to_json};
//! use xpdl_editor::core::factory::create_project;
//!
//! let project = create_project(chrono::Utc::now());
//! let json = project_to_json(&project).unwrap();
//! assert_eq!(project_from_json(&json).unwrap(), project);
//! ```

use anyhow::Context;

pub mod core;
pub mod model;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        ActivityNode, ActivityType, Actor, Application, Edge, EditorConfig, EditorError, EditorResult,
        EntityId, ErrorKind, Identified, JoinType, Node, Process, Project, SelectMode, SplitType,
        Store,
    };
    pub use crate::model::{Diagram, EditorSession, ProcessRegistry, ProjectAggregate};
}

/// Parse a project snapshot from JSON
pub fn project_from_json(input: &str) -> anyhow::Result<Project> {
    serde_json::from_str(input).context("Failed to parse project snapshot")
}

/// Serialize a project snapshot as pretty-printed JSON
pub fn project_to_json(project: &Project) -> anyhow::Result<String> {
    serde_json::to_string_pretty(project).context("Failed to serialize project snapshot")
}

/// Open an editor session over a JSON snapshot
pub fn open_session(input: &str, config: EditorConfig) -> anyhow::Result<model::EditorSession> {
    let project = project_from_json(input)?;
    model::EditorSession::open(&project, config).context("Failed to open project")
}
