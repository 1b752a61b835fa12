//! Entity factory
//!
//! Pure constructors for every entity kind. Each takes the sibling list the
//! new entity will join, so identifiers are unique at birth, and fills every
//! other field with its documented default. Constructors fail only when the
//! sibling list has used up the identifier range.

use chrono::{DateTime, Utc};

use crate::core::config::EditorConfig;
use crate::core::entity::{
    ActivityNode, Actor, Application, CommentEdge, CommentNode, EndEdge, EndNode, Environment,
    Node, Edge, Process, ProcessDetail, Project, ProjectDetail, StartEdge, StartNode,
    TransitionEdge,
};
use crate::core::error::EditorResult;
use crate::core::ids::{format_xpdl_id, next_id, next_id_with_xpdl};
use crate::core::types::{ActivityType, EntityId, JoinType, Rect, SplitType};

pub const PROJECT_XPDL_ID: &str = "project";
pub const PROJECT_NAME: &str = "プロジェクト";
pub const PROCESS_PREFIX: &str = "process";
pub const ACTOR_PREFIX: &str = "actor";
pub const APPLICATION_PREFIX: &str = "application";
pub const ACTIVITY_PREFIX: &str = "activity";
pub const TRANSITION_PREFIX: &str = "transition";
pub const DEFAULT_COMMENT: &str = "コメント";

/// A project holding one fresh process
pub fn create_project(created: DateTime<Utc>) -> Project {
    Project {
        created,
        detail: ProjectDetail {
            xpdl_id: PROJECT_XPDL_ID.to_string(),
            name: PROJECT_NAME.to_string(),
        },
        processes: vec![default_process(1, format_xpdl_id(PROCESS_PREFIX, 1), created)],
    }
}

fn default_process(id: EntityId, xpdl_id: String, created: DateTime<Utc>) -> Process {
    Process {
        id,
        created,
        detail: ProcessDetail {
            xpdl_id,
            name: format!("プロセス{id}"),
            ..ProcessDetail::default()
        },
        actors: vec![default_actor(1, format_xpdl_id(ACTOR_PREFIX, 1))],
        nodes: Vec::new(),
        edges: Vec::new(),
    }
}

fn default_actor(id: EntityId, xpdl_id: String) -> Actor {
    Actor {
        id,
        xpdl_id,
        name: format!("アクター{id}"),
    }
}

/// A process with one default actor and an empty diagram
pub fn create_process(process_list: &[Process], created: DateTime<Utc>) -> EditorResult<Process> {
    let (id, xpdl_id) = next_id_with_xpdl(process_list, PROCESS_PREFIX)?;
    Ok(default_process(id, xpdl_id, created))
}

pub fn create_environment(environment_list: &[Environment]) -> EditorResult<Environment> {
    let id = next_id(environment_list)?;
    Ok(Environment {
        id,
        name: format!("name{id}"),
        value: format!("value{id}"),
    })
}

pub fn create_application(application_list: &[Application]) -> EditorResult<Application> {
    let (id, xpdl_id) = next_id_with_xpdl(application_list, APPLICATION_PREFIX)?;
    Ok(Application {
        id,
        xpdl_id,
        name: format!("name{id}"),
        extended_name: String::new(),
        extended_value: String::new(),
    })
}

pub fn create_actor(actor_list: &[Actor]) -> EditorResult<Actor> {
    let (id, xpdl_id) = next_id_with_xpdl(actor_list, ACTOR_PREFIX)?;
    Ok(default_actor(id, xpdl_id))
}

/// An unplaced activity at the minimum width with zero height
///
/// The caller positions it and the renderer fits its height later.
pub fn create_activity_node(
    node_list: &[Node],
    actor_id: EntityId,
    activity_type: ActivityType,
    config: &EditorConfig,
) -> EditorResult<ActivityNode> {
    let (id, xpdl_id) = next_id_with_xpdl(node_list, ACTIVITY_PREFIX)?;
    Ok(ActivityNode {
        id,
        xpdl_id,
        activity_type,
        name: String::new(),
        actor_id,
        applications: Vec::new(),
        ognl: String::new(),
        join_type: JoinType::NotJoin,
        split_type: SplitType::NotSplit,
        rect: Rect::new(0.0, 0.0, config.activity_min_width, 0.0),
        selected: false,
    })
}

pub fn create_transition_edge(
    edge_list: &[Edge],
    from_node_id: EntityId,
    to_node_id: EntityId,
) -> EditorResult<TransitionEdge> {
    let (id, xpdl_id) = next_id_with_xpdl(edge_list, TRANSITION_PREFIX)?;
    Ok(TransitionEdge {
        id,
        xpdl_id,
        from_node_id,
        to_node_id,
        selected: false,
    })
}

pub fn create_comment_node(node_list: &[Node], x: f64, y: f64) -> EditorResult<CommentNode> {
    Ok(CommentNode {
        id: next_id(node_list)?,
        comment: DEFAULT_COMMENT.to_string(),
        rect: Rect::new(x, y, 0.0, 0.0),
        selected: false,
    })
}

pub fn create_comment_edge(
    edge_list: &[Edge],
    from_node_id: EntityId,
    to_node_id: EntityId,
) -> EditorResult<CommentEdge> {
    Ok(CommentEdge {
        id: next_id(edge_list)?,
        from_node_id,
        to_node_id,
        selected: false,
    })
}

pub fn create_start_node(
    node_list: &[Node],
    x: f64,
    y: f64,
    config: &EditorConfig,
) -> EditorResult<StartNode> {
    Ok(StartNode {
        id: next_id(node_list)?,
        rect: Rect::new(x, y, config.icon_size, config.icon_size),
        selected: false,
    })
}

pub fn create_start_edge(
    edge_list: &[Edge],
    from_node_id: EntityId,
    to_node_id: EntityId,
) -> EditorResult<StartEdge> {
    Ok(StartEdge {
        id: next_id(edge_list)?,
        from_node_id,
        to_node_id,
        selected: false,
    })
}

pub fn create_end_node(
    node_list: &[Node],
    x: f64,
    y: f64,
    config: &EditorConfig,
) -> EditorResult<EndNode> {
    Ok(EndNode {
        id: next_id(node_list)?,
        rect: Rect::new(x, y, config.icon_size, config.icon_size),
        selected: false,
    })
}

pub fn create_end_edge(
    edge_list: &[Edge],
    from_node_id: EntityId,
    to_node_id: EntityId,
) -> EditorResult<EndEdge> {
    Ok(EndEdge {
        id: next_id(edge_list)?,
        from_node_id,
        to_node_id,
        selected: false,
    })
}
