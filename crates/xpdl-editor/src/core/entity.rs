//! Entity shapes of an XPDL project
//!
//! These are the records the editor loads, mutates, and hands back for
//! serialization. Node and edge variants are sum types discriminated by a
//! `type` field on the wire, so a JSON snapshot maps 1:1 onto these structs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::types::{ActivityType, EntityId, JoinType, Rect, SplitType};

/// An entity with a local integer id and, for some kinds, an external id
pub trait Identified {
    /// Local integer id, unique within the owning list
    fn id(&self) -> EntityId;

    /// Externally visible identifier, if this entity carries one
    fn xpdl_id(&self) -> Option<&str> {
        None
    }
}

/// Top-level container of processes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub created: DateTime<Utc>,
    pub detail: ProjectDetail,
    pub processes: Vec<Process>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetail {
    pub xpdl_id: String,
    pub name: String,
}

/// A single workflow process and its diagram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Process {
    pub id: EntityId,
    pub created: DateTime<Utc>,
    pub detail: ProcessDetail,
    pub actors: Vec<Actor>,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Identified for Process {
    fn id(&self) -> EntityId {
        self.id
    }

    fn xpdl_id(&self) -> Option<&str> {
        Some(&self.detail.xpdl_id)
    }
}

/// Form-editable properties of a process
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessDetail {
    pub xpdl_id: String,
    pub name: String,
    /// Free-text date, e.g. `2009/1/2`
    pub valid_from: String,
    pub valid_to: String,
    pub environments: Vec<Environment>,
    pub applications: Vec<Application>,
}

/// Extended key/value attribute of a process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    pub id: EntityId,
    pub name: String,
    pub value: String,
}

impl Identified for Environment {
    fn id(&self) -> EntityId {
        self.id
    }
}

/// Application an automatic activity can invoke
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: EntityId,
    pub xpdl_id: String,
    pub name: String,
    pub extended_name: String,
    pub extended_value: String,
}

impl Identified for Application {
    fn id(&self) -> EntityId {
        self.id
    }

    fn xpdl_id(&self) -> Option<&str> {
        Some(&self.xpdl_id)
    }
}

/// Participant performing activities
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub id: EntityId,
    pub xpdl_id: String,
    pub name: String,
}

impl Identified for Actor {
    fn id(&self) -> EntityId {
        self.id
    }

    fn xpdl_id(&self) -> Option<&str> {
        Some(&self.xpdl_id)
    }
}

/// Per-activity OGNL bound to one process application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityApplication {
    pub id: EntityId,
    pub ognl: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityNode {
    pub id: EntityId,
    pub xpdl_id: String,
    pub activity_type: ActivityType,
    pub name: String,
    pub actor_id: EntityId,
    pub applications: Vec<ActivityApplication>,
    /// Timer expression; empty unless `activity_type` is a timer type
    pub ognl: String,
    pub join_type: JoinType,
    pub split_type: SplitType,
    #[serde(flatten)]
    pub rect: Rect,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentNode {
    pub id: EntityId,
    pub comment: String,
    #[serde(flatten)]
    pub rect: Rect,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartNode {
    pub id: EntityId,
    #[serde(flatten)]
    pub rect: Rect,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndNode {
    pub id: EntityId,
    #[serde(flatten)]
    pub rect: Rect,
    pub selected: bool,
}

/// A diagram node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Node {
    ActivityNode(ActivityNode),
    CommentNode(CommentNode),
    StartNode(StartNode),
    EndNode(EndNode),
}

impl Node {
    pub fn rect(&self) -> &Rect {
        match self {
            Node::ActivityNode(n) => &n.rect,
            Node::CommentNode(n) => &n.rect,
            Node::StartNode(n) => &n.rect,
            Node::EndNode(n) => &n.rect,
        }
    }

    pub fn rect_mut(&mut self) -> &mut Rect {
        match self {
            Node::ActivityNode(n) => &mut n.rect,
            Node::CommentNode(n) => &mut n.rect,
            Node::StartNode(n) => &mut n.rect,
            Node::EndNode(n) => &mut n.rect,
        }
    }

    pub fn is_selected(&self) -> bool {
        match self {
            Node::ActivityNode(n) => n.selected,
            Node::CommentNode(n) => n.selected,
            Node::StartNode(n) => n.selected,
            Node::EndNode(n) => n.selected,
        }
    }

    pub fn set_selected(&mut self, selected: bool) {
        match self {
            Node::ActivityNode(n) => n.selected = selected,
            Node::CommentNode(n) => n.selected = selected,
            Node::StartNode(n) => n.selected = selected,
            Node::EndNode(n) => n.selected = selected,
        }
    }

    /// Wire name of the variant
    pub fn kind(&self) -> &'static str {
        match self {
            Node::ActivityNode(_) => "activityNode",
            Node::CommentNode(_) => "commentNode",
            Node::StartNode(_) => "startNode",
            Node::EndNode(_) => "endNode",
        }
    }

    pub fn as_activity(&self) -> Option<&ActivityNode> {
        match self {
            Node::ActivityNode(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_activity_mut(&mut self) -> Option<&mut ActivityNode> {
        match self {
            Node::ActivityNode(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_comment(&self) -> Option<&CommentNode> {
        match self {
            Node::CommentNode(n) => Some(n),
            _ => None,
        }
    }

    pub fn is_activity(&self) -> bool {
        matches!(self, Node::ActivityNode(_))
    }
}

impl Identified for Node {
    fn id(&self) -> EntityId {
        match self {
            Node::ActivityNode(n) => n.id,
            Node::CommentNode(n) => n.id,
            Node::StartNode(n) => n.id,
            Node::EndNode(n) => n.id,
        }
    }

    fn xpdl_id(&self) -> Option<&str> {
        self.as_activity().map(|n| n.xpdl_id.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionEdge {
    pub id: EntityId,
    pub xpdl_id: String,
    pub from_node_id: EntityId,
    pub to_node_id: EntityId,
    pub selected: bool,
}

/// Connector from a comment to the node it annotates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentEdge {
    pub id: EntityId,
    pub from_node_id: EntityId,
    pub to_node_id: EntityId,
    pub selected: bool,
}

/// Connector from the start marker to the first activity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartEdge {
    pub id: EntityId,
    pub from_node_id: EntityId,
    pub to_node_id: EntityId,
    pub selected: bool,
}

/// Connector from a final activity to the end marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndEdge {
    pub id: EntityId,
    pub from_node_id: EntityId,
    pub to_node_id: EntityId,
    pub selected: bool,
}

/// A diagram edge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Edge {
    TransitionEdge(TransitionEdge),
    CommentEdge(CommentEdge),
    StartEdge(StartEdge),
    EndEdge(EndEdge),
}

impl Edge {
    pub fn from_node_id(&self) -> EntityId {
        match self {
            Edge::TransitionEdge(e) => e.from_node_id,
            Edge::CommentEdge(e) => e.from_node_id,
            Edge::StartEdge(e) => e.from_node_id,
            Edge::EndEdge(e) => e.from_node_id,
        }
    }

    pub fn to_node_id(&self) -> EntityId {
        match self {
            Edge::TransitionEdge(e) => e.to_node_id,
            Edge::CommentEdge(e) => e.to_node_id,
            Edge::StartEdge(e) => e.to_node_id,
            Edge::EndEdge(e) => e.to_node_id,
        }
    }

    pub fn is_selected(&self) -> bool {
        match self {
            Edge::TransitionEdge(e) => e.selected,
            Edge::CommentEdge(e) => e.selected,
            Edge::StartEdge(e) => e.selected,
            Edge::EndEdge(e) => e.selected,
        }
    }

    pub fn set_selected(&mut self, selected: bool) {
        match self {
            Edge::TransitionEdge(e) => e.selected = selected,
            Edge::CommentEdge(e) => e.selected = selected,
            Edge::StartEdge(e) => e.selected = selected,
            Edge::EndEdge(e) => e.selected = selected,
        }
    }

    /// Wire name of the variant
    pub fn kind(&self) -> &'static str {
        match self {
            Edge::TransitionEdge(_) => "transitionEdge",
            Edge::CommentEdge(_) => "commentEdge",
            Edge::StartEdge(_) => "startEdge",
            Edge::EndEdge(_) => "endEdge",
        }
    }

    pub fn is_transition(&self) -> bool {
        matches!(self, Edge::TransitionEdge(_))
    }

    /// Returns true if either endpoint is `node_id`
    pub fn touches(&self, node_id: EntityId) -> bool {
        self.from_node_id() == node_id || self.to_node_id() == node_id
    }
}

impl Identified for Edge {
    fn id(&self) -> EntityId {
        match self {
            Edge::TransitionEdge(e) => e.id,
            Edge::CommentEdge(e) => e.id,
            Edge::StartEdge(e) => e.id,
            Edge::EndEdge(e) => e.id,
        }
    }

    fn xpdl_id(&self) -> Option<&str> {
        match self {
            Edge::TransitionEdge(e) => Some(&e.xpdl_id),
            _ => None,
        }
    }
}
