//! Integrity audit
//!
//! Read-only checks over a process or project snapshot. The editor keeps
//! these properties while it runs; the audit is for snapshots that came from
//! elsewhere (files, other tools) and for tests.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::core::{Edge, EntityId, Identified, JoinType, Node, Process, Project, SplitType};

/// One broken property found in a snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// xpdlId of the process the problem is in, if any
    pub process: Option<String>,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.process {
            Some(process) => write!(f, "[{}] {}", process, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Check every process of a project plus process-level uniqueness
pub fn audit_project(project: &Project) -> Vec<Violation> {
    let mut violations = Vec::new();
    if project.processes.is_empty() {
        violations.push(Violation {
            process: None,
            message: "project has no processes".to_string(),
        });
    }
    for message in duplicates("process", &project.processes) {
        violations.push(Violation {
            process: None,
            message,
        });
    }
    for process in &project.processes {
        violations.extend(audit_process(process));
    }
    violations
}

/// Check one process
pub fn audit_process(process: &Process) -> Vec<Violation> {
    let mut messages = Vec::new();
    messages.extend(duplicates("actor", &process.actors));
    messages.extend(duplicates("application", &process.detail.applications));
    messages.extend(duplicates("node", &process.nodes));
    messages.extend(duplicates("edge", &process.edges));
    if process.actors.is_empty() {
        messages.push("process has no actors".to_string());
    }

    let actor_ids: HashSet<EntityId> = process.actors.iter().map(Identified::id).collect();
    let application_ids: HashSet<EntityId> =
        process.detail.applications.iter().map(Identified::id).collect();
    let nodes: HashMap<EntityId, &Node> = process.nodes.iter().map(|n| (n.id(), n)).collect();

    for node in &process.nodes {
        if !node.rect().is_non_negative() {
            messages.push(format!("{} {} has negative geometry", node.kind(), node.id()));
        }
        let Some(activity) = node.as_activity() else {
            continue;
        };
        if !actor_ids.contains(&activity.actor_id) {
            messages.push(format!(
                "activity {} refers to missing actor {}",
                activity.id, activity.actor_id
            ));
        }
        for app in &activity.applications {
            if !application_ids.contains(&app.id) {
                messages.push(format!(
                    "activity {} refers to missing application {}",
                    activity.id, app.id
                ));
            }
        }
    }

    let mut incoming: HashMap<EntityId, usize> = HashMap::new();
    let mut outgoing: HashMap<EntityId, usize> = HashMap::new();
    for edge in &process.edges {
        for endpoint in [edge.from_node_id(), edge.to_node_id()] {
            if !nodes.contains_key(&endpoint) {
                messages.push(format!(
                    "{} {} refers to missing node {}",
                    edge.kind(),
                    edge.id(),
                    endpoint
                ));
            }
        }
        if let Edge::TransitionEdge(transition) = edge {
            *incoming.entry(transition.to_node_id).or_default() += 1;
            *outgoing.entry(transition.from_node_id).or_default() += 1;
        }
    }

    for activity in process.nodes.iter().filter_map(Node::as_activity) {
        let joins = incoming.get(&activity.id).copied().unwrap_or(0);
        let splits = outgoing.get(&activity.id).copied().unwrap_or(0);
        let join_ok = match joins {
            0 => activity.join_type == JoinType::NotJoin,
            1 => activity.join_type == JoinType::OneJoin,
            _ => activity.join_type.is_branching(),
        };
        if !join_ok {
            messages.push(format!(
                "activity {} has joinType {} with {} incoming transitions",
                activity.id, activity.join_type, joins
            ));
        }
        let split_ok = match splits {
            0 => activity.split_type == SplitType::NotSplit,
            1 => activity.split_type == SplitType::OneSplit,
            _ => activity.split_type.is_branching(),
        };
        if !split_ok {
            messages.push(format!(
                "activity {} has splitType {} with {} outgoing transitions",
                activity.id, activity.split_type, splits
            ));
        }
    }

    messages
        .into_iter()
        .map(|message| Violation {
            process: Some(process.detail.xpdl_id.clone()),
            message,
        })
        .collect()
}

/// Repeated local ids and repeated external ids within one list
fn duplicates<T: Identified>(entity: &str, list: &[T]) -> Vec<String> {
    let mut messages = Vec::new();
    let mut ids = HashSet::new();
    let mut xpdl_ids = HashSet::new();
    for item in list {
        if !ids.insert(item.id()) {
            messages.push(format!("duplicate {entity} id {}", item.id()));
        }
        if let Some(xpdl_id) = item.xpdl_id() {
            if !xpdl_ids.insert(xpdl_id) {
                messages.push(format!("duplicate {entity} xpdlId `{xpdl_id}`"));
            }
        }
    }
    messages
}
