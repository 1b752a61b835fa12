//! Join/split consistency
//!
//! An activity's `joinType` and `splitType` follow from how many transitions
//! enter and leave it. Zero and one are forced; with two or more the user may
//! choose between xor and and, and an explicit `and*` choice survives later
//! recomputation as long as the count stays at two or more.

use std::collections::HashMap;
use tracing::{debug, trace};

use crate::core::{
    Edge, EditorError, EditorResult, EntityId, JoinType, Node, Process, SplitType, Store,
};
use crate::model::NodeStore;

/// Join type implied by `count` incoming transitions
pub fn derive_join_type(count: usize, current: JoinType) -> JoinType {
    match count {
        0 => JoinType::NotJoin,
        1 => JoinType::OneJoin,
        _ if current == JoinType::AndJoin => JoinType::AndJoin,
        _ => JoinType::XorJoin,
    }
}

/// Split type implied by `count` outgoing transitions
pub fn derive_split_type(count: usize, current: SplitType) -> SplitType {
    match count {
        0 => SplitType::NotSplit,
        1 => SplitType::OneSplit,
        _ if current == SplitType::AndSplit => SplitType::AndSplit,
        _ => SplitType::XorSplit,
    }
}

/// Incoming and outgoing transition counts per node id
pub fn transition_counts(edges: &[Edge]) -> HashMap<EntityId, (usize, usize)> {
    let mut counts: HashMap<EntityId, (usize, usize)> = HashMap::new();
    for edge in edges.iter().filter(|edge| edge.is_transition()) {
        counts.entry(edge.to_node_id()).or_default().0 += 1;
        counts.entry(edge.from_node_id()).or_default().1 += 1;
    }
    counts
}

/// Re-derive join/split flags of a stored process from its transitions
///
/// Returns the number of activities whose flags changed.
pub fn normalize_process(process: &mut Process) -> usize {
    let mut nodes = NodeStore::new();
    nodes.load(&process.nodes);
    nodes.update_all_join_split_type(&process.edges);
    let normalized = nodes.save();
    let changed = process
        .nodes
        .iter()
        .zip(&normalized)
        .filter(|(before, after)| before != after)
        .count();
    process.nodes = normalized;
    changed
}

impl NodeStore {
    /// Recompute one activity's join type from its incoming count
    pub fn update_join_type(&mut self, id: EntityId, count: usize) -> EditorResult<JoinType> {
        let activity = self
            .get_mut(id)?
            .as_activity_mut()
            .ok_or_else(|| EditorError::not_found("activity", id))?;
        activity.join_type = derive_join_type(count, activity.join_type);
        trace!(node_id = id, count, join_type = %activity.join_type, "Join type updated");
        Ok(activity.join_type)
    }

    /// Recompute one activity's split type from its outgoing count
    pub fn update_split_type(&mut self, id: EntityId, count: usize) -> EditorResult<SplitType> {
        let activity = self
            .get_mut(id)?
            .as_activity_mut()
            .ok_or_else(|| EditorError::not_found("activity", id))?;
        activity.split_type = derive_split_type(count, activity.split_type);
        trace!(node_id = id, count, split_type = %activity.split_type, "Split type updated");
        Ok(activity.split_type)
    }

    /// Recompute join and split of every activity in one pass over `edges`
    pub fn update_all_join_split_type(&mut self, edges: &[Edge]) {
        let counts = transition_counts(edges);
        let updated = self.update_where(Node::is_activity, |node| {
            if let Some(activity) = node.as_activity_mut() {
                let (incoming, outgoing) = counts.get(&activity.id).copied().unwrap_or((0, 0));
                activity.join_type = derive_join_type(incoming, activity.join_type);
                activity.split_type = derive_split_type(outgoing, activity.split_type);
            }
        });
        debug!(activity_count = updated, "Join/split types recomputed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_forced_below_two() {
        assert_eq!(derive_join_type(0, JoinType::AndJoin), JoinType::NotJoin);
        assert_eq!(derive_join_type(1, JoinType::AndJoin), JoinType::OneJoin);
        assert_eq!(derive_join_type(1, JoinType::XorJoin), JoinType::OneJoin);
    }

    #[test]
    fn test_join_and_is_sticky() {
        assert_eq!(derive_join_type(2, JoinType::AndJoin), JoinType::AndJoin);
        assert_eq!(derive_join_type(5, JoinType::AndJoin), JoinType::AndJoin);
        assert_eq!(derive_join_type(2, JoinType::OneJoin), JoinType::XorJoin);
        assert_eq!(derive_join_type(2, JoinType::NotJoin), JoinType::XorJoin);
    }

    #[test]
    fn test_normalize_process_counts_changes() {
        use crate::core::factory::{create_activity_node, create_process, create_transition_edge};
        use crate::core::{ActivityType, EditorConfig};

        let config = EditorConfig::default();
        let mut process = create_process(&[], "2024-01-01T00:00:00Z".parse().unwrap()).unwrap();
        let first = create_activity_node(&[], 1, ActivityType::ManualActivity, &config).unwrap();
        process.nodes.push(Node::ActivityNode(first));
        let second =
            create_activity_node(&process.nodes, 1, ActivityType::ManualActivity, &config).unwrap();
        process.nodes.push(Node::ActivityNode(second));
        let mut third =
            create_activity_node(&process.nodes, 1, ActivityType::ManualActivity, &config).unwrap();
        third.join_type = JoinType::AndJoin;
        process.nodes.push(Node::ActivityNode(third));
        process
            .edges
            .push(Edge::TransitionEdge(create_transition_edge(&[], 1, 2).unwrap()));

        assert_eq!(normalize_process(&mut process), 3);
        let join_types: Vec<_> = process
            .nodes
            .iter()
            .filter_map(Node::as_activity)
            .map(|activity| activity.join_type)
            .collect();
        assert_eq!(
            join_types,
            vec![JoinType::NotJoin, JoinType::OneJoin, JoinType::NotJoin]
        );
        assert_eq!(normalize_process(&mut process), 0);
    }

    #[test]
    fn test_split_mirrors_join() {
        assert_eq!(derive_split_type(0, SplitType::XorSplit), SplitType::NotSplit);
        assert_eq!(derive_split_type(1, SplitType::NotSplit), SplitType::OneSplit);
        assert_eq!(derive_split_type(3, SplitType::AndSplit), SplitType::AndSplit);
        assert_eq!(derive_split_type(3, SplitType::OneSplit), SplitType::XorSplit);
    }
}
