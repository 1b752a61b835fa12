//! Core type definitions for the process diagram
//!
//! This module contains the small value types shared by every entity:
//! activity kinds, join/split classification, selection modes, and geometry.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Local integer identifier of a node, edge, actor, or process
pub type EntityId = u32;

/// Kind of work an activity node represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActivityType {
    /// Performed by a person through a work list
    #[default]
    ManualActivity,
    /// Executed by an application (carries per-application OGNL)
    AutoActivity,
    /// Manual work that may also fire on a timer expression
    ManualTimerActivity,
    /// Automatic work fired by a timer expression
    AutoTimerActivity,
    /// Hand work outside the system
    UserActivity,
}

impl ActivityType {
    /// Returns true if this activity carries a timer OGNL expression
    pub fn is_timer(&self) -> bool {
        matches!(
            self,
            ActivityType::ManualTimerActivity | ActivityType::AutoTimerActivity
        )
    }

    /// Returns true if this activity runs process applications
    pub fn uses_applications(&self) -> bool {
        matches!(self, ActivityType::AutoActivity)
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivityType::ManualActivity => write!(f, "manualActivity"),
            ActivityType::AutoActivity => write!(f, "autoActivity"),
            ActivityType::ManualTimerActivity => write!(f, "manualTimerActivity"),
            ActivityType::AutoTimerActivity => write!(f, "autoTimerActivity"),
            ActivityType::UserActivity => write!(f, "userActivity"),
        }
    }
}

/// How an activity waits on its incoming transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum JoinType {
    /// No incoming transition
    #[default]
    NotJoin,
    /// Exactly one incoming transition
    OneJoin,
    /// Any predecessor completing starts the activity
    XorJoin,
    /// All predecessors must complete
    AndJoin,
}

impl JoinType {
    /// Returns true for the two multi-predecessor variants
    pub fn is_branching(&self) -> bool {
        matches!(self, JoinType::XorJoin | JoinType::AndJoin)
    }
}

impl fmt::Display for JoinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinType::NotJoin => write!(f, "notJoin"),
            JoinType::OneJoin => write!(f, "oneJoin"),
            JoinType::XorJoin => write!(f, "xorJoin"),
            JoinType::AndJoin => write!(f, "andJoin"),
        }
    }
}

/// How an activity hands off to its outgoing transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SplitType {
    /// No outgoing transition
    #[default]
    NotSplit,
    /// Exactly one outgoing transition
    OneSplit,
    /// Exactly one successor whose condition holds is taken
    XorSplit,
    /// Every successor is taken
    AndSplit,
}

impl SplitType {
    /// Returns true for the two multi-successor variants
    pub fn is_branching(&self) -> bool {
        matches!(self, SplitType::XorSplit | SplitType::AndSplit)
    }
}

impl fmt::Display for SplitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplitType::NotSplit => write!(f, "notSplit"),
            SplitType::OneSplit => write!(f, "oneSplit"),
            SplitType::XorSplit => write!(f, "xorSplit"),
            SplitType::AndSplit => write!(f, "andSplit"),
        }
    }
}

/// How a selection gesture combines with the current selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectMode {
    /// Select exactly the given ids, deselecting everything else
    Select,
    /// Flip the selection of the given ids, leaving the rest alone
    Toggle,
    /// Deselect everything; the id set is ignored
    ClearAll,
}

impl SelectMode {
    /// Compute the new `selected` flag for an entity
    pub fn apply(&self, currently_selected: bool, targeted: bool) -> bool {
        match self {
            SelectMode::Select => targeted,
            SelectMode::Toggle => currently_selected != targeted,
            SelectMode::ClearAll => false,
        }
    }
}

impl fmt::Display for SelectMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectMode::Select => write!(f, "select"),
            SelectMode::Toggle => write!(f, "toggle"),
            SelectMode::ClearAll => write!(f, "clearAll"),
        }
    }
}

/// Axis-aligned bounds of a node in diagram coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a rectangle from its top-left corner and size
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Horizontal center
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Vertical center
    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Returns true if every coordinate and extent is non-negative
    pub fn is_non_negative(&self) -> bool {
        self.x >= 0.0 && self.y >= 0.0 && self.width >= 0.0 && self.height >= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_mode_apply() {
        assert!(SelectMode::Select.apply(false, true));
        assert!(!SelectMode::Select.apply(true, false));
        assert!(SelectMode::Toggle.apply(false, true));
        assert!(!SelectMode::Toggle.apply(true, true));
        assert!(SelectMode::Toggle.apply(true, false));
        assert!(!SelectMode::ClearAll.apply(true, true));
    }

    #[test]
    fn test_activity_type_flags() {
        assert!(ActivityType::AutoTimerActivity.is_timer());
        assert!(ActivityType::ManualTimerActivity.is_timer());
        assert!(!ActivityType::AutoActivity.is_timer());
        assert!(ActivityType::AutoActivity.uses_applications());
        assert!(!ActivityType::UserActivity.uses_applications());
    }

    #[test]
    fn test_display_matches_wire_names() {
        assert_eq!(JoinType::AndJoin.to_string(), "andJoin");
        assert_eq!(SplitType::XorSplit.to_string(), "xorSplit");
        assert_eq!(
            serde_json::to_string(&ActivityType::ManualTimerActivity).unwrap(),
            "\"manualTimerActivity\""
        );
    }

    #[test]
    fn test_rect_center() {
        let rect = Rect::new(10.0, 20.0, 100.0, 40.0);
        assert_eq!(rect.center_x(), 60.0);
        assert_eq!(rect.center_y(), 40.0);
        assert!(rect.is_non_negative());
        assert!(!Rect::new(-1.0, 0.0, 1.0, 1.0).is_non_negative());
    }
}
