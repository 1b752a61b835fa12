//! Core error types for diagram editing
//!
//! Every fallible engine operation returns [`EditorResult`]. Form-driven
//! updates surface the [`ErrorKind`] token of a failure to the UI, which looks
//! up the user-facing message by [`ErrorKind::message_key`].

use thiserror::Error;

use crate::core::types::EntityId;

/// Result alias used throughout the engine
pub type EditorResult<T> = Result<T, EditorError>;

/// Core error types for diagram editing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: EntityId },

    #[error("Identifier `{xpdl_id}` already exists among {scope}")]
    DuplicateIdentifier { scope: &'static str, xpdl_id: String },

    #[error("Application identifier `{xpdl_id}` is used more than once")]
    DuplicateApplicationIdentifier { xpdl_id: String },

    #[error("{entity} {id} is still referenced by {referrers} {}", activity_noun(.referrers))]
    ReferentialGuardViolation {
        entity: &'static str,
        id: EntityId,
        referrers: usize,
    },

    #[error("Cannot remove the last remaining {entity}")]
    LastRemaining { entity: &'static str },

    #[error("Project has no processes")]
    EmptyProject,

    #[error("No identifier left above {max}")]
    IdentifiersExhausted { max: EntityId },

    #[error("{entity} refers to missing {target} {id}")]
    DanglingReference {
        entity: &'static str,
        target: &'static str,
        id: EntityId,
    },
}

fn activity_noun(count: &usize) -> &'static str {
    if *count == 1 {
        "activity"
    } else {
        "activities"
    }
}

/// Copyable classification of an [`EditorError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    DuplicateIdentifier,
    DuplicateApplicationIdentifier,
    ActorInUse,
    ApplicationInUse,
    ReferentialGuardViolation,
    LastRemaining,
    EmptyProject,
    IdentifiersExhausted,
    DanglingReference,
}

impl ErrorKind {
    /// Stable dictionary key for the message the UI shows
    pub fn message_key(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "notFound",
            ErrorKind::DuplicateIdentifier => "idExists",
            ErrorKind::DuplicateApplicationIdentifier => "duplicateApplicationId",
            ErrorKind::ActorInUse => "actorCannotDelete",
            ErrorKind::ApplicationInUse => "applicationCannotDelete",
            ErrorKind::ReferentialGuardViolation => "referenceExists",
            ErrorKind::LastRemaining => "lastCannotDelete",
            ErrorKind::EmptyProject => "noProcess",
            ErrorKind::IdentifiersExhausted => "idExhausted",
            ErrorKind::DanglingReference => "referenceMissing",
        }
    }
}

impl EditorError {
    /// Create a lookup miss
    pub fn not_found(entity: &'static str, id: EntityId) -> Self {
        Self::NotFound { entity, id }
    }

    /// Create an xpdlId collision
    pub fn duplicate(scope: &'static str, xpdl_id: impl Into<String>) -> Self {
        Self::DuplicateIdentifier {
            scope,
            xpdl_id: xpdl_id.into(),
        }
    }

    /// Create a refused removal of a still-referenced entity
    pub fn in_use(entity: &'static str, id: EntityId, referrers: usize) -> Self {
        Self::ReferentialGuardViolation {
            entity,
            id,
            referrers,
        }
    }

    /// Create a reference to an entity that does not exist
    pub fn dangling(entity: &'static str, target: &'static str, id: EntityId) -> Self {
        Self::DanglingReference { entity, target, id }
    }

    /// Classify this error for the UI
    pub fn kind(&self) -> ErrorKind {
        match self {
            EditorError::NotFound { .. } => ErrorKind::NotFound,
            EditorError::DuplicateIdentifier { .. } => ErrorKind::DuplicateIdentifier,
            EditorError::DuplicateApplicationIdentifier { .. } => {
                ErrorKind::DuplicateApplicationIdentifier
            }
            EditorError::ReferentialGuardViolation { entity, .. } => match *entity {
                "actor" => ErrorKind::ActorInUse,
                "application" => ErrorKind::ApplicationInUse,
                _ => ErrorKind::ReferentialGuardViolation,
            },
            EditorError::LastRemaining { .. } => ErrorKind::LastRemaining,
            EditorError::EmptyProject => ErrorKind::EmptyProject,
            EditorError::IdentifiersExhausted { .. } => ErrorKind::IdentifiersExhausted,
            EditorError::DanglingReference { .. } => ErrorKind::DanglingReference,
        }
    }
}
