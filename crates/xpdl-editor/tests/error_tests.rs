//! Tests for core error types

use xpdl_editor::core::{EditorError, ErrorKind};

#[test]
fn test_not_found() {
    let error = EditorError::not_found("activity", 3);
    let error_msg = format!("{}", error);
    assert_eq!(error_msg, "activity 3 not found");
    assert_eq!(error.kind().message_key(), "notFound");
}

#[test]
fn test_duplicate_identifier() {
    let error = EditorError::duplicate("actors", "actor-1");
    assert_eq!(error.to_string(), "Identifier `actor-1` already exists among actors");
    assert_eq!(error.kind(), ErrorKind::DuplicateIdentifier);
}

#[test]
fn test_duplicate_application_identifier() {
    let error = EditorError::DuplicateApplicationIdentifier {
        xpdl_id: "application-1".to_string(),
    };
    assert!(error.to_string().contains("application-1"));
    assert_eq!(error.kind().message_key(), "duplicateApplicationId");
}

#[test]
fn test_referential_guard_violation() {
    let error = EditorError::in_use("actor", 2, 1);
    assert_eq!(error.to_string(), "actor 2 is still referenced by 1 activity");
    assert_eq!(error.kind().message_key(), "actorCannotDelete");

    let error = EditorError::in_use("node", 2, 4);
    assert_eq!(error.kind(), ErrorKind::ReferentialGuardViolation);
    assert_eq!(error.kind().message_key(), "referenceExists");
}

#[test]
fn test_last_remaining() {
    let error = EditorError::LastRemaining { entity: "actor" };
    assert_eq!(error.to_string(), "Cannot remove the last remaining actor");
    assert_eq!(error.kind().message_key(), "lastCannotDelete");
}

#[test]
fn test_empty_project() {
    assert_eq!(EditorError::EmptyProject.kind().message_key(), "noProcess");
}

#[test]
fn test_identifiers_exhausted() {
    let error = EditorError::IdentifiersExhausted { max: u32::MAX };
    assert_eq!(error.to_string(), "No identifier left above 4294967295");
    assert_eq!(error.kind().message_key(), "idExhausted");
}

#[test]
fn test_dangling_reference() {
    let error = EditorError::dangling("startEdge", "startNode", 9);
    assert_eq!(error.to_string(), "startEdge refers to missing startNode 9");
    assert_eq!(error.kind().message_key(), "referenceMissing");
}

#[test]
fn test_error_debug() {
    let error = EditorError::not_found("edge", 1);
    let debug_str = format!("{:?}", error);
    assert!(debug_str.contains("NotFound"));
}
