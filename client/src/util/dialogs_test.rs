use editor::error::Precondition;
use editor::store::StorageError;

use super::*;

#[test]
fn guard_message_names_the_entity() {
    let err = EditorError::CategoryInUse { id: "c".into(), name: "Food".into(), pois: 2 };
    let message = error_message(&err);
    assert!(message.contains("\"Food\""));
    assert!(message.contains('2'));
}

#[test]
fn precondition_message_tells_what_to_do() {
    let err = EditorError::PreconditionMissing(Precondition::ActiveBaseMap);
    assert_eq!(error_message(&err), "select or create a base map first");
}

#[test]
fn storage_message_mentions_saving() {
    let err = EditorError::Storage(StorageError::Backend("quota".into()));
    assert!(error_message(&err).starts_with("Could not save your changes"));
}

#[test]
fn not_found_hints_at_other_tabs() {
    let err = EditorError::NotFound { kind: "event map", id: "em".into() };
    assert_eq!(error_message(&err), "event map not found: em. It may have been deleted in another tab.");
}

#[test]
fn confirm_declines_without_browser() {
    assert!(!confirm("Delete everything?"));
}
