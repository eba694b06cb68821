use super::*;

#[test]
fn guard_errors_share_a_kind() {
    let cat = EditorError::CategoryInUse { id: "c".into(), name: "Food".into(), pois: 1 };
    let map = EditorError::BaseMapInUse { id: "b".into(), name: "Hall A".into(), event_maps: 2 };
    assert_eq!(cat.kind(), ErrorKind::GuardViolation);
    assert_eq!(map.kind(), ErrorKind::GuardViolation);
    assert_eq!(cat.error_code(), "E_GUARD_VIOLATION");
}

#[test]
fn messages_name_the_entity() {
    let err = EditorError::CategoryInUse { id: "c".into(), name: "Food".into(), pois: 3 };
    assert_eq!(err.to_string(), "category \"Food\" is used by 3 point(s) of interest and cannot be deleted");
}

#[test]
fn precondition_message_is_user_facing() {
    let err = EditorError::PreconditionMissing(Precondition::ActiveBaseMap);
    assert_eq!(err.to_string(), "select or create a base map first");
    assert_eq!(err.error_code(), "E_PRECONDITION_MISSING");
}

#[test]
fn storage_errors_convert() {
    let err: EditorError = StorageError::Backend("quota".into()).into();
    assert_eq!(err.kind(), ErrorKind::Storage);
    assert!(err.to_string().contains("quota"));
    assert_eq!(err.error_code(), "E_STORAGE");
}

#[test]
fn not_found_names_kind_and_id() {
    let err = EditorError::not_found("event map", "em-1");
    assert_eq!(err.to_string(), "event map not found: em-1");
    assert_eq!(err.error_code(), "E_NOT_FOUND");
}
