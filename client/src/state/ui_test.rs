use super::*;

// =============================================================
// UiState defaults
// =============================================================

#[test]
fn ui_state_default_opens_base_maps_tab() {
    let state = UiState::default();
    assert_eq!(state.tab, Tab::BaseMaps);
    assert!(state.event_map_filter.is_empty());
    assert!(state.dialog.is_none());
}

#[test]
fn ui_state_default_is_loading() {
    let state = UiState::default();
    assert_eq!(state.status, LoadStatus::Loading);
    assert!(!state.is_ready());
}

#[test]
fn ui_state_default_zoom_matches_editor_defaults() {
    let state = UiState::default();
    assert_eq!(state.zoom, ZoomRange::default());
    assert!(state.zoom.min <= state.zoom.default && state.zoom.default <= state.zoom.max);
}

// =============================================================
// Tab
// =============================================================

#[test]
fn tab_labels_are_distinct() {
    let labels: Vec<_> = Tab::ALL.iter().map(|t| t.label()).collect();
    assert_eq!(labels, ["Base maps", "Categories", "POIs", "Event maps"]);
}

#[test]
fn tab_round_trips_through_storage_json() {
    let raw = serde_json::to_string(&Tab::EventMaps).unwrap();
    assert_eq!(raw, "\"event_maps\"");
    assert_eq!(serde_json::from_str::<Tab>(&raw).unwrap(), Tab::EventMaps);
}

// =============================================================
// Dialog
// =============================================================

#[test]
fn create_dialog_starts_blank() {
    assert_eq!(Dialog::CreateEventMap.initial_name(), "");
    assert_eq!(Dialog::CreateEventMap.title(), "New event map");
}

#[test]
fn rename_dialog_starts_with_current_name() {
    let dialog = Dialog::RenameEventMap { id: "em".into(), current: "Spring Fair".into() };
    assert_eq!(dialog.initial_name(), "Spring Fair");
    assert_eq!(dialog.title(), "Rename event map");
}
