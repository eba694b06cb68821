#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn missing_or_blank_uses_defaults() {
    assert_eq!(resolve_config(None), EditorConfig::default());
    assert_eq!(resolve_config(Some("   ")), EditorConfig::default());
}

#[test]
fn overrides_apply() {
    let config = resolve_config(Some(r#"{"zoomMax": 6, "printTitle": "Floor plan"}"#));
    assert_eq!(config.zoom.max, 6.0);
    assert_eq!(config.print_title, "Floor plan");
}

#[test]
fn malformed_json_falls_back() {
    assert_eq!(resolve_config(Some("{not json")), EditorConfig::default());
}

#[test]
fn invalid_values_fall_back() {
    assert_eq!(resolve_config(Some(r#"{"zoomMin": 5, "zoomMax": 2}"#)), EditorConfig::default());
    assert_eq!(resolve_config(Some(r#"{"unknownKey": true}"#)), EditorConfig::default());
}
