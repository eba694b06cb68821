#![allow(clippy::float_cmp)]

use serde_json::json;

use super::*;

// =============================================================
// clamp_pct
// =============================================================

#[test]
fn clamp_pct_bounds() {
    assert_eq!(clamp_pct(-5.0), 0.0);
    assert_eq!(clamp_pct(42.5), 42.5);
    assert_eq!(clamp_pct(150.0), 100.0);
    assert_eq!(clamp_pct(f64::NAN), 0.0);
    assert_eq!(clamp_pct(f64::INFINITY), 100.0);
}

#[test]
fn placement_new_clamps() {
    let p = Placement::new("poi", 120.0, -3.0);
    assert_eq!(p.x_pct, 100.0);
    assert_eq!(p.y_pct, 0.0);
}

#[test]
fn placement_move_to_clamps() {
    let mut p = Placement::new("poi", 10.0, 10.0);
    p.move_to(55.5, 101.0);
    assert_eq!(p.x_pct, 55.5);
    assert_eq!(p.y_pct, 100.0);
}

#[test]
fn new_ids_are_unique() {
    assert_ne!(new_id(), new_id());
}

// =============================================================
// EncodedImage
// =============================================================

#[test]
fn encoded_image_from_bytes_is_data_url() {
    let img = EncodedImage::from_bytes("image/png", &[1, 2, 3]);
    assert_eq!(img.as_url(), "data:image/png;base64,AQID");
    assert_eq!(img.mime(), Some("image/png"));
    assert!(img.is_image());
}

#[test]
fn encoded_image_knows_non_images() {
    let text = EncodedImage::from_bytes("text/plain", b"hello");
    assert_eq!(text.mime(), Some("text/plain"));
    assert!(!text.is_image());
    assert!(EncodedImage::from_bytes("IMAGE/SVG+XML", b"<svg/>").is_image());
    assert!(!EncodedImage::from_bytes("", b"x").is_image());
}

// =============================================================
// EventMap
// =============================================================

fn event_map() -> EventMap {
    EventMap {
        id: "em".into(),
        name: "Spring Fair".into(),
        base_map_id: "bm".into(),
        placements: vec![Placement::new("a", 1.0, 1.0), Placement::new("b", 2.0, 2.0), Placement::new("a", 3.0, 3.0)],
        created_at: 100,
        updated_at: 100,
    }
}

#[test]
fn touch_moves_forward_with_clock() {
    let mut em = event_map();
    em.touch(500);
    assert_eq!(em.updated_at, 500);
}

#[test]
fn touch_strictly_increases_when_clock_stalls() {
    let mut em = event_map();
    em.touch(100);
    assert_eq!(em.updated_at, 101);
    em.touch(50);
    assert_eq!(em.updated_at, 102);
}

#[test]
fn remove_poi_drops_every_reference() {
    let mut em = event_map();
    assert!(em.references_poi("a"));
    assert_eq!(em.remove_poi("a"), 2);
    assert!(!em.references_poi("a"));
    assert_eq!(em.placements.len(), 1);
    assert_eq!(em.remove_poi("a"), 0);
}

// =============================================================
// serde shape
// =============================================================

#[test]
fn event_map_serializes_camel_case() {
    let em = event_map();
    let value = serde_json::to_value(&em).unwrap();
    assert_eq!(value["baseMapId"], "bm");
    assert_eq!(value["createdAt"], 100);
    assert!(value["placements"][0].get("poiId").is_some());
    assert!(value["placements"][0].get("xPct").is_some());
}

#[test]
fn poi_without_icon_omits_field() {
    let poi = Poi { id: "p".into(), name: "Cart".into(), category_id: "c".into(), icon: None };
    let value = serde_json::to_value(&poi).unwrap();
    assert!(value.get("icon").is_none());
    assert_eq!(value["categoryId"], "c");
}

#[test]
fn event_map_tolerates_missing_placements() {
    let value = json!({"id": "e", "name": "n", "baseMapId": "b", "createdAt": 1, "updatedAt": 2});
    let em: EventMap = serde_json::from_value(value).unwrap();
    assert!(em.placements.is_empty());
}
