#![allow(clippy::float_cmp)]

use futures::executor::block_on;

use super::*;
use crate::clock::ManualClock;
use crate::error::ErrorKind;
use crate::store::{Collection, MemoryStore, fetch};

struct Fixture {
    store: Rc<MemoryStore>,
    clock: Rc<ManualClock>,
    editor: Editor,
}

fn fixture() -> Fixture {
    let store = Rc::new(MemoryStore::new());
    let clock = Rc::new(ManualClock::at(1_000));
    let editor = block_on(Editor::open(store.clone(), clock.clone(), EditorConfig::default())).unwrap();
    Fixture { store, clock, editor }
}

fn reopen(fx: &Fixture) -> Editor {
    block_on(Editor::open(fx.store.clone(), fx.clock.clone(), EditorConfig::default())).unwrap()
}

fn png() -> EncodedImage {
    EncodedImage::from_bytes("image/png", &[0x89, b'P', b'N', b'G'])
}

fn hall_800x600(editor: &Editor) -> Viewport {
    editor.viewport(Point::new(0.0, 0.0), Size::new(800.0, 600.0))
}

/// Hall A with a Food category, a Coffee Cart POI and a current "Spring Fair".
struct Seeded {
    base: EntityId,
    food: EntityId,
    cart: EntityId,
    fair: EntityId,
}

fn seed(fx: &mut Fixture) -> Seeded {
    let (base, _) = block_on(fx.editor.create_base_map("Hall A", png())).unwrap();
    let (food, _) = block_on(fx.editor.create_category("Food", "#ff0000")).unwrap();
    let (cart, _) = block_on(fx.editor.create_poi("Coffee Cart", &food, None)).unwrap();
    let (fair, _) = block_on(fx.editor.create_event_map("Spring Fair")).unwrap();
    Seeded { base, food, cart, fair }
}

fn drop_at(fx: &mut Fixture, poi: &str, x: f64, y: f64) -> Vec<Action> {
    let viewport = hall_800x600(&fx.editor);
    block_on(fx.editor.on_poi_drop(poi, Point::new(x, y), &viewport)).unwrap()
}

// =============================================================
// Open
// =============================================================

#[test]
fn open_on_empty_store_has_nothing_selected() {
    let fx = fixture();
    assert!(fx.editor.working().active_base_map_id.is_none());
    assert!(fx.editor.working().current_event_map_id.is_none());
    assert_eq!(fx.editor.working().zoom, 1.0);
}

#[test]
fn open_loads_most_recently_updated_event_map() {
    let mut fx = fixture();
    let s = seed(&mut fx);
    fx.clock.advance(10);
    let (other, _) = block_on(fx.editor.create_event_map("Autumn Fair")).unwrap();
    fx.clock.advance(10);
    block_on(fx.editor.rename_event_map(&s.fair, "Spring Fair 2026")).unwrap();

    let reopened = reopen(&fx);
    assert_eq!(reopened.working().current_event_map_id.as_deref(), Some(s.fair.as_str()));
    assert_ne!(reopened.working().current_event_map_id.as_deref(), Some(other.as_str()));
    assert_eq!(reopened.working().active_base_map_id.as_deref(), Some(s.base.as_str()));
}

// =============================================================
// Spring Fair walkthrough
// =============================================================

#[test]
fn drop_places_poi_and_survives_reload() {
    let mut fx = fixture();
    let s = seed(&mut fx);

    let actions = drop_at(&mut fx, &s.cart, 400.0, 300.0);
    assert!(actions.contains(&Action::Render(Section::Markers)));
    assert!(actions.contains(&Action::Render(Section::EventMaps)));

    let placed = fx.editor.working().placements.last().unwrap();
    assert_eq!(placed.poi_id, s.cart);
    assert_eq!((placed.x_pct, placed.y_pct), (50.0, 50.0));

    let stored: EventMap = block_on(fetch(fx.store.as_ref(), &s.fair)).unwrap().unwrap();
    assert_eq!(stored.placements.len(), 1);

    let reopened = reopen(&fx);
    assert_eq!(reopened.working().current_event_map_id.as_deref(), Some(s.fair.as_str()));
    let placements = &reopened.working().placements;
    assert_eq!(placements.len(), 1);
    assert_eq!((placements[0].x_pct, placements[0].y_pct), (50.0, 50.0));
}

#[test]
fn drop_outside_overlay_clamps() {
    let mut fx = fixture();
    let s = seed(&mut fx);
    drop_at(&mut fx, &s.cart, -50.0, 900.0);
    let placed = fx.editor.working().placements.last().unwrap();
    assert_eq!((placed.x_pct, placed.y_pct), (0.0, 100.0));
}

#[test]
fn drop_before_layout_is_ignored() {
    let mut fx = fixture();
    let s = seed(&mut fx);
    let writes = fx.store.write_count();
    let viewport = fx.editor.viewport(Point::new(0.0, 0.0), Size::new(0.0, 0.0));
    let actions = block_on(fx.editor.on_poi_drop(&s.cart, Point::new(10.0, 10.0), &viewport)).unwrap();
    assert!(actions.is_empty());
    assert!(fx.editor.working().placements.is_empty());
    assert_eq!(fx.store.write_count(), writes);
}

#[test]
fn drop_without_base_map_is_refused() {
    let mut fx = fixture();
    let viewport = hall_800x600(&fx.editor);
    let err = block_on(fx.editor.on_poi_drop("any", Point::new(1.0, 1.0), &viewport)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PreconditionMissing);
}

#[test]
fn drop_unknown_poi_is_not_found() {
    let mut fx = fixture();
    seed(&mut fx);
    let viewport = hall_800x600(&fx.editor);
    let err = block_on(fx.editor.on_poi_drop("ghost", Point::new(1.0, 1.0), &viewport)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn drop_without_current_event_map_stays_in_memory() {
    let mut fx = fixture();
    let (_, _) = block_on(fx.editor.create_base_map("Hall A", png())).unwrap();
    let (food, _) = block_on(fx.editor.create_category("Food", "#ff0000")).unwrap();
    let (cart, _) = block_on(fx.editor.create_poi("Coffee Cart", &food, None)).unwrap();
    let writes = fx.store.write_count();

    drop_at(&mut fx, &cart, 100.0, 100.0);
    assert_eq!(fx.editor.working().placements.len(), 1);
    assert_eq!(fx.store.write_count(), writes);
}

// =============================================================
// Guards
// =============================================================

#[test]
fn category_in_use_cannot_be_deleted() {
    let mut fx = fixture();
    let s = seed(&mut fx);
    let err = block_on(fx.editor.delete_category(&s.food)).unwrap_err();
    assert!(matches!(err, EditorError::CategoryInUse { pois: 1, .. }));
    assert_eq!(fx.store.len(Collection::Categories), 1);
    assert!(fx.editor.catalog().category(&s.food).is_some());
}

#[test]
fn unused_category_is_deleted() {
    let mut fx = fixture();
    let (id, _) = block_on(fx.editor.create_category("Safety", "#00f")).unwrap();
    assert_eq!(fx.editor.catalog().category(&id).unwrap().color, "#0000ff");
    block_on(fx.editor.delete_category(&id)).unwrap();
    assert_eq!(fx.store.len(Collection::Categories), 0);
}

#[test]
fn base_map_in_use_cannot_be_deleted() {
    let mut fx = fixture();
    let s = seed(&mut fx);
    let err = block_on(fx.editor.delete_base_map(&s.base)).unwrap_err();
    assert!(matches!(err, EditorError::BaseMapInUse { event_maps: 1, .. }));
    assert_eq!(fx.store.len(Collection::BaseMaps), 1);
}

#[test]
fn deleting_active_base_map_falls_back_to_first() {
    let mut fx = fixture();
    let (first, _) = block_on(fx.editor.create_base_map("Hall A", png())).unwrap();
    let (second, _) = block_on(fx.editor.create_base_map("Hall B", png())).unwrap();
    assert_eq!(fx.editor.working().active_base_map_id.as_deref(), Some(second.as_str()));

    block_on(fx.editor.delete_base_map(&second)).unwrap();
    assert_eq!(fx.editor.working().active_base_map_id.as_deref(), Some(first.as_str()));
}

#[test]
fn category_names_are_unique_and_colors_validated() {
    let mut fx = fixture();
    block_on(fx.editor.create_category("Food", "#ff0000")).unwrap();
    let dup = block_on(fx.editor.create_category("  Food ", "#00ff00")).unwrap_err();
    assert_eq!(dup.kind(), ErrorKind::InvalidInput);
    let bad = block_on(fx.editor.create_category("Drinks", "red")).unwrap_err();
    assert_eq!(bad.kind(), ErrorKind::InvalidInput);
    assert_eq!(fx.store.len(Collection::Categories), 1);
}

#[test]
fn blank_names_are_rejected() {
    let mut fx = fixture();
    let err = block_on(fx.editor.create_base_map("   ", png())).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert_eq!(fx.store.write_count(), 0);
}

#[test]
fn non_image_uploads_are_rejected() {
    let mut fx = fixture();
    let text = EncodedImage::from_bytes("text/plain", b"hello");
    let err = block_on(fx.editor.create_base_map("Hall A", text.clone())).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);

    let (food, _) = block_on(fx.editor.create_category("Food", "#ff0000")).unwrap();
    let err = block_on(fx.editor.create_poi("Stage", &food, Some(text))).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert!(fx.editor.catalog().pois.is_empty());
    assert!(fx.editor.catalog().base_maps.is_empty());
}

#[test]
fn poi_needs_existing_category() {
    let mut fx = fixture();
    let err = block_on(fx.editor.create_poi("Stage", "nope", None)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

// =============================================================
// POI cascade
// =============================================================

#[test]
fn placed_poi_needs_confirmation() {
    let mut fx = fixture();
    let s = seed(&mut fx);
    drop_at(&mut fx, &s.cart, 400.0, 300.0);

    let err = block_on(fx.editor.delete_poi(&s.cart, false)).unwrap_err();
    assert!(matches!(err, EditorError::ConfirmationRequired { placements: 1, .. }));
    assert!(err.to_string().contains("placed 1 time(s)"));
    assert!(fx.editor.catalog().poi(&s.cart).is_some());
    assert_eq!(fx.store.len(Collection::Pois), 1);
}

#[test]
fn confirmation_counts_other_event_maps() {
    let mut fx = fixture();
    let s = seed(&mut fx);
    drop_at(&mut fx, &s.cart, 400.0, 300.0);
    block_on(fx.editor.duplicate_event_map(&s.fair)).unwrap();

    let err = block_on(fx.editor.delete_poi(&s.cart, false)).unwrap_err();
    assert!(matches!(err, EditorError::ConfirmationRequired { placements: 2, .. }));
}

#[test]
fn confirmed_poi_delete_cascades_everywhere() {
    let mut fx = fixture();
    let s = seed(&mut fx);
    drop_at(&mut fx, &s.cart, 400.0, 300.0);
    let (other, _) = block_on(fx.editor.duplicate_event_map(&s.fair)).unwrap();
    let before = fx.editor.catalog().event_map(&s.fair).unwrap().updated_at;

    block_on(fx.editor.delete_poi(&s.cart, true)).unwrap();

    assert!(fx.editor.catalog().poi(&s.cart).is_none());
    assert!(fx.editor.working().placements.is_empty());
    for id in [&s.fair, &other] {
        let em = fx.editor.catalog().event_map(id).unwrap();
        assert!(!em.references_poi(&s.cart));
        let stored: EventMap = block_on(fetch(fx.store.as_ref(), id)).unwrap().unwrap();
        assert!(stored.placements.is_empty());
    }
    // The clock did not move, yet the stamp still increased.
    assert!(fx.editor.catalog().event_map(&s.fair).unwrap().updated_at > before);
    assert_eq!(fx.store.len(Collection::Pois), 0);
}

#[test]
fn unplaced_poi_deletes_without_confirmation() {
    let mut fx = fixture();
    let s = seed(&mut fx);
    block_on(fx.editor.delete_poi(&s.cart, false)).unwrap();
    assert!(fx.editor.catalog().pois.is_empty());
}

#[test]
fn failed_cascade_changes_nothing() {
    let mut fx = fixture();
    let s = seed(&mut fx);
    drop_at(&mut fx, &s.cart, 400.0, 300.0);
    fx.store.fail_writes(true);

    let err = block_on(fx.editor.delete_poi(&s.cart, true)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Storage);
    assert!(fx.editor.catalog().poi(&s.cart).is_some());
    assert_eq!(fx.editor.working().placements.len(), 1);
    assert!(fx.editor.catalog().event_map(&s.fair).unwrap().references_poi(&s.cart));
}

// =============================================================
// Event maps
// =============================================================

#[test]
fn event_map_needs_base_map() {
    let mut fx = fixture();
    let err = block_on(fx.editor.create_event_map("Spring Fair")).unwrap_err();
    assert!(matches!(err, EditorError::PreconditionMissing(Precondition::ActiveBaseMap)));
}

#[test]
fn loading_copies_placements() {
    let mut fx = fixture();
    let s = seed(&mut fx);
    drop_at(&mut fx, &s.cart, 400.0, 300.0);
    let (empty, _) = block_on(fx.editor.create_event_map("Empty")).unwrap();
    assert!(fx.editor.working().placements.is_empty());

    fx.editor.load_event_map(&s.fair).unwrap();
    assert_eq!(fx.editor.working().placements.len(), 1);
    fx.editor.load_event_map(&empty).unwrap();
    assert!(fx.editor.working().placements.is_empty());
    assert_eq!(fx.editor.catalog().event_map(&s.fair).unwrap().placements.len(), 1);
}

#[test]
fn load_unknown_event_map_is_not_found() {
    let mut fx = fixture();
    assert_eq!(fx.editor.load_event_map("nope").unwrap_err().kind(), ErrorKind::NotFound);
}

#[test]
fn rename_advances_updated_at() {
    let mut fx = fixture();
    let s = seed(&mut fx);
    let before = fx.editor.catalog().event_map(&s.fair).unwrap().updated_at;
    block_on(fx.editor.rename_event_map(&s.fair, "  Summer Fair ")).unwrap();
    let em = fx.editor.catalog().event_map(&s.fair).unwrap();
    assert_eq!(em.name, "Summer Fair");
    assert!(em.updated_at > before);
}

#[test]
fn duplicate_copies_under_new_id() {
    let mut fx = fixture();
    let s = seed(&mut fx);
    drop_at(&mut fx, &s.cart, 400.0, 300.0);

    let (copy_id, _) = block_on(fx.editor.duplicate_event_map(&s.fair)).unwrap();
    assert_ne!(copy_id, s.fair);
    let copy = fx.editor.catalog().event_map(&copy_id).unwrap();
    assert_eq!(copy.name, "Spring Fair (copy)");
    assert_eq!(copy.base_map_id, s.base);
    assert_eq!(copy.placements.len(), 1);
    // Duplicating does not switch the current map.
    assert!(fx.editor.working().is_current(&s.fair));
}

#[test]
fn deleting_current_event_map_clears_session() {
    let mut fx = fixture();
    let s = seed(&mut fx);
    drop_at(&mut fx, &s.cart, 400.0, 300.0);
    block_on(fx.editor.delete_event_map(&s.fair)).unwrap();
    assert!(fx.editor.working().current_event_map_id.is_none());
    assert!(fx.editor.working().placements.is_empty());
    assert_eq!(fx.store.len(Collection::EventMaps), 0);
}

#[test]
fn save_needs_current_event_map() {
    let mut fx = fixture();
    let err = block_on(fx.editor.save_current_event_map()).unwrap_err();
    assert!(matches!(err, EditorError::PreconditionMissing(Precondition::CurrentEventMap)));
}

#[test]
fn selecting_base_map_keeps_event_map_base() {
    let mut fx = fixture();
    let s = seed(&mut fx);
    let (other, _) = block_on(fx.editor.create_base_map("Hall B", png())).unwrap();
    fx.editor.select_base_map(Some(&other)).unwrap();
    assert_eq!(fx.editor.catalog().event_map(&s.fair).unwrap().base_map_id, s.base);

    block_on(fx.editor.rebase_current_event_map()).unwrap();
    assert_eq!(fx.editor.catalog().event_map(&s.fair).unwrap().base_map_id, other);
}

#[test]
fn select_unknown_base_map_is_not_found() {
    let mut fx = fixture();
    assert_eq!(fx.editor.select_base_map(Some("nope")).unwrap_err().kind(), ErrorKind::NotFound);
    fx.editor.select_base_map(None).unwrap();
    assert!(fx.editor.active_base_map().is_none());
}

#[test]
fn clear_placements_persists_empty_list() {
    let mut fx = fixture();
    let s = seed(&mut fx);
    drop_at(&mut fx, &s.cart, 400.0, 300.0);
    drop_at(&mut fx, &s.cart, 100.0, 100.0);
    block_on(fx.editor.clear_placements()).unwrap();
    assert!(fx.editor.working().placements.is_empty());
    assert!(fx.editor.catalog().event_map(&s.fair).unwrap().placements.is_empty());
}

// =============================================================
// Zoom
// =============================================================

#[test]
fn zoom_leaves_percentages_alone() {
    let mut fx = fixture();
    let s = seed(&mut fx);
    drop_at(&mut fx, &s.cart, 400.0, 300.0);

    assert_eq!(fx.editor.set_zoom(2.0), vec![Action::Render(Section::Canvas)]);
    let placed = &fx.editor.working().placements[0];
    assert_eq!((placed.x_pct, placed.y_pct), (50.0, 50.0));

    // At 200% the same spot sits twice as far from the origin.
    let viewport = hall_800x600(&fx.editor);
    block_on(fx.editor.on_poi_drop(&s.cart, Point::new(800.0, 600.0), &viewport)).unwrap();
    let placed = fx.editor.working().placements.last().unwrap();
    assert_eq!((placed.x_pct, placed.y_pct), (50.0, 50.0));
}

#[test]
fn zoom_is_clamped() {
    let mut fx = fixture();
    fx.editor.set_zoom(100.0);
    assert_eq!(fx.editor.working().zoom, 4.0);
    fx.editor.set_zoom(f64::NAN);
    assert_eq!(fx.editor.working().zoom, 1.0);
}

// =============================================================
// Marker drag and delete
// =============================================================

#[test]
fn drag_moves_marker_and_persists_on_release() {
    let mut fx = fixture();
    let s = seed(&mut fx);
    drop_at(&mut fx, &s.cart, 400.0, 300.0);
    let id = fx.editor.working().placements[0].id.clone();
    let viewport = hall_800x600(&fx.editor);

    let down = fx.editor.on_marker_pointer_down(&id, Point::new(400.0, 300.0));
    assert_eq!(down, vec![Action::MarkerSelected(Some(id.clone()))]);

    let moved = fx.editor.on_pointer_move(Point::new(480.0, 360.0), &viewport);
    assert_eq!(moved, vec![Action::MarkerMoved { id: id.clone(), x_pct: 60.0, y_pct: 60.0 }]);
    // Not saved until release.
    assert_eq!(fx.editor.catalog().event_map(&s.fair).unwrap().placements[0].x_pct, 50.0);

    let up = block_on(fx.editor.on_pointer_up()).unwrap();
    assert_eq!(up[0], Action::MarkerSelected(None));
    assert_eq!(fx.editor.input(), &InputState::Idle);
    let stored = &fx.editor.catalog().event_map(&s.fair).unwrap().placements[0];
    assert_eq!((stored.x_pct, stored.y_pct), (60.0, 60.0));
}

#[test]
fn drag_stops_at_overlay_edge() {
    let mut fx = fixture();
    let s = seed(&mut fx);
    drop_at(&mut fx, &s.cart, 400.0, 300.0);
    let id = fx.editor.working().placements[0].id.clone();
    let viewport = hall_800x600(&fx.editor);

    fx.editor.on_marker_pointer_down(&id, Point::new(400.0, 300.0));
    fx.editor.on_pointer_move(Point::new(2_000.0, -500.0), &viewport);
    let placed = &fx.editor.working().placements[0];
    assert_eq!((placed.x_pct, placed.y_pct), (100.0, 0.0));
}

#[test]
fn failed_release_puts_marker_back() {
    let mut fx = fixture();
    let s = seed(&mut fx);
    drop_at(&mut fx, &s.cart, 400.0, 300.0);
    let id = fx.editor.working().placements[0].id.clone();
    let viewport = hall_800x600(&fx.editor);

    fx.editor.on_marker_pointer_down(&id, Point::new(400.0, 300.0));
    fx.editor.on_pointer_move(Point::new(480.0, 360.0), &viewport);
    fx.store.fail_writes(true);
    assert!(block_on(fx.editor.on_pointer_up()).is_err());

    let placed = &fx.editor.working().placements[0];
    assert_eq!((placed.x_pct, placed.y_pct), (50.0, 50.0));
    assert_eq!(fx.editor.input(), &InputState::Idle);
}

#[test]
fn pointer_up_without_drag_does_nothing() {
    let mut fx = fixture();
    assert!(block_on(fx.editor.on_pointer_up()).unwrap().is_empty());
    let viewport = hall_800x600(&fx.editor);
    assert!(fx.editor.on_pointer_move(Point::new(5.0, 5.0), &viewport).is_empty());
}

#[test]
fn double_click_removes_marker() {
    let mut fx = fixture();
    let s = seed(&mut fx);
    drop_at(&mut fx, &s.cart, 400.0, 300.0);
    let id = fx.editor.working().placements[0].id.clone();

    block_on(fx.editor.on_marker_double_click(&id)).unwrap();
    assert!(fx.editor.working().placements.is_empty());
    assert!(fx.editor.catalog().event_map(&s.fair).unwrap().placements.is_empty());
}

#[test]
fn failed_drop_is_undone() {
    let mut fx = fixture();
    let s = seed(&mut fx);
    fx.store.fail_writes(true);

    let viewport = hall_800x600(&fx.editor);
    let err = block_on(fx.editor.on_poi_drop(&s.cart, Point::new(1.0, 1.0), &viewport)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Storage);
    assert!(fx.editor.working().placements.is_empty());
    assert!(fx.editor.catalog().event_map(&s.fair).unwrap().placements.is_empty());
}

#[test]
fn failed_create_leaves_catalog_unchanged() {
    let mut fx = fixture();
    fx.store.fail_writes(true);
    assert!(block_on(fx.editor.create_base_map("Hall A", png())).is_err());
    assert!(fx.editor.catalog().base_maps.is_empty());
    assert!(fx.editor.working().active_base_map_id.is_none());
}
