//! Rendering: projects editor state into plain view models.
//!
//! Every function here is a full rebuild from state; nothing is patched
//! incrementally except single markers during a drag (see
//! [`crate::editor::Action::MarkerMoved`]). The host turns these rows into DOM
//! and never reads the catalog directly, so fallbacks for dangling references
//! (a POI whose category is gone, an event map whose base map is gone) live in
//! one place.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::consts::{FALLBACK_MARKER_LABEL, MISSING_CATEGORY_SWATCH, MISSING_NAME};
use crate::editor::Editor;
use crate::model::{EntityId, Placement, Poi};
use crate::state::{Catalog, WorkingState};

/// An entry in a `<select>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub id: EntityId,
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseMapRow {
    pub id: EntityId,
    pub name: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRow {
    pub id: EntityId,
    pub name: String,
    pub color: String,
}

/// Small preview next to a POI name: its icon, or its category color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Badge {
    Icon(String),
    Swatch(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoiRow {
    pub id: EntityId,
    pub name: String,
    pub badge: Badge,
    /// Category name, or `—` when the category is missing.
    pub category_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendEntry {
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventMapRow {
    pub id: EntityId,
    pub name: String,
    /// Currently loaded in the editor.
    pub active: bool,
    pub placement_count: usize,
    pub base_map_name: String,
}

/// Marker face: an uploaded icon or a colored pin.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Glyph {
    Icon(String),
    Pin(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerView {
    pub id: EntityId,
    pub poi_id: EntityId,
    pub x_pct: f64,
    pub y_pct: f64,
    pub glyph: Glyph,
    pub label: String,
}

/// Base image plus zoom for the map canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasView {
    pub image_url: String,
    pub zoom: f64,
}

/// Everything the UI shows, rebuilt from scratch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditorView {
    pub base_maps: Vec<BaseMapRow>,
    pub base_map_options: Vec<SelectOption>,
    pub categories: Vec<CategoryRow>,
    pub category_options: Vec<SelectOption>,
    pub pois: Vec<PoiRow>,
    pub legend: Vec<LegendEntry>,
    pub event_maps: Vec<EventMapRow>,
    pub canvas: Option<CanvasView>,
    pub markers: Vec<MarkerView>,
}

/// Build the whole view. `filter` narrows the event map list.
#[must_use]
pub fn render(editor: &Editor, filter: &str) -> EditorView {
    let catalog = editor.catalog();
    let working = editor.working();
    EditorView {
        base_maps: base_map_rows(catalog, working),
        base_map_options: base_map_options(catalog, working),
        categories: category_rows(catalog),
        category_options: category_options(catalog),
        pois: poi_rows(catalog),
        legend: legend(catalog),
        event_maps: event_map_rows(catalog, working, filter),
        canvas: canvas_view(editor),
        markers: markers(catalog, &working.placements, &editor.config().default_pin_color),
    }
}

#[must_use]
pub fn base_map_rows(catalog: &Catalog, working: &WorkingState) -> Vec<BaseMapRow> {
    catalog
        .base_maps
        .iter()
        .map(|m| BaseMapRow {
            id: m.id.clone(),
            name: m.name.clone(),
            active: working.active_base_map_id.as_deref() == Some(m.id.as_str()),
        })
        .collect()
}

/// Options for the active base map selector.
#[must_use]
pub fn base_map_options(catalog: &Catalog, working: &WorkingState) -> Vec<SelectOption> {
    base_map_rows(catalog, working)
        .into_iter()
        .map(|row| SelectOption { id: row.id, label: row.name, selected: row.active })
        .collect()
}

#[must_use]
pub fn category_rows(catalog: &Catalog) -> Vec<CategoryRow> {
    catalog
        .categories
        .iter()
        .map(|c| CategoryRow { id: c.id.clone(), name: c.name.clone(), color: c.color.clone() })
        .collect()
}

/// Category choices in the POI form; the first one is preselected.
#[must_use]
pub fn category_options(catalog: &Catalog) -> Vec<SelectOption> {
    catalog
        .categories
        .iter()
        .enumerate()
        .map(|(i, c)| SelectOption { id: c.id.clone(), label: c.name.clone(), selected: i == 0 })
        .collect()
}

#[must_use]
pub fn poi_rows(catalog: &Catalog) -> Vec<PoiRow> {
    catalog
        .pois
        .iter()
        .map(|p| {
            let category = catalog.category_of(p);
            let badge = match (&p.icon, category) {
                (Some(icon), _) => Badge::Icon(icon.as_url().to_owned()),
                (None, Some(c)) => Badge::Swatch(c.color.clone()),
                (None, None) => Badge::Swatch(MISSING_CATEGORY_SWATCH.to_owned()),
            };
            PoiRow {
                id: p.id.clone(),
                name: p.name.clone(),
                badge,
                category_name: category.map_or_else(|| MISSING_NAME.to_owned(), |c| c.name.clone()),
            }
        })
        .collect()
}

/// Each category used by at least one POI, once, in POI order.
#[must_use]
pub fn legend(catalog: &Catalog) -> Vec<LegendEntry> {
    let mut seen: Vec<&str> = Vec::new();
    let mut entries = Vec::new();
    for category in catalog.pois.iter().filter_map(|p| catalog.category_of(p)) {
        if seen.contains(&category.id.as_str()) {
            continue;
        }
        seen.push(&category.id);
        entries.push(LegendEntry { name: category.name.clone(), color: category.color.clone() });
    }
    entries
}

/// Case-insensitive substring match of `name` against a trimmed query.
#[must_use]
pub fn event_map_filter(name: &str, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    query.is_empty() || name.to_lowercase().contains(&query)
}

#[must_use]
pub fn event_map_rows(catalog: &Catalog, working: &WorkingState, filter: &str) -> Vec<EventMapRow> {
    catalog
        .event_maps
        .iter()
        .filter(|e| event_map_filter(&e.name, filter))
        .map(|e| EventMapRow {
            id: e.id.clone(),
            name: e.name.clone(),
            active: working.is_current(&e.id),
            placement_count: e.placements.len(),
            base_map_name: catalog.base_map(&e.base_map_id).map_or_else(|| MISSING_NAME.to_owned(), |m| m.name.clone()),
        })
        .collect()
}

/// The active base map at the current zoom.
#[must_use]
pub fn canvas_view(editor: &Editor) -> Option<CanvasView> {
    let map = editor.active_base_map()?;
    Some(CanvasView { image_url: map.image.as_url().to_owned(), zoom: editor.working().zoom })
}

/// Marker views for `placements`. Placements whose POI is gone still render,
/// as a default pin labelled `POI`.
#[must_use]
pub fn markers(catalog: &Catalog, placements: &[Placement], default_pin_color: &str) -> Vec<MarkerView> {
    placements
        .iter()
        .map(|pl| {
            let poi = catalog.poi(&pl.poi_id);
            let glyph = match poi {
                Some(Poi { icon: Some(icon), .. }) => Glyph::Icon(icon.as_url().to_owned()),
                Some(p) => Glyph::Pin(
                    catalog.category_of(p).map_or_else(|| default_pin_color.to_owned(), |c| c.color.clone()),
                ),
                None => Glyph::Pin(default_pin_color.to_owned()),
            };
            MarkerView {
                id: pl.id.clone(),
                poi_id: pl.poi_id.clone(),
                x_pct: pl.x_pct,
                y_pct: pl.y_pct,
                glyph,
                label: poi.map_or_else(|| FALLBACK_MARKER_LABEL.to_owned(), |p| p.name.clone()),
            }
        })
        .collect()
}
