//! View models published to components.
//!
//! DESIGN
//! ======
//! The editor answers each operation with a list of actions. This module
//! applies them to the last published view: a `Render(section)` rebuilds just
//! that section, `MarkerMoved` patches one marker in place so a drag does not
//! rebuild the whole overlay.

#[cfg(test)]
#[path = "view_test.rs"]
mod view_test;

use editor::editor::{Action, Editor, Section};
use editor::model::EntityId;
use editor::print::PrintProjection;
use editor::render::{
    EditorView, base_map_options, base_map_rows, canvas_view, category_options, category_rows, event_map_rows,
    legend, markers, poi_rows, render,
};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewState {
    pub view: EditorView,
    pub print: PrintProjection,
    /// Marker highlighted while being dragged.
    pub selected_marker: Option<EntityId>,
}

impl ViewState {
    /// Full projection of the editor.
    pub fn from_editor(editor: &Editor, filter: &str) -> Self {
        Self { view: render(editor, filter), print: PrintProjection::build(editor), selected_marker: None }
    }

    pub fn apply(&mut self, editor: &Editor, filter: &str, actions: &[Action]) {
        for action in actions {
            match action {
                Action::Render(section) => self.refresh(editor, filter, *section),
                Action::MarkerMoved { id, x_pct, y_pct } => {
                    if let Some(marker) = self.view.markers.iter_mut().find(|m| &m.id == id) {
                        marker.x_pct = *x_pct;
                        marker.y_pct = *y_pct;
                    }
                }
                Action::MarkerSelected(id) => self.selected_marker.clone_from(id),
            }
        }
    }

    fn refresh(&mut self, editor: &Editor, filter: &str, section: Section) {
        let catalog = editor.catalog();
        let working = editor.working();
        let view = &mut self.view;
        match section {
            Section::BaseMaps => {
                view.base_maps = base_map_rows(catalog, working);
                view.base_map_options = base_map_options(catalog, working);
            }
            Section::Categories => {
                view.categories = category_rows(catalog);
                view.category_options = category_options(catalog);
            }
            Section::Pois => view.pois = poi_rows(catalog),
            Section::Legend => view.legend = legend(catalog),
            Section::EventMaps => view.event_maps = event_map_rows(catalog, working, filter),
            Section::Canvas => view.canvas = canvas_view(editor),
            Section::Markers => {
                view.markers = markers(catalog, &working.placements, &editor.config().default_pin_color);
            }
            Section::Print => self.print = PrintProjection::build(editor),
        }
    }
}
