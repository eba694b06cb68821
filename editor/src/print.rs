//! Print layout: a static, unzoomed copy of the map for the browser's
//! print-to-PDF.
//!
//! The layout is sized to the base image's natural pixels and places markers
//! at their raw percentages, so it does not depend on the on-screen zoom.

#[cfg(test)]
#[path = "print_test.rs"]
mod print_test;

use crate::editor::Editor;
use crate::render::{LegendEntry, MarkerView, legend, markers};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrintProjection {
    pub title: String,
    /// Base image, or `None` when there is nothing to print on.
    pub image_url: Option<String>,
    pub markers: Vec<MarkerView>,
    pub legend: Vec<LegendEntry>,
}

impl PrintProjection {
    /// Project the current event map (its stored placements and base map).
    /// Without one, the working placements on the active base map are used.
    #[must_use]
    pub fn build(editor: &Editor) -> Self {
        let catalog = editor.catalog();
        let config = editor.config();

        let (title, base_map, placements) = match editor.current_event_map() {
            Some(em) => (em.name.clone(), catalog.base_map(&em.base_map_id), em.placements.as_slice()),
            None => (config.print_title.clone(), editor.active_base_map(), editor.working().placements.as_slice()),
        };

        // Markers need an image to sit on.
        let markers = match base_map {
            Some(_) => markers(catalog, placements, &config.default_pin_color),
            None => Vec::new(),
        };
        Self {
            title,
            image_url: base_map.map(|m| m.image.as_url().to_owned()),
            markers,
            legend: legend(catalog),
        }
    }

    #[must_use]
    pub fn is_printable(&self) -> bool {
        self.image_url.is_some()
    }
}
