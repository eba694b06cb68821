//! Map overlay geometry and inline styles.
//!
//! The base image and its marker overlay sit inside one wrapper scaled with a
//! CSS transform, so markers are positioned in plain percentages and follow the
//! zoom for free. Pointer math goes through [`editor::transform::Viewport`].

#[cfg(test)]
#[path = "overlay_test.rs"]
mod overlay_test;

#[cfg(feature = "csr")]
use editor::editor::Editor;
#[cfg(feature = "csr")]
use editor::transform::{Point, Size, Viewport};

/// `DataTransfer` type carrying a dragged POI id.
pub const POI_DRAG_TYPE: &str = "text/plain";

/// Inline style placing a marker at percentage coordinates.
pub fn marker_style(x_pct: f64, y_pct: f64) -> String {
    format!("left: {x_pct}%; top: {y_pct}%;")
}

/// Inline style scaling the map wrapper.
pub fn zoom_style(zoom: f64) -> String {
    format!("transform: scale({zoom}); transform-origin: 0 0;")
}

/// Zoom factor as a slider/label percentage.
pub fn zoom_percent(zoom: f64) -> String {
    format!("{:.0}%", zoom * 100.0)
}

/// Slider position (percent) to zoom factor.
pub fn zoom_from_percent(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite()).map(|v| v / 100.0)
}

/// Current overlay geometry: on-screen origin plus its unscaled layout size.
#[cfg(feature = "csr")]
pub fn overlay_viewport(editor: &Editor, overlay: &web_sys::HtmlElement) -> Viewport {
    let rect = overlay.get_bounding_client_rect();
    editor.viewport(
        Point::new(rect.left(), rect.top()),
        Size::new(f64::from(overlay.offset_width()), f64::from(overlay.offset_height())),
    )
}

/// Pointer position of a mouse-family event in client coordinates.
#[cfg(feature = "csr")]
pub fn event_point(ev: &web_sys::MouseEvent) -> Point {
    Point::new(f64::from(ev.client_x()), f64::from(ev.client_y()))
}
