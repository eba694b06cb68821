//! Pointer ↔ percentage coordinate transform for the zoomable map overlay.
//!
//! Placements are stored as percentages of the base image's natural size. The
//! overlay is laid out at that natural size and then scaled by the zoom factor,
//! so on screen it covers `unscaled × zoom` pixels starting at `origin`. Pixel
//! positions are always derived from percentages here, never stored.

#[cfg(test)]
#[path = "transform_test.rs"]
mod transform_test;

use crate::consts::PCT_MAX;
use crate::model::clamp_pct;

/// A point in screen (CSS pixel) or overlay-local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - other`.
    #[must_use]
    pub fn delta_from(self, other: Point) -> Point {
        Point { x: self.x - other.x, y: self.y - other.y }
    }
}

/// A width/height pair in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether either side is zero, negative, or not a number.
    #[must_use]
    pub fn is_degenerate(self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Overlay geometry at the time of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Screen position of the overlay's top-left corner.
    pub origin: Point,
    /// Overlay size before the zoom transform (the image's natural size).
    pub unscaled: Size,
    /// Zoom factor, `1.0` = 100%.
    pub zoom: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(origin: Point, unscaled: Size, zoom: f64) -> Self {
        Self { origin, unscaled, zoom }
    }

    /// On-screen size of the overlay.
    #[must_use]
    pub fn scaled(&self) -> Size {
        Size { width: self.unscaled.width * self.zoom, height: self.unscaled.height * self.zoom }
    }

    /// Map a screen-space pointer position to clamped percentages.
    ///
    /// `None` while the overlay has no on-screen size (image not laid out yet).
    #[must_use]
    pub fn pointer_to_pct(&self, pointer: Point) -> Option<(f64, f64)> {
        let scaled = self.scaled();
        if scaled.is_degenerate() {
            return None;
        }
        let local = pointer.delta_from(self.origin);
        Some((
            clamp_pct(local.x / scaled.width * PCT_MAX),
            clamp_pct(local.y / scaled.height * PCT_MAX),
        ))
    }

    /// Overlay-local pixel position of a percentage coordinate.
    #[must_use]
    pub fn pct_to_local(&self, x_pct: f64, y_pct: f64) -> Option<Point> {
        let scaled = self.scaled();
        if scaled.is_degenerate() {
            return None;
        }
        Some(Point { x: x_pct / PCT_MAX * scaled.width, y: y_pct / PCT_MAX * scaled.height })
    }

    /// Screen position of a percentage coordinate.
    #[must_use]
    pub fn pct_to_screen(&self, x_pct: f64, y_pct: f64) -> Option<Point> {
        let local = self.pct_to_local(x_pct, y_pct)?;
        Some(Point { x: local.x + self.origin.x, y: local.y + self.origin.y })
    }

    /// Shift a percentage coordinate by a screen-space pointer delta.
    ///
    /// The pixel position is clamped to the overlay before converting back, so
    /// the result always lies in `[0, 100]` on both axes.
    #[must_use]
    pub fn drag_pct(&self, x_pct: f64, y_pct: f64, delta: Point) -> Option<(f64, f64)> {
        let scaled = self.scaled();
        let current = self.pct_to_local(x_pct, y_pct)?;
        let x = (current.x + delta.x).clamp(0.0, scaled.width);
        let y = (current.y + delta.y).clamp(0.0, scaled.height);
        Some((clamp_pct(x / scaled.width * PCT_MAX), clamp_pct(y / scaled.height * PCT_MAX)))
    }
}

/// Clamp a requested zoom factor into `[min, max]`. Non-finite or
/// non-positive requests fall back to `fallback`.
#[must_use]
pub fn clamp_zoom(requested: f64, min: f64, max: f64, fallback: f64) -> f64 {
    if !requested.is_finite() || requested <= 0.0 {
        return fallback;
    }
    requested.clamp(min, max)
}
