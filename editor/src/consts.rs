//! Shared constants for the editor crate.

// ── Storage ─────────────────────────────────────────────────────

/// IndexedDB database name used by the browser store.
pub const DB_NAME: &str = "event-map-builder";

/// Schema version of the browser database.
pub const DB_VERSION: u32 = 1;

// ── Coordinates ─────────────────────────────────────────────────

/// Upper bound of a placement percentage on either axis.
pub const PCT_MAX: f64 = 100.0;

// ── Zoom ────────────────────────────────────────────────────────

/// Default zoom factor (100%).
pub const DEFAULT_ZOOM: f64 = 1.0;

/// Smallest zoom factor the slider allows.
pub const ZOOM_MIN: f64 = 0.25;

/// Largest zoom factor the slider allows.
pub const ZOOM_MAX: f64 = 4.0;

// ── Presentation ────────────────────────────────────────────────

/// Pin color for markers whose POI has no icon and no matching category.
pub const DEFAULT_PIN_COLOR: &str = "#22c55e";

/// Swatch color shown next to a POI whose category is missing.
pub const MISSING_CATEGORY_SWATCH: &str = "#999999";

/// Marker label when the POI behind a placement cannot be resolved.
pub const FALLBACK_MARKER_LABEL: &str = "POI";

/// Placeholder shown for a missing category or base map name.
pub const MISSING_NAME: &str = "—";

/// Suffix appended to the name of a duplicated event map.
pub const COPY_SUFFIX: &str = " (copy)";

/// Print title used when no event map is loaded.
pub const DEFAULT_PRINT_TITLE: &str = "Event Map";
