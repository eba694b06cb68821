//! Data model: base maps, categories, POIs, event maps and their placements.
//!
//! These are the records the persistence layer stores, one collection per
//! entity kind. `Placement` never stands alone; it only exists inside an
//! `EventMap` or the editor's working list. All coordinates are percentages of
//! the base image's natural size so they survive zoom changes and reloads.
//!
//! Records serialize with camelCase keys (`baseMapId`, `xPct`, ...), which is
//! also the shape the browser database indexes on.

#[cfg(test)]
#[path = "model_test.rs"]
mod model_test;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::PCT_MAX;
use crate::store::{Collection, Entity};

/// Opaque, client-generated identifier.
pub type EntityId = String;

/// Generate a fresh identifier.
#[must_use]
pub fn new_id() -> EntityId {
    Uuid::new_v4().to_string()
}

/// Clamp a percentage to `[0, 100]`. NaN collapses to `0`.
#[must_use]
pub fn clamp_pct(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, PCT_MAX) }
}

/// Binary image data carried as a self-describing `data:` URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncodedImage(String);

impl EncodedImage {
    /// Encode raw bytes with their MIME type.
    #[must_use]
    pub fn from_bytes(mime: &str, bytes: &[u8]) -> Self {
        Self(format!("data:{mime};base64,{}", STANDARD.encode(bytes)))
    }

    /// The `data:` URL, usable directly as an image source.
    #[must_use]
    pub fn as_url(&self) -> &str {
        &self.0
    }

    /// MIME type declared in the URL header, if any.
    #[must_use]
    pub fn mime(&self) -> Option<&str> {
        let header = self.0.strip_prefix("data:")?.split(',').next()?;
        let mime = header.split(';').next()?;
        if mime.is_empty() { None } else { Some(mime) }
    }

    /// Whether the declared MIME type is an `image/*` type.
    #[must_use]
    pub fn is_image(&self) -> bool {
        self.mime().is_some_and(|m| m.to_ascii_lowercase().starts_with("image/"))
    }
}

/// An uploaded floor-plan image used as a canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseMap {
    pub id: EntityId,
    pub name: String,
    pub image: EncodedImage,
    /// Creation time in epoch milliseconds.
    pub created_at: i64,
}

/// A named color grouping for POIs. Names are unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: EntityId,
    pub name: String,
    /// Canonical lowercase `#rrggbb`.
    pub color: String,
}

/// A reusable point-of-interest template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Poi {
    pub id: EntityId,
    pub name: String,
    pub category_id: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<EncodedImage>,
}

/// One POI positioned on a base map, in percent of the natural image size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub id: EntityId,
    pub poi_id: EntityId,
    pub x_pct: f64,
    pub y_pct: f64,
}

impl Placement {
    /// Create a placement with a fresh id and clamped coordinates.
    #[must_use]
    pub fn new(poi_id: impl Into<EntityId>, x_pct: f64, y_pct: f64) -> Self {
        Self { id: new_id(), poi_id: poi_id.into(), x_pct: clamp_pct(x_pct), y_pct: clamp_pct(y_pct) }
    }

    /// Move to a new position, clamping both axes.
    pub fn move_to(&mut self, x_pct: f64, y_pct: f64) {
        self.x_pct = clamp_pct(x_pct);
        self.y_pct = clamp_pct(y_pct);
    }
}

/// A saved configuration of placements on one base map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventMap {
    pub id: EntityId,
    pub name: String,
    pub base_map_id: EntityId,
    #[serde(default)]
    pub placements: Vec<Placement>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl EventMap {
    /// Mark as modified at `now`. The stamp always moves forward, even when the
    /// clock has not advanced since the previous modification.
    pub fn touch(&mut self, now: i64) {
        self.updated_at = now.max(self.updated_at + 1);
    }

    /// Whether any placement references `poi_id`.
    #[must_use]
    pub fn references_poi(&self, poi_id: &str) -> bool {
        self.placements.iter().any(|p| p.poi_id == poi_id)
    }

    /// Drop every placement that references `poi_id`, returning how many were removed.
    pub fn remove_poi(&mut self, poi_id: &str) -> usize {
        let before = self.placements.len();
        self.placements.retain(|p| p.poi_id != poi_id);
        before - self.placements.len()
    }
}

impl Entity for BaseMap {
    const COLLECTION: Collection = Collection::BaseMaps;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for Category {
    const COLLECTION: Collection = Collection::Categories;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for Poi {
    const COLLECTION: Collection = Collection::Pois;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for EventMap {
    const COLLECTION: Collection = Collection::EventMaps;

    fn id(&self) -> &str {
        &self.id
    }
}
