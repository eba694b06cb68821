//! Loaded collections and the in-memory working session.
//!
//! ARCHITECTURE
//! ============
//! `Catalog` mirrors what is in the store, one `Vec` per collection in load
//! order. It only changes after the corresponding storage write succeeded, so
//! it never runs ahead of persisted state. `WorkingState` is the editing
//! session: which base map and event map are active, the live placement list
//! (a detached copy until persisted) and the zoom factor.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use crate::consts::DEFAULT_ZOOM;
use crate::model::{BaseMap, Category, EntityId, EventMap, Placement, Poi};

/// Every record currently known to be in storage.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub base_maps: Vec<BaseMap>,
    pub categories: Vec<Category>,
    pub pois: Vec<Poi>,
    pub event_maps: Vec<EventMap>,
}

impl Catalog {
    #[must_use]
    pub fn base_map(&self, id: &str) -> Option<&BaseMap> {
        self.base_maps.iter().find(|m| m.id == id)
    }

    #[must_use]
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    #[must_use]
    pub fn category_named(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    #[must_use]
    pub fn poi(&self, id: &str) -> Option<&Poi> {
        self.pois.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn event_map(&self, id: &str) -> Option<&EventMap> {
        self.event_maps.iter().find(|e| e.id == id)
    }

    /// Category of a POI, if both exist.
    #[must_use]
    pub fn category_of(&self, poi: &Poi) -> Option<&Category> {
        self.category(&poi.category_id)
    }

    /// Replace the stored copy of an event map (matched by id).
    pub fn replace_event_map(&mut self, updated: EventMap) {
        if let Some(slot) = self.event_maps.iter_mut().find(|e| e.id == updated.id) {
            *slot = updated;
        }
    }

    /// The event map with the newest `updated_at`, if any.
    #[must_use]
    pub fn latest_event_map(&self) -> Option<&EventMap> {
        self.event_maps.iter().max_by_key(|e| e.updated_at)
    }
}

/// The editing session.
#[derive(Debug, Clone)]
pub struct WorkingState {
    pub active_base_map_id: Option<EntityId>,
    pub current_event_map_id: Option<EntityId>,
    pub placements: Vec<Placement>,
    pub zoom: f64,
}

impl Default for WorkingState {
    fn default() -> Self {
        Self { active_base_map_id: None, current_event_map_id: None, placements: Vec::new(), zoom: DEFAULT_ZOOM }
    }
}

impl WorkingState {
    #[must_use]
    pub fn placement(&self, id: &str) -> Option<&Placement> {
        self.placements.iter().find(|p| p.id == id)
    }

    pub fn placement_mut(&mut self, id: &str) -> Option<&mut Placement> {
        self.placements.iter_mut().find(|p| p.id == id)
    }

    /// Remove a placement by id, returning it with its former index.
    pub fn take_placement(&mut self, id: &str) -> Option<(usize, Placement)> {
        let index = self.placements.iter().position(|p| p.id == id)?;
        Some((index, self.placements.remove(index)))
    }

    /// Drop the current event map and its placements.
    pub fn clear_event_map(&mut self) {
        self.current_event_map_id = None;
        self.placements.clear();
    }

    #[must_use]
    pub fn is_current(&self, event_map_id: &str) -> bool {
        self.current_event_map_id.as_deref() == Some(event_map_id)
    }
}
