//! Referential integrity: who depends on an entity, and what deleting it takes.
//!
//! Deletes run in two steps. First the dependents are computed from the
//! catalog and the working session; guards refuse the delete outright, while a
//! POI delete only asks for confirmation. Then [`plan_poi_removal`] builds one
//! atomic batch covering every affected event map plus the POI itself, so the
//! cascade either lands completely or not at all.

#[cfg(test)]
#[path = "integrity_test.rs"]
mod integrity_test;

use crate::model::{EntityId, EventMap, Poi};
use crate::state::{Catalog, WorkingState};
use crate::store::{StorageError, WriteOp};

/// Placements that would disappear with a POI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoiDependents {
    /// Matching placements in the working list.
    pub working: usize,
    /// Matching placements in stored event maps other than the current one,
    /// whose placements are already counted through the working list.
    pub stored: usize,
    /// Ids of stored event maps holding at least one matching placement.
    pub event_maps: Vec<EntityId>,
}

impl PoiDependents {
    #[must_use]
    pub fn total(&self) -> usize {
        self.working + self.stored
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Number of POIs filed under a category.
#[must_use]
pub fn category_dependents(catalog: &Catalog, category_id: &str) -> usize {
    catalog.pois.iter().filter(|p| p.category_id == category_id).count()
}

/// Number of event maps drawn on a base map.
#[must_use]
pub fn base_map_dependents(catalog: &Catalog, base_map_id: &str) -> usize {
    catalog.event_maps.iter().filter(|e| e.base_map_id == base_map_id).count()
}

#[must_use]
pub fn poi_dependents(catalog: &Catalog, working: &WorkingState, poi_id: &str) -> PoiDependents {
    let mut deps = PoiDependents {
        working: working.placements.iter().filter(|p| p.poi_id == poi_id).count(),
        ..PoiDependents::default()
    };
    for em in &catalog.event_maps {
        let hits = em.placements.iter().filter(|p| p.poi_id == poi_id).count();
        if hits == 0 {
            continue;
        }
        if !working.is_current(&em.id) {
            deps.stored += hits;
        }
        deps.event_maps.push(em.id.clone());
    }
    deps
}

/// The writes that remove a POI and every stored placement of it.
#[derive(Debug, Clone)]
pub struct PoiRemoval {
    /// Event maps with the POI's placements removed and `updated_at` advanced.
    pub updated: Vec<EventMap>,
    /// The batch to commit: one put per updated event map, then the POI delete.
    pub batch: Vec<WriteOp>,
}

/// Build the cascade for deleting `poi`.
///
/// # Errors
///
/// Returns a serialization error if an event map cannot be encoded.
pub fn plan_poi_removal(catalog: &Catalog, poi: &Poi, now: i64) -> Result<PoiRemoval, StorageError> {
    let mut updated = Vec::new();
    let mut batch = Vec::new();
    for em in catalog.event_maps.iter().filter(|e| e.references_poi(&poi.id)) {
        let mut next = em.clone();
        next.remove_poi(&poi.id);
        next.touch(now);
        batch.push(WriteOp::put(&next)?);
        updated.push(next);
    }
    batch.push(WriteOp::delete::<Poi>(&poi.id));
    Ok(PoiRemoval { updated, batch })
}
