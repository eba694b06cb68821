//! The editor controller: every user-level operation on maps, categories,
//! POIs, event maps and markers.
//!
//! DESIGN
//! ======
//! `Editor` owns the catalog, the working session and the drag gesture. Each
//! operation validates, writes to the store, and only then commits the change
//! to the catalog, returning the [`Action`]s the host needs to process (which
//! views to re-render, which single marker to repaint). The host renders from
//! [`crate::render::render`] and never mutates editor state directly.
//!
//! ERROR HANDLING
//! ==============
//! A failed storage write leaves the catalog untouched. Operations that edit
//! the working placement list before persisting it (drop, delete marker,
//! clear, drag release) put the list back the way it was when the write fails,
//! so memory and storage never disagree after an error.

#[cfg(test)]
#[path = "editor_test.rs"]
mod editor_test;

use std::rc::Rc;

use crate::clock::Clock;
use crate::color::canonical_hex;
use crate::config::EditorConfig;
use crate::error::{EditorError, EditorResult, Precondition};
use crate::input::InputState;
use crate::integrity::{base_map_dependents, category_dependents, plan_poi_removal, poi_dependents};
use crate::model::{BaseMap, Category, EncodedImage, EntityId, EventMap, Placement, Poi, new_id};
use crate::state::{Catalog, WorkingState};
use crate::store::{Store, fetch_all, insert, remove, upsert};
use crate::transform::{Point, Size, Viewport, clamp_zoom};

/// A view the host renders from editor state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    BaseMaps,
    Categories,
    Pois,
    Legend,
    EventMaps,
    /// Base image and zoom transform.
    Canvas,
    Markers,
    Print,
}

impl Section {
    pub const ALL: [Section; 8] = [
        Self::BaseMaps,
        Self::Categories,
        Self::Pois,
        Self::Legend,
        Self::EventMaps,
        Self::Canvas,
        Self::Markers,
        Self::Print,
    ];
}

/// Actions returned from editor operations for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Rebuild one view from state.
    Render(Section),
    /// Repaint only this marker at its new position.
    MarkerMoved { id: EntityId, x_pct: f64, y_pct: f64 },
    /// Highlight a marker, or clear the highlight.
    MarkerSelected(Option<EntityId>),
}

fn render(sections: &[Section]) -> Vec<Action> {
    sections.iter().copied().map(Action::Render).collect()
}

fn clean_name(raw: &str, what: &str) -> EditorResult<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(EditorError::InvalidInput(format!("{what} name must not be empty")));
    }
    Ok(name.to_owned())
}

fn check_image(image: &EncodedImage, what: &str) -> EditorResult<()> {
    if image.is_image() {
        return Ok(());
    }
    let mime = image.mime().unwrap_or("unknown type");
    Err(EditorError::InvalidInput(format!("{what} must be an image, got {mime}")))
}

pub struct Editor {
    store: Rc<dyn Store>,
    clock: Rc<dyn Clock>,
    config: EditorConfig,
    catalog: Catalog,
    working: WorkingState,
    input: InputState,
}

impl Editor {
    /// An editor with nothing loaded yet.
    #[must_use]
    pub fn new(store: Rc<dyn Store>, clock: Rc<dyn Clock>, config: EditorConfig) -> Self {
        let working = WorkingState { zoom: config.zoom.default, ..WorkingState::default() };
        Self { store, clock, config, catalog: Catalog::default(), working, input: InputState::Idle }
    }

    /// Create an editor and load everything from the store.
    ///
    /// # Errors
    ///
    /// Returns a storage error if any collection fails to load.
    pub async fn open(store: Rc<dyn Store>, clock: Rc<dyn Clock>, config: EditorConfig) -> EditorResult<Self> {
        let mut editor = Self::new(store, clock, config);
        editor.reload().await?;
        Ok(editor)
    }

    /// Reload all collections, select the first base map, then load the most
    /// recently updated event map if there is one.
    ///
    /// # Errors
    ///
    /// Returns a storage error if any collection fails to load; the previous
    /// state is kept in that case.
    pub async fn reload(&mut self) -> EditorResult<Vec<Action>> {
        let store = Rc::clone(&self.store);
        let catalog = Catalog {
            base_maps: fetch_all(store.as_ref()).await?,
            categories: fetch_all(store.as_ref()).await?,
            pois: fetch_all(store.as_ref()).await?,
            event_maps: fetch_all(store.as_ref()).await?,
        };
        log::info!(
            "loaded {} base maps, {} categories, {} pois, {} event maps",
            catalog.base_maps.len(),
            catalog.categories.len(),
            catalog.pois.len(),
            catalog.event_maps.len()
        );

        self.catalog = catalog;
        self.working = WorkingState {
            active_base_map_id: self.catalog.base_maps.first().map(|m| m.id.clone()),
            zoom: self.working.zoom,
            ..WorkingState::default()
        };
        self.input = InputState::Idle;

        if let Some(latest) = self.catalog.latest_event_map().map(|e| e.id.clone()) {
            self.load_event_map(&latest)?;
        }
        Ok(render(&Section::ALL))
    }

    // --- Queries ---

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn working(&self) -> &WorkingState {
        &self.working
    }

    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    #[must_use]
    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// The active base map, if one is selected and still exists.
    #[must_use]
    pub fn active_base_map(&self) -> Option<&BaseMap> {
        self.working.active_base_map_id.as_deref().and_then(|id| self.catalog.base_map(id))
    }

    /// The stored copy of the current event map.
    #[must_use]
    pub fn current_event_map(&self) -> Option<&EventMap> {
        self.working.current_event_map_id.as_deref().and_then(|id| self.catalog.event_map(id))
    }

    /// Overlay geometry at the current zoom.
    #[must_use]
    pub fn viewport(&self, origin: Point, unscaled: Size) -> Viewport {
        Viewport::new(origin, unscaled, self.working.zoom)
    }

    // --- Base maps ---

    /// Store a new base map and make it the active one.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a blank name or a non-image upload; storage errors
    /// from the write.
    pub async fn create_base_map(&mut self, name: &str, image: EncodedImage) -> EditorResult<(EntityId, Vec<Action>)> {
        check_image(&image, "base map")?;
        let record = BaseMap { id: new_id(), name: clean_name(name, "base map")?, image, created_at: self.clock.now_ms() };
        insert(self.store.as_ref(), &record).await?;

        let id = record.id.clone();
        log::info!("base map created: {:?} ({id})", record.name);
        self.catalog.base_maps.push(record);
        self.working.active_base_map_id = Some(id.clone());
        Ok((id, render(&[Section::BaseMaps, Section::Canvas, Section::Markers, Section::Print])))
    }

    /// Delete a base map no event map refers to.
    ///
    /// # Errors
    ///
    /// `BaseMapInUse` when referenced, `NotFound`, or a storage error.
    pub async fn delete_base_map(&mut self, id: &str) -> EditorResult<Vec<Action>> {
        let Some(map) = self.catalog.base_map(id) else {
            return Err(EditorError::not_found("base map", id));
        };
        let users = base_map_dependents(&self.catalog, id);
        if users > 0 {
            log::warn!("refusing to delete base map {id}: used by {users} event maps");
            return Err(EditorError::BaseMapInUse { id: id.to_owned(), name: map.name.clone(), event_maps: users });
        }

        remove::<BaseMap>(self.store.as_ref(), id).await?;
        self.catalog.base_maps.retain(|m| m.id != id);
        if self.working.active_base_map_id.as_deref() == Some(id) {
            self.working.active_base_map_id = self.catalog.base_maps.first().map(|m| m.id.clone());
        }
        log::info!("base map deleted: {id}");
        Ok(render(&[Section::BaseMaps, Section::Canvas, Section::Markers, Section::Print]))
    }

    /// Change the active base map. The current event map keeps its own base
    /// map; see [`Self::rebase_current_event_map`].
    ///
    /// # Errors
    ///
    /// `NotFound` if `id` names no base map.
    pub fn select_base_map(&mut self, id: Option<&str>) -> EditorResult<Vec<Action>> {
        if let Some(missing) = id.filter(|id| self.catalog.base_map(id).is_none()) {
            return Err(EditorError::not_found("base map", missing));
        }
        self.working.active_base_map_id = id.map(str::to_owned);
        Ok(render(&[Section::BaseMaps, Section::Canvas, Section::Markers, Section::Print]))
    }

    /// Point the current event map at the active base map.
    ///
    /// # Errors
    ///
    /// `PreconditionMissing` without a current event map or active base map,
    /// or a storage error.
    pub async fn rebase_current_event_map(&mut self) -> EditorResult<Vec<Action>> {
        let Some(current) = self.current_event_map() else {
            return Err(EditorError::PreconditionMissing(Precondition::CurrentEventMap));
        };
        let Some(base_map_id) = self.working.active_base_map_id.clone() else {
            return Err(EditorError::PreconditionMissing(Precondition::ActiveBaseMap));
        };
        let mut next = current.clone();
        next.base_map_id = base_map_id;
        next.touch(self.clock.now_ms());

        upsert(self.store.as_ref(), &next).await?;
        log::info!("event map {} moved to base map {}", next.id, next.base_map_id);
        self.catalog.replace_event_map(next);
        Ok(render(&[Section::EventMaps, Section::Canvas, Section::Markers, Section::Print]))
    }

    // --- Categories ---

    /// # Errors
    ///
    /// `InvalidInput` for a blank or duplicate name or a malformed color;
    /// storage errors from the write.
    pub async fn create_category(&mut self, name: &str, color: &str) -> EditorResult<(EntityId, Vec<Action>)> {
        let name = clean_name(name, "category")?;
        let Some(color) = canonical_hex(color) else {
            return Err(EditorError::InvalidInput(format!("not a hex color: {color}")));
        };
        if self.catalog.category_named(&name).is_some() {
            return Err(EditorError::InvalidInput(format!("category {name:?} already exists")));
        }

        let record = Category { id: new_id(), name, color };
        insert(self.store.as_ref(), &record).await?;
        let id = record.id.clone();
        log::info!("category created: {:?} ({id})", record.name);
        self.catalog.categories.push(record);
        Ok((id, render(&[Section::Categories, Section::Pois, Section::Legend])))
    }

    /// Delete a category no POI refers to.
    ///
    /// # Errors
    ///
    /// `CategoryInUse` when referenced, `NotFound`, or a storage error.
    pub async fn delete_category(&mut self, id: &str) -> EditorResult<Vec<Action>> {
        let Some(category) = self.catalog.category(id) else {
            return Err(EditorError::not_found("category", id));
        };
        let pois = category_dependents(&self.catalog, id);
        if pois > 0 {
            log::warn!("refusing to delete category {id}: used by {pois} pois");
            return Err(EditorError::CategoryInUse { id: id.to_owned(), name: category.name.clone(), pois });
        }

        remove::<Category>(self.store.as_ref(), id).await?;
        self.catalog.categories.retain(|c| c.id != id);
        log::info!("category deleted: {id}");
        Ok(render(&[Section::Categories, Section::Pois, Section::Legend]))
    }

    // --- POIs ---

    /// # Errors
    ///
    /// `InvalidInput` for a blank name or a non-image icon, `NotFound` for an
    /// unknown category, storage errors from the write.
    pub async fn create_poi(
        &mut self,
        name: &str,
        category_id: &str,
        icon: Option<EncodedImage>,
    ) -> EditorResult<(EntityId, Vec<Action>)> {
        let name = clean_name(name, "point of interest")?;
        if let Some(icon) = &icon {
            check_image(icon, "icon")?;
        }
        if self.catalog.category(category_id).is_none() {
            return Err(EditorError::not_found("category", category_id));
        }

        let record = Poi { id: new_id(), name, category_id: category_id.to_owned(), icon };
        insert(self.store.as_ref(), &record).await?;
        let id = record.id.clone();
        log::info!("poi created: {:?} ({id})", record.name);
        self.catalog.pois.push(record);
        Ok((id, render(&[Section::Pois, Section::Legend])))
    }

    /// Delete a POI. If it is placed anywhere, the caller must confirm first;
    /// the confirmed delete removes every placement of it in one atomic write.
    ///
    /// # Errors
    ///
    /// `ConfirmationRequired` when placed and `confirmed` is false,
    /// `NotFound`, or a storage error (nothing changes in that case).
    pub async fn delete_poi(&mut self, id: &str, confirmed: bool) -> EditorResult<Vec<Action>> {
        let Some(poi) = self.catalog.poi(id).cloned() else {
            return Err(EditorError::not_found("point of interest", id));
        };
        let deps = poi_dependents(&self.catalog, &self.working, id);
        if !deps.is_empty() && !confirmed {
            return Err(EditorError::ConfirmationRequired { id: poi.id, name: poi.name, placements: deps.total() });
        }

        let plan = plan_poi_removal(&self.catalog, &poi, self.clock.now_ms())?;
        self.store.commit(plan.batch).await?;

        for em in plan.updated {
            self.catalog.replace_event_map(em);
        }
        self.catalog.pois.retain(|p| p.id != id);
        self.working.placements.retain(|p| p.poi_id != id);
        let drag_lost = self.input.dragging().is_some_and(|d| self.working.placement(d).is_none());
        if drag_lost {
            self.input = InputState::Idle;
        }
        log::info!("poi deleted: {id} ({} placements, {} event maps)", deps.total(), deps.event_maps.len());
        Ok(render(&[Section::Pois, Section::Legend, Section::Markers, Section::EventMaps, Section::Print]))
    }

    // --- Event maps ---

    /// Start a new, empty event map on the active base map and make it current.
    ///
    /// # Errors
    ///
    /// `PreconditionMissing` without an active base map, `InvalidInput` for a
    /// blank name, storage errors from the write.
    pub async fn create_event_map(&mut self, name: &str) -> EditorResult<(EntityId, Vec<Action>)> {
        let Some(base_map_id) = self.working.active_base_map_id.clone() else {
            return Err(EditorError::PreconditionMissing(Precondition::ActiveBaseMap));
        };
        let name = clean_name(name, "event map")?;
        let now = self.clock.now_ms();
        let record =
            EventMap { id: new_id(), name, base_map_id, placements: Vec::new(), created_at: now, updated_at: now };

        insert(self.store.as_ref(), &record).await?;
        let id = record.id.clone();
        log::info!("event map created: {:?} ({id})", record.name);
        self.catalog.event_maps.push(record);
        self.working.current_event_map_id = Some(id.clone());
        self.working.placements.clear();
        self.input = InputState::Idle;
        Ok((id, render(&[Section::Markers, Section::EventMaps, Section::Print])))
    }

    /// Make an event map current, replacing the working placements with a copy
    /// of its stored ones.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown id.
    pub fn load_event_map(&mut self, id: &str) -> EditorResult<Vec<Action>> {
        let Some(em) = self.catalog.event_map(id) else {
            return Err(EditorError::not_found("event map", id));
        };
        self.working.current_event_map_id = Some(em.id.clone());
        self.working.active_base_map_id = Some(em.base_map_id.clone());
        self.working.placements = em.placements.clone();
        self.input = InputState::Idle;
        log::info!("event map loaded: {id} ({} placements)", self.working.placements.len());
        Ok(render(&[Section::BaseMaps, Section::Canvas, Section::Markers, Section::EventMaps, Section::Print]))
    }

    /// # Errors
    ///
    /// `InvalidInput` for a blank name, `NotFound`, or a storage error.
    pub async fn rename_event_map(&mut self, id: &str, new_name: &str) -> EditorResult<Vec<Action>> {
        let name = clean_name(new_name, "event map")?;
        let Some(mut next) = self.catalog.event_map(id).cloned() else {
            return Err(EditorError::not_found("event map", id));
        };
        next.name = name;
        next.touch(self.clock.now_ms());

        upsert(self.store.as_ref(), &next).await?;
        self.catalog.replace_event_map(next);
        Ok(render(&[Section::EventMaps, Section::Print]))
    }

    /// Copy an event map under a new id with a suffixed name.
    ///
    /// # Errors
    ///
    /// `NotFound`, or a storage error.
    pub async fn duplicate_event_map(&mut self, id: &str) -> EditorResult<(EntityId, Vec<Action>)> {
        let Some(source) = self.catalog.event_map(id).cloned() else {
            return Err(EditorError::not_found("event map", id));
        };
        let now = self.clock.now_ms();
        let copy = EventMap {
            id: new_id(),
            name: format!("{}{}", source.name, self.config.copy_suffix),
            created_at: now,
            updated_at: now,
            ..source
        };

        insert(self.store.as_ref(), &copy).await?;
        let new_id = copy.id.clone();
        log::info!("event map {id} duplicated as {new_id}");
        self.catalog.event_maps.push(copy);
        Ok((new_id, render(&[Section::EventMaps])))
    }

    /// Delete an event map; if it was current, the working session is cleared.
    ///
    /// # Errors
    ///
    /// `NotFound`, or a storage error.
    pub async fn delete_event_map(&mut self, id: &str) -> EditorResult<Vec<Action>> {
        if self.catalog.event_map(id).is_none() {
            return Err(EditorError::not_found("event map", id));
        }
        remove::<EventMap>(self.store.as_ref(), id).await?;
        self.catalog.event_maps.retain(|e| e.id != id);
        if self.working.is_current(id) {
            self.working.clear_event_map();
            self.input = InputState::Idle;
        }
        log::info!("event map deleted: {id}");
        Ok(render(&[Section::EventMaps, Section::Markers, Section::Print]))
    }

    /// Write a copy of the working placements to the current event map.
    /// Does nothing when no event map is current.
    ///
    /// # Errors
    ///
    /// Storage errors from the write; the stored copy is unchanged then.
    pub async fn persist_current_event_map_placements(&mut self) -> EditorResult<Vec<Action>> {
        let Some(stored) = self.current_event_map() else {
            return Ok(Vec::new());
        };
        let mut next = stored.clone();
        next.placements = self.working.placements.clone();
        next.touch(self.clock.now_ms());

        if let Err(err) = upsert(self.store.as_ref(), &next).await {
            log::warn!("saving placements of event map {} failed: {err}", next.id);
            return Err(err.into());
        }
        self.catalog.replace_event_map(next);
        Ok(render(&[Section::EventMaps]))
    }

    /// Explicit save of the current event map.
    ///
    /// # Errors
    ///
    /// `PreconditionMissing` when nothing is current, or a storage error.
    pub async fn save_current_event_map(&mut self) -> EditorResult<Vec<Action>> {
        if self.current_event_map().is_none() {
            return Err(EditorError::PreconditionMissing(Precondition::CurrentEventMap));
        }
        self.persist_current_event_map_placements().await
    }

    /// Remove every working placement, persisting if an event map is current.
    ///
    /// # Errors
    ///
    /// A storage error; the placements are restored in that case.
    pub async fn clear_placements(&mut self) -> EditorResult<Vec<Action>> {
        if self.working.placements.is_empty() {
            return Ok(Vec::new());
        }
        let previous = std::mem::take(&mut self.working.placements);
        self.input = InputState::Idle;
        let mut actions = self.persist_or_restore(previous).await?;
        actions.extend(render(&[Section::Markers, Section::Print]));
        Ok(actions)
    }

    async fn persist_or_restore(&mut self, previous: Vec<Placement>) -> EditorResult<Vec<Action>> {
        match self.persist_current_event_map_placements().await {
            Ok(actions) => Ok(actions),
            Err(err) => {
                self.working.placements = previous;
                Err(err)
            }
        }
    }

    // --- Zoom ---

    /// Set the zoom factor, clamped to the configured range. Placement
    /// percentages are unaffected.
    pub fn set_zoom(&mut self, factor: f64) -> Vec<Action> {
        let range = self.config.zoom;
        self.working.zoom = clamp_zoom(factor, range.min, range.max, range.default);
        render(&[Section::Canvas])
    }

    // --- Marker interaction ---

    /// Pointer pressed on a marker: start dragging it.
    pub fn on_marker_pointer_down(&mut self, placement_id: &str, pointer: Point) -> Vec<Action> {
        let Some(p) = self.working.placement(placement_id) else {
            return Vec::new();
        };
        self.input = InputState::Dragging {
            placement_id: p.id.clone(),
            last: pointer,
            orig_x_pct: p.x_pct,
            orig_y_pct: p.y_pct,
        };
        vec![Action::MarkerSelected(Some(placement_id.to_owned()))]
    }

    /// Pointer moved: shift the dragged marker by the pointer delta.
    pub fn on_pointer_move(&mut self, pointer: Point, viewport: &Viewport) -> Vec<Action> {
        let Some(delta) = self.input.advance(pointer) else {
            return Vec::new();
        };
        let Some(id) = self.input.dragging().map(str::to_owned) else {
            return Vec::new();
        };
        let Some(placement) = self.working.placement_mut(&id) else {
            self.input = InputState::Idle;
            return Vec::new();
        };
        let Some((x, y)) = viewport.drag_pct(placement.x_pct, placement.y_pct, delta) else {
            return Vec::new();
        };
        placement.move_to(x, y);
        vec![Action::MarkerMoved { id, x_pct: placement.x_pct, y_pct: placement.y_pct }]
    }

    /// Pointer released: finish the drag and persist the new position.
    ///
    /// # Errors
    ///
    /// A storage error; the marker returns to where the drag started.
    pub async fn on_pointer_up(&mut self) -> EditorResult<Vec<Action>> {
        let InputState::Dragging { placement_id, orig_x_pct, orig_y_pct, .. } = std::mem::take(&mut self.input) else {
            return Ok(Vec::new());
        };
        let mut actions = vec![Action::MarkerSelected(None)];
        match self.persist_current_event_map_placements().await {
            Ok(more) => actions.extend(more),
            Err(err) => {
                if let Some(p) = self.working.placement_mut(&placement_id) {
                    p.move_to(orig_x_pct, orig_y_pct);
                }
                return Err(err);
            }
        }
        actions.push(Action::Render(Section::Print));
        Ok(actions)
    }

    /// Double activation on a marker deletes its placement.
    ///
    /// # Errors
    ///
    /// A storage error; the placement is restored in that case.
    pub async fn on_marker_double_click(&mut self, placement_id: &str) -> EditorResult<Vec<Action>> {
        if self.input.dragging() == Some(placement_id) {
            self.input = InputState::Idle;
        }
        let previous = self.working.placements.clone();
        if self.working.take_placement(placement_id).is_none() {
            return Ok(Vec::new());
        }
        let mut actions = self.persist_or_restore(previous).await?;
        actions.extend(render(&[Section::Markers, Section::Print]));
        Ok(actions)
    }

    /// A POI was dropped on the map: place it under the pointer.
    ///
    /// Does nothing while the overlay has no size yet.
    ///
    /// # Errors
    ///
    /// `PreconditionMissing` without an active base map, `NotFound` for an
    /// unknown POI, or a storage error (the drop is undone then).
    pub async fn on_poi_drop(&mut self, poi_id: &str, pointer: Point, viewport: &Viewport) -> EditorResult<Vec<Action>> {
        if self.working.active_base_map_id.is_none() {
            return Err(EditorError::PreconditionMissing(Precondition::ActiveBaseMap));
        }
        if self.catalog.poi(poi_id).is_none() {
            return Err(EditorError::not_found("point of interest", poi_id));
        }
        let Some((x, y)) = viewport.pointer_to_pct(pointer) else {
            log::debug!("drop ignored: overlay has no size yet");
            return Ok(Vec::new());
        };

        let previous = self.working.placements.clone();
        self.working.placements.push(Placement::new(poi_id, x, y));
        let mut actions = self.persist_or_restore(previous).await?;
        actions.extend(render(&[Section::Markers, Section::Print]));
        Ok(actions)
    }
}
