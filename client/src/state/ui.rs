//! Local UI chrome state (tabs, search, dialogs).
//!
//! DESIGN
//! ======
//! Keeps transient presentation concerns out of the editor so panels can
//! evolve independently of domain data.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

use editor::config::ZoomRange;
use editor::model::EntityId;
use serde::{Deserialize, Serialize};

/// Side panel tabs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    #[default]
    BaseMaps,
    Categories,
    Pois,
    EventMaps,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Self::BaseMaps, Self::Categories, Self::Pois, Self::EventMaps];

    pub fn label(self) -> &'static str {
        match self {
            Self::BaseMaps => "Base maps",
            Self::Categories => "Categories",
            Self::Pois => "POIs",
            Self::EventMaps => "Event maps",
        }
    }
}

/// Modal name prompt currently open.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Dialog {
    CreateEventMap,
    RenameEventMap { id: EntityId, current: String },
}

impl Dialog {
    pub fn title(&self) -> &'static str {
        match self {
            Self::CreateEventMap => "New event map",
            Self::RenameEventMap { .. } => "Rename event map",
        }
    }

    /// Text the name field starts with.
    pub fn initial_name(&self) -> &str {
        match self {
            Self::CreateEventMap => "",
            Self::RenameEventMap { current, .. } => current,
        }
    }
}

/// Startup progress of the editor session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LoadStatus {
    #[default]
    Loading,
    Ready,
    Failed(String),
}

#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub tab: Tab,
    /// Event map search text.
    pub event_map_filter: String,
    pub dialog: Option<Dialog>,
    pub status: LoadStatus,
    /// Zoom slider bounds, from the editor config.
    pub zoom: ZoomRange,
}

impl UiState {
    pub fn is_ready(&self) -> bool {
        self.status == LoadStatus::Ready
    }
}
