//! Event map editor core.
//!
//! Everything an event map builder does that does not touch the DOM lives here:
//! the data model, the persistence contract, the percentage coordinate
//! transform, the editing session and its operations, and the projections the
//! UI renders from. The browser layer (`client`) supplies an IndexedDB-backed
//! [`store::Store`], feeds pointer events into [`editor::Editor`], and redraws
//! whatever the returned [`editor::Action`]s name.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`editor`] | The `Editor` controller: every user-level operation |
//! | [`model`] | Base maps, categories, POIs, event maps, placements |
//! | [`store`] | Async persistence trait, batch writes, in-memory store |
//! | [`state`] | Loaded catalog and the working session |
//! | [`integrity`] | Dependents of an entity and the POI delete cascade |
//! | [`transform`] | Pointer ↔ percentage conversion under zoom |
//! | [`input`] | Marker drag gesture state machine |
//! | [`render`] | View models for every panel and the map markers |
//! | [`print`] | Print layout projection |
//! | [`config`] | Editor settings and JSON overrides |
//! | [`error`] | Error taxonomy and stable codes |
//! | [`clock`] | Timestamp source |
//! | [`color`] | Hex color parsing |
//! | [`consts`] | Shared constants (database name, zoom limits, fallbacks) |

pub mod clock;
pub mod color;
pub mod config;
pub mod consts;
pub mod editor;
pub mod error;
pub mod input;
pub mod integrity;
pub mod model;
pub mod print;
pub mod render;
pub mod state;
pub mod store;
pub mod transform;
