//! # client
//!
//! Leptos + WASM frontend for the event map builder.
//!
//! This crate contains the root app, the tabbed side panels, the zoomable map
//! canvas with draggable markers, the print layout, and the IndexedDB-backed
//! [`editor::store::Store`]. All domain behavior lives in the `editor` crate;
//! components only translate DOM events into editor operations through
//! [`session::Session`] and draw the view models it publishes.

pub mod app;
pub mod components;
pub mod session;
pub mod state;
pub mod storage;
pub mod util;

/// WASM entry point: install logging and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_err() {
        leptos::logging::warn!("console logger already installed");
    }
    leptos::mount::mount_to_body(app::App);
}
