//! Reactive application state.
//!
//! SYSTEM CONTEXT
//! ==============
//! `ui` holds presentation-only state (tabs, search text, open dialog);
//! `view` holds the view models last projected from the editor. Both are
//! plain data provided to components as `RwSignal`s.

pub mod ui;
pub mod view;
