//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns from component logic
//! to improve reuse and testability.

pub mod config;
pub mod dialogs;
pub mod image_file;
pub mod overlay;
pub mod ui_persistence;
