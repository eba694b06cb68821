//! Editor settings from `localStorage`.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use editor::config::{ConfigOverrides, EditorConfig};

use crate::util::ui_persistence::load_raw;

/// `localStorage` key holding optional settings overrides as JSON.
pub const CONFIG_KEY: &str = "event_map_builder_config";

/// Settings from an optional overrides document. Anything unreadable falls
/// back to the defaults with a warning.
pub fn resolve_config(raw: Option<&str>) -> EditorConfig {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return EditorConfig::default();
    };
    match ConfigOverrides::from_json(raw).and_then(EditorConfig::with_overrides) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("ignoring {CONFIG_KEY}: {err}");
            EditorConfig::default()
        }
    }
}

/// Settings for this browser.
pub fn load_config() -> EditorConfig {
    resolve_config(load_raw(CONFIG_KEY).as_deref())
}
