//! Blocking browser prompts (`alert` / `confirm`) and the text they show.

#[cfg(test)]
#[path = "dialogs_test.rs"]
mod dialogs_test;

use editor::error::{EditorError, ErrorCode, ErrorKind};

/// Message shown to the user for a failed operation.
pub fn error_message(err: &EditorError) -> String {
    match err.kind() {
        ErrorKind::Storage => format!("Could not save your changes: {err}"),
        ErrorKind::NotFound => format!("{err}. It may have been deleted in another tab."),
        _ => err.to_string(),
    }
}

/// Report a failed operation.
pub fn report(err: &EditorError) {
    log::warn!("{}: {err}", err.error_code());
    alert(&error_message(err));
}

pub fn alert(message: &str) {
    #[cfg(feature = "csr")]
    {
        if let Some(window) = web_sys::window() {
            if window.alert_with_message(message).is_err() {
                log::warn!("alert failed: {message}");
            }
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        log::info!("{message}");
    }
}

/// Ask a yes/no question. Declines when no window is available.
pub fn confirm(message: &str) -> bool {
    #[cfg(feature = "csr")]
    {
        web_sys::window().is_some_and(|w| w.confirm_with_message(message).unwrap_or(false))
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = message;
        false
    }
}
