//! Map toolbar: active base map, zoom, save, clear, print.
//!
//! SYSTEM CONTEXT
//! ==============
//! Controls here act on the working session (the active base map and the
//! placements on screen) rather than on one catalog list, so they stay visible
//! whichever side panel tab is open.

use editor::editor::Editor;
use leptos::prelude::*;

use crate::session::Session;
use crate::state::ui::UiState;
use crate::util::dialogs::{alert, confirm};
use crate::util::overlay::{zoom_from_percent, zoom_percent};

#[component]
pub fn Toolbar() -> impl IntoView {
    let session = expect_context::<Session>();
    let views = session.views;
    let choices = Memo::new(move |_| views.with(|v| v.view.base_map_options.clone()));
    let ui = session.ui;
    let disabled = move || !ui.with(UiState::is_ready);

    let zoom = move || {
        views
            .with(|v| v.view.canvas.as_ref().map(|c| c.zoom))
            .unwrap_or_else(|| ui.with(|u| u.zoom.default))
    };

    let on_base_map_change = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        session.dispatch(async move |ed: &mut Editor| {
            ed.select_base_map(Some(value.as_str()).filter(|v| !v.is_empty()))
        });
    };

    let on_zoom = move |ev: leptos::ev::Event| {
        let Some(factor) = zoom_from_percent(&event_target_value(&ev)) else {
            return;
        };
        session.dispatch(async move |ed: &mut Editor| Ok(ed.set_zoom(factor)));
    };

    let on_rebase = move |_| {
        session.dispatch(async |ed: &mut Editor| ed.rebase_current_event_map().await);
    };

    let on_save = move |_| {
        session.dispatch(async |ed: &mut Editor| {
            let actions = ed.save_current_event_map().await?;
            alert("Event map saved.");
            Ok(actions)
        });
    };

    let on_clear = move |_| {
        if views.with_untracked(|v| v.view.markers.is_empty()) {
            return;
        }
        if !confirm("Remove all placements from this map?") {
            return;
        }
        session.dispatch(async |ed: &mut Editor| ed.clear_placements().await);
    };

    let on_print = move |_| {
        if !views.with_untracked(|v| v.print.is_printable()) {
            alert("Select or create a base map first.");
            return;
        }
        #[cfg(feature = "csr")]
        {
            if let Some(window) = web_sys::window()
                && window.print().is_err()
            {
                log::warn!("print dialog could not be opened");
            }
        }
    };

    let options = move || {
        choices
            .get()
            .into_iter()
            .map(|o| {
                view! {
                    <option value=o.id selected=o.selected>
                        {o.label}
                    </option>
                }
            })
            .collect::<Vec<_>>()
    };

    view! {
        <div class="toolbar__group">
            <label class="toolbar__label">
                "Base map"
                <select class="toolbar__select" disabled=disabled on:change=on_base_map_change>
                    <option value="" selected=move || views.with(|v| v.view.base_map_options.iter().all(|o| !o.selected))>
                        "(none)"
                    </option>
                    {options}
                </select>
            </label>
            <button
                class="btn"
                disabled=disabled
                on:click=on_rebase
                title="Move the current event map onto the selected base map"
            >
                "Apply to event map"
            </button>
        </div>
        <span class="toolbar__divider" aria-hidden="true"></span>
        <div class="toolbar__group">
            <label class="toolbar__label">
                "Zoom"
                <input
                    class="toolbar__zoom"
                    type="range"
                    step="5"
                    min=move || ui.with(|u| (u.zoom.min * 100.0).round().to_string())
                    max=move || ui.with(|u| (u.zoom.max * 100.0).round().to_string())
                    prop:value=move || (zoom() * 100.0).round().to_string()
                    disabled=disabled
                    on:input=on_zoom
                />
            </label>
            <span class="toolbar__zoom-label">{move || zoom_percent(zoom())}</span>
        </div>
        <span class="toolbar__spacer"></span>
        <button class="btn btn--primary" disabled=disabled on:click=on_save>
            "Save"
        </button>
        <button class="btn" disabled=disabled on:click=on_clear>
            "Clear placements"
        </button>
        <button class="btn" disabled=disabled on:click=on_print title="Print or save as PDF">
            "Print"
        </button>
    }
}
