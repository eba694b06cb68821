//! Zoomable base map with its placement overlay.
//!
//! ARCHITECTURE
//! ============
//! The image and overlay share one wrapper scaled by a CSS transform. Markers
//! sit at percentage offsets inside the overlay, so zooming never touches
//! placement data. Pointer positions are converted back to percentages through
//! the overlay's on-screen rect and unscaled layout size.
//!
//! Drags use pointer capture on the marker element. Markers are keyed so a drag
//! patches the marker's style in place instead of replacing the captured node.

use editor::editor::Editor;
use editor::render::{Glyph, MarkerView};
use leptos::prelude::*;

use crate::session::Session;
use crate::util::overlay::{marker_style, zoom_style};

#[component]
pub fn MapCanvas() -> impl IntoView {
    let session = expect_context::<Session>();
    let views = session.views;
    let overlay = NodeRef::<leptos::html::Div>::new();

    let has_canvas = move || views.with(|v| v.view.canvas.is_some());
    let image_url = move || views.with(|v| v.view.canvas.as_ref().map(|c| c.image_url.clone()).unwrap_or_default());
    let zoom = move || views.with(|v| v.view.canvas.as_ref().map_or(1.0, |c| c.zoom));

    let on_dragover = move |ev: leptos::ev::DragEvent| {
        ev.prevent_default();
        #[cfg(feature = "csr")]
        {
            if let Some(dt) = ev.data_transfer() {
                dt.set_drop_effect("copy");
            }
        }
    };

    let on_drop = move |ev: leptos::ev::DragEvent| {
        ev.prevent_default();
        #[cfg(feature = "csr")]
        {
            use editor::transform::{Point, Size};

            use crate::util::overlay::{POI_DRAG_TYPE, event_point, overlay_viewport};

            let Some(poi_id) = ev
                .data_transfer()
                .and_then(|dt| dt.get_data(POI_DRAG_TYPE).ok())
                .filter(|id| !id.is_empty())
            else {
                return;
            };
            let point = event_point(&ev);
            let el = overlay.get_untracked();
            session.dispatch(async move |ed: &mut Editor| {
                let viewport = match &el {
                    Some(el) => overlay_viewport(ed, el),
                    None => ed.viewport(Point::new(0.0, 0.0), Size::new(0.0, 0.0)),
                };
                ed.on_poi_drop(&poi_id, point, &viewport).await
            });
        }
    };

    view! {
        <div class="map-canvas" on:dragover=on_dragover on:drop=on_drop>
            <Show
                when=has_canvas
                fallback=|| {
                    view! {
                        <p class="map-canvas__empty">
                            "Select or create a base map, then drag points of interest onto it."
                        </p>
                    }
                }
            >
                <div class="map-canvas__zoom" style=move || zoom_style(zoom())>
                    <div class="map-canvas__stage">
                        <img class="map-canvas__image" src=image_url alt="Base map" draggable="false"/>
                        <div class="map-canvas__overlay" node_ref=overlay>
                            <For
                                each=move || views.with(|v| v.view.markers.clone())
                                key=|m| (m.id.clone(), m.glyph.clone(), m.label.clone())
                                let:marker
                            >
                                <Marker marker=marker overlay=overlay/>
                            </For>
                        </div>
                    </div>
                </div>
            </Show>
        </div>
    }
}

/// One draggable placement marker.
#[component]
fn Marker(marker: MarkerView, overlay: NodeRef<leptos::html::Div>) -> impl IntoView {
    let session = expect_context::<Session>();
    let views = session.views;
    let id = StoredValue::new(marker.id.clone());

    let style = move || {
        views.with(|v| {
            id.with_value(|id| v.view.markers.iter().find(|m| &m.id == id))
                .map(|m| marker_style(m.x_pct, m.y_pct))
                .unwrap_or_default()
        })
    };
    let selected = move || views.with(|v| id.with_value(|id| v.selected_marker.as_ref() == Some(id)));
    let dragging = move || views.with_untracked(|v| id.with_value(|id| v.selected_marker.as_ref() == Some(id)));

    let on_pointerdown = move |ev: leptos::ev::PointerEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        #[cfg(feature = "csr")]
        {
            use wasm_bindgen::JsCast;

            use crate::util::overlay::event_point;

            if let Some(target) = ev.current_target().and_then(|t| t.dyn_into::<web_sys::Element>().ok())
                && target.set_pointer_capture(ev.pointer_id()).is_err()
            {
                log::debug!("pointer capture unavailable");
            }
            let point = event_point(&ev);
            let placement_id = id.get_value();
            session.dispatch(async move |ed: &mut Editor| Ok(ed.on_marker_pointer_down(&placement_id, point)));
        }
    };

    let on_pointermove = move |ev: leptos::ev::PointerEvent| {
        if !dragging() {
            return;
        }
        #[cfg(feature = "csr")]
        {
            use crate::util::overlay::{event_point, overlay_viewport};

            let Some(el) = overlay.get_untracked() else {
                return;
            };
            let point = event_point(&ev);
            session.try_now(|ed| {
                let viewport = overlay_viewport(ed, &el);
                ed.on_pointer_move(point, &viewport)
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (ev, overlay);
        }
    };

    let on_release = move |_| session.dispatch(async |ed: &mut Editor| ed.on_pointer_up().await);

    let on_dblclick = move |ev: leptos::ev::MouseEvent| {
        ev.stop_propagation();
        let placement_id = id.get_value();
        session.dispatch(async move |ed: &mut Editor| ed.on_marker_double_click(&placement_id).await);
    };

    view! {
        <div
            class="marker"
            class:marker--selected=selected
            style=style
            title="Drag to move, double-click to remove"
            on:pointerdown=on_pointerdown
            on:pointermove=on_pointermove
            on:pointerup=on_release
            on:pointercancel=on_release
            on:dblclick=on_dblclick
        >
            {marker_face(marker.glyph, marker.label)}
        </div>
    }
}

/// Marker face: icon or colored pin, with the POI name under it.
pub fn marker_face(glyph: Glyph, label: String) -> impl IntoView {
    let pin = match glyph {
        Glyph::Icon(url) => view! { <img class="marker__icon" src=url alt="" draggable="false"/> }.into_any(),
        Glyph::Pin(color) => view! { <span class="marker__pin" style=format!("background: {color};")></span> }.into_any(),
    };
    view! {
        {pin}
        <span class="marker__label">{label}</span>
    }
}
