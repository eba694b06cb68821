//! Points of interest: create, drag onto the map, delete. Includes the legend.

use editor::editor::Editor;
use editor::error::ErrorKind;
use editor::render::{Badge, LegendEntry};
use leptos::prelude::*;

use crate::session::Session;
use crate::util::dialogs::{alert, confirm};
use crate::util::image_file::IMAGE_ACCEPT;

#[component]
pub fn PoisPanel() -> impl IntoView {
    let session = expect_context::<Session>();
    let views = session.views;
    let items = Memo::new(move |_| views.with(|v| v.view.pois.clone()));
    let choices = Memo::new(move |_| views.with(|v| v.view.category_options.clone()));
    let name = RwSignal::new(String::new());
    let category = RwSignal::new(None::<String>);
    let icon_input = NodeRef::<leptos::html::Input>::new();

    let selected_category = move || {
        category.get_untracked().or_else(|| {
            views.with_untracked(|v| v.view.category_options.iter().find(|o| o.selected).map(|o| o.id.clone()))
        })
    };

    let on_add = move |_| {
        let Some(category_id) = selected_category() else {
            alert("Create a category first.");
            return;
        };
        let label = name.get_untracked();
        let reset = move || {
            name.set(String::new());
            if let Some(input) = icon_input.get_untracked() {
                input.set_value("");
            }
        };

        #[cfg(feature = "csr")]
        {
            use crate::util::image_file::{first_file, read_image};

            let file = icon_input.get_untracked().and_then(|input| first_file(&input));
            leptos::task::spawn_local(async move {
                let icon = match file {
                    Some(file) => match read_image(&file).await {
                        Ok(image) => Some(image),
                        Err(message) => {
                            alert(&message);
                            return;
                        }
                    },
                    None => None,
                };
                session.dispatch(async move |ed: &mut Editor| {
                    let (_, actions) = ed.create_poi(&label, &category_id, icon).await?;
                    reset();
                    Ok(actions)
                });
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            session.dispatch(async move |ed: &mut Editor| {
                let (_, actions) = ed.create_poi(&label, &category_id, None).await?;
                reset();
                Ok(actions)
            });
        }
    };

    let rows = move || {
        items
            .get()
            .into_iter()
            .map(|row| {
                let drag_id = row.id.clone();
                let delete_id = row.id.clone();
                let badge = match row.badge {
                    Badge::Icon(url) => view! { <img class="poi-icon" src=url alt=""/> }.into_any(),
                    Badge::Swatch(color) => {
                        view! { <span class="swatch" style=format!("background: {color};")></span> }.into_any()
                    }
                };
                view! {
                    <li
                        class="panel__row panel__row--draggable"
                        draggable="true"
                        title="Drag onto the map"
                        on:dragstart=move |ev| {
                            #[cfg(feature = "csr")]
                            {
                                let Some(dt) = ev.data_transfer() else {
                                    return;
                                };
                                if dt.set_data(crate::util::overlay::POI_DRAG_TYPE, &drag_id).is_err() {
                                    log::warn!("could not start dragging {drag_id}");
                                }
                                dt.set_effect_allowed("copy");
                            }
                            #[cfg(not(feature = "csr"))]
                            {
                                let _ = (ev, &drag_id);
                            }
                        }
                    >
                        {badge}
                        <span class="panel__row-name">{row.name}</span>
                        <span class="panel__row-meta">{row.category_name}</span>
                        <button
                            class="btn btn--small btn--danger"
                            on:click=move |_| {
                                let id = delete_id.clone();
                                session.dispatch(async move |ed: &mut Editor| match ed.delete_poi(&id, false).await {
                                    Err(err) if err.kind() == ErrorKind::ConfirmationRequired => {
                                        if confirm(&format!("{err}. Delete anyway?")) {
                                            ed.delete_poi(&id, true).await
                                        } else {
                                            Ok(Vec::new())
                                        }
                                    }
                                    other => other,
                                });
                            }
                        >
                            "Delete"
                        </button>
                    </li>
                }
            })
            .collect::<Vec<_>>()
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
        <section class="panel">
            <h2 class="panel__title">"Points of interest"</h2>
            <div class="panel__form">
                <input
                    class="panel__input"
                    type="text"
                    placeholder="Name"
                    prop:value=move || name.get()
                    on:input=move |ev| name.set(event_target_value(&ev))
                />
                <select class="panel__select" on:change=move |ev| category.set(Some(event_target_value(&ev)))>
                    {options}
                </select>
                <label class="panel__label">
                    "Icon (optional)"
                    <input class="panel__file" type="file" accept=IMAGE_ACCEPT node_ref=icon_input/>
                </label>
                <button class="btn btn--primary" on:click=on_add>
                    "Add POI"
                </button>
            </div>
            <Show
                when=move || views.with(|v| !v.view.pois.is_empty())
                fallback=|| view! { <p class="panel__empty">"No points of interest yet."</p> }
            >
                <ul class="panel__list">{rows}</ul>
            </Show>
            <h3 class="panel__subtitle">"Legend"</h3>
            <Legend entries=Signal::derive(move || views.with(|v| v.view.legend.clone()))/>
        </section>
    }
}

/// Category swatches for the categories in use.
#[component]
pub fn Legend(#[prop(into)] entries: Signal<Vec<LegendEntry>>) -> impl IntoView {
    view! {
        <ul class="legend">
            {move || {
                entries
                    .get()
                    .into_iter()
                    .map(|entry| {
                        view! {
                            <li class="legend__entry">
                                <span class="swatch" style=format!("background: {};", entry.color)></span>
                                {entry.name}
                            </li>
                        }
                    })
                    .collect::<Vec<_>>()
            }}
        </ul>
    }
}
