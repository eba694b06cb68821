//! Base map library: upload, choose the active map, delete.

use editor::editor::Editor;
use leptos::prelude::*;

use crate::session::Session;
use crate::util::image_file::IMAGE_ACCEPT;

#[component]
pub fn BaseMapsPanel() -> impl IntoView {
    let session = expect_context::<Session>();
    let views = session.views;
    let items = Memo::new(move |_| views.with(|v| v.view.base_maps.clone()));
    let name = RwSignal::new(String::new());
    let file_input = NodeRef::<leptos::html::Input>::new();

    let on_add = move |_| {
        #[cfg(feature = "csr")]
        {
            use crate::util::dialogs::alert;
            use crate::util::image_file::{first_file, read_image};

            let Some(file) = file_input.get_untracked().and_then(|input| first_file(&input)) else {
                alert("Choose an image file for the base map.");
                return;
            };
            let label = name.get_untracked();
            leptos::task::spawn_local(async move {
                let image = match read_image(&file).await {
                    Ok(image) => image,
                    Err(message) => {
                        alert(&message);
                        return;
                    }
                };
                session.dispatch(async move |ed: &mut Editor| {
                    let (_, actions) = ed.create_base_map(&label, image).await?;
                    name.set(String::new());
                    if let Some(input) = file_input.get_untracked() {
                        input.set_value("");
                    }
                    Ok(actions)
                });
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = file_input;
        }
    };

    let rows = move || {
        items
            .get()
            .into_iter()
            .map(|row| {
                let select_id = row.id.clone();
                let delete_id = row.id.clone();
                view! {
                    <li class="panel__row" class:panel__row--active=row.active>
                        <span class="panel__row-name">{row.name}</span>
                        <button
                            class="btn btn--small"
                            disabled=row.active
                            on:click=move |_| {
                                let id = select_id.clone();
                                session.dispatch(async move |ed: &mut Editor| ed.select_base_map(Some(&id)));
                            }
                        >
                            {if row.active { "Active" } else { "Use" }}
                        </button>
                        <button
                            class="btn btn--small btn--danger"
                            on:click=move |_| {
                                let id = delete_id.clone();
                                session.dispatch(async move |ed: &mut Editor| ed.delete_base_map(&id).await);
                            }
                        >
                            "Delete"
                        </button>
                    </li>
                }
            })
            .collect::<Vec<_>>()
    };

    view! {
        <section class="panel">
            <h2 class="panel__title">"Base maps"</h2>
            <div class="panel__form">
                <input
                    class="panel__input"
                    type="text"
                    placeholder="Name"
                    prop:value=move || name.get()
                    on:input=move |ev| name.set(event_target_value(&ev))
                />
                <input class="panel__file" type="file" accept=IMAGE_ACCEPT node_ref=file_input/>
                <button class="btn btn--primary" on:click=on_add>
                    "Add base map"
                </button>
            </div>
            <Show
                when=move || views.with(|v| !v.view.base_maps.is_empty())
                fallback=|| view! { <p class="panel__empty">"No base maps yet. Upload a floor plan to start."</p> }
            >
                <ul class="panel__list">{rows}</ul>
            </Show>
        </section>
    }
}
