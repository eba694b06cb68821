//! Saved event maps: create, search, load, rename, duplicate, delete.

use editor::editor::Editor;
use leptos::prelude::*;

use crate::session::Session;
use crate::state::ui::Dialog;
use crate::util::dialogs::confirm;

#[component]
pub fn EventMapsPanel() -> impl IntoView {
    let session = expect_context::<Session>();
    let views = session.views;
    let items = Memo::new(move |_| views.with(|v| v.view.event_maps.clone()));
    let ui = session.ui;

    let rows = move || {
        items
            .get()
            .into_iter()
            .map(|row| {
                let load_id = row.id.clone();
                let dup_id = row.id.clone();
                let delete_id = row.id.clone();
                let rename = Dialog::RenameEventMap { id: row.id.clone(), current: row.name.clone() };
                let count = row.placement_count;
                let meta = format!("{} · {count} placement{}", row.base_map_name, if count == 1 { "" } else { "s" });
                view! {
                    <li class="panel__row" class:panel__row--active=row.active>
                        <div class="panel__row-text">
                            <span class="panel__row-name">{row.name}</span>
                            <span class="panel__row-meta">
                                {meta}
                            </span>
                        </div>
                        <button
                            class="btn btn--small"
                            on:click=move |_| {
                                let id = load_id.clone();
                                session.dispatch(async move |ed: &mut Editor| ed.load_event_map(&id));
                            }
                        >
                            "Load"
                        </button>
                        <button
                            class="btn btn--small"
                            on:click=move |_| {
                                let dialog = rename.clone();
                                ui.update(|u| u.dialog = Some(dialog));
                            }
                        >
                            "Rename"
                        </button>
                        <button
                            class="btn btn--small"
                            on:click=move |_| {
                                let id = dup_id.clone();
                                session.dispatch(async move |ed: &mut Editor| {
                                    ed.duplicate_event_map(&id).await.map(|(_, actions)| actions)
                                });
                            }
                        >
                            "Duplicate"
                        </button>
                        <button
                            class="btn btn--small btn--danger"
                            on:click=move |_| {
                                if !confirm("Delete this event map?") {
                                    return;
                                }
                                let id = delete_id.clone();
                                session.dispatch(async move |ed: &mut Editor| ed.delete_event_map(&id).await);
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
            <h2 class="panel__title">"Event maps"</h2>
            <div class="panel__form">
                <button
                    class="btn btn--primary"
                    on:click=move |_| ui.update(|u| u.dialog = Some(Dialog::CreateEventMap))
                >
                    "+ New event map"
                </button>
                <input
                    class="panel__input"
                    type="search"
                    placeholder="Search"
                    prop:value=move || ui.with(|u| u.event_map_filter.clone())
                    on:input=move |ev| session.set_filter(event_target_value(&ev))
                />
            </div>
            <Show
                when=move || views.with(|v| !v.view.event_maps.is_empty())
                fallback=|| view! { <p class="panel__empty">"No event maps found."</p> }
            >
                <ul class="panel__list">{rows}</ul>
            </Show>
        </section>
    }
}
