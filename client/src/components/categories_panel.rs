//! Category list with color swatches.

use editor::editor::Editor;
use leptos::prelude::*;

use crate::session::Session;

/// Color input value for a fresh form.
const DEFAULT_COLOR: &str = "#3b82f6";

#[component]
pub fn CategoriesPanel() -> impl IntoView {
    let session = expect_context::<Session>();
    let views = session.views;
    let items = Memo::new(move |_| views.with(|v| v.view.categories.clone()));
    let name = RwSignal::new(String::new());
    let color = RwSignal::new(DEFAULT_COLOR.to_owned());

    let on_add = move |_| {
        let label = name.get_untracked();
        let swatch = color.get_untracked();
        session.dispatch(async move |ed: &mut Editor| {
            let (_, actions) = ed.create_category(&label, &swatch).await?;
            name.set(String::new());
            color.set(DEFAULT_COLOR.to_owned());
            Ok(actions)
        });
    };

    let rows = move || {
        items
            .get()
            .into_iter()
            .map(|row| {
                let id = row.id.clone();
                view! {
                    <li class="panel__row">
                        <span class="swatch" style=format!("background: {};", row.color)></span>
                        <span class="panel__row-name">{row.name}</span>
                        <span class="panel__row-meta">{row.color}</span>
                        <button
                            class="btn btn--small btn--danger"
                            on:click=move |_| {
                                let id = id.clone();
                                session.dispatch(async move |ed: &mut Editor| ed.delete_category(&id).await);
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
            <h2 class="panel__title">"Categories"</h2>
            <div class="panel__form">
                <input
                    class="panel__input"
                    type="text"
                    placeholder="Name"
                    prop:value=move || name.get()
                    on:input=move |ev| name.set(event_target_value(&ev))
                />
                <input
                    class="panel__color"
                    type="color"
                    prop:value=move || color.get()
                    on:input=move |ev| color.set(event_target_value(&ev))
                />
                <button class="btn btn--primary" on:click=on_add>
                    "Add category"
                </button>
            </div>
            <Show
                when=move || views.with(|v| !v.view.categories.is_empty())
                fallback=|| view! { <p class="panel__empty">"No categories yet."</p> }
            >
                <ul class="panel__list">{rows}</ul>
            </Show>
        </section>
    }
}
