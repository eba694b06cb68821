//! Tab strip switching the side panel.

use leptos::prelude::*;

use crate::session::Session;
use crate::state::ui::Tab;

#[component]
pub fn TabBar() -> impl IntoView {
    let ui = expect_context::<Session>().ui;

    view! {
        <nav class="tab-bar" role="tablist">
            {Tab::ALL
                .into_iter()
                .map(|tab| {
                    let active = move || ui.with(|u| u.tab == tab);
                    view! {
                        <button
                            class="tab-bar__tab"
                            class:tab-bar__tab--active=active
                            role="tab"
                            aria-selected=move || active().to_string()
                            on:click=move |_| ui.update(|u| u.tab = tab)
                        >
                            {tab.label()}
                        </button>
                    }
                })
                .collect::<Vec<_>>()}
        </nav>
    }
}
