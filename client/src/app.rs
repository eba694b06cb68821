//! Root application component and editor bootstrap.
//!
//! SYSTEM CONTEXT
//! ==============
//! Opens IndexedDB, loads the catalog through [`Editor::open`], and provides
//! the shared [`Session`] to every panel. When the database cannot be opened
//! the editor still runs on an in-memory store so the page stays usable.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};

use crate::components::base_maps_panel::BaseMapsPanel;
use crate::components::categories_panel::CategoriesPanel;
use crate::components::event_maps_panel::EventMapsPanel;
use crate::components::map_canvas::MapCanvas;
use crate::components::name_dialog::NameDialog;
use crate::components::pois_panel::PoisPanel;
use crate::components::print_view::PrintView;
use crate::components::tab_bar::TabBar;
use crate::components::toolbar::Toolbar;
use crate::session::Session;
use crate::state::ui::{LoadStatus, Tab, UiState};
use crate::util::ui_persistence::{load_json, save_json};

/// `localStorage` key remembering the open side panel tab.
pub const TAB_KEY: &str = "event_map_builder_tab";

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = Session::new(UiState {
        tab: load_json::<Tab>(TAB_KEY).unwrap_or_default(),
        ..UiState::default()
    });
    provide_context(session);

    #[cfg(feature = "csr")]
    leptos::task::spawn_local(open_session(session));

    let ui = session.ui;
    let status = Memo::new(move |_| ui.with(|u| u.status.clone()));
    let tab = Memo::new(move |_| ui.with(|u| u.tab));
    Effect::new(move || save_json(TAB_KEY, &tab.get()));

    view! {
        <Title text="Event Map Builder"/>

        <div class="app">
            <header class="app__header toolbar">
                <span class="toolbar__board-name">"Event Map Builder"</span>
                <span class="toolbar__divider" aria-hidden="true"></span>
                <Toolbar/>
            </header>

            {move || match status.get() {
                LoadStatus::Loading => view! { <p class="app__status">"Loading..."</p> }.into_any(),
                LoadStatus::Failed(message) => {
                    view! { <p class="app__status app__status--error">{message}</p> }.into_any()
                }
                LoadStatus::Ready => {
                    view! {
                        <div class="app__body">
                            <aside class="app__sidebar">
                                <TabBar/>
                                {move || match tab.get() {
                                    Tab::BaseMaps => view! { <BaseMapsPanel/> }.into_any(),
                                    Tab::Categories => view! { <CategoriesPanel/> }.into_any(),
                                    Tab::Pois => view! { <PoisPanel/> }.into_any(),
                                    Tab::EventMaps => view! { <EventMapsPanel/> }.into_any(),
                                }}
                            </aside>
                            <main class="app__main">
                                <MapCanvas/>
                            </main>
                        </div>
                    }
                        .into_any()
                }
            }}

            <PrintView/>
            <Show when=move || ui.with(|u| u.dialog.is_some())>
                <NameDialog/>
            </Show>
        </div>
    }
}

#[cfg(feature = "csr")]
async fn open_session(session: Session) {
    use std::rc::Rc;

    use editor::clock::{Clock, SystemClock};
    use editor::editor::Editor;
    use editor::store::{MemoryStore, Store};

    use crate::storage::idb::IdbStore;
    use crate::util::config::load_config;
    use crate::util::dialogs::{alert, error_message, report};

    let config = load_config();
    let store: Rc<dyn Store> = match IdbStore::open(&config.db_name, config.db_version).await {
        Ok(store) => Rc::new(store),
        Err(err) => {
            log::warn!("IndexedDB unavailable, falling back to memory: {err}");
            alert("Browser storage is unavailable. Changes will be lost when the page closes.");
            Rc::new(MemoryStore::new())
        }
    };
    let clock: Rc<dyn Clock> = Rc::new(SystemClock);

    match Editor::open(store, clock, config).await {
        Ok(editor) => {
            log::info!("editor ready");
            session.attach(editor);
        }
        Err(err) => {
            report(&err);
            session.ui.update(|u| u.status = LoadStatus::Failed(error_message(&err)));
        }
    }
}
