//! Bridge between Leptos components and the editor.
//!
//! ARCHITECTURE
//! ============
//! The editor lives behind an async mutex so two quick clicks cannot interleave
//! their storage writes: each [`Session::dispatch`] waits its turn, runs one
//! operation, then publishes the resulting actions to [`ViewState`]. Pointer
//! moves during a drag go through [`Session::try_now`] instead, which skips the
//! sample when a write is still in flight rather than queueing stale moves.
//!
//! ERROR HANDLING
//! ==============
//! A failed operation republishes the whole view (the editor has already put
//! its own state back) and reports the error with a browser alert.

use editor::editor::{Action, Editor, Section};
use editor::error::EditorResult;
use leptos::prelude::*;

use crate::state::ui::{LoadStatus, UiState};
use crate::state::view::ViewState;
#[cfg(feature = "csr")]
use crate::util::dialogs::report;

#[cfg(feature = "csr")]
type EditorCell = std::rc::Rc<futures::lock::Mutex<Editor>>;

/// Handle provided to every component via context.
#[derive(Clone, Copy)]
pub struct Session {
    pub ui: RwSignal<UiState>,
    pub views: RwSignal<ViewState>,
    #[cfg(feature = "csr")]
    editor: StoredValue<Option<EditorCell>, LocalStorage>,
}

impl Session {
    pub fn new(ui: UiState) -> Self {
        Self {
            ui: RwSignal::new(ui),
            views: RwSignal::new(ViewState::default()),
            #[cfg(feature = "csr")]
            editor: StoredValue::new_local(None),
        }
    }

    /// Install the opened editor and publish its first view.
    pub fn attach(self, editor: Editor) {
        let filter = self.filter();
        let zoom = editor.config().zoom;
        self.views.set(ViewState::from_editor(&editor, &filter));
        #[cfg(feature = "csr")]
        self.editor.set_value(Some(std::rc::Rc::new(futures::lock::Mutex::new(editor))));
        #[cfg(not(feature = "csr"))]
        drop(editor);
        self.ui.update(|u| {
            u.zoom = zoom;
            u.status = LoadStatus::Ready;
        });
    }

    /// Queue an editor operation.
    pub fn dispatch<F>(self, op: F)
    where
        F: AsyncFnOnce(&mut Editor) -> EditorResult<Vec<Action>> + 'static,
    {
        #[cfg(feature = "csr")]
        {
            let Some(cell) = self.editor.get_value() else {
                log::warn!("editor not ready; ignoring action");
                return;
            };
            leptos::task::spawn_local(async move {
                let mut editor = cell.lock().await;
                let result = op(&mut *editor).await;
                self.publish(&editor, result);
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = op;
        }
    }

    /// Run a synchronous operation now, or skip it if the editor is busy.
    pub fn try_now<F>(self, op: F)
    where
        F: FnOnce(&mut Editor) -> Vec<Action>,
    {
        #[cfg(feature = "csr")]
        {
            let Some(cell) = self.editor.get_value() else {
                return;
            };
            let Some(mut editor) = cell.try_lock() else {
                log::debug!("editor busy; pointer sample skipped");
                return;
            };
            let actions = op(&mut *editor);
            self.publish(&editor, Ok(actions));
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = op;
        }
    }

    /// Re-project the event map list after the search text changed.
    pub fn set_filter(self, filter: String) {
        self.ui.update(|u| u.event_map_filter = filter);
        self.dispatch(async |_: &mut Editor| Ok(vec![Action::Render(Section::EventMaps)]));
    }

    fn filter(self) -> String {
        self.ui.with_untracked(|u| u.event_map_filter.clone())
    }

    #[cfg(feature = "csr")]
    fn publish(self, editor: &Editor, result: EditorResult<Vec<Action>>) {
        let filter = self.filter();
        match result {
            Ok(actions) => {
                if !actions.is_empty() {
                    self.views.update(|v| v.apply(editor, &filter, &actions));
                }
            }
            Err(err) => {
                self.views.set(ViewState::from_editor(editor, &filter));
                report(&err);
            }
        }
    }
}
