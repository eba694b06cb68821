//! Modal prompt naming a new event map or renaming an existing one.

use editor::editor::Editor;
use leptos::prelude::*;

use crate::session::Session;
use crate::state::ui::Dialog;

/// Dialog shown while `UiState::dialog` is set.
#[component]
pub fn NameDialog() -> impl IntoView {
    let session = expect_context::<Session>();
    let ui = session.ui;
    let dialog = ui.with_untracked(|u| u.dialog.clone());
    let title = dialog.as_ref().map_or("", Dialog::title);
    let value = RwSignal::new(dialog.as_ref().map(|d| d.initial_name().to_owned()).unwrap_or_default());

    let on_cancel = Callback::new(move |()| ui.update(|u| u.dialog = None));
    let on_save = Callback::new(move |()| {
        let Some(dialog) = ui.with_untracked(|u| u.dialog.clone()) else {
            return;
        };
        ui.update(|u| u.dialog = None);
        let name = value.get_untracked();
        if name.trim().is_empty() {
            return;
        }
        match dialog {
            Dialog::CreateEventMap => session.dispatch(async move |ed: &mut Editor| {
                ed.create_event_map(&name).await.map(|(_, actions)| actions)
            }),
            Dialog::RenameEventMap { id, .. } => {
                session.dispatch(async move |ed: &mut Editor| ed.rename_event_map(&id, &name).await);
            }
        }
    });
    let on_keydown = move |ev: leptos::ev::KeyboardEvent| match ev.key().as_str() {
        "Enter" => {
            ev.prevent_default();
            on_save.run(());
        }
        "Escape" => on_cancel.run(()),
        _ => {}
    };

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_cancel.run(())>
            <div class="dialog dialog--name" on:click=move |ev| ev.stop_propagation() on:keydown=on_keydown>
                <h3 class="dialog__title">{title}</h3>
                <label class="dialog__label">
                    "Name"
                    <input
                        class="dialog__input"
                        type="text"
                        prop:value=move || value.get()
                        on:input=move |ev| value.set(event_target_value(&ev))
                        autofocus=true
                    />
                </label>
                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_cancel.run(())>
                        "Cancel"
                    </button>
                    <button class="btn btn--primary" on:click=move |_| on_save.run(())>
                        "Save"
                    </button>
                </div>
            </div>
        </div>
    }
}
