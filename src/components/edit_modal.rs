//! Edit Modal Component
//!
//! Title/description editor for one mission. Saving applies the new text to
//! the store's current copy of the record.

use leptos::prelude::*;
use leptos::task::spawn_local;
use mission_sync::{StoreError, TaskRecord};

use crate::context::use_app_context;
use crate::store::{push_toast, use_app_store, ToastKind};

#[component]
pub fn EditModal(
    editing: ReadSignal<Option<TaskRecord>>,
    set_editing: WriteSignal<Option<TaskRecord>>,
) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let (title, set_title) = signal(String::new());
    let (description, set_description) = signal(String::new());

    // Seed the fields whenever a mission is opened
    Effect::new(move |_| {
        if let Some(task) = editing.get() {
            set_title.set(task.title);
            set_description.set(task.description);
        }
    });

    let save = Callback::new(move |_: ()| {
        let Some(task_id) = editing.get_untracked().map(|task| task.id) else { return };
        let (new_title, new_description) = (title.get_untracked(), description.get_untracked());
        if new_title.trim().is_empty() {
            push_toast(&store, ToastKind::Error, StoreError::EmptyTitle.to_string());
            return;
        }
        set_editing.set(None);
        let ctx = ctx.clone();
        spawn_local(async move {
            let result = ctx.missions.edit(task_id, &new_title, &new_description).await;
            ctx.finish(store, result, "ミッションを更新しました");
        });
    });

    view! {
        <Show when=move || editing.get().is_some()>
            <div class="modal-backdrop" on:click=move |_| set_editing.set(None)>
                <div class="modal" on:click=|ev| ev.stop_propagation()>
                    <h2>"ミッションを編集"</h2>
                    <input
                        type="text"
                        prop:value=move || title.get()
                        on:input=move |ev| set_title.set(event_target_value(&ev))
                    />
                    <textarea
                        prop:value=move || description.get()
                        on:input=move |ev| set_description.set(event_target_value(&ev))
                    />
                    <div class="modal-actions">
                        <button class="cancel-btn" on:click=move |_| set_editing.set(None)>"キャンセル"</button>
                        <button class="primary" on:click=move |_| save.run(())>"保存"</button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
