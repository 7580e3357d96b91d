//! Mission Card Component
//!
//! One row of the board: title, description and the action buttons.

use leptos::prelude::*;
use leptos::task::spawn_local;
use mission_sync::TaskRecord;

use crate::components::DeleteConfirmButton;
use crate::context::use_app_context;
use crate::store::use_app_store;

#[component]
pub fn MissionCard(
    task: TaskRecord,
    set_editing: WriteSignal<Option<TaskRecord>>,
) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let task_id = task.id;
    let completed = task.is_completed;

    let complete_ctx = ctx.clone();
    let complete = move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        let ctx = complete_ctx.clone();
        spawn_local(async move {
            let result = ctx.missions.mark_complete(task_id).await;
            ctx.finish(store, result, "ミッションを完了しました");
        });
    };

    let on_delete = Callback::new(move |_: ()| {
        let ctx = ctx.clone();
        spawn_local(async move {
            let result = ctx.missions.delete(task_id).await;
            ctx.finish(store, result, "ミッションを削除しました");
        });
    });

    let edit_target = task.clone();

    view! {
        <div class=if completed { "mission-card completed" } else { "mission-card" }>
            <div class="mission-content">
                <p class="mission-title">{task.title}</p>
                <p class="mission-description">{task.description}</p>
            </div>
            <div class="mission-actions">
                <button class="complete-btn" disabled=completed on:click=complete>
                    {if completed { "完了済み" } else { "完了" }}
                </button>
                <button
                    class="edit-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_editing.set(Some(edit_target.clone()));
                    }
                >
                    "編集"
                </button>
                <DeleteConfirmButton button_class="delete-btn" on_confirm=on_delete />
            </div>
        </div>
    }
}
