//! New Mission Form Component

use leptos::prelude::*;
use leptos::task::spawn_local;
use mission_sync::StoreError;

use crate::context::use_app_context;
use crate::store::{push_toast, use_app_store, ToastKind};

#[component]
pub fn NewMissionForm() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let (title, set_title) = signal(String::new());
    let (description, set_description) = signal(String::new());

    let create_mission = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let (new_title, new_description) = (title.get(), description.get());
        if new_title.trim().is_empty() {
            push_toast(&store, ToastKind::Error, StoreError::EmptyTitle.to_string());
            return;
        }
        let ctx = ctx.clone();
        spawn_local(async move {
            let result = ctx.missions.add(&new_title, &new_description).await;
            if result.is_ok() {
                set_title.set(String::new());
                set_description.set(String::new());
            }
            ctx.finish(store, result, "ミッションを追加しました");
        });
    };

    view! {
        <form class="new-item-form" on:submit=create_mission>
            <div class="new-item-row">
                <input
                    type="text"
                    placeholder="ミッション名"
                    prop:value=move || title.get()
                    on:input=move |ev| set_title.set(event_target_value(&ev))
                />
                <button type="submit">"追加"</button>
            </div>
            <textarea
                placeholder="説明"
                prop:value=move || description.get()
                on:input=move |ev| set_description.set(event_target_value(&ev))
            />
        </form>
    }
}
