//! Navbar Component

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::store::{push_toast, use_app_store, AppStateStoreFields, ToastKind};

#[component]
pub fn Navbar() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let logout = move |_| {
        ctx.sign_out(store);
        push_toast(&store, ToastKind::Success, "ログアウトしました");
    };

    view! {
        <nav class="navbar">
            <span class="navbar-brand">"Gamission"</span>
            <span class="navbar-count">
                {move || format!("残り {} 件", store.missions().read().active_tasks().len())}
            </span>
            <span class="navbar-user">
                {move || store.user().get().map(|user| user.name).unwrap_or_default()}
            </span>
            <button class="logout-btn" on:click=logout>"ログアウト"</button>
        </nav>
    }
}
