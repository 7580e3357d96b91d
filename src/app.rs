//! Gamission Frontend App
//!
//! Login gate in front of the mission board.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::{bind_document_listeners, DragEndEvent, SortableDnd};
use mission_sync::{DragEnd, StoreError};
use reactive_stores::Store;

use crate::components::{ErrorBanner, LoginForm, MissionColumn, Navbar, NewMissionForm, ToastHost};
use crate::context::AppContext;
use crate::settings;
use crate::store::{store_apply_snapshot, store_set_user, AppState, AppStateStoreFields};

#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new(settings::client_config());
    let store = Store::new(AppState::new());

    provide_context(store);
    provide_context(ctx.clone());

    // Mirror every mission store change into reactive state
    ctx.missions.subscribe(move |snapshot| store_apply_snapshot(&store, snapshot));

    // Bound once for the app lifetime
    let dnd = SortableDnd::new();
    let reorder_ctx = ctx.clone();
    bind_document_listeners(dnd, move |event: DragEndEvent| {
        let moved = reorder_ctx.missions.reorder(DragEnd::new(event.active, event.over));
        log::debug!("[DND] active={} over={:?} moved={}", event.active, event.over, moved);
    });

    // Restore session on mount
    let restore_ctx = ctx.clone();
    spawn_local(async move {
        match restore_ctx.session.restore().await {
            Ok(user) => store_set_user(&store, user),
            Err(e) => {
                log::warn!("[APP] {}", e);
                restore_ctx.sign_out(store);
            }
        }
        *store.session_checked().write() = true;
    });

    // Load missions whenever a user signs in
    let load_ctx = ctx.clone();
    Effect::new(move |_| {
        if store.user().get().is_none() {
            return;
        }
        let ctx = load_ctx.clone();
        spawn_local(async move {
            if let Err(StoreError::NavigationRequired) = ctx.missions.load().await {
                ctx.sign_out(store);
            }
        });
    });

    view! {
        <div class="app-layout">
            <Show
                when=move || store.session_checked().get()
                fallback=|| view! { <p class="loading">"Loading..."</p> }
            >
                <Show
                    when=move || store.user().get().is_some()
                    fallback=|| view! { <LoginForm /> }
                >
                    <Navbar />
                    <main class="main-content">
                        <h1>"今日のミッション"</h1>
                        <ErrorBanner />
                        <NewMissionForm />
                        <MissionColumn dnd=dnd />
                    </main>
                </Show>
            </Show>
            <ToastHost />
        </div>
    }
}
