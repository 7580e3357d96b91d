//! Error Banner Component
//!
//! Shows the mission store's last failure until dismissed or cleared.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn ErrorBanner() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let dismiss = Callback::new(move |_: ()| ctx.missions.dismiss_error());

    view! {
        <Show when=move || store.missions().read().error.is_some()>
            <div class="error-banner">
                <p>{move || store.missions().read().error.map(|e| e.to_string())}</p>
                <button class="cancel-btn" on:click=move |_| dismiss.run(())>"×"</button>
            </div>
        </Show>
    }
}
