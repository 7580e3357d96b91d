//! Toast Host Component

use leptos::prelude::*;

use crate::store::{store_remove_toast, use_app_store, AppStateStoreFields};

#[component]
pub fn ToastHost() -> impl IntoView {
    let store = use_app_store();

    view! {
        <div class="toast-host">
            <For
                each=move || store.toasts().get()
                key=|toast| toast.id
                children=move |toast| {
                    let toast_id = toast.id;
                    view! {
                        <div class=toast.kind.class() on:click=move |_| store_remove_toast(&store, toast_id)>
                            {toast.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
