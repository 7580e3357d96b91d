//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. The mission list
//! itself is owned by `TaskListStore`; this store mirrors its snapshots.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use mission_sync::{StoreSnapshot, User};
use reactive_stores::Store;

/// How long a toast stays on screen
pub const TOAST_DURATION_MS: u32 = 3000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    pub fn class(&self) -> &'static str {
        match self {
            ToastKind::Success => "toast toast-success",
            ToastKind::Error => "toast toast-error",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Latest mission store snapshot: board order, loading flag, visible error
    pub missions: StoreSnapshot,
    /// Signed-in user
    pub user: Option<User>,
    /// Session restore finished (with or without a user)
    pub session_checked: bool,
    pub toasts: Vec<Toast>,
    pub next_toast_id: u64,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Copy a mission store snapshot into the reactive fields
pub fn store_apply_snapshot(store: &AppStore, snapshot: &StoreSnapshot) {
    *store.missions().write() = snapshot.clone();
}

pub fn store_set_user(store: &AppStore, user: Option<User>) {
    *store.user().write() = user;
}

/// Show a toast and schedule its removal
pub fn push_toast(store: &AppStore, kind: ToastKind, message: impl Into<String>) {
    let id = {
        let field = store.next_toast_id();
        let mut next = field.write();
        *next += 1;
        *next
    };
    store.toasts().write().push(Toast {
        id,
        kind,
        message: message.into(),
    });

    let store = *store;
    spawn_local(async move {
        TimeoutFuture::new(TOAST_DURATION_MS).await;
        store_remove_toast(&store, id);
    });
}

pub fn store_remove_toast(store: &AppStore, toast_id: u64) {
    store.toasts().write().retain(|toast| toast.id != toast_id);
}
