//! Application Context
//!
//! Mission store and session shared via Leptos Context API.

use std::sync::Arc;

use leptos::prelude::*;
use mission_sync::{ClientConfig, HttpGateway, Session, SessionError, StoreError, TaskListStore, TokenStorage, User};

use crate::storage::LocalTokenStorage;
use crate::store::{push_toast, store_set_user, AppStore, ToastKind};

/// App-wide services provided via context
#[derive(Clone)]
pub struct AppContext {
    pub missions: TaskListStore<HttpGateway>,
    pub session: Session<HttpGateway>,
    /// Guest credentials are configured
    pub guest_enabled: bool,
}

impl AppContext {
    pub fn new(config: ClientConfig) -> Self {
        let guest_enabled = config.guest.is_some();
        let tokens: Arc<dyn TokenStorage> = Arc::new(LocalTokenStorage::new(config.token_key.clone()));
        let gateway = Arc::new(HttpGateway::new(config));
        Self {
            missions: TaskListStore::new(Arc::clone(&gateway), Arc::clone(&tokens)),
            session: Session::new(gateway, tokens),
            guest_enabled,
        }
    }

    /// Toast the outcome of a mission action; a missing token signs out.
    /// Errors kept by the mission store show in `ErrorBanner` only.
    pub fn finish(&self, store: AppStore, result: Result<(), StoreError>, success: &str) {
        match result {
            Ok(()) => push_toast(&store, ToastKind::Success, success),
            Err(StoreError::NavigationRequired) => self.sign_out(store),
            Err(e) if !needs_error_toast(e, self.missions.error()) => {
                log::debug!("[APP] {:?} shown in banner", e)
            }
            Err(e) => push_toast(&store, ToastKind::Error, e.to_string()),
        }
    }

    pub fn finish_login(&self, store: AppStore, result: Result<User, SessionError>) {
        match result {
            Ok(user) => {
                push_toast(&store, ToastKind::Success, format!("ようこそ、{}さん", user.name));
                store_set_user(&store, Some(user));
            }
            Err(e) => push_toast(&store, ToastKind::Error, e.to_string()),
        }
    }

    /// Drop the token, the user and the local mission list
    pub fn sign_out(&self, store: AppStore) {
        self.session.logout();
        self.missions.clear();
        store_set_user(&store, None);
    }
}

pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}

/// A failure the mission store already shows as its visible error gets no toast
pub fn needs_error_toast(error: StoreError, visible: Option<StoreError>) -> bool {
    visible != Some(error)
}
