//! Local Storage Token
//!
//! Keeps the bearer token in `window.localStorage` under the configured key.

use mission_sync::TokenStorage;

pub struct LocalTokenStorage {
    key: String,
}

impl LocalTokenStorage {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

impl TokenStorage for LocalTokenStorage {
    fn load(&self) -> Option<String> {
        local_storage()?.get_item(&self.key).ok().flatten()
    }

    fn save(&self, token: &str) -> Result<(), String> {
        let storage = local_storage().ok_or_else(|| "localStorage is unavailable".to_string())?;
        storage
            .set_item(&self.key, token)
            .map_err(|e| format!("{:?}", e))
    }

    fn clear(&self) {
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(&self.key);
        }
    }
}
