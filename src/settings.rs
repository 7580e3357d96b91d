//! Client Settings
//!
//! A `GAMISSION_CONFIG` JSON baked in at build time wins; otherwise the
//! defaults are used with the page origin as backend.

use mission_sync::ClientConfig;

pub fn client_config() -> ClientConfig {
    if let Some(json) = option_env!("GAMISSION_CONFIG") {
        match ClientConfig::from_json_str(json) {
            Ok(config) => return config,
            Err(e) => log::warn!("[CONFIG] Ignoring GAMISSION_CONFIG: {}", e),
        }
    }

    let config = ClientConfig::default();
    let Some(origin) = page_origin() else {
        return config;
    };
    match config.clone().with_base_url(origin) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("[CONFIG] Page origin unusable, keeping {}: {}", config.base_url, e);
            config
        }
    }
}

fn page_origin() -> Option<String> {
    web_sys::window()?.location().origin().ok()
}
