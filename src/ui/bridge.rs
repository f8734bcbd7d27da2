/// JS bridge for the popup: active tab lookup, tab messaging, storage

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::messages::{Request, Response};
use crate::settings::{SETTINGS_KEY, Settings};

#[wasm_bindgen(module = "/popup.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getActiveTab() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn sendToTab(tab_id: i32, message: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn getStorage(key: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn setStorage(key: &str, value: JsValue) -> Result<(), JsValue>;
}

/// The tab the popup was opened over
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BrowserTab {
    pub id: i32,
    #[serde(default)]
    pub url: String,
}

/// Looked up on every call; the active tab can change while the popup is open
pub async fn active_tab() -> Result<BrowserTab, String> {
    let tab_js = getActiveTab()
        .await
        .map_err(|e| format!("Failed to query active tab: {:?}", e))?;

    if tab_js.is_null() || tab_js.is_undefined() {
        return Err("No active tab".to_string());
    }

    serde_wasm_bindgen::from_value(tab_js).map_err(|e| format!("Failed to parse tab: {:?}", e))
}

/// Send a request to the content script of the active tab
pub async fn send_request(request: &Request) -> Result<Response, String> {
    let tab = active_tab().await?;

    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    let message = request
        .serialize(&serializer)
        .map_err(|e| format!("Failed to serialize request: {:?}", e))?;

    let response_js = sendToTab(tab.id, message)
        .await
        .map_err(|e| format!("Page did not answer: {:?}", e))?;

    if response_js.is_null() || response_js.is_undefined() {
        return Err("No response from the page. Is this a Redmine issue list?".to_string());
    }

    serde_wasm_bindgen::from_value(response_js)
        .map_err(|e| format!("Failed to parse response: {:?}", e))
}

/// Stored settings, or defaults when storage is empty or unreadable
pub async fn load_settings() -> Settings {
    let stored = match getStorage(SETTINGS_KEY).await {
        Ok(value) => value,
        Err(e) => {
            log::error!("Failed to read settings: {:?}", e);
            return Settings::default();
        }
    };

    if stored.is_null() || stored.is_undefined() {
        return Settings::default();
    }

    serde_wasm_bindgen::from_value(stored).unwrap_or_else(|e| {
        log::error!("Failed to parse stored settings: {:?}", e);
        Settings::default()
    })
}

/// Persist settings. Failures are logged; the popup keeps its in-memory copy.
pub async fn save_settings(settings: &Settings) {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    let value = match settings.serialize(&serializer) {
        Ok(value) => value,
        Err(e) => {
            log::error!("Failed to serialize settings: {:?}", e);
            return;
        }
    };

    if let Err(e) = setStorage(SETTINGS_KEY, value).await {
        log::error!("Failed to save settings: {:?}", e);
    }
}
