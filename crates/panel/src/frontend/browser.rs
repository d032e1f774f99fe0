//! Browser-backed token storage, prompts, and file reading.

use content_admin_auth::{TOKEN_STORAGE_KEY, TokenStore};
use content_admin_products::ImageSelection;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

use crate::prompt::Prompt;

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// Keeps the bearer token in `localStorage` under `authToken`.
///
/// Holds no handle itself, so it is `Send + Sync` even though the browser
/// storage object is not.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageTokenStore;

impl TokenStore for LocalStorageTokenStore {
    fn set_token(&self, token: &str) {
        match local_storage() {
            Some(storage) => {
                if let Err(e) = storage.set_item(TOKEN_STORAGE_KEY, token) {
                    tracing::warn!(error = ?e, "could not persist token");
                }
            }
            None => tracing::warn!("localStorage unavailable; token not saved"),
        }
    }

    fn token(&self) -> Option<String> {
        local_storage()?.get_item(TOKEN_STORAGE_KEY).ok().flatten()
    }

    fn remove_token(&self) {
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(TOKEN_STORAGE_KEY);
        }
    }
}

/// `window.confirm` / `window.alert`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowPrompt;

impl Prompt for WindowPrompt {
    fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }

    fn alert(&self, message: &str) {
        if let Some(w) = web_sys::window() {
            let _ = w.alert_with_message(message);
        }
    }
}

/// Read a picked file into an [`ImageSelection`].
pub async fn read_file(file: &web_sys::File) -> Result<ImageSelection, JsValue> {
    let buffer = JsFuture::from(file.array_buffer()).await?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    Ok(ImageSelection::new(file.name(), file.type_(), bytes))
}
