//! System clipboard access through `navigator.clipboard`.

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

/// Write `text` to the clipboard.
pub async fn copy_to_clipboard(text: &str) -> Result<(), String> {
    JsFuture::from(copy_text(text))
        .await
        .map(|_| ())
        .map_err(|e| format!("Failed to write clipboard: {:?}", e))
}

/// Bindings to `clipboard.js`.
#[wasm_bindgen(module = "/src/js/clipboard.js")]
extern "C" {
    #[wasm_bindgen(js_name = "copyText")]
    fn copy_text(text: &str) -> js_sys::Promise;
}
