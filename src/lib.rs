// overlay_core: chart error overlay engine for Rust/WASM hosts.
// Resolves raised error codes, draws the alert frame + label, and clears it before redraw.

mod catalog;
mod controller;
mod error;
mod events;
mod host;
mod render;
mod scene;
mod types;
mod wasm;

use wasm_bindgen::prelude::*;

pub use catalog::{CatalogEntry, ErrorCatalog};
pub use controller::ErrorOverlayController;
pub use error::{OverlayError, OverlayResult};
pub use events::{EventDispatcher, HostEvent, HostObserver};
pub use host::Host;
pub use render::Renderer;
pub use scene::{Primitive, PrimitiveId, SceneError, SceneHost, SceneRenderer, TextMetrics};
pub use types::*;
pub use wasm::{JsRenderError, JsRenderer, WasmErrorOverlay};

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Catalog entry for `code` as JSON: `{ "code", "title", "body" }`.
#[wasm_bindgen]
pub fn lookup_json(code: u32) -> Result<String, JsValue> {
    let entry = ErrorCatalog::builtin()
        .lookup(code)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    serde_json::to_string(entry)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_json_has_title() {
        let json = lookup_json(19).ok().unwrap();
        let entry: CatalogEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(entry.code, 19);
        assert_eq!(entry.title, "Too many ticks");
    }
}
