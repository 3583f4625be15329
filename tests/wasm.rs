#![cfg(target_arch = "wasm32")]

use js_sys::Function;
use overlay_core::WasmErrorOverlay;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

fn js_renderer() -> JsValue {
    Function::new_no_args(
        "return {
            live: 0,
            next: 1,
            labelY: null,
            createFrame(x, y, w, h, style) { this.live++; return this.next++; },
            createLabel(text, style) { this.live++; this.text = text; return this.next++; },
            measure(handle) { return { width: 600, height: 40 }; },
            reposition(handle, x, y) { this.labelY = y; },
            destroy(handle) { this.live--; },
        };",
    )
    .call0(&JsValue::NULL)
    .unwrap()
}

fn get(target: &JsValue, key: &str) -> JsValue {
    js_sys::Reflect::get(target, &JsValue::from_str(key)).unwrap()
}

#[wasm_bindgen_test]
fn raise_and_redraw_through_js() {
    let renderer = js_renderer();
    let mut overlay = WasmErrorOverlay::new("{}").unwrap();

    overlay
        .raise_code(1, true, 600.0, 400.0, renderer.clone(), 13)
        .unwrap();
    assert!(overlay.is_displaying_error(1));
    assert_eq!(get(&renderer, "live").as_f64(), Some(2.0));
    assert_eq!(get(&renderer, "labelY").as_f64(), Some(360.0));

    overlay.before_redraw(1, renderer.clone()).unwrap();
    assert!(!overlay.is_displaying_error(1));
    assert_eq!(get(&renderer, "live").as_f64(), Some(0.0));
}

#[wasm_bindgen_test]
fn unknown_code_rejected() {
    let renderer = js_renderer();
    let mut overlay = WasmErrorOverlay::new("{}").unwrap();

    assert!(overlay
        .raise_code(1, true, 600.0, 400.0, renderer.clone(), 9999)
        .is_err());
    assert_eq!(get(&renderer, "live").as_f64(), Some(0.0));
}
