// JS plumbing: a renderer backed by a JS object and the exported overlay facade.
// Styles cross the boundary as JSON strings; handles stay opaque JsValues.

use js_sys::{Array, Function, Reflect};
use thiserror::Error;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::controller::ErrorOverlayController;
use crate::error::OverlayError;
use crate::host::Host;
use crate::render::Renderer;
use crate::types::*;

/// A call into the JS renderer threw or returned something unusable.
#[derive(Debug, Error)]
#[error("JS renderer `{method}` failed: {message}")]
pub struct JsRenderError {
    method: &'static str,
    message: String,
}

impl JsRenderError {
    fn new(method: &'static str, message: impl Into<String>) -> Self {
        JsRenderError {
            method,
            message: message.into(),
        }
    }

    fn from_js(method: &'static str, value: JsValue) -> Self {
        let message = value
            .as_string()
            .or_else(|| {
                js_sys::JSON::stringify(&value)
                    .ok()
                    .and_then(|s| s.as_string())
            })
            .unwrap_or_else(|| format!("{:?}", value));
        JsRenderError::new(method, message)
    }
}

/// Renderer over a JS object exposing `createFrame(x, y, w, h, styleJson)`,
/// `createLabel(text, styleJson)`, `measure(handle)`, `reposition(handle, x, y)`
/// and `destroy(handle)`.
pub struct JsRenderer {
    target: JsValue,
}

impl JsRenderer {
    pub fn new(target: JsValue) -> Self {
        JsRenderer { target }
    }

    fn call(&self, method: &'static str, args: &Array) -> Result<JsValue, JsRenderError> {
        let func = Reflect::get(&self.target, &JsValue::from_str(method))
            .map_err(|e| JsRenderError::from_js(method, e))?;
        let func: Function = func
            .dyn_into()
            .map_err(|_| JsRenderError::new(method, "not a function"))?;
        func.apply(&self.target, args)
            .map_err(|e| JsRenderError::from_js(method, e))
    }

    fn style_json<T: serde::Serialize>(
        method: &'static str,
        style: &T,
    ) -> Result<JsValue, JsRenderError> {
        serde_json::to_string(style)
            .map(|json| JsValue::from_str(&json))
            .map_err(|e| JsRenderError::new(method, e.to_string()))
    }
}

fn read_f32(method: &'static str, value: &JsValue, key: &str) -> Result<f32, JsRenderError> {
    Reflect::get(value, &JsValue::from_str(key))
        .ok()
        .and_then(|v| v.as_f64())
        .map(|v| v as f32)
        .ok_or_else(|| JsRenderError::new(method, format!("missing numeric `{}`", key)))
}

impl Renderer for JsRenderer {
    type Handle = JsValue;
    type Error = JsRenderError;

    fn create_frame(
        &mut self,
        rect: Rect,
        style: &FrameStyle,
    ) -> Result<JsValue, JsRenderError> {
        let args = Array::of5(
            &JsValue::from_f64(rect.x as f64),
            &JsValue::from_f64(rect.y as f64),
            &JsValue::from_f64(rect.width as f64),
            &JsValue::from_f64(rect.height as f64),
            &Self::style_json("createFrame", style)?,
        );
        self.call("createFrame", &args)
    }

    fn create_label(
        &mut self,
        text: &str,
        style: &LabelStyle,
    ) -> Result<JsValue, JsRenderError> {
        let args = Array::of2(
            &JsValue::from_str(text),
            &Self::style_json("createLabel", style)?,
        );
        self.call("createLabel", &args)
    }

    fn measure(&self, handle: &JsValue) -> Result<Size, JsRenderError> {
        let bbox = self.call("measure", &Array::of1(handle))?;
        Ok(Size::new(
            read_f32("measure", &bbox, "width")?,
            read_f32("measure", &bbox, "height")?,
        ))
    }

    fn reposition(&mut self, handle: &JsValue, x: f32, y: f32) -> Result<(), JsRenderError> {
        let args = Array::of3(
            handle,
            &JsValue::from_f64(x as f64),
            &JsValue::from_f64(y as f64),
        );
        self.call("reposition", &args).map(|_| ())
    }

    fn destroy(&mut self, handle: &JsValue) -> Result<(), JsRenderError> {
        self.call("destroy", &Array::of1(handle)).map(|_| ())
    }
}

/// Snapshot of a JS chart for the duration of one call.
pub(crate) struct JsHost {
    id: HostId,
    display_errors: bool,
    viewport: Size,
    renderer: JsRenderer,
}

impl Host for JsHost {
    type Renderer = JsRenderer;

    fn id(&self) -> HostId {
        self.id
    }

    fn display_errors(&self) -> bool {
        self.display_errors
    }

    fn viewport(&self) -> Size {
        self.viewport
    }

    fn renderer(&mut self) -> &mut JsRenderer {
        &mut self.renderer
    }
}

fn to_js(err: OverlayError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Error overlay exposed to JavaScript. One instance serves many charts,
/// keyed by the host id the caller passes in.
///
/// # Example JSON Config
/// ```json
/// { "style": { "frame_margin": 2.0, "alert_color": "#ff0000" } }
/// ```
#[wasm_bindgen]
pub struct WasmErrorOverlay {
    controller: ErrorOverlayController<JsHost>,
}

#[wasm_bindgen]
impl WasmErrorOverlay {
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<WasmErrorOverlay, JsValue> {
        let config: OverlayConfig = serde_json::from_str(config_json)
            .map_err(|e| to_js(OverlayError::InvalidConfig(e.to_string())))?;

        Ok(WasmErrorOverlay {
            controller: ErrorOverlayController::new(config.style),
        })
    }

    /// Show the catalog message for `code` on chart `host_id`.
    pub fn raise_code(
        &mut self,
        host_id: u64,
        display_errors: bool,
        width: f32,
        height: f32,
        renderer: JsValue,
        code: u32,
    ) -> Result<(), JsValue> {
        let input = ErrorInput::Code(code);
        self.raise(host_id, display_errors, width, height, renderer, input)
    }

    /// Show `message` verbatim on chart `host_id`.
    pub fn raise_message(
        &mut self,
        host_id: u64,
        display_errors: bool,
        width: f32,
        height: f32,
        renderer: JsValue,
        message: String,
    ) -> Result<(), JsValue> {
        let input = ErrorInput::Message(message);
        self.raise(host_id, display_errors, width, height, renderer, input)
    }

    /// Call from the chart's beforeRedraw hook.
    pub fn before_redraw(&mut self, host_id: u64, renderer: JsValue) -> Result<(), JsValue> {
        let mut host = JsHost {
            id: HostId::new(host_id),
            display_errors: true,
            viewport: Size::default(),
            renderer: JsRenderer::new(renderer),
        };
        self.controller.on_before_redraw(&mut host).map_err(to_js)
    }

    pub fn is_displaying_error(&self, host_id: u64) -> bool {
        self.controller.is_displaying_error(HostId::new(host_id))
    }

    /// Drop state for a destroyed chart.
    pub fn release_host(&mut self, host_id: u64) -> bool {
        self.controller.release_host(HostId::new(host_id))
    }
}

impl WasmErrorOverlay {
    fn raise(
        &mut self,
        host_id: u64,
        display_errors: bool,
        width: f32,
        height: f32,
        renderer: JsValue,
        input: ErrorInput,
    ) -> Result<(), JsValue> {
        let mut host = JsHost {
            id: HostId::new(host_id),
            display_errors,
            viewport: Size::new(width, height),
            renderer: JsRenderer::new(renderer),
        };
        self.controller.on_error_raised(&mut host, &input).map_err(to_js)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_creation_works() {
        let overlay = WasmErrorOverlay::new(r#"{"style":{"frame_margin":4.0}}"#);
        assert!(overlay.is_ok());
    }

    #[test]
    fn empty_config_uses_defaults() {
        let overlay = WasmErrorOverlay::new("{}").ok().unwrap();
        assert_eq!(overlay.controller.style().frame_margin, 2.0);
        assert!(!overlay.is_displaying_error(1));
    }
}
