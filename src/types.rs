// Strong typing over strings. Newtypes for host identity, geometry, and styling.

use serde::{Deserialize, Serialize};

/// Identity of a host component instance. Newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HostId(u64);

impl HostId {
    pub fn new(id: u64) -> Self {
        HostId(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

/// Width and height in host units (pixels or equivalent).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Size { width, height }
    }
}

/// Axis-aligned rectangle in host units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    /// Shrink by `margin` on every edge. Never produces a negative extent.
    pub fn inset(&self, margin: f32) -> Self {
        Rect {
            x: self.x + margin,
            y: self.y + margin,
            width: (self.width - 2.0 * margin).max(0.0),
            height: (self.height - 2.0 * margin).max(0.0),
        }
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// CSS-style colour string (e.g. `#ff0000`). Opaque to this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color(String);

impl Color {
    pub fn new(value: impl Into<String>) -> Self {
        Color(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Stacking order. Higher draws on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct ZIndex(i32);

impl ZIndex {
    pub fn new(z: i32) -> Self {
        ZIndex(z)
    }

    pub fn as_i32(&self) -> i32 {
        self.0
    }
}

/// What the host raised: a catalog code or an already formatted message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorInput {
    Code(u32),
    Message(String),
}

impl From<u32> for ErrorInput {
    fn from(code: u32) -> Self {
        ErrorInput::Code(code)
    }
}

impl From<&str> for ErrorInput {
    fn from(message: &str) -> Self {
        ErrorInput::Message(message.to_string())
    }
}

impl From<String> for ErrorInput {
    fn from(message: String) -> Self {
        ErrorInput::Message(message)
    }
}

/// Style handed to the renderer for the alert frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameStyle {
    pub stroke_width: f32,
    pub stroke: Color,
    pub z_index: ZIndex,
}

/// Style handed to the renderer for the message label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelStyle {
    /// Width available to the wrapped text.
    pub text_width: f32,
    /// Width of the label box including padding.
    pub box_width: f32,
    pub padding: f32,
    pub fill: Color,
    pub color: Color,
    pub z_index: ZIndex,
}

/// Overlay appearance. Defaults match the stock chart alert look.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayStyle {
    /// Inset of the frame from each viewport edge.
    #[serde(default = "default_frame_margin")]
    pub frame_margin: f32,
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f32,
    #[serde(default = "default_alert_color")]
    pub alert_color: Color,
    #[serde(default = "default_text_color")]
    pub text_color: Color,
    /// Padding inside the label box, on each side.
    #[serde(default = "default_label_padding")]
    pub label_padding: f32,
    /// Above series content, below tooltips and menus.
    #[serde(default = "default_frame_z_index")]
    pub frame_z_index: ZIndex,
    #[serde(default = "default_label_z_index")]
    pub label_z_index: ZIndex,
}

fn default_frame_margin() -> f32 {
    2.0
}

fn default_stroke_width() -> f32 {
    4.0
}

fn default_alert_color() -> Color {
    Color::new("#ff0000")
}

fn default_text_color() -> Color {
    Color::new("#ffffff")
}

fn default_label_padding() -> f32 {
    8.0
}

fn default_frame_z_index() -> ZIndex {
    ZIndex::new(3)
}

fn default_label_z_index() -> ZIndex {
    ZIndex::new(10)
}

impl Default for OverlayStyle {
    fn default() -> Self {
        OverlayStyle {
            frame_margin: default_frame_margin(),
            stroke_width: default_stroke_width(),
            alert_color: default_alert_color(),
            text_color: default_text_color(),
            label_padding: default_label_padding(),
            frame_z_index: default_frame_z_index(),
            label_z_index: default_label_z_index(),
        }
    }
}

impl OverlayStyle {
    /// Frame geometry and style for a viewport of the given size.
    pub fn frame_for(&self, viewport: Size) -> (Rect, FrameStyle) {
        let rect = Rect::new(0.0, 0.0, viewport.width, viewport.height).inset(self.frame_margin);
        let style = FrameStyle {
            stroke_width: self.stroke_width,
            stroke: self.alert_color.clone(),
            z_index: self.frame_z_index,
        };
        (rect, style)
    }

    /// Label style for a viewport of the given size.
    pub fn label_for(&self, viewport: Size) -> LabelStyle {
        LabelStyle {
            text_width: (viewport.width - 2.0 * self.label_padding).max(0.0),
            box_width: viewport.width,
            padding: self.label_padding,
            fill: self.alert_color.clone(),
            color: self.text_color.clone(),
            z_index: self.label_z_index,
        }
    }
}

/// Overlay configuration passed from JS.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OverlayConfig {
    #[serde(default)]
    pub style: OverlayStyle,
}

/// Host-side chart options this crate registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostOptions {
    /// Show errors on the chart. When false they only reach the log.
    #[serde(default = "default_true")]
    pub display_errors: bool,
}

fn default_true() -> bool {
    true
}

impl Default for HostOptions {
    fn default() -> Self {
        HostOptions {
            display_errors: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inset_shrinks_both_edges() {
        let rect = Rect::new(0.0, 0.0, 600.0, 400.0).inset(2.0);
        assert_eq!(rect, Rect::new(2.0, 2.0, 596.0, 396.0));
    }

    #[test]
    fn inset_never_negative() {
        let rect = Rect::new(0.0, 0.0, 3.0, 1.0).inset(2.0);
        assert_eq!(rect.width, 0.0);
        assert_eq!(rect.height, 0.0);
    }

    #[test]
    fn error_input_from_json() {
        let code: ErrorInput = serde_json::from_str("13").unwrap();
        assert_eq!(code, ErrorInput::Code(13));
        let message: ErrorInput = serde_json::from_str(r#""custom text""#).unwrap();
        assert_eq!(message, ErrorInput::Message("custom text".to_string()));
    }

    #[test]
    fn style_defaults_fill_missing_fields() {
        let style: OverlayStyle = serde_json::from_str(r#"{"stroke_width": 1.0}"#).unwrap();
        assert_eq!(style.stroke_width, 1.0);
        assert_eq!(style.frame_margin, 2.0);
        assert_eq!(style.alert_color, Color::new("#ff0000"));
    }

    #[test]
    fn host_options_display_errors_defaults_true() {
        let options: HostOptions = serde_json::from_str("{}").unwrap();
        assert!(options.display_errors);
        let options: HostOptions = serde_json::from_str(r#"{"displayErrors": false}"#).unwrap();
        assert!(!options.display_errors);
    }

    #[test]
    fn label_text_width_leaves_padding() {
        let style = OverlayStyle::default().label_for(Size::new(600.0, 400.0));
        assert_eq!(style.text_width, 584.0);
        assert_eq!(style.box_width, 600.0);
    }
}
