// Retained in-memory renderer and host for headless charts.
// Text is measured with fixed glyph metrics and greedy word wrap.

use std::collections::BTreeMap;

use thiserror::Error;
use unicode_width::UnicodeWidthStr;

use crate::host::Host;
use crate::render::Renderer;
use crate::types::*;

/// Handle to a primitive in a [`SceneRenderer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PrimitiveId(u64);

impl PrimitiveId {
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("Unknown primitive: {0:?}")]
    UnknownPrimitive(PrimitiveId),

    #[error("Primitive {0:?} is not a label")]
    NotALabel(PrimitiveId),
}

/// A visual primitive held by the scene.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Frame {
        rect: Rect,
        style: FrameStyle,
    },
    Label {
        text: String,
        style: LabelStyle,
        x: f32,
        y: f32,
    },
}

impl Primitive {
    pub fn z_index(&self) -> ZIndex {
        match self {
            Primitive::Frame { style, .. } => style.z_index,
            Primitive::Label { style, .. } => style.z_index,
        }
    }
}

/// Fixed glyph metrics used to lay out label text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    /// Advance of a single glyph column.
    pub column_width: f32,
    pub line_height: f32,
}

impl Default for TextMetrics {
    fn default() -> Self {
        TextMetrics {
            column_width: 7.0,
            line_height: 16.0,
        }
    }
}

/// In-memory renderer. Primitives live until destroyed.
#[derive(Debug, Default)]
pub struct SceneRenderer {
    metrics: TextMetrics,
    next_id: u64,
    primitives: BTreeMap<PrimitiveId, Primitive>,
}

impl SceneRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_metrics(metrics: TextMetrics) -> Self {
        SceneRenderer {
            metrics,
            ..Self::default()
        }
    }

    pub fn live_count(&self) -> usize {
        self.primitives.len()
    }

    pub fn get(&self, id: PrimitiveId) -> Option<&Primitive> {
        self.primitives.get(&id)
    }

    /// Live primitives in draw order: z-index, then creation order.
    pub fn primitives(&self) -> Vec<(PrimitiveId, &Primitive)> {
        let mut ordered: Vec<_> = self.primitives.iter().map(|(id, p)| (*id, p)).collect();
        ordered.sort_by_key(|(id, p)| (p.z_index(), *id));
        ordered
    }

    /// Text of every live label, in creation order.
    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.primitives.values().filter_map(|p| match p {
            Primitive::Label { text, .. } => Some(text.as_str()),
            Primitive::Frame { .. } => None,
        })
    }

    /// Rendered label size: box width by wrapped text height plus padding.
    pub fn measure_label(&self, id: PrimitiveId) -> Result<Size, SceneError> {
        match self.primitives.get(&id) {
            Some(Primitive::Label { text, style, .. }) => {
                let columns =
                    (style.text_width / self.metrics.column_width).floor().max(1.0) as usize;
                let lines = wrap_lines(text, columns).len() as f32;
                Ok(Size::new(
                    style.box_width,
                    lines * self.metrics.line_height + 2.0 * style.padding,
                ))
            }
            Some(Primitive::Frame { .. }) => Err(SceneError::NotALabel(id)),
            None => Err(SceneError::UnknownPrimitive(id)),
        }
    }

    fn insert(&mut self, primitive: Primitive) -> PrimitiveId {
        let id = PrimitiveId(self.next_id);
        self.next_id += 1;
        self.primitives.insert(id, primitive);
        id
    }
}

impl Renderer for SceneRenderer {
    type Handle = PrimitiveId;
    type Error = SceneError;

    fn create_frame(
        &mut self,
        rect: Rect,
        style: &FrameStyle,
    ) -> Result<PrimitiveId, SceneError> {
        Ok(self.insert(Primitive::Frame {
            rect,
            style: style.clone(),
        }))
    }

    fn create_label(
        &mut self,
        text: &str,
        style: &LabelStyle,
    ) -> Result<PrimitiveId, SceneError> {
        Ok(self.insert(Primitive::Label {
            text: text.to_string(),
            style: style.clone(),
            x: 0.0,
            y: 0.0,
        }))
    }

    fn measure(&self, handle: &PrimitiveId) -> Result<Size, SceneError> {
        match self.primitives.get(handle) {
            Some(Primitive::Frame { rect, .. }) => Ok(Size::new(rect.width, rect.height)),
            Some(Primitive::Label { .. }) => self.measure_label(*handle),
            None => Err(SceneError::UnknownPrimitive(*handle)),
        }
    }

    fn reposition(
        &mut self,
        handle: &PrimitiveId,
        new_x: f32,
        new_y: f32,
    ) -> Result<(), SceneError> {
        match self.primitives.get_mut(handle) {
            Some(Primitive::Frame { rect, .. }) => {
                rect.x = new_x;
                rect.y = new_y;
                Ok(())
            }
            Some(Primitive::Label { x, y, .. }) => {
                *x = new_x;
                *y = new_y;
                Ok(())
            }
            None => Err(SceneError::UnknownPrimitive(*handle)),
        }
    }

    fn destroy(&mut self, handle: &PrimitiveId) -> Result<(), SceneError> {
        self.primitives
            .remove(handle)
            .map(|_| ())
            .ok_or(SceneError::UnknownPrimitive(*handle))
    }
}

/// Greedy word wrap by display columns. Explicit newlines always break.
/// Words wider than a line get a line of their own.
fn wrap_lines(text: &str, columns: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut width = 0;
        for word in paragraph.split_whitespace() {
            let word_width = word.width();
            if width > 0 && width + 1 + word_width > columns {
                lines.push(std::mem::take(&mut line));
                width = 0;
            }
            if width > 0 {
                line.push(' ');
                width += 1;
            }
            line.push_str(word);
            width += word_width;
        }
        lines.push(line);
    }
    lines
}

/// A headless chart: identity, options, viewport, and a [`SceneRenderer`].
#[derive(Debug)]
pub struct SceneHost {
    id: HostId,
    options: HostOptions,
    viewport: Size,
    renderer: SceneRenderer,
}

impl SceneHost {
    pub fn new(id: HostId, viewport: Size) -> Self {
        SceneHost {
            id,
            options: HostOptions::default(),
            viewport,
            renderer: SceneRenderer::new(),
        }
    }

    pub fn with_options(mut self, options: HostOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_renderer(mut self, renderer: SceneRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn set_options(&mut self, options: HostOptions) {
        self.options = options;
    }

    pub fn resize(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    pub fn scene(&self) -> &SceneRenderer {
        &self.renderer
    }
}

impl Host for SceneHost {
    type Renderer = SceneRenderer;

    fn id(&self) -> HostId {
        self.id
    }

    fn display_errors(&self) -> bool {
        self.options.display_errors
    }

    fn viewport(&self) -> Size {
        self.viewport
    }

    fn renderer(&mut self) -> &mut SceneRenderer {
        &mut self.renderer
    }
}
