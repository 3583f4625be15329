// Rendering seam. The host's engine owns primitives; the controller only holds handles.

use crate::types::{FrameStyle, LabelStyle, Rect, Size};

/// Primitive operations the overlay needs from the host's rendering engine.
pub trait Renderer {
    /// Opaque reference to an engine-owned primitive.
    type Handle;
    type Error: std::error::Error + 'static;

    fn create_frame(
        &mut self,
        rect: Rect,
        style: &FrameStyle,
    ) -> Result<Self::Handle, Self::Error>;

    /// Create a label at the origin. Final placement happens after [`Renderer::measure`].
    fn create_label(
        &mut self,
        text: &str,
        style: &LabelStyle,
    ) -> Result<Self::Handle, Self::Error>;

    /// Rendered size of a primitive, padding included.
    fn measure(&self, handle: &Self::Handle) -> Result<Size, Self::Error>;

    fn reposition(&mut self, handle: &Self::Handle, x: f32, y: f32) -> Result<(), Self::Error>;

    /// Destroy a primitive. The caller keeps the handle until this succeeds,
    /// so a failed destroy can be retried.
    fn destroy(&mut self, handle: &Self::Handle) -> Result<(), Self::Error>;
}
