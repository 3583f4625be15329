// Host seam: what the overlay reads from the chart that raised the error.

use crate::render::Renderer;
use crate::types::{HostId, Size};

/// A visualization instance that owns a viewport and a rendering engine.
pub trait Host {
    type Renderer: Renderer;

    /// Stable identity for the lifetime of the instance.
    fn id(&self) -> HostId;

    /// The host's `displayErrors` option.
    fn display_errors(&self) -> bool;

    /// Current viewport size.
    fn viewport(&self) -> Size;

    fn renderer(&mut self) -> &mut Self::Renderer;
}
