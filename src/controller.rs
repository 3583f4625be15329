// Overlay lifecycle: Idle <-> Displaying, per host instance.
// Overlays are torn down and rebuilt, never repositioned in place.

use std::borrow::Cow;
use std::collections::HashMap;

use tracing::{debug, warn};

use crate::catalog::ErrorCatalog;
use crate::error::{OverlayError, OverlayResult};
use crate::host::Host;
use crate::render::Renderer;
use crate::types::*;

type HandleOf<H> = <<H as Host>::Renderer as Renderer>::Handle;

/// Handles held for one host, in creation order (frame, label).
///
/// `message` is `None` when the overlay is gone but some primitives could not
/// be destroyed yet; those stay here until a later teardown removes them.
struct OverlayState<T> {
    handles: Vec<T>,
    message: Option<String>,
}

/// Shows an error overlay on a host and removes it before the next redraw.
pub struct ErrorOverlayController<H: Host> {
    catalog: Cow<'static, ErrorCatalog>,
    style: OverlayStyle,
    states: HashMap<HostId, OverlayState<HandleOf<H>>>,
}

impl<H: Host> ErrorOverlayController<H> {
    /// Controller backed by the built-in catalog.
    pub fn new(style: OverlayStyle) -> Self {
        Self::from_parts(Cow::Borrowed(ErrorCatalog::builtin()), style)
    }

    pub fn with_catalog(catalog: ErrorCatalog, style: OverlayStyle) -> Self {
        Self::from_parts(Cow::Owned(catalog), style)
    }

    fn from_parts(catalog: Cow<'static, ErrorCatalog>, style: OverlayStyle) -> Self {
        ErrorOverlayController {
            catalog,
            style,
            states: HashMap::new(),
        }
    }

    pub fn catalog(&self) -> &ErrorCatalog {
        &self.catalog
    }

    pub fn style(&self) -> &OverlayStyle {
        &self.style
    }

    /// React to an error raised by `host`.
    ///
    /// A catalog code that cannot be resolved fails with
    /// [`OverlayError::UnknownErrorCode`] before anything on screen changes.
    /// Otherwise any visible overlay is replaced by a fresh one.
    pub fn on_error_raised(&mut self, host: &mut H, input: &ErrorInput) -> OverlayResult<()> {
        let id = host.id();
        if !host.display_errors() {
            warn!(host = id.as_u64(), ?input, "displayErrors is off, overlay skipped");
            return Ok(());
        }

        let message = self.resolve(input)?;

        // At most one overlay per host.
        self.teardown(host)?;

        let viewport = host.viewport();
        let mut leftover = Vec::new();
        let built = build_overlay(
            &self.style,
            host.renderer(),
            viewport,
            &message,
            &mut leftover,
        );
        if !leftover.is_empty() {
            self.states.insert(
                id,
                OverlayState {
                    handles: leftover,
                    message: None,
                },
            );
        }

        let handles = built?;
        debug!(
            host = id.as_u64(),
            width = viewport.width,
            height = viewport.height,
            "error overlay displayed"
        );
        self.states.insert(
            id,
            OverlayState {
                handles,
                message: Some(message),
            },
        );
        Ok(())
    }

    /// Destroy any overlay on `host`. Runs before every layout pass.
    pub fn on_before_redraw(&mut self, host: &mut H) -> OverlayResult<()> {
        self.teardown(host)
    }

    pub fn is_displaying_error(&self, id: HostId) -> bool {
        self.displayed_message(id).is_some()
    }

    /// Number of renderer handles currently held for `id`, including any
    /// whose destroy failed and is waiting for a retry.
    pub fn handle_count(&self, id: HostId) -> usize {
        self.states.get(&id).map_or(0, |state| state.handles.len())
    }

    /// Text of the visible overlay on `id`, if any.
    pub fn displayed_message(&self, id: HostId) -> Option<&str> {
        self.states.get(&id).and_then(|state| state.message.as_deref())
    }

    /// Forget a host that is being destroyed. Its renderer disposes the primitives.
    pub fn release_host(&mut self, id: HostId) -> bool {
        self.states.remove(&id).is_some()
    }

    /// Hosts currently displaying an overlay.
    pub fn tracked_hosts(&self) -> usize {
        self.states
            .values()
            .filter(|state| state.message.is_some())
            .count()
    }

    fn resolve(&self, input: &ErrorInput) -> OverlayResult<String> {
        match input {
            ErrorInput::Code(code) => self.catalog.format_message(*code),
            ErrorInput::Message(message) => Ok(message.clone()),
        }
    }

    /// Goes Idle even when a destroy fails; the handles that failed are kept
    /// and tried again on the next teardown.
    fn teardown(&mut self, host: &mut H) -> OverlayResult<()> {
        let id = host.id();
        let Some(state) = self.states.remove(&id) else {
            return Ok(());
        };

        debug!(
            host = id.as_u64(),
            handles = state.handles.len(),
            "tearing down error overlay"
        );
        let (remaining, result) = destroy_all(host.renderer(), state.handles);
        if !remaining.is_empty() {
            warn!(
                host = id.as_u64(),
                handles = remaining.len(),
                "overlay primitives kept for retry"
            );
            self.states.insert(
                id,
                OverlayState {
                    handles: remaining,
                    message: None,
                },
            );
        }
        result
    }
}

impl<H: Host> Default for ErrorOverlayController<H> {
    fn default() -> Self {
        Self::new(OverlayStyle::default())
    }
}

/// Create the frame and label, then move the label onto the bottom edge.
///
/// On failure the partial overlay is destroyed; anything that cannot be
/// destroyed is pushed onto `leftover`.
fn build_overlay<R: Renderer>(
    style: &OverlayStyle,
    renderer: &mut R,
    viewport: Size,
    message: &str,
    leftover: &mut Vec<R::Handle>,
) -> OverlayResult<Vec<R::Handle>> {
    let (rect, frame_style) = style.frame_for(viewport);
    let frame = renderer
        .create_frame(rect, &frame_style)
        .map_err(OverlayError::render)?;

    let label_style = style.label_for(viewport);
    let label = match renderer.create_label(message, &label_style) {
        Ok(label) => label,
        Err(err) => {
            discard(renderer, vec![frame], leftover);
            return Err(OverlayError::render(err));
        }
    };

    // Bottom edge of the label sits on the bottom edge of the viewport.
    let placed = renderer
        .measure(&label)
        .and_then(|size| renderer.reposition(&label, 0.0, viewport.height - size.height));
    if let Err(err) = placed {
        discard(renderer, vec![frame, label], leftover);
        return Err(OverlayError::render(err));
    }

    Ok(vec![frame, label])
}

/// Destroy every handle, in order. Returns the handles that could not be
/// destroyed, still in order, along with the first failure.
fn destroy_all<R: Renderer>(
    renderer: &mut R,
    handles: Vec<R::Handle>,
) -> (Vec<R::Handle>, OverlayResult<()>) {
    let mut remaining = Vec::new();
    let mut first_error = None;
    for handle in handles {
        if let Err(err) = renderer.destroy(&handle) {
            remaining.push(handle);
            if first_error.is_none() {
                first_error = Some(err);
            } else {
                warn!(error = %err, "failed to destroy overlay primitive");
            }
        }
    }
    let result = match first_error {
        Some(err) => Err(OverlayError::render(err)),
        None => Ok(()),
    };
    (remaining, result)
}

/// Clean up a half-built overlay. The build error is the one that propagates.
fn discard<R: Renderer>(
    renderer: &mut R,
    handles: Vec<R::Handle>,
    leftover: &mut Vec<R::Handle>,
) {
    let (remaining, result) = destroy_all(renderer, handles);
    if let Err(err) = result {
        warn!(error = %err, "failed to discard partial error overlay");
    }
    leftover.extend(remaining);
}
