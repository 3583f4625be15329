//! Shared fixtures for integration tests.

#![allow(dead_code)]

pub mod logging;

use overlay_core::{
    FrameStyle, Host, HostId, LabelStyle, PrimitiveId, Rect, Renderer, SceneError, SceneRenderer,
    Size,
};
use thiserror::Error;

/// Renderer operation a [`FlakyRenderer`] can be told to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    CreateFrame,
    CreateLabel,
    Measure,
    Reposition,
    Destroy,
}

#[derive(Debug, Error)]
pub enum FlakyError {
    #[error("injected failure in {0:?}")]
    Injected(Op),
    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// Scene renderer that fails the chosen operations on demand.
#[derive(Debug, Default)]
pub struct FlakyRenderer {
    pub scene: SceneRenderer,
    pub fail_on: Vec<Op>,
}

impl FlakyRenderer {
    fn check(&self, op: Op) -> Result<(), FlakyError> {
        if self.fail_on.contains(&op) {
            Err(FlakyError::Injected(op))
        } else {
            Ok(())
        }
    }
}

impl Renderer for FlakyRenderer {
    type Handle = PrimitiveId;
    type Error = FlakyError;

    fn create_frame(
        &mut self,
        rect: Rect,
        style: &FrameStyle,
    ) -> Result<PrimitiveId, FlakyError> {
        self.check(Op::CreateFrame)?;
        Ok(self.scene.create_frame(rect, style)?)
    }

    fn create_label(
        &mut self,
        text: &str,
        style: &LabelStyle,
    ) -> Result<PrimitiveId, FlakyError> {
        self.check(Op::CreateLabel)?;
        Ok(self.scene.create_label(text, style)?)
    }

    fn measure(&self, handle: &PrimitiveId) -> Result<Size, FlakyError> {
        self.check(Op::Measure)?;
        Ok(self.scene.measure(handle)?)
    }

    fn reposition(&mut self, handle: &PrimitiveId, x: f32, y: f32) -> Result<(), FlakyError> {
        self.check(Op::Reposition)?;
        Ok(self.scene.reposition(handle, x, y)?)
    }

    fn destroy(&mut self, handle: &PrimitiveId) -> Result<(), FlakyError> {
        self.check(Op::Destroy)?;
        Ok(self.scene.destroy(handle)?)
    }
}

/// Host whose renderer can be made to fail.
#[derive(Debug)]
pub struct FlakyHost {
    pub id: HostId,
    pub display_errors: bool,
    pub viewport: Size,
    pub renderer: FlakyRenderer,
}

impl FlakyHost {
    pub fn new(id: u64) -> Self {
        FlakyHost {
            id: HostId::new(id),
            display_errors: true,
            viewport: Size::new(800.0, 500.0),
            renderer: FlakyRenderer::default(),
        }
    }
}

impl Host for FlakyHost {
    type Renderer = FlakyRenderer;

    fn id(&self) -> HostId {
        self.id
    }

    fn display_errors(&self) -> bool {
        self.display_errors
    }

    fn viewport(&self) -> Size {
        self.viewport
    }

    fn renderer(&mut self) -> &mut FlakyRenderer {
        &mut self.renderer
    }
}
