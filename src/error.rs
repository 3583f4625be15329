// Typed errors with thiserror. Renderer failures pass through untouched.

use thiserror::Error;

/// Result alias for overlay operations.
pub type OverlayResult<T> = Result<T, OverlayError>;

/// Overlay error types.
#[derive(Error, Debug)]
pub enum OverlayError {
    #[error("Unknown error code: #{0}")]
    UnknownErrorCode(u32),

    #[error("Duplicate error code in catalog: #{0}")]
    DuplicateErrorCode(u32),

    /// Failure reported by the host's rendering engine.
    #[error(transparent)]
    Render(Box<dyn std::error::Error + 'static>),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl OverlayError {
    /// Wrap a renderer error without altering its message or source chain.
    pub fn render<E>(err: E) -> Self
    where
        E: std::error::Error + 'static,
    {
        OverlayError::Render(Box::new(err))
    }
}

impl From<serde_json::Error> for OverlayError {
    fn from(err: serde_json::Error) -> Self {
        OverlayError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error)]
    #[error("canvas lost")]
    struct CanvasLost;

    #[test]
    fn error_display() {
        let err = OverlayError::UnknownErrorCode(9999);
        assert!(err.to_string().contains("9999"));
    }

    #[test]
    fn render_error_is_transparent() {
        let err = OverlayError::render(CanvasLost);
        assert_eq!(err.to_string(), "canvas lost");
    }

    #[test]
    fn serde_error_converts() {
        let parse = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: OverlayError = parse.into();
        assert!(matches!(err, OverlayError::Serialization(_)));
    }
}
