use thiserror::Error;

/// Convenience alias for fallible engine setup.
pub type EngineResult<T> = Result<T, EngineError>;

/// Unrecoverable engine failures. These only occur during setup; per-frame
/// failures are logged and never propagated.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("engine setup failed: {0}")]
    Setup(String),
    #[error("texture allocation failed: {0}")]
    Texture(String),
}
