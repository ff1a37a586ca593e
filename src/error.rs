//! Error type shared by every pipeline stage.

/// Errors surfaced by the stencil pipeline.
///
/// Only configuration and input-shape problems are fatal. Degenerate islands
/// and failed label placement are handled locally and never reach the caller.
#[derive(Debug, thiserror::Error)]
pub enum StencilError {
    /// A configuration value or palette request is out of range.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A raw pixel buffer does not match its declared dimensions.
    #[error("buffer size mismatch: expected {expected} bytes, got {actual}")]
    Shape { expected: usize, actual: usize },

    /// The raw buffer uses a channel layout other than gray, RGB or RGBA.
    #[error("unsupported channel count: {0}")]
    UnsupportedChannels(usize),

    /// Configuration JSON could not be parsed or produced.
    #[error("config json: {0}")]
    Json(#[from] serde_json::Error),
}

impl StencilError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, StencilError>;
