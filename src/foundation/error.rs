/// Convenience result type used across the engine.
pub type StudioResult<T> = Result<T, StudioError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Every variant is recoverable at the call site; none of them should tear down a session.
#[derive(thiserror::Error, Debug)]
pub enum StudioError {
    /// Pixel source is empty, zero-sized, or could not be decoded.
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// Modifier target exposes no addressable vertex buffer.
    #[error("unsupported geometry: {0}")]
    UnsupportedGeometry(String),

    /// A heightfield lookup fell outside the pixel grid.
    ///
    /// Only produced by internal index helpers; the public sampler maps it to "no sample".
    #[error("sample out of range: {0}")]
    OutOfRangeSample(String),

    /// Invalid caller-provided data or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// A background job was cancelled before its result was applied.
    #[error("cancelled: {0}")]
    Cancelled(String),

    /// Lookup of an object id that is not in the scene.
    #[error("not found: {0}")]
    NotFound(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StudioError {
    /// Build a [`StudioError::InvalidImage`] value.
    pub fn invalid_image(msg: impl Into<String>) -> Self {
        Self::InvalidImage(msg.into())
    }

    /// Build a [`StudioError::UnsupportedGeometry`] value.
    pub fn unsupported_geometry(msg: impl Into<String>) -> Self {
        Self::UnsupportedGeometry(msg.into())
    }

    /// Build a [`StudioError::OutOfRangeSample`] value.
    pub fn out_of_range(msg: impl Into<String>) -> Self {
        Self::OutOfRangeSample(msg.into())
    }

    /// Build a [`StudioError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`StudioError::Cancelled`] value.
    pub fn cancelled(msg: impl Into<String>) -> Self {
        Self::Cancelled(msg.into())
    }

    /// Build a [`StudioError::NotFound`] value.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
