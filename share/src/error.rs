use thiserror::Error;

/// Errors that can occur when sharing content.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShareError {
    /// The content or options passed to `share` are malformed.
    ///
    /// Always reported before any native UI is presented.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The current platform has no native share sheet.
    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    /// An error occurred in the underlying platform implementation.
    #[error("Platform error: {0}")]
    PlatformError(String),
}

impl ShareError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}
