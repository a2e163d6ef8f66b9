//! Errors raised while loading frames or configuration.
//!
//! The geometry pipeline itself never fails: missing data shows up as `None`
//! or as a dropped primitive.

/// Result type alias for loading operations.
pub type Result<T> = std::result::Result<T, FrameError>;

#[derive(Debug, derive_more::Display)]
pub enum FrameError {
    #[display(fmt = "IO error: {}", _0)]
    Io(std::io::Error),
    #[display(fmt = "JSON error: {}", _0)]
    Json(serde_json::Error),
    #[display(fmt = "Config error: {}", _0)]
    Config(String),
}

impl std::error::Error for FrameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::Config(_) => None,
        }
    }
}

impl From<std::io::Error> for FrameError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for FrameError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}
