use thiserror::Error;

/// Result type for request and config parsing
pub type Result<T> = std::result::Result<T, RequestError>;

/// Errors raised while reading a house request or a layout config.
///
/// The layout engine itself never fails; these only surface at the input
/// boundary.
#[derive(Error, Debug)]
pub enum RequestError {
    #[error("Malformed request JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid story count {0}: a house needs at least one story")]
    InvalidStories(u32),

    #[error("Invalid plot size: {0}")]
    InvalidPlot(String),

    #[error("Invalid layout config: {field} {reason}")]
    InvalidConfig { field: &'static str, reason: String },
}
