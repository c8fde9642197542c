use thiserror::Error;

/// Reasons an eyedropper pick did not produce a color.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PickError {
    #[error("color pick was cancelled")]
    Cancelled,
    #[error("no eyedropper is available on this platform")]
    Unavailable,
}

/// Errors that can occur while exporting the canvas
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("canvas has no pixels to export")]
    EmptyCanvas,
    #[error("failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),
    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),
    #[error("browser download failed: {0}")]
    Web(String),
}

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("invalid settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
}
