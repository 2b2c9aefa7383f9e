use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreshotError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Config parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
    #[error("Screen '{screen}' has no title for locale '{locale}'")]
    MissingLocale { screen: String, locale: String },
    #[error("Screenshot has no pixels: {}", path.display())]
    EmptyScreenshot { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, StoreshotError>;
