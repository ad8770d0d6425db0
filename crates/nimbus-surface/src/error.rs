//! Surface error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SurfaceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("No readable content found")]
    NoContent,
}
