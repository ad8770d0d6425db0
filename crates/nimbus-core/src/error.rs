//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] nimbus_storage::StorageError),

    #[error("Tab error: {0}")]
    Tab(#[from] nimbus_tabs::TabError),

    #[error("Filter error: {0}")]
    Filter(#[from] nimbus_filter::FilterError),

    #[error("Surface error: {0}")]
    Surface(#[from] nimbus_surface::SurfaceError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
