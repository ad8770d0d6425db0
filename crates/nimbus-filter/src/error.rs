//! Filter error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP status {0} fetching filter list")]
    Status(u16),

    #[error("No filter list sources configured")]
    NoSources,
}
