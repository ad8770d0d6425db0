//! Tab error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TabError {
    #[error("Invalid phase transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },
}
