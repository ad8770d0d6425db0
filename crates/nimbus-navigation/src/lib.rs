//! Nimbus navigation
//!
//! Classifies free-text address input and maps the application's
//! internal pages to and from their chrome-less embedded URLs.

mod input;
mod routes;

pub use input::{InputResolver, Resolution, DEFAULT_SEARCH_TEMPLATE};
pub use routes::{
    display_title, display_url, embedded_url, is_embedded, InternalRoute, EMBEDDED_MODE_MARKER,
};
