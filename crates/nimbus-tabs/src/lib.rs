//! Nimbus tab management
//!
//! The view registry owns every tab and its page-hosting surface.
//! Tab ids are integers assigned monotonically and never reused within
//! a process lifetime, so iteration over the registry is insertion
//! order.

mod error;
mod phase;
mod registry;
mod tab;

pub use error::TabError;
pub use phase::TabPhase;
pub use registry::ViewRegistry;
pub use tab::{Tab, TabId};

pub type Result<T> = std::result::Result<T, TabError>;
