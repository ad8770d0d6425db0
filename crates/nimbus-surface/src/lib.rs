//! Nimbus surface layer
//!
//! A surface is an isolated page-hosting view: it loads and renders a
//! URL with its own navigation history and network session,
//! independent of every other surface. The host runtime (the embedding
//! shell) implements [`Surface`] and [`SurfaceFactory`]; the
//! coordinator only ever talks to these traits.
//!
//! The crate also carries the content collaborators that inspect
//! pages from outside the surface: the media scanner and the reader
//! extractor.

mod error;
mod media;
mod reader;
mod surface;

pub use error::SurfaceError;
pub use media::{HttpMediaScanner, MediaScan, MediaScanner};
pub use reader::{ReaderContent, ReaderExtractor};
pub use surface::{
    Rect, SessionId, StoragePartition, Surface, SurfaceFactory, SurfaceOptions, SurfacePlacement,
};

pub type Result<T> = std::result::Result<T, SurfaceError>;
