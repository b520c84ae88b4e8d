//! Shared domain models: collections, media types, and listing entries.

mod entry;
mod media;

pub use entry::{MediaEntry, ModelEntry};
pub use media::{Collection, MediaType};
