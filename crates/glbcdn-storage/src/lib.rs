//! File-backed storage for the model and media collections.
//!
//! The directory listing is the source of truth: there is no index or
//! manifest. Everything here runs on `tokio::fs` and is safe to call from
//! concurrent request handlers; filename collisions are resolved with
//! exclusive-create writes rather than check-then-write.

pub mod error;
pub mod filename;
pub mod roots;
pub mod store;
pub mod validate;

pub use error::{StorageError, StorageResult};
pub use filename::{is_safe_name, sanitize_filename};
pub use roots::RootResolver;
pub use store::{FileStore, ModelListing, StoredFile};
pub use validate::{resolve_media_type, validate_extension, validate_size, ValidationError};
