//! Validation gate: extension whitelists, size ceilings, and media type
//! inference. Everything here runs before any disk write.

use glbcdn_core::models::{Collection, MediaType};
use thiserror::Error;

use crate::filename::split_extension;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("No file provided")]
    MissingFile,

    #[error("{}", extension_message(.collection))]
    InvalidExtension {
        extension: String,
        collection: Collection,
    },

    #[error("{}", size_message(.collection))]
    FileTooLarge { size: u64, collection: Collection },

    #[error(
        "Unsupported file type. Supported: images (jpg, png, gif, webp, svg) and videos (mp4, webm, mov)"
    )]
    UnknownMediaType,
}

fn extension_message(collection: &Collection) -> String {
    match collection {
        Collection::Models => format!(
            "Invalid file type. Allowed: {}",
            Collection::Models.allowed_extensions().join(", ")
        ),
        other => format!(
            "Invalid file extension for {}. Allowed: {}",
            other
                .media_type()
                .map(|t| t.to_string())
                .unwrap_or_default(),
            other.allowed_extensions().join(", ")
        ),
    }
}

fn size_message(collection: &Collection) -> String {
    let limit_mb = collection.max_bytes() / 1024 / 1024;
    match collection.media_type() {
        Some(media_type) => format!(
            "File size exceeds {}MB limit for {}",
            limit_mb, media_type
        ),
        None => format!("File size exceeds {}MB limit", limit_mb),
    }
}

/// Check a filename's extension against the collection whitelist. Returns
/// the lowercased extension (with dot).
pub fn validate_extension(
    filename: &str,
    collection: Collection,
) -> Result<String, ValidationError> {
    let (_, ext) = split_extension(filename);
    let ext = ext.to_lowercase();
    if !collection.allowed_extensions().contains(&ext.as_str()) {
        return Err(ValidationError::InvalidExtension {
            extension: ext,
            collection,
        });
    }
    Ok(ext)
}

/// Check a payload size against the collection ceiling.
pub fn validate_size(size: u64, collection: Collection) -> Result<(), ValidationError> {
    if size > collection.max_bytes() {
        return Err(ValidationError::FileTooLarge { size, collection });
    }
    Ok(())
}

/// Resolve the media type for an upload: the caller-declared type wins,
/// otherwise infer from the filename extension.
pub fn resolve_media_type(
    declared: Option<&str>,
    filename: &str,
) -> Result<MediaType, ValidationError> {
    if let Some(raw) = declared {
        return MediaType::parse(raw).ok_or(ValidationError::UnknownMediaType);
    }
    MediaType::from_filename(filename).ok_or(ValidationError::UnknownMediaType)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_extension_models() {
        assert_eq!(validate_extension("a.GLB", Collection::Models).unwrap(), ".glb");
        let err = validate_extension("a.png", Collection::Models).unwrap_err();
        assert_eq!(err.to_string(), "Invalid file type. Allowed: .glb, .gltf");
    }

    #[test]
    fn test_validate_extension_media_message_enumerates_allowed() {
        let err = validate_extension("a.glb", Collection::Images).unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("Invalid file extension for image. Allowed: .jpg"));
        assert!(msg.contains(".ico"));
    }

    #[test]
    fn test_validate_size_messages_state_limit_in_mb() {
        let err = validate_size(101 * 1024 * 1024, Collection::Models).unwrap_err();
        assert_eq!(err.to_string(), "File size exceeds 100MB limit");

        let err = validate_size(21 * 1024 * 1024, Collection::Images).unwrap_err();
        assert_eq!(err.to_string(), "File size exceeds 20MB limit for image");

        // Same byte count is fine for the video ceiling
        assert!(validate_size(21 * 1024 * 1024, Collection::Videos).is_ok());
    }

    #[test]
    fn test_resolve_media_type_declared_wins() {
        // Declared type overrides extension inference
        let t = resolve_media_type(Some("video"), "thing.png").unwrap();
        assert_eq!(t, MediaType::Video);

        let t = resolve_media_type(None, "thing.png").unwrap();
        assert_eq!(t, MediaType::Image);

        assert!(resolve_media_type(Some("bogus"), "thing.png").is_err());
        assert!(resolve_media_type(None, "thing.glb").is_err());
    }
}
