//! Collections and media types with their extension whitelists and size
//! ceilings. These are fixed policy, not configuration: compatibility with
//! existing clients depends on the exact sets and limits.

use serde::{Deserialize, Serialize};
use std::fmt;

const MB: u64 = 1024 * 1024;

/// Logical media type for the images/videos collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
}

impl MediaType {
    /// Extensions accepted at write time, lowercase, with leading dot.
    pub fn allowed_extensions(self) -> &'static [&'static str] {
        match self {
            MediaType::Image => &[
                ".jpg", ".jpeg", ".png", ".gif", ".webp", ".svg", ".bmp", ".ico",
            ],
            MediaType::Video => &[".mp4", ".webm", ".mov", ".avi", ".mkv", ".ogg"],
        }
    }

    /// Canonical extension appended when a URL-sourced name has none of the
    /// allowed ones.
    pub fn primary_extension(self) -> &'static str {
        self.allowed_extensions()[0]
    }

    pub fn max_bytes(self) -> u64 {
        match self {
            MediaType::Image => 20 * MB,
            MediaType::Video => 500 * MB,
        }
    }

    /// Directory name under the storage root.
    pub fn dir_name(self) -> &'static str {
        match self {
            MediaType::Image => "images",
            MediaType::Video => "videos",
        }
    }

    pub fn collection(self) -> Collection {
        match self {
            MediaType::Image => Collection::Images,
            MediaType::Video => Collection::Videos,
        }
    }

    /// Infer the media type from a filename's extension.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let ext = extension_of(filename)?;
        [MediaType::Image, MediaType::Video]
            .into_iter()
            .find(|t| t.allowed_extensions().contains(&ext.as_str()))
    }

    /// Parse the caller-declared type field ("image" / "video").
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "image" => Some(MediaType::Image),
            "video" => Some(MediaType::Video),
            _ => None,
        }
    }

    /// Parse a directory-style name ("images" / "videos"), as used by the
    /// media list filter and the media delete route.
    pub fn from_dir_name(value: &str) -> Option<Self> {
        match value {
            "images" => Some(MediaType::Image),
            "videos" => Some(MediaType::Video),
            _ => None,
        }
    }

    /// Label with the first letter capitalized, for user-facing messages.
    pub fn capitalized(self) -> &'static str {
        match self {
            MediaType::Image => "Image",
            MediaType::Video => "Video",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaType::Image => write!(f, "image"),
            MediaType::Video => write!(f, "video"),
        }
    }
}

/// A storage collection: one directory of user-supplied files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Models,
    Images,
    Videos,
}

impl Collection {
    pub fn dir_name(self) -> &'static str {
        match self {
            Collection::Models => "models",
            Collection::Images => "images",
            Collection::Videos => "videos",
        }
    }

    pub fn allowed_extensions(self) -> &'static [&'static str] {
        match self {
            Collection::Models => &[".glb", ".gltf"],
            Collection::Images => MediaType::Image.allowed_extensions(),
            Collection::Videos => MediaType::Video.allowed_extensions(),
        }
    }

    pub fn max_bytes(self) -> u64 {
        match self {
            Collection::Models => 100 * MB,
            Collection::Images => MediaType::Image.max_bytes(),
            Collection::Videos => MediaType::Video.max_bytes(),
        }
    }

    pub fn media_type(self) -> Option<MediaType> {
        match self {
            Collection::Models => None,
            Collection::Images => Some(MediaType::Image),
            Collection::Videos => Some(MediaType::Video),
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Lowercased extension of a filename, including the dot.
pub(crate) fn extension_of(filename: &str) -> Option<String> {
    let idx = filename.rfind('.')?;
    if idx == 0 || idx + 1 == filename.len() {
        return None;
    }
    Some(filename[idx..].to_lowercase())
}
