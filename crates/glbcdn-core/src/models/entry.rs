//! Listing entries returned by the model and media list endpoints.
//!
//! `size` and `modified` come from a fresh stat at read time; nothing here
//! is cached. URL fields are collection-relative; callers prepend the
//! public base URL where absolute URLs are needed.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::MediaType;

/// One file in the models collection.
#[derive(Debug, Clone, Serialize)]
pub struct ModelEntry {
    pub name: String,
    /// Direct path under the public root, e.g. `/models/foo.glb`.
    pub path: String,
    /// API serving route, e.g. `/api/models/foo.glb`.
    pub url: String,
    #[serde(rename = "viewUrl")]
    pub view_url: String,
    #[serde(rename = "viewerUrl")]
    pub viewer_url: String,
    pub size: u64,
    pub modified: DateTime<Utc>,
}

impl ModelEntry {
    pub fn new(name: String, size: u64, modified: DateTime<Utc>) -> Self {
        let encoded = urlencoding::encode(&name).into_owned();
        Self {
            path: format!("/models/{}", name),
            url: format!("/api/models/{}", encoded),
            view_url: format!("/models/view/{}", encoded),
            viewer_url: format!("/models/viewer/{}", encoded),
            name,
            size,
            modified,
        }
    }
}

/// One file in the images or videos collection.
#[derive(Debug, Clone, Serialize)]
pub struct MediaEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    /// Direct path under the public root, e.g. `/images/foo.png`.
    pub path: String,
    pub url: String,
    #[serde(rename = "viewUrl")]
    pub view_url: String,
    pub size: u64,
    pub modified: DateTime<Utc>,
}

impl MediaEntry {
    pub fn new(name: String, media_type: MediaType, size: u64, modified: DateTime<Utc>) -> Self {
        let direct = format!("/{}/{}", media_type.dir_name(), name);
        Self {
            path: direct.clone(),
            url: direct,
            view_url: format!("/media/view/{}", name),
            name,
            media_type,
            size,
            modified,
        }
    }
}
