//! Storage root resolution.
//!
//! The on-disk root differs between container deployments (`/app/public`)
//! and local runs (`./public`). Candidates are probed in order per request;
//! a configured `STORAGE_ROOT` short-circuits the probing and is the
//! recommended deployment mode. Read paths tolerate one extra candidate
//! (relative to the executable) for layouts produced by older packaging.

use std::path::PathBuf;

use glbcdn_core::models::Collection;
use tokio::fs;

use crate::error::{StorageError, StorageResult};

/// Fixed container deployment root.
const CONTAINER_ROOT: &str = "/app/public";

#[derive(Clone, Debug, Default)]
pub struct RootResolver {
    configured: Option<PathBuf>,
}

impl RootResolver {
    pub fn new(configured: Option<PathBuf>) -> Self {
        Self { configured }
    }

    /// Candidate directories for a collection, in probe order.
    pub fn write_candidates(&self, collection: Collection) -> Vec<PathBuf> {
        let mut candidates = Vec::with_capacity(3);
        if let Some(root) = &self.configured {
            candidates.push(root.join(collection.dir_name()));
        }
        candidates.push(PathBuf::from(CONTAINER_ROOT).join(collection.dir_name()));
        if let Ok(cwd) = std::env::current_dir() {
            candidates.push(cwd.join("public").join(collection.dir_name()));
        }
        candidates
    }

    /// Write candidates plus an executable-relative fallback tolerated by
    /// read-only operations.
    pub fn read_candidates(&self, collection: Collection) -> Vec<PathBuf> {
        let mut candidates = self.write_candidates(collection);
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                candidates.push(dir.join("public").join(collection.dir_name()));
            }
        }
        candidates
    }

    /// Directory to write into: the first candidate that exists, otherwise
    /// the preferred candidate created lazily (the configured root when set,
    /// else the working-directory-relative one).
    pub async fn resolve_for_write(&self, collection: Collection) -> StorageResult<PathBuf> {
        let candidates = self.write_candidates(collection);
        for candidate in &candidates {
            if fs::try_exists(candidate).await.unwrap_or(false) {
                return Ok(candidate.clone());
            }
        }

        let target = if self.configured.is_some() {
            candidates.first().cloned()
        } else {
            candidates.last().cloned()
        }
        .ok_or_else(|| {
            StorageError::WriteFailed(format!(
                "No storage root candidate for collection {}",
                collection
            ))
        })?;

        fs::create_dir_all(&target).await.map_err(|e| {
            StorageError::WriteFailed(format!(
                "Failed to create storage directory {}: {}",
                target.display(),
                e
            ))
        })?;
        tracing::info!(dir = %target.display(), collection = %collection, "Created storage directory");
        Ok(target)
    }

    /// Directory to read from: the first candidate that exists and contains
    /// entries, falling back to the first that merely exists. `None` when no
    /// candidate exists at all.
    pub async fn resolve_for_read(&self, collection: Collection) -> Option<PathBuf> {
        let mut first_existing = None;
        for candidate in self.read_candidates(collection) {
            if !fs::try_exists(&candidate).await.unwrap_or(false) {
                continue;
            }
            if first_existing.is_none() {
                first_existing = Some(candidate.clone());
            }
            if dir_has_entries(&candidate).await {
                return Some(candidate);
            }
        }
        first_existing
    }
}

async fn dir_has_entries(dir: &PathBuf) -> bool {
    match fs::read_dir(dir).await {
        Ok(mut entries) => matches!(entries.next_entry().await, Ok(Some(_))),
        Err(_) => false,
    }
}
