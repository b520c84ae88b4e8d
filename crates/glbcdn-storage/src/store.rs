//! Storage operations: list, save, read, delete.
//!
//! All operations resolve their target directory through [`RootResolver`]
//! on every call; nothing is cached between requests. Collision handling
//! uses exclusive-create (`create_new`) so two concurrent uploads of the
//! same name cannot both win the same final filename.

use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Utc};
use glbcdn_core::models::{Collection, MediaEntry, MediaType, ModelEntry};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::{StorageError, StorageResult};
use crate::filename::{is_safe_name, numbered_candidate};
use crate::roots::RootResolver;

/// Collision counters are bounded; hitting the bound means something is
/// filling the directory with our candidates faster than we can probe.
const MAX_DEDUPE_ATTEMPTS: u32 = 10_000;

/// Result of a successful write.
#[derive(Debug, Clone)]
pub struct StoredFile {
    /// Final on-disk basename (may differ from the requested name after
    /// collision handling).
    pub name: String,
    pub size: u64,
}

/// Result of listing the models collection. Listing never fails: when no
/// root resolves, `models` is empty and `error` describes why.
#[derive(Debug, Default)]
pub struct ModelListing {
    pub models: Vec<ModelEntry>,
    pub error: Option<String>,
    pub searched_paths: Vec<String>,
}

#[derive(Clone, Debug, Default)]
pub struct FileStore {
    resolver: RootResolver,
}

impl FileStore {
    pub fn new(configured_root: Option<PathBuf>) -> Self {
        Self {
            resolver: RootResolver::new(configured_root),
        }
    }

    pub fn resolver(&self) -> &RootResolver {
        &self.resolver
    }

    /// Enumerate the models collection, most recently modified first.
    pub async fn list_models(&self) -> ModelListing {
        let collection = Collection::Models;
        let Some(dir) = self.resolver.resolve_for_read(collection).await else {
            return ModelListing {
                models: Vec::new(),
                error: Some("Models directory not found".to_string()),
                searched_paths: self
                    .resolver
                    .read_candidates(collection)
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect(),
            };
        };

        let mut models = Vec::new();
        for (name, size, modified) in scan_dir(&dir, collection).await {
            models.push(ModelEntry::new(name, size, modified));
        }
        models.sort_by(|a, b| b.modified.cmp(&a.modified));

        tracing::debug!(dir = %dir.display(), count = models.len(), "Listed models");
        ModelListing {
            models,
            error: None,
            searched_paths: Vec::new(),
        }
    }

    /// Enumerate the media collections, optionally filtered to one type,
    /// most recently modified first. A missing directory contributes an
    /// empty set, never an error.
    pub async fn list_media(&self, filter: Option<MediaType>) -> Vec<MediaEntry> {
        let types: &[MediaType] = match filter {
            Some(MediaType::Image) => &[MediaType::Image],
            Some(MediaType::Video) => &[MediaType::Video],
            None => &[MediaType::Image, MediaType::Video],
        };

        let mut media = Vec::new();
        for &media_type in types {
            let collection = media_type.collection();
            let Some(dir) = self.resolver.resolve_for_read(collection).await else {
                continue;
            };
            for (name, size, modified) in scan_dir(&dir, collection).await {
                media.push(MediaEntry::new(name, media_type, size, modified));
            }
        }
        media.sort_by(|a, b| b.modified.cmp(&a.modified));
        media
    }

    /// Write bytes under a collision-free name: `name` itself if free,
    /// otherwise `stem_1.ext`, `stem_2.ext`, ... with the lowest free
    /// counter. Exclusive create makes "already exists" the collision
    /// signal instead of a pre-check.
    pub async fn save_unique(
        &self,
        collection: Collection,
        name: &str,
        data: &[u8],
    ) -> StorageResult<StoredFile> {
        if !is_safe_name(name) {
            return Err(StorageError::InvalidName(name.to_string()));
        }
        let dir = self.resolver.resolve_for_write(collection).await?;
        let start = Instant::now();

        let mut counter = 0u32;
        loop {
            let candidate = if counter == 0 {
                name.to_string()
            } else {
                numbered_candidate(name, counter)
            };
            let path = dir.join(&candidate);

            let open = fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await;
            match open {
                Ok(file) => {
                    write_and_sync(file, &path, data).await?;
                    tracing::info!(
                        path = %path.display(),
                        collection = %collection,
                        size_bytes = data.len(),
                        renamed = counter > 0,
                        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                        "Stored file"
                    );
                    return Ok(StoredFile {
                        name: candidate,
                        size: data.len() as u64,
                    });
                }
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                    counter += 1;
                    if counter > MAX_DEDUPE_ATTEMPTS {
                        return Err(StorageError::WriteFailed(format!(
                            "Could not find a free name for {} after {} attempts",
                            name, MAX_DEDUPE_ATTEMPTS
                        )));
                    }
                }
                Err(e) => {
                    return Err(StorageError::WriteFailed(format!(
                        "Failed to create file {}: {}",
                        path.display(),
                        e
                    )));
                }
            }
        }
    }

    /// Write bytes under exactly `name`, replacing any existing file.
    /// Last-writer-wins; used by the endpoints that historically never
    /// deduped.
    pub async fn save_overwrite(
        &self,
        collection: Collection,
        name: &str,
        data: &[u8],
    ) -> StorageResult<StoredFile> {
        if !is_safe_name(name) {
            return Err(StorageError::InvalidName(name.to_string()));
        }
        let dir = self.resolver.resolve_for_write(collection).await?;
        let path = dir.join(name);
        let start = Instant::now();

        let file = fs::File::create(&path).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;
        write_and_sync(file, &path, data).await?;

        tracing::info!(
            path = %path.display(),
            collection = %collection,
            size_bytes = data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Stored file (overwrite allowed)"
        );
        Ok(StoredFile {
            name: name.to_string(),
            size: data.len() as u64,
        })
    }

    /// Read a model file for serving. The traversal check runs before the
    /// extension check and both run before any filesystem access. Returns
    /// the bytes and the extension-derived content type.
    pub async fn read_model(&self, name: &str) -> StorageResult<(Vec<u8>, &'static str)> {
        if !is_safe_name(name) {
            return Err(StorageError::InvalidName(name.to_string()));
        }
        let content_type = model_content_type(name)
            .ok_or_else(|| StorageError::InvalidExtension(name.to_string()))?;

        for candidate in self.resolver.read_candidates(Collection::Models) {
            let path = candidate.join(name);
            if !fs::try_exists(&path).await.unwrap_or(false) {
                continue;
            }
            let data = fs::read(&path).await.map_err(|e| {
                StorageError::ReadFailed(format!("Failed to read file {}: {}", path.display(), e))
            })?;
            tracing::debug!(
                path = %path.display(),
                size_bytes = data.len(),
                "Serving model file"
            );
            return Ok((data, content_type));
        }
        Err(StorageError::NotFound(name.to_string()))
    }

    /// Delete `name` from the first candidate root that contains it. The
    /// traversal check is independent of any access guard.
    pub async fn delete(&self, collection: Collection, name: &str) -> StorageResult<String> {
        if !is_safe_name(name) {
            return Err(StorageError::InvalidName(name.to_string()));
        }

        for candidate in self.resolver.read_candidates(collection) {
            let path = candidate.join(name);
            if !fs::try_exists(&path).await.unwrap_or(false) {
                continue;
            }
            fs::remove_file(&path).await.map_err(|e| {
                StorageError::DeleteFailed(format!(
                    "Failed to delete file {}: {}",
                    path.display(),
                    e
                ))
            })?;
            tracing::info!(path = %path.display(), collection = %collection, "Deleted file");
            return Ok(name.to_string());
        }
        Err(StorageError::NotFound(name.to_string()))
    }
}

/// Content type for the model serving route, derived from extension.
pub fn model_content_type(name: &str) -> Option<&'static str> {
    let lower = name.to_lowercase();
    if lower.ends_with(".glb") {
        Some("model/gltf-binary")
    } else if lower.ends_with(".gltf") {
        Some("model/gltf+json")
    } else {
        None
    }
}

async fn write_and_sync(mut file: fs::File, path: &Path, data: &[u8]) -> StorageResult<()> {
    file.write_all(data).await.map_err(|e| {
        StorageError::WriteFailed(format!("Failed to write file {}: {}", path.display(), e))
    })?;
    file.sync_all().await.map_err(|e| {
        StorageError::WriteFailed(format!("Failed to sync file {}: {}", path.display(), e))
    })?;
    drop(file);

    // Hard failure if the file vanished between write and response.
    if !fs::try_exists(path).await.unwrap_or(false) {
        return Err(StorageError::WriteFailed(
            "Failed to save file to disk. Check permissions.".to_string(),
        ));
    }
    Ok(())
}

/// Enumerate a collection directory: whitelist-filtered names with size and
/// mtime. Placeholder and hidden entries (`.gitkeep`, dotfiles) are
/// excluded; entries that fail to stat are skipped with a warning.
async fn scan_dir(dir: &Path, collection: Collection) -> Vec<(String, u64, DateTime<Utc>)> {
    let mut out = Vec::new();
    let mut entries = match fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(dir = %dir.display(), error = %e, "Failed to read collection directory");
            return out;
        }
    };

    while let Ok(Some(entry)) = entries.next_entry().await {
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if name.starts_with('.') {
            continue;
        }
        let lower = name.to_lowercase();
        if !collection
            .allowed_extensions()
            .iter()
            .any(|ext| lower.ends_with(ext))
        {
            continue;
        }
        let meta = match entry.metadata().await {
            Ok(meta) if meta.is_file() => meta,
            Ok(_) => continue,
            Err(e) => {
                tracing::warn!(name = %name, error = %e, "Failed to stat file; skipping");
                continue;
            }
        };
        let modified = meta
            .modified()
            .map(DateTime::<Utc>::from)
            .unwrap_or_else(|_| Utc::now());
        out.push((name, meta.len(), modified));
    }
    out
}
