// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Disk-based cache implementation with file locking and versioning

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::{types::TimestampMillis, CacheKey, CacheStats, CacheStore};
use crate::errors::CacheError;

/// Current cache format version
const CACHE_VERSION: u32 = 1;

/// Entry in the disk cache with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheEntry {
    /// The cached value
    value: serde_json::Value,
    /// When this entry stops being served
    expires_at: TimestampMillis,
    /// When this entry was written (for eviction ordering)
    #[serde(default)]
    created_at: TimestampMillis,
}

/// Serialized cache format (versioned)
#[derive(Debug, Serialize, Deserialize)]
struct CacheData {
    /// Cache format version
    version: u32,
    /// Cached entries
    entries: HashMap<CacheKey, CacheEntry>,
}

impl Default for CacheData {
    fn default() -> Self {
        Self {
            version: CACHE_VERSION,
            entries: HashMap::new(),
        }
    }
}

/// Disk-based cache with file locking, versioning, and per-entry expiry
///
/// This cache persists entries to disk as JSON so block lookups and token
/// decimals survive process restarts:
/// - File locking for multi-process safety (advisory locks)
/// - Cache format versioning for future migrations
/// - Per-entry expiry, pruned whenever the file is rewritten
/// - Optional size limits with oldest-first eviction
///
/// # Examples
///
/// ```rust,ignore
/// use balancescan::DiskCache;
///
/// let cache = DiskCache::new("/var/cache/balancescan.json")
///     .with_max_entries(50_000)
///     .validate()?;
/// ```
///
/// # Performance
///
/// Every operation reads (and `set` rewrites) the whole file, which is fine
/// for the few thousand entries a balance history workload produces.
#[derive(Debug)]
pub struct DiskCache {
    path: PathBuf,
    max_entries: Option<usize>,
    /// Serializes in-process access and holds in-memory statistics
    stats: Mutex<CacheStats>,
}

impl DiskCache {
    /// Creates a new disk cache at the specified path
    ///
    /// The cache file is created on the first write. Path validation is NOT
    /// performed until the first I/O operation; use
    /// [`validate()`](Self::validate) to check the path immediately.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_entries: None,
            stats: Mutex::new(CacheStats::default()),
        }
    }

    /// Sets the maximum number of entries in the cache
    ///
    /// When the limit is reached, the oldest entries (by write time) are
    /// evicted to make room for new entries.
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = Some(max_entries);
        self
    }

    /// Returns the cache file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Validates the cache path and creates the parent directory if needed
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created or is not writable.
    pub fn validate(self) -> Result<Self, CacheError> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        if !parent.exists() {
            std::fs::create_dir_all(&parent).map_err(|e| {
                CacheError::io(
                    parent.display().to_string(),
                    "Failed to create cache directory",
                    e,
                )
            })?;
            debug!(path = %parent.display(), "Created cache directory");
        }

        let test_file = parent.join(".cache_write_test");
        std::fs::write(&test_file, b"test").map_err(|e| {
            CacheError::io(
                parent.display().to_string(),
                "Cache directory is not writable",
                e,
            )
        })?;
        let _ = std::fs::remove_file(&test_file);

        debug!(path = %self.path.display(), "Cache path validated successfully");
        Ok(self)
    }

    /// Loads cache data from disk under a shared lock
    ///
    /// Missing files, unparseable files and version mismatches all yield an
    /// empty cache.
    fn load(&self) -> Result<CacheData, CacheError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "Cache file does not exist, using empty cache");
            return Ok(CacheData::default());
        }

        let path = self.path.display().to_string();
        let file = File::open(&self.path)
            .map_err(|e| CacheError::io(&path, "Failed to open cache file", e))?;

        // Std advisory locks (Rust 1.89+); released when `file` is dropped
        file.lock_shared()
            .map_err(|e| CacheError::io(&path, "Failed to acquire read lock", e))?;

        let data: CacheData = match serde_json::from_reader(&file) {
            Ok(data) => data,
            Err(e) => {
                warn!(path = %path, error = %e, "Failed to parse cache file, using empty cache");
                return Ok(CacheData::default());
            }
        };

        if data.version != CACHE_VERSION {
            warn!(
                path = %path,
                cached_version = data.version,
                current_version = CACHE_VERSION,
                "Cache version mismatch, ignoring cached data"
            );
            return Ok(CacheData::default());
        }

        Ok(data)
    }

    /// Saves cache data through a locked temp file and an atomic rename
    async fn save(&self, data: &CacheData) -> Result<(), CacheError> {
        let json = serde_json::to_vec_pretty(data)
            .map_err(|e| CacheError::serialization("Failed to encode cache file", e))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    CacheError::io(
                        parent.display().to_string(),
                        "Failed to create cache directory",
                        e,
                    )
                })?;
            }
        }

        let temp_path = self.path.with_extension("tmp");
        let temp_display = temp_path.display().to_string();

        tokio::fs::write(&temp_path, &json)
            .await
            .map_err(|e| CacheError::io(&temp_display, "Failed to write cache", e))?;

        let file = File::open(&temp_path)
            .map_err(|e| CacheError::io(&temp_display, "Failed to open temp cache file", e))?;
        file.lock()
            .map_err(|e| CacheError::io(&temp_display, "Failed to acquire write lock", e))?;

        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| {
                CacheError::io(
                    self.path.display().to_string(),
                    format!("Failed to rename cache file from '{temp_display}'"),
                    e,
                )
            })?;

        drop(file);

        debug!(
            path = %self.path.display(),
            entries = data.entries.len(),
            "Saved balance cache"
        );

        Ok(())
    }

    /// Drops expired entries, returning how many were removed
    fn prune_expired(data: &mut CacheData) -> usize {
        let before = data.entries.len();
        data.entries.retain(|_, entry| !entry.expires_at.is_past());
        before - data.entries.len()
    }

    /// Evicts the oldest entries to maintain size limit
    fn evict_oldest(data: &mut CacheData, max_entries: usize) -> usize {
        let mut evicted = 0;

        while data.entries.len() > max_entries {
            let oldest_key = data
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.created_at)
                .map(|(key, _)| key.clone());

            match oldest_key {
                Some(key) => {
                    debug!(key = %key, "Evicting oldest cache entry");
                    data.entries.remove(&key);
                    evicted += 1;
                }
                None => break,
            }
        }

        evicted
    }
}

#[async_trait]
impl CacheStore for DiskCache {
    async fn get(&self, key: &CacheKey) -> Option<serde_json::Value> {
        let mut stats = self.stats.lock().await;

        let data = match self.load() {
            Ok(data) => data,
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to read disk cache, treating as miss");
                stats.misses += 1;
                return None;
            }
        };
        stats.entries = data.entries.len();

        match data.entries.get(key) {
            Some(entry) if entry.expires_at.is_past() => {
                debug!(key = %key, "Cache entry expired");
                stats.expirations += 1;
                stats.misses += 1;
                None
            }
            Some(entry) => {
                debug!(key = %key, "Cache hit (disk)");
                stats.hits += 1;
                Some(entry.value.clone())
            }
            None => {
                debug!(key = %key, "Cache miss (disk)");
                stats.misses += 1;
                None
            }
        }
    }

    async fn set(
        &self,
        key: CacheKey,
        value: serde_json::Value,
        life: Duration,
    ) -> Result<(), CacheError> {
        let mut stats = self.stats.lock().await;

        let mut data = self.load()?;
        let expired = Self::prune_expired(&mut data);
        stats.expirations += expired as u64;

        let now = TimestampMillis::now();
        data.entries.insert(
            key,
            CacheEntry {
                value,
                expires_at: now.after(life),
                created_at: now,
            },
        );

        if let Some(max_entries) = self.max_entries {
            stats.evictions += Self::evict_oldest(&mut data, max_entries) as u64;
        }

        self.save(&data).await?;
        stats.entries = data.entries.len();

        if expired > 0 {
            info!(
                path = %self.path.display(),
                pruned = expired,
                entries = data.entries.len(),
                "Pruned expired cache entries"
            );
        }

        Ok(())
    }

    async fn stats(&self) -> CacheStats {
        self.stats.lock().await.clone()
    }

    fn name(&self) -> &'static str {
        "DiskCache"
    }
}
