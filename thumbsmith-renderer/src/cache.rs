//! Decoded-image cache keyed by source reference.
//!
//! Resolves element and background `src` references into embeddable data
//! URIs, decoding each source only once. File-backed sources are read and
//! validated here; data URIs pass through untouched.

use std::collections::HashMap;
use std::time::Instant;

use crate::error::{RenderError, RenderResult};
use crate::image::{detect_format, encode_data_uri, load_image_from_bytes};
use thumbsmith_core::ImageFormat;

/// Entry in the image cache.
#[derive(Debug)]
struct CacheEntry {
    /// Embeddable data URI for the source.
    data_uri: String,
    /// Natural width in pixels (0 for vector sources).
    width: u32,
    /// Natural height in pixels (0 for vector sources).
    height: u32,
    /// Size of the encoded URI in bytes.
    size_bytes: usize,
    /// Last access time, for eviction ordering.
    last_accessed: Instant,
}

/// Configuration for the image cache.
#[derive(Debug, Clone)]
pub struct ImageCacheConfig {
    /// Maximum cache size in bytes.
    pub max_size_bytes: usize,
    /// Maximum number of entries.
    pub max_entries: usize,
}

impl Default for ImageCacheConfig {
    fn default() -> Self {
        Self {
            max_size_bytes: 64 * 1024 * 1024, // 64 MB
            max_entries: 128,
        }
    }
}

/// Cache statistics for monitoring.
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheStats {
    /// Number of cache hits.
    pub hits: u64,
    /// Number of cache misses.
    pub misses: u64,
    /// Number of evictions.
    pub evictions: u64,
}

/// Cache of resolved image sources.
///
/// Provides LRU-style eviction and size-based limits.
#[derive(Debug, Default)]
pub struct ImageCache {
    entries: HashMap<String, CacheEntry>,
    config: ImageCacheConfig,
    current_size: usize,
    stats: CacheStats,
}

impl ImageCache {
    /// Create a cache with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ImageCacheConfig::default())
    }

    /// Create a cache with custom configuration.
    #[must_use]
    pub fn with_config(config: ImageCacheConfig) -> Self {
        Self {
            entries: HashMap::new(),
            config,
            current_size: 0,
            stats: CacheStats::default(),
        }
    }

    /// Resolve a source reference to an embeddable data URI.
    ///
    /// Data URIs pass through; anything else is treated as a filesystem
    /// path, read, validated, and cached.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Resource`] if the file cannot be read or is
    /// not a recognizable image.
    pub fn resolve(&mut self, src: &str) -> RenderResult<String> {
        if src.starts_with("data:") {
            return Ok(src.to_string());
        }

        if let Some(entry) = self.entries.get_mut(src) {
            entry.last_accessed = Instant::now();
            self.stats.hits += 1;
            return Ok(entry.data_uri.clone());
        }
        self.stats.misses += 1;

        let bytes = std::fs::read(src)
            .map_err(|e| RenderError::Resource(format!("Failed to read image {src}: {e}")))?;

        // Vector sources embed as-is; raster sources must decode cleanly.
        let (width, height) = if detect_format(&bytes) == Some(ImageFormat::Svg) {
            (0, 0)
        } else {
            let bitmap = load_image_from_bytes(&bytes)?;
            (bitmap.width, bitmap.height)
        };

        let data_uri = encode_data_uri(&bytes);
        tracing::debug!("Cached image {src} ({width}x{height})");
        self.insert(src.to_string(), data_uri.clone(), width, height);
        Ok(data_uri)
    }

    /// Natural dimensions of a previously resolved source.
    #[must_use]
    pub fn dimensions(&self, src: &str) -> Option<(u32, u32)> {
        self.entries.get(src).map(|e| (e.width, e.height))
    }

    /// Cache statistics.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Number of cached entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all cached entries.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.current_size = 0;
    }

    fn insert(&mut self, key: String, data_uri: String, width: u32, height: u32) {
        let size_bytes = data_uri.len();

        if let Some(old) = self.entries.remove(&key) {
            self.current_size -= old.size_bytes;
        }

        self.evict_if_needed(size_bytes);

        self.current_size += size_bytes;
        self.entries.insert(
            key,
            CacheEntry {
                data_uri,
                width,
                height,
                size_bytes,
                last_accessed: Instant::now(),
            },
        );
    }

    /// Evict least-recently-used entries until the incoming entry fits.
    fn evict_if_needed(&mut self, incoming_bytes: usize) {
        while !self.entries.is_empty()
            && (self.entries.len() >= self.config.max_entries
                || self.current_size + incoming_bytes > self.config.max_size_bytes)
        {
            let Some(oldest) = self
                .entries
                .iter()
                .min_by_key(|(_, e)| e.last_accessed)
                .map(|(k, _)| k.clone())
            else {
                break;
            };
            if let Some(entry) = self.entries.remove(&oldest) {
                self.current_size -= entry.size_bytes;
                self.stats.evictions += 1;
                tracing::trace!("Evicted cached image {oldest}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::decode_data_uri;

    const RED_DOT_URI: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8z8DwHwAFBQIAX8jx0gAAAABJRU5ErkJggg==";

    #[test]
    fn test_data_uri_passes_through() {
        let mut cache = ImageCache::new();
        let resolved = cache.resolve(RED_DOT_URI).expect("resolve");
        assert_eq!(resolved, RED_DOT_URI);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_file_source_cached_once() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("dot.png");
        let bytes = decode_data_uri(RED_DOT_URI).expect("bytes");
        std::fs::write(&path, &bytes).expect("write");
        let src = path.to_str().expect("utf8 path");

        let mut cache = ImageCache::new();
        let first = cache.resolve(src).expect("resolve");
        let second = cache.resolve(src).expect("resolve");
        assert_eq!(first, second);
        assert!(first.starts_with("data:image/png;base64,"));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.stats().hits, 1);
        assert_eq!(cache.stats().misses, 1);
        assert_eq!(cache.dimensions(src), Some((1, 1)));
    }

    #[test]
    fn test_missing_file_is_resource_error() {
        let mut cache = ImageCache::new();
        assert!(matches!(
            cache.resolve("/no/such/file.png"),
            Err(RenderError::Resource(_))
        ));
    }

    #[test]
    fn test_entry_cap_evicts_oldest() {
        let dir = tempfile::tempdir().expect("tempdir");
        let bytes = decode_data_uri(RED_DOT_URI).expect("bytes");
        let mut cache = ImageCache::with_config(ImageCacheConfig {
            max_size_bytes: usize::MAX,
            max_entries: 2,
        });

        let mut paths = Vec::new();
        for n in 0..3 {
            let path = dir.path().join(format!("dot{n}.png"));
            std::fs::write(&path, &bytes).expect("write");
            paths.push(path);
        }
        for path in &paths {
            cache.resolve(path.to_str().expect("utf8")).expect("resolve");
        }

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.stats().evictions, 1);
        assert!(cache.dimensions(paths[0].to_str().expect("utf8")).is_none());
    }
}
