use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use image::RgbaImage;

use super::cache::{self, DEFAULT_CACHE_DIR};
use super::decode::decode_rgba;
use crate::foundation::error::{KeepError, KeepResult};

pub const FETCH_TIMEOUT: Duration = Duration::from_secs(30);
pub const USER_AGENT: &str = "KeepSultan/1.0";

/// Resolves image references (local paths or HTTP(S) URLs) to RGBA bitmaps.
///
/// Remote references are fetched once and then served from the cache directory.
#[derive(Clone, Debug)]
pub struct AssetLoader {
    cache_dir: PathBuf,
}

impl AssetLoader {
    /// Loader caching under `cache_dir`, which is created if missing.
    pub fn new(cache_dir: impl Into<PathBuf>) -> KeepResult<Self> {
        let cache_dir = cache_dir.into();
        fs::create_dir_all(&cache_dir)?;
        Ok(Self { cache_dir })
    }

    /// Loader caching under [`DEFAULT_CACHE_DIR`] in the working directory.
    pub fn with_default_cache() -> KeepResult<Self> {
        Self::new(DEFAULT_CACHE_DIR)
    }

    /// Directory holding downloaded remote images.
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Load `reference` (local path or HTTP(S) URL) as straight RGBA8.
    pub fn load(&self, reference: &str) -> KeepResult<RgbaImage> {
        if reference.is_empty() {
            return Err(KeepError::format("empty image reference"));
        }

        if cache::is_remote(reference) {
            let path = self.fetch_cached(reference)?;
            let bytes = fs::read(&path)?;
            return decode_rgba(&bytes, reference);
        }

        let path = Path::new(reference);
        if !path.is_file() {
            return Err(KeepError::not_found(format!("image not found: {reference}")));
        }
        tracing::debug!(path = %path.display(), "loading local image");
        let bytes = fs::read(path)?;
        decode_rgba(&bytes, reference)
    }

    /// Path of the cached copy of `url`, downloading it first on a cache miss.
    fn fetch_cached(&self, url: &str) -> KeepResult<PathBuf> {
        let path = cache::cache_path(&self.cache_dir, url);
        if path.is_file() {
            tracing::debug!(url, path = %path.display(), "asset cache hit");
            return Ok(path);
        }

        tracing::debug!(url, path = %path.display(), "asset cache miss, fetching");
        let bytes = fetch(url)?;
        fs::write(&path, &bytes)?;
        Ok(path)
    }
}

fn fetch(url: &str) -> KeepResult<Vec<u8>> {
    let client = reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| KeepError::fetch(format!("create HTTP client: {e}")))?;

    let resp = client
        .get(url)
        .send()
        .and_then(|r| r.error_for_status())
        .map_err(|e| KeepError::fetch(format!("GET {url}: {e}")))?;
    let bytes = resp
        .bytes()
        .map_err(|e| KeepError::fetch(format!("read body of {url}: {e}")))?;
    Ok(bytes.to_vec())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/loader.rs"]
mod tests;
