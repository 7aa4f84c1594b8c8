//! On-disk cache for remote assets.
//!
//! Each URL maps to `<dir>/<sha256(url)><ext>`. Entries are written once on first fetch and never
//! expire; content behind a URL is treated as immutable, so concurrent processes racing on the
//! same key write identical bytes.

use std::path::{Path, PathBuf};

use sha2::Digest as _;

pub const DEFAULT_CACHE_DIR: &str = ".keepsultan_cache";

/// Extension used when the URL path carries none.
pub const FALLBACK_EXT: &str = ".img";

/// `true` for `http://` and `https://` references (scheme is case-insensitive).
pub fn is_remote(reference: &str) -> bool {
    match reference.split_once("://") {
        Some((scheme, _)) => {
            scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https")
        }
        None => false,
    }
}

/// Stable cache key for a URL: lowercase hex SHA-256 of the full URL text.
pub fn cache_key(url: &str) -> String {
    let digest = sha2::Sha256::digest(url.as_bytes());
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}

/// File extension (with leading dot) of the URL's path component, or [`FALLBACK_EXT`].
pub fn url_extension(url: &str) -> String {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    let rest = rest.split(['?', '#']).next().unwrap_or("");
    // Path starts after the authority.
    let path = rest.find('/').map_or("", |i| &rest[i..]);
    let file_name = path.rsplit('/').next().unwrap_or("");

    match file_name.rfind('.') {
        Some(i) if i > 0 && i + 1 < file_name.len() => file_name[i..].to_string(),
        _ => FALLBACK_EXT.to_string(),
    }
}

/// Location of the cached copy of `url` under `dir`.
pub fn cache_path(dir: &Path, url: &str) -> PathBuf {
    dir.join(format!("{}{}", cache_key(url), url_extension(url)))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/cache.rs"]
mod tests;
