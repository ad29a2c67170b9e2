//! Bundled asset cache
//!
//! Static assets (logo, empty-state art, help text) are compiled into
//! the binary and materialized on disk under a generation-named cache
//! directory at startup. Bumping [`CACHE_GENERATION`] invalidates the
//! whole cache: the new directory is precached eagerly and directories
//! of older generations are purged.
//!
//! Lookups are cache-first for precached names and bundle-first with a
//! placeholder fallback for anything else.

use std::fs;
use std::path::{Path, PathBuf};

use include_dir::{Dir, include_dir};
use tracing::{info, warn};

use crate::utils::AppResult;

static BUNDLED: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/assets");

/// Cache directory name. Bump to invalidate everything cached by
/// previous versions.
pub const CACHE_GENERATION: &str = "salon-cache-v1";

/// Placeholder served when an unknown asset is requested
const FALLBACK_ASSET: &str = "empty.svg";

/// On-disk cache of the bundled assets
#[derive(Debug, Clone)]
pub struct AssetCache {
    cache_dir: PathBuf,
}

impl AssetCache {
    /// Precache every bundled asset under `<cache_root>/<generation>/`
    /// and purge directories left behind by older generations.
    pub fn install(cache_root: &Path) -> AppResult<Self> {
        let cache_dir = cache_root.join(CACHE_GENERATION);
        fs::create_dir_all(&cache_dir)?;

        for file in BUNDLED.files() {
            let target = cache_dir.join(file.path());
            if !target.exists() {
                fs::write(&target, file.contents())?;
            }
        }
        info!(generation = CACHE_GENERATION, count = BUNDLED.files().count(), "Assets precached");

        purge_old_generations(cache_root, &cache_dir);
        Ok(Self { cache_dir })
    }

    /// Cache-first lookup: the materialized copy wins, falling back to
    /// the bundled bytes when the cache file is missing or unreadable.
    pub fn get(&self, name: &str) -> Option<Vec<u8>> {
        if let Ok(bytes) = fs::read(self.cache_dir.join(name)) {
            return Some(bytes);
        }
        BUNDLED.get_file(name).map(|f| f.contents().to_vec())
    }

    /// Lookup with placeholder fallback: unknown names resolve to the
    /// empty-state asset instead of failing.
    pub fn get_or_placeholder(&self, name: &str) -> Option<Vec<u8>> {
        self.get(name).or_else(|| self.get(FALLBACK_ASSET))
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }
}

/// Names of every bundled asset
pub fn bundled_names() -> Vec<&'static str> {
    BUNDLED.files().filter_map(|f| f.path().to_str()).collect()
}

fn purge_old_generations(cache_root: &Path, keep: &Path) {
    let entries = match fs::read_dir(cache_root) {
        Ok(entries) => entries,
        Err(_) => return,
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() && path != keep {
            if let Err(e) = fs::remove_dir_all(&path) {
                warn!(path = %path.display(), error = %e, "Failed to purge stale asset cache");
            } else {
                info!(path = %path.display(), "Purged stale asset cache");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn install_precaches_all_bundled_assets() {
        let root = tempfile::tempdir().unwrap();
        let cache = AssetCache::install(root.path()).unwrap();

        for name in bundled_names() {
            assert!(cache.cache_dir().join(name).exists(), "{name}");
            assert!(cache.get(name).is_some(), "{name}");
        }
        assert!(bundled_names().contains(&"logo.svg"));
        assert!(bundled_names().contains(&FALLBACK_ASSET));
    }

    #[test]
    fn old_generations_are_purged() {
        let root = tempfile::tempdir().unwrap();
        let stale = root.path().join("salon-cache-v0");
        fs::create_dir_all(&stale).unwrap();
        fs::write(stale.join("logo.svg"), b"old").unwrap();

        AssetCache::install(root.path()).unwrap();
        assert!(!stale.exists());
        assert!(root.path().join(CACHE_GENERATION).exists());
    }

    #[test]
    fn unknown_asset_falls_back_to_placeholder() {
        let root = tempfile::tempdir().unwrap();
        let cache = AssetCache::install(root.path()).unwrap();

        assert!(cache.get("nope.svg").is_none());
        let placeholder = cache.get_or_placeholder("nope.svg").unwrap();
        assert_eq!(placeholder, cache.get(FALLBACK_ASSET).unwrap());
    }

    #[test]
    fn cached_copy_wins_over_bundle() {
        let root = tempfile::tempdir().unwrap();
        let cache = AssetCache::install(root.path()).unwrap();

        fs::write(cache.cache_dir().join("logo.svg"), b"edited").unwrap();
        assert_eq!(cache.get("logo.svg").unwrap(), b"edited");
    }
}
