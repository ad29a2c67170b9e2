//! Application state
//!
//! [`AppState`] holds shared handles to everything the UI and the
//! background tasks need: configuration, the record storage and the
//! asset cache. Cloning is shallow.

use tracing::info;

use crate::core::Config;
use crate::models::Settings;
use crate::repository::{seed, settings};
use crate::services::asset_cache::AssetCache;
use crate::storage::Storage;
use crate::utils::AppResult;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub storage: Storage,
    pub assets: AssetCache,
}

impl AppState {
    /// Initialize the application:
    ///
    /// 1. Create the work directory tree
    /// 2. Open the database
    /// 3. Precache bundled assets (purging stale generations)
    /// 4. Seed demo data on first launch, when enabled
    pub fn initialize(config: Config) -> AppResult<Self> {
        config.ensure_work_dir_structure()?;

        let storage = Storage::open(config.database_path())?;
        let assets = AssetCache::install(&config.cache_dir())?;

        if config.seed_demo && seed::seed_if_empty(&storage)? {
            info!("First launch: demo data seeded");
        }

        Ok(Self { config, storage, assets })
    }

    /// Load the current settings snapshot. Views receive this as a
    /// value and never observe mid-render changes.
    pub fn settings(&self) -> AppResult<Settings> {
        settings::load(&self.storage)
    }
}
