//! Application configuration
//!
//! Every option can be overridden through environment variables:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | WORK_DIR | ./salondesk-data | Work directory (database, cache, logs) |
//! | ENVIRONMENT | development | development \| staging \| production |
//! | SEED_DEMO | true | Seed demo data on first launch |
//! | TICK_RATE_MS | 250 | UI event-poll interval |
//! | LOG_TO_FILE | true | Also write logs to WORK_DIR/logs |

use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Work directory holding the database, asset cache and logs
    pub work_dir: String,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Whether first launch seeds the demo data set
    pub seed_demo: bool,
    /// Terminal event-poll interval in milliseconds
    pub tick_rate_ms: u64,
    /// Whether to write daily-rotated log files
    pub log_to_file: bool,
}

impl Config {
    /// Load configuration from environment variables, with defaults
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./salondesk-data".into()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            seed_demo: std::env::var("SEED_DEMO")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            tick_rate_ms: std::env::var("TICK_RATE_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(250),
            log_to_file: std::env::var("LOG_TO_FILE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }

    /// Override the work directory (used by tests)
    pub fn with_work_dir(work_dir: impl Into<String>) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Default log filter when RUST_LOG is unset
    pub fn default_log_level(&self) -> &'static str {
        if self.is_development() { "debug" } else { "info" }
    }

    // ========== Work directory layout ==========

    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    pub fn database_path(&self) -> PathBuf {
        self.database_dir().join("salon.redb")
    }

    pub fn cache_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("cache")
    }

    pub fn logs_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    pub fn exports_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("exports")
    }

    /// Create the work directory tree if it does not exist
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.cache_dir())?;
        std::fs::create_dir_all(self.logs_dir())?;
        std::fs::create_dir_all(self.exports_dir())?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn work_dir_layout() {
        let config = Config::with_work_dir("/tmp/salondesk-test");
        assert_eq!(config.database_path(), PathBuf::from("/tmp/salondesk-test/database/salon.redb"));
        assert_eq!(config.cache_dir(), PathBuf::from("/tmp/salondesk-test/cache"));
    }

    #[test]
    fn environment_drives_default_log_level() {
        let mut config = Config::with_work_dir("/tmp/salondesk-test");
        config.environment = "development".into();
        assert!(config.is_development());
        assert_eq!(config.default_log_level(), "debug");

        config.environment = "production".into();
        assert_eq!(config.default_log_level(), "info");
    }

    #[test]
    fn ensure_creates_tree() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::with_work_dir(dir.path().to_string_lossy());
        config.ensure_work_dir_structure().unwrap();
        assert!(config.database_dir().is_dir());
        assert!(config.logs_dir().is_dir());
        assert!(config.exports_dir().is_dir());
    }
}
