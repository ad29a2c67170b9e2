//! Logging Infrastructure
//!
//! The TUI owns stdout, so logs go to the in-app log pane (tui-logger
//! layer) and to a daily-rolling file under `<work_dir>/logs`.

use std::path::Path;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing registry with the tui-logger layer and an
/// optional rolling file layer.
pub fn init_logger(default_level: &str, log_dir: Option<&Path>) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let registry = tracing_subscriber::registry()
        .with(tui_logger::tracing_subscriber_layer())
        .with(env_filter);

    match log_dir {
        Some(dir) if dir.exists() => {
            let file_appender = tracing_appender::rolling::daily(dir, "salondesk");
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(file_appender)
                        .with_ansi(false)
                        .with_target(false),
                )
                .init();
        }
        _ => registry.init(),
    }

    // log crate adapter for dependencies that do not use tracing
    tui_logger::init_logger(log::LevelFilter::Info).ok();
    tui_logger::set_default_level(log::LevelFilter::Info);
}
