use salondesk::{AppState, BackgroundTasks, Config, init_logger};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Environment (.env overrides, if present)
    dotenv::dotenv().ok();

    // 2. Configuration and logging
    let config = Config::from_env();
    config.ensure_work_dir_structure()?;
    let logs_dir = config.logs_dir();
    init_logger(config.default_log_level(), config.log_to_file.then_some(logs_dir.as_path()));

    tracing::info!(work_dir = %config.work_dir, "SalonDesk starting");

    // 3. Shared state: database, asset cache, demo seed
    let state = AppState::initialize(config)?;

    // 4. Background workers, then the UI until the user quits
    let (tasks, reminder_rx) = BackgroundTasks::spawn(&state);

    if let Err(e) = salondesk::ui::run(state, reminder_rx).await {
        tracing::error!("UI error: {e}");
        tasks.shutdown().await;
        return Err(e.into());
    }

    tasks.shutdown().await;
    tracing::info!("SalonDesk stopped");
    Ok(())
}
