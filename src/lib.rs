//! SalonDesk - gestión de salón local-first
//!
//! A single-binary salon manager: clients, services, appointments,
//! invoicing, inventory and settings, all stored in an embedded redb
//! database under a local work directory. No network, no accounts.
//!
//! # Module layout
//!
//! ```text
//! src/
//! ├── core/          # configuration, shared state, background tasks
//! ├── models/        # entity records and drafts
//! ├── storage/       # redb key-value gateway, one table per collection
//! ├── repository/    # per-collection operations, validation, seed, search
//! ├── services/      # reminders, backup, ICS export, WhatsApp links, asset cache
//! ├── calendar.rs    # day/week/month ranges and the month grid
//! ├── ui/            # ratatui shell, router, forms, section views
//! └── utils/         # errors, validation, money, time, logging
//! ```

pub mod calendar;
pub mod core;
pub mod models;
pub mod repository;
pub mod services;
pub mod storage;
pub mod ui;
pub mod utils;

pub use core::{AppState, BackgroundTasks, Config};
pub use storage::{Storage, Store};
pub use utils::{AppError, AppResult};
pub use utils::logger::init_logger;
