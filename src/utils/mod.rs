//! Utility module — error type, validation, money, time and logging helpers

pub mod error;
pub mod logger;
pub mod money;
pub mod time;
pub mod validation;

pub use error::{AppError, AppResult};
