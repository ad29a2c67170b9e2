//! Application services
//!
//! Everything above the repositories that is not UI: the reminder
//! worker, JSON backup import/export, calendar-file and WhatsApp link
//! generation, and the bundled asset cache.

pub mod asset_cache;
pub mod backup;
pub mod ics;
pub mod messaging;
pub mod reminder;
