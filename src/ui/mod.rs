//! Terminal UI
//!
//! A sidebar of sections mirrors the hash routes of a single-page app:
//! every navigation fully reloads the target view's data from storage.
//! Forms are modal; a blocking alert reports user-facing errors and a
//! confirm modal guards destructive actions.

pub mod app;
pub mod form;
pub mod router;
pub mod views;

pub use app::run;
