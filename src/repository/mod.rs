//! Record repositories
//!
//! Thin data-access layer over [`Storage`](crate::storage::Storage): one
//! module per collection, free functions that validate input, enforce
//! entity rules (invoice numbering, stock clamping, cancel semantics)
//! and return [`AppResult`](crate::utils::AppResult).

pub mod appointments;
pub mod clients;
pub mod inventory;
pub mod invoices;
pub mod search;
pub mod seed;
pub mod services;
pub mod settings;
