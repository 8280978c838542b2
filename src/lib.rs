//! Lending Library
//!
//! An in-memory catalog of books, discs and magazines held in multiple copies,
//! and a membership ledger that borrows and returns them against per-member limits.

pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use services::{Catalog, Ledger, Library};
