//! SQLite storage for the RPG payment engine.
//!
//! The schema lives in `migrations/`. Apply it with [`SqliteDatabase::run_migrations`] before first use.
mod sqlite_impl;

pub mod db;
pub use sqlite_impl::SqliteDatabase;
