//! Infrastructure: SQLite store handle, settings, logging.

pub mod config;
pub mod db;
pub mod logging;

pub use config::Settings;
pub use db::{init_test_db, StoreHandle, StoreLocation};
