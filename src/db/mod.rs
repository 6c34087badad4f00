//! Database layer
//!
//! SQLite connection pool, embedded migrations and the repository
//! implementations for each record kind.

pub mod migrations;
pub mod pool;
pub mod repositories;

pub use pool::{create_pool, create_test_pool};
