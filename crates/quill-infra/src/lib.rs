//! # Quill Infrastructure
//!
//! Concrete implementations of the storage ports defined in `quill-core`.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL storage via SeaORM
//! - without `postgres` - no database driver; only the in-memory store is built

pub mod database;
pub mod memory;

pub use database::ConnectionSettings;
pub use memory::InMemoryPostStore;

#[cfg(feature = "postgres")]
pub use database::{PostgresPostRepository, PostgresPostStore};
