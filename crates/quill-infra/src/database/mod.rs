//! PostgreSQL storage via SeaORM.

mod connections;

#[cfg(feature = "postgres")]
pub mod entity;
#[cfg(feature = "postgres")]
mod postgres_repo;

pub use connections::ConnectionSettings;

#[cfg(feature = "postgres")]
pub use connections::PostgresPostStore;
#[cfg(feature = "postgres")]
pub use postgres_repo::PostgresPostRepository;
