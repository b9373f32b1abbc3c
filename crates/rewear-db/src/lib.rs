//! # rewear-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for all repository traits
//! defined in `rewear-core`. It handles:
//!
//! - Connection pool management and schema migrations
//! - Database models with SQLx `FromRow` derives
//! - Model → entity mappers
//! - Repository implementations; the ledger and swap repositories wrap
//!   multi-row changes in a single transaction with row locks
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rewear_db::{create_pool, run_migrations, default_migrations_dir, PoolConfig};
//! use rewear_db::PgLedgerRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&PoolConfig::new("postgres://localhost/rewear")).await?;
//!     run_migrations(&pool, &default_migrations_dir()).await?;
//!     let ledger = PgLedgerRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{
    check_health, create_pool, default_migrations_dir, run_migrations, DbError, PgPool, PoolConfig,
};
pub use repositories::{
    PgAdminLogRepository, PgItemRepository, PgLedgerRepository, PgSessionRepository,
    PgSwapRequestRepository, PgUserRepository,
};
