//! # ngo-db
//!
//! Storage layer implementing the repository traits from `ngo-core`.
//!
//! ## Overview
//!
//! Two backends are provided:
//!
//! - PostgreSQL via SQLx: connection pool, migrations, `FromRow` models,
//!   row mappers and the `Pg*Repository` implementations
//! - [`InMemoryStore`]: a single mutex-guarded state implementing every trait,
//!   for tests and local runs without a database
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ngo_db::pool::{create_pool, migrations_dir, run_migrations, DatabaseConfig};
//! use ngo_db::PgEventRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::with_url(std::env::var("DATABASE_URL")?);
//!     let pool = create_pool(&config).await?;
//!     run_migrations(&pool, &migrations_dir()).await?;
//!     let events = PgEventRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::InMemoryStore;
pub use pool::{create_pool, migrations_dir, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{
    PgDonationRepository, PgEventRepository, PgFeedbackRepository, PgParticipationRepository,
    PgPostingRepository, PgUserRepository, PgVolunteerRepository,
};
