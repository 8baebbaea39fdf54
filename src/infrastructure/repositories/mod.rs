//! Repository Implementations
//!
//! PostgreSQL implementations of domain repository traits.
//!
//! ## Available Repositories
//!
//! - **UserRepository** - User accounts with role links and owned car ids
//! - **CarRepository** - Car listings
//! - **RoleRepository** - Role reference data
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use sqlx::PgPool;
//! use crate::infrastructure::repositories::{
//!     PgCarRepository, PgRoleRepository, PgUserRepository,
//! };
//!
//! async fn setup_repositories(pool: PgPool) {
//!     let user_repo = PgUserRepository::new(pool.clone());
//!     let car_repo = PgCarRepository::new(pool.clone());
//!     let role_repo = PgRoleRepository::new(pool);
//! }
//! ```

pub mod car_repository;
pub mod role_repository;
pub mod user_repository;

pub use car_repository::PgCarRepository;
pub use role_repository::PgRoleRepository;
pub use user_repository::PgUserRepository;
