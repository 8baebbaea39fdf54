//! User entity and repository trait.
//!
//! Maps to the `users` table in the database schema, plus the `user_roles`
//! join table and the owned rows of `cars`.

use async_trait::async_trait;

use super::role::Role;
use crate::domain::value_objects::{Page, PageRequest};
use crate::shared::error::AppError;

/// Represents a user account of the marketplace.
///
/// Maps to the `users` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - username: VARCHAR(32) NOT NULL UNIQUE
/// - password: VARCHAR(255) NOT NULL (Argon2 PHC string)
/// - display_name: VARCHAR(50) NOT NULL
/// - contact: VARCHAR(100) NOT NULL
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct User {
    /// Primary key (0 until persisted)
    pub id: i64,

    /// Username (unique)
    pub username: String,

    /// Argon2 password hash
    pub password: String,

    pub display_name: String,

    /// Free-form contact string (phone, email, ...)
    pub contact: String,

    /// Assigned roles, ordered by id
    pub roles: Vec<Role>,

    /// Ids of the cars this user owns, ascending
    pub car_ids: Vec<i64>,
}

/// Caller-supplied user fields, before hashing and role resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    pub username: String,
    /// Plain-text password
    pub password: String,
    pub display_name: String,
    pub contact: String,
}

impl User {
    /// Ids of the assigned roles.
    pub fn role_ids(&self) -> Vec<i32> {
        self.roles.iter().map(|r| r.id).collect()
    }
}

/// Repository trait for User data access operations.
///
/// Every `User` returned carries its roles and car ids.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch one page of users ordered by id.
    async fn find_page(&self, request: PageRequest) -> Result<Page<User>, AppError>;

    /// Find a user by ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    /// Find the owner of a car.
    async fn find_by_car_id(&self, car_id: i64) -> Result<Option<User>, AppError>;

    /// Insert a user and its role links; the id on the argument is ignored.
    async fn create(&self, user: &User) -> Result<User, AppError>;

    /// Overwrite every scalar field and replace the role links.
    async fn update(&self, user: &User) -> Result<User, AppError>;

    /// Delete a user. Owned cars and role links go with it.
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}
