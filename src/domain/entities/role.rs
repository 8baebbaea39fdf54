//! Role entity and repository trait.
//!
//! Maps to the `roles` table in the database schema.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{Page, PageRequest};
use crate::shared::error::AppError;

/// Shared reference data assignable to any number of users.
///
/// Maps to the `roles` table:
/// - id: SERIAL PRIMARY KEY
/// - name: VARCHAR(50) NOT NULL UNIQUE
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: i32,
    pub name: String,
}

impl Role {
    /// A role that has not been persisted yet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
        }
    }
}

/// Repository trait for Role data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Fetch one page of roles ordered by id.
    async fn find_page(&self, request: PageRequest) -> Result<Page<Role>, AppError>;

    /// Find a role by its ID.
    async fn find_by_id(&self, id: i32) -> Result<Option<Role>, AppError>;

    /// Find every role whose id is in `ids`. Unknown ids are skipped.
    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Role>, AppError>;

    /// Roles assigned to a user, ordered by id.
    async fn find_by_user_id(&self, user_id: i64) -> Result<Vec<Role>, AppError>;

    /// Insert a role; the id on the argument is ignored.
    async fn create(&self, role: &Role) -> Result<Role, AppError>;

    /// Delete a role.
    ///
    /// Fails with `ConstraintViolation` while any user still holds it.
    async fn delete(&self, id: i32) -> Result<(), AppError>;
}
