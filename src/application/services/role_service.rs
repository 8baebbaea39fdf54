//! Role Service
//!
//! Roles are shared reference data: listed, looked up, created and deleted
//! here, assigned to users through the user service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use super::paging::{validate_page, PageNotFound};
use crate::domain::{Page, PageRequest, Role, RoleRepository, UserRepository};
use crate::shared::error::AppError;

/// Role service trait defining all role management operations.
#[async_trait]
pub trait RoleService: Send + Sync {
    /// Get one page of roles.
    async fn get_all_roles(&self, request: PageRequest) -> Result<Page<Role>, RoleError>;

    /// Get a role by its ID.
    async fn get_role_by_id(&self, role_id: i32) -> Result<Role, RoleError>;

    /// Roles held by a user. The user must exist.
    async fn get_roles_by_user_id(&self, user_id: i64) -> Result<Vec<Role>, RoleError>;

    /// Create a role.
    async fn create_role(&self, name: String) -> Result<Role, RoleError>;

    /// Delete a role no user holds.
    async fn delete_role(&self, role_id: i32) -> Result<(), RoleError>;
}

/// Role service errors
#[derive(Debug, thiserror::Error)]
pub enum RoleError {
    #[error("Role not found! Id: {0}")]
    NotFound(i32),

    #[error("User not found! Id: {0}")]
    UserNotFound(i64),

    #[error("Role already exists: {0}")]
    AlreadyExists(String),

    #[error("Role is still assigned to users! Id: {0}")]
    InUse(i32),

    #[error(transparent)]
    PageNotFound(#[from] PageNotFound),

    #[error(transparent)]
    Store(#[from] AppError),
}

impl From<RoleError> for AppError {
    fn from(err: RoleError) -> Self {
        match err {
            RoleError::NotFound(_) | RoleError::UserNotFound(_) => {
                AppError::NotFound(err.to_string())
            }
            RoleError::AlreadyExists(_) | RoleError::InUse(_) => AppError::Conflict(err.to_string()),
            RoleError::PageNotFound(e) => e.into(),
            RoleError::Store(e) => e,
        }
    }
}

/// RoleService implementation
pub struct RoleServiceImpl<R, U>
where
    R: RoleRepository,
    U: UserRepository,
{
    role_repo: Arc<R>,
    user_repo: Arc<U>,
}

impl<R, U> RoleServiceImpl<R, U>
where
    R: RoleRepository,
    U: UserRepository,
{
    pub fn new(role_repo: Arc<R>, user_repo: Arc<U>) -> Self {
        Self {
            role_repo,
            user_repo,
        }
    }
}

#[async_trait]
impl<R, U> RoleService for RoleServiceImpl<R, U>
where
    R: RoleRepository + 'static,
    U: UserRepository + 'static,
{
    #[instrument(skip(self))]
    async fn get_all_roles(&self, request: PageRequest) -> Result<Page<Role>, RoleError> {
        let page = self.role_repo.find_page(request).await?;
        validate_page(&page)?;
        Ok(page)
    }

    #[instrument(skip(self))]
    async fn get_role_by_id(&self, role_id: i32) -> Result<Role, RoleError> {
        self.role_repo
            .find_by_id(role_id)
            .await?
            .ok_or(RoleError::NotFound(role_id))
    }

    #[instrument(skip(self))]
    async fn get_roles_by_user_id(&self, user_id: i64) -> Result<Vec<Role>, RoleError> {
        if self.user_repo.find_by_id(user_id).await?.is_none() {
            return Err(RoleError::UserNotFound(user_id));
        }
        Ok(self.role_repo.find_by_user_id(user_id).await?)
    }

    #[instrument(skip(self))]
    async fn create_role(&self, name: String) -> Result<Role, RoleError> {
        let created = self
            .role_repo
            .create(&Role::new(name.as_str()))
            .await
            .map_err(|e| match e {
                AppError::ConstraintViolation(c) if c == "roles_name_key" => {
                    RoleError::AlreadyExists(name.clone())
                }
                other => RoleError::Store(other),
            })?;

        tracing::info!(role_id = created.id, name = %created.name, "Role created");
        Ok(created)
    }

    #[instrument(skip(self))]
    async fn delete_role(&self, role_id: i32) -> Result<(), RoleError> {
        self.get_role_by_id(role_id).await?;
        self.role_repo.delete(role_id).await.map_err(|e| match e {
            AppError::ConstraintViolation(c) if c == "user_roles_role_id_fkey" => {
                RoleError::InUse(role_id)
            }
            other => RoleError::Store(other),
        })?;

        tracing::info!(role_id, "Role deleted");
        Ok(())
    }
}
