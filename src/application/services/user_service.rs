//! User Service
//!
//! Handles user management: paged listing, lookups, creation with role
//! assignment, full replacement and the single-field patches.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use super::paging::{validate_page, PageNotFound};
use crate::domain::{Page, PageRequest, Role, RoleRepository, User, UserDraft, UserRepository};
use crate::shared::error::AppError;
use crate::shared::password::hash_password;

/// User service trait
#[async_trait]
pub trait UserService: Send + Sync {
    /// Get one page of users.
    async fn get_all_users(&self, request: PageRequest) -> Result<Page<User>, UserError>;

    /// Get user by ID
    async fn get_user_by_id(&self, user_id: i64) -> Result<User, UserError>;

    /// Get the owner of a car
    async fn get_user_by_car_id(&self, car_id: i64) -> Result<User, UserError>;

    /// Create a user holding exactly the given roles.
    async fn create_user(&self, draft: UserDraft, role_ids: Vec<i32>) -> Result<User, UserError>;

    /// Replace every mutable field and the role set of an existing user.
    async fn update_user(
        &self,
        draft: UserDraft,
        role_ids: Vec<i32>,
        user_id: i64,
    ) -> Result<User, UserError>;

    /// Replace only the password.
    async fn update_user_password(&self, password: String, user_id: i64)
        -> Result<User, UserError>;

    /// Replace only the display name.
    async fn update_user_display_name(
        &self,
        display_name: String,
        user_id: i64,
    ) -> Result<User, UserError>;

    /// Replace only the contact.
    async fn update_user_contact(&self, contact: String, user_id: i64) -> Result<User, UserError>;

    /// Replace only the role set.
    async fn update_user_roles(&self, role_ids: Vec<i32>, user_id: i64)
        -> Result<User, UserError>;

    /// Delete user account
    async fn delete_user(&self, user_id: i64) -> Result<(), UserError>;
}

/// User service errors
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("User not found! Id: {0}")]
    NotFound(i64),

    #[error("User not found! Car id: {0}")]
    NotFoundByCar(i64),

    #[error("Role not found! Id: {0}")]
    RoleNotFound(i32),

    #[error("Username already exists: {0}")]
    UsernameTaken(String),

    #[error(transparent)]
    PageNotFound(#[from] PageNotFound),

    #[error(transparent)]
    Store(#[from] AppError),
}

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) | UserError::NotFoundByCar(_) | UserError::RoleNotFound(_) => {
                AppError::NotFound(err.to_string())
            }
            UserError::UsernameTaken(_) => AppError::Conflict(err.to_string()),
            UserError::PageNotFound(e) => e.into(),
            UserError::Store(e) => e,
        }
    }
}

/// Resolve every id to a stored role.
///
/// Duplicate ids collapse; the first unknown id (in ascending order) fails.
pub(crate) async fn resolve_roles<R>(role_repo: &R, role_ids: &[i32]) -> Result<Vec<Role>, UserError>
where
    R: RoleRepository + ?Sized,
{
    let mut wanted = role_ids.to_vec();
    wanted.sort_unstable();
    wanted.dedup();

    if wanted.is_empty() {
        return Ok(Vec::new());
    }

    let mut roles = role_repo.find_by_ids(&wanted).await?;
    roles.sort_by_key(|r| r.id);

    if let Some(missing) = wanted
        .iter()
        .find(|id| roles.binary_search_by_key(*id, |r| r.id).is_err())
    {
        return Err(UserError::RoleNotFound(*missing));
    }

    Ok(roles)
}

/// UserService implementation
pub struct UserServiceImpl<U, R>
where
    U: UserRepository,
    R: RoleRepository,
{
    user_repo: Arc<U>,
    role_repo: Arc<R>,
}

impl<U, R> UserServiceImpl<U, R>
where
    U: UserRepository,
    R: RoleRepository,
{
    pub fn new(user_repo: Arc<U>, role_repo: Arc<R>) -> Self {
        Self {
            user_repo,
            role_repo,
        }
    }

    async fn load(&self, user_id: i64) -> Result<User, UserError> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(UserError::NotFound(user_id))
    }

    async fn save(&self, user: &User) -> Result<User, UserError> {
        match self.user_repo.update(user).await {
            Ok(saved) => Ok(saved),
            Err(e) => Err(self.write_conflict(e, user).await),
        }
    }

    /// Map a store constraint violation on a user write to the domain error
    /// it stands for. Unrecognised constraints pass through untouched.
    async fn write_conflict(&self, err: AppError, user: &User) -> UserError {
        let name = match err {
            AppError::ConstraintViolation(name) => name,
            other => return UserError::Store(other),
        };

        match name.as_str() {
            "users_username_key" => UserError::UsernameTaken(user.username.clone()),
            "user_roles_user_id_fkey" => UserError::NotFound(user.id),
            // A role was deleted after it was resolved; resolve again to name it
            "user_roles_role_id_fkey" => {
                match resolve_roles(self.role_repo.as_ref(), &user.role_ids()).await {
                    Err(e) => e,
                    Ok(_) => UserError::Store(AppError::ConstraintViolation(name)),
                }
            }
            _ => UserError::Store(AppError::ConstraintViolation(name)),
        }
    }

    /// Load, apply one setter, persist. No lock is held between the read and
    /// the write; the last writer wins.
    async fn patch<F>(&self, user_id: i64, apply: F) -> Result<User, UserError>
    where
        F: FnOnce(&mut User) + Send,
    {
        let mut user = self.load(user_id).await?;
        apply(&mut user);
        self.save(&user).await
    }
}

#[async_trait]
impl<U, R> UserService for UserServiceImpl<U, R>
where
    U: UserRepository + 'static,
    R: RoleRepository + 'static,
{
    #[instrument(skip(self))]
    async fn get_all_users(&self, request: PageRequest) -> Result<Page<User>, UserError> {
        let page = self.user_repo.find_page(request).await?;
        validate_page(&page)?;
        Ok(page)
    }

    #[instrument(skip(self))]
    async fn get_user_by_id(&self, user_id: i64) -> Result<User, UserError> {
        self.load(user_id).await
    }

    #[instrument(skip(self))]
    async fn get_user_by_car_id(&self, car_id: i64) -> Result<User, UserError> {
        self.user_repo
            .find_by_car_id(car_id)
            .await?
            .ok_or(UserError::NotFoundByCar(car_id))
    }

    #[instrument(skip(self, draft), fields(username = %draft.username))]
    async fn create_user(&self, draft: UserDraft, role_ids: Vec<i32>) -> Result<User, UserError> {
        let roles = resolve_roles(self.role_repo.as_ref(), &role_ids).await?;

        let user = User {
            id: 0,
            password: hash_password(&draft.password)?,
            username: draft.username,
            display_name: draft.display_name,
            contact: draft.contact,
            roles,
            car_ids: Vec::new(),
        };

        let created = match self.user_repo.create(&user).await {
            Ok(created) => created,
            Err(e) => return Err(self.write_conflict(e, &user).await),
        };

        tracing::info!(user_id = created.id, "User created");
        Ok(created)
    }

    #[instrument(skip(self, draft), fields(username = %draft.username))]
    async fn update_user(
        &self,
        draft: UserDraft,
        role_ids: Vec<i32>,
        user_id: i64,
    ) -> Result<User, UserError> {
        let mut user = self.load(user_id).await?;
        let roles = resolve_roles(self.role_repo.as_ref(), &role_ids).await?;

        user.username = draft.username;
        user.password = hash_password(&draft.password)?;
        user.display_name = draft.display_name;
        user.contact = draft.contact;
        user.roles = roles;

        self.save(&user).await
    }

    #[instrument(skip(self, password))]
    async fn update_user_password(
        &self,
        password: String,
        user_id: i64,
    ) -> Result<User, UserError> {
        let hash = hash_password(&password)?;
        self.patch(user_id, move |user| user.password = hash).await
    }

    #[instrument(skip(self))]
    async fn update_user_display_name(
        &self,
        display_name: String,
        user_id: i64,
    ) -> Result<User, UserError> {
        self.patch(user_id, move |user| user.display_name = display_name)
            .await
    }

    #[instrument(skip(self))]
    async fn update_user_contact(&self, contact: String, user_id: i64) -> Result<User, UserError> {
        self.patch(user_id, move |user| user.contact = contact).await
    }

    #[instrument(skip(self))]
    async fn update_user_roles(
        &self,
        role_ids: Vec<i32>,
        user_id: i64,
    ) -> Result<User, UserError> {
        // Existence first, so an unknown user wins over an unknown role
        let mut user = self.load(user_id).await?;
        user.roles = resolve_roles(self.role_repo.as_ref(), &role_ids).await?;
        self.save(&user).await
    }

    #[instrument(skip(self))]
    async fn delete_user(&self, user_id: i64) -> Result<(), UserError> {
        self.load(user_id).await?;
        self.user_repo.delete(user_id).await?;

        tracing::info!(user_id, "User deleted");
        Ok(())
    }
}
