//! Role Repository Implementation
//!
//! PostgreSQL implementation of the RoleRepository trait.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::{Page, PageRequest, Role, RoleRepository};
use crate::infrastructure::database::translate;
use crate::shared::error::AppError;

/// Database row representation of the roles table.
#[derive(Debug, sqlx::FromRow)]
struct RoleRow {
    id: i32,
    name: String,
}

impl RoleRow {
    /// Convert database row to domain Role entity.
    fn into_role(self) -> Role {
        Role {
            id: self.id,
            name: self.name,
        }
    }
}

/// PostgreSQL role repository implementation.
///
/// Provides CRUD operations for roles against a PostgreSQL database.
#[derive(Clone)]
pub struct PgRoleRepository {
    pool: PgPool,
}

impl PgRoleRepository {
    /// Create a new PgRoleRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleRepository for PgRoleRepository {
    async fn find_page(&self, request: PageRequest) -> Result<Page<Role>, AppError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM roles")
            .fetch_one(&self.pool)
            .await?;

        let rows = sqlx::query_as::<_, RoleRow>(
            "SELECT id, name FROM roles ORDER BY id LIMIT $1 OFFSET $2",
        )
        .bind(request.limit())
        .bind(request.offset())
        .fetch_all(&self.pool)
        .await?;

        let roles = rows.into_iter().map(RoleRow::into_role).collect();
        Ok(Page::new(roles, request, total as u64))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Role>, AppError> {
        let row = sqlx::query_as::<_, RoleRow>("SELECT id, name FROM roles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(RoleRow::into_role))
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Role>, AppError> {
        let rows = sqlx::query_as::<_, RoleRow>(
            "SELECT id, name FROM roles WHERE id = ANY($1) ORDER BY id",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(RoleRow::into_role).collect())
    }

    /// Find all roles assigned to a user.
    async fn find_by_user_id(&self, user_id: i64) -> Result<Vec<Role>, AppError> {
        let rows = sqlx::query_as::<_, RoleRow>(
            r#"
            SELECT r.id, r.name
            FROM roles r
            INNER JOIN user_roles ur ON r.id = ur.role_id
            WHERE ur.user_id = $1
            ORDER BY r.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(RoleRow::into_role).collect())
    }

    async fn create(&self, role: &Role) -> Result<Role, AppError> {
        let row = sqlx::query_as::<_, RoleRow>(
            "INSERT INTO roles (name) VALUES ($1) RETURNING id, name",
        )
        .bind(&role.name)
        .fetch_one(&self.pool)
        .await
        .map_err(translate)?;

        Ok(row.into_role())
    }

    /// Delete a role. Held roles are protected by the user_roles foreign key.
    async fn delete(&self, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM roles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(translate)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Role not found! Id: {}", id)));
        }

        Ok(())
    }
}
