//! User Repository Implementation
//!
//! PostgreSQL implementation of the UserRepository trait.
//! Maps between the `users`/`user_roles` tables and the domain User entity.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};

use crate::domain::{Page, PageRequest, Role, User, UserRepository};
use crate::infrastructure::database::translate;
use crate::shared::error::AppError;

/// Database row representation of the users table.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    password: String,
    display_name: String,
    contact: String,
}

impl UserRow {
    /// Convert database row to domain User entity.
    fn into_user(self, roles: Vec<Role>, car_ids: Vec<i64>) -> User {
        User {
            id: self.id,
            username: self.username,
            password: self.password,
            display_name: self.display_name,
            contact: self.contact,
            roles,
            car_ids,
        }
    }
}

/// A role joined through user_roles.
#[derive(Debug, sqlx::FromRow)]
struct UserRoleRow {
    user_id: i64,
    role_id: i32,
    name: String,
}

/// PostgreSQL user repository implementation.
///
/// Users are always returned with their roles and car ids, loaded in two
/// batched queries per call regardless of how many users are involved.
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn with_relations(&self, rows: Vec<UserRow>) -> Result<Vec<User>, AppError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();

        let mut roles: HashMap<i64, Vec<Role>> = HashMap::new();
        let role_rows = sqlx::query_as::<_, UserRoleRow>(
            r#"
            SELECT ur.user_id, r.id AS role_id, r.name
            FROM user_roles ur
            JOIN roles r ON r.id = ur.role_id
            WHERE ur.user_id = ANY($1)
            ORDER BY r.id
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;
        for row in role_rows {
            roles.entry(row.user_id).or_default().push(Role {
                id: row.role_id,
                name: row.name,
            });
        }

        let mut cars: HashMap<i64, Vec<i64>> = HashMap::new();
        let car_rows = sqlx::query_as::<_, (i64, i64)>(
            "SELECT user_id, id FROM cars WHERE user_id = ANY($1) ORDER BY id",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;
        for (user_id, car_id) in car_rows {
            cars.entry(user_id).or_default().push(car_id);
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let id = row.id;
                row.into_user(
                    roles.remove(&id).unwrap_or_default(),
                    cars.remove(&id).unwrap_or_default(),
                )
            })
            .collect())
    }

    async fn with_relations_one(&self, row: Option<UserRow>) -> Result<Option<User>, AppError> {
        match row {
            Some(row) => Ok(self.with_relations(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    /// Insert one link per role.
    async fn link_roles(
        conn: &mut PgConnection,
        user_id: i64,
        roles: &[Role],
    ) -> Result<(), AppError> {
        if roles.is_empty() {
            return Ok(());
        }
        let role_ids: Vec<i32> = roles.iter().map(|r| r.id).collect();

        sqlx::query(
            "INSERT INTO user_roles (user_id, role_id) SELECT $1, UNNEST($2::INTEGER[])",
        )
        .bind(user_id)
        .bind(&role_ids)
        .execute(conn)
        .await
        .map_err(translate)?;

        Ok(())
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_page(&self, request: PageRequest) -> Result<Page<User>, AppError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password, display_name, contact
            FROM users
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(request.limit())
        .bind(request.offset())
        .fetch_all(&self.pool)
        .await?;

        let users = self.with_relations(rows).await?;
        Ok(Page::new(users, request, total as u64))
    }

    /// Find a user by their internal ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password, display_name, contact
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        self.with_relations_one(row).await
    }

    async fn find_by_car_id(&self, car_id: i64) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT u.id, u.username, u.password, u.display_name, u.contact
            FROM users u
            JOIN cars c ON c.user_id = u.id
            WHERE c.id = $1
            "#,
        )
        .bind(car_id)
        .fetch_optional(&self.pool)
        .await?;

        self.with_relations_one(row).await
    }

    /// Create a new user and its role links in one transaction.
    async fn create(&self, user: &User) -> Result<User, AppError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (username, password, display_name, contact)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, password, display_name, contact
            "#,
        )
        .bind(&user.username)
        .bind(&user.password)
        .bind(&user.display_name)
        .bind(&user.contact)
        .fetch_one(&mut *tx)
        .await
        .map_err(translate)?;

        Self::link_roles(&mut tx, row.id, &user.roles).await?;
        tx.commit().await?;

        Ok(row.into_user(user.roles.clone(), Vec::new()))
    }

    /// Update an existing user and replace its role links.
    async fn update(&self, user: &User) -> Result<User, AppError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET username = $2,
                password = $3,
                display_name = $4,
                contact = $5
            WHERE id = $1
            RETURNING id, username, password, display_name, contact
            "#,
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.password)
        .bind(&user.display_name)
        .bind(&user.contact)
        .fetch_optional(&mut *tx)
        .await
        .map_err(translate)?
        .ok_or_else(|| AppError::NotFound(format!("User not found! Id: {}", user.id)))?;

        sqlx::query("DELETE FROM user_roles WHERE user_id = $1")
            .bind(user.id)
            .execute(&mut *tx)
            .await?;
        Self::link_roles(&mut tx, user.id, &user.roles).await?;

        let car_ids = sqlx::query_scalar::<_, i64>(
            "SELECT id FROM cars WHERE user_id = $1 ORDER BY id",
        )
        .bind(user.id)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        let mut roles = user.roles.clone();
        roles.sort_by_key(|r| r.id);
        Ok(row.into_user(roles, car_ids))
    }

    /// Delete a user; cars and role links cascade.
    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("User not found! Id: {}", id)));
        }

        Ok(())
    }
}
