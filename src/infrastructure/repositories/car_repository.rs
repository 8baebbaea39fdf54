//! Car Repository Implementation
//!
//! PostgreSQL implementation of the CarRepository trait.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::{Car, CarRepository, Page, PageRequest};
use crate::infrastructure::database::translate;
use crate::shared::error::AppError;

/// Database row representation of the cars table.
#[derive(Debug, sqlx::FromRow)]
struct CarRow {
    id: i64,
    make: String,
    model: String,
    year: i32,
    trim: String,
    color: String,
    transmission: String,
    fuel: String,
    user_id: i64,
}

impl CarRow {
    /// Convert database row to domain Car entity.
    fn into_car(self) -> Car {
        Car {
            id: self.id,
            make: self.make,
            model: self.model,
            year: self.year,
            trim: self.trim,
            color: self.color,
            transmission: self.transmission,
            fuel: self.fuel,
            user_id: self.user_id,
        }
    }
}

const CAR_COLUMNS: &str = "id, make, model, year, trim, color, transmission, fuel, user_id";

/// PostgreSQL car repository implementation.
#[derive(Clone)]
pub struct PgCarRepository {
    pool: PgPool,
}

impl PgCarRepository {
    /// Create a new PgCarRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn page(rows: Vec<CarRow>, request: PageRequest, total: i64) -> Page<Car> {
        let cars = rows.into_iter().map(CarRow::into_car).collect();
        Page::new(cars, request, total as u64)
    }
}

#[async_trait]
impl CarRepository for PgCarRepository {
    async fn find_page(&self, request: PageRequest) -> Result<Page<Car>, AppError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM cars")
            .fetch_one(&self.pool)
            .await?;

        let rows = sqlx::query_as::<_, CarRow>(&format!(
            "SELECT {CAR_COLUMNS} FROM cars ORDER BY id LIMIT $1 OFFSET $2"
        ))
        .bind(request.limit())
        .bind(request.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(Self::page(rows, request, total))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Car>, AppError> {
        let row = sqlx::query_as::<_, CarRow>(&format!(
            "SELECT {CAR_COLUMNS} FROM cars WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CarRow::into_car))
    }

    async fn find_by_make(
        &self,
        make: &str,
        request: PageRequest,
    ) -> Result<Page<Car>, AppError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM cars WHERE make = $1")
            .bind(make)
            .fetch_one(&self.pool)
            .await?;

        let rows = sqlx::query_as::<_, CarRow>(&format!(
            "SELECT {CAR_COLUMNS} FROM cars WHERE make = $1 ORDER BY id LIMIT $2 OFFSET $3"
        ))
        .bind(make)
        .bind(request.limit())
        .bind(request.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(Self::page(rows, request, total))
    }

    async fn find_by_user_id(
        &self,
        user_id: i64,
        request: PageRequest,
    ) -> Result<Page<Car>, AppError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM cars WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        let rows = sqlx::query_as::<_, CarRow>(&format!(
            "SELECT {CAR_COLUMNS} FROM cars WHERE user_id = $1 ORDER BY id LIMIT $2 OFFSET $3"
        ))
        .bind(user_id)
        .bind(request.limit())
        .bind(request.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(Self::page(rows, request, total))
    }

    async fn create(&self, car: &Car) -> Result<Car, AppError> {
        let row = sqlx::query_as::<_, CarRow>(&format!(
            r#"
            INSERT INTO cars (make, model, year, trim, color, transmission, fuel, user_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {CAR_COLUMNS}
            "#
        ))
        .bind(&car.make)
        .bind(&car.model)
        .bind(car.year)
        .bind(&car.trim)
        .bind(&car.color)
        .bind(&car.transmission)
        .bind(&car.fuel)
        .bind(car.user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(translate)?;

        Ok(row.into_car())
    }

    async fn update(&self, car: &Car) -> Result<Car, AppError> {
        let row = sqlx::query_as::<_, CarRow>(&format!(
            r#"
            UPDATE cars
            SET make = $2,
                model = $3,
                year = $4,
                trim = $5,
                color = $6,
                transmission = $7,
                fuel = $8,
                user_id = $9
            WHERE id = $1
            RETURNING {CAR_COLUMNS}
            "#
        ))
        .bind(car.id)
        .bind(&car.make)
        .bind(&car.model)
        .bind(car.year)
        .bind(&car.trim)
        .bind(&car.color)
        .bind(&car.transmission)
        .bind(&car.fuel)
        .bind(car.user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(translate)?
        .ok_or_else(|| AppError::NotFound(format!("Car not found! Id: {}", car.id)))?;

        Ok(row.into_car())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM cars WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Car not found! Id: {}", id)));
        }

        Ok(())
    }
}
