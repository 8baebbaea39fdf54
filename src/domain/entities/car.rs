//! Car entity and repository trait.
//!
//! Maps to the `cars` table in the database schema.

use async_trait::async_trait;

use crate::domain::value_objects::{Page, PageRequest};
use crate::shared::error::AppError;

/// A listed car.
///
/// Maps to the `cars` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - make, model, trim: VARCHAR(50) NOT NULL
/// - year: INTEGER NOT NULL
/// - color, transmission, fuel: VARCHAR(30) NOT NULL
/// - user_id: BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE
/// - UNIQUE (make, model, year, trim)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Car {
    pub id: i64,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub trim: String,
    pub color: String,
    pub transmission: String,
    pub fuel: String,

    /// Owning user
    pub user_id: i64,
}

/// Caller-supplied car fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarDraft {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub trim: String,
    pub color: String,
    pub transmission: String,
    pub fuel: String,
}

impl Car {
    /// Build an unpersisted car owned by `user_id`.
    pub fn from_draft(draft: CarDraft, user_id: i64) -> Self {
        let mut car = Self::default();
        car.replace_with(draft, user_id);
        car
    }

    /// Overwrite every mutable field, keeping the id.
    pub fn replace_with(&mut self, draft: CarDraft, user_id: i64) {
        self.make = draft.make;
        self.model = draft.model;
        self.year = draft.year;
        self.trim = draft.trim;
        self.color = draft.color;
        self.transmission = draft.transmission;
        self.fuel = draft.fuel;
        self.user_id = user_id;
    }
}

/// Repository trait for Car data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CarRepository: Send + Sync {
    /// Fetch one page of cars ordered by id.
    async fn find_page(&self, request: PageRequest) -> Result<Page<Car>, AppError>;

    /// Find a car by ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<Car>, AppError>;

    /// Page of cars with exactly this make.
    async fn find_by_make(&self, make: &str, request: PageRequest)
        -> Result<Page<Car>, AppError>;

    /// Page of cars owned by a user.
    async fn find_by_user_id(
        &self,
        user_id: i64,
        request: PageRequest,
    ) -> Result<Page<Car>, AppError>;

    /// Insert a car; the id on the argument is ignored.
    ///
    /// Fails with `ConstraintViolation` on a duplicate make/model/year/trim.
    async fn create(&self, car: &Car) -> Result<Car, AppError>;

    /// Overwrite every column of an existing car.
    async fn update(&self, car: &Car) -> Result<Car, AppError>;

    /// Delete a car.
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}
