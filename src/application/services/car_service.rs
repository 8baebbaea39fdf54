//! Car Service
//!
//! Listing, lookup, creation, full replacement and deletion of cars.
//! Every car belongs to exactly one user.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use super::paging::{validate_page, PageNotFound};
use crate::domain::{Car, CarDraft, CarRepository, Page, PageRequest, UserRepository};
use crate::shared::error::AppError;

/// Car service trait
#[async_trait]
pub trait CarService: Send + Sync {
    /// Get one page of cars.
    async fn get_all_cars(&self, request: PageRequest) -> Result<Page<Car>, CarError>;

    async fn get_car_by_id(&self, car_id: i64) -> Result<Car, CarError>;

    /// Cars with exactly this make (case-sensitive).
    async fn get_cars_by_make(
        &self,
        make: &str,
        request: PageRequest,
    ) -> Result<Page<Car>, CarError>;

    /// Cars owned by a user. An unknown user simply owns nothing.
    async fn get_cars_by_user_id(
        &self,
        user_id: i64,
        request: PageRequest,
    ) -> Result<Page<Car>, CarError>;

    /// List a new car for a user.
    async fn create_car(&self, draft: CarDraft, user_id: i64) -> Result<Car, CarError>;

    /// Replace every field of a car, including its owner.
    async fn update_car(&self, draft: CarDraft, car_id: i64, user_id: i64)
        -> Result<Car, CarError>;

    async fn delete_car(&self, car_id: i64) -> Result<(), CarError>;
}

/// Car service errors
#[derive(Debug, thiserror::Error)]
pub enum CarError {
    #[error("Car not found! Id: {0}")]
    NotFound(i64),

    #[error("User not found! Id: {0}")]
    UserNotFound(i64),

    #[error("This car already exists: Make: {make} - Model: {model} - Year: {year} - Trim: {trim}")]
    AlreadyExists {
        make: String,
        model: String,
        year: i32,
        trim: String,
    },

    #[error(transparent)]
    PageNotFound(#[from] PageNotFound),

    #[error(transparent)]
    Store(#[from] AppError),
}

impl From<CarError> for AppError {
    fn from(err: CarError) -> Self {
        match err {
            CarError::NotFound(_) | CarError::UserNotFound(_) => AppError::NotFound(err.to_string()),
            CarError::AlreadyExists { .. } => AppError::Conflict(err.to_string()),
            CarError::PageNotFound(e) => e.into(),
            CarError::Store(e) => e,
        }
    }
}

/// Map a store constraint violation on a car write to the domain error it
/// stands for. Unrecognised constraints pass through untouched.
fn write_conflict(err: AppError, car: &Car) -> CarError {
    match err {
        AppError::ConstraintViolation(name) => match name.as_str() {
            "cars_identity_key" => CarError::AlreadyExists {
                make: car.make.clone(),
                model: car.model.clone(),
                year: car.year,
                trim: car.trim.clone(),
            },
            // Owner deleted after the existence check
            "cars_user_id_fkey" => CarError::UserNotFound(car.user_id),
            _ => CarError::Store(AppError::ConstraintViolation(name)),
        },
        other => CarError::Store(other),
    }
}

/// CarService implementation
pub struct CarServiceImpl<C, U>
where
    C: CarRepository,
    U: UserRepository,
{
    car_repo: Arc<C>,
    user_repo: Arc<U>,
}

impl<C, U> CarServiceImpl<C, U>
where
    C: CarRepository,
    U: UserRepository,
{
    pub fn new(car_repo: Arc<C>, user_repo: Arc<U>) -> Self {
        Self {
            car_repo,
            user_repo,
        }
    }

    async fn ensure_user(&self, user_id: i64) -> Result<(), CarError> {
        match self.user_repo.find_by_id(user_id).await? {
            Some(_) => Ok(()),
            None => Err(CarError::UserNotFound(user_id)),
        }
    }

    fn checked(page: Page<Car>) -> Result<Page<Car>, CarError> {
        validate_page(&page)?;
        Ok(page)
    }
}

#[async_trait]
impl<C, U> CarService for CarServiceImpl<C, U>
where
    C: CarRepository + 'static,
    U: UserRepository + 'static,
{
    #[instrument(skip(self))]
    async fn get_all_cars(&self, request: PageRequest) -> Result<Page<Car>, CarError> {
        Self::checked(self.car_repo.find_page(request).await?)
    }

    #[instrument(skip(self))]
    async fn get_car_by_id(&self, car_id: i64) -> Result<Car, CarError> {
        self.car_repo
            .find_by_id(car_id)
            .await?
            .ok_or(CarError::NotFound(car_id))
    }

    #[instrument(skip(self))]
    async fn get_cars_by_make(
        &self,
        make: &str,
        request: PageRequest,
    ) -> Result<Page<Car>, CarError> {
        Self::checked(self.car_repo.find_by_make(make, request).await?)
    }

    #[instrument(skip(self))]
    async fn get_cars_by_user_id(
        &self,
        user_id: i64,
        request: PageRequest,
    ) -> Result<Page<Car>, CarError> {
        Self::checked(self.car_repo.find_by_user_id(user_id, request).await?)
    }

    #[instrument(skip(self, draft), fields(make = %draft.make, model = %draft.model))]
    async fn create_car(&self, draft: CarDraft, user_id: i64) -> Result<Car, CarError> {
        self.ensure_user(user_id).await?;

        let car = Car::from_draft(draft, user_id);
        let created = self
            .car_repo
            .create(&car)
            .await
            .map_err(|e| write_conflict(e, &car))?;

        tracing::info!(car_id = created.id, user_id, "Car created");
        Ok(created)
    }

    #[instrument(skip(self, draft))]
    async fn update_car(
        &self,
        draft: CarDraft,
        car_id: i64,
        user_id: i64,
    ) -> Result<Car, CarError> {
        let mut car = self.get_car_by_id(car_id).await?;
        self.ensure_user(user_id).await?;

        car.replace_with(draft, user_id);
        self.car_repo
            .update(&car)
            .await
            .map_err(|e| write_conflict(e, &car))
    }

    #[instrument(skip(self))]
    async fn delete_car(&self, car_id: i64) -> Result<(), CarError> {
        self.get_car_by_id(car_id).await?;
        self.car_repo.delete(car_id).await?;

        tracing::info!(car_id, "Car deleted");
        Ok(())
    }
}
