//! Car Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    Json,
};

use super::{created, page_or_no_content};
use crate::application::dto::{CarRequest, CarResponse};
use crate::presentation::http::extractors::{Paging, ValidatedJson};
use crate::shared::error::AppError;
use crate::shared::validation::parse_id;
use crate::startup::AppState;

fn car_id(raw: &str) -> Result<i64, AppError> {
    parse_id(raw, "Car ID")
}

fn user_id(raw: &str) -> Result<i64, AppError> {
    parse_id(raw, "User ID")
}

pub async fn get_all_cars(
    State(state): State<AppState>,
    Paging(request): Paging,
) -> Result<Response, AppError> {
    let page = state.cars.get_all_cars(request).await?;
    Ok(page_or_no_content::<CarResponse, _>(page))
}

pub async fn get_car(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<CarResponse>, AppError> {
    let car = state.cars.get_car_by_id(car_id(&raw_id)?).await?;
    Ok(Json(car.into()))
}

/// Cars of one make; the match is exact and case-sensitive
pub async fn get_cars_by_make(
    State(state): State<AppState>,
    Path(make): Path<String>,
    Paging(request): Paging,
) -> Result<Response, AppError> {
    let page = state.cars.get_cars_by_make(&make, request).await?;
    Ok(page_or_no_content::<CarResponse, _>(page))
}

pub async fn get_cars_by_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Paging(request): Paging,
) -> Result<Response, AppError> {
    let page = state
        .cars
        .get_cars_by_user_id(user_id(&raw_id)?, request)
        .await?;
    Ok(page_or_no_content::<CarResponse, _>(page))
}

/// List a car for a user
pub async fn create_car(
    State(state): State<AppState>,
    Path(raw_user_id): Path<String>,
    ValidatedJson(body): ValidatedJson<CarRequest>,
) -> Result<Response, AppError> {
    let owner = user_id(&raw_user_id)?;
    let car = state.cars.create_car(body.into(), owner).await?;

    Ok(created(
        format!("/api/v1/cars/{}", car.id),
        CarResponse::from(car),
    ))
}

/// Replace a car, possibly moving it to another user
pub async fn update_car(
    State(state): State<AppState>,
    Path((raw_car_id, raw_user_id)): Path<(String, String)>,
    ValidatedJson(body): ValidatedJson<CarRequest>,
) -> Result<Json<CarResponse>, AppError> {
    let id = car_id(&raw_car_id)?;
    let owner = user_id(&raw_user_id)?;
    let car = state.cars.update_car(body.into(), id, owner).await?;
    Ok(Json(car.into()))
}

pub async fn delete_car(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.cars.delete_car(car_id(&raw_id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}
