//! User Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    Json,
};

use super::{created, page_or_no_content};
use crate::application::dto::{
    UserContactPatch, UserCreateRequest, UserDisplayNamePatch, UserPasswordPatch,
    UserPrivateResponse, UserPublicResponse, UserRolesPatch,
};
use crate::presentation::http::extractors::{UserPaging, ValidatedJson};
use crate::shared::error::AppError;
use crate::shared::validation::parse_id;
use crate::startup::AppState;

fn user_id(raw: &str) -> Result<i64, AppError> {
    parse_id(raw, "User ID")
}

/// List users, one page at a time
pub async fn get_all_users(
    State(state): State<AppState>,
    UserPaging(request): UserPaging,
) -> Result<Response, AppError> {
    let page = state.users.get_all_users(request).await?;
    Ok(page_or_no_content::<UserPublicResponse, _>(page))
}

/// Get a user by id
pub async fn get_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<UserPublicResponse>, AppError> {
    let user = state.users.get_user_by_id(user_id(&raw_id)?).await?;
    Ok(Json(user.into()))
}

/// Get the owner of a car
pub async fn get_user_by_car(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<UserPublicResponse>, AppError> {
    let car_id = parse_id(&raw_id, "Car ID")?;
    let user = state.users.get_user_by_car_id(car_id).await?;
    Ok(Json(user.into()))
}

/// Register a user
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<UserCreateRequest>,
) -> Result<Response, AppError> {
    let (draft, role_ids) = body.into_parts();
    let user = state.users.create_user(draft, role_ids).await?;

    Ok(created(
        format!("/api/v1/users/{}", user.id),
        UserPrivateResponse::from(user),
    ))
}

/// Replace a user
pub async fn update_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    ValidatedJson(body): ValidatedJson<UserCreateRequest>,
) -> Result<Json<UserPrivateResponse>, AppError> {
    let id = user_id(&raw_id)?;
    let (draft, role_ids) = body.into_parts();
    let user = state.users.update_user(draft, role_ids, id).await?;
    Ok(Json(user.into()))
}

pub async fn update_password(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    ValidatedJson(body): ValidatedJson<UserPasswordPatch>,
) -> Result<Json<UserPrivateResponse>, AppError> {
    let id = user_id(&raw_id)?;
    let user = state.users.update_user_password(body.password, id).await?;
    Ok(Json(user.into()))
}

pub async fn update_display_name(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    ValidatedJson(body): ValidatedJson<UserDisplayNamePatch>,
) -> Result<Json<UserPrivateResponse>, AppError> {
    let id = user_id(&raw_id)?;
    let user = state
        .users
        .update_user_display_name(body.display_name, id)
        .await?;
    Ok(Json(user.into()))
}

pub async fn update_contact(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    ValidatedJson(body): ValidatedJson<UserContactPatch>,
) -> Result<Json<UserPrivateResponse>, AppError> {
    let id = user_id(&raw_id)?;
    let user = state.users.update_user_contact(body.contact, id).await?;
    Ok(Json(user.into()))
}

pub async fn update_roles(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    ValidatedJson(body): ValidatedJson<UserRolesPatch>,
) -> Result<Json<UserPrivateResponse>, AppError> {
    let id = user_id(&raw_id)?;
    let user = state.users.update_user_roles(body.role_ids, id).await?;
    Ok(Json(user.into()))
}

/// Delete a user along with the cars it owns
pub async fn delete_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.users.delete_user(user_id(&raw_id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}
