//! Role Handlers

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use super::page_or_no_content;
use crate::application::dto::{RoleCreateRequest, RoleResponse};
use crate::presentation::http::extractors::{Paging, ValidatedJson};
use crate::shared::error::AppError;
use crate::shared::validation::parse_id;
use crate::startup::AppState;

fn role_id(raw: &str) -> Result<i32, AppError> {
    parse_id(raw, "Role ID")
}

pub async fn get_all_roles(
    State(state): State<AppState>,
    Paging(request): Paging,
) -> Result<Response, AppError> {
    let page = state.roles.get_all_roles(request).await?;
    Ok(page_or_no_content::<RoleResponse, _>(page))
}

pub async fn get_role(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<RoleResponse>, AppError> {
    let role = state.roles.get_role_by_id(role_id(&raw_id)?).await?;
    Ok(Json(role.into()))
}

/// Roles held by a user; 204 when it holds none
pub async fn get_roles_by_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, AppError> {
    let user_id = parse_id(&raw_id, "User ID")?;
    let roles = state.roles.get_roles_by_user_id(user_id).await?;

    if roles.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }
    let body: Vec<RoleResponse> = roles.into_iter().map(RoleResponse::from).collect();
    Ok(Json(body).into_response())
}

/// Create a role. The body is empty; the new id is in `Location`.
pub async fn create_role(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<RoleCreateRequest>,
) -> Result<Response, AppError> {
    let role = state.roles.create_role(body.name).await?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/api/v1/roles/{}", role.id))],
    )
        .into_response())
}

pub async fn delete_role(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.roles.delete_role(role_id(&raw_id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}
