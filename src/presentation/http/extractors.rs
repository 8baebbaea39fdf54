//! Custom Extractors
//!
//! Axum extractors for validated bodies and page parameters. Both reject
//! with `AppError`, so malformed input renders the same JSON error body as
//! every other failure.

use axum::{
    extract::{FromRequest, FromRequestParts, Json, Query, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::application::dto::PageQuery;
use crate::domain::PageRequest;
use crate::shared::error::AppError;
use crate::shared::validation::validation_error;
use crate::startup::AppState;

/// JSON body that has passed its `validator` rules.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        value.validate().map_err(validation_error)?;
        Ok(Self(value))
    }
}

/// `?page=&size=` resolved against the configured pagination bounds.
#[derive(Debug, Clone, Copy)]
pub struct Paging(pub PageRequest);

impl FromRequestParts<AppState> for Paging {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let query = page_query(parts, state).await?;
        Ok(Self(query.resolve(&state.settings.pagination)?))
    }
}

/// Like [`Paging`], but defaults to the user listing's page size.
#[derive(Debug, Clone, Copy)]
pub struct UserPaging(pub PageRequest);

impl FromRequestParts<AppState> for UserPaging {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let query = page_query(parts, state).await?;
        Ok(Self(query.resolve(&state.settings.pagination.for_users())?))
    }
}

async fn page_query(parts: &mut Parts, state: &AppState) -> Result<PageQuery, AppError> {
    let Query(query) = Query::<PageQuery>::from_request_parts(parts, state)
        .await
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    Ok(query)
}
