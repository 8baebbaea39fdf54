//! HTTP Handlers
//!
//! Request handlers for all HTTP endpoints.

pub mod car;
pub mod health;
pub mod role;
pub mod user;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::dto::PageResponse;
use crate::domain::Page;

/// 200 with the page, or 204 when the page holds nothing.
pub(crate) fn page_or_no_content<T, E>(page: Page<E>) -> Response
where
    T: From<E> + Serialize,
{
    if page.is_empty() {
        return StatusCode::NO_CONTENT.into_response();
    }
    Json(PageResponse::<T>::from_page(page)).into_response()
}

/// 201 with a `Location` header and a JSON body.
pub(crate) fn created<T: Serialize>(location: String, body: T) -> Response {
    (
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(body),
    )
        .into_response()
}
