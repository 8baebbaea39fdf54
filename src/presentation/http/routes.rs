//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    http::{header, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, patch, post, put},
    Router,
};

use super::handlers;
use crate::infrastructure::metrics;
use crate::presentation::middleware::track_metrics;
use crate::startup::AppState;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", api_routes())
        // Health check endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/health/live", get(handlers::health::liveness))
        .route("/health/ready", get(handlers::health::readiness))
        // Prometheus metrics endpoint
        .route("/metrics", get(metrics_handler))
        .route_layer(middleware::from_fn(track_metrics))
        .with_state(state)
}

/// Prometheus metrics endpoint handler
async fn metrics_handler() -> Response {
    match metrics::gather_metrics() {
        Ok(body) => (
            [(
                header::CONTENT_TYPE,
                "text/plain; version=0.0.4; charset=utf-8",
            )],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode metrics");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// API v1 routes
fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/users", user_routes())
        .nest("/cars", car_routes())
        .nest("/roles", role_routes())
}

fn user_routes() -> Router<AppState> {
    use handlers::user;

    Router::new()
        .route("/", post(user::create_user))
        .route("/all", get(user::get_all_users))
        .route("/cars/{car_id}", get(user::get_user_by_car))
        .route(
            "/{user_id}",
            get(user::get_user)
                .put(user::update_user)
                .delete(user::delete_user),
        )
        .route("/{user_id}/password", patch(user::update_password))
        .route("/{user_id}/displayName", patch(user::update_display_name))
        .route("/{user_id}/contact", patch(user::update_contact))
        .route("/{user_id}/roles", patch(user::update_roles))
}

fn car_routes() -> Router<AppState> {
    use handlers::car;

    Router::new()
        .route("/", get(car::get_all_cars))
        .route("/make/{make}", get(car::get_cars_by_make))
        .route(
            "/users/{user_id}",
            get(car::get_cars_by_user).post(car::create_car),
        )
        .route("/{car_id}", get(car::get_car).delete(car::delete_car))
        .route("/{car_id}/users/{user_id}", put(car::update_car))
}

fn role_routes() -> Router<AppState> {
    use handlers::role;

    Router::new()
        .route("/", get(role::get_all_roles).post(role::create_role))
        .route("/users/{user_id}", get(role::get_roles_by_user))
        .route("/{role_id}", get(role::get_role).delete(role::delete_role))
}
