//! Application Startup
//!
//! Application building and server initialization.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use sqlx::PgPool;
use tokio::net::TcpListener;

use crate::application::services::{
    CarService, CarServiceImpl, RoleService, RoleServiceImpl, UserService, UserServiceImpl,
};
use crate::config::Settings;
use crate::infrastructure::database;
use crate::infrastructure::repositories::{PgCarRepository, PgRoleRepository, PgUserRepository};
use crate::presentation::http::{handlers::health, routes};
use crate::presentation::middleware::{create_cors_layer, create_trace_layer};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub users: Arc<dyn UserService>,
    pub cars: Arc<dyn CarService>,
    pub roles: Arc<dyn RoleService>,
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Wire the PostgreSQL repositories into the services.
    pub fn new(db: PgPool, settings: Settings) -> Self {
        let user_repo = Arc::new(PgUserRepository::new(db.clone()));
        let car_repo = Arc::new(PgCarRepository::new(db.clone()));
        let role_repo = Arc::new(PgRoleRepository::new(db.clone()));

        Self {
            users: Arc::new(UserServiceImpl::new(user_repo.clone(), role_repo.clone())),
            cars: Arc::new(CarServiceImpl::new(car_repo, user_repo.clone())),
            roles: Arc::new(RoleServiceImpl::new(role_repo, user_repo)),
            db,
            settings: Arc::new(settings),
        }
    }
}

/// Build the full router with its middleware stack.
pub fn build_router(state: AppState) -> Router {
    let cors = create_cors_layer(&state.settings.cors);

    routes::create_router(state)
        .layer(create_trace_layer())
        .layer(cors)
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        health::init_server_start();

        // Create database pool
        let db = database::create_pool(&settings.database)
            .await
            .context("Failed to connect to PostgreSQL")?;
        tracing::info!("Database connection pool created");

        if settings.database.run_migrations {
            database::run_migrations(&db)
                .await
                .context("Failed to run database migrations")?;
            tracing::info!("Database migrations applied");
        }

        let addr: SocketAddr = settings
            .server_addr()
            .parse()
            .with_context(|| format!("Invalid server address: {}", settings.server_addr()))?;

        let router = build_router(AppState::new(db, settings));

        // Bind to address
        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Listening on {}", addr);

        Ok(Self { listener, router })
    }

    /// Run the server until stopped
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}
