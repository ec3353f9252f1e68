//! Application startup and lifecycle management.

use crate::config::BankConfig;
use crate::handlers;
use crate::services::{ClientRepository, SharedRepository};
use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use chrono::FixedOffset;
use service_core::error::AppError;
use service_core::middleware::{metrics_middleware, request_id_middleware, REQUEST_ID_HEADER};
use std::future::Future;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub repository: SharedRepository,
    pub statement_timezone: FixedOffset,
}

impl AppState {
    pub fn new(repository: SharedRepository, statement_timezone: FixedOffset) -> Self {
        Self {
            repository,
            statement_timezone,
        }
    }
}

/// Build the HTTP router with all ledger routes and the tracing/metrics layers.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .route("/accounts", get(handlers::list_accounts))
        .route("/account", post(handlers::create_account))
        .route(
            "/account/:tax_id",
            get(handlers::get_account)
                .put(handlers::update_account)
                .delete(handlers::delete_account)
                .post(handlers::shadowed_operation),
        )
        .route(
            "/statement/:tax_id",
            get(handlers::get_statement).post(handlers::shadowed_operation),
        )
        .route("/statement/:tax_id/:date", get(handlers::get_statement_by_date))
        .route(
            "/balance/:tax_id",
            get(handlers::get_balance).post(handlers::shadowed_operation),
        )
        .route("/:tax_id/deposit", post(handlers::deposit))
        .route("/:tax_id/withdraw", post(handlers::withdraw))
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Bind the listener and create an empty repository.
    pub async fn build(config: BankConfig) -> Result<Self, AppError> {
        let statement_timezone = config.statement_timezone()?;
        let state = AppState::new(ClientRepository::new().shared(), statement_timezone);

        // Port 0 = random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(
            service = %config.service_name,
            utc_offset_minutes = config.utc_offset_minutes,
            "Listening on port {}",
            port
        );

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Handle to the repository served by this application.
    pub fn repository(&self) -> &SharedRepository {
        &self.state.repository
    }

    /// Serve until the process is stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.run_with_shutdown(std::future::pending()).await
    }

    /// Serve until `signal` resolves, then drain in-flight requests.
    pub async fn run_with_shutdown<F>(self, signal: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let router = build_router(self.state);
        axum::serve(self.listener, router)
            .with_graceful_shutdown(signal)
            .await
    }
}
