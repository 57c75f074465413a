//! Application startup and lifecycle management.
//!
//! The store is built once here and handed to every request through
//! [`AppState`]; it is shut down only after the HTTP server has drained.

use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{make_request_span, panic_response, request_id_middleware};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::config::UserConfig;
use crate::handlers;
use crate::services::{MongoUserStore, UserStore};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }
}

/// Routes `GET /user/:id`, `POST /user` and `DELETE /user/:id`; everything else is 404.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/user",
            post(handlers::create_user).fallback(handlers::not_found),
        )
        .route(
            "/user/:id",
            get(handlers::fetch_user)
                .delete(handlers::delete_user)
                .fallback(handlers::not_found),
        )
        .fallback(handlers::not_found)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
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
    /// Build the application against MongoDB using the given configuration.
    pub async fn build(config: UserConfig) -> Result<Self, AppError> {
        let store = MongoUserStore::connect(&config.mongodb.uri, &config.mongodb.database).await?;

        // Requests report an unreachable store on their own; startup only warns.
        if let Err(e) = store.ping().await {
            tracing::warn!("MongoDB is not reachable yet: {}", e);
        }

        Self::build_with_store(config.common.listen_addr()?, Arc::new(store)).await
    }

    /// Build the application around an already constructed store.
    pub async fn build_with_store(
        addr: SocketAddr,
        store: Arc<dyn UserStore>,
    ) -> Result<Self, AppError> {
        // Bind HTTP listener (port 0 = random port for testing)
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("User service: HTTP on port {}", port);

        Ok(Self {
            port,
            listener,
            state: AppState::new(store),
        })
    }

    /// Get the HTTP port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Get the store shared by all requests.
    pub fn store(&self) -> Arc<dyn UserStore> {
        self.state.store.clone()
    }

    /// Run the application until SIGINT or SIGTERM.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.run_until(shutdown_signal()).await
    }

    /// Run the application until `signal` resolves, then drain and close the store.
    pub async fn run_until<F>(self, signal: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let router = build_router(self.state.clone());

        let result = axum::serve(self.listener, router)
            .with_graceful_shutdown(signal)
            .await;

        if let Err(e) = &result {
            tracing::error!("HTTP server error: {}", e);
        }

        self.state.store.shutdown().await;
        tracing::info!("Service shutdown complete");

        result
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
