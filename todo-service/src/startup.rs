use crate::config::{StoreBackend, TodoConfig};
use crate::handlers;
use crate::services::{DisconnectedStore, MemoryTodoStore, MongoTodoStore, TodoStore};
use axum::{
    http::{header, Method},
    middleware::from_fn,
    routing::{get, put},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{make_request_span, request_id_middleware};
use service_core::shutdown::shutdown_signal;
use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: TodoConfig,
    pub store: Arc<dyn TodoStore>,
}

/// Picks the store for the configured backend. Never fails: a Mongo client
/// that cannot be built is logged and replaced by a [`DisconnectedStore`].
pub async fn build_store(config: &TodoConfig) -> Arc<dyn TodoStore> {
    match config.store {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory todo store; data is not persisted");
            Arc::new(MemoryTodoStore::new())
        }
        StoreBackend::Mongodb => {
            let Some(uri) = config.mongodb.uri.as_deref() else {
                tracing::error!("MONGODB_URI is not set; todo requests will fail");
                return Arc::new(DisconnectedStore::new("MONGODB_URI is not set"));
            };

            match MongoTodoStore::connect(uri, &config.mongodb.database).await {
                Ok(store) => {
                    let probe = store.clone();
                    tokio::spawn(async move {
                        match probe.ping().await {
                            Ok(()) => tracing::info!("MongoDB connected"),
                            Err(e) => tracing::error!(error = %e, "MongoDB connection failed"),
                        }
                    });
                    Arc::new(store)
                }
                Err(e) => {
                    tracing::error!(error = %e, "MongoDB unavailable; todo requests will fail");
                    Arc::new(DisconnectedStore::new(e.to_string()))
                }
            }
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/test", get(handlers::backend_test))
        .route("/health", get(handlers::health_check))
        .route(
            "/do-backend",
            get(handlers::list_todos).post(handlers::create_todo),
        )
        .route(
            "/do-backend/:id",
            put(handlers::update_todo).delete(handlers::delete_todo),
        )
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(from_fn(request_id_middleware))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .with_state(state)
}

type ServerFuture = Pin<Box<dyn Future<Output = std::io::Result<()>> + Send>>;

pub struct Application {
    port: u16,
    server: ServerFuture,
    state: AppState,
}

impl Application {
    pub async fn build(config: TodoConfig) -> Result<Self, AppError> {
        let store = build_store(&config).await;
        Self::build_with_store(config, store).await
    }

    /// Binds the listener on `config.common.port` (0 picks a free port).
    pub async fn build_with_store(
        config: TodoConfig,
        store: Arc<dyn TodoStore>,
    ) -> Result<Self, AppError> {
        let state = AppState {
            config: config.clone(),
            store,
        };

        let app = build_router(state.clone());

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());

        Ok(Self {
            port,
            server: Box::pin(async move { server.await }),
            state,
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}
