//! HTTP surface: route table, CORS, request tracing and graceful shutdown.

pub mod state;

pub use state::{AppState, Repositories};

use std::time::Duration;

use axum::http::{
    header::{AUTHORIZATION, CONTENT_TYPE},
    Method,
};
use axum::extract::Request;
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::log_info;
use crate::modules::{clients, employees, one_time_clients, service_requests};
use crate::shared::AppConfig;

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .nest("/api/clients", clients::routes::router())
        .nest("/api/one-time-clients", one_time_clients::routes::router())
        .nest("/api/service-requests", service_requests::routes::router())
        .nest("/api/auth", employees::routes::auth_router())
        .nest("/api/employees", employees::routes::employees_router())
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request| {
                tracing::info_span!("http", method = %request.method(), uri = %request.uri())
            }),
        )
        .layer(cors)
        .with_state(state)
}

pub async fn serve(config: &AppConfig, app: Router) -> anyhow::Result<()> {
    let address = config.bind_address();
    let listener = TcpListener::bind(&address).await?;
    log_info!("Server running on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log_info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => log_info!("Received Ctrl+C, shutting down"),
            Err(e) => crate::log_error!("Failed to listen for Ctrl+C: {}", e),
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                log_info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                crate::log_error!("Failed to install SIGTERM handler: {}", e);
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
}
