//! JSON front-end over [`SmsService`].
//!
//! Routes:
//! - `POST /api/send-sms`
//! - `POST /api/upload-phones` (multipart field `file`)
//! - `GET /api/balance`
//! - `GET /api/reports`
//!
//! Every response body carries a `success` flag. Failures add an `error`
//! message and a status derived from [`crate::client::ErrorKind`].

mod error;
mod handlers;

use std::net::SocketAddr;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::service::SmsService;

pub use error::ApiError;
pub use handlers::{OneOrMany, ReportsParams, SendSmsBody};

/// Largest accepted request body, uploads included.
pub const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Create the router with all API routes and the trace layer.
///
/// ```no_run
/// use bulksms::{service::SmsService, web::create_router};
///
/// fn app(service: SmsService) -> axum::Router {
///     create_router(service)
/// }
/// ```
pub fn create_router(service: SmsService) -> Router {
    Router::new()
        .route("/api/send-sms", post(handlers::send_sms))
        .route("/api/upload-phones", post(handlers::upload_phones))
        .route("/api/balance", get(handlers::balance))
        .route("/api/reports", get(handlers::reports))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

/// Serve the API on `addr` until CTRL+C.
///
/// # Errors
///
/// Returns `std::io::Error` when the address cannot be bound.
pub async fn serve(service: SmsService, addr: SocketAddr) -> Result<(), std::io::Error> {
    let listener = TcpListener::bind(addr).await?;
    serve_until(service, listener, shutdown_signal()).await
}

/// Serve the API on an already bound listener until `shutdown` completes.
///
/// In-flight requests are allowed to finish before this returns.
pub async fn serve_until<F>(
    service: SmsService,
    listener: TcpListener,
    shutdown: F,
) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    info!("HTTP server listening on {}", listener.local_addr()?);

    axum::serve(listener, create_router(service))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("HTTP server stopped gracefully");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received CTRL+C, shutting down"),
        Err(e) => {
            warn!(error = %e, "Failed to install Ctrl+C handler; serving until killed");
            std::future::pending::<()>().await;
        }
    }
}
