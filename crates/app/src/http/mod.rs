//! JSON API over the question store.

mod handlers;

use std::net::SocketAddr;

use axum::Router;
use axum::extract::Request;
use axum::middleware::{Next, from_fn};
use axum::response::Response;
use axum::routing::{get, post};
use services::AppServices;
use tokio::net::TcpListener;
use tracing::{Instrument, info, info_span};

pub fn build_router(services: AppServices) -> Router {
    Router::new()
        .route("/healthz", get(handlers::healthz))
        .route(
            "/api/questions",
            get(handlers::list_questions).post(handlers::create_question),
        )
        .route(
            "/api/questions/:id",
            get(handlers::get_question)
                .put(handlers::update_question)
                .delete(handlers::delete_question),
        )
        .route("/api/questions/:id/toggle", post(handlers::toggle_question))
        .route("/api/categories", get(handlers::list_categories))
        .route("/api/stats", get(handlers::stats))
        .route("/api/reset", post(handlers::reset_progress))
        .layer(from_fn(request_span_middleware))
        .with_state(services)
}

async fn request_span_middleware(request: Request, next: Next) -> Response {
    let span = info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path()
    );
    async move {
        let response = next.run(request).await;
        info!(status = response.status().as_u16(), "served");
        response
    }
    .instrument(span)
    .await
}

/// Serve the API on `addr` until SIGINT/SIGTERM.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(services: AppServices, addr: SocketAddr) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, build_router(services))
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        let (Ok(mut sigterm), Ok(mut sigint)) = (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) else {
            let _ = tokio::signal::ctrl_c().await;
            return;
        };
        tokio::select! {
            _ = sigterm.recv() => {}
            _ = sigint.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
