//! HTTP Server
//!
//! Axum-based server exposing the exporter endpoints.
//!
//! # Endpoints
//!
//! - `GET /` - HTML landing page with a link to metrics
//! - `GET /metrics` - Prometheus metrics in text format
//! - `GET /health` - Liveness check (always 200 while the server runs)
//!
//! # Scrape Model
//!
//! There is no background collection loop. Each `/metrics` request runs the
//! collector synchronously within the request: one `rbd` invocation per
//! configured pool, a fresh registry, render, respond. A pool failure shows
//! up as an `rbd_exporter_error` series in the response; it never turns the
//! scrape into an HTTP error.
//!
//! The process shuts down gracefully on SIGINT or SIGTERM.

use crate::collector::{PoolCollector, PoolMetric};
use crate::config::Config;
use crate::metrics::ScrapeMetrics;
use crate::rbd::RbdMirrorStatus;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Clone)]
struct AppState {
    collector: Arc<PoolCollector<RbdMirrorStatus>>,
}

pub async fn start(config: Config) -> anyhow::Result<()> {
    let provider = RbdMirrorStatus::new(&config.rbd);
    let collector = Arc::new(PoolCollector::new(config.rbd.pools.clone(), provider));

    let state = AppState { collector };

    // Build the router
    let app = Router::new()
        .route("/", get(root_handler))
        .route("/metrics", get(metrics_handler))
        .route("/health", get(health_handler))
        .with_state(state);

    // Start the server
    let addr = format!("{}:{}", config.server.addr, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Metrics server listening on {}", addr);
    info!("Metrics available at http://{}/metrics", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install CTRL-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Interrupt: CTRL-C"),
        _ = terminate => info!("SIGTERM"),
    }

    info!("Shutting down");
}

fn render_scrape(samples: &[PoolMetric]) -> anyhow::Result<String> {
    let metrics = ScrapeMetrics::new()?;
    metrics.apply(samples);
    metrics.render()
}

async fn root_handler() -> impl IntoResponse {
    axum::response::Html(
        r#"<html>
<head><title>RBD Mirror Exporter</title></head>
<body>
<h1>RBD Mirror Exporter</h1>
<p><a href="/metrics">Metrics</a></p>
<p><a href="/health">Health</a></p>
</body>
</html>"#,
    )
}

async fn metrics_handler(State(state): State<AppState>) -> Response {
    let samples = state.collector.collect().await;

    match render_scrape(&samples) {
        Ok(metrics) => metrics.into_response(),
        Err(e) => {
            error!("Failed to render metrics: {}", e);
            (
                axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error rendering metrics: {}", e),
            )
                .into_response()
        }
    }
}

async fn health_handler() -> impl IntoResponse {
    // The exporter keeps no persistent connection to Ceph; alive means
    // healthy. Pool-level failures are visible on /metrics instead.
    (axum::http::StatusCode::OK, "OK")
}
