// src/server.rs
// HTTP front: `/metrics` runs one full scrape per request, `/health` answers
// without touching the upstream page.

use std::sync::Arc;

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::collect;
use crate::config::consts::{EXPOSITION_CONTENT_TYPE, HEALTH_PATH, METRICS_PATH};
use crate::config::ExporterOptions;
use crate::core::net;
use crate::error::Result;
use crate::metrics;

/// Shared across requests. Holds configuration and the HTTP client only;
/// records live and die inside a single request.
#[derive(Clone)]
pub struct AppState {
    source_url: Arc<str>,
    client: Client,
}

impl AppState {
    pub fn new(opts: &ExporterOptions) -> Result<Self> {
        Ok(Self {
            source_url: Arc::from(opts.url.as_str()),
            client: net::client(opts.timeout())?,
        })
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Health {
    pub status: String,
    pub source_url: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(METRICS_PATH, get(metrics_handler))
        .route(HEALTH_PATH, get(health_handler))
        .with_state(state)
}

/// Fetch, collect, render. A failed fetch becomes the scrape-error body;
/// nothing from earlier scrapes is reused.
pub async fn scrape_metrics(state: &AppState) -> String {
    match net::fetch_page(&state.client, state.source_url()).await {
        Ok(page) => {
            // DOM parsing is CPU-bound; keep it off the async workers
            match tokio::task::spawn_blocking(move || collect::collect(&page)).await {
                Ok(body) => {
                    logd!("Successful scrape at {:.3}", metrics::now_seconds());
                    body
                }
                Err(e) => {
                    loge!("Collect task failed: {e}");
                    metrics::render_failure_body()
                }
            }
        }
        Err(e) => {
            if e.is_fetch_failure() {
                loge!("Failed to fetch {}: {e}", state.source_url());
            } else {
                loge!("Scrape failed: {e}");
            }
            metrics::scrape_error_body(&e.to_string())
        }
    }
}

async fn metrics_handler(State(state): State<AppState>) -> Response {
    let body = scrape_metrics(&state).await;
    ([(header::CONTENT_TYPE, EXPOSITION_CONTENT_TYPE)], body).into_response()
}

async fn health_handler(State(state): State<AppState>) -> Json<Health> {
    Json(Health {
        status: s!("healthy"),
        source_url: s!(state.source_url()),
    })
}

/// Bind, log where things are, serve until Ctrl-C.
pub async fn serve(opts: &ExporterOptions) -> Result<()> {
    let state = AppState::new(opts)?;
    let listener = tokio::net::TcpListener::bind(opts.bind_addr()).await?;

    logf!("Starting Acropolis exporter");
    logf!("Source URL: {}", opts.url);
    logf!("Metrics port: {}", opts.port);
    logf!("Metrics available at http://localhost:{}{METRICS_PATH}", opts.port);
    logf!("Health check available at http://localhost:{}{HEALTH_PATH}", opts.port);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        loge!("Failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
    logf!("Shutting down...");
}
