//! HTTP routes for the input form, result page and error page

use crate::error::AqiError;
use crate::metrics::ServiceMetrics;
use crate::models::inference::InferenceEngine;
use crate::pages;
use crate::types::WeatherReading;
use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Form, Router};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Shared state captured by every handler
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<InferenceEngine>,
    pub metrics: Arc<ServiceMetrics>,
}

impl AppState {
    pub fn new(engine: InferenceEngine) -> Self {
        Self {
            engine: Arc::new(engine),
            metrics: Arc::new(ServiceMetrics::new()),
        }
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index).post(predict))
        .route("/error", get(error_page))
        .with_state(state)
}

/// Serve until `shutdown` resolves
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "Listening");
    }
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}

async fn index() -> Html<String> {
    Html(pages::render_form())
}

async fn error_page() -> Html<String> {
    Html(pages::render_error())
}

async fn predict(
    State(state): State<AppState>,
    form: Result<Form<HashMap<String, String>>, FormRejection>,
) -> Response {
    let start_time = Instant::now();

    let outcome = match form
        .map_err(|rejection| AqiError::Validation {
            field: "form",
            reason: rejection.body_text(),
        })
        .and_then(|Form(fields)| WeatherReading::from_form(&fields))
    {
        // ORT inference blocks; keep it off the async workers
        Ok(reading) => {
            let engine = Arc::clone(&state.engine);
            tokio::task::spawn_blocking(move || engine.predict(&reading))
                .await
                .unwrap_or_else(|e| {
                    Err(AqiError::Prediction(format!("inference task failed: {e}")))
                })
        }
        Err(e) => Err(e),
    };

    match outcome {
        Ok(result) => {
            let elapsed = start_time.elapsed();
            state.metrics.record_prediction(elapsed, result.category);
            info!(
                index = result.index,
                category = %result.category,
                processing_time_us = elapsed.as_micros(),
                "Prediction served"
            );
            Html(pages::render_result(&result)).into_response()
        }
        Err(e) => {
            state.metrics.record_failure(&e);
            warn!(error = %e, "Prediction request failed");
            Redirect::to("/error").into_response()
        }
    }
}
