use crate::api::handlers::{bulk_update, guest, health};
use crate::state::AppState;
use axum::{
    body::Body,
    extract::Request,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{classify::ServerErrorsFailureClass, trace::TraceLayer};
use tracing::{error, info, info_span, Span};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/guests/check-in", post(guest::check_in))
        .route("/guests/register-spare", post(guest::register_spare))
        .route("/guests/bulk-update", post(bulk_update::post))
        .route("/guests/{id}/check-out", post(guest::check_out))
        .route("/guests/{id}/enter", post(guest::enter))
        .route("/guests/{id}/exit", post(guest::exit))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        operator_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!(
                        "started processing request: {} {}",
                        request.method(),
                        request.uri().path()
                    );
                })
                .on_response(
                    |response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                        info!(
                            status = response.status().as_u16(),
                            latency_ms = latency.as_millis(),
                            "finished processing request"
                        );
                    },
                )
                .on_failure(
                    |failure: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                        error!("request failed: {:?}", failure);
                    },
                ),
        )
        .with_state(state)
}
