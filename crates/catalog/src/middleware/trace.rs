//! Request tracing layer.

use std::time::Duration;

use axum::http::{Request, Response};
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, MakeSpan, OnResponse, TraceLayer};
use tracing::Span;

/// Span factory recording method, URI and a slot for the request ID.
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogMakeSpan;

impl<B> MakeSpan<B> for CatalogMakeSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        tracing::info_span!(
            "http_request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = tracing::field::Empty,
            status = tracing::field::Empty,
            latency_ms = tracing::field::Empty,
        )
    }
}

/// Response hook recording status and latency on the request span.
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogOnResponse;

impl<B> OnResponse<B> for CatalogOnResponse {
    fn on_response(self, response: &Response<B>, latency: Duration, span: &Span) {
        span.record("status", response.status().as_u16());
        #[allow(clippy::cast_possible_truncation)] // Request latency never exceeds u64 millis
        span.record("latency_ms", latency.as_millis() as u64);
        DefaultOnResponse::default().on_response(response, latency, span);
    }
}

/// Build the request tracing layer.
#[must_use]
pub fn trace_layer() -> TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    CatalogMakeSpan,
    DefaultOnRequest,
    CatalogOnResponse,
> {
    TraceLayer::new_for_http()
        .make_span_with(CatalogMakeSpan)
        .on_response(CatalogOnResponse)
}
