//! HTTP middleware stack for the catalog.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, added in `main`)
//! 2. `TraceLayer` (request span with method, uri, status, latency)
//! 3. Request ID (record in span, echo in response)
//! 4. CORS (configured origins, or any origin)

pub mod cors;
pub mod request_id;
pub mod trace;

pub use cors::cors_layer;
pub use request_id::request_id_middleware;
pub use trace::trace_layer;
