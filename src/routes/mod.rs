//! Router assembly.

mod common;
mod docs;
mod students;

pub use common::common_routes_with_ready;
pub use docs::{docs_routes, ApiDoc, OPENAPI_PATH};
pub use students::student_routes;

use crate::state::AppState;
use axum::Router;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Full application: operational routes, `/api/students`, the OpenAPI document,
/// request tracing and a request body limit.
pub fn app(state: AppState, body_limit_bytes: usize) -> Router {
    Router::new()
        .merge(common_routes_with_ready(state.clone()))
        .merge(docs_routes())
        .nest("/api", student_routes(state))
        .layer(RequestBodyLimitLayer::new(body_limit_bytes))
        .layer(TraceLayer::new_for_http())
}
