//! Router assembly.

mod common;
mod courses;
pub use common::common_routes;
pub use courses::course_routes;

use crate::state::AppState;
use axum::Router;
use tower_http::trace::TraceLayer;

/// Full application: operational routes plus course views, with request tracing.
pub fn app(state: AppState, programs: &[String]) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(course_routes(state, programs))
        .layer(TraceLayer::new_for_http())
}
