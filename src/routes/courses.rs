//! Course view routes. Program tags are fixed path segments, one route per configured tag.

use crate::handlers::{list_courses, list_program_courses, list_sorted_courses};
use crate::state::AppState;
use axum::{extract::State, routing::get, Router};

/// `programs` must be validated (path-safe, unique, not `sorted`); a bad tag would panic route registration.
pub fn course_routes(state: AppState, programs: &[String]) -> Router {
    let mut router = Router::new()
        .route("/courses", get(list_courses))
        .route("/courses/sorted", get(list_sorted_courses));
    for tag in programs {
        let path = format!("/courses/{}", tag);
        let tag = tag.clone();
        router = router.route(
            &path,
            get(move |State(state): State<AppState>| list_program_courses(state, tag.clone())),
        );
    }
    router.with_state(state)
}
