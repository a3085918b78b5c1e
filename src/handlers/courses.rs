//! Course view handlers. Each request reads one store snapshot; any failure becomes the view's static 500.

use crate::error::{CourseView, FetchFailed};
use crate::model::{Course, CourseSummary};
use crate::response::ok_many;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

type ViewResult<T> = Result<(StatusCode, Json<Vec<T>>), FetchFailed>;

/// GET /courses
pub async fn list_courses(State(state): State<AppState>) -> ViewResult<Course> {
    state
        .courses
        .all()
        .await
        .map(ok_many)
        .map_err(|e| FetchFailed::log(CourseView::All, &e))
}

/// GET /courses/sorted
pub async fn list_sorted_courses(State(state): State<AppState>) -> ViewResult<Course> {
    state
        .courses
        .sorted()
        .await
        .map(ok_many)
        .map_err(|e| FetchFailed::log(CourseView::Sorted, &e))
}

/// GET /courses/<TAG> for a configured program tag.
pub async fn list_program_courses(state: AppState, tag: String) -> ViewResult<CourseSummary> {
    state
        .courses
        .by_tag(&tag)
        .await
        .map(ok_many)
        .map_err(|e| FetchFailed::log(CourseView::Program(tag), &e))
}
