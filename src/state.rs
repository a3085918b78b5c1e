//! Shared application state for all routes.

use crate::service::CourseQueryService;
use crate::store::CourseStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub courses: CourseQueryService,
}

impl AppState {
    pub fn new(store: Arc<dyn CourseStore>) -> Self {
        AppState {
            courses: CourseQueryService::new(store),
        }
    }
}
