//! Course catalog: read-only HTTP views over a document collection of course records.

pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::{ServiceConfig, StoreBackend};
pub use error::{AppError, ConfigError, CourseView, FetchFailed, StoreError};
pub use model::{Course, CourseSummary};
pub use routes::{app, common_routes, course_routes};
pub use service::{filter_by_tag, list_all, list_sorted, CourseQueryService};
pub use state::AppState;
pub use store::{ensure_collection, ensure_database_exists, CourseStore, MemoryCourseStore, PgCourseStore};
