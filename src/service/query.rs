//! Course views derived from one full snapshot of the store.

use crate::error::AppError;
use crate::model::{Course, CourseSummary};
use crate::service::collation;
use crate::store::CourseStore;
use std::sync::Arc;

/// Every course, in store order.
pub fn list_all(courses: Vec<Course>) -> Vec<Course> {
    courses
}

/// Every course ordered by description. Stable: equal descriptions keep their input order.
pub fn list_sorted(mut courses: Vec<Course>) -> Vec<Course> {
    courses.sort_by(|a, b| collation::compare(&a.description, &b.description));
    courses
}

/// Courses whose tags contain `tag` exactly, projected to `{code, description}`.
/// Courses without a tags array are skipped.
pub fn filter_by_tag(courses: &[Course], tag: &str) -> Vec<CourseSummary> {
    courses
        .iter()
        .filter(|c| c.has_tag(tag))
        .map(Course::summary)
        .collect()
}

/// Read side of the catalog. Each call does exactly one `find_all` against the injected store.
#[derive(Clone)]
pub struct CourseQueryService {
    store: Arc<dyn CourseStore>,
}

impl CourseQueryService {
    pub fn new(store: Arc<dyn CourseStore>) -> Self {
        CourseQueryService { store }
    }

    pub fn store(&self) -> &Arc<dyn CourseStore> {
        &self.store
    }

    async fn snapshot(&self) -> Result<Vec<Course>, AppError> {
        let courses = self.store.find_all().await?;
        tracing::debug!(count = courses.len(), "fetched course snapshot");
        Ok(courses)
    }

    pub async fn all(&self) -> Result<Vec<Course>, AppError> {
        Ok(list_all(self.snapshot().await?))
    }

    pub async fn sorted(&self) -> Result<Vec<Course>, AppError> {
        Ok(list_sorted(self.snapshot().await?))
    }

    pub async fn by_tag(&self, tag: &str) -> Result<Vec<CourseSummary>, AppError> {
        Ok(filter_by_tag(&self.snapshot().await?, tag))
    }
}
