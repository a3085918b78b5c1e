//! Query service: course views over the store, plus collation and record validation.

pub mod collation;
mod query;
mod validation;
pub use query::{filter_by_tag, list_all, list_sorted, CourseQueryService};
pub use validation::{Audit, CourseValidator, Violation};
