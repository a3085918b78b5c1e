//! HTTP handlers for the course views.

pub mod courses;
pub use courses::*;
