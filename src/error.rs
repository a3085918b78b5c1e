//! Typed errors and HTTP mapping.

use crate::response::error_body;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}' ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
    #[error("invalid identifier for {key}: '{value}'")]
    InvalidIdentifier { key: &'static str, value: String },
    #[error("invalid program tag: '{0}'")]
    InvalidProgramTag(String),
    #[error("duplicate program tag: {0}")]
    DuplicateProgramTag(String),
}

/// Failures of the course store. `Unavailable` covers connection loss and timeouts.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("store query: {0}")]
    Query(String),
    #[error("course documents: {0}")]
    Decode(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Protocol(_) => StoreError::Unavailable(e.to_string()),
            other => StoreError::Query(other.to_string()),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("query failed: {0}")]
    QueryFailed(#[from] StoreError),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
}

/// The course views served over HTTP. Each has its own static failure message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CourseView {
    All,
    Sorted,
    Program(String),
}

impl CourseView {
    pub fn failure_message(&self) -> String {
        match self {
            CourseView::All => "Failed to fetch courses".to_string(),
            CourseView::Sorted => "Failed to fetch sorted courses".to_string(),
            CourseView::Program(tag) => format!("Failed to fetch {} courses", tag),
        }
    }
}

/// Endpoint-boundary failure. The cause is logged where this is built and never reaches the client.
#[derive(Debug)]
pub struct FetchFailed {
    pub view: CourseView,
}

impl FetchFailed {
    /// Log `err` against `view` and produce the uniform 500.
    pub fn log(view: CourseView, err: &AppError) -> Self {
        tracing::error!(error = %err, view = ?view, "{}", view.failure_message());
        FetchFailed { view }
    }
}

impl IntoResponse for FetchFailed {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(error_body(&self.view.failure_message())),
        )
            .into_response()
    }
}
