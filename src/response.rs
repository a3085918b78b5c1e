//! Response body helpers. Course views are bare JSON arrays; failures carry a single `error` string.

use axum::{http::StatusCode, Json};
use serde::Serialize;

pub fn ok_many<T: Serialize>(data: Vec<T>) -> (StatusCode, Json<Vec<T>>) {
    (StatusCode::OK, Json(data))
}

pub fn error_body(message: &str) -> serde_json::Value {
    serde_json::json!({ "error": message })
}
