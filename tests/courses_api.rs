use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use course_catalog::{app, AppState, Course, CourseStore, MemoryCourseStore, StoreError};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn programs() -> Vec<String> {
    vec!["BSIS".to_string(), "BSIT".to_string()]
}

fn router_with(store: Arc<dyn CourseStore>) -> Router {
    app(AppState::new(store), &programs())
}

fn example_store() -> Arc<dyn CourseStore> {
    Arc::new(MemoryCourseStore::new(vec![
        Course::new("CS101", "Intro to Programming", 3, &["BSIT"]),
        Course::new("IS101", "Business Analysis", 3, &["BSIS"]),
    ]))
}

async fn get_raw(router: Router, path: &str) -> (StatusCode, Vec<u8>) {
    let res = router
        .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

async fn get(router: Router, path: &str) -> (StatusCode, Value) {
    let (status, bytes) = get_raw(router, path).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

struct DisconnectedStore;

#[async_trait]
impl CourseStore for DisconnectedStore {
    async fn find_all(&self) -> Result<Vec<Course>, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
}

#[tokio::test]
async fn list_returns_every_course() {
    let (status, body) = get(router_with(example_store()), "/courses").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {"code": "CS101", "description": "Intro to Programming", "units": 3, "tags": ["BSIT"]},
            {"code": "IS101", "description": "Business Analysis", "units": 3, "tags": ["BSIS"]}
        ])
    );
}

#[tokio::test]
async fn fixture_documents_are_returned_unchanged() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    std::io::Write::write_all(
        &mut file,
        br#"[{"_id": "65f0c1", "code": "CS101", "description": "Intro", "units": 3, "tags": ["BSIT"]},
             {"code": "GE105", "description": "Ethics", "units": 1.5, "tags": ["BSIS"]}]"#,
    )
    .unwrap();
    let store = MemoryCourseStore::from_fixture(file.path()).await.unwrap();
    let (status, bytes) = get_raw(router_with(Arc::new(store)), "/courses").await;
    assert_eq!(status, StatusCode::OK);
    let text = String::from_utf8(bytes).unwrap();
    assert!(text.contains(r#""units":3,"#), "{}", text);
    assert!(!text.contains("3.0"), "{}", text);
    assert!(text.contains(r#""units":1.5"#), "{}", text);
    let body: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(
        body[0],
        json!({"_id": "65f0c1", "code": "CS101", "description": "Intro", "units": 3, "tags": ["BSIT"]})
    );
}

#[tokio::test]
async fn sorted_orders_by_description() {
    let (status, body) = get(router_with(example_store()), "/courses/sorted").await;
    assert_eq!(status, StatusCode::OK);
    let codes: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["code"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec!["IS101", "CS101"]);
    assert_eq!(body[0]["units"], json!(3));
    assert_eq!(body[0]["tags"], json!(["BSIS"]));
}

#[tokio::test]
async fn program_views_project_code_and_description() {
    let (status, body) = get(router_with(example_store()), "/courses/BSIT").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"code": "CS101", "description": "Intro to Programming"}]));

    let (status, body) = get(router_with(example_store()), "/courses/BSIS").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"code": "IS101", "description": "Business Analysis"}]));
}

#[tokio::test]
async fn program_view_skips_courses_without_tags() {
    let mut untagged = Course::new("MATH1", "College Algebra", 3, &[]);
    untagged.tags = None;
    let store = Arc::new(MemoryCourseStore::new(vec![
        untagged,
        Course::new("CS101", "Intro to Programming", 3, &["BSIT"]),
    ]));
    let router = router_with(store);

    let (status, body) = get(router.clone(), "/courses/BSIT").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"code": "CS101", "description": "Intro to Programming"}]));

    let (status, body) = get(router, "/courses").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
    assert!(body[0].get("tags").is_none());
}

#[tokio::test]
async fn empty_collection_gives_empty_arrays() {
    let router = router_with(Arc::new(MemoryCourseStore::default()));
    for path in ["/courses", "/courses/sorted", "/courses/BSIS", "/courses/BSIT"] {
        let (status, body) = get(router.clone(), path).await;
        assert_eq!(status, StatusCode::OK, "{}", path);
        assert_eq!(body, json!([]), "{}", path);
    }
}

#[tokio::test]
async fn store_failure_gives_static_errors() {
    let router = router_with(Arc::new(DisconnectedStore));
    let cases = [
        ("/courses", "Failed to fetch courses"),
        ("/courses/sorted", "Failed to fetch sorted courses"),
        ("/courses/BSIS", "Failed to fetch BSIS courses"),
        ("/courses/BSIT", "Failed to fetch BSIT courses"),
    ];
    for (path, message) in cases {
        let (status, body) = get(router.clone(), path).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{}", path);
        assert_eq!(body, json!({ "error": message }), "{}", path);
    }
}

#[tokio::test]
async fn unconfigured_program_is_not_found() {
    let (status, _) = get(router_with(example_store()), "/courses/BSCS").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = get(router_with(example_store()), "/courses/bsit").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn configured_programs_become_routes() {
    let store = Arc::new(MemoryCourseStore::new(vec![Course::new(
        "CS102",
        "Computer Programming 2",
        3,
        &["BSCS", "BSIT"],
    )]));
    let router = app(AppState::new(store), &["BSCS".to_string()]);
    let (status, body) = get(router.clone(), "/courses/BSCS").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"code": "CS102", "description": "Computer Programming 2"}]));
    let (status, _) = get(router, "/courses/BSIT").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn operational_routes() {
    let (status, body) = get(router_with(example_store()), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));

    let (status, body) = get(router_with(example_store()), "/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok", "store": "ok"}));

    let (status, body) = get(router_with(Arc::new(DisconnectedStore)), "/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body, json!({"status": "degraded", "store": "unavailable"}));

    let (status, body) = get(router_with(example_store()), "/version").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], json!("course-catalog"));
}
