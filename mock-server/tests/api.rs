use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Task};
use tower::{Service, ServiceExt};

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

async fn call<S>(svc: &mut S, req: Request<String>) -> axum::response::Response
where
    S: Service<
        Request<String>,
        Response = axum::response::Response,
        Error = std::convert::Infallible,
    >,
{
    ServiceExt::ready(svc).await.unwrap().call(req).await.unwrap()
}

// --- list ---

#[tokio::test]
async fn list_tasks_empty() {
    let resp = app().oneshot(empty_request("GET", "/tasks")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let tasks: Vec<Task> = body_json(resp).await;
    assert!(tasks.is_empty());
}

// --- create ---

#[tokio::test]
async fn create_task_returns_201_with_id() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/tasks",
            r#"{"name":"Buy milk","info":"","isImportant":false,"isCompleted":false}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let task: Task = body_json(resp).await;
    assert_eq!(task.id, 1);
    assert_eq!(task.name, "Buy milk");
    assert!(!task.is_important);
}

#[tokio::test]
async fn create_task_blank_name_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/tasks", r#"{"name":"   "}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn create_task_malformed_json_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/tasks", r#"{"not_name":1}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- update ---

#[tokio::test]
async fn update_task_not_found() {
    let resp = app()
        .oneshot(json_request("PATCH", "/tasks/41", r#"{"name":"Nope"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_task_bad_id_returns_400() {
    let resp = app()
        .oneshot(json_request("PATCH", "/tasks/not-a-number", r#"{}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- delete ---

#[tokio::test]
async fn delete_task_not_found() {
    let resp = app().oneshot(empty_request("DELETE", "/tasks/41")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- full CRUD lifecycle ---

#[tokio::test]
async fn crud_lifecycle() {
    let mut svc = app().into_service::<String>();

    let resp = call(
        &mut svc,
        json_request("POST", "/tasks", r#"{"name":"Walk dog","isImportant":true}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let first: Task = body_json(resp).await;

    let resp = call(&mut svc, json_request("POST", "/tasks", r#"{"name":"Feed cat"}"#)).await;
    let second: Task = body_json(resp).await;
    assert_eq!(second.id, first.id + 1);

    // list is in id order
    let resp = call(&mut svc, empty_request("GET", "/tasks")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let tasks: Vec<Task> = body_json(resp).await;
    let ids: Vec<u64> = tasks.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);

    // partial update: only completed
    let resp = call(
        &mut svc,
        json_request("PATCH", &format!("/tasks/{}", first.id), r#"{"isCompleted":true}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Task = body_json(resp).await;
    assert_eq!(updated.name, "Walk dog");
    assert!(updated.is_important);
    assert!(updated.is_completed);

    // blank rename is rejected and leaves the task alone
    let resp = call(
        &mut svc,
        json_request("PATCH", &format!("/tasks/{}", first.id), r#"{"name":""}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // delete
    let resp = call(&mut svc, empty_request("DELETE", &format!("/tasks/{}", first.id))).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    // delete again: 404
    let resp = call(&mut svc, empty_request("DELETE", &format!("/tasks/{}", first.id))).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = call(&mut svc, empty_request("GET", "/tasks")).await;
    let tasks: Vec<Task> = body_json(resp).await;
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].name, "Feed cat");
}
