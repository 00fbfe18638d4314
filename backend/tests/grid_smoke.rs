//! End-to-end smoke test: drives the composed router the way the browser
//! page does, including the concurrent-client sweep.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use shared::{
    CommitEditsResponse, CreateTodoRequest, EditedRows, RowEdit, TodoListResponse, TodoResponse,
    TodoTableResponse, UpdateTodoRequest,
};
use todo_grid_backend::storage::SessionFactory;
use todo_grid_backend::{build_state, create_router};

async fn setup_app() -> Router {
    let factory = SessionFactory::in_memory();
    factory.bootstrap().await.expect("bootstrap schema");
    create_router(build_state(Arc::new(factory)))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("request should not fail at the transport level");
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    (status, body.to_vec())
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("build request");
    send(app, request).await
}

async fn send_json<T: serde::Serialize>(
    app: &Router,
    method: &str,
    uri: &str,
    payload: &T,
) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(payload).expect("serialize")))
        .expect("build request");
    send(app, request).await
}

#[tokio::test]
async fn test_page_is_served() {
    let app = setup_app().await;

    let (status, body) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    let page = String::from_utf8(body).expect("utf8 page");
    assert!(page.contains("TODO CRUD"));
}

#[tokio::test]
async fn test_empty_table_round_trip() {
    let app = setup_app().await;

    let (status, body) = get(&app, "/api/todos").await;
    assert_eq!(status, StatusCode::OK);
    let list: TodoListResponse = serde_json::from_slice(&body).expect("list json");
    assert!(list.todos.is_empty());

    let (status, body) = get(&app, "/api/todos/table").await;
    assert_eq!(status, StatusCode::OK);
    let table: TodoTableResponse = serde_json::from_slice(&body).expect("table json");
    assert!(table.rows.is_empty());
}

#[tokio::test]
async fn test_create_then_observe_in_table() {
    let app = setup_app().await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/todos",
        &CreateTodoRequest {
            title: "Buy milk".to_string(),
        },
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let created: TodoResponse = serde_json::from_slice(&body).expect("create json");
    assert_eq!(created.todo.title, "Buy milk");
    assert_eq!(created.todo.completed, 0);

    let (status, body) = get(&app, &format!("/api/todos/{}", created.todo.id)).await;
    assert_eq!(status, StatusCode::OK);
    let fetched: shared::Todo = serde_json::from_slice(&body).expect("todo json");
    assert_eq!(fetched.title, "Buy milk");

    let (status, body) = get(&app, "/api/todos/table").await;
    assert_eq!(status, StatusCode::OK);
    let table: TodoTableResponse = serde_json::from_slice(&body).expect("table json");
    assert_eq!(table.rows.len(), 1);
    assert!(!table.rows[0].delete);
}

#[tokio::test]
async fn test_create_rejects_blank_title() {
    let app = setup_app().await;

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/todos",
        &CreateTodoRequest {
            title: "   ".to_string(),
        },
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = get(&app, "/api/todos").await;
    let list: TodoListResponse = serde_json::from_slice(&body).expect("list json");
    assert!(list.todos.is_empty());
}

#[tokio::test]
async fn test_update_and_missing_update() {
    let app = setup_app().await;

    let (_, body) = send_json(
        &app,
        "POST",
        "/api/todos",
        &CreateTodoRequest {
            title: "Draft".to_string(),
        },
    )
    .await;
    let created: TodoResponse = serde_json::from_slice(&body).expect("create json");

    let (status, body) = send_json(
        &app,
        "PUT",
        &format!("/api/todos/{}", created.todo.id),
        &UpdateTodoRequest {
            title: "Final".to_string(),
            completed: 1,
        },
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let updated: TodoResponse = serde_json::from_slice(&body).expect("update json");
    assert_eq!(updated.todo.title, "Final");
    assert_eq!(updated.todo.completed, 1);
    assert_eq!(updated.todo.id, created.todo.id);

    let (status, _) = send_json(
        &app,
        "PUT",
        "/api/todos/no-such-id",
        &UpdateTodoRequest {
            title: "Ghost".to_string(),
            completed: 0,
        },
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_endpoint_is_idempotent() {
    let app = setup_app().await;

    let (_, body) = send_json(
        &app,
        "POST",
        "/api/todos",
        &CreateTodoRequest {
            title: "gone".to_string(),
        },
    )
    .await;
    let created: TodoResponse = serde_json::from_slice(&body).expect("create json");
    let uri = format!("/api/todos/{}", created.todo.id);

    let request = Request::builder()
        .method("DELETE")
        .uri(&uri)
        .body(Body::empty())
        .expect("build request");
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // second delete of the same id still answers 204
    let request = Request::builder()
        .method("DELETE")
        .uri(&uri)
        .body(Body::empty())
        .expect("build request");
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = get(&app, "/api/todos").await;
    let list: TodoListResponse = serde_json::from_slice(&body).expect("list json");
    assert!(list.todos.is_empty());
}

#[tokio::test]
async fn test_edit_commit_deletes_flagged_row() {
    let app = setup_app().await;

    for title in ["first", "second", "third"] {
        send_json(
            &app,
            "POST",
            "/api/todos",
            &CreateTodoRequest {
                title: title.to_string(),
            },
        )
        .await;
    }

    let (_, body) = get(&app, "/api/todos/table").await;
    let table: TodoTableResponse = serde_json::from_slice(&body).expect("table json");
    assert_eq!(table.rows.len(), 3);
    let victim = table
        .rows
        .iter()
        .position(|row| row.title == "second")
        .expect("seeded row");
    let victim_id = table.rows[victim].id.clone();

    let mut rows = BTreeMap::new();
    rows.insert(
        victim,
        RowEdit {
            delete: Some(true),
            ..RowEdit::default()
        },
    );
    let (status, body) = send_json(&app, "POST", "/api/todos/table/edits", &EditedRows { rows }).await;
    assert_eq!(status, StatusCode::OK);
    let committed: CommitEditsResponse = serde_json::from_slice(&body).expect("commit json");
    assert_eq!(committed.outcome.deleted, 1);
    assert_eq!(committed.table.rows.len(), 2);
    assert!(committed.table.rows.iter().all(|row| row.id != victim_id));

    // the other rows are untouched
    let (_, body) = get(&app, "/api/todos").await;
    let list: TodoListResponse = serde_json::from_slice(&body).expect("list json");
    let mut titles: Vec<&str> = list.todos.iter().map(|todo| todo.title.as_str()).collect();
    titles.sort();
    assert_eq!(titles, vec!["first", "third"]);
}

#[tokio::test]
async fn test_concurrent_clients_all_land() {
    let app = setup_app().await;
    let num_instances = 10;

    let mut handles = Vec::new();
    for i in 0..num_instances {
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            let request = Request::builder()
                .method("POST")
                .uri("/api/todos")
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::to_vec(&CreateTodoRequest {
                        title: format!("test_{}", i),
                    })
                    .expect("serialize"),
                ))
                .expect("build request");
            let response = app.oneshot(request).await.expect("send request");
            assert_eq!(response.status(), StatusCode::CREATED);
        }));
    }
    for handle in handles {
        handle.await.expect("join");
    }

    let (_, body) = get(&app, "/api/todos").await;
    let list: TodoListResponse = serde_json::from_slice(&body).expect("list json");
    assert_eq!(list.todos.len(), num_instances);

    let mut ids: Vec<&str> = list.todos.iter().map(|todo| todo.id.as_str()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), num_instances);
}
