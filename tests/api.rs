//! HTTP 수준 통합 테스트
//!
//! 서버를 띄우지 않고 `build_app`으로 만든 Router에 `oneshot`으로 요청을 보냅니다.

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use reading_list::{build_app, db, routes::AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn app_with(default_user_id: Option<i64>, max_page_limit: Option<u32>) -> Router {
    let pool = db::connect_in_memory().await.unwrap();
    build_app(AppState {
        pool,
        default_user_id,
        max_page_limit,
    })
}

async fn app() -> Router {
    app_with(None, None).await
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    user: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header("x-user-id", user);
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn create_user(app: &Router, email: &str) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/v1/users",
        None,
        Some(json!({ "email": email, "display_name": email })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_i64().unwrap()
}

async fn create_tag(app: &Router, user: &str, name: &str) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/v1/tags",
        Some(user),
        Some(json!({ "name": name })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_i64().unwrap()
}

async fn create_item(app: &Router, user: &str, body: Value) -> Value {
    let (status, body) = send(app, Method::POST, "/api/v1/items", Some(user), Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body
}

#[tokio::test]
async fn health_is_ok() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn request_id_is_returned() {
    let app = app().await;
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn user_lifecycle() {
    let app = app().await;
    let id = create_user(&app, "melinoe@example.com").await;

    let (status, body) = send(&app, Method::GET, &format!("/api/v1/users/{id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "melinoe@example.com");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/users",
        None,
        Some(json!({ "email": "melinoe@example.com", "display_name": "Again" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "conflict");

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/api/v1/users/{id}"),
        None,
        Some(json!({ "display_name": "Melinoe of Crossroads" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["display_name"], "Melinoe of Crossroads");
    assert_eq!(body["email"], "melinoe@example.com");

    let (status, body) = send(&app, Method::DELETE, &format!("/api/v1/users/{id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "id": id }));

    let (status, body) = send(&app, Method::GET, &format!("/api/v1/users/{id}"), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "not_found");
}

#[tokio::test]
async fn acting_user_header_rules() {
    let app = app().await;
    create_user(&app, "melinoe@example.com").await;

    let (status, _) = send(&app, Method::GET, "/api/v1/tags", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, Method::GET, "/api/v1/tags", Some("abc"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::GET, "/api/v1/tags", Some("0"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, Method::GET, "/api/v1/tags", Some("1"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn default_user_applies_when_header_absent() {
    let app = app_with(Some(1), None).await;
    create_user(&app, "melinoe@example.com").await;
    create_tag(&app, "1", "work").await;

    let (status, body) = send(&app, Method::GET, "/api/v1/tags", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn tag_crud_and_isolation() {
    let app = app().await;
    create_user(&app, "melinoe@example.com").await;
    create_user(&app, "zagreus@example.com").await;
    let work = create_tag(&app, "1", "work").await;

    let (status, _) = send(&app, Method::POST, "/api/v1/tags", Some("1"), Some(json!({ "name": "work" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    // 다른 사용자는 같은 이름을 쓸 수 있고, 남의 태그는 볼 수 없습니다.
    create_tag(&app, "2", "work").await;
    let (status, _) = send(&app, Method::GET, &format!("/api/v1/tags/{work}"), Some("2"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/api/v1/tags/{work}"),
        Some("1"),
        Some(json!({ "name": "job" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "job");

    let (status, body) = send(&app, Method::DELETE, &format!("/api/v1/tags/{work}"), Some("1"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn item_create_with_missing_tag_is_rejected_atomically() {
    let app = app().await;
    create_user(&app, "melinoe@example.com").await;
    let t1 = create_tag(&app, "1", "work").await;
    let t2 = create_tag(&app, "1", "hobby").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/items",
        Some("1"),
        Some(json!({ "title": "Lavr", "kind": "book", "tag_ids": [t1, t2, 999] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "validation_error");
    assert_eq!(body["error"]["tag_ids"], json!([999]));

    let (_, page) = send(&app, Method::GET, "/api/v1/items", Some("1"), None).await;
    assert_eq!(page["total"], 0);
}

#[tokio::test]
async fn item_lifecycle() {
    let app = app().await;
    create_user(&app, "melinoe@example.com").await;
    let t1 = create_tag(&app, "1", "work").await;
    let t2 = create_tag(&app, "1", "hobby").await;

    let created = create_item(
        &app,
        "1",
        json!({ "title": "Deep Green Sky", "kind": "book", "notes": "queued", "tag_ids": [t2, t1] }),
    )
    .await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["status"], "planned");
    assert_eq!(created["priority"], "normal");
    assert_eq!(created["tag_ids"], json!([t1, t2]));

    let (status, fetched) = send(&app, Method::GET, &format!("/api/v1/items/{id}"), Some("1"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, patched) = send(
        &app,
        Method::PATCH,
        &format!("/api/v1/items/{id}"),
        Some("1"),
        Some(json!({ "status": "reading", "notes": null })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["status"], "reading");
    assert_eq!(patched["notes"], Value::Null);
    assert_eq!(patched["title"], "Deep Green Sky");
    assert_eq!(patched["tag_ids"], json!([t1, t2]));

    let (status, removed) = send(
        &app,
        Method::DELETE,
        &format!("/api/v1/items/{id}/tags"),
        Some("1"),
        Some(json!({ "tag_ids": [t1] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(removed["tag_ids"], json!([t2]));

    let (status, added) = send(
        &app,
        Method::POST,
        &format!("/api/v1/items/{id}/tags"),
        Some("1"),
        Some(json!({ "tag_ids": [t1] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(added["tag_ids"], json!([t1, t2]));

    let (status, _) = send(&app, Method::DELETE, &format!("/api/v1/items/{id}"), Some("2"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/v1/items/{id}"), Some("1"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::GET, &format!("/api/v1/items/{id}"), Some("1"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_filters_by_repeated_tag_ids() {
    let app = app().await;
    create_user(&app, "melinoe@example.com").await;
    let work = create_tag(&app, "1", "work").await;
    let hobby = create_tag(&app, "1", "hobby").await;
    let other = create_tag(&app, "1", "other").await;

    create_item(&app, "1", json!({ "title": "Both", "kind": "book", "tag_ids": [work, hobby] })).await;
    create_item(&app, "1", json!({ "title": "Work", "kind": "article", "tag_ids": [work] })).await;
    create_item(&app, "1", json!({ "title": "Other", "kind": "book", "tag_ids": [other] })).await;

    let uri = format!("/api/v1/items?tag_ids={work}&tag_ids={hobby}&sort_by=created_at&sort_dir=asc");
    let (status, page) = send(&app, Method::GET, &uri, Some("1"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 2);
    let titles: Vec<_> = page["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles.len(), 2);
    assert!(titles.contains(&"Both".to_string()));
    assert!(titles.contains(&"Work".to_string()));
}

#[tokio::test]
async fn list_pagination_echoes_limit_and_offset() {
    let app = app_with(None, Some(2)).await;
    create_user(&app, "melinoe@example.com").await;
    for n in 0..3 {
        create_item(&app, "1", json!({ "title": format!("b{n}"), "kind": "book" })).await;
    }

    let (status, page) = send(&app, Method::GET, "/api/v1/items?limit=50&kind=book", Some("1"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 3);
    assert_eq!(page["limit"], 2);
    assert_eq!(page["offset"], 0);
    assert_eq!(page["items"].as_array().unwrap().len(), 2);

    let (_, page) = send(&app, Method::GET, "/api/v1/items?offset=10", Some("1"), None).await;
    assert_eq!(page["total"], 3);
    assert_eq!(page["items"], json!([]));
}

#[tokio::test]
async fn list_rejects_unknown_enum_value() {
    let app = app().await;
    create_user(&app, "melinoe@example.com").await;
    let (status, _) = send(&app, Method::GET, "/api/v1/items?status=finished", Some("1"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_unknown_sort_falls_back_to_default() {
    let app = app().await;
    create_user(&app, "melinoe@example.com").await;
    create_item(&app, "1", json!({ "title": "a", "kind": "book" })).await;

    let (status, page) = send(&app, Method::GET, "/api/v1/items?sort_by=title&sort_dir=up", Some("1"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 1);
}

#[tokio::test]
async fn deleting_user_cascades_to_items_and_tags() {
    let app = app().await;
    let id = create_user(&app, "melinoe@example.com").await;
    let tag = create_tag(&app, "1", "work").await;
    create_item(&app, "1", json!({ "title": "Lavr", "kind": "book", "tag_ids": [tag] })).await;

    send(&app, Method::DELETE, &format!("/api/v1/users/{id}"), None, None).await;

    let (_, page) = send(&app, Method::GET, "/api/v1/items", Some("1"), None).await;
    assert_eq!(page["total"], 0);
    let (_, tags) = send(&app, Method::GET, "/api/v1/tags", Some("1"), None).await;
    assert_eq!(tags, json!([]));
}
