use axum::http::StatusCode;
use serde_json::json;
use tower::util::ServiceExt as _;

mod support;

use support::{ArticleBuilder, TestApp, json_request, read_envelope, settle, test_app};

async fn call(
    app: &TestApp,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let resp = app
        .router()
        .oneshot(json_request(method, uri, token, body))
        .await
        .unwrap();
    read_envelope(resp).await
}

async fn create_article(app: &TestApp) -> String {
    let admin = app.admin_token();
    let (_, body) = call(
        app,
        "POST",
        "/api/articles",
        Some(&admin),
        Some(json!({ "title": "Hello", "abstract": "sum", "content": "body", "category": "rust" })),
    )
    .await;
    assert_eq!(body["code"], 2000, "{body}");
    body["data"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_reports_ok() {
    let app = test_app();
    let (status, body) = call(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = test_app();
    let (status, body) = call(&app, "GET", "/openapi.json", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/articles/{id}"].is_object());
    assert!(body["paths"]["/api/comments"].is_object());
}

#[tokio::test]
async fn admin_creates_and_anyone_reads() {
    let app = test_app();
    let id = create_article(&app).await;
    assert_eq!(id, "art0001");

    let (status, body) = call(&app, "GET", &format!("/api/articles/{id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 2000);
    assert_eq!(body["msg"], "success");
    assert_eq!(body["data"]["title"], "Hello");
    assert_eq!(body["data"]["abstract"], "sum");
    assert_eq!(body["data"]["user_id"], 1);
    assert_eq!(body["data"]["version"], 1);
}

#[tokio::test]
async fn business_errors_travel_in_the_envelope() {
    let app = test_app();

    let (status, body) = call(&app, "GET", "/api/articles/nope", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 4004);
    assert!(body["data"].is_null());

    let (status, body) = call(
        &app,
        "GET",
        "/api/articles?sort_field=content",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 4422);

    let admin = app.admin_token();
    let (_, body) = call(
        &app,
        "DELETE",
        "/api/articles",
        Some(&admin),
        Some(json!({ "id_list": ["bad id!"] })),
    )
    .await;
    assert_eq!(body["code"], 4422);

    let (_, body) = call(
        &app,
        "DELETE",
        "/api/articles",
        Some(&admin),
        Some(json!({ "id_list": [] })),
    )
    .await;
    assert_eq!(body["code"], 2000);
    assert_eq!(body["data"]["deleted"], 0);
}

#[tokio::test]
async fn writes_need_a_valid_token_and_the_admin_role() {
    let app = test_app();
    let payload = json!({ "title": "t", "content": "c" });

    let (status, body) = call(&app, "POST", "/api/articles", None, Some(payload.clone())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 4001);

    let (status, body) = call(
        &app,
        "POST",
        "/api/articles",
        Some("not.a-token"),
        Some(payload.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 4001);

    let user = app.user_token(7);
    let (status, body) = call(&app, "POST", "/api/articles", Some(&user), Some(payload)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 4003);
    assert_eq!(app.store.len(), 0);
}

#[tokio::test]
async fn malformed_bodies_are_bad_requests() {
    let app = test_app();
    let admin = app.admin_token();

    let req = axum::http::Request::builder()
        .method("POST")
        .uri("/api/articles")
        .header("authorization", format!("Bearer {admin}"))
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{\"title\": "))
        .unwrap();
    let resp = app.router().oneshot(req).await.unwrap();
    let (status, body) = read_envelope(resp).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 4000);

    let (_, body) = call(&app, "GET", "/api/comments", None, None).await;
    assert_eq!(body["code"], 4000);
}

#[tokio::test]
async fn update_and_delete_through_http() {
    let app = test_app();
    let id = create_article(&app).await;
    let admin = app.admin_token();

    let (_, body) = call(
        &app,
        "PUT",
        &format!("/api/articles/{id}"),
        Some(&admin),
        Some(json!({ "title": "Hello again" })),
    )
    .await;
    assert_eq!(body["code"], 2000);
    assert_eq!(body["data"]["version"], 2);
    assert_eq!(body["data"]["abstract"], "sum");

    let (_, body) = call(
        &app,
        "DELETE",
        "/api/articles",
        Some(&admin),
        Some(json!({ "id_list": [id] })),
    )
    .await;
    assert_eq!(body["code"], 2000);
    assert_eq!(body["data"]["deleted"], 1);
    assert!(!app.store.contains(&id));
}

#[tokio::test]
async fn reactions_move_counters() {
    let app = test_app();
    let id = create_article(&app).await;
    let user = app.user_token(7);

    for _ in 0..2 {
        let uri = format!("/api/articles/{id}/digg");
        let (_, body) = call(&app, "POST", &uri, Some(&user), None).await;
        assert_eq!(body["code"], 2000);
        assert_eq!(body["data"]["status"], "ok");
    }
    call(&app, "DELETE", &format!("/api/articles/{id}/digg"), Some(&user), None).await;
    call(&app, "POST", &format!("/api/articles/{id}/collect"), Some(&user), None).await;

    let stored = app.store.get(&id).unwrap();
    assert_eq!(stored.counters.digg, 1);
    assert_eq!(stored.counters.collects, 1);

    let (status, _) = call(&app, "POST", &format!("/api/articles/{id}/digg"), None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn search_and_stats_are_public() {
    let app = test_app();
    let now = app.clock.base();
    app.store.seed(ArticleBuilder::new("r1").looks(3).build(now));
    app.store.seed(ArticleBuilder::new("r2").looks(4).build(now));

    let (_, body) = call(&app, "GET", "/api/articles?page=1&page_size=1", None, None).await;
    assert_eq!(body["code"], 2000);
    assert_eq!(body["data"]["total"], 2);
    assert_eq!(body["data"]["list"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["page_size"], 1);

    let (_, body) = call(&app, "GET", "/api/articles/stats", None, None).await;
    assert_eq!(body["code"], 2000);
    assert_eq!(body["data"]["total_articles"], 2);
    assert_eq!(body["data"]["total_views"], 7);
}

#[tokio::test]
async fn comment_flow_over_http() {
    let app = test_app();
    let id = create_article(&app).await;
    let user = app.user_token(7);

    let (_, body) = call(
        &app,
        "POST",
        "/api/comments",
        Some(&user),
        Some(json!({ "article_id": id, "content": "first!" })),
    )
    .await;
    assert_eq!(body["code"], 2000);
    let root = body["data"]["id"].as_i64().unwrap();

    let (_, body) = call(
        &app,
        "POST",
        "/api/comments",
        Some(&user),
        Some(json!({ "article_id": id, "parent_comment_id": root, "content": "reply" })),
    )
    .await;
    assert_eq!(body["code"], 2000);

    let (_, body) = call(
        &app,
        "POST",
        "/api/comments",
        Some(&user),
        Some(json!({ "article_id": id, "parent_comment_id": 999, "content": "lost" })),
    )
    .await;
    assert_eq!(body["code"], 4422);
    settle().await;

    let (_, body) = call(&app, "GET", &format!("/api/comments?article_id={id}"), None, None).await;
    assert_eq!(body["code"], 2000);
    let tree = body["data"].as_array().unwrap();
    assert_eq!(tree.len(), 1);
    assert_eq!(tree[0]["sub_comments"][0]["content"], "reply");

    let (_, body) = call(&app, "GET", "/api/users/me/comments", Some(&user), None).await;
    assert_eq!(body["data"]["total"], 2);

    let uri = format!("/api/comments/{root}");
    let (status, _) = call(&app, "DELETE", &uri, Some(&user), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let admin = app.admin_token();
    let (_, body) = call(&app, "DELETE", &uri, Some(&admin), None).await;
    assert_eq!(body["code"], 2000);
    assert_eq!(body["data"]["deleted"], 2);
}

#[tokio::test]
async fn comment_bursts_are_rate_limited() {
    let app = test_app();
    let id = create_article(&app).await;
    let user = app.user_token(9);

    let mut codes = Vec::new();
    for n in 0..4 {
        let (_, body) = call(
            &app,
            "POST",
            "/api/comments",
            Some(&user),
            Some(json!({ "article_id": id, "content": format!("spam {n}") })),
        )
        .await;
        codes.push(body["code"].as_u64().unwrap());
    }
    assert_eq!(codes, [2000, 2000, 2000, 4029]);
}

#[tokio::test]
async fn site_links_are_public_to_read_and_admin_to_write() {
    let app = test_app();
    let admin = app.admin_token();
    let user = app.user_token(7);

    let (status, _) = call(
        &app,
        "POST",
        "/api/categories",
        Some(&user),
        Some(json!({ "name": "rust" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, body) = call(
        &app,
        "POST",
        "/api/categories",
        Some(&admin),
        Some(json!({ "name": "rust" })),
    )
    .await;
    assert_eq!(body["code"], 2000, "{body}");
    let category = body["data"]["id"].as_i64().unwrap();

    let (_, body) = call(
        &app,
        "POST",
        "/api/categories",
        Some(&admin),
        Some(json!({ "name": "rust" })),
    )
    .await;
    assert_eq!(body["code"], 4009);

    let (_, body) = call(
        &app,
        "POST",
        "/api/friend-links",
        Some(&admin),
        Some(json!({ "name": "Ferris", "link": "https://ferris.example" })),
    )
    .await;
    assert_eq!(body["code"], 2000, "{body}");

    let (_, body) = call(&app, "GET", "/api/categories?page=1&page_size=5", None, None).await;
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["list"][0]["name"], "rust");

    let (_, body) = call(&app, "GET", "/api/friend-links?key=ferr", None, None).await;
    assert_eq!(body["data"]["list"][0]["link"], "https://ferris.example");

    let uri = format!("/api/categories/{category}");
    let (_, body) = call(&app, "DELETE", &uri, Some(&admin), None).await;
    assert_eq!(body["data"]["deleted"], 1);
    let (_, body) = call(&app, "DELETE", &uri, Some(&admin), None).await;
    assert_eq!(body["code"], 2000);
    assert_eq!(body["data"]["deleted"], 0);
}
