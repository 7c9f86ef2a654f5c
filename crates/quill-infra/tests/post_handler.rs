//! End-to-end behaviour of the posts handler over the in-memory store.

use std::sync::Arc;

use quill_core::{HandlerConfig, Method, PostHandler, PostRequest};
use quill_infra::InMemoryPostStore;
use quill_shared::response::headers;
use quill_shared::{HandlerResponse, InvocationEvent};
use serde_json::{Value, json};

fn setup() -> (PostHandler, InMemoryPostStore) {
    let store = InMemoryPostStore::new();
    let handler = PostHandler::new(
        Arc::new(store.clone()),
        HandlerConfig::new(Some("postgres://localhost/blog".to_string())),
    );
    (handler, store)
}

async fn send(handler: &PostHandler, request: PostRequest) -> HandlerResponse {
    handler.handle(request).await.unwrap()
}

fn body(res: &HandlerResponse) -> Value {
    serde_json::from_str(&res.body).unwrap()
}

async fn create(handler: &PostHandler, post: Value) -> Value {
    let res = send(handler, PostRequest::new(Method::Post).with_body(post.to_string())).await;
    assert_eq!(res.status_code, 201, "{}", res.body);
    body(&res)
}

fn ids(list: &Value) -> Vec<i64> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_create_returns_full_record() {
    let (handler, _) = setup();

    let post = create(
        &handler,
        json!({"title": "A", "excerpt": "B", "content": "C", "category": "news", "published": true}),
    )
    .await;

    assert!(post["id"].is_i64());
    assert_eq!(post["title"], "A");
    assert_eq!(post["excerpt"], "B");
    assert_eq!(post["content"], "C");
    assert_eq!(post["category"], "news");
    assert_eq!(post["published"], true);
    assert_eq!(post["image_url"], Value::Null);
    assert_eq!(post["video_url"], Value::Null);
    assert!(post["created_at"].is_string());
    assert!(post["updated_at"].is_string());
}

#[tokio::test]
async fn test_create_then_get_round_trip() {
    let (handler, _) = setup();

    let created = create(
        &handler,
        json!({"title": "T", "excerpt": "E", "content": "C", "category": "photo"}),
    )
    .await;
    let id = created["id"].to_string();

    let res = send(&handler, PostRequest::new(Method::Get).with_id(id)).await;
    assert_eq!(res.status_code, 200);
    assert_eq!(res.header(headers::CONTENT_TYPE), Some("application/json"));
    assert_eq!(res.header(headers::ALLOW_ORIGIN), Some("*"));

    let fetched = body(&res);
    assert_eq!(fetched, created);
    assert_eq!(fetched["published"], false);
}

#[tokio::test]
async fn test_create_without_body_stores_empty_unpublished_post() {
    let (handler, store) = setup();

    let res = send(&handler, PostRequest::new(Method::Post)).await;
    assert_eq!(res.status_code, 201);

    let post = body(&res);
    assert_eq!(post["title"], Value::Null);
    assert_eq!(post["published"], false);
    assert_eq!(store.rows().await.len(), 1);
}

#[tokio::test]
async fn test_get_missing_post_is_404() {
    let (handler, _) = setup();

    let res = send(&handler, PostRequest::new(Method::Get).with_id("41")).await;
    assert_eq!(res.status_code, 404);
    assert_eq!(body(&res), json!({"error": "Post not found"}));
    assert_eq!(res.header(headers::ALLOW_ORIGIN), Some("*"));
}

#[tokio::test]
async fn test_list_is_newest_first_and_published_by_default() {
    let (handler, _) = setup();

    let a = create(&handler, json!({"title": "a", "category": "news", "published": true})).await;
    let b = create(&handler, json!({"title": "b", "category": "news", "published": false})).await;
    let c = create(&handler, json!({"title": "c", "category": "video", "published": true})).await;

    let res = send(&handler, PostRequest::new(Method::Get)).await;
    assert_eq!(res.status_code, 200);
    assert_eq!(
        ids(&body(&res)),
        vec![c["id"].as_i64().unwrap(), a["id"].as_i64().unwrap()]
    );

    let res = send(
        &handler,
        PostRequest::new(Method::Get).with_query("published", "TRUE"),
    )
    .await;
    assert_eq!(ids(&body(&res)).len(), 2);

    let res = send(
        &handler,
        PostRequest::new(Method::Get).with_query("published", "false"),
    )
    .await;
    assert_eq!(
        ids(&body(&res)),
        vec![
            c["id"].as_i64().unwrap(),
            b["id"].as_i64().unwrap(),
            a["id"].as_i64().unwrap()
        ]
    );
}

#[tokio::test]
async fn test_list_filters_by_category() {
    let (handler, _) = setup();

    let news = create(
        &handler,
        json!({"title": "A", "excerpt": "B", "content": "C", "category": "news", "published": true}),
    )
    .await;
    create(&handler, json!({"title": "X", "category": "text", "published": true})).await;

    let res = send(&handler, PostRequest::new(Method::Get).with_query("category", "news")).await;
    assert_eq!(ids(&body(&res)), vec![news["id"].as_i64().unwrap()]);

    let res = send(&handler, PostRequest::new(Method::Get).with_query("category", "other")).await;
    assert_eq!(body(&res), json!([]));

    let res = send(&handler, PostRequest::new(Method::Get).with_query("category", "all")).await;
    assert_eq!(ids(&body(&res)).len(), 2);
}

#[tokio::test]
async fn test_update_overwrites_every_field() {
    let (handler, _) = setup();

    let created = create(
        &handler,
        json!({"title": "A", "excerpt": "B", "content": "C", "category": "news",
               "image_url": "http://img", "published": true}),
    )
    .await;
    let id = created["id"].to_string();

    let update = json!({"title": "A2", "category": "text", "published": false});
    let res = send(
        &handler,
        PostRequest::new(Method::Put)
            .with_id(id.clone())
            .with_body(update.to_string()),
    )
    .await;
    assert_eq!(res.status_code, 200);

    let updated = body(&res);
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["title"], "A2");
    assert_eq!(updated["excerpt"], Value::Null);
    assert_eq!(updated["image_url"], Value::Null);
    assert_eq!(updated["published"], false);
    assert_eq!(updated["created_at"], created["created_at"]);
    assert_ne!(updated["updated_at"], created["updated_at"]);
}

#[tokio::test]
async fn test_update_is_idempotent() {
    let (handler, store) = setup();

    let created = create(&handler, json!({"title": "A", "published": true})).await;
    let id = created["id"].to_string();
    let update = json!({"title": "Same", "excerpt": "E", "content": "C",
                        "category": "news", "published": true})
    .to_string();

    let put = || {
        PostRequest::new(Method::Put)
            .with_id(id.clone())
            .with_body(update.clone())
    };

    send(&handler, put()).await;
    let first = store.rows().await.remove(0);
    send(&handler, put()).await;
    let second = store.rows().await.remove(0);

    assert_eq!(first.title, second.title);
    assert_eq!(first.excerpt, second.excerpt);
    assert_eq!(first.content, second.content);
    assert_eq!(first.category, second.category);
    assert_eq!(first.published, second.published);
    assert_eq!(first.created_at, second.created_at);
    assert!(second.updated_at >= first.updated_at);
}

#[tokio::test]
async fn test_update_missing_id_and_missing_post() {
    let (handler, _) = setup();
    let update = json!({"title": "A", "published": true}).to_string();

    let res = send(
        &handler,
        PostRequest::new(Method::Put).with_body(update.clone()),
    )
    .await;
    assert_eq!(res.status_code, 400);
    assert_eq!(body(&res), json!({"error": "Post ID required"}));

    let res = send(
        &handler,
        PostRequest::new(Method::Put).with_id("999").with_body(update),
    )
    .await;
    assert_eq!(res.status_code, 404);
    assert_eq!(body(&res), json!({"error": "Post not found"}));
}

#[tokio::test]
async fn test_update_without_published_stores_null() {
    let (handler, store) = setup();
    let created = create(&handler, json!({"title": "A", "published": true})).await;
    let id = created["id"].to_string();

    let res = send(
        &handler,
        PostRequest::new(Method::Put)
            .with_id(id.clone())
            .with_body(json!({"title": "B"}).to_string()),
    )
    .await;
    assert_eq!(res.status_code, 200);
    let updated = body(&res);
    assert_eq!(updated["title"], "B");
    assert_eq!(updated["published"], Value::Null);

    let res = send(&handler, PostRequest::new(Method::Get).with_id(id)).await;
    assert_eq!(res.status_code, 200);
    assert_eq!(body(&res)["published"], Value::Null);

    let res = send(&handler, PostRequest::new(Method::Get)).await;
    assert_eq!(body(&res), json!([]));

    let res = send(
        &handler,
        PostRequest::new(Method::Get).with_query("published", "false"),
    )
    .await;
    assert_eq!(ids(&body(&res)), vec![created["id"].as_i64().unwrap()]);
    assert_eq!(store.opened(), store.closed());
}

#[tokio::test]
async fn test_delete_twice() {
    let (handler, store) = setup();
    let created = create(&handler, json!({"title": "A"})).await;
    let id = created["id"].to_string();

    let res = send(&handler, PostRequest::new(Method::Delete).with_id(id.clone())).await;
    assert_eq!(res.status_code, 200);
    assert_eq!(
        body(&res),
        json!({"message": "Post deleted", "id": created["id"]})
    );
    assert!(store.rows().await.is_empty());

    let res = send(&handler, PostRequest::new(Method::Delete).with_id(id)).await;
    assert_eq!(res.status_code, 404);
    assert_eq!(body(&res), json!({"error": "Post not found"}));
}

#[tokio::test]
async fn test_delete_without_id_is_400() {
    let (handler, _) = setup();

    let res = send(&handler, PostRequest::new(Method::Delete)).await;
    assert_eq!(res.status_code, 400);
    assert_eq!(body(&res), json!({"error": "Post ID required"}));
}

#[tokio::test]
async fn test_options_is_preflight_without_connection() {
    let (handler, store) = setup();

    let res = send(&handler, PostRequest::new(Method::Options).with_id("1")).await;
    assert_eq!(res.status_code, 200);
    assert_eq!(res.body, "");
    assert_eq!(
        res.header(headers::ALLOW_METHODS),
        Some("GET, POST, PUT, DELETE, OPTIONS")
    );
    assert_eq!(res.header(headers::ALLOW_HEADERS), Some("Content-Type"));
    assert_eq!(res.header(headers::MAX_AGE), Some("86400"));
    assert_eq!(store.opened(), 0);
}

#[tokio::test]
async fn test_unknown_method_is_405() {
    let (handler, _) = setup();

    let res = send(&handler, PostRequest::new(Method::parse("PATCH"))).await;
    assert_eq!(res.status_code, 405);
    assert_eq!(body(&res), json!({"error": "Method not allowed"}));
    assert_eq!(res.header(headers::CONTENT_TYPE), Some("application/json"));
}

#[tokio::test]
async fn test_every_invocation_releases_its_connection() {
    let (handler, store) = setup();

    create(&handler, json!({"title": "A", "published": true})).await;
    send(&handler, PostRequest::new(Method::Get)).await;
    send(&handler, PostRequest::new(Method::Get).with_id("77")).await;
    send(&handler, PostRequest::new(Method::Delete)).await;
    let _ = handler
        .handle(PostRequest::new(Method::Post).with_body("{broken"))
        .await;

    assert_eq!(store.opened(), 5);
    assert_eq!(store.closed(), 5);
}

#[tokio::test]
async fn test_connection_failure_propagates() {
    let handler = PostHandler::new(
        Arc::new(InMemoryPostStore::offline()),
        HandlerConfig::new(Some("postgres://down".to_string())),
    );

    assert!(handler.handle(PostRequest::new(Method::Get)).await.is_err());
}

#[tokio::test]
async fn test_invocation_event_round_trip() {
    let (handler, _) = setup();

    let event: InvocationEvent = serde_json::from_value(json!({
        "httpMethod": "POST",
        "body": json!({"title": "From event", "category": "news", "published": true}).to_string()
    }))
    .unwrap();
    let res = send(&handler, event.into()).await;
    let created = body(&res);

    let event: InvocationEvent = serde_json::from_value(json!({
        "httpMethod": "GET",
        "pathParams": {"id": created["id"]}
    }))
    .unwrap();
    let res = send(&handler, event.into()).await;
    assert_eq!(res.status_code, 200);
    assert_eq!(body(&res)["title"], "From event");
}
