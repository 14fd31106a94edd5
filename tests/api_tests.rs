use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use mensa_rating_rs::{
    constants::DEV_ORIGINS,
    db_operations::Database,
    handlers::{cors_layer, router, AppState},
    seed_loader::seed_if_empty,
};

fn app() -> Router {
    let state = AppState::new(Database::open_in_memory().unwrap());
    router(state, cors_layer(&DEV_ORIGINS).unwrap())
}

fn seeded_app() -> Router {
    let state = AppState::new(Database::open_in_memory().unwrap());
    seed_if_empty(&state.canteens).unwrap();
    router(state, cors_layer(&DEV_ORIGINS).unwrap())
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    read_response(app, req).await
}

async fn send_raw(
    app: &Router,
    method: Method,
    uri: &str,
    content_type: Option<&str>,
    body: &'static str,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }
    read_response(app, builder.body(Body::from(body)).unwrap()).await
}

async fn read_response(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn create_canteen(app: &Router, name: &str) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/canteens",
        Some(json!({"name": name, "location": "Block A"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().unwrap()
}

async fn create_dish(app: &Router, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, "/api/dishes", Some(body)).await
}

#[tokio::test]
async fn test_canteen_lifecycle_with_dishes() {
    let app = app();

    let canteen_id = create_canteen(&app, "Test Canteen").await;

    let (status, dish) = create_dish(&app, json!({"name": "Tea", "canteen": {"id": canteen_id}})).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(dish["price"], 0.0);
    assert_eq!(dish["rating"], 1);
    assert_eq!(dish["canteen"]["id"], canteen_id);
    let dish_id = dish["id"].as_i64().unwrap();

    let (status, listed) = send(&app, Method::GET, &format!("/api/dishes/canteen/{canteen_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["id"], dish_id);

    let (status, body) = send(&app, Method::DELETE, &format!("/api/canteens/{canteen_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);

    let (status, body) = send(&app, Method::GET, &format!("/api/dishes/{dish_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn test_created_canteens_get_unused_ids() {
    let app = app();

    let first = create_canteen(&app, "Main Campus Canteen").await;
    let second = create_canteen(&app, "Rishabs Canteen").await;
    send(&app, Method::DELETE, &format!("/api/canteens/{second}"), None).await;
    let third = create_canteen(&app, "Snow Cubes Canteen").await;

    assert_ne!(first, second);
    assert_ne!(third, first);
    assert_ne!(third, second);
}

#[tokio::test]
async fn test_duplicate_canteen_name_is_rejected() {
    let app = app();
    create_canteen(&app, "Test Canteen").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/canteens",
        Some(json!({"name": "Test Canteen", "location": "Somewhere else", "description": "x"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Canteen with this name already exists");

    // differs only in case, so it is a different name
    let (status, _) = send(&app, Method::POST, "/api/canteens", Some(json!({"name": "test canteen"}))).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_canteen_shape_validation() {
    let app = app();

    let (status, body) = send(&app, Method::POST, "/api/canteens", Some(json!({"location": "Block A"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, _) = send(&app, Method::POST, "/api/canteens", Some(json!({"name": ""}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send_raw(&app, Method::POST, "/api/canteens", Some("application/json"), "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    // a missing content type is a bad request too, not 415
    let (status, body) = send_raw(&app, Method::POST, "/api/canteens", None, r#"{"name": "Plain"}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    let (status, _) = send_raw(&app, Method::POST, "/api/dishes", Some("text/plain"), r#"{"name": "Tea"}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // shape is checked before existence
    let (status, _) = send(&app, Method::PUT, "/api/canteens/999", Some(json!({"name": " "}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_canteen_update() {
    let app = app();
    let id = create_canteen(&app, "Rishabs Canteen").await;
    create_canteen(&app, "Metro Cafe Canteen").await;
    create_dish(&app, json!({"name": "Orange Juice", "price": 50.0, "canteen": {"id": id}})).await;

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/canteens/{id}"),
        Some(json!({"name": "Metro Cafe Canteen"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // keeping the own name is not a conflict
    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/canteens/{id}"),
        Some(json!({"name": "Rishabs Canteen", "description": "Juices"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["description"], "Juices");
    assert_eq!(body["location"], Value::Null);
    assert_eq!(body["dishes"].as_array().unwrap().len(), 1);
    assert!(body["dishes"][0].get("canteen").is_none());

    let (status, _) = send(&app, Method::PUT, "/api/canteens/999", Some(json!({"name": "Ghost"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_missing_canteen_is_not_found() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/api/canteens/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, Method::DELETE, "/api/canteens/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_dish_create_rejections() {
    let app = app();
    let id = create_canteen(&app, "Test Canteen").await;

    let (status, body) = create_dish(&app, json!({"name": "   ", "canteen": {"id": id}})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Dish name is required");

    let (status, body) = create_dish(&app, json!({"name": "Tea"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Canteen ID is required");

    let (status, body) = create_dish(&app, json!({"name": "Tea", "canteen": {}})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Canteen ID is required");

    let (status, body) = create_dish(&app, json!({"name": "Tea", "canteen": {"id": 404}})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Canteen not found with ID: 404");

    let (_, all) = send(&app, Method::GET, "/api/dishes", None).await;
    assert!(all.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_dish_create_keeps_given_values() {
    let app = app();
    let id = create_canteen(&app, "Snow Cubes Canteen").await;

    let (status, dish) = create_dish(
        &app,
        json!({
            "id": 777,
            "name": "Margherita Pizza",
            "category": "Italian",
            "price": 140.0,
            "rating": 7,
            "availableDate": "2025-03-01",
            "canteen": {"id": id, "name": "ignored"}
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_ne!(dish["id"], 777);
    assert_eq!(dish["rating"], 7);
    assert_eq!(dish["price"], 140.0);
    assert_eq!(dish["availableDate"], "2025-03-01");
    assert_eq!(dish["canteen"]["name"], "Snow Cubes Canteen");
    assert!(dish["canteen"].get("dishes").is_none());
}

#[tokio::test]
async fn test_dish_update_is_lax() {
    let app = app();
    let id = create_canteen(&app, "Main Campus Canteen").await;
    let (_, dish) = create_dish(&app, json!({"name": "Veg Noodles", "price": 90.0, "rating": 4, "canteen": {"id": id}})).await;
    let dish_id = dish["id"].as_i64().unwrap();

    let other = create_canteen(&app, "Ashwins Canteen").await;
    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/dishes/{dish_id}"),
        Some(json!({"name": "", "category": "Chinese", "rating": 42, "canteen": {"id": other}})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "");
    assert_eq!(updated["rating"], 42);
    assert_eq!(updated["price"], 0.0);
    assert_eq!(updated["canteen"]["id"], id);

    let (_, stored) = send(&app, Method::GET, &format!("/api/dishes/{dish_id}"), None).await;
    assert_eq!(stored["name"], "");
    assert_eq!(stored["category"], "Chinese");

    let (status, _) = send(&app, Method::PUT, "/api/dishes/999", Some(json!({"name": "Ghost"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_dish_update_rejects_unreadable_body() {
    let app = app();
    let id = create_canteen(&app, "Main Campus Canteen").await;
    let (_, dish) = create_dish(&app, json!({"name": "Veg Noodles", "price": 90.0, "canteen": {"id": id}})).await;
    let uri = format!("/api/dishes/{}", dish["id"]);

    let (status, body) = send_raw(&app, Method::PUT, &uri, Some("application/json"), "{\"name\": ").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = send_raw(&app, Method::PUT, &uri, None, r#"{"name": "Fried Rice"}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (_, stored) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(stored["name"], "Veg Noodles");
    assert_eq!(stored["price"], 90.0);
}

#[tokio::test]
async fn test_unparsable_path_and_query_values() {
    let app = seeded_app();

    for uri in [
        "/api/canteens/abc",
        "/api/dishes/1.5",
        "/api/dishes/canteen/first",
        "/api/dishes/rating/high",
    ] {
        let (status, body) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(body["error"].is_string(), "{uri}");
    }

    let (status, body) = send(&app, Method::DELETE, "/api/canteens/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = send(&app, Method::PUT, "/api/dishes/x", Some(json!({"name": "Tea"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_dish_delete() {
    let app = app();
    let id = create_canteen(&app, "Metro Cafe Canteen").await;
    let (_, dish) = create_dish(&app, json!({"name": "Pani Puri", "canteen": {"id": id}})).await;
    let uri = format!("/api/dishes/{}", dish["id"]);

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, canteen) = send(&app, Method::GET, &format!("/api/canteens/{id}"), None).await;
    assert!(canteen["dishes"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_list_by_canteen_matches_reference() {
    let app = seeded_app();

    let (_, canteens) = send(&app, Method::GET, "/api/canteens", None).await;
    let canteens = canteens.as_array().unwrap();
    assert_eq!(canteens.len(), 5);

    for canteen in canteens {
        let id = canteen["id"].as_i64().unwrap();
        let (status, dishes) = send(&app, Method::GET, &format!("/api/dishes/canteen/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);

        let dishes = dishes.as_array().unwrap();
        assert_eq!(dishes.len(), canteen["dishes"].as_array().unwrap().len());
        assert!(dishes.iter().all(|d| d["canteen"]["id"] == id));
    }

    let (status, none) = send(&app, Method::GET, "/api/dishes/canteen/999", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(none.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_lookup_routes() {
    let app = seeded_app();

    let (status, found) = send(&app, Method::GET, "/api/canteens/search?name=snow", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found.as_array().unwrap().len(), 1);
    assert_eq!(found[0]["name"], "Snow Cubes Canteen");

    let (status, _) = send(&app, Method::GET, "/api/canteens/search", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, healthy) = send(&app, Method::GET, "/api/dishes/category/Healthy", None).await;
    assert_eq!(healthy.as_array().unwrap().len(), 2);

    let (_, top) = send(&app, Method::GET, "/api/dishes/rating/5", None).await;
    let top = top.as_array().unwrap();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0]["name"], "Pani Puri");
}

#[tokio::test]
async fn test_cors_allows_only_dev_origins() {
    let app = app();

    for (origin, allowed) in [
        ("http://localhost:5173", true),
        ("http://localhost:8081", true),
        ("http://evil.example", false),
    ] {
        let req = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/canteens")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap();

        let resp = app.clone().oneshot(req).await.unwrap();
        let allow = resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN);

        if allowed {
            assert_eq!(allow.unwrap(), origin);
        } else {
            assert!(allow.is_none());
        }
    }
}
