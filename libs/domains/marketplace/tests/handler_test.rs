//! Handler tests for the marketplace domain
//!
//! Each router is exercised on its own over an in-memory store:
//! - Request decoding (path, query, JSON)
//! - Status codes per endpoint
//! - Error bodies

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use domain_marketplace::products::{self, Product, ProductService};
use domain_marketplace::serviceable_products::{self, ServiceableProduct, ServiceableProductService};
use domain_marketplace::shops::{self, Shop, ShopService};
use domain_marketplace::users::{self, UserResponse, UserService};
use domain_marketplace::InMemoryStore;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use test_utils::TestDataBuilder;
use tower::ServiceExt; // For oneshot()

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(response: Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn shops_app() -> Router {
    shops::handlers::router(ShopService::new(InMemoryStore::new()))
}

fn users_app() -> Router {
    users::handlers::router(UserService::new(InMemoryStore::new()))
}

fn products_app() -> Router {
    products::handlers::router(ProductService::new(InMemoryStore::new()))
}

fn green_farm(owner_id: uuid::Uuid) -> Value {
    json!({
        "shop_name": "Green Farm",
        "owner_id": owner_id,
        "location": "Hebbal, Bangalore",
        "operating_hours": "06:00-18:00",
        "latitude": 12.9,
        "longitude": 77.6
    })
}

fn new_user(username: &str) -> Value {
    json!({
        "username": username,
        "password": "correct horse",
        "email": format!("{username}@example.com"),
        "first_name": "Ravi",
        "latitude": 12.97,
        "longitude": 77.59
    })
}

// ---------------------------------------------------------------------------
// Shops
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_create_shop_then_get_returns_same_shop() {
    let app = shops_app();
    let builder = TestDataBuilder::from_test_name("create_shop_then_get");
    let owner_id = builder.id(1);

    let response = app
        .clone()
        .oneshot(json_request("POST", "/", green_farm(owner_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Shop = json_body(response).await;
    assert_eq!(created.shop_name, "Green Farm");
    assert_eq!(created.owner_id, owner_id);

    let response = app
        .oneshot(get(&format!("/{}", created.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let fetched: Shop = json_body(response).await;
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_create_shop_duplicate_name_is_conflict() {
    let app = shops_app();
    let owner_id = TestDataBuilder::from_test_name("duplicate_shop").id(1);

    let first = app
        .clone()
        .oneshot(json_request("POST", "/", green_farm(owner_id)))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
        .oneshot(json_request("POST", "/", green_farm(owner_id)))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let body: Value = json_body(second).await;
    assert_eq!(body["error"], "CONFLICT");
    assert_eq!(body["message"], "Shop 'Green Farm' already exists");
}

#[tokio::test]
async fn test_create_shop_malformed_json_is_400() {
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from("{\"shop_name\": \"Green Farm\","))
        .unwrap();

    let response = shops_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response).await;
    assert_eq!(body["error"], "INVALID_JSON");
}

#[tokio::test]
async fn test_create_shop_missing_required_field_is_400() {
    let response = shops_app()
        .oneshot(json_request(
            "POST",
            "/",
            json!({ "shop_name": "Green Farm", "latitude": 12.9, "longitude": 77.6 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_shop_returns_204() {
    let app = shops_app();
    let owner_id = TestDataBuilder::from_test_name("update_shop").id(1);

    let created: Shop = json_body(
        app.clone()
            .oneshot(json_request("POST", "/", green_farm(owner_id)))
            .await
            .unwrap(),
    )
    .await;

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/",
            json!({ "id": created.id, "operating_hours": "24h" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let fetched: Shop = json_body(
        app.oneshot(get(&format!("/{}", created.id)))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(fetched.operating_hours, "24h");
}

#[tokio::test]
async fn test_update_unknown_shop_is_404() {
    let id = TestDataBuilder::from_test_name("update_unknown_shop").id(7);
    let response = shops_app()
        .oneshot(json_request("PUT", "/", json!({ "id": id, "location": "Nowhere" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_shop_returns_204_then_404() {
    let app = shops_app();
    let owner_id = TestDataBuilder::from_test_name("delete_shop").id(1);
    let created: Shop = json_body(
        app.clone()
            .oneshot(json_request("POST", "/", green_farm(owner_id)))
            .await
            .unwrap(),
    )
    .await;

    let uri = format!("/{}", created.id);
    let response = app.clone().oneshot(delete(&uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.clone().oneshot(delete(&uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.oneshot(get(&uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_shop_invalid_uuid_is_400() {
    let response = shops_app().oneshot(get("/not-a-uuid")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response).await;
    assert_eq!(body["error"], "INVALID_UUID");
}

#[tokio::test]
async fn test_nearby_shops_sorted_by_distance() {
    let app = shops_app();
    let owner_id = TestDataBuilder::from_test_name("nearby_shops").id(1);

    for (name, latitude) in [("Far", 12.95), ("Near", 12.91), ("Elsewhere", 13.9)] {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/",
                json!({
                    "shop_name": name,
                    "owner_id": owner_id,
                    "latitude": latitude,
                    "longitude": 77.6
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .oneshot(get("/nearby?latitude=12.9&longitude=77.6&radius=10000"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let shops: Vec<Shop> = json_body(response).await;
    let names: Vec<&str> = shops.iter().map(|s| s.shop_name.as_str()).collect();
    assert_eq!(names, vec!["Near", "Far"]);
}

#[tokio::test]
async fn test_nearby_bad_latitude_names_parameter() {
    let response = shops_app()
        .oneshot(get("/nearby?latitude=north&longitude=77.6&radius=100"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response).await;
    assert_eq!(body["message"], "Invalid latitude: expected a number, got 'north'");
}

#[tokio::test]
async fn test_nearby_missing_radius_is_400() {
    let response = shops_app()
        .oneshot(get("/nearby?latitude=12.9&longitude=77.6"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response).await;
    assert_eq!(body["message"], "Missing radius");
}

#[tokio::test]
async fn test_nearby_negative_radius_is_400() {
    let response = shops_app()
        .oneshot(get("/nearby?latitude=12.9&longitude=77.6&radius=-5"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_create_user_returns_201_without_password() {
    let response = users_app()
        .oneshot(json_request("POST", "/add", new_user("ravi")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = json_body(response).await;
    assert_eq!(body["username"], "ravi");
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn test_create_user_duplicate_username_is_409() {
    let app = users_app();
    let first = app
        .clone()
        .oneshot(json_request("POST", "/add", new_user("ravi")))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
        .oneshot(json_request("POST", "/add", new_user("ravi")))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_create_user_unknown_field_is_400() {
    let mut body = new_user("ravi");
    body["is_admin"] = json!(true);

    let response = users_app()
        .oneshot(json_request("POST", "/add", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_user_invalid_email_lists_field() {
    let mut body = new_user("ravi");
    body["email"] = json!("not-an-email");

    let response = users_app()
        .oneshot(json_request("POST", "/add", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(body["details"]["email"].is_array());
}

#[tokio::test]
async fn test_get_user_by_id_or_username() {
    let app = users_app();
    let created: UserResponse = json_body(
        app.clone()
            .oneshot(json_request("POST", "/add", new_user("asha")))
            .await
            .unwrap(),
    )
    .await;

    for uri in [
        format!("/{}", created.id),
        "/asha".to_string(),
        "/username/asha".to_string(),
    ] {
        let response = app.clone().oneshot(get(&uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "GET {uri}");
        let fetched: UserResponse = json_body(response).await;
        assert_eq!(fetched, created);
    }
}

#[tokio::test]
async fn test_get_unknown_user_is_404() {
    let id = TestDataBuilder::from_test_name("unknown_user").id(3);
    let response = users_app()
        .oneshot(get(&format!("/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = json_body(response).await;
    assert_eq!(body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_update_user_returns_updated_user() {
    let app = users_app();
    let created: UserResponse = json_body(
        app.clone()
            .oneshot(json_request("POST", "/add", new_user("ravi")))
            .await
            .unwrap(),
    )
    .await;

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/update/{}", created.id),
            json!({ "location": "Mysore", "latitude": 12.29, "longitude": 76.63 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated: UserResponse = json_body(response).await;
    assert_eq!(updated.location, "Mysore");
    assert_eq!(updated.username, "ravi");
}

#[tokio::test]
async fn test_update_user_malformed_json_is_400() {
    let id = TestDataBuilder::from_test_name("update_user_malformed").id(1);
    let request = Request::builder()
        .method("PUT")
        .uri(format!("/update/{id}"))
        .header("content-type", "application/json")
        .body(Body::from("not json"))
        .unwrap();

    let response = users_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_user_returns_200() {
    let app = users_app();
    let created: UserResponse = json_body(
        app.clone()
            .oneshot(json_request("POST", "/add", new_user("ravi")))
            .await
            .unwrap(),
    )
    .await;

    let response = app
        .clone()
        .oneshot(delete(&format!("/{}", created.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(bytes.is_empty());

    let response = app
        .oneshot(get(&format!("/{}", created.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_nearby_users() {
    let app = users_app();
    app.clone()
        .oneshot(json_request("POST", "/add", new_user("ravi")))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(get("/nearby?latitude=12.97&longitude=77.59&radius=0"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let users: Vec<UserResponse> = json_body(response).await;
    assert_eq!(users.len(), 1);

    let response = app
        .oneshot(get("/nearby?latitude=0&longitude=0&radius=1000"))
        .await
        .unwrap();
    let users: Vec<UserResponse> = json_body(response).await;
    assert!(users.is_empty());
}

#[tokio::test]
async fn test_nearby_users_bad_longitude_is_400() {
    let response = users_app()
        .oneshot(get("/nearby?latitude=12.9&longitude=200&radius=10"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response).await;
    assert!(body["message"].as_str().unwrap().contains("longitude"));
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_product_lifecycle() {
    let app = products_app();
    let builder = TestDataBuilder::from_test_name("product_lifecycle");
    let category_id = builder.id(1);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/",
            json!({
                "product_name": "Basmati rice",
                "description": "5kg bag",
                "category_id": category_id,
                "price": 42.5,
                "stock_quantity": 100
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Product = json_body(response).await;

    let response = app
        .clone()
        .oneshot(get(&format!("/category/{category_id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let in_category: Vec<Product> = json_body(response).await;
    assert_eq!(in_category, vec![created.clone()]);

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/{}", created.id),
            json!({ "stock_quantity": 90 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Product = json_body(response).await;
    assert_eq!(updated.stock_quantity, 90);
    assert_eq!(updated.price, 42.5);

    let response = app
        .clone()
        .oneshot(delete(&format!("/{}", created.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(get(&format!("/{}", created.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_empty_category_returns_empty_list() {
    let category_id = TestDataBuilder::from_test_name("empty_category").id(1);
    let response = products_app()
        .oneshot(get(&format!("/category/{category_id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let products: Vec<Product> = json_body(response).await;
    assert!(products.is_empty());
}

#[tokio::test]
async fn test_create_product_negative_price_is_400() {
    let category_id = TestDataBuilder::from_test_name("negative_price").id(1);
    let response = products_app()
        .oneshot(json_request(
            "POST",
            "/",
            json!({
                "product_name": "Rice",
                "category_id": category_id,
                "price": -1.0,
                "stock_quantity": 1
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response).await;
    assert!(body["details"]["price"].is_array());
}

#[tokio::test]
async fn test_update_unknown_product_is_404() {
    let id = TestDataBuilder::from_test_name("update_unknown_product").id(9);
    let response = products_app()
        .oneshot(json_request("PUT", &format!("/{id}"), json!({ "price": 1.0 })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Serviceable products
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_serviceable_products_list_create_delete() {
    let app = serviceable_products::handlers::router(ServiceableProductService::new(
        InMemoryStore::new(),
    ));
    let builder = TestDataBuilder::from_test_name("serviceable_products");

    let mut created = Vec::new();
    for (salt, is_serviceable) in [(1, true), (2, false)] {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/",
                json!({
                    "product_id": builder.id(salt),
                    "shop_id": builder.id(100 + salt),
                    "is_serviceable": is_serviceable
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let link: ServiceableProduct = json_body(response).await;
        created.push(link);
    }

    let response = app.clone().oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let listed: Vec<ServiceableProduct> = json_body(response).await;
    assert_eq!(listed, vec![created[0].clone()]);

    let response = app
        .clone()
        .oneshot(delete(&format!("/{}", created[0].id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let listed: Vec<ServiceableProduct> =
        json_body(app.oneshot(get("/")).await.unwrap()).await;
    assert!(listed.is_empty());
}
