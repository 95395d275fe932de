//! Router tests over a real service and an in-memory SQLite store.

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use clientele_http::{AppState, router};
use clientele_service::DefaultCustomerService;
use clientele_store::SqliteStore;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn create_router() -> Router {
  let store = SqliteStore::in_memory()
    .await
    .expect("failed to open in-memory database");
  store.migrate().await.expect("failed to run migrations");
  router(AppState::new(Arc::new(DefaultCustomerService::new(store))))
}

async fn send(
  app: &Router,
  method: Method,
  uri: &str,
  body: Option<Value>,
) -> (StatusCode, Value) {
  let builder = Request::builder().method(method).uri(uri);
  let request = match body {
    Some(body) => builder
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from(body.to_string()))
      .unwrap(),
    None => builder.body(Body::empty()).unwrap(),
  };

  let response = app.clone().oneshot(request).await.unwrap();
  let status = response.status();
  let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
  let value = if bytes.is_empty() {
    Value::Null
  } else {
    serde_json::from_slice(&bytes).unwrap()
  };
  (status, value)
}

fn customer_body(full_name: &str, phone_number: &str) -> Value {
  json!({
    "fullName": full_name,
    "phoneNumber": phone_number,
    "address": "Apt. 843 399 Lachelle Crossing, New Eldenhaven, LA 63962-9260",
  })
}

async fn create(app: &Router, full_name: &str, phone_number: &str) -> Value {
  let (status, body) = send(
    app,
    Method::POST,
    "/v1/customers",
    Some(customer_body(full_name, phone_number)),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED);
  body
}

#[tokio::test]
async fn test_create_and_list_customers() {
  let app = create_router().await;

  let created = create(&app, "Ivan Polovyi", "626.164.7481").await;
  assert_eq!(created["fullName"], "Ivan Polovyi");
  assert!(created["id"].as_str().is_some());

  let (status, body) = send(&app, Method::GET, "/v1/customers", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body.as_array().unwrap().len(), 1);
  assert_eq!(body[0]["id"], created["id"]);
}

#[tokio::test]
async fn test_create_with_missing_fields() {
  let app = create_router().await;

  let (status, body) = send(&app, Method::POST, "/v1/customers", Some(json!({}))).await;

  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(
    body,
    json!({
      "errorCode": 400,
      "messages": [
        "Field fullName cannot be null",
        "Field phoneNumber cannot be null",
        "Field address cannot be null",
      ],
    })
  );
}

#[tokio::test]
async fn test_create_with_mistyped_field() {
  let app = create_router().await;

  let (status, body) = send(
    &app,
    Method::POST,
    "/v1/customers",
    Some(json!({ "fullName": 5, "phoneNumber": "1", "address": "a" })),
  )
  .await;

  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["errorCode"], 400);
  let messages = body["messages"].as_array().unwrap();
  assert_eq!(messages.len(), 1);
  assert!(messages[0].as_str().unwrap().contains("fullName"));

  let (_, listed) = send(&app, Method::GET, "/v1/customers", None).await;
  assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn test_create_without_json_content_type() {
  let app = create_router().await;
  let request = Request::builder()
    .method(Method::POST)
    .uri("/v1/customers")
    .body(Body::from(customer_body("Ivan Polovyi", "626.164.7481").to_string()))
    .unwrap();

  let response = app.oneshot(request).await.unwrap();

  assert_eq!(response.status(), StatusCode::BAD_REQUEST);
  let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
  let body: Value = serde_json::from_slice(&bytes).unwrap();
  assert_eq!(body["errorCode"], 400);
  assert_eq!(body["messages"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_patch_with_malformed_json() {
  let app = create_router().await;
  let created = create(&app, "Ivan Polovyi", "626.164.7481").await;
  let request = Request::builder()
    .method(Method::PATCH)
    .uri(format!("/v1/customers/{}", created["id"].as_str().unwrap()))
    .header(header::CONTENT_TYPE, "application/json")
    .body(Body::from("{ \"address\": "))
    .unwrap();

  let response = app.clone().oneshot(request).await.unwrap();

  assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_with_taken_phone_number() {
  let app = create_router().await;
  create(&app, "Ivan Polovyi", "626.164.7481").await;

  let (status, body) = send(
    &app,
    Method::POST,
    "/v1/customers",
    Some(customer_body("Someone Else", "626.164.7481")),
  )
  .await;

  assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
  assert_eq!(body["errorCode"], 422);
  assert_eq!(
    body["messages"],
    json!(["Customer with phone number 626.164.7481 already exists"])
  );
}

#[tokio::test]
async fn test_update_and_patch_customer() {
  let app = create_router().await;
  let created = create(&app, "Ivan Polovyi", "626.164.7481").await;
  let uri = format!("/v1/customers/{}", created["id"].as_str().unwrap());

  let (status, body) = send(
    &app,
    Method::PUT,
    &uri,
    Some(customer_body("Ivan P.", "1-669-210-0504")),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["fullName"], "Ivan P.");
  assert_eq!(body["phoneNumber"], "1-669-210-0504");

  let (status, body) = send(
    &app,
    Method::PATCH,
    &uri,
    Some(json!({ "address": "New address" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["fullName"], "Ivan P.");
  assert_eq!(body["address"], "New address");
}

#[tokio::test]
async fn test_update_unknown_customer() {
  let app = create_router().await;

  let (status, body) = send(
    &app,
    Method::PUT,
    "/v1/customers/missing",
    Some(customer_body("Ivan Polovyi", "626.164.7481")),
  )
  .await;

  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(
    body,
    json!({ "errorCode": 404, "messages": ["Customer not found"] })
  );
}

#[tokio::test]
async fn test_patch_with_blank_field() {
  let app = create_router().await;
  let created = create(&app, "Ivan Polovyi", "626.164.7481").await;
  let uri = format!("/v1/customers/{}", created["id"].as_str().unwrap());

  let (status, body) = send(&app, Method::PATCH, &uri, Some(json!({ "fullName": " " }))).await;

  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["messages"], json!(["Field fullName cannot be blank"]));
}

#[tokio::test]
async fn test_delete_customer() {
  let app = create_router().await;
  let created = create(&app, "Ivan Polovyi", "626.164.7481").await;
  let uri = format!("/v1/customers/{}", created["id"].as_str().unwrap());

  let (status, body) = send(&app, Method::DELETE, &uri, None).await;
  assert_eq!(status, StatusCode::NO_CONTENT);
  assert_eq!(body, Value::Null);

  let (status, _) = send(&app, Method::DELETE, &uri, None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_customers_with_filters() {
  let app = create_router().await;
  create(&app, "Ivan Polovyi", "626.164.7481").await;
  create(&app, "Someone Else", "1-669-210-0504").await;

  let (status, body) = send(
    &app,
    Method::GET,
    "/v1/customers-with-filters?phoneNumber=1-669-210-0504",
    None,
  )
  .await;

  assert_eq!(status, StatusCode::OK);
  let customers = body.as_array().unwrap();
  assert_eq!(customers.len(), 1);
  assert_eq!(customers[0]["fullName"], "Someone Else");
}

#[tokio::test]
async fn test_customers_with_malformed_date_filter() {
  let app = create_router().await;

  let (status, body) = send(
    &app,
    Method::GET,
    "/v1/customers-with-filters?createdAt=yesterday",
    None,
  )
  .await;

  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(
    body,
    json!({ "errorCode": 400, "messages": ["Field createdAt has an invalid format."] })
  );
}

#[tokio::test]
async fn test_graphql_endpoint_normalizes_errors() {
  let app = create_router().await;

  let (status, body) = send(
    &app,
    Method::POST,
    "/graphql",
    Some(json!({
      "query": "mutation { updateCustomer(customerId: \"missing\", updateCustomerRequest: { fullName: \"A\", phoneNumber: \"1\", address: \"B\" }) { id } }",
    })),
  )
  .await;

  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["errors"][0]["message"], "Customer not found");
  assert_eq!(body["errors"][0]["extensions"]["errorCode"], 404);
}

#[tokio::test]
async fn test_graphql_endpoint_creates_customer() {
  let app = create_router().await;

  let (status, body) = send(
    &app,
    Method::POST,
    "/graphql",
    Some(json!({
      "query": "mutation ($input: CreateCustomerRequest!) { createCustomer(createCustomerRequest: $input) { fullName createdAt } }",
      "variables": { "input": customer_body("Ivan Polovyi", "626.164.7481") },
    })),
  )
  .await;

  assert_eq!(status, StatusCode::OK);
  assert!(body.get("errors").is_none());
  assert_eq!(body["data"]["createCustomer"]["fullName"], "Ivan Polovyi");

  let (_, listed) = send(&app, Method::GET, "/v1/customers", None).await;
  assert_eq!(listed.as_array().unwrap().len(), 1);
}
