//! Route table and handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Path, Query, Request, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use chrono::NaiveDate;
use clientele_graphql::{CustomerSchema, DATE_FORMAT, build_schema, execute};
use clientele_service::{
  CreateCustomerRequest, Customer, CustomerFilter, PartiallyUpdateCustomerRequest,
  SharedCustomerService, UpdateCustomerRequest,
};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::ApiError;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
  pub service: SharedCustomerService,
  pub schema: CustomerSchema,
}

impl AppState {
  /// Build state around `service`, with a GraphQL schema over the same service.
  pub fn new(service: SharedCustomerService) -> Self {
    let schema = build_schema(service.clone());
    Self { service, schema }
  }
}

/// JSON request body whose rejections render as [`ApiError`].
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
  Json<T>: FromRequest<S, Rejection = JsonRejection>,
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
    let Json(value) = Json::<T>::from_request(req, state).await?;
    Ok(Self(value))
  }
}

/// Query string of `GET /v1/customers-with-filters`.
///
/// `created_at` is parsed by the handler, so a malformed date gets the
/// customer error body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerQuery {
  pub full_name: Option<String>,
  pub phone_number: Option<String>,
  pub created_at: Option<String>,
}

impl CustomerQuery {
  fn into_filter(self) -> Result<CustomerFilter, ApiError> {
    let created_at = self
      .created_at
      .map(|raw| {
        NaiveDate::parse_from_str(&raw, DATE_FORMAT).map_err(|_| ApiError::InvalidFormat {
          field: "createdAt".to_string(),
        })
      })
      .transpose()?;

    Ok(CustomerFilter {
      full_name: self.full_name,
      phone_number: self.phone_number,
      created_at,
    })
  }
}

/// Build the router.
pub fn router(state: AppState) -> Router {
  Router::new()
    .route("/graphql", post(graphql))
    .route("/v1/customers", get(get_all_customers).post(create_customer))
    .route("/v1/customers-with-filters", get(get_customers_with_filters))
    .route(
      "/v1/customers/{id}",
      put(update_customer)
        .patch(partially_update_customer)
        .delete(delete_customer),
    )
    .with_state(state)
}

async fn graphql(
  State(state): State<AppState>,
  Json(request): Json<async_graphql::Request>,
) -> Json<async_graphql::Response> {
  debug!(operation = ?request.operation_name, "graphql_request");
  Json(execute(&state.schema, request).await)
}

async fn get_all_customers(
  State(state): State<AppState>,
) -> Result<Json<Vec<Customer>>, ApiError> {
  let customers = state.service.get_all_customers().await?;
  Ok(Json(customers))
}

async fn get_customers_with_filters(
  State(state): State<AppState>,
  Query(query): Query<CustomerQuery>,
) -> Result<Json<Vec<Customer>>, ApiError> {
  let filter = query.into_filter()?;
  let customers = state.service.get_customers_with_filters(filter).await?;
  Ok(Json(customers))
}

async fn create_customer(
  State(state): State<AppState>,
  JsonBody(request): JsonBody<CreateCustomerRequest>,
) -> Result<(StatusCode, Json<Customer>), ApiError> {
  let customer = request.validate()?;
  let created = state.service.create_customer(customer).await?;
  info!(customer_id = %created.id, "customer_created_via_rest");
  Ok((StatusCode::CREATED, Json(created)))
}

async fn update_customer(
  State(state): State<AppState>,
  Path(id): Path<String>,
  JsonBody(request): JsonBody<UpdateCustomerRequest>,
) -> Result<Json<Customer>, ApiError> {
  let customer = request.validate()?;
  let updated = state.service.update_customer(&id, customer).await?;
  Ok(Json(updated))
}

async fn partially_update_customer(
  State(state): State<AppState>,
  Path(id): Path<String>,
  JsonBody(request): JsonBody<PartiallyUpdateCustomerRequest>,
) -> Result<Json<Customer>, ApiError> {
  let patch = request.validate()?;
  let updated = state.service.partially_update_customer(&id, patch).await?;
  Ok(Json(updated))
}

async fn delete_customer(
  State(state): State<AppState>,
  Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
  state.service.delete_customer(&id).await?;
  Ok(StatusCode::NO_CONTENT)
}
