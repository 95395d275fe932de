//! REST error responses.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use clientele_graphql::ErrorCode;
use clientele_service::{Fault, ServiceError, ValidationFault};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Failure of a REST handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error(transparent)]
  Service(#[from] ServiceError),

  /// The request body is not JSON of the expected shape.
  #[error("{}", .0.body_text())]
  MalformedBody(#[from] JsonRejection),

  /// A query parameter could not be parsed.
  #[error("Field {field} has an invalid format.")]
  InvalidFormat { field: String },
}

impl From<ValidationFault> for ApiError {
  fn from(fault: ValidationFault) -> Self {
    Self::Service(ServiceError::from(fault))
  }
}

impl From<Fault> for ApiError {
  fn from(fault: Fault) -> Self {
    Self::Service(ServiceError::from(fault))
  }
}

/// JSON body of every REST error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
  pub error_code: u16,
  pub messages: Vec<String>,
}

impl ApiError {
  fn status_and_messages(&self) -> (StatusCode, Vec<String>) {
    match self {
      ApiError::Service(ServiceError::Fault(fault)) => fault_response(fault),
      ApiError::Service(ServiceError::Store(e)) => {
        error!(error = %e, "store_failure");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          vec!["Internal server error".to_string()],
        )
      }
      ApiError::MalformedBody(_) | ApiError::InvalidFormat { .. } => {
        (status(ErrorCode::BadRequest), vec![self.to_string()])
      }
    }
  }
}

fn fault_response(fault: &Fault) -> (StatusCode, Vec<String>) {
  match fault {
    Fault::Validation(validation) => (
      status(ErrorCode::BadRequest),
      validation
        .violations
        .iter()
        .map(|v| v.message.clone())
        .collect(),
    ),
    Fault::NotFound { message } => (status(ErrorCode::NotFound), vec![message.clone()]),
    Fault::Unprocessable { message } => {
      (status(ErrorCode::UnprocessableEntity), vec![message.clone()])
    }
  }
}

fn status(code: ErrorCode) -> StatusCode {
  StatusCode::from_u16(code.as_u16()).unwrap_or(StatusCode::BAD_REQUEST)
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, messages) = self.status_and_messages();
    let body = ErrorBody {
      error_code: status.as_u16(),
      messages,
    };
    (status, Json(body)).into_response()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use clientele_service::Violation;

  #[test]
  fn test_validation_fault_lists_every_message() {
    let error = ApiError::from(ValidationFault::new(vec![
      Violation::new("fullName", "Field fullName cannot be null"),
      Violation::new("address", "Field address cannot be blank"),
    ]));

    let (status, messages) = error.status_and_messages();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
      messages,
      vec!["Field fullName cannot be null", "Field address cannot be blank"]
    );
  }

  #[test]
  fn test_fault_statuses() {
    let (status, messages) =
      ApiError::from(Fault::not_found("Customer not found")).status_and_messages();
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(messages, vec!["Customer not found"]);

    let (status, _) = ApiError::from(Fault::unprocessable("taken")).status_and_messages();
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
  }

  #[test]
  fn test_invalid_format_message() {
    let error = ApiError::InvalidFormat {
      field: "createdAt".to_string(),
    };

    let (status, messages) = error.status_and_messages();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(messages, vec!["Field createdAt has an invalid format."]);
  }

  #[test]
  fn test_error_body_wire_shape() {
    let body = ErrorBody {
      error_code: 404,
      messages: vec!["Customer not found".to_string()],
    };

    assert_eq!(
      serde_json::to_value(&body).unwrap(),
      serde_json::json!({ "errorCode": 404, "messages": ["Customer not found"] })
    );
  }
}
