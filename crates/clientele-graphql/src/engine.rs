//! Bridge between the GraphQL engine and the normalizer.

use async_graphql::{ErrorExtensionValues, Pos, Request, Response, ServerError};
use clientele_service::Fault;
use tracing::debug;

use crate::coercion::is_coercion_message;
use crate::error::{NormalizedError, PathSegment, RawError, RawErrorKind, SourceLocation};
use crate::normalize::normalize;
use crate::schema::CustomerSchema;

/// Execute a request and normalize the errors in its response.
///
/// This is the single per-request hook: the engine's full error list is
/// classified and rewritten once, after execution. Successful responses
/// carry no errors and pass through untouched.
pub async fn execute(schema: &CustomerSchema, request: Request) -> Response {
  let mut response = schema.execute(request).await;
  if response.errors.is_empty() {
    return response;
  }

  debug!(count = response.errors.len(), "engine_errors");
  let raw_errors = std::mem::take(&mut response.errors)
    .into_iter()
    .map(RawError::from)
    .collect();
  response.errors = normalize(raw_errors)
    .into_iter()
    .map(ServerError::from)
    .collect();
  response
}

impl From<ServerError> for RawError {
  /// Classify an engine error by what it carries.
  ///
  /// A [`Fault`] source marks a resolver failure raised by the service layer.
  /// Without one, errors phrased as input coercion failures are coercion
  /// errors, errors with a response path are resolver failures without a
  /// known cause, and everything else is unclassified.
  fn from(error: ServerError) -> Self {
    let kind = match error.source::<Fault>() {
      Some(fault) => RawErrorKind::DataFetching {
        cause: Some(fault.clone()),
      },
      None if is_coercion_message(&error.message) => RawErrorKind::Coercion { variable: None },
      None if !error.path.is_empty() => RawErrorKind::DataFetching { cause: None },
      None => RawErrorKind::Other,
    };

    RawError {
      message: error.message,
      locations: error.locations.into_iter().map(SourceLocation::from).collect(),
      path: error.path.into_iter().map(PathSegment::from).collect(),
      kind,
    }
  }
}

impl From<NormalizedError> for ServerError {
  fn from(error: NormalizedError) -> Self {
    let mut server_error = ServerError::new(error.message, None);
    server_error.locations = error.locations.into_iter().map(Pos::from).collect();
    server_error.path = error
      .path
      .into_iter()
      .map(async_graphql::PathSegment::from)
      .collect();

    if let Some(code) = error.error_code {
      let mut extensions = ErrorExtensionValues::default();
      extensions.set("errorCode", i32::from(code.as_u16()));
      server_error.extensions = Some(extensions);
    }

    server_error
  }
}

impl From<Pos> for SourceLocation {
  fn from(pos: Pos) -> Self {
    Self::new(pos.line, pos.column)
  }
}

impl From<SourceLocation> for Pos {
  fn from(location: SourceLocation) -> Self {
    Pos {
      line: location.line,
      column: location.column,
    }
  }
}

impl From<async_graphql::PathSegment> for PathSegment {
  fn from(segment: async_graphql::PathSegment) -> Self {
    match segment {
      async_graphql::PathSegment::Field(name) => Self::Field(name),
      async_graphql::PathSegment::Index(index) => Self::Index(index),
    }
  }
}

impl From<PathSegment> for async_graphql::PathSegment {
  fn from(segment: PathSegment) -> Self {
    match segment {
      PathSegment::Field(name) => Self::Field(name),
      PathSegment::Index(index) => Self::Index(index),
    }
  }
}

#[cfg(test)]
mod tests {
  use async_graphql::Error;
  use clientele_service::{ValidationFault, Violation};

  use super::*;
  use crate::error::ErrorCode;

  fn pos() -> Pos {
    Pos { line: 3, column: 5 }
  }

  #[test]
  fn test_fault_source_is_data_fetching() {
    let fault = Fault::not_found("Customer not found");
    let mut server_error = Error::new_with_source(fault.clone()).into_server_error(pos());
    server_error.path = vec![async_graphql::PathSegment::Field("deleteCustomer".to_string())];

    let raw = RawError::from(server_error);

    assert_eq!(raw.kind, RawErrorKind::DataFetching { cause: Some(fault) });
    assert_eq!(raw.locations, vec![SourceLocation::new(3, 5)]);
    assert_eq!(raw.path, vec![PathSegment::Field("deleteCustomer".to_string())]);
  }

  #[test]
  fn test_validation_fault_source_survives() {
    let fault = Fault::Validation(ValidationFault::new(vec![Violation::new(
      "fullName",
      "Field fullName cannot be null",
    )]));
    let server_error = Error::new_with_source(fault.clone()).into_server_error(pos());

    let raw = RawError::from(server_error);

    assert_eq!(raw.kind, RawErrorKind::DataFetching { cause: Some(fault) });
  }

  #[test]
  fn test_coercion_message_is_coercion() {
    let server_error = ServerError::new("Variable 'createdAt' has an invalid value", Some(pos()));

    let raw = RawError::from(server_error);

    assert_eq!(raw.kind, RawErrorKind::Coercion { variable: None });
  }

  #[test]
  fn test_resolver_error_without_fault() {
    let mut server_error = ServerError::new("database error: locked", Some(pos()));
    server_error.path = vec![async_graphql::PathSegment::Field("allCustomers".to_string())];

    let raw = RawError::from(server_error);

    assert_eq!(raw.kind, RawErrorKind::DataFetching { cause: None });
  }

  #[test]
  fn test_other_error() {
    let server_error = ServerError::new("Unknown field \"nope\"", Some(pos()));

    assert_eq!(RawError::from(server_error).kind, RawErrorKind::Other);
  }

  #[test]
  fn test_normalized_error_sets_error_code_extension() {
    let normalized = NormalizedError::classified(
      "Customer not found",
      vec![SourceLocation::new(3, 5)],
      vec![PathSegment::Field("updateCustomer".to_string())],
      ErrorCode::NotFound,
    );

    let server_error = ServerError::from(normalized);
    let json = serde_json::to_value(&server_error).unwrap();

    assert_eq!(json["message"], "Customer not found");
    assert_eq!(json["locations"][0]["line"], 3);
    assert_eq!(json["locations"][0]["column"], 5);
    assert_eq!(json["path"][0], "updateCustomer");
    assert_eq!(json["extensions"]["errorCode"], 404);
  }

  #[test]
  fn test_passthrough_has_no_extensions() {
    let normalized =
      NormalizedError::passthrough("boom".to_string(), vec![SourceLocation::new(1, 1)], vec![]);

    let server_error = ServerError::from(normalized);

    assert!(server_error.extensions.is_none());
    assert_eq!(server_error.message, "boom");
    assert_eq!(server_error.locations, vec![Pos { line: 1, column: 1 }]);
  }
}
