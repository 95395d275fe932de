//! Raw and normalized execution error types.
//!
//! These types are independent of the GraphQL engine; [`crate::execute`]
//! converts to and from the engine's own error type.

use std::fmt;

use clientele_service::Fault;
use serde::{Deserialize, Serialize};

/// Line and column in the client's query document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
  pub line: usize,
  pub column: usize,
}

impl SourceLocation {
  pub fn new(line: usize, column: usize) -> Self {
    Self { line, column }
  }
}

/// One step of the response path an error is attributed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
  Field(String),
  Index(usize),
}

/// What the engine knew about a failure when it was observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawErrorKind {
  /// A resolver failed. `cause` is the domain fault it raised, if any.
  DataFetching { cause: Option<Fault> },

  /// The engine could not coerce an input value into its declared type.
  ///
  /// `variable` holds the offending variable when the engine exposes it;
  /// otherwise the name is recovered from the message.
  Coercion { variable: Option<String> },

  /// Any other engine failure (syntax, unknown field, ...).
  Other,
}

/// A failure as produced by the engine, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawError {
  pub message: String,
  pub locations: Vec<SourceLocation>,
  pub path: Vec<PathSegment>,
  pub kind: RawErrorKind,
}

impl RawError {
  /// A resolver failure carrying a domain fault.
  pub fn data_fetching(
    message: impl Into<String>,
    locations: Vec<SourceLocation>,
    cause: Option<Fault>,
  ) -> Self {
    Self {
      message: message.into(),
      locations,
      path: Vec::new(),
      kind: RawErrorKind::DataFetching { cause },
    }
  }

  /// An input coercion failure whose variable name is only in the message.
  pub fn coercion(message: impl Into<String>, locations: Vec<SourceLocation>) -> Self {
    Self {
      message: message.into(),
      locations,
      path: Vec::new(),
      kind: RawErrorKind::Coercion { variable: None },
    }
  }

  /// An unclassified engine failure.
  pub fn other(message: impl Into<String>, locations: Vec<SourceLocation>) -> Self {
    Self {
      message: message.into(),
      locations,
      path: Vec::new(),
      kind: RawErrorKind::Other,
    }
  }

  /// Attach the response path.
  pub fn with_path(mut self, path: Vec<PathSegment>) -> Self {
    self.path = path;
    self
  }
}

/// Application-level status attached to a normalized error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
  BadRequest,
  NotFound,
  UnprocessableEntity,
}

impl ErrorCode {
  /// The HTTP status number clients see in `extensions.errorCode`.
  pub fn as_u16(self) -> u16 {
    match self {
      Self::BadRequest => 400,
      Self::NotFound => 404,
      Self::UnprocessableEntity => 422,
    }
  }
}

impl fmt::Display for ErrorCode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_u16())
  }
}

impl Serialize for ErrorCode {
  fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u16(self.as_u16())
  }
}

/// The client-facing error shape.
///
/// `error_code` is `None` only for errors passed through unclassified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedError {
  pub message: String,
  pub locations: Vec<SourceLocation>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub path: Vec<PathSegment>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error_code: Option<ErrorCode>,
}

impl NormalizedError {
  /// A classified error with a status code.
  pub fn classified(
    message: impl Into<String>,
    locations: Vec<SourceLocation>,
    path: Vec<PathSegment>,
    error_code: ErrorCode,
  ) -> Self {
    Self {
      message: message.into(),
      locations,
      path,
      error_code: Some(error_code),
    }
  }

  /// The raw error's message, locations and path, with no status code.
  pub fn passthrough(
    message: String,
    locations: Vec<SourceLocation>,
    path: Vec<PathSegment>,
  ) -> Self {
    Self {
      message,
      locations,
      path,
      error_code: None,
    }
  }
}
