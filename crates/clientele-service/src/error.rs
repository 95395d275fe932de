//! Fault and service error types.

use clientele_store::StoreError;
use thiserror::Error;

/// A single failed validation rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
  /// Wire name of the offending field, e.g. `fullName`.
  pub field: String,
  /// Client-facing message template.
  pub message: String,
}

impl Violation {
  pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
    Self {
      field: field.into(),
      message: message.into(),
    }
  }
}

/// The request failed one or more validation rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("request has {} invalid field(s)", .violations.len())]
pub struct ValidationFault {
  pub violations: Vec<Violation>,
}

impl ValidationFault {
  pub fn new(violations: Vec<Violation>) -> Self {
    Self { violations }
  }
}

/// A business-rule failure raised by the service layer.
///
/// The variant is decided where the fault is raised, so consumers
/// pattern-match instead of inspecting error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Fault {
  /// The request failed field validation.
  #[error(transparent)]
  Validation(#[from] ValidationFault),

  /// The referenced customer does not exist.
  #[error("{message}")]
  NotFound { message: String },

  /// The request is well-formed but violates a business rule.
  #[error("{message}")]
  Unprocessable { message: String },
}

impl Fault {
  /// Create a not-found fault.
  pub fn not_found(message: impl Into<String>) -> Self {
    Self::NotFound {
      message: message.into(),
    }
  }

  /// Create an unprocessable fault.
  pub fn unprocessable(message: impl Into<String>) -> Self {
    Self::Unprocessable {
      message: message.into(),
    }
  }
}

/// Errors returned by [`crate::CustomerService`] operations.
#[derive(Debug, Error)]
pub enum ServiceError {
  /// A business-rule failure the client can act on.
  #[error(transparent)]
  Fault(#[from] Fault),

  /// The store failed.
  #[error("store error: {0}")]
  Store(#[from] StoreError),
}

impl From<ValidationFault> for ServiceError {
  fn from(fault: ValidationFault) -> Self {
    Self::Fault(Fault::Validation(fault))
  }
}
