//! The execution error normalizer.

use clientele_service::{Fault, ValidationFault};
use tracing::{debug, info};

use crate::coercion::offending_variable;
use crate::error::{ErrorCode, NormalizedError, PathSegment, RawError, RawErrorKind, SourceLocation};

/// Rewrite the raw errors of one request into the client-facing error list.
///
/// This is a flat map: each raw error expands to its normalized errors in
/// place, so relative order is preserved. A validation fault with *k*
/// violations yields *k* errors sharing the raw error's locations; every
/// other raw error yields exactly one. Errors that match no known shape are
/// passed through without an error code.
pub fn normalize(raw_errors: Vec<RawError>) -> Vec<NormalizedError> {
  if raw_errors.is_empty() {
    return Vec::new();
  }

  info!(count = raw_errors.len(), "normalizing_errors");
  let normalized: Vec<NormalizedError> = raw_errors.into_iter().flat_map(normalize_one).collect();
  debug!(count = normalized.len(), "errors_normalized");
  normalized
}

fn normalize_one(error: RawError) -> Vec<NormalizedError> {
  let RawError {
    message,
    locations,
    path,
    kind,
  } = error;

  match kind {
    RawErrorKind::DataFetching {
      cause: Some(Fault::Validation(fault)),
    } => {
      debug!(violations = fault.violations.len(), "validation_fault");
      expand_violations(fault, &locations, &path)
    }

    RawErrorKind::DataFetching {
      cause: Some(Fault::NotFound { message }),
    } => {
      debug!("not_found_fault");
      vec![NormalizedError::classified(
        message,
        locations,
        path,
        ErrorCode::NotFound,
      )]
    }

    RawErrorKind::DataFetching {
      cause: Some(Fault::Unprocessable { message }),
    } => {
      debug!("unprocessable_fault");
      vec![NormalizedError::classified(
        message,
        locations,
        path,
        ErrorCode::UnprocessableEntity,
      )]
    }

    RawErrorKind::Coercion { variable } => {
      match variable.or_else(|| offending_variable(&message)) {
        Some(name) => {
          debug!(variable = %name, "coercion_failure");
          vec![NormalizedError::classified(
            format!("Field {name} has an invalid format."),
            locations,
            path,
            ErrorCode::BadRequest,
          )]
        }
        None => {
          debug!(message = %message, "coercion_failure_without_variable");
          vec![NormalizedError::passthrough(message, locations, path)]
        }
      }
    }

    RawErrorKind::DataFetching { cause: None } | RawErrorKind::Other => {
      debug!(message = %message, "unclassified_error");
      vec![NormalizedError::passthrough(message, locations, path)]
    }
  }
}

/// One error per violation, all reported at the raw error's call site.
fn expand_violations(
  fault: ValidationFault,
  locations: &[SourceLocation],
  path: &[PathSegment],
) -> Vec<NormalizedError> {
  fault
    .violations
    .into_iter()
    .map(|violation| {
      NormalizedError::classified(
        violation.message,
        locations.to_vec(),
        path.to_vec(),
        ErrorCode::BadRequest,
      )
    })
    .collect()
}
