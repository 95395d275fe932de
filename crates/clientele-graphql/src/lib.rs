//! Clientele GraphQL
//!
//! The GraphQL entry points for customers and the error normalizer that runs
//! over every response.
//!
//! # Request lifecycle
//!
//! ```text
//! Request ──▶ engine (parse, validate, resolve) ──▶ Response
//!                                                     │ errors: Vec<ServerError>
//!                                                     ▼
//!                                       RawError (classified once)
//!                                                     │ normalize()
//!                                                     ▼
//!                                       NormalizedError ──▶ ServerError
//! ```
//!
//! Resolvers attach a [`clientele_service::Fault`] to the errors they raise.
//! [`execute`] runs the engine, classifies each [`async_graphql::ServerError`]
//! into a [`RawError`] and replaces the response errors with the output of
//! [`normalize`]:
//!
//! | Raw error | Output | `extensions.errorCode` |
//! |-----------|--------|------------------------|
//! | validation fault with *k* violations | *k* errors, one per violation | 400 |
//! | not-found fault | 1 error | 404 |
//! | unprocessable fault | 1 error | 422 |
//! | input coercion failure on variable `x` | `Field x has an invalid format.` | 400 |
//! | anything else | unchanged | none |

mod coercion;
mod engine;
mod error;
mod normalize;
mod schema;
mod types;

pub use coercion::offending_variable;
pub use engine::execute;
pub use error::{ErrorCode, NormalizedError, PathSegment, RawError, RawErrorKind, SourceLocation};
pub use normalize::normalize;
pub use schema::{CustomerSchema, MutationRoot, QueryRoot, build_schema};
pub use types::{
  CreateCustomerInput, CustomerObject, DATE_FORMAT, Date, PartiallyUpdateCustomerInput,
  UpdateCustomerInput,
};
