//! Clientele HTTP
//!
//! Axum router exposing the customer service twice: as REST resources under
//! `/v1/customers` and as the GraphQL endpoint at `/graphql`.

mod error;
mod routes;

pub use error::{ApiError, ErrorBody};
pub use routes::{AppState, CustomerQuery, JsonBody, router};
