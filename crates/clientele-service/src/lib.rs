//! Clientele Service
//!
//! The customer service layer. Entry points (GraphQL resolvers, REST
//! handlers) validate the incoming request DTOs into [`NewCustomer`] or
//! [`CustomerPatch`] values and hand those to a [`CustomerService`].
//!
//! Business-rule failures are reported as a [`Fault`], a closed union of the
//! three kinds clients can act on:
//!
//! | Fault | Meaning |
//! |-------|---------|
//! | [`Fault::Validation`] | one or more field violations in the request |
//! | [`Fault::NotFound`] | the referenced customer does not exist |
//! | [`Fault::Unprocessable`] | the request is well-formed but cannot be applied |
//!
//! Storage failures are not faults; they travel as [`ServiceError::Store`].

mod error;
mod request;
mod service;

pub use error::{Fault, ServiceError, ValidationFault, Violation};
pub use request::{
  CreateCustomerRequest, CustomerPatch, NewCustomer, PartiallyUpdateCustomerRequest,
  UpdateCustomerRequest,
};
pub use service::{CustomerService, DefaultCustomerService, SharedCustomerService};

pub use clientele_store::{Customer, CustomerFilter};
