//! Query and mutation entry points.
//!
//! Resolvers are thin: validate the request, call the service, and hand
//! failures to the engine. A [`Fault`] travels as the structured source of the
//! engine error so the normalizer can recover it without parsing text.

use async_graphql::{Context, EmptySubscription, Error, Object, Result, Schema};
use clientele_service::{
  CustomerFilter, Fault, ServiceError, SharedCustomerService, ValidationFault,
};
use tracing::error;

use crate::types::{
  CreateCustomerInput, CustomerObject, Date, PartiallyUpdateCustomerInput, UpdateCustomerInput,
};

/// The customer GraphQL schema.
pub type CustomerSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the schema with `service` available to every resolver.
pub fn build_schema(service: SharedCustomerService) -> CustomerSchema {
  Schema::build(QueryRoot, MutationRoot, EmptySubscription)
    .data(service)
    .finish()
}

fn service<'a>(ctx: &Context<'a>) -> Result<&'a SharedCustomerService> {
  ctx.data::<SharedCustomerService>()
}

fn fault_error(fault: Fault) -> Error {
  Error::new_with_source(fault)
}

fn validation_error(fault: ValidationFault) -> Error {
  fault_error(Fault::Validation(fault))
}

fn service_error(err: ServiceError) -> Error {
  match err {
    ServiceError::Fault(fault) => fault_error(fault),
    ServiceError::Store(e) => {
      error!(error = %e, "store_failure");
      Error::new(e.to_string())
    }
  }
}

fn objects(customers: Vec<clientele_service::Customer>) -> Vec<CustomerObject> {
  customers.into_iter().map(CustomerObject::from).collect()
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
  /// Every customer, oldest first.
  async fn all_customers(&self, ctx: &Context<'_>) -> Result<Vec<CustomerObject>> {
    let customers = service(ctx)?
      .get_all_customers()
      .await
      .map_err(service_error)?;
    Ok(objects(customers))
  }

  /// Customers matching every provided filter.
  async fn all_customers_with_filters(
    &self,
    ctx: &Context<'_>,
    full_name: Option<String>,
    phone_number: Option<String>,
    created_at: Option<Date>,
  ) -> Result<Vec<CustomerObject>> {
    let filter = CustomerFilter {
      full_name,
      phone_number,
      created_at: created_at.map(|date| date.0),
    };
    let customers = service(ctx)?
      .get_customers_with_filters(filter)
      .await
      .map_err(service_error)?;
    Ok(objects(customers))
  }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
  async fn create_customer(
    &self,
    ctx: &Context<'_>,
    create_customer_request: CreateCustomerInput,
  ) -> Result<CustomerObject> {
    let request: clientele_service::CreateCustomerRequest = create_customer_request.into();
    let customer = request.validate().map_err(validation_error)?;
    let created = service(ctx)?
      .create_customer(customer)
      .await
      .map_err(service_error)?;
    Ok(created.into())
  }

  async fn update_customer(
    &self,
    ctx: &Context<'_>,
    customer_id: String,
    update_customer_request: UpdateCustomerInput,
  ) -> Result<CustomerObject> {
    let request: clientele_service::UpdateCustomerRequest = update_customer_request.into();
    let customer = request.validate().map_err(validation_error)?;
    let updated = service(ctx)?
      .update_customer(&customer_id, customer)
      .await
      .map_err(service_error)?;
    Ok(updated.into())
  }

  async fn partially_update_customer(
    &self,
    ctx: &Context<'_>,
    customer_id: String,
    partially_update_customer_request: PartiallyUpdateCustomerInput,
  ) -> Result<CustomerObject> {
    let request: clientele_service::PartiallyUpdateCustomerRequest =
      partially_update_customer_request.into();
    let patch = request.validate().map_err(validation_error)?;
    let updated = service(ctx)?
      .partially_update_customer(&customer_id, patch)
      .await
      .map_err(service_error)?;
    Ok(updated.into())
  }

  /// Delete a customer and echo its id.
  async fn delete_customer(&self, ctx: &Context<'_>, customer_id: String) -> Result<String> {
    service(ctx)?
      .delete_customer(&customer_id)
      .await
      .map_err(service_error)?;
    Ok(customer_id)
  }
}
