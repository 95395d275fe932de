//! The customer service.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use clientele_store::{Customer, CustomerFilter, CustomerStore};
use tracing::{info, instrument, warn};

use crate::error::{Fault, ServiceError};
use crate::request::{CustomerPatch, NewCustomer};

const CUSTOMER_NOT_FOUND: &str = "Customer not found";

/// Shared handle to a customer service, as stored in request contexts.
pub type SharedCustomerService = Arc<dyn CustomerService>;

/// Customer operations exposed to the entry points.
///
/// Inputs are already validated; every failure is either a [`Fault`] or a
/// store error.
#[async_trait]
pub trait CustomerService: Send + Sync {
  /// Register a new customer.
  async fn create_customer(&self, customer: NewCustomer) -> Result<Customer, ServiceError>;

  /// Replace every mutable field of an existing customer.
  async fn update_customer(
    &self,
    customer_id: &str,
    customer: NewCustomer,
  ) -> Result<Customer, ServiceError>;

  /// Change only the fields present in the patch.
  async fn partially_update_customer(
    &self,
    customer_id: &str,
    patch: CustomerPatch,
  ) -> Result<Customer, ServiceError>;

  /// Remove a customer.
  async fn delete_customer(&self, customer_id: &str) -> Result<(), ServiceError>;

  /// List every customer.
  async fn get_all_customers(&self) -> Result<Vec<Customer>, ServiceError>;

  /// List the customers matching the filter.
  async fn get_customers_with_filters(
    &self,
    filter: CustomerFilter,
  ) -> Result<Vec<Customer>, ServiceError>;
}

/// [`CustomerService`] backed by a [`CustomerStore`].
pub struct DefaultCustomerService<S> {
  store: S,
}

impl<S: CustomerStore> DefaultCustomerService<S> {
  /// Create a new service over the given store.
  pub fn new(store: S) -> Self {
    Self { store }
  }

  async fn existing(&self, customer_id: &str) -> Result<Customer, ServiceError> {
    self.store.get(customer_id).await?.ok_or_else(|| {
      warn!(customer_id = %customer_id, "customer_not_found");
      Fault::not_found(CUSTOMER_NOT_FOUND).into()
    })
  }

  /// Write `customer`, failing when the row vanished since it was read.
  async fn store_update(&self, customer: &Customer) -> Result<(), ServiceError> {
    if !self.store.update(customer).await? {
      warn!(customer_id = %customer.id, "customer_not_found");
      return Err(Fault::not_found(CUSTOMER_NOT_FOUND).into());
    }
    Ok(())
  }

  /// Fail when `phone_number` belongs to a customer other than `owner_id`.
  async fn ensure_phone_number_free(
    &self,
    phone_number: &str,
    owner_id: Option<&str>,
  ) -> Result<(), ServiceError> {
    match self.store.find_by_phone_number(phone_number).await? {
      Some(holder) if Some(holder.id.as_str()) != owner_id => {
        warn!(phone_number = %phone_number, holder_id = %holder.id, "phone_number_taken");
        Err(
          Fault::unprocessable(format!(
            "Customer with phone number {phone_number} already exists"
          ))
          .into(),
        )
      }
      _ => Ok(()),
    }
  }
}

#[async_trait]
impl<S: CustomerStore> CustomerService for DefaultCustomerService<S> {
  #[instrument(name = "create_customer", skip(self, customer))]
  async fn create_customer(&self, customer: NewCustomer) -> Result<Customer, ServiceError> {
    self
      .ensure_phone_number_free(&customer.phone_number, None)
      .await?;

    let customer = Customer {
      id: uuid::Uuid::new_v4().to_string(),
      full_name: customer.full_name,
      phone_number: customer.phone_number,
      address: customer.address,
      created_at: Utc::now().date_naive(),
    };
    self.store.insert(&customer).await?;

    info!(customer_id = %customer.id, "customer_created");
    Ok(customer)
  }

  #[instrument(name = "update_customer", skip(self, customer))]
  async fn update_customer(
    &self,
    customer_id: &str,
    customer: NewCustomer,
  ) -> Result<Customer, ServiceError> {
    let mut existing = self.existing(customer_id).await?;
    self
      .ensure_phone_number_free(&customer.phone_number, Some(customer_id))
      .await?;

    existing.full_name = customer.full_name;
    existing.phone_number = customer.phone_number;
    existing.address = customer.address;
    self.store_update(&existing).await?;

    info!(customer_id = %customer_id, "customer_updated");
    Ok(existing)
  }

  #[instrument(name = "partially_update_customer", skip(self, patch))]
  async fn partially_update_customer(
    &self,
    customer_id: &str,
    patch: CustomerPatch,
  ) -> Result<Customer, ServiceError> {
    let mut existing = self.existing(customer_id).await?;
    if patch.is_empty() {
      return Ok(existing);
    }

    if let Some(phone_number) = &patch.phone_number {
      self
        .ensure_phone_number_free(phone_number, Some(customer_id))
        .await?;
    }

    if let Some(full_name) = patch.full_name {
      existing.full_name = full_name;
    }
    if let Some(phone_number) = patch.phone_number {
      existing.phone_number = phone_number;
    }
    if let Some(address) = patch.address {
      existing.address = address;
    }
    self.store_update(&existing).await?;

    info!(customer_id = %customer_id, "customer_partially_updated");
    Ok(existing)
  }

  #[instrument(name = "delete_customer", skip(self))]
  async fn delete_customer(&self, customer_id: &str) -> Result<(), ServiceError> {
    if !self.store.delete(customer_id).await? {
      warn!(customer_id = %customer_id, "customer_not_found");
      return Err(Fault::not_found(CUSTOMER_NOT_FOUND).into());
    }

    info!(customer_id = %customer_id, "customer_deleted");
    Ok(())
  }

  async fn get_all_customers(&self) -> Result<Vec<Customer>, ServiceError> {
    Ok(self.store.list().await?)
  }

  #[instrument(name = "get_customers_with_filters", skip(self))]
  async fn get_customers_with_filters(
    &self,
    filter: CustomerFilter,
  ) -> Result<Vec<Customer>, ServiceError> {
    Ok(self.store.list_filtered(&filter).await?)
  }
}
