//! Clientele Store
//!
//! This crate provides the storage trait and the SQLite implementation for
//! customer records.
//!
//! The [`CustomerStore`] trait defines operations for:
//! - Inserting, updating and deleting customers
//! - Looking a customer up by id or phone number
//! - Listing customers, optionally narrowed by a [`CustomerFilter`]

mod sqlite;
mod types;

pub use sqlite::SqliteStore;
pub use types::{Customer, CustomerFilter};

use async_trait::async_trait;

/// Error type for storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
  /// A database error occurred.
  #[error("database error: {0}")]
  Database(#[from] sqlx::Error),

  /// Applying the schema migrations failed.
  #[error("migration error: {0}")]
  Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Storage trait for customers.
#[async_trait]
pub trait CustomerStore: Send + Sync {
  /// Insert a new customer.
  async fn insert(&self, customer: &Customer) -> Result<(), StoreError>;

  /// Get a customer by ID.
  async fn get(&self, customer_id: &str) -> Result<Option<Customer>, StoreError>;

  /// Get the customer registered with a phone number.
  async fn find_by_phone_number(
    &self,
    phone_number: &str,
  ) -> Result<Option<Customer>, StoreError>;

  /// Overwrite the mutable fields of a customer.
  ///
  /// Returns `false` when no customer has the given ID.
  async fn update(&self, customer: &Customer) -> Result<bool, StoreError>;

  /// Delete a customer by ID.
  ///
  /// Returns `false` when no customer has the given ID.
  async fn delete(&self, customer_id: &str) -> Result<bool, StoreError>;

  /// List every customer.
  async fn list(&self) -> Result<Vec<Customer>, StoreError>;

  /// List the customers matching every field set on the filter.
  async fn list_filtered(&self, filter: &CustomerFilter) -> Result<Vec<Customer>, StoreError>;
}
