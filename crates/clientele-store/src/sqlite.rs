use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use tracing::debug;

use crate::{Customer, CustomerFilter, CustomerStore, StoreError};

/// SQLite-based store implementation.
#[derive(Debug, Clone)]
pub struct SqliteStore {
  pool: SqlitePool,
}

impl SqliteStore {
  /// Create a new SQLite store with the given connection pool.
  pub fn new(pool: SqlitePool) -> Self {
    Self { pool }
  }

  /// Connect to the database at `database_url`.
  pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
    let pool = SqlitePool::connect(database_url).await?;
    Ok(Self::new(pool))
  }

  /// Open a private in-memory database.
  ///
  /// The pool is capped at one connection: every SQLite `:memory:`
  /// connection is a separate database.
  pub async fn in_memory() -> Result<Self, StoreError> {
    let pool = SqlitePoolOptions::new()
      .max_connections(1)
      .connect("sqlite::memory:")
      .await?;
    Ok(Self::new(pool))
  }

  /// Run database migrations.
  pub async fn migrate(&self) -> Result<(), StoreError> {
    sqlx::migrate!("../../migrations").run(&self.pool).await?;
    Ok(())
  }
}

#[async_trait]
impl CustomerStore for SqliteStore {
  async fn insert(&self, customer: &Customer) -> Result<(), StoreError> {
    sqlx::query(
      r#"
            INSERT INTO customers (id, full_name, phone_number, address, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
    )
    .bind(&customer.id)
    .bind(&customer.full_name)
    .bind(&customer.phone_number)
    .bind(&customer.address)
    .bind(customer.created_at)
    .execute(&self.pool)
    .await?;

    debug!(customer_id = %customer.id, "customer_inserted");
    Ok(())
  }

  async fn get(&self, customer_id: &str) -> Result<Option<Customer>, StoreError> {
    let customer = sqlx::query_as(
      r#"
            SELECT id, full_name, phone_number, address, created_at
            FROM customers
            WHERE id = ?
            "#,
    )
    .bind(customer_id)
    .fetch_optional(&self.pool)
    .await?;

    Ok(customer)
  }

  async fn find_by_phone_number(
    &self,
    phone_number: &str,
  ) -> Result<Option<Customer>, StoreError> {
    let customer = sqlx::query_as(
      r#"
            SELECT id, full_name, phone_number, address, created_at
            FROM customers
            WHERE phone_number = ?
            "#,
    )
    .bind(phone_number)
    .fetch_optional(&self.pool)
    .await?;

    Ok(customer)
  }

  async fn update(&self, customer: &Customer) -> Result<bool, StoreError> {
    let result = sqlx::query(
      r#"
            UPDATE customers
            SET full_name = ?, phone_number = ?, address = ?
            WHERE id = ?
            "#,
    )
    .bind(&customer.full_name)
    .bind(&customer.phone_number)
    .bind(&customer.address)
    .bind(&customer.id)
    .execute(&self.pool)
    .await?;

    Ok(result.rows_affected() > 0)
  }

  async fn delete(&self, customer_id: &str) -> Result<bool, StoreError> {
    let result = sqlx::query("DELETE FROM customers WHERE id = ?")
      .bind(customer_id)
      .execute(&self.pool)
      .await?;

    Ok(result.rows_affected() > 0)
  }

  async fn list(&self) -> Result<Vec<Customer>, StoreError> {
    let customers = sqlx::query_as(
      r#"
            SELECT id, full_name, phone_number, address, created_at
            FROM customers
            ORDER BY created_at ASC, id ASC
            "#,
    )
    .fetch_all(&self.pool)
    .await?;

    Ok(customers)
  }

  async fn list_filtered(&self, filter: &CustomerFilter) -> Result<Vec<Customer>, StoreError> {
    if filter.is_empty() {
      return self.list().await;
    }

    // Each optional field is bound twice: once for the NULL check, once for the match.
    let customers = sqlx::query_as(
      r#"
            SELECT id, full_name, phone_number, address, created_at
            FROM customers
            WHERE (? IS NULL OR full_name = ?)
              AND (? IS NULL OR phone_number = ?)
              AND (? IS NULL OR created_at = ?)
            ORDER BY created_at ASC, id ASC
            "#,
    )
    .bind(&filter.full_name)
    .bind(&filter.full_name)
    .bind(&filter.phone_number)
    .bind(&filter.phone_number)
    .bind(filter.created_at)
    .bind(filter.created_at)
    .fetch_all(&self.pool)
    .await?;

    Ok(customers)
  }
}
