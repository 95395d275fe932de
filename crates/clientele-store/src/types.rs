use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A customer as stored in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
  pub id: String,
  pub full_name: String,
  pub phone_number: String,
  pub address: String,
  pub created_at: NaiveDate,
}

/// Equality filter for listing customers. `None` fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerFilter {
  pub full_name: Option<String>,
  pub phone_number: Option<String>,
  pub created_at: Option<NaiveDate>,
}

impl CustomerFilter {
  /// True when no field constrains the result.
  pub fn is_empty(&self) -> bool {
    self.full_name.is_none() && self.phone_number.is_none() && self.created_at.is_none()
  }
}
