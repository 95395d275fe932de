//! Request DTOs and their validation.
//!
//! Every DTO field is optional on the wire so a missing value reaches
//! validation and is reported as a [`Violation`] rather than being rejected
//! by the transport. Validation consumes the DTO and yields the checked value
//! the service operates on.

use serde::{Deserialize, Serialize};

use crate::error::{ValidationFault, Violation};

const FULL_NAME: &str = "fullName";
const PHONE_NUMBER: &str = "phoneNumber";
const ADDRESS: &str = "address";

/// Body of a create-customer request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerRequest {
  pub full_name: Option<String>,
  pub phone_number: Option<String>,
  pub address: Option<String>,
}

/// Body of a full update request. Every field is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerRequest {
  pub full_name: Option<String>,
  pub phone_number: Option<String>,
  pub address: Option<String>,
}

/// Body of a partial update request. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartiallyUpdateCustomerRequest {
  pub full_name: Option<String>,
  pub phone_number: Option<String>,
  pub address: Option<String>,
}

/// Validated customer fields for create and full update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
  pub full_name: String,
  pub phone_number: String,
  pub address: String,
}

/// Validated partial update. `None` means "keep the stored value".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerPatch {
  pub full_name: Option<String>,
  pub phone_number: Option<String>,
  pub address: Option<String>,
}

impl CreateCustomerRequest {
  /// Check the request, reporting every violation at once.
  pub fn validate(self) -> Result<NewCustomer, ValidationFault> {
    validate_required(self.full_name, self.phone_number, self.address)
  }
}

impl UpdateCustomerRequest {
  /// Check the request, reporting every violation at once.
  pub fn validate(self) -> Result<NewCustomer, ValidationFault> {
    validate_required(self.full_name, self.phone_number, self.address)
  }
}

impl PartiallyUpdateCustomerRequest {
  /// Check the request. Present fields must not be blank.
  pub fn validate(self) -> Result<CustomerPatch, ValidationFault> {
    let mut violations = Vec::new();
    let full_name = optional(&mut violations, FULL_NAME, self.full_name);
    let phone_number = optional(&mut violations, PHONE_NUMBER, self.phone_number);
    let address = optional(&mut violations, ADDRESS, self.address);

    if !violations.is_empty() {
      return Err(ValidationFault::new(violations));
    }

    Ok(CustomerPatch {
      full_name,
      phone_number,
      address,
    })
  }
}

impl CustomerPatch {
  /// True when the patch changes nothing.
  pub fn is_empty(&self) -> bool {
    self.full_name.is_none() && self.phone_number.is_none() && self.address.is_none()
  }
}

fn validate_required(
  full_name: Option<String>,
  phone_number: Option<String>,
  address: Option<String>,
) -> Result<NewCustomer, ValidationFault> {
  let mut violations = Vec::new();
  let full_name = required(&mut violations, FULL_NAME, full_name);
  let phone_number = required(&mut violations, PHONE_NUMBER, phone_number);
  let address = required(&mut violations, ADDRESS, address);

  match (full_name, phone_number, address) {
    (Some(full_name), Some(phone_number), Some(address)) if violations.is_empty() => {
      Ok(NewCustomer {
        full_name,
        phone_number,
        address,
      })
    }
    _ => Err(ValidationFault::new(violations)),
  }
}

fn required(violations: &mut Vec<Violation>, field: &str, value: Option<String>) -> Option<String> {
  match value {
    None => {
      violations.push(Violation::new(field, format!("Field {field} cannot be null")));
      None
    }
    Some(value) => optional(violations, field, Some(value)),
  }
}

fn optional(violations: &mut Vec<Violation>, field: &str, value: Option<String>) -> Option<String> {
  let value = value?;
  if value.trim().is_empty() {
    violations.push(Violation::new(field, format!("Field {field} cannot be blank")));
    return None;
  }
  Some(value)
}
