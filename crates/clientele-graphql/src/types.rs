//! GraphQL object, input and scalar types.

use async_graphql::{
  InputObject, InputValueError, InputValueResult, Scalar, ScalarType, SimpleObject, Value,
};
use chrono::NaiveDate;
use clientele_service::{
  CreateCustomerRequest, Customer, PartiallyUpdateCustomerRequest, UpdateCustomerRequest,
};

/// Wire format of the `Date` scalar (`yyyy-MM-dd`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A calendar date without time zone, written `yyyy-MM-dd`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Date(pub NaiveDate);

#[Scalar(name = "Date")]
impl ScalarType for Date {
  fn parse(value: Value) -> InputValueResult<Self> {
    match &value {
      Value::String(text) => NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map(Date)
        .map_err(|_| InputValueError::custom(format!("\"{text}\" is not a yyyy-MM-dd date"))),
      _ => Err(InputValueError::expected_type(value)),
    }
  }

  fn is_valid(value: &Value) -> bool {
    matches!(value, Value::String(text) if NaiveDate::parse_from_str(text, DATE_FORMAT).is_ok())
  }

  fn to_value(&self) -> Value {
    Value::String(self.0.format(DATE_FORMAT).to_string())
  }
}

/// A customer.
#[derive(Debug, Clone, PartialEq, Eq, SimpleObject)]
#[graphql(name = "Customer")]
pub struct CustomerObject {
  pub id: String,
  pub full_name: String,
  pub phone_number: String,
  pub address: String,
  pub created_at: Date,
}

impl From<Customer> for CustomerObject {
  fn from(customer: Customer) -> Self {
    Self {
      id: customer.id,
      full_name: customer.full_name,
      phone_number: customer.phone_number,
      address: customer.address,
      created_at: Date(customer.created_at),
    }
  }
}

// Input fields are nullable so missing values reach validation instead of
// being rejected by the engine.

#[derive(Debug, Clone, Default, InputObject)]
#[graphql(name = "CreateCustomerRequest")]
pub struct CreateCustomerInput {
  pub full_name: Option<String>,
  pub phone_number: Option<String>,
  pub address: Option<String>,
}

#[derive(Debug, Clone, Default, InputObject)]
#[graphql(name = "UpdateCustomerRequest")]
pub struct UpdateCustomerInput {
  pub full_name: Option<String>,
  pub phone_number: Option<String>,
  pub address: Option<String>,
}

#[derive(Debug, Clone, Default, InputObject)]
#[graphql(name = "PartiallyUpdateCustomerRequest")]
pub struct PartiallyUpdateCustomerInput {
  pub full_name: Option<String>,
  pub phone_number: Option<String>,
  pub address: Option<String>,
}

impl From<CreateCustomerInput> for CreateCustomerRequest {
  fn from(input: CreateCustomerInput) -> Self {
    Self {
      full_name: input.full_name,
      phone_number: input.phone_number,
      address: input.address,
    }
  }
}

impl From<UpdateCustomerInput> for UpdateCustomerRequest {
  fn from(input: UpdateCustomerInput) -> Self {
    Self {
      full_name: input.full_name,
      phone_number: input.phone_number,
      address: input.address,
    }
  }
}

impl From<PartiallyUpdateCustomerInput> for PartiallyUpdateCustomerRequest {
  fn from(input: PartiallyUpdateCustomerInput) -> Self {
    Self {
      full_name: input.full_name,
      phone_number: input.phone_number,
      address: input.address,
    }
  }
}
