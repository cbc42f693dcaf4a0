//! Store order statuses and validation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Fulfilment status of a store order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Placed,
    Approved,
    Delivered,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Placed => "placed",
            OrderStatus::Approved => "approved",
            OrderStatus::Delivered => "delivered",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "placed" => Ok(OrderStatus::Placed),
            "approved" => Ok(OrderStatus::Approved),
            "delivered" => Ok(OrderStatus::Delivered),
            other => Err(CoreError::Validation(format!(
                "invalid status: {other}. Must be one of: placed, approved, delivered"
            ))),
        }
    }
}

/// An order must be for at least one pet.
pub fn validate_quantity(quantity: i32) -> Result<(), CoreError> {
    if quantity < 1 {
        return Err(CoreError::Validation(
            "quantity must be at least 1".into(),
        ));
    }
    Ok(())
}
