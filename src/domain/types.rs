//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (non-empty product references,
//! positive quantities) so that once a value reaches the domain layer it can
//! be treated as trusted.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided quantity is zero.
    #[error("quantity must be greater than zero")]
    ZeroQuantity,
}

/// Opaque catalog identifier assigned by the product table store.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ProductId(String);

impl ProductId {
    /// Constructs a trimmed, non-empty identifier.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(trimmed))
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ProductId {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for ProductId {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProductId> for String {
    fn from(value: ProductId) -> Self {
        value.0
    }
}

/// Ordered quantity, always at least one.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quantity(u32);

impl Quantity {
    /// Creates a quantity ensuring it is greater than zero.
    pub fn new(value: u32) -> Result<Self, TypeConstraintError> {
        if value > 0 {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::ZeroQuantity)
        }
    }

    /// Returns the raw `u32` backing this quantity.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Display for Quantity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for Quantity {
    type Error = TypeConstraintError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for u32 {
    fn from(value: Quantity) -> Self {
        value.0
    }
}

/// Which of the two catalog price points an order (or a single line) uses.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PriceTier {
    #[serde(rename = "price1")]
    Price1,
    #[serde(rename = "price2")]
    Price2,
}

impl PriceTier {
    /// Label used in order summaries and the rendered document.
    pub const fn label(self) -> &'static str {
        match self {
            PriceTier::Price1 => "Precio 1",
            PriceTier::Price2 => "Precio 2",
        }
    }
}

impl Display for PriceTier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_id_rejects_blank_input() {
        assert_eq!(
            ProductId::new("   "),
            Err(TypeConstraintError::EmptyString)
        );
        assert_eq!(ProductId::new(" rec1 ").unwrap().as_str(), "rec1");
    }

    #[test]
    fn quantity_must_be_positive() {
        assert_eq!(Quantity::new(0), Err(TypeConstraintError::ZeroQuantity));
        assert_eq!(Quantity::new(3).unwrap().get(), 3);
    }

    #[test]
    fn price_tier_serde_uses_wire_names() {
        assert_eq!(
            serde_json::to_string(&PriceTier::Price1).unwrap(),
            "\"price1\""
        );
        let tier: PriceTier = serde_json::from_str("\"price2\"").unwrap();
        assert_eq!(tier, PriceTier::Price2);
    }
}
