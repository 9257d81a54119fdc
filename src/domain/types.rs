//! Strongly-typed value objects used by the catalog filters.
//!
//! These wrappers enforce basic invariants (trimmed non-empty identifiers,
//! finite non-negative prices) so that once a value reaches a
//! [`FilterState`](crate::domain::filter::FilterState) it can be serialized to
//! the URL and parsed back without loss.
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// `all` is the "no filter" sentinel and cannot name a category or color.
    #[error("`all` is reserved")]
    ReservedToken,
    /// Provided price was negative, NaN or infinite.
    #[error("invalid price: {0}")]
    InvalidPrice(String),
}

/// Sentinel used by selection filters for "no filter".
pub const ALL: &str = "all";

/// Trimmed, non-empty identifier of a category or color.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct FilterToken(String);

impl FilterToken {
    /// Trims whitespace and rejects empty inputs and the `all` sentinel.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        if trimmed == ALL {
            return Err(TypeConstraintError::ReservedToken);
        }
        Ok(Self(trimmed))
    }

    /// Borrow the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper returning the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for FilterToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Deref for FilterToken {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl TryFrom<String> for FilterToken {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for FilterToken {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FilterToken> for String {
    fn from(value: FilterToken) -> Self {
        value.0
    }
}

/// Finite, non-negative price.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, PartialOrd)]
#[serde(try_from = "f64", into = "f64")]
pub struct Price(f64);

impl Price {
    /// Validates that the value is finite and not negative.
    pub fn new(value: f64) -> Result<Self, TypeConstraintError> {
        if value.is_finite() && value >= 0.0 {
            // Normalize -0.0 so that it prints as "0".
            Ok(Self(value + 0.0))
        } else {
            Err(TypeConstraintError::InvalidPrice(value.to_string()))
        }
    }

    /// Returns the raw `f64` backing this price.
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl Display for Price {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Price {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<f64>()
            .map_err(|_| TypeConstraintError::InvalidPrice(s.to_string()))?;
        Self::new(value)
    }
}

impl TryFrom<f64> for Price {
    type Error = TypeConstraintError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Price> for f64 {
    fn from(value: Price) -> Self {
        value.0
    }
}
