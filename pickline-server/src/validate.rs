//! Field-level payload validation.
//!
//! Serde enforces presence, types and closed literal sets while deserializing; the
//! [`Validate`] trait covers the numeric bounds serde cannot express. A payload only
//! reaches the store wrapped in [`Validated`].

use std::ops::Deref;

use serde::Serialize;
use thiserror::Error;

/// One rejected field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Every problem found in one payload.
#[derive(Debug, Clone, Default, PartialEq, Error, Serialize)]
#[error("{} invalid field(s)", .0.len())]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    /// A single error, typically a deserialization failure.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.push(field, message);
        errors
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|error| error.field.as_str())
    }

    /// `Ok(())` when nothing was pushed.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

/// Constraints checked after a payload deserialized successfully.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

/// A value whose [`Validate`] check passed.
#[derive(Debug, Clone)]
pub struct Validated<T>(T);

impl<T: Validate> Validated<T> {
    pub fn new(value: T) -> Result<Self, ValidationErrors> {
        value.validate()?;
        Ok(Self(value))
    }
}

impl<T> Deref for Validated<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}
