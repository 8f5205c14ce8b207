//! Filter evaluation for in-memory document filtering.
//!
//! Matches the MongoDB backend's semantics: missing fields never match, numbers of any
//! BSON width compare as `f64`, prefixes are case-sensitive.

use std::cmp::Ordering;
use bson::{Bson, datetime::DateTime};

use pickline_core::{
    query::{Filter, QueryVisitor},
    error::{DocumentStoreError, DocumentStoreResult},
};


/// Comparable view over the BSON value kinds a filter can reference.
///
/// All integer and float widths normalize to `f64` so `confidence >= 60` matches an
/// `Int32`, `Int64` or `Double` field alike.
#[derive(Debug)]
pub(crate) enum Comparable<'a> {
    Null,
    Bool(bool),
    Number(f64),
    DateTime(DateTime),
    String(&'a str),
    /// Anything else (arrays, documents, binary). Equal only to itself structurally.
    Other(&'a Bson),
}

impl<'a> From<&'a Bson> for Comparable<'a> {
    fn from(bson: &'a Bson) -> Self {
        match bson {
            Bson::Null => Comparable::Null,
            Bson::Boolean(value) => Comparable::Bool(*value),
            Bson::Int32(value) => Comparable::Number(*value as f64),
            Bson::Int64(value) => Comparable::Number(*value as f64),
            Bson::Double(value) => Comparable::Number(*value),
            Bson::DateTime(value) => Comparable::DateTime(*value),
            Bson::String(value) => Comparable::String(value),
            other => Comparable::Other(other),
        }
    }
}

impl<'a> PartialEq for Comparable<'a> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Comparable::Null, Comparable::Null) => true,
            (Comparable::Bool(a), Comparable::Bool(b)) => a == b,
            (Comparable::Number(a), Comparable::Number(b)) => a == b,
            (Comparable::DateTime(a), Comparable::DateTime(b)) => a == b,
            (Comparable::String(a), Comparable::String(b)) => a == b,
            (Comparable::Other(a), Comparable::Other(b)) => a == b,
            _ => false,
        }
    }
}

impl<'a> PartialOrd for Comparable<'a> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Comparable::Bool(a), Comparable::Bool(b)) => a.partial_cmp(b),
            (Comparable::Number(a), Comparable::Number(b)) => a.partial_cmp(b),
            (Comparable::DateTime(a), Comparable::DateTime(b)) => a.partial_cmp(b),
            (Comparable::String(a), Comparable::String(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}


pub(crate) struct DocumentEvaluator<'a> {
    document: &'a Bson,
}

impl<'a> DocumentEvaluator<'a> {
    pub fn new(document: &'a Bson) -> Self {
        Self { document }
    }

    pub fn evaluate(&mut self, filter: &Filter) -> DocumentStoreResult<bool> {
        self.visit_filter(filter)
    }

    fn field(&self, name: &str) -> DocumentStoreResult<Option<&'a Bson>> {
        self.document
            .as_document()
            .map(|doc| doc.get(name))
            .ok_or_else(|| DocumentStoreError::InvalidDocument("expected document".into()))
    }
}

impl<'a> QueryVisitor for DocumentEvaluator<'a> {
    type Output = bool;
    type Error = DocumentStoreError;

    fn visit_filter(&mut self, filter: &Filter) -> Result<Self::Output, Self::Error> {
        for predicate in filter.predicates() {
            if !self.visit_predicate(predicate)? {
                return Ok(false);
            }
        }

        Ok(true)
    }

    fn visit_eq(&mut self, field: &str, value: &Bson) -> Result<Self::Output, Self::Error> {
        Ok(match self.field(field)? {
            Some(field_value) => Comparable::from(field_value) == Comparable::from(value),
            None => false,
        })
    }

    fn visit_starts_with(&mut self, field: &str, prefix: &str) -> Result<Self::Output, Self::Error> {
        Ok(match self.field(field)? {
            Some(Bson::String(value)) => value.starts_with(prefix),
            _ => false,
        })
    }

    fn visit_range(
        &mut self,
        field: &str,
        min: Option<&Bson>,
        max: Option<&Bson>,
    ) -> Result<Self::Output, Self::Error> {
        let Some(field_value) = self.field(field)? else {
            return Ok(false);
        };
        let value = Comparable::from(field_value);

        let above_min = match min {
            Some(min) => matches!(
                value.partial_cmp(&Comparable::from(min)),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            None => true,
        };
        let below_max = match max {
            Some(max) => matches!(
                value.partial_cmp(&Comparable::from(max)),
                Some(Ordering::Less | Ordering::Equal)
            ),
            None => true,
        };

        Ok(above_min && below_max)
    }
}
