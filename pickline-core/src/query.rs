//! Query construction and filtering API for document stores.
//!
//! Filters are a closed set of typed predicates combined conjunctively. Backends
//! consume them through [`QueryVisitor`], so every backend supports exactly the same
//! operations and nothing else.
//!
//! # Query Building
//!
//! ```ignore
//! use pickline_core::query::{Filter, Query};
//!
//! let query = Query::builder()
//!     .filter(
//!         Filter::all()
//!             .eq("league", "Serie A")
//!             .starts_with("kickoff_iso", "2024-03-05")
//!             .range("odds", Some(1.5), None::<f64>),
//!     )
//!     .limit(20)
//!     .build();
//! ```
//!
//! # Predicates
//!
//! - [`Predicate::Eq`]: exact match on a field value
//! - [`Predicate::StartsWith`]: case-sensitive string prefix match
//! - [`Predicate::Range`]: inclusive lower and/or upper bound

use bson::Bson;

use crate::error::DocumentStoreError;

/// A single field-level condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Field equals the value exactly.
    Eq {
        /// The field name to compare.
        field: String,
        /// The value to compare against.
        value: Bson,
    },
    /// String field starts with the prefix. Case-sensitive, no pattern syntax.
    StartsWith {
        /// The field name to compare.
        field: String,
        /// The literal prefix.
        prefix: String,
    },
    /// Field lies within inclusive bounds. At least one bound is present.
    Range {
        /// The field name to compare.
        field: String,
        /// Inclusive lower bound.
        min: Option<Bson>,
        /// Inclusive upper bound.
        max: Option<Bson>,
    },
}

impl Predicate {
    /// Returns the field this predicate applies to.
    pub fn field(&self) -> &str {
        match self {
            Predicate::Eq { field, .. }
            | Predicate::StartsWith { field, .. }
            | Predicate::Range { field, .. } => field,
        }
    }
}

/// A conjunction of predicates. An empty filter matches every document.
///
/// # Example
///
/// ```ignore
/// use pickline_core::query::Filter;
///
/// let filter = Filter::all()
///     .eq("league", "Serie A")
///     .range("confidence", Some(60), Some(80));
/// assert_eq!(filter.predicates().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    predicates: Vec<Predicate>,
}

impl Filter {
    /// Creates a filter that matches every document.
    pub fn all() -> Self {
        Self::default()
    }

    /// Adds an arbitrary predicate to the conjunction.
    pub fn and(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Adds an equality predicate.
    pub fn eq(self, field: impl Into<String>, value: impl Into<Bson>) -> Self {
        self.and(Predicate::Eq {
            field: field.into(),
            value: value.into(),
        })
    }

    /// Adds a string prefix predicate.
    pub fn starts_with(self, field: impl Into<String>, prefix: impl Into<String>) -> Self {
        self.and(Predicate::StartsWith {
            field: field.into(),
            prefix: prefix.into(),
        })
    }

    /// Adds an inclusive range predicate.
    ///
    /// When both bounds are `None` the filter is returned unchanged.
    pub fn range<T: Into<Bson>>(
        self,
        field: impl Into<String>,
        min: Option<T>,
        max: Option<T>,
    ) -> Self {
        if min.is_none() && max.is_none() {
            return self;
        }

        self.and(Predicate::Range {
            field: field.into(),
            min: min.map(Into::into),
            max: max.map(Into::into),
        })
    }

    /// Returns the predicates in insertion order.
    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// Returns `true` if the filter has no predicates.
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

/// A structured query for retrieving documents from one collection.
///
/// Use [`QueryBuilder`] for ergonomic construction.
#[derive(Debug, Clone, Default)]
pub struct Query {
    /// Conjunction of predicates documents must satisfy.
    pub filter: Filter,
    /// Maximum number of documents to return. `None` means unbounded.
    pub limit: Option<usize>,
}

impl Query {
    /// Creates a new query matching every document with no limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new query builder for fluent construction.
    pub fn builder() -> QueryBuilder {
        QueryBuilder::new()
    }
}

#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    query: Query,
}

impl QueryBuilder {
    /// Creates a new query builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the filter for this query.
    pub fn filter(mut self, filter: Filter) -> Self {
        self.query.filter = filter;
        self
    }

    /// Sets the maximum number of documents to return.
    pub fn limit(mut self, limit: usize) -> Self {
        self.query.limit = Some(limit);
        self
    }

    /// Sets or clears the maximum number of documents to return.
    pub fn maybe_limit(mut self, limit: Option<usize>) -> Self {
        self.query.limit = limit;
        self
    }

    /// Builds and returns the final query.
    pub fn build(self) -> Query {
        self.query
    }
}

/// Walks a [`Filter`], producing a backend-specific output.
///
/// Implementors decide how per-predicate outputs combine in [`visit_filter`](Self::visit_filter).
pub trait QueryVisitor {
    type Output;
    type Error: Into<DocumentStoreError>;

    fn visit_filter(&mut self, filter: &Filter) -> Result<Self::Output, Self::Error>;
    fn visit_eq(&mut self, field: &str, value: &Bson) -> Result<Self::Output, Self::Error>;
    fn visit_starts_with(&mut self, field: &str, prefix: &str) -> Result<Self::Output, Self::Error>;
    fn visit_range(
        &mut self,
        field: &str,
        min: Option<&Bson>,
        max: Option<&Bson>,
    ) -> Result<Self::Output, Self::Error>;

    fn visit_predicate(&mut self, predicate: &Predicate) -> Result<Self::Output, Self::Error> {
        match predicate {
            Predicate::Eq { field, value } => self.visit_eq(field, value),
            Predicate::StartsWith { field, prefix } => self.visit_starts_with(field, prefix),
            Predicate::Range { field, min, max } => {
                self.visit_range(field, min.as_ref(), max.as_ref())
            }
        }
    }
}
