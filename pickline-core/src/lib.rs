//! Storage layer for the pickline content API.
//!
//! This crate defines the pieces every storage backend and the HTTP service share:
//!
//! - **Document traits** ([`document`]) - Entity records and their BSON/JSON conversion
//! - **Store backend abstraction** ([`backend`]) - Traits implemented by the memory and MongoDB backends
//! - **Query and filtering API** ([`query`]) - A closed set of typed predicates joined by AND
//! - **Collections interface** ([`collection`]) - Handles scoped to one named collection
//! - **Document store** ([`store`]) - Owned store wrapping a backend, static or dynamically dispatched
//! - **Error handling** ([`error`]) - Error and result types shared by every backend
//!
//! # Example
//!
//! ```ignore
//! use pickline_core::document::Document;
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! pub struct Subscription {
//!     pub email: String,
//! }
//!
//! impl Document for Subscription {
//!     fn collection_name() -> &'static str {
//!         "subscription"
//!     }
//! }
//! ```

pub mod backend;
pub mod collection;
pub mod document;
pub mod error;
pub mod query;
pub mod store;
