//! HTTP API for a sports prediction content site.
//!
//! Every endpoint is one validated insert or one filtered read against a single
//! collection, served through a [`Gateway`](gateway::Gateway) that may run without a
//! store at all.

pub mod config;
pub mod error;
pub mod extract;
pub mod fallback;
pub mod filter;
pub mod gateway;
pub mod routes;
pub mod schema;
pub mod shape;
pub mod telemetry;
pub mod validate;
