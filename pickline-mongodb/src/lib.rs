//! MongoDB backend implementation for pickline.
//!
//! Persists documents in MongoDB and executes the shared predicate set with
//! MongoDB's query engine.
//!
//! To use this backend, include the `mongodb` feature of the facade crate:
//!
//! ```toml
//! [dependencies]
//! pickline = { version = "x.y.z", features = ["mongodb"] }
//! ```
//!
//! # Connection
//!
//! The builder takes a connection string and a database name. Building parses the
//! connection string and creates the client; the driver connects lazily on the first
//! operation.
//!
//! # Example
//!
//! ```ignore
//! use pickline::{backend::StoreBackendBuilder, mongodb::MongoDbStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = MongoDbStore::builder("mongodb://localhost:27017", "pickline")
//!         .build()
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

pub mod store;
pub mod query;
pub mod sanitizer;

pub use store::{MongoDbStore, MongoDbStoreBuilder};
