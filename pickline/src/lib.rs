//! Storage entry point for the pickline content API.
//!
//! Re-exports the core storage types and the available backends so the service
//! depends on a single crate.
//!
//! # Quick Start
//!
//! ```ignore
//! use pickline::{prelude::*, memory::InMemoryStore};
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = DocumentStore::new(InMemoryStore::new()).into_dyn();
//!
//!     let items = store
//!         .collection("prediction")
//!         .query(
//!             Query::builder()
//!                 .filter(Filter::all().eq("league", "Serie A"))
//!                 .limit(20)
//!                 .build(),
//!         )
//!         .await
//!         .unwrap();
//!
//!     println!("{} predictions", items.len());
//!     store.shutdown().await.unwrap();
//! }
//! ```
//!
//! # Backends
//!
//! - [`memory`] - In-memory storage for development and testing
//! - [`mongodb`] - Persistent MongoDB backend (requires `mongodb` feature)

pub mod prelude;

pub use pickline_core::{collection, document, store, backend, query, error};

// Re-export BSON types for convenience
pub use bson;

/// In-memory storage backend implementations.
pub mod memory {
    pub use pickline_memory::InMemoryStore;
}

/// MongoDB storage backend implementations.
///
/// This module is only available when the `mongodb` feature is enabled.
#[cfg(feature = "mongodb")]
pub mod mongodb {
    pub use pickline_mongodb::{MongoDbStore, MongoDbStoreBuilder};
}
