//! In-memory document storage backend for pickline.
//!
//! A thread-safe implementation of the `StoreBackend` trait, used for local development
//! (`--store memory`) and as the substitute store in tests.
//!
//! # Features
//!
//! - **Thread-safe access** - Concurrent reads and writes using async-aware RwLock
//! - **Insertion order** - Queries return documents in the order they were inserted
//! - **Same filter semantics** - Evaluates the shared predicate set the MongoDB backend translates
//!
//! # Quick Start
//!
//! ```ignore
//! use pickline_core::store::{DocumentStore, IntoDynDocumentStore};
//! use pickline_memory::InMemoryStore;
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = DocumentStore::new(InMemoryStore::new()).into_dyn();
//!     let blogs = store.collection("blog");
//! }
//! ```

pub mod store;
pub mod evaluator;

pub use store::InMemoryStore;
