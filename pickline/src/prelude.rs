//! Convenient re-exports of commonly used storage types.
//!
//! ```ignore
//! use pickline::prelude::*;
//! ```

pub use pickline_core::{
    collection::{Collection, DynCollection, DynTypedCollection},
    store::{DocumentStore, DynDocumentStore, IntoDynDocumentStore},
    document::{Document, DocumentExt, ID_FIELD},
    backend::{StoreBackend, DynStoreBackend, StoreBackendBuilder},
    query::{Query, QueryBuilder, QueryVisitor, Filter, Predicate},
    error::{DocumentStoreError, DocumentStoreResult},
};
