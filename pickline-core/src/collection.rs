//! Collection handles for document store operations.
//!
//! A collection handle borrows the store's backend and scopes every call to one
//! named collection.
//!
//! # Collection Types
//!
//! - [`Collection`] - Untyped collection over a statically known backend
//! - [`DynCollection`] - Untyped collection over a dynamically dispatched backend
//! - [`DynTypedCollection`] - Typed insert path for a specific [`Document`] type
//!
//! Reads always go through the untyped handles: callers need the stored record
//! including its [`ID_FIELD`](crate::document::ID_FIELD), which entity types omit.
//!
//! # Example
//!
//! ```ignore
//! # async fn example(store: &pickline_core::store::DynDocumentStore) -> pickline_core::error::DocumentStoreResult<()> {
//! let id = store
//!     .typed_collection::<Subscription>()
//!     .insert_one(&Subscription { email: "fan@example.com".into() })
//!     .await?;
//! let all = store.collection("subscription").query(Query::new()).await?;
//! # Ok(()) }
//! ```

use bson::{Bson, Uuid};
use std::marker::PhantomData;

use crate::{
    backend::{DynStoreBackend, StoreBackend},
    document::{Document, DocumentExt},
    error::DocumentStoreResult,
    query::Query,
};

/// An untyped collection with a reference to a storage backend.
///
/// # Type Parameters
///
/// * `'a` - Lifetime of the backend reference
/// * `B` - The storage backend type
#[derive(Debug)]
pub struct Collection<'a, B: StoreBackend> {
    name: String,
    backend: &'a B,
}

impl<'a, B: StoreBackend> Collection<'a, B> {
    pub(crate) fn new(name: String, backend: &'a B) -> Self {
        Self { name, backend }
    }

    /// Returns the name of this collection.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Inserts BSON documents under the given IDs.
    ///
    /// # Errors
    ///
    /// Returns a [`DocumentStoreError`](crate::error::DocumentStoreError) if the operation fails.
    pub async fn insert(&self, documents: Vec<(Uuid, Bson)>) -> DocumentStoreResult<()> {
        StoreBackend::insert_documents(self.backend, documents, self.name()).await
    }

    /// Queries documents in the collection.
    ///
    /// # Errors
    ///
    /// Returns a [`DocumentStoreError`](crate::error::DocumentStoreError) if the operation fails.
    pub async fn query(&self, query: Query) -> DocumentStoreResult<Vec<Bson>> {
        StoreBackend::query_documents(self.backend, query, self.name()).await
    }
}

/// A dynamic (type-erased) collection with a reference to a backend trait object.
#[derive(Debug)]
pub struct DynCollection<'a> {
    name: String,
    backend: &'a dyn DynStoreBackend,
}

impl<'a> DynCollection<'a> {
    pub(crate) fn new(name: String, backend: &'a dyn DynStoreBackend) -> Self {
        Self { name, backend }
    }

    /// Returns the name of this collection.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Queries documents in the collection.
    ///
    /// # Returns
    ///
    /// The matching BSON documents, each carrying its stored identifier.
    ///
    /// # Errors
    ///
    /// Returns a [`DocumentStoreError`](crate::error::DocumentStoreError) if the operation fails.
    pub async fn query(&self, query: Query) -> DocumentStoreResult<Vec<Bson>> {
        self.backend
            .query_documents(query, self.name())
            .await
    }
}

/// Typed insert path over a dynamically dispatched backend.
#[derive(Debug)]
pub struct DynTypedCollection<'a, D: Document> {
    name: String,
    backend: &'a dyn DynStoreBackend,
    _marker: PhantomData<D>,
}

impl<'a, D: Document> DynTypedCollection<'a, D> {
    pub(crate) fn new(name: String, backend: &'a dyn DynStoreBackend) -> Self {
        Self { name, backend, _marker: PhantomData }
    }

    /// Returns the name of this collection.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Serializes and inserts one document under a freshly generated ID.
    ///
    /// # Returns
    ///
    /// The identifier the document was stored under.
    ///
    /// # Errors
    ///
    /// Returns a [`DocumentStoreError`](crate::error::DocumentStoreError) if serialization or insertion fails.
    pub async fn insert_one(&self, document: &D) -> DocumentStoreResult<Uuid> {
        let id = Uuid::new();

        self.backend
            .insert_documents(vec![(id, document.to_bson()?)], self.name())
            .await?;

        Ok(id)
    }
}
