//! In-memory storage implementation for document stores.
//!
//! Documents live as BSON values in insertion-ordered maps behind an async-safe
//! read-write lock.

use std::sync::Arc;
use async_trait::async_trait;
use indexmap::IndexMap;
use mea::rwlock::RwLock;
use bson::{Uuid, Bson};

use pickline_core::{
    document::ID_FIELD,
    query::Query,
    error::{DocumentStoreError, DocumentStoreResult},
    backend::StoreBackend,
};

use crate::evaluator::DocumentEvaluator;

type CollectionMap = IndexMap<String, Bson>;
type StoreMap = IndexMap<String, CollectionMap>;


/// Thread-safe in-memory document storage backend.
///
/// `InMemoryStore` is cloneable and uses an `Arc`-wrapped internal state, so clones
/// share the same underlying data. Each stored document gets its identifier written
/// to the `_id` field, mirroring what MongoDB returns.
///
/// Queries scan the whole collection; there is no indexing.
///
/// # Example
///
/// ```ignore
/// use pickline_memory::InMemoryStore;
/// use pickline_core::backend::StoreBackend;
/// use bson::{Uuid, Bson, doc};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = InMemoryStore::new();
///
///     let doc = Bson::Document(doc! { "slug": "terms", "title": "Terms of Service" });
///     store.insert_documents(vec![(Uuid::new(), doc)], "legal").await?;
///
///     let docs = store.query_documents(Default::default(), "legal").await?;
///     assert_eq!(docs.len(), 1);
///
///     Ok(())
/// }
/// ```
#[derive(Default, Clone, Debug)]
pub struct InMemoryStore {
    /// collection_name -> (document_id -> document)
    store: Arc<RwLock<StoreMap>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory document store.
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(StoreMap::new())),
        }
    }
}


#[async_trait]
impl StoreBackend for InMemoryStore {
    async fn insert_documents(&self, documents: Vec<(Uuid, Bson)>, collection: &str) -> DocumentStoreResult<()> {
        let mut store = self.store.write().await;
        let collection_map = store
            .entry(collection.to_string())
            .or_default();

        for (id, doc) in documents {
            let key = id.to_string();

            if collection_map.contains_key(&key) {
                return Err(DocumentStoreError::DocumentAlreadyExists(key, collection.to_string()));
            }

            let Bson::Document(mut doc) = doc else {
                return Err(DocumentStoreError::InvalidDocument("Expected document".into()));
            };
            doc.insert(ID_FIELD, id);

            collection_map.insert(key, Bson::Document(doc));
        }

        Ok(())
    }

    async fn query_documents(&self, query: Query, collection: &str) -> DocumentStoreResult<Vec<Bson>> {
        let store = self.store.read().await;
        let Some(collection_map) = store.get(collection) else {
            return Ok(vec![]);
        };

        let mut matched = Vec::new();
        let limit = query.limit.unwrap_or(usize::MAX);

        for doc in collection_map.values() {
            if matched.len() >= limit {
                break;
            }

            if DocumentEvaluator::new(doc).evaluate(&query.filter)? {
                matched.push(doc.clone());
            }
        }

        Ok(matched)
    }

    async fn list_collections(&self) -> DocumentStoreResult<Vec<String>> {
        Ok(
            self.store
                .read()
                .await
                .keys()
                .cloned()
                .collect()
        )
    }
}
