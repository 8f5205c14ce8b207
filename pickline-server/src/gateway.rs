//! Document store gateway.
//!
//! The gateway owns the optional store handle. It is built once at startup and
//! handed to the router; when no store could be reached every operation answers
//! [`GatewayError::Unavailable`] instead of failing deeper down.

use std::sync::Arc;

use pickline::{
    bson::{Bson, Uuid},
    memory::InMemoryStore,
    mongodb::MongoDbStore,
    prelude::{Document, DocumentStore, DynDocumentStore, Filter, IntoDynDocumentStore, Query, StoreBackendBuilder},
};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::{
    config::{Config, StoreKind},
    error::GatewayError,
    validate::Validated,
};

const HEALTH_COLLECTION_LIMIT: usize = 20;
const HEALTH_ERROR_CHARS: usize = 80;

/// Whether each connection setting was supplied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Credentials {
    pub database_url: bool,
    pub database_name: bool,
}

impl Credentials {
    pub fn from_config(config: &Config) -> Self {
        Self {
            database_url: config.database_url().is_some(),
            database_name: config.database_name().is_some(),
        }
    }
}

/// Result of a health probe. Building one never fails.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub backend: &'static str,
    pub database: String,
    pub database_url: &'static str,
    pub database_name: &'static str,
    pub connection_status: &'static str,
    pub collections: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Gateway {
    store: Option<Arc<DynDocumentStore>>,
    credentials: Credentials,
}

impl Gateway {
    pub fn connected(store: impl IntoDynDocumentStore, credentials: Credentials) -> Self {
        Self {
            store: Some(Arc::new(store.into_dyn())),
            credentials,
        }
    }

    pub fn disconnected(credentials: Credentials) -> Self {
        Self { store: None, credentials }
    }

    /// A gateway over a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::connected(DocumentStore::new(InMemoryStore::new()), Credentials::default())
    }

    /// A gateway over `store` if it answers a collection listing, otherwise a
    /// disconnected one. Client construction is lazy, so this round trip is the
    /// first point a dead server shows up.
    pub async fn verified(store: impl IntoDynDocumentStore, credentials: Credentials) -> Self {
        let store = store.into_dyn();

        match store.list_collections().await {
            Ok(collections) => {
                debug!(count = collections.len(), "store reachable");
                Self::connected(store, credentials)
            }
            Err(err) => {
                warn!(error = %err, "store unreachable, starting without a database");
                if let Err(err) = store.shutdown().await {
                    debug!(error = %err, "store shutdown failed");
                }
                Self::disconnected(credentials)
            }
        }
    }

    /// Builds the gateway the configuration asks for.
    ///
    /// Missing MongoDB credentials, a client that fails to build or a server that
    /// does not answer leave the gateway disconnected; the service still starts.
    pub async fn connect(config: &Config) -> Self {
        let credentials = Credentials::from_config(config);

        match config.store {
            StoreKind::Memory => {
                info!("using in-memory store");
                Self::connected(DocumentStore::new(InMemoryStore::new()), credentials)
            }
            StoreKind::Mongodb => {
                let (Some(url), Some(name)) = (config.database_url(), config.database_name()) else {
                    warn!("DATABASE_URL or DATABASE_NAME not set, starting without a database");
                    return Self::disconnected(credentials);
                };

                match MongoDbStore::builder(url, name).build().await {
                    Ok(backend) => {
                        info!(database = name, "MongoDB client ready");
                        Self::verified(DocumentStore::new(backend), credentials).await
                    }
                    Err(err) => {
                        warn!(error = %err, "MongoDB client unavailable, starting without a database");
                        Self::disconnected(credentials)
                    }
                }
            }
        }
    }

    pub fn is_available(&self) -> bool {
        self.store.is_some()
    }

    fn store(&self) -> Result<&DynDocumentStore, GatewayError> {
        self.store.as_deref().ok_or(GatewayError::Unavailable)
    }

    /// Inserts one validated document into its collection and returns the
    /// identifier the store assigned.
    #[instrument(skip(self, document), fields(collection = D::collection_name()))]
    pub async fn create<D: Document>(&self, document: &Validated<D>) -> Result<Uuid, GatewayError> {
        let id = self
            .store()?
            .typed_collection::<D>()
            .insert_one(document)
            .await
            .map_err(|source| GatewayError::Write {
                collection: D::collection_name().to_string(),
                source,
            })?;

        debug!(%id, "document created");
        Ok(id)
    }

    /// Returns documents matching `filter`, at most `limit` of them.
    ///
    /// A limit of `None` or `Some(0)` returns every match.
    #[instrument(skip(self, filter))]
    pub async fn query(
        &self,
        collection: &str,
        filter: Filter,
        limit: Option<usize>,
    ) -> Result<Vec<Bson>, GatewayError> {
        let query = Query::builder()
            .filter(filter)
            .maybe_limit(limit.filter(|&limit| limit > 0))
            .build();

        let documents = self
            .store()?
            .collection(collection)
            .query(query)
            .await
            .map_err(|source| GatewayError::Read {
                collection: collection.to_string(),
                source,
            })?;

        debug!(count = documents.len(), "query complete");
        Ok(documents)
    }

    /// First document matching `filter`, if any.
    pub async fn find_one(&self, collection: &str, filter: Filter) -> Result<Option<Bson>, GatewayError> {
        Ok(self.query(collection, filter, Some(1)).await?.into_iter().next())
    }

    pub async fn health(&self) -> HealthReport {
        let mut report = HealthReport {
            backend: "running",
            database: "not available".to_string(),
            database_url: if self.credentials.database_url { "set" } else { "not set" },
            database_name: if self.credentials.database_name { "set" } else { "not set" },
            connection_status: "not connected",
            collections: Vec::new(),
        };

        let Some(store) = self.store.as_deref() else {
            return report;
        };

        report.connection_status = "connected";
        match store.list_collections().await {
            Ok(mut collections) => {
                collections.truncate(HEALTH_COLLECTION_LIMIT);
                report.collections = collections;
                report.database = "connected & working".to_string();
            }
            Err(err) => {
                warn!(error = %err, "health probe could not list collections");
                let message: String = err.to_string().chars().take(HEALTH_ERROR_CHARS).collect();
                report.database = format!("connected but error: {message}");
            }
        }

        report
    }

    /// Releases the backend once no other handle to it is alive.
    pub async fn shutdown(self) {
        let Some(store) = self.store else {
            return;
        };

        match Arc::try_unwrap(store) {
            Ok(store) => {
                if let Err(err) = store.shutdown().await {
                    warn!(error = %err, "store shutdown failed");
                }
            }
            Err(_) => debug!("store still shared, skipping shutdown"),
        }
    }
}
