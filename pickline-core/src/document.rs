//! Core traits for document representation and serialization.
//!
//! Every entity the API persists implements [`Document`]. Identity is assigned by the
//! store at insert time and lives in the [`ID_FIELD`] of the stored record, so entity
//! types carry no identifier of their own.

use bson::{Bson, ser::serialize_to_bson};
use serde::{Deserialize, Serialize};

use crate::error::{DocumentStoreError, DocumentStoreResult};

/// Name of the field holding the store-assigned identifier on every stored record.
pub const ID_FIELD: &str = "_id";

/// Core trait that all documents stored in a document store must implement.
///
/// # Example
///
/// ```ignore
/// use pickline_core::document::Document;
/// use serde::{Serialize, Deserialize};
///
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// pub struct Testimonial {
///     pub name: String,
///     pub message: String,
/// }
///
/// impl Document for Testimonial {
///     fn collection_name() -> &'static str {
///         "testimonial"
///     }
/// }
/// ```
pub trait Document: Serialize + for<'de> Deserialize<'de> + Send + Sync + Clone + 'static {
    /// Returns the name of the collection this document belongs to.
    ///
    /// This should be a static, lowercase identifier (e.g., "prediction", "blog").
    fn collection_name() -> &'static str;
}

/// Extension trait providing BSON conversion for documents.
///
/// Implemented for all types that implement [`Document`].
pub trait DocumentExt: Document {
    /// Converts this document to a BSON document value for storage.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the value is not a BSON document.
    fn to_bson(&self) -> DocumentStoreResult<Bson>;
}

impl<D: Document> DocumentExt for D {
    fn to_bson(&self) -> DocumentStoreResult<Bson> {
        match serialize_to_bson(self)? {
            document @ Bson::Document(_) => Ok(document),
            other => Err(DocumentStoreError::InvalidDocument(format!(
                "{} serialized to {:?}, expected a document",
                D::collection_name(),
                other.element_type(),
            ))),
        }
    }
}
