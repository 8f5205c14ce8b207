//! Turns stored documents into response bodies.

use pickline::{
    bson::{Bson, Uuid, spec::BinarySubtype},
    prelude::ID_FIELD,
};
use serde::Serialize;
use serde_json::Value;

/// Body of every list endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct Items<T> {
    pub items: Vec<T>,
}

impl<T> From<Vec<T>> for Items<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

/// Renders a stored identifier as a plain string.
pub fn display_id(id: &Bson) -> String {
    match id {
        Bson::String(id) => id.clone(),
        Bson::ObjectId(id) => id.to_hex(),
        Bson::Binary(binary) if binary.subtype == BinarySubtype::Uuid => {
            match <[u8; 16]>::try_from(binary.bytes.as_slice()) {
                Ok(bytes) => Uuid::from_bytes(bytes).to_string(),
                Err(_) => id.to_string(),
            }
        }
        other => other.to_string(),
    }
}

/// Rewrites `_id` to its display string and converts the document to JSON.
/// Every other field passes through unchanged.
pub fn shape_document(document: Bson) -> Result<Value, serde_json::Error> {
    let document = match document {
        Bson::Document(mut document) => {
            if let Some(id) = document.get(ID_FIELD) {
                let id = display_id(id);
                document.insert(ID_FIELD, id);
            }
            Bson::Document(document)
        }
        other => other,
    };

    serde_json::to_value(&document)
}

pub fn shape_documents(documents: Vec<Bson>) -> Result<Items<Value>, serde_json::Error> {
    documents
        .into_iter()
        .map(shape_document)
        .collect::<Result<Vec<_>, _>>()
        .map(Items::from)
}
