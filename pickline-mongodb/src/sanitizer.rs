//! Field-name sanitization for MongoDB compatibility.
//!
//! MongoDB reserves `.` for nested paths and `$` for operators, so neither may appear
//! in a stored key. Keys are escaped on the way in and restored on the way out.
//! Values are stored verbatim.

use bson::{Bson, Document};


/// Escapes and restores document keys around MongoDB's field name restrictions.
pub(crate) struct KeySanitizer;

impl KeySanitizer {
    const REPLACEMENTS: [(&'static str, &'static str); 3] = [
        (".", "__dot__"),
        ("$", "__dollar__"),
        ("\0", "__null__"),
    ];

    /// Recursively escapes every key inside documents and arrays of documents.
    pub(crate) fn sanitize_value(value: &Bson) -> Bson {
        Self::map_keys(value, &Self::sanitize_key)
    }

    /// Inverse of [`sanitize_value`](Self::sanitize_value).
    pub(crate) fn restore_value(value: &Bson) -> Bson {
        Self::map_keys(value, &Self::restore_key)
    }

    pub(crate) fn sanitize_key(input: &str) -> String {
        let mut sanitized = input.to_string();
        for (target, replacement) in Self::REPLACEMENTS.iter() {
            sanitized = sanitized.replace(*target, *replacement);
        }
        sanitized
    }

    pub(crate) fn restore_key(input: &str) -> String {
        let mut restored = input.to_string();
        for (target, replacement) in Self::REPLACEMENTS.iter().rev() {
            restored = restored.replace(*replacement, *target);
        }
        restored
    }

    fn map_keys(value: &Bson, rename: &dyn Fn(&str) -> String) -> Bson {
        match value {
            Bson::Array(arr) => Bson::Array(
                arr
                    .iter()
                    .map(|item| Self::map_keys(item, rename))
                    .collect(),
            ),
            Bson::Document(doc) => Bson::Document(
                doc.iter()
                    .map(|(k, v)| (rename(k), Self::map_keys(v, rename)))
                    .collect::<Document>(),
            ),
            _ => value.clone(),
        }
    }
}
