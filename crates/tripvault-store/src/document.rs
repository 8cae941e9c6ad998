//! Stored document shape: field values and document addressing.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single field value in a stored document.
///
/// Mirrors the scalar types the remote store understands natively, including
/// its geo-point type. There is no nested-map value: structure beyond one
/// document is expressed with sub-collections, not nested fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Value {
    Str(String),
    Int(i64),
    GeoPoint { latitude: f64, longitude: f64 },
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_geo_point(&self) -> Option<(f64, f64)> {
        match self {
            Self::GeoPoint {
                latitude,
                longitude,
            } => Some((*latitude, *longitude)),
            _ => None,
        }
    }
}

/// The fields of one stored document, keyed by field name.
pub type Fields = BTreeMap<String, Value>;

/// Address of a document: `collection/document`, optionally extended one
/// level to `collection/document/subcollection/document`.
///
/// The store supports exactly one level of sub-collection nesting, so the
/// address space is closed under [`DocumentPath::child`] applied at most
/// once to a top-level path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentPath {
    collection: String,
    document: String,
    nested: Option<(String, String)>,
}

impl DocumentPath {
    /// Address a top-level document.
    pub fn new(collection: impl Into<String>, document: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            document: document.into(),
            nested: None,
        }
    }

    /// Address a document in a sub-collection nested under `self`.
    pub fn child(self, subcollection: impl Into<String>, document: impl Into<String>) -> Self {
        Self {
            nested: Some((subcollection.into(), document.into())),
            ..self
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn document(&self) -> &str {
        &self.document
    }

    /// The `(subcollection, document)` tail, when this path addresses a
    /// nested document.
    pub fn nested(&self) -> Option<(&str, &str)> {
        self.nested
            .as_ref()
            .map(|(sub, doc)| (sub.as_str(), doc.as_str()))
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection, self.document)?;
        if let Some((sub, doc)) = &self.nested {
            write!(f, "/{sub}/{doc}")?;
        }
        Ok(())
    }
}
