use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Map, Value};

use super::lenient;
use crate::error::CatalogError;

/// Top-level container for the Simplestreams catalogue.
///
/// `products` stays `None` when the document has no usable `products` mapping,
/// which the resolver reports as a structure problem rather than an empty
/// catalogue.
#[derive(Debug, Deserialize)]
pub struct Catalog {
    #[serde(default, deserialize_with = "lenient::optional_entries")]
    products: Option<IndexMap<String, super::Product>>,

    #[serde(default, deserialize_with = "lenient::optional")]
    content_id: Option<String>,

    #[serde(default, deserialize_with = "lenient::optional")]
    updated: Option<String>,
}

impl Catalog {
    /// Decode raw bytes. Only syntax is checked here, plus the requirement that
    /// the root is a JSON object.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CatalogError> {
        let root: Map<String, Value> = serde_json::from_slice(bytes)?;
        Ok(Catalog::deserialize(Value::Object(root))?)
    }

    /// Catalogue entries keyed by product identifier, in document order.
    pub fn products(&self) -> Option<&IndexMap<String, super::Product>> {
        self.products.as_ref()
    }

    pub fn content_id(&self) -> Option<&str> {
        self.content_id.as_deref()
    }

    pub fn updated(&self) -> Option<&str> {
        self.updated.as_deref()
    }
}
