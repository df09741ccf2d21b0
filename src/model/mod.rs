//! # Data model
//!
//! Serde-backed entities shared by the catalog, the bundle loader and the
//! template context. Every struct uses camelCase keys and `#[serde(default)]`
//! so partially filled bundle entries load without ceremony, and templates
//! see the same field names the bundle author wrote.

mod metadata;
mod service;
mod template;

pub use metadata::{Metadata, MetadataField};
pub use service::{CodeFile, Service, ServiceFunctional};
pub use template::{FileTemplate, FunctionalTemplate, Language, Template};

use std::collections::HashMap;
use std::sync::Arc;

/// Resolves a Metadata reference by ID.
///
/// Implemented by [`crate::catalog::Catalog`] (read-through, logs misses) and
/// by plain maps for tests. A `None` result is a dangling reference, which
/// callers degrade on instead of failing.
pub trait MetadataLookup {
    fn lookup(&self, id: &str) -> Option<Arc<Metadata>>;
}

impl MetadataLookup for HashMap<String, Arc<Metadata>> {
    fn lookup(&self, id: &str) -> Option<Arc<Metadata>> {
        self.get(id).cloned()
    }
}

impl<L: MetadataLookup + ?Sized> MetadataLookup for &L {
    fn lookup(&self, id: &str) -> Option<Arc<Metadata>> {
        (**self).lookup(id)
    }
}

impl<L: MetadataLookup + ?Sized> MetadataLookup for Arc<L> {
    fn lookup(&self, id: &str) -> Option<Arc<Metadata>> {
        (**self).lookup(id)
    }
}
