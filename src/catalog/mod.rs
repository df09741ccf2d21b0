//! # Metadata catalog
//!
//! Process-wide, concurrently readable cache of Metadata (keyed by ID and by
//! Name) and Templates (keyed by ID) sitting in front of a [`MetadataStore`].
//!
//! ## Read-through
//!
//! A Metadata lookup that misses the cache falls back to the store. The
//! loaded entry is sorted and inserted *before* its derived fields are
//! computed, so reference walks that come back to it hit the cache instead of
//! re-entering the store. The initialized entry then replaces the raw one.
//!
//! ## Concurrency
//!
//! The maps are sharded [`DashMap`]s: reads of unrelated keys never contend
//! and writes to one key serialize on its shard. No map guard is held while
//! the resolver or the store runs, so read-through may recurse freely.
//!
//! ```rust
//! use std::sync::Arc;
//! use metagen::catalog::{Catalog, MemoryStore};
//! use metagen::model::Metadata;
//!
//! let catalog = Catalog::new(Arc::new(MemoryStore::new()));
//! catalog.put_metadata(Metadata { id: "m1".into(), name: "Cell".into(), ..Default::default() });
//! assert_eq!(catalog.metadata_name_by_id("m1").unwrap(), "Cell");
//! ```

mod store;

pub use store::{CatalogBundle, MemoryStore, MetadataStore};

use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, info, warn};

use crate::error::{EntityKind, GenError, Result};
use crate::model::{Metadata, MetadataLookup, Template};
use crate::resolver::init_gen_code;

/// Counts reported by [`Catalog::load_all`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadSummary {
    pub metadata: usize,
    pub templates: usize,
}

pub struct Catalog {
    store: Arc<dyn MetadataStore>,
    by_id: DashMap<String, Arc<Metadata>>,
    by_name: DashMap<String, Arc<Metadata>>,
    templates: DashMap<String, Arc<Template>>,
}

impl Catalog {
    pub fn new(store: Arc<dyn MetadataStore>) -> Self {
        Self {
            store,
            by_id: DashMap::new(),
            by_name: DashMap::new(),
            templates: DashMap::new(),
        }
    }

    /// The persistence collaborator this catalog reads through to.
    pub fn store(&self) -> &dyn MetadataStore {
        self.store.as_ref()
    }

    /// Bulk-load every template and Metadata from the store.
    ///
    /// All Metadata are cached before any derived fields are computed, so the
    /// reference graph is complete when it is walked.
    pub fn load_all(&self) -> Result<LoadSummary> {
        let templates = self.store.load_all_templates()?;
        let template_count = templates.len();
        for tpl in templates {
            self.templates.insert(tpl.id.clone(), Arc::new(tpl));
        }

        let mut metadata = self.store.load_all_metadata()?;
        for md in &mut metadata {
            md.sort();
            self.insert(Arc::new(md.clone()));
        }
        let metadata_count = metadata.len();
        for mut md in metadata {
            init_gen_code(&mut md, self);
            self.insert(Arc::new(md));
        }

        info!(
            metadata = metadata_count,
            templates = template_count,
            "catalog loaded"
        );
        Ok(LoadSummary {
            metadata: metadata_count,
            templates: template_count,
        })
    }

    pub fn template_by_id(&self, id: &str) -> Result<Arc<Template>> {
        self.templates
            .get(id)
            .map(|t| Arc::clone(t.value()))
            .ok_or_else(|| GenError::not_found(EntityKind::Template, id))
    }

    /// Cached Metadata by ID, reading through to the store on a miss.
    pub fn metadata_by_id(&self, id: &str) -> Result<Arc<Metadata>> {
        if let Some(md) = self.by_id.get(id) {
            return Ok(Arc::clone(md.value()));
        }
        debug!(id, "metadata cache miss");
        match self.store.metadata_by_id(id)? {
            Some(md) => Ok(self.admit(md)),
            None => Err(GenError::not_found(EntityKind::Metadata, id)),
        }
    }

    /// Cached Metadata by Name, reading through to the store on a miss.
    pub fn metadata_by_name(&self, name: &str) -> Result<Arc<Metadata>> {
        if let Some(md) = self.by_name.get(name) {
            return Ok(Arc::clone(md.value()));
        }
        debug!(name, "metadata cache miss");
        match self.store.metadata_by_name(name)? {
            Some(md) => Ok(self.admit(md)),
            None => Err(GenError::not_found(EntityKind::Metadata, name)),
        }
    }

    pub fn metadata_name_by_id(&self, id: &str) -> Result<String> {
        Ok(self.metadata_by_id(id)?.name.clone())
    }

    /// Sort, initialize and cache `md`, replacing any entry with the same ID.
    ///
    /// A rename evicts the previous Name key.
    pub fn put_metadata(&self, md: Metadata) -> Arc<Metadata> {
        let previous_name = self.by_id.get(&md.id).map(|old| old.name.clone());
        if let Some(old_name) = previous_name {
            if old_name != md.name {
                self.by_name.remove(&old_name);
            }
        }
        self.admit(md)
    }

    /// Persist `md` through the store, then cache the stored form.
    pub fn save_metadata(&self, md: Metadata) -> Result<Arc<Metadata>> {
        let stored = self.store.save_metadata(md)?;
        Ok(self.put_metadata(stored))
    }

    /// Evict a Metadata from both keys. Unknown IDs are ignored.
    pub fn delete_metadata(&self, id: &str) {
        if let Some((_, md)) = self.by_id.remove(id) {
            self.by_name.remove(&md.name);
        }
    }

    pub fn put_template(&self, tpl: Template) -> Arc<Template> {
        let tpl = Arc::new(tpl);
        self.templates.insert(tpl.id.clone(), Arc::clone(&tpl));
        tpl
    }

    pub fn delete_template(&self, id: &str) {
        self.templates.remove(id);
    }

    pub fn metadata_count(&self) -> usize {
        self.by_id.len()
    }

    pub fn template_count(&self) -> usize {
        self.templates.len()
    }

    fn admit(&self, mut md: Metadata) -> Arc<Metadata> {
        md.sort();
        self.insert(Arc::new(md.clone()));
        init_gen_code(&mut md, self);
        let md = Arc::new(md);
        self.insert(Arc::clone(&md));
        md
    }

    fn insert(&self, md: Arc<Metadata>) {
        self.by_name.insert(md.name.clone(), Arc::clone(&md));
        self.by_id.insert(md.id.clone(), md);
    }
}

impl MetadataLookup for Catalog {
    fn lookup(&self, id: &str) -> Option<Arc<Metadata>> {
        match self.metadata_by_id(id) {
            Ok(md) => Some(md),
            Err(err) if err.is_not_found() => None,
            Err(err) => {
                warn!(id, error = %err, "metadata lookup failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MetadataField;

    fn reference(name: &str, target: &str) -> MetadataField {
        MetadataField {
            name: name.into(),
            ref_metadata: target.into(),
            ..Default::default()
        }
    }

    fn md(id: &str, name: &str, fields: Vec<MetadataField>) -> Metadata {
        Metadata {
            id: id.into(),
            name: name.into(),
            metadata_fields: fields,
            ..Default::default()
        }
    }

    fn store_with(mds: Vec<Metadata>) -> Arc<MemoryStore> {
        Arc::new(MemoryStore::from_bundle(CatalogBundle {
            metadata: mds,
            ..Default::default()
        }))
    }

    #[test]
    fn read_through_populates_both_keys() {
        let store = store_with(vec![md("b", "B", vec![])]);
        let catalog = Catalog::new(store);
        assert_eq!(catalog.metadata_count(), 0);

        let b = catalog.metadata_by_id("b").unwrap();
        assert_eq!(b.name, "B");
        assert_eq!(catalog.metadata_by_name("B").unwrap().id, "b");
        assert_eq!(catalog.metadata_count(), 1);
    }

    #[test]
    fn read_through_terminates_on_cycles() {
        let store = store_with(vec![
            md("a", "A", vec![reference("B", "b")]),
            md("b", "B", vec![reference("A", "a")]),
        ]);
        let catalog = Catalog::new(store);
        let a = catalog.metadata_by_id("a").unwrap();
        assert_eq!(a.preloads, ["B"]);
    }

    #[test]
    fn missing_metadata_is_not_found() {
        let catalog = Catalog::new(store_with(vec![]));
        let err = catalog.metadata_by_id("ghost").unwrap_err();
        assert!(err.is_not_found());
        assert!(catalog.metadata_by_name("Ghost").unwrap_err().is_not_found());
        assert!(catalog.template_by_id("t").unwrap_err().is_not_found());
    }

    #[test]
    fn rename_evicts_old_name() {
        let catalog = Catalog::new(store_with(vec![]));
        catalog.put_metadata(md("m", "Old", vec![]));
        catalog.put_metadata(md("m", "New", vec![]));
        assert!(catalog.metadata_by_name("Old").is_err());
        assert_eq!(catalog.metadata_by_name("New").unwrap().id, "m");
    }

    #[test]
    fn delete_evicts_both_keys() {
        let catalog = Catalog::new(store_with(vec![]));
        catalog.put_metadata(md("m", "Cell", vec![]));
        catalog.delete_metadata("m");
        catalog.delete_metadata("m");
        assert!(catalog.metadata_by_id("m").is_err());
        assert!(catalog.metadata_by_name("Cell").is_err());
    }

    #[test]
    fn load_all_initializes_every_entry() {
        let store = store_with(vec![
            md("a", "A", vec![reference("Owner", "b")]),
            md("b", "B", vec![]),
        ]);
        let catalog = Catalog::new(store);
        let summary = catalog.load_all().unwrap();
        assert_eq!(summary.metadata, 2);
        assert_eq!(catalog.metadata_by_id("a").unwrap().preloads, ["Owner"]);
        assert_eq!(catalog.metadata_by_id("b").unwrap().fields, "m.Name");
    }

    #[test]
    fn templates_are_put_and_deleted() {
        let catalog = Catalog::new(store_with(vec![]));
        catalog.put_template(Template {
            id: "t".into(),
            content: "x".into(),
            ..Default::default()
        });
        assert_eq!(catalog.template_by_id("t").unwrap().content, "x");
        catalog.delete_template("t");
        assert!(catalog.template_by_id("t").is_err());
    }

    #[test]
    fn concurrent_readers_share_entries() {
        let store = store_with(vec![md("a", "A", vec![reference("B", "b")]), md("b", "B", vec![])]);
        let catalog = Arc::new(Catalog::new(store));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let catalog = Arc::clone(&catalog);
                std::thread::spawn(move || catalog.metadata_by_id("a").unwrap().preloads.clone())
            })
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), ["B"]);
        }
    }
}
