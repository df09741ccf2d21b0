//! Persistence collaborator behind the catalog.

use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{GenError, Result};
use crate::ids::EntityId;
use crate::model::{FileTemplate, FunctionalTemplate, Metadata, Service, Template};

/// Durable storage for catalog entities.
///
/// The catalog reads through this trait on a cache miss; the orchestrator
/// uses it for services and file/functional templates, which are not cached.
/// `Ok(None)` means "no such entity"; `Err` is a backend failure.
pub trait MetadataStore: Send + Sync {
    fn load_all_metadata(&self) -> Result<Vec<Metadata>>;
    fn load_all_templates(&self) -> Result<Vec<Template>>;
    fn metadata_by_id(&self, id: &str) -> Result<Option<Metadata>>;
    fn metadata_by_name(&self, name: &str) -> Result<Option<Metadata>>;
    /// Persist a Metadata and return the stored form (ID, level, field order assigned).
    fn save_metadata(&self, md: Metadata) -> Result<Metadata>;
    fn delete_metadata(&self, id: &str) -> Result<()>;
    fn template_by_id(&self, id: &str) -> Result<Option<Template>>;
    fn save_template(&self, tpl: Template) -> Result<Template>;
    fn delete_template(&self, id: &str) -> Result<()>;
    fn service_by_id(&self, id: &str) -> Result<Option<Service>>;
    fn file_template_by_id(&self, id: &str) -> Result<Option<FileTemplate>>;
    fn functional_template_by_id(&self, id: &str) -> Result<Option<FunctionalTemplate>>;
}

/// Everything a generation run needs, in one YAML or JSON document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CatalogBundle {
    pub metadata: Vec<Metadata>,
    pub templates: Vec<Template>,
    pub services: Vec<Service>,
    pub file_templates: Vec<FileTemplate>,
    pub functional_templates: Vec<FunctionalTemplate>,
}

impl CatalogBundle {
    /// Load a bundle, choosing the parser by file extension (`.json` or YAML).
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| GenError::io(path, e))?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        let parsed = if is_json {
            serde_json::from_str(&content).map_err(|e| e.to_string())
        } else {
            serde_yaml::from_str(&content).map_err(|e| e.to_string())
        };
        parsed.map_err(|message| GenError::Bundle {
            path: path.to_path_buf(),
            message,
        })
    }
}

#[derive(Default)]
struct Tables {
    metadata: HashMap<String, Metadata>,
    templates: HashMap<String, Template>,
    services: HashMap<String, Service>,
    file_templates: HashMap<String, FileTemplate>,
    functional_templates: HashMap<String, FunctionalTemplate>,
}

/// In-process [`MetadataStore`] seeded from a [`CatalogBundle`].
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bundle(bundle: CatalogBundle) -> Self {
        let mut tables = Tables::default();
        for md in bundle.metadata {
            tables.metadata.insert(md.id.clone(), md);
        }
        for tpl in bundle.templates {
            tables.templates.insert(tpl.id.clone(), tpl);
        }
        for svc in bundle.services {
            tables.services.insert(svc.id.clone(), svc);
        }
        for ft in bundle.file_templates {
            tables.file_templates.insert(ft.id.clone(), ft);
        }
        for ft in bundle.functional_templates {
            tables.functional_templates.insert(ft.id.clone(), ft);
        }
        Self {
            tables: RwLock::new(tables),
        }
    }

    pub fn open(path: &Path) -> Result<Self> {
        let bundle = CatalogBundle::load(path)?;
        info!(
            path = %path.display(),
            metadata = bundle.metadata.len(),
            templates = bundle.templates.len(),
            services = bundle.services.len(),
            "catalog bundle loaded"
        );
        Ok(Self::from_bundle(bundle))
    }

    pub fn save_service(&self, svc: Service) {
        self.write().services.insert(svc.id.clone(), svc);
    }

    pub fn save_file_template(&self, ft: FileTemplate) {
        self.write().file_templates.insert(ft.id.clone(), ft);
    }

    pub fn save_functional_template(&self, ft: FunctionalTemplate) {
        self.write().functional_templates.insert(ft.id.clone(), ft);
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl MetadataStore for MemoryStore {
    fn load_all_metadata(&self) -> Result<Vec<Metadata>> {
        Ok(self.read().metadata.values().cloned().collect())
    }

    fn load_all_templates(&self) -> Result<Vec<Template>> {
        Ok(self.read().templates.values().cloned().collect())
    }

    fn metadata_by_id(&self, id: &str) -> Result<Option<Metadata>> {
        Ok(self.read().metadata.get(id).cloned())
    }

    fn metadata_by_name(&self, name: &str) -> Result<Option<Metadata>> {
        Ok(self
            .read()
            .metadata
            .values()
            .find(|m| m.name == name)
            .cloned())
    }

    fn save_metadata(&self, mut md: Metadata) -> Result<Metadata> {
        let mut tables = self.write();
        if md.id.is_empty() {
            md.id = EntityId::new_string();
        }
        let parent = if md.parent_id.is_empty() {
            None
        } else {
            tables.metadata.get(&md.parent_id)
        };
        md.compute_level(parent);
        md.field_sort();
        for field in &mut md.metadata_fields {
            field.metadata_id.clone_from(&md.id);
        }
        tables.metadata.insert(md.id.clone(), md.clone());
        Ok(md)
    }

    fn delete_metadata(&self, id: &str) -> Result<()> {
        self.write().metadata.remove(id);
        Ok(())
    }

    fn template_by_id(&self, id: &str) -> Result<Option<Template>> {
        Ok(self.read().templates.get(id).cloned())
    }

    fn save_template(&self, mut tpl: Template) -> Result<Template> {
        if tpl.id.is_empty() {
            tpl.id = EntityId::new_string();
        }
        self.write().templates.insert(tpl.id.clone(), tpl.clone());
        Ok(tpl)
    }

    fn delete_template(&self, id: &str) -> Result<()> {
        self.write().templates.remove(id);
        Ok(())
    }

    fn service_by_id(&self, id: &str) -> Result<Option<Service>> {
        Ok(self.read().services.get(id).cloned())
    }

    fn file_template_by_id(&self, id: &str) -> Result<Option<FileTemplate>> {
        Ok(self.read().file_templates.get(id).cloned())
    }

    fn functional_template_by_id(&self, id: &str) -> Result<Option<FunctionalTemplate>> {
        Ok(self.read().functional_templates.get(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MetadataField;

    #[test]
    fn save_metadata_assigns_id_level_and_order() {
        let store = MemoryStore::new();
        let parent = store
            .save_metadata(Metadata {
                name: "Order".into(),
                ..Default::default()
            })
            .unwrap();
        assert!(!parent.id.is_empty());
        assert_eq!(parent.level, 0);

        let child = store
            .save_metadata(Metadata {
                name: "OrderItem".into(),
                parent_id: parent.id.clone(),
                metadata_fields: vec![MetadataField::default(), MetadataField::default()],
                ..Default::default()
            })
            .unwrap();
        assert_eq!(child.level, 1);
        let orders: Vec<_> = child.metadata_fields.iter().map(|f| f.order).collect();
        assert_eq!(orders, [1, 2]);
        assert!(child.metadata_fields.iter().all(|f| f.metadata_id == child.id));

        let by_name = store.metadata_by_name("OrderItem").unwrap().unwrap();
        assert_eq!(by_name.id, child.id);
    }

    #[test]
    fn delete_is_idempotent() {
        let store = MemoryStore::new();
        store.delete_metadata("missing").unwrap();
        store.delete_template("missing").unwrap();
        assert!(store.metadata_by_id("missing").unwrap().is_none());
    }

    #[test]
    fn bundle_loads_yaml_and_json() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = dir.path().join("bundle.yaml");
        std::fs::write(
            &yaml,
            "metadata:\n  - id: m1\n    name: Cell\ntemplates:\n  - id: t1\n    name: t\n    content: hi\n",
        )
        .unwrap();
        let store = MemoryStore::open(&yaml).unwrap();
        assert_eq!(store.metadata_by_id("m1").unwrap().unwrap().name, "Cell");
        assert_eq!(store.template_by_id("t1").unwrap().unwrap().content, "hi");

        let json = dir.path().join("bundle.json");
        std::fs::write(&json, r#"{"services":[{"id":"s1","name":"Shop"}]}"#).unwrap();
        let store = MemoryStore::open(&json).unwrap();
        assert_eq!(store.service_by_id("s1").unwrap().unwrap().name, "Shop");
    }

    #[test]
    fn malformed_bundle_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{not json").unwrap();
        let err = MemoryStore::open(&path).err().unwrap();
        assert!(matches!(err, GenError::Bundle { .. }));
    }
}
