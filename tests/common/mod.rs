#![allow(dead_code)]

pub mod fixtures {
    use metagen::catalog::{Catalog, CatalogBundle, MemoryStore};
    use metagen::model::{
        CodeFile, FileTemplate, FunctionalTemplate, Metadata, MetadataField, Service,
        ServiceFunctional, Template,
    };
    use std::sync::Arc;

    pub fn field(name: &str, ty: &str) -> MetadataField {
        MetadataField {
            name: name.to_string(),
            ty: ty.to_string(),
            ..Default::default()
        }
    }

    pub fn reference(name: &str, target: &str) -> MetadataField {
        MetadataField {
            name: name.to_string(),
            ref_metadata: target.to_string(),
            ..Default::default()
        }
    }

    pub fn metadata(id: &str, name: &str, fields: Vec<MetadataField>) -> Metadata {
        Metadata {
            id: id.to_string(),
            name: name.to_string(),
            metadata_fields: fields,
            ..Default::default()
        }
    }

    pub fn template(id: &str, content: &str) -> Template {
        Template {
            id: id.to_string(),
            name: id.to_string(),
            content: content.to_string(),
            ..Default::default()
        }
    }

    pub fn code_file(name: &str, start: &str, body: &[&str], end: &str) -> CodeFile {
        CodeFile {
            name: name.to_string(),
            dir: "model".to_string(),
            metadata_id: "cell".to_string(),
            start: start.to_string(),
            body: body.iter().map(|s| s.to_string()).collect(),
            end: end.to_string(),
            enable: true,
            ..Default::default()
        }
    }

    /// Cell (Name, Line → ProductionLine) plus a small template set:
    ///
    /// - `t1`..`t4` render `T1`..`T4`
    /// - `api-id` renders the first generated API ID of the run
    /// - `so-far` renders the code assembled before it plus `+`
    /// - `pkg` renders the service package
    pub fn bundle() -> CatalogBundle {
        let mut name = field("Name", "varchar");
        name.unique = true;
        name.show_in_table = true;
        CatalogBundle {
            metadata: vec![
                metadata("line", "ProductionLine", vec![field("Code", "varchar")]),
                metadata("cell", "Cell", vec![name, reference("Line", "line")]),
            ],
            templates: vec![
                template("t1", "T1"),
                template("t2", "T2"),
                template("t3", "T3"),
                template("t4", "T4"),
                template("api-id", "{{ config.apis[0].id }}"),
                template("so-far", "{{ codeFile.code }}+"),
                template("pkg", "{{ service.package }}"),
            ],
            services: vec![Service {
                id: "svc".to_string(),
                name: "Mes".to_string(),
                package: "mes".to_string(),
                code_files: vec![
                    code_file("cell.go", "t1", &["t2", "t3"], "t4"),
                    code_file("cell_api.go", "api-id", &[], ""),
                    code_file("cell_handler.go", "", &["api-id"], ""),
                    CodeFile {
                        enable: false,
                        ..code_file("disabled.go", "t1", &[], "")
                    },
                ],
                service_functionals: vec![ServiceFunctional {
                    functional_template_id: "crud".to_string(),
                    metadata_id: "cell".to_string(),
                    gen_config: true,
                    enable: true,
                    ..Default::default()
                }],
                ..Default::default()
            }],
            file_templates: vec![
                FileTemplate {
                    id: "ft-go".to_string(),
                    name: "model".to_string(),
                    dir: "internal/model".to_string(),
                    start: "t1".to_string(),
                    end: "api-id".to_string(),
                    language: "Golang".to_string(),
                    ..Default::default()
                },
                FileTemplate {
                    id: "ft-ts".to_string(),
                    name: "api".to_string(),
                    dir: "web/api".to_string(),
                    start: "pkg".to_string(),
                    language: "Typescript".to_string(),
                    file_name_suffix: "api".to_string(),
                    ..Default::default()
                },
            ],
            functional_templates: vec![FunctionalTemplate {
                id: "crud".to_string(),
                name: "crud".to_string(),
                file_template_ids: vec!["ft-go".to_string(), "ft-ts".to_string()],
                ..Default::default()
            }],
        }
    }

    pub fn store() -> Arc<MemoryStore> {
        Arc::new(MemoryStore::from_bundle(bundle()))
    }

    /// Catalog over [`bundle`], bulk-loaded.
    pub fn catalog() -> Arc<Catalog> {
        let catalog = Arc::new(Catalog::new(store()));
        catalog.load_all().unwrap();
        catalog
    }
}
