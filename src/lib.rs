//! # metagen
//!
//! **metagen** is a metadata-driven code generator. It renders user-authored,
//! catalog-stored templates against declarative data-model descriptions
//! ("Metadata") to produce Go structs and handlers, SQL DDL, Protobuf
//! messages, TypeScript classes and UI menu/page descriptors.
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//!
//! - **[`model`]** - Metadata, fields, templates, services and their serde shapes
//! - **[`catalog`]** - Concurrent Metadata/Template cache reading through to a [`catalog::MetadataStore`]
//! - **[`resolver`]** - Reference-graph walks: unique keys, preloads, related Metadata
//! - **[`convert`]** - Identifier casing and logical type → target type mapping
//! - **[`generator`]** - minijinja rendering engine plus the generator function registry
//! - **[`orchestrator`]** - Start/Body/End template chains, services and functional templates
//! - **[`config`]**, **[`logging`]**, **[`cli`]** - The `metagen` binary's ambient stack
//!
//! ### Generation Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant User
//!     participant CLI as CLI<br/>(metagen)
//!     participant Store as MemoryStore
//!     participant Catalog
//!     participant Gen as orchestrator::Generator
//!     participant Engine as generator::RenderEngine
//!     participant FS as File System
//!
//!     User->>CLI: metagen --bundle catalog.yaml gen-service -s svc --write
//!     CLI->>Store: open(catalog.yaml)
//!     CLI->>Catalog: load_all()
//!     Catalog->>Catalog: sort fields, init_gen_code<br/>(unique key, preloads)
//!     CLI->>Gen: gen_service(svc, true)
//!     loop every enabled CodeFile
//!         Gen->>Catalog: metadata_by_id / template_by_id
//!         Gen->>Engine: render(Start), render(Body...), render(End)
//!         Engine-->>Gen: text, joined by "\n\n"
//!         Gen->>FS: {output}/{package}/{dir}/{name}
//!     end
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use metagen::catalog::{Catalog, MemoryStore};
//! use metagen::model::{Metadata, MetadataField, Template};
//! use metagen::orchestrator::Generator;
//!
//! let catalog = Arc::new(Catalog::new(Arc::new(MemoryStore::new())));
//! catalog.put_metadata(Metadata {
//!     id: "cell".into(),
//!     name: "Cell".into(),
//!     metadata_fields: vec![MetadataField {
//!         name: "Name".into(),
//!         ty: "varchar".into(),
//!         ..Default::default()
//!     }],
//!     ..Default::default()
//! });
//! catalog.put_template(Template {
//!     id: "ddl".into(),
//!     name: "ddl".into(),
//!     content: "{{ gen_create_column_sql(metadata.metadataFields[0]) }}".into(),
//!     ..Default::default()
//! });
//!
//! let generator = Generator::new(catalog);
//! let sql = generator.gen_code("ddl", "cell").unwrap();
//! assert_eq!(sql, "`name` varchar(100) NULL COMMENT '' DEFAULT NULL");
//! ```
//!
//! ## Templates
//!
//! Templates are minijinja source. The context exposes `metadata`,
//! `service`, `codeFile`, `template` and `config` with camelCase keys, and
//! every function of [`generator::TemplateFunction`] is callable:
//!
//! ```text
//! CREATE TABLE `{{ table_name(metadata.name) }}` ({{ gen_create_sql(metadata) }}
//! ) ENGINE=InnoDB;
//! ```
//!
//! Unknown keys fail the render. A reference to a Metadata that no longer
//! exists renders as an empty type name and logs a warning.
//!
//! ## Concurrency
//!
//! [`catalog::Catalog`] is `Send + Sync` and meant to be shared as
//! `Arc<Catalog>`. Rendering is synchronous and holds no catalog locks.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod convert;
pub mod error;
pub mod generator;
pub mod ids;
pub mod logging;
pub mod model;
pub mod orchestrator;
pub mod resolver;

pub use catalog::{Catalog, MemoryStore, MetadataStore};
pub use error::{GenError, Result};
pub use generator::{GenContext, RenderEngine, TemplateFunction};
pub use orchestrator::{Generator, ServiceOutput};
