//! # Generator Module
//!
//! The generator module turns one stored template plus one Metadata into
//! source text. It owns the rendering environment and every code-producing
//! helper a template can call.
//!
//! ## Overview
//!
//! A render combines:
//! - **Template** - user-authored minijinja source, stored in the catalog
//! - **Context** - [`GenContext`]: Metadata, Service, CodeFile, Template and
//!   the menu/API [`MenuConfig`] for the Metadata
//! - **Functions** - the closed [`TemplateFunction`] registry
//!
//! ```text
//! Catalog → GenContext → RenderEngine (minijinja + registry) → String
//! ```
//!
//! ## Function Families
//!
//! | Module         | Produces                                            |
//! |----------------|-----------------------------------------------------|
//! | [`sql`]        | `CREATE TABLE` DDL, column and index fragments      |
//! | [`golang`]     | gorm struct fields, query conditions, pb conversion |
//! | [`pb`]         | protobuf message and query-request properties       |
//! | [`typescript`] | class fields and default-value literals             |
//! | [`cascade`]    | Go cascade-delete functions (askama snippets)       |
//! | [`config`]     | API/menu/page deployment descriptors                |
//!
//! ## Template Example
//!
//! ```text
//! type {{ to_camel_case(metadata.name) }} struct {
//!     model.Model
//! {%- for field in metadata.metadataFields %}{{ gen_struct_field(field, metadata) }}{% endfor %}
//! }
//! ```
//!
//! ## Error Handling
//!
//! Unknown context keys fail the render (strict undefined behaviour), as do
//! unknown catalog IDs passed to the lookup functions. Dangling Metadata
//! references inside field generators only log a warning and render an empty
//! type name.

pub mod cascade;
pub mod config;
mod context;
mod engine;
mod functions;
pub mod golang;
pub mod pb;
pub mod sql;
pub mod typescript;

pub use config::{gen_menu_config, gen_page_config, MenuConfig, PageInfo};
pub use context::GenContext;
pub use engine::RenderEngine;
pub use functions::{register_all, TemplateFunction};
