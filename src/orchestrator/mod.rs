//! # Generation orchestrator
//!
//! Turns catalog entities into files. Every generated file is the output of a
//! [`TemplateChain`] (Start, Body templates in order, End) rendered against
//! one Metadata; the outputs are joined with a blank line.
//!
//! ## Entry points
//!
//! - [`Generator::gen_code`]: one template, one Metadata, returns the text
//! - [`Generator::gen_service`]: every enabled CodeFile and service
//!   functional of a Service, optionally written to disk
//! - [`Generator::gen_code_by_file_template`]: one FileTemplate chain
//! - [`Generator::gen_code_by_functional_template`]: every FileTemplate of a
//!   FunctionalTemplate, named after the Metadata
//!
//! ## Config memo
//!
//! Menu/API descriptors carry freshly generated IDs. Within one run they are
//! computed once per Metadata through a [`ConfigMemo`], so every file of the
//! run (and the deployment sidecars) agree on them. Separate runs never share
//! a memo.
//!
//! ## Failure model
//!
//! The first error (missing entity, template failure, I/O) aborts the run.
//! Files written before the failure stay on disk.

mod chain;
mod memo;
mod writer;

pub use chain::{ChainOutput, ChainStage, TemplateChain, CODE_JOINER, SOURCE_JOINER};
pub use memo::ConfigMemo;
pub use writer::OutputWriter;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use crate::catalog::Catalog;
use crate::config::GeneratorConfig;
use crate::convert::to_snake_case;
use crate::error::{EntityKind, GenError, Result};
use crate::generator::{gen_menu_config, gen_page_config, GenContext, RenderEngine};
use crate::model::{CodeFile, FileTemplate, FunctionalTemplate, Language, Metadata, Service};
use chain::render_chain;

/// Output root used when none is configured.
pub const DEFAULT_OUTPUT_DIR: &str = "./temp";
/// Service name used by functional-template runs outside a service.
pub const DEFAULT_SERVICE_NAME: &str = "service";
/// Service package used by functional-template runs outside a service.
pub const DEFAULT_SERVICE_PACKAGE: &str = "package";
/// Directory (inside the package) receiving API/menu/page descriptors.
pub const DEPLOYMENT_DIR: &str = "deployment";

/// One file produced by a functional template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedFile {
    pub dir: String,
    pub name: String,
    pub template_content: String,
    pub code: String,
}

/// Result of [`Generator::gen_service`].
#[derive(Debug, Clone)]
pub struct ServiceOutput {
    /// The service with `code` and `template_content` filled on every
    /// enabled CodeFile.
    pub service: Service,
    /// `{output root}/{package}`.
    pub dir: PathBuf,
    /// Files produced by the service functionals, in order.
    pub functional_files: Vec<GeneratedFile>,
    /// Paths written to disk, empty unless writing was requested.
    pub written: Vec<PathBuf>,
}

pub struct Generator {
    engine: RenderEngine,
    writer: OutputWriter,
    default_service: Service,
}

impl Generator {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            engine: RenderEngine::new(catalog),
            writer: OutputWriter::new(DEFAULT_OUTPUT_DIR),
            default_service: Service {
                name: DEFAULT_SERVICE_NAME.to_string(),
                package: DEFAULT_SERVICE_PACKAGE.to_string(),
                ..Default::default()
            },
        }
    }

    pub fn from_config(catalog: Arc<Catalog>, config: &GeneratorConfig) -> Self {
        Self::new(catalog)
            .with_output_root(&config.output_dir)
            .with_default_service(&config.default_service_name, &config.default_service_package)
    }

    pub fn with_output_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.writer = OutputWriter::new(root);
        self
    }

    pub fn with_default_service(mut self, name: &str, package: &str) -> Self {
        self.default_service.name = name.to_string();
        self.default_service.package = package.to_string();
        self
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        self.engine.catalog()
    }

    pub fn engine(&self) -> &RenderEngine {
        &self.engine
    }

    pub fn output_root(&self) -> &Path {
        self.writer.root()
    }

    /// Render one template against one Metadata.
    ///
    /// The context carries a Service and CodeFile holding only the Metadata's
    /// package, and a menu config generated for this call alone.
    pub fn gen_code(&self, template_id: &str, metadata_id: &str) -> Result<String> {
        let catalog = self.catalog();
        let template = catalog.template_by_id(template_id)?;
        let md = catalog.metadata_by_id(metadata_id)?;
        let service = Service {
            package: md.package.clone(),
            ..Default::default()
        };
        let code_file = CodeFile {
            package: md.package.clone(),
            ..Default::default()
        };
        let config = gen_menu_config(&service, &md);
        let ctx = GenContext {
            metadata: &md,
            service: &service,
            code_file: &code_file,
            template: &template,
            config: &config,
        };
        self.engine.render(&template, &ctx)
    }

    /// Generate every enabled CodeFile and service functional of a Service.
    pub fn gen_service(&self, service_id: &str, write_to_disk: bool) -> Result<ServiceOutput> {
        let mut service = self
            .catalog()
            .store()
            .service_by_id(service_id)?
            .ok_or_else(|| GenError::not_found(EntityKind::Service, service_id))?;
        info!(
            service = %service.name,
            package = %service.package,
            write_to_disk,
            "generating service"
        );

        let mut memo = ConfigMemo::new();
        let mut written = Vec::new();

        for i in 0..service.code_files.len() {
            let source = service.code_files[i].clone();
            if !source.enable {
                continue;
            }
            let md = self.catalog().metadata_by_id(&source.metadata_id)?;
            let mut file = source.clone();
            file.code.clear();
            file.template_content.clear();
            render_chain(
                &self.engine,
                TemplateChain::from_code_file(&source),
                &md,
                &service,
                &mut file,
                &mut memo,
            )?;
            if write_to_disk {
                written.push(
                    self.writer
                        .write(&service.package, &file.dir, &file.name, &file.code)?,
                );
            }
            service.code_files[i] = file;
        }

        let functionals: Vec<_> = service.enabled_functionals().cloned().collect();
        let mut functional_files = Vec::new();
        for functional in functionals {
            let template = self.functional_template(&functional.functional_template_id)?;
            let md = self.catalog().metadata_by_id(&functional.metadata_id)?;
            let files = self.functional_files(&template, &md, &service, &mut memo)?;
            if write_to_disk {
                for file in &files {
                    written.push(
                        self.writer
                            .write(&service.package, &file.dir, &file.name, &file.code)?,
                    );
                }
                if functional.gen_config {
                    written.extend(self.write_deployment_config(&service, &md, &mut memo)?);
                }
            }
            functional_files.extend(files);
        }

        info!(
            service = %service.name,
            metadata = memo.len(),
            written = written.len(),
            "service generated"
        );
        Ok(ServiceOutput {
            dir: self.writer.package_dir(&service.package),
            service,
            functional_files,
            written,
        })
    }

    /// Run one FileTemplate chain for a Metadata.
    pub fn gen_code_by_file_template(
        &self,
        file_template: &FileTemplate,
        metadata_id: &str,
    ) -> Result<ChainOutput> {
        let md = self.catalog().metadata_by_id(metadata_id)?;
        let service = Service {
            package: file_template.package.clone(),
            ..Default::default()
        };
        let mut code_file = CodeFile {
            package: file_template.package.clone(),
            ..Default::default()
        };
        render_chain(
            &self.engine,
            TemplateChain::from_file_template(file_template),
            &md,
            &service,
            &mut code_file,
            &mut ConfigMemo::new(),
        )
    }

    pub fn gen_code_by_file_template_id(
        &self,
        file_template_id: &str,
        metadata_id: &str,
    ) -> Result<ChainOutput> {
        let file_template = self.file_template(file_template_id)?;
        self.gen_code_by_file_template(&file_template, metadata_id)
    }

    /// Generate every FileTemplate of a FunctionalTemplate for a Metadata.
    ///
    /// Without a service the configured default name and package are used.
    pub fn gen_code_by_functional_template(
        &self,
        functional_template: &FunctionalTemplate,
        metadata_id: &str,
        service: Option<&Service>,
    ) -> Result<Vec<GeneratedFile>> {
        let md = self.catalog().metadata_by_id(metadata_id)?;
        let service = service.unwrap_or(&self.default_service);
        self.functional_files(functional_template, &md, service, &mut ConfigMemo::new())
    }

    pub fn gen_code_by_functional_template_id(
        &self,
        functional_template_id: &str,
        metadata_id: &str,
        service: Option<&Service>,
    ) -> Result<Vec<GeneratedFile>> {
        let template = self.functional_template(functional_template_id)?;
        self.gen_code_by_functional_template(&template, metadata_id, service)
    }

    fn functional_files(
        &self,
        functional_template: &FunctionalTemplate,
        md: &Metadata,
        service: &Service,
        memo: &mut ConfigMemo,
    ) -> Result<Vec<GeneratedFile>> {
        let mut files = Vec::with_capacity(functional_template.file_template_ids.len());
        for id in &functional_template.file_template_ids {
            let file_template = self.file_template(id)?;
            let mut code_file = CodeFile {
                name: file_template.name.clone(),
                dir: file_template.dir.clone(),
                package: file_template.package.clone(),
                params: file_template.params.clone(),
                ..Default::default()
            };
            let out = render_chain(
                &self.engine,
                TemplateChain::from_file_template(&file_template),
                md,
                service,
                &mut code_file,
                memo,
            )?;
            files.push(GeneratedFile {
                dir: file_template.dir.clone(),
                name: functional_file_name(
                    &md.name,
                    &file_template.file_name_suffix,
                    &file_template.language,
                ),
                template_content: out.template_content,
                code: out.code,
            });
        }
        Ok(files)
    }

    /// Write `{Name}API.json`, `{Name}Menu.json` and `{Name}Page.json`.
    fn write_deployment_config(
        &self,
        service: &Service,
        md: &Metadata,
        memo: &mut ConfigMemo,
    ) -> Result<Vec<PathBuf>> {
        let config = memo.get_or_generate(service, md);
        let apis = serde_json::to_string_pretty(&config.apis)?;
        let menu = serde_json::to_string_pretty(&config.menu)?;
        let page = serde_json::to_string_pretty(&gen_page_config(service, md))?;
        [("API", apis), ("Menu", menu), ("Page", page)]
            .into_iter()
            .map(|(kind, json)| {
                let name = format!("{}{kind}.json", md.name);
                self.writer
                    .write(&service.package, DEPLOYMENT_DIR, &name, &json)
            })
            .collect()
    }

    fn file_template(&self, id: &str) -> Result<FileTemplate> {
        self.catalog()
            .store()
            .file_template_by_id(id)?
            .ok_or_else(|| GenError::not_found(EntityKind::FileTemplate, id))
    }

    fn functional_template(&self, id: &str) -> Result<FunctionalTemplate> {
        self.catalog()
            .store()
            .functional_template_by_id(id)?
            .ok_or_else(|| GenError::not_found(EntityKind::FunctionalTemplate, id))
    }
}

/// `{snake(md_name)}[_{suffix}]{extension}`.
pub fn functional_file_name(md_name: &str, suffix: &str, language: &str) -> String {
    let mut name = to_snake_case(md_name);
    if !suffix.is_empty() {
        name.push('_');
        name.push_str(suffix);
    }
    let language: Language = match language.parse() {
        Ok(lang) => lang,
        Err(never) => match never {},
    };
    name.push_str(language.extension());
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn functional_file_names() {
        assert_eq!(functional_file_name("ProductionLine", "", "Golang"), "production_line.go");
        assert_eq!(functional_file_name("Cell", "api", "Typescript"), "cell_api.ts");
        assert_eq!(functional_file_name("Cell", "page", "React"), "cell_page.tsx");
        assert_eq!(functional_file_name("Cell", "", "Markdown"), "cell");
    }
}
