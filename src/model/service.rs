use serde::{Deserialize, Serialize};

/// A deployable unit grouping generated files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    pub name: String,
    pub display_name: String,
    pub package: String,
    pub params: String,
    pub tenant_id: String,
    pub project_id: String,
    pub code_files: Vec<CodeFile>,
    pub service_functionals: Vec<ServiceFunctional>,
}

/// One output file of a [`Service`], produced by a Start/Body/End chain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CodeFile {
    pub id: String,
    pub service_id: String,
    pub name: String,
    pub dir: String,
    pub package: String,
    pub metadata_id: String,
    pub start: String,
    pub end: String,
    pub body: Vec<String>,
    pub params: String,
    pub enable: bool,
    /// Rendered output, filled by generation.
    pub code: String,
    /// Concatenated template sources, filled by generation.
    pub template_content: String,
}

/// Binds a functional template to a Metadata inside a [`Service`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServiceFunctional {
    pub id: String,
    pub service_id: String,
    pub functional_template_id: String,
    pub metadata_id: String,
    pub params: String,
    /// Also emit API/menu/page JSON descriptors.
    pub gen_config: bool,
    pub enable: bool,
}

impl Service {
    pub fn enabled_code_files(&self) -> impl Iterator<Item = &CodeFile> {
        self.code_files.iter().filter(|c| c.enable)
    }

    pub fn enabled_functionals(&self) -> impl Iterator<Item = &ServiceFunctional> {
        self.service_functionals.iter().filter(|f| f.enable)
    }
}
