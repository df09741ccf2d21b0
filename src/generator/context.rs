use serde::Serialize;

use super::config::MenuConfig;
use crate::model::{CodeFile, Metadata, Service, Template};

/// Everything one template render can see.
///
/// Serialized with camelCase keys, so a template reads
/// `metadata.metadataFields`, `service.package`, `codeFile.dir`,
/// `template.name` and `config.apis`.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenContext<'a> {
    pub metadata: &'a Metadata,
    pub service: &'a Service,
    pub code_file: &'a CodeFile,
    pub template: &'a Template,
    /// Menu/API descriptors for `metadata`, shared by every render of one run.
    pub config: &'a MenuConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_camel_case_keys() {
        let md = Metadata {
            name: "Cell".into(),
            ..Default::default()
        };
        let service = Service {
            package: "mes".into(),
            ..Default::default()
        };
        let code_file = CodeFile {
            dir: "model".into(),
            ..Default::default()
        };
        let template = Template::default();
        let config = MenuConfig::default();
        let ctx = GenContext {
            metadata: &md,
            service: &service,
            code_file: &code_file,
            template: &template,
            config: &config,
        };
        let json = serde_json::to_value(ctx).unwrap();
        assert_eq!(json["metadata"]["name"], "Cell");
        assert_eq!(json["service"]["package"], "mes");
        assert_eq!(json["codeFile"]["dir"], "model");
        assert!(json["metadata"]["metadataFields"].is_array());
        assert!(json["config"]["apis"].is_array());
    }
}
