//! # Generator Configuration
//!
//! Optional `metagen.toml` settings for the CLI and the [`Generator`]
//! facade, with environment overrides on top.
//!
//! ```toml
//! output_dir = "./generated"
//! bundle = "catalog.yaml"
//! default_service_name = "service"
//! default_service_package = "package"
//! ```
//!
//! ## Environment Variables
//!
//! - `METAGEN_OUTPUT_DIR` overrides `output_dir`
//! - `METAGEN_BUNDLE` overrides `bundle`
//!
//! [`Generator`]: crate::orchestrator::Generator

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::orchestrator::{DEFAULT_OUTPUT_DIR, DEFAULT_SERVICE_NAME, DEFAULT_SERVICE_PACKAGE};

/// Conventional config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "metagen.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Root under which `{package}/{dir}/{file}` is written
    pub output_dir: PathBuf,
    /// Catalog bundle (YAML or JSON) to load at startup
    pub bundle: Option<PathBuf>,
    pub default_service_name: String,
    pub default_service_package: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            bundle: None,
            default_service_name: DEFAULT_SERVICE_NAME.to_string(),
            default_service_package: DEFAULT_SERVICE_PACKAGE.to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Load `path` if it exists (defaults otherwise), then apply env overrides.
    pub fn resolve(path: &Path) -> anyhow::Result<Self> {
        let mut config = load_config(path)?.unwrap_or_default();
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply `METAGEN_*` overrides read through `var`.
    pub fn apply_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = var("METAGEN_OUTPUT_DIR").filter(|v| !v.is_empty()) {
            self.output_dir = PathBuf::from(dir);
        }
        if let Some(bundle) = var("METAGEN_BUNDLE").filter(|v| !v.is_empty()) {
            self.bundle = Some(PathBuf::from(bundle));
        }
    }
}

/// Load generator configuration from a TOML file
///
/// Returns `Ok(None)` if the file doesn't exist (not an error), `Err` if it
/// exists but fails to read or parse.
pub fn load_config(path: &Path) -> anyhow::Result<Option<GeneratorConfig>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read generator config: {}", path.display()))?;

    let config: GeneratorConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse generator config: {}", path.display()))?;

    Ok(Some(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn missing_file_is_not_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(load_config(&tmp.path().join("metagen.toml")).unwrap().is_none());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("metagen.toml");
        std::fs::write(&path, "output_dir = \"out\"\n").unwrap();
        let config = load_config(&path).unwrap().unwrap();
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.default_service_name, "service");
        assert_eq!(config.default_service_package, "package");
        assert!(config.bundle.is_none());
    }

    #[test]
    fn malformed_file_reports_path() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("metagen.toml");
        std::fs::write(&path, "output_dir = [").unwrap();
        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse generator config"));
    }

    #[test]
    fn env_overrides_win() {
        let vars = HashMap::from([
            ("METAGEN_OUTPUT_DIR", "/tmp/gen"),
            ("METAGEN_BUNDLE", "b.json"),
        ]);
        let mut config = GeneratorConfig::default();
        config.apply_overrides(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.output_dir, PathBuf::from("/tmp/gen"));
        assert_eq!(config.bundle, Some(PathBuf::from("b.json")));

        let mut untouched = GeneratorConfig::default();
        untouched.apply_overrides(|_| Some(String::new()));
        assert_eq!(untouched, GeneratorConfig::default());
    }
}
