use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{GenError, Result};

/// Writes generated files under `{root}/{package}/{dir}/{name}`.
#[derive(Debug, Clone)]
pub struct OutputWriter {
    root: PathBuf,
}

impl OutputWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding everything generated for `package`.
    pub fn package_dir(&self, package: &str) -> PathBuf {
        self.root.join(package)
    }

    /// Create the directory chain and write `contents`, replacing any
    /// existing file.
    pub fn write(&self, package: &str, dir: &str, name: &str, contents: &str) -> Result<PathBuf> {
        let dir = self.package_dir(package).join(dir);
        fs::create_dir_all(&dir).map_err(|e| GenError::io(&dir, e))?;
        let path = dir.join(name);
        fs::write(&path, contents).map_err(|e| GenError::io(&path, e))?;
        info!(path = %path.display(), bytes = contents.len(), "wrote generated file");
        Ok(path)
    }
}
