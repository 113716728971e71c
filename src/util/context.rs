//! Context shared by every edit.
//!
//! Bundles the package root with the configuration that applies to it.
//! Nothing here is process-wide: the root is always passed in explicitly.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::manifest::MANIFEST_NAME;
use crate::core::registry::PathRegistry;
use crate::util::config::{global_config_path, load_config, project_config_path, Config};
use crate::util::fs;

/// Root and configuration for one invocation.
#[derive(Debug, Clone)]
pub struct EditorContext {
    /// Directory containing `Package.swift`
    root: PathBuf,

    /// Merged global and project configuration
    config: Config,
}

impl EditorContext {
    /// Create a context for the package at `root`, loading its configuration.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()
                .context("failed to get current directory")?
                .join(root)
        };

        let project = project_config_path(&root);
        let config = match global_config_path() {
            Some(global) => load_config(&global, &project),
            None => load_config(Path::new(""), &project),
        };

        tracing::debug!("package root: {}", root.display());
        Ok(EditorContext { root, config })
    }

    /// Create a context with an explicit configuration.
    pub fn with_config(root: impl Into<PathBuf>, config: Config) -> Self {
        EditorContext {
            root: root.into(),
            config,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Path of the manifest being edited.
    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(MANIFEST_NAME)
    }

    /// Read the manifest text.
    pub fn read_manifest(&self) -> Result<String> {
        fs::read_to_string(&self.manifest_path())
    }

    /// `path` relative to the package root, for display.
    pub fn relative(&self, path: &Path) -> PathBuf {
        fs::relative_path(&self.root, path)
    }

    /// Registry reading dependencies relative to the package root.
    pub fn registry(&self) -> PathRegistry {
        PathRegistry::new(&self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_context_paths() {
        let tmp = TempDir::new().unwrap();
        let ctx = EditorContext::with_config(tmp.path(), Config::default());

        assert_eq!(ctx.manifest_path(), tmp.path().join("Package.swift"));
        assert_eq!(
            ctx.relative(&tmp.path().join("Sources/A/A.swift")),
            PathBuf::from("Sources/A/A.swift")
        );
        assert_eq!(ctx.registry().root(), tmp.path());
    }

    #[test]
    fn test_project_config_is_loaded() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join(".swift-package-editor");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("config.toml"), "[layout]\ntests_dir = \"Checks\"\n").unwrap();

        let ctx = EditorContext::new(tmp.path()).unwrap();
        assert_eq!(ctx.config().layout.tests_dir(), "Checks");
    }
}
