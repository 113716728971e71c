//! Registry trait - looking up dependency packages.
//!
//! Adding a dependency, or a target that uses one of its products, needs to
//! know what the dependency package is called and which products it vends.
//! A registry answers that from wherever it can see the package.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::dependency::DependencyLocation;
use crate::core::manifest::{Manifest, MANIFEST_NAME};
use crate::core::Summary;
use crate::util::fs;

/// A source of dependency package metadata.
pub trait Registry {
    /// Summarise the package at `location`.
    ///
    /// Returns `Ok(None)` when the package cannot be inspected without
    /// fetching it.
    fn query(&self, location: &DependencyLocation) -> Result<Option<Summary>>;
}

/// Reads local dependencies straight from disk.
///
/// Relative paths are resolved against the package root. Remote packages
/// are never fetched.
#[derive(Debug, Clone)]
pub struct PathRegistry {
    root: PathBuf,
}

impl PathRegistry {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        PathRegistry { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn manifest_path(&self, path: &str) -> PathBuf {
        self.root.join(path).join(MANIFEST_NAME)
    }
}

impl Registry for PathRegistry {
    fn query(&self, location: &DependencyLocation) -> Result<Option<Summary>> {
        let DependencyLocation::Local(path) = location else {
            tracing::debug!("not fetching remote package {}", location);
            return Ok(None);
        };

        let manifest_path = self.manifest_path(path);
        let text = fs::read_to_string(&manifest_path)?;
        let manifest = Manifest::load(&text)
            .with_context(|| format!("failed to parse {}", manifest_path.display()))?;

        tracing::debug!(
            "read dependency {} from {}",
            manifest.package_name(),
            manifest_path.display()
        );
        Ok(Some(Summary::from_manifest(&manifest)))
    }
}
