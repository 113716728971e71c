//! Test utilities for unit tests.
//!
//! Provides manifest fixtures, a throwaway package directory and an
//! in-memory registry so operations can be tested without real dependency
//! checkouts.

pub mod fixtures;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use tempfile::TempDir;

use crate::core::dependency::DependencyLocation;
use crate::core::manifest::MANIFEST_NAME;
use crate::core::registry::Registry;
use crate::core::Summary;
use crate::util::config::Config;
use crate::util::context::EditorContext;

/// In-memory registry keyed by locator.
#[derive(Debug, Clone, Default)]
pub struct MockRegistry {
    packages: HashMap<String, Summary>,
    broken: Vec<String>,
}

impl MockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a package at `locator` vending `products`.
    pub fn with_package(mut self, locator: &str, name: &str, products: &[&str]) -> Self {
        let products = products.iter().map(|p| p.to_string()).collect();
        self.packages
            .insert(locator.to_string(), Summary::new(name, products));
        self
    }

    /// Make queries for `locator` fail.
    pub fn with_broken(mut self, locator: &str) -> Self {
        self.broken.push(locator.to_string());
        self
    }
}

impl Registry for MockRegistry {
    fn query(&self, location: &DependencyLocation) -> Result<Option<Summary>> {
        let key = location.as_str();
        if self.broken.iter().any(|b| b == key) {
            bail!("failed to read file: {}/{}", key, MANIFEST_NAME);
        }
        Ok(self.packages.get(key).cloned())
    }
}

/// A package directory holding a manifest, removed on drop.
pub struct TestPackage {
    dir: TempDir,
}

impl TestPackage {
    pub fn new(manifest: &str) -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        std::fs::write(dir.path().join(MANIFEST_NAME), manifest).expect("failed to write manifest");
        TestPackage { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    /// Context with default configuration, ignoring any user config.
    pub fn context(&self) -> EditorContext {
        EditorContext::with_config(self.root(), Config::default())
    }

    /// Current manifest text.
    pub fn manifest(&self) -> String {
        std::fs::read_to_string(self.path(MANIFEST_NAME)).expect("failed to read manifest")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_registry() {
        let registry = MockRegistry::new()
            .with_package("../A", "A", &["ALib"])
            .with_broken("../B");

        let summary = registry
            .query(&DependencyLocation::parse("../A"))
            .unwrap()
            .unwrap();
        assert!(summary.has_product("ALib"));
        assert!(registry.query(&DependencyLocation::parse("../C")).unwrap().is_none());
        assert!(registry.query(&DependencyLocation::parse("../B")).is_err());
    }
}
