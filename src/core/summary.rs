//! Summary - what a dependency's manifest says about itself.
//!
//! Only the package name and product names are needed to reference a
//! dependency from this package, so that is all a summary keeps.

use crate::core::manifest::Manifest;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    name: String,
    products: Vec<String>,
}

impl Summary {
    pub fn new(name: impl Into<String>, products: Vec<String>) -> Self {
        Summary {
            name: name.into(),
            products,
        }
    }

    /// Summarise a loaded manifest.
    pub fn from_manifest(manifest: &Manifest) -> Self {
        let products = manifest
            .products()
            .into_iter()
            .map(|product| product.name)
            .collect();
        Summary::new(manifest.package_name(), products)
    }

    /// Get the package name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the product names.
    pub fn products(&self) -> &[String] {
        &self.products
    }

    pub fn has_product(&self, name: &str) -> bool {
        self.products.iter().any(|p| p == name)
    }
}
