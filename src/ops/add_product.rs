//! Implementation of `add-product`.

use anyhow::Result;

use crate::core::declaration::ListSlot;
use crate::core::manifest::Manifest;
use crate::ops::builders::{product_entry, NewProduct};
use crate::ops::errors::EditError;
use crate::ops::validate;
use crate::ops::{commit, load_manifest, EditOutcome};
use crate::util::context::EditorContext;

/// Options for adding a product.
#[derive(Debug, Clone)]
pub struct AddProductOptions {
    pub name: String,

    /// Product type (library, static-library, dynamic-library, executable)
    pub kind: String,

    /// Targets bundled into the product, in order
    pub targets: Vec<String>,

    /// Print the result instead of writing it
    pub dry_run: bool,
}

impl Default for AddProductOptions {
    fn default() -> Self {
        AddProductOptions {
            name: String::new(),
            kind: "library".to_string(),
            targets: Vec::new(),
            dry_run: false,
        }
    }
}

/// Append `product` to the manifest's products.
pub fn add_product(manifest: &mut Manifest, product: &NewProduct) -> Result<(), EditError> {
    validate::new_product(manifest, &product.name, &product.targets)?;

    let style = manifest.list_style(ListSlot::Products)?;
    let entry = product_entry(product, &style);
    manifest.append_entry(ListSlot::Products, &entry)?;
    Ok(())
}

/// Add a product to the manifest under `ctx`.
pub fn run(ctx: &EditorContext, opts: &AddProductOptions) -> Result<EditOutcome> {
    let kind = validate::product_kind(&opts.kind)?;
    let mut manifest = load_manifest(ctx)?;

    let product = NewProduct {
        name: opts.name.clone(),
        kind,
        targets: opts.targets.clone(),
    };
    tracing::info!("adding {} product {}", kind, product.name);
    add_product(&mut manifest, &product)?;

    commit(ctx, &manifest, opts.dry_run)
}
