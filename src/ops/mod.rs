//! High-level operations.
//!
//! This module contains the implementation of the editing commands. Each
//! command has a pure engine working on a loaded [`Manifest`] and a `run`
//! pipeline that reads the manifest, validates, edits and writes it back.

use std::path::PathBuf;

use anyhow::Result;

use crate::core::manifest::Manifest;
use crate::util::context::EditorContext;
use crate::util::fs;

pub mod add_dependency;
pub mod add_product;
pub mod add_target;
pub mod builders;
pub mod errors;
pub mod scaffold;
pub mod validate;

pub use add_dependency::{add_dependency, AddDependencyOptions};
pub use add_product::{add_product, AddProductOptions};
pub use add_target::{add_target, AddTargetOptions};
pub use builders::{NewDependency, NewProduct, NewTarget, TargetDependency};
pub use errors::EditError;
pub use scaffold::{scaffold, ScaffoldError, ScaffoldPlan};
pub use validate::RequirementOptions;

/// What one edit did.
#[derive(Debug, Clone)]
pub struct EditOutcome {
    pub manifest_path: PathBuf,
    /// The manifest after the edit.
    pub rendered: String,
    /// False for dry runs.
    pub written: bool,
    /// Files created by scaffolding.
    pub created: Vec<PathBuf>,
}

/// Read and parse the manifest under the context root.
pub(crate) fn load_manifest(ctx: &EditorContext) -> Result<Manifest> {
    let text = ctx.read_manifest()?;
    let manifest = Manifest::load_with_indent(&text, &ctx.config().fallback_indent())?;
    Ok(manifest)
}

/// Render `manifest` and, unless this is a dry run, write it back.
pub(crate) fn commit(ctx: &EditorContext, manifest: &Manifest, dry_run: bool) -> Result<EditOutcome> {
    let manifest_path = ctx.manifest_path();
    let rendered = manifest.render();

    if dry_run {
        tracing::debug!("dry run, not writing {}", manifest_path.display());
    } else {
        fs::write_atomic(&manifest_path, &rendered)?;
        tracing::debug!("wrote {}", manifest_path.display());
    }

    Ok(EditOutcome {
        manifest_path,
        rendered,
        written: !dry_run,
        created: Vec::new(),
    })
}
