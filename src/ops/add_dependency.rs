//! Implementation of `add-dependency`.

use anyhow::Result;

use crate::core::declaration::ListSlot;
use crate::core::dependency::DependencyLocation;
use crate::core::manifest::Manifest;
use crate::core::registry::Registry;
use crate::ops::builders::{dependency_entry, NewDependency};
use crate::ops::errors::EditError;
use crate::ops::validate::{self, RequirementOptions};
use crate::ops::{commit, load_manifest, EditOutcome};
use crate::util::context::EditorContext;

/// Options for adding a dependency.
#[derive(Debug, Clone, Default)]
pub struct AddDependencyOptions {
    /// Path or URL of the package
    pub locator: String,

    /// Version requirement flags
    pub requirement: RequirementOptions,

    /// Print the result instead of writing it
    pub dry_run: bool,
}

/// Append `dep` to the manifest's dependencies.
pub fn add_dependency(manifest: &mut Manifest, dep: &NewDependency) -> Result<(), EditError> {
    validate::new_dependency(manifest, &dep.location)?;
    manifest.append_entry(ListSlot::Dependencies, &dependency_entry(dep))?;
    Ok(())
}

/// Add a dependency to the manifest under `ctx`.
pub fn run(
    ctx: &EditorContext,
    opts: &AddDependencyOptions,
    registry: &dyn Registry,
) -> Result<EditOutcome> {
    let requirement = validate::requirement(&opts.requirement)?;
    let location = DependencyLocation::parse(&opts.locator);
    validate::requirement_for(&location, requirement.as_ref())?;

    let mut manifest = load_manifest(ctx)?;
    validate::new_dependency(&manifest, &location)?;

    let name = match registry.query(&location) {
        Ok(summary) => summary.map(|s| s.name().to_string()),
        Err(e) => {
            return Err(EditError::DependencyManifestUnavailable {
                locator: location.to_string(),
                reason: format!("{:#}", e),
            }
            .into())
        }
    };

    let dep = NewDependency {
        name,
        location,
        requirement,
    };
    tracing::info!("adding dependency on {}", dep.location);
    add_dependency(&mut manifest, &dep)?;

    commit(ctx, &manifest, opts.dry_run)
}
