//! Implementation of `add-target`.
//!
//! Library targets get a test target alongside them unless told otherwise.
//! Dependency names are resolved against the package's own targets first,
//! then against the products of its local dependencies.

use anyhow::{Context, Result};

use crate::core::declaration::ListSlot;
use crate::core::manifest::Manifest;
use crate::core::registry::Registry;
use crate::core::target::TargetKind;
use crate::core::Summary;
use crate::ops::builders::{target_entry, NewTarget, TargetDependency};
use crate::ops::errors::EditError;
use crate::ops::scaffold::{scaffold, ScaffoldPlan};
use crate::ops::validate::{self, TargetOptions};
use crate::ops::{commit, load_manifest, EditOutcome};
use crate::util::context::EditorContext;

/// Options for adding a target.
#[derive(Debug, Clone)]
pub struct AddTargetOptions {
    pub name: String,

    /// Target type (library, executable, test, binary)
    pub kind: String,

    /// Names of targets or products the target depends on
    pub dependencies: Vec<String>,

    /// Custom source path, or the artifact path of a binary target
    pub path: Option<String>,

    /// Artifact URL of a binary target
    pub url: Option<String>,

    /// Artifact checksum of a binary target
    pub checksum: Option<String>,

    /// Don't add a test target for a library target
    pub no_test_target: bool,

    /// Print the result instead of writing it
    pub dry_run: bool,
}

impl Default for AddTargetOptions {
    fn default() -> Self {
        AddTargetOptions {
            name: String::new(),
            kind: TargetKind::Library.to_string(),
            dependencies: Vec::new(),
            path: None,
            url: None,
            checksum: None,
            no_test_target: false,
            dry_run: false,
        }
    }
}

/// Append `target`, and its test twin if any, to the manifest's targets.
pub fn add_target(
    manifest: &mut Manifest,
    target: &NewTarget,
    twin: Option<&NewTarget>,
) -> Result<(), EditError> {
    validate::new_target_name(manifest, &target.name, twin.map(|t| t.name.as_str()))?;

    for new in std::iter::once(target).chain(twin) {
        let style = manifest.list_style(ListSlot::Targets)?;
        let entry = target_entry(new, manifest.tools_version(), &style);
        manifest.append_entry(ListSlot::Targets, &entry)?;
    }
    Ok(())
}

/// Summaries of the dependencies a registry can read without fetching.
fn dependency_summaries(manifest: &Manifest, registry: &dyn Registry) -> Vec<(String, Summary)> {
    let mut summaries = Vec::new();
    for dep in manifest.dependencies() {
        let Some(location) = &dep.location else {
            continue;
        };
        match registry.query(location) {
            Ok(Some(summary)) => {
                let package = dep.name.clone().unwrap_or_else(|| summary.name().to_string());
                summaries.push((package, summary));
            }
            Ok(None) => {}
            Err(e) => tracing::warn!("skipping dependency {}: {:#}", location, e),
        }
    }
    summaries
}

/// Resolve dependency names to target or product references.
pub fn resolve_dependencies(
    manifest: &Manifest,
    names: &[String],
    registry: &dyn Registry,
) -> Result<Vec<TargetDependency>, EditError> {
    let mut summaries = None;
    let mut resolved = Vec::with_capacity(names.len());

    for name in names {
        if manifest.has_target(name) {
            resolved.push(TargetDependency::Target(name.clone()));
            continue;
        }

        let summaries = summaries.get_or_insert_with(|| dependency_summaries(manifest, registry));
        let Some((package, _)) = summaries.iter().find(|(_, s)| s.has_product(name)) else {
            return Err(EditError::UnknownTargetDependency {
                package: manifest.package_name().to_string(),
                name: name.clone(),
            });
        };
        resolved.push(TargetDependency::Product {
            name: name.clone(),
            package: package.clone(),
        });
    }

    Ok(resolved)
}

/// Add a target to the manifest under `ctx` and create its files.
pub fn run(
    ctx: &EditorContext,
    opts: &AddTargetOptions,
    registry: &dyn Registry,
) -> Result<EditOutcome> {
    let kind = validate::target_kind(&TargetOptions {
        kind: &opts.kind,
        has_dependencies: !opts.dependencies.is_empty(),
        path: opts.path.as_deref(),
        url: opts.url.as_deref(),
        checksum: opts.checksum.as_deref(),
    })?;

    let mut manifest = load_manifest(ctx)?;
    let layout = &ctx.config().layout;

    let target = NewTarget {
        name: opts.name.clone(),
        kind,
        dependencies: Vec::new(),
        path: opts.path.clone(),
        url: opts.url.clone(),
        checksum: opts.checksum.clone(),
    };
    let target = NewTarget {
        dependencies: resolve_dependencies(&manifest, &opts.dependencies, registry)?,
        ..target
    };
    let twin = (kind == TargetKind::Library && !opts.no_test_target)
        .then(|| target.test_twin(layout.test_suffix()));

    tracing::info!("adding {} target {}", kind, target.name);
    add_target(&mut manifest, &target, twin.as_ref())?;

    let mut plan = ScaffoldPlan::default();
    plan.add_target(&target, layout);
    if let Some(twin) = &twin {
        plan.add_target(twin, layout);
    }

    let mut outcome = commit(ctx, &manifest, opts.dry_run)?;
    if outcome.written && !plan.is_empty() {
        outcome.created = scaffold(ctx.root(), &plan).with_context(|| {
            format!(
                "{} was updated, but the files for target '{}' could not be created",
                outcome.manifest_path.display(),
                target.name
            )
        })?;
    }

    Ok(outcome)
}
