//! Validation of edit options and of the manifest state they apply to.
//!
//! Option checks take no manifest and run before it is read. State checks
//! take the loaded manifest and run before it is changed.

use semver::Version;

use crate::core::dependency::{DependencyLocation, DependencyRequirement};
use crate::core::manifest::Manifest;
use crate::core::product::ProductKind;
use crate::core::target::TargetKind;
use crate::ops::errors::EditError;

/// Requirement flags as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct RequirementOptions {
    pub exact: Option<String>,
    pub revision: Option<String>,
    pub branch: Option<String>,
    pub from: Option<String>,
    pub up_to_next_minor_from: Option<String>,
    pub to: Option<String>,
    pub through: Option<String>,
}

impl RequirementOptions {
    fn count(&self) -> usize {
        [
            &self.exact,
            &self.revision,
            &self.branch,
            &self.from,
            &self.up_to_next_minor_from,
        ]
        .iter()
        .filter(|o| o.is_some())
        .count()
    }
}

fn version(text: &str) -> Result<Version, EditError> {
    Version::parse(text).map_err(|e| EditError::InvalidVersion {
        version: text.to_string(),
        reason: e.to_string(),
    })
}

/// Turn requirement flags into a requirement. Returns `None` when no
/// requirement was given.
pub fn requirement(opts: &RequirementOptions) -> Result<Option<DependencyRequirement>, EditError> {
    if opts.count() > 1 {
        return Err(EditError::MultipleRequirements);
    }
    let bounded = opts.to.is_some() || opts.through.is_some();
    if bounded && opts.from.is_none() {
        return Err(EditError::RangeWithoutFrom);
    }
    if opts.to.is_some() && opts.through.is_some() {
        return Err(EditError::ToAndThrough);
    }

    let requirement = if let Some(v) = &opts.exact {
        DependencyRequirement::Exact(version(v)?)
    } else if let Some(rev) = &opts.revision {
        DependencyRequirement::Revision(rev.clone())
    } else if let Some(branch) = &opts.branch {
        DependencyRequirement::Branch(branch.clone())
    } else if let Some(v) = &opts.up_to_next_minor_from {
        DependencyRequirement::UpToNextMinor(version(v)?)
    } else if let Some(from) = &opts.from {
        let lower = version(from)?;
        match (&opts.to, &opts.through) {
            (Some(to), _) => {
                let upper = version(to)?;
                check_range(&lower, &upper)?;
                DependencyRequirement::Range { lower, upper }
            }
            (_, Some(through)) => {
                let upper = version(through)?;
                check_range(&lower, &upper)?;
                DependencyRequirement::ClosedRange { lower, upper }
            }
            _ => DependencyRequirement::UpToNextMajor(lower),
        }
    } else {
        return Ok(None);
    };

    Ok(Some(requirement))
}

fn check_range(lower: &Version, upper: &Version) -> Result<(), EditError> {
    if lower >= upper {
        return Err(EditError::EmptyRange {
            lower: lower.to_string(),
            upper: upper.to_string(),
        });
    }
    Ok(())
}

/// A requirement is needed for remote packages and meaningless for local ones.
pub fn requirement_for(
    location: &DependencyLocation,
    requirement: Option<&DependencyRequirement>,
) -> Result<(), EditError> {
    match (location.is_remote(), requirement) {
        (true, None) => Err(EditError::MissingRequirement {
            locator: location.to_string(),
        }),
        (false, Some(_)) => Err(EditError::RequirementForLocalDependency {
            locator: location.to_string(),
        }),
        _ => Ok(()),
    }
}

/// Target flags that need checking before the manifest is read.
#[derive(Debug, Clone, Default)]
pub struct TargetOptions<'a> {
    pub kind: &'a str,
    pub has_dependencies: bool,
    pub path: Option<&'a str>,
    pub url: Option<&'a str>,
    pub checksum: Option<&'a str>,
}

pub fn target_kind(opts: &TargetOptions<'_>) -> Result<TargetKind, EditError> {
    let kind: TargetKind = opts.kind.parse()?;

    if kind == TargetKind::Binary {
        if opts.has_dependencies {
            return Err(EditError::DependenciesOnBinary);
        }
        let remote = opts.path.is_none() && opts.url.is_some() && opts.checksum.is_some();
        let local = opts.path.is_some() && opts.url.is_none() && opts.checksum.is_none();
        if !remote && !local {
            return Err(EditError::BinaryTargetSource);
        }
    } else {
        if opts.checksum.is_some() {
            return Err(EditError::ChecksumRequiresBinary);
        }
        if opts.url.is_some() {
            return Err(EditError::UrlRequiresBinary);
        }
    }

    Ok(kind)
}

/// Check that `name`, and its test twin when one will be added, are free.
pub fn new_target_name(
    manifest: &Manifest,
    name: &str,
    twin: Option<&str>,
) -> Result<(), EditError> {
    for candidate in std::iter::once(name).chain(twin) {
        if manifest.has_target(candidate) {
            return Err(EditError::DuplicateTarget {
                package: manifest.package_name().to_string(),
                name: candidate.to_string(),
            });
        }
    }
    Ok(())
}

pub fn product_kind(kind: &str) -> Result<ProductKind, EditError> {
    Ok(kind.parse()?)
}

pub fn new_product(manifest: &Manifest, name: &str, targets: &[String]) -> Result<(), EditError> {
    if targets.is_empty() {
        return Err(EditError::EmptyProduct {
            name: name.to_string(),
        });
    }
    if let Some(missing) = targets.iter().find(|t| !manifest.has_target(t)) {
        return Err(EditError::UnknownProductTarget {
            package: manifest.package_name().to_string(),
            product: name.to_string(),
            target: missing.clone(),
        });
    }
    if manifest.has_product(name) {
        return Err(EditError::DuplicateProduct {
            package: manifest.package_name().to_string(),
            name: name.to_string(),
        });
    }
    Ok(())
}

pub fn new_dependency(manifest: &Manifest, location: &DependencyLocation) -> Result<(), EditError> {
    let taken = manifest
        .dependencies()
        .iter()
        .filter_map(|d| d.location.as_ref())
        .any(|existing| existing.same_as(location));

    if taken {
        return Err(EditError::DuplicateDependency {
            package: manifest.package_name().to_string(),
            locator: location.to_string(),
        });
    }
    Ok(())
}
