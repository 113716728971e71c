//! Package dependencies.
//!
//! A dependency is identified by where it lives: a remote repository URL or
//! a local path. Remote dependencies carry a version or revision requirement;
//! local ones are always used as they are on disk.

use std::fmt;
use std::path::{Component, Path};

use semver::Version;
use url::Url;

use crate::syntax::{quote, CallExpr};

/// Where a dependency's sources come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyLocation {
    /// A source control URL, kept exactly as written.
    Remote(String),
    /// A filesystem path, relative to the package root or absolute.
    Local(String),
}

impl DependencyLocation {
    /// Classify a locator given on the command line.
    ///
    /// Anything that parses as a URL with a real scheme (or looks like an
    /// scp-style `user@host:path`) is remote. Everything else is a path.
    pub fn parse(locator: &str) -> Self {
        if is_remote(locator) {
            DependencyLocation::Remote(locator.to_string())
        } else {
            DependencyLocation::Local(locator.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            DependencyLocation::Remote(s) | DependencyLocation::Local(s) => s,
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, DependencyLocation::Remote(_))
    }

    /// Identity derived from the last path component, lowercased and without
    /// a `.git` suffix.
    pub fn identity(&self) -> String {
        let trimmed = self.as_str().trim_end_matches(|c| c == '/' || c == '\\');
        let last = trimmed
            .rsplit(|c| c == '/' || c == '\\' || c == ':')
            .next()
            .unwrap_or(trimmed);
        last.strip_suffix(".git").unwrap_or(last).to_lowercase()
    }

    /// Whether two locators name the same dependency.
    pub fn same_as(&self, other: &DependencyLocation) -> bool {
        match (self, other) {
            (DependencyLocation::Remote(a), DependencyLocation::Remote(b)) => {
                normalize_url(a) == normalize_url(b)
            }
            (DependencyLocation::Local(a), DependencyLocation::Local(b)) => {
                local_components(a).eq(local_components(b))
            }
            _ => false,
        }
    }
}

impl fmt::Display for DependencyLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn is_remote(locator: &str) -> bool {
    match Url::parse(locator) {
        // Single letter schemes are Windows drive letters.
        Ok(url) => url.scheme().len() > 1,
        Err(_) => is_scp_like(locator),
    }
}

fn is_scp_like(locator: &str) -> bool {
    let Some((user_host, path)) = locator.split_once(':') else {
        return false;
    };
    let Some((user, host)) = user_host.split_once('@') else {
        return false;
    };
    !user.is_empty() && !host.is_empty() && !path.is_empty() && !user_host.contains('/')
}

fn local_components(path: &str) -> impl Iterator<Item = Component<'_>> {
    Path::new(path)
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
}

fn normalize_url(url: &str) -> String {
    let trimmed = url.trim_end_matches('/');
    trimmed
        .strip_suffix(".git")
        .unwrap_or(trimmed)
        .to_lowercase()
}

/// Version or revision constraint on a remote dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyRequirement {
    Exact(Version),
    /// `from:`, up to the next major version.
    UpToNextMajor(Version),
    UpToNextMinor(Version),
    /// Half-open range `lower..<upper`.
    Range { lower: Version, upper: Version },
    /// Closed range `lower...upper`.
    ClosedRange { lower: Version, upper: Version },
    Branch(String),
    Revision(String),
}

impl fmt::Display for DependencyRequirement {
    /// The requirement as it appears in a `.package(url:...)` call.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = |version: &Version| quote(&version.to_string());
        match self {
            DependencyRequirement::Exact(version) => write!(f, ".exact({})", v(version)),
            DependencyRequirement::UpToNextMajor(version) => write!(f, "from: {}", v(version)),
            DependencyRequirement::UpToNextMinor(version) => {
                write!(f, ".upToNextMinor(from: {})", v(version))
            }
            DependencyRequirement::Range { lower, upper } => {
                write!(f, "{}..<{}", v(lower), v(upper))
            }
            DependencyRequirement::ClosedRange { lower, upper } => {
                write!(f, "{}...{}", v(lower), v(upper))
            }
            DependencyRequirement::Branch(branch) => write!(f, ".branch({})", quote(branch)),
            DependencyRequirement::Revision(revision) => {
                write!(f, ".revision({})", quote(revision))
            }
        }
    }
}

/// A `.package(...)` entry read from the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyEntry {
    pub name: Option<String>,
    /// `None` when the locator is not a plain string literal.
    pub location: Option<DependencyLocation>,
}

impl DependencyEntry {
    pub fn from_call(call: &CallExpr) -> Option<Self> {
        if call.name().as_deref() != Some("package") {
            return None;
        }

        let location = call
            .string_arg("url")
            .map(DependencyLocation::Remote)
            .or_else(|| call.string_arg("path").map(DependencyLocation::Local));

        Some(DependencyEntry {
            name: call.string_arg("name"),
            location,
        })
    }

    /// Name other targets use to refer to this package.
    pub fn package_name(&self) -> Option<String> {
        self.name
            .clone()
            .or_else(|| self.location.as_ref().map(DependencyLocation::identity))
    }
}
