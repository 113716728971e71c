//! Build targets.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::core::tools_version::ToolsVersion;
use crate::syntax::CallExpr;

/// Kinds of target that can be added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    Library,
    Executable,
    Test,
    Binary,
}

impl TargetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetKind::Library => "library",
            TargetKind::Executable => "executable",
            TargetKind::Test => "test",
            TargetKind::Binary => "binary",
        }
    }

    /// Name of the `PackageDescription` factory used to declare the target.
    ///
    /// Executable targets only have their own factory from tools version 5.4
    /// on; older manifests declare them with `.target`.
    pub fn constructor(&self, tools_version: Option<&ToolsVersion>) -> &'static str {
        match self {
            TargetKind::Library => "target",
            TargetKind::Executable
                if tools_version.is_some_and(ToolsVersion::supports_executable_targets) =>
            {
                "executableTarget"
            }
            TargetKind::Executable => "target",
            TargetKind::Test => "testTarget",
            TargetKind::Binary => "binaryTarget",
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetKind {
    type Err = UnsupportedTargetType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "library" => Ok(TargetKind::Library),
            "executable" => Ok(TargetKind::Executable),
            "test" => Ok(TargetKind::Test),
            "binary" => Ok(TargetKind::Binary),
            _ => Err(UnsupportedTargetType(s.to_string())),
        }
    }
}

/// Error returned when parsing an unknown target type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported target type '{0}'; supported types are library, executable, test, and binary")]
pub struct UnsupportedTargetType(pub String);

/// Every target factory recognised when reading a manifest.
pub const TARGET_CONSTRUCTORS: &[&str] = &[
    "target",
    "executableTarget",
    "testTarget",
    "binaryTarget",
    "systemLibrary",
    "plugin",
    "macro",
];

/// A target declared in the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetEntry {
    pub name: String,
    /// Factory name, e.g. `testTarget`.
    pub constructor: String,
}

impl TargetEntry {
    /// Read a target from a call such as `.target(name: "A", ...)`.
    pub fn from_call(call: &CallExpr) -> Option<Self> {
        let constructor = call.name()?;
        if !TARGET_CONSTRUCTORS.contains(&constructor.as_str()) {
            return None;
        }
        Some(TargetEntry {
            name: call.string_arg("name")?,
            constructor,
        })
    }
}
