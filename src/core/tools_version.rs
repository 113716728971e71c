//! The `// swift-tools-version:` header.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use semver::Version;

static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^//\s*swift-tools-version\s*:\s*(\d+)(?:\.(\d+))?(?:\.(\d+))?")
        .expect("tools version pattern is valid")
});

/// Tools version declared on the first line of a manifest.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ToolsVersion(Version);

impl ToolsVersion {
    /// First version that understands `.executableTarget`.
    pub const EXECUTABLE_TARGETS: ToolsVersion = ToolsVersion(Version::new(5, 4, 0));

    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        ToolsVersion(Version::new(major, minor, patch))
    }

    /// Read the version from the manifest header, if there is one.
    pub fn from_manifest(source: &str) -> Option<Self> {
        let first_line = source.lines().next()?;
        let caps = HEADER.captures(first_line)?;
        let part = |i: usize| {
            caps.get(i)
                .map_or(Some(0), |m| m.as_str().parse::<u64>().ok())
        };
        Some(ToolsVersion::new(part(1)?, part(2)?, part(3)?))
    }

    /// Whether executable targets get their own constructor.
    pub fn supports_executable_targets(&self) -> bool {
        *self >= Self::EXECUTABLE_TARGETS
    }
}

impl fmt::Display for ToolsVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.patch == 0 {
            write!(f, "{}.{}", self.0.major, self.0.minor)
        } else {
            write!(f, "{}", self.0)
        }
    }
}
