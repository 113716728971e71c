//! Configuration file support.
//!
//! Two configuration file locations are read:
//! - Global: `~/.swift-package-editor/config.toml` - User-wide defaults
//! - Project: `.swift-package-editor/config.toml` - Package-specific overrides
//!
//! Project config takes precedence over global config.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::style::DEFAULT_INDENT;

/// Name of the directory holding config files.
pub const CONFIG_DIR: &str = ".swift-package-editor";

/// Editor configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Formatting fallbacks
    pub format: FormatConfig,

    /// Where scaffolded files go
    pub layout: LayoutConfig,
}

/// Formatting used when a manifest gives nothing to copy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    /// Spaces per indent level (None = 4)
    pub indent_width: Option<usize>,

    /// Indent with tabs instead of spaces (None = false)
    pub use_tabs: Option<bool>,
}

/// Directory conventions for scaffolded files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Directory holding one source directory per target (None = "Sources")
    pub sources_dir: Option<String>,

    /// Directory holding one directory per test target (None = "Tests")
    pub tests_dir: Option<String>,

    /// Appended to a library target's name to name its test target (None = "Tests")
    pub test_suffix: Option<String>,
}

impl LayoutConfig {
    pub fn sources_dir(&self) -> &str {
        self.sources_dir.as_deref().unwrap_or("Sources")
    }

    pub fn tests_dir(&self) -> &str {
        self.tests_dir.as_deref().unwrap_or("Tests")
    }

    pub fn test_suffix(&self) -> &str {
        self.test_suffix.as_deref().unwrap_or("Tests")
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.format.indent_width.is_some() {
            self.format.indent_width = other.format.indent_width;
        }
        if other.format.use_tabs.is_some() {
            self.format.use_tabs = other.format.use_tabs;
        }

        if other.layout.sources_dir.is_some() {
            self.layout.sources_dir = other.layout.sources_dir;
        }
        if other.layout.tests_dir.is_some() {
            self.layout.tests_dir = other.layout.tests_dir;
        }
        if other.layout.test_suffix.is_some() {
            self.layout.test_suffix = other.layout.test_suffix;
        }
    }

    /// Indent unit to use when the manifest does not show one.
    pub fn fallback_indent(&self) -> String {
        if self.format.use_tabs == Some(true) {
            return "\t".to_string();
        }
        match self.format.indent_width {
            Some(width) => " ".repeat(width),
            None => DEFAULT_INDENT.to_string(),
        }
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.swift-package-editor/config.toml)
/// 2. Global config (~/.swift-package-editor/config.toml)
/// 3. Defaults
pub fn load_config(global_path: &Path, project_path: &Path) -> Config {
    let mut config = Config::default();

    if global_path.exists() {
        let global = Config::load_or_default(global_path);
        config.merge(global);
    }

    if project_path.exists() {
        let project = Config::load_or_default(project_path);
        config.merge(project);
    }

    config
}

/// Get the global config directory (~/.swift-package-editor).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(CONFIG_DIR))
}

/// Get the global config path (~/.swift-package-editor/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.swift-package-editor/config.toml).
pub fn project_config_path(package_root: &Path) -> PathBuf {
    package_root.join(CONFIG_DIR).join("config.toml")
}
