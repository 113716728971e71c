//! Stub files for new targets.
//!
//! Adding a target only plans its files. The plan is carried out after the
//! manifest has been written, and never overwrites an existing file.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::target::TargetKind;
use crate::ops::builders::{NewTarget, TargetDependency};
use crate::util::config::LayoutConfig;

#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("failed to create directory: {}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("refusing to overwrite existing file: {}", path.display())]
    FileExists { path: PathBuf },

    #[error("failed to write file: {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A file to create, relative to the package root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubFile {
    pub path: PathBuf,
    pub contents: String,
}

/// Directories and files to create for one edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScaffoldPlan {
    pub directories: Vec<PathBuf>,
    pub files: Vec<StubFile>,
}

impl ScaffoldPlan {
    pub fn is_empty(&self) -> bool {
        self.directories.is_empty() && self.files.is_empty()
    }

    /// Add the stub for `target`. Binary targets have none.
    pub fn add_target(&mut self, target: &NewTarget, layout: &LayoutConfig) {
        let (default_dir, file_name, contents) = match target.kind {
            TargetKind::Binary => return,
            TargetKind::Library => (
                layout.sources_dir(),
                format!("{}.swift", target.name),
                library_stub(&target.name),
            ),
            TargetKind::Executable => (
                layout.sources_dir(),
                "main.swift".to_string(),
                executable_stub(),
            ),
            TargetKind::Test => (
                layout.tests_dir(),
                format!("{}.swift", target.name),
                test_stub(target),
            ),
        };

        let dir = match &target.path {
            Some(path) => PathBuf::from(path),
            None => Path::new(default_dir).join(&target.name),
        };
        let path = dir.join(file_name);
        if !self.directories.contains(&dir) {
            self.directories.push(dir);
        }
        self.files.push(StubFile { path, contents });
    }
}

/// Make `name` usable as a Swift identifier.
pub fn c99_name(name: &str) -> String {
    let mut out: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if out.starts_with(|c: char| c.is_ascii_digit()) || out.is_empty() {
        out.insert(0, '_');
    }
    out
}

fn library_stub(name: &str) -> String {
    format!(
        "public struct {} {{\n    public init() {{}}\n}}\n",
        c99_name(name)
    )
}

fn executable_stub() -> String {
    "print(\"Hello, world!\")\n".to_string()
}

fn test_stub(target: &NewTarget) -> String {
    let mut out = String::from("import XCTest\n");
    for dep in &target.dependencies {
        match dep {
            TargetDependency::Target(name) => {
                out.push_str(&format!("@testable import {}\n", c99_name(name)));
            }
            TargetDependency::Product { name, .. } => {
                out.push_str(&format!("import {}\n", c99_name(name)));
            }
        }
    }
    out.push_str(&format!(
        "\nfinal class {}: XCTestCase {{\n    func testExample() throws {{\n    }}\n}}\n",
        c99_name(&target.name)
    ));
    out
}

/// Carry out `plan` under `root`. Returns the files created.
///
/// Nothing is written if any planned file already exists.
pub fn scaffold(root: &Path, plan: &ScaffoldPlan) -> Result<Vec<PathBuf>, ScaffoldError> {
    if let Some(existing) = plan
        .files
        .iter()
        .map(|f| root.join(&f.path))
        .find(|p| p.exists())
    {
        return Err(ScaffoldError::FileExists { path: existing });
    }

    for dir in &plan.directories {
        let path = root.join(dir);
        std::fs::create_dir_all(&path).map_err(|source| ScaffoldError::CreateDir {
            path: path.clone(),
            source,
        })?;
    }

    let mut created = Vec::with_capacity(plan.files.len());
    for file in &plan.files {
        let path = root.join(&file.path);
        let mut handle = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|source| match source.kind() {
                io::ErrorKind::AlreadyExists => ScaffoldError::FileExists { path: path.clone() },
                _ => ScaffoldError::Write {
                    path: path.clone(),
                    source,
                },
            })?;
        handle
            .write_all(file.contents.as_bytes())
            .map_err(|source| ScaffoldError::Write {
                path: path.clone(),
                source,
            })?;

        tracing::debug!("created {}", path.display());
        created.push(path);
    }

    Ok(created)
}
