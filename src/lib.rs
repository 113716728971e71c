//! swift-package-editor - edits Package.swift manifests in place
//!
//! This crate provides the library behind the `swift-package-editor` binary:
//! a lossless manifest syntax tree, a locator for the package declaration's
//! lists, validation of each edit, style-matching entry builders and the
//! scaffolding of stub files for new targets.

pub mod core;
pub mod ops;
pub mod syntax;
pub mod util;

/// Test utilities and mocks for unit tests.
///
/// This module is only available when running tests. It provides manifest
/// fixtures, temporary package directories and an in-memory registry.
#[cfg(test)]
pub mod test_support;

pub use core::{
    declaration::ListSlot, manifest::Manifest, registry::Registry, tools_version::ToolsVersion,
};
pub use ops::EditError;
pub use syntax::ParseError;
pub use util::context::EditorContext;
