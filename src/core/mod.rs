//! Core data structures for manifest editing.
//!
//! This module contains the foundational types used throughout the editor:
//! - The manifest and its package declaration
//! - Dependency, target and product entries
//! - Style detection and tree splicing
//! - Registries for dependency metadata

pub mod declaration;
pub mod dependency;
pub mod edit;
pub mod manifest;
pub mod product;
pub mod registry;
pub mod style;
pub mod summary;
pub mod target;
pub mod tools_version;

pub use declaration::{ArgumentShape, ListSlot, PackageDecl};
pub use dependency::{DependencyEntry, DependencyLocation, DependencyRequirement};
pub use manifest::{Manifest, MANIFEST_NAME};
pub use product::{LibraryType, ProductEntry, ProductKind};
pub use registry::{PathRegistry, Registry};
pub use style::{FormatStyle, ListLayout, ListStyle};
pub use summary::Summary;
pub use target::{TargetEntry, TargetKind};
pub use tools_version::ToolsVersion;
