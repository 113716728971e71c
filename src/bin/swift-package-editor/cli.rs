//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// swift-package-editor - edit Package.swift without touching its formatting
#[derive(Parser)]
#[command(name = "swift-package-editor")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the package directory
    #[arg(long, global = true, value_name = "PATH", default_value = ".")]
    pub package_path: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a package dependency to the manifest
    AddDependency(AddDependencyArgs),

    /// Add a target to the manifest and create its source files
    AddTarget(AddTargetArgs),

    /// Add a product to the manifest
    AddProduct(AddProductArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct AddDependencyArgs {
    /// Path or URL of the dependency package
    pub locator: String,

    /// Require this exact version
    #[arg(long, value_name = "VERSION")]
    pub exact: Option<String>,

    /// Require this revision
    #[arg(long)]
    pub revision: Option<String>,

    /// Require this branch
    #[arg(long)]
    pub branch: Option<String>,

    /// Require this version or later, up to the next major version
    #[arg(long, value_name = "VERSION")]
    pub from: Option<String>,

    /// Require this version or later, up to the next minor version
    #[arg(long, value_name = "VERSION")]
    pub up_to_next_minor_from: Option<String>,

    /// Exclusive upper bound of a range started with --from
    #[arg(long, value_name = "VERSION")]
    pub to: Option<String>,

    /// Inclusive upper bound of a range started with --from
    #[arg(long, value_name = "VERSION")]
    pub through: Option<String>,

    /// Print the edited manifest instead of writing it
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct AddTargetArgs {
    /// Target name
    pub name: String,

    /// Target type: library, executable, test or binary
    #[arg(long = "type", value_name = "TYPE", default_value = "library")]
    pub kind: String,

    /// Targets or products the new target depends on
    #[arg(long, num_args = 1.., value_delimiter = ',', value_name = "NAME")]
    pub dependencies: Vec<String>,

    /// Custom source directory, or the artifact path of a binary target
    #[arg(long)]
    pub path: Option<String>,

    /// Artifact URL of a binary target
    #[arg(long)]
    pub url: Option<String>,

    /// Artifact checksum of a binary target
    #[arg(long)]
    pub checksum: Option<String>,

    /// Don't add a test target for a library target
    #[arg(long)]
    pub no_test_target: bool,

    /// Print the edited manifest instead of writing it
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct AddProductArgs {
    /// Product name
    pub name: String,

    /// Product type: library, static-library, dynamic-library or executable
    #[arg(long = "type", value_name = "TYPE", default_value = "library")]
    pub kind: String,

    /// Targets bundled into the product
    #[arg(long, num_args = 1.., value_delimiter = ',', value_name = "NAME")]
    pub targets: Vec<String>,

    /// Print the edited manifest instead of writing it
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
