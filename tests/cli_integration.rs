//! CLI integration tests for swift-package-editor.
//!
//! These tests run the binary against throwaway packages and compare the
//! resulting manifests byte for byte.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

const EMPTY: &str = r#"// swift-tools-version:5.3
import PackageDescription

let package = Package(
    name: "MyPackage"
)"#;

const ONE_PRODUCT: &str = r#"// swift-tools-version:5.3
import PackageDescription

let package = Package(
    name: "MyPackage2",
    products: [
        .library(name: "Library", targets: ["Library"]),
    ],
    targets: [
        .target(name: "Library"),
    ]
)
"#;

/// A scratch area holding fixture packages and an isolated home directory.
struct Sandbox {
    tmp: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("home")).unwrap();
        Sandbox { tmp }
    }

    /// Create a package directory named `name` holding `manifest`.
    fn package(&self, name: &str, manifest: &str) -> PathBuf {
        let dir = self.tmp.path().join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("Package.swift"), manifest).unwrap();
        dir
    }

    /// An empty directory with no manifest.
    fn empty_dir(&self) -> PathBuf {
        let dir = self.tmp.path().join("nothing");
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// The editor binary running in `dir`.
    fn editor(&self, dir: &Path) -> Command {
        let mut cmd = Command::cargo_bin("swift-package-editor").unwrap();
        cmd.current_dir(dir)
            .env("HOME", self.tmp.path().join("home"))
            .env_remove("RUST_LOG");
        cmd
    }

    fn assert_failure(&self, dir: &Path, args: &[&str], stderr: &str) {
        self.editor(dir)
            .args(args)
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::eq(stderr.to_string()));
    }
}

fn manifest(dir: &Path) -> String {
    fs::read_to_string(dir.join("Package.swift")).unwrap()
}

// ============================================================================
// Argument validation
// ============================================================================

#[test]
fn test_add_dependency_arg_validation() {
    let sandbox = Sandbox::new();
    let dir = sandbox.empty_dir();

    sandbox.assert_failure(
        &dir,
        &["add-dependency", "http://www.githost.com/repo.git", "--exact", "1.0.0", "--from", "1.0.0"],
        "error: only one requirement is allowed when specifiying a dependency\n",
    );
    sandbox.assert_failure(
        &dir,
        &["add-dependency", "http://www.githost.com/repo.git", "--exact", "1.0.0", "--to", "2.0.0"],
        "error: '--to' and '--through' may only be used with '--from' to specify a range requirement\n",
    );
    sandbox.assert_failure(
        &dir,
        &[
            "add-dependency",
            "http://www.githost.com/repo.git",
            "--from",
            "1.0.0",
            "--to",
            "2.0.0",
            "--through",
            "3.0.0",
        ],
        "error: '--to' and '--through' may not be used in the same requirement\n",
    );
}

#[test]
fn test_add_target_arg_validation() {
    let sandbox = Sandbox::new();
    let dir = sandbox.empty_dir();

    sandbox.assert_failure(
        &dir,
        &["add-target", "MyLibrary", "--type", "binary"],
        "error: binary targets must specify either a path or both a URL and a checksum\n",
    );
    sandbox.assert_failure(
        &dir,
        &["add-target", "MyLibrary", "--checksum", "checksum"],
        "error: option '--checksum' is only supported for binary targets\n",
    );
    sandbox.assert_failure(
        &dir,
        &["add-target", "MyLibrary", "--type", "binary", "--dependencies", "MyLibrary"],
        "error: option '--dependencies' is not supported for binary targets\n",
    );
    sandbox.assert_failure(
        &dir,
        &["add-target", "MyLibrary", "--type", "unsupported"],
        "error: unsupported target type 'unsupported'; supported types are library, executable, test, and binary\n",
    );
}

// ============================================================================
// End to end
// ============================================================================

#[test]
fn test_add_dependency_end_to_end() {
    let sandbox = Sandbox::new();
    let empty = sandbox.package("Empty", EMPTY);
    let one_product = sandbox.package("OneProduct", ONE_PRODUCT);
    let dep = one_product.to_str().unwrap();

    sandbox
        .editor(&empty)
        .args(["add-dependency", dep])
        .assert()
        .success();

    assert_eq!(
        manifest(&empty),
        format!(
            r#"// swift-tools-version:5.3
import PackageDescription

let package = Package(
    name: "MyPackage",
    dependencies: [
        .package(name: "MyPackage2", path: "{dep}"),
    ]
)"#
        )
    );

    sandbox.assert_failure(
        &empty,
        &["add-dependency", dep],
        &format!("error: 'MyPackage' already has a dependency on '{dep}'\n"),
    );
}

#[test]
fn test_add_target_end_to_end() {
    let sandbox = Sandbox::new();
    let empty = sandbox.package("Empty", EMPTY);
    let one_product = sandbox.package("OneProduct", ONE_PRODUCT);
    let dep = one_product.to_str().unwrap();

    for args in [
        vec!["add-dependency", dep],
        vec!["add-target", "MyLibrary", "--dependencies", "Library"],
        vec!["add-target", "MyExecutable", "--type", "executable", "--dependencies", "MyLibrary"],
        vec!["add-target", "--type", "test", "IntegrationTests", "--dependencies", "MyLibrary"],
    ] {
        sandbox.editor(&empty).args(&args).assert().success();
    }

    assert_eq!(
        manifest(&empty),
        format!(
            r#"// swift-tools-version:5.3
import PackageDescription

let package = Package(
    name: "MyPackage",
    dependencies: [
        .package(name: "MyPackage2", path: "{dep}"),
    ],
    targets: [
        .target(
            name: "MyLibrary",
            dependencies: [
                .product(name: "Library", package: "MyPackage2"),
            ]
        ),
        .testTarget(
            name: "MyLibraryTests",
            dependencies: [
                "MyLibrary",
            ]
        ),
        .target(
            name: "MyExecutable",
            dependencies: [
                "MyLibrary",
            ]
        ),
        .testTarget(
            name: "IntegrationTests",
            dependencies: [
                "MyLibrary",
            ]
        ),
    ]
)"#
        )
    );

    assert!(empty.join("Sources/MyLibrary/MyLibrary.swift").exists());
    assert!(empty.join("Tests/MyLibraryTests/MyLibraryTests.swift").exists());
    assert!(empty.join("Sources/MyExecutable/main.swift").exists());
    assert!(empty.join("Tests/IntegrationTests/IntegrationTests.swift").exists());

    sandbox.assert_failure(
        &empty,
        &["add-target", "MyLibrary"],
        "error: a target named 'MyLibrary' already exists in 'MyPackage'\n",
    );
}

#[test]
fn test_add_product_end_to_end() {
    let sandbox = Sandbox::new();
    let empty = sandbox.package("Empty", EMPTY);

    for args in [
        vec!["add-target", "MyLibrary", "--no-test-target"],
        vec!["add-target", "MyLibrary2", "--no-test-target"],
        vec!["add-product", "LibraryProduct", "--targets", "MyLibrary", "MyLibrary2"],
        vec!["add-product", "DynamicLibraryProduct", "--type", "dynamic-library", "--targets", "MyLibrary"],
        vec!["add-product", "StaticLibraryProduct", "--type", "static-library", "--targets", "MyLibrary"],
        vec!["add-product", "ExecutableProduct", "--type", "executable", "--targets", "MyLibrary2"],
    ] {
        sandbox.editor(&empty).args(&args).assert().success();
    }

    assert_eq!(
        manifest(&empty),
        r#"// swift-tools-version:5.3
import PackageDescription

let package = Package(
    name: "MyPackage",
    products: [
        .library(
            name: "LibraryProduct",
            targets: [
                "MyLibrary",
                "MyLibrary2",
            ]
        ),
        .library(
            name: "DynamicLibraryProduct",
            type: .dynamic,
            targets: [
                "MyLibrary",
            ]
        ),
        .library(
            name: "StaticLibraryProduct",
            type: .static,
            targets: [
                "MyLibrary",
            ]
        ),
        .executable(
            name: "ExecutableProduct",
            targets: [
                "MyLibrary2",
            ]
        ),
    ],
    targets: [
        .target(
            name: "MyLibrary",
            dependencies: []
        ),
        .target(
            name: "MyLibrary2",
            dependencies: []
        ),
    ]
)"#
    );

    sandbox.assert_failure(
        &empty,
        &["add-product", "LibraryProduct", "--targets", "MyLibrary,MyLibrary2"],
        "error: a product named 'LibraryProduct' already exists in 'MyPackage'\n",
    );
}

// ============================================================================
// Other behaviour
// ============================================================================

#[test]
fn test_dry_run_prints_without_writing() {
    let sandbox = Sandbox::new();
    let empty = sandbox.package("Empty", EMPTY);

    sandbox
        .editor(&empty)
        .args(["add-target", "Tool", "--type", "executable", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".target(\n            name: \"Tool\","));

    assert_eq!(manifest(&empty), EMPTY);
    assert!(!empty.join("Sources").exists());
}

#[test]
fn test_package_path_option() {
    let sandbox = Sandbox::new();
    let empty = sandbox.package("Empty", EMPTY);
    let elsewhere = sandbox.empty_dir();

    sandbox
        .editor(&elsewhere)
        .args(["--package-path", empty.to_str().unwrap()])
        .args(["add-dependency", "https://example.com/a.git", "--branch", "main"])
        .assert()
        .success();

    assert!(manifest(&empty)
        .contains(".package(url: \"https://example.com/a.git\", .branch(\"main\")),"));
}

#[test]
fn test_add_dependency_with_range() {
    let sandbox = Sandbox::new();
    let empty = sandbox.package("Empty", EMPTY);

    sandbox
        .editor(&empty)
        .args(["add-dependency", "https://example.com/b.git", "--from", "1.0.0", "--to", "2.0.0"])
        .assert()
        .success();

    assert!(manifest(&empty)
        .contains(r#".package(url: "https://example.com/b.git", "1.0.0"..<"2.0.0"),"#));
}

#[test]
fn test_parse_error_shows_source() {
    let sandbox = Sandbox::new();
    let broken = sandbox.package("Broken", "let package = Package(\n    name: \"A\",\n");

    sandbox
        .editor(&broken)
        .args(["add-target", "A"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::starts_with("error: "))
        .stderr(predicate::str::contains("Package.swift"));
}

#[test]
fn test_missing_manifest() {
    let sandbox = Sandbox::new();
    let dir = sandbox.empty_dir();

    sandbox
        .editor(&dir)
        .args(["add-product", "P", "--targets", "A"])
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("error: failed to read file:"));
}

#[test]
fn test_completions() {
    let sandbox = Sandbox::new();
    let dir = sandbox.empty_dir();

    sandbox
        .editor(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("add-dependency"));
}
