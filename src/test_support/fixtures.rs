//! Manifest fixtures for common test scenarios.

/// A package with nothing but a name.
pub const EMPTY: &str = r#"// swift-tools-version:5.3
import PackageDescription

let package = Package(
    name: "MyPackage"
)"#;

/// A package vending one library product.
pub const ONE_PRODUCT: &str = r#"// swift-tools-version:5.3
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

/// A package depending on a sibling directory.
pub const WITH_LOCAL_DEPENDENCY: &str = r#"// swift-tools-version:5.3
import PackageDescription

let package = Package(
    name: "MyPackage",
    dependencies: [
        .package(name: "MyPackage2", path: "../MyPackage2"),
    ]
)
"#;

/// A package with one remote dependency and comments to keep.
pub const WITH_REMOTE_DEPENDENCY: &str = r#"// swift-tools-version:5.5
import PackageDescription

let package = Package(
    name: "Tool",
    platforms: [.macOS(.v10_15)],
    dependencies: [
        // Argument parsing
        .package(url: "https://github.com/apple/swift-argument-parser.git", from: "1.0.0"),
    ],
    targets: [
        .executableTarget(
            name: "Tool",
            dependencies: [.product(name: "ArgumentParser", package: "swift-argument-parser")]
        ),
    ]
)
"#;
