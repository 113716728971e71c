//! Entry builders.
//!
//! Each builder renders the source text of one new list entry, laid out to
//! match the list it will be appended to. Vertical lists get multi-line
//! entries nested one indent unit per level; inline lists get single-line
//! entries.

use crate::core::dependency::{DependencyLocation, DependencyRequirement};
use crate::core::product::ProductKind;
use crate::core::style::{ListLayout, ListStyle};
use crate::core::target::TargetKind;
use crate::core::tools_version::ToolsVersion;
use crate::syntax::quote;

/// A dependency to add.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDependency {
    /// Package name read from a local dependency's manifest.
    pub name: Option<String>,
    pub location: DependencyLocation,
    pub requirement: Option<DependencyRequirement>,
}

/// A name in a new target's `dependencies:` list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetDependency {
    /// Another target of this package.
    Target(String),
    /// A product vended by a dependency package.
    Product { name: String, package: String },
}

impl TargetDependency {
    fn render(&self) -> String {
        match self {
            TargetDependency::Target(name) => quote(name),
            TargetDependency::Product { name, package } => {
                format!(".product(name: {}, package: {})", quote(name), quote(package))
            }
        }
    }
}

/// A target to add.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTarget {
    pub name: String,
    pub kind: TargetKind,
    pub dependencies: Vec<TargetDependency>,
    pub path: Option<String>,
    pub url: Option<String>,
    pub checksum: Option<String>,
}

impl NewTarget {
    pub fn new(name: impl Into<String>, kind: TargetKind) -> Self {
        NewTarget {
            name: name.into(),
            kind,
            dependencies: Vec::new(),
            path: None,
            url: None,
            checksum: None,
        }
    }

    /// The test target generated alongside a library target.
    pub fn test_twin(&self, suffix: &str) -> NewTarget {
        NewTarget {
            dependencies: vec![TargetDependency::Target(self.name.clone())],
            ..NewTarget::new(format!("{}{}", self.name, suffix), TargetKind::Test)
        }
    }
}

/// A product to add.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub kind: ProductKind,
    pub targets: Vec<String>,
}

enum Value {
    Plain(String),
    List(Vec<String>),
}

/// Render `.constructor(label: value, ...)` in the layout of `style`.
fn call(constructor: &str, args: &[(&str, Value)], style: &ListStyle) -> String {
    let mut out = format!(".{}(", constructor);

    if style.layout == ListLayout::Inline {
        let rendered: Vec<String> = args
            .iter()
            .map(|(label, value)| match value {
                Value::Plain(text) => format!("{}: {}", label, text),
                Value::List(items) => format!("{}: [{}]", label, items.join(", ")),
            })
            .collect();
        out.push_str(&rendered.join(", "));
        out.push(')');
        return out;
    }

    let newline = style.newline.as_str();
    let arg_indent = style.nested(1);
    let item_indent = style.nested(2);

    for (i, (label, value)) in args.iter().enumerate() {
        out.push_str(newline);
        out.push_str(&arg_indent);
        out.push_str(label);
        out.push_str(": ");
        match value {
            Value::Plain(text) => out.push_str(text),
            Value::List(items) if items.is_empty() => out.push_str("[]"),
            Value::List(items) => {
                out.push('[');
                for item in items {
                    out.push_str(newline);
                    out.push_str(&item_indent);
                    out.push_str(item);
                    out.push(',');
                }
                out.push_str(newline);
                out.push_str(&arg_indent);
                out.push(']');
            }
        }
        if i + 1 < args.len() {
            out.push(',');
        }
    }

    out.push_str(newline);
    out.push_str(&style.item_indent);
    out.push(')');
    out
}

/// `.package(...)` entry. Always a single line.
pub fn dependency_entry(dep: &NewDependency) -> String {
    match (&dep.location, &dep.requirement) {
        (DependencyLocation::Local(path), _) => match &dep.name {
            Some(name) => format!(".package(name: {}, path: {})", quote(name), quote(path)),
            None => format!(".package(path: {})", quote(path)),
        },
        (DependencyLocation::Remote(url), Some(requirement)) => {
            format!(".package(url: {}, {})", quote(url), requirement)
        }
        (DependencyLocation::Remote(url), None) => format!(".package(url: {})", quote(url)),
    }
}

/// Target entry for the `targets:` list.
pub fn target_entry(
    target: &NewTarget,
    tools_version: Option<&ToolsVersion>,
    style: &ListStyle,
) -> String {
    let mut args = vec![("name", Value::Plain(quote(&target.name)))];

    if target.kind == TargetKind::Binary {
        if let Some(path) = &target.path {
            args.push(("path", Value::Plain(quote(path))));
        } else {
            if let Some(url) = &target.url {
                args.push(("url", Value::Plain(quote(url))));
            }
            if let Some(checksum) = &target.checksum {
                args.push(("checksum", Value::Plain(quote(checksum))));
            }
        }
    } else {
        let deps = target.dependencies.iter().map(TargetDependency::render).collect();
        args.push(("dependencies", Value::List(deps)));
        if let Some(path) = &target.path {
            args.push(("path", Value::Plain(quote(path))));
        }
    }

    call(target.kind.constructor(tools_version), &args, style)
}

/// Product entry for the `products:` list.
pub fn product_entry(product: &NewProduct, style: &ListStyle) -> String {
    let mut args = vec![("name", Value::Plain(quote(&product.name)))];
    if let Some(library_type) = product.kind.library_type() {
        args.push(("type", Value::Plain(library_type.to_string())));
    }
    let targets = product.targets.iter().map(|t| quote(t)).collect();
    args.push(("targets", Value::List(targets)));

    call(product.kind.constructor(), &args, style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::product::LibraryType;
    use semver::Version;

    fn vertical() -> ListStyle {
        ListStyle {
            layout: ListLayout::Vertical,
            item_indent: "        ".to_string(),
            closing_indent: "    ".to_string(),
            trailing_comma: true,
            indent_unit: "    ".to_string(),
            newline: "\n".to_string(),
        }
    }

    fn inline() -> ListStyle {
        ListStyle {
            layout: ListLayout::Inline,
            ..vertical()
        }
    }

    #[test]
    fn test_dependency_entries() {
        let local = NewDependency {
            name: Some("MyPackage2".to_string()),
            location: DependencyLocation::parse("/tmp/MyPackage2"),
            requirement: None,
        };
        assert_eq!(
            dependency_entry(&local),
            r#".package(name: "MyPackage2", path: "/tmp/MyPackage2")"#
        );

        let remote = NewDependency {
            name: None,
            location: DependencyLocation::parse("https://example.com/a.git"),
            requirement: Some(DependencyRequirement::Range {
                lower: Version::new(1, 0, 0),
                upper: Version::new(2, 0, 0),
            }),
        };
        assert_eq!(
            dependency_entry(&remote),
            r#".package(url: "https://example.com/a.git", "1.0.0"..<"2.0.0")"#
        );
    }

    #[test]
    fn test_vertical_target() {
        let mut target = NewTarget::new("MyLibrary", TargetKind::Library);
        target.dependencies.push(TargetDependency::Product {
            name: "Library".to_string(),
            package: "MyPackage2".to_string(),
        });
        assert_eq!(
            target_entry(&target, None, &vertical()),
            ".target(\n            name: \"MyLibrary\",\n            dependencies: [\n                .product(name: \"Library\", package: \"MyPackage2\"),\n            ]\n        )"
        );
    }

    #[test]
    fn test_target_without_dependencies() {
        let target = NewTarget::new("A", TargetKind::Library);
        assert_eq!(
            target_entry(&target, None, &vertical()),
            ".target(\n            name: \"A\",\n            dependencies: []\n        )"
        );
        assert_eq!(
            target_entry(&target, None, &inline()),
            ".target(name: \"A\", dependencies: [])"
        );
    }

    #[test]
    fn test_executable_constructor_follows_tools_version() {
        let target = NewTarget::new("Tool", TargetKind::Executable);
        let old = ToolsVersion::new(5, 3, 0);
        let new = ToolsVersion::new(5, 5, 0);
        assert!(target_entry(&target, Some(&old), &inline()).starts_with(".target("));
        assert!(target_entry(&target, Some(&new), &inline()).starts_with(".executableTarget("));
    }

    #[test]
    fn test_binary_target() {
        let target = NewTarget {
            url: Some("https://example.com/A.zip".to_string()),
            checksum: Some("abc".to_string()),
            ..NewTarget::new("A", TargetKind::Binary)
        };
        assert_eq!(
            target_entry(&target, None, &inline()),
            ".binaryTarget(name: \"A\", url: \"https://example.com/A.zip\", checksum: \"abc\")"
        );
    }

    #[test]
    fn test_test_twin() {
        let twin = NewTarget::new("Core", TargetKind::Library).test_twin("Tests");
        assert_eq!(twin.name, "CoreTests");
        assert_eq!(twin.kind, TargetKind::Test);
        assert_eq!(twin.dependencies, vec![TargetDependency::Target("Core".to_string())]);
    }

    #[test]
    fn test_product_entries() {
        let product = NewProduct {
            name: "Dyn".to_string(),
            kind: ProductKind::Library(LibraryType::Dynamic),
            targets: vec!["A".to_string()],
        };
        assert_eq!(
            product_entry(&product, &vertical()),
            ".library(\n            name: \"Dyn\",\n            type: .dynamic,\n            targets: [\n                \"A\",\n            ]\n        )"
        );

        let product = NewProduct {
            name: "Tool".to_string(),
            kind: ProductKind::Executable,
            targets: vec!["A".to_string(), "B".to_string()],
        };
        assert_eq!(
            product_entry(&product, &inline()),
            ".executable(name: \"Tool\", targets: [\"A\", \"B\"])"
        );
    }
}
