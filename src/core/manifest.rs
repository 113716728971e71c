//! Package.swift manifests.
//!
//! A `Manifest` owns the syntax tree of one manifest for the length of one
//! edit. It is loaded from text, edited by appending entries to its list
//! arguments, and rendered back to text. Rendering an unedited manifest
//! reproduces its input exactly.

use rowan::GreenNode;
use tracing::debug;

use crate::core::declaration::{ListSlot, PackageDecl};
use crate::core::dependency::DependencyEntry;
use crate::core::edit::{self, ArgLayout};
use crate::core::product::ProductEntry;
use crate::core::style::{line_indent, starts_line, style_of, FormatStyle, ListStyle, DEFAULT_INDENT};
use crate::core::target::TargetEntry;
use crate::core::tools_version::ToolsVersion;
use crate::syntax::{parse, parse_fragment, ArrayExpr, CallExpr, Fragment, ParseError, SyntaxNode};

/// File name of a package manifest.
pub const MANIFEST_NAME: &str = "Package.swift";

/// A loaded manifest.
#[derive(Debug, Clone)]
pub struct Manifest {
    green: GreenNode,
    package_name: String,
    tools_version: Option<ToolsVersion>,
    format: FormatStyle,
}

impl Manifest {
    /// Parse manifest text.
    pub fn load(text: &str) -> Result<Self, ParseError> {
        Self::load_with_indent(text, DEFAULT_INDENT)
    }

    /// Parse manifest text, using `fallback_indent` as the indent unit when
    /// the file does not show one.
    pub fn load_with_indent(text: &str, fallback_indent: &str) -> Result<Self, ParseError> {
        let green = parse(text)?;
        let root = SyntaxNode::new_root(green.clone());
        let decl = PackageDecl::find(&root, text)?;
        let format = FormatStyle::detect(text, decl.call(), fallback_indent);
        let tools_version = ToolsVersion::from_manifest(text);

        debug!(
            package = %decl.name(),
            tools_version = ?tools_version.as_ref().map(ToString::to_string),
            indent = ?format.indent_unit,
            "loaded manifest"
        );

        Ok(Manifest {
            package_name: decl.name(),
            green,
            tools_version,
            format,
        })
    }

    /// Root of the current tree.
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    /// Serialize the current tree.
    pub fn render(&self) -> String {
        self.syntax().to_string()
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn tools_version(&self) -> Option<&ToolsVersion> {
        self.tools_version.as_ref()
    }

    pub fn format(&self) -> &FormatStyle {
        &self.format
    }

    /// The package declaration in the current tree.
    pub fn declaration(&self) -> Result<PackageDecl, ParseError> {
        let root = self.syntax();
        PackageDecl::find(&root, &root.to_string())
    }

    /// Find the array for `slot`, inserting an empty one at its canonical
    /// position if the argument is missing.
    pub fn locate(&mut self, slot: ListSlot) -> Result<ArrayExpr, ParseError> {
        let decl = self.declaration()?;
        if let Some(list) = decl.list(slot) {
            return Ok(list);
        }

        self.insert_empty_list(&decl, slot)?;
        self.declaration()?.list(slot).ok_or_else(|| {
            ParseError::new(
                format!("could not insert a '{}' argument", slot),
                &self.render(),
                0,
                0,
            )
        })
    }

    fn insert_empty_list(&mut self, decl: &PackageDecl, slot: ListSlot) -> Result<(), ParseError> {
        let source = self.render();
        let call = decl.call();
        let Some(args) = call.arg_list() else {
            return Err(ParseError::new(
                "package declaration has no argument list",
                &source,
                call.syntax().text_range().start().into(),
                0,
            ));
        };

        let predecessor = decl.predecessor(slot);
        let closing_indent = line_indent(&source, call.syntax().text_range().start().into());
        let indent = predecessor
            .iter()
            .chain(call.args().iter())
            .map(|arg| usize::from(arg.syntax().text_range().start()))
            .find(|&offset| starts_line(&source, offset))
            .map(|offset| line_indent(&source, offset).to_string())
            .unwrap_or_else(|| format!("{}{}", closing_indent, self.format.indent_unit));

        let layout = ArgLayout {
            vertical: args.is_vertical(),
            indent,
            closing_indent: closing_indent.to_string(),
            newline: self.format.newline.clone(),
        };
        let text = if layout.vertical {
            format!("{}: [{}{}]", slot, layout.newline, layout.indent)
        } else {
            format!("{}: []", slot)
        };

        debug!(%slot, vertical = layout.vertical, "inserting empty list argument");
        let arg = parse_fragment(&text, Fragment::Arg)?;
        self.green = edit::insert_argument(&args, predecessor.as_ref(), &arg, &layout);
        Ok(())
    }

    /// Style of the list for `slot`, inserting the list if needed.
    pub fn list_style(&mut self, slot: ListSlot) -> Result<ListStyle, ParseError> {
        let list = self.locate(slot)?;
        Ok(style_of(&list, &self.render(), &self.format))
    }

    /// Append a new entry to the list for `slot`.
    ///
    /// `text` is the entry's source. It must be a single expression without
    /// surrounding whitespace; lines after the first should already carry
    /// their indentation.
    pub fn append_entry(&mut self, slot: ListSlot, text: &str) -> Result<(), ParseError> {
        let list = self.locate(slot)?;
        let style = style_of(&list, &self.render(), &self.format);
        let element = parse_fragment(text, Fragment::Element)?;

        debug!(%slot, layout = ?style.layout, "appending entry");
        self.green = edit::append_element(&list, &element, &style);
        Ok(())
    }

    /// Calls listed in the `slot` array, in order. Entries that are not plain
    /// calls are skipped.
    fn entries(&self, slot: ListSlot) -> Vec<CallExpr> {
        let Ok(decl) = self.declaration() else {
            return Vec::new();
        };
        decl.list(slot)
            .map(|list| list.elements().filter_map(|e| e.call()).collect())
            .unwrap_or_default()
    }

    pub fn dependencies(&self) -> Vec<DependencyEntry> {
        self.entries(ListSlot::Dependencies)
            .iter()
            .filter_map(DependencyEntry::from_call)
            .collect()
    }

    pub fn targets(&self) -> Vec<TargetEntry> {
        self.entries(ListSlot::Targets)
            .iter()
            .filter_map(TargetEntry::from_call)
            .collect()
    }

    pub fn products(&self) -> Vec<ProductEntry> {
        self.entries(ListSlot::Products)
            .iter()
            .filter_map(ProductEntry::from_call)
            .collect()
    }

    pub fn has_target(&self, name: &str) -> bool {
        self.targets().iter().any(|t| t.name == name)
    }

    pub fn has_product(&self, name: &str) -> bool {
        self.products().iter().any(|p| p.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMPTY: &str = "// swift-tools-version:5.3\nimport PackageDescription\n\nlet package = Package(\n    name: \"MyPackage\"\n)";

    #[test]
    fn test_render_round_trip() {
        let source = "// swift-tools-version:5.5\n/* header */\nimport PackageDescription\n\nlet package = Package(\n\tname: \"A\", // name\n\ttargets: [\n\t\t.target(name: \"A\")\n\t]\n)\n\nlet extra = 1\n";
        let manifest = Manifest::load(source).unwrap();
        assert_eq!(manifest.render(), source);
        assert_eq!(manifest.format().indent_unit, "\t");
        assert_eq!(manifest.tools_version(), Some(&ToolsVersion::new(5, 5, 0)));
    }

    #[test]
    fn test_round_trip_with_unicode_identifiers() {
        let source = "import PackageDescription\n\nlet café = \"x\"\nlet package = Package(\n    name: \"Ünïcode\"\n)\n";
        let manifest = Manifest::load(source).unwrap();
        assert_eq!(manifest.render(), source);
        assert_eq!(manifest.package_name(), "Ünïcode");
    }

    #[test]
    fn test_locate_synthesizes_missing_list() {
        let mut manifest = Manifest::load(EMPTY).unwrap();
        manifest.locate(ListSlot::Dependencies).unwrap();
        assert_eq!(
            manifest.render(),
            "// swift-tools-version:5.3\nimport PackageDescription\n\nlet package = Package(\n    name: \"MyPackage\",\n    dependencies: [\n    ]\n)"
        );
    }

    #[test]
    fn test_locate_is_stable() {
        let mut manifest = Manifest::load(EMPTY).unwrap();
        manifest.locate(ListSlot::Targets).unwrap();
        let once = manifest.render();
        manifest.locate(ListSlot::Targets).unwrap();
        assert_eq!(manifest.render(), once);
    }

    #[test]
    fn test_append_entry_to_synthesized_list() {
        let mut manifest = Manifest::load(EMPTY).unwrap();
        manifest
            .append_entry(ListSlot::Dependencies, r#".package(url: "https://example.com/a.git", from: "1.0.0")"#)
            .unwrap();
        assert_eq!(
            manifest.render(),
            "// swift-tools-version:5.3\nimport PackageDescription\n\nlet package = Package(\n    name: \"MyPackage\",\n    dependencies: [\n        .package(url: \"https://example.com/a.git\", from: \"1.0.0\"),\n    ]\n)"
        );
        assert_eq!(manifest.dependencies().len(), 1);
    }

    #[test]
    fn test_products_inserted_before_targets() {
        let source = "let package = Package(\n    name: \"A\",\n    targets: [\n        .target(name: \"T\"),\n    ]\n)\n";
        let mut manifest = Manifest::load(source).unwrap();
        manifest
            .append_entry(ListSlot::Products, r#".library(name: "L", targets: ["T"])"#)
            .unwrap();
        assert_eq!(
            manifest.render(),
            "let package = Package(\n    name: \"A\",\n    products: [\n        .library(name: \"L\", targets: [\"T\"]),\n    ],\n    targets: [\n        .target(name: \"T\"),\n    ]\n)\n"
        );
        assert!(manifest.has_product("L"));
        assert!(manifest.has_target("T"));
    }

    #[test]
    fn test_dependencies_inserted_after_traits() {
        let source = "let package = Package(\n    name: \"A\",\n    products: [],\n    traits: [\"X\"],\n    targets: []\n)\n";
        let mut manifest = Manifest::load(source).unwrap();
        manifest.locate(ListSlot::Dependencies).unwrap();
        let rendered = manifest.render();
        let traits = rendered.find("traits:").unwrap();
        let dependencies = rendered.find("dependencies:").unwrap();
        let targets = rendered.find("targets:").unwrap();
        assert!(traits < dependencies && dependencies < targets, "{rendered}");
    }

    #[test]
    fn test_crlf_is_kept() {
        let source = "let package = Package(\r\n  name: \"A\"\r\n)\r\n";
        let mut manifest = Manifest::load(source).unwrap();
        manifest
            .append_entry(ListSlot::Targets, r#".target(name: "T")"#)
            .unwrap();
        assert_eq!(
            manifest.render(),
            "let package = Package(\r\n  name: \"A\",\r\n  targets: [\r\n    .target(name: \"T\"),\r\n  ]\r\n)\r\n"
        );
    }

    #[test]
    fn test_inline_declaration() {
        let mut manifest = Manifest::load("let package = Package(name: \"A\")").unwrap();
        manifest
            .append_entry(ListSlot::Targets, r#".target(name: "T")"#)
            .unwrap();
        assert_eq!(
            manifest.render(),
            "let package = Package(name: \"A\", targets: [\n    .target(name: \"T\"),\n])"
        );
    }

    #[test]
    fn test_readers_skip_unrecognised_entries() {
        let source = r#"let package = Package(
    name: "A",
    dependencies: [
        .package(url: "https://example.com/b.git", .branch("main")),
        sharedDependency,
    ],
    targets: [
        .target(name: "A", dependencies: ["B"]),
        .testTarget(name: "ATests"),
        .plugin(name: "Gen", capability: .buildTool()),
    ]
)"#;
        let manifest = Manifest::load(source).unwrap();
        assert_eq!(manifest.dependencies().len(), 1);
        let names: Vec<_> = manifest.targets().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["A", "ATests", "Gen"]);
        assert!(manifest.products().is_empty());
    }
}
