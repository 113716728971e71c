//! Products vended by a package.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::syntax::CallExpr;

/// Linkage of a library product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LibraryType {
    /// Left for the build system to decide.
    Automatic,
    Static,
    Dynamic,
}

/// Kinds of product that can be added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductKind {
    Library(LibraryType),
    Executable,
}

impl ProductKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductKind::Library(LibraryType::Automatic) => "library",
            ProductKind::Library(LibraryType::Static) => "static-library",
            ProductKind::Library(LibraryType::Dynamic) => "dynamic-library",
            ProductKind::Executable => "executable",
        }
    }

    /// Name of the `PackageDescription` factory.
    pub fn constructor(&self) -> &'static str {
        match self {
            ProductKind::Library(_) => "library",
            ProductKind::Executable => "executable",
        }
    }

    /// Value of the `type:` argument, when the product needs one.
    pub fn library_type(&self) -> Option<&'static str> {
        match self {
            ProductKind::Library(LibraryType::Static) => Some(".static"),
            ProductKind::Library(LibraryType::Dynamic) => Some(".dynamic"),
            _ => None,
        }
    }
}

impl fmt::Display for ProductKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductKind {
    type Err = UnsupportedProductType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "library" => Ok(ProductKind::Library(LibraryType::Automatic)),
            "static-library" => Ok(ProductKind::Library(LibraryType::Static)),
            "dynamic-library" => Ok(ProductKind::Library(LibraryType::Dynamic)),
            "executable" => Ok(ProductKind::Executable),
            _ => Err(UnsupportedProductType(s.to_string())),
        }
    }
}

/// Error returned when parsing an unknown product type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "unsupported product type '{0}'; supported types are library, static-library, dynamic-library, and executable"
)]
pub struct UnsupportedProductType(pub String);

/// Every product factory recognised when reading a manifest.
pub const PRODUCT_CONSTRUCTORS: &[&str] = &["library", "executable", "plugin"];

/// A product declared in the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductEntry {
    pub name: String,
    pub constructor: String,
    /// Target names listed as plain string literals.
    pub targets: Vec<String>,
}

impl ProductEntry {
    pub fn from_call(call: &CallExpr) -> Option<Self> {
        let constructor = call.name()?;
        if !PRODUCT_CONSTRUCTORS.contains(&constructor.as_str()) {
            return None;
        }

        let targets = call
            .arg("targets")
            .and_then(|arg| arg.array())
            .map(|array| array.elements().filter_map(|e| e.string_value()).collect())
            .unwrap_or_default();

        Some(ProductEntry {
            name: call.string_arg("name")?,
            constructor,
            targets,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{parse, SyntaxNode};

    #[test]
    fn test_parse_kind() {
        assert_eq!(
            "static-library".parse::<ProductKind>(),
            Ok(ProductKind::Library(LibraryType::Static))
        );
        assert_eq!("executable".parse::<ProductKind>(), Ok(ProductKind::Executable));

        let err = "plugin".parse::<ProductKind>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "unsupported product type 'plugin'; supported types are library, static-library, dynamic-library, and executable"
        );
    }

    #[test]
    fn test_library_type_argument() {
        assert_eq!(ProductKind::Library(LibraryType::Automatic).library_type(), None);
        assert_eq!(ProductKind::Library(LibraryType::Dynamic).library_type(), Some(".dynamic"));
        assert_eq!(ProductKind::Executable.library_type(), None);
    }

    #[test]
    fn test_entry_from_call() {
        let root = SyntaxNode::new_root(
            parse(r#".library(name: "Library", type: .static, targets: ["A", "B"])"#).unwrap(),
        );
        let call = root.descendants().find_map(CallExpr::cast).unwrap();
        let entry = ProductEntry::from_call(&call).unwrap();
        assert_eq!(entry.name, "Library");
        assert_eq!(entry.constructor, "library");
        assert_eq!(entry.targets, vec!["A", "B"]);
    }
}
