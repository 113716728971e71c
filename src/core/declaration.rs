//! Locating the package declaration.
//!
//! A manifest must contain exactly one top-level `Package(...)` call. Its
//! list arguments are looked up by label every time they are needed, so a
//! handle never outlives an edit of the tree it came from.

use std::fmt;

use crate::syntax::{Arg, ArrayExpr, CallExpr, ParseError, SyntaxNode};

/// Argument labels of `Package(...)` in declaration order.
pub const CANONICAL_ORDER: [&str; 13] = [
    "name",
    "defaultLocalization",
    "platforms",
    "pkgConfig",
    "providers",
    "products",
    "traits",
    "dependencies",
    "targets",
    "swiftLanguageModes",
    "swiftLanguageVersions",
    "cLanguageStandard",
    "cxxLanguageStandard",
];

/// Position of a label in [`CANONICAL_ORDER`].
pub fn canonical_rank(label: &str) -> Option<usize> {
    CANONICAL_ORDER.iter().position(|l| *l == label)
}

/// The list arguments that can be edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListSlot {
    Dependencies,
    Targets,
    Products,
}

impl ListSlot {
    pub const ALL: [ListSlot; 3] = [ListSlot::Dependencies, ListSlot::Targets, ListSlot::Products];

    pub fn label(&self) -> &'static str {
        match self {
            ListSlot::Dependencies => "dependencies",
            ListSlot::Targets => "targets",
            ListSlot::Products => "products",
        }
    }

    pub fn rank(&self) -> usize {
        canonical_rank(self.label()).unwrap_or(CANONICAL_ORDER.len())
    }
}

impl fmt::Display for ListSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What a list argument looks like in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentShape {
    /// An array literal that can be edited.
    Array(ArrayExpr),
    /// The argument is not there.
    Absent,
    /// Something other than an array literal, e.g. a variable.
    Other(Arg),
}

/// The single top-level `Package(...)` call.
#[derive(Debug, Clone)]
pub struct PackageDecl {
    call: CallExpr,
}

impl PackageDecl {
    /// Find the declaration and check that its shape is one we can edit.
    ///
    /// `source` is the text of `root` and is only used for error locations.
    pub fn find(root: &SyntaxNode, source: &str) -> Result<Self, ParseError> {
        let mut calls = root
            .children()
            .filter_map(CallExpr::cast)
            .filter(|call| !call.is_member() && call.name().as_deref() == Some("Package"));

        let Some(call) = calls.next() else {
            return Err(ParseError::new(
                "manifest has no top-level 'Package(...)' declaration",
                source,
                0,
                0,
            ));
        };
        if let Some(extra) = calls.next() {
            return Err(error_at(
                extra.syntax(),
                source,
                "manifest has more than one top-level 'Package(...)' declaration",
            ));
        }

        let decl = PackageDecl { call };
        decl.check_shape(source)?;
        Ok(decl)
    }

    fn check_shape(&self, source: &str) -> Result<(), ParseError> {
        match self.call.arg("name") {
            None => {
                return Err(error_at(
                    self.call.syntax(),
                    source,
                    "package declaration has no 'name' argument",
                ))
            }
            Some(arg) if arg.string_value().is_none() => {
                return Err(error_at(
                    arg.syntax(),
                    source,
                    "package name must be a plain string literal",
                ))
            }
            Some(_) => {}
        }

        for slot in ListSlot::ALL {
            let mut matching = self.args_labelled(slot.label());
            let Some(first) = matching.next() else {
                continue;
            };
            if let Some(duplicate) = matching.next() {
                return Err(error_at(
                    duplicate.syntax(),
                    source,
                    format!("duplicate '{}' argument in package declaration", slot),
                ));
            }
            if first.array().is_none() {
                return Err(error_at(
                    first.syntax(),
                    source,
                    format!("'{}' must be an array literal to be edited", slot),
                ));
            }
        }

        Ok(())
    }

    fn args_labelled<'a>(&self, label: &'a str) -> impl Iterator<Item = Arg> + 'a {
        self.call
            .args()
            .into_iter()
            .filter(move |arg| arg.label().as_deref() == Some(label))
    }

    pub fn call(&self) -> &CallExpr {
        &self.call
    }

    /// The package name. Checked to be a plain literal when the declaration
    /// was found.
    pub fn name(&self) -> String {
        self.call.string_arg("name").unwrap_or_default()
    }

    pub fn shape(&self, slot: ListSlot) -> ArgumentShape {
        match self.call.arg(slot.label()) {
            None => ArgumentShape::Absent,
            Some(arg) => match arg.array() {
                Some(array) => ArgumentShape::Array(array),
                None => ArgumentShape::Other(arg),
            },
        }
    }

    pub fn list(&self, slot: ListSlot) -> Option<ArrayExpr> {
        match self.shape(slot) {
            ArgumentShape::Array(array) => Some(array),
            _ => None,
        }
    }

    /// The argument a new `slot` argument should follow: the last one whose
    /// label ranks before it in [`CANONICAL_ORDER`].
    pub fn predecessor(&self, slot: ListSlot) -> Option<Arg> {
        let rank = slot.rank();
        self.call
            .args()
            .into_iter()
            .filter(|arg| {
                arg.label()
                    .and_then(|label| canonical_rank(&label))
                    .is_some_and(|r| r < rank)
            })
            .last()
    }
}

fn error_at(node: &SyntaxNode, source: &str, reason: impl Into<String>) -> ParseError {
    let range = node.text_range();
    let len = usize::from(range.end()) - usize::from(range.start());
    ParseError::new(reason, source, range.start().into(), len)
}
