//! Errors raised while validating an edit.
//!
//! Every variant is detected before the manifest is touched, so returning
//! one of these guarantees nothing was written.

use miette::Diagnostic;
use thiserror::Error;

use crate::core::product::UnsupportedProductType;
use crate::core::target::UnsupportedTargetType;
use crate::syntax::ParseError;

#[derive(Debug, Error, Diagnostic)]
pub enum EditError {
    // Requirement options
    #[error("only one requirement is allowed when specifiying a dependency")]
    MultipleRequirements,

    #[error("'--to' and '--through' may only be used with '--from' to specify a range requirement")]
    RangeWithoutFrom,

    #[error("'--to' and '--through' may not be used in the same requirement")]
    ToAndThrough,

    #[error("'{version}' is not a valid semantic version: {reason}")]
    InvalidVersion { version: String, reason: String },

    #[error("invalid version range: '{lower}' must be below '{upper}'")]
    EmptyRange { lower: String, upper: String },

    #[error("a requirement must be specified for remote dependency '{locator}'")]
    MissingRequirement { locator: String },

    #[error("a requirement cannot be specified for local dependency '{locator}'")]
    RequirementForLocalDependency { locator: String },

    // Dependencies
    #[error("'{package}' already has a dependency on '{locator}'")]
    DuplicateDependency { package: String, locator: String },

    #[error("could not read the manifest of dependency '{locator}': {reason}")]
    DependencyManifestUnavailable { locator: String, reason: String },

    // Targets
    #[error(transparent)]
    UnsupportedTargetType(#[from] UnsupportedTargetType),

    #[error("binary targets must specify either a path or both a URL and a checksum")]
    BinaryTargetSource,

    #[error("option '--checksum' is only supported for binary targets")]
    ChecksumRequiresBinary,

    #[error("option '--url' is only supported for binary targets")]
    UrlRequiresBinary,

    #[error("option '--dependencies' is not supported for binary targets")]
    DependenciesOnBinary,

    #[error("a target named '{name}' already exists in '{package}'")]
    DuplicateTarget { package: String, name: String },

    #[error(
        "'{name}' is neither a target in '{package}' nor a product of one of its local dependencies"
    )]
    UnknownTargetDependency { package: String, name: String },

    // Products
    #[error(transparent)]
    UnsupportedProductType(#[from] UnsupportedProductType),

    #[error("product '{name}' must contain at least one target")]
    EmptyProduct { name: String },

    #[error("product '{product}' refers to '{target}', which is not a target in '{package}'")]
    UnknownProductTarget {
        package: String,
        product: String,
        target: String,
    },

    #[error("a product named '{name}' already exists in '{package}'")]
    DuplicateProduct { package: String, name: String },

    // Manifest shape
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = EditError::DuplicateDependency {
            package: "MyPackage".to_string(),
            locator: "/tmp/MyPackage2".to_string(),
        };
        assert_eq!(err.to_string(), "'MyPackage' already has a dependency on '/tmp/MyPackage2'");

        let err = EditError::from(UnsupportedTargetType("plugin".to_string()));
        assert_eq!(
            err.to_string(),
            "unsupported target type 'plugin'; supported types are library, executable, test, and binary"
        );
    }

    #[test]
    fn test_parse_errors_keep_their_location() {
        let err = EditError::from(ParseError::new("unclosed '('", "f(", 1, 1));
        assert_eq!(err.to_string(), "unclosed '(' (line 1, column 2)");
    }
}
