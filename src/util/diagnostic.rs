//! Source snippets for manifest errors.
//!
//! Parse errors carry the manifest text and the span they refer to. When one
//! ends a command, the binary prints the usual one-line error followed by
//! the offending lines.

use miette::{Diagnostic, GraphicalReportHandler, GraphicalTheme};

use crate::ops::EditError;
use crate::syntax::ParseError;

/// Find the parse error behind `err`, if any.
pub fn find_parse_error(err: &anyhow::Error) -> Option<&ParseError> {
    err.chain().find_map(|cause| {
        cause.downcast_ref::<ParseError>().or_else(|| {
            match cause.downcast_ref::<EditError>() {
                Some(EditError::Parse(parse)) => Some(parse),
                _ => None,
            }
        })
    })
}

/// Render `diagnostic` with its labelled source lines.
pub fn render_snippet(diagnostic: &dyn Diagnostic, color: bool) -> Option<String> {
    let theme = if color {
        GraphicalTheme::unicode()
    } else {
        GraphicalTheme::unicode_nocolor()
    };
    let handler = GraphicalReportHandler::new_themed(theme);

    let mut out = String::new();
    handler.render_report(&mut out, diagnostic).ok()?;
    Some(out)
}
