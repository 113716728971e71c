//! Formatting conventions sniffed from existing source.
//!
//! New entries must look like they were written by whoever wrote the rest of
//! the manifest. Everything here is a pure function of the current tree and
//! its text, so builders for every edit kind share the same rules.

use rowan::Direction;

use crate::syntax::{ArrayExpr, CallExpr, SyntaxKind, SyntaxNode};

/// Default indentation when nothing can be inferred.
pub const DEFAULT_INDENT: &str = "    ";

/// File-wide conventions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatStyle {
    /// One level of indentation.
    pub indent_unit: String,
    /// Line terminator used by the file.
    pub newline: String,
}

impl Default for FormatStyle {
    fn default() -> Self {
        FormatStyle {
            indent_unit: DEFAULT_INDENT.to_string(),
            newline: "\n".to_string(),
        }
    }
}

impl FormatStyle {
    /// Infer the indent unit from how the package declaration indents its
    /// arguments relative to its own line.
    pub fn detect(source: &str, decl: &CallExpr, fallback_indent: &str) -> Self {
        let newline = if source.contains("\r\n") { "\r\n" } else { "\n" };

        let decl_indent = line_indent(source, offset_of(decl.syntax()));
        let unit = decl
            .args()
            .into_iter()
            .map(|arg| offset_of(arg.syntax()))
            .filter(|&offset| starts_line(source, offset))
            .map(|offset| line_indent(source, offset))
            .find_map(|indent| {
                indent
                    .strip_prefix(decl_indent)
                    .filter(|unit| !unit.is_empty())
                    .map(str::to_string)
            });

        FormatStyle {
            indent_unit: unit.unwrap_or_else(|| fallback_indent.to_string()),
            newline: newline.to_string(),
        }
    }
}

/// How entries are laid out inside a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListLayout {
    /// One entry per line.
    Vertical,
    /// All entries on the bracket's line.
    Inline,
}

/// Style descriptor consumed by every entry builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListStyle {
    pub layout: ListLayout,
    /// Indentation of each entry's first line.
    pub item_indent: String,
    /// Indentation of the line holding the closing bracket.
    pub closing_indent: String,
    /// Whether the last entry is followed by a comma.
    pub trailing_comma: bool,
    pub indent_unit: String,
    pub newline: String,
}

impl ListStyle {
    /// Indentation for a line nested `depth` levels inside an entry.
    pub fn nested(&self, depth: usize) -> String {
        format!("{}{}", self.item_indent, self.indent_unit.repeat(depth))
    }
}

/// Compute the style of `list`. `source` must be the text of the tree that
/// `list` belongs to.
pub fn style_of(list: &ArrayExpr, source: &str, format: &FormatStyle) -> ListStyle {
    let open = offset_of(list.syntax());
    let closing_indent = match list.r_brack() {
        Some(r) if starts_line(source, r.text_range().start().into()) => {
            line_indent(source, r.text_range().start().into())
        }
        _ => line_indent(source, open),
    }
    .to_string();

    let Some(last) = list.elements().last() else {
        return ListStyle {
            layout: ListLayout::Vertical,
            item_indent: format!("{}{}", closing_indent, format.indent_unit),
            closing_indent,
            trailing_comma: true,
            indent_unit: format.indent_unit.clone(),
            newline: format.newline.clone(),
        };
    };

    let vertical = last
        .syntax()
        .siblings_with_tokens(Direction::Prev)
        .skip(1)
        .any(|e| e.kind() == SyntaxKind::Newline);

    let trailing_comma = last
        .syntax()
        .siblings_with_tokens(Direction::Next)
        .skip(1)
        .find(|e| !e.kind().is_trivia())
        .is_some_and(|e| e.kind() == SyntaxKind::Comma);

    let (layout, item_indent) = if vertical {
        (
            ListLayout::Vertical,
            line_indent(source, offset_of(last.syntax())).to_string(),
        )
    } else {
        (
            ListLayout::Inline,
            format!("{}{}", closing_indent, format.indent_unit),
        )
    };

    ListStyle {
        layout,
        item_indent,
        closing_indent,
        trailing_comma,
        indent_unit: format.indent_unit.clone(),
        newline: format.newline.clone(),
    }
}

/// Leading whitespace of the line containing `offset`.
pub fn line_indent(source: &str, offset: usize) -> &str {
    let line_start = line_start(source, offset);
    let line = &source[line_start..];
    let width = line.len() - line.trim_start_matches(|c| c == ' ' || c == '\t').len();
    &line[..width]
}

/// Whether only whitespace precedes `offset` on its line.
pub fn starts_line(source: &str, offset: usize) -> bool {
    source[line_start(source, offset)..offset]
        .chars()
        .all(|c| c == ' ' || c == '\t')
}

fn line_start(source: &str, offset: usize) -> usize {
    source[..offset]
        .rfind(|c| c == '\n' || c == '\r')
        .map_or(0, |i| i + 1)
}

fn offset_of(node: &SyntaxNode) -> usize {
    node.text_range().start().into()
}
