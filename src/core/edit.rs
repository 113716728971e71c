//! Splicing new items into argument lists and array literals.
//!
//! Every edit inserts tokens next to existing ones and never rewrites them.
//! The one exception is blank space inside an empty `[ ]`, which is replaced
//! when the list is opened up.

use std::cmp::Reverse;
use std::ops::Range;

use rowan::GreenNode;

use crate::core::style::{ListLayout, ListStyle};
use crate::syntax::{
    green_token, Arg, ArgList, ArrayExpr, GreenElement, SyntaxElement, SyntaxKind, SyntaxNode,
};

/// Layout used when inserting a new `Package(...)` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgLayout {
    pub vertical: bool,
    /// Indentation of the new argument's line.
    pub indent: String,
    /// Indentation of the line holding `)`.
    pub closing_indent: String,
    pub newline: String,
}

struct Splice {
    range: Range<usize>,
    elements: Vec<GreenElement>,
}

#[derive(Default)]
struct Pieces(Vec<GreenElement>);

impl Pieces {
    fn newline(mut self, newline: &str) -> Self {
        self.0.push(green_token(SyntaxKind::Newline, newline));
        self
    }

    fn indent(mut self, indent: &str) -> Self {
        if !indent.is_empty() {
            self.0.push(green_token(SyntaxKind::Whitespace, indent));
        }
        self
    }

    fn comma(mut self) -> Self {
        self.0.push(green_token(SyntaxKind::Comma, ","));
        self
    }

    fn comma_if(self, yes: bool) -> Self {
        if yes {
            self.comma()
        } else {
            self
        }
    }

    fn node(mut self, node: &GreenNode) -> Self {
        self.0.push(GreenElement::Node(node.clone()));
        self
    }

    fn at(self, index: usize) -> Splice {
        self.replace(index..index)
    }

    fn replace(self, range: Range<usize>) -> Splice {
        Splice {
            range,
            elements: self.0,
        }
    }
}

/// Apply `splices` to the children of `parent` and return the new root.
///
/// Splices at the same index keep the order in which they were given.
fn apply(parent: &SyntaxNode, splices: Vec<Splice>) -> GreenNode {
    let mut ordered: Vec<(usize, Splice)> = splices.into_iter().enumerate().collect();
    ordered.sort_by_key(|(seq, splice)| Reverse((splice.range.start, *seq)));

    let mut green: GreenNode = parent.green().into_owned();
    for (_, splice) in ordered {
        green = green.splice_children(splice.range, splice.elements);
    }
    parent.replace_with(green)
}

/// Whitespace or comments that do not end the line.
fn is_inline_trivia(kind: SyntaxKind) -> bool {
    kind.is_trivia() && kind != SyntaxKind::Newline
}

/// First index at or after `from` that is not inline trivia.
fn skip_inline_trivia(children: &[SyntaxElement], from: usize) -> usize {
    children[from..]
        .iter()
        .position(|c| !is_inline_trivia(c.kind()))
        .map_or(children.len(), |i| from + i)
}

/// Index of the comma separating the item at `item` from what follows.
fn comma_after(children: &[SyntaxElement], item: usize) -> Option<usize> {
    let next = children[item + 1..]
        .iter()
        .position(|c| !c.kind().is_trivia())
        .map(|i| item + 1 + i)?;
    (children[next].kind() == SyntaxKind::Comma).then_some(next)
}

fn index_of(children: &[SyntaxElement], node: &SyntaxNode) -> Option<usize> {
    children.iter().position(|c| c.as_node() == Some(node))
}

/// Append an `Element` node at the end of `list`. Returns the new root.
pub fn append_element(list: &ArrayExpr, element: &GreenNode, style: &ListStyle) -> GreenNode {
    let children: Vec<SyntaxElement> = list.syntax().children_with_tokens().collect();
    let newline = style.newline.as_str();

    let last = children
        .iter()
        .rposition(|c| c.kind() == SyntaxKind::Element);

    let splices = match last {
        None => {
            let j = skip_inline_trivia(&children, 1);
            if children.get(j).map(SyntaxElement::kind) == Some(SyntaxKind::Newline) {
                vec![Pieces::default()
                    .newline(newline)
                    .indent(&style.item_indent)
                    .node(element)
                    .comma_if(style.trailing_comma)
                    .at(j)]
            } else {
                let blank = children[1..j]
                    .iter()
                    .all(|c| c.kind() == SyntaxKind::Whitespace);
                let start = if blank { 1 } else { j };
                vec![Pieces::default()
                    .newline(newline)
                    .indent(&style.item_indent)
                    .node(element)
                    .comma_if(style.trailing_comma)
                    .newline(newline)
                    .indent(&style.closing_indent)
                    .replace(start..j)]
            }
        }
        Some(e) => {
            let comma = comma_after(&children, e);
            match style.layout {
                ListLayout::Vertical => {
                    let anchor = comma.unwrap_or(e);
                    let j = skip_inline_trivia(&children, anchor + 1);
                    let mut splices = Vec::new();
                    if comma.is_none() {
                        splices.push(Pieces::default().comma().at(e + 1));
                    }
                    splices.push(
                        Pieces::default()
                            .newline(newline)
                            .indent(&style.item_indent)
                            .node(element)
                            .comma_if(style.trailing_comma)
                            .at(j),
                    );
                    splices
                }
                ListLayout::Inline => match comma {
                    Some(c) => vec![Pieces::default()
                        .indent(" ")
                        .node(element)
                        .comma()
                        .at(c + 1)],
                    None => vec![Pieces::default()
                        .comma()
                        .indent(" ")
                        .node(element)
                        .at(e + 1)],
                },
            }
        }
    };

    apply(list.syntax(), splices)
}

/// Insert an `Arg` node into `args` right after `after`, or first when there
/// is no predecessor. Returns the new root.
pub fn insert_argument(
    args: &ArgList,
    after: Option<&Arg>,
    arg: &GreenNode,
    layout: &ArgLayout,
) -> GreenNode {
    let children: Vec<SyntaxElement> = args.syntax().children_with_tokens().collect();
    let newline = layout.newline.as_str();
    let has_args = args.args().next().is_some();
    let prev = after.and_then(|a| index_of(&children, a.syntax()));

    let splices = match (prev, layout.vertical) {
        (Some(p), true) => match comma_after(&children, p) {
            Some(c) => {
                let j = skip_inline_trivia(&children, c + 1);
                vec![Pieces::default()
                    .newline(newline)
                    .indent(&layout.indent)
                    .node(arg)
                    .comma()
                    .at(j)]
            }
            None => {
                let j = skip_inline_trivia(&children, p + 1);
                vec![
                    Pieces::default().comma().at(p + 1),
                    Pieces::default()
                        .newline(newline)
                        .indent(&layout.indent)
                        .node(arg)
                        .at(j),
                ]
            }
        },
        (Some(p), false) => match comma_after(&children, p) {
            Some(c) => vec![Pieces::default().indent(" ").node(arg).comma().at(c + 1)],
            None => vec![Pieces::default().comma().indent(" ").node(arg).at(p + 1)],
        },
        (None, true) => {
            let j = skip_inline_trivia(&children, 1);
            let pieces = Pieces::default()
                .newline(newline)
                .indent(&layout.indent)
                .node(arg);
            if has_args {
                vec![pieces.comma().at(j)]
            } else {
                vec![pieces
                    .newline(newline)
                    .indent(&layout.closing_indent)
                    .at(j)]
            }
        }
        (None, false) => {
            let pieces = Pieces::default().node(arg);
            if has_args {
                vec![pieces.comma().indent(" ").at(1)]
            } else {
                vec![pieces.at(1)]
            }
        }
    };

    apply(args.syntax(), splices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::style::{style_of, FormatStyle};
    use crate::syntax::{parse, parse_fragment, CallExpr, Fragment};

    fn append(source: &str, item: &str) -> String {
        let root = SyntaxNode::new_root(parse(source).unwrap());
        let list = root.descendants().find_map(ArrayExpr::cast).unwrap();
        let style = style_of(&list, source, &FormatStyle::default());
        let element = parse_fragment(item, Fragment::Element).unwrap();
        SyntaxNode::new_root(append_element(&list, &element, &style)).to_string()
    }

    fn insert(source: &str, after: &str, text: &str, vertical: bool) -> String {
        let root = SyntaxNode::new_root(parse(source).unwrap());
        let call = root.descendants().find_map(CallExpr::cast).unwrap();
        let args = call.arg_list().unwrap();
        let prev = call.arg(after);
        let arg = parse_fragment(text, Fragment::Arg).unwrap();
        let layout = ArgLayout {
            vertical,
            indent: "    ".to_string(),
            closing_indent: String::new(),
            newline: "\n".to_string(),
        };
        SyntaxNode::new_root(insert_argument(&args, prev.as_ref(), &arg, &layout)).to_string()
    }

    #[test]
    fn test_append_to_vertical_list() {
        assert_eq!(
            append("x: [\n    \"A\",\n]", "\"B\""),
            "x: [\n    \"A\",\n    \"B\",\n]"
        );
    }

    #[test]
    fn test_append_adds_missing_separator() {
        assert_eq!(
            append("x: [\n    \"A\" // keep\n]", "\"B\""),
            "x: [\n    \"A\", // keep\n    \"B\"\n]"
        );
    }

    #[test]
    fn test_append_after_trailing_comment() {
        assert_eq!(
            append("x: [\n  \"A\", /* a */ // b\n  // c\n]", "\"B\""),
            "x: [\n  \"A\", /* a */ // b\n  \"B\",\n  // c\n]"
        );
    }

    #[test]
    fn test_append_to_inline_list() {
        assert_eq!(append("x: [\"A\", \"B\"]", "\"C\""), "x: [\"A\", \"B\", \"C\"]");
        assert_eq!(append("x: [\"A\",]", "\"C\""), "x: [\"A\", \"C\",]");
    }

    #[test]
    fn test_append_to_empty_list() {
        assert_eq!(append("    x: []", "\"A\""), "    x: [\n        \"A\",\n    ]");
        assert_eq!(append("    x: [ ]", "\"A\""), "    x: [\n        \"A\",\n    ]");
        assert_eq!(append("    x: [\n    ]", "\"A\""), "    x: [\n        \"A\",\n    ]");
    }

    #[test]
    fn test_empty_list_keeps_comment() {
        assert_eq!(
            append("x: [ // none yet\n]", "\"A\""),
            "x: [ // none yet\n    \"A\",\n]"
        );
    }

    #[test]
    fn test_insert_argument_after_last_vertical() {
        let source = "Package(\n    name: \"A\"\n)";
        assert_eq!(
            insert(source, "name", "targets: [\n    ]", true),
            "Package(\n    name: \"A\",\n    targets: [\n    ]\n)"
        );
    }

    #[test]
    fn test_insert_argument_between_vertical() {
        let source = "Package(\n    name: \"A\", // the name\n    targets: []\n)";
        assert_eq!(
            insert(source, "name", "products: [\n    ]", true),
            "Package(\n    name: \"A\", // the name\n    products: [\n    ],\n    targets: []\n)"
        );
    }

    #[test]
    fn test_insert_argument_inline() {
        assert_eq!(
            insert("Package(name: \"A\")", "name", "targets: []", false),
            "Package(name: \"A\", targets: [])"
        );
        assert_eq!(
            insert("Package(name: \"A\", targets: [])", "name", "products: []", false),
            "Package(name: \"A\", products: [], targets: [])"
        );
    }
}
