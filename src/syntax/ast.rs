//! Typed views over the untyped syntax tree.

use super::{unquote, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl $name {
            pub fn cast(node: SyntaxNode) -> Option<Self> {
                (node.kind() == SyntaxKind::$kind).then(|| $name(node))
            }

            pub fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

ast_node!(CallExpr, CallExpr);
ast_node!(ArgList, ArgList);
ast_node!(Arg, Arg);
ast_node!(ArrayExpr, ArrayExpr);
ast_node!(Element, Element);

/// The only significant child of a list item, if it has exactly one.
fn sole_value(children: impl Iterator<Item = SyntaxElement>) -> Option<SyntaxElement> {
    let mut significant = children.filter(|e| !e.kind().is_trivia());
    let first = significant.next()?;
    significant.next().is_none().then_some(first)
}

fn string_of(element: SyntaxElement) -> Option<String> {
    match element {
        SyntaxElement::Token(token) if token.kind() == SyntaxKind::StringLit => unquote(token.text()),
        _ => None,
    }
}

impl CallExpr {
    /// The called name without a leading dot: `Package`, `target`, ...
    pub fn name(&self) -> Option<String> {
        self.0
            .children_with_tokens()
            .filter_map(SyntaxElement::into_token)
            .find(|t| t.kind() == SyntaxKind::Ident)
            .map(|t| t.text().to_string())
    }

    /// Whether the call is an implicit member call such as `.target(...)`.
    pub fn is_member(&self) -> bool {
        self.0
            .first_token()
            .is_some_and(|t| t.kind() == SyntaxKind::Dot)
    }

    pub fn arg_list(&self) -> Option<ArgList> {
        self.0.children().find_map(ArgList::cast)
    }

    pub fn args(&self) -> Vec<Arg> {
        self.arg_list().map(|list| list.args().collect()).unwrap_or_default()
    }

    /// First argument with the given label.
    pub fn arg(&self, label: &str) -> Option<Arg> {
        self.args()
            .into_iter()
            .find(|arg| arg.label().as_deref() == Some(label))
    }

    /// Value of a labelled argument that is a plain string literal.
    pub fn string_arg(&self, label: &str) -> Option<String> {
        self.arg(label).and_then(|arg| arg.string_value())
    }
}

impl ArgList {
    pub fn args(&self) -> impl Iterator<Item = Arg> {
        self.0.children().filter_map(Arg::cast)
    }

    /// Whether any argument starts on its own line.
    pub fn is_vertical(&self) -> bool {
        self.0
            .children_with_tokens()
            .any(|e| e.kind() == SyntaxKind::Newline)
    }
}

impl Arg {
    pub fn label(&self) -> Option<String> {
        let label = self.0.children().find(|n| n.kind() == SyntaxKind::Label)?;
        label
            .children_with_tokens()
            .filter_map(SyntaxElement::into_token)
            .find(|t| t.kind() == SyntaxKind::Ident)
            .map(|t| t.text().to_string())
    }

    /// Children after the label.
    fn value_children(&self) -> impl Iterator<Item = SyntaxElement> {
        self.0
            .children_with_tokens()
            .filter(|e| e.kind() != SyntaxKind::Label)
    }

    /// The value when it consists of a single node, such as an array or a call.
    pub fn value_node(&self) -> Option<SyntaxNode> {
        sole_value(self.value_children()).and_then(SyntaxElement::into_node)
    }

    pub fn array(&self) -> Option<ArrayExpr> {
        self.value_node().and_then(ArrayExpr::cast)
    }

    pub fn string_value(&self) -> Option<String> {
        sole_value(self.value_children()).and_then(string_of)
    }
}

impl ArrayExpr {
    pub fn elements(&self) -> impl Iterator<Item = Element> {
        self.0.children().filter_map(Element::cast)
    }

    pub fn r_brack(&self) -> Option<SyntaxToken> {
        self.0.last_token().filter(|t| t.kind() == SyntaxKind::RBrack)
    }
}

impl Element {
    pub fn call(&self) -> Option<CallExpr> {
        sole_value(self.0.children_with_tokens())
            .and_then(SyntaxElement::into_node)
            .and_then(CallExpr::cast)
    }

    pub fn string_value(&self) -> Option<String> {
        sole_value(self.0.children_with_tokens()).and_then(string_of)
    }
}
