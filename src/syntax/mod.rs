//! Lossless syntax tree for package manifests, built on Rowan.
//!
//! The tree is deliberately shallow: it understands calls, argument lists,
//! array literals and blocks, and keeps every other token verbatim. Trivia
//! (whitespace, newlines, comments) lives in the tree as ordinary tokens, so
//! printing any node reproduces its source text exactly.
//!
//! Items inside an argument list or array (`Arg` / `Element` nodes) never own
//! leading or trailing trivia; that trivia belongs to the enclosing list.
//! Editing code relies on this to find indentation and separators.

pub mod ast;
pub mod lexer;
pub mod parser;

pub use ast::{Arg, ArgList, ArrayExpr, CallExpr, Element};
pub use parser::{parse, parse_fragment, Fragment, ParseError};

/// Syntax kinds for manifest sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    // Trivia
    Whitespace,
    Newline,
    LineComment,
    BlockComment,

    // Tokens
    Ident,
    Number,
    StringLit,
    LParen,
    RParen,
    LBrack,
    RBrack,
    LBrace,
    RBrace,
    Comma,
    Colon,
    Semicolon,
    Dot,
    Operator,
    At,
    Hash,
    Backslash,
    Error,

    // Nodes
    SourceFile,
    CallExpr,
    ArgList,
    Arg,
    Label,
    ArrayExpr,
    Element,
    Block,
}

impl SyntaxKind {
    const ALL: [SyntaxKind; 30] = [
        SyntaxKind::Whitespace,
        SyntaxKind::Newline,
        SyntaxKind::LineComment,
        SyntaxKind::BlockComment,
        SyntaxKind::Ident,
        SyntaxKind::Number,
        SyntaxKind::StringLit,
        SyntaxKind::LParen,
        SyntaxKind::RParen,
        SyntaxKind::LBrack,
        SyntaxKind::RBrack,
        SyntaxKind::LBrace,
        SyntaxKind::RBrace,
        SyntaxKind::Comma,
        SyntaxKind::Colon,
        SyntaxKind::Semicolon,
        SyntaxKind::Dot,
        SyntaxKind::Operator,
        SyntaxKind::At,
        SyntaxKind::Hash,
        SyntaxKind::Backslash,
        SyntaxKind::Error,
        SyntaxKind::SourceFile,
        SyntaxKind::CallExpr,
        SyntaxKind::ArgList,
        SyntaxKind::Arg,
        SyntaxKind::Label,
        SyntaxKind::ArrayExpr,
        SyntaxKind::Element,
        SyntaxKind::Block,
    ];

    /// Whitespace, newlines and comments.
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            SyntaxKind::Whitespace
                | SyntaxKind::Newline
                | SyntaxKind::LineComment
                | SyntaxKind::BlockComment
        )
    }

    /// Human readable name used in parse errors.
    pub fn description(self) -> &'static str {
        match self {
            SyntaxKind::LParen => "'('",
            SyntaxKind::RParen => "')'",
            SyntaxKind::LBrack => "'['",
            SyntaxKind::RBrack => "']'",
            SyntaxKind::LBrace => "'{'",
            SyntaxKind::RBrace => "'}'",
            SyntaxKind::Comma => "','",
            SyntaxKind::Colon => "':'",
            SyntaxKind::StringLit => "string literal",
            SyntaxKind::Ident => "identifier",
            _ => "token",
        }
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        rowan::SyntaxKind(kind as u16)
    }
}

/// Rowan language tag for manifest sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ManifestLanguage {}

impl rowan::Language for ManifestLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        SyntaxKind::ALL
            .get(raw.0 as usize)
            .copied()
            .unwrap_or(SyntaxKind::Error)
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

pub type SyntaxNode = rowan::SyntaxNode<ManifestLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<ManifestLanguage>;
pub type SyntaxElement = rowan::NodeOrToken<SyntaxNode, SyntaxToken>;

/// A green child: either a subtree or a token.
pub type GreenElement = rowan::NodeOrToken<rowan::GreenNode, rowan::GreenToken>;

/// Create a detached green token.
pub fn green_token(kind: SyntaxKind, text: &str) -> GreenElement {
    rowan::NodeOrToken::Token(rowan::GreenToken::new(kind.into(), text))
}

/// Quote a value as a string literal.
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Decode a plain single-line string literal.
///
/// Returns `None` for raw, multi-line or interpolated literals, since their
/// value cannot be known without evaluating the manifest.
pub fn unquote(literal: &str) -> Option<String> {
    let body = literal.strip_prefix('"')?.strip_suffix('"')?;
    if literal.len() < 2 || body.starts_with('"') {
        return None;
    }

    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            '\\' => out.push('\\'),
            '"' => out.push('"'),
            '\'' => out.push('\''),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            '0' => out.push('\0'),
            'u' => {
                let rest: String = chars.by_ref().take_while(|c| *c != '}').collect();
                let hex = rest.strip_prefix('{')?;
                let scalar = u32::from_str_radix(hex, 16).ok()?;
                out.push(char::from_u32(scalar)?);
            }
            // `\(` starts an interpolation
            _ => return None,
        }
    }
    Some(out)
}
