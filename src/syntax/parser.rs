//! Rowan-based parser for manifest sources.
//!
//! The grammar is intentionally loose. Anything outside calls, argument
//! lists, arrays and blocks is kept as a flat run of tokens, which is enough
//! to locate the package declaration while preserving arbitrary code around
//! it.

use miette::{Diagnostic, NamedSource, SourceSpan};
use rowan::{GreenNode, GreenNodeBuilder};
use thiserror::Error;

use super::lexer::{describe_error, tokenize, Lexeme};
use super::SyntaxKind;

/// Error produced when a manifest cannot be turned into a syntax tree.
#[derive(Debug, Error, Diagnostic)]
#[error("{reason} (line {line}, column {column})")]
#[diagnostic(code(package_editor::parse))]
pub struct ParseError {
    pub reason: String,
    pub line: usize,
    pub column: usize,
    #[source_code]
    pub src: NamedSource<String>,
    #[label("here")]
    pub span: SourceSpan,
}

impl ParseError {
    /// Create an error pointing at `offset..offset + len` in `source`.
    pub fn new(reason: impl Into<String>, source: &str, offset: usize, len: usize) -> Self {
        let offset = offset.min(source.len());
        let before = &source[..offset];
        let line = before.matches('\n').count() + 1;
        let column = before
            .rfind('\n')
            .map_or(before.chars().count(), |nl| before[nl + 1..].chars().count())
            + 1;

        ParseError {
            reason: reason.into(),
            line,
            column,
            src: NamedSource::new("Package.swift", source.to_string()),
            span: (offset, len).into(),
        }
    }
}

/// What a fragment should be parsed as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fragment {
    /// A single array element, such as `.target(name: "A")`.
    Element,
    /// A single call argument, such as `targets: []`.
    Arg,
}

/// Parse a whole manifest into a `SourceFile` tree.
pub fn parse(source: &str) -> Result<GreenNode, ParseError> {
    let mut parser = Parser::new(source);
    parser.start_node(SyntaxKind::SourceFile);
    while !parser.at_end() {
        parser.parse_term()?;
    }
    parser.finish_node();
    Ok(parser.builder.finish())
}

/// Parse a standalone list item so it can be spliced into an existing tree.
pub fn parse_fragment(source: &str, fragment: Fragment) -> Result<GreenNode, ParseError> {
    let mut parser = Parser::new(source);
    if parser.current_kind().map_or(true, SyntaxKind::is_trivia) {
        return Err(parser.error_here("fragment must not start with trivia"));
    }

    let kind = match fragment {
        Fragment::Element => SyntaxKind::Element,
        Fragment::Arg => SyntaxKind::Arg,
    };
    parser.parse_item(kind, None)?;

    if !parser.at_end() {
        return Err(parser.error_here("unexpected trailing input in fragment"));
    }
    Ok(parser.builder.finish())
}

struct Parser<'a> {
    tokens: Vec<Lexeme<'a>>,
    current: usize,
    builder: GreenNodeBuilder<'static>,
    source: &'a str,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Parser {
            tokens: tokenize(source),
            current: 0,
            builder: GreenNodeBuilder::new(),
            source,
        }
    }

    fn start_node(&mut self, kind: SyntaxKind) {
        self.builder.start_node(kind.into());
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    fn at_end(&self) -> bool {
        self.current >= self.tokens.len()
    }

    fn current_kind(&self) -> Option<SyntaxKind> {
        self.peek_kind(0)
    }

    fn peek_kind(&self, n: usize) -> Option<SyntaxKind> {
        self.tokens.get(self.current + n).map(|t| t.kind)
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.current_kind() == Some(kind)
    }

    /// Kind of the next token that is not trivia, starting at the cursor.
    fn next_significant(&self) -> Option<SyntaxKind> {
        self.tokens[self.current..]
            .iter()
            .map(|t| t.kind)
            .find(|kind| !kind.is_trivia())
    }

    fn bump(&mut self) {
        if let Some(token) = self.tokens.get(self.current) {
            self.builder.token(token.kind.into(), token.text);
            self.current += 1;
        }
    }

    fn bump_trivia(&mut self) {
        while self.current_kind().is_some_and(SyntaxKind::is_trivia) {
            self.bump();
        }
    }

    fn error_here(&self, reason: impl Into<String>) -> ParseError {
        match self.tokens.get(self.current) {
            Some(token) => ParseError::new(reason, self.source, token.offset, token.text.len()),
            None => ParseError::new(reason, self.source, self.source.len(), 0),
        }
    }

    fn error_at(&self, index: usize, reason: impl Into<String>) -> ParseError {
        let token = self.tokens[index];
        ParseError::new(reason, self.source, token.offset, token.text.len())
    }

    /// Parse one token or one delimited group.
    fn parse_term(&mut self) -> Result<(), ParseError> {
        let Some(kind) = self.current_kind() else {
            return Ok(());
        };

        match kind {
            SyntaxKind::Error => {
                let text = self.tokens[self.current].text;
                Err(self.error_here(describe_error(text)))
            }
            SyntaxKind::RParen | SyntaxKind::RBrack | SyntaxKind::RBrace => {
                Err(self.error_here(format!("unexpected {}", kind.description())))
            }
            SyntaxKind::LParen => self.parse_list(SyntaxKind::ArgList),
            SyntaxKind::LBrack => self.parse_list(SyntaxKind::ArrayExpr),
            SyntaxKind::LBrace => self.parse_block(),
            SyntaxKind::Dot
                if self.peek_kind(1) == Some(SyntaxKind::Ident)
                    && self.peek_kind(2) == Some(SyntaxKind::LParen) =>
            {
                self.parse_call()
            }
            SyntaxKind::Ident if self.peek_kind(1) == Some(SyntaxKind::LParen) => {
                self.parse_call()
            }
            _ => {
                self.bump();
                Ok(())
            }
        }
    }

    /// `Name(...)` or `.name(...)`; the paren must follow the name directly.
    fn parse_call(&mut self) -> Result<(), ParseError> {
        self.start_node(SyntaxKind::CallExpr);
        if self.at(SyntaxKind::Dot) {
            self.bump();
        }
        self.bump();
        self.parse_list(SyntaxKind::ArgList)?;
        self.finish_node();
        Ok(())
    }

    /// A comma separated list: `( args )` or `[ elements ]`.
    fn parse_list(&mut self, kind: SyntaxKind) -> Result<(), ParseError> {
        let (closer, item) = match kind {
            SyntaxKind::ArgList => (SyntaxKind::RParen, SyntaxKind::Arg),
            _ => (SyntaxKind::RBrack, SyntaxKind::Element),
        };
        let open = self.current;

        self.start_node(kind);
        self.bump();
        loop {
            self.bump_trivia();
            match self.current_kind() {
                None => {
                    let opener = self.tokens[open].kind.description();
                    return Err(self.error_at(open, format!("unclosed {opener}")));
                }
                Some(k) if k == closer => {
                    self.bump();
                    break;
                }
                Some(SyntaxKind::Comma) => self.bump(),
                Some(_) => self.parse_item(item, Some(closer))?,
            }
        }
        self.finish_node();
        Ok(())
    }

    /// A `{ ... }` group, kept opaque.
    fn parse_block(&mut self) -> Result<(), ParseError> {
        let open = self.current;

        self.start_node(SyntaxKind::Block);
        self.bump();
        loop {
            match self.current_kind() {
                None => return Err(self.error_at(open, "unclosed '{'")),
                Some(SyntaxKind::RBrace) => {
                    self.bump();
                    break;
                }
                Some(_) => self.parse_term()?,
            }
        }
        self.finish_node();
        Ok(())
    }

    /// One argument or element. Stops before a separating comma, the list's
    /// closer, or any trivia that only precedes those.
    fn parse_item(&mut self, kind: SyntaxKind, closer: Option<SyntaxKind>) -> Result<(), ParseError> {
        self.start_node(kind);

        if kind == SyntaxKind::Arg && self.at(SyntaxKind::Ident) && self.label_follows() {
            self.start_node(SyntaxKind::Label);
            self.bump();
            self.bump_trivia();
            self.bump();
            self.finish_node();
        }

        loop {
            match self.current_kind() {
                None | Some(SyntaxKind::Comma) => break,
                Some(k) if Some(k) == closer => break,
                Some(k) if k.is_trivia() => {
                    let ends = match self.next_significant() {
                        None | Some(SyntaxKind::Comma) => true,
                        Some(next) => Some(next) == closer,
                    };
                    if ends {
                        break;
                    }
                    self.bump();
                }
                Some(_) => self.parse_term()?,
            }
        }

        self.finish_node();
        Ok(())
    }

    /// Whether the identifier at the cursor is followed by `:`.
    fn label_follows(&self) -> bool {
        self.tokens[self.current + 1..]
            .iter()
            .find(|t| !t.kind.is_trivia())
            .is_some_and(|t| t.kind == SyntaxKind::Colon)
    }
}
