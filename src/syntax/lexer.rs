//! Manifest lexer using Logos.
//!
//! Produces every byte of the input as some token, trivia included, so the
//! parser can rebuild the source exactly.

use logos::Logos;

use super::SyntaxKind;

/// Raw token classes recognised by the lexer.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    #[regex(r"[ \t\f]+")]
    Whitespace,

    #[regex(r"\r\n|\n|\r")]
    Newline,

    #[regex(r"//[^\r\n]*")]
    LineComment,

    #[token("/*", block_comment)]
    BlockComment,

    #[regex(r"[\p{XID_Start}_]\p{XID_Continue}*")]
    #[regex(r"`[^`\r\n]+`")]
    #[regex(r"\$[A-Za-z0-9_]+")]
    Ident,

    #[regex(r"[0-9][0-9_]*(\.[0-9][0-9_]*)?([eE][+-]?[0-9_]+)?")]
    #[regex(r"0[xob][0-9A-Fa-f_]+")]
    Number,

    #[token("\"", string_literal)]
    #[regex("#+\"", raw_string_literal)]
    String,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBrack,
    #[token("]")]
    RBrack,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
    #[token(".")]
    Dot,

    #[regex(r"[=\-+!*%<>&|^~?]+")]
    #[regex(r"\.[.=\-+!*%<>&|^~?]+")]
    #[token("/")]
    Operator,

    #[token("@")]
    At,
    #[token("#")]
    Hash,
    #[token("\\")]
    Backslash,
}

impl From<Token> for SyntaxKind {
    fn from(token: Token) -> Self {
        match token {
            Token::Whitespace => SyntaxKind::Whitespace,
            Token::Newline => SyntaxKind::Newline,
            Token::LineComment => SyntaxKind::LineComment,
            Token::BlockComment => SyntaxKind::BlockComment,
            Token::Ident => SyntaxKind::Ident,
            Token::Number => SyntaxKind::Number,
            Token::String => SyntaxKind::StringLit,
            Token::LParen => SyntaxKind::LParen,
            Token::RParen => SyntaxKind::RParen,
            Token::LBrack => SyntaxKind::LBrack,
            Token::RBrack => SyntaxKind::RBrack,
            Token::LBrace => SyntaxKind::LBrace,
            Token::RBrace => SyntaxKind::RBrace,
            Token::Comma => SyntaxKind::Comma,
            Token::Colon => SyntaxKind::Colon,
            Token::Semicolon => SyntaxKind::Semicolon,
            Token::Dot => SyntaxKind::Dot,
            Token::Operator => SyntaxKind::Operator,
            Token::At => SyntaxKind::At,
            Token::Hash => SyntaxKind::Hash,
            Token::Backslash => SyntaxKind::Backslash,
        }
    }
}

/// A lexed token with its byte offset into the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lexeme<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: usize,
}

/// Tokenize `source`. Unrecognised input becomes `SyntaxKind::Error` tokens.
pub fn tokenize(source: &str) -> Vec<Lexeme<'_>> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let kind = match result {
            Ok(token) => SyntaxKind::from(token),
            Err(()) => SyntaxKind::Error,
        };
        tokens.push(Lexeme {
            kind,
            text: &source[span.clone()],
            offset: span.start,
        });
    }

    tokens
}

/// Explain why an error token was produced.
pub fn describe_error(text: &str) -> String {
    if text.starts_with("/*") {
        "unterminated block comment".to_string()
    } else if text.starts_with('"') || text.starts_with('#') {
        "unterminated string literal".to_string()
    } else {
        let c = text.chars().next().unwrap_or(' ');
        format!("unexpected character '{}'", c.escape_default())
    }
}

fn block_comment(lex: &mut logos::Lexer<'_, Token>) -> bool {
    let rest = lex.remainder();
    let bytes = rest.as_bytes();
    let mut depth = 1usize;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i..].starts_with(b"/*") {
            depth += 1;
            i += 2;
        } else if bytes[i..].starts_with(b"*/") {
            depth -= 1;
            i += 2;
            if depth == 0 {
                lex.bump(i);
                return true;
            }
        } else {
            i += 1;
        }
    }

    lex.bump(rest.len());
    false
}

fn string_literal(lex: &mut logos::Lexer<'_, Token>) -> bool {
    finish_string(lex, 0)
}

fn raw_string_literal(lex: &mut logos::Lexer<'_, Token>) -> bool {
    let hashes = lex.slice().len() - 1;
    finish_string(lex, hashes)
}

fn finish_string(lex: &mut logos::Lexer<'_, Token>, hashes: usize) -> bool {
    let rest = lex.remainder();
    let multiline = rest.starts_with("\"\"");
    let open = if multiline { 2 } else { 0 };

    match scan_string(&rest[open..], hashes, multiline) {
        Some(len) => {
            lex.bump(open + len);
            true
        }
        None => {
            lex.bump(rest.len());
            false
        }
    }
}

/// Scan a string body that starts right after its opening delimiter.
///
/// Returns the byte length up to and including the closing delimiter.
fn scan_string(src: &str, hashes: usize, multiline: bool) -> Option<usize> {
    let pounds = "#".repeat(hashes);
    let closing = if multiline {
        format!("\"\"\"{pounds}")
    } else {
        format!("\"{pounds}")
    };
    let escape = format!("\\{pounds}");

    let mut i = 0;
    while i < src.len() {
        let rest = &src[i..];
        if rest.starts_with(&closing) {
            return Some(i + closing.len());
        }
        if rest.starts_with(&escape) {
            i += escape.len();
            let after = &src[i..];
            if after.starts_with('(') {
                i += 1 + scan_interpolation(&after[1..])?;
            } else if let Some(c) = after.chars().next() {
                i += c.len_utf8();
            }
            continue;
        }
        let c = rest.chars().next()?;
        if !multiline && (c == '\n' || c == '\r') {
            return None;
        }
        i += c.len_utf8();
    }

    None
}

/// Scan an interpolation that starts right after `\(`.
fn scan_interpolation(src: &str) -> Option<usize> {
    let mut depth = 1usize;
    let mut i = 0;

    while i < src.len() {
        let rest = &src[i..];
        let c = rest.chars().next()?;
        match c {
            '(' => {
                depth += 1;
                i += 1;
            }
            ')' => {
                depth -= 1;
                i += 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            '"' => {
                let multiline = rest.starts_with("\"\"\"");
                let open = if multiline { 3 } else { 1 };
                i += open + scan_string(&rest[open..], 0, multiline)?;
            }
            _ => i += c.len_utf8(),
        }
    }

    None
}
