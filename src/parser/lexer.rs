//! Logos-based lexer for TOML
//!
//! Fast tokenization using the logos crate. The lexer is context free: a
//! token such as `1234` or `true` is produced as a literal and the parser
//! accepts it as a key when it appears in key position.

use super::syntax_kind::SyntaxKind;
use logos::Logos;
use rowan::TextSize;

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    offset: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            offset: 0,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.offset);
        self.offset += text.len() as u32;

        let kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => SyntaxKind::ERROR,
        };

        Some(Token { kind, text, offset })
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Consume the body of a `"""` string up to and including the closing quotes.
///
/// Up to two quotes directly before the closing delimiter belong to the content.
fn ml_basic_string(lex: &mut logos::Lexer<LogosToken>) -> bool {
    scan_multiline(lex, '"', true)
}

/// Consume the body of a `'''` string up to and including the closing quotes.
fn ml_literal_string(lex: &mut logos::Lexer<LogosToken>) -> bool {
    scan_multiline(lex, '\'', false)
}

fn scan_multiline(lex: &mut logos::Lexer<LogosToken>, quote: char, escapes: bool) -> bool {
    let rest = lex.remainder();
    let bytes = rest.as_bytes();
    let delimiter = [quote as u8; 3];
    let mut i = 0;
    while i < bytes.len() {
        if escapes && bytes[i] == b'\\' {
            i += 2;
            continue;
        }
        if bytes[i..].starts_with(&delimiter) {
            let mut end = i + 3;
            while end < bytes.len() && end < i + 5 && bytes[end] == quote as u8 {
                end += 1;
            }
            lex.bump(end);
            return true;
        }
        i += 1;
    }
    // Unterminated: swallow the rest so the error covers the whole string
    lex.bump(bytes.len());
    false
}

/// Logos token enum - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t]+")]
    Whitespace,

    #[regex(r"#[^\n]*")]
    Comment,

    #[regex(r"\r?\n")]
    Newline,

    // =========================================================================
    // STRINGS
    // =========================================================================
    #[regex(r#""([^"\\\n]|\\[^\n])*""#)]
    BasicString,

    #[token(r#"""""#, ml_basic_string)]
    MlBasicString,

    #[regex(r"'[^'\n]*'")]
    LiteralString,

    #[token("'''", ml_literal_string)]
    MlLiteralString,

    // =========================================================================
    // NUMBERS, BOOLEANS, DATES
    // =========================================================================
    #[regex(r"[+-]?(0|[1-9](_?[0-9])*)", priority = 3)]
    #[regex(r"0x[0-9A-Fa-f](_?[0-9A-Fa-f])*", priority = 3)]
    #[regex(r"0o[0-7](_?[0-7])*", priority = 3)]
    #[regex(r"0b[01](_?[01])*", priority = 3)]
    Integer,

    #[regex(
        r"[+-]?(0|[1-9](_?[0-9])*)\.[0-9](_?[0-9])*([eE][+-]?[0-9](_?[0-9])*)?",
        priority = 3
    )]
    #[regex(r"[+-]?(0|[1-9](_?[0-9])*)[eE][+-]?[0-9](_?[0-9])*", priority = 3)]
    #[regex(r"[+-]?(inf|nan)", priority = 3)]
    Float,

    #[token("true")]
    #[token("false")]
    Boolean,

    #[regex(
        r"[0-9][0-9][0-9][0-9]-[0-9][0-9]-[0-9][0-9]([Tt ][0-9][0-9]:[0-9][0-9]:[0-9][0-9](\.[0-9]+)?([Zz]|[+-][0-9][0-9]:[0-9][0-9])?)?",
        priority = 3
    )]
    #[regex(r"[0-9][0-9]:[0-9][0-9]:[0-9][0-9](\.[0-9]+)?", priority = 3)]
    Datetime,

    // =========================================================================
    // KEYS
    // =========================================================================
    #[regex(r"[A-Za-z0-9_-]+")]
    BareKey,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token(",")]
    Comma,

    #[token("=")]
    Eq,

    #[token(".")]
    Dot,
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        match token {
            LogosToken::Whitespace => SyntaxKind::WHITESPACE,
            LogosToken::Comment => SyntaxKind::COMMENT,
            LogosToken::Newline => SyntaxKind::NEWLINE,
            LogosToken::BasicString => SyntaxKind::BASIC_STRING,
            LogosToken::MlBasicString => SyntaxKind::ML_BASIC_STRING,
            LogosToken::LiteralString => SyntaxKind::LITERAL_STRING,
            LogosToken::MlLiteralString => SyntaxKind::ML_LITERAL_STRING,
            LogosToken::Integer => SyntaxKind::INTEGER,
            LogosToken::Float => SyntaxKind::FLOAT,
            LogosToken::Boolean => SyntaxKind::BOOLEAN,
            LogosToken::Datetime => SyntaxKind::DATETIME,
            LogosToken::BareKey => SyntaxKind::BARE_KEY,
            LogosToken::LBracket => SyntaxKind::L_BRACKET,
            LogosToken::RBracket => SyntaxKind::R_BRACKET,
            LogosToken::LBrace => SyntaxKind::L_BRACE,
            LogosToken::RBrace => SyntaxKind::R_BRACE,
            LogosToken::Comma => SyntaxKind::COMMA,
            LogosToken::Eq => SyntaxKind::EQ,
            LogosToken::Dot => SyntaxKind::DOT,
        }
    }
}
