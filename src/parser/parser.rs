//! Recursive descent parser for TOML
//!
//! Builds a rowan GreenNode tree from tokens.
//! Supports error recovery and produces a lossless CST.

use super::lexer::{Lexer, Token};
use super::syntax_kind::SyntaxKind;
use rowan::{GreenNode, GreenNodeBuilder, TextRange, TextSize};

/// Parse result containing the green tree and any errors
#[derive(Debug, Clone)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Get the root syntax node
    pub fn syntax(&self) -> super::SyntaxNode {
        super::SyntaxNode::new_root(self.green.clone())
    }

    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A syntax error with location and message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

/// Parse a TOML document into a CST
pub fn parse(input: &str) -> Parse {
    let tokens: Vec<_> = Lexer::new(input).collect();
    let mut parser = Parser::new(&tokens);
    parser.parse_root();
    parser.finish()
}

/// The parser state
struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>]) -> Self {
        Self {
            tokens,
            pos: 0,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
        }
    }

    fn finish(self) -> Parse {
        Parse {
            green: self.builder.finish(),
            errors: self.errors,
        }
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    fn current(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn current_kind(&self) -> SyntaxKind {
        self.current().map(|t| t.kind).unwrap_or(SyntaxKind::ERROR)
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        !self.at_eof() && self.current_kind() == kind
    }

    fn at_any(&self, kinds: &[SyntaxKind]) -> bool {
        !self.at_eof() && kinds.contains(&self.current_kind())
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Raw lookahead, trivia included
    fn nth_raw(&self, n: usize) -> SyntaxKind {
        self.tokens
            .get(self.pos + n)
            .map(|t| t.kind)
            .unwrap_or(SyntaxKind::ERROR)
    }

    /// Lookahead skipping inline whitespace only
    fn peek_past_whitespace(&self) -> SyntaxKind {
        self.tokens[self.pos..]
            .iter()
            .find(|t| t.kind != SyntaxKind::WHITESPACE)
            .map(|t| t.kind)
            .unwrap_or(SyntaxKind::ERROR)
    }

    /// A token usable as a key segment: strings, bare keys, and literals whose
    /// text happens to be a valid bare key (`1234`, `true`, `inf`, `1979-05-27`).
    fn at_key_segment(&self) -> bool {
        match self.current() {
            Some(token) => match token.kind {
                SyntaxKind::BARE_KEY | SyntaxKind::BASIC_STRING | SyntaxKind::LITERAL_STRING => {
                    true
                }
                SyntaxKind::INTEGER
                | SyntaxKind::FLOAT
                | SyntaxKind::BOOLEAN
                | SyntaxKind::DATETIME => is_bare_key(token.text),
                _ => false,
            },
            None => false,
        }
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    fn bump(&mut self) {
        if let Some(token) = self.current() {
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    /// Bump the current token under a different kind
    fn bump_as(&mut self, kind: SyntaxKind) {
        if let Some(token) = self.current() {
            self.builder.token(kind.into(), token.text);
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: SyntaxKind, message: &str) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error(message);
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while self.at(SyntaxKind::WHITESPACE) {
            self.bump();
        }
    }

    /// Whitespace, comments and newlines (allowed between array items)
    fn skip_multiline_trivia(&mut self) {
        while self.at_any(&[
            SyntaxKind::WHITESPACE,
            SyntaxKind::COMMENT,
            SyntaxKind::NEWLINE,
        ]) {
            self.bump();
        }
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    fn error(&mut self, message: impl Into<String>) {
        let range = match self.current() {
            Some(t) => TextRange::at(t.offset, TextSize::of(t.text)),
            None => {
                let end = self
                    .tokens
                    .last()
                    .map(|t| t.offset + TextSize::of(t.text))
                    .unwrap_or_else(|| TextSize::new(0));
                TextRange::empty(end)
            }
        };
        self.errors.push(SyntaxError::new(message, range));
    }

    fn error_recover(&mut self, message: impl Into<String>, recovery: &[SyntaxKind]) {
        self.error(message);
        self.builder.start_node(SyntaxKind::ERROR.into());
        // Always consume at least one token to make progress
        let mut consumed = false;
        while !self.at_eof() && !self.at_any(recovery) {
            self.bump();
            consumed = true;
        }
        if !consumed && !self.at_eof() {
            self.bump();
        }
        self.builder.finish_node();
    }

    // =========================================================================
    // Node building helpers
    // =========================================================================

    fn start_node(&mut self, kind: SyntaxKind) {
        self.builder.start_node(kind.into());
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    // =========================================================================
    // Grammar
    // =========================================================================

    fn parse_root(&mut self) {
        self.start_node(SyntaxKind::ROOT);
        while !self.at_eof() {
            match self.current_kind() {
                SyntaxKind::WHITESPACE | SyntaxKind::COMMENT | SyntaxKind::NEWLINE => self.bump(),
                SyntaxKind::L_BRACKET => self.parse_table(),
                _ if self.at_key_segment() => self.parse_key_value_line(),
                _ => self.error_recover("expected a key or a table header", &[SyntaxKind::NEWLINE]),
            }
        }
        self.finish_node();
    }

    /// `[a.b]` or `[[a.b]]` followed by its key/value lines
    fn parse_table(&mut self) {
        let is_array = self.nth_raw(1) == SyntaxKind::L_BRACKET;
        let (table, header) = if is_array {
            (SyntaxKind::ARRAY_TABLE, SyntaxKind::ARRAY_TABLE_HEADER)
        } else {
            (SyntaxKind::TABLE, SyntaxKind::TABLE_HEADER)
        };

        self.start_node(table);
        self.start_node(header);
        self.bump();
        if is_array {
            self.bump();
        }
        self.skip_whitespace();
        self.parse_key();
        self.skip_whitespace();
        if is_array {
            if self.at(SyntaxKind::R_BRACKET) && self.nth_raw(1) == SyntaxKind::R_BRACKET {
                self.bump();
                self.bump();
            } else {
                self.error("expected `]]` to close the array table header");
            }
        } else {
            self.expect(
                SyntaxKind::R_BRACKET,
                "expected `]` to close the table header",
            );
        }
        self.finish_node();
        self.parse_line_end();

        while !self.at_eof() && !self.at(SyntaxKind::L_BRACKET) {
            match self.current_kind() {
                SyntaxKind::WHITESPACE | SyntaxKind::COMMENT | SyntaxKind::NEWLINE => self.bump(),
                _ if self.at_key_segment() => self.parse_key_value_line(),
                _ => self.error_recover("expected a key or a table header", &[SyntaxKind::NEWLINE]),
            }
        }
        self.finish_node();
    }

    fn parse_key_value_line(&mut self) {
        self.parse_key_value();
        self.parse_line_end();
    }

    /// Trailing whitespace and comment, then a newline or the end of input
    fn parse_line_end(&mut self) {
        while self.at_any(&[SyntaxKind::WHITESPACE, SyntaxKind::COMMENT]) {
            self.bump();
        }
        if self.at_eof() || self.eat(SyntaxKind::NEWLINE) {
            return;
        }
        self.error_recover("expected a newline", &[SyntaxKind::NEWLINE]);
    }

    fn parse_key_value(&mut self) {
        self.start_node(SyntaxKind::KEY_VALUE);
        self.parse_key();
        self.skip_whitespace();
        if self.expect(SyntaxKind::EQ, "expected `=` after the key") {
            self.skip_whitespace();
            self.parse_value();
        }
        self.finish_node();
    }

    /// Dotted key: `a . "b" . c`
    fn parse_key(&mut self) {
        self.start_node(SyntaxKind::KEY);
        if self.at_key_segment() {
            self.bump_key_segment();
            while self.peek_past_whitespace() == SyntaxKind::DOT {
                self.skip_whitespace();
                self.bump();
                self.skip_whitespace();
                if !self.at_key_segment() {
                    self.error("expected a key after `.`");
                    break;
                }
                self.bump_key_segment();
            }
        } else {
            self.error("expected a key");
        }
        self.finish_node();
    }

    fn bump_key_segment(&mut self) {
        match self.current_kind() {
            SyntaxKind::BASIC_STRING | SyntaxKind::LITERAL_STRING => self.bump(),
            _ => self.bump_as(SyntaxKind::BARE_KEY),
        }
    }

    fn parse_value(&mut self) {
        self.start_node(SyntaxKind::VALUE);
        match self.current_kind() {
            _ if self.at_eof() => self.error("expected a value"),
            kind if kind.is_scalar() => self.bump(),
            SyntaxKind::L_BRACKET => self.parse_array(),
            SyntaxKind::L_BRACE => self.parse_inline_table(),
            _ => self.error("expected a value"),
        }
        self.finish_node();
    }

    fn parse_array(&mut self) {
        self.start_node(SyntaxKind::ARRAY);
        self.bump();
        loop {
            self.skip_multiline_trivia();
            if self.at_eof() || self.at(SyntaxKind::R_BRACKET) {
                break;
            }
            if !self.current_kind().is_value_start() {
                self.error("expected a value or `]`");
                break;
            }
            self.parse_value();
            self.skip_multiline_trivia();
            if !self.eat(SyntaxKind::COMMA) {
                break;
            }
        }
        self.skip_multiline_trivia();
        self.expect(SyntaxKind::R_BRACKET, "expected `]` to close the array");
        self.finish_node();
    }

    fn parse_inline_table(&mut self) {
        self.start_node(SyntaxKind::INLINE_TABLE);
        self.bump();
        self.skip_whitespace();
        if !self.at(SyntaxKind::R_BRACE) {
            loop {
                self.skip_whitespace();
                if !self.at_key_segment() {
                    self.error("expected a key in the inline table");
                    break;
                }
                self.parse_key_value();
                self.skip_whitespace();
                if !self.eat(SyntaxKind::COMMA) {
                    break;
                }
            }
        }
        self.skip_whitespace();
        self.expect(
            SyntaxKind::R_BRACE,
            "expected `}` to close the inline table",
        );
        self.finish_node();
    }
}

/// Characters allowed in an unquoted key
pub(crate) fn is_bare_key(text: &str) -> bool {
    !text.is_empty()
        && text
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}
