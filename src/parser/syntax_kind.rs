//! Syntax kinds for the Rowan-based CST
//!
//! This enum defines all possible node and token kinds in the syntax tree
//! of a TOML configuration document.

/// All syntax kinds (tokens and nodes) in a configuration document
///
/// Tokens are leaf nodes (keys, literals, punctuation).
/// Nodes are composite (tables, key/value pairs, arrays).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA (whitespace and comments - preserved but not semantically meaningful)
    // =========================================================================
    WHITESPACE = 0,
    COMMENT,

    // Newlines terminate key/value pairs, so they are not trivia.
    NEWLINE,

    // =========================================================================
    // KEYS AND LITERALS
    // =========================================================================
    BARE_KEY,          // site-name
    BASIC_STRING,      // "hello"
    ML_BASIC_STRING,   // """hello"""
    LITERAL_STRING,    // 'C:\path'
    ML_LITERAL_STRING, // '''raw'''
    INTEGER,           // 42, 0xff, 1_000
    FLOAT,             // 3.14, 1e6, inf
    BOOLEAN,           // true
    DATETIME,          // 1979-05-27T07:32:00Z

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_BRACKET, // [
    R_BRACKET, // ]
    L_BRACE,   // {
    R_BRACE,   // }
    COMMA,     // ,
    EQ,        // =
    DOT,       // .

    // =========================================================================
    // NODES
    // =========================================================================
    ROOT,
    TABLE,              // [header] + body
    ARRAY_TABLE,        // [[header]] + body
    TABLE_HEADER,       // [a.b]
    ARRAY_TABLE_HEADER, // [[a.b]]
    KEY_VALUE,          // key = value
    KEY,                // a."b".c
    VALUE,              // wraps a scalar token, an ARRAY or an INLINE_TABLE
    ARRAY,              // [1, 2]
    INLINE_TABLE,       // { a = 1 }

    ERROR,

    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace or comment)
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::COMMENT)
    }

    /// Check if this token kind can hold a scalar value
    pub fn is_scalar(self) -> bool {
        matches!(
            self,
            Self::BASIC_STRING
                | Self::ML_BASIC_STRING
                | Self::LITERAL_STRING
                | Self::ML_LITERAL_STRING
                | Self::INTEGER
                | Self::FLOAT
                | Self::BOOLEAN
                | Self::DATETIME
        )
    }

    /// Check if this token kind is a string literal of any flavor
    pub fn is_string(self) -> bool {
        matches!(
            self,
            Self::BASIC_STRING | Self::ML_BASIC_STRING | Self::LITERAL_STRING | Self::ML_LITERAL_STRING
        )
    }

    /// Check if a token of this kind may start a value
    pub fn is_value_start(self) -> bool {
        self.is_scalar() || matches!(self, Self::L_BRACKET | Self::L_BRACE)
    }

    /// Check if this is a punctuation token
    pub fn is_punct(self) -> bool {
        (self as u16) >= (Self::L_BRACKET as u16) && (self as u16) <= (Self::DOT as u16)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: we control all syntax kinds and check bounds above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for Rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TomlLanguage {}

impl rowan::Language for TomlLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<TomlLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<TomlLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<TomlLanguage>;
