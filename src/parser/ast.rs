//! Typed AST wrappers over the untyped rowan CST.
//!
//! This module provides strongly-typed accessors for TOML syntax nodes.
//! Each struct wraps a SyntaxNode and provides methods to access children.

use rowan::{NodeOrToken, TextRange};

use super::syntax_kind::SyntaxKind;
use super::{SyntaxNode, SyntaxToken};

/// Trait for AST nodes that wrap a SyntaxNode
pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;
    fn cast(node: SyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &SyntaxNode;
}

/// Trait for AST tokens that wrap a SyntaxToken
pub trait AstToken: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;
    fn cast(token: SyntaxToken) -> Option<Self>;
    fn syntax(&self) -> &SyntaxToken;
    fn text(&self) -> &str {
        self.syntax().text()
    }
}

// ============================================================================
// Helper macros
// ============================================================================

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                kind == SyntaxKind::$kind
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                if Self::can_cast(node.kind()) {
                    Some(Self(node))
                } else {
                    None
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

/// Macro to generate a method that finds the first child of a specific AST type.
macro_rules! first_child_method {
    ($name:ident, $type:ident) => {
        #[doc = concat!("Get the first `", stringify!($type), "` child of this node.")]
        pub fn $name(&self) -> Option<$type> {
            self.0.children().find_map($type::cast)
        }
    };
}

/// Macro to generate a method that returns an iterator over children of a specific AST type.
macro_rules! children_method {
    ($name:ident, $type:ident) => {
        #[doc = concat!("Get all `", stringify!($type), "` children of this node.")]
        pub fn $name(&self) -> impl Iterator<Item = $type> + '_ {
            self.0.children().filter_map($type::cast)
        }
    };
}

/// Range from the first to the last significant token of a node.
///
/// Leading and trailing whitespace, comments and newlines are excluded, so a
/// table section ends at its last key/value pair rather than at the next header.
pub fn significant_range(node: &SyntaxNode) -> TextRange {
    let mut tokens = node
        .descendants_with_tokens()
        .filter_map(|e| e.into_token())
        .filter(|t| !t.kind().is_trivia() && t.kind() != SyntaxKind::NEWLINE);
    match tokens.next() {
        Some(first) => {
            let end = tokens
                .last()
                .map(|t| t.text_range().end())
                .unwrap_or_else(|| first.text_range().end());
            TextRange::new(first.text_range().start(), end)
        }
        None => TextRange::empty(node.text_range().start()),
    }
}

// ============================================================================
// Root
// ============================================================================

ast_node!(Root, ROOT);

/// A top-level item: a key/value pair before the first header, or a section
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RootItem {
    KeyValue(KeyValue),
    Table(Table),
}

impl Root {
    /// Items in document order.
    pub fn items(&self) -> impl Iterator<Item = RootItem> + '_ {
        self.0.children().filter_map(|node| match node.kind() {
            SyntaxKind::KEY_VALUE => KeyValue::cast(node).map(RootItem::KeyValue),
            SyntaxKind::TABLE | SyntaxKind::ARRAY_TABLE => Table::cast(node).map(RootItem::Table),
            _ => None,
        })
    }
}

// ============================================================================
// Tables
// ============================================================================

/// A `[header]` or `[[header]]` section with its key/value lines
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Table(SyntaxNode);

impl AstNode for Table {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(kind, SyntaxKind::TABLE | SyntaxKind::ARRAY_TABLE)
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        if Self::can_cast(node.kind()) {
            Some(Self(node))
        } else {
            None
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        &self.0
    }
}

impl Table {
    /// Whether this is an array-of-tables section (`[[header]]`).
    pub fn is_array(&self) -> bool {
        self.0.kind() == SyntaxKind::ARRAY_TABLE
    }

    /// The header node (`[a.b]`).
    pub fn header(&self) -> Option<SyntaxNode> {
        self.0.children().find(|n| {
            matches!(
                n.kind(),
                SyntaxKind::TABLE_HEADER | SyntaxKind::ARRAY_TABLE_HEADER
            )
        })
    }

    /// The dotted key inside the header.
    pub fn header_key(&self) -> Option<Key> {
        self.header()?.children().find_map(Key::cast)
    }

    /// From the opening bracket to the end of the last key/value pair.
    pub fn section_range(&self) -> TextRange {
        significant_range(&self.0)
    }

    children_method!(key_values, KeyValue);
}

// ============================================================================
// Key/value pairs
// ============================================================================

ast_node!(KeyValue, KEY_VALUE);

impl KeyValue {
    first_child_method!(key, Key);
    first_child_method!(value, Value);
}

ast_node!(Key, KEY);

impl Key {
    /// The segments of a dotted key, in order.
    pub fn segments(&self) -> Vec<KeySegment> {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .filter_map(KeySegment::cast)
            .collect()
    }
}

/// One segment of a dotted key: a bare key or a quoted string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeySegment(SyntaxToken);

impl AstToken for KeySegment {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SyntaxKind::BARE_KEY | SyntaxKind::BASIC_STRING | SyntaxKind::LITERAL_STRING
        )
    }

    fn cast(token: SyntaxToken) -> Option<Self> {
        if Self::can_cast(token.kind()) {
            Some(Self(token))
        } else {
            None
        }
    }

    fn syntax(&self) -> &SyntaxToken {
        &self.0
    }
}

impl KeySegment {
    pub fn kind(&self) -> SyntaxKind {
        self.0.kind()
    }

    pub fn text_range(&self) -> TextRange {
        self.0.text_range()
    }
}

// ============================================================================
// Values
// ============================================================================

ast_node!(Value, VALUE);

/// What a `VALUE` node holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Scalar(SyntaxToken),
    Array(Array),
    InlineTable(InlineTable),
}

impl Value {
    pub fn kind(&self) -> Option<ValueKind> {
        self.0.children_with_tokens().find_map(|e| match e {
            NodeOrToken::Token(t) if t.kind().is_scalar() => Some(ValueKind::Scalar(t)),
            NodeOrToken::Node(n) => match n.kind() {
                SyntaxKind::ARRAY => Array::cast(n).map(ValueKind::Array),
                SyntaxKind::INLINE_TABLE => InlineTable::cast(n).map(ValueKind::InlineTable),
                _ => None,
            },
            _ => None,
        })
    }

    pub fn text_range(&self) -> TextRange {
        significant_range(&self.0)
    }
}

ast_node!(Array, ARRAY);

impl Array {
    children_method!(values, Value);
}

ast_node!(InlineTable, INLINE_TABLE);

impl InlineTable {
    children_method!(key_values, KeyValue);
}
