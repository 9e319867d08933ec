//! Concrete syntax tree tests.

use confit::parser::{AstNode, Root, RootItem, SyntaxKind, parse, tokenize};
use rstest::rstest;

#[rstest]
#[case("")]
#[case("# only a comment\n")]
#[case("a = 1 # trailing\n[b]\nc = \"x\"\n")]
#[case("[[runs]]\nseed = 1\n\n[[runs]]\nseed = 2\n")]
#[case("opts = { a = [1, 2,], b = 'raw' }\n")]
#[case("broken = \n[unclosed\nx = }\n")]
fn test_tree_is_lossless(#[case] source: &str) {
    let parse = parse(source);
    assert_eq!(parse.syntax().text().to_string(), source);
}

#[test]
fn test_errors_are_recovered() {
    let parse = parse("a = \nb = 2\n");
    assert!(!parse.ok());
    assert_eq!(parse.errors[0].message, "expected a value");

    let root = Root::cast(parse.syntax()).unwrap();
    assert_eq!(root.items().count(), 2);
}

#[test]
fn test_items_in_document_order() {
    let parse = parse("x = 1\n[a]\ny = 2\n[[b]]\n");
    assert!(parse.ok());
    let root = Root::cast(parse.syntax()).unwrap();
    let kinds: Vec<_> = root
        .items()
        .map(|item| match item {
            RootItem::KeyValue(_) => "kv",
            RootItem::Table(t) if t.is_array() => "array-table",
            RootItem::Table(_) => "table",
        })
        .collect();
    assert_eq!(kinds, vec!["kv", "table", "array-table"]);
}

#[rstest]
#[case("0xdead_beef", SyntaxKind::INTEGER)]
#[case("1_000", SyntaxKind::INTEGER)]
#[case("6.02e23", SyntaxKind::FLOAT)]
#[case("-inf", SyntaxKind::FLOAT)]
#[case("true", SyntaxKind::BOOLEAN)]
#[case("1979-05-27T07:32:00Z", SyntaxKind::DATETIME)]
#[case("\"\"\"multi\nline\"\"\"", SyntaxKind::ML_BASIC_STRING)]
#[case("'''raw'''", SyntaxKind::ML_LITERAL_STRING)]
fn test_value_tokens(#[case] text: &str, #[case] kind: SyntaxKind) {
    let source = format!("v = {text}\n");
    let tokens = tokenize(&source);
    let value = tokens
        .iter()
        .find(|t| t.text == text)
        .unwrap_or_else(|| panic!("no single token for `{text}`: {tokens:?}"));
    assert_eq!(value.kind, kind);
}
