//! Reference resolution tests.

use confit::hir::{BarePath, DocumentView, Interpolation, ReferenceResolver, ReferenceSyntax};
use confit::syntax::ElementPath;
use rstest::rstest;

const SOURCE: &str = r#"[data]
path = "/tmp/data"
shards = ["a", "b"]

[loader]
source = "${data.path}"
first = "${ data.shards[0] }"
lost = "${data.missing}"
plain = "just text"
count = 3
"#;

fn view() -> DocumentView {
    DocumentView::from_source(SOURCE).unwrap()
}

fn path(text: &str) -> ElementPath {
    ElementPath::parse(text).unwrap()
}

#[rstest]
#[case("loader.source", Some("data.path"))]
#[case("loader.first", Some("data.shards[0]"))]
#[case("loader.plain", None)]
#[case("loader.count", None)]
fn test_interpolation_references(#[case] at: &str, #[case] expected: Option<&str>) {
    let view = view();
    let resolver = ReferenceResolver::new(&view, &Interpolation);
    let target = resolver.reference_at(&path(at)).map(|p| p.to_string());
    assert_eq!(target.as_deref(), expected);
}

#[test]
fn test_unresolved_reference() {
    let view = view();
    let resolver = ReferenceResolver::new(&view, &Interpolation);
    let err = resolver.resolve_at(&path("loader.lost")).unwrap().unwrap_err();
    assert_eq!(err.target, path("data.missing"));
    assert_eq!(resolver.resolve_at(&path("loader.source")), Some(Ok(path("data.path"))));
}

#[test]
fn test_resolution_is_a_single_hop() {
    let source = "a = \"${b}\"\nb = \"${c}\"\nc = 1\n";
    let view = DocumentView::from_source(source).unwrap();
    let resolver = ReferenceResolver::new(&view, &Interpolation);
    assert_eq!(resolver.resolve_at(&path("a")), Some(Ok(path("b"))));
}

#[test]
fn test_bare_paths_resolve_to_every_element() {
    let view = view();
    let resolver = ReferenceResolver::new(&view, &BarePath);
    for element in view.elements() {
        let text = element.path.to_string();
        let target = BarePath.parse_reference(&text).unwrap();
        assert_eq!(resolver.resolve(&target), Ok(element.path.clone()));
    }
}

#[test]
fn test_custom_syntax_from_closure() {
    let source = "[a]\nx = 1\n[b]\ny = \"@a.x\"\n";
    let view = DocumentView::from_source(source).unwrap();
    let at_sign = |text: &str| text.strip_prefix('@').and_then(ElementPath::parse);
    let resolver = ReferenceResolver::new(&view, &at_sign);
    assert_eq!(resolver.resolve_at(&path("b.y")), Some(Ok(path("a.x"))));
}
