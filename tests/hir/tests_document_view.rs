//! Document view tests: path lookups and reverse lookups by position.

use confit::base::{Position, TextSize};
use confit::hir::{DocumentView, ViewError};
use confit::syntax::{ElementPath, Value};

const SOURCE: &str = r#"title = "demo"

[model]
factory = "encoder"
layers = [64, 128]
options = { dropout = 0.1, name = "enc" }

[[runs]]
seed = 1

[[runs]]
seed = 2
"#;

fn view() -> DocumentView {
    DocumentView::from_source(SOURCE).unwrap()
}

fn path(text: &str) -> ElementPath {
    ElementPath::parse(text).unwrap()
}

fn offset(needle: &str) -> TextSize {
    TextSize::from(SOURCE.find(needle).unwrap() as u32)
}

#[test]
fn test_every_element_path_resolves_to_a_value() {
    let view = view();
    for element in view.elements() {
        assert!(
            view.value_at(&element.path).is_ok(),
            "no value at `{}`",
            element.path
        );
        assert_eq!(ElementPath::parse(&element.path.to_string()).as_ref(), Some(&element.path));
    }
}

#[test]
fn test_value_lookups() {
    let view = view();
    assert_eq!(view.value_at(&path("model.layers[1]")).unwrap(), &Value::Integer(128));
    assert_eq!(view.value_at(&path("runs[1].seed")).unwrap(), &Value::Integer(2));
    assert_eq!(
        view.value_at(&path("model.options.name")).unwrap().as_str(),
        Some("enc")
    );
    assert!(view.value_at(&ElementPath::root()).unwrap().is_table());
    assert!(matches!(
        view.value_at(&path("model.missing")),
        Err(ViewError::KeyNotFound(_))
    ));
    assert!(matches!(view.object_at(&path("title")), Err(ViewError::NotATable(_))));
}

#[test]
fn test_reverse_lookup_prefers_the_innermost_element() {
    let view = view();

    let hit = view.element_at(offset("dropout") + TextSize::from(2)).unwrap();
    assert_eq!(hit.path().to_string(), "model.options.dropout");
    assert!(hit.is_key());

    let hit = view.element_at(offset("128")).unwrap();
    assert_eq!(hit.path().to_string(), "model.layers[1]");
    assert!(hit.is_value());

    let hit = view.element_at(offset("\"encoder\"")).unwrap();
    assert_eq!(hit.path().to_string(), "model.factory");
    assert!(hit.is_value());
}

#[test]
fn test_reverse_lookup_by_position() {
    let view = view();
    let hit = view.element_at_position(Position::new(3, 2)).unwrap();
    assert_eq!(hit.path().to_string(), "model.factory");
    assert_eq!(&SOURCE[hit.range()], "factory");
}

#[test]
fn test_element_ranges_point_into_source() {
    let view = view();
    let element = view.element(&path("model.layers")).unwrap();
    assert_eq!(&SOURCE[element.key_range], "layers");
    assert_eq!(&SOURCE[element.value_range], "[64, 128]");
    assert_eq!(view.span(element.key_range).start, Position::new(4, 0));
}
