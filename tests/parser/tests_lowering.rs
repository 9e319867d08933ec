//! Lowering tests: from source text to the value tree.

use confit::syntax::{ParseError, Value, lower};
use rstest::rstest;

const CONFIG: &str = r#"# training setup
name = "baseline"
epochs = 1_000
lr = 3e-4
verbose = true
started = 2024-01-15T09:30:00Z
path = 'C:\data\raw'
banner = """
Hello, \
    world"""

[model]
factory = "encoder"
sizes = [
  64,
  128, # hidden
]
"quoted key" = { nested.deep = 1 }

[model.head]
activation = "relu"
"#;

#[test]
fn test_lowers_a_realistic_document() {
    let doc = lower(CONFIG).unwrap();
    let root = &doc.root;
    assert_eq!(root["name"], Value::from("baseline"));
    assert_eq!(root["epochs"], Value::Integer(1000));
    assert_eq!(root["lr"], Value::Float(3e-4));
    assert_eq!(root["verbose"], Value::Boolean(true));
    assert_eq!(root["started"], Value::Datetime("2024-01-15T09:30:00Z".into()));
    assert_eq!(root["path"], Value::from(r"C:\data\raw"));
    assert_eq!(root["banner"], Value::from("Hello, world"));

    let model = root["model"].as_table().unwrap();
    assert_eq!(
        model["sizes"],
        Value::Array(vec![Value::Integer(64), Value::Integer(128)])
    );
    assert_eq!(model["quoted key"].to_string(), "{ nested = { deep = 1 } }");
    assert_eq!(model["head"].as_table().unwrap()["activation"], Value::from("relu"));
}

#[test]
fn test_elements_cover_every_key_in_order() {
    let doc = lower(CONFIG).unwrap();
    let paths: Vec<String> = doc.elements.iter().map(|e| e.path.to_string()).collect();
    assert_eq!(
        paths,
        vec![
            "name",
            "epochs",
            "lr",
            "verbose",
            "started",
            "path",
            "banner",
            "model",
            "model.factory",
            "model.sizes",
            "model.sizes[0]",
            "model.sizes[1]",
            "model.\"quoted key\"",
            "model.\"quoted key\".nested",
            "model.\"quoted key\".nested.deep",
            "model.head",
            "model.head.activation",
        ]
    );
}

#[rstest]
#[case("a = 1\na = 2\n", "duplicate key `a`")]
#[case("[t]\n[t]\n", "table `t` is defined more than once")]
#[case("n = 99999999999999999999\n", "integer `99999999999999999999` is out of range")]
#[case("s = \"\\uD800\"\n", "invalid unicode escape `\\uD800`")]
#[case("x = \n", "expected a value")]
fn test_first_error_aborts_lowering(#[case] source: &str, #[case] message: &str) {
    let err: ParseError = lower(source).unwrap_err();
    assert_eq!(err.message, message);
    assert!(usize::from(err.range.end()) <= source.len());
}
