//! End-to-end: settings and a schema manifest driving a workspace run.

use std::fs;
use std::path::Path;

use confit::hir::codes;
use confit::project::{Settings, WorkspaceLoader, load_manifest};
use tempfile::TempDir;

const MANIFEST: &str = r#"
[factories.add]
doc = "Add two numbers together."
returns = "number"
location = { file = "factories.py", line = 12 }
params = { a = "number", b = { type = "number", default = 1.0 } }

[factories.wrap]
returns = "string"
params.input = "string"
"#;

const SETTINGS: &str = r#"
[tool.confit]
markers = ["factory", "validator"]
source = "confit-test"
extensions = ["toml", "conf"]
"#;

fn write(dir: &Path, name: &str, text: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, text).unwrap();
}

fn workspace() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "clean.toml", "[sum]\nfactory = \"add\"\na = 1\n");
    write(
        dir.path(),
        "nested/mismatch.conf",
        "[sum]\nvalidator = \"add\"\na = 1\n\n[w]\nfactory = \"wrap\"\ninput = \"${sum}\"\n",
    );
    write(dir.path(), "nested/broken.toml", "[sum\n");
    write(dir.path(), "ignored.yaml", "sum: 1\n");
    dir
}

#[test]
fn test_validate_workspace_with_settings_and_manifest() {
    let dir = workspace();
    let manifest_path = dir.path().join("schemas").join("factories.manifest");
    write(dir.path(), "schemas/factories.manifest", MANIFEST);

    let settings = Settings::from_toml(SETTINGS).unwrap();
    let registry = load_manifest(&manifest_path).unwrap();
    let host = settings.analysis_host(settings.catalog(registry));

    let loader = WorkspaceLoader::with_extensions(&settings.extensions);
    let reports = loader.validate_directory(dir.path(), &host).unwrap();

    let names: Vec<_> = reports
        .iter()
        .map(|r| r.path.strip_prefix(dir.path()).unwrap().to_string_lossy().replace('\\', "/"))
        .collect();
    assert_eq!(names, vec!["clean.toml", "nested/broken.toml", "nested/mismatch.conf"]);

    assert!(reports[0].is_clean());
    assert!(reports[1].result.is_err());

    let diagnostics = reports[2].result.as_ref().unwrap();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code.as_deref(), Some(codes::RETURN_TYPE_MISMATCH));
    assert_eq!(diagnostics[0].source.as_ref(), "confit-test");
}

#[test]
fn test_default_settings_skip_other_extensions() {
    let dir = workspace();
    let settings = Settings::default();
    let registry = confit::project::parse_manifest(MANIFEST).unwrap();
    let host = settings.analysis_host(settings.catalog(registry));

    let reports = WorkspaceLoader::new().validate_directory(dir.path(), &host).unwrap();
    assert_eq!(reports.len(), 2);
    assert!(reports.iter().all(|r| r.path.extension().unwrap() == "toml"));
}
