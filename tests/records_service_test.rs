//! Tests for RecordService

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::json;
use tempfile::TempDir;

use vvkit::application::services::RecordService;
use vvkit::application::ApplicationError;
use vvkit::config::Settings;
use vvkit::domain::TreeBuilder;
use vvkit::infrastructure::di::ServiceContainer;
use vvkit::infrastructure::traits::{FileSystem, RealFileSystem};
use vvkit::util::testing;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

const RECORDS: &str = r#"{
    "1": {"parent_id": 0, "name": "root"},
    "2": {"parent_id": 1, "name": "docs"},
    "3": {"parent_id": 2, "name": "api"},
    "4": {"parent_id": 1, "name": "src"},
    "5": {"parent_id": 42, "name": "lost"}
}"#;

/// In-memory filesystem serving a single file.
struct MockFileSystem {
    path: PathBuf,
    content: String,
}

impl FileSystem for MockFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        if path == self.path {
            Ok(self.content.clone())
        } else {
            Err(io::Error::new(io::ErrorKind::NotFound, "not in mock"))
        }
    }

    fn is_file(&self, path: &Path) -> bool {
        path == self.path
    }
}

fn service() -> RecordService {
    RecordService::new(Arc::new(RealFileSystem), TreeBuilder::new(), "name")
}

#[test]
fn given_mock_file_when_loading_then_preserves_record_order() {
    let fs = Arc::new(MockFileSystem {
        path: PathBuf::from("/data/records.json"),
        content: RECORDS.to_string(),
    });
    let service = RecordService::new(fs, TreeBuilder::new(), "name");

    let records = service.load(Path::new("/data/records.json")).unwrap();

    assert_eq!(
        records.keys().map(String::as_str).collect::<Vec<_>>(),
        ["1", "2", "3", "4", "5"]
    );
}

#[test]
fn given_missing_file_when_loading_then_operation_failed_names_path() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nope.json");

    let err = service().load(&missing).unwrap_err();

    assert!(matches!(err, ApplicationError::OperationFailed { .. }));
    assert!(err.to_string().contains("nope.json"), "{}", err);
}

#[test]
fn given_non_object_json_when_parsing_then_json_error() {
    let err = service().parse("[1, 2, 3]", "inline").unwrap_err();

    assert!(matches!(err, ApplicationError::Json { ref context, .. } if context == "inline"));
}

#[test]
fn given_records_file_when_leveling_then_drops_orphans_and_renders_listing() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("records.json");
    std::fs::write(&path, RECORDS).unwrap();
    let service = service();

    let leveled = service.leveled(service.load(&path).unwrap());

    assert!(!leveled.contains_key("5"));
    assert_eq!(
        service.render_listing(&leveled),
        "1 root\n  2 docs\n    3 api\n  4 src\n"
    );
}

#[test]
fn given_built_tree_when_rendering_diagram_then_draws_every_node() {
    let service = service();
    let tree = service.build(service.parse(RECORDS, "inline").unwrap());

    let diagram = service.render_diagram(&tree);

    for label in ["1 root", "2 docs", "3 api", "4 src"] {
        assert!(diagram.contains(label), "missing {} in\n{}", label, diagram);
    }
    assert!(!diagram.contains("lost"));
    assert!(diagram.lines().next().unwrap().starts_with("1 root"));
}

#[test]
fn given_leveled_records_when_serializing_then_json_carries_levels() {
    let service = service();
    let leveled = service.leveled(service.parse(RECORDS, "inline").unwrap());

    let rendered = service.to_json(&leveled).unwrap();
    let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

    assert_eq!(value["3"]["_level"], json!(2));
    assert!(value["1"].get("_children").is_none());
}

#[test]
fn given_settings_with_custom_fields_when_wiring_container_then_service_uses_them() {
    let mut settings = Settings::default();
    settings.tree.parent_field = "pid".into();
    settings.tree.label_field = "title".into();
    let fs = Arc::new(MockFileSystem {
        path: PathBuf::from("/r.json"),
        content: r#"{"a": {"title": "A"}, "b": {"pid": "a", "title": "B"}}"#.to_string(),
    });

    let container = ServiceContainer::with_deps(settings, fs);
    let records = container.records.load(Path::new("/r.json")).unwrap();
    let leveled = container.records.leveled(records);

    assert_eq!(container.records.render_listing(&leveled), "a A\n  b B\n");
}
