// tests/config_test.rs
use mvn_release::config::{load_config, parse_config, Config, CONFIG_FILE_NAME};
use mvn_release::ReleaseError;
use serial_test::serial;
use std::env;
use std::fs;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/mvnrelease.toml");

#[test]
fn test_default_config_is_empty() {
    let config = Config::default();
    assert!(config.projects.is_empty());
    assert_eq!(config.context_path, "");
    assert!(!config.action.select_custom_scm_comment_prefix);
    assert!(!config.action.select_append_user_name);
}

#[test]
fn test_load_fixture() {
    let config = load_config(Some(FIXTURE)).expect("fixture should load");
    assert_eq!(config.context_path, "/jenkins");
    assert!(config.action.select_custom_scm_comment_prefix);
    assert!(config.action.select_append_user_name);
    assert_eq!(config.projects.len(), 2);

    let core = config.project("core").unwrap();
    assert_eq!(core.release_users, vec!["alice", "bob"]);
    assert_eq!(core.modules.len(), 1);
    assert_eq!(core.root_module.artifact_id, "example-core");

    let legacy = config.project("legacy").unwrap().to_project_info();
    assert_eq!(legacy.url, "view/old/job/legacy/");
    assert_eq!(legacy.name, "legacy");
}

#[test]
fn test_load_from_temp_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
[[projects]]
id = "tool"

[projects.root_module]
name = "Tool"
group_id = "org.example"
artifact_id = "tool"
version = "0.1-SNAPSHOT"
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.projects.len(), 1);
    assert!(config.project("tool").unwrap().release_users.is_empty());
}

#[test]
fn test_missing_explicit_file_is_io_error() {
    let missing = concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/does-not-exist.toml"
    );
    let err = load_config(Some(missing)).unwrap_err();
    assert!(matches!(err, ReleaseError::Io(_)));
}

#[test]
fn test_invalid_toml_is_parse_error() {
    let err = parse_config("projects = 3").unwrap_err();
    assert!(matches!(err, ReleaseError::Toml(_)));
}

#[test]
fn test_empty_artifact_id_rejected() {
    let err = parse_config(
        r#"
[[projects]]
id = "core"

[projects.root_module]
name = "Core"
group_id = "org.example"
artifact_id = " "
version = "1.0-SNAPSHOT"
"#,
    )
    .unwrap_err();
    assert!(matches!(err, ReleaseError::Config(_)));
}

#[test]
#[serial]
fn test_working_directory_config_is_discovered() {
    let dir = TempDir::new().unwrap();
    fs::copy(FIXTURE, dir.path().join(CONFIG_FILE_NAME)).unwrap();

    let original_dir = env::current_dir().unwrap();
    env::set_current_dir(dir.path()).unwrap();
    let loaded = load_config(None);
    env::set_current_dir(original_dir).unwrap();

    let config = loaded.expect("config in working directory should load");
    assert_eq!(config.projects.len(), 2);
}
