use pomgraph_core::config::{
    dirs_path, GlobalConfig, RunConfig, TestMode, DEFAULT_MAX_DEPTH, DEFAULT_REPOSITORY_URL,
    DEFAULT_TIMEOUT_SECS,
};
use pomgraph_util::errors::PomgraphError;
use tempfile::TempDir;

fn run_config() -> RunConfig {
    RunConfig {
        package: "com.google.guava:guava".to_string(),
        source: DEFAULT_REPOSITORY_URL.to_string(),
        version: "31.0-jre".to_string(),
        max_depth: 2,
        test_mode: TestMode::Remote,
        timeout_secs: DEFAULT_TIMEOUT_SECS,
        insecure: false,
    }
}

fn config_message(err: PomgraphError) -> String {
    match err {
        PomgraphError::Config { message } => message,
        other => panic!("expected a configuration error, got {other:?}"),
    }
}

#[test]
fn test_global_config_defaults() {
    let config = GlobalConfig::default();
    assert!(config.repository.url.is_none());
    assert_eq!(config.repository.timeout_secs, DEFAULT_TIMEOUT_SECS);
    assert!(!config.repository.insecure);
    assert_eq!(config.tree.max_depth, DEFAULT_MAX_DEPTH);
    assert_eq!(config.repository_url(), DEFAULT_REPOSITORY_URL);
}

#[test]
fn test_global_config_empty_toml_uses_defaults() {
    let config = GlobalConfig::parse_toml("").unwrap();
    assert_eq!(config.repository.timeout_secs, DEFAULT_TIMEOUT_SECS);
    assert_eq!(config.tree.max_depth, DEFAULT_MAX_DEPTH);
}

#[test]
fn test_global_config_parse_from_toml() {
    let toml = r#"
[repository]
url = "https://nexus.example.com/maven"
timeout-secs = 5
insecure = true

[tree]
max-depth = 4
"#;
    let config = GlobalConfig::parse_toml(toml).unwrap();
    assert_eq!(config.repository_url(), "https://nexus.example.com/maven");
    assert_eq!(config.repository.timeout_secs, 5);
    assert!(config.repository.insecure);
    assert_eq!(config.tree.max_depth, 4);
}

#[test]
fn test_global_config_bad_toml_is_parse_error() {
    let err = GlobalConfig::parse_toml("[tree]\nmax-depth = \"deep\"").unwrap_err();
    match err {
        PomgraphError::Parse { message } => {
            assert!(message.contains("Failed to parse global config"), "got: {message}")
        }
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn test_global_config_load_broken_file_reports_path() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("config.toml");
    std::fs::write(&path, "[tree\n").unwrap();
    let err = GlobalConfig::load_from(&path).unwrap_err();
    let text = err.to_string();
    assert!(text.starts_with("Parse error: Failed to parse"), "got: {text}");
    assert!(text.contains("config.toml"), "got: {text}");
}

#[test]
fn test_global_config_load_unreadable_file_is_io_error() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("config.toml");
    std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
    let err = GlobalConfig::load_from(&path).unwrap_err();
    assert!(err.to_string().starts_with("I/O error"), "got: {err}");
}

#[test]
fn test_global_config_load_missing_file_defaults() {
    let tmp = TempDir::new().unwrap();
    let config = GlobalConfig::load_from(&tmp.path().join("config.toml")).unwrap();
    assert_eq!(config.tree.max_depth, DEFAULT_MAX_DEPTH);
}

#[test]
fn test_global_config_load_from_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("config.toml");
    std::fs::write(&path, "[tree]\nmax-depth = 7\n").unwrap();
    let config = GlobalConfig::load_from(&path).unwrap();
    assert_eq!(config.tree.max_depth, 7);
}

#[test]
fn test_dirs_path_contains_pomgraph() {
    assert!(dirs_path().ends_with(".pomgraph"));
}

#[test]
fn test_test_mode_from_str() {
    assert_eq!("local".parse::<TestMode>().unwrap(), TestMode::Local);
    assert_eq!("remote".parse::<TestMode>().unwrap(), TestMode::Remote);
    assert!("ftp".parse::<TestMode>().is_err());
    assert_eq!(TestMode::default(), TestMode::Remote);
}

#[test]
fn test_validate_returns_root_coordinate() {
    let root = run_config().validate().unwrap();
    assert_eq!(root.namespace, "com.google.guava");
    assert_eq!(root.name, "guava");
}

#[test]
fn test_validate_rejects_empty_package() {
    let mut config = run_config();
    config.package = "   ".to_string();
    let msg = config_message(config.validate().unwrap_err());
    assert!(msg.contains("package"), "got: {msg}");
}

#[test]
fn test_validate_rejects_package_without_separator() {
    let mut config = run_config();
    config.package = "guava".to_string();
    let msg = config_message(config.validate().unwrap_err());
    assert!(msg.contains("invalid package coordinate"), "got: {msg}");
}

#[test]
fn test_validate_rejects_empty_source() {
    let mut config = run_config();
    config.source = String::new();
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_depth_bounds() {
    let mut config = run_config();
    config.max_depth = 0;
    assert!(config.validate().is_ok());
    config.max_depth = 10;
    assert!(config.validate().is_ok());
    config.max_depth = 11;
    let msg = config_message(config.validate().unwrap_err());
    assert!(msg.contains("exceeds the limit"), "got: {msg}");
}

#[test]
fn test_validate_rejects_zero_timeout() {
    let mut config = run_config();
    config.timeout_secs = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_local_mode_requires_directory() {
    let mut config = run_config();
    config.test_mode = TestMode::Local;
    config.source = "/definitely/not/here".to_string();
    assert!(config.validate().is_err());

    let tmp = TempDir::new().unwrap();
    config.source = tmp.path().to_string_lossy().into_owned();
    assert!(config.validate().is_ok());
}

#[test]
fn test_entries_order() {
    let names: Vec<&str> = run_config().entries().iter().map(|(k, _)| *k).collect();
    assert_eq!(
        names,
        [
            "package",
            "source",
            "version",
            "max_depth",
            "test_mode",
            "timeout_secs",
            "insecure"
        ]
    );
}
