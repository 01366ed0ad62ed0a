//! Configuration tests

use super::*;
use std::path::PathBuf;
use tempfile::NamedTempFile;

fn config_with_source() -> Config {
    let mut config = Config::default();
    config.sources.push(Source {
        name: "test".to_string(),
        path: PathBuf::from("./crds"),
        filters: vec!["test.com/v1".to_string()],
    });
    config
}

#[test]
fn test_config_serialization() {
    let config = config_with_source();
    let yaml = serde_yaml::to_string(&config).unwrap();
    let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(config.version, parsed.version);
    assert_eq!(parsed.sources.len(), 1);
    assert_eq!(parsed.sources[0].name, "test");
}

#[test]
fn test_config_from_file() {
    let config = config_with_source();

    let temp_file = NamedTempFile::new().unwrap();
    config.save_to_file(temp_file.path()).unwrap();

    let loaded = Config::from_file(temp_file.path()).unwrap();
    assert_eq!(config.version, loaded.version);
    assert_eq!(loaded.sources[0].path, PathBuf::from("./crds"));
}

#[test]
fn test_config_validation() {
    assert!(config_with_source().validate().is_ok());
}

#[test]
fn test_config_without_sources_is_rejected() {
    assert!(Config::default().validate().is_err());
}

#[test]
fn test_unsupported_version_is_rejected() {
    let mut config = config_with_source();
    config.version = "2.0".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_compiler_section_defaults() {
    let yaml = r#"
version: "1.0"
sources:
  - name: test
    path: ./crds
"#;
    let config: Config = serde_yaml::from_str(yaml).unwrap();
    assert!(config.compiler.enum_uppercase);
    assert!(!config.compiler.preserve_unknown_fields);
}

#[test]
fn test_invalid_existing_type_override_is_rejected() {
    let mut config = config_with_source();
    config
        .compiler
        .existing_java_types
        .insert("v1.T".to_string(), "not a type".to_string());
    assert!(config.validate().is_err());
}
