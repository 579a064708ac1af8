use crate::config::{
    ConfigBuilder, ConfigLoader, LifeallyConfig, LogFormat, LogLevel, StorageEngine, validation,
};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

#[test]
fn test_default_config() {
    let config = LifeallyConfig::default();
    assert_eq!(config.storage.engine, StorageEngine::RocksDb);
    assert_eq!(config.storage.namespace, "lifeally");
    assert_eq!(config.storage.database, "main");
    assert_eq!(config.models.dir, PathBuf::from("models"));
    assert_eq!(config.llm.model, "gemini-2.5-pro");
    assert_eq!(config.llm.temperature, 0.3);
    assert!(config.llm.api_key.is_none());
    assert_eq!(config.logging.level, LogLevel::Info);
}

#[test]
fn test_config_builder() {
    let config = ConfigBuilder::new()
        .with_data_dir("/tmp/test_data")
        .with_memory_storage()
        .with_models_dir("/opt/models")
        .with_llm_api_key("secret")
        .with_llm_model("gemini-test")
        .with_log_level(LogLevel::Debug)
        .build()
        .unwrap();

    assert_eq!(config.storage.data_dir, PathBuf::from("/tmp/test_data"));
    assert_eq!(config.storage.engine, StorageEngine::Memory);
    assert_eq!(config.models.dir, PathBuf::from("/opt/models"));
    assert_eq!(config.llm.api_key.as_deref(), Some("secret"));
    assert_eq!(config.llm.model, "gemini-test");
    assert_eq!(config.logging.level, LogLevel::Debug);
}

#[test]
fn test_validation() {
    assert!(ConfigBuilder::new().build().is_ok());
    assert!(validation::validate_config(&LifeallyConfig::default()).is_ok());

    assert!(ConfigBuilder::new().with_database("", "main").build().is_err());
    assert!(ConfigBuilder::new().with_database("ns", " ").build().is_err());
    assert!(ConfigBuilder::new().with_models_dir("").build().is_err());
    assert!(ConfigBuilder::new().with_llm_model("").build().is_err());
    assert!(ConfigBuilder::new().with_llm_temperature(2.5).build().is_err());
    assert!(ConfigBuilder::new().with_llm_temperature(-0.1).build().is_err());
    assert!(
        ConfigBuilder::new()
            .with_llm_timeout(Duration::ZERO)
            .build()
            .is_err()
    );
}

#[test]
fn test_predefined_configs() {
    let dev = ConfigBuilder::development().build().unwrap();
    let test = ConfigBuilder::testing().build().unwrap();
    let prod = ConfigBuilder::production().build().unwrap();

    assert_eq!(dev.storage.engine, StorageEngine::Memory);
    assert_eq!(dev.logging.level, LogLevel::Debug);

    assert_eq!(test.storage.engine, StorageEngine::Memory);
    assert_eq!(test.storage.data_dir, PathBuf::from("./test_data"));

    assert_eq!(prod.storage.engine, StorageEngine::RocksDb);
    assert_eq!(prod.logging.format, LogFormat::Json);
}

#[test]
fn test_load_toml_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        r#"
[storage]
engine = "memory"
namespace = "custom"

[models]
dir = "/srv/models"

[llm]
model = "gemini-flash"
timeout = "30s"

[logging]
level = "debug"
format = "compact"
"#
    )
    .unwrap();

    let mut loader = ConfigLoader::new();
    loader.load_file(file.path()).unwrap();
    let config = loader.extract().unwrap();

    assert_eq!(config.storage.engine, StorageEngine::Memory);
    assert_eq!(config.storage.namespace, "custom");
    assert_eq!(config.storage.database, "main");
    assert_eq!(config.models.dir, PathBuf::from("/srv/models"));
    assert_eq!(config.llm.model, "gemini-flash");
    assert_eq!(config.llm.timeout, Duration::from_secs(30));
    assert_eq!(config.logging.level, LogLevel::Debug);
    assert_eq!(config.logging.format, LogFormat::Compact);
}

#[test]
fn test_load_json_file_rejected_by_validation() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, r#"{{"llm": {{"temperature": 3.0}}}}"#).unwrap();

    let mut loader = ConfigLoader::new();
    loader.load_file(file.path()).unwrap();
    assert!(loader.extract().is_err());
}

#[test]
fn test_load_missing_and_unsupported_files() {
    let mut loader = ConfigLoader::new();
    assert!(loader.load_file("/definitely/not/here.toml").is_err());

    let file = tempfile::Builder::new().suffix(".ini").tempfile().unwrap();
    assert!(loader.load_file(file.path()).is_err());

    // The loader stays usable after a rejected file
    assert!(loader.extract().is_ok());
}

#[test]
fn test_merge_custom_provider() {
    let overrides = ConfigBuilder::new()
        .with_memory_storage()
        .with_llm_model("merged-model")
        .build()
        .unwrap();

    let mut loader = ConfigLoader::new();
    loader.merge(figment::providers::Serialized::defaults(overrides));
    let config = loader.extract().unwrap();

    assert_eq!(config.storage.engine, StorageEngine::Memory);
    assert_eq!(config.llm.model, "merged-model");
}

#[test]
fn test_config_serialization() {
    let config = ConfigBuilder::new()
        .with_data_dir("/tmp/test_data")
        .with_llm_model("test-model")
        .build()
        .unwrap();

    let json = serde_json::to_string(&config).unwrap();
    let deserialized: LifeallyConfig = serde_json::from_str(&json).unwrap();

    assert_eq!(config.storage.data_dir, deserialized.storage.data_dir);
    assert_eq!(config.llm.model, deserialized.llm.model);
    assert_eq!(config.llm.timeout, deserialized.llm.timeout);
}

#[test]
fn test_llm_config_debug_redacts_key() {
    let config = ConfigBuilder::new()
        .with_llm_api_key("super-secret-key")
        .build()
        .unwrap();

    let rendered = format!("{:?}", config.llm);
    assert!(!rendered.contains("super-secret-key"));
    assert!(rendered.contains("<redacted>"));
}
