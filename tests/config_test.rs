// ==========================================
// ConfigManager 集成测试
// ==========================================
// 测试目标: 验证配置文件读取、默认值与校验
// ==========================================

use catalog_export::config::{ConfigError, ConfigManager};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_partial_file_keeps_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("catalog.json");
    fs::write(
        &path,
        r#"{ "sources": { "db_path": "shop.db" }, "output": { "dir": "out" } }"#,
    )
    .unwrap();

    let config = ConfigManager::from_file(&path).unwrap().into_config();
    assert_eq!(config.sources.db_path.to_str(), Some("shop.db"));
    assert_eq!(config.sources.pricelist_sheet.as_deref(), Some("Verifica"));
    assert_eq!(config.sources.pricelist_columns.price, 5);
    assert_eq!(config.output.dir.to_str(), Some("out"));
    assert_eq!(config.merge.absent_markers, vec!["Nav atrasts".to_string()]);
    assert_eq!(config.overrides.sku_override("E341"), Some(15));
}

#[test]
fn test_explicit_missing_file_is_error() {
    let dir = TempDir::new().unwrap();
    let result = ConfigManager::load_or_default(Some(&dir.path().join("nope.json")));
    assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
}

#[test]
fn test_malformed_json_is_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, "{ sources: ").unwrap();

    assert!(matches!(
        ConfigManager::from_file(&path),
        Err(ConfigError::ParseError(_))
    ));
}

#[test]
fn test_invalid_override_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("catalog.json");
    fs::write(
        &path,
        r#"{ "overrides": { "chapter_to_category": { "8": 9 } } }"#,
    )
    .unwrap();

    assert!(matches!(
        ConfigManager::from_file(&path),
        Err(ConfigError::InvalidValue { .. })
    ));
}
