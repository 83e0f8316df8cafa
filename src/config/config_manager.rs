// ==========================================
// 商品目录对账导出 - 配置管理器
// ==========================================
// 职责: 配置加载、校验
// 存储: JSON 文件（缺省段使用内置默认值）
// ==========================================

use crate::config::catalog_config::CatalogConfig;
use crate::config::error::{ConfigError, ConfigResult};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: CatalogConfig,
}

impl ConfigManager {
    /// 从 JSON 文件加载并校验
    ///
    /// # 参数
    /// - path: 配置文件路径（必须存在）
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let raw = fs::read_to_string(path)?;
        let config: CatalogConfig = serde_json::from_str(&raw)?;
        info!(path = %path.display(), "配置文件加载完成");

        Self::from_config(config)
    }

    /// 从已有配置创建（同样执行校验）
    pub fn from_config(config: CatalogConfig) -> ConfigResult<Self> {
        Self::validate(&config)?;
        Ok(Self { config })
    }

    /// 指定路径时读文件，否则使用内置默认配置
    pub fn load_or_default(path: Option<&Path>) -> ConfigResult<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => {
                debug!("未指定配置文件，使用内置默认配置");
                Self::from_config(CatalogConfig::default())
            }
        }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    pub fn into_config(self) -> CatalogConfig {
        self.config
    }

    /// 校验配置
    ///
    /// # 规则
    /// - 数据源路径非空
    /// - 章节键必须为两位数字
    /// - 覆写/章节目标类目 ID > 0
    /// - 图片扩展名列表非空
    pub fn validate(config: &CatalogConfig) -> ConfigResult<()> {
        let sources = &config.sources;
        for (key, path) in [
            ("sources.db_path", &sources.db_path),
            ("sources.pricelist_path", &sources.pricelist_path),
            ("sources.brands_path", &sources.brands_path),
        ] {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: "路径为空".to_string(),
                });
            }
        }

        for (chapter, category_id) in &config.overrides.chapter_to_category {
            if chapter.len() != 2 || !chapter.chars().all(|c| c.is_ascii_digit()) {
                return Err(ConfigError::InvalidValue {
                    key: format!("overrides.chapter_to_category.{}", chapter),
                    message: "章节号必须为两位数字".to_string(),
                });
            }
            if *category_id <= 0 {
                return Err(ConfigError::InvalidValue {
                    key: format!("overrides.chapter_to_category.{}", chapter),
                    message: format!("类目 ID 必须为正数: {}", category_id),
                });
            }
        }

        for (sku, category_id) in &config.overrides.sku_category_overrides {
            if sku.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: "overrides.sku_category_overrides".to_string(),
                    message: "覆写 SKU 为空".to_string(),
                });
            }
            if *category_id <= 0 {
                return Err(ConfigError::InvalidValue {
                    key: format!("overrides.sku_category_overrides.{}", sku),
                    message: format!("类目 ID 必须为正数: {}", category_id),
                });
            }
        }

        if config.images.extensions.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "images.extensions".to_string(),
                message: "图片扩展名列表为空".to_string(),
            });
        }

        Ok(())
    }
}
