// ==========================================
// 商品目录对账导出 - 配置层
// ==========================================
// 职责: 数据源路径、列布局、合并占位值、类目覆写表
// 存储: JSON 配置文件
// ==========================================

pub mod catalog_config;
pub mod config_manager;
pub mod error;
pub mod override_tables;

// 重导出核心配置
pub use catalog_config::{
    BrandColumns, CatalogConfig, ImagesConfig, MergeConfig, OutputConfig, PricelistColumns,
    SourcesConfig,
};
pub use config_manager::ConfigManager;
pub use error::{ConfigError, ConfigResult};
pub use override_tables::OverrideTables;
