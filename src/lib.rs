// ==========================================
// 商品目录对账导出 - 核心库
// ==========================================
// 输入: SQLite 商品库 + 价目表 + 品牌表 + 本地图片目录
// 输出: categories.json / products.json（店面目录）
// 系统定位: 批处理对账工具，单线程同步执行
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 配置层 - 导出配置与覆写表
pub mod config;

// 数据库基础设施（只读连接/PRAGMA 统一）
pub mod db;

// 导入层 - 外部数据源
pub mod importer;

// 引擎层 - 合并规则
pub mod engine;

// 写出层 - JSON 产物
pub mod export;

// 日志系统
pub mod logging;

// API 层 - 导出编排
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    normalize_sku, CanonicalProduct, Catalog, CatalogSources, Category, CategoryId, CategoryRule,
    DbProductRecord, PricelistRecord, ProductOrigin,
};

// 配置
pub use config::{CatalogConfig, ConfigManager, OverrideTables};

// 引擎
pub use engine::{
    CatalogReconciler, CatalogValidator, CatalogViolation, MergePolicy, ReconcileOutcome,
    ReconcileStats,
};

// API
pub use api::{ApiError, ApiResult, ExportApi, ExportOptions, ExportSummary};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "商品目录对账导出";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
