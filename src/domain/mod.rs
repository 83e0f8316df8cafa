// ==========================================
// 商品目录对账导出 - 领域模型层
// ==========================================
// 职责: 定义类目、商品片段、规范商品与目录聚合
// 红线: 不含 I/O，不含合并规则
// ==========================================

pub mod catalog;
pub mod category;
pub mod product;
pub mod types;

// 重导出核心类型
pub use catalog::{Catalog, CatalogSources};
pub use category::Category;
pub use product::{CanonicalProduct, DbProductRecord, PricelistRecord};
pub use types::{normalize_sku, CategoryId, CategoryRule, ProductOrigin};
