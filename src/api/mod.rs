// ==========================================
// 商品目录对账导出 - API层
// ==========================================
// 职责: 编排数据源加载、合并、校验与写出
// ==========================================

pub mod error;
pub mod export_api;

pub use error::{ApiError, ApiResult};
pub use export_api::{ExportApi, ExportOptions, ExportSummary};
