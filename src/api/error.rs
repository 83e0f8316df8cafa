// ==========================================
// 商品目录对账导出 - API层错误类型
// ==========================================
// 职责: 汇总各层错误，供调用方（CLI）统一处理
// ==========================================

use crate::config::ConfigError;
use crate::engine::CatalogViolation;
use crate::export::ExportError;
use crate::importer::ImportError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 各层错误
    // ==========================================
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    #[error("数据源加载失败: {0}")]
    Import(#[from] ImportError),

    #[error("目录写出失败: {0}")]
    Export(#[from] ExportError),

    // ==========================================
    // 目录校验
    // ==========================================
    /// 组装结果违反目录不变量（不写出任何文件）
    #[error("目录校验失败: {} 项违规", .violations.len())]
    ValidationFailed { violations: Vec<CatalogViolation> },
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
