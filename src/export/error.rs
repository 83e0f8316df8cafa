// ==========================================
// 商品目录对账导出 - 写出层错误类型
// ==========================================

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("输出目录创建失败: {path}: {message}")]
    OutputDirError { path: PathBuf, message: String },

    #[error("文件写入失败: {path}: {message}")]
    WriteError { path: PathBuf, message: String },

    #[error("JSON 序列化失败: {0}")]
    SerializeError(String),
}

impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        ExportError::SerializeError(err.to_string())
    }
}

pub type ExportResult<T> = Result<T, ExportError>;
