// ==========================================
// 商品目录对账导出 - 配置错误类型
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {0}")]
    FileNotFound(String),

    #[error("配置文件读取失败: {0}")]
    ReadError(String),

    #[error("配置文件解析失败: {0}")]
    ParseError(String),

    #[error("配置值非法 (key: {key}): {message}")]
    InvalidValue { key: String, message: String },
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::ReadError(err.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;
