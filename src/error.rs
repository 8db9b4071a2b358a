//! Jotter 统一错误类型定义
//!
//! 使用 `thiserror` 库提供统一的错误处理，支持错误链式传播。

use std::io;
use thiserror::Error;

/// Jotter 错误类型
#[derive(Debug, Error)]
pub enum JotterError {
    /// I/O 错误（文件读写、响应体读取等）
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// HTTP 传输错误（连接失败、超时、非 2xx 状态码）
    #[error("HTTP error: {0}")]
    Http(String),

    /// 远端 record store 返回了意料之外的内容
    #[error("Store error: {0}")]
    Store(String),

    /// TOML 解析错误
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML 序列化错误
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Jotter Result 类型别名
pub type Result<T> = std::result::Result<T, JotterError>;

impl JotterError {
    /// 创建 Store 错误
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }
}

// ureq::Error 不便于直接嵌入（体积大且携带 Response），统一降为字符串
impl From<ureq::Error> for JotterError {
    fn from(err: ureq::Error) -> Self {
        JotterError::Http(err.to_string())
    }
}
