//! 统一错误类型模块
//!
//! # 设计思路
//!
//! 定义应用级 `AppError`，所有 `#[tauri::command]` 与启动流程统一返回
//! `Result<T, AppError>`，前端通过 `Serialize` 获得可读的错误信息。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - 为 `SaveError` 与 `std::io::Error` 提供 `From` 转换，无需手动 map。
//! - 实现 `Serialize` 将错误序列化为字符串，满足 Tauri IPC 要求。

use serde::Serialize;

use crate::saver::SaveError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 选图/保存链路错误
    #[error("{0}")]
    Save(#[from] SaveError),

    /// 文件系统 I/O 错误
    #[error("文件系统错误: {0}")]
    Io(#[from] std::io::Error),

    /// 配置或存储目录不可用
    #[error("存储目录不可用: {0}")]
    Storage(String),

    /// 相册库数据库错误
    #[error("数据库错误: {0}")]
    Database(String),
}

/// Tauri IPC 要求返回值实现 `Serialize`。
impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
