//! # 本地文件读写
//!
//! ## 实现思路
//!
//! - 读：整文件读入后编码为 base64 文本
//! - 写：base64 解码后整文件写入
//! - 建条目：`create_new` 打开，同名文件已存在即失败，不覆盖用户数据

use std::io::ErrorKind;

use base64::{Engine as _, engine::general_purpose};

use super::uri;
use crate::saver::{FileIo, SaveError};

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileIo;

impl FileIo for LocalFileIo {
    async fn read_all_base64(&self, uri: &str) -> Result<String, SaveError> {
        let path = uri::to_path(uri)?;
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| SaveError::transfer("读取源文件", e))?;
        Ok(general_purpose::STANDARD.encode(bytes))
    }

    async fn write_all_base64(&self, uri: &str, data: &str) -> Result<(), SaveError> {
        let path = uri::to_path(uri)?;
        let bytes = general_purpose::STANDARD
            .decode(data)
            .map_err(|e| SaveError::transfer("解码 base64", e))?;
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| SaveError::transfer("写入目标文件", e))
    }
}

/// 在目录中新建空文件，返回其 URI。
pub async fn create_entry(directory_uri: &str, name: &str, mime_type: &str) -> Result<String, SaveError> {
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(SaveError::TransferFailed(format!("非法文件名：{name}")));
    }

    let path = uri::to_path(directory_uri)?.join(name);
    tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .await
        .map_err(|e| match e.kind() {
            ErrorKind::AlreadyExists => {
                SaveError::TransferFailed(format!("文件已存在：{}", path.display()))
            }
            _ => SaveError::transfer("创建文件", e),
        })?;

    log::debug!("已创建条目 {}（{}）", path.display(), mime_type);
    uri::from_path(&path)
}
