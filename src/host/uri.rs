//! `file://` URI 与本地路径互转。
//!
//! 宿主能力之间以 URI 字符串传递位置；本地实现只接受 `file://` 与裸路径。
//! 编码与解码都交给 `Url`，路径中的空格、`%` 等字符原样往返。

use std::path::{Path, PathBuf};

use tauri::Url;

use crate::saver::SaveError;

/// 将 URI 解析为本地路径；不含 scheme 的字符串按裸路径处理。
pub fn to_path(uri: &str) -> Result<PathBuf, SaveError> {
    if !uri.contains("://") {
        return Ok(PathBuf::from(uri));
    }

    let url = Url::parse(uri).map_err(|e| SaveError::TransferFailed(format!("URI 格式错误：{e}")))?;
    if url.scheme() != "file" {
        return Err(SaveError::TransferFailed(format!("不支持的 URI：{uri}")));
    }

    url.to_file_path()
        .map_err(|_| SaveError::TransferFailed(format!("无法转换为本地路径：{uri}")))
}

/// 将绝对路径转为 `file://` URI。
pub fn from_path(path: &Path) -> Result<String, SaveError> {
    Url::from_file_path(path)
        .map(String::from)
        .map_err(|_| SaveError::TransferFailed(format!("不是绝对路径：{}", path.display())))
}
