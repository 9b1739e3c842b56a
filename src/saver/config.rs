//! # 配置模块
//!
//! ## 设计思路
//!
//! 将保存链路中的可调常量集中到 `SaverConfig`：相册名、兜底文件名、
//! 目标 MIME、选图参数，以及是否向用户展示细分的失败原因。
//!
//! 这是应用级配置，不记录任何用户偏好（例如上次选择的目录）。

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::PickerOptions;

pub const DEFAULT_ALBUM_NAME: &str = "MyApp";
pub const DEFAULT_FILE_NAME: &str = "image.jpg";
pub const DEFAULT_ENTRY_MIME_TYPE: &str = "image/jpeg";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaverConfig {
    /// 相册型保存使用的固定相册名。
    pub album_name: String,
    /// 无法从 URI 推导文件名时的兜底名称。
    pub fallback_file_name: String,
    /// 目录型保存创建条目时声明的 MIME。
    pub entry_mime_type: String,
    /// 为 `true` 时按失败类型给出不同提示；默认统一提示 "save failed"。
    pub detailed_feedback: bool,
    /// 本地相册库根目录；`None` 时由宿主层决定。
    pub library_root: Option<PathBuf>,
    pub picker: PickerOptions,
}

impl Default for SaverConfig {
    fn default() -> Self {
        Self {
            album_name: DEFAULT_ALBUM_NAME.to_string(),
            fallback_file_name: DEFAULT_FILE_NAME.to_string(),
            entry_mime_type: DEFAULT_ENTRY_MIME_TYPE.to_string(),
            detailed_feedback: false,
            library_root: None,
            picker: PickerOptions::default(),
        }
    }
}
