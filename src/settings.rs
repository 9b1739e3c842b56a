//! 应用配置加载
//!
//! 从应用配置目录读取可选的 `config.json`，缺省字段使用 `SaverConfig` 默认值。
//! 这里只读取应用配置，不写回任何用户选择。

use std::fs;
use std::path::{Path, PathBuf};

use tauri::{AppHandle, Manager};

use crate::error::AppError;
use crate::saver::SaverConfig;

const CONFIG_FILE_NAME: &str = "config.json";

fn config_file_path(app: &AppHandle) -> Result<PathBuf, AppError> {
    let config_dir = app
        .path()
        .app_config_dir()
        .map_err(|e| AppError::Storage(format!("获取应用配置目录失败: {}", e)))?;

    Ok(config_dir.join(CONFIG_FILE_NAME))
}

pub fn load_saver_config(app: &AppHandle) -> Result<SaverConfig, AppError> {
    load_from_path(&config_file_path(app)?)
}

/// 文件不存在时返回默认配置；内容无法解析时报错。
pub fn load_from_path(path: &Path) -> Result<SaverConfig, AppError> {
    if !path.exists() {
        log::info!("未找到配置文件 {}，使用默认配置", path.display());
        return Ok(SaverConfig::default());
    }

    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| AppError::Storage(format!("解析配置文件失败: {}", e)))
}
