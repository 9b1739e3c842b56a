//! # 系统对话框适配
//!
//! ## 设计思路
//!
//! 通过 `tauri-plugin-dialog` 提供两类宿主能力：
//! - `DialogImagePicker`：仅图片的文件选择器
//! - `DialogDirectoryAccess`：目录选择器，选中即视为授权写入该目录
//!
//! 对话框调用是阻塞的，统一放到 `spawn_blocking` 中执行，避免阻塞 async 运行时。
//! 系统文件对话框不提供内置编辑，`allow_editing` 仅记录日志。

use std::path::Path;

use tauri::{AppHandle, Wry};
use tauri_plugin_dialog::{DialogExt, FilePath};

use super::{fs, uri};
use crate::saver::{
    DirectoryAccess, DirectoryGrant, ImagePicker, PickResult, PickedAsset, PickerOptions,
    SaveError,
};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp", "heic", "tif", "tiff"];

pub struct DialogImagePicker {
    app: AppHandle<Wry>,
}

impl DialogImagePicker {
    pub fn new(app: AppHandle<Wry>) -> Self {
        Self { app }
    }
}

impl ImagePicker for DialogImagePicker {
    async fn launch(&self, options: &PickerOptions) -> Result<PickResult, SaveError> {
        if options.allow_editing {
            log::debug!("系统文件对话框不支持选图后编辑，忽略 allow_editing");
        }

        let dialog = self
            .app
            .dialog()
            .file()
            .set_title("select image")
            .add_filter("Images", IMAGE_EXTENSIONS);

        tauri::async_runtime::spawn_blocking(move || {
            let Some(picked) = dialog.blocking_pick_file() else {
                return Ok(PickResult::canceled());
            };
            describe_asset(picked).map(PickResult::single)
        })
        .await
        .map_err(|e| SaveError::PickFailed(format!("选图对话框异常: {}", e)))?
        .map_err(|e| SaveError::PickFailed(e.to_string()))
    }
}

pub struct DialogDirectoryAccess {
    app: AppHandle<Wry>,
}

impl DialogDirectoryAccess {
    pub fn new(app: AppHandle<Wry>) -> Self {
        Self { app }
    }
}

impl DirectoryAccess for DialogDirectoryAccess {
    async fn request_directory_access(&self) -> Result<DirectoryGrant, SaveError> {
        let picked = pick_folder(&self.app).await?;

        Ok(match picked {
            Some(directory) => DirectoryGrant::granted(file_path_to_uri(directory)?),
            None => DirectoryGrant::denied(),
        })
    }

    async fn create_entry(
        &self,
        directory_uri: &str,
        name: &str,
        mime_type: &str,
    ) -> Result<String, SaveError> {
        fs::create_entry(directory_uri, name, mime_type).await
    }
}

#[cfg(desktop)]
async fn pick_folder(app: &AppHandle<Wry>) -> Result<Option<FilePath>, SaveError> {
    let dialog = app.dialog().file().set_title("select a folder to save");

    tauri::async_runtime::spawn_blocking(move || dialog.blocking_pick_folder())
        .await
        .map_err(|e| SaveError::transfer("目录选择对话框异常", e))
}

// tauri-plugin-dialog 仅在桌面端提供目录选择，移动端直接报告失败。
#[cfg(mobile)]
async fn pick_folder(_app: &AppHandle<Wry>) -> Result<Option<FilePath>, SaveError> {
    Err(SaveError::TransferFailed("当前平台不支持目录选择".to_string()))
}

fn file_path_to_uri(path: FilePath) -> Result<String, SaveError> {
    match path {
        FilePath::Url(url) => Ok(url.into()),
        FilePath::Path(path) => uri::from_path(&path),
    }
}

/// 补充 MIME 与尺寸；读取失败时留空，由上层按扩展名兜底。
fn describe_asset(picked: FilePath) -> Result<PickedAsset, SaveError> {
    let local = match &picked {
        FilePath::Path(path) => Some(path.clone()),
        FilePath::Url(_) => None,
    };
    let mut asset = PickedAsset::from_uri(file_path_to_uri(picked)?);

    if let Some(path) = local {
        asset.mime_type = sniff_mime(&path);
        match image::image_dimensions(&path) {
            Ok((width, height)) => {
                asset.width = Some(width);
                asset.height = Some(height);
            }
            Err(err) => log::debug!("读取图片尺寸失败 {}: {}", path.display(), err),
        }
    }

    Ok(asset)
}

fn sniff_mime(path: &Path) -> Option<String> {
    match infer::get_from_path(path) {
        Ok(Some(kind)) => Some(kind.mime_type().to_string()),
        Ok(None) => None,
        Err(err) => {
            log::debug!("识别文件类型失败 {}: {}", path.display(), err);
            None
        }
    }
}
