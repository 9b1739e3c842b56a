//! # 选图适配器
//!
//! 以“仅图片、原图质量、允许编辑”启动宿主选图器：
//! - 用户取消：返回 `None`，不改动已有选择
//! - 成功：取第一个资源作为新的选中图片
//! - 宿主失败：归类为 `PickFailed`，上层统一提示 "failed to select image"

use super::{ImagePicker, Notice, PickerOptions, SaveError, SelectedImage, ViewController};
use super::feedback::{PICK_FAILED, SAVE_IN_PROGRESS};

pub struct ImageSourceAdapter<P> {
    picker: P,
    options: PickerOptions,
}

impl<P: ImagePicker> ImageSourceAdapter<P> {
    pub fn new(picker: P, options: PickerOptions) -> Self {
        Self { picker, options }
    }

    pub fn picker(&self) -> &P {
        &self.picker
    }

    pub async fn pick_image(&self) -> Result<Option<SelectedImage>, SaveError> {
        let result = self.picker.launch(&self.options).await.map_err(|err| match err {
            SaveError::PickFailed(_) => err,
            other => SaveError::PickFailed(other.to_string()),
        })?;

        if result.canceled {
            log::debug!("用户取消选图");
            return Ok(None);
        }

        let asset = result
            .assets
            .into_iter()
            .next()
            .ok_or_else(|| SaveError::PickFailed("选图器未返回任何资源".to_string()))?;

        Ok(Some(SelectedImage::from(asset)))
    }

    /// 选图并写入视图状态，返回需要展示的提示（若有）。
    pub async fn pick_into(&self, view: &ViewController) -> Option<Notice> {
        if view.ensure_idle().is_err() {
            return Some(Notice::info(SAVE_IN_PROGRESS));
        }

        match self.pick_image().await {
            Ok(None) => None,
            Ok(Some(image)) => {
                log::info!("🖼️ 已选择图片: {} ({})", image.uri, image.mime_type);
                view.select(image)
                    .err()
                    .map(|_| Notice::info(SAVE_IN_PROGRESS))
            }
            Err(err) => {
                log::error!("failed to select image: {}", err);
                Some(Notice::failure(PICK_FAILED))
            }
        }
    }
}
