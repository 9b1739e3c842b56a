//! # 数据源与中间模型
//!
//! ## 设计思路
//!
//! 将“宿主选图器的原始返回”和“应用持有的选中图片”解耦：
//! - `PickResult` / `PickedAsset` 表示宿主选图器的返回语义
//! - `SelectedImage` 表示视图状态中唯一存活的选中图片

use serde::{Deserialize, Serialize};

/// 选图器允许的媒体类型。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Images,
}

/// 选图器启动参数。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerOptions {
    pub media_kind: MediaKind,
    /// 压缩质量，`1.0` 表示原图质量。
    pub quality: f32,
    /// 是否允许在选图器内裁剪编辑。
    pub allow_editing: bool,
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self {
            media_kind: MediaKind::Images,
            quality: 1.0,
            allow_editing: true,
        }
    }
}

/// 宿主选图器返回的单个资源。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickedAsset {
    pub uri: String,
    pub mime_type: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl PickedAsset {
    pub fn from_uri(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            mime_type: None,
            width: None,
            height: None,
        }
    }
}

/// 宿主选图器的一次返回。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PickResult {
    pub canceled: bool,
    pub assets: Vec<PickedAsset>,
}

impl PickResult {
    pub fn canceled() -> Self {
        Self {
            canceled: true,
            assets: Vec::new(),
        }
    }

    pub fn single(asset: PickedAsset) -> Self {
        Self {
            canceled: false,
            assets: vec![asset],
        }
    }
}

/// 当前选中的图片。
///
/// 每次选图整体替换，不做原地修改。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedImage {
    pub uri: String,
    pub mime_type: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl SelectedImage {
    pub fn new(uri: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            mime_type: mime_type.into(),
            width: None,
            height: None,
        }
    }
}

impl From<PickedAsset> for SelectedImage {
    fn from(asset: PickedAsset) -> Self {
        let mime_type = asset
            .mime_type
            .unwrap_or_else(|| mime_from_extension(&asset.uri).to_string());
        Self {
            uri: asset.uri,
            mime_type,
            width: asset.width,
            height: asset.height,
        }
    }
}

/// 宿主未给出 MIME 时按扩展名推断。
fn mime_from_extension(uri: &str) -> &'static str {
    let ext = uri
        .rsplit('/')
        .next()
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase());

    match ext.as_deref() {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("heic") => "image/heic",
        Some("bmp") => "image/bmp",
        _ => "image/jpeg",
    }
}
