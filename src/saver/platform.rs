//! # 平台标识
//!
//! 平台在编译期确定，每个发布构建只会走一种保存方式：
//! iOS 写入具名相册，其余平台写入用户选择的目录。

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Android,
    Ios,
    Desktop,
}

impl Platform {
    pub const fn current() -> Self {
        if cfg!(target_os = "ios") {
            Self::Ios
        } else if cfg!(target_os = "android") {
            Self::Android
        } else {
            Self::Desktop
        }
    }

    pub const fn save_variant(self) -> SaveVariant {
        match self {
            Self::Ios => SaveVariant::Album,
            Self::Android | Self::Desktop => SaveVariant::Directory,
        }
    }
}

/// 保存方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveVariant {
    /// 用户选择目录后在其中新建文件。
    Directory,
    /// 登记到相册库并放入固定名称的相册。
    Album,
}

impl SaveVariant {
    pub const fn button_label(self) -> &'static str {
        match self {
            Self::Directory => "save to specified dir",
            Self::Album => "save to album",
        }
    }
}
