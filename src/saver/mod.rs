//! # 图片保存模块（saver）
//!
//! ## 设计思路
//!
//! 整个应用的核心是“按平台分叉的保存流程”。该模块把它拆成：
//!
//! - `picker`：选图适配器（取消/成功/失败三种结果）
//! - `directory`：目录型保存（授权 → 建条目 → 传输）
//! - `album`：相册型保存（登记资源 → 查找/创建相册 → 加入）
//! - `transfer`：base64 整文件传输引擎
//! - `strategy`：`SaveStrategy` 抽象与按平台分发
//! - `orchestrator`：`Idle → Saving → Idle` 编排与提示收敛
//! - `view`：唯一的可变状态（选中图片 + loading）
//! - `capability`：宿主能力 trait，真实实现见 `crate::host`
//! - `config/error/feedback/platform/source`：配置、错误、提示、平台与数据模型
//!
//! ## 调用链
//!
//! ```text
//! 前端 invoke
//!    ↓
//! commands.rs（参数适配）
//!    ↓
//! ImageSourceAdapter::pick_into ──→ ViewController::select
//!    ↓
//! SaveOrchestrator::save
//!    ├─ ViewController::begin_save（LoadingGuard）
//!    └─ SaveStrategy
//!         ├─ DirectoryStrategy ──→ TransferEngine
//!         └─ AlbumStrategy
//!    ↓
//! Notice 返回前端
//! ```

mod album;
mod capability;
mod config;
mod directory;
mod error;
mod feedback;
mod orchestrator;
mod picker;
mod platform;
mod source;
mod strategy;
mod transfer;
mod view;

#[cfg(test)]
pub(crate) mod testing;

pub use album::AlbumStrategy;
pub use capability::{
    AlbumHandle, AssetHandle, DirectoryAccess, DirectoryGrant, FileIo, ImagePicker, PhotoLibrary,
};
pub use config::{DEFAULT_ALBUM_NAME, DEFAULT_ENTRY_MIME_TYPE, DEFAULT_FILE_NAME, SaverConfig};
pub use directory::{DirectoryStrategy, derive_file_name};
pub use error::SaveError;
pub use feedback::{Notice, NoticeKind};
pub use orchestrator::SaveOrchestrator;
pub use picker::ImageSourceAdapter;
pub use platform::{Platform, SaveVariant};
pub use source::{MediaKind, PickResult, PickedAsset, PickerOptions, SelectedImage};
pub use strategy::{PlatformStrategy, SaveOutcome, SaveStrategy};
pub use transfer::TransferEngine;
pub use view::{LoadingGuard, SaveButton, ViewController, ViewModel, ViewState};
