//! # 宿主能力接口
//!
//! ## 设计思路
//!
//! 选图器、目录授权、字节读写、相册四类宿主能力全部以 trait 表达，
//! 保存链路只依赖这些接口。真实实现位于 `crate::host`，测试使用内存替身。
//!
//! 所有方法返回 `Send` future，保证在 Tauri 命令中可直接 `.await`。

use std::future::Future;

use serde::{Deserialize, Serialize};

use super::{PickResult, PickerOptions, SaveError};

/// 用户对“写入某个目录”的一次授权结果。
///
/// 每次保存都重新申请，不缓存、不持久化。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryGrant {
    pub granted: bool,
    pub directory_uri: String,
}

impl DirectoryGrant {
    pub fn granted(directory_uri: impl Into<String>) -> Self {
        Self {
            granted: true,
            directory_uri: directory_uri.into(),
        }
    }

    pub fn denied() -> Self {
        Self {
            granted: false,
            directory_uri: String::new(),
        }
    }
}

/// 已登记到相册库的资源。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetHandle {
    pub id: String,
    pub uri: String,
}

/// 相册库中的具名相册，由宿主管理。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumHandle {
    pub id: String,
    pub name: String,
}

/// 宿主选图器。
pub trait ImagePicker: Send + Sync {
    fn launch(
        &self,
        options: &PickerOptions,
    ) -> impl Future<Output = Result<PickResult, SaveError>> + Send;
}

/// 目录授权与条目创建（目录型保存）。
pub trait DirectoryAccess: Send + Sync {
    fn request_directory_access(
        &self,
    ) -> impl Future<Output = Result<DirectoryGrant, SaveError>> + Send;

    /// 在授权目录中创建一个空条目，返回条目 URI。
    fn create_entry(
        &self,
        directory_uri: &str,
        name: &str,
        mime_type: &str,
    ) -> impl Future<Output = Result<String, SaveError>> + Send;
}

/// 以 base64 文本为载体的整文件读写。
pub trait FileIo: Send + Sync {
    fn read_all_base64(&self, uri: &str) -> impl Future<Output = Result<String, SaveError>> + Send;

    fn write_all_base64(
        &self,
        uri: &str,
        data: &str,
    ) -> impl Future<Output = Result<(), SaveError>> + Send;
}

/// 宿主相册库（相册型保存）。
pub trait PhotoLibrary: Send + Sync {
    /// 登记资源；需要的写入权限在此隐式申请，拒绝时返回 `PermissionDenied`。
    fn register_asset(&self, uri: &str)
    -> impl Future<Output = Result<AssetHandle, SaveError>> + Send;

    fn get_album(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<AlbumHandle>, SaveError>> + Send;

    /// 创建相册并放入种子资源，单次原子调用。
    fn create_album(
        &self,
        name: &str,
        seed: &AssetHandle,
    ) -> impl Future<Output = Result<AlbumHandle, SaveError>> + Send;

    fn add_assets_to_album(
        &self,
        assets: &[AssetHandle],
        album: &AlbumHandle,
    ) -> impl Future<Output = Result<(), SaveError>> + Send;
}
