//! # 保存策略抽象
//!
//! ## 设计思路
//!
//! 两种平台保存流程差异很大，抽象为 `SaveStrategy`，在组装阶段注入具体实现，
//! 而不是在流程中写平台分支。每种策略都能独立测试。
//!
//! `PlatformStrategy` 在应用构建时按平台选择其一，做静态分发。

use std::future::Future;

use serde::Serialize;

use super::{
    AlbumStrategy, DirectoryAccess, DirectoryStrategy, FileIo, PhotoLibrary, SaveError,
    SaveVariant, SelectedImage,
};

/// 单次保存的结果，不持久化，立即用于生成提示。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "details")]
pub enum SaveOutcome {
    Success,
    PermissionDenied,
    NoImageSelected,
    TransferFailed(String),
}

impl SaveOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

impl From<Result<(), SaveError>> for SaveOutcome {
    fn from(result: Result<(), SaveError>) -> Self {
        match result {
            Ok(()) => Self::Success,
            Err(SaveError::NoImageSelected) => Self::NoImageSelected,
            Err(SaveError::PermissionDenied(_)) => Self::PermissionDenied,
            Err(SaveError::TransferFailed(cause)) => Self::TransferFailed(cause),
            Err(other) => Self::TransferFailed(other.to_string()),
        }
    }
}

/// 授权之后的任何宿主失败都按传输失败上报。
pub(crate) fn as_transfer_failure(error: SaveError) -> SaveError {
    match error {
        SaveError::TransferFailed(_) => error,
        other => SaveError::TransferFailed(other.to_string()),
    }
}

pub trait SaveStrategy: Send + Sync {
    fn variant(&self) -> SaveVariant;

    /// 保存成功时展示给用户的提示。
    fn success_message(&self) -> String;

    fn save(&self, image: Option<&SelectedImage>) -> impl Future<Output = SaveOutcome> + Send;
}

/// 按平台选定的策略。
pub enum PlatformStrategy<D, F, L> {
    Directory(DirectoryStrategy<D, F>),
    Album(AlbumStrategy<L>),
}

impl<D, F, L> SaveStrategy for PlatformStrategy<D, F, L>
where
    D: DirectoryAccess,
    F: FileIo,
    L: PhotoLibrary,
{
    fn variant(&self) -> SaveVariant {
        match self {
            Self::Directory(strategy) => strategy.variant(),
            Self::Album(strategy) => strategy.variant(),
        }
    }

    fn success_message(&self) -> String {
        match self {
            Self::Directory(strategy) => strategy.success_message(),
            Self::Album(strategy) => strategy.success_message(),
        }
    }

    async fn save(&self, image: Option<&SelectedImage>) -> SaveOutcome {
        match self {
            Self::Directory(strategy) => strategy.save(image).await,
            Self::Album(strategy) => strategy.save(image).await,
        }
    }
}
