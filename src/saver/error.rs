//! # 错误模型模块
//!
//! ## 设计思路
//!
//! 保存链路中所有失败来源统一收敛到 `SaveError`，调用侧按分支匹配，
//! 而不是解析字符串。通过 `thiserror` 保持人类可读消息。
//!
//! `code()` 提供稳定的机器可读标识，供前端与日志使用。

/// 选图/保存链路统一错误类型。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SaveError {
    #[error("尚未选择图片")]
    NoImageSelected,

    #[error("选择图片失败：{0}")]
    PickFailed(String),

    #[error("权限被拒绝：{0}")]
    PermissionDenied(String),

    #[error("保存失败：{0}")]
    TransferFailed(String),

    /// 已有一次保存在进行中（等价于 UI 层的按钮禁用）。
    #[error("正在保存，请稍候")]
    Busy,
}

impl SaveError {
    /// 稳定错误码。
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoImageSelected => "E_NO_IMAGE",
            Self::PickFailed(_) => "E_PICK_FAILED",
            Self::PermissionDenied(_) => "E_PERMISSION_DENIED",
            Self::TransferFailed(_) => "E_TRANSFER_FAILED",
            Self::Busy => "E_BUSY",
        }
    }

    /// 将 I/O 错误归类为传输失败，并附带阶段描述。
    pub(crate) fn transfer(stage: &str, error: impl std::fmt::Display) -> Self {
        Self::TransferFailed(format!("{stage}：{error}"))
    }
}

impl From<SaveError> for String {
    fn from(error: SaveError) -> Self {
        error.to_string()
    }
}
