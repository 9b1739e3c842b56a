//! # 用户提示
//!
//! 每次用户操作最多产生一条提示。默认所有保存失败统一为 "save failed"；
//! 开启细分提示后按失败类型给出不同文案。

use serde::Serialize;

use super::{SaveError, SaveOutcome};

pub const SAVE_FAILED: &str = "save failed";
pub const SELECT_IMAGE_FIRST: &str = "select one image first";
pub const PICK_FAILED: &str = "failed to select image";
pub const PERMISSION_NOT_GRANTED: &str = "failed to grant permission";
pub const SAVE_IN_PROGRESS: &str = "save in progress";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Failure,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    /// 触发该提示的保存结果；选图相关提示为 `None`。
    pub outcome: Option<SaveOutcome>,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
            outcome: Some(SaveOutcome::Success),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Failure,
            message: message.into(),
            outcome: None,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
            outcome: None,
        }
    }

    pub fn with_outcome(mut self, outcome: SaveOutcome) -> Self {
        self.outcome = Some(outcome);
        self
    }

    /// 保存被拒绝进入（未选图或正在保存）时的提示。
    pub fn for_rejected_save(error: &SaveError) -> Self {
        match error {
            SaveError::NoImageSelected => {
                Self::info(SELECT_IMAGE_FIRST).with_outcome(SaveOutcome::NoImageSelected)
            }
            SaveError::Busy => Self::info(SAVE_IN_PROGRESS),
            other => Self::failure(SAVE_FAILED).with_outcome(SaveOutcome::TransferFailed(other.to_string())),
        }
    }

    /// 将失败的保存结果转为提示。
    pub fn for_failed_save(outcome: SaveOutcome, detailed: bool) -> Self {
        let message = match (&outcome, detailed) {
            (_, false) => SAVE_FAILED.to_string(),
            (SaveOutcome::PermissionDenied, true) => PERMISSION_NOT_GRANTED.to_string(),
            (SaveOutcome::NoImageSelected, true) => SELECT_IMAGE_FIRST.to_string(),
            (SaveOutcome::TransferFailed(cause), true) => format!("{SAVE_FAILED}: {cause}"),
            (SaveOutcome::Success, true) => SAVE_FAILED.to_string(),
        };
        Self::failure(message).with_outcome(outcome)
    }
}
