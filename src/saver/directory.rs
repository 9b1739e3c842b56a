//! # 目录型保存（Variant A）
//!
//! ## 实现思路
//!
//! 1. 未选图直接返回 `NoImageSelected`，不触发任何宿主调用
//! 2. 每次保存都重新申请目录授权，拒绝则 `PermissionDenied`
//! 3. 取 URI 最后一段作为文件名，取不到时用兜底名
//! 4. 在授权目录中新建条目（声明 `image/jpeg`）
//! 5. 交给传输引擎写入内容
//!
//! 条目创建后若传输失败，空条目可能残留在用户目录中；这里只记录告警，不做清理。

use super::strategy::as_transfer_failure;
use super::{
    DirectoryAccess, FileIo, SaveError, SaveOutcome, SaveStrategy, SaveVariant, SaverConfig,
    SelectedImage, TransferEngine,
};

pub struct DirectoryStrategy<D, F> {
    access: D,
    io: F,
    fallback_file_name: String,
    entry_mime_type: String,
}

impl<D: DirectoryAccess, F: FileIo> DirectoryStrategy<D, F> {
    pub fn new(access: D, io: F, config: &SaverConfig) -> Self {
        Self {
            access,
            io,
            fallback_file_name: config.fallback_file_name.clone(),
            entry_mime_type: config.entry_mime_type.clone(),
        }
    }

    pub fn access(&self) -> &D {
        &self.access
    }

    pub fn io(&self) -> &F {
        &self.io
    }

    pub async fn save_to_directory(&self, image: Option<&SelectedImage>) -> SaveOutcome {
        let result = self.try_save(image).await;
        if let Err(err) = &result {
            log::error!("目录保存失败 [{}]: {}", err.code(), err);
        }
        SaveOutcome::from(result)
    }

    async fn try_save(&self, image: Option<&SelectedImage>) -> Result<(), SaveError> {
        let image = image.ok_or(SaveError::NoImageSelected)?;

        let grant = self
            .access
            .request_directory_access()
            .await
            .map_err(|err| match err {
                SaveError::PermissionDenied(_) => err,
                other => as_transfer_failure(other),
            })?;
        if !grant.granted {
            return Err(SaveError::PermissionDenied("用户未授予目录写入权限".to_string()));
        }

        let file_name = derive_file_name(&image.uri, &self.fallback_file_name);
        let entry_uri = self
            .access
            .create_entry(&grant.directory_uri, &file_name, &self.entry_mime_type)
            .await
            .map_err(as_transfer_failure)?;
        log::info!("save destination: {}", entry_uri);

        if let Err(err) = TransferEngine::new(&self.io).copy(&image.uri, &entry_uri).await {
            log::warn!("⚠️ 内容写入失败，已创建的空条目可能残留: {}", entry_uri);
            return Err(as_transfer_failure(err));
        }

        Ok(())
    }
}

impl<D: DirectoryAccess, F: FileIo> SaveStrategy for DirectoryStrategy<D, F> {
    fn variant(&self) -> SaveVariant {
        SaveVariant::Directory
    }

    fn success_message(&self) -> String {
        "saved!".to_string()
    }

    async fn save(&self, image: Option<&SelectedImage>) -> SaveOutcome {
        self.save_to_directory(image).await
    }
}

/// 取 URI 中最后一个 `/` 之后的片段作为文件名，为空时返回兜底名。
pub fn derive_file_name(uri: &str, fallback: &str) -> String {
    match uri.rsplit('/').next() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => fallback.to_string(),
    }
}
