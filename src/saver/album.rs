//! # 相册型保存（Variant B）
//!
//! ## 实现思路
//!
//! 1. 未选图返回 `NoImageSelected`
//! 2. 将图片登记为相册库资源（隐式申请写入权限，拒绝则 `PermissionDenied`）
//! 3. 按固定名称查找相册：不存在时以该资源为种子创建（单次原子调用，不再单独插入）
//! 4. 已存在时把资源加入相册；重复加入由宿主语义决定，这里不去重
//!
//! 字节搬运完全由宿主相册库负责，不经过传输引擎。

use std::slice;

use super::strategy::as_transfer_failure;
use super::{PhotoLibrary, SaveError, SaveOutcome, SaveStrategy, SaveVariant, SaverConfig, SelectedImage};

pub struct AlbumStrategy<L> {
    library: L,
    album_name: String,
}

impl<L: PhotoLibrary> AlbumStrategy<L> {
    pub fn new(library: L, config: &SaverConfig) -> Self {
        Self {
            library,
            album_name: config.album_name.clone(),
        }
    }

    pub fn library(&self) -> &L {
        &self.library
    }

    pub fn album_name(&self) -> &str {
        &self.album_name
    }

    pub async fn save_to_album(&self, image: Option<&SelectedImage>) -> SaveOutcome {
        let result = self.try_save(image).await;
        if let Err(err) = &result {
            log::error!("相册保存失败 [{}]: {}", err.code(), err);
        }
        SaveOutcome::from(result)
    }

    async fn try_save(&self, image: Option<&SelectedImage>) -> Result<(), SaveError> {
        let image = image.ok_or(SaveError::NoImageSelected)?;

        let asset = self
            .library
            .register_asset(&image.uri)
            .await
            .map_err(|err| match err {
                SaveError::PermissionDenied(_) => err,
                other => as_transfer_failure(other),
            })?;

        let album = self
            .library
            .get_album(&self.album_name)
            .await
            .map_err(as_transfer_failure)?;

        match album {
            None => {
                let created = self
                    .library
                    .create_album(&self.album_name, &asset)
                    .await
                    .map_err(as_transfer_failure)?;
                log::info!("📁 已创建相册 {}（{}）并放入资源 {}", created.name, created.id, asset.id);
            }
            Some(album) => {
                self.library
                    .add_assets_to_album(slice::from_ref(&asset), &album)
                    .await
                    .map_err(as_transfer_failure)?;
                log::info!("已将资源 {} 加入相册 {}", asset.id, album.name);
            }
        }

        Ok(())
    }
}

impl<L: PhotoLibrary> SaveStrategy for AlbumStrategy<L> {
    fn variant(&self) -> SaveVariant {
        SaveVariant::Album
    }

    fn success_message(&self) -> String {
        format!("Save to {}!", self.album_name)
    }

    async fn save(&self, image: Option<&SelectedImage>) -> SaveOutcome {
        self.save_to_album(image).await
    }
}
