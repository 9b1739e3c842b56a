//! 宿主能力的内存替身，仅用于单元测试。

use std::collections::HashMap;
use std::sync::Mutex;

use base64::{Engine as _, engine::general_purpose};

use super::{
    AlbumHandle, AssetHandle, DirectoryAccess, DirectoryGrant, FileIo, ImagePicker, PhotoLibrary,
    PickResult, PickerOptions, SaveError,
};

pub(crate) struct FakePicker {
    response: Result<PickResult, SaveError>,
    pub(crate) launches: Mutex<Vec<PickerOptions>>,
}

impl FakePicker {
    pub(crate) fn returning(response: Result<PickResult, SaveError>) -> Self {
        Self {
            response,
            launches: Mutex::new(Vec::new()),
        }
    }
}

impl ImagePicker for FakePicker {
    async fn launch(&self, options: &PickerOptions) -> Result<PickResult, SaveError> {
        self.launches.lock().unwrap().push(options.clone());
        self.response.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CreatedEntry {
    pub(crate) directory_uri: String,
    pub(crate) name: String,
    pub(crate) mime_type: String,
}

pub(crate) struct FakeDirectoryAccess {
    grant: Result<DirectoryGrant, SaveError>,
    create_error: Option<SaveError>,
    pub(crate) requests: Mutex<usize>,
    pub(crate) created: Mutex<Vec<CreatedEntry>>,
}

impl FakeDirectoryAccess {
    pub(crate) fn granting(directory_uri: &str) -> Self {
        Self::with_grant(Ok(DirectoryGrant::granted(directory_uri)))
    }

    pub(crate) fn denying() -> Self {
        Self::with_grant(Ok(DirectoryGrant::denied()))
    }

    pub(crate) fn with_grant(grant: Result<DirectoryGrant, SaveError>) -> Self {
        Self {
            grant,
            create_error: None,
            requests: Mutex::new(0),
            created: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing_create(mut self, error: SaveError) -> Self {
        self.create_error = Some(error);
        self
    }

    pub(crate) fn created(&self) -> Vec<CreatedEntry> {
        self.created.lock().unwrap().clone()
    }
}

impl DirectoryAccess for FakeDirectoryAccess {
    async fn request_directory_access(&self) -> Result<DirectoryGrant, SaveError> {
        *self.requests.lock().unwrap() += 1;
        self.grant.clone()
    }

    async fn create_entry(
        &self,
        directory_uri: &str,
        name: &str,
        mime_type: &str,
    ) -> Result<String, SaveError> {
        if let Some(error) = &self.create_error {
            return Err(error.clone());
        }
        self.created.lock().unwrap().push(CreatedEntry {
            directory_uri: directory_uri.to_string(),
            name: name.to_string(),
            mime_type: mime_type.to_string(),
        });
        Ok(format!("{directory_uri}/{name}"))
    }
}

/// 以 URI 为键的内存文件表，写入时按 base64 解码。
#[derive(Default)]
pub(crate) struct MemoryFileIo {
    files: Mutex<HashMap<String, Vec<u8>>>,
    writes: Mutex<Vec<(String, String)>>,
    write_error: Option<SaveError>,
}

impl MemoryFileIo {
    pub(crate) fn failing_write(error: SaveError) -> Self {
        Self {
            write_error: Some(error),
            ..Self::default()
        }
    }

    pub(crate) fn put(&self, uri: &str, bytes: Vec<u8>) {
        self.files.lock().unwrap().insert(uri.to_string(), bytes);
    }

    pub(crate) fn get(&self, uri: &str) -> Option<Vec<u8>> {
        self.files.lock().unwrap().get(uri).cloned()
    }

    /// 所有写入调用：`(uri, base64 文本)`。
    pub(crate) fn writes(&self) -> Vec<(String, String)> {
        self.writes.lock().unwrap().clone()
    }
}

impl FileIo for MemoryFileIo {
    async fn read_all_base64(&self, uri: &str) -> Result<String, SaveError> {
        let files = self.files.lock().unwrap();
        let bytes = files
            .get(uri)
            .ok_or_else(|| SaveError::transfer("读取源文件", format!("{uri} 不存在")))?;
        Ok(general_purpose::STANDARD.encode(bytes))
    }

    async fn write_all_base64(&self, uri: &str, data: &str) -> Result<(), SaveError> {
        if let Some(error) = &self.write_error {
            return Err(error.clone());
        }
        let bytes = general_purpose::STANDARD
            .decode(data)
            .map_err(|e| SaveError::transfer("解码 base64", e))?;
        self.writes
            .lock()
            .unwrap()
            .push((uri.to_string(), data.to_string()));
        self.files.lock().unwrap().insert(uri.to_string(), bytes);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LibraryCall {
    Register(String),
    GetAlbum(String),
    CreateAlbum { name: String, seed: String },
    AddAssets { album: String, assets: Vec<String> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LibraryStep {
    Register,
    GetAlbum,
    CreateAlbum,
    AddAssets,
}

#[derive(Default)]
pub(crate) struct FakePhotoLibrary {
    albums: Mutex<HashMap<String, AlbumHandle>>,
    calls: Mutex<Vec<LibraryCall>>,
    deny_permission: bool,
    failing_step: Option<LibraryStep>,
}

impl FakePhotoLibrary {
    pub(crate) fn with_album(name: &str) -> Self {
        let library = Self::default();
        library.albums.lock().unwrap().insert(
            name.to_string(),
            AlbumHandle {
                id: "album-1".to_string(),
                name: name.to_string(),
            },
        );
        library
    }

    pub(crate) fn denying_permission() -> Self {
        Self {
            deny_permission: true,
            ..Self::default()
        }
    }

    pub(crate) fn failing_at(mut self, step: LibraryStep) -> Self {
        self.failing_step = Some(step);
        self
    }

    pub(crate) fn calls(&self) -> Vec<LibraryCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: LibraryCall, step: LibraryStep) -> Result<(), SaveError> {
        self.calls.lock().unwrap().push(call);
        if self.failing_step == Some(step) {
            return Err(SaveError::TransferFailed(format!("{step:?} failed")));
        }
        Ok(())
    }
}

impl PhotoLibrary for FakePhotoLibrary {
    async fn register_asset(&self, uri: &str) -> Result<AssetHandle, SaveError> {
        if self.deny_permission {
            return Err(SaveError::PermissionDenied("photo library".to_string()));
        }
        self.record(LibraryCall::Register(uri.to_string()), LibraryStep::Register)?;
        Ok(AssetHandle {
            id: format!("asset:{uri}"),
            uri: uri.to_string(),
        })
    }

    async fn get_album(&self, name: &str) -> Result<Option<AlbumHandle>, SaveError> {
        self.record(LibraryCall::GetAlbum(name.to_string()), LibraryStep::GetAlbum)?;
        Ok(self.albums.lock().unwrap().get(name).cloned())
    }

    async fn create_album(&self, name: &str, seed: &AssetHandle) -> Result<AlbumHandle, SaveError> {
        self.record(
            LibraryCall::CreateAlbum {
                name: name.to_string(),
                seed: seed.id.clone(),
            },
            LibraryStep::CreateAlbum,
        )?;
        let album = AlbumHandle {
            id: format!("album:{name}"),
            name: name.to_string(),
        };
        self.albums
            .lock()
            .unwrap()
            .insert(name.to_string(), album.clone());
        Ok(album)
    }

    async fn add_assets_to_album(
        &self,
        assets: &[AssetHandle],
        album: &AlbumHandle,
    ) -> Result<(), SaveError> {
        self.record(
            LibraryCall::AddAssets {
                album: album.name.clone(),
                assets: assets.iter().map(|a| a.id.clone()).collect(),
            },
            LibraryStep::AddAssets,
        )
    }
}
